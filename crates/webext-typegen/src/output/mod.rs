//! Declaration file assembly.
//!
//! Namespaces come out of the [`SchemaTable`](crate::merge::SchemaTable)
//! in name order, each compiled into one `declare namespace` block with
//! banner-separated sections for types, properties, functions, and
//! events.

pub mod docs;
mod typescript;

pub use typescript::CompileError;

use tracing::debug;

use crate::ir::Namespace;
use crate::merge::SchemaTable;
use docs::{doc_comment, render_description};
use typescript::{TsCompiler, indent_block};

/// One indent level of emitted TypeScript.
pub(crate) const INDENT: &str = "    ";

const HEADER: &str = r#"// Type declarations for WebExtension API schemas.
// Generated from the JSON schema documents; do not edit by hand.

interface WebExtEvent<TCallback extends (...args: any[]) => any> {
    addListener(callback: TCallback): void;
    removeListener(callback: TCallback): void;
    hasListener(callback: TCallback): boolean;
}"#;

/// Output shaping knobs.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Umbrella object the namespace blocks hang off.
    pub root: String,
    /// Emit closed string sets with the `enum` keyword instead of
    /// literal unions.
    pub enum_keyword: bool,
    /// Prepend the file banner and the `WebExtEvent` listener interface.
    pub header: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            root: "browser".to_string(),
            enum_keyword: false,
            header: true,
        }
    }
}

/// Render the complete declaration file for every namespace in the table.
pub fn emit_declarations(
    table: &SchemaTable,
    options: &EmitOptions,
) -> Result<String, CompileError> {
    let mut blocks: Vec<String> = Vec::new();
    if options.header {
        blocks.push(HEADER.to_string());
    }
    for name in table.names() {
        if let Some(block) = emit_namespace(table, name, options)? {
            blocks.push(block);
        }
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    Ok(out)
}

fn emit_namespace(
    table: &SchemaTable,
    name: &str,
    options: &EmitOptions,
) -> Result<Option<String>, CompileError> {
    let Some(ns) = table.namespace_for_emit(name) else {
        return Ok(None);
    };
    let mut compiler = TsCompiler::new(table, name, options);

    let mut types: Vec<String> = Vec::new();
    for node in &ns.types {
        let declaration = compiler.root_declaration(node)?;
        if !declaration.is_empty() {
            types.push(declaration);
        }
    }
    let mut properties: Vec<String> = Vec::new();
    for (member, node) in &ns.properties {
        properties.push(compiler.namespace_property(member, node)?);
    }
    let mut functions: Vec<String> = Vec::new();
    for function in &ns.functions {
        functions.push(compiler.namespace_function(function)?);
    }
    let mut events: Vec<String> = Vec::new();
    for event in &ns.events {
        events.push(compiler.namespace_event(event)?);
    }
    // Helpers synthesized anywhere in the namespace print under the types
    // banner, after the declared types.
    types.extend(compiler.sink.take());

    let mut sections: Vec<String> = Vec::new();
    if !types.is_empty() {
        sections.push(section(name, "types", &types));
    }
    if !properties.is_empty() {
        sections.push(section(name, "properties", &properties));
    }
    if !functions.is_empty() {
        sections.push(section(name, "functions", &functions));
    }
    if !events.is_empty() {
        sections.push(section(name, "events", &events));
    }
    if sections.is_empty() {
        debug!(namespace = %name, "empty namespace skipped");
        return Ok(None);
    }

    let mut block = String::new();
    if let Some(doc) = namespace_doc(&ns) {
        block.push_str(&doc_comment(&doc, 0));
    }
    block.push_str(&format!("declare namespace {}.{name} {{\n", options.root));
    block.push_str(&indent_block(&sections.join("\n\n"), 1));
    block.push_str("\n}");
    Ok(Some(block))
}

fn section(namespace: &str, label: &str, declarations: &[String]) -> String {
    format!("/* {namespace} {label} */\n{}", declarations.join("\n\n"))
}

fn namespace_doc(ns: &Namespace) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(description) = ns.description.as_deref() {
        parts.push(render_description(description));
    }
    if !ns.permissions.is_empty() {
        parts.push(format!("Permissions: {}", backtick_list(&ns.permissions)));
    }
    if !ns.allowed_contexts.is_empty() {
        parts.push(format!(
            "Allowed contexts: {}",
            backtick_list(&ns.allowed_contexts)
        ));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

fn backtick_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("`{item}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
