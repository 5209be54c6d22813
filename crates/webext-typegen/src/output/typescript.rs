//! TypeScript declaration compilation.
//!
//! One [`TsCompiler`] exists per namespace being emitted. It holds the
//! namespace table for reference resolution, the emission options, and a
//! declaration sink collecting hoisted helper types that are printed ahead
//! of the namespace's other members.

use std::collections::HashSet;
use std::sync::LazyLock;

use tracing::warn;

use crate::ir::{AdditionalProperties, Deprecation, FunctionNode, TypeNode, TypeOverride};
use crate::merge::SchemaTable;
use crate::output::docs::{doc_comment, render_description};
use crate::output::{EmitOptions, INDENT};

/// Words that cannot name a `function` declaration or parameter.
static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A type node matched no compilation rule. Continuing would silently
    /// produce wrong output, so the run aborts with the node attached.
    #[error("no compilation rule matches a type node in `{namespace}`: {node}")]
    UnmatchedNode { namespace: String, node: String },
}

/// Per-namespace accumulator for hoisted helper declarations.
///
/// Entries are complete declaration texts; identical entries collapse to
/// one.
#[derive(Debug, Default)]
pub(crate) struct DeclarationSink {
    entries: Vec<String>,
}

impl DeclarationSink {
    fn push(&mut self, declaration: String) {
        if !self.entries.contains(&declaration) {
            self.entries.push(declaration);
        }
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.entries)
    }
}

/// Identifier context threaded through recursive compilation.
#[derive(Debug, Clone)]
struct Ctx {
    /// Synthesized identifier for the node being compiled, used to name
    /// hoisted helpers.
    id: Option<String>,
    /// Whether the node sits at the root of a declaration.
    root: bool,
    /// Indent level of the line the expression starts on.
    depth: usize,
}

impl Ctx {
    /// Context for a child expression on the same line.
    fn nested(&self) -> Self {
        Self {
            id: self.id.clone(),
            root: false,
            depth: self.depth,
        }
    }
}

/// One parameter occurrence within a concrete signature.
#[derive(Debug, Clone, Copy)]
struct Param<'a> {
    node: &'a TypeNode,
    optional: bool,
}

pub(crate) struct TsCompiler<'a> {
    table: &'a SchemaTable,
    namespace: &'a str,
    options: &'a EmitOptions,
    pub(crate) sink: DeclarationSink,
}

impl<'a> TsCompiler<'a> {
    pub(crate) fn new(table: &'a SchemaTable, namespace: &'a str, options: &'a EmitOptions) -> Self {
        Self {
            table,
            namespace,
            options,
            sink: DeclarationSink::default(),
        }
    }

    /// Compile a root-level type into a complete declaration.
    pub(crate) fn root_declaration(&mut self, node: &TypeNode) -> Result<String, CompileError> {
        let Some(name) = node.id.clone().or_else(|| node.name.clone()) else {
            warn!(namespace = %self.namespace, "skipping anonymous root type");
            return Ok(String::new());
        };
        let mut out = String::new();
        if let Some(doc) = doc_for_node(node) {
            out.push_str(&doc_comment(&doc, 0));
        }
        if node.override_.is_none() && node.choices.is_empty() && node.is_enum() {
            out.push_str(&self.enum_declaration(&name, node, 0));
            return Ok(out);
        }
        let ctx = Ctx {
            id: Some(name.clone()),
            root: true,
            depth: 0,
        };
        let expr = self.compile_type(node, &ctx)?;
        if node.choices.is_empty() && expr.starts_with('{') {
            out.push_str(&format!("interface {name} {expr}"));
        } else {
            out.push_str(&format!("type {name} = {expr};"));
        }
        Ok(out)
    }

    /// Compile a namespace-level constant.
    pub(crate) fn namespace_property(
        &mut self,
        name: &str,
        node: &TypeNode,
    ) -> Result<String, CompileError> {
        let ctx = Ctx {
            id: Some(name.to_string()),
            root: false,
            depth: 0,
        };
        let ty = self.compile_type(node, &ctx)?;
        let ty = if node.optional {
            format!("{ty} | undefined")
        } else {
            ty
        };
        let mut out = String::new();
        if let Some(doc) = doc_for_node(node) {
            out.push_str(&doc_comment(&doc, 0));
        }
        out.push_str(&format!("const {name}: {ty};"));
        Ok(out)
    }

    /// Compile a namespace-level function into its full overload set.
    pub(crate) fn namespace_function(
        &mut self,
        function: &FunctionNode,
    ) -> Result<String, CompileError> {
        let (signatures, ret) = self.signature_set(function, 0)?;
        let (declared, original) = declaration_name(&function.name);
        if let Some(original) = original {
            self.sink.push(format!("export {{ {declared} as {original} }};"));
        }
        let mut declarations: Vec<String> = Vec::with_capacity(signatures.len());
        for params in &signatures {
            let mut out = String::new();
            if let Some(doc) = self.signature_doc(function, params) {
                out.push_str(&doc_comment(&doc, 0));
            }
            let list = self.param_list(Some(&function.name), params, 0)?;
            out.push_str(&format!("function {declared}({list}): {ret};"));
            declarations.push(out);
        }
        Ok(declarations.join("\n"))
    }

    /// Compile a namespace-level event member.
    pub(crate) fn namespace_event(&mut self, event: &FunctionNode) -> Result<String, CompileError> {
        let ty = self.event_type_expr(event, 0)?;
        let ty = if event.optional {
            format!("{ty} | undefined")
        } else {
            ty
        };
        let mut out = String::new();
        if let Some(doc) = self.event_doc(event) {
            out.push_str(&doc_comment(&doc, 0));
        }
        out.push_str(&format!("const {}: {ty};", event.name));
        Ok(out)
    }

    /// Compile one type node to a type expression.
    ///
    /// Branches are not orthogonal in the schema dialect; the first match
    /// wins, in this order: override, choices, enum, object, array,
    /// function, primitive, reference, literal value.
    fn compile_type(&mut self, node: &TypeNode, ctx: &Ctx) -> Result<String, CompileError> {
        if let Some(override_) = &node.override_ {
            return Ok(match override_ {
                TypeOverride::Expr(expr) => expr.clone(),
                TypeOverride::Declared { name, declaration } => {
                    self.sink.push(declaration.clone());
                    name.clone()
                }
            });
        }
        if !node.choices.is_empty() {
            return self.compile_choices(node, ctx);
        }
        if node.is_enum() {
            return Ok(self.compile_enum(node, ctx));
        }
        if let Some(kind) = node.kind.as_deref() {
            match kind {
                "object" => return self.compile_object(node, ctx),
                "array" => return self.compile_array(node, ctx),
                "function" => return self.compile_inline_function(node, ctx),
                "integer" => return Ok("number".to_string()),
                "string" | "number" | "boolean" | "any" | "void" | "null" | "undefined" => {
                    return Ok(kind.to_string());
                }
                _ => {}
            }
        }
        if let Some(reference) = node.reference.as_deref() {
            return Ok(self.resolve_ref(reference));
        }
        if let Some(value) = &node.value {
            return Ok(literal_type_name(value).to_string());
        }
        Err(self.unmatched(node))
    }

    /// Union compilation. Enum choices are pooled into one synthetic enum
    /// appended as the final choice; `any` is narrowed to `object` so it
    /// cannot swallow the union; duplicates collapse.
    fn compile_choices(&mut self, node: &TypeNode, ctx: &Ctx) -> Result<String, CompileError> {
        let mut compiled: Vec<String> = Vec::new();
        let mut pooled_enum: Option<TypeNode> = None;
        for choice in &node.choices {
            if choice.is_enum() {
                let pooled = pooled_enum.get_or_insert_with(|| TypeNode {
                    kind: choice.kind.clone(),
                    ..TypeNode::default()
                });
                pooled.enum_values.extend(choice.enum_values.iter().cloned());
            } else {
                let text = self.compile_type(choice, &ctx.nested())?;
                let text = if text == "any" {
                    "object".to_string()
                } else {
                    text
                };
                if !compiled.contains(&text) {
                    compiled.push(text);
                }
            }
        }
        if let Some(pooled) = pooled_enum {
            let text = self.compile_enum(&pooled, &ctx.nested());
            if !compiled.contains(&text) {
                compiled.push(text);
            }
        }
        Ok(compiled.join(" | "))
    }

    /// Enum compilation. At a declaration root the caller renders the
    /// declaration itself; everywhere else the enum is hoisted under a
    /// synthesized helper name and referenced by that name.
    fn compile_enum(&mut self, node: &TypeNode, ctx: &Ctx) -> String {
        if ctx.root {
            return inline_enum_union(node);
        }
        let identifier = node
            .id
            .clone()
            .or_else(|| ctx.id.clone())
            .or_else(|| node.name.clone());
        let Some(identifier) = identifier else {
            return inline_enum_union(node);
        };
        let name = hoisted_name(&identifier);
        let declaration = self.enum_declaration(&name, node, 0);
        self.sink.push(declaration);
        name
    }

    /// Full declaration for a closed string set, in literal-union or
    /// `enum`-keyword form.
    fn enum_declaration(&self, name: &str, node: &TypeNode, depth: usize) -> String {
        let pad = INDENT.repeat(depth);
        let inner = INDENT.repeat(depth + 1);
        let values = deduped_enum_values(node);
        if self.options.enum_keyword {
            let mut out = format!("{pad}enum {name} {{\n");
            for value in &values {
                if let Some(desc) = value.description() {
                    out.push_str(&doc_comment(&render_description(desc), depth + 1));
                }
                out.push_str(&format!(
                    "{inner}{} = \"{}\",\n",
                    enum_member_name(value.name()),
                    escape_string(value.name())
                ));
            }
            out.push_str(&format!("{pad}}}"));
            return out;
        }
        let multiline = values.len() > 2
            || values.iter().any(|value| {
                value.description().is_some_and(|desc| {
                    doc_comment(&render_description(desc), 0).lines().count() > 1
                })
            });
        if !multiline {
            let parts: Vec<String> = values
                .iter()
                .map(|value| match value.description() {
                    Some(desc) => format!(
                        "/** {} */ \"{}\"",
                        render_description(desc),
                        escape_string(value.name())
                    ),
                    None => format!("\"{}\"", escape_string(value.name())),
                })
                .collect();
            return format!("{pad}type {name} = {};", parts.join(" | "));
        }
        let mut out = format!("{pad}type {name} =\n");
        for value in &values {
            if let Some(desc) = value.description() {
                out.push_str(&doc_comment(&render_description(desc), depth + 1));
            }
            out.push_str(&format!("{inner}| \"{}\"\n", escape_string(value.name())));
        }
        out.pop();
        out.push(';');
        out
    }

    fn compile_object(&mut self, node: &TypeNode, ctx: &Ctx) -> Result<String, CompileError> {
        let class_like = !node.functions.is_empty() || !node.events.is_empty();
        let structural = !node.properties.is_empty() || !node.pattern_properties.is_empty();
        if class_like || structural {
            if let Some(body) = self.object_body(node, ctx)? {
                return Ok(body);
            }
            return Ok("object".to_string());
        }
        if let Some(instance) = node.is_instance_of.as_deref() {
            let unconstrained = node
                .additional_properties
                .as_ref()
                .is_some_and(AdditionalProperties::is_unconstrained);
            if unconstrained {
                if instance.eq_ignore_ascii_case("window") {
                    return Ok("Window".to_string());
                }
                return Ok(format!("any/*{instance}*/"));
            }
            return Ok(self.resolve_ref(instance));
        }
        if let Some(extra) = node.additional_properties.as_ref().filter(|a| a.allows()) {
            let value = match extra.node() {
                Some(child) => {
                    let child_ctx = Ctx {
                        id: ctx.id.clone(),
                        root: false,
                        depth: ctx.depth + 1,
                    };
                    self.compile_type(child, &child_ctx)?
                }
                None => "any".to_string(),
            };
            return Ok(format!("{{ [key: string]: {value} }}"));
        }
        Ok("object".to_string())
    }

    /// Braced member list for structural and class-like objects: declared
    /// properties, then pattern properties, then call signatures, then
    /// event members. `None` when the node has no members at all.
    fn object_body(&mut self, node: &TypeNode, ctx: &Ctx) -> Result<Option<String>, CompileError> {
        let mut members: Vec<String> = Vec::new();
        for (name, child) in &node.properties {
            members.push(self.property_member(name, child, ctx)?);
        }
        for (pattern, child) in &node.pattern_properties {
            let key = if pattern_is_numeric(pattern) {
                "number"
            } else {
                "string"
            };
            let child_ctx = Ctx {
                id: ctx.id.clone(),
                root: false,
                depth: ctx.depth + 1,
            };
            let ty = self.compile_type(child, &child_ctx)?;
            members.push(format!(
                "{}[key: {key}]: {ty};\n",
                INDENT.repeat(ctx.depth + 1)
            ));
        }
        for function in &node.functions {
            members.push(self.function_class_member(function, ctx)?);
        }
        for event in &node.events {
            members.push(self.event_class_member(event, ctx)?);
        }
        if members.is_empty() {
            return Ok(None);
        }
        let mut body = String::from("{\n");
        for member in members {
            body.push_str(&member);
        }
        body.push_str(&INDENT.repeat(ctx.depth));
        body.push('}');
        Ok(Some(body))
    }

    fn property_member(
        &mut self,
        name: &str,
        node: &TypeNode,
        ctx: &Ctx,
    ) -> Result<String, CompileError> {
        let child_ctx = Ctx {
            id: child_id(ctx.id.as_deref(), name),
            root: false,
            depth: ctx.depth + 1,
        };
        let ty = self.compile_type(node, &child_ctx)?;
        let mut out = String::new();
        if let Some(doc) = doc_for_node(node) {
            out.push_str(&doc_comment(&doc, child_ctx.depth));
        }
        let mark = if node.optional { "?" } else { "" };
        out.push_str(&format!(
            "{}{}{mark}: {ty};\n",
            INDENT.repeat(child_ctx.depth),
            quote_member(name)
        ));
        Ok(out)
    }

    fn function_class_member(
        &mut self,
        function: &FunctionNode,
        ctx: &Ctx,
    ) -> Result<String, CompileError> {
        let depth = ctx.depth + 1;
        let (signatures, ret) = self.signature_set(function, depth)?;
        let pad = INDENT.repeat(depth);
        let mark = if function.optional { "?" } else { "" };
        let mut out = String::new();
        for params in &signatures {
            if let Some(doc) = self.signature_doc(function, params) {
                out.push_str(&doc_comment(&doc, depth));
            }
            let list = self.param_list(Some(&function.name), params, depth)?;
            out.push_str(&format!(
                "{pad}{}{mark}({list}): {ret};\n",
                quote_member(&function.name)
            ));
        }
        Ok(out)
    }

    fn event_class_member(
        &mut self,
        event: &FunctionNode,
        ctx: &Ctx,
    ) -> Result<String, CompileError> {
        let depth = ctx.depth + 1;
        let ty = self.event_type_expr(event, depth)?;
        let mut out = String::new();
        if let Some(doc) = self.event_doc(event) {
            out.push_str(&doc_comment(&doc, depth));
        }
        let mark = if event.optional { "?" } else { "" };
        out.push_str(&format!(
            "{}{}{mark}: {ty};\n",
            INDENT.repeat(depth),
            quote_member(&event.name)
        ));
        Ok(out)
    }

    fn compile_array(&mut self, node: &TypeNode, ctx: &Ctx) -> Result<String, CompileError> {
        let element = match &node.items {
            Some(items) => self.compile_type(items, &ctx.nested())?,
            None => "any".to_string(),
        };
        if let (Some(min), Some(max)) = (node.min_items, node.max_items) {
            if min == max {
                let slots = vec![element; min as usize];
                return Ok(format!("[{}]", slots.join(", ")));
            }
        }
        Ok(if is_simple_expr(&element) {
            format!("{element}[]")
        } else {
            format!("Array<{element}>")
        })
    }

    /// Inline callable: `(params) => ret`. Arrows bind looser than `|`,
    /// so every shape is parenthesized; leading-optional expansion can
    /// yield several, joined into a union.
    fn compile_inline_function(
        &mut self,
        node: &TypeNode,
        ctx: &Ctx,
    ) -> Result<String, CompileError> {
        let signatures = self.arrow_signatures(
            ctx.id.as_deref(),
            &node.parameters,
            node.returns.as_deref(),
            ctx.depth,
        )?;
        Ok(signatures
            .iter()
            .map(|signature| format!("({signature})"))
            .collect::<Vec<_>>()
            .join(" | "))
    }

    /// Resolve a `$ref` to the identifier to print.
    ///
    /// Same-namespace references drop their qualifier because all
    /// namespaces end up nested under one umbrella declaration. A
    /// reference into an unknown namespace compiles as a bare identifier
    /// backed by an `any` alias so the output still parses.
    fn resolve_ref(&mut self, reference: &str) -> String {
        let Some((prefix, ident)) = reference.rsplit_once('.') else {
            return reference.to_string();
        };
        let resolved = self.table.resolve_alias(prefix);
        if resolved == self.namespace {
            return ident.to_string();
        }
        if self.table.contains(resolved) {
            return format!("{resolved}.{ident}");
        }
        let declared_locally = self.table.get(self.namespace).is_some_and(|ns| {
            ns.types
                .iter()
                .any(|t| t.id.as_deref() == Some(ident) || t.name.as_deref() == Some(ident))
        });
        if declared_locally {
            return ident.to_string();
        }
        warn!(
            namespace = %self.namespace,
            reference = %reference,
            "unresolved reference, declared as any"
        );
        self.sink.push(format!("type {ident} = any;"));
        ident.to_string()
    }

    /// Expanded parameter lists and the return type for a function,
    /// after asynchronous-completion rewriting.
    fn signature_set<'n>(
        &mut self,
        function: &'n FunctionNode,
        depth: usize,
    ) -> Result<(Vec<Vec<Param<'n>>>, String), CompileError> {
        let mut params: Vec<&'n TypeNode> = function.parameters.iter().collect();
        let ret = if let Some(explicit) = &function.returns {
            self.return_text(explicit, Some(&function.name), depth)?
        } else if let Some(marker) = function.async_.as_ref().filter(|m| m.is_active()) {
            match marker.callback_name() {
                Some(callback_name) => {
                    match params
                        .iter()
                        .position(|p| p.name.as_deref() == Some(callback_name))
                    {
                        Some(position) => {
                            let callback = params.remove(position);
                            self.promise_text(function, callback, depth)?
                        }
                        None => {
                            warn!(
                                namespace = %self.namespace,
                                function = %function.name,
                                callback = callback_name,
                                "designated callback parameter not found"
                            );
                            "Promise<any>".to_string()
                        }
                    }
                }
                None => "Promise<any>".to_string(),
            }
        } else {
            "void".to_string()
        };
        Ok((expand_overloads(&params), ret))
    }

    /// Promise resolution type for a designated callback parameter.
    fn promise_text(
        &mut self,
        function: &FunctionNode,
        callback: &TypeNode,
        depth: usize,
    ) -> Result<String, CompileError> {
        match callback.parameters.len() {
            0 => Ok("Promise<void>".to_string()),
            1 => {
                let value = &callback.parameters[0];
                let ctx = Ctx {
                    id: child_id(
                        Some(&function.name),
                        value.name.as_deref().unwrap_or("value"),
                    ),
                    root: false,
                    depth,
                };
                let inner = self.compile_type(value, &ctx)?;
                Ok(format!("Promise<{inner}>"))
            }
            extra => {
                // A promise resolves with one value; multi-argument
                // callbacks cannot map across losslessly.
                warn!(
                    namespace = %self.namespace,
                    function = %function.name,
                    parameters = extra,
                    "multi-parameter callback collapsed to Promise<object>"
                );
                Ok("Promise<object>".to_string())
            }
        }
    }

    fn return_text(
        &mut self,
        node: &TypeNode,
        owner: Option<&str>,
        depth: usize,
    ) -> Result<String, CompileError> {
        let ctx = Ctx {
            id: owner.map(str::to_string),
            root: false,
            depth,
        };
        let text = self.compile_type(node, &ctx)?;
        Ok(if node.optional && text != "void" && text != "any" {
            format!("{text} | void")
        } else {
            text
        })
    }

    fn param_list(
        &mut self,
        owner: Option<&str>,
        params: &[Param<'_>],
        depth: usize,
    ) -> Result<String, CompileError> {
        let mut parts: Vec<String> = Vec::with_capacity(params.len());
        for (index, param) in params.iter().enumerate() {
            let fallback = format!("arg{index}");
            let name = param.node.name.as_deref().unwrap_or(&fallback);
            let ctx = Ctx {
                id: child_id(owner, name),
                root: false,
                depth,
            };
            let ty = self.compile_type(param.node, &ctx)?;
            let mark = if param.optional { "?" } else { "" };
            parts.push(format!("{}{mark}: {ty}", safe_param_name(name)));
        }
        Ok(parts.join(", "))
    }

    /// Arrow-function signatures for a callable, one per overload shape.
    fn arrow_signatures(
        &mut self,
        owner: Option<&str>,
        parameters: &[TypeNode],
        returns: Option<&TypeNode>,
        depth: usize,
    ) -> Result<Vec<String>, CompileError> {
        let ret = match returns {
            Some(node) => self.return_text(node, owner, depth)?,
            None => "void".to_string(),
        };
        let refs: Vec<&TypeNode> = parameters.iter().collect();
        let mut out = Vec::new();
        for params in expand_overloads(&refs) {
            out.push(format!(
                "({}) => {ret}",
                self.param_list(owner, &params, depth)?
            ));
        }
        Ok(out)
    }

    /// Listener-capability type for an event.
    ///
    /// Without extra registration parameters this is a `WebExtEvent`
    /// instantiation (a union of them when overload expansion applies).
    /// With extras, a dedicated per-event interface goes to the sink.
    fn event_type_expr(
        &mut self,
        event: &FunctionNode,
        depth: usize,
    ) -> Result<String, CompileError> {
        if event.extra_parameters.is_empty() {
            let callbacks = self.arrow_signatures(
                Some(&event.name),
                &event.parameters,
                event.returns.as_ref(),
                depth,
            )?;
            return Ok(callbacks
                .iter()
                .map(|callback| format!("WebExtEvent<{callback}>"))
                .collect::<Vec<_>>()
                .join(" | "));
        }
        let callbacks =
            self.arrow_signatures(Some(&event.name), &event.parameters, event.returns.as_ref(), 1)?;
        let callback_type = match callbacks.as_slice() {
            [single] => single.clone(),
            many => many
                .iter()
                .map(|callback| format!("({callback})"))
                .collect::<Vec<_>>()
                .join(" | "),
        };
        let extras: Vec<Param<'_>> = event
            .extra_parameters
            .iter()
            .map(|node| Param {
                node,
                optional: node.optional,
            })
            .collect();
        let extra_list = self.param_list(Some(&event.name), &extras, 1)?;
        let name = event_interface_name(self.namespace, &event.name);
        let mut declaration = format!("interface {name}<TCallback = {callback_type}> {{\n");
        declaration.push_str(&format!(
            "{INDENT}addListener(callback: TCallback, {extra_list}): void;\n"
        ));
        declaration.push_str(&format!("{INDENT}removeListener(callback: TCallback): void;\n"));
        declaration.push_str(&format!("{INDENT}hasListener(callback: TCallback): boolean;\n"));
        declaration.push('}');
        self.sink.push(declaration);
        Ok(name)
    }

    fn signature_doc(&self, function: &FunctionNode, params: &[Param<'_>]) -> Option<String> {
        let mut tags: Vec<String> = Vec::new();
        for param in params {
            let Some(name) = param.node.name.as_deref() else {
                continue;
            };
            if let Some(desc) = param.node.description.as_deref() {
                tags.push(format!("@param {name} {}", render_description(desc)));
            }
        }
        if let Some(desc) = function
            .returns
            .as_ref()
            .and_then(|r| r.description.as_deref())
        {
            tags.push(format!("@returns {}", render_description(desc)));
        }
        if let Some(tag) = deprecated_tag(function.deprecated.as_ref()) {
            tags.push(tag);
        }
        doc_with_tags(function.description.as_deref(), tags)
    }

    fn event_doc(&self, event: &FunctionNode) -> Option<String> {
        let mut tags: Vec<String> = Vec::new();
        for parameter in &event.parameters {
            let Some(name) = parameter.name.as_deref() else {
                continue;
            };
            if let Some(desc) = parameter.description.as_deref() {
                tags.push(format!("@param {name} {}", render_description(desc)));
            }
        }
        if let Some(tag) = deprecated_tag(event.deprecated.as_ref()) {
            tags.push(tag);
        }
        doc_with_tags(event.description.as_deref(), tags)
    }

    fn unmatched(&self, node: &TypeNode) -> CompileError {
        CompileError::UnmatchedNode {
            namespace: self.namespace.to_string(),
            node: serde_json::to_string(node).unwrap_or_else(|_| "<unserializable>".to_string()),
        }
    }
}

/// Synthesized identifier for a named member of `parent`.
///
/// A member literally named `properties` reuses the parent identifier
/// unchanged; everything else chains with an underscore.
fn child_id(parent: Option<&str>, name: &str) -> Option<String> {
    if name == "properties" {
        return parent.map(str::to_string);
    }
    match parent {
        Some(parent) => Some(format!("{parent}_{name}")),
        None => Some(name.to_string()),
    }
}

/// `_`-prefixed helper name synthesized from an identifier chain.
fn hoisted_name(identifier: &str) -> String {
    format!("_{}", capitalize_identifier(identifier))
}

fn capitalize_identifier(identifier: &str) -> String {
    identifier.split(['.', '_']).map(capitalize_first).collect()
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

fn event_interface_name(namespace: &str, event: &str) -> String {
    format!(
        "_{}{}Event",
        capitalize_identifier(namespace),
        capitalize_identifier(event)
    )
}

/// Rename a declaration that collides with a reserved word, returning the
/// internal name and the external name to re-export under.
fn declaration_name(name: &str) -> (String, Option<&str>) {
    if RESERVED_WORDS.contains(name) {
        (format!("_{name}"), Some(name))
    } else {
        (name.to_string(), None)
    }
}

fn safe_param_name(name: &str) -> String {
    if RESERVED_WORDS.contains(name) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

fn quote_member(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", escape_string(name))
    }
}

fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn enum_member_name(value: &str) -> String {
    quote_member(value)
}

/// Whether a compiled expression is a bare (possibly dotted) identifier,
/// deciding `T[]` against `Array<T>`.
fn is_simple_expr(expr: &str) -> bool {
    !expr.is_empty()
        && expr
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Index key heuristic for pattern properties: digit classes and no
/// lowercase class means a numeric key.
fn pattern_is_numeric(pattern: &str) -> bool {
    (pattern.contains("\\d") || pattern.contains("0-9")) && !pattern.contains("a-z")
}

fn literal_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Bool(_) => "boolean",
        _ => "object",
    }
}

fn deduped_enum_values(node: &TypeNode) -> Vec<&crate::ir::EnumValue> {
    let mut out: Vec<&crate::ir::EnumValue> = Vec::with_capacity(node.enum_values.len());
    for value in &node.enum_values {
        if !out.iter().any(|existing| existing.name() == value.name()) {
            out.push(value);
        }
    }
    out
}

/// Literal union without a declaration, for enums with nowhere to hoist.
fn inline_enum_union(node: &TypeNode) -> String {
    let parts: Vec<String> = deduped_enum_values(node)
        .iter()
        .map(|value| format!("\"{}\"", escape_string(value.name())))
        .collect();
    parts.join(" | ")
}

/// Split a parameter list into overload signatures.
///
/// An optional parameter before the first mandatory one cannot be
/// expressed directly, so the base signature drops the leading optionals
/// and one extra signature per leading optional keeps it with everything
/// after it made mandatory.
fn expand_overloads<'a>(parameters: &[&'a TypeNode]) -> Vec<Vec<Param<'a>>> {
    let declared: Vec<Param<'a>> = parameters
        .iter()
        .copied()
        .map(|node| Param {
            node,
            optional: node.optional,
        })
        .collect();
    let Some(split) = parameters.iter().position(|p| !p.optional) else {
        return vec![declared];
    };
    if split == 0 {
        return vec![declared];
    }
    let tail: Vec<Param<'a>> = declared[split..].to_vec();
    let mut signatures: Vec<Vec<Param<'a>>> = Vec::with_capacity(split + 1);
    signatures.push(tail.clone());
    for lead in 0..split {
        let mut signature: Vec<Param<'a>> = parameters[lead..split]
            .iter()
            .copied()
            .map(|node| Param {
                node,
                optional: false,
            })
            .collect();
        signature.extend(tail.iter().copied());
        signatures.push(signature);
    }
    signatures
}

fn doc_with_tags(description: Option<&str>, tags: Vec<String>) -> Option<String> {
    let mut text = description.map(render_description).unwrap_or_default();
    if !tags.is_empty() {
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&tags.join("\n"));
    }
    if text.is_empty() { None } else { Some(text) }
}

fn doc_for_node(node: &TypeNode) -> Option<String> {
    let tags: Vec<String> = deprecated_tag(node.deprecated.as_ref()).into_iter().collect();
    doc_with_tags(node.description.as_deref(), tags)
}

fn deprecated_tag(deprecated: Option<&Deprecation>) -> Option<String> {
    let deprecation = deprecated?;
    if !deprecation.is_active() {
        return None;
    }
    Some(match deprecation.note() {
        Some(note) => format!("@deprecated {}", render_description(note)),
        None => "@deprecated".to_string(),
    })
}

/// Indent every non-empty line of a block.
pub(crate) fn indent_block(text: &str, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_fragment_value;
    use crate::merge::AliasTable;
    use serde_json::json;

    fn table(value: serde_json::Value) -> SchemaTable {
        let fragment = parse_fragment_value(value).unwrap();
        SchemaTable::from_fragments([fragment], AliasTable::new())
    }

    fn compile_in(table: &SchemaTable, namespace: &str, node: serde_json::Value) -> String {
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(table, namespace, &options);
        let node: TypeNode = serde_json::from_value(node).unwrap();
        let ctx = Ctx {
            id: Some("Sample".to_string()),
            root: false,
            depth: 0,
        };
        compiler.compile_type(&node, &ctx).unwrap()
    }

    fn empty_table() -> SchemaTable {
        table(json!([{ "namespace": "scratch" }]))
    }

    #[test]
    fn primitives_map_to_typescript_names() {
        let t = empty_table();
        assert_eq!(compile_in(&t, "scratch", json!({ "type": "integer" })), "number");
        assert_eq!(compile_in(&t, "scratch", json!({ "type": "string" })), "string");
        assert_eq!(compile_in(&t, "scratch", json!({ "type": "any" })), "any");
    }

    #[test]
    fn empty_objects_render_as_the_generic_object_type() {
        let t = empty_table();
        assert_eq!(compile_in(&t, "scratch", json!({ "type": "object" })), "object");
    }

    #[test]
    fn arrays_pick_suffix_or_wrapper_by_element_shape() {
        let t = empty_table();
        assert_eq!(
            compile_in(&t, "scratch", json!({ "type": "array", "items": { "type": "string" } })),
            "string[]"
        );
        assert_eq!(
            compile_in(
                &t,
                "scratch",
                json!({
                    "type": "array",
                    "items": { "choices": [{ "type": "string" }, { "type": "integer" }] }
                })
            ),
            "Array<string | number>"
        );
    }

    #[test]
    fn fixed_length_arrays_become_tuples() {
        let t = empty_table();
        assert_eq!(
            compile_in(
                &t,
                "scratch",
                json!({
                    "type": "array",
                    "items": { "type": "integer" },
                    "minItems": 2,
                    "maxItems": 2
                })
            ),
            "[number, number]"
        );
    }

    #[test]
    fn index_signature_objects_propagate_value_types() {
        let t = empty_table();
        assert_eq!(
            compile_in(
                &t,
                "scratch",
                json!({
                    "type": "object",
                    "additionalProperties": { "$ref": "Command" }
                })
            ),
            "{ [key: string]: Command }"
        );
    }

    #[test]
    fn numeric_pattern_properties_use_number_keys() {
        let t = empty_table();
        let body = compile_in(
            &t,
            "scratch",
            json!({
                "type": "object",
                "patternProperties": {
                    "^[0-9]+$": { "type": "string" }
                }
            })
        );
        assert_eq!(body, "{\n    [key: number]: string;\n}");
    }

    #[test]
    fn instance_of_window_and_opaque_hosts() {
        let t = empty_table();
        assert_eq!(
            compile_in(
                &t,
                "scratch",
                json!({ "type": "object", "isInstanceOf": "Window", "additionalProperties": true })
            ),
            "Window"
        );
        assert_eq!(
            compile_in(
                &t,
                "scratch",
                json!({
                    "type": "object",
                    "isInstanceOf": "ImageData",
                    "additionalProperties": { "type": "any" }
                })
            ),
            "any/*ImageData*/"
        );
    }

    #[test]
    fn literal_values_infer_their_runtime_type() {
        let t = empty_table();
        assert_eq!(compile_in(&t, "scratch", json!({ "value": -1 })), "number");
        assert_eq!(compile_in(&t, "scratch", json!({ "value": "on" })), "string");
    }

    #[test]
    fn unions_narrow_any_and_collapse_duplicates() {
        let t = empty_table();
        assert_eq!(
            compile_in(
                &t,
                "scratch",
                json!({
                    "choices": [
                        { "type": "string" },
                        { "type": "any" },
                        { "type": "object" }
                    ]
                })
            ),
            "string | object"
        );
    }

    #[test]
    fn union_enum_choices_pool_into_one_hoisted_helper() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let node: TypeNode = serde_json::from_value(json!({
            "choices": [
                { "type": "integer" },
                { "type": "string", "enum": ["daily"] },
                { "type": "string", "enum": ["weekly"] }
            ]
        }))
        .unwrap();
        let ctx = Ctx {
            id: Some("Period".to_string()),
            root: false,
            depth: 0,
        };
        let expr = compiler.compile_type(&node, &ctx).unwrap();
        assert_eq!(expr, "number | _Period");
        assert_eq!(
            compiler.sink.take(),
            vec!["type _Period = \"daily\" | \"weekly\";".to_string()]
        );
    }

    #[test]
    fn nested_enums_hoist_once_per_distinct_shape() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let node: TypeNode = serde_json::from_value(json!({
            "type": "string",
            "enum": ["ltr", "rtl"]
        }))
        .unwrap();
        let ctx = Ctx {
            id: Some("text_direction".to_string()),
            root: false,
            depth: 0,
        };
        let first = compiler.compile_type(&node, &ctx).unwrap();
        let second = compiler.compile_type(&node, &ctx).unwrap();
        assert_eq!(first, "_TextDirection");
        assert_eq!(first, second);
        assert_eq!(compiler.sink.take().len(), 1);
    }

    #[test]
    fn enum_declarations_switch_between_union_and_keyword_forms() {
        let t = empty_table();
        let node: TypeNode = serde_json::from_value(json!({
            "id": "ContextType",
            "type": "string",
            "enum": ["normal", "popup", "panel"]
        }))
        .unwrap();

        let union_options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &union_options);
        let declaration = compiler.root_declaration(&node).unwrap();
        assert_eq!(
            declaration,
            "type ContextType =\n    | \"normal\"\n    | \"popup\"\n    | \"panel\";"
        );

        let keyword_options = EmitOptions {
            enum_keyword: true,
            ..EmitOptions::default()
        };
        let mut compiler = TsCompiler::new(&t, "scratch", &keyword_options);
        let declaration = compiler.root_declaration(&node).unwrap();
        assert_eq!(
            declaration,
            "enum ContextType {\n    normal = \"normal\",\n    popup = \"popup\",\n    panel = \"panel\",\n}"
        );
    }

    #[test]
    fn same_namespace_references_drop_their_qualifier() {
        let t = table(json!([{
            "namespace": "foo",
            "types": [{ "id": "Bar", "type": "object" }]
        }]));
        assert_eq!(compile_in(&t, "foo", json!({ "$ref": "foo.Bar" })), "Bar");
        assert_eq!(compile_in(&t, "foo", json!({ "$ref": "Bar" })), "Bar");
    }

    #[test]
    fn known_foreign_references_stay_qualified() {
        let t = table(json!([
            { "namespace": "tabs", "types": [{ "id": "Tab", "type": "object" }] },
            { "namespace": "windows" }
        ]));
        assert_eq!(compile_in(&t, "windows", json!({ "$ref": "tabs.Tab" })), "tabs.Tab");
    }

    #[test]
    fn unknown_references_fall_back_to_an_any_alias() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let rendered = compiler.resolve_ref("foo.Bar");
        assert_eq!(rendered, "Bar");
        assert_eq!(compiler.sink.take(), vec!["type Bar = any;".to_string()]);
    }

    #[test]
    fn leading_optionals_expand_into_overloads() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let function: FunctionNode = serde_json::from_value(json!({
            "name": "f",
            "type": "function",
            "parameters": [
                { "name": "a", "type": "string", "optional": true },
                { "name": "b", "type": "number" }
            ]
        }))
        .unwrap();
        let rendered = compiler.namespace_function(&function).unwrap();
        assert_eq!(
            rendered,
            "function f(b: number): void;\nfunction f(a: string, b: number): void;"
        );
    }

    #[test]
    fn trailing_optionals_do_not_expand() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let function: FunctionNode = serde_json::from_value(json!({
            "name": "open",
            "type": "function",
            "parameters": [
                { "name": "url", "type": "string" },
                { "name": "active", "type": "boolean", "optional": true }
            ]
        }))
        .unwrap();
        let rendered = compiler.namespace_function(&function).unwrap();
        assert_eq!(rendered, "function open(url: string, active?: boolean): void;");
    }

    #[test]
    fn designated_callbacks_become_promise_returns() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);

        let single: FunctionNode = serde_json::from_value(json!({
            "name": "g",
            "type": "function",
            "async": "callback",
            "parameters": [{
                "name": "callback",
                "type": "function",
                "parameters": [{ "name": "x", "type": "number" }]
            }]
        }))
        .unwrap();
        assert_eq!(
            compiler.namespace_function(&single).unwrap(),
            "function g(): Promise<number>;"
        );

        let none: FunctionNode = serde_json::from_value(json!({
            "name": "h",
            "type": "function",
            "async": "done",
            "parameters": [
                { "name": "item", "type": "string" },
                { "name": "done", "type": "function", "parameters": [] }
            ]
        }))
        .unwrap();
        assert_eq!(
            compiler.namespace_function(&none).unwrap(),
            "function h(item: string): Promise<void>;"
        );

        let lossy: FunctionNode = serde_json::from_value(json!({
            "name": "k",
            "type": "function",
            "async": "callback",
            "parameters": [{
                "name": "callback",
                "type": "function",
                "parameters": [
                    { "name": "x", "type": "number" },
                    { "name": "y", "type": "number" }
                ]
            }]
        }))
        .unwrap();
        assert_eq!(
            compiler.namespace_function(&lossy).unwrap(),
            "function k(): Promise<object>;"
        );
    }

    #[test]
    fn bare_async_flags_resolve_to_any() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let function: FunctionNode =
            serde_json::from_value(json!({ "name": "reload", "async": true })).unwrap();
        assert_eq!(
            compiler.namespace_function(&function).unwrap(),
            "function reload(): Promise<any>;"
        );
    }

    #[test]
    fn explicit_optional_returns_promote_to_void_unions() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let function: FunctionNode = serde_json::from_value(json!({
            "name": "find",
            "type": "function",
            "returns": { "type": "string", "optional": true }
        }))
        .unwrap();
        assert_eq!(
            compiler.namespace_function(&function).unwrap(),
            "function find(): string | void;"
        );
    }

    #[test]
    fn reserved_function_names_are_renamed_and_reexported() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let function: FunctionNode =
            serde_json::from_value(json!({ "name": "import", "type": "function" })).unwrap();
        assert_eq!(
            compiler.namespace_function(&function).unwrap(),
            "function _import(): void;"
        );
        assert_eq!(
            compiler.sink.take(),
            vec!["export { _import as import };".to_string()]
        );
    }

    #[test]
    fn events_compile_to_webextevent_instantiations() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let event: FunctionNode = serde_json::from_value(json!({
            "name": "onCreated",
            "type": "function",
            "parameters": [{ "name": "id", "type": "integer" }]
        }))
        .unwrap();
        assert_eq!(
            compiler.namespace_event(&event).unwrap(),
            "const onCreated: WebExtEvent<(id: number) => void>;"
        );
    }

    #[test]
    fn events_with_extra_parameters_get_a_dedicated_interface() {
        let t = table(json!([{ "namespace": "webRequest" }]));
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "webRequest", &options);
        let event: FunctionNode = serde_json::from_value(json!({
            "name": "onBeforeRequest",
            "type": "function",
            "parameters": [{ "name": "details", "type": "object" }],
            "extraParameters": [
                { "name": "filter", "type": "object" },
                {
                    "name": "extraInfoSpec",
                    "optional": true,
                    "type": "array",
                    "items": { "type": "string" }
                }
            ]
        }))
        .unwrap();
        let member = compiler.namespace_event(&event).unwrap();
        assert_eq!(member, "const onBeforeRequest: _WebRequestOnBeforeRequestEvent;");
        let sink = compiler.sink.take();
        assert_eq!(sink.len(), 1);
        let interface = &sink[0];
        assert!(interface.starts_with(
            "interface _WebRequestOnBeforeRequestEvent<TCallback = (details: object) => void> {"
        ));
        assert!(interface.contains(
            "addListener(callback: TCallback, filter: object, extraInfoSpec?: string[]): void;"
        ));
        assert!(interface.contains("removeListener(callback: TCallback): void;"));
        assert!(interface.contains("hasListener(callback: TCallback): boolean;"));
    }

    #[test]
    fn class_like_types_render_member_signatures() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let node: TypeNode = serde_json::from_value(json!({
            "id": "Port",
            "type": "object",
            "properties": {
                "name": { "type": "string" }
            },
            "functions": [
                { "name": "disconnect", "type": "function" }
            ],
            "events": [
                { "name": "onDisconnect", "type": "function", "parameters": [] }
            ]
        }))
        .unwrap();
        let declaration = compiler.root_declaration(&node).unwrap();
        assert_eq!(
            declaration,
            "interface Port {\n    name: string;\n    disconnect(): void;\n    onDisconnect: WebExtEvent<() => void>;\n}"
        );
    }

    #[test]
    fn overrides_bypass_compilation() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);

        let expr: TypeNode = serde_json::from_value(json!({ "override": "Blob" })).unwrap();
        let ctx = Ctx {
            id: None,
            root: false,
            depth: 0,
        };
        assert_eq!(compiler.compile_type(&expr, &ctx).unwrap(), "Blob");

        let declared: TypeNode = serde_json::from_value(json!({
            "override": {
                "name": "PlainJsonValue",
                "declaration": "type PlainJsonValue = null | string | number | boolean;"
            }
        }))
        .unwrap();
        assert_eq!(compiler.compile_type(&declared, &ctx).unwrap(), "PlainJsonValue");
        assert_eq!(
            compiler.sink.take(),
            vec!["type PlainJsonValue = null | string | number | boolean;".to_string()]
        );
    }

    #[test]
    fn unmatched_nodes_abort_with_the_node_attached() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let node: TypeNode = serde_json::from_value(json!({ "type": "mystery" })).unwrap();
        let ctx = Ctx {
            id: None,
            root: false,
            depth: 0,
        };
        let err = compiler.compile_type(&node, &ctx).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("scratch"));
        assert!(message.contains("mystery"));
    }

    #[test]
    fn properties_nest_identifiers_for_hoisted_helpers() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let node: TypeNode = serde_json::from_value(json!({
            "id": "CreateDetails",
            "type": "object",
            "properties": {
                "state": { "type": "string", "enum": ["open", "closed"] }
            }
        }))
        .unwrap();
        let declaration = compiler.root_declaration(&node).unwrap();
        assert_eq!(
            declaration,
            "interface CreateDetails {\n    state: _CreateDetailsState;\n}"
        );
        assert_eq!(
            compiler.sink.take(),
            vec!["type _CreateDetailsState = \"open\" | \"closed\";".to_string()]
        );
    }

    #[test]
    fn overload_expansion_applies_to_parameter_identifiers() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let function: FunctionNode = serde_json::from_value(json!({
            "name": "capture",
            "type": "function",
            "parameters": [{
                "name": "format",
                "type": "string",
                "enum": ["png", "jpeg"]
            }]
        }))
        .unwrap();
        let rendered = compiler.namespace_function(&function).unwrap();
        assert_eq!(rendered, "function capture(format: _CaptureFormat): void;");
        assert_eq!(
            compiler.sink.take(),
            vec!["type _CaptureFormat = \"png\" | \"jpeg\";".to_string()]
        );
    }

    #[test]
    fn union_root_with_object_choice_declares_an_alias() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let node: TypeNode = serde_json::from_value(json!({
            "id": "FileOrCode",
            "choices": [
                {
                    "type": "object",
                    "properties": {
                        "file": { "type": "string", "optional": true }
                    }
                },
                { "type": "string" }
            ]
        }))
        .unwrap();
        let declaration = compiler.root_declaration(&node).unwrap();
        assert_eq!(
            declaration,
            "type FileOrCode = {\n    file?: string;\n} | string;"
        );
    }

    #[test]
    fn inline_function_choices_are_parenthesized() {
        let t = empty_table();
        let options = EmitOptions::default();
        let mut compiler = TsCompiler::new(&t, "scratch", &options);
        let node: TypeNode = serde_json::from_value(json!({
            "id": "Mixed",
            "choices": [
                { "type": "string" },
                { "type": "function", "parameters": [] }
            ]
        }))
        .unwrap();
        let declaration = compiler.root_declaration(&node).unwrap();
        assert_eq!(declaration, "type Mixed = string | (() => void);");
    }
}
