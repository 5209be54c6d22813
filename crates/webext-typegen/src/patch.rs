//! Post-merge customization of the schema table.
//!
//! Upstream schema files ship with known defects. Rather than editing the
//! table ad hoc, callers describe their fixes as a list of [`PatchOp`]
//! values applied in order after merging and before emission, so the whole
//! patch set can be audited and logged.

use tracing::warn;

use crate::ir::{AdditionalProperties, FunctionNode, Namespace, TypeNode};
use crate::merge::SchemaTable;

/// Namespace section addressed by a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Types,
    Properties,
    Functions,
    Events,
}

/// One customization applied to the merged table.
#[derive(Debug, Clone, Copy)]
pub enum PatchOp {
    /// Drop a whole namespace.
    RemoveNamespace { namespace: &'static str },
    /// Drop one member of a section.
    Remove {
        namespace: &'static str,
        section: Section,
        member: &'static str,
    },
    /// Rewrite a type in place.
    EditType {
        namespace: &'static str,
        member: &'static str,
        edit: fn(&mut TypeNode),
    },
    /// Rewrite a namespace property in place.
    EditProperty {
        namespace: &'static str,
        member: &'static str,
        edit: fn(&mut TypeNode),
    },
    /// Rewrite a function or event in place.
    EditFunction {
        namespace: &'static str,
        section: Section,
        member: &'static str,
        edit: fn(&mut FunctionNode),
    },
}

/// Apply a patch list in order. A patch whose target is missing logs a
/// warning and is skipped.
pub fn apply(table: &mut SchemaTable, patches: &[PatchOp]) {
    for patch in patches {
        if !apply_one(table, patch) {
            let (namespace, member) = patch_target(patch);
            warn!(namespace, member, "patch target not found, skipped");
        }
    }
}

fn patch_target(patch: &PatchOp) -> (&'static str, &'static str) {
    match *patch {
        PatchOp::RemoveNamespace { namespace } => (namespace, "*"),
        PatchOp::Remove {
            namespace, member, ..
        }
        | PatchOp::EditType {
            namespace, member, ..
        }
        | PatchOp::EditProperty {
            namespace, member, ..
        }
        | PatchOp::EditFunction {
            namespace, member, ..
        } => (namespace, member),
    }
}

fn apply_one(table: &mut SchemaTable, patch: &PatchOp) -> bool {
    match *patch {
        PatchOp::RemoveNamespace { namespace } => table.remove(namespace).is_some(),
        PatchOp::Remove {
            namespace,
            section,
            member,
        } => table
            .get_mut(namespace)
            .is_some_and(|ns| remove_member(ns, section, member)),
        PatchOp::EditType {
            namespace,
            member,
            edit,
        } => table.get_mut(namespace).is_some_and(|ns| {
            match type_position(ns, member) {
                Some(index) => {
                    edit(&mut ns.types[index]);
                    true
                }
                None => false,
            }
        }),
        PatchOp::EditProperty {
            namespace,
            member,
            edit,
        } => table.get_mut(namespace).is_some_and(|ns| {
            match ns.properties.get_mut(member) {
                Some(node) => {
                    edit(node);
                    true
                }
                None => false,
            }
        }),
        PatchOp::EditFunction {
            namespace,
            section,
            member,
            edit,
        } => table.get_mut(namespace).is_some_and(|ns| {
            let list = match section {
                Section::Functions => &mut ns.functions,
                Section::Events => &mut ns.events,
                Section::Types | Section::Properties => return false,
            };
            match list.iter_mut().find(|f| f.name == member) {
                Some(function) => {
                    edit(function);
                    true
                }
                None => false,
            }
        }),
    }
}

fn remove_member(ns: &mut Namespace, section: Section, member: &str) -> bool {
    match section {
        Section::Types => match type_position(ns, member) {
            Some(index) => {
                ns.types.remove(index);
                true
            }
            None => false,
        },
        Section::Properties => ns.properties.remove(member).is_some(),
        Section::Functions => match function_position(&ns.functions, member) {
            Some(index) => {
                ns.functions.remove(index);
                true
            }
            None => false,
        },
        Section::Events => match function_position(&ns.events, member) {
            Some(index) => {
                ns.events.remove(index);
                true
            }
            None => false,
        },
    }
}

/// Position of a type matching `key` by id, name, extension target, or
/// import target.
pub fn type_position(ns: &Namespace, key: &str) -> Option<usize> {
    ns.types.iter().position(|t| {
        t.id.as_deref() == Some(key)
            || t.name.as_deref() == Some(key)
            || t.extend.as_deref() == Some(key)
            || t.import.as_deref() == Some(key)
    })
}

/// Position of a function or event by name.
pub fn function_position(list: &[FunctionNode], name: &str) -> Option<usize> {
    list.iter().position(|f| f.name == name)
}

/// Mark every node flagged `unsupported` as optional, across the whole
/// table, in one pass.
pub fn mark_unsupported_optional(table: &mut SchemaTable) {
    for ns in table.namespaces_mut() {
        for node in ns.types.iter_mut() {
            visit_type(node);
        }
        for node in ns.properties.values_mut() {
            visit_type(node);
        }
        for function in ns.functions.iter_mut() {
            visit_function(function);
        }
        for event in ns.events.iter_mut() {
            visit_function(event);
        }
    }
}

fn visit_type(node: &mut TypeNode) {
    if node.unsupported {
        node.optional = true;
    }
    for child in node.choices.iter_mut() {
        visit_type(child);
    }
    for child in node.properties.values_mut() {
        visit_type(child);
    }
    for child in node.pattern_properties.values_mut() {
        visit_type(child);
    }
    if let Some(AdditionalProperties::Node(child)) = node.additional_properties.as_mut() {
        visit_type(child);
    }
    if let Some(child) = node.items.as_mut() {
        visit_type(child);
    }
    for child in node.parameters.iter_mut() {
        visit_type(child);
    }
    if let Some(child) = node.returns.as_mut() {
        visit_type(child);
    }
    for function in node.functions.iter_mut() {
        visit_function(function);
    }
    for event in node.events.iter_mut() {
        visit_function(event);
    }
}

fn visit_function(function: &mut FunctionNode) {
    if function.unsupported {
        function.optional = true;
    }
    for parameter in function.parameters.iter_mut() {
        visit_type(parameter);
    }
    if let Some(returns) = function.returns.as_mut() {
        visit_type(returns);
    }
    for parameter in function.extra_parameters.iter_mut() {
        visit_type(parameter);
    }
}
