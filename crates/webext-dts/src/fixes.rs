//! Built-in adjustments applied to the merged table.
//!
//! The upstream schema documents carry a few constructs that do not
//! translate into declarations, plus a namespace that only exists for
//! the extension test harness. The default patch list cleans those up;
//! `--raw` skips it.

use webext_typegen::AliasTable;
use webext_typegen::ir::{TypeNode, TypeOverride};
use webext_typegen::patch::PatchOp;

/// Historical namespace names mapped onto the namespaces that carry the
/// schema today.
pub fn default_aliases() -> AliasTable {
    AliasTable::from([
        ("contextMenus".to_string(), "menus".to_string()),
        (
            "contextMenusInternal".to_string(),
            "menusInternal".to_string(),
        ),
    ])
}

/// Patch list applied unless `--raw` is given.
pub fn default_fixes() -> Vec<PatchOp> {
    vec![
        PatchOp::RemoveNamespace { namespace: "test" },
        PatchOp::EditType {
            namespace: "manifest",
            member: "UnrecognizedProperty",
            edit: unrecognized_property_is_any,
        },
        PatchOp::EditProperty {
            namespace: "runtime",
            member: "lastError",
            edit: mark_optional,
        },
    ]
}

// UnrecognizedProperty is a catch-all validator hook, not a real shape.
fn unrecognized_property_is_any(node: &mut TypeNode) {
    node.override_ = Some(TypeOverride::Expr("any".to_string()));
}

// lastError is unset unless an API call just failed.
fn mark_optional(node: &mut TypeNode) {
    node.optional = true;
}
