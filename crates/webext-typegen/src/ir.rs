//! Schema object model for WebExtension API documents.
//!
//! Fragment files deserialize directly into these records. The shapes are
//! deliberately permissive: almost every field is optional on the wire and
//! absent fields fall back to `Default`, because real schema documents are
//! partial records spread across many files and merged later.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn is_false(v: &bool) -> bool {
    !v
}

/// One namespace record as it appears in a fragment document, and the merged
/// form held in the schema table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Namespace {
    /// Namespace identifier, e.g. `"alarms"` or `"devtools.panels"`.
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Named type declarations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeNode>,
    /// Namespace-level constants and accessors, keyed by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, TypeNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<FunctionNode>,
    /// Permission strings gating access to the namespace.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_contexts: Vec<String>,
    /// Namespace whose members this one inherits, resolved at emission.
    #[serde(rename = "$import", skip_serializing_if = "Option::is_none")]
    pub import: Option<String>,
}

/// A single type node. Recursive and polymorphic: which fields are set
/// decides how the node compiles, and several combinations are legal at
/// once (an `enum` node also carries `type: "string"`, a reference may be
/// marked `optional`, and so on).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeNode {
    /// Stable identifier. Set on root declarations; synthesized identifiers
    /// for nested nodes are threaded through compilation instead of being
    /// written back here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Member name when the node appears as a property or parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primitive or structural kind: `string`, `integer`, `number`,
    /// `boolean`, `any`, `object`, `array`, `function`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Reference to another type, optionally namespace-qualified.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Identifier of a sibling type this node merges into.
    #[serde(rename = "$extend", skip_serializing_if = "Option::is_none")]
    pub extend: Option<String>,
    /// Identifier of a sibling type whose members are copied in.
    #[serde(rename = "$import", skip_serializing_if = "Option::is_none")]
    pub import: Option<String>,
    /// Union of alternative types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<TypeNode>,
    /// Closed string set.
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub unsupported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
    /// Named object members.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, TypeNode>,
    /// Regex-keyed object members.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub pattern_properties: BTreeMap<String, TypeNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
    /// Array element type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<TypeNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Name of an opaque host type the value is an instance of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_instance_of: Option<String>,
    /// Callable members, making the type class-like.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionNode>,
    /// Event members, making the type class-like.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<FunctionNode>,
    /// Parameters when the node itself is a callable (`type: "function"`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TypeNode>,
    /// Return type when the node itself is a callable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<Box<TypeNode>>,
    /// Literal constant; its runtime type is inferred at compilation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Escape hatch bypassing ordinary compilation.
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_: Option<TypeOverride>,
}

/// A function or event member of a namespace or class-like type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FunctionNode {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TypeNode>,
    /// Explicit return type. Wins over any asynchronous-completion marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<TypeNode>,
    /// Asynchronous-completion marker: `true`, or the name of the callback
    /// parameter that delivers the result.
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub async_: Option<AsyncMarker>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub unsupported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Extra registration-time parameters, consumed only by the listener
    /// registration signature of events.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_parameters: Vec<TypeNode>,
}

/// One entry of a closed string set, bare or annotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Plain(String),
    Documented {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl EnumValue {
    pub fn name(&self) -> &str {
        match self {
            EnumValue::Plain(name) => name,
            EnumValue::Documented { name, .. } => name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            EnumValue::Plain(_) => None,
            EnumValue::Documented { description, .. } => description.as_deref(),
        }
    }
}

/// Asynchronous-completion marker of a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AsyncMarker {
    Flag(bool),
    Callback(String),
}

impl AsyncMarker {
    /// Name of the designated callback parameter, if the marker names one.
    pub fn callback_name(&self) -> Option<&str> {
        match self {
            AsyncMarker::Flag(_) => None,
            AsyncMarker::Callback(name) => Some(name),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, AsyncMarker::Flag(false))
    }
}

/// Deprecation notice, bare or with an explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deprecation {
    Flag(bool),
    Note(String),
}

impl Deprecation {
    pub fn is_active(&self) -> bool {
        !matches!(self, Deprecation::Flag(false))
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            Deprecation::Flag(_) => None,
            Deprecation::Note(note) => Some(note),
        }
    }
}

/// The `additionalProperties` field accepts a bare boolean or a full node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Permissive(bool),
    Node(Box<TypeNode>),
}

impl AdditionalProperties {
    /// Whether undeclared members are allowed at all.
    pub fn allows(&self) -> bool {
        !matches!(self, AdditionalProperties::Permissive(false))
    }

    /// Whether the element type is explicitly unconstrained.
    pub fn is_unconstrained(&self) -> bool {
        match self {
            AdditionalProperties::Permissive(allowed) => *allowed,
            AdditionalProperties::Node(node) => node.kind.as_deref() == Some("any"),
        }
    }

    pub fn node(&self) -> Option<&TypeNode> {
        match self {
            AdditionalProperties::Permissive(_) => None,
            AdditionalProperties::Node(node) => Some(node),
        }
    }
}

/// Escape hatch attached to a node that ordinary compilation cannot
/// represent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeOverride {
    /// Use this expression verbatim.
    Expr(String),
    /// Emit `declaration` once as a helper and use `name` at the use site.
    Declared { name: String, declaration: String },
}

impl TypeNode {
    pub fn primitive(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    pub fn ref_to(target: impl Into<String>) -> Self {
        Self {
            reference: Some(target.into()),
            ..Default::default()
        }
    }

    /// Named parameter or property shorthand.
    pub fn named(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the node declares a closed string set.
    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }
}
