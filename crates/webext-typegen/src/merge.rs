//! Fragment merging and the namespace table.
//!
//! Namespaces are spread across many fragment files: one file usually
//! declares the bulk of a namespace and others graft extra types, enum
//! values or manifest properties onto it. This module folds all fragments
//! into a single table and resolves the three grafting mechanisms:
//! `$extend` on a type, `$import` on a type, and `$import` on a namespace.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::ir::{EnumValue, FunctionNode, Namespace, TypeNode};

/// Namespace alias table, mapping historical names to current ones.
pub type AliasTable = BTreeMap<String, String>;

/// The merged namespace table built from every fragment document.
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    namespaces: BTreeMap<String, Namespace>,
    aliases: AliasTable,
}

impl SchemaTable {
    pub fn new(aliases: AliasTable) -> Self {
        Self {
            namespaces: BTreeMap::new(),
            aliases,
        }
    }

    /// Build a table from parsed fragments and run every merge pass.
    pub fn from_fragments(
        fragments: impl IntoIterator<Item = Vec<Namespace>>,
        aliases: AliasTable,
    ) -> Self {
        let mut table = Self::new(aliases);
        for fragment in fragments {
            table.add_fragment(fragment);
        }
        table.collapse_extensions();
        table.apply_type_imports();
        table
    }

    /// Final name for a possibly historical namespace name.
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn add_fragment(&mut self, fragment: Vec<Namespace>) {
        for record in fragment {
            self.add_record(record);
        }
    }

    /// Merge one namespace partial-record into the table.
    ///
    /// Arrays concatenate onto the existing record; `properties` merges
    /// per key and `description` whole, both last-wins.
    pub fn add_record(&mut self, record: Namespace) {
        let name = self.resolve_alias(&record.namespace).to_string();
        let merged = self
            .namespaces
            .entry(name.clone())
            .or_insert_with(|| Namespace {
                namespace: name,
                ..Namespace::default()
            });
        merged.types.extend(record.types);
        merged.functions.extend(record.functions);
        merged.events.extend(record.events);
        merged.permissions.extend(record.permissions);
        merged.allowed_contexts.extend(record.allowed_contexts);
        merged.properties.extend(record.properties);
        if record.description.is_some() {
            merged.description = record.description;
        }
        if record.import.is_some() {
            merged.import = record.import;
        }
    }

    /// Collapse `$extend` records: every type naming an extension target
    /// lands in one group with that target and the group merges into a
    /// single record.
    pub fn collapse_extensions(&mut self) {
        for ns in self.namespaces.values_mut() {
            collapse_types(&mut ns.types);
        }
    }

    /// Copy members into types that declare an object-level `$import`.
    ///
    /// The target is looked up in the importing type's own namespace by id
    /// or name, after narrowing dotted targets with [`import_key`].
    pub fn apply_type_imports(&mut self) {
        for ns in self.namespaces.values_mut() {
            for index in 0..ns.types.len() {
                let Some(target) = ns.types[index].import.clone() else {
                    continue;
                };
                let key = import_key(&target);
                let donor = ns
                    .types
                    .iter()
                    .enumerate()
                    .find(|(i, t)| {
                        *i != index
                            && (t.id.as_deref() == Some(key) || t.name.as_deref() == Some(key))
                    })
                    .map(|(_, t)| t.clone());
                match donor {
                    Some(donor) => {
                        debug!(
                            namespace = %ns.namespace,
                            target = %target,
                            "copying imported type members"
                        );
                        let node = &mut ns.types[index];
                        node.import = None;
                        absorb_imported(node, donor);
                    }
                    None => {
                        warn!(
                            namespace = %ns.namespace,
                            target = %target,
                            "type import target not found"
                        );
                    }
                }
            }
        }
    }

    /// Materialize a namespace for emission, resolving a namespace-level
    /// `$import` against the table. The referencing namespace keeps its
    /// own name, description and permissions; everything else is merged
    /// in and deduplicated by id or name.
    pub fn namespace_for_emit(&self, name: &str) -> Option<Namespace> {
        let ns = self.namespaces.get(name)?;
        let Some(target) = ns.import.clone() else {
            return Some(ns.clone());
        };
        let mut merged = ns.clone();
        merged.import = None;
        let target_name = self.resolve_alias(&target);
        let Some(donor) = self.namespaces.get(target_name) else {
            warn!(namespace = %name, target = %target, "imported namespace not found");
            return Some(merged);
        };
        if merged.description.is_none() {
            merged.description = donor.description.clone();
        }
        if merged.permissions.is_empty() {
            merged.permissions = donor.permissions.clone();
        }
        for node in &donor.types {
            if !merged.types.iter().any(|own| same_member(own, node)) {
                merged.types.push(node.clone());
            }
        }
        for function in &donor.functions {
            if !merged.functions.iter().any(|own| own.name == function.name) {
                merged.functions.push(function.clone());
            }
        }
        for event in &donor.events {
            if !merged.events.iter().any(|own| own.name == event.name) {
                merged.events.push(event.clone());
            }
        }
        for (key, node) in &donor.properties {
            merged
                .properties
                .entry(key.clone())
                .or_insert_with(|| node.clone());
        }
        for context in &donor.allowed_contexts {
            if !merged.allowed_contexts.contains(context) {
                merged.allowed_contexts.push(context.clone());
            }
        }
        Some(merged)
    }

    /// Namespace names in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    pub fn namespaces_mut(&mut self) -> impl Iterator<Item = &mut Namespace> {
        self.namespaces.values_mut()
    }

    pub fn get(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Namespace> {
        self.namespaces.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Namespace> {
        self.namespaces.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// Key used to match an import or extension target inside the owning
/// namespace.
///
/// Dotted targets match on the first segment after the dot only: some
/// upstream ids carry historical namespace qualifiers, so a target like
/// `menusInternal.OnClickData` must resolve to the sibling type whose id
/// is `OnClickData`. This narrowing is load-bearing and must not be
/// widened to full-path matching.
pub fn import_key(target: &str) -> &str {
    match target.split_once('.') {
        Some((_, rest)) => rest.split('.').next().unwrap_or(rest),
        None => target,
    }
}

/// Whether two type records describe the same member, keyed by id when
/// both sides have one, else by name.
fn same_member(a: &TypeNode, b: &TypeNode) -> bool {
    match (&a.id, &b.id) {
        (Some(lhs), Some(rhs)) => lhs == rhs,
        _ => a.name.is_some() && a.name == b.name,
    }
}

fn collapse_types(types: &mut Vec<TypeNode>) {
    let mut collapsed: Vec<TypeNode> = Vec::with_capacity(types.len());
    let mut slots: BTreeMap<String, usize> = BTreeMap::new();
    for mut node in types.drain(..) {
        // The $extend key is consumed here; it must not survive into
        // later passes or output.
        let key = node.extend.take().or_else(|| node.id.clone());
        match key {
            Some(key) => match slots.get(&key) {
                Some(&slot) => merge_into(&mut collapsed[slot], node),
                None => {
                    slots.insert(key, collapsed.len());
                    collapsed.push(node);
                }
            },
            None => collapsed.push(node),
        }
    }
    *types = collapsed;
}

/// Merge `incoming` into `existing`: arrays concatenate, keyed maps merge
/// per key, scalars keep the first value present.
fn merge_into(existing: &mut TypeNode, incoming: TypeNode) {
    existing.choices.extend(incoming.choices);
    existing.enum_values.extend(incoming.enum_values);
    existing.functions.extend(incoming.functions);
    existing.events.extend(incoming.events);
    existing.parameters.extend(incoming.parameters);
    for (name, node) in incoming.properties {
        existing.properties.entry(name).or_insert(node);
    }
    for (pattern, node) in incoming.pattern_properties {
        existing.pattern_properties.entry(pattern).or_insert(node);
    }
    fill(&mut existing.id, incoming.id);
    fill(&mut existing.name, incoming.name);
    fill(&mut existing.kind, incoming.kind);
    fill(&mut existing.reference, incoming.reference);
    fill(&mut existing.import, incoming.import);
    fill(&mut existing.description, incoming.description);
    fill(&mut existing.deprecated, incoming.deprecated);
    fill(&mut existing.additional_properties, incoming.additional_properties);
    fill(&mut existing.items, incoming.items);
    fill(&mut existing.min_items, incoming.min_items);
    fill(&mut existing.max_items, incoming.max_items);
    fill(&mut existing.is_instance_of, incoming.is_instance_of);
    fill(&mut existing.returns, incoming.returns);
    fill(&mut existing.value, incoming.value);
    fill(&mut existing.override_, incoming.override_);
    existing.optional |= incoming.optional;
    existing.unsupported |= incoming.unsupported;
}

/// Deep-merge an import donor into the importing type. The importer's
/// scalars win; arrays concatenate and deduplicate by id or name. The
/// importer keeps its own id and name.
fn absorb_imported(node: &mut TypeNode, donor: TypeNode) {
    for choice in donor.choices {
        if !node.choices.iter().any(|own| same_member(own, &choice)) {
            node.choices.push(choice);
        }
    }
    merge_enum_values(&mut node.enum_values, donor.enum_values);
    merge_functions(&mut node.functions, donor.functions);
    merge_functions(&mut node.events, donor.events);
    for parameter in donor.parameters {
        let duplicate = parameter.name.is_some()
            && node.parameters.iter().any(|own| own.name == parameter.name);
        if !duplicate {
            node.parameters.push(parameter);
        }
    }
    for (name, child) in donor.properties {
        node.properties.entry(name).or_insert(child);
    }
    for (pattern, child) in donor.pattern_properties {
        node.pattern_properties.entry(pattern).or_insert(child);
    }
    fill(&mut node.kind, donor.kind);
    fill(&mut node.reference, donor.reference);
    fill(&mut node.description, donor.description);
    fill(&mut node.deprecated, donor.deprecated);
    fill(&mut node.additional_properties, donor.additional_properties);
    fill(&mut node.items, donor.items);
    fill(&mut node.min_items, donor.min_items);
    fill(&mut node.max_items, donor.max_items);
    fill(&mut node.is_instance_of, donor.is_instance_of);
    fill(&mut node.returns, donor.returns);
    fill(&mut node.value, donor.value);
    fill(&mut node.override_, donor.override_);
}

fn merge_functions(own: &mut Vec<FunctionNode>, donated: Vec<FunctionNode>) {
    for function in donated {
        if !own.iter().any(|existing| existing.name == function.name) {
            own.push(function);
        }
    }
}

fn merge_enum_values(own: &mut Vec<EnumValue>, donated: Vec<EnumValue>) {
    for value in donated {
        if !own.iter().any(|existing| existing.name() == value.name()) {
            own.push(value);
        }
    }
}

fn fill<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if slot.is_none() {
        *slot = incoming;
    }
}
