use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::{Map, Value as JsonValue};

use crate::error::{RefError, SpecError};
use crate::schema::{NodeChildren, NodeId, SchemaGraph, SchemaNode};
use crate::spec::refs::{canonical_ref, is_global_pointer, resolve_ref};
use crate::types::SchemaKind;

/// Builds schema nodes out of raw fragments of one document.
///
/// Every `$ref` target is built once and memoized by pointer, so repeated references share a
/// node and a definition that refers back to itself closes into a cycle in the graph.
pub(crate) struct GraphBuilder<'d, 'g> {
    doc: &'d JsonValue,
    graph: &'g mut SchemaGraph,
    by_pointer: HashMap<String, NodeId>,
    max_ref_depth: usize,
}

impl<'d, 'g> GraphBuilder<'d, 'g> {
    pub(crate) fn new(doc: &'d JsonValue, graph: &'g mut SchemaGraph, max_ref_depth: usize) -> Self {
        Self {
            doc,
            graph,
            by_pointer: HashMap::new(),
            max_ref_depth,
        }
    }

    /// Builds the fragment a local pointer designates, as if it were reached through `$ref`.
    pub(crate) fn build_pointer(&mut self, pointer: &str) -> Result<NodeId, SpecError> {
        self.build(&JsonValue::Object(Map::from_iter([(
            "$ref".to_string(),
            JsonValue::String(pointer.to_string()),
        )])))
    }

    pub(crate) fn build(&mut self, fragment: &JsonValue) -> Result<NodeId, SpecError> {
        let (target, pointer) = self.follow(fragment)?;
        let Some(pointer) = pointer else {
            let node = self.construct(target)?;
            return Ok(self.graph.insert(node));
        };

        if let Some(id) = self.by_pointer.get(&pointer) {
            return Ok(*id);
        }
        let id = self.graph.reserve();
        self.by_pointer.insert(pointer.clone(), id);
        let mut node = self.construct(target)?;
        node.is_global = is_global_pointer(&pointer);
        self.graph.set(id, node);
        self.check_delegation(id, &pointer)?;
        Ok(id)
    }

    /// A `schema` node delegates every call to its target, so a chain of them must end in a
    /// concrete node. Any loop closes on the outermost node, which is set last.
    fn check_delegation(&self, start: NodeId, pointer: &str) -> Result<(), RefError> {
        let mut seen = HashSet::new();
        let mut current = start;
        while seen.insert(current) {
            match self.graph.get(current).children {
                NodeChildren::Reference(next) => current = next,
                _ => return Ok(()),
            }
        }
        Err(RefError::Cycle(pointer.to_string()))
    }

    /// Follows a `$ref` chain to a concrete fragment, returning it with the last pointer used.
    pub(crate) fn follow<'f>(
        &self,
        fragment: &'f JsonValue,
    ) -> Result<(&'f JsonValue, Option<String>), RefError>
    where
        'd: 'f,
    {
        let mut current = fragment;
        let mut pointer = None;
        let mut visited = HashSet::new();
        while let Some(ref_str) = current.get("$ref").and_then(JsonValue::as_str) {
            if visited.len() >= self.max_ref_depth {
                return Err(RefError::TooDeep {
                    pointer: ref_str.to_string(),
                    limit: self.max_ref_depth,
                });
            }
            current = resolve_ref(self.doc, ref_str, &mut visited)?;
            pointer = Some(canonical_ref(ref_str));
        }
        Ok((current, pointer))
    }

    fn construct(&mut self, fragment: &JsonValue) -> Result<SchemaNode, SpecError> {
        let Some(obj) = fragment.as_object() else {
            return Ok(SchemaNode::default());
        };

        let declared_type = str_field(obj, "type");
        let mut node = SchemaNode {
            kind: SchemaKind::from_declared(declared_type.as_deref()),
            format: str_field(obj, "format"),
            title: str_field(obj, "title"),
            description: str_field(obj, "description"),
            required: matches!(obj.get("required"), Some(JsonValue::Bool(true))),
            required_properties: match obj.get("required") {
                Some(JsonValue::Array(names)) => names
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(str::to_string)
                    .collect(),
                _ => Vec::new(),
            },
            default: obj.get("default").cloned(),
            minimum: obj.get("minimum").and_then(JsonValue::as_f64),
            maximum: obj.get("maximum").and_then(JsonValue::as_f64),
            min_items: obj.get("minItems").and_then(JsonValue::as_u64),
            max_items: obj.get("maxItems").and_then(JsonValue::as_u64),
            unique_items: obj
                .get("uniqueItems")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            enum_values: obj
                .get("enum")
                .and_then(JsonValue::as_array)
                .cloned()
                .unwrap_or_default(),
            declared_type,
            ..SchemaNode::default()
        };

        if let Some(items) = obj.get("items") {
            node.children = NodeChildren::Items(self.build(items)?);
        } else if let Some(JsonValue::Object(props)) = obj.get("properties") {
            let mut built = BTreeMap::new();
            for (name, prop) in props {
                built.insert(name.clone(), self.build(prop)?);
            }
            node.children = NodeChildren::Properties(built);
        }

        if matches!(node.declared_type.as_deref(), None | Some("schema")) {
            if let Some(schema) = obj.get("schema") {
                node.children = NodeChildren::Reference(self.build(schema)?);
                node.kind = SchemaKind::Schema;
            }
        }

        Ok(node)
    }
}

fn str_field(obj: &Map<String, JsonValue>, key: &str) -> Option<String> {
    obj.get(key).and_then(JsonValue::as_str).map(str::to_string)
}
