//! The schema node graph.
//!
//! Nodes live in an arena owned by [`SchemaGraph`] and refer to each other through
//! [`NodeId`]s, so a definition referenced from many places (or from itself) is one node.

mod build;
mod import;

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::error::{ConversionError, SpecError, ValidationError};
use crate::types::{NativeType, SchemaKind};
use crate::value::NativeValue;

pub(crate) use build::GraphBuilder;
pub(crate) use import::Importer;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Nested nodes; at most one shape applies to a given node.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeChildren {
    #[default]
    None,
    Items(NodeId),
    Properties(BTreeMap<String, NodeId>),
    Reference(NodeId),
}

/// One JSON Schema fragment.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SchemaNode {
    /// The `type` exactly as declared; `None` when absent.
    pub declared_type: Option<String>,
    /// Behavior selected from `declared_type`.
    pub kind: SchemaKind,
    pub format: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// `required: true` on a parameter or property.
    pub required: bool,
    /// `required: [..]` on an object schema.
    pub required_properties: Vec<String>,
    pub default: Option<JsonValue>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
    pub enum_values: Vec<JsonValue>,
    pub children: NodeChildren,
    /// Declared in the document's `definitions` or `parameters` table.
    pub is_global: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaGraph {
    nodes: Vec<SchemaNode>,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panics when `id` was issued by another graph.
    pub fn get(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { graph: self, id }
    }

    pub fn insert(&mut self, node: SchemaNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Builds a standalone fragment (and everything nested in it) into this graph.
    ///
    /// `$ref` pointers inside the fragment resolve against the fragment itself.
    pub fn insert_fragment(&mut self, fragment: &JsonValue) -> Result<NodeId, SpecError> {
        GraphBuilder::new(fragment, self, crate::spec::DEFAULT_MAX_REF_DEPTH).build(fragment)
    }

    /// Convenience for a graph holding a single fragment.
    pub fn from_fragment(fragment: &JsonValue) -> Result<(SchemaGraph, NodeId), SpecError> {
        let mut graph = SchemaGraph::new();
        let id = graph.insert_fragment(fragment)?;
        Ok((graph, id))
    }

    pub(crate) fn reserve(&mut self) -> NodeId {
        self.insert(SchemaNode::default())
    }

    pub(crate) fn set(&mut self, id: NodeId, node: SchemaNode) {
        self.nodes[id.0] = node;
    }
}

/// A node together with the graph it lives in.
#[derive(Debug, Clone, Copy)]
pub struct Node<'g> {
    graph: &'g SchemaGraph,
    id: NodeId,
}

impl<'g> Node<'g> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn graph(&self) -> &'g SchemaGraph {
        self.graph
    }

    pub fn schema(&self) -> &'g SchemaNode {
        self.graph.get(self.id)
    }

    pub fn kind(&self) -> SchemaKind {
        self.schema().kind
    }

    pub fn format(&self) -> Option<&'g str> {
        self.schema().format.as_deref()
    }

    pub fn items(&self) -> Option<Node<'g>> {
        match self.schema().children {
            NodeChildren::Items(id) => Some(self.graph.node(id)),
            _ => None,
        }
    }

    pub fn properties(&self) -> Option<impl Iterator<Item = (&'g str, Node<'g>)> + 'g> {
        let graph = self.graph;
        match &self.schema().children {
            NodeChildren::Properties(props) => Some(
                props
                    .iter()
                    .map(move |(name, id)| (name.as_str(), graph.node(*id))),
            ),
            _ => None,
        }
    }

    pub fn property(&self, name: &str) -> Option<Node<'g>> {
        match &self.schema().children {
            NodeChildren::Properties(props) => props.get(name).map(|id| self.graph.node(*id)),
            _ => None,
        }
    }

    pub fn referenced(&self) -> Option<Node<'g>> {
        match self.schema().children {
            NodeChildren::Reference(id) => Some(self.graph.node(id)),
            _ => None,
        }
    }

    pub fn is_required_property(&self, name: &str) -> bool {
        self.schema().required_properties.iter().any(|p| p == name)
    }

    pub fn validate(&self, value: &NativeValue) -> Result<(), ValidationError> {
        self.kind().validate(*self, value)
    }

    pub fn wire_to_native(&self, value: &JsonValue) -> Result<NativeValue, ConversionError> {
        self.kind().wire_to_native(*self, value)
    }

    pub fn native_to_wire(&self, value: &NativeValue) -> Result<JsonValue, ConversionError> {
        self.kind().native_to_wire(*self, value)
    }

    pub fn inferred_type(&self) -> NativeType {
        self.kind().inferred_type(*self, &mut Vec::new())
    }

    /// `type` or `type.format`, as shown in type errors.
    pub(crate) fn type_label(&self) -> String {
        let node = self.schema();
        let ty = node.declared_type.as_deref().unwrap_or("object");
        match &node.format {
            Some(fmt) => format!("{ty}.{fmt}"),
            None => ty.to_string(),
        }
    }
}
