use std::collections::HashMap;

use crate::schema::{NodeChildren, NodeId, SchemaGraph};

/// Copies nodes from one graph into another, bringing along everything they reach.
///
/// Ids are remapped once; a node reached twice (or through a cycle) is copied once.
pub(crate) struct Importer<'s, 't> {
    source: &'s SchemaGraph,
    target: &'t mut SchemaGraph,
    remap: HashMap<NodeId, NodeId>,
}

impl<'s, 't> Importer<'s, 't> {
    pub(crate) fn new(source: &'s SchemaGraph, target: &'t mut SchemaGraph) -> Self {
        Self {
            source,
            target,
            remap: HashMap::new(),
        }
    }

    pub(crate) fn import(&mut self, id: NodeId) -> NodeId {
        if let Some(mapped) = self.remap.get(&id) {
            return *mapped;
        }
        let mapped = self.target.reserve();
        self.remap.insert(id, mapped);

        let mut node = self.source.get(id).clone();
        node.children = match node.children {
            NodeChildren::None => NodeChildren::None,
            NodeChildren::Items(item) => NodeChildren::Items(self.import(item)),
            NodeChildren::Reference(target) => NodeChildren::Reference(self.import(target)),
            NodeChildren::Properties(props) => NodeChildren::Properties(
                props
                    .into_iter()
                    .map(|(name, prop)| (name, self.import(prop)))
                    .collect(),
            ),
        };
        self.target.set(mapped, node);
        mapped
    }
}
