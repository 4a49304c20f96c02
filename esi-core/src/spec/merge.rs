use tracing::debug;

use crate::operation::{Operation, Parameter};
use crate::schema::Importer;
use crate::spec::SpecDocument;

impl SpecDocument {
    /// Left-biased union: everything in `self` is kept; entries of `other` are added only under
    /// keys `self` does not have. Adopted entries bring the schema nodes they reach.
    pub fn merge(&self, other: &SpecDocument) -> SpecDocument {
        let mut out = self.clone();
        let mut importer = Importer::new(&other.graph, &mut out.graph);
        let mut adopted = 0usize;

        for (name, id) in &other.definitions {
            if !out.definitions.contains_key(name) {
                out.definitions.insert(name.clone(), importer.import(*id));
                adopted += 1;
            }
        }

        for (name, param) in &other.parameters {
            if !out.parameters.contains_key(name) {
                out.parameters
                    .insert(name.clone(), import_parameter(&mut importer, param));
                adopted += 1;
            }
        }

        let mut new_ops = Vec::new();
        for (id, op) in &other.operations {
            if out.operations.contains_key(id) {
                continue;
            }
            let mut op: Operation = op.clone();
            for param in &mut op.parameters {
                *param = import_parameter(&mut importer, param);
            }
            for node in op.responses.values_mut() {
                *node = importer.import(*node);
            }
            new_ops.push(op);
        }
        drop(importer);
        adopted += new_ops.len();
        for op in new_ops {
            out.index_operation(op);
        }

        for (scope, desc) in &other.info.sso_scopes {
            out.info
                .sso_scopes
                .entry(scope.clone())
                .or_insert_with(|| desc.clone());
        }

        debug!(adopted, nodes = out.graph.len(), "merged spec document");
        out
    }
}

fn import_parameter(importer: &mut Importer<'_, '_>, param: &Parameter) -> Parameter {
    Parameter {
        node: importer.import(param.node),
        ..param.clone()
    }
}
