//! Node flattening.
//!
//! Walks the selected trees depth-first and yields the independently
//! drawable units in declared order. Containers with children dissolve into
//! their children; childless containers stay as a single bounding-box unit.

use crate::scene::SelectedNode;
use crate::shapes::{Ancestor, Shape};

/// Separator between names in an ancestry label.
pub const LABEL_SEPARATOR: &str = " > ";

/// One drawable unit of the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatNode<'a> {
    pub shape: &'a Shape,
    /// Containers above the shape, nearest first, including the ones
    /// supplied with the selection.
    pub ancestors: Vec<Ancestor>,
    /// Display names from the selected node down to this shape.
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NodeFlattener;

impl NodeFlattener {
    pub fn new() -> Self {
        Self
    }

    pub fn flatten<'a>(&self, selection: &'a [SelectedNode]) -> Vec<FlatNode<'a>> {
        let mut nodes = Vec::new();
        for selected in selection {
            self.visit(
                &selected.shape,
                selected.ancestors.clone(),
                selected.shape.display_name().to_string(),
                &mut nodes,
            );
        }
        tracing::debug!(
            "Flattened {} selected nodes into {} drawable units",
            selection.len(),
            nodes.len()
        );
        nodes
    }

    fn visit<'a>(
        &self,
        shape: &'a Shape,
        ancestors: Vec<Ancestor>,
        label: String,
        out: &mut Vec<FlatNode<'a>>,
    ) {
        let children = shape.children();
        if !shape.is_container() || children.is_empty() {
            out.push(FlatNode {
                shape,
                ancestors,
                label,
            });
            return;
        }

        for child in children {
            let mut chain = Vec::with_capacity(ancestors.len() + 1);
            chain.push(Ancestor::of(shape));
            chain.extend_from_slice(&ancestors);
            let child_label = format!("{}{}{}", label, LABEL_SEPARATOR, child.display_name());
            self.visit(child, chain, child_label, out);
        }
    }
}
