//! Structural primitives over expression trees.
//!
//! Positions are preorder indices: the control root is position 0, then each
//! child subtree in order.

use crate::types::Node;

/// A node position together with the facts operators select on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub depth: usize,
    pub is_call: bool,
}

impl Node {
    pub fn node_count(&self) -> usize {
        match self {
            Node::Call { args, .. } => 1 + args.iter().map(Node::node_count).sum::<usize>(),
            _ => 1,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Call { args, .. } => 1 + args.iter().map(Node::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// All positions in preorder.
    pub fn positions(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.node_count());
        self.collect_positions(0, &mut out);
        out
    }

    fn collect_positions(&self, depth: usize, out: &mut Vec<Position>) {
        out.push(Position {
            index: out.len(),
            depth,
            is_call: !self.is_terminal(),
        });
        if let Node::Call { args, .. } = self {
            for arg in args {
                arg.collect_positions(depth + 1, out);
            }
        }
    }

    pub fn subtree(&self, index: usize) -> Option<&Node> {
        if index == 0 {
            return Some(self);
        }
        let mut offset = 1;
        if let Node::Call { args, .. } = self {
            for arg in args {
                let size = arg.node_count();
                if index < offset + size {
                    return arg.subtree(index - offset);
                }
                offset += size;
            }
        }
        None
    }

    pub fn subtree_mut(&mut self, index: usize) -> Option<&mut Node> {
        if index == 0 {
            return Some(self);
        }
        let mut offset = 1;
        if let Node::Call { args, .. } = self {
            for arg in args.iter_mut() {
                let size = arg.node_count();
                if index < offset + size {
                    return arg.subtree_mut(index - offset);
                }
                offset += size;
            }
        }
        None
    }

    /// Copy of this tree with the subtree at `index` swapped for `replacement`.
    pub fn with_subtree(&self, index: usize, replacement: Node) -> Option<Node> {
        let mut copy = self.clone();
        *copy.subtree_mut(index)? = replacement;
        Some(copy)
    }

    /// Sensor indices in preorder.
    pub fn sensors(&self) -> Vec<usize> {
        match self {
            Node::Sensor(index) => vec![*index],
            Node::Const(_) => Vec::new(),
            Node::Call { args, .. } => args.iter().flat_map(Node::sensors).collect(),
        }
    }
}
