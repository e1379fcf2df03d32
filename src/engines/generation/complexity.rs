use crate::config::complexity::ComplexityWeights;
use crate::types::Node;

/// Sum of node weights over the whole tree, saturating at `u32::MAX`.
pub fn complexity(node: &Node, weights: &ComplexityWeights) -> u32 {
    let own = weights.node(node);
    match node {
        Node::Call { args, .. } => args
            .iter()
            .map(|a| complexity(a, weights))
            .fold(own, u32::saturating_add),
        _ => own,
    }
}

pub fn total_complexity(controls: &[Node], weights: &ComplexityWeights) -> u32 {
    controls
        .iter()
        .map(|c| complexity(c, weights))
        .fold(0, u32::saturating_add)
}
