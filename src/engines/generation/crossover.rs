use crate::engines::generation::random::RandomSource;
use crate::error::{GpError, Result, OPERATION_OVER_INDIVIDUAL_FAIL};
use crate::types::Node;

/// Picks the control both parents cross on. Draws only when there is a choice.
pub fn pick_control<R: RandomSource + ?Sized>(controls: usize, rng: &mut R) -> Result<usize> {
    if controls > 1 {
        rng.next_int(controls)
    } else {
        Ok(0)
    }
}

/// Subtree swap: one uniform position in each tree, terminals included.
///
/// Fails without drawing when either tree is a bare terminal.
pub fn crossover_trees<R: RandomSource + ?Sized>(
    a: &Node,
    b: &Node,
    rng: &mut R,
) -> Result<(Node, Node)> {
    if a.is_terminal() || b.is_terminal() {
        return Err(GpError::Structural(OPERATION_OVER_INDIVIDUAL_FAIL.to_string()));
    }

    let ia = rng.next_int(a.node_count())?;
    let ib = rng.next_int(b.node_count())?;
    let missing = || GpError::Structural("crossover point out of range".to_string());

    let from_a = a.subtree(ia).ok_or_else(missing)?.clone();
    let from_b = b.subtree(ib).ok_or_else(missing)?.clone();

    let child1 = a.with_subtree(ia, from_b).ok_or_else(missing)?;
    let child2 = b.with_subtree(ib, from_a).ok_or_else(missing)?;
    log::debug!("crossover at positions {} and {}", ia, ib);
    Ok((child1, child2))
}

/// Crosses the same control of two multi-control parents; the rest is copied.
pub fn crossover_controls<R: RandomSource + ?Sized>(
    a: &[Node],
    b: &[Node],
    rng: &mut R,
) -> Result<(Vec<Node>, Vec<Node>)> {
    if a.len() != b.len() {
        return Err(GpError::Structural(format!(
            "cannot cross individuals with {} and {} controls",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Err(GpError::Structural(OPERATION_OVER_INDIVIDUAL_FAIL.to_string()));
    }

    let index = pick_control(a.len(), rng)?;
    let (child_a, child_b) = crossover_trees(&a[index], &b[index], rng)?;

    let mut first = a.to_vec();
    let mut second = b.to_vec();
    first[index] = child_a;
    second[index] = child_b;
    Ok((first, second))
}
