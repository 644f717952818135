//! Generic uniform-cost search. Successors and goal test are closures, so the engine knows
//! nothing about grids.
use crate::error::FrontierError;
use crate::frontier::Frontier;
use fxhash::FxHashSet;
use num_traits::Zero;
use std::hash::Hash;

/// Returns the minimal total cost from `start` to the first node satisfying `success`, or [None]
/// if the frontier runs dry first. No parent links are kept, so only the cost is known.
///
/// Superseded frontier entries are skipped when popped (lazy deletion); `on_close` sees every node
/// at the moment its cost is finalized, in non-decreasing cost order.
pub fn uniform_cost<N, C, FN, IN, FS, FC>(
    start: &N,
    mut successors: FN,
    mut success: FS,
    mut on_close: FC,
) -> Option<C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FS: FnMut(&N) -> bool,
    FC: FnMut(&N, C),
{
    let mut frontier = Frontier::new();
    let mut closed: FxHashSet<N> = FxHashSet::default();
    frontier.push(C::zero(), start.clone());
    loop {
        let (cost, node) = match frontier.pop_min() {
            Ok(entry) => entry,
            Err(FrontierError::Empty) => return None,
        };
        if success(&node) {
            return Some(cost);
        }
        if closed.contains(&node) {
            continue;
        }
        on_close(&node, cost);
        for (successor, move_cost) in successors(&node) {
            if !closed.contains(&successor) {
                frontier.push(cost + move_cost, successor);
            }
        }
        closed.insert(node);
    }
}
