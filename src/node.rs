use num_traits::Zero;
use std::cmp::Ordering;
use std::ops::{Add, Index};

/// Index of a [PathNode] inside the [NodeArena] that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

/// A node of the informed search tree: `g` is the cost from the start, `h` the heuristic estimate
/// to the goal and `f = g + h` the frontier priority. The parent link is set at creation and never
/// changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathNode<N, C> {
    pub position: N,
    pub g: C,
    pub h: C,
    pub f: C,
    pub parent: Option<NodeHandle>,
}

impl<N, C: Copy + Add<Output = C>> PathNode<N, C> {
    pub fn new(position: N, g: C, h: C, parent: Option<NodeHandle>) -> PathNode<N, C> {
        PathNode {
            position,
            g,
            h,
            f: g + h,
            parent,
        }
    }
}

impl<N, C: Zero + Copy> PathNode<N, C> {
    pub fn root(position: N, h: C) -> PathNode<N, C> {
        PathNode::new(position, C::zero(), h, None)
    }
}

impl<N, C: Ord> PathNode<N, C> {
    /// Frontier ordering, by `f` only. Identity is the position alone, which is what the search
    /// keys its maps by.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        self.f.cmp(&other.f)
    }
}

/// Owns every node created during one search. Parents are referenced by [NodeHandle], so the tree
/// needs no shared ownership and is freed with the arena.
#[derive(Clone, Debug)]
pub struct NodeArena<N, C> {
    nodes: Vec<PathNode<N, C>>,
}

impl<N, C> Default for NodeArena<N, C> {
    fn default() -> Self {
        NodeArena { nodes: Vec::new() }
    }
}

impl<N, C> NodeArena<N, C> {
    pub fn new() -> NodeArena<N, C> {
        NodeArena::default()
    }

    pub fn insert(&mut self, node: PathNode<N, C>) -> NodeHandle {
        self.nodes.push(node);
        NodeHandle(self.nodes.len() - 1)
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&PathNode<N, C>> {
        self.nodes.get(handle.0)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Positions from the root of the tree down to `handle`, both included.
    pub fn path_to(&self, handle: NodeHandle) -> Vec<N>
    where
        N: Clone,
    {
        let mut path = std::iter::successors(self.get(handle), |node| {
            node.parent.and_then(|parent| self.get(parent))
        })
        .map(|node| node.position.clone())
        .collect::<Vec<N>>();
        path.reverse();
        path
    }
}

impl<N, C> Index<NodeHandle> for NodeArena<N, C> {
    type Output = PathNode<N, C>;

    fn index(&self, handle: NodeHandle) -> &Self::Output {
        &self.nodes[handle.0]
    }
}
