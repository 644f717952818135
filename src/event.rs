//! Observation interface of the informed search. Observers only watch: nothing they do feeds back
//! into the search.
use crate::node::PathNode;
use crate::Cost;
use grid_util::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEventKind {
    /// A node was pushed onto the frontier.
    Expanded,
    /// A node was popped and its cost finalized.
    Closed,
    /// The closed node is the goal; the search stops.
    GoalReached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchEvent {
    pub kind: SearchEventKind,
    pub point: Point,
    pub g: Cost,
    pub h: Cost,
    pub f: Cost,
}

impl SearchEvent {
    pub fn new(kind: SearchEventKind, node: &PathNode<Point, Cost>) -> SearchEvent {
        SearchEvent {
            kind,
            point: node.position,
            g: node.g,
            h: node.h,
            f: node.f,
        }
    }
}

pub trait SearchObserver {
    fn observe(&mut self, event: &SearchEvent);
}

impl<F: FnMut(&SearchEvent)> SearchObserver for F {
    fn observe(&mut self, event: &SearchEvent) {
        (self)(event)
    }
}
