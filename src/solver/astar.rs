use std::cmp::Ordering;

use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use grid_util::Point;
use indexmap::IndexMap;
use log::{debug, info, trace};

use crate::cost_grid::CostGrid;
use crate::error::{FrontierError, GridError};
use crate::event::{SearchEvent, SearchEventKind, SearchObserver};
use crate::frontier::Frontier;
use crate::node::{NodeArena, NodeHandle, PathNode};
use crate::solver::{endpoints_passable, GridPath, GridSolver};
use crate::Cost;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the Manhattan heuristic. Above 1.0 the search turns into weighted A*, which expands
    /// fewer nodes but may return a costlier path.
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    /// Prepares a stepwise search from `start` to `goal`.
    pub fn search<'g>(
        &self,
        grid: &'g CostGrid,
        start: Point,
        goal: Point,
    ) -> Result<AstarSearch<'g>, GridError> {
        let passable = endpoints_passable(grid, &start, &goal)?;
        Ok(AstarSearch::new(self.clone(), grid, start, goal, passable))
    }

    /// Computes a minimal-cost path from start to goal, or [None] if the goal cannot be reached.
    pub fn get_path_single_goal(
        &self,
        grid: &CostGrid,
        start: Point,
        goal: Point,
    ) -> Result<Option<GridPath>, GridError> {
        self.get_path_observed(grid, start, goal, &mut |_: &SearchEvent| {})
    }

    /// Like [get_path_single_goal](Self::get_path_single_goal), reporting every expansion and
    /// closure to `observer`.
    pub fn get_path_observed<O>(
        &self,
        grid: &CostGrid,
        start: Point,
        goal: Point,
        observer: &mut O,
    ) -> Result<Option<GridPath>, GridError>
    where
        O: SearchObserver + ?Sized,
    {
        Ok(self.search(grid, start, goal)?.run(observer))
    }
}

impl GridSolver for AstarSolver {
    /// Manhattan distance times the heuristic factor. Every entry costs at least 1, so with a factor
    /// of 1.0 this never overestimates.
    fn heuristic(&self, p1: &Point, p2: &Point) -> Cost {
        (p1.manhattan_distance(p2) as f32 * self.heuristic_factor) as Cost
    }

    fn get_path_cost(
        &self,
        grid: &CostGrid,
        start: Point,
        goal: Point,
    ) -> Result<Option<Cost>, GridError> {
        Ok(self
            .get_path_single_goal(grid, start, goal)?
            .map(|path| path.cost))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Ready,
    Running,
    Found,
    Unreachable,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchStatus::Found | SearchStatus::Unreachable)
    }
}

/// An informed search in progress. Each [step](Self::step) closes one node, so a caller can
/// interleave the search with rendering, or stop early by dropping it.
pub struct AstarSearch<'g> {
    solver: AstarSolver,
    grid: &'g CostGrid,
    start: Point,
    goal: Point,
    frontier: Frontier<Cost, NodeHandle>,
    nodes: NodeArena<Point, Cost>,
    closed: FxIndexMap<Point, NodeHandle>,
    /// Best node pushed per position, for the dominance check.
    best: FxHashMap<Point, NodeHandle>,
    /// Barrier positions, never expanded into.
    reserved: FxHashSet<Point>,
    status: SearchStatus,
    found: Option<NodeHandle>,
}

impl<'g> AstarSearch<'g> {
    fn new(
        solver: AstarSolver,
        grid: &'g CostGrid,
        start: Point,
        goal: Point,
        passable: bool,
    ) -> AstarSearch<'g> {
        let mut search = AstarSearch {
            solver,
            grid,
            start,
            goal,
            frontier: Frontier::new(),
            nodes: NodeArena::new(),
            closed: FxIndexMap::default(),
            best: FxHashMap::default(),
            reserved: grid.barriers().collect(),
            status: SearchStatus::Ready,
            found: None,
        };
        if passable {
            let h = search.solver.heuristic(&start, &goal);
            let root = search.nodes.insert(PathNode::root(start, h));
            search.best.insert(start, root);
            search.frontier.push(h, root);
        } else {
            search.status = SearchStatus::Unreachable;
        }
        search
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Closed positions in the order they were closed.
    pub fn closed_points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.closed.keys()
    }

    /// Frontier entries, superseded ones included.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Closes the next node and expands its neighbours. Superseded frontier entries popped on the
    /// way are discarded within the same step. Does nothing once the search has terminated.
    pub fn step<O>(&mut self, observer: &mut O) -> SearchStatus
    where
        O: SearchObserver + ?Sized,
    {
        if self.status.is_terminal() {
            return self.status;
        }
        self.status = SearchStatus::Running;
        let handle = loop {
            match self.frontier.pop_min() {
                Ok((_, handle)) if self.closed.contains_key(&self.nodes[handle].position) => {
                    continue
                }
                Ok((_, handle)) => break handle,
                Err(FrontierError::Empty) => {
                    info!("{} is not reachable from {}", self.goal, self.start);
                    self.status = SearchStatus::Unreachable;
                    return self.status;
                }
            }
        };

        let node = self.nodes[handle];
        self.closed.insert(node.position, handle);
        observer.observe(&SearchEvent::new(SearchEventKind::Closed, &node));
        if node.position == self.goal {
            debug!(
                "A* reached {} at cost {} after closing {} of {} nodes",
                self.goal,
                node.g,
                self.closed.len(),
                self.nodes.len()
            );
            self.found = Some(handle);
            self.status = SearchStatus::Found;
            observer.observe(&SearchEvent::new(SearchEventKind::GoalReached, &node));
            return self.status;
        }

        for child in self.grid.neighbours(node.position, false) {
            if self.reserved.contains(&child) || self.closed.contains_key(&child) {
                continue;
            }
            let g = node.g + self.grid.entry(child);
            let h = self.solver.heuristic(&child, &self.goal);
            let child_node = PathNode::new(child, g, h, Some(handle));
            // Same position means same h, so a node that does not sort first is dominated
            let dominated = self.best.get(&child).map_or(false, |&best| {
                child_node.priority_cmp(&self.nodes[best]) != Ordering::Less
            });
            if dominated {
                continue;
            }
            let child_handle = self.nodes.insert(child_node);
            self.best.insert(child, child_handle);
            self.frontier.push(child_node.f, child_handle);
            trace!("Expanded {} with g = {}, h = {}", child, g, h);
            observer.observe(&SearchEvent::new(SearchEventKind::Expanded, &child_node));
        }
        self.status
    }

    /// Steps until the search terminates and returns the path if the goal was reached.
    pub fn run<O>(&mut self, observer: &mut O) -> Option<GridPath>
    where
        O: SearchObserver + ?Sized,
    {
        while !self.step(observer).is_terminal() {}
        self.path()
    }

    /// Follows the parent links back from the goal. The returned path shares nothing with the
    /// search.
    pub fn path(&self) -> Option<GridPath> {
        self.found.map(|handle| GridPath {
            cost: self.nodes[handle].g,
            points: self.nodes.path_to(handle),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::dijkstra::DijkstraSolver;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ignore(_: &SearchEvent) {}

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = CostGrid::new(1, 1, 3);
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        let path = solver
            .get_path_single_goal(&grid, start, start)
            .unwrap()
            .unwrap();
        assert_eq!(path.cost, 0);
        assert_eq!(path.points, vec![start]);
    }

    /// Asserts that the optimal path around a barrier is found.
    #[test]
    fn solve_simple_problem() {
        // |S11|
        // |1#1|
        // |11G|
        let grid: CostGrid = "111\n1#1\n111".parse().unwrap();
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        let end = Point::new(2, 2);
        let path = solver
            .get_path_single_goal(&grid, start, end)
            .unwrap()
            .unwrap();
        assert_eq!(path.cost, 4);
        assert_eq!(path.points.len(), 5);
        assert_eq!(path.points.first(), Some(&start));
        assert_eq!(path.points.last(), Some(&end));
        assert_eq!(solver.path_cost(&grid, &path.points), Ok(Some(4)));
    }

    /// The cheap detour is preferred over the short expensive route.
    #[test]
    fn test_complex() {
        // |S9G|
        // |191|
        // |111|
        let grid: CostGrid = "191\n191\n111".parse().unwrap();
        let solver = AstarSolver::new();
        let path = solver
            .get_path_single_goal(&grid, Point::new(0, 0), Point::new(2, 0))
            .unwrap()
            .unwrap();
        assert_eq!(path.cost, 6);
        assert_eq!(
            path.points,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(2, 1),
                Point::new(2, 0),
            ]
        );
        assert_eq!(
            DijkstraSolver.get_path_cost(&grid, Point::new(0, 0), Point::new(2, 0)),
            Ok(Some(6))
        );
    }

    #[test]
    fn barrier_goal_is_unreachable() {
        let grid: CostGrid = "11\n1#".parse().unwrap();
        let solver = AstarSolver::new();
        let search = solver
            .search(&grid, Point::new(0, 0), Point::new(1, 1))
            .unwrap();
        assert_eq!(search.status(), SearchStatus::Unreachable);
        assert_eq!(
            solver.get_path_single_goal(&grid, Point::new(1, 1), Point::new(0, 0)),
            Ok(None)
        );
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let grid: CostGrid = "1#1\n1#1".parse().unwrap();
        let solver = AstarSolver::new();
        let mut search = solver
            .search(&grid, Point::new(0, 0), Point::new(2, 1))
            .unwrap();
        assert_eq!(search.run(&mut ignore), None);
        assert_eq!(search.status(), SearchStatus::Unreachable);
        assert_eq!(search.closed_len(), 2);
    }

    #[test]
    fn stepwise_search() {
        let grid = CostGrid::new(4, 4, 1);
        let solver = AstarSolver::new();
        let mut search = solver
            .search(&grid, Point::new(0, 0), Point::new(3, 3))
            .unwrap();
        assert_eq!(search.status(), SearchStatus::Ready);
        assert_eq!(search.step(&mut ignore), SearchStatus::Running);
        assert_eq!(search.closed_len(), 1);
        assert_eq!(search.frontier_len(), 2);
        assert_eq!(search.path(), None);
        let path = search.run(&mut ignore).unwrap();
        assert_eq!(path.cost, 6);
        assert_eq!(search.status(), SearchStatus::Found);
        assert_eq!(search.closed_points().next(), Some(&Point::new(0, 0)));
        // Terminal searches stay put
        assert_eq!(search.step(&mut ignore), SearchStatus::Found);
    }

    #[test]
    fn observed_events() {
        let grid: CostGrid = "1163\n1381\n2136".parse().unwrap();
        let solver = AstarSolver::new();
        let mut events = Vec::new();
        let path = solver
            .get_path_observed(&grid, Point::new(0, 0), Point::new(3, 2), &mut |e: &SearchEvent| {
                events.push(*e)
            })
            .unwrap()
            .unwrap();

        let first = events.first().unwrap();
        assert_eq!(first.kind, SearchEventKind::Closed);
        assert_eq!((first.point, first.g), (Point::new(0, 0), 0));
        let last = events.last().unwrap();
        assert_eq!(last.kind, SearchEventKind::GoalReached);
        assert_eq!((last.point, last.g), (Point::new(3, 2), path.cost));
        assert!(events.iter().all(|e| e.f == e.g + e.h));

        // Every closed position is closed exactly once
        let mut closed = events
            .iter()
            .filter(|e| e.kind == SearchEventKind::Closed)
            .map(|e| (e.point.x, e.point.y))
            .collect::<Vec<_>>();
        let n_closed = closed.len();
        closed.sort();
        closed.dedup();
        assert_eq!(closed.len(), n_closed);
    }

    #[test]
    fn weighted_heuristic() {
        let solver = AstarSolver {
            heuristic_factor: 1.5,
        };
        assert_eq!(solver.heuristic(&Point::new(0, 0), &Point::new(3, 1)), 6);
        assert_eq!(
            AstarSolver::new().heuristic(&Point::new(4, 0), &Point::new(0, 3)),
            7
        );
    }

    fn random_costs(w: usize, h: usize, rng: &mut StdRng) -> CostGrid {
        let mut grid = CostGrid::new(w, h, 1);
        for point in grid.points().collect::<Vec<_>>() {
            grid.set_cost(point, rng.gen_range(1..=9)).unwrap();
        }
        grid
    }

    /// A position is only pushed again with a strictly lower `g`, and the entries it supersedes
    /// stay in the frontier until they are popped and skipped.
    #[test]
    fn repeated_pushes_improve_and_stale_entries_are_skipped() {
        let mut rng = StdRng::seed_from_u64(0);
        let solver = AstarSolver::new();
        let mut n_repeats = 0;
        let mut saw_stale = false;
        for _ in 0..50 {
            let grid = random_costs(12, 12, &mut rng);
            let (start, goal) = grid.corners();
            let mut search = solver.search(&grid, start, goal).unwrap();
            let mut pushed_g: FxHashMap<Point, Cost> = FxHashMap::default();
            let mut open: FxHashSet<Point> = FxHashSet::default();
            open.insert(start);
            let mut events = Vec::new();
            loop {
                let n_closed = search.closed_len();
                let status = search.step(&mut |e: &SearchEvent| events.push(*e));
                // One node per step, however many stale entries were popped before it
                assert_eq!(search.closed_len(), n_closed + 1);
                for event in events.drain(..) {
                    match event.kind {
                        SearchEventKind::Expanded => {
                            if let Some(previous) = pushed_g.insert(event.point, event.g) {
                                assert!(
                                    event.g < previous,
                                    "{} pushed again without improving",
                                    event.point
                                );
                                n_repeats += 1;
                            }
                            open.insert(event.point);
                        }
                        SearchEventKind::Closed => {
                            open.remove(&event.point);
                        }
                        SearchEventKind::GoalReached => {}
                    }
                }
                // Every open position has an entry, so any surplus is superseded
                assert!(search.frontier_len() >= open.len());
                saw_stale |= search.frontier_len() > open.len();
                if status.is_terminal() {
                    break;
                }
            }
            assert_eq!(search.status(), SearchStatus::Found);
            assert_eq!(
                search.path().map(|path| path.cost),
                DijkstraSolver.get_path_cost(&grid, start, goal).unwrap()
            );
        }
        assert!(n_repeats > 0);
        assert!(saw_stale);
    }
}
