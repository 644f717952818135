use grid_util::Point;
use log::debug;

use crate::cost_grid::CostGrid;
use crate::error::GridError;
use crate::search::uniform_cost;
use crate::solver::{endpoints_passable, GridSolver};
use crate::Cost;

/// Uniform-cost search that only reports the minimal cost. It keeps no parent links, which keeps
/// memory low on large (tiled) grids.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver
    }

    /// Runs the search, handing every closed cell and its final cost to `on_close`.
    pub(crate) fn search_with_trace<F>(
        &self,
        grid: &CostGrid,
        start: Point,
        goal: Point,
        on_close: F,
    ) -> Result<Option<Cost>, GridError>
    where
        F: FnMut(&Point, Cost),
    {
        if !endpoints_passable(grid, &start, &goal)? {
            return Ok(None);
        }
        let result = uniform_cost(
            &start,
            |node| grid.neighbours_and_cost(node),
            |node| *node == goal,
            on_close,
        );
        match result {
            Some(cost) => debug!("Uniform-cost search reached {} at cost {}", goal, cost),
            None => debug!("{} is not reachable from {}", goal, start),
        }
        Ok(result)
    }
}

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Point, _: &Point) -> Cost {
        0
    }

    fn get_path_cost(
        &self,
        grid: &CostGrid,
        start: Point,
        goal: Point,
    ) -> Result<Option<Cost>, GridError> {
        self.search_with_trace(grid, start, goal, |_, _| {})
    }
}
