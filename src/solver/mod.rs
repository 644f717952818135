use crate::cost_grid::CostGrid;
use crate::error::GridError;
use crate::Cost;
use grid_util::Point;
use log::info;

pub mod astar;
pub mod dijkstra;

/// A path found by a [GridSolver], from start to goal inclusive, with its total entry cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPath {
    pub cost: Cost,
    pub points: Vec<Point>,
}

impl GridPath {
    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }
}

pub trait GridSolver {
    fn heuristic(&self, p1: &Point, p2: &Point) -> Cost;

    /// Minimal total entry cost from start to goal, [None] if no path exists. Fails if either
    /// endpoint lies outside the grid.
    fn get_path_cost(
        &self,
        grid: &CostGrid,
        start: Point,
        goal: Point,
    ) -> Result<Option<Cost>, GridError>;

    /// Sums the entry cost of every cell of `path` after the first. [None] if the path crosses a
    /// barrier.
    fn path_cost(&self, grid: &CostGrid, path: &[Point]) -> Result<Option<Cost>, GridError> {
        let mut total = 0;
        for point in path.iter().skip(1) {
            match grid.cost(*point)? {
                Some(cost) => total += cost,
                None => return Ok(None),
            }
        }
        Ok(Some(total))
    }
}

/// Checks that both endpoints are inside the grid and reports whether a search can start at all.
pub(crate) fn endpoints_passable(
    grid: &CostGrid,
    start: &Point,
    goal: &Point,
) -> Result<bool, GridError> {
    grid.check_bounds(*start)?;
    grid.check_bounds(*goal)?;
    if grid.is_barrier(*start) || grid.is_barrier(*goal) {
        info!("{} or {} is a barrier, no path exists", start, goal);
        return Ok(false);
    }
    Ok(true)
}
