//! # weighted_grid_pathfinding
//!
//! Shortest paths on 4-connected grids where every cell has a price for entering it. Two
//! interchangeable strategies are provided: a lean
//! [uniform-cost search](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) that only reports the
//! minimal cost ([DijkstraSolver]), and an
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search guided by the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) that also returns the path
//! and can be stepped through for visualisation ([AstarSolver]). Grids can be expanded
//! procedurally into larger grids of cost-incremented copies ([CostGrid::tile]).
//! [Connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) are pre-computed
//! so that [Pathfinder] can reject unreachable goals without flood-filling the grid.
pub mod cost_grid;
pub mod error;
pub mod event;
pub mod frontier;
pub mod node;
pub mod search;
pub mod solver;
pub mod tiling;

use core::fmt;
use std::str::FromStr;

pub use cost_grid::CostGrid;
pub use error::{FrontierError, GridError, ParseStrategyError};
pub use event::{SearchEvent, SearchEventKind, SearchObserver};
pub use grid_util::Point;
pub use solver::astar::{AstarSearch, AstarSolver, SearchStatus};
pub use solver::dijkstra::DijkstraSolver;
pub use solver::{GridPath, GridSolver};
pub use tiling::{increment_template, wrap_cost};

use log::info;

/// Entry costs and path totals.
pub type Cost = i32;

/// Entry costs lie in `1..=MAX_COST`; tiling wraps around past it.
pub const MAX_COST: Cost = 9;
/// Marks a barrier in the text form of a grid.
pub const BARRIER_SYMBOL: char = '#';
/// Inline capacity of neighbour lists, one slot per direction.
pub const N_SMALLVEC_SIZE: usize = 4;
/// Side length of the increment template used to expand a grid when none is given.
pub const DEFAULT_TILE_FACTOR: usize = 5;

/// Which search a [Pathfinder] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    UniformCost,
    Heuristic,
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" | "uniform-cost" => Ok(Strategy::UniformCost),
            "astar" | "a*" | "heuristic" => Ok(Strategy::Heuristic),
            _ => Err(ParseStrategyError(s.to_owned())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::UniformCost => write!(f, "dijkstra"),
            Strategy::Heuristic => write!(f, "astar"),
        }
    }
}

/// Owns a [CostGrid] together with both solvers. Before searching, it checks that start and goal
/// share a connected component and answers [None] straight away if they do not.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    pub grid: CostGrid,
    pub astar: AstarSolver,
    pub dijkstra: DijkstraSolver,
}

impl Pathfinder {
    pub fn new(grid: CostGrid) -> Pathfinder {
        Pathfinder {
            grid,
            astar: AstarSolver::new(),
            dijkstra: DijkstraSolver::new(),
        }
    }

    /// A pathfinder over the tiled expansion of this grid, with the same solver settings.
    pub fn tiled(&self, template: &[Vec<Cost>]) -> Result<Pathfinder, GridError> {
        Ok(Pathfinder {
            grid: self.grid.tile(template)?,
            astar: self.astar.clone(),
            dijkstra: self.dijkstra,
        })
    }

    /// Regenerates stale components and checks whether a search could succeed.
    fn reachable(&mut self, start: &Point, goal: &Point) -> Result<bool, GridError> {
        self.grid.check_bounds(*start)?;
        self.grid.check_bounds(*goal)?;
        self.grid.update();
        if self.grid.unreachable(start, goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(false);
        }
        info!("{} is reachable from {}, computing path", goal, start);
        Ok(true)
    }

    pub fn get_path_cost(
        &mut self,
        start: Point,
        goal: Point,
        strategy: Strategy,
    ) -> Result<Option<Cost>, GridError> {
        if !self.reachable(&start, &goal)? {
            return Ok(None);
        }
        match strategy {
            Strategy::UniformCost => self.dijkstra.get_path_cost(&self.grid, start, goal),
            Strategy::Heuristic => self.astar.get_path_cost(&self.grid, start, goal),
        }
    }

    pub fn get_path_single_goal(
        &mut self,
        start: Point,
        goal: Point,
    ) -> Result<Option<GridPath>, GridError> {
        if !self.reachable(&start, &goal)? {
            return Ok(None);
        }
        self.astar.get_path_single_goal(&self.grid, start, goal)
    }
}

impl fmt::Display for Pathfinder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        write!(f, "{}", self.grid)
    }
}
