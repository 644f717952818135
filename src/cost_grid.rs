use crate::error::GridError;
use crate::{Cost, BARRIER_SYMBOL, MAX_COST, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::{Point, SimpleValueGrid, ValueGrid};
use itertools::iproduct;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::str::FromStr;

/// Stored in place of an entry cost for impassable cells.
pub(crate) const BARRIER: Cost = -1;

/// Right, down, left, up.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// [CostGrid] stores the price of entering every cell of a rectangular lattice, or a barrier marker
/// for cells that cannot be entered. Like the connected-component bookkeeping of a pathing grid, it
/// also maintains a [UnionFind] over passable cells so that unreachable goals can be rejected without
/// flood-filling the grid.
///
/// Points use `x` for the column and `y` for the row.
#[derive(Clone, Debug)]
pub struct CostGrid {
    costs: SimpleValueGrid<Cost>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl CostGrid {
    /// Creates a grid where every cell costs `cost` to enter.
    pub fn new(width: usize, height: usize, cost: Cost) -> CostGrid {
        assert_valid_cost(cost);
        let mut grid = CostGrid::filled(width, height, cost);
        grid.generate_components();
        grid
    }

    /// Raw constructor, leaves components to be generated by the caller.
    pub(crate) fn filled(width: usize, height: usize, value: Cost) -> CostGrid {
        CostGrid {
            costs: SimpleValueGrid::new(width, height, value),
            components: UnionFind::new(width * height),
            components_dirty: true,
        }
    }

    pub fn width(&self) -> usize {
        self.costs.width()
    }

    pub fn height(&self) -> usize {
        self.costs.height()
    }

    /// The top-left and bottom-right cells.
    pub fn corners(&self) -> (Point, Point) {
        (
            Point::new(0, 0),
            Point::new(self.width() as i32 - 1, self.height() as i32 - 1),
        )
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }

    pub fn check_bounds(&self, point: Point) -> Result<(), GridError> {
        if self.in_bounds(point) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                point,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// The cost of entering `point`, or [None] if it is a barrier.
    pub fn cost(&self, point: Point) -> Result<Option<Cost>, GridError> {
        self.check_bounds(point)?;
        Ok(match self.entry(point) {
            BARRIER => None,
            cost => Some(cost),
        })
    }

    /// Out-of-bounds points are not barriers, they are simply not part of the grid.
    pub fn is_barrier(&self, point: Point) -> bool {
        self.in_bounds(point) && self.entry(point) == BARRIER
    }

    pub fn is_passable(&self, point: Point) -> bool {
        self.in_bounds(point) && self.entry(point) != BARRIER
    }

    /// Unchecked cell value, [BARRIER] included.
    pub(crate) fn entry(&self, point: Point) -> Cost {
        self.costs.get(point.x, point.y)
    }

    pub(crate) fn put(&mut self, point: Point, value: Cost) {
        self.costs.set(point.x, point.y, value);
    }

    fn ix(&self, point: Point) -> usize {
        point.y as usize * self.width() + point.x as usize
    }

    /// The in-bounds cells sharing an edge with `point`, ordered right, down, left, up. Barrier
    /// cells are left out if `skip_barriers` is set.
    pub fn neighbours(&self, point: Point, skip_barriers: bool) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| {
                if skip_barriers {
                    self.is_passable(*p)
                } else {
                    self.in_bounds(*p)
                }
            })
            .collect()
    }

    /// Passable neighbours paired with the cost of entering them.
    pub fn neighbours_and_cost(&self, point: &Point) -> SmallVec<[(Point, Cost); N_SMALLVEC_SIZE]> {
        self.neighbours(*point, true)
            .into_iter()
            .map(|p| (p, self.entry(p)))
            .collect()
    }

    /// All cells in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        iproduct!(0..self.height() as i32, 0..self.width() as i32).map(|(y, x)| Point::new(x, y))
    }

    pub fn barriers(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(move |p| self.entry(*p) == BARRIER)
    }

    /// Sets the entry cost of a cell, opening it if it was a barrier. Costs must lie in
    /// `1..=MAX_COST`.
    pub fn set_cost(&mut self, point: Point, cost: Cost) -> Result<(), GridError> {
        assert_valid_cost(cost);
        self.set_cell(point, cost)
    }

    pub fn set_barrier(&mut self, point: Point) -> Result<(), GridError> {
        self.set_cell(point, BARRIER)
    }

    /// Joins newly connected components and flags the components as dirty if they are
    /// (potentially) broken apart into multiple.
    fn set_cell(&mut self, point: Point, value: Cost) -> Result<(), GridError> {
        self.check_bounds(point)?;
        let was_barrier = self.entry(point) == BARRIER;
        if value == BARRIER {
            if !was_barrier {
                self.components_dirty = true;
            }
        } else if was_barrier {
            let p_ix = self.ix(point);
            for n in self.neighbours(point, true) {
                let n_ix = self.ix(n);
                self.components.union(p_ix, n_ix);
            }
        }
        self.put(point, value);
        Ok(())
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Generates a new [UnionFind] structure and links up passable grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                if !self.is_passable(point) {
                    continue;
                }
                let parent_ix = self.ix(point);
                // Linking right and down covers every edge once
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.is_passable(n) {
                        let n_ix = self.ix(n);
                        self.components.union(parent_ix, n_ix);
                    }
                }
            }
        }
    }

    /// Checks if start and goal are passable and on the same component. While the components are
    /// dirty the answer reflects the connectivity as of the last [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.is_passable(*start)
            && self.is_passable(*goal)
            && self.components.equiv(self.ix(*start), self.ix(*goal))
    }

    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }
}

fn assert_valid_cost(cost: Cost) {
    assert!(
        (1..=MAX_COST).contains(&cost),
        "entry cost {cost} outside 1..={MAX_COST}"
    );
}

impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| match self.entry(Point::new(x, y)) {
                    BARRIER => BARRIER_SYMBOL,
                    cost => char::from_digit(cost as u32, 10).unwrap_or('?'),
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl FromStr for CostGrid {
    type Err = GridError;

    /// Parses one row per line: digits `1`-`9` are entry costs and [BARRIER_SYMBOL] marks a barrier.
    /// Blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        let width = rows.first().ok_or(GridError::EmptyGrid)?.chars().count();
        let mut grid = CostGrid::filled(width, rows.len(), 1);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (column, symbol) in line.chars().enumerate() {
                let value = match symbol {
                    BARRIER_SYMBOL => BARRIER,
                    '1'..='9' => symbol as Cost - '0' as Cost,
                    _ => {
                        return Err(GridError::InvalidCell {
                            symbol,
                            row,
                            column,
                        })
                    }
                };
                grid.put(Point::new(column as i32, row as i32), value);
            }
        }
        grid.generate_components();
        Ok(grid)
    }
}
