use grid_util::Point;
use thiserror::Error;

/// Errors raised while building, reading or tiling a [CostGrid](crate::cost_grid::CostGrid).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("{point} lies outside the {width}x{height} grid")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },
    #[error("invalid tiling template: {0}")]
    InvalidTemplate(String),
    #[error("grid text contains no rows")]
    EmptyGrid,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell {symbol:?} at row {row}, column {column}")]
    InvalidCell {
        symbol: char,
        row: usize,
        column: usize,
    },
}

/// Raised by [Frontier::pop_min](crate::frontier::Frontier::pop_min). The search engines use it
/// to tell a reached goal apart from an exhausted frontier, so it never leaves them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrontierError {
    #[error("frontier is empty")]
    Empty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown strategy {0:?}, expected \"dijkstra\" or \"astar\"")]
pub struct ParseStrategyError(pub String);
