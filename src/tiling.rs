//! Procedural expansion of a [CostGrid] into a larger grid made of cost-incremented copies.
use crate::cost_grid::{CostGrid, BARRIER};
use crate::error::GridError;
use crate::{Cost, MAX_COST};
use grid_util::Point;
use itertools::iproduct;
use log::debug;

/// Increments `cost` by `increment`, wrapping around within `1..=MAX_COST` instead of growing.
/// Negative increments wrap downwards, so the result is always a valid entry cost.
pub fn wrap_cost(cost: Cost, increment: Cost) -> Cost {
    ((cost - 1).rem_euclid(MAX_COST) + increment.rem_euclid(MAX_COST)) % MAX_COST + 1
}

/// The `n` by `n` template whose entry at `(row, column)` is `row + column`.
pub fn increment_template(n: usize) -> Vec<Vec<Cost>> {
    (0..n)
        .map(|r| (0..n).map(|c| (r + c) as Cost).collect())
        .collect()
}

/// Returns the `(rows, columns)` of a usable template.
fn template_shape(template: &[Vec<Cost>]) -> Result<(usize, usize), GridError> {
    let columns = template.first().map_or(0, Vec::len);
    if columns == 0 {
        return Err(GridError::InvalidTemplate("template is empty".to_owned()));
    }
    for (r, row) in template.iter().enumerate() {
        if row.len() != columns {
            return Err(GridError::InvalidTemplate(format!(
                "row {r} has {} entries, expected {columns}",
                row.len()
            )));
        }
        if let Some(c) = row.iter().position(|&increment| increment < 0) {
            return Err(GridError::InvalidTemplate(format!(
                "negative increment {} at row {r}, column {c}",
                row[c]
            )));
        }
    }
    Ok((template.len(), columns))
}

impl CostGrid {
    /// Builds a grid of `height * template rows` by `width * template columns` cells. The block
    /// at template position `(r, c)` is a copy of this grid with every cost incremented
    /// `template[r][c]` times using [wrap_cost]. Barriers stay barriers in every copy.
    pub fn tile(&self, template: &[Vec<Cost>]) -> Result<CostGrid, GridError> {
        let (t_rows, t_cols) = template_shape(template)?;
        let w = self.width();
        let h = self.height();
        let mut tiled = CostGrid::filled(w * t_cols, h * t_rows, 1);
        for (r, c) in iproduct!(0..t_rows, 0..t_cols) {
            let increment = template[r][c];
            let (dx, dy) = ((c * w) as i32, (r * h) as i32);
            for point in self.points() {
                let value = match self.entry(point) {
                    BARRIER => BARRIER,
                    cost => wrap_cost(cost, increment),
                };
                tiled.put(Point::new(point.x + dx, point.y + dy), value);
            }
        }
        tiled.generate_components();
        debug!(
            "Tiled {}x{} grid into {}x{}",
            w,
            h,
            tiled.width(),
            tiled.height()
        );
        Ok(tiled)
    }
}
