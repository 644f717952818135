#![warn(rust_2018_idioms)]
#![warn(unused_qualifications)]

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use itertools::Itertools;
use weighted_grid_pathfinding::{increment_template, CostGrid, GridPath, Pathfinder, Strategy};

use crate::options::Options;

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let text = fs::read_to_string(options.input())
        .with_context(|| format!("could not read grid from \"{}\"", options.input().display()))?;
    let grid = text
        .parse::<CostGrid>()
        .with_context(|| format!("malformed grid in \"{}\"", options.input().display()))?;
    let mut pathfinder = Pathfinder::new(grid);
    if options.print_grid() {
        println!("{}", pathfinder);
    }

    report(&mut pathfinder, options.strategy(), "the grid")?;
    if options.print_path() {
        print_path(&mut pathfinder)?;
    }

    let tile = options.tile();
    let mut tiled = pathfinder.tiled(&increment_template(tile))?;
    report(
        &mut tiled,
        options.strategy(),
        &format!("the {tile}x{tile} expanded grid"),
    )?;
    Ok(())
}

/// Prints the lowest total risk between the top-left and bottom-right corners.
fn report(pathfinder: &mut Pathfinder, strategy: Strategy, label: &str) -> Result<()> {
    let (start, goal) = pathfinder.grid.corners();
    let timer = Instant::now();
    let cost = pathfinder.get_path_cost(start, goal, strategy)?;
    let elapsed = timer.elapsed().as_secs_f64();
    match cost {
        Some(cost) => println!(
            "Lowest total risk across {label}: {cost}. Time elapsed: {elapsed:.3} seconds ({strategy})."
        ),
        None => println!("No path across {label}. Time elapsed: {elapsed:.3} seconds ({strategy})."),
    }
    Ok(())
}

fn print_path(pathfinder: &mut Pathfinder) -> Result<()> {
    let (start, goal) = pathfinder.grid.corners();
    let path = pathfinder.get_path_single_goal(start, goal)?;
    println!("{}", describe_path(path.as_ref(), "the grid"));
    Ok(())
}

fn describe_path(path: Option<&GridPath>, label: &str) -> String {
    match path {
        Some(path) => format!(
            "Path ({} cells): {}",
            path.points.len(),
            path.points
                .iter()
                .map(|p| format!("({}, {})", p.y, p.x))
                .join(" -> ")
        ),
        None => format!("No path across {label}."),
    }
}
