use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use weighted_grid_pathfinding::{Strategy, DEFAULT_TILE_FACTOR};

#[derive(Clone)]
pub(crate) struct Options {
    input: PathBuf,
    tile: usize,
    strategy: Strategy,
    print_path: bool,
    print_grid: bool,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let tile = match matches.value_of("tile") {
            Some(s) => s
                .parse::<usize>()
                .with_context(|| format!("invalid tile factor {:?}", s))?,
            None => DEFAULT_TILE_FACTOR,
        };
        if tile == 0 {
            return Err(anyhow!("tile factor must be at least 1"));
        }
        let strategy = match matches.value_of("solver") {
            Some(s) => s.parse::<Strategy>()?,
            None => Strategy::default(),
        };
        Ok(Self {
            input: matches
                .value_of("input")
                .ok_or_else(|| anyhow!("no input grid given"))?
                .into(),
            tile,
            strategy,
            print_path: matches.is_present("path"),
            print_grid: matches.is_present("print"),
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn tile(&self) -> usize {
        self.tile
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn print_path(&self) -> bool {
        self.print_path
    }

    pub fn print_grid(&self) -> bool {
        self.print_grid
    }
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg};

    App::new("gridpath")
        .about("Find the lowest total risk path across a weighted grid")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .required(true)
                .help("grid of digits 1-9, one row per line, '#' for barriers"),
        )
        .arg(
            Arg::with_name("tile")
                .short("t")
                .long("tile")
                .takes_value(true)
                .value_name("N")
                .help("expand the grid with an N by N increment template (default 5)"),
        )
        .arg(
            Arg::with_name("solver")
                .short("s")
                .long("solver")
                .takes_value(true)
                .possible_values(&["dijkstra", "astar"])
                .help("search strategy used for the costs"),
        )
        .arg(
            Arg::with_name("path")
                .short("p")
                .long("path")
                .help("print the path found by A* across the base grid"),
        )
        .arg(
            Arg::with_name("print")
                .long("print")
                .help("print the base grid"),
        )
}
