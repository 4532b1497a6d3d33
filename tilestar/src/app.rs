use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use tilestar_core::Point;
use tilestar_paths::{SearchError, find_path};

use crate::args::{self, ArgsError, Command, Options};
use crate::config::{Config, ConfigError};
use crate::mapfile::{MapError, MapHeader};
use crate::render;

/// Why a run failed. The `Display` text is what the user sees.
#[derive(Debug)]
pub enum AppError {
    Usage { program: String },
    Args(ArgsError),
    Config(ConfigError),
    /// The map file is missing or its header is unusable.
    InvalidMap { path: PathBuf, source: MapError },
    NotInMap(Point),
    /// The header was fine but the terrain block was not.
    BadTerrain { path: PathBuf, source: MapError },
    Search(SearchError),
    Output(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage { program } => write!(f, "Usage: {program} {}", args::USAGE),
            Self::Args(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "bad config: {e}"),
            Self::InvalidMap { path, .. } => write!(f, "'{}' is not a valid map", path.display()),
            Self::NotInMap(p) => write!(f, "{p} is not a point in the map!"),
            Self::BadTerrain { path, .. } => write!(f, "Couldn't parse map '{}'", path.display()),
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::Output(e) => write!(f, "output error: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Args(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidMap { source, .. } | Self::BadTerrain { source, .. } => Some(source),
            Self::Search(e) => Some(e),
            Self::Output(e) => Some(e),
            Self::Usage { .. } | Self::NotInMap(_) => None,
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        Self::Output(e)
    }
}

/// Run the tool on a full argument list (program name first).
///
/// The path goes to `out` and the map to `err`. `err_is_tty` decides
/// colouring unless the command line forces it.
pub fn run<I, O, E>(args: I, out: &mut O, err: &mut E, err_is_tty: bool) -> Result<(), AppError>
where
    I: IntoIterator<Item = String>,
    O: Write,
    E: Write,
{
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "tilestar".to_string());

    let opts = match args::parse(args) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            writeln!(out, "Usage: {program} {}", args::USAGE)?;
            return Ok(());
        }
        Err(ArgsError::Usage) => return Err(AppError::Usage { program }),
        Err(e) => return Err(AppError::Args(e)),
    };

    let mut config = match &opts.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };
    config.apply(&opts)?;
    let costs = config.cost_table()?;
    log::debug!("search {:?}, costs {costs:?}", config.search);

    let terrain = load_terrain(&opts)?;

    match find_path(&terrain, &costs, &config.search, opts.start, opts.target)? {
        Some(path) => {
            log::info!(
                "path of {} steps, cost {}",
                path.steps(),
                path.cost()
            );
            render::write_path(out, &path)?;
            out.flush()?;
            if !opts.quiet {
                if opts.color.unwrap_or(err_is_tty) {
                    render::write_map_colored(err, &terrain, &costs, &path)?;
                } else {
                    render::write_map(err, &terrain, &path)?;
                }
            }
        }
        None => writeln!(out, "No path found")?,
    }
    Ok(())
}

/// Open the map, check both endpoints against its header, then read the
/// terrain.
fn load_terrain(opts: &Options) -> Result<tilestar_core::Terrain, AppError> {
    let invalid = |source: MapError| {
        log::debug!("{}: {source}", opts.map.display());
        AppError::InvalidMap {
            path: opts.map.clone(),
            source,
        }
    };

    let file = File::open(&opts.map).map_err(|e| invalid(MapError::Io(e)))?;
    let mut reader = BufReader::new(file);
    let header = MapHeader::read(&mut reader).map_err(invalid)?;

    let bounds = header.bounds();
    for p in [opts.start, opts.target] {
        if !bounds.contains(p) {
            return Err(AppError::NotInMap(p));
        }
    }

    let terrain = header.read_terrain(reader).map_err(|source| {
        log::debug!("{}: {source}", opts.map.display());
        AppError::BadTerrain {
            path: opts.map.clone(),
            source,
        }
    })?;

    if log::log_enabled!(log::Level::Debug) {
        let symbols: String = terrain
            .symbol_counts()
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(s, n)| format!(" '{}'x{n}", char::from(s as u8)))
            .collect();
        log::debug!(
            "map {} ({}x{}), symbols:{symbols}",
            opts.map.display(),
            terrain.width(),
            terrain.height()
        );
    }
    Ok(terrain)
}
