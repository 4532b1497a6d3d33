//! Command-line parsing.
//!
//! Plain `std::env::args()` matching, no parser crate.

use std::fmt;
use std::path::PathBuf;

use tilestar_core::{Cost, Point};
use tilestar_paths::{Heuristic, UnknownHeuristic};

pub const USAGE: &str = "\
[OPTIONS] <start-x> <start-y> <target-x> <target-y> <map-file>

Options:
  --diagonal              8-connected movement (default: 4-connected)
  --heuristic <KIND>      zero, manhattan, euclidean, octile or chebyshev
  --cost <SYM>=<N>        Map symbol SYM to step cost N (repeatable)
  --wall <SYM>            Mark symbol SYM impassable (repeatable)
  --config <FILE>         JSON file with search settings and symbol costs
  --color, --no-color     Force or disable coloured map output
  --quiet                 Do not print the map
  --help, -h              Show this help";

/// A cost override from `--cost` or `--wall`. `None` is impassable.
pub type CostOverride = (u8, Option<Cost>);

/// Everything a run needs from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub start: Point,
    pub target: Point,
    pub map: PathBuf,
    pub diagonal: bool,
    pub heuristic: Option<Heuristic>,
    pub costs: Vec<CostOverride>,
    pub config: Option<PathBuf>,
    /// `None` colours the map only when stderr is a terminal.
    pub color: Option<bool>,
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
}

/// Errors raised while parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// Too few or too many positional arguments.
    Usage,
    /// A coordinate that is not a non-negative integer.
    Coordinate(String),
    MissingValue(&'static str),
    BadValue { flag: &'static str, value: String },
    UnknownFlag(String),
    Heuristic(UnknownHeuristic),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "expected five arguments"),
            Self::Coordinate(arg) => write!(f, "'{arg}' is not a valid map coordinate"),
            Self::MissingValue(flag) => write!(f, "{flag} requires a value"),
            Self::BadValue { flag, value } => write!(f, "invalid value '{value}' for {flag}"),
            Self::UnknownFlag(flag) => write!(f, "unknown argument: {flag}"),
            Self::Heuristic(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Heuristic(e) => Some(e),
            _ => None,
        }
    }
}

/// Parse a non-negative integer, decimal or `0x` hexadecimal.
pub fn parse_uint(s: &str) -> Option<u64> {
    let s = s.trim_start();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u64::from_str_radix(hex, 16).ok()
        }
        Some(_) => None,
        None if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s.parse().ok(),
        None => None,
    }
}

/// Parse the arguments after the program name.
pub fn parse<I>(args: I) -> Result<Command, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut positional = Vec::with_capacity(5);
    let mut opts = Flags::default();

    while let Some(arg) = args.next() {
        let mut value = |flag: &'static str| args.next().ok_or(ArgsError::MissingValue(flag));
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--diagonal" => opts.diagonal = true,
            "--quiet" => opts.quiet = true,
            "--color" => opts.color = Some(true),
            "--no-color" => opts.color = Some(false),
            "--heuristic" => {
                let v = value("--heuristic")?;
                opts.heuristic = Some(v.parse().map_err(ArgsError::Heuristic)?);
            }
            "--cost" => {
                let v = value("--cost")?;
                let (symbol, cost) = cost_override(&v).ok_or_else(|| ArgsError::BadValue {
                    flag: "--cost",
                    value: v.clone(),
                })?;
                opts.costs.push((symbol, Some(cost)));
            }
            "--wall" => {
                let v = value("--wall")?;
                let symbol = single_symbol(&v).ok_or_else(|| ArgsError::BadValue {
                    flag: "--wall",
                    value: v.clone(),
                })?;
                opts.costs.push((symbol, None));
            }
            "--config" => opts.config = Some(PathBuf::from(value("--config")?)),
            // `-7` falls through so it is reported as a bad coordinate.
            flag if flag.len() > 1
                && flag.starts_with('-')
                && !flag.as_bytes()[1].is_ascii_digit() =>
            {
                return Err(ArgsError::UnknownFlag(arg));
            }
            _ => positional.push(arg),
        }
    }

    let [sx, sy, tx, ty, map]: [String; 5] =
        positional.try_into().map_err(|_| ArgsError::Usage)?;
    Ok(Command::Run(Options {
        start: Point::new(coordinate(&sx)?, coordinate(&sy)?),
        target: Point::new(coordinate(&tx)?, coordinate(&ty)?),
        map: PathBuf::from(map),
        diagonal: opts.diagonal,
        heuristic: opts.heuristic,
        costs: opts.costs,
        config: opts.config,
        color: opts.color,
        quiet: opts.quiet,
    }))
}

#[derive(Default)]
struct Flags {
    diagonal: bool,
    heuristic: Option<Heuristic>,
    costs: Vec<CostOverride>,
    config: Option<PathBuf>,
    color: Option<bool>,
    quiet: bool,
}

fn coordinate(arg: &str) -> Result<i32, ArgsError> {
    parse_uint(arg)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| ArgsError::Coordinate(arg.to_string()))
}

/// A single printable ASCII symbol.
pub(crate) fn single_symbol(s: &str) -> Option<u8> {
    match s.as_bytes() {
        &[b] if b.is_ascii_graphic() || b == b' ' => Some(b),
        _ => None,
    }
}

/// `SYM=N`, where SYM may itself be `=`.
fn cost_override(s: &str) -> Option<(u8, Cost)> {
    let (head, cost) = s.split_at_checked(1)?;
    let symbol = single_symbol(head)?;
    Some((symbol, parse_uint(cost.strip_prefix('=')?)?))
}
