//! JSON configuration file.
//!
//! ```json
//! {
//!   "search": { "topology": "eight", "cost_model": "scaled", "straight": 10, "diagonal": 14 },
//!   "costs": { "~": 3, "#": null }
//! }
//! ```
//!
//! Every field is optional. `costs` maps single-character symbols on top of
//! the standard legend (`.` costs 1, everything else is impassable); `null`
//! makes a symbol impassable.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tilestar_core::{Cost, CostTable};
use tilestar_paths::{SearchConfig, Topology};

use crate::args::{Options, single_symbol};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub costs: BTreeMap<String, Option<Cost>>,
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    /// A `costs` key that is not a single printable character.
    BadSymbol(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(msg) => write!(f, "IO error: {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::BadSymbol(key) => write!(f, "'{key}' is not a map symbol"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// The standard legend with `costs` applied on top.
    pub fn cost_table(&self) -> Result<CostTable, ConfigError> {
        let mut table = CostTable::standard();
        for (key, cost) in &self.costs {
            let symbol = single_symbol(key).ok_or_else(|| ConfigError::BadSymbol(key.clone()))?;
            match *cost {
                Some(c) => table.set(symbol, c),
                None => table.block(symbol),
            }
        }
        Ok(table)
    }

    /// Layer command-line flags over the file settings.
    ///
    /// A heuristic named on the command line only picks the family; its
    /// weights are fitted to the final cost table and search settings.
    pub fn apply(&mut self, opts: &Options) -> Result<(), ConfigError> {
        if opts.diagonal {
            self.search.topology = Topology::Eight;
        }
        for &(symbol, cost) in &opts.costs {
            self.costs.insert(char::from(symbol).to_string(), cost);
        }
        if let Some(h) = opts.heuristic {
            let table = self.cost_table()?;
            self.search.heuristic = Some(h.weighted_like(&self.search, &table));
        }
        Ok(())
    }
}
