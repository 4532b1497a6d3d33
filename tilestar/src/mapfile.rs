//! Text map files.
//!
//! A map file starts with a short header naming its dimensions:
//!
//! ```text
//! type octile
//! height 3
//! width 5
//! map
//! ..@..
//! ..@..
//! .....
//! ```
//!
//! The header is at most four lines long and ends early at a line reading
//! `map`. Each header line is cut at its first non-printable byte; lines
//! other than `width N` and `height N` are ignored. Numbers are decimal or
//! `0x` hexadecimal.
//!
//! The terrain block that follows holds `width * height` printable ASCII
//! symbols in row-major order. Any other byte (newlines, tabs, carriage
//! returns) is skipped, so rows may be wrapped however the file likes.
//! Symbols past the last cell are ignored.

use std::fmt;
use std::io::{self, BufRead, Read};

use tilestar_core::{Range, Terrain, TerrainError};

use crate::args::parse_uint;

const MAX_HEADER_LINES: usize = 4;

/// Errors raised while reading a map file.
#[derive(Debug)]
pub enum MapError {
    Io(io::Error),
    /// The header never named this dimension.
    MissingDimension(&'static str),
    /// A `width` or `height` line whose value is not a number.
    BadDimension { line: String },
    /// The terrain block ended after `actual` of `expected` symbols.
    Truncated { expected: usize, actual: usize },
    Terrain(TerrainError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "read error: {e}"),
            Self::MissingDimension(name) => write!(f, "header has no '{name}' line"),
            Self::BadDimension { line } => write!(f, "bad dimension line '{line}'"),
            Self::Truncated { expected, actual } => {
                write!(f, "terrain ends after {actual} of {expected} symbols")
            }
            Self::Terrain(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Terrain(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TerrainError> for MapError {
    fn from(e: TerrainError) -> Self {
        Self::Terrain(e)
    }
}

/// Dimensions read from a map header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    pub width: usize,
    pub height: usize,
}

impl MapHeader {
    /// Read the header, leaving `reader` at the start of the terrain block.
    pub fn read<R: BufRead>(reader: &mut R) -> Result<Self, MapError> {
        let mut width = None;
        let mut height = None;
        let mut buf = Vec::new();

        for _ in 0..MAX_HEADER_LINES {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let end = buf.iter().position(|&b| !is_symbol(b)).unwrap_or(buf.len());
            // Only printable ASCII is left.
            let line = String::from_utf8_lossy(&buf[..end]);

            if line == "map" {
                break;
            } else if let Some(value) = line.strip_prefix("width ") {
                width = Some(dimension(value, &line)?);
            } else if let Some(value) = line.strip_prefix("height ") {
                height = Some(dimension(value, &line)?);
            } else {
                log::debug!("ignoring header line '{line}'");
            }
        }

        let header = Self {
            width: width.ok_or(MapError::MissingDimension("width"))?,
            height: height.ok_or(MapError::MissingDimension("height"))?,
        };
        if header.width == 0 || header.height == 0 {
            return Err(TerrainError::ZeroDimension {
                width: header.width,
                height: header.height,
            }
            .into());
        }
        if i32::try_from(header.width).is_err() || i32::try_from(header.height).is_err() {
            return Err(TerrainError::TooLarge {
                width: header.width,
                height: header.height,
            }
            .into());
        }
        Ok(header)
    }

    /// The grid rectangle the header describes.
    pub fn bounds(&self) -> Range {
        Range::with_size(self.width as i32, self.height as i32)
    }

    /// Read the terrain block that follows the header.
    pub fn read_terrain<R: Read>(&self, reader: R) -> Result<Terrain, MapError> {
        let expected = self
            .width
            .checked_mul(self.height)
            .ok_or(TerrainError::TooLarge {
                width: self.width,
                height: self.height,
            })?;

        let mut cells = Vec::new();
        for byte in reader.bytes() {
            if cells.len() == expected {
                break;
            }
            let b = byte?;
            if is_symbol(b) {
                cells.push(b);
            }
        }
        if cells.len() < expected {
            return Err(MapError::Truncated {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Terrain::new(self.width, self.height, cells)?)
    }
}

/// Read a whole map file: header, then terrain.
pub fn read_map<R: BufRead>(mut reader: R) -> Result<Terrain, MapError> {
    let header = MapHeader::read(&mut reader)?;
    header.read_terrain(reader)
}

#[inline]
fn is_symbol(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

fn dimension(value: &str, line: &str) -> Result<usize, MapError> {
    parse_uint(value)
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| MapError::BadDimension {
            line: line.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilestar_core::Point;

    fn read(text: &str) -> Result<Terrain, MapError> {
        read_map(text.as_bytes())
    }

    #[test]
    fn reads_a_four_line_header() {
        let t = read("type octile\nheight 2\nwidth 3\nmap\n..@\n.@.\n").unwrap();
        assert_eq!((t.width(), t.height()), (3, 2));
        assert_eq!(t.row(0), Some(&b"..@"[..]));
        assert_eq!(t.at(Point::new(1, 1)), Some(b'@'));
    }

    #[test]
    fn short_header_ends_at_map_line() {
        let t = read("width 2\nheight 2\nmap\n.@\n@.\n").unwrap();
        assert_eq!(t.cells(), b".@@.");
    }

    #[test]
    fn dimensions_accept_hex() {
        let t = read("width 0x3\nheight 1\nmap\nabc").unwrap();
        assert_eq!(t.width(), 3);
    }

    #[test]
    fn header_lines_are_cut_at_control_bytes() {
        let t = read("width 2\r\nheight 1\t# one row\r\nmap\r\n..\r\n").unwrap();
        assert_eq!((t.width(), t.height()), (2, 1));
    }

    #[test]
    fn rows_may_wrap_anywhere() {
        let t = read("width 3\nheight 2\nmap\n.\n.@\n\t.@.\nignored trailing text").unwrap();
        assert_eq!(t.cells(), b"..@.@.");
    }

    #[test]
    fn missing_dimension() {
        assert!(matches!(
            read("width 3\nmap\n..."),
            Err(MapError::MissingDimension("height"))
        ));
        assert!(matches!(
            read(""),
            Err(MapError::MissingDimension("width"))
        ));
    }

    #[test]
    fn bad_dimension() {
        let err = read("width 3x\nheight 1\nmap\n...").unwrap_err();
        assert!(matches!(err, MapError::BadDimension { ref line } if line == "width 3x"));
        assert!(read("width -3\nheight 1\nmap\n...").is_err());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            read("width 0\nheight 4\nmap\n"),
            Err(MapError::Terrain(TerrainError::ZeroDimension { .. }))
        ));
    }

    #[test]
    fn truncated_terrain() {
        let err = read("width 3\nheight 3\nmap\n...\n...\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::Truncated {
                expected: 9,
                actual: 6
            }
        ));
    }

    #[test]
    fn header_leaves_reader_at_terrain() {
        let mut input = "height 1\nwidth 4\nmap\n.@.@".as_bytes();
        let header = MapHeader::read(&mut input).unwrap();
        assert_eq!(header, MapHeader { width: 4, height: 1 });
        assert_eq!(header.bounds(), Range::with_size(4, 1));
        let t = header.read_terrain(input).unwrap();
        assert_eq!(t.symbol_counts()[b'@' as usize], 2);
    }
}
