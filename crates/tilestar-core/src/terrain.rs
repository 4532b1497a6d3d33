//! The [`Terrain`] type, an immutable width×height buffer of terrain symbols.
//!
//! Each cell holds one byte-sized symbol (`b'.'`, `b'@'`, ...). Cells are
//! stored row-major, and every conversion between a [`Point`] and a flat
//! index goes through [`Terrain::index`] and [`Terrain::point`].

use std::fmt;

use crate::geom::{Point, Range};

/// Errors raised when building a [`Terrain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    /// Width or height is zero.
    ZeroDimension { width: usize, height: usize },
    /// The symbol buffer does not hold exactly `width * height` cells.
    SizeMismatch { expected: usize, actual: usize },
    /// The dimensions do not fit the `i32` coordinate space.
    TooLarge { width: usize, height: usize },
    /// A text row differs in length from the first row.
    RaggedRow { row: usize, expected: usize, actual: usize },
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { width, height } => {
                write!(f, "terrain must be non-empty, got {width}x{height}")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "terrain expects {expected} cells, got {actual}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "terrain of {width}x{height} cells is too large")
            }
            Self::RaggedRow {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has {actual} symbols, expected {expected}"),
        }
    }
}

impl std::error::Error for TerrainError {}

/// An immutable grid of terrain symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terrain {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Terrain {
    /// Wrap a row-major symbol buffer of exactly `width * height` cells.
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::ZeroDimension { width, height });
        }
        let expected = width
            .checked_mul(height)
            .filter(|_| i32::try_from(width).is_ok() && i32::try_from(height).is_ok())
            .ok_or(TerrainError::TooLarge { width, height })?;
        if cells.len() != expected {
            return Err(TerrainError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// A terrain where every cell holds `symbol`.
    pub fn filled(width: usize, height: usize, symbol: u8) -> Result<Self, TerrainError> {
        Self::new(width, height, vec![symbol; width.saturating_mul(height)])
    }

    /// Build a terrain from text rows of equal length.
    ///
    /// Leading and trailing blank lines are ignored; each remaining line is
    /// one row.
    pub fn from_rows(text: &str) -> Result<Self, TerrainError> {
        let rows: Vec<&str> = text.trim_matches('\n').lines().collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(TerrainError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            cells.extend_from_slice(row.as_bytes());
        }
        Self::new(width, height, cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a terrain has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The grid rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.width as i32, self.height as i32)
    }

    /// Whether `p` lies inside the terrain.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.bounds().index(p)
    }

    /// Convert a flat index back to a `Point`.
    ///
    /// `idx` must be below [`len`](Self::len).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        debug_assert!(idx < self.cells.len());
        self.bounds().point(idx)
    }

    /// Symbol at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<u8> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Symbol at flat index `idx`.
    #[inline]
    pub fn symbol(&self, idx: usize) -> u8 {
        self.cells[idx]
    }

    /// The raw row-major symbol buffer.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Row `y` of symbols, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        let y = i32::try_from(y).ok()?;
        let start = self.index(Point::new(0, y))?;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate over the rows from top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, u8> {
        self.cells.chunks(self.width)
    }

    /// How many cells hold each of the 256 symbols.
    pub fn symbol_counts(&self) -> [u64; 256] {
        let mut counts = [0u64; 256];
        for &c in &self.cells {
            counts[c as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimension() {
        assert_eq!(
            Terrain::new(0, 3, vec![]),
            Err(TerrainError::ZeroDimension {
                width: 0,
                height: 3
            })
        );
        assert!(Terrain::new(3, 0, vec![]).is_err());
    }

    #[test]
    fn new_rejects_size_mismatch() {
        assert_eq!(
            Terrain::new(2, 2, vec![b'.'; 3]),
            Err(TerrainError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn index_is_row_major_on_non_square_grid() {
        // 5 wide, 3 tall: a swapped width/height would put (4,1) at 7.
        let t = Terrain::filled(5, 3, b'.').unwrap();
        assert_eq!(t.index(Point::new(4, 1)), Some(9));
        assert_eq!(t.index(Point::new(0, 2)), Some(10));
        assert_eq!(t.index(Point::new(5, 0)), None);
        assert_eq!(t.index(Point::new(0, 3)), None);
        assert_eq!(t.index(Point::new(-1, 0)), None);
        for i in 0..t.len() {
            assert_eq!(t.index(t.point(i)), Some(i));
        }
    }

    #[test]
    fn from_rows_reads_symbols() {
        let t = Terrain::from_rows(
            "
..@
.@.
",
        )
        .unwrap();
        assert_eq!(t.width(), 3);
        assert_eq!(t.height(), 2);
        assert_eq!(t.at(Point::new(2, 0)), Some(b'@'));
        assert_eq!(t.at(Point::new(1, 1)), Some(b'@'));
        assert_eq!(t.row(1), Some(&b".@."[..]));
        assert_eq!(t.row(2), None);
        assert_eq!(t.rows().count(), 2);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        assert!(matches!(
            Terrain::from_rows("...\n..\n"),
            Err(TerrainError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn symbol_counts_histogram() {
        let t = Terrain::from_rows("..@\n@@.").unwrap();
        let counts = t.symbol_counts();
        assert_eq!(counts[b'.' as usize], 3);
        assert_eq!(counts[b'@' as usize], 3);
        assert_eq!(counts[b'#' as usize], 0);
    }
}
