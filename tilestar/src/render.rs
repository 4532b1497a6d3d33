//! Path and map printing.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use tilestar_core::{CostTable, Point, Terrain};
use tilestar_paths::Path;

/// Symbol marking path cells in the printed map.
pub const PATH_MARK: u8 = b'x';

/// Write the path one `(x,y)` per line, start first.
pub fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    for p in path.points() {
        writeln!(out, "{p}")?;
    }
    Ok(())
}

/// The terrain symbols with every path cell replaced by [`PATH_MARK`].
pub fn marked_cells(terrain: &Terrain, path: &Path) -> Vec<u8> {
    let mut cells = terrain.cells().to_vec();
    for &p in path.points() {
        if let Some(i) = terrain.index(p) {
            cells[i] = PATH_MARK;
        }
    }
    cells
}

/// Write the map row by row with the path marked.
pub fn write_map<W: Write>(out: &mut W, terrain: &Terrain, path: &Path) -> io::Result<()> {
    for row in marked_cells(terrain, path).chunks(terrain.width()) {
        out.write_all(row)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tint {
    Plain,
    Wall,
    Path,
    Endpoint,
}

impl Tint {
    fn color(self) -> Option<Color> {
        match self {
            Tint::Plain => None,
            Tint::Wall => Some(Color::DarkGrey),
            Tint::Path => Some(Color::Yellow),
            Tint::Endpoint => Some(Color::Green),
        }
    }
}

/// Like [`write_map`], but coloured with terminal escapes: walls dimmed,
/// path cells highlighted and the endpoints in bold.
pub fn write_map_colored<W: Write>(
    out: &mut W,
    terrain: &Terrain,
    costs: &CostTable,
    path: &Path,
) -> io::Result<()> {
    let cells = marked_cells(terrain, path);
    let endpoints = [path.start(), path.target()];

    for (y, row) in cells.chunks(terrain.width()).enumerate() {
        let mut current = Tint::Plain;
        for (x, &symbol) in row.iter().enumerate() {
            let p = Point::new(x as i32, y as i32);
            let tint = if endpoints.contains(&Some(p)) {
                Tint::Endpoint
            } else if symbol == PATH_MARK && path.contains(p) {
                Tint::Path
            } else if !costs.is_passable(symbol) {
                Tint::Wall
            } else {
                Tint::Plain
            };

            if tint != current {
                queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
                if let Some(color) = tint.color() {
                    queue!(out, SetForegroundColor(color))?;
                }
                if tint == Tint::Endpoint {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                current = tint;
            }
            queue!(out, Print(char::from(symbol)))?;
        }
        if current != Tint::Plain {
            queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        queue!(out, Print('\n'))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilestar_paths::{SearchConfig, find_path};

    fn scenario() -> (Terrain, Path) {
        let t = Terrain::from_rows("..@\n...\n").unwrap();
        let path = find_path(
            &t,
            &CostTable::standard(),
            &SearchConfig::default(),
            Point::new(0, 0),
            Point::new(2, 1),
        )
        .unwrap()
        .unwrap();
        (t, path)
    }

    #[test]
    fn path_lines() {
        let (_, path) = scenario();
        let mut out = Vec::new();
        write_path(&mut out, &path).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "(0,0)");
        assert_eq!(lines[3], "(2,1)");
    }

    #[test]
    fn map_marks_every_path_cell() {
        let (t, path) = scenario();
        let mut out = Vec::new();
        write_map(&mut out, &t, &path).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(text.bytes().filter(|&b| b == PATH_MARK).count(), 4);
        assert!(text.starts_with('x'));
        assert!(text.ends_with("xx\n"));
        assert_eq!(text.as_bytes()[2], b'@');
    }

    #[test]
    fn colored_map_keeps_the_symbols() {
        let (t, path) = scenario();
        let mut out = Vec::new();
        write_map_colored(&mut out, &t, &CostTable::standard(), &path).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{1b}'));
        let stripped: String = text
            .split('\u{1b}')
            .map(|chunk| chunk.split_once('m').map_or(chunk, |(_, rest)| rest))
            .collect();
        let mut plain = Vec::new();
        write_map(&mut plain, &t, &path).unwrap();
        assert_eq!(stripped, String::from_utf8(plain).unwrap());
    }
}
