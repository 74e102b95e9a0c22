//! Shape and catalog types shared by the extractor and the emitter.

use std::fmt::Display;
use std::ops::Index;

use serde::Serialize;

/// A single occupied cell, relative to the top left corner of the shape's source block.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True if the two cells share an edge.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Bounding size of a shape. Never smaller than 1x1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

impl Size {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

/// Which flavour of shape table is being produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Plain cell lists.
    Tetro,
    /// Cell lists plus the column of the first mark, used by the placement search to anchor
    /// shapes whose top row doesn't start at column 0.
    #[default]
    Tetra,
}

impl Variant {
    #[inline]
    pub fn tracks_column_shift(self) -> bool {
        matches!(self, Variant::Tetra)
    }
}

/// One tetromino orientation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Shape {
    /// Cells in row-major scan order.
    cells: Vec<Pos>,
    size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_shift: Option<usize>,
}

impl Shape {
    pub(crate) fn new(cells: Vec<Pos>, column_shift: Option<usize>) -> Self {
        let size = cells.iter().fold(Size::new(1, 1), |size, pos| {
            Size::new(size.rows.max(pos.row + 1), size.cols.max(pos.col + 1))
        });

        Self {
            cells,
            size,
            column_shift,
        }
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pos> {
        self.cells.iter()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn column_shift(&self) -> Option<usize> {
        self.column_shift
    }
}

pub(crate) fn is_connected(cells: &[Pos]) -> bool {
    let first = match cells.first() {
        Some(first) => *first,
        None => return true,
    };

    let mut reached = vec![first];
    let mut frontier = vec![first];
    while let Some(pos) = frontier.pop() {
        for next in cells.iter().filter(|c| c.is_adjacent(&pos)) {
            if !reached.contains(next) {
                reached.push(*next);
                frontier.push(*next);
            }
        }
    }

    cells.iter().all(|c| reached.contains(c))
}

/// Ordered collection of shapes. Consumers address shapes by position, so the order of the
/// source text is preserved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Catalog {
    variant: Variant,
    shapes: Vec<Shape>,
}

impl Catalog {
    pub(crate) fn new(variant: Variant, shapes: Vec<Shape>) -> Self {
        Self { variant, shapes }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }
}

impl Index<usize> for Catalog {
    type Output = Shape;

    fn index(&self, idx: usize) -> &Shape {
        &self.shapes[idx]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[(usize, usize)]) -> Vec<Pos> {
        raw.iter().copied().map(Pos::from).collect()
    }

    #[test]
    fn pos_displays_as_tuple() {
        assert_eq!(Pos::new(2, 13).to_string(), "(2, 13)");
    }

    #[test]
    fn size_covers_all_cells() {
        let shape = Shape::new(cells(&[(0, 1), (1, 1), (2, 0), (2, 1)]), Some(1));
        assert_eq!(shape.size(), Size::new(3, 2));

        let shape = Shape::new(cells(&[(0, 0), (0, 1), (0, 2), (0, 3)]), None);
        assert_eq!(shape.size(), Size::new(1, 4));
    }

    #[test]
    fn connectivity() {
        assert!(is_connected(&cells(&[(0, 1), (0, 2), (1, 0), (1, 1)])));
        assert!(is_connected(&cells(&[(0, 0), (1, 0), (1, 1), (2, 1)])));
        // Diagonal contact doesn't count
        assert!(!is_connected(&cells(&[(0, 0), (1, 1), (2, 2), (3, 3)])));
        assert!(!is_connected(&cells(&[(0, 0), (0, 1), (0, 3), (0, 4)])));
    }
}
