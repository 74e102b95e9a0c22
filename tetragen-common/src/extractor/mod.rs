//! Turns an ASCII-art shape catalog into a [Catalog].
//!
//! Shapes are maximal runs of non-blank lines. Any character other than a space is a mark;
//! each mark becomes a `(row, col)` cell where `row` counts lines within the block and `col`
//! counts characters within the line.

use std::fmt::Display;

use itertools::Itertools;
use log::{debug, trace};

use crate::shape::{is_connected, Catalog, Pos, Shape, Variant};
use crate::CELLS_PER_SHAPE;


/// What to do with a shape that is still open when the input runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndOfInput {
    /// Apply the same cardinality check as a blank-line terminated shape.
    #[default]
    Validate,
    /// Accept whatever was collected so far.
    Lenient,
}

#[derive(Clone, Debug, Default)]
pub struct ExtractorConfig {
    pub variant: Variant,
    pub end_of_input: EndOfInput,
    /// Reject shapes whose cells aren't edge-connected.
    pub require_connected: bool,
}

/// Error generated when a shape block is malformed. Any of these aborts the whole catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// A shape gained more than [CELLS_PER_SHAPE] marks.
    TooManyPoints {
        shape_index: usize,
        line: usize,
        cells: Vec<Pos>,
    },
    /// A shape ended with fewer than [CELLS_PER_SHAPE] marks.
    IncompleteShape {
        shape_index: usize,
        line: usize,
        partial_cells: Vec<Pos>,
    },
    /// A shape had the right number of marks, but they don't form one piece.
    Disconnected {
        shape_index: usize,
        line: usize,
        cells: Vec<Pos>,
    },
}

impl ExtractError {
    pub fn shape_index(&self) -> usize {
        match self {
            Self::TooManyPoints { shape_index, .. }
            | Self::IncompleteShape { shape_index, .. }
            | Self::Disconnected { shape_index, .. } => *shape_index,
        }
    }
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyPoints {
                shape_index,
                line,
                cells,
            } => write!(
                f,
                "too many points in shape #{} (line {}): [{}]",
                shape_index,
                line,
                cells.iter().join(", ")
            ),
            Self::IncompleteShape {
                shape_index,
                line,
                partial_cells,
            } => write!(
                f,
                "bad shape #{} (line {}): incomplete, got {} of {} points: [{}]",
                shape_index,
                line,
                partial_cells.len(),
                CELLS_PER_SHAPE,
                partial_cells.iter().join(", ")
            ),
            Self::Disconnected {
                shape_index,
                line,
                cells,
            } => write!(
                f,
                "bad shape #{} (line {}): cells are not connected: [{}]",
                shape_index,
                line,
                cells.iter().join(", ")
            ),
        }
    }
}

impl std::error::Error for ExtractError {}

/// The shape currently being built.
struct Accumulator {
    cells: Vec<Pos>,
    column_shift: Option<usize>,
    next_row: usize,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            cells: Vec::with_capacity(CELLS_PER_SHAPE),
            column_shift: None,
            next_row: 0,
        }
    }

    /// Record every mark of `line` as the next row of the shape.
    fn push_row(&mut self, line: &str, track_column_shift: bool) {
        let row = self.next_row;
        self.next_row += 1;

        for (col, c) in line.chars().enumerate() {
            if c == ' ' {
                continue;
            }
            if track_column_shift && self.cells.is_empty() {
                self.column_shift = Some(col);
            }
            self.cells.push(Pos::new(row, col));
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShapeExtractor {
    config: ExtractorConfig,
}

impl ShapeExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, text: &str) -> Result<Catalog, ExtractError> {
        let track_column_shift = self.config.variant.tracks_column_shift();
        let mut shapes = Vec::new();
        let mut current: Option<Accumulator> = None;
        let mut line_no = 0;

        for (idx, line) in text.lines().enumerate() {
            line_no = idx + 1;
            let line = line.trim_end();

            if line.is_empty() {
                if let Some(acc) = current.take() {
                    shapes.push(self.finish(acc, shapes.len(), line_no, true)?);
                }
                continue;
            }

            trace!("line {}: {:?}", line_no, line);
            let acc = current.get_or_insert_with(Accumulator::new);
            acc.push_row(line, track_column_shift);

            if acc.cells.len() > CELLS_PER_SHAPE {
                return Err(ExtractError::TooManyPoints {
                    shape_index: shapes.len(),
                    line: line_no,
                    cells: std::mem::take(&mut acc.cells),
                });
            }
        }

        if let Some(acc) = current {
            let enforce_count = self.config.end_of_input == EndOfInput::Validate;
            shapes.push(self.finish(acc, shapes.len(), line_no, enforce_count)?);
        }

        debug!("Extracted {} shapes", shapes.len());
        Ok(Catalog::new(self.config.variant, shapes))
    }

    /// Validate a closed block and turn it into a [Shape]. `enforce_count` is only false for
    /// a block closed by the end of input in lenient mode.
    fn finish(
        &self,
        acc: Accumulator,
        shape_index: usize,
        line: usize,
        enforce_count: bool,
    ) -> Result<Shape, ExtractError> {
        if enforce_count && acc.cells.len() < CELLS_PER_SHAPE {
            return Err(ExtractError::IncompleteShape {
                shape_index,
                line,
                partial_cells: acc.cells,
            });
        }

        if self.config.require_connected && !is_connected(&acc.cells) {
            return Err(ExtractError::Disconnected {
                shape_index,
                line,
                cells: acc.cells,
            });
        }

        debug!(
            "Shape #{}: [{}] shift {:?}",
            shape_index,
            acc.cells.iter().join(", "),
            acc.column_shift
        );
        Ok(Shape::new(acc.cells, acc.column_shift))
    }
}
