pub mod emitter;
pub mod extractor;
pub mod shape;

pub use emitter::{EmitFormat, Emitter};
pub use extractor::{EndOfInput, ExtractError, ExtractorConfig, ShapeExtractor};
pub use shape::{Catalog, Pos, Shape, Size, Variant};

/// Number of cells every shape in a catalog must have.
pub const CELLS_PER_SHAPE: usize = 4;

/// The hand-maintained catalog of every tetromino orientation used by the placement search.
/// One blank-line separated block per orientation, `x` marking an occupied cell.
pub const REFERENCE_CATALOG: &str = include_str!("../catalog/tetras.txt");
