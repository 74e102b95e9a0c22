//! Renders a [Catalog] as source text for the placement search's shape table.

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::shape::{Catalog, Shape, Variant};


/// Separator between two fragments, matching an argument list layout.
pub const FRAGMENT_SEPARATOR: &str = ",\n";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EmitFormat {
    /// Bare `ident!(...)` fragments joined by [FRAGMENT_SEPARATOR].
    #[default]
    Fragments,
    /// Fragments wrapped in a `const` array item.
    Table {
        /// Name of the constant
        name: String,
        /// Element type of the array
        ty: String,
    },
    /// The catalog as JSON, including the computed sizes.
    Json,
}

#[derive(Clone, Debug)]
pub struct Emitter {
    ident: String,
    format: EmitFormat,
}

impl Emitter {
    pub fn new(ident: impl Into<String>, format: EmitFormat) -> Self {
        Self {
            ident: ident.into(),
            format,
        }
    }

    /// Emitter producing plain fragments with the conventional macro name for `variant`.
    pub fn for_variant(variant: Variant) -> Self {
        Self::new(Self::default_ident(variant), EmitFormat::Fragments)
    }

    pub fn default_ident(variant: Variant) -> &'static str {
        match variant {
            Variant::Tetro => "tetro!",
            Variant::Tetra => "tetra!",
        }
    }

    pub fn with_format(mut self, format: EmitFormat) -> Self {
        self.format = format;
        self
    }

    /// `ident((r, c), (r, c), (r, c), (r, c)[, shift])`
    pub fn fragment(&self, shape: &Shape) -> String {
        let args = shape
            .iter()
            .map(ToString::to_string)
            .chain(shape.column_shift().map(|shift| shift.to_string()))
            .join(", ");

        format!("{}({})", self.ident, args)
    }

    pub fn emit(&self, catalog: &Catalog) -> Result<String> {
        let out = match &self.format {
            EmitFormat::Fragments => catalog
                .iter()
                .map(|shape| self.fragment(shape))
                .join(FRAGMENT_SEPARATOR),
            EmitFormat::Table { name, ty } => {
                let mut out = format!("const {}: [{}; {}] = [\n", name, ty, catalog.len());
                for shape in catalog {
                    out.push_str("    ");
                    out.push_str(&self.fragment(shape));
                    out.push_str(",\n");
                }
                out.push_str("];");
                out
            }
            EmitFormat::Json => {
                serde_json::to_string_pretty(catalog).context("Serialize catalog to JSON")?
            }
        };

        Ok(out)
    }
}
