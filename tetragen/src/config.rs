//! Command line configuration for the shape table generator.
//!

use anyhow::{anyhow, Context, Result};
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;
use tetragen_common::{EmitFormat, EndOfInput, ExtractorConfig, Variant};

/// Where the catalog text comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// The catalog bundled with tetragen-common
    Reference,
    Stdin,
    File(PathBuf),
}

/// Overall generator configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub input: InputSource,
    pub extractor: ExtractorConfig,
    /// Macro identifier emitted in front of every shape, including any trailing `!`.
    pub ident: String,
    pub format: EmitFormat,
}

pub fn app() -> App<'static> {
    App::new("tetragen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts an ASCII-art tetromino catalog into shape table source code")
        .arg(
            Arg::new("INPUT")
                .help("Catalog text file, or - for stdin. Defaults to the bundled catalog")
                .index(1),
        )
        .arg(
            Arg::new("VARIANT")
                .long("variant")
                .value_name("VARIANT")
                .takes_value(true)
                .possible_values(["tetra", "tetro"])
                .default_value("tetra"),
        )
        .arg(
            Arg::new("IDENT")
                .long("ident")
                .value_name("IDENT")
                .takes_value(true)
                .help("Macro identifier to emit. Defaults to tetra! or tetro!"),
        )
        .arg(
            Arg::new("FORMAT")
                .long("format")
                .value_name("FORMAT")
                .takes_value(true)
                .possible_values(["fragments", "table", "json"])
                .default_value("fragments"),
        )
        .arg(
            Arg::new("TABLE_NAME")
                .long("table-name")
                .value_name("NAME")
                .takes_value(true)
                .default_value("TETRAS"),
        )
        .arg(
            Arg::new("TABLE_TYPE")
                .long("table-type")
                .value_name("TYPE")
                .takes_value(true)
                .default_value("Tetra"),
        )
        .arg(
            Arg::new("LENIENT_EOF")
                .long("lenient-eof")
                .help("Accept a short shape if it is closed by the end of input"),
        )
        .arg(
            Arg::new("REQUIRE_CONNECTED")
                .long("require-connected")
                .help("Reject shapes whose cells don't share edges"),
        )
}

impl Config {
    /// Construct a configuration from the clap argument matches
    pub fn from_args(matches: &ArgMatches) -> Result<Self> {
        let input = match matches.value_of("INPUT") {
            None => InputSource::Reference,
            Some(p) if p == "-" => InputSource::Stdin,
            Some(p) => InputSource::File(PathBuf::from(p)),
        };

        let variant = match matches.value_of("VARIANT").context("Missing VARIANT")? {
            "tetra" => Variant::Tetra,
            "tetro" => Variant::Tetro,
            v => return Err(anyhow!("Unknown variant {:?}", v)),
        };

        let format = match matches.value_of("FORMAT").context("Missing FORMAT")? {
            "fragments" => EmitFormat::Fragments,
            "table" => EmitFormat::Table {
                name: matches
                    .value_of("TABLE_NAME")
                    .context("Missing TABLE_NAME")?
                    .to_owned(),
                ty: matches
                    .value_of("TABLE_TYPE")
                    .context("Missing TABLE_TYPE")?
                    .to_owned(),
            },
            "json" => EmitFormat::Json,
            f => return Err(anyhow!("Unknown output format {:?}", f)),
        };

        let ident = matches
            .value_of("IDENT")
            .map(str::to_owned)
            .unwrap_or_else(|| tetragen_common::Emitter::default_ident(variant).to_owned());

        Ok(Config {
            input,
            extractor: ExtractorConfig {
                variant,
                end_of_input: if matches.is_present("LENIENT_EOF") {
                    EndOfInput::Lenient
                } else {
                    EndOfInput::Validate
                },
                require_connected: matches.is_present("REQUIRE_CONNECTED"),
            },
            ident,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let matches = app().try_get_matches_from(
            std::iter::once("tetragen").chain(args.iter().copied()),
        )?;
        Config::from_args(&matches)
    }

    #[test]
    fn defaults() -> Result<()> {
        let config = parse(&[])?;

        assert_eq!(config.input, InputSource::Reference);
        assert_eq!(config.extractor.variant, Variant::Tetra);
        assert_eq!(config.extractor.end_of_input, EndOfInput::Validate);
        assert!(!config.extractor.require_connected);
        assert_eq!(config.ident, "tetra!");
        assert_eq!(config.format, EmitFormat::Fragments);

        Ok(())
    }

    #[test]
    fn tetro_table_from_file() -> Result<()> {
        let config = parse(&[
            "--variant",
            "tetro",
            "--format",
            "table",
            "--table-name",
            "SHAPES",
            "--lenient-eof",
            "--require-connected",
            "shapes.txt",
        ])?;

        assert_eq!(config.input, InputSource::File(PathBuf::from("shapes.txt")));
        assert_eq!(config.extractor.variant, Variant::Tetro);
        assert_eq!(config.extractor.end_of_input, EndOfInput::Lenient);
        assert!(config.extractor.require_connected);
        assert_eq!(config.ident, "tetro!");
        assert_eq!(
            config.format,
            EmitFormat::Table {
                name: "SHAPES".into(),
                ty: "Tetra".into()
            }
        );

        Ok(())
    }

    #[test]
    fn stdin_and_custom_ident() -> Result<()> {
        let config = parse(&["--ident", "shape!", "--format", "json", "-"])?;

        assert_eq!(config.input, InputSource::Stdin);
        assert_eq!(config.ident, "shape!");
        assert_eq!(config.format, EmitFormat::Json);

        Ok(())
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(parse(&["--variant", "pento"]).is_err());
    }
}
