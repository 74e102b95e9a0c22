mod config;

use anyhow::{Context, Result};
use config::{Config, InputSource};
use log::info;
use std::io::{Read, Write};
use tetragen_common::{Emitter, ShapeExtractor, REFERENCE_CATALOG};

fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Reference => Ok(REFERENCE_CATALOG.to_owned()),
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Reading catalog from stdin")?;
            Ok(text)
        }
        InputSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Reading catalog from {}", path.display())),
    }
}

/// Write the rendered table, newline terminated. An empty catalog writes nothing.
fn write_output(out: &mut impl Write, rendered: &str) -> Result<()> {
    if !rendered.is_empty() {
        writeln!(out, "{}", rendered).context("Writing output")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::from_args(&config::app().get_matches())?;

    let text = read_input(&config.input)?;
    let catalog = ShapeExtractor::new(config.extractor.clone())
        .extract(&text)
        .with_context(|| format!("Failed to parse shape catalog ({:?})", config.input))?;
    info!(
        "Parsed {} shapes ({:?} variant)",
        catalog.len(),
        catalog.variant()
    );

    let rendered = Emitter::new(config.ident, config.format).emit(&catalog)?;

    {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_output(&mut out, &rendered)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str, contents: &str) -> Result<PathBuf> {
        let path = std::env::temp_dir().join(format!(
            "tetragen-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn reads_bundled_catalog() -> Result<()> {
        assert_eq!(read_input(&InputSource::Reference)?, REFERENCE_CATALOG);
        Ok(())
    }

    #[test]
    fn reads_catalog_file() -> Result<()> {
        let path = scratch_file("square.txt", "xx\nxx\n")?;
        let text = read_input(&InputSource::File(path.clone()));
        std::fs::remove_file(&path)?;

        assert_eq!(text?, "xx\nxx\n");
        Ok(())
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = std::env::temp_dir().join("tetragen-does-not-exist.txt");
        let err = read_input(&InputSource::File(path.clone()))
            .expect_err("Reading unexpectedly succeeded");

        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn file_input_end_to_end() -> Result<()> {
        let path = scratch_file("pair.txt", " x\nxxx\n\nxxxx\n")?;
        let matches = config::app().try_get_matches_from([
            "tetragen",
            path.to_str().context("Non UTF-8 temp path")?,
        ])?;
        let config = Config::from_args(&matches)?;
        let text = read_input(&config.input);
        std::fs::remove_file(&path)?;

        let catalog = ShapeExtractor::new(config.extractor).extract(&text?)?;
        let rendered = Emitter::new(config.ident, config.format).emit(&catalog)?;

        let mut out = Vec::new();
        write_output(&mut out, &rendered)?;
        assert_eq!(
            String::from_utf8(out)?,
            "tetra!((0, 1), (1, 0), (1, 1), (1, 2), 1),\n\
             tetra!((0, 0), (0, 1), (0, 2), (0, 3), 0)\n"
        );
        Ok(())
    }

    #[test]
    fn empty_output_writes_nothing() -> Result<()> {
        let mut out = Vec::new();
        write_output(&mut out, "")?;
        assert!(out.is_empty());
        Ok(())
    }
}
