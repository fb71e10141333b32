use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::sort_key::section_label;

/// Write each page as `--- <label> ---`, one line per paragraph, then a
/// blank line. `order` decides the sequence; URLs missing from `results`
/// are skipped.
pub fn render<W: Write>(
    out: &mut W,
    order: &[String],
    results: &HashMap<String, Vec<String>>,
) -> std::io::Result<()> {
    for url in order {
        let Some(paragraphs) = results.get(url) else {
            continue;
        };
        writeln!(out, "--- {} ---", section_label(url))?;
        for p in paragraphs {
            writeln!(out, "{}", p)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Create (or truncate) `path` and render into it.
pub fn write_document(
    path: &Path,
    order: &[String],
    results: &HashMap<String, Vec<String>>,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    render(&mut writer, order, results)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
