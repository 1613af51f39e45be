use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

// Scan the annotation file once and collect the unique gene identifiers of
// matching lines. The pattern is tested against the whole raw line here;
// the write pass below only looks at the description field, so the two can
// disagree on lines whose identifier column happens to contain a keyword.
pub fn scan_identifiers(anno: &Path, pattern: &Regex) -> Result<HashSet<String>> {
    let file = File::open(anno)
        .with_context(|| format!("could not open annotation file {}", anno.display()))?;
    let mut ids = HashSet::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if pattern.is_match(&line) {
            if let Some(id) = scan_id(&line) {
                ids.insert(id.to_string());
            }
        }
    }
    log::info!("annotation scan matched {} unique gene ids", ids.len());
    Ok(ids)
}

// Re-read the annotation file and write the matching lines, unmodified and
// in original order, to `out`. A line is kept when its description field
// matches AND its identifier was collected during the scan; lines with
// fewer than two tab fields are skipped.
pub fn write_filtered(anno: &Path, out: &Path, pattern: &Regex, ids: &HashSet<String>) -> Result<()> {
    let file = File::open(anno)
        .with_context(|| format!("could not open annotation file {}", anno.display()))?;
    let mut writer = BufWriter::new(
        File::create(out).with_context(|| format!("could not create {}", out.display()))?,
    );
    for line in BufReader::new(file).lines() {
        let line = line?;
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            continue;
        }
        if pattern.is_match(fields[1]) && ids.contains(fields[0].trim()) {
            writeln!(writer, "{line}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

// The scan keys on the first whitespace token of the first tab field.
fn scan_id(line: &str) -> Option<&str> {
    line.split('\t').next()?.split_whitespace().next()
}
