use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

// Stream a FASTA-like file and copy every record whose header identifier
// is in `ids`. A record is the header line plus all following body lines
// up to the next header, and is always emitted whole or not at all. The
// same pass runs once for the protein file and once for the nucleotide
// file.
pub fn extract_records(input: &Path, output: &Path, ids: &HashSet<String>) -> Result<()> {
    let reader = File::open(input)
        .with_context(|| format!("could not open sequence file {}", input.display()))?;
    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("could not create {}", output.display()))?,
    );

    let mut writing = false;
    let mut records = 0usize;
    for line in BufReader::new(reader).lines() {
        let line = line?;
        if line.starts_with('>') {
            writing = ids.contains(header_id(&line));
            if writing {
                records += 1;
            }
        }
        if writing {
            writeln!(writer, "{line}")?;
        }
    }
    writer.flush()?;
    log::info!(
        "copied {records} of {} requested records from {}",
        ids.len(),
        input.display()
    );
    Ok(())
}

// The identifier is the header's first whitespace token, minus the `>`.
fn header_id(header: &str) -> &str {
    let token = header.split_whitespace().next().unwrap_or(">");
    &token[1..]
}
