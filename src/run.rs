use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;

use crate::annotation;
use crate::cli::Inputs;
use crate::pattern;
use crate::sequences;

// What a run produced. NoMatches is not an error: nothing has been written
// yet when it is returned, and the caller exits zero with a warning.
#[derive(Debug)]
pub enum Outcome {
    Completed(Summary),
    NoMatches,
}

#[derive(Debug)]
pub struct Summary {
    pub output_dir: PathBuf,
    pub files: [String; 3],
    pub match_count: usize,
}

// One full filtering run: validate the inputs, match the annotation file,
// then copy the matching records out of both sequence files.
pub fn run(inputs: &Inputs) -> Result<Outcome> {
    for path in [&inputs.anno, &inputs.faa, &inputs.ffn] {
        if !path.exists() {
            bail!("input file {} does not exist", path.display());
        }
    }

    let regex = pattern::build(&inputs.keywords)?;
    let ids = annotation::scan_identifiers(&inputs.anno, &regex)?;
    if ids.is_empty() {
        return Ok(Outcome::NoMatches);
    }

    // <base>_output_<timestamp>, next to the annotation file.
    let base = file_stem(&inputs.anno)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let output_dir = inputs
        .anno
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{base}_output_{timestamp}"));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("could not create output directory {}", output_dir.display()))?;
    log::debug!("writing outputs to {}", output_dir.display());

    annotation::write_filtered(&inputs.anno, &output_dir.join("filtered.anno"), &regex, &ids)?;
    sequences::extract_records(&inputs.faa, &output_dir.join("output.faa"), &ids)?;
    sequences::extract_records(&inputs.ffn, &output_dir.join("output.ffn"), &ids)?;

    // Rename the outputs now that the match count is final.
    let prefix = format!("{base}_matches_{}", ids.len());
    let files = [
        format!("{prefix}.anno"),
        format!("{prefix}.faa"),
        format!("{prefix}.ffn"),
    ];
    for (temp, renamed) in ["filtered.anno", "output.faa", "output.ffn"]
        .iter()
        .zip(&files)
    {
        fs::rename(output_dir.join(temp), output_dir.join(renamed))?;
    }

    write_report(&output_dir, inputs, &files, ids.len())?;

    // An empty sequence output means none of the matched genes showed up
    // in that file. Partial coverage passes, zero coverage does not.
    for name in &files[1..] {
        let path = output_dir.join(name);
        if fs::metadata(&path)?.len() == 0 {
            bail!("sequence output file {} is empty", path.display());
        }
    }

    Ok(Outcome::Completed(Summary {
        output_dir,
        files,
        match_count: ids.len(),
    }))
}

fn write_report(dir: &Path, inputs: &Inputs, files: &[String; 3], match_count: usize) -> Result<()> {
    let anno_name = inputs
        .anno
        .file_name()
        .unwrap_or(inputs.anno.as_os_str())
        .to_string_lossy();
    let report = format!(
        "=== Filter report ===\n\
         Input file: {anno_name}\n\
         Keywords: {}\n\
         Matched genes: {match_count}\n\
         Output files:\n  - {}\n  - {}\n  - {}\n\
         Executed: {}\n",
        inputs.keywords.join(", "),
        files[0],
        files[1],
        files[2],
        Local::now().format("%Y-%m-%d %H:%M:%S"),
    );
    fs::write(dir.join("report.txt"), report).context("could not write report.txt")?;
    Ok(())
}

fn file_stem(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("could not derive a file stem from {}", path.display()))?;
    Ok(stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ANNO: &str = "gene1\tGH13 alpha-amylase\ngene2\tGH1 beta-glucosidase\n";
    const FAA: &str = ">gene1 GH13\nMKLV\n>gene2 GH1\nMSDE\n";
    const FFN: &str = ">gene1 GH13\nATGC\n>gene2 GH1\nATGA\n";

    fn inputs(dir: &TempDir, keywords: &[&str]) -> Inputs {
        let anno = dir.path().join("test.anno");
        let faa = dir.path().join("test.faa");
        let ffn = dir.path().join("test.ffn");
        fs::write(&anno, ANNO).unwrap();
        fs::write(&faa, FAA).unwrap();
        fs::write(&ffn, FFN).unwrap();
        Inputs {
            anno,
            faa,
            ffn,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn full_run_produces_renamed_outputs_and_report() {
        let dir = TempDir::new().unwrap();
        let outcome = run(&inputs(&dir, &["GH1"])).unwrap();
        let Outcome::Completed(summary) = outcome else {
            panic!("expected a completed run");
        };

        assert_eq!(summary.match_count, 1);
        assert_eq!(
            summary.files,
            [
                "test_matches_1.anno".to_string(),
                "test_matches_1.faa".to_string(),
                "test_matches_1.ffn".to_string(),
            ]
        );
        assert_eq!(
            fs::read_to_string(summary.output_dir.join("test_matches_1.anno")).unwrap(),
            "gene2\tGH1 beta-glucosidase\n"
        );
        assert_eq!(
            fs::read_to_string(summary.output_dir.join("test_matches_1.faa")).unwrap(),
            ">gene2 GH1\nMSDE\n"
        );
        assert_eq!(
            fs::read_to_string(summary.output_dir.join("test_matches_1.ffn")).unwrap(),
            ">gene2 GH1\nATGA\n"
        );

        let report = fs::read_to_string(summary.output_dir.join("report.txt")).unwrap();
        assert!(report.contains("Input file: test.anno"));
        assert!(report.contains("Keywords: GH1"));
        assert!(report.contains("Matched genes: 1"));
    }

    #[test]
    fn no_matches_leaves_no_output_directory() {
        let dir = TempDir::new().unwrap();
        let outcome = run(&inputs(&dir, &["sulfatase"])).unwrap();
        assert!(matches!(outcome, Outcome::NoMatches));

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter(|entry| entry.as_ref().unwrap().file_type().unwrap().is_dir())
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut inputs = inputs(&dir, &["GH1"]);
        inputs.faa = dir.path().join("absent.faa");
        assert!(run(&inputs).is_err());
    }

    #[test]
    fn empty_sequence_output_is_an_error_and_keeps_the_directory() {
        let dir = TempDir::new().unwrap();
        let inputs = inputs(&dir, &["GH1"]);
        // gene2 is matched but has no record in the protein file.
        fs::write(&inputs.faa, ">gene1 GH13\nMKLV\n").unwrap();

        let err = run(&inputs).unwrap_err();
        assert!(err.to_string().contains("is empty"));

        let kept = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.file_name().to_string_lossy().contains("_output_"));
        assert!(kept);
    }
}
