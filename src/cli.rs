use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// a tab-separated gene annotation file (id, description, ...)
    #[arg(long, value_name = "FILE")]
    anno: Option<PathBuf>,

    /// a FASTA-formatted protein sequence file
    #[arg(long, value_name = "FILE")]
    faa: Option<PathBuf>,

    /// a FASTA-formatted nucleotide sequence file
    #[arg(long, value_name = "FILE")]
    ffn: Option<PathBuf>,

    /// keywords to search the annotations for; quote multi-word phrases
    #[arg(long, num_args = 1.., value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// enable verbose logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// The resolved run parameters. The matcher and extractor only ever see
// this struct, never the raw flags.
pub struct Inputs {
    pub anno: PathBuf,
    pub faa: PathBuf,
    pub ffn: PathBuf,
    pub keywords: Vec<String>,
}

impl Cli {
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    }

    // Fill in every parameter not given as a flag by asking on the
    // terminal. The keyword prompt accepts shell-style quoting so
    // multi-word phrases stay together.
    pub fn resolve(self) -> Result<Inputs> {
        let anno = resolve_path(self.anno, "annotation (.anno) file path")?;
        let faa = resolve_path(self.faa, "protein sequence (.faa) file path")?;
        let ffn = resolve_path(self.ffn, "nucleotide sequence (.ffn) file path")?;

        let keywords = if self.keywords.is_empty() {
            let line = prompt("search keywords (quote multi-word phrases)")?;
            shell_words::split(&line).context("could not parse the keyword list")?
        } else {
            self.keywords
        };
        ensure!(
            !keywords.is_empty(),
            "at least one search keyword is required"
        );

        Ok(Inputs {
            anno,
            faa,
            ffn,
            keywords,
        })
    }
}

fn resolve_path(flag: Option<PathBuf>, label: &str) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(path),
        None => Ok(PathBuf::from(prompt(label)?)),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("could not read from stdin")?;
    Ok(line.trim().to_string())
}
