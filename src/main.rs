use clap::Parser;

mod annotation;
mod cli;
mod output;
mod pattern;
mod run;
mod sequences;

use cli::Cli;
use run::Outcome;

fn main() {
    // Parse CLI arguments; anything missing is prompted for.
    let args = Cli::parse();
    args.init_logging();
    let inputs = match args.resolve() {
        Ok(inputs) => inputs,
        Err(e) => fail(e),
    };

    // Match the annotation file; extract sequences; report.
    match run::run(&inputs) {
        Ok(Outcome::Completed(summary)) => {
            output::success(&format!(
                "Done, {} genes matched. Output files:",
                summary.match_count
            ));
            for file in &summary.files {
                output::file(file);
            }
        }
        Ok(Outcome::NoMatches) => {
            output::warn("Warning: no annotation lines matched the given keywords.");
        }
        Err(e) => fail(e),
    }
}

fn fail(e: anyhow::Error) -> ! {
    output::error(&format!("Error: {:#}", e));
    std::process::exit(1);
}
