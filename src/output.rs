//! Colored terminal messages for the user, separate from `log` output.

use owo_colors::OwoColorize;

/// Display a warning message to the user in yellow
pub fn warn(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Display an error message to the user in red
pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

/// Display a success message to the user in green
pub fn success(message: &str) {
    println!("{}", message.green());
}

/// Display one produced output file in blue
pub fn file(name: &str) {
    println!("{}", format!("» {name}").blue());
}
