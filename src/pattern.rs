use anyhow::{ensure, Result};
use regex::{Regex, RegexBuilder};

// Compile the user's keywords into a single alternation. Each keyword is
// matched case-insensitively, within word boundaries, and with any run of
// whitespace/underscore/hyphen treated as interchangeable, so "two component",
// "two_component" and "two-component" all hit the same lines while "GH1"
// stays clear of "GH10".
pub fn build(keywords: &[String]) -> Result<Regex> {
    let fragments: Vec<String> = keywords
        .iter()
        .filter_map(|kw| keyword_fragment(kw))
        .collect();
    ensure!(
        !fragments.is_empty(),
        "at least one search keyword is required"
    );

    let pattern = fragments.join("|");
    log::debug!("compiled keyword pattern: {pattern}");
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

// One `\b...\b` fragment per keyword: normalize, split on separator runs,
// escape each literal part, rejoin with the separator class. Keywords that
// are nothing but separators normalize away to None.
fn keyword_fragment(keyword: &str) -> Option<String> {
    let normalized = keyword
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let parts: Vec<String> = normalized
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(regex::escape)
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(format!(r"\b{}\b", parts.join(r"[\s_-]+")))
}
