//! Word counting over normalized lines.
//!
//! A line keeps only ASCII letters and spaces; every other character is
//! deleted outright, so `"Hello,World"` becomes the single token
//! `"HelloWorld"`. After trimming spaces at both ends the line is split on a
//! single space, and consecutive spaces produce empty segments which are
//! counted too.

use crate::Api;

pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' '
}

pub fn normalize(line: &str) -> String {
    let kept: String = line.chars().filter(|&c| is_allowed(c)).collect();
    kept.trim_matches(' ').to_string()
}

pub fn count_line(line: &str) -> u64 {
    let normalized = normalize(line);
    if normalized.is_empty() {
        return 0;
    }
    normalized.split(' ').count() as u64
}

pub fn count<I, S>(lines: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().map(|line| count_line(line.as_ref())).sum()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WordCount;

impl Api for WordCount {
    fn name(&self) -> &str {
        "wc"
    }

    fn map(&self, line: &str) -> u64 {
        count_line(line)
    }

    fn reduce(&self, left: u64, right: u64) -> u64 {
        left + right
    }
}
