use colored::Colorize;
use std::fmt;

use crate::analysis::{Insight, InsightKind};

pub fn info(message: impl fmt::Display) {
    println!("{} {}", "[i]".blue(), message);
}

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green(), message);
}

pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow(), message);
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red(), message);
}

pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Renders one advisory with severity-matched styling.
pub fn insight(insight: &Insight) {
    match insight.kind {
        InsightKind::Warning => warning(&insight.message),
        InsightKind::Success => success(&insight.message),
        InsightKind::Info => info(&insight.message),
    }
}
