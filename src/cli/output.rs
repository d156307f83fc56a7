//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, commands, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info
//!
//! Data a command exists to produce goes to stdout; diagnostics go to
//! stderr so `huddle cat` output can be piped safely.

use std::fmt::Display;
use std::io::{self, Write};

use console::style;

const RULE_WIDTH: usize = 56;

/// Check if color output is enabled.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err() && console::colors_enabled()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ added db.env`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print a fatal error to stderr as a single `error:` line.
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("error:").red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Print a warning message to stderr (yellow).
pub fn warn(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("warning:").yellow(), msg);
    } else {
        eprintln!("warning: {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: huddle keys refresh`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold section header.
pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  alice  0123…4567`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a horizontal rule separator.
pub fn rule() {
    if colors_enabled() {
        println!("{}", style("─".repeat(RULE_WIDTH)).dim());
    } else {
        println!("{}", "─".repeat(RULE_WIDTH));
    }
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// Print raw data to stdout, without a trailing newline.
pub fn data(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// Print a line of data to stdout.
pub fn line(msg: &str) {
    println!("{}", msg);
}

/// Print a blank line.
pub fn blank() {
    println!();
}

/// Format a path string in cyan.
pub fn path(p: &std::path::Path) -> String {
    if colors_enabled() {
        style(p.display()).cyan().to_string()
    } else {
        p.display().to_string()
    }
}

/// Format a count in bold green.
pub fn count(n: usize) -> String {
    if colors_enabled() {
        style(n).green().bold().to_string()
    } else {
        n.to_string()
    }
}

/// Format a status word: green when good, red otherwise.
pub fn status(word: &str, good: bool) -> String {
    match (colors_enabled(), good) {
        (false, _) => word.to_string(),
        (true, true) => style(word).green().to_string(),
        (true, false) => style(word).red().to_string(),
    }
}
