//! Terminal output and styling.
//!
//! Provides a single place for everything that reaches the terminal: colored
//! status lines, the framed section headers and the move progress bar.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const RULE_WIDTH: usize = 50;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// OutputFormatter::success("Moved 'song.mp3' -> 'Audio/song.mp3'");
    /// ```
    pub fn success(message: &str) {
        println!("{}", message.green());
    }

    /// Prints an error message in red with an X mark, on stderr.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// OutputFormatter::error("Failed to create directory");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message.yellow());
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints pre-formatted text as is, without adding a newline.
    pub fn plain(text: &str) {
        print!("{}", text);
    }

    /// Prints a section header framed by rules, e.g. `--- SUMMARY ---`.
    pub fn section(title: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        println!("{}", rule);
        println!("{}", format!("--- {} ---", title).bold());
        println!("{}", rule);
    }

    /// Prints the closing rule under the summary.
    pub fn rule() {
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    /// Creates a progress bar for file moves.
    ///
    /// indicatif hides the bar by itself when stderr is not a terminal.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foldersort::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(10);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }
}
