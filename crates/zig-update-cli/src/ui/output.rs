//! Console reporter for the `zig-update` binary.
//!
//! Extracted paths go to stdout, one per line, so they can be piped. Section
//! headers, progress and diagnostics go to stderr. The progress line is
//! redrawn in place and cleared before any other line is printed.

use std::io::{IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossterm::QueueableCommand;
use crossterm::cursor::MoveToColumn;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use zig_update_core::Reporter;

use super::progress::{format_progress, percent};

const NO_PROGRESS: u64 = u64::MAX;

/// Terminal implementation of [`Reporter`].
#[derive(Debug, Clone)]
pub struct Output {
    quiet: bool,
    interactive: bool,
    last_progress: Arc<AtomicU64>,
    progress_shown: Arc<AtomicBool>,
}

impl Output {
    /// Create an output; `quiet` suppresses the per-path listing.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            interactive: std::io::stderr().is_terminal(),
            last_progress: Arc::new(AtomicU64::new(NO_PROGRESS)),
            progress_shown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Record a progress update, returning whether the visible value changed.
    fn advance(&self, current: u64, total: Option<u64>) -> bool {
        let bucket = progress_bucket(current, total);
        self.last_progress.swap(bucket, Ordering::Relaxed) != bucket
    }

    /// Erase an unfinished progress line so the next line starts at column 0.
    fn clear_progress(&self) {
        if !self.progress_shown.swap(false, Ordering::Relaxed) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = stderr
            .queue(MoveToColumn(0))
            .and_then(|s| s.queue(Clear(ClearType::CurrentLine)))
            .and_then(Write::flush);
    }
}

/// Redraw granularity: whole percent when the size is known, else MiB.
fn progress_bucket(current: u64, total: Option<u64>) -> u64 {
    percent(current, total).unwrap_or(current >> 20)
}

impl Reporter for Output {
    fn section(&self, title: &str) {
        self.clear_progress();
        eprintln!("{}", title.bold());
    }

    fn downloading(&self, current: u64, total: Option<u64>) {
        if !self.interactive || !self.advance(current, total) {
            return;
        }

        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r  {}", format_progress(current, total).dim());
        let finished = total.is_some_and(|t| current >= t);
        if finished {
            let _ = writeln!(stderr);
        }
        self.progress_shown.store(!finished, Ordering::Relaxed);
        let _ = stderr.flush();
    }

    fn extracted(&self, path: &Path) {
        if !self.quiet {
            self.clear_progress();
            println!("{}", path.display());
        }
    }

    fn skipped(&self, path: &Path, reason: &str) {
        self.clear_progress();
        eprintln!(
            "{} {} ({reason})",
            "skipped".yellow(),
            path.display().to_string().dim()
        );
    }

    fn info(&self, msg: &str) {
        self.clear_progress();
        eprintln!("{msg}");
    }

    fn success(&self, msg: &str) {
        self.clear_progress();
        eprintln!("{}", msg.green());
    }

    fn warning(&self, msg: &str) {
        self.clear_progress();
        eprintln!("{} {msg}", "warning:".yellow().bold());
    }

    fn error(&self, msg: &str) {
        self.clear_progress();
        eprintln!("{} {msg}", "error:".red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interactive() -> Output {
        Output {
            interactive: true,
            ..Output::new(true)
        }
    }

    #[test]
    fn redraws_only_on_change() {
        let output = Output::new(true);
        assert!(output.advance(0, Some(1000)));
        assert!(!output.advance(5, Some(1000)));
        assert!(output.advance(10, Some(1000)));
        assert!(output.advance(1000, Some(1000)));
    }

    #[test]
    fn unknown_total_buckets_by_mebibyte() {
        assert_eq!(progress_bucket(1024, None), 0);
        assert_eq!(progress_bucket(3 << 20, None), 3);
        assert_eq!(progress_bucket(50, Some(100)), 50);
    }

    #[test]
    fn clones_share_progress() {
        let output = Output::new(false);
        let clone = output.clone();
        assert!(output.advance(1, Some(2)));
        assert!(!clone.advance(1, Some(2)));
    }

    #[test]
    fn open_progress_line_is_cleared_before_next_line() {
        let output = interactive();
        output.downloading(4 << 20, None);
        assert!(output.progress_shown.load(Ordering::Relaxed));

        output.success("done");
        assert!(!output.progress_shown.load(Ordering::Relaxed));
    }

    #[test]
    fn extracted_path_clears_streaming_progress() {
        let output = Output {
            quiet: false,
            ..interactive()
        };
        output.downloading(10, Some(100));
        assert!(output.progress_shown.load(Ordering::Relaxed));

        output.extracted(Path::new("zig/lib/std/std.zig"));
        assert!(!output.progress_shown.load(Ordering::Relaxed));
    }

    #[test]
    fn completed_progress_ends_its_own_line() {
        let output = interactive();
        output.downloading(100, Some(100));
        assert!(!output.progress_shown.load(Ordering::Relaxed));
    }

    #[test]
    fn non_terminal_never_draws_progress() {
        let output = Output {
            interactive: false,
            ..Output::new(true)
        };
        output.downloading(10, Some(100));
        assert!(!output.progress_shown.load(Ordering::Relaxed));
    }
}
