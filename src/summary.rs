//! Result summary scraped from the formatter's log output.
//!
//! AStyle reports one line per file, starting with `Formatted` or `Unchanged`.
//! There is no structured result, so the summary is a plain count of those
//! words anywhere in the captured stdout. If a future AStyle release rewords
//! its log, the fixtures in the tests below are where that shows up.

/// Word AStyle prints for each file it rewrote
pub const FORMATTED_MARKER: &str = "Formatted";

/// Word AStyle prints for each file it left alone
pub const UNCHANGED_MARKER: &str = "Unchanged";

/// Counts of formatted and unchanged files reported by the formatter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub formatted: usize,
    pub unchanged: usize,
}

impl Summary {
    /// Build a summary from the formatter's captured stdout.
    ///
    /// Counts non-overlapping, case-sensitive occurrences of
    /// [`FORMATTED_MARKER`] and [`UNCHANGED_MARKER`]. A marker inside a
    /// file name counts too.
    #[must_use]
    pub fn from_output(output: &str) -> Self {
        Self {
            formatted: count_marker(output, FORMATTED_MARKER),
            unchanged: count_marker(output, UNCHANGED_MARKER),
        }
    }
}

/// Count non-overlapping occurrences of `marker` in `output`
#[must_use]
pub fn count_marker(output: &str, marker: &str) -> usize {
    if marker.is_empty() {
        return 0;
    }
    output.matches(marker).count()
}
