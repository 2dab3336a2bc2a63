//! Frequency table rendering.
//!
//! Output layout:
//!
//! ```text
//! Total chars: 4
//! A:         3 ( 75.00%) ***************************************************************************
//! B:         1 ( 25.00%) *************************
//! C:         0 (  0.00%)
//! ...
//! ```
//!
//! Every letter line keeps the space after `%)`, even with an empty bar.

use std::fmt;
use std::io::{self, Write};

use crate::scan::Tally;

/// Character repeated to draw a bar.
pub const BAR_MARKER: char = '*';

/// Width of the blank gap between `<letter>:` and the count.
const LABEL_GAP: usize = 9;

/// Share of `total` taken by `count`, in percent. Zero when `total` is zero.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Bar length for a percentage: rounded up, so any nonzero share gets a marker.
pub fn bar_len(percentage: f64) -> usize {
    percentage.ceil() as usize
}

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportLine {
    pub letter: char,
    pub count: u64,
    pub percentage: f64,
    pub bar_len: usize,
}

/// Read-only view over a finished tally.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    tally: &'a Tally,
}

impl<'a> Report<'a> {
    pub fn new(tally: &'a Tally) -> Self {
        Self { tally }
    }

    pub fn total_chars(&self) -> u64 {
        self.tally.total_chars
    }

    /// Rows for `A` through `Z`.
    pub fn lines(&self) -> impl Iterator<Item = ReportLine> + 'a {
        let tally: &'a Tally = self.tally;
        let total = tally.total_chars;
        tally.counts.iter().map(move |(letter, count)| {
            let percentage = percentage(count, total);
            ReportLine {
                letter,
                count,
                percentage,
                bar_len: bar_len(percentage),
            }
        })
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:gap$}{} ({:6.2}%) ",
            self.letter,
            "",
            self.count,
            self.percentage,
            gap = LABEL_GAP
        )?;
        for _ in 0..self.bar_len {
            write!(f, "{BAR_MARKER}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total chars: {}", self.total_chars())?;
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
