//! Single-pass letter tally with a skip window and every-Nth sampling.
//!
//! Only letters move the scan forward. The first `skip` letters are dropped
//! without touching the sampling cycle; after that the first letter is
//! tallied and then every `period`-th one.

use std::io::{self, BufRead, BufReader, Read};

use tracing::debug;

use crate::error::{FtableError, Result};
use crate::letters::{index_letter, letter_index, ALPHABET_LEN};

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Skip and sampling settings for a scan.
///
/// `period` is always at least 1, so a scan never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    skip: u64,
    period: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { skip: 0, period: 1 }
    }
}

impl ScanOptions {
    pub fn new(skip: u64, period: u64) -> Result<Self> {
        if period == 0 {
            return Err(FtableError::InvalidSamplePeriod(period));
        }
        Ok(Self { skip, period })
    }

    /// Leading letters to ignore.
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Tally one letter in every `period` after the skip window.
    pub fn period(&self) -> u64 {
        self.period
    }
}

/// Per-letter counts, `A` through `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterTable([u64; ALPHABET_LEN]);

impl CounterTable {
    /// Count for a letter, either case. Non-letters read as 0.
    pub fn get(&self, letter: char) -> u64 {
        u8::try_from(letter)
            .ok()
            .and_then(letter_index)
            .map_or(0, |index| self.0[index])
    }

    /// `(letter, count)` pairs in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, &count)| (index_letter(index), count))
    }

    pub fn sum(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn as_array(&self) -> &[u64; ALPHABET_LEN] {
        &self.0
    }

    fn increment(&mut self, index: usize) {
        self.0[index] += 1;
    }
}

/// Result of a scan: the counter table and the number of letters tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub counts: CounterTable,
    pub total_chars: u64,
}

struct ScanState {
    period: u64,
    remaining_skip: u64,
    sample_index: u64,
    letters_seen: u64,
    tally: Tally,
}

impl ScanState {
    fn new(options: &ScanOptions) -> Self {
        Self {
            period: options.period,
            remaining_skip: options.skip,
            sample_index: 0,
            letters_seen: 0,
            tally: Tally::default(),
        }
    }

    #[inline]
    fn push(&mut self, byte: u8) {
        let Some(index) = letter_index(byte) else {
            return;
        };
        self.letters_seen += 1;

        if self.remaining_skip > 0 {
            self.remaining_skip -= 1;
            return;
        }

        if self.sample_index == 0 {
            self.tally.counts.increment(index);
            self.tally.total_chars += 1;
        }
        self.sample_index = (self.sample_index + 1) % self.period;
    }

    fn finish(self) -> Tally {
        debug!(
            letters_seen = self.letters_seen,
            skip_remaining = self.remaining_skip,
            tallied = self.tally.total_chars,
            period = self.period,
            "Scan complete"
        );
        self.tally
    }
}

/// Tally the letters of `reader` until end of stream.
pub fn scan<R: Read>(reader: R, options: &ScanOptions) -> Result<Tally> {
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, reader);
    let mut state = ScanState::new(options);

    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FtableError::Read(e)),
        };
        if buf.is_empty() {
            break;
        }
        for &byte in buf {
            state.push(byte);
        }
        let consumed = buf.len();
        reader.consume(consumed);
    }

    Ok(state.finish())
}

/// Tally the letters of an in-memory buffer.
pub fn scan_bytes(bytes: &[u8], options: &ScanOptions) -> Tally {
    let mut state = ScanState::new(options);
    for &byte in bytes {
        state.push(byte);
    }
    state.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(skip: u64, period: u64) -> ScanOptions {
        ScanOptions::new(skip, period).unwrap()
    }

    /// Reader that fails after yielding its data once.
    struct FailingReader {
        data: &'static [u8],
        done: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.done {
                return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
            }
            self.done = true;
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            Ok(n)
        }
    }

    /// Reader that reports `Interrupted` before every chunk.
    struct InterruptingReader {
        data: Vec<u8>,
        pos: usize,
        interrupt_next: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.interrupt_next = true;
            let n = (self.data.len() - self.pos).min(buf.len()).min(3);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_scan_options_default() {
        let options = ScanOptions::default();
        assert_eq!(options.skip(), 0);
        assert_eq!(options.period(), 1);
    }

    #[test]
    fn test_scan_options_rejects_zero_period() {
        let err = ScanOptions::new(0, 0).unwrap_err();
        assert!(matches!(err, FtableError::InvalidSamplePeriod(0)));
    }

    #[test]
    fn test_scan_counts_every_letter_by_default() {
        let tally = scan_bytes(b"AAAB", &ScanOptions::default());
        assert_eq!(tally.total_chars, 4);
        assert_eq!(tally.counts.get('A'), 3);
        assert_eq!(tally.counts.get('B'), 1);
        assert_eq!(tally.counts.get('C'), 0);
    }

    #[test]
    fn test_scan_case_insensitive() {
        let tally = scan_bytes(b"aAaA", &ScanOptions::default());
        assert_eq!(tally.counts.get('A'), 4);
        assert_eq!(tally.counts.get('a'), 4);
        assert_eq!(tally.total_chars, 4);
    }

    #[test]
    fn test_scan_ignores_non_letters() {
        let tally = scan_bytes(b"a1a2a3", &ScanOptions::default());
        assert_eq!(tally.counts.get('A'), 3);
        assert_eq!(tally.total_chars, 3);
    }

    #[test]
    fn test_scan_empty_input() {
        let tally = scan_bytes(b"", &ScanOptions::default());
        assert_eq!(tally, Tally::default());
    }

    #[test]
    fn test_skip_drops_leading_letters_only() {
        // digits do not count towards the skip window
        let tally = scan_bytes(b"1a2b3c", &opts(2, 1));
        assert_eq!(tally.total_chars, 1);
        assert_eq!(tally.counts.get('C'), 1);
        assert_eq!(tally.counts.get('A'), 0);
        assert_eq!(tally.counts.get('B'), 0);
    }

    #[test]
    fn test_skip_longer_than_input() {
        let tally = scan_bytes(b"abc", &opts(10, 1));
        assert_eq!(tally.total_chars, 0);
        assert_eq!(tally.counts.sum(), 0);
    }

    #[test]
    fn test_period_takes_first_then_every_nth() {
        // letters: a b c d e f g, period 3 -> a, d, g
        let tally = scan_bytes(b"abcdefg", &opts(0, 3));
        assert_eq!(tally.total_chars, 3);
        assert_eq!(tally.counts.get('A'), 1);
        assert_eq!(tally.counts.get('D'), 1);
        assert_eq!(tally.counts.get('G'), 1);
        assert_eq!(tally.counts.get('B'), 0);
    }

    #[test]
    fn test_skip_then_period() {
        // skip "ab", then sample c, e, g with period 2
        let tally = scan_bytes(b"a-b-c-d-e-f-g", &opts(2, 2));
        assert_eq!(tally.total_chars, 3);
        for letter in ['C', 'E', 'G'] {
            assert_eq!(tally.counts.get(letter), 1, "letter {letter}");
        }
        for letter in ['A', 'B', 'D', 'F'] {
            assert_eq!(tally.counts.get(letter), 0, "letter {letter}");
        }
    }

    #[test]
    fn test_non_ascii_bytes_are_inert() {
        let tally = scan_bytes("héllo wörld".as_bytes(), &ScanOptions::default());
        assert_eq!(tally.total_chars, 8);
        assert_eq!(tally.counts.get('L'), 3);
        assert_eq!(tally.counts.get('E'), 0);
        assert_eq!(tally.counts.get('O'), 1);
    }

    #[test]
    fn test_counter_table_iter_order() {
        let tally = scan_bytes(b"zyxa", &ScanOptions::default());
        let letters: Vec<char> = tally.counts.iter().map(|(c, _)| c).collect();
        assert_eq!(letters.len(), ALPHABET_LEN);
        assert_eq!(letters.first(), Some(&'A'));
        assert_eq!(letters.last(), Some(&'Z'));
        assert_eq!(tally.counts.as_array()[25], 1);
    }

    #[test]
    fn test_counter_table_get_non_letter() {
        let tally = scan_bytes(b"abc", &ScanOptions::default());
        assert_eq!(tally.counts.get('1'), 0);
        assert_eq!(tally.counts.get('é'), 0);
    }

    #[test]
    fn test_scan_reader_matches_scan_bytes() {
        let text = b"The quick brown fox jumps over the lazy dog".repeat(5000);
        let options = opts(7, 3);
        let from_reader = scan(&text[..], &options).unwrap();
        assert_eq!(from_reader, scan_bytes(&text, &options));
        assert_eq!(from_reader.counts.sum(), from_reader.total_chars);
    }

    #[test]
    fn test_scan_retries_interrupted_reads() {
        let reader = InterruptingReader {
            data: b"abcabcab".to_vec(),
            pos: 0,
            interrupt_next: true,
        };
        let tally = scan(reader, &ScanOptions::default()).unwrap();
        assert_eq!(tally.total_chars, 8);
        assert_eq!(tally.counts.get('A'), 3);
    }

    #[test]
    fn test_scan_propagates_read_errors() {
        let reader = FailingReader {
            data: b"abc",
            done: false,
        };
        let err = scan(reader, &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, FtableError::Read(_)));
    }
}
