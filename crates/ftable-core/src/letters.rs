//! ASCII letter classification.
//!
//! Only the 26 ASCII letters count. Bytes outside `A-Z` / `a-z`, including
//! every byte of a multi-byte UTF-8 sequence, are not letters.

/// Number of slots in a counter table.
pub const ALPHABET_LEN: usize = 26;

/// Map a byte to its case-folded slot, `0` for `A`/`a` through `25` for `Z`/`z`.
#[inline]
pub fn letter_index(byte: u8) -> Option<usize> {
    if byte.is_ascii_alphabetic() {
        Some(usize::from(byte.to_ascii_uppercase() - b'A'))
    } else {
        None
    }
}

/// Uppercase letter for a slot index.
///
/// # Panics
/// Panics if `index >= ALPHABET_LEN`.
#[inline]
pub fn index_letter(index: usize) -> char {
    assert!(index < ALPHABET_LEN, "letter index out of range: {index}");
    char::from(b'A' + index as u8)
}
