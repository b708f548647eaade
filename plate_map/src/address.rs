//!
//! Well tokens: `A01` for single-plate kinds, `P02-A01` for `rt`.
//!
use crate::{SelectionError, SeqType};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Rows on a plate, labelled `A` to `H`.
pub const N_ROWS: usize = 8;
/// Columns on a plate, labelled `01` to `12`.
pub const N_COLS: usize = 12;

const ROW_LABELS: &[u8; N_ROWS] = b"ABCDEFGH";

lazy_static! {
    static ref WELL_TOKEN: Regex = Regex::new(r"^[A-Ha-h][0-9]{2}$").unwrap();
}

/// A well position on one plate, zero-based.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Well {
    pub row: usize,
    pub col: usize,
}

impl Well {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < N_ROWS && col < N_COLS).then_some(Well { row, col })
    }

    /// Resolve the row and column of a (possibly plate-prefixed) token.
    pub fn from_token(token: &str, kind: SeqType) -> Option<Self> {
        Some(Well {
            row: row_index(token, kind)?,
            col: col_index(token, kind)?,
        })
    }

    pub fn row_label(self) -> char {
        ROW_LABELS[self.row] as char
    }

    pub fn col_label(self) -> String {
        format!("{:02}", self.col + 1)
    }

    /// The token for this well as written in a selection of `kind` on `plate`.
    pub fn token(self, kind: SeqType, plate: usize) -> String {
        format!("{}{self}", kind.plate_prefix(plate))
    }
}

impl Display for Well {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row_label(), self.col_label())
    }
}

impl FromStr for Well {
    type Err = SelectionError;

    /// Strict parse of an unprefixed token: one row letter and exactly two
    /// column digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SelectionError::MalformedWell {
            token: s.to_string(),
        };
        if !WELL_TOKEN.is_match(s) {
            return Err(malformed());
        }
        Well::from_token(s, SeqType::P5).ok_or_else(malformed)
    }
}

/// The part of a token after the plate prefix. `rt` tokens without a `-`
/// have no well part at all.
fn strip_plate_prefix(token: &str, kind: SeqType) -> Option<&str> {
    if kind.is_multi_plate() {
        token.split('-').nth(1)
    } else {
        Some(token)
    }
}

/// Read the integer at the start of `s`, ignoring anything after it.
/// Leading whitespace and a sign are accepted.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Zero-based row of a token, from its (case-insensitive) row letter.
pub fn row_index(token: &str, kind: SeqType) -> Option<usize> {
    let well = strip_plate_prefix(token, kind)?;
    let row = well.chars().next()?.to_ascii_uppercase();
    ROW_LABELS.iter().position(|&label| label as char == row)
}

/// Zero-based column of a token, from the number following the row letter.
pub fn col_index(token: &str, kind: SeqType) -> Option<usize> {
    let well = strip_plate_prefix(token, kind)?;
    let mut chars = well.chars();
    chars.next()?;
    let col = parse_leading_int(chars.as_str())?;
    (1..=N_COLS as i64)
        .contains(&col)
        .then(|| (col - 1) as usize)
}

/// Zero-based plate of a token. Single-plate kinds are always on plate 0;
/// `rt` tokens carry the one-based plate number between `P` and `-`.
pub fn plate_index(token: &str, kind: SeqType) -> Option<usize> {
    if !kind.is_multi_plate() {
        return Some(0);
    }
    let prefix = token.split('-').next()?;
    let mut chars = prefix.chars();
    chars.next()?;
    let plate = parse_leading_int(chars.as_str())?;
    (plate >= 1).then(|| (plate - 1) as usize)
}
