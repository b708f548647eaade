//!
//! The three index families a selection string can belong to.
//!
use strum_macros::{Display, EnumIter, EnumString};

/// Which index family a selection belongs to. `p5` and `p7` selections live
/// on a single plate, `rt` selections can span several plates and carry a
/// `Pnn-` prefix on every well token.
#[derive(
    EnumString,
    EnumIter,
    Display,
    Clone,
    Copy,
    PartialOrd,
    Ord,
    PartialEq,
    Eq,
    Hash,
    Debug,
)]
pub enum SeqType {
    #[strum(to_string = "p5")]
    P5,
    #[strum(to_string = "p7")]
    P7,
    #[strum(to_string = "rt")]
    Rt,
}

/// Resize cursor shown while dragging out a selection of a given kind.
#[derive(Display, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CursorHint {
    #[strum(to_string = "cursor-s-resize")]
    VerticalResize,
    #[strum(to_string = "cursor-e-resize")]
    HorizontalResize,
    #[strum(to_string = "cursor-se-resize")]
    DiagonalResize,
}

impl SeqType {
    /// True for the only kind whose wells are spread over several plates.
    pub fn is_multi_plate(self) -> bool {
        self == SeqType::Rt
    }

    /// Prefix put in front of every well token of this kind on `plate`
    /// (zero-based). Empty for single-plate kinds.
    pub fn plate_prefix(self, plate: usize) -> String {
        if self.is_multi_plate() {
            format!("P{:02}-", plate + 1)
        } else {
            String::new()
        }
    }

    /// The well a drag selection ends on, given where it started and the
    /// labels under the pointer. p5 selections run down a column, p7
    /// selections along a row and rt selections are free rectangles.
    pub fn selection_end(
        self,
        start_row: &str,
        start_col: &str,
        row_label: &str,
        col_label: &str,
    ) -> String {
        match self {
            SeqType::P5 => format!("{row_label}{start_col}"),
            SeqType::P7 => format!("{start_row}{col_label}"),
            SeqType::Rt => format!("{row_label}{col_label}"),
        }
    }

    pub fn cursor_hint(self) -> CursorHint {
        match self {
            SeqType::P5 => CursorHint::VerticalResize,
            SeqType::P7 => CursorHint::HorizontalResize,
            SeqType::Rt => CursorHint::DiagonalResize,
        }
    }
}
