//! Well-plate index selections.
//!
//! A selection string such as `A01:C01,H12` (or `P02-A01:P02-C01` for the
//! multi-plate `rt` kind) names a set of wells on an 8x12 plate. This crate
//! converts those strings into [`PlateGrid`]s and back, and implements the
//! small algebra the sample sheet editor needs on top of them: composing drag
//! selections, rejecting no-op or colliding selections, dropping plates and
//! counting wells.
//!
//! Parsing never fails. A malformed region truncates the selection at that
//! point, keeping everything before it. Use [`check_selection`] when the
//! reason a string stops parsing is needed.

pub mod address;
mod error;
pub mod grid;
pub mod kind;
pub mod region;
pub mod selection;

pub use address::{Well, N_COLS, N_ROWS};
pub use error::SelectionError;
pub use grid::PlateGrid;
pub use kind::{CursorHint, SeqType};
pub use region::{check_selection, parse_selection, parse_selection_into, regions, Region};
pub use selection::{
    additional_selection_valid, apply_selection, apply_selection_with, build_selection,
    concat_selections, count_plates, count_wells, merge_selection_lists, remove_plate,
};
