//! sample_sheet
//!
//! Experiment and sample records of a plate-indexed sequencing run, and the
//! tab-separated sheet they are exchanged in.
#![deny(missing_docs)]

mod check;
mod parameters;
mod sample;
mod sheet;
mod tsv;

pub use check::{check_sheet, SheetProblem};
pub use parameters::Parameters;
pub use sample::{remove_last_plate, update_global_pcr_indices, Experiment, Sample};
pub use sheet::{Overlap, SampleSheet};
pub use tsv::{export_tsv, import_tsv, SheetColumn};
