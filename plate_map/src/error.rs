use crate::SeqType;
use thiserror::Error;

/// Why a selection string stops parsing. Regions are numbered from 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("region {region} is empty")]
    EmptyRegion { region: usize },

    #[error("region {region} has no start well")]
    MissingStart { region: usize },

    #[error("region {region}: '{token}' is not a valid {kind} well")]
    InvalidWell {
        region: usize,
        token: String,
        kind: SeqType,
    },

    #[error("region {region}: range '{range}' runs backwards")]
    ReversedRange { region: usize, range: String },

    #[error("region {region}: no plate number in '{token}'")]
    InvalidPlate { region: usize, token: String },

    #[error("'{token}' is not a well, expected a row A-H followed by a column 01-12")]
    MalformedWell { token: String },
}
