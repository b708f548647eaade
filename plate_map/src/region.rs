//!
//! Expanding selection strings into occupancy grids.
//!
//! A selection is a comma-separated list of regions, each either a single
//! well or an inclusive `start:end` rectangle. Only the start token of a
//! range decides which plate the range is on.
//!
use crate::address::{plate_index, Well};
use crate::{PlateGrid, SelectionError, SeqType};
use itertools::Itertools;
use log::debug;
use std::str::Split;

/// One comma-separated unit of a selection string.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Region {
    Single {
        plate: Option<usize>,
        well: Well,
    },
    /// Inclusive rectangle, `start` is never below or right of `end`.
    Range {
        plate: Option<usize>,
        start: Well,
        end: Well,
    },
}

impl Region {
    /// Plate of the region, `None` when the plate prefix is unreadable.
    pub fn plate(&self) -> Option<usize> {
        match *self {
            Region::Single { plate, .. } | Region::Range { plate, .. } => plate,
        }
    }

    /// Every well covered by the region, row-major.
    pub fn wells(&self) -> impl Iterator<Item = Well> {
        let (start, end) = match *self {
            Region::Single { well, .. } => (well, well),
            Region::Range { start, end, .. } => (start, end),
        };
        (start.row..=end.row)
            .cartesian_product(start.col..=end.col)
            .map(|(row, col)| Well { row, col })
    }
}

/// Iterator over the regions of a selection string, see [`regions`].
pub struct Regions<'a> {
    parts: Split<'a, char>,
    kind: SeqType,
    region: usize,
    done: bool,
}

impl<'a> Iterator for Regions<'a> {
    type Item = Result<Region, SelectionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let part = self.parts.next()?;
        self.region += 1;
        let result = parse_region(part, self.kind, self.region);
        self.done = result.is_err();
        Some(result)
    }
}

/// The regions of `selection`, in order. The iterator stops after the first
/// error. An empty selection has no regions.
pub fn regions(selection: &str, kind: SeqType) -> Regions<'_> {
    Regions {
        parts: selection.split(','),
        kind,
        region: 0,
        done: selection.is_empty(),
    }
}

fn parse_region(part: &str, kind: SeqType, region: usize) -> Result<Region, SelectionError> {
    if part.is_empty() {
        return Err(SelectionError::EmptyRegion { region });
    }
    let mut tokens = part.split(':');
    let start = tokens.next().unwrap_or_default();
    let end = tokens.next().filter(|end| !end.is_empty());
    if start.is_empty() {
        return Err(SelectionError::MissingStart { region });
    }

    let well = |token: &str| {
        Well::from_token(token, kind).ok_or_else(|| SelectionError::InvalidWell {
            region,
            token: token.to_string(),
            kind,
        })
    };
    let plate = plate_index(start, kind);

    let Some(end) = end else {
        return Ok(Region::Single {
            plate,
            well: well(start)?,
        });
    };
    let (start, end) = (well(start)?, well(end)?);
    if start.row > end.row || start.col > end.col {
        return Err(SelectionError::ReversedRange {
            region,
            range: part.to_string(),
        });
    }
    Ok(Region::Range { plate, start, end })
}

/// Mark the wells `selection` selects on `plate` in `grid`, leaving wells
/// that are already selected untouched, and return the same grid.
///
/// Parsing stops silently at the first malformed region; everything before
/// it is kept.
pub fn parse_selection_into<'g>(
    selection: &str,
    kind: SeqType,
    plate: usize,
    grid: &'g mut PlateGrid,
) -> &'g mut PlateGrid {
    for region in regions(selection, kind) {
        let region = match region {
            Ok(region) => region,
            Err(err) => {
                debug!("selection '{selection}' truncated: {err}");
                break;
            }
        };
        if region.plate() == Some(plate) {
            for well in region.wells() {
                grid.set(well, true);
            }
        }
    }
    grid
}

/// The wells `selection` selects on `plate`, on a fresh grid.
pub fn parse_selection(selection: &str, kind: SeqType, plate: usize) -> PlateGrid {
    let mut grid = PlateGrid::new();
    parse_selection_into(selection, kind, plate, &mut grid);
    grid
}

/// Report the first problem that would make [`parse_selection`] drop part of
/// `selection`, or an `rt` region whose plate number cannot be read.
pub fn check_selection(selection: &str, kind: SeqType) -> Result<(), SelectionError> {
    let parts = selection.split(',').enumerate();
    for (region, (i, part)) in regions(selection, kind).zip(parts) {
        if region?.plate().is_none() {
            let token = part.split(':').next().unwrap_or_default();
            return Err(SelectionError::InvalidPlate {
                region: i + 1,
                token: token.to_string(),
            });
        }
    }
    Ok(())
}
