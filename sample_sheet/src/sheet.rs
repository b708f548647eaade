use crate::sample::remove_last_plate;
use crate::tsv::{export_tsv, import_tsv};
use crate::{Experiment, Sample};
use anyhow::{Context, Result};
use plate_map::{parse_selection, parse_selection_into, PlateGrid, SeqType, Well};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An experiment, its samples and the number of rt plates they use.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct SampleSheet {
    /// Experiment-level fields
    pub experiment: Experiment,
    /// One entry per sample, after merging rows
    pub samples: Vec<Sample>,
    /// Number of rt plates, at least 1
    pub num_plates: usize,
}

/// A well selected by two samples.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Overlap {
    /// Selection kind the overlap is in
    pub kind: SeqType,
    /// Zero-based plate
    pub plate: usize,
    /// The shared well
    pub well: Well,
    /// Indices of the two samples, in sheet order
    pub samples: (usize, usize),
}

impl Default for SampleSheet {
    fn default() -> Self {
        SampleSheet {
            experiment: Experiment::default(),
            samples: Vec::new(),
            num_plates: 1,
        }
    }
}

impl SampleSheet {
    /// Parse a sheet from tab-separated text, see [`import_tsv`].
    pub fn from_tsv(text: &str) -> Result<Self> {
        import_tsv(text)
    }

    /// Render the sheet as tab-separated text, see [`export_tsv`].
    pub fn to_tsv(&self) -> String {
        export_tsv(&self.experiment, &self.samples)
    }

    /// Read a sheet from a file.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading sample sheet {}", path.display()))?;
        Self::from_tsv(&text).with_context(|| path.display().to_string())
    }

    /// Write the sheet to a file.
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_tsv())
            .with_context(|| format!("writing sample sheet {}", path.display()))
    }

    /// Plates a selection of `kind` can be on.
    pub fn plates(&self, kind: SeqType) -> usize {
        if kind.is_multi_plate() {
            self.num_plates
        } else {
            1
        }
    }

    /// Every well of `kind` on `plate` taken by a sample other than `except`.
    pub fn occupied_wells(&self, kind: SeqType, plate: usize, except: Option<usize>) -> PlateGrid {
        let mut grid = PlateGrid::new();
        for (_, sample) in self
            .samples
            .iter()
            .enumerate()
            .filter(|&(i, _)| Some(i) != except)
        {
            parse_selection_into(sample.selection(kind), kind, plate, &mut grid);
        }
        grid
    }

    /// Wells of `kind` selected by more than one sample. Each pair of
    /// samples sharing a well is reported once per well.
    pub fn overlaps(&self, kind: SeqType) -> Vec<Overlap> {
        let mut overlaps = Vec::new();
        for plate in 0..self.plates(kind) {
            let grids: Vec<_> = self
                .samples
                .iter()
                .map(|sample| parse_selection(sample.selection(kind), kind, plate))
                .collect();
            for (i, first) in grids.iter().enumerate() {
                for (j, second) in grids.iter().enumerate().skip(i + 1) {
                    overlaps.extend(first.selected().filter(|&well| second.get(well)).map(
                        |well| Overlap {
                            kind,
                            plate,
                            well,
                            samples: (i, j),
                        },
                    ));
                }
            }
        }
        overlaps
    }

    /// Drop the highest rt plate from every sample.
    pub fn remove_last_plate(&mut self) {
        self.num_plates = remove_last_plate(&mut self.samples, self.num_plates);
    }
}
