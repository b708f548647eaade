use crate::tsv::SheetColumn;
use plate_map::{count_wells, remove_plate, SeqType};
use serde::{Deserialize, Serialize};

/// One sample of the experiment and the index wells assigned to it.
///
/// `Default` gives an all-blank sample, [`Sample::default_values`] the
/// placeholder used for a freshly added row.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Sample {
    /// Sample name
    pub sample_name: String,
    /// Species the sample comes from
    pub species: String,
    /// Number of cells expected from the sample, as typed
    pub n_expected_cells: String,
    /// p5 selection, single plate
    pub p5: String,
    /// p7 selection, single plate
    pub p7: String,
    /// rt selection, may span several plates
    pub rt: String,
    /// Hashing scheme, if any
    pub hashing: String,
}

/// Experiment-level fields shared by every row of a sheet.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Experiment {
    /// Directory holding the reads
    pub path_reads: String,
    /// Experiment name
    pub experiment_name: String,
    /// Every sample uses the same p5 and p7 selection
    pub global_p5_p7: bool,
}

impl Sample {
    /// Placeholder values for a new sample row.
    pub fn default_values() -> Self {
        Sample {
            sample_name: "sample1".to_string(),
            species: "mouse".to_string(),
            n_expected_cells: "100".to_string(),
            ..Sample::default()
        }
    }

    /// The selection string of the given kind.
    pub fn selection(&self, kind: SeqType) -> &str {
        match kind {
            SeqType::P5 => &self.p5,
            SeqType::P7 => &self.p7,
            SeqType::Rt => &self.rt,
        }
    }

    /// Mutable access to the selection string of the given kind.
    pub fn selection_mut(&mut self, kind: SeqType) -> &mut String {
        match kind {
            SeqType::P5 => &mut self.p5,
            SeqType::P7 => &mut self.p7,
            SeqType::Rt => &mut self.rt,
        }
    }

    /// Expected cells per selected rt well, rounded down. `None` when the
    /// expected cell count is not a number or no rt well is selected.
    pub fn cells_per_well(&self) -> Option<u64> {
        let cells: u64 = self.n_expected_cells.trim().parse().ok()?;
        let wells = count_wells(&self.rt) as u64;
        (wells > 0).then(|| cells / wells)
    }

    pub(crate) fn field(&self, column: SheetColumn) -> Option<&str> {
        use SheetColumn::*;
        let value: &str = match column {
            SampleName => &self.sample_name,
            Species => &self.species,
            NExpectedCells => &self.n_expected_cells,
            P5 => &self.p5,
            P7 => &self.p7,
            Rt => &self.rt,
            Hashing => &self.hashing,
            PathReads | PathFastq | PathBcl | ExperimentName => return None,
        };
        Some(value)
    }

    pub(crate) fn field_mut(&mut self, column: SheetColumn) -> Option<&mut String> {
        use SheetColumn::*;
        let value = match column {
            SampleName => &mut self.sample_name,
            Species => &mut self.species,
            NExpectedCells => &mut self.n_expected_cells,
            P5 => &mut self.p5,
            P7 => &mut self.p7,
            Rt => &mut self.rt,
            Hashing => &mut self.hashing,
            PathReads | PathFastq | PathBcl | ExperimentName => return None,
        };
        Some(value)
    }
}

impl Experiment {
    /// Placeholder values for a new experiment.
    pub fn default_values() -> Self {
        Experiment {
            path_reads: "/data".to_string(),
            experiment_name: "experiment".to_string(),
            global_p5_p7: false,
        }
    }

    /// Only the canonical columns are read from an experiment; the legacy
    /// path columns exist on import only.
    pub(crate) fn field(&self, column: SheetColumn) -> Option<&str> {
        match column {
            SheetColumn::PathReads => Some(self.path_reads.as_str()),
            SheetColumn::ExperimentName => Some(self.experiment_name.as_str()),
            _ => None,
        }
    }
}

/// When `enabled`, give every sample the p5 and p7 selection of the first.
pub fn update_global_pcr_indices(samples: &mut [Sample], enabled: bool) {
    if !enabled {
        return;
    }
    if let Some((first, rest)) = samples.split_first_mut() {
        for sample in rest {
            sample.p5.clone_from(&first.p5);
            sample.p7.clone_from(&first.p7);
        }
    }
}

/// Drop the highest plate from every sample's rt selection and return the
/// new plate count. A single plate is never removed.
pub fn remove_last_plate(samples: &mut [Sample], num_plates: usize) -> usize {
    if num_plates <= 1 {
        return num_plates;
    }
    let last = num_plates - 1;
    for sample in samples {
        sample.rt = remove_plate(&sample.rt, last);
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_with(p5: &str, p7: &str, rt: &str) -> Sample {
        Sample {
            p5: p5.to_string(),
            p7: p7.to_string(),
            rt: rt.to_string(),
            ..Sample::default()
        }
    }

    #[test]
    fn test_default_values() {
        assert_eq!(
            Sample::default_values(),
            Sample {
                sample_name: "sample1".to_string(),
                species: "mouse".to_string(),
                n_expected_cells: "100".to_string(),
                p5: String::new(),
                p7: String::new(),
                rt: String::new(),
                hashing: String::new(),
            }
        );
        assert_eq!(
            Experiment::default_values(),
            Experiment {
                path_reads: "/data".to_string(),
                experiment_name: "experiment".to_string(),
                global_p5_p7: false,
            }
        );
    }

    #[test]
    fn test_blank_values() {
        let sample = Sample::default();
        assert!(sample.sample_name.is_empty() && sample.species.is_empty());
        assert!(sample.n_expected_cells.is_empty() && sample.hashing.is_empty());
        assert!(sample.p5.is_empty() && sample.p7.is_empty() && sample.rt.is_empty());
        assert_eq!(
            Experiment::default(),
            Experiment {
                path_reads: String::new(),
                experiment_name: String::new(),
                global_p5_p7: false,
            }
        );
    }

    #[test]
    fn test_cells_per_well() {
        let mut sample = sample_with("", "", "P01-A01:P01-A03");
        sample.n_expected_cells = "100".to_string();
        assert_eq!(sample.cells_per_well(), Some(33));

        sample.rt = "P01-A01,P02-A01:P02-H01".to_string();
        assert_eq!(sample.cells_per_well(), Some(11));

        sample.rt.clear();
        assert_eq!(sample.cells_per_well(), None);

        sample.rt = "P01-A01".to_string();
        sample.n_expected_cells = "lots".to_string();
        assert_eq!(sample.cells_per_well(), None);
    }

    #[test]
    fn test_selection_by_kind() {
        let mut sample = sample_with("A01", "B01", "P01-C01");
        assert_eq!(sample.selection(SeqType::P7), "B01");
        sample.selection_mut(SeqType::Rt).push_str(",P01-D01");
        assert_eq!(sample.rt, "P01-C01,P01-D01");
    }

    #[test]
    fn test_remove_last_plate_single_plate() {
        let mut samples = vec![sample_with("", "", "P01-A01"), Sample::default()];
        assert_eq!(remove_last_plate(&mut samples, 1), 1);
        assert_eq!(samples[0].rt, "P01-A01");
        assert_eq!(samples[1].rt, "");
    }

    #[test]
    fn test_remove_last_plate() {
        let mut samples = vec![
            sample_with("", "", "P01-A01,P03-B02,P02-C03"),
            sample_with("", "", "P03-A01:P03-A02,P01-H12"),
        ];
        assert_eq!(remove_last_plate(&mut samples, 3), 2);
        assert_eq!(samples[0].rt, "P01-A01,P02-C03");
        assert_eq!(samples[1].rt, "P01-H12");
    }

    #[test]
    fn test_update_global_pcr_indices() {
        let mut samples = vec![
            sample_with("A01", "B01", ""),
            sample_with("A02", "B02", ""),
            sample_with("A03", "B03", ""),
        ];
        update_global_pcr_indices(&mut samples, false);
        assert_eq!(samples[1].p5, "A02");
        assert_eq!(samples[1].p7, "B02");

        update_global_pcr_indices(&mut samples, true);
        for sample in &samples[1..] {
            assert_eq!(sample.p5, "A01");
            assert_eq!(sample.p7, "B01");
        }
    }
}
