//!
//! Tab-separated sample sheets.
//!
//! One header line, then one line per sample carrying both the experiment
//! and the sample fields. Columns may come in any order on import; export
//! always writes [`SheetColumn::EXPORT_ORDER`].
//!
use crate::sheet::SampleSheet;
use crate::{Experiment, Sample};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use itertools::Itertools;
use log::debug;
use plate_map::{concat_selections, count_plates};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

/// A recognized sheet column.
#[derive(EnumString, Display, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SheetColumn {
    /// Directory holding the reads
    #[strum(to_string = "path_reads")]
    PathReads,
    /// Legacy name of `path_reads`, preferred over `path_bcl`
    #[strum(to_string = "path_fastq")]
    PathFastq,
    /// Legacy name of `path_reads`
    #[strum(to_string = "path_bcl")]
    PathBcl,
    /// Experiment name
    #[strum(to_string = "experiment_name")]
    ExperimentName,
    /// Sample name
    #[strum(to_string = "sample_name")]
    SampleName,
    /// Species
    #[strum(to_string = "species")]
    Species,
    /// Expected number of cells
    #[strum(to_string = "n_expected_cells")]
    NExpectedCells,
    /// p5 selection
    #[strum(to_string = "p5")]
    P5,
    /// p7 selection
    #[strum(to_string = "p7")]
    P7,
    /// rt selection
    #[strum(to_string = "rt")]
    Rt,
    /// Hashing
    #[strum(to_string = "hashing")]
    Hashing,
}

impl SheetColumn {
    /// Columns written on export, in order.
    pub const EXPORT_ORDER: [SheetColumn; 9] = [
        SheetColumn::PathReads,
        SheetColumn::ExperimentName,
        SheetColumn::SampleName,
        SheetColumn::Species,
        SheetColumn::NExpectedCells,
        SheetColumn::P5,
        SheetColumn::P7,
        SheetColumn::Rt,
        SheetColumn::Hashing,
    ];

    /// Columns that can supply `path_reads`, most preferred first.
    const PATH_COLUMNS: [SheetColumn; 3] = [
        SheetColumn::PathReads,
        SheetColumn::PathFastq,
        SheetColumn::PathBcl,
    ];

    fn from_header(header: &str) -> Option<Self> {
        header.trim().to_ascii_lowercase().parse().ok()
    }
}

/// The sample and experiment carried by one sheet line.
struct Row {
    sample: Sample,
    experiment: Experiment,
}

impl Row {
    /// Fields missing from the end of a short line stay blank. A column
    /// repeated in the header takes the value of its last occurrence.
    fn from_record(columns: &[Option<SheetColumn>], record: &StringRecord) -> Self {
        let mut sample = Sample::default();
        let mut experiment = Experiment::default();
        let mut paths: [Option<&str>; 3] = [None; 3];

        for (column, value) in columns.iter().zip(record.iter()) {
            let Some(column) = *column else {
                continue;
            };
            if let Some(rank) = SheetColumn::PATH_COLUMNS.iter().position(|&c| c == column) {
                paths[rank] = Some(value);
            } else if column == SheetColumn::ExperimentName {
                experiment.experiment_name = value.to_string();
            } else if let Some(field) = sample.field_mut(column) {
                *field = value.to_string();
            }
        }
        experiment.path_reads = paths
            .into_iter()
            .flatten()
            .find(|path| !path.is_empty())
            .unwrap_or_default()
            .to_string();

        Row { sample, experiment }
    }

    /// Rows that agree on this key describe the same sample.
    fn merge_key(&self) -> (Sample, String) {
        let sample = Sample {
            rt: String::new(),
            ..self.sample.clone()
        };
        (sample, self.experiment.experiment_name.clone())
    }
}

/// Read a sample sheet.
///
/// Rows that only differ in their rt selection are merged into one sample
/// whose rt selection lists every row's wells in input order. The experiment
/// is taken from the last row. Malformed rows never fail the import; an error
/// is only returned if the reader itself fails.
pub fn import_tsv(text: &str) -> Result<SampleSheet> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let columns: Vec<_> = reader
        .headers()
        .context("reading sample sheet header")?
        .iter()
        .map(SheetColumn::from_header)
        .collect();

    let mut samples: Vec<Sample> = Vec::new();
    let mut experiment = Experiment::default();
    let mut num_plates = 1;
    let mut seen: HashMap<(Sample, String), usize> = HashMap::new();

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading sample sheet row {}", line + 1))?;
        let row = Row::from_record(&columns, &record);
        num_plates = num_plates.max(count_plates(&row.sample.rt));

        match seen.entry(row.merge_key()) {
            Entry::Occupied(entry) => {
                let sample = &mut samples[*entry.get()];
                debug!(
                    "merging row {} into sample '{}'",
                    line + 1,
                    sample.sample_name
                );
                sample.rt = concat_selections(&sample.rt, &row.sample.rt);
            }
            Entry::Vacant(entry) => {
                entry.insert(samples.len());
                samples.push(row.sample);
            }
        }
        experiment = row.experiment;
    }

    experiment.global_p5_p7 = match samples.split_first() {
        Some((first, rest)) => rest
            .iter()
            .all(|s| s.p5 == first.p5 && s.p7 == first.p7),
        None => true,
    };

    Ok(SampleSheet {
        experiment,
        samples,
        num_plates,
    })
}

/// Write a sample sheet. Every line overlays the experiment's fields onto
/// the sample's; with `global_p5_p7` set, every line carries the first
/// sample's p5 and p7.
pub fn export_tsv(experiment: &Experiment, samples: &[Sample]) -> String {
    let header = SheetColumn::EXPORT_ORDER.iter().join("\t");
    let first = samples.first();
    let lines = samples.iter().map(|sample| {
        SheetColumn::EXPORT_ORDER
            .iter()
            .map(|&column| {
                let source = match (column, first) {
                    (SheetColumn::P5 | SheetColumn::P7, Some(first)) if experiment.global_p5_p7 => {
                        first
                    }
                    _ => sample,
                };
                experiment
                    .field(column)
                    .or_else(|| source.field(column))
                    .unwrap_or_default()
            })
            .join("\t")
    });
    std::iter::once(header).chain(lines).join("\n")
}
