use crate::sheet::SampleSheet;
use plate_map::{check_selection, SelectionError, SeqType, Well};
use strum::IntoEnumIterator;
use thiserror::Error;

/// Something in a sheet the forgiving parser would silently drop or accept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetProblem {
    /// A selection stops parsing before its end.
    #[error("sample '{sample}': {kind} selection '{selection}': {source}")]
    Selection {
        /// Sample name
        sample: String,
        /// Kind of the broken selection
        kind: SeqType,
        /// The selection as written
        selection: String,
        /// First problem found in it
        source: SelectionError,
    },

    /// Two samples share an rt well.
    #[error("samples '{first}' and '{second}' both select rt well {well} on plate {}", .plate + 1)]
    Overlap {
        /// Name of the first sample
        first: String,
        /// Name of the second sample
        second: String,
        /// Zero-based plate
        plate: usize,
        /// The shared well
        well: Well,
    },

    /// The sheet spans more plates than allowed.
    #[error("sheet uses {num_plates} rt plates, at most {max_plates} are allowed")]
    TooManyPlates {
        /// Plates the sheet uses
        num_plates: usize,
        /// Configured maximum
        max_plates: usize,
    },
}

/// Every problem found in `sheet`, selections first, in sample order.
pub fn check_sheet(sheet: &SampleSheet, max_plates: usize) -> Vec<SheetProblem> {
    let mut problems = Vec::new();
    for sample in &sheet.samples {
        for kind in SeqType::iter() {
            let selection = sample.selection(kind);
            if let Err(source) = check_selection(selection, kind) {
                problems.push(SheetProblem::Selection {
                    sample: sample.sample_name.clone(),
                    kind,
                    selection: selection.to_string(),
                    source,
                });
            }
        }
    }

    let name = |i: usize| sheet.samples[i].sample_name.clone();
    problems.extend(
        sheet
            .overlaps(SeqType::Rt)
            .into_iter()
            .map(|overlap| SheetProblem::Overlap {
                first: name(overlap.samples.0),
                second: name(overlap.samples.1),
                plate: overlap.plate,
                well: overlap.well,
            }),
    );

    if sheet.num_plates > max_plates {
        problems.push(SheetProblem::TooManyPlates {
            num_plates: sheet.num_plates,
            max_plates,
        });
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Experiment, Sample};
    use pretty_assertions::assert_eq;

    fn sheet(samples: &[(&str, &str, &str)], num_plates: usize) -> SampleSheet {
        SampleSheet {
            experiment: Experiment::default_values(),
            samples: samples
                .iter()
                .map(|&(name, p5, rt)| Sample {
                    sample_name: name.to_string(),
                    p5: p5.to_string(),
                    rt: rt.to_string(),
                    ..Sample::default_values()
                })
                .collect(),
            num_plates,
        }
    }

    #[test]
    fn test_clean_sheet() {
        let sheet = sheet(
            &[("a", "A01", "P01-A01:P01-A06"), ("b", "A01", "P01-B01,P02-A01")],
            2,
        );
        assert!(check_sheet(&sheet, 99).is_empty());
    }

    #[test]
    fn test_problems() {
        let sheet = sheet(
            &[
                ("a", "A01,Z01", "P01-A01:P01-A06"),
                ("b", "", "P01-A06,PX-B01"),
                ("c", "", "P01-C01"),
            ],
            3,
        );
        let problems = check_sheet(&sheet, 2);
        assert_eq!(
            problems,
            vec![
                SheetProblem::Selection {
                    sample: "a".to_string(),
                    kind: SeqType::P5,
                    selection: "A01,Z01".to_string(),
                    source: SelectionError::InvalidWell {
                        region: 2,
                        token: "Z01".to_string(),
                        kind: SeqType::P5,
                    },
                },
                SheetProblem::Selection {
                    sample: "b".to_string(),
                    kind: SeqType::Rt,
                    selection: "P01-A06,PX-B01".to_string(),
                    source: SelectionError::InvalidPlate {
                        region: 2,
                        token: "PX-B01".to_string(),
                    },
                },
                SheetProblem::Overlap {
                    first: "a".to_string(),
                    second: "b".to_string(),
                    plate: 0,
                    well: Well::new(0, 5).unwrap(),
                },
                SheetProblem::TooManyPlates {
                    num_plates: 3,
                    max_plates: 2,
                },
            ]
        );
        assert_eq!(
            problems[2].to_string(),
            "samples 'a' and 'b' both select rt well A06 on plate 1"
        );
    }

    #[test]
    fn test_shared_pcr_wells_are_fine() {
        let sheet = sheet(&[("a", "A01:H01", "P01-A01"), ("b", "A01:H01", "P01-A02")], 1);
        assert!(check_sheet(&sheet, 99).is_empty());
    }
}
