use crate::{Experiment, Sample};
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Values used for new sheets and sheet checks, read from a toml file.
/// Missing keys keep their defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Name of the first new sample. Trailing digits are replaced by the
    /// sample number.
    pub default_sample_name: String,
    /// Species of a new sample.
    pub default_species: String,
    /// Expected cells of a new sample.
    pub default_n_expected_cells: String,
    /// Read directory of a new experiment.
    pub default_path_reads: String,
    /// Name of a new experiment.
    pub default_experiment_name: String,
    /// Most rt plates a sheet may use. A plate prefix has two digits.
    pub max_plates: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        let sample = Sample::default_values();
        let experiment = Experiment::default_values();
        Parameters {
            default_sample_name: sample.sample_name,
            default_species: sample.species,
            default_n_expected_cells: sample.n_expected_cells,
            default_path_reads: experiment.path_reads,
            default_experiment_name: experiment.experiment_name,
            max_plates: 99,
        }
    }
}

macro_rules! warn_non_default {
    ($params:expr, $defaults:expr, $($field:ident),+) => {
        $(
            if $params.$field != $defaults.$field {
                warn!("using non-default {} = {:?}", stringify!($field), $params.$field);
            }
        )+
    };
}

impl Parameters {
    /// Read parameters from `path`. Without a path, or when the file does not
    /// exist, the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            warn!(
                "could not find {}, falling back to default parameters",
                path.display()
            );
            return Ok(Self::default());
        }
        let s = std::fs::read_to_string(path).with_context(|| path.display().to_string())?;
        let params: Parameters =
            toml::from_str(&s).with_context(|| path.display().to_string())?;
        warn_non_default!(
            params,
            Self::default(),
            default_sample_name,
            default_species,
            default_n_expected_cells,
            default_path_reads,
            default_experiment_name,
            max_plates
        );
        Ok(params)
    }

    /// The sample added as number `index` (zero-based) of a new sheet.
    pub fn new_sample(&self, index: usize) -> Sample {
        let stem = self
            .default_sample_name
            .trim_end_matches(|c: char| c.is_ascii_digit());
        Sample {
            sample_name: format!("{stem}{}", index + 1),
            species: self.default_species.clone(),
            n_expected_cells: self.default_n_expected_cells.clone(),
            ..Sample::default()
        }
    }

    /// The experiment of a new sheet.
    pub fn new_experiment(&self) -> Experiment {
        Experiment {
            path_reads: self.default_path_reads.clone(),
            experiment_name: self.default_experiment_name.clone(),
            global_p5_p7: false,
        }
    }
}
