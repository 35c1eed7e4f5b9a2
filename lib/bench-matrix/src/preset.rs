// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Typed view of a single benchmark preset.
//!
//! Every field is optional at the deserialization layer. Absence is reported
//! as a [`MatrixError::MissingField`] by the accessors below. `bmk-space` is
//! kept as raw YAML and only typed once its seq-len config is expanded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MatrixError, MissingField};

/// An opaque scalar copied verbatim into every run record.
pub type Scalar = Value;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Preset {
    #[serde(default)]
    pub image: Option<Scalar>,
    #[serde(default)]
    pub model: Option<Scalar>,
    #[serde(default)]
    pub precision: Option<Scalar>,
    #[serde(default)]
    pub framework: Option<Scalar>,
    #[serde(default)]
    pub runner: Option<Scalar>,
    #[serde(default)]
    pub seq_len_configs: Option<Vec<SeqLenConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SeqLenConfig {
    #[serde(default)]
    pub isl: Option<u64>,
    #[serde(default)]
    pub osl: Option<u64>,
    #[serde(default)]
    pub bmk_space: Option<serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BmkSpaceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conc_start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conc_end: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ep: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp_attn: Option<Scalar>,
}

/// The five scalar fields shared by every record of a preset.
#[derive(Debug, Clone, PartialEq)]
pub struct RunTarget {
    pub image: Scalar,
    pub model: Scalar,
    pub precision: Scalar,
    pub framework: Scalar,
    pub runner: Scalar,
}

/// Input and output lengths of an expanded seq-len config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceLengths {
    pub isl: u64,
    pub osl: u64,
    pub max_model_len: u64,
}

impl SequenceLengths {
    pub fn new(key: &str, isl: u64, osl: u64) -> Result<Self, MatrixError> {
        let max_model_len = isl
            .checked_add(osl)
            .ok_or_else(|| MatrixError::ModelLenOverflow {
                key: key.to_string(),
                isl,
                osl,
            })?;
        Ok(SequenceLengths {
            isl,
            osl,
            max_model_len,
        })
    }
}

/// A bmk-space entry with its required fields checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelismSweep {
    pub tp: Scalar,
    pub conc_start: u64,
    pub conc_end: u64,
    pub ep: Option<Scalar>,
    pub dp_attn: Option<Scalar>,
}

impl Preset {
    /// Deserialize the raw YAML value stored under `key`.
    pub fn from_yaml(key: &str, value: serde_yaml::Value) -> Result<Self, MatrixError> {
        serde_yaml::from_value(value).map_err(|source| MatrixError::InvalidPreset {
            key: key.to_string(),
            source,
        })
    }

    /// Sequence-length configs, which must be present and non-empty.
    pub fn seq_len_configs(&self, key: &str) -> Result<&[SeqLenConfig], MatrixError> {
        match self.seq_len_configs.as_deref() {
            Some(configs) if !configs.is_empty() => Ok(configs),
            _ => Err(MatrixError::missing(key, MissingField::SeqLenConfigs)),
        }
    }

    /// All five scalar fields, or a single error if any one is absent.
    pub fn run_target(&self, key: &str) -> Result<RunTarget, MatrixError> {
        match (
            &self.image,
            &self.model,
            &self.precision,
            &self.framework,
            &self.runner,
        ) {
            (Some(image), Some(model), Some(precision), Some(framework), Some(runner)) => {
                Ok(RunTarget {
                    image: image.clone(),
                    model: model.clone(),
                    precision: precision.clone(),
                    framework: framework.clone(),
                    runner: runner.clone(),
                })
            }
            _ => Err(MatrixError::missing(key, MissingField::PresetFields)),
        }
    }
}

impl SeqLenConfig {
    pub fn lengths(&self, key: &str) -> Result<(u64, u64), MatrixError> {
        match (self.isl, self.osl) {
            (Some(isl), Some(osl)) => Ok((isl, osl)),
            _ => Err(MatrixError::missing(key, MissingField::SequenceLengths)),
        }
    }

    /// Typed bmk-space entries. Absent, null and empty sequences are missing.
    pub fn bmk_space(&self, key: &str) -> Result<Vec<BmkSpaceEntry>, MatrixError> {
        match &self.bmk_space {
            None | Some(serde_yaml::Value::Null) => {
                Err(MatrixError::missing(key, MissingField::BmkSpace))
            }
            Some(serde_yaml::Value::Sequence(entries)) if entries.is_empty() => {
                Err(MatrixError::missing(key, MissingField::BmkSpace))
            }
            Some(raw) => serde_yaml::from_value(raw.clone()).map_err(|source| {
                MatrixError::InvalidPreset {
                    key: key.to_string(),
                    source,
                }
            }),
        }
    }
}

impl BmkSpaceEntry {
    pub fn sweep(&self, key: &str) -> Result<ParallelismSweep, MatrixError> {
        match (&self.tp, self.conc_start, self.conc_end) {
            (Some(tp), Some(conc_start), Some(conc_end)) => Ok(ParallelismSweep {
                tp: tp.clone(),
                conc_start,
                conc_end,
                ep: self.ep.clone(),
                dp_attn: self.dp_attn.clone(),
            }),
            _ => Err(MatrixError::missing(key, MissingField::BmkEntry)),
        }
    }
}
