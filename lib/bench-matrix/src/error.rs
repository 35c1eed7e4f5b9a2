// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use strum::Display;

/// Which group of required fields was found missing.
///
/// The preset scalar fields are checked as a single unit, so a failure does
/// not say which of the five was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MissingField {
    #[strum(serialize = "'seq-len-configs'")]
    SeqLenConfigs,

    #[strum(serialize = "required fields (image, model, precision, framework, runner)")]
    PresetFields,

    #[strum(serialize = "'isl' or 'osl' in seq-len-config")]
    SequenceLengths,

    #[strum(serialize = "'bmk-space' in seq-len-config")]
    BmkSpace,

    #[strum(serialize = "'tp', 'conc-start', or 'conc-end' in bmk-space")]
    BmkEntry,
}

/// Errors raised while loading, validating or expanding a benchmark matrix.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("Input file '{}' does not exist.", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read input file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config file '{}' must contain a mapping", path.display())]
    NotAMapping { path: PathBuf },

    #[error("Config file '{}' has a top-level key that is not a string", path.display())]
    NonStringKey { path: PathBuf },

    #[error(
        "Duplicate configuration keys found in '{}': {}",
        path.display(),
        keys.join(", ")
    )]
    DuplicateKeys { path: PathBuf, keys: Vec<String> },

    #[error(
        "Key '{key}' not found in configuration files. Available keys: {}",
        available.join(", ")
    )]
    KeyNotFound { key: String, available: Vec<String> },

    #[error("Invalid configuration for key '{key}': {source}")]
    InvalidPreset {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Missing {field} for key '{key}'")]
    MissingField { key: String, field: MissingField },

    #[error("Step size must be at least 2, got {step_size}")]
    InvalidStepSize { step_size: u64 },

    #[error("Concurrency range {start}..={end} cannot grow from zero")]
    StalledConcurrency { start: u64, end: u64 },

    #[error("Invalid bmk-space entry for key '{key}': {source}")]
    InvalidBmkEntry {
        key: String,
        #[source]
        source: Box<MatrixError>,
    },

    #[error("max-model-len overflows for key '{key}': isl {isl} + osl {osl}")]
    ModelLenOverflow { key: String, isl: u64, osl: u64 },

    #[error("Failed to write benchmark matrix: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl MatrixError {
    pub(crate) fn missing(key: &str, field: MissingField) -> Self {
        MatrixError::MissingField {
            key: key.to_string(),
            field,
        }
    }
}
