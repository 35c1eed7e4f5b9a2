// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Benchmark matrix generation.
//!
//! Expands a named preset from one or more YAML configuration files into the
//! flat list of benchmark runs consumed by the CI job matrix: one run per
//! sequence-length config, bmk-space entry and concurrency point.

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod preset;
pub mod record;
pub mod seq_len;
pub mod sweep;

pub use config::{MatrixConfig, MatrixConfigBuilder};
pub use error::{MatrixError, MissingField};
pub use loader::MergedConfig;
pub use preset::Preset;
pub use record::{RunRecord, write_records};
pub use seq_len::{SeqLenAlias, SeqLenFilter};
pub use sweep::{ConcurrencySweep, DEFAULT_STEP_SIZE, expand_preset};

/// Load the configured files, resolve the preset and expand it.
///
/// Either every run is returned or the first error encountered; there is no
/// partial result.
#[tracing::instrument(level = "debug", skip_all, fields(key = %config.key))]
pub fn generate(config: &MatrixConfig) -> Result<Vec<RunRecord>, MatrixError> {
    sweep::validate_step_size(config.step_size)?;

    let merged = MergedConfig::load(&config.config_files)?;
    let preset = merged.resolve(&config.key)?;
    let filter = config.seq_len_filter();
    let records = expand_preset(&config.key, &preset, filter.as_ref(), config.step_size)?;

    tracing::info!(
        key = %config.key,
        presets = merged.len(),
        runs = records.len(),
        "generated benchmark matrix"
    );
    Ok(records)
}
