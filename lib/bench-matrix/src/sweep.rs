// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Expansion of a preset into concrete benchmark runs.
//!
//! Sequence-length configs are walked in order, then their bmk-space entries,
//! then the geometric concurrency points of each entry. Output order follows
//! that nesting exactly.

use crate::error::MatrixError;
use crate::preset::{ParallelismSweep, Preset, RunTarget, SequenceLengths};
use crate::record::RunRecord;
use crate::seq_len::SeqLenFilter;

/// Default multiplicative growth between concurrency points.
pub const DEFAULT_STEP_SIZE: u64 = 2;

/// Geometric walk from `conc-start` to `conc-end`, inclusive on both ends.
///
/// Each point is the previous one times the step size, clamped to the end
/// of the range. A range with `start > end` yields nothing.
#[derive(Debug, Clone)]
pub struct ConcurrencySweep {
    next: Option<u64>,
    end: u64,
    step_size: u64,
}

impl ConcurrencySweep {
    pub fn new(start: u64, end: u64, step_size: u64) -> Result<Self, MatrixError> {
        validate_step_size(step_size)?;
        if start == 0 && end > 0 {
            return Err(MatrixError::StalledConcurrency { start, end });
        }
        Ok(ConcurrencySweep {
            next: (start <= end).then_some(start),
            end,
            step_size,
        })
    }
}

impl Iterator for ConcurrencySweep {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let conc = self.next?;
        self.next = if conc >= self.end {
            None
        } else {
            Some(conc.saturating_mul(self.step_size).min(self.end))
        };
        Some(conc)
    }
}

pub fn validate_step_size(step_size: u64) -> Result<(), MatrixError> {
    if step_size < 2 {
        return Err(MatrixError::InvalidStepSize { step_size });
    }
    Ok(())
}

/// Expand `preset` into run records.
///
/// Validation is interleaved with expansion: the first missing field aborts
/// the whole expansion and no partial result is returned.
pub fn expand_preset(
    key: &str,
    preset: &Preset,
    filter: Option<&SeqLenFilter>,
    step_size: u64,
) -> Result<Vec<RunRecord>, MatrixError> {
    validate_step_size(step_size)?;

    let seq_len_configs = preset.seq_len_configs(key)?;
    let target = preset.run_target(key)?;

    let mut records = Vec::new();
    for seq_config in seq_len_configs {
        let (isl, osl) = seq_config.lengths(key)?;

        if filter.is_some_and(|filter| !filter.allows(isl, osl)) {
            tracing::debug!(key, isl, osl, "skipping filtered seq-len-config");
            continue;
        }
        let lengths = SequenceLengths::new(key, isl, osl)?;

        for entry in seq_config.bmk_space(key)? {
            let sweep = entry.sweep(key)?;
            let before = records.len();
            expand_entry(&target, &lengths, &sweep, step_size, &mut records).map_err(
                |source| MatrixError::InvalidBmkEntry {
                    key: key.to_string(),
                    source: Box::new(source),
                },
            )?;
            tracing::debug!(
                key,
                isl,
                osl,
                tp = %sweep.tp,
                conc_start = sweep.conc_start,
                conc_end = sweep.conc_end,
                runs = records.len() - before,
                "expanded bmk-space entry"
            );
        }
    }
    Ok(records)
}

fn expand_entry(
    target: &RunTarget,
    lengths: &SequenceLengths,
    sweep: &ParallelismSweep,
    step_size: u64,
    records: &mut Vec<RunRecord>,
) -> Result<(), MatrixError> {
    for conc in ConcurrencySweep::new(sweep.conc_start, sweep.conc_end, step_size)? {
        records.push(RunRecord::new(target, lengths, sweep, conc));
    }
    Ok(())
}
