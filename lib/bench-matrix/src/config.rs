// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::seq_len::{SeqLenAlias, SeqLenFilter};
use crate::sweep::DEFAULT_STEP_SIZE;

pub mod environment_names;

use environment_names::logging as env_logging;

/// Inputs for a single matrix generation.
#[derive(Serialize, Deserialize, Validate, Debug, Builder, Clone, PartialEq)]
#[builder(build_fn(private, name = "build_internal"), derive(Debug))]
pub struct MatrixConfig {
    /// Configuration files merged left to right. At least one is required.
    #[validate(length(min = 1))]
    #[builder(setter(into))]
    pub config_files: Vec<PathBuf>,

    /// Preset to expand
    #[builder(setter(into))]
    pub key: String,

    /// Sequence-length scenarios to keep. Empty keeps all of them.
    #[builder(default)]
    pub seq_lens: Vec<SeqLenAlias>,

    /// Multiplicative growth between concurrency points. Must be at least 2,
    /// otherwise the sweep would never reach `conc-end`.
    #[validate(range(min = 2))]
    #[builder(default = "DEFAULT_STEP_SIZE")]
    pub step_size: u64,
}

impl MatrixConfig {
    pub fn builder() -> MatrixConfigBuilder {
        MatrixConfigBuilder::default()
    }

    /// Filter for the selected sequence lengths, `None` if every config is kept.
    pub fn seq_len_filter(&self) -> Option<SeqLenFilter> {
        SeqLenFilter::from_aliases(&self.seq_lens)
    }
}

impl fmt::Display for MatrixConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key={}, ", self.key)?;
        write!(f, "config_files={:?}, ", self.config_files)?;
        if self.seq_lens.is_empty() {
            write!(f, "seq_lens=all, ")?;
        } else {
            let names: Vec<String> = self.seq_lens.iter().map(|s| s.to_string()).collect();
            write!(f, "seq_lens={}, ", names.join(","))?;
        }
        write!(f, "step_size={}", self.step_size)
    }
}

impl MatrixConfigBuilder {
    /// Build and validate the matrix configuration
    pub fn build(&self) -> Result<MatrixConfig> {
        let config = self.build_internal()?;
        config.validate()?;
        Ok(config)
    }
}

/// Check if a string is truthy
/// Truthy values: "1", "true", "on", "yes" (case-insensitive)
pub fn is_truthy(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "1" | "true" | "on" | "yes")
}

/// Check if an environment variable is truthy. Unset counts as false.
pub fn env_is_truthy(env: &str) -> bool {
    match std::env::var(env) {
        Ok(val) => is_truthy(val.as_str()),
        Err(_) => false,
    }
}

/// Check whether JSONL logging is enabled
/// Set the `DYN_LOGGING_JSONL` environment variable a [`is_truthy`] value
pub fn jsonl_logging_enabled() -> bool {
    env_is_truthy(env_logging::DYN_LOGGING_JSONL)
}

/// Check whether logging with ANSI terminal escape codes and colors is disabled.
/// Set the `DYN_SDK_DISABLE_ANSI_LOGGING` environment variable a [`is_truthy`] value
pub fn disable_ansi_logging() -> bool {
    env_is_truthy(env_logging::DYN_SDK_DISABLE_ANSI_LOGGING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = MatrixConfig::builder()
            .config_files(vec![PathBuf::from("configs/nvidia-master.yaml")])
            .key("dsr1-fp4-b200-sglang")
            .build()
            .unwrap();
        assert_eq!(config.step_size, DEFAULT_STEP_SIZE);
        assert!(config.seq_lens.is_empty());
        assert!(config.seq_len_filter().is_none());
    }

    #[test]
    fn test_builder_rejects_small_step_size() {
        let result = MatrixConfig::builder()
            .config_files(vec![PathBuf::from("a.yaml")])
            .key("k")
            .step_size(1)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_requires_config_files() {
        let empty = MatrixConfig::builder()
            .config_files(Vec::<PathBuf>::new())
            .key("k")
            .build();
        assert!(empty.is_err());

        let unset = MatrixConfig::builder().key("k").build();
        assert!(unset.is_err());
    }

    #[test]
    fn test_display() {
        let config = MatrixConfig::builder()
            .config_files(vec![PathBuf::from("a.yaml")])
            .key("k")
            .seq_lens(vec![SeqLenAlias::Isl1kOsl1k, SeqLenAlias::Isl8kOsl1k])
            .step_size(4u64)
            .build()
            .unwrap();
        assert_eq!(
            config.to_string(),
            r#"key=k, config_files=["a.yaml"], seq_lens=1k1k,8k1k, step_size=4"#
        );
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("random"));

        temp_env::with_vars(vec![(env_logging::DYN_LOGGING_JSONL, Some("on"))], || {
            assert!(jsonl_logging_enabled());
        });
        temp_env::with_vars(
            vec![(env_logging::DYN_SDK_DISABLE_ANSI_LOGGING, None::<&str>)],
            || {
                assert!(!disable_ansi_logging());
            },
        );
    }
}
