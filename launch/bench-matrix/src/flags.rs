// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use dynamo_bench_matrix::config::environment_names::bench_matrix as env_bench_matrix;
use dynamo_bench_matrix::{DEFAULT_STEP_SIZE, MatrixConfig, SeqLenAlias};

/// Generate benchmark matrix from a specific configuration key
#[derive(clap::Parser, Debug, Clone)]
#[command(name = "bench-matrix", version, about)]
pub struct Flags {
    /// One or more configuration files (YAML format)
    #[arg(long, num_args = 1.., required = true)]
    pub config_files: Vec<PathBuf>,

    /// Configuration key to use
    #[arg(long)]
    pub key: String,

    /// Sequence length configurations to include. If not specified, all
    /// sequence lengths are included.
    #[arg(
        long,
        num_args = 1..,
        value_parser = PossibleValuesParser::new(SeqLenAlias::names().iter().copied())
            .try_map(|s| s.parse::<SeqLenAlias>()),
    )]
    pub seq_lens: Vec<SeqLenAlias>,

    /// Step size for concurrency values
    #[arg(
        long,
        env = env_bench_matrix::DYN_BENCH_MATRIX_STEP_SIZE,
        default_value_t = DEFAULT_STEP_SIZE,
        value_parser = clap::value_parser!(u64).range(2..),
    )]
    pub step_size: u64,
}

impl Flags {
    pub fn into_config(self) -> anyhow::Result<MatrixConfig> {
        MatrixConfig::builder()
            .config_files(self.config_files)
            .key(self.key)
            .seq_lens(self.seq_lens)
            .step_size(self.step_size)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_all_flags() {
        let flags = Flags::try_parse_from([
            "bench-matrix",
            "--config-files",
            "nvidia-master.yaml",
            "amd-master.yaml",
            "--key",
            "dsr1-fp8-mi355x-sglang",
            "--seq-lens",
            "1k1k",
            "8k1k",
            "--step-size",
            "4",
        ])
        .unwrap();
        assert_eq!(
            flags.config_files,
            vec![
                PathBuf::from("nvidia-master.yaml"),
                PathBuf::from("amd-master.yaml")
            ]
        );
        assert_eq!(flags.key, "dsr1-fp8-mi355x-sglang");
        assert_eq!(
            flags.seq_lens,
            vec![SeqLenAlias::Isl1kOsl1k, SeqLenAlias::Isl8kOsl1k]
        );
        assert_eq!(flags.step_size, 4);

        let config = flags.into_config().unwrap();
        assert_eq!(config.config_files.len(), 2);
        assert!(config.seq_len_filter().unwrap().allows(8192, 1024));
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            vec![(env_bench_matrix::DYN_BENCH_MATRIX_STEP_SIZE, None::<&str>)],
            || {
                let flags =
                    Flags::try_parse_from(["bench-matrix", "--config-files", "a.yaml", "--key", "k"])
                        .unwrap();
                assert!(flags.seq_lens.is_empty());
                assert_eq!(flags.step_size, DEFAULT_STEP_SIZE);
            },
        );
    }

    #[test]
    fn test_step_size_from_env() {
        temp_env::with_vars(
            vec![(env_bench_matrix::DYN_BENCH_MATRIX_STEP_SIZE, Some("8"))],
            || {
                let flags =
                    Flags::try_parse_from(["bench-matrix", "--config-files", "a.yaml", "--key", "k"])
                        .unwrap();
                assert_eq!(flags.step_size, 8);
            },
        );
    }

    #[test]
    fn test_rejects_unknown_seq_len() {
        let err = Flags::try_parse_from([
            "bench-matrix",
            "--config-files",
            "a.yaml",
            "--key",
            "k",
            "--seq-lens",
            "2k2k",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_rejects_step_size_below_two() {
        for step in ["0", "1"] {
            let err = Flags::try_parse_from([
                "bench-matrix",
                "--config-files",
                "a.yaml",
                "--key",
                "k",
                "--step-size",
                step,
            ])
            .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn test_requires_config_files_and_key() {
        let err = Flags::try_parse_from(["bench-matrix", "--key", "k"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Flags::try_parse_from(["bench-matrix", "--config-files", "a.yaml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
