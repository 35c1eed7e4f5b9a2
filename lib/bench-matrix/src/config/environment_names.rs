// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Environment variable name constants, grouped by functional area.

/// Logging environment variables
pub mod logging {
    /// Log level and per-module filters (e.g., "debug", "info,dynamo_bench_matrix=trace")
    pub const DYN_LOG: &str = "DYN_LOG";

    /// Path to logging configuration file
    pub const DYN_LOGGING_CONFIG_PATH: &str = "DYN_LOGGING_CONFIG_PATH";

    /// Enable JSONL logging format
    pub const DYN_LOGGING_JSONL: &str = "DYN_LOGGING_JSONL";

    /// Disable ANSI terminal colors in logs
    pub const DYN_SDK_DISABLE_ANSI_LOGGING: &str = "DYN_SDK_DISABLE_ANSI_LOGGING";
}

/// Benchmark matrix generation
pub mod bench_matrix {
    /// Multiplicative growth factor between concurrency points, used when
    /// `--step-size` is not given
    pub const DYN_BENCH_MATRIX_STEP_SIZE: &str = "DYN_BENCH_MATRIX_STEP_SIZE";
}
