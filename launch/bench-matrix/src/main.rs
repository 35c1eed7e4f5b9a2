// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;

mod flags;
use flags::Flags;

fn main() -> anyhow::Result<()> {
    dynamo_bench_matrix::logging::init();

    let flags = Flags::parse();
    let config = flags.into_config()?;
    tracing::debug!(%config, "matrix configuration");

    let records = dynamo_bench_matrix::generate(&config)?;
    dynamo_bench_matrix::write_records(std::io::stdout().lock(), &records)?;
    Ok(())
}
