// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;
use crate::preset::{ParallelismSweep, RunTarget, Scalar, SequenceLengths};

/// One concrete benchmark run consumed by the CI job matrix.
///
/// `ep` and `dp-attn` are left out of the serialized object entirely when
/// the bmk-space entry did not set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunRecord {
    pub image: Scalar,
    pub model: Scalar,
    pub precision: Scalar,
    pub framework: Scalar,
    pub runner: Scalar,
    pub isl: u64,
    pub osl: u64,
    pub tp: Scalar,
    pub conc: u64,
    pub max_model_len: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ep: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp_attn: Option<Scalar>,
}

impl RunRecord {
    pub fn new(
        target: &RunTarget,
        lengths: &SequenceLengths,
        sweep: &ParallelismSweep,
        conc: u64,
    ) -> Self {
        RunRecord {
            image: target.image.clone(),
            model: target.model.clone(),
            precision: target.precision.clone(),
            framework: target.framework.clone(),
            runner: target.runner.clone(),
            isl: lengths.isl,
            osl: lengths.osl,
            tp: sweep.tp.clone(),
            conc,
            max_model_len: lengths.max_model_len,
            ep: sweep.ep.clone(),
            dp_attn: sweep.dp_attn.clone(),
        }
    }
}

/// Write `records` as a single JSON array followed by a newline.
pub fn write_records<W: Write>(mut writer: W, records: &[RunRecord]) -> Result<(), MatrixError> {
    serde_json::to_writer(&mut writer, records)?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(serde_json::Error::io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(ep: Option<Scalar>, dp_attn: Option<Scalar>) -> RunRecord {
        let target = RunTarget {
            image: json!("nvcr.io/nvidia/tensorrt-llm/release:1.1.0"),
            model: json!("nvidia/DeepSeek-R1-FP4"),
            precision: json!("fp4"),
            framework: json!("trt"),
            runner: json!("b200"),
        };
        let sweep = ParallelismSweep {
            tp: json!(8),
            conc_start: 4,
            conc_end: 4,
            ep,
            dp_attn,
        };
        let lengths = SequenceLengths::new("test", 1024, 8192).unwrap();
        RunRecord::new(&target, &lengths, &sweep, 4)
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let value = serde_json::to_value(record(None, None)).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("ep"));
        assert!(!object.contains_key("dp-attn"));
        assert_eq!(object["max-model-len"], json!(9216));
        assert_eq!(object.len(), 10);
    }

    #[test]
    fn test_optional_fields_are_copied() {
        let value = serde_json::to_value(record(Some(json!(4)), Some(json!(false)))).unwrap();
        assert_eq!(value["ep"], json!(4));
        assert_eq!(value["dp-attn"], json!(false));
    }

    #[test]
    fn test_write_records_field_order() {
        let mut out = Vec::new();
        write_records(&mut out, &[record(Some(json!(8)), None)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"[{"image":"nvcr.io/nvidia/tensorrt-llm/release:1.1.0","#,
                r#""model":"nvidia/DeepSeek-R1-FP4","precision":"fp4","framework":"trt","#,
                r#""runner":"b200","isl":1024,"osl":8192,"tp":8,"conc":4,"#,
                r#""max-model-len":9216,"ep":8}]"#,
                "\n"
            )
        );
    }

    #[test]
    fn test_write_empty_matrix() {
        let mut out = Vec::new();
        write_records(&mut out, &[]).unwrap();
        assert_eq!(out, b"[]\n");
    }
}
