// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Loading and merging of benchmark configuration files.
//!
//! Each file maps preset names to preset bodies. Files are merged in the
//! order given; a preset name may only be introduced once across all files.
//! Preset bodies stay as raw YAML until one is selected, so presets other
//! than the requested one are never validated.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::MatrixError;
use crate::preset::Preset;

/// Presets from one or more configuration files, keyed by preset name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedConfig {
    presets: BTreeMap<String, Value>,
}

impl MergedConfig {
    /// Load and merge `paths` left to right.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, MatrixError> {
        let mut merged = MergedConfig::default();
        for path in paths {
            let path = path.as_ref();
            let document = read_document(path)?;
            merged.merge_document(path, document)?;
        }
        Ok(merged)
    }

    /// Merge one parsed document into the accumulated presets.
    ///
    /// Fails without modifying `self` if any key is already present, naming
    /// `path` as the duplicating file.
    pub fn merge_document(&mut self, path: &Path, document: Mapping) -> Result<(), MatrixError> {
        let mut incoming = BTreeMap::new();
        for (key, value) in document {
            let Value::String(key) = key else {
                return Err(MatrixError::NonStringKey {
                    path: path.to_path_buf(),
                });
            };
            incoming.insert(key, value);
        }

        let duplicates: Vec<String> = incoming
            .keys()
            .filter(|key| self.presets.contains_key(*key))
            .cloned()
            .collect();
        if !duplicates.is_empty() {
            return Err(MatrixError::DuplicateKeys {
                path: path.to_path_buf(),
                keys: duplicates,
            });
        }

        tracing::debug!(path = %path.display(), presets = incoming.len(), "merged config file");
        self.presets.extend(incoming);
        Ok(())
    }

    /// Preset names in lexicographic order.
    pub fn keys(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Look up and deserialize the preset stored under `key`.
    pub fn resolve(&self, key: &str) -> Result<Preset, MatrixError> {
        let value = self
            .presets
            .get(key)
            .ok_or_else(|| MatrixError::KeyNotFound {
                key: key.to_string(),
                available: self.keys(),
            })?;
        Preset::from_yaml(key, value.clone())
    }
}

/// Read a file and check that its top level is a mapping.
pub fn read_document(path: &Path) -> Result<Mapping, MatrixError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => MatrixError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => MatrixError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse_document(path, &text)
}

fn parse_document(path: &Path, text: &str) -> Result<Mapping, MatrixError> {
    if text.trim().is_empty() {
        return Err(MatrixError::NotAMapping {
            path: path.to_path_buf(),
        });
    }
    let value: Value = serde_yaml::from_str(text).map_err(|source| MatrixError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(MatrixError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}
