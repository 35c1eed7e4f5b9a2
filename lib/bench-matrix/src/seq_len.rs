// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Named sequence-length scenarios and the filter built from them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

/// Short names for the (isl, osl) pairs benchmarked in CI.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
pub enum SeqLenAlias {
    #[serde(rename = "1k1k")]
    #[strum(serialize = "1k1k")]
    Isl1kOsl1k,

    #[serde(rename = "1k8k")]
    #[strum(serialize = "1k8k")]
    Isl1kOsl8k,

    #[serde(rename = "8k1k")]
    #[strum(serialize = "8k1k")]
    Isl8kOsl1k,
}

impl SeqLenAlias {
    /// Accepted alias names, in table order.
    pub fn names() -> &'static [&'static str] {
        Self::VARIANTS
    }

    /// The `(isl, osl)` pair this alias stands for.
    pub const fn lengths(self) -> (u64, u64) {
        match self {
            SeqLenAlias::Isl1kOsl1k => (1024, 1024),
            SeqLenAlias::Isl1kOsl8k => (1024, 8192),
            SeqLenAlias::Isl8kOsl1k => (8192, 1024),
        }
    }
}

/// Set of `(isl, osl)` pairs a sequence-length config must match to be expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqLenFilter {
    allowed: HashSet<(u64, u64)>,
}

impl SeqLenFilter {
    /// Returns `None` when no aliases are given, meaning every config passes.
    pub fn from_aliases(aliases: &[SeqLenAlias]) -> Option<Self> {
        if aliases.is_empty() {
            return None;
        }
        Some(SeqLenFilter {
            allowed: aliases.iter().map(|alias| alias.lengths()).collect(),
        })
    }

    pub fn allows(&self, isl: u64, osl: u64) -> bool {
        self.allowed.contains(&(isl, osl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_alias_names_round_trip() {
        for alias in SeqLenAlias::iter() {
            let parsed: SeqLenAlias = alias.to_string().parse().unwrap();
            assert_eq!(parsed, alias);
        }
        assert_eq!(SeqLenAlias::names(), &["1k1k", "1k8k", "8k1k"]);
        assert!("2k2k".parse::<SeqLenAlias>().is_err());
    }

    #[test]
    fn test_alias_lengths() {
        assert_eq!(SeqLenAlias::Isl1kOsl1k.lengths(), (1024, 1024));
        assert_eq!(SeqLenAlias::Isl1kOsl8k.lengths(), (1024, 8192));
        assert_eq!(SeqLenAlias::Isl8kOsl1k.lengths(), (8192, 1024));
    }

    #[test]
    fn test_empty_aliases_disable_filter() {
        assert!(SeqLenFilter::from_aliases(&[]).is_none());
    }

    #[test]
    fn test_filter_matches_exact_pairs() {
        let filter =
            SeqLenFilter::from_aliases(&[SeqLenAlias::Isl1kOsl1k, SeqLenAlias::Isl8kOsl1k])
                .unwrap();
        assert!(filter.allows(1024, 1024));
        assert!(filter.allows(8192, 1024));
        assert!(!filter.allows(1024, 8192));
        assert!(!filter.allows(1024, 1025));
    }
}
