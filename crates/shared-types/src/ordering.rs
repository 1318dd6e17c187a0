// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Ordering options for list endpoints

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseVocabularyError;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl OrderDirection {
    /// Returns the wire representation used by the API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ParseVocabularyError::new(
                "order direction",
                s,
                &["asc", "desc"],
            )),
        }
    }
}

/// Field the assets endpoint sorts by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetOrderBy {
    /// Internal primary key (listing order)
    Pk,
    /// Date of the last sale
    SaleDate,
    /// Number of sales
    SaleCount,
    /// Price of the last sale
    SalePrice,
}

impl AssetOrderBy {
    /// Returns the wire representation used by the API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pk => "pk",
            Self::SaleDate => "sale_date",
            Self::SaleCount => "sale_count",
            Self::SalePrice => "sale_price",
        }
    }
}

impl fmt::Display for AssetOrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetOrderBy {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pk" => Ok(Self::Pk),
            "sale_date" => Ok(Self::SaleDate),
            "sale_count" => Ok(Self::SaleCount),
            "sale_price" => Ok(Self::SalePrice),
            _ => Err(ParseVocabularyError::new(
                "asset ordering",
                s,
                &["pk", "sale_date", "sale_count", "sale_price"],
            )),
        }
    }
}
