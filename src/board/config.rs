// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::backrank::Variant;

#[derive(Error, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board needs at least {min} rows (got {got})")]
    TooFewRows { min: u8, got: u8 },
    #[error("Board needs at least {min} columns for the back row (got {got})")]
    TooFewColumns { min: u8, got: u8 },
    #[error("Board dimensions are limited to {max} (got {rows}x{columns})")]
    TooLarge { max: u8, rows: u8, columns: u8 },
}

use ConfigError::*;

pub const MIN_ROWS: u8 = 4;
pub const MIN_COLUMNS: u8 = 8;
pub const MAX_DIMENSION: u8 = 26;

/// Seed used for the piece RNG when no seed is given and the `random`
/// feature is off.
#[cfg(not(feature = "random"))]
const FALLBACK_SEED: u64 = 0x5eed;

/// Everything needed to set up a new board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: u8,
    pub columns: u8,
    pub variant: Variant,
    /// Seeds the generator behind Shapeshifter and Decoy. `None` draws
    /// from the OS when the `random` feature is enabled.
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: 8,
            variant: Variant::Classic,
            seed: None,
        }
    }
}

impl BoardConfig {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn custom() -> Self {
        Self {
            variant: Variant::Custom,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_dimensions(mut self, rows: u8, columns: u8) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows < MIN_ROWS {
            return Err(TooFewRows {
                min: MIN_ROWS,
                got: self.rows,
            }
            .into());
        }
        if self.columns < MIN_COLUMNS {
            return Err(TooFewColumns {
                min: MIN_COLUMNS,
                got: self.columns,
            }
            .into());
        }
        if self.rows > MAX_DIMENSION || self.columns > MAX_DIMENSION {
            return Err(TooLarge {
                max: MAX_DIMENSION,
                rows: self.rows,
                columns: self.columns,
            }
            .into());
        }
        Ok(())
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            #[cfg(feature = "random")]
            None => StdRng::from_entropy(),
            #[cfg(not(feature = "random"))]
            None => StdRng::seed_from_u64(FALLBACK_SEED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BoardConfig::default().validate().is_ok());
        assert!(BoardConfig::custom().validate().is_ok());
    }
    #[test]
    fn test_too_few_rows() {
        let config = BoardConfig::default().with_dimensions(3, 8);
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&TooFewRows { min: 4, got: 3 })
        );
    }
    #[test]
    fn test_too_few_columns() {
        let config = BoardConfig::default().with_dimensions(8, 7);
        assert!(matches!(
            config.validate().unwrap_err().downcast_ref::<ConfigError>(),
            Some(TooFewColumns { .. })
        ));
    }
    #[test]
    fn test_too_large() {
        let config = BoardConfig::default().with_dimensions(27, 8);
        assert!(config.validate().is_err());
        let config = BoardConfig::default().with_dimensions(10, 12);
        assert!(config.validate().is_ok());
    }
    #[test]
    fn test_deserialize_with_defaults() {
        let config: BoardConfig = serde_json::from_str(r#"{"variant": "Custom"}"#).unwrap();
        assert_eq!(config, BoardConfig::custom());
        let config: BoardConfig = serde_json::from_str(r#"{"rows": 10, "seed": 7}"#).unwrap();
        assert_eq!(config.rows, 10);
        assert_eq!(config.columns, 8);
        assert_eq!(config.seed, Some(7));
    }
    #[test]
    fn test_seeded_rngs_agree() {
        use rand::Rng;
        let config = BoardConfig::default().with_seed(42);
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }
}
