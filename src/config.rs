//! Search settings.
//!
//! Every field has a default matching the engine's stock behaviour, so a
//! TOML file only needs the keys it changes:
//!
//! ```toml
//! depth = 4
//! time_budget_ms = 800
//!
//! [eval.mobility]
//! pawn = 0
//! knight = 15
//! bishop = 13
//! rook = 10
//! queen = 7
//! king = 0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::evaluation::EvalWeights;
use crate::transposition::MAX_TABLE_SIZE_MB;

/// Plies searched below each root move.
pub const DEFAULT_DEPTH: u32 = 3;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 1500;
pub const DEFAULT_TABLE_SIZE_MB: usize = 16;
/// Deepest search a config file may ask for; the search recurses once per ply.
pub const MAX_DEPTH: u32 = 32;

/// How leaf scores are folded into the alternating min/max search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreConvention {
    /// Leaf scores are turned into the root mover's point of view before
    /// they are compared.
    RootRelative,
    /// Leaf scores are used as the evaluator returns them, relative to
    /// whoever is to move at the leaf.
    MoverRelative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u32,
    pub time_budget_ms: u64,
    pub table_size_mb: usize,
    pub use_transposition_table: bool,
    pub order_moves: bool,
    pub score_convention: ScoreConvention,
    pub eval: EvalWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            table_size_mb: DEFAULT_TABLE_SIZE_MB,
            use_transposition_table: true,
            order_moves: true,
            score_convention: ScoreConvention::RootRelative,
            eval: EvalWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Rejects depths and table sizes the engine will not run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth > MAX_DEPTH {
            return Err(ConfigError::OutOfRange {
                field: "depth",
                value: u64::from(self.depth),
                max: u64::from(MAX_DEPTH),
            });
        }
        if self.table_size_mb > MAX_TABLE_SIZE_MB {
            return Err(ConfigError::OutOfRange {
                field: "table_size_mb",
                value: self.table_size_mb as u64,
                max: MAX_TABLE_SIZE_MB as u64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.depth, 3);
        assert_eq!(config.time_budget_ms, 1500);
        assert_eq!(config.score_convention, ScoreConvention::RootRelative);
    }

    #[test]
    fn test_partial_override() {
        let config = SearchConfig::from_toml_str(
            r#"
            depth = 2
            use_transposition_table = false
            score_convention = "mover_relative"

            [eval.mobility]
            pawn = 0
            knight = 15
            bishop = 13
            rook = 10
            queen = 7
            king = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.depth, 2);
        assert!(!config.use_transposition_table);
        assert!(config.order_moves);
        assert_eq!(config.score_convention, ScoreConvention::MoverRelative);
        assert_eq!(config.eval.mobility.queen, 7);
        assert_eq!(config.eval.material, EvalWeights::default().material);
    }

    #[test]
    fn test_serialized_config_reads_back() {
        let mut config = SearchConfig::default();
        config.time_budget_ms = 250;
        let text = config.to_toml_string().unwrap();
        assert_eq!(SearchConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_values_are_errors() {
        assert!(matches!(
            SearchConfig::from_toml_str("depth = \"deep\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SearchConfig::load("/nonexistent/chess_bot.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let err = SearchConfig::from_toml_str("table_size_mb = 9223372036854775807").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "table_size_mb",
                ..
            }
        ));

        let err = SearchConfig::from_toml_str("depth = 33").unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "depth", .. }));

        let config = SearchConfig::from_toml_str("depth = 32\ntable_size_mb = 1024").unwrap();
        assert!(config.validate().is_ok());
    }
}
