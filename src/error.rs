//! Error types for the search, the reference position and configuration.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no legal moves in the root position")]
    NoLegalMoves,
    #[error("position not restored after {context}: hash {before:#018x} became {after:#018x}")]
    OracleInvariantViolation {
        context: &'static str,
        before: u64,
        after: u64,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    #[error("illegal position: {0}")]
    InvalidPosition(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} = {value} is out of range (at most {max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
