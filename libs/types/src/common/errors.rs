//! Error types for input editing and parsing
//!
//! The calculation engines are total and never return errors; these cover the
//! editing surface around them, where a caller can refer to a round that no
//! longer exists or hand us an unrecognised label.

use thiserror::Error;

/// Errors raised while editing or parsing cap table inputs
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Founder id does not exist
    #[error("Founder {id} not found")]
    UnknownFounder { id: u64 },

    /// Funding round id does not exist
    #[error("Funding round {id} not found")]
    UnknownRound { id: u64 },

    /// Investor id does not exist within the given round
    #[error("Investor {id} not found in funding round {round_id}")]
    UnknownInvestor { round_id: u64, id: u64 },

    /// Exit type label is neither `acquisition` nor `ipo`
    #[error("Unknown exit type '{0}' - expected 'acquisition' or 'ipo'")]
    UnknownExitType(String),

    /// Deal structure label is not one of cash/stock/mixed
    #[error("Unknown deal structure '{0}' - expected 'cash', 'stock' or 'mixed'")]
    UnknownDealStructure(String),
}
