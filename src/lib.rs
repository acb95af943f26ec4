//! This crate implements the eligibility predicate that lets a reserve account
//! release a uniquely-issued token: a two-transaction atomic group made of a
//! fee-covering payment followed by a one-unit asset transfer.
//! It includes modules for transaction data types, the group validator, and
//! configuration of the predicate parameters.

pub mod types; // Transaction records, groups, addresses and verdicts.
pub mod validation; // The named checks and the group validator.
pub mod config; // Predicate parameters and CLI configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::{Config, Params};
pub use validation::GroupValidator;
