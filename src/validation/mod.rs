//! Transaction Group Validation Module
//!
//! This module implements the eligibility predicate for releasing a single
//! unit of the issued token. A group is eligible when a payment covering the
//! transfer fee is followed by the asset transfer itself, the two legs bind
//! the same pair of accounts, and neither leg rekeys or closes out an account.
//!
//! The predicate is an ordered list of named checks ([`Check`]) so callers
//! can ask either for the verdict or for the outcome of every check.

mod checks;
mod validator;

#[cfg(test)]
mod tests;

pub use checks::{Check, Section, GROUP_SIZE, MAX_FEE, PAYMENT_INDEX, TRANSFER_INDEX};
pub use validator::{CheckOutcome, EvaluationReport, GroupValidator};
