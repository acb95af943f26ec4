use crate::validation::Check;
use ethers::types::H256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 32-byte account key as carried in a transaction record
pub type Address = H256;

/// Sentinel address meaning "no redirection requested"
pub const ZERO_ADDRESS: Address = H256([0u8; 32]);

/// Transaction type, serialized with the short network type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxnType {
    #[serde(rename = "pay")]
    Payment,
    #[serde(rename = "axfer")]
    AssetTransfer,
    #[serde(rename = "acfg")]
    AssetConfig,
    #[serde(rename = "afrz")]
    AssetFreeze,
    #[serde(rename = "keyreg")]
    KeyRegistration,
    #[serde(rename = "appl")]
    ApplicationCall,
    #[serde(other)]
    Unknown,
}

/// One transaction of an atomic group
///
/// Address fields that a transaction does not set are the zero address,
/// numeric fields are zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    pub sender: Address,
    #[serde(default)]
    pub receiver: Address,
    #[serde(default)]
    pub fee: u64,
    /// Native-currency amount
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub asset_amount: u64,
    #[serde(default)]
    pub asset_id: u64,
    #[serde(default)]
    pub asset_receiver: Address,
    #[serde(default)]
    pub rekey_to: Address,
    #[serde(default)]
    pub close_remainder_to: Address,
    #[serde(default)]
    pub asset_close_to: Address,
    #[serde(default)]
    pub group_index: u64,
}

impl TransactionRecord {
    /// A record of the given type with every other field zeroed
    pub fn new(txn_type: TxnType, sender: Address) -> Self {
        Self {
            txn_type,
            sender,
            receiver: ZERO_ADDRESS,
            fee: 0,
            amount: 0,
            asset_amount: 0,
            asset_id: 0,
            asset_receiver: ZERO_ADDRESS,
            rekey_to: ZERO_ADDRESS,
            close_remainder_to: ZERO_ADDRESS,
            asset_close_to: ZERO_ADDRESS,
            group_index: 0,
        }
    }
}

/// Ordered, atomically admitted sequence of transactions
///
/// The length is not enforced here: a group of the wrong size is a valid
/// input that the validator denies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionGroup {
    records: Vec<TransactionRecord>,
}

impl TransactionGroup {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of transaction records
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TransactionRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut Vec<TransactionRecord> {
        &mut self.records
    }
}

impl From<Vec<TransactionRecord>> for TransactionGroup {
    fn from(records: Vec<TransactionRecord>) -> Self {
        Self::new(records)
    }
}

/// Outcome of evaluating the predicate against a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Allow,
    Deny,
}

impl Verdict {
    pub fn is_allow(self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

impl From<bool> for Verdict {
    fn from(allowed: bool) -> Self {
        if allowed { Verdict::Allow } else { Verdict::Deny }
    }
}

/// Reason a group was denied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum ValidationError {
    #[error("group has {got} transactions, expected {expected}")]
    GroupSize { expected: usize, got: usize },
    #[error("check {check} failed")]
    CheckFailed { check: Check },
}
