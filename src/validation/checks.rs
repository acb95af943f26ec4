use crate::{config::Params, TransactionGroup, TransactionRecord, TxnType, ZERO_ADDRESS};
use serde::Serialize;
use std::fmt;

/// Number of transactions in an eligible group
pub const GROUP_SIZE: usize = 2;

/// Position of the fee-covering payment
pub const PAYMENT_INDEX: usize = 0;

/// Position of the asset transfer, the transaction the predicate signs for
pub const TRANSFER_INDEX: usize = 1;

/// Exclusive upper bound on the asset transfer fee
pub const MAX_FEE: u64 = 10_000;

/// Which part of the group a check constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Group,
    Payment,
    Transfer,
}

/// One named condition of the eligibility predicate
///
/// A group is eligible iff every check in [`Check::ALL`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    GroupSize,
    FirstIsPayment,
    SecondIsAssetTransfer,
    SelfIndex,

    PaymentCoversFee,
    PaymentReceiverIsTransferSender,
    PaymentNoRekey,
    PaymentNoCloseRemainder,
    PaymentNoAssetClose,

    FeeCeiling,
    TransferNoAmount,
    TransferSingleUnit,
    TransferAssetId,
    TransferReceiverIsPayer,
    TransferNoRekey,
    TransferNoCloseRemainder,
    TransferNoAssetClose,
}

impl Check {
    /// Every check, in evaluation order
    pub const ALL: [Check; 17] = [
        Check::GroupSize,
        Check::FirstIsPayment,
        Check::SecondIsAssetTransfer,
        Check::SelfIndex,
        Check::PaymentCoversFee,
        Check::PaymentReceiverIsTransferSender,
        Check::PaymentNoRekey,
        Check::PaymentNoCloseRemainder,
        Check::PaymentNoAssetClose,
        Check::FeeCeiling,
        Check::TransferNoAmount,
        Check::TransferSingleUnit,
        Check::TransferAssetId,
        Check::TransferReceiverIsPayer,
        Check::TransferNoRekey,
        Check::TransferNoCloseRemainder,
        Check::TransferNoAssetClose,
    ];

    /// 1-based position in [`Check::ALL`]
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn section(self) -> Section {
        match self {
            Check::GroupSize
            | Check::FirstIsPayment
            | Check::SecondIsAssetTransfer
            | Check::SelfIndex => Section::Group,
            Check::PaymentCoversFee
            | Check::PaymentReceiverIsTransferSender
            | Check::PaymentNoRekey
            | Check::PaymentNoCloseRemainder
            | Check::PaymentNoAssetClose => Section::Payment,
            _ => Section::Transfer,
        }
    }

    /// The condition as an expression over the group
    pub fn description(self) -> &'static str {
        match self {
            Check::GroupSize => "group.length == 2",
            Check::FirstIsPayment => "group[0].type == pay",
            Check::SecondIsAssetTransfer => "group[1].type == axfer",
            Check::SelfIndex => "group[1].group_index == 1",
            Check::PaymentCoversFee => "group[0].amount == group[1].fee",
            Check::PaymentReceiverIsTransferSender => "group[0].receiver == group[1].sender",
            Check::PaymentNoRekey => "group[0].rekey_to == zero",
            Check::PaymentNoCloseRemainder => "group[0].close_remainder_to == zero",
            Check::PaymentNoAssetClose => "group[0].asset_close_to == zero",
            Check::FeeCeiling => "group[1].fee < 10000",
            Check::TransferNoAmount => "group[1].amount == 0",
            Check::TransferSingleUnit => "group[1].asset_amount == 1",
            Check::TransferAssetId => "group[1].asset_id == assetId",
            Check::TransferReceiverIsPayer => "group[1].asset_receiver == group[0].sender",
            Check::TransferNoRekey => "group[1].rekey_to == zero",
            Check::TransferNoCloseRemainder => "group[1].close_remainder_to == zero",
            Check::TransferNoAssetClose => "group[1].asset_close_to == zero",
        }
    }

    /// Evaluate this check against `group`
    ///
    /// A check that reads a record missing from the group does not hold.
    pub fn holds(self, group: &TransactionGroup, params: &Params) -> bool {
        let payment = group.get(PAYMENT_INDEX);
        let transfer = group.get(TRANSFER_INDEX);

        match self {
            Check::GroupSize => group.len() == GROUP_SIZE,
            Check::FirstIsPayment => payment.is_some_and(|p| p.txn_type == TxnType::Payment),
            Check::SecondIsAssetTransfer => {
                transfer.is_some_and(|t| t.txn_type == TxnType::AssetTransfer)
            }
            Check::SelfIndex => transfer.is_some_and(|t| t.group_index == TRANSFER_INDEX as u64),

            Check::PaymentCoversFee => pair(payment, transfer, |p, t| p.amount == t.fee),
            Check::PaymentReceiverIsTransferSender => {
                pair(payment, transfer, |p, t| p.receiver == t.sender)
            }
            Check::PaymentNoRekey => payment.is_some_and(|p| p.rekey_to == ZERO_ADDRESS),
            Check::PaymentNoCloseRemainder => {
                payment.is_some_and(|p| p.close_remainder_to == ZERO_ADDRESS)
            }
            Check::PaymentNoAssetClose => payment.is_some_and(|p| p.asset_close_to == ZERO_ADDRESS),

            Check::FeeCeiling => transfer.is_some_and(|t| t.fee < MAX_FEE),
            Check::TransferNoAmount => transfer.is_some_and(|t| t.amount == 0),
            Check::TransferSingleUnit => transfer.is_some_and(|t| t.asset_amount == 1),
            Check::TransferAssetId => transfer.is_some_and(|t| t.asset_id == params.asset_id),
            Check::TransferReceiverIsPayer => {
                pair(payment, transfer, |p, t| t.asset_receiver == p.sender)
            }
            Check::TransferNoRekey => transfer.is_some_and(|t| t.rekey_to == ZERO_ADDRESS),
            Check::TransferNoCloseRemainder => {
                transfer.is_some_and(|t| t.close_remainder_to == ZERO_ADDRESS)
            }
            Check::TransferNoAssetClose => {
                transfer.is_some_and(|t| t.asset_close_to == ZERO_ADDRESS)
            }
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.number(), self.description())
    }
}

fn pair(
    payment: Option<&TransactionRecord>,
    transfer: Option<&TransactionRecord>,
    f: impl FnOnce(&TransactionRecord, &TransactionRecord) -> bool,
) -> bool {
    match (payment, transfer) {
        (Some(p), Some(t)) => f(p, t),
        _ => false,
    }
}
