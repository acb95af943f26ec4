//! Tests for the group eligibility predicate
//!
//! Every check is exercised both in isolation (a group violating only that
//! check) and through the concrete allow/deny scenarios.

#[cfg(test)]
mod tests {
    use crate::{
        config::Params,
        validation::{Check, GroupValidator, Section},
        Address, TransactionGroup, TransactionRecord, TxnType, ValidationError, Verdict,
        ZERO_ADDRESS,
    };
    use ethers::types::H256;

    fn alice() -> Address {
        H256::repeat_byte(0xa1)
    }

    fn bob() -> Address {
        H256::repeat_byte(0xb0)
    }

    fn mallory() -> Address {
        H256::repeat_byte(0x3e)
    }

    /// Alice pays Bob the transfer fee, Bob (the issuer account) sends Alice one unit of asset 1
    fn valid_group() -> TransactionGroup {
        let mut payment = TransactionRecord::new(TxnType::Payment, alice());
        payment.receiver = bob();
        payment.amount = 1000;
        payment.fee = 1000;

        let mut transfer = TransactionRecord::new(TxnType::AssetTransfer, bob());
        transfer.fee = 1000;
        transfer.asset_amount = 1;
        transfer.asset_id = 1;
        transfer.asset_receiver = alice();
        transfer.group_index = 1;

        TransactionGroup::new(vec![payment, transfer])
    }

    fn validator() -> GroupValidator {
        GroupValidator::new(Params { asset_id: 1 })
    }

    /// Build a group that violates exactly `check`
    fn violate(check: Check) -> TransactionGroup {
        let mut group = valid_group();
        let records = group.records_mut();
        match check {
            Check::GroupSize => {
                let extra = TransactionRecord::new(TxnType::Payment, mallory());
                records.push(extra);
            }
            Check::FirstIsPayment => records[0].txn_type = TxnType::AssetTransfer,
            Check::SecondIsAssetTransfer => records[1].txn_type = TxnType::Payment,
            Check::SelfIndex => records[1].group_index = 0,
            Check::PaymentCoversFee => records[0].amount = 999,
            Check::PaymentReceiverIsTransferSender => records[0].receiver = mallory(),
            Check::PaymentNoRekey => records[0].rekey_to = mallory(),
            Check::PaymentNoCloseRemainder => records[0].close_remainder_to = mallory(),
            Check::PaymentNoAssetClose => records[0].asset_close_to = mallory(),
            Check::FeeCeiling => {
                records[1].fee = 10_000;
                records[0].amount = 10_000;
            }
            Check::TransferNoAmount => records[1].amount = 1,
            Check::TransferSingleUnit => records[1].asset_amount = 2,
            Check::TransferAssetId => records[1].asset_id = 2,
            Check::TransferReceiverIsPayer => records[1].asset_receiver = mallory(),
            Check::TransferNoRekey => records[1].rekey_to = mallory(),
            Check::TransferNoCloseRemainder => records[1].close_remainder_to = mallory(),
            Check::TransferNoAssetClose => records[1].asset_close_to = mallory(),
        }
        group
    }

    #[test]
    fn test_valid_group_is_allowed() {
        let validator = validator();
        let group = valid_group();

        assert!(validator.evaluate(&group));
        assert_eq!(validator.validate(&group), Ok(()));

        let report = validator.report(&group);
        assert_eq!(report.verdict(), Verdict::Allow);
        assert!(report.failed().is_empty());
        assert_eq!(report.outcomes.len(), 17);
    }

    #[test]
    fn test_two_unit_transfer_is_denied() {
        let mut group = valid_group();
        group.records_mut()[1].asset_amount = 2;

        assert!(!validator().evaluate(&group));
        assert_eq!(
            validator().validate(&group),
            Err(ValidationError::CheckFailed {
                check: Check::TransferSingleUnit
            })
        );
    }

    #[test]
    fn test_rekeyed_payment_is_denied() {
        let mut group = valid_group();
        group.records_mut()[0].rekey_to = mallory();

        assert!(!validator().evaluate(&group));
    }

    #[test]
    fn test_each_check_is_individually_necessary() {
        let validator = validator();

        for check in Check::ALL {
            let group = violate(check);
            let report = validator.report(&group);

            assert!(!validator.evaluate(&group), "{check} should deny");
            assert_eq!(report.verdict(), Verdict::Deny);
            assert_eq!(report.failed(), vec![check], "only {check} should fail");
        }
    }

    #[test]
    fn test_validate_names_the_failing_check() {
        let validator = validator();

        for check in Check::ALL.into_iter().skip(1) {
            assert_eq!(
                validator.validate(&violate(check)),
                Err(ValidationError::CheckFailed { check })
            );
        }

        assert_eq!(
            validator.validate(&violate(Check::GroupSize)),
            Err(ValidationError::GroupSize {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn test_wrong_group_sizes_are_denied() {
        let validator = validator();
        let full = valid_group();

        let empty = TransactionGroup::default();
        let single = TransactionGroup::new(vec![full.records()[0].clone()]);

        assert!(!validator.evaluate(&empty));
        assert!(!validator.evaluate(&single));
        assert_eq!(
            validator.validate(&single),
            Err(ValidationError::GroupSize {
                expected: 2,
                got: 1
            })
        );

        // Missing records fail every check that reads them
        assert_eq!(validator.report(&empty).failed().len(), 17);
    }

    #[test]
    fn test_fee_ceiling_boundary() {
        let validator = validator();

        let mut group = valid_group();
        group.records_mut()[1].fee = 9_999;
        group.records_mut()[0].amount = 9_999;
        assert!(validator.evaluate(&group));

        group.records_mut()[1].fee = 10_000;
        group.records_mut()[0].amount = 10_000;
        assert_eq!(
            validator.validate(&group),
            Err(ValidationError::CheckFailed {
                check: Check::FeeCeiling
            })
        );
    }

    #[test]
    fn test_asset_id_must_match_parameter() {
        let group = valid_group();

        assert!(GroupValidator::new(Params { asset_id: 1 }).evaluate(&group));
        assert!(!GroupValidator::new(Params { asset_id: 2 }).evaluate(&group));
    }

    #[test]
    fn test_zero_fee_group_is_allowed() {
        let mut group = valid_group();
        group.records_mut()[0].amount = 0;
        group.records_mut()[1].fee = 0;

        assert!(validator().evaluate(&group));
    }

    #[test]
    fn test_report_is_idempotent() {
        let validator = validator();
        let group = violate(Check::TransferNoAssetClose);

        let first = validator.report(&group);
        let second = validator.report(&group);

        assert_eq!(first, second);
        assert_eq!(validator.evaluate(&group), validator.evaluate(&group));
    }

    #[test]
    fn test_check_numbering_and_sections() {
        assert_eq!(Check::GroupSize.number(), 1);
        assert_eq!(Check::FeeCeiling.number(), 10);
        assert_eq!(Check::TransferNoAssetClose.number(), 17);

        let sections: Vec<Section> = Check::ALL.iter().map(|c| c.section()).collect();
        assert_eq!(sections.iter().filter(|s| **s == Section::Group).count(), 4);
        assert_eq!(sections.iter().filter(|s| **s == Section::Payment).count(), 5);
        assert_eq!(sections.iter().filter(|s| **s == Section::Transfer).count(), 8);
    }

    #[test]
    fn test_zero_address_is_all_zero_bytes() {
        assert_eq!(ZERO_ADDRESS, H256::zero());
        assert_eq!(TransactionRecord::new(TxnType::Payment, alice()).rekey_to, ZERO_ADDRESS);
    }
}
