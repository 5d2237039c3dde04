use crate::money_format::MoneyFormat;
use splitred_application::{MemberInUse, ReportError, SnapshotLoadError};
use splitred_domain::{CreditorIssue, LedgerError, ValidationError};
use splitred_i18n as i18n;

/// User-facing text for a failed report. Internal faults collapse into a
/// generic message; their details belong in the logs.
pub fn format_report_error(error: &ReportError, format: MoneyFormat) -> String {
    match error {
        ReportError::InvalidExpense {
            position, source, ..
        } => i18n::invalid_expense(*position, format_validation_error(source, format)),
        ReportError::Ledger(LedgerError::Validation(source)) => {
            format_validation_error(source, format)
        }
        ReportError::Ledger(LedgerError::Cancelled) => i18n::CALCULATION_CANCELLED.to_string(),
        ReportError::Snapshot {
            group_id,
            source: SnapshotLoadError::NotFound,
        } => i18n::group_not_found(group_id),
        ReportError::Snapshot {
            source: SnapshotLoadError::Malformed(detail),
            ..
        } => i18n::malformed_snapshot(detail),
        ReportError::Ledger(LedgerError::Inconsistent(_)) | ReportError::Snapshot { .. } => {
            i18n::SETTLEMENT_CALCULATION_FAILED.to_string()
        }
    }
}

pub fn format_validation_error(error: &ValidationError, format: MoneyFormat) -> String {
    match error {
        ValidationError::EmptyDescription => i18n::EMPTY_DESCRIPTION.to_string(),
        ValidationError::NonPositivePrice { price } => {
            i18n::non_positive_price(format.format(*price))
        }
        ValidationError::InvalidCreditors(CreditorIssue::Empty) => {
            i18n::EMPTY_CREDITORS.to_string()
        }
        ValidationError::InvalidCreditors(CreditorIssue::NonPositiveAmount { member, amount }) => {
            i18n::non_positive_creditor_amount(member, format.format(*amount))
        }
        ValidationError::InvalidCreditors(CreditorIssue::SumMismatch { price, total }) => {
            i18n::creditor_sum_mismatch(
                format.format(*price),
                total.map(|total| format.format(total)),
            )
            .to_string()
        }
        ValidationError::InvalidDebtors { duplicate: None } => i18n::EMPTY_DEBTORS.to_string(),
        ValidationError::InvalidDebtors {
            duplicate: Some(member),
        } => i18n::duplicate_debtor(member),
        ValidationError::UnknownMember { name } => i18n::unknown_member(name),
        ValidationError::AmountOverflow { member } => i18n::amount_overflow(member),
    }
}

pub fn format_member_in_use(error: &MemberInUse) -> String {
    i18n::member_in_use(&error.member, &error.description)
}
