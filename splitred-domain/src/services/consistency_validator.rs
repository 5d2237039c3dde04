use crate::{
    error::{CreditorIssue, InconsistentLedgerError, ValidationError},
    model::{BalanceMap, ExpenseDraft, ExpenseRecord, MemberSet, Money},
};
use fxhash::FxHashSet;

/// Guards the ledger on both sides of the balance computation: expenses are
/// checked before they enter, balances after they come out.
pub struct ConsistencyValidator;

impl ConsistencyValidator {
    /// Validates a draft against the current member set and builds the record.
    ///
    /// Checks run in order: description, price, creditors, debtors, member
    /// references. The first failing rule is reported.
    pub fn validate_expense(
        draft: ExpenseDraft,
        members: &MemberSet,
    ) -> Result<ExpenseRecord, ValidationError> {
        let ExpenseDraft {
            description,
            creditors,
            mut debtors,
            price,
        } = draft;

        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let creditor_total = creditors
            .iter()
            .try_fold(Money::ZERO, |acc, share| acc.checked_add(share.amount));
        let price = match price {
            Some(price) => price,
            None => creditor_total.ok_or(ValidationError::InvalidCreditors(
                CreditorIssue::SumMismatch {
                    price: Money::ZERO,
                    total: None,
                },
            ))?,
        };
        if !price.is_positive() {
            return Err(ValidationError::NonPositivePrice { price });
        }

        if creditors.is_empty() {
            return Err(ValidationError::InvalidCreditors(CreditorIssue::Empty));
        }
        if let Some(share) = creditors.iter().find(|share| !share.amount.is_positive()) {
            return Err(ValidationError::InvalidCreditors(
                CreditorIssue::NonPositiveAmount {
                    member: share.member.clone(),
                    amount: share.amount,
                },
            ));
        }
        if creditor_total != Some(price) {
            return Err(ValidationError::InvalidCreditors(
                CreditorIssue::SumMismatch {
                    price,
                    total: creditor_total,
                },
            ));
        }

        if debtors.is_empty() {
            return Err(ValidationError::InvalidDebtors { duplicate: None });
        }
        let mut seen = FxHashSet::default();
        if let Some(duplicate) = debtors.iter().find(|debtor| !seen.insert(*debtor)) {
            return Err(ValidationError::InvalidDebtors {
                duplicate: Some(duplicate.clone()),
            });
        }
        debtors.sort_unstable();

        let record = ExpenseRecord::from_validated_parts(description, creditors, debtors, price);
        Self::check_references(&record, members)?;
        Ok(record)
    }

    /// Re-checks a record against the member set of the current computation.
    pub fn check_references(
        expense: &ExpenseRecord,
        members: &MemberSet,
    ) -> Result<(), ValidationError> {
        match expense
            .referenced_names()
            .find(|name| !members.contains(name.as_str()))
        {
            Some(name) => Err(ValidationError::UnknownMember { name: name.clone() }),
            None => Ok(()),
        }
    }

    /// Balances must sum to exactly zero.
    pub fn check_zero_sum(balances: &BalanceMap) -> Result<(), InconsistentLedgerError> {
        let total = balances.total();
        if total == 0 {
            return Ok(());
        }

        tracing::error!(
            reject_reason = "non_zero_sum",
            member_count = balances.len(),
            nonzero_count = balances.nonzero_count(),
            total = %total,
            "Ledger balances do not sum to zero"
        );
        Err(InconsistentLedgerError::NonZeroSum { total })
    }
}
