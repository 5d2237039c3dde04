#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::{CreditorIssue, InconsistentLedgerError, LedgerError, ValidationError};
pub use model::{
    BalanceMap, CreditorShare, ExpenseDraft, ExpenseRecord, MemberName, MemberSet, Money, Payment,
};
pub use services::{BalanceCalculator, ConsistencyValidator, SettlementPlanner};

/// Net balance of every member after folding in `expenses`.
pub fn compute_balances(
    members: &MemberSet,
    expenses: &[ExpenseRecord],
) -> Result<BalanceMap, LedgerError> {
    BalanceCalculator::compute(members, expenses)
}

/// Payments that settle a zero-sum balance map.
pub fn plan_settlement(balances: &BalanceMap) -> Result<Vec<Payment>, InconsistentLedgerError> {
    SettlementPlanner.plan(balances)
}
