use crate::model::{MemberName, Money};

/// Malformed or inconsistent input. User-facing and recoverable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("empty description")]
    EmptyDescription,
    #[error("non-positive price")]
    NonPositivePrice { price: Money },
    #[error("creditor amounts do not sum to price")]
    InvalidCreditors(CreditorIssue),
    #[error("empty or duplicate debtors")]
    InvalidDebtors { duplicate: Option<MemberName> },
    #[error("unknown member reference")]
    UnknownMember { name: MemberName },
    /// The running balance of `member` left the representable range.
    #[error("amounts too large")]
    AmountOverflow { member: MemberName },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditorIssue {
    Empty,
    NonPositiveAmount { member: MemberName, amount: Money },
    /// `total` is `None` when the creditor amounts overflow.
    SumMismatch { price: Money, total: Option<Money> },
}

/// A broken ledger invariant despite valid input. Signals a defect in the
/// engine, never a user mistake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InconsistentLedgerError {
    #[error("balances sum to {total} instead of zero")]
    NonZeroSum { total: i128 },
    #[error("expense `{description}` has no debtors to share its price")]
    EmptyDebtorSet { description: String },
    #[error("settlement left {creditors} creditors and {debtors} debtors unmatched")]
    UnmatchedParties { creditors: usize, debtors: usize },
    #[error("balance of `{member}` is out of range")]
    Overflow { member: MemberName },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("inconsistent ledger: {0}")]
    Inconsistent(#[from] InconsistentLedgerError),
    #[error("balance computation cancelled")]
    Cancelled,
}

impl LedgerError {
    /// Whether this is an engine fault (5xx) rather than a problem with the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Inconsistent(_))
    }
}
