use splitred_domain::{BalanceMap, ExpenseDraft, MemberSet, Payment};

/// A consistent read of one group, as handed over by the expense store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub members: MemberSet,
    pub expenses: Vec<ExpenseDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerReport {
    pub balances: BalanceMap,
    pub payments: Vec<Payment>,
}
