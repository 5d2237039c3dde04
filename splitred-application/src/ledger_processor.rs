use crate::{
    error::{MemberInUse, ReportError},
    model::{GroupSnapshot, LedgerReport},
    ports::GroupSnapshotSource,
};
use splitred_domain::{
    BalanceCalculator, BalanceMap, ExpenseDraft, ExpenseRecord, LedgerError, MemberSet, Payment,
    SettlementPlanner,
};

/// Runs the ledger pipeline: validate expenses, fold balances, plan settlement.
///
/// Every call recomputes from the snapshot it is given; nothing is cached
/// between calls, so one processor can serve any number of threads.
#[derive(Clone, Copy)]
pub struct LedgerProcessor<'a> {
    snapshots: &'a dyn GroupSnapshotSource,
}

impl<'a> LedgerProcessor<'a> {
    pub fn new(snapshots: &'a dyn GroupSnapshotSource) -> Self {
        Self { snapshots }
    }

    pub fn report_for_group(&self, group_id: &str) -> Result<LedgerReport, ReportError> {
        let snapshot = self.load_snapshot(group_id)?;
        let expenses = self.validate_expenses(&snapshot.members, snapshot.expenses)?;
        self.build_report(&snapshot.members, &expenses)
    }

    pub fn load_snapshot(&self, group_id: &str) -> Result<GroupSnapshot, ReportError> {
        self.snapshots
            .load(group_id)
            .map_err(|source| ReportError::Snapshot {
                group_id: group_id.to_string(),
                source,
            })
            .inspect_err(log_failure)
    }

    /// Validates drafts in order and stops at the first invalid one.
    pub fn validate_expenses<I>(
        &self,
        members: &MemberSet,
        drafts: I,
    ) -> Result<Vec<ExpenseRecord>, ReportError>
    where
        I: IntoIterator<Item = ExpenseDraft>,
    {
        drafts
            .into_iter()
            .enumerate()
            .map(|(idx, draft)| {
                let description = draft.description.clone();
                draft
                    .validate(members)
                    .map_err(|source| ReportError::InvalidExpense {
                        position: idx + 1,
                        description,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(log_failure)
    }

    pub fn plan_settlement(&self, balances: &BalanceMap) -> Result<Vec<Payment>, ReportError> {
        SettlementPlanner
            .plan(balances)
            .map_err(|err| ReportError::Ledger(LedgerError::from(err)))
            .inspect_err(log_failure)
    }

    pub fn build_report(
        &self,
        members: &MemberSet,
        expenses: &[ExpenseRecord],
    ) -> Result<LedgerReport, ReportError> {
        self.build_report_with_cancel(members, expenses, &|| false)
    }

    pub fn build_report_with_cancel(
        &self,
        members: &MemberSet,
        expenses: &[ExpenseRecord],
        is_cancelled: &dyn Fn() -> bool,
    ) -> Result<LedgerReport, ReportError> {
        let balances = BalanceCalculator::compute_with_cancel(members, expenses, is_cancelled)
            .map_err(ReportError::from)
            .inspect_err(log_failure)?;
        let payments = self.plan_settlement(&balances)?;

        Ok(LedgerReport { balances, payments })
    }

    /// A member may only leave the group once no expense mentions them.
    pub fn check_member_removable(
        &self,
        member: &str,
        expenses: &[ExpenseRecord],
    ) -> Result<(), MemberInUse> {
        match expenses.iter().find(|expense| expense.references(member)) {
            Some(expense) => Err(MemberInUse {
                member: member.into(),
                description: expense.description().to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn log_failure(err: &ReportError) {
    if err.is_internal() {
        tracing::error!(error = %err, "Ledger report failed with an internal error");
    } else {
        tracing::debug!(error = %err, "Ledger report rejected input");
    }
}
