use crate::{
    error::{InconsistentLedgerError, LedgerError, ValidationError},
    model::{BalanceMap, ExpenseRecord, MemberName, MemberSet, Money},
    services::ConsistencyValidator,
};

/// Folds a group's expenses into net balances, one expense at a time.
pub struct BalanceCalculator<'a> {
    members: &'a MemberSet,
    balances: BalanceMap,
}

impl<'a> BalanceCalculator<'a> {
    pub fn new(members: &'a MemberSet) -> Self {
        Self {
            members,
            balances: BalanceMap::zeroed(members),
        }
    }

    /// Computes the balance of every member of `members`.
    ///
    /// Every expense is checked against the member set before any balance is
    /// touched, and the result is checked to sum to zero. The outcome does not
    /// depend on the order of `expenses`.
    pub fn compute(
        members: &MemberSet,
        expenses: &[ExpenseRecord],
    ) -> Result<BalanceMap, LedgerError> {
        Self::compute_with_cancel(members, expenses, &|| false)
    }

    /// Same as [`BalanceCalculator::compute`], polling `is_cancelled` between expenses.
    pub fn compute_with_cancel(
        members: &MemberSet,
        expenses: &[ExpenseRecord],
        is_cancelled: &dyn Fn() -> bool,
    ) -> Result<BalanceMap, LedgerError> {
        for expense in expenses {
            ConsistencyValidator::check_references(expense, members)?;
        }

        tracing::debug!(
            member_count = members.len(),
            expense_count = expenses.len(),
            "Balance computation started"
        );

        let mut calculator = BalanceCalculator::new(members);
        for expense in expenses {
            if is_cancelled() {
                tracing::debug!("Balance computation cancelled");
                return Err(LedgerError::Cancelled);
            }
            calculator.apply(expense)?;
        }

        let balances = calculator.into_balances();
        ConsistencyValidator::check_zero_sum(&balances)?;

        tracing::debug!(
            nonzero_count = balances.nonzero_count(),
            "Balance computation finished"
        );
        Ok(balances)
    }

    /// Credits the creditors and debits each debtor's share.
    ///
    /// Names outside the member set are skipped; `compute` rejects them up front
    /// and the zero-sum check catches anything that slips through. A balance
    /// that would leave the `Money` range fails with
    /// [`ValidationError::AmountOverflow`].
    pub fn apply(&mut self, expense: &ExpenseRecord) -> Result<(), LedgerError> {
        let Some(shares) = expense.debtor_shares() else {
            tracing::error!(
                reject_reason = "empty_debtor_set",
                description = expense.description(),
                price = %expense.price(),
                "Expense without debtors reached the balance calculator"
            );
            return Err(InconsistentLedgerError::EmptyDebtorSet {
                description: expense.description().to_string(),
            }
            .into());
        };

        for creditor in expense.creditors() {
            self.adjust(&creditor.member, |balance| balance.checked_add(creditor.amount))?;
        }
        for (debtor, share) in &shares {
            self.adjust(debtor, |balance| balance.checked_sub(*share))?;
        }

        Ok(())
    }

    fn adjust(
        &mut self,
        member: &MemberName,
        op: impl FnOnce(Money) -> Option<Money>,
    ) -> Result<(), ValidationError> {
        let Some(balance) = self.balances.get_mut(member.as_str()) else {
            return Ok(());
        };
        // i64::MIN has no positive counterpart for the settlement queue.
        match op(*balance).filter(|updated| updated.checked_abs().is_some()) {
            Some(updated) => {
                *balance = updated;
                Ok(())
            }
            None => {
                tracing::debug!(
                    reject_reason = "amount_overflow",
                    member = %member,
                    balance = %balance,
                    "Balance left the representable range"
                );
                Err(ValidationError::AmountOverflow {
                    member: member.clone(),
                })
            }
        }
    }

    pub fn members(&self) -> &'a MemberSet {
        self.members
    }

    pub fn balances(&self) -> &BalanceMap {
        &self.balances
    }

    pub fn into_balances(self) -> BalanceMap {
        self.balances
    }
}
