use crate::{
    error::InconsistentLedgerError,
    model::{BalanceMap, MemberName, Money, Payment},
    services::ConsistencyValidator,
};
use std::{cmp::Ordering, collections::BinaryHeap};

/// Settlement planning service
pub struct SettlementPlanner;

/// One side of a pending transfer. `outstanding` is always positive.
#[derive(Debug, PartialEq, Eq)]
struct Party {
    outstanding: Money,
    name: MemberName,
}

impl Ord for Party {
    // Max-heap order: largest outstanding first, then the smallest name.
    fn cmp(&self, other: &Self) -> Ordering {
        self.outstanding
            .cmp(&other.outstanding)
            .then_with(|| other.name.cmp(&self.name))
    }
}

impl PartialOrd for Party {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SettlementPlanner {
    /// Plan payments that bring every balance to zero
    ///
    /// Greedy largest-pair matching: each round the largest creditor is paid by
    /// the largest debtor, ties going to the alphabetically first name. Each
    /// round zeroes at least one side, so `k` nonzero balances settle in at most
    /// `k - 1` payments.
    ///
    /// # Arguments
    /// * `balances` - Balance table whose entries sum to zero
    ///
    /// # Returns
    /// Payments in the order they were matched
    pub fn plan(&self, balances: &BalanceMap) -> Result<Vec<Payment>, InconsistentLedgerError> {
        ConsistencyValidator::check_zero_sum(balances)?;

        let mut creditors = BinaryHeap::new();
        let mut debtors = BinaryHeap::new();
        for (member, balance) in balances.iter() {
            let Some(outstanding) = balance.checked_abs() else {
                tracing::error!(
                    reject_reason = "balance_out_of_range",
                    member = %member,
                    "Balance has no representable magnitude"
                );
                return Err(InconsistentLedgerError::Overflow {
                    member: member.clone(),
                });
            };
            let party = Party {
                outstanding,
                name: member.clone(),
            };
            if balance.is_positive() {
                creditors.push(party);
            } else if balance.is_negative() {
                debtors.push(party);
            }
        }

        let nonzero_count = creditors.len() + debtors.len();
        let mut payments = Vec::with_capacity(nonzero_count.saturating_sub(1));

        loop {
            match (creditors.pop(), debtors.pop()) {
                (None, None) => break,
                (Some(mut creditor), Some(mut debtor)) => {
                    let amount = creditor.outstanding.min(debtor.outstanding);
                    payments.push(Payment {
                        from: debtor.name.clone(),
                        to: creditor.name.clone(),
                        amount,
                    });

                    creditor.outstanding -= amount;
                    debtor.outstanding -= amount;
                    if !creditor.outstanding.is_zero() {
                        creditors.push(creditor);
                    }
                    if !debtor.outstanding.is_zero() {
                        debtors.push(debtor);
                    }
                }
                (creditor, debtor) => {
                    let creditors = creditors.len() + usize::from(creditor.is_some());
                    let debtors = debtors.len() + usize::from(debtor.is_some());
                    tracing::error!(
                        reject_reason = "unmatched_parties",
                        creditors,
                        debtors,
                        payment_count = payments.len(),
                        "Settlement ran out of counterparties"
                    );
                    return Err(InconsistentLedgerError::UnmatchedParties { creditors, debtors });
                }
            }
        }

        debug_assert!(payments.len() <= nonzero_count.saturating_sub(1));
        tracing::debug!(
            nonzero_count,
            payment_count = payments.len(),
            "Settlement planned"
        );

        Ok(payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn planner() -> SettlementPlanner {
        SettlementPlanner
    }

    fn balances(entries: &[(&str, i64)]) -> BalanceMap {
        entries
            .iter()
            .map(|(name, units)| (MemberName::from(*name), Money::from_minor(*units)))
            .collect()
    }

    #[rstest]
    #[case::single_debt(
        &[("alice", 5000), ("bob", -5000)],
        vec![("bob", "alice", 5000)]
    )]
    #[case::all_zero(
        &[("alice", 0), ("bob", 0), ("carol", 0)],
        vec![]
    )]
    #[case::empty(&[], vec![])]
    #[case::debtor_pays_two_creditors(
        &[("alice", 3000), ("bob", 7000), ("carol", -10000)],
        vec![("carol", "bob", 7000), ("carol", "alice", 3000)]
    )]
    #[case::largest_debtor_first(
        &[("Alice", 2500), ("Bob", -500), ("Charlie", -2000)],
        vec![("Charlie", "Alice", 2000), ("Bob", "Alice", 500)]
    )]
    #[case::ties_break_on_name(
        &[("dave", -100), ("carol", -100), ("bob", 100), ("alice", 100)],
        vec![("carol", "alice", 100), ("dave", "bob", 100)]
    )]
    #[case::remaining_creditor_reenters_queue(
        &[("alice", 6000), ("bob", 4000), ("carol", -5000), ("dave", -5000)],
        vec![("carol", "alice", 5000), ("dave", "bob", 4000), ("dave", "alice", 1000)]
    )]
    #[case::five_members(
        &[("alice", 10000), ("bob", 13000), ("carol", -7000), ("jason", -10500), ("mike", -5500)],
        vec![
            ("jason", "bob", 10500),
            ("carol", "alice", 7000),
            ("mike", "alice", 3000),
            ("mike", "bob", 2500),
        ]
    )]
    fn settlement_planner_cases(
        planner: SettlementPlanner,
        #[case] entries: &[(&str, i64)],
        #[case] expected: Vec<(&str, &str, i64)>,
    ) {
        let balances = balances(entries);
        let payments = planner.plan(&balances).expect("balances sum to zero");

        let expected: Vec<Payment> = expected
            .into_iter()
            .map(|(from, to, amount)| Payment {
                from: from.into(),
                to: to.into(),
                amount: Money::from_minor(amount),
            })
            .collect();
        assert_eq!(payments, expected);

        let mut remaining = balances.clone();
        for payment in &payments {
            remaining.apply(payment);
        }
        assert!(remaining.is_settled());
        assert!(payments.len() <= balances.nonzero_count().saturating_sub(1));
    }

    #[rstest]
    fn settles_balances_at_the_limit(planner: SettlementPlanner) {
        let payments = planner
            .plan(&balances(&[
                ("alice", i64::MAX),
                ("bob", -i64::MAX + 1),
                ("carol", -1),
            ]))
            .expect("settles");

        assert_eq!(
            payments,
            vec![
                Payment {
                    from: "bob".into(),
                    to: "alice".into(),
                    amount: Money::from_minor(i64::MAX - 1),
                },
                Payment {
                    from: "carol".into(),
                    to: "alice".into(),
                    amount: Money::from_minor(1),
                },
            ]
        );
    }

    #[rstest]
    fn rejects_balance_without_magnitude(planner: SettlementPlanner) {
        let entries = balances(&[("alice", i64::MAX), ("bob", 1), ("carol", i64::MIN)]);

        assert_eq!(
            planner.plan(&entries),
            Err(InconsistentLedgerError::Overflow {
                member: "carol".into()
            })
        );
    }

    #[rstest]
    #[case::single_nonzero(&[("alice", 5000)], 5000)]
    #[case::imbalanced(&[("alice", 5000), ("bob", -4000)], 1000)]
    fn rejects_non_zero_sum(
        planner: SettlementPlanner,
        #[case] entries: &[(&str, i64)],
        #[case] total: i64,
    ) {
        assert_eq!(
            planner.plan(&balances(entries)),
            Err(InconsistentLedgerError::NonZeroSum {
                total: i128::from(total)
            })
        );
    }

    #[rstest]
    fn same_balances_give_same_plan(planner: SettlementPlanner) {
        let entries = [("e", 300), ("d", 300), ("c", -200), ("b", -200), ("a", -200)];

        let first = planner.plan(&balances(&entries)).expect("plans");
        let second = planner.plan(&balances(&entries)).expect("plans");

        assert_eq!(first, second);
        assert_eq!(
            first.first(),
            Some(&Payment {
                from: "a".into(),
                to: "d".into(),
                amount: Money::from_minor(200),
            })
        );
    }
}
