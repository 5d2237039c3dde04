use proptest::prelude::*;
use splitred_application::{GroupSnapshot, GroupSnapshotSource, LedgerProcessor, SnapshotLoadError};
use splitred_domain::{ExpenseDraft, MemberSet, Money};

struct SingleGroup(GroupSnapshot);

impl GroupSnapshotSource for SingleGroup {
    fn load(&self, _group_id: &str) -> Result<GroupSnapshot, SnapshotLoadError> {
        Ok(self.0.clone())
    }
}

const NAMES: [&str; 5] = ["ana", "ben", "cleo", "dan", "eli"];

proptest! {
    #[test]
    fn report_payments_settle_report_balances(
        member_count in 2usize..=5,
        expenses in prop::collection::vec(
            (1i64..=50_000, 0usize..=4, 1u8..=31),
            0..=25,
        ),
    ) {
        let names = &NAMES[..member_count];
        let drafts: Vec<ExpenseDraft> = expenses
            .iter()
            .enumerate()
            .map(|(idx, (amount, creditor, mask))| {
                let debtors: Vec<&str> = names
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, name)| *name)
                    .collect();
                let debtors = if debtors.is_empty() { vec![names[0]] } else { debtors };
                ExpenseDraft::new(format!("expense {idx}"))
                    .creditor(names[creditor % member_count], Money::from_minor(*amount))
                    .debtors(debtors)
            })
            .collect();
        let source = SingleGroup(GroupSnapshot {
            members: MemberSet::new(names.iter().copied()),
            expenses: drafts,
        });

        let report = LedgerProcessor::new(&source)
            .report_for_group("any")
            .expect("generated snapshot is valid");

        prop_assert_eq!(report.balances.total(), 0);
        let mut remaining = report.balances.clone();
        for payment in &report.payments {
            remaining.apply(payment);
        }
        prop_assert!(remaining.is_settled());
        prop_assert!(
            report.payments.len() <= report.balances.nonzero_count().saturating_sub(1)
        );
    }
}

#[test]
fn reports_for_different_groups_run_in_parallel() {
    let source = SingleGroup(GroupSnapshot {
        members: MemberSet::new(["ana", "ben"]),
        expenses: vec![
            ExpenseDraft::new("Tickets")
                .creditor("ana", Money::from_minor(2000))
                .debtor("ben"),
        ],
    });
    let processor = LedgerProcessor::new(&source);

    let reports: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || processor.report_for_group("tickets")))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect()
    });

    for report in reports {
        let report = report.expect("report builds");
        assert_eq!(report.payments.len(), 1);
        assert_eq!(report.payments[0].amount, Money::from_minor(2000));
    }
}
