use splitred_domain::{
    BalanceMap, CreditorIssue, ExpenseDraft, InconsistentLedgerError, LedgerError, MemberName,
    MemberSet, Money, Payment, ValidationError, compute_balances, plan_settlement,
};

fn money(units: i64) -> Money {
    Money::from_minor(units)
}

fn payment(from: &str, to: &str, units: i64) -> Payment {
    Payment {
        from: from.into(),
        to: to.into(),
        amount: money(units),
    }
}

#[test]
fn weekend_trip_settles_in_two_payments() {
    let members = MemberSet::new(["Alice", "Bob", "Charlie"]);
    let expenses = vec![
        ExpenseDraft::new("Groceries")
            .creditor("Alice", money(6000))
            .debtors(["Alice", "Bob", "Charlie"])
            .price(money(6000))
            .validate(&members)
            .expect("valid"),
        ExpenseDraft::new("Taxi")
            .creditor("Bob", money(3000))
            .debtors(["Alice", "Bob"])
            .price(money(3000))
            .validate(&members)
            .expect("valid"),
    ];

    let balances = compute_balances(&members, &expenses).expect("computes");
    assert_eq!(balances.get("Alice"), Some(money(2500)));
    assert_eq!(balances.get("Bob"), Some(money(-500)));
    assert_eq!(balances.get("Charlie"), Some(money(-2000)));

    let payments = plan_settlement(&balances).expect("settles");
    assert_eq!(
        payments,
        vec![
            payment("Charlie", "Alice", 2000),
            payment("Bob", "Alice", 500),
        ]
    );
}

#[test]
fn ten_split_three_ways_gives_extra_cent_to_alice() {
    let members = MemberSet::new(["Alice", "Bob", "Charlie"]);
    let record = ExpenseDraft::new("Coffee")
        .creditor("Charlie", money(1000))
        .debtors(["Charlie", "Bob", "Alice"])
        .validate(&members)
        .expect("valid");

    let shares: Vec<(String, i64)> = record
        .debtor_shares()
        .expect("debtors present")
        .into_iter()
        .map(|(member, share)| (member.to_string(), share.minor_units()))
        .collect();

    assert_eq!(
        shares,
        vec![
            ("Alice".to_string(), 334),
            ("Bob".to_string(), 333),
            ("Charlie".to_string(), 333),
        ]
    );
    assert_eq!(shares.iter().map(|(_, units)| units).sum::<i64>(), 1000);
}

#[test]
fn all_zero_balances_need_no_payments() {
    let balances: BalanceMap = ["Alice", "Bob", "Charlie"]
        .into_iter()
        .map(|name| (MemberName::from(name), Money::ZERO))
        .collect();

    assert_eq!(plan_settlement(&balances), Ok(Vec::new()));
}

#[test]
fn creditor_shortfall_is_a_validation_error() {
    let members = MemberSet::new(["Alice", "Bob", "Charlie"]);
    let err = ExpenseDraft::new("Dinner")
        .creditor("Alice", money(3999))
        .creditor("Bob", money(2000))
        .debtors(["Alice", "Bob", "Charlie"])
        .price(money(6000))
        .validate(&members)
        .expect_err("59.99 does not cover 60.00");

    assert_eq!(
        err,
        ValidationError::InvalidCreditors(CreditorIssue::SumMismatch {
            price: money(6000),
            total: Some(money(5999)),
        })
    );
    assert!(!LedgerError::from(err).is_internal());
}

#[test]
fn lone_nonzero_balance_is_an_internal_error() {
    let balances: BalanceMap = [(MemberName::from("Alice"), money(100))]
        .into_iter()
        .collect();

    let err = plan_settlement(&balances).expect_err("cannot settle");

    assert_eq!(err, InconsistentLedgerError::NonZeroSum { total: 100 });
    assert!(LedgerError::from(err).is_internal());
}

#[test]
fn zero_net_members_stay_in_the_map() {
    let members = MemberSet::new(["Alice", "Bob", "Charlie"]);
    let expenses = vec![
        ExpenseDraft::new("Lunch")
            .creditor("Alice", money(1500))
            .debtor("Bob")
            .validate(&members)
            .expect("valid"),
    ];

    let balances = compute_balances(&members, &expenses).expect("computes");

    assert_eq!(balances.len(), 3);
    assert_eq!(balances.get("Charlie"), Some(Money::ZERO));
}

#[test]
fn two_huge_expenses_report_overflow_instead_of_wrapping() {
    let members = MemberSet::new(["Alice", "Bob"]);
    let dinner = ExpenseDraft::new("Dinner")
        .creditor("Alice", money(5_000_000_000_000_000_000))
        .debtor("Bob")
        .validate(&members)
        .expect("valid on its own");
    let expenses = vec![dinner.clone(), dinner];

    let err = compute_balances(&members, &expenses).expect_err("balances overflow");

    assert_eq!(
        err,
        LedgerError::Validation(ValidationError::AmountOverflow {
            member: MemberName::from("Alice")
        })
    );
    assert!(!err.is_internal());
}
