use arcstr::ArcStr;
use fxhash::FxHashSet;
use smallvec::SmallVec;
use std::{
    borrow::Borrow,
    collections::{BTreeMap, btree_map},
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use crate::{error::ValidationError, services::ConsistencyValidator};

/// Signed amount of money counted in minor currency units (e.g. cents).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_minor(units: i64) -> Self {
        Self(units)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// `None` for `i64::MIN`, whose magnitude has no `Money` representation.
    pub fn checked_abs(self) -> Option<Self> {
        self.0.checked_abs().map(Self)
    }

    /// Splits the amount into `parts` shares that differ by at most one minor unit.
    ///
    /// The leftover units go to the leading shares, so callers control who absorbs
    /// them through the order they zip the result with. Returns `None` for zero parts.
    pub fn split_even(self, parts: usize) -> Option<SmallVec<[Money; 8]>> {
        let count = i64::try_from(parts).ok().filter(|count| *count > 0)?;
        let base = self.0.div_euclid(count);
        let remainder = self.0.rem_euclid(count) as usize;

        Some(
            (0..parts)
                .map(|idx| {
                    if idx < remainder {
                        Self(base + 1)
                    } else {
                        Self(base)
                    }
                })
                .collect(),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Name of a group member. Ordering is byte-wise on the name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberName(ArcStr);

impl MemberName {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MemberName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberName {
    fn from(name: &str) -> Self {
        Self(ArcStr::from(name))
    }
}

impl From<String> for MemberName {
    fn from(name: String) -> Self {
        Self(ArcStr::from(name))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberSet {
    members: FxHashSet<MemberName>,
}

impl MemberSet {
    pub fn new<I, M>(members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberName>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberName> + '_ {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<M: Into<MemberName>> FromIterator<M> for MemberSet {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreditorShare {
    pub member: MemberName,
    pub amount: Money,
}

/// Unvalidated expense as assembled by a form; turn it into an [`ExpenseRecord`]
/// with [`ExpenseDraft::validate`].
///
/// When `price` is left empty the creditor total is used as the price.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub description: String,
    pub creditors: Vec<CreditorShare>,
    pub debtors: Vec<MemberName>,
    pub price: Option<Money>,
}

impl ExpenseDraft {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn creditor(mut self, member: impl Into<MemberName>, amount: Money) -> Self {
        self.creditors.push(CreditorShare {
            member: member.into(),
            amount,
        });
        self
    }

    pub fn debtor(mut self, member: impl Into<MemberName>) -> Self {
        self.debtors.push(member.into());
        self
    }

    pub fn debtors<I, M>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberName>,
    {
        self.debtors.extend(members.into_iter().map(Into::into));
        self
    }

    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn validate(self, members: &MemberSet) -> Result<ExpenseRecord, ValidationError> {
        ConsistencyValidator::validate_expense(self, members)
    }
}

/// A validated expense. Only [`ConsistencyValidator`] constructs these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRecord {
    description: String,
    creditors: Vec<CreditorShare>,
    // sorted by name, no duplicates
    debtors: Vec<MemberName>,
    price: Money,
}

impl ExpenseRecord {
    pub(crate) fn from_validated_parts(
        description: String,
        creditors: Vec<CreditorShare>,
        debtors: Vec<MemberName>,
        price: Money,
    ) -> Self {
        Self {
            description,
            creditors,
            debtors,
            price,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn creditors(&self) -> &[CreditorShare] {
        &self.creditors
    }

    pub fn debtors(&self) -> &[MemberName] {
        &self.debtors
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Each debtor's share of the price, alphabetically. Leftover minor units go
    /// to the alphabetically first debtors.
    ///
    /// `None` only when there are no debtors, which validation rules out.
    pub fn debtor_shares(&self) -> Option<SmallVec<[(MemberName, Money); 8]>> {
        let shares = self.price.split_even(self.debtors.len())?;
        Some(self.debtors.iter().cloned().zip(shares).collect())
    }

    pub fn references(&self, member: &str) -> bool {
        self.creditors.iter().any(|c| c.member.as_str() == member)
            || self.debtors.iter().any(|d| d.as_str() == member)
    }

    pub fn referenced_names(&self) -> impl Iterator<Item = &MemberName> + '_ {
        self.creditors
            .iter()
            .map(|c| &c.member)
            .chain(self.debtors.iter())
    }

    /// Editable copy; edits go back through validation as a new record.
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            description: self.description.clone(),
            creditors: self.creditors.clone(),
            debtors: self.debtors.clone(),
            price: Some(self.price),
        }
    }
}

/// Net position per member: positive is owed money, negative owes money.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceMap {
    balances: BTreeMap<MemberName, Money>,
}

impl BalanceMap {
    pub fn zeroed(members: &MemberSet) -> Self {
        members
            .iter()
            .cloned()
            .map(|member| (member, Money::ZERO))
            .collect()
    }

    pub fn get(&self, member: &str) -> Option<Money> {
        self.balances.get(member).copied()
    }

    pub(crate) fn get_mut(&mut self, member: &str) -> Option<&mut Money> {
        self.balances.get_mut(member)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberName, Money)> + '_ {
        self.balances.iter().map(|(member, balance)| (member, *balance))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Sum of all balances, widened so that it cannot overflow.
    pub fn total(&self) -> i128 {
        self.balances
            .values()
            .map(|balance| i128::from(balance.minor_units()))
            .sum()
    }

    pub fn nonzero_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    pub fn is_settled(&self) -> bool {
        self.balances.values().all(|b| b.is_zero())
    }

    /// Applies a settlement payment: the payer's debt shrinks and the payee's
    /// claim shrinks by the same amount. Unknown members are ignored.
    pub fn apply(&mut self, payment: &Payment) {
        if let Some(balance) = self.balances.get_mut(payment.from.as_str()) {
            *balance += payment.amount;
        }
        if let Some(balance) = self.balances.get_mut(payment.to.as_str()) {
            *balance -= payment.amount;
        }
    }
}

impl FromIterator<(MemberName, Money)> for BalanceMap {
    fn from_iter<I: IntoIterator<Item = (MemberName, Money)>>(iter: I) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BalanceMap {
    type Item = (&'a MemberName, &'a Money);
    type IntoIter = btree_map::Iter<'a, MemberName, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.balances.iter()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub from: MemberName,
    pub to: MemberName,
    pub amount: Money,
}
