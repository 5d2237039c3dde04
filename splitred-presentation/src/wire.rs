//! Wire shapes for the boundary. Money always travels as a decimal string.

use crate::money_format::{AmountParseError, MoneyFormat};
use serde::{Deserialize, Serialize};
use splitred_application::{GroupSnapshot, LedgerReport};
use splitred_domain::{CreditorShare, ExpenseDraft, MemberSet, Payment};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDto {
    pub balances: BTreeMap<String, String>,
    pub payments: Vec<PaymentDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDto {
    pub from: String,
    pub to: String,
    pub amount: String,
}

impl ReportDto {
    pub fn from_report(report: &LedgerReport, format: MoneyFormat) -> Self {
        Self {
            balances: report
                .balances
                .iter()
                .map(|(member, balance)| (member.to_string(), format.format(balance)))
                .collect(),
            payments: report
                .payments
                .iter()
                .map(|payment| PaymentDto::from_payment(payment, format))
                .collect(),
        }
    }
}

impl PaymentDto {
    pub fn from_payment(payment: &Payment, format: MoneyFormat) -> Self {
        Self {
            from: payment.from.to_string(),
            to: payment.to.to_string(),
            amount: format.format(payment.amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshotDto {
    pub members: Vec<String>,
    #[serde(default)]
    pub expenses: Vec<ExpenseDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDto {
    pub description: String,
    pub creditors: Vec<CreditorDto>,
    pub debtors: Vec<String>,
    /// Defaults to the creditor total when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditorDto {
    pub member: String,
    pub amount: String,
}

impl GroupSnapshotDto {
    /// Parses every amount; shape and membership rules are left to validation.
    pub fn into_snapshot(self, format: MoneyFormat) -> Result<GroupSnapshot, AmountParseError> {
        let expenses = self
            .expenses
            .into_iter()
            .map(|expense| expense.into_draft(format))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GroupSnapshot {
            members: MemberSet::new(self.members),
            expenses,
        })
    }
}

impl ExpenseDto {
    pub fn into_draft(self, format: MoneyFormat) -> Result<ExpenseDraft, AmountParseError> {
        let creditors = self
            .creditors
            .into_iter()
            .map(|creditor| -> Result<CreditorShare, AmountParseError> {
                Ok(CreditorShare {
                    member: creditor.member.into(),
                    amount: format.parse(&creditor.amount)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let price = self
            .price
            .as_deref()
            .map(|price| format.parse(price))
            .transpose()?;

        Ok(ExpenseDraft {
            description: self.description,
            creditors,
            debtors: self.debtors.into_iter().map(Into::into).collect(),
            price,
        })
    }
}
