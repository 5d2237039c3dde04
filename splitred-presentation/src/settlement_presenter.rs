use crate::{
    money_format::MoneyFormat,
    text_table::{Alignment, TextTableBuilder},
};
use indexmap::IndexMap;
use splitred_application::LedgerReport;
use splitred_domain::{BalanceMap, ExpenseRecord, MemberName, Money, Payment};
use splitred_i18n as i18n;
use std::{borrow::Cow, fmt::Write};

pub struct SettlementPresenter;

pub struct SettlementView {
    pub balance_table: String,
    pub payment_table: Option<String>,
}

impl SettlementPresenter {
    pub fn render(report: &LedgerReport, format: MoneyFormat) -> SettlementView {
        let balance_table = Self::build_balance_table(&report.balances, format);

        if report.payments.is_empty() {
            SettlementView {
                balance_table,
                payment_table: None,
            }
        } else {
            SettlementView {
                balance_table,
                payment_table: Some(Self::build_payment_table(&report.payments, format)),
            }
        }
    }

    pub fn build_balance_table(balances: &BalanceMap, format: MoneyFormat) -> String {
        let headers = [Cow::Borrowed(i18n::MEMBER), Cow::Borrowed(i18n::BALANCE)];
        let builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&headers);

        builder
            .rows(balances.iter().map(|(member, balance)| {
                [
                    Cow::Owned(member.to_string()),
                    Cow::Owned(format.format_signed(balance)),
                ]
            }))
            .build()
    }

    pub fn build_payment_table(payments: &[Payment], format: MoneyFormat) -> String {
        let headers = [
            Cow::Borrowed(i18n::FROM),
            Cow::Borrowed(i18n::TO),
            Cow::Borrowed(i18n::AMOUNT),
        ];
        let builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&headers);

        builder
            .rows(payments.iter().map(|payment| {
                [
                    Cow::Owned(payment.from.to_string()),
                    Cow::Owned(payment.to.to_string()),
                    Cow::Owned(format.format(payment.amount)),
                ]
            }))
            .build()
    }

    /// Payments grouped under the member who receives them, in plan order.
    pub fn render_summary(payments: &[Payment], format: MoneyFormat) -> String {
        if payments.is_empty() {
            return format!("{}\n", i18n::NO_PAYMENTS_NEEDED);
        }

        let mut by_creditor: IndexMap<&MemberName, Vec<(&MemberName, Money)>> = IndexMap::new();
        for payment in payments {
            by_creditor
                .entry(&payment.to)
                .or_default()
                .push((&payment.from, payment.amount));
        }

        let mut out = String::new();
        for (creditor, debts) in by_creditor {
            let _ = writeln!(out, "{}", i18n::owed_by(creditor));
            for (debtor, amount) in debts {
                let _ = writeln!(out, "  {debtor}: {}", format.format(amount));
            }
        }
        out
    }

    /// One expense with each debtor's share, for verbose output.
    pub fn render_breakdown(expense: &ExpenseRecord, format: MoneyFormat) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} ({})",
            expense.description(),
            format.format(expense.price())
        );
        for creditor in expense.creditors() {
            let _ = writeln!(
                out,
                "  + {}: {}",
                creditor.member,
                format.format(creditor.amount)
            );
        }
        for (debtor, share) in expense.debtor_shares().unwrap_or_default() {
            let _ = writeln!(out, "  - {debtor}: {}", format.format(share));
        }
        out
    }
}
