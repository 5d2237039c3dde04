#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

use std::fmt::Display;

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const NO_PAYMENTS_NEEDED: &str = "全員の精算が済んでいます。";
    pub const SETTLEMENT_CALCULATION_FAILED: &str = "清算の計算に失敗しました";
    pub const CALCULATION_CANCELLED: &str = "計算が中断されました";
    pub const EMPTY_DESCRIPTION: &str = "支出の説明が空です。";
    pub const EMPTY_CREDITORS: &str = "支払者が一人も指定されていません。";
    pub const EMPTY_DEBTORS: &str = "負担者が一人も選択されていません。";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const NO_PAYMENTS_NEEDED: &str = "Everyone is settled up.";
    pub const SETTLEMENT_CALCULATION_FAILED: &str = "Settlement calculation failed";
    pub const CALCULATION_CANCELLED: &str = "Calculation was cancelled";
    pub const EMPTY_DESCRIPTION: &str = "The expense needs a description.";
    pub const EMPTY_CREDITORS: &str = "Add at least one member who paid.";
    pub const EMPTY_DEBTORS: &str = "Select at least one member who shares the cost.";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn owed_by(creditor: impl Display) -> String {
    format!("{creditor} さんへの支払い:")
}

#[cfg(feature = "ja")]
pub fn non_positive_price(price: impl Display) -> String {
    format!("支出の合計 {price} は 0 より大きくなければなりません。")
}

#[cfg(feature = "ja")]
pub fn non_positive_creditor_amount(member: impl Display, amount: impl Display) -> String {
    format!("{member} さんの支払額 {amount} は 0 より大きくなければなりません。")
}

#[cfg(feature = "ja")]
pub fn duplicate_debtor(member: impl Display) -> String {
    format!("{member} さんが負担者に重複して含まれています。")
}

#[cfg(feature = "ja")]
pub fn unknown_member(member: impl Display) -> String {
    format!("{member} さんはこのグループのメンバーではありません。")
}

#[cfg(feature = "ja")]
pub fn amount_overflow(member: impl Display) -> String {
    format!("{member} さんの収支が扱える金額の範囲を超えました。")
}

#[cfg(feature = "ja")]
pub fn member_removable(member: impl Display) -> String {
    format!("{member} さんはグループから削除できます。")
}

#[cfg(feature = "ja")]
pub fn member_in_use(member: impl Display, description: impl Display) -> String {
    format!("{member} さんは支出「{description}」に含まれているため削除できません。")
}

#[cfg(feature = "ja")]
pub fn group_not_found(group: impl Display) -> String {
    format!("グループ '{group}' が見つかりません。")
}

#[cfg(feature = "ja")]
pub fn malformed_snapshot(detail: impl Display) -> String {
    format!("入力データを読み取れません: {detail}")
}

#[cfg(feature = "ja")]
pub fn invalid_expense(position: usize, detail: impl Display) -> String {
    format!("{position} 番目の支出が不正です: {detail}")
}

#[cfg(not(feature = "ja"))]
pub fn owed_by(creditor: impl Display) -> String {
    format!("{creditor} is owed by:")
}

#[cfg(not(feature = "ja"))]
pub fn non_positive_price(price: impl Display) -> String {
    format!("The expense total {price} must be greater than zero.")
}

#[cfg(not(feature = "ja"))]
pub fn non_positive_creditor_amount(member: impl Display, amount: impl Display) -> String {
    format!("{member} paid {amount}; amounts must be greater than zero.")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_debtor(member: impl Display) -> String {
    format!("{member} is selected more than once as a debtor.")
}

#[cfg(not(feature = "ja"))]
pub fn unknown_member(member: impl Display) -> String {
    format!("{member} is not a member of this group.")
}

#[cfg(not(feature = "ja"))]
pub fn amount_overflow(member: impl Display) -> String {
    format!("The amounts involving {member} are too large to settle.")
}

#[cfg(not(feature = "ja"))]
pub fn member_removable(member: impl Display) -> String {
    format!("{member} can be removed from the group.")
}

#[cfg(not(feature = "ja"))]
pub fn member_in_use(member: impl Display, description: impl Display) -> String {
    format!("{member} appears in the expense '{description}' and cannot be removed.")
}

#[cfg(not(feature = "ja"))]
pub fn group_not_found(group: impl Display) -> String {
    format!("Group '{group}' was not found.")
}

#[cfg(not(feature = "ja"))]
pub fn malformed_snapshot(detail: impl Display) -> String {
    format!("Could not read the group data: {detail}")
}

#[cfg(not(feature = "ja"))]
pub fn invalid_expense(position: usize, detail: impl Display) -> String {
    format!("Expense #{position} is invalid: {detail}")
}

pub struct CreditorSumMismatchMessage<T> {
    price: T,
    total: Option<T>,
}

pub fn creditor_sum_mismatch<T: Display>(price: T, total: Option<T>) -> CreditorSumMismatchMessage<T> {
    CreditorSumMismatchMessage { price, total }
}

#[cfg(feature = "ja")]
impl<T: Display> Display for CreditorSumMismatchMessage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.total {
            Some(total) => write!(
                f,
                "支払額の合計 {total} が支出の合計 {} と一致しません。",
                self.price
            ),
            None => f.write_str("支払額の合計が大きすぎます。"),
        }
    }
}

#[cfg(not(feature = "ja"))]
impl<T: Display> Display for CreditorSumMismatchMessage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.total {
            Some(total) => write!(
                f,
                "The amounts paid add up to {total}, but the expense total is {}.",
                self.price
            ),
            None => f.write_str("The amounts paid are too large to add up."),
        }
    }
}
