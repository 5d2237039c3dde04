#![warn(clippy::uninlined_format_args)]

pub mod error_presenter;
pub mod money_format;
pub mod settlement_presenter;
pub mod text_table;
pub mod wire;

pub use error_presenter::{format_member_in_use, format_report_error, format_validation_error};
pub use money_format::{AmountParseError, MoneyFormat};
pub use settlement_presenter::{SettlementPresenter, SettlementView};
pub use wire::{CreditorDto, ExpenseDto, GroupSnapshotDto, PaymentDto, ReportDto};
