mod config;
mod snapshot_file;

use crate::{
    config::{AppConfig, ConfigError, OutputFormat},
    snapshot_file::JsonFileSnapshots,
};
use splitred_application::{LedgerProcessor, LedgerReport, ReportError};
use splitred_domain::ValidationError;
use splitred_i18n as i18n;
use splitred_presentation::{
    ReportDto, SettlementPresenter, format_member_in_use, format_report_error,
    format_validation_error,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{message}")]
    Report { message: String, internal: bool },
    #[error("{0}")]
    Rejected(String),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    /// 1 for bad input, 2 for faults of the tool itself.
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Report { internal: true, .. } | Self::Encode(_) => ExitCode::from(2),
            Self::Config(_) | Self::Report { .. } | Self::Rejected(_) => ExitCode::from(1),
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    match AppConfig::from_env().map_err(CliError::from).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code()
        }
    }
}

/// Logs go to stderr so report output stays machine-readable.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: AppConfig) -> Result<(), CliError> {
    let format = config.money_format;
    let source = JsonFileSnapshots::new(format);
    let processor = LedgerProcessor::new(&source);
    let group_id = config.snapshot.as_str();
    let report_error = |err: ReportError| CliError::Report {
        message: format_report_error(&err, format),
        internal: err.is_internal(),
    };

    tracing::info!(
        snapshot = %group_id,
        output = ?config.output,
        minor_units = format.minor_units(),
        "Computing settlement"
    );

    if !config.breakdown && config.removable_member.is_none() {
        let report = processor
            .report_for_group(group_id)
            .map_err(report_error)?;
        return print_report(&report, &config);
    }

    let snapshot = processor
        .load_snapshot(group_id)
        .map_err(report_error)?;
    let expenses = processor
        .validate_expenses(&snapshot.members, snapshot.expenses)
        .map_err(report_error)?;

    if let Some(member) = config.removable_member.as_deref() {
        if !snapshot.members.contains(member) {
            let unknown = ValidationError::UnknownMember {
                name: member.into(),
            };
            return Err(CliError::Rejected(format_validation_error(&unknown, format)));
        }
        processor
            .check_member_removable(member, &expenses)
            .map_err(|err| CliError::Rejected(format_member_in_use(&err)))?;
        println!("{}", i18n::member_removable(member));
        return Ok(());
    }

    for expense in &expenses {
        print!("{}", SettlementPresenter::render_breakdown(expense, format));
    }
    println!();

    let report = processor
        .build_report(&snapshot.members, &expenses)
        .map_err(report_error)?;
    print_report(&report, &config)
}

fn print_report(report: &LedgerReport, config: &AppConfig) -> Result<(), CliError> {
    let format = config.money_format;

    match config.output {
        OutputFormat::Table => {
            let view = SettlementPresenter::render(report, format);
            print!("{}", view.balance_table);
            println!();
            match view.payment_table {
                Some(table) => print!("{table}"),
                None => println!("{}", i18n::NO_PAYMENTS_NEEDED),
            }
        }
        OutputFormat::Json => {
            let dto = ReportDto::from_report(report, format);
            println!("{}", serde_json::to_string_pretty(&dto)?);
        }
        OutputFormat::Summary => {
            print!(
                "{}",
                SettlementPresenter::render_summary(&report.payments, format)
            );
        }
    }

    Ok(())
}
