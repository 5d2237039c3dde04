use clap::{Parser, ValueEnum};
use splitred_presentation::{MoneyFormat, money_format::MAX_MINOR_UNITS};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "splitred", about = "Settle up shared group expenses")]
#[command(version)]
pub struct Cli {
    /// Group snapshot as JSON: `members` plus `expenses`
    pub snapshot: PathBuf,

    #[arg(short, long, env = "SPLITRED_OUTPUT", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Decimal places of the currency
    #[arg(long, env = "SPLITRED_MINOR_UNITS", default_value_t = 2)]
    pub minor_units: u32,

    /// Print every expense with its per-member shares before the report
    #[arg(long)]
    pub breakdown: bool,

    /// Only check whether MEMBER could leave the group
    #[arg(long, value_name = "MEMBER")]
    pub can_remove: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Summary,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SPLITRED_MINOR_UNITS must be between 0 and {max}, got {value}")]
    MinorUnitsOutOfRange { value: u32, max: u32 },
    #[error("snapshot path {} is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),
}

pub struct AppConfig {
    /// Also the group id handed to the snapshot source.
    pub snapshot: String,
    pub output: OutputFormat,
    pub money_format: MoneyFormat,
    pub breakdown: bool,
    pub removable_member: Option<String>,
}

impl AppConfig {
    /// Loads `.env` first so its values reach clap's `env` fallbacks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.minor_units > MAX_MINOR_UNITS {
            return Err(ConfigError::MinorUnitsOutOfRange {
                value: cli.minor_units,
                max: MAX_MINOR_UNITS,
            });
        }

        let snapshot = cli
            .snapshot
            .into_os_string()
            .into_string()
            .map_err(|raw| ConfigError::NonUtf8Path(PathBuf::from(raw)))?;

        Ok(Self {
            snapshot,
            output: cli.format,
            money_format: MoneyFormat::new(cli.minor_units),
            breakdown: cli.breakdown,
            removable_member: cli.can_remove,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("splitred").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[rstest]
    #[case::json(&["group.json", "--format", "json"], OutputFormat::Json)]
    #[case::summary(&["group.json", "-f", "summary"], OutputFormat::Summary)]
    #[case::table(&["group.json", "--format", "table"], OutputFormat::Table)]
    fn output_format_is_selectable(#[case] args: &[&str], #[case] expected: OutputFormat) {
        let config = AppConfig::from_cli(parse(args)).expect("valid config");
        assert_eq!(config.output, expected);
    }

    #[test]
    fn minor_units_flow_into_money_format() {
        let config = AppConfig::from_cli(parse(&["group.json", "--minor-units", "0"]))
            .expect("valid config");
        assert_eq!(config.money_format.minor_units(), 0);
    }

    #[test]
    fn too_many_minor_units_are_rejected() {
        let result = AppConfig::from_cli(parse(&["group.json", "--minor-units", "9"]));
        assert!(matches!(
            result,
            Err(ConfigError::MinorUnitsOutOfRange { value: 9, max: 6 })
        ));
    }

    #[test]
    fn removal_check_takes_a_member_name() {
        let config = AppConfig::from_cli(parse(&["group.json", "--can-remove", "Bob"]))
            .expect("valid config");
        assert_eq!(config.removable_member.as_deref(), Some("Bob"));
        assert!(!config.breakdown);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_snapshot_path_is_rejected() {
        use std::{ffi::OsString, os::unix::ffi::OsStringExt};

        let path = OsString::from_vec(b"group-\xff.json".to_vec());
        let cli = Cli::try_parse_from([OsString::from("splitred"), path.clone()])
            .expect("arguments parse");

        let result = AppConfig::from_cli(cli);

        assert!(matches!(
            result,
            Err(ConfigError::NonUtf8Path(rejected)) if rejected.as_os_str() == path.as_os_str()
        ));
    }

    #[test]
    fn snapshot_path_is_kept_verbatim() {
        let config = AppConfig::from_cli(parse(&["trips/ski weekend.json"])).expect("valid config");
        assert_eq!(config.snapshot, "trips/ski weekend.json");
    }

    #[test]
    fn snapshot_path_is_required() {
        assert!(Cli::try_parse_from(["splitred"]).is_err());
    }
}
