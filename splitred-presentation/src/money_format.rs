use splitred_domain::Money;

pub const MAX_MINOR_UNITS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountParseError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount `{0}`")]
    Invalid(String),
    #[error("amount `{input}` has more than {allowed} decimal places")]
    TooManyDecimals { input: String, allowed: u32 },
    #[error("amount `{0}` is too large")]
    Overflow(String),
}

/// Converts between [`Money`] and decimal strings at the system boundary.
///
/// `minor_units` is the number of decimal places of the currency, e.g. `2`
/// for cents. Values above [`MAX_MINOR_UNITS`] are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyFormat {
    minor_units: u32,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new(2)
    }
}

impl MoneyFormat {
    pub fn new(minor_units: u32) -> Self {
        Self {
            minor_units: minor_units.min(MAX_MINOR_UNITS),
        }
    }

    pub fn minor_units(self) -> u32 {
        self.minor_units
    }

    fn scale(self) -> u64 {
        10u64.pow(self.minor_units)
    }

    /// `-12.34`, `0.05`, `25.00`
    pub fn format(self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let abs = amount.minor_units().unsigned_abs();
        if self.minor_units == 0 {
            return format!("{sign}{abs}");
        }

        let scale = self.scale();
        let width = self.minor_units as usize;
        format!("{sign}{}.{:0width$}", abs / scale, abs % scale)
    }

    /// Like [`MoneyFormat::format`] but positive values carry a leading `+`.
    pub fn format_signed(self, amount: Money) -> String {
        if amount.is_positive() {
            format!("+{}", self.format(amount))
        } else {
            self.format(amount)
        }
    }

    /// Parses `[+-]major[.minor]`. Floats never take part; the digits are read
    /// straight into minor units.
    pub fn parse(self, input: &str) -> Result<Money, AmountParseError> {
        let invalid = || AmountParseError::Invalid(input.to_string());
        let overflow = || AmountParseError::Overflow(input.to_string());

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (major, fraction) = match rest.split_once('.') {
            Some((major, fraction)) => (major, fraction),
            None => (rest, ""),
        };
        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > self.minor_units as usize {
            return Err(AmountParseError::TooManyDecimals {
                input: input.to_string(),
                allowed: self.minor_units,
            });
        }

        let major: i64 = major.parse().map_err(|_| overflow())?;
        let fraction_value: i64 = if fraction.is_empty() {
            0
        } else {
            let padding = self.minor_units - fraction.len() as u32;
            let digits: i64 = fraction.parse().map_err(|_| invalid())?;
            digits * 10i64.pow(padding)
        };

        let units = major
            .checked_mul(10i64.pow(self.minor_units))
            .and_then(|value| value.checked_add(fraction_value))
            .ok_or_else(overflow)?;

        Ok(Money::from_minor(if negative { -units } else { units }))
    }
}
