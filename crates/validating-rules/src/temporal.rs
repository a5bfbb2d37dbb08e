//! # Dates and Times
//!
//! `date`, `time` and `datetime` accept concrete [`Value::Date`] values
//! outright and otherwise match the coerced text against a fixed layout.
//! Field bounds are coarse (months below 13, days below 32); calendar
//! validity such as February 30 is not checked.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use validating_core::{
    ConfigError, Messages, OptionReader, Options, Outcome, Settings, Validator, Value, DEFAULT_KEY,
};

use crate::{coerce, Builtin};

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("date pattern compiles")
});

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2})$").expect("time pattern compiles")
});

static DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})[\s|T]?([0-9]{2}):([0-9]{2}):([0-9]{2})(?:.[0-9]{1,3})?Z?$",
    )
    .expect("datetime pattern compiles")
});

/// Numeric value of capture group `index`, or `u32::MAX` if absent.
fn field(captures: &Captures<'_>, index: usize) -> u32 {
    captures
        .get(index)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(u32::MAX)
}

fn date_in_bounds(captures: &Captures<'_>, month: usize, day: usize) -> bool {
    field(captures, month) < 13 && field(captures, day) < 32
}

fn time_in_bounds(captures: &Captures<'_>, hour: usize) -> bool {
    field(captures, hour) < 24 && field(captures, hour + 1) < 60 && field(captures, hour + 2) < 60
}

/// Shared shape of the three temporal validators.
macro_rules! temporal_validator {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $message:literal, $accepts:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty {
            settings: Settings,
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $ty {
            #[doc = concat!("A `", $name, "` validator.")]
            pub fn new() -> Self {
                Self {
                    settings: Settings::new(Messages::single($message)),
                }
            }
        }

        impl Builtin for $ty {
            const NAME: &'static str = $name;

            fn from_options(options: &Options) -> Result<Self, ConfigError> {
                let mut reader = OptionReader::new(Self::NAME, options);
                let mut validator = Self::new();
                validator.settings.configure(&mut reader)?;
                reader.finish()?;
                Ok(validator)
            }
        }

        impl Validator for $ty {
            fn name(&self) -> &str {
                Self::NAME
            }

            fn settings(&self) -> &Settings {
                &self.settings
            }

            fn settings_mut(&mut self) -> &mut Settings {
                &mut self.settings
            }

            fn check(&self, value: &Value) -> Outcome {
                let accepts: fn(&str) -> bool = $accepts;
                if matches!(value, Value::Date(_)) || accepts(&coerce(value)) {
                    Outcome::Valid
                } else {
                    self.fail(DEFAULT_KEY)
                }
            }
        }
    };
}

temporal_validator!(
    /// A `YYYY-MM-DD` date.
    Date,
    "date",
    "Not a valid date.",
    |text| DATE.captures(text).is_some_and(|c| date_in_bounds(&c, 2, 3))
);

temporal_validator!(
    /// An `HH:MM:SS` time.
    Time,
    "time",
    "Not a valid time.",
    |text| TIME.captures(text).is_some_and(|c| time_in_bounds(&c, 1))
);

temporal_validator!(
    /// A date and time joined by `T`, whitespace or nothing, with optional
    /// milliseconds and a trailing `Z`.
    DateTime,
    "datetime",
    "Not a valid date / time.",
    |text| {
        DATETIME
            .captures(text)
            .is_some_and(|c| date_in_bounds(&c, 2, 3) && time_in_bounds(&c, 4))
    }
);
