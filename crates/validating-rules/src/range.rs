//! # Range
//!
//! `range` checks membership in a list (`in`) or an inclusive interval
//! (`between`). Interval bounds compare numbers, strings or dates of the
//! same kind; values of any other kind are out of range.

use std::cmp::Ordering;

use validating_core::{
    ConfigError, Messages, OptionReader, Options, Outcome, Settings, Validator, Value,
};

use crate::Builtin;

/// The accepted values of a [`Range`].
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    /// Strict-equality membership. Arrays and objects match by contents.
    In(Vec<Value>),
    /// Inclusive `start..=stop`.
    Between(Value, Value),
}

/// A value inside configured bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    settings: Settings,
    bounds: Bounds,
}

impl Range {
    /// A `range` validator over the given bounds.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            settings: Settings::new(Messages::new([
                ("in", "Not in the list of valid options."),
                ("between", "Must be between {{start}} and {{stop}}."),
            ])),
            bounds,
        }
    }

    /// Membership in `values`.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(Bounds::In(values.into_iter().map(Into::into).collect()))
    }

    /// Inclusive interval.
    pub fn between(start: impl Into<Value>, stop: impl Into<Value>) -> Self {
        Self::new(Bounds::Between(start.into(), stop.into()))
    }

    /// The configured bounds.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

impl Builtin for Range {
    const NAME: &'static str = "range";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let within = reader.list("in")?;
        let between = reader.list("between")?;
        let bounds = match (within, between) {
            (Some(values), None) => Bounds::In(values),
            (None, Some(pair)) => match <[Value; 2]>::try_from(pair) {
                Ok([start, stop]) => Bounds::Between(start, stop),
                Err(pair) => {
                    return Err(ConfigError::invalid_option(
                        Self::NAME,
                        "between",
                        format!("expected [start, stop], got {} element(s)", pair.len()),
                    ))
                }
            },
            (Some(_), Some(_)) => {
                return Err(ConfigError::invalid_option(
                    Self::NAME,
                    "in",
                    "`in` and `between` are mutually exclusive",
                ))
            }
            (None, None) => return Err(ConfigError::missing_option(Self::NAME, "in or between")),
        };
        let mut validator = Self::new(bounds);
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Range {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn reference(&self, token: &str) -> Option<String> {
        match (&self.bounds, token) {
            (Bounds::Between(start, _), "start") => Some(start.to_string()),
            (Bounds::Between(_, stop), "stop") => Some(stop.to_string()),
            _ => None,
        }
    }

    fn check(&self, value: &Value) -> Outcome {
        match &self.bounds {
            Bounds::In(values) => {
                if values.iter().any(|v| v.strict_eq(value)) {
                    Outcome::Valid
                } else {
                    self.fail("in")
                }
            }
            Bounds::Between(start, stop) => {
                let above = matches!(
                    value.loose_cmp(start),
                    Some(Ordering::Greater | Ordering::Equal)
                );
                let below = matches!(value.loose_cmp(stop), Some(Ordering::Less | Ordering::Equal));
                if above && below {
                    Outcome::Valid
                } else {
                    self.fail("between")
                }
            }
        }
    }
}
