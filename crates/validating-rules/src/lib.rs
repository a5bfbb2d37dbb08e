//! # validating-rules — Built-in Validator Catalog
//!
//! One struct per rule, each implementing [`Validator`] and [`Builtin`]:
//!
//! | Name | Type | Module |
//! |---|---|---|
//! | `required` | [`Required`] | [`presence`] |
//! | `type`, `instanceOf` | [`Type`], [`InstanceOf`] | [`kind`] |
//! | `length` | [`Length`] | [`length`] |
//! | `number` | [`Number`] | [`number`] |
//! | `boolean` | [`Boolean`] | [`boolean`] |
//! | `regexp` | [`Regexp`] | [`pattern`] |
//! | `range` | [`Range`] | [`range`] |
//! | `url`, `email`, `ip`, `hostname` | [`Url`], [`Email`], [`Ip`], [`Hostname`] | [`network`] |
//! | `date`, `time`, `datetime` | [`Date`], [`Time`], [`DateTime`] | [`temporal`] |
//!
//! Every validator can be built directly through its typed constructors for
//! standalone checks, or from untyped [`Options`] via
//! [`Builtin::from_options`], which is what the registry uses. Option
//! problems surface as [`ConfigError`]s at construction; validation itself
//! only ever returns an [`Outcome`](validating_core::Outcome).

use std::borrow::Cow;

use validating_core::{ConfigError, Options, Validator, Value};

pub mod boolean;
pub mod kind;
pub mod length;
pub mod network;
pub mod number;
pub mod pattern;
pub mod presence;
pub mod range;
pub mod temporal;

pub use boolean::Boolean;
pub use kind::{ClassRef, InstanceOf, Type};
pub use length::Length;
pub use network::{Email, Hostname, Ip, Url};
pub use number::Number;
pub use pattern::Regexp;
pub use presence::Required;
pub use range::{Bounds, Range};
pub use temporal::{Date, DateTime, Time};

/// A catalog entry: a validator with a registry name and an options-based
/// constructor.
pub trait Builtin: Validator + Sized + 'static {
    /// The registry name.
    const NAME: &'static str;

    /// Build the validator from untyped options.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing, mistyped or unknown options.
    fn from_options(options: &Options) -> Result<Self, ConfigError>;
}

/// Constructor signature stored for each catalog entry.
pub type BuiltinFactory = fn(&Options) -> Result<Box<dyn Validator>, ConfigError>;

/// Build any catalog entry as a boxed validator.
pub fn create<B: Builtin>(options: &Options) -> Result<Box<dyn Validator>, ConfigError> {
    Ok(Box::new(B::from_options(options)?))
}

/// All catalog entries as `(name, factory)` pairs.
pub fn builtins() -> Vec<(&'static str, BuiltinFactory)> {
    vec![
        (Required::NAME, create::<Required> as BuiltinFactory),
        (Type::NAME, create::<Type>),
        (InstanceOf::NAME, create::<InstanceOf>),
        (Length::NAME, create::<Length>),
        (Number::NAME, create::<Number>),
        (Boolean::NAME, create::<Boolean>),
        (Regexp::NAME, create::<Regexp>),
        (Range::NAME, create::<Range>),
        (Url::NAME, create::<Url>),
        (Email::NAME, create::<Email>),
        (Ip::NAME, create::<Ip>),
        (Hostname::NAME, create::<Hostname>),
        (Date::NAME, create::<Date>),
        (Time::NAME, create::<Time>),
        (DateTime::NAME, create::<DateTime>),
    ]
}

/// String coercion of a value for the pattern-matching validators.
pub(crate) fn coerce(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
