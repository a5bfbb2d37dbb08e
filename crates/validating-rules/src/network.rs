//! # Network Identifiers
//!
//! Pattern-based checks for URLs, email addresses, IP addresses and
//! hostnames. Non-text values are coerced to their string form before
//! matching, so `undefined` is tested as the text `"undefined"`.
//!
//! The patterns are intentionally permissive: they check shape, not
//! deliverability or reachability.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use validating_core::{
    ConfigError, Messages, OptionReader, Options, Outcome, Settings, Validator, Value, DEFAULT_KEY,
};

use crate::{coerce, Builtin};

const DEFAULT_SCHEMES: [&str; 2] = ["http", "https"];

static DEFAULT_URL: LazyLock<Regex> = LazyLock::new(|| {
    url_pattern(&DEFAULT_SCHEMES.map(String::from)).expect("default URL pattern compiles")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)@(([A-Z0-9][A-Z0-9_-]*)(\.[A-Z0-9][A-Z0-9_-]*)+)$")
        .expect("email pattern compiles")
});

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.",
        r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.",
        r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.",
        r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    ))
    .expect("IPv4 pattern compiles")
});

static IPV6: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(([0-9a-fA-F]{1,4}:){7,7}[0-9a-fA-F]{1,4}",
        r"|([0-9a-fA-F]{1,4}:){1,7}:",
        r"|([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}",
        r"|([0-9a-fA-F]{1,4}:){1,5}(:[0-9a-fA-F]{1,4}){1,2}",
        r"|([0-9a-fA-F]{1,4}:){1,4}(:[0-9a-fA-F]{1,4}){1,3}",
        r"|([0-9a-fA-F]{1,4}:){1,3}(:[0-9a-fA-F]{1,4}){1,4}",
        r"|([0-9a-fA-F]{1,4}:){1,2}(:[0-9a-fA-F]{1,4}){1,5}",
        r"|[0-9a-fA-F]{1,4}:((:[0-9a-fA-F]{1,4}){1,6})",
        r"|:((:[0-9a-fA-F]{1,4}){1,7}|:)",
        r"|fe80:(:[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]{1,}",
        r"|::(ffff(:0{1,4}){0,1}:){0,1}((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9]).){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])",
        r"|([0-9a-fA-F]{1,4}:){1,4}:((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9]).){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9]))",
    ))
    .expect("IPv6 pattern compiles")
});

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:(?:(?:(?:[a-zA-Z0-9][-a-zA-Z0-9]{0,61})?[a-zA-Z0-9])[.])*",
        r"(?:[a-zA-Z][-a-zA-Z0-9]{0,61}[a-zA-Z0-9]|[a-zA-Z])[.]?)$",
    ))
    .expect("hostname pattern compiles")
});

/// Scheme prefix (group 1) followed by at least two dotted host labels.
fn url_pattern(schemes: &[String]) -> Result<Regex, regex::Error> {
    let schemes: Vec<String> = schemes.iter().map(|s| regex::escape(s)).collect();
    Regex::new(&format!(
        r"(?i)^(({})://)?(([A-Z0-9][A-Z0-9_-]*)(\.[A-Z0-9][A-Z0-9_-]*)+)",
        schemes.join("|")
    ))
}

fn compile_option(
    validator: &str,
    pattern: &str,
    case_insensitive: bool,
) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| ConfigError::invalid_option(validator, "pattern", e.to_string()))
}

/// A URL with one of the allowed schemes and a dotted host. In strict mode
/// (the default) the scheme is mandatory.
#[derive(Debug, Clone)]
pub struct Url {
    settings: Settings,
    schemes: Vec<String>,
    strict: bool,
    pattern: Regex,
}

impl Default for Url {
    fn default() -> Self {
        Self::new()
    }
}

impl Url {
    /// Strict `http`/`https` URLs.
    pub fn new() -> Self {
        Self {
            settings: Settings::new(Messages::single("Not a valid URL.")),
            schemes: DEFAULT_SCHEMES.map(String::from).to_vec(),
            strict: true,
            pattern: DEFAULT_URL.clone(),
        }
    }

    /// Allow the given schemes instead of `http`/`https`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the resulting pattern does
    /// not compile.
    pub fn with_schemes<I, S>(mut self, schemes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemes = schemes.into_iter().map(Into::into).collect();
        self.pattern = url_pattern(&self.schemes)
            .map_err(|e| ConfigError::invalid_option(Self::NAME, "schemes", e.to_string()))?;
        Ok(self)
    }

    /// Replace the whole pattern. Group 1 is the scheme prefix that strict
    /// mode requires.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }

    /// Require or relax the scheme prefix.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Builder form of [`Url::set_strict`].
    pub fn strict(mut self, strict: bool) -> Self {
        self.set_strict(strict);
        self
    }

    /// Whether a scheme is required.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The allowed schemes.
    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }
}

impl Builtin for Url {
    const NAME: &'static str = "url";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let mut validator = Self::new();
        if let Some(schemes) = reader.strings("schemes")? {
            validator = validator.with_schemes(schemes)?;
        }
        if let Some(strict) = reader.bool("strict")? {
            validator.strict = strict;
        }
        if let Some(pattern) = reader.string("pattern")? {
            validator.pattern = compile_option(Self::NAME, &pattern, true)?;
        }
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Url {
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
        let text = coerce(value);
        match self.pattern.captures(&text) {
            Some(captures) if !self.strict || captures.get(1).is_some() => Outcome::Valid,
            _ => self.fail(DEFAULT_KEY),
        }
    }
}

/// An address with a dotted domain after the `@`.
#[derive(Debug, Clone)]
pub struct Email {
    settings: Settings,
    pattern: Regex,
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Email {
    /// The permissive default pattern.
    pub fn new() -> Self {
        Self {
            settings: Settings::new(Messages::single("Not a valid email address.")),
            pattern: EMAIL.clone(),
        }
    }

    /// Replace the pattern.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }
}

impl Builtin for Email {
    const NAME: &'static str = "email";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let mut validator = Self::new();
        if let Some(pattern) = reader.string("pattern")? {
            validator.pattern = compile_option(Self::NAME, &pattern, false)?;
        }
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Email {
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
        if self.pattern.is_match(&coerce(value)) {
            Outcome::Valid
        } else {
            self.fail(DEFAULT_KEY)
        }
    }
}

/// A dotted-quad IPv4 or an IPv6 address; either family can be disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct Ip {
    settings: Settings,
    v4: bool,
    v6: bool,
}

impl Default for Ip {
    fn default() -> Self {
        Self::new()
    }
}

impl Ip {
    /// Accept both families.
    pub fn new() -> Self {
        Self {
            settings: Settings::new(Messages::single("Not a valid IP address.")),
            v4: true,
            v6: true,
        }
    }

    /// IPv4 only.
    pub fn v4_only() -> Self {
        Self {
            v6: false,
            ..Self::new()
        }
    }

    /// IPv6 only.
    pub fn v6_only() -> Self {
        Self {
            v4: false,
            ..Self::new()
        }
    }
}

impl Builtin for Ip {
    const NAME: &'static str = "ip";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let mut validator = Self::new();
        if let Some(v4) = reader.bool("v4")? {
            validator.v4 = v4;
        }
        if let Some(v6) = reader.bool("v6")? {
            validator.v6 = v6;
        }
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Ip {
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
        let text = coerce(value);
        if (self.v4 && IPV4.is_match(&text)) || (self.v6 && IPV6.is_match(&text)) {
            Outcome::Valid
        } else {
            self.fail(DEFAULT_KEY)
        }
    }
}

/// An RFC 1123 hostname of 1 to 255 characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Hostname {
    settings: Settings,
}

impl Default for Hostname {
    fn default() -> Self {
        Self::new()
    }
}

impl Hostname {
    /// A `hostname` validator.
    pub fn new() -> Self {
        Self {
            settings: Settings::new(Messages::single("Not a valid hostname.")),
        }
    }
}

impl Builtin for Hostname {
    const NAME: &'static str = "hostname";

    fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mut reader = OptionReader::new(Self::NAME, options);
        let mut validator = Self::new();
        validator.settings.configure(&mut reader)?;
        reader.finish()?;
        Ok(validator)
    }
}

impl Validator for Hostname {
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
        let text = coerce(value);
        let length = text.chars().count();
        if (1..=255).contains(&length) && HOSTNAME.is_match(&text) {
            Outcome::Valid
        } else {
            self.fail(DEFAULT_KEY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strict() {
        let validator = Url::new();
        assert_eq!(
            validator.validate(&Value::from("example.com/wat")).error(),
            Some("Not a valid URL.")
        );
        assert!(validator.validate(&Value::from("http://example.com/wat")).is_valid());
        assert!(validator.validate(&Value::from("HTTPS://EXAMPLE.COM")).is_valid());
        assert!(!validator.validate(&Value::from("ftp://example.com")).is_valid());
        assert!(!validator.validate(&Value::from("http://localhost")).is_valid());
    }

    #[test]
    fn test_url_non_strict() {
        let validator = Url::from_options(&Options::new().with("strict", false)).unwrap();
        assert!(!validator.is_strict());
        assert!(validator.validate(&Value::from("example.com/wat")).is_valid());
        assert!(validator.validate(&Value::from("http://example.com/wat")).is_valid());
        assert!(!validator.validate(&Value::from("not a url")).is_valid());
    }

    #[test]
    fn test_url_custom_schemes() {
        let validator = Url::from_options(
            &Options::new().with("schemes", Value::array(["ftp", "git+ssh"])),
        )
        .unwrap();
        assert_eq!(validator.schemes(), ["ftp", "git+ssh"]);
        assert!(validator.validate(&Value::from("ftp://files.example.com")).is_valid());
        assert!(validator.validate(&Value::from("git+ssh://example.com/repo")).is_valid());
        assert!(!validator.validate(&Value::from("http://example.com")).is_valid());
    }

    #[test]
    fn test_url_custom_pattern_is_case_insensitive() {
        let validator = Url::from_options(
            &Options::new().with("pattern", r"^(internal://)?[a-z]+\.corp$"),
        )
        .unwrap();
        assert!(validator.validate(&Value::from("INTERNAL://Wiki.CORP")).is_valid());
        assert!(!validator.validate(&Value::from("wiki.corp")).is_valid());
    }

    #[test]
    fn test_email() {
        let validator = Email::new();
        for ok in ["test@example.com", "someone+tag@mail.example.co.uk", "x@Y.ORG"] {
            assert!(validator.validate(&Value::from(ok)).is_valid(), "{ok}");
        }
        for bad in ["test@example", "example.com", "test@.com", ""] {
            assert_eq!(
                validator.validate(&Value::from(bad)).error(),
                Some("Not a valid email address."),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_email_custom_pattern() {
        let validator =
            Email::from_options(&Options::new().with("pattern", r"@example\.com$")).unwrap();
        assert!(validator.validate(&Value::from("a@example.com")).is_valid());
        assert!(!validator.validate(&Value::from("a@other.com")).is_valid());
    }

    #[test]
    fn test_ip_v4() {
        let validator = Ip::new();
        for ok in ["127.0.0.1", "192.168.1.1", "255.255.255.255", "0.0.0.0"] {
            assert!(validator.validate(&Value::from(ok)).is_valid(), "{ok}");
        }
        for bad in ["256.256.256.000", "1.2.3", "1.2.3.4.5", "a.b.c.d"] {
            assert_eq!(
                validator.validate(&Value::from(bad)).error(),
                Some("Not a valid IP address."),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_ip_v6() {
        let validator = Ip::new();
        for ok in [
            "::1",
            "fe80::",
            "2001:0db8:85a3:0000:0000:8a2e:0370:7334",
            "2001:db8::ff00:42:8329",
            "::ffff:192.0.2.128",
        ] {
            assert!(validator.validate(&Value::from(ok)).is_valid(), "{ok}");
        }
        assert!(!validator.validate(&Value::from("not:an:ip")).is_valid());
    }

    #[test]
    fn test_ip_families_can_be_disabled() {
        assert!(!Ip::v6_only().validate(&Value::from("127.0.0.1")).is_valid());
        assert!(!Ip::v4_only().validate(&Value::from("::1")).is_valid());
        let validator = Ip::from_options(&Options::new().with("v6", false)).unwrap();
        assert!(validator.validate(&Value::from("10.0.0.1")).is_valid());
        assert!(!validator.validate(&Value::from("::1")).is_valid());
    }

    #[test]
    fn test_hostname() {
        let validator = Hostname::new();
        for ok in ["localhost", "example.com", "www.example.com.", "a1-b2.example.org"] {
            assert!(validator.validate(&Value::from(ok)).is_valid(), "{ok}");
        }
        for bad in ["not_a_valid_hostname.com", "-not-valid-.com", ""] {
            assert_eq!(
                validator.validate(&Value::from(bad)).error(),
                Some("Not a valid hostname."),
                "{bad}"
            );
        }
        let long = format!("{}.com", ["a"; 200].join("."));
        assert!(long.len() > 255);
        assert!(!validator.validate(&Value::from(long)).is_valid());
    }

    #[test]
    fn test_coerces_non_text_values() {
        // `undefined` coerces to a valid single-label hostname.
        assert!(Hostname::new().validate(&Value::Undefined).is_valid());
        assert!(!Email::new().validate(&Value::from(42)).is_valid());
    }
}
