//! # Message Templates
//!
//! Validators report failures as human-readable strings built from
//! templates. A template may contain `{{token}}` placeholders, where a token
//! is a run of ASCII word characters. [`prepare`] replaces every placeholder
//! with the value returned by a lookup, or with the empty string when the
//! lookup has nothing for that token. Substitution never fails.
//!
//! The `{{identifier}}` syntax is part of the public contract: custom
//! messages supplied through the `message` / `messages` options use it too.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// The message key every validator treats as its primary message.
pub const DEFAULT_KEY: &str = "default";

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("token pattern is valid"));

/// Substitute every `{{token}}` in `template` using `lookup`.
pub fn prepare<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    TOKEN
        .replace_all(template, |caps: &Captures<'_>| lookup(&caps[1]).unwrap_or_default())
        .into_owned()
}

/// The message map of a validator: message key → template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Messages {
    templates: BTreeMap<String, String>,
}

impl Messages {
    /// Build a message map from `(key, template)` pairs.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            templates: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A map holding only a `default` template.
    pub fn single(template: impl Into<String>) -> Self {
        Self::new([(DEFAULT_KEY, template.into())])
    }

    /// The template stored under `key`, or `""` if there is none.
    pub fn get(&self, key: &str) -> &str {
        self.templates.get(key).map_or("", String::as_str)
    }

    /// Insert or replace a template.
    pub fn set(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// The `default` template.
    pub fn default_message(&self) -> &str {
        self.get(DEFAULT_KEY)
    }

    /// Overwrite the `default` template.
    pub fn set_default_message(&mut self, template: impl Into<String>) {
        self.set(DEFAULT_KEY, template);
    }

    /// Iterate over `(key, template)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_prepare_substitutes_tokens() {
        let out = prepare("Expected {{expected}}, got {{got}}.", |token| match token {
            "expected" => Some("string".into()),
            "got" => Some("number".into()),
            _ => None,
        });
        assert_eq!(out, "Expected string, got number.");
    }

    #[test]
    fn test_prepare_missing_token_is_empty() {
        assert_eq!(prepare("a{{nope}}b", |_| None), "ab");
        assert_eq!(prepare("{{a}}{{a}}", |_| Some("x".into())), "xx");
    }

    #[test]
    fn test_prepare_leaves_malformed_tokens() {
        assert_eq!(prepare("{{ spaced }} {single}", |_| Some("x".into())), "{{ spaced }} {single}");
    }

    #[test]
    fn test_messages_default_alias() {
        let mut messages = Messages::single("Cannot be empty.");
        assert_eq!(messages.default_message(), "Cannot be empty.");
        messages.set_default_message("Required!");
        assert_eq!(messages.get(DEFAULT_KEY), "Required!");
        assert_eq!(messages.get("missing"), "");
    }

    proptest! {
        /// Templates without tokens pass through untouched.
        #[test]
        fn prepare_is_identity_without_tokens(template in "[^{}]*") {
            prop_assert_eq!(prepare(&template, |_| Some("x".into())), template);
        }

        /// Every well-formed token is replaced.
        #[test]
        fn prepare_replaces_every_token(names in proptest::collection::vec("[a-z_]{1,8}", 0..6)) {
            let template: String = names.iter().map(|n| format!("<{{{{{n}}}}}>")).collect();
            let out = prepare(&template, |token| Some(token.to_uppercase()));
            let expected: String = names.iter().map(|n| format!("<{}>", n.to_uppercase())).collect();
            prop_assert_eq!(out, expected);
        }
    }
}
