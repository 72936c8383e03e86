//! Environment variable lookups with defaults and parsing
//!
//! Every helper has an `_in` variant taking an [`EnvLookup`], so callers and
//! tests can supply their own source instead of the process environment.

use std::env;
use std::str::FromStr;
use tracing::debug;

/// A source of environment variables
pub trait EnvLookup {
    /// Return the value of `key`, or `None` when it is not set
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// The environment of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Value of `key`, or `default` when it is not set
pub fn lookup_env_with_default(key: &str, default: &str) -> String {
    lookup_env_with_default_in(&ProcessEnv, key, default)
}

pub fn lookup_env_with_default_in(lookup: &impl EnvLookup, key: &str, default: &str) -> String {
    lookup.lookup(key).unwrap_or_else(|| default.to_string())
}

/// `true` only when `key` is set to exactly `"true"`
pub fn lookup_env_bool(key: &str) -> bool {
    lookup_env_bool_in(&ProcessEnv, key)
}

pub fn lookup_env_bool_in(lookup: &impl EnvLookup, key: &str) -> bool {
    matches!(lookup.lookup(key).as_deref(), Some("true"))
}

/// Parse `key` into `T`, returning `None` when unset or unparsable
pub fn lookup_env_parsed<T: FromStr>(key: &str) -> Option<T> {
    lookup_env_parsed_in(&ProcessEnv, key)
}

pub fn lookup_env_parsed_in<T: FromStr>(lookup: &impl EnvLookup, key: &str) -> Option<T> {
    let raw = lookup.lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(key, "ignoring unparsable environment value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn mock_lookup(
        lookup_key: &'static str,
        result: &'static str,
        exists: bool,
    ) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            if key != lookup_key || !exists {
                return None;
            }
            Some(result.to_string())
        }
    }

    #[test]
    fn test_lookup_env_with_default() {
        let cases = [
            (mock_lookup("TEST_KEY", "value", true), "value"),
            (mock_lookup("TEST_KEY", "value", false), "defaultValue"),
        ];

        for (lookup, expected) in cases {
            assert_eq!(
                lookup_env_with_default_in(&lookup, "TEST_KEY", "defaultValue"),
                expected
            );
        }
    }

    #[test]
    fn test_lookup_env_bool() {
        assert!(lookup_env_bool_in(&mock_lookup("TEST_KEY", "true", true), "TEST_KEY"));
        assert!(!lookup_env_bool_in(&mock_lookup("TEST_KEY", "asdf", false), "TEST_KEY"));
        assert!(!lookup_env_bool_in(&mock_lookup("TEST_KEY", "asdf", true), "TEST_KEY"));
        assert!(!lookup_env_bool_in(&mock_lookup("TEST_KEY", "TRUE", true), "TEST_KEY"));
        assert!(!lookup_env_bool_in(&mock_lookup("OTHER", "true", true), "TEST_KEY"));
    }

    #[test]
    fn test_lookup_env_parsed() {
        let lookup = mock_lookup("TRIES", " 12 ", true);
        assert_eq!(lookup_env_parsed_in::<u32>(&lookup, "TRIES"), Some(12));
        assert_eq!(lookup_env_parsed_in::<u32>(&lookup, "MISSING"), None);

        let bad = mock_lookup("TRIES", "twelve", true);
        assert_eq!(lookup_env_parsed_in::<u32>(&bad, "TRIES"), None);
    }

    #[test]
    #[serial]
    fn test_process_env() {
        let key = format!("TARRY_TEST_{}", uuid::Uuid::new_v4().simple());
        assert_eq!(lookup_env_with_default(&key, "fallback"), "fallback");
        assert!(!lookup_env_bool(&key));

        env::set_var(&key, "true");
        assert_eq!(lookup_env_with_default(&key, "fallback"), "true");
        assert!(lookup_env_bool(&key));
        assert_eq!(lookup_env_parsed::<bool>(&key), Some(true));

        env::remove_var(&key);
    }
}
