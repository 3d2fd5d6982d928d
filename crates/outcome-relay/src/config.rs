//! Reporter configuration.
//!
//! Three flags drive the relay: `strict` promotes pending and undefined
//! outcomes to hard failures, `step_notifications` reports every step as its
//! own test, and `filename_compatible_names` restricts generated names to
//! `[A-Za-z0-9_]`. Values come from defaults, then environment variables
//! prefixed with `OUTCOME_RELAY_`, then the reporter's option list.

use std::env;

use clap::Parser;

use crate::error::RelayError;

const STRICT_VAR: &str = "OUTCOME_RELAY_STRICT";
const STEP_NOTIFICATIONS_VAR: &str = "OUTCOME_RELAY_STEP_NOTIFICATIONS";
const FILENAME_COMPATIBLE_NAMES_VAR: &str = "OUTCOME_RELAY_FILENAME_COMPATIBLE_NAMES";

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}

/// Immutable flags shared by every classifier of a run.
///
/// # Examples
/// ```
/// use outcome_relay::ReporterConfig;
///
/// let config = ReporterConfig::default()
///     .apply_options(["--strict", "--no-step-notifications"])
///     .unwrap();
/// assert!(config.strict);
/// assert!(!config.step_notifications);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Report pending and undefined outcomes as failures.
    pub strict: bool,
    /// Report each step as its own test.
    pub step_notifications: bool,
    /// Restrict generated scenario and step names to `[A-Za-z0-9_]`.
    pub filename_compatible_names: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            strict: false,
            step_notifications: true,
            filename_compatible_names: false,
        }
    }
}

impl ReporterConfig {
    /// Load configuration from the process environment.
    ///
    /// Reads `OUTCOME_RELAY_STRICT`, `OUTCOME_RELAY_STEP_NOTIFICATIONS` and
    /// `OUTCOME_RELAY_FILENAME_COMPATIBLE_NAMES`, falling back to defaults for
    /// unset variables.
    ///
    /// # Errors
    /// Returns [`RelayError::InvalidConfig`] if a variable holds something
    /// other than a recognised boolean.
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`RelayError::InvalidConfig`] if a variable holds something
    /// other than a recognised boolean.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RelayError> {
        let read = |key: &str, default: bool| -> Result<bool, RelayError> {
            lookup(key).map_or(Ok(default), |value| {
                parse_env_bool(&value).ok_or_else(|| {
                    RelayError::InvalidConfig(format!(
                        "invalid value '{value}' for {key}, expected a boolean"
                    ))
                })
            })
        };
        let defaults = Self::default();
        Ok(Self {
            strict: read(STRICT_VAR, defaults.strict)?,
            step_notifications: read(STEP_NOTIFICATIONS_VAR, defaults.step_notifications)?,
            filename_compatible_names: read(
                FILENAME_COMPATIBLE_NAMES_VAR,
                defaults.filename_compatible_names,
            )?,
        })
    }

    /// Apply a reporter option list on top of this configuration.
    ///
    /// Only flags present in `args` change the configuration.
    ///
    /// # Errors
    /// Returns [`RelayError::InvalidConfig`] for unknown or malformed options.
    pub fn apply_options<I, T>(self, args: I) -> Result<Self, RelayError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let options = ReporterOptions::try_parse_from(args)
            .map_err(|error| RelayError::InvalidConfig(error.to_string()))?;
        Ok(self.apply_overrides(&options))
    }

    /// Apply already parsed options.
    #[must_use]
    pub fn apply_overrides(mut self, options: &ReporterOptions) -> Self {
        if let Some(strict) = flag(options.strict, options.no_strict) {
            self.strict = strict;
        }
        if let Some(enabled) = flag(options.step_notifications, options.no_step_notifications) {
            self.step_notifications = enabled;
        }
        if let Some(enabled) = flag(
            options.filename_compatible_names,
            options.no_filename_compatible_names,
        ) {
            self.filename_compatible_names = enabled;
        }
        self
    }
}

fn flag(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

/// Option list understood by the reporter.
///
/// Each flag has a `--no-` counterpart; the last one given wins.
#[derive(Clone, Debug, Default, Parser)]
#[command(name = "outcome-relay", no_binary_name = true, disable_help_flag = true)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each pair of flags mirrors one command-line switch and its negation"
)]
pub struct ReporterOptions {
    /// Report pending and undefined outcomes as failures.
    #[arg(long, overrides_with = "no_strict")]
    pub strict: bool,
    /// Report pending and undefined outcomes as failed assumptions.
    #[arg(long, overrides_with = "strict")]
    pub no_strict: bool,
    /// Report each step as its own test.
    #[arg(long, overrides_with = "no_step_notifications")]
    pub step_notifications: bool,
    /// Report only whole scenarios.
    #[arg(long, overrides_with = "step_notifications")]
    pub no_step_notifications: bool,
    /// Restrict generated names to `[A-Za-z0-9_]`.
    #[arg(long, overrides_with = "no_filename_compatible_names")]
    pub filename_compatible_names: bool,
    /// Keep generated names as written.
    #[arg(long, overrides_with = "filename_compatible_names")]
    pub no_filename_compatible_names: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_enable_step_notifications_only() {
        let config = ReporterConfig::default();
        assert!(!config.strict);
        assert!(config.step_notifications);
        assert!(!config.filename_compatible_names);
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(
            ReporterConfig::from_lookup(lookup_from(&[])),
            Ok(ReporterConfig::default())
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ReporterConfig::from_lookup(lookup_from(&[
            (STRICT_VAR, "yes"),
            (STEP_NOTIFICATIONS_VAR, "off"),
            (FILENAME_COMPATIBLE_NAMES_VAR, "1"),
        ]));
        assert_eq!(
            config,
            Ok(ReporterConfig {
                strict: true,
                step_notifications: false,
                filename_compatible_names: true,
            })
        );
    }

    #[test]
    fn environment_rejects_unknown_values() {
        let result = ReporterConfig::from_lookup(lookup_from(&[(STRICT_VAR, "maybe")]));
        assert!(matches!(
            result,
            Err(RelayError::InvalidConfig(message)) if message.contains(STRICT_VAR)
        ));
    }

    #[test]
    fn parse_env_bool_understands_common_values() {
        for truthy in [
            "1", "true", "TRUE", "True", "yes", "YES", "Yes", "on", "ON", "On",
        ] {
            assert_eq!(parse_env_bool(truthy), Some(true), "expected {truthy} to be truthy");
        }
        for falsy in [
            "0", "false", "FALSE", "False", "no", "NO", "No", "off", "OFF", "Off",
        ] {
            assert_eq!(parse_env_bool(falsy), Some(false), "expected {falsy} to be falsy");
        }
        assert_eq!(parse_env_bool("maybe"), None);
    }

    #[rstest]
    #[case::strict(&["--strict"], true, true, false)]
    #[case::last_flag_wins(&["--strict", "--no-strict"], false, true, false)]
    #[case::no_steps(&["--no-step-notifications"], false, false, false)]
    #[case::compatible(&["--filename-compatible-names"], false, true, true)]
    #[case::empty(&[], false, true, false)]
    fn options_override_selected_fields(
        #[case] args: &[&str],
        #[case] strict: bool,
        #[case] step_notifications: bool,
        #[case] filename_compatible_names: bool,
    ) {
        let config = ReporterConfig::default().apply_options(args.iter().copied());
        assert_eq!(
            config,
            Ok(ReporterConfig {
                strict,
                step_notifications,
                filename_compatible_names,
            })
        );
    }

    #[test]
    fn options_keep_environment_values_they_do_not_mention() {
        let base = ReporterConfig {
            strict: true,
            step_notifications: false,
            filename_compatible_names: false,
        };
        let config = base.apply_options(["--filename-compatible-names"]);
        assert_eq!(
            config,
            Ok(ReporterConfig {
                filename_compatible_names: true,
                ..base
            })
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let result = ReporterConfig::default().apply_options(["--monochrome"]);
        assert!(matches!(result, Err(RelayError::InvalidConfig(_))));
    }
}
