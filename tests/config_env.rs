//! Environment-driven configuration tests.

mod test_helpers;

use std::time::Duration;

use gardenkeep::config::{
    ConfigError, DEFAULT_FALLBACK_MOOD_RESPONSE, DEFAULT_FALLBACK_QUESTION,
    EVALUATION_TIMEOUT_VAR, FALLBACK_MOOD_RESPONSE_VAR, FALLBACK_QUESTION_VAR, LifecycleConfig,
    MAX_COMMIT_ATTEMPTS_VAR,
};
use rstest::rstest;
use test_helpers::EnvVarGuard;

#[rstest]
fn unset_environment_yields_defaults() {
    let _guard = EnvVarGuard::apply(&[
        (EVALUATION_TIMEOUT_VAR, None),
        (FALLBACK_QUESTION_VAR, None),
        (MAX_COMMIT_ATTEMPTS_VAR, None),
        (FALLBACK_MOOD_RESPONSE_VAR, None),
    ]);

    let config = LifecycleConfig::from_env().expect("defaults should load");

    assert_eq!(config, LifecycleConfig::default());
    assert_eq!(config.fallback_question, DEFAULT_FALLBACK_QUESTION);
    assert_eq!(config.fallback_mood_response, DEFAULT_FALLBACK_MOOD_RESPONSE);
}

#[rstest]
fn environment_overrides_every_setting() {
    let _guard = EnvVarGuard::apply(&[
        (EVALUATION_TIMEOUT_VAR, Some("5")),
        (FALLBACK_QUESTION_VAR, Some("What changed?")),
        (MAX_COMMIT_ATTEMPTS_VAR, Some("7")),
        (FALLBACK_MOOD_RESPONSE_VAR, Some("Thanks for checking in.")),
    ]);

    let config = LifecycleConfig::from_env().expect("overrides should load");

    assert_eq!(config.evaluation_timeout, Duration::from_secs(5));
    assert_eq!(config.fallback_question, "What changed?");
    assert_eq!(config.max_commit_attempts, 7);
    assert_eq!(config.fallback_mood_response, "Thanks for checking in.");
}

#[rstest]
fn malformed_environment_is_reported() {
    let _guard = EnvVarGuard::apply(&[
        (EVALUATION_TIMEOUT_VAR, Some("soon")),
        (FALLBACK_QUESTION_VAR, None),
        (MAX_COMMIT_ATTEMPTS_VAR, None),
        (FALLBACK_MOOD_RESPONSE_VAR, None),
    ]);

    let result = LifecycleConfig::from_env();

    assert_eq!(
        result,
        Err(ConfigError::InvalidValue {
            name: EVALUATION_TIMEOUT_VAR,
            value: "soon".to_owned(),
        })
    );
}
