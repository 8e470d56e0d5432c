mod common;

use common::fixtures::{CounterAction, CounterState};
use presenter::{ConfigError, Presenter, PresenterConfig, StateReducer};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AppConfig {
    #[serde(default)]
    presenter: PresenterConfig,
}

#[test]
fn presenter_table_embeds_in_app_config() {
    let app: AppConfig = toml::from_str(
        r#"
[presenter]
label = "counter"
trace_actions = false
"#,
    )
    .unwrap();

    assert_eq!(app.presenter.label.as_deref(), Some("counter"));
    assert!(!app.presenter.trace_actions);
    assert!(app.presenter.cancel_effects_on_release);
}

#[test]
fn missing_table_uses_defaults() {
    let app: AppConfig = toml::from_str("").unwrap();
    assert_eq!(app.presenter, PresenterConfig::default());
}

#[test]
fn parsed_config_applies_to_presenter() {
    let config = PresenterConfig::from_toml_str("label = \"tally\"").unwrap();
    let presenter = Presenter::<CounterState>::builder(CounterState::default(), StateReducer)
        .config(config)
        .initial_actions([CounterAction::Increment])
        .build();

    assert_eq!(presenter.label(), "tally");
    assert_eq!(presenter.state().count, 1);
}

#[test]
fn invalid_values_are_reported() {
    let err = PresenterConfig::from_toml_str("label = \"\"").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("label"));

    let err = PresenterConfig::from_toml_str("cancel_effects_on_release = \"yes\"").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}
