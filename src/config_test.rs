use super::*;

/// # Safety
/// Callers hold `crate::ENV_LOCK`.
unsafe fn clear_widget_env() {
    unsafe {
        std::env::remove_var("WIDGET_BUTTON_COLOR");
        std::env::remove_var("WIDGET_THEME_COLOR");
        std::env::remove_var("WIDGET_GREETING");
        std::env::remove_var("WIDGET_SYSTEM_INSTRUCTIONS");
    }
}

#[test]
fn defaults_match_documented_values() {
    let opts = WidgetOptions::default();
    assert_eq!(opts.button_color, "#0070f3");
    assert_eq!(opts.theme_color, "#0070f3");
    assert_eq!(opts.greeting, "👋 Hi there! How can I help you today?");
    assert_eq!(opts.system_instructions, "You are a helpful assistant");
}

#[test]
fn from_json_fills_missing_keys_with_defaults() {
    let opts = WidgetOptions::from_json(r##"{"buttonColor":"#ff0000","greeting":"Welcome to our support!"}"##).unwrap();
    assert_eq!(opts.button_color, "#ff0000");
    assert_eq!(opts.greeting, "Welcome to our support!");
    assert_eq!(opts.theme_color, DEFAULT_THEME_COLOR);
    assert_eq!(opts.system_instructions, DEFAULT_SYSTEM_INSTRUCTIONS);
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = WidgetOptions::from_json("{\"greeting\": 5}").unwrap_err();
    assert!(err.to_string().starts_with("invalid widget options"));
}

#[test]
fn builders_override_fields() {
    let opts = WidgetOptions::default()
        .with_greeting("hey")
        .with_system_instructions("S")
        .with_colors("#111111", "#222222");
    assert_eq!(opts.greeting, "hey");
    assert_eq!(opts.system_instructions, "S");
    assert_eq!(opts.button_color, "#111111");
    assert_eq!(opts.theme_color, "#222222");
}

#[test]
fn from_env_reads_overrides() {
    let _guard = crate::ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_widget_env();
        std::env::set_var("WIDGET_GREETING", "Howdy");
        std::env::set_var("WIDGET_THEME_COLOR", "#00ff00");
        std::env::set_var("WIDGET_BUTTON_COLOR", "");
    }

    let opts = WidgetOptions::from_env();
    assert_eq!(opts.greeting, "Howdy");
    assert_eq!(opts.theme_color, "#00ff00");
    assert_eq!(opts.button_color, DEFAULT_BUTTON_COLOR);
    assert_eq!(opts.system_instructions, DEFAULT_SYSTEM_INSTRUCTIONS);

    unsafe { clear_widget_env() };
}
