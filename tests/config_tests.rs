use std::collections::HashMap;
use std::path::PathBuf;

use tablemaker::config::{self, AppConfig};
use tablemaker::state::i18n::Language;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults_without_environment() {
    let config = AppConfig::from_lookup(lookup(&[]));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.handle, config::DEFAULT_HANDLE);
    assert!(!config.strict_clipboard);
}

#[test]
fn test_reads_every_variable() {
    let config = AppConfig::from_lookup(lookup(&[
        (config::OPEN_ENV, "/tmp/table.json"),
        (config::SETTINGS_ENV, "/tmp/settings.json"),
        (config::HANDLE_ENV, " prices "),
        (config::LANGUAGE_ENV, "zh-Hant"),
        (config::STRICT_CLIPBOARD_ENV, "true"),
    ]));

    assert_eq!(config.open, Some(PathBuf::from("/tmp/table.json")));
    assert_eq!(config.settings, Some(PathBuf::from("/tmp/settings.json")));
    assert_eq!(config.handle, "prices");
    assert_eq!(config.language, Language::ZhHant);
    assert!(config.strict_clipboard);
}

#[test]
fn test_blank_or_unknown_values_fall_back() {
    let config = AppConfig::from_lookup(lookup(&[
        (config::OPEN_ENV, "   "),
        (config::HANDLE_ENV, ""),
        (config::LANGUAGE_ENV, "fr"),
        (config::STRICT_CLIPBOARD_ENV, "0"),
    ]));

    assert_eq!(config.open, None);
    assert_eq!(config.handle, config::DEFAULT_HANDLE);
    assert_eq!(config.language, Language::En);
    assert!(!config.strict_clipboard);
}
