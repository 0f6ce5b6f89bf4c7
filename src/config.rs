use std::path::PathBuf;

use crate::state::i18n::Language;

pub const OPEN_ENV: &str = "TABLEMAKER_OPEN";
pub const SETTINGS_ENV: &str = "TABLEMAKER_SETTINGS";
pub const HANDLE_ENV: &str = "TABLEMAKER_HANDLE";
pub const LANGUAGE_ENV: &str = "TABLEMAKER_LANG";
pub const STRICT_CLIPBOARD_ENV: &str = "TABLEMAKER_STRICT_CLIPBOARD";

pub const DEFAULT_HANDLE: &str = "table";
pub const FORM_NAMESPACE: &str = "fields";

/// Startup configuration read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub open: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub handle: String,
    pub language: Language,
    pub strict_clipboard: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            open: None,
            settings: None,
            handle: DEFAULT_HANDLE.to_string(),
            language: Language::default(),
            strict_clipboard: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            open: non_empty(OPEN_ENV).map(PathBuf::from),
            settings: non_empty(SETTINGS_ENV).map(PathBuf::from),
            handle: non_empty(HANDLE_ENV)
                .map(|handle| handle.trim().to_string())
                .unwrap_or_else(|| DEFAULT_HANDLE.to_string()),
            language: non_empty(LANGUAGE_ENV)
                .and_then(|code| Language::from_code(code.trim()))
                .unwrap_or_default(),
            strict_clipboard: non_empty(STRICT_CLIPBOARD_ENV)
                .map(|value| crate::state::data_model::is_truthy(&value))
                .unwrap_or(false),
        }
    }
}
