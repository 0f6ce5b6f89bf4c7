//! UI labels in the supported languages.
//!
//! Catalogs are flat JSON objects under `assets/i18n`, compiled in and parsed
//! on first use. A key missing from a catalog resolves through English, then
//! to the key itself.

use std::collections::BTreeMap;
use std::sync::OnceLock;

type Catalog = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    ZhHant,
}

impl Language {
    pub fn all() -> &'static [Self] {
        &[Self::En, Self::ZhHant]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhHant => "zh-Hant",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|language| language.code() == code)
    }

    /// Catalog key of the language's own name, for the language picker.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::En => "language.option.en",
            Self::ZhHant => "language.option.zh_hant",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Self::En => include_str!("../../assets/i18n/en.json"),
            Self::ZhHant => include_str!("../../assets/i18n/zh-Hant.json"),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::En => 0,
            Self::ZhHant => 1,
        }
    }
}

pub fn tr(language: Language, key: &'static str) -> &'static str {
    lookup(language, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
}

/// A field-configured label when one is set, else the catalog default.
pub fn label_or(language: Language, custom: Option<&str>, key: &'static str) -> String {
    custom
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| tr(language, key).to_string())
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    catalogs()[language.index()].get(key).map(String::as_str)
}

fn catalogs() -> &'static [Catalog; 2] {
    static CATALOGS: OnceLock<[Catalog; 2]> = OnceLock::new();
    CATALOGS.get_or_init(|| [parse_catalog(Language::En), parse_catalog(Language::ZhHant)])
}

fn parse_catalog(language: Language) -> Catalog {
    serde_json::from_str(language.source()).unwrap_or_else(|err| {
        panic!(
            "label catalog for '{}' is not a flat JSON object: {err}",
            language.code()
        )
    })
}
