//! Internationalization (i18n) support
//!
//! The blog ships with a small built-in label table per display language.
//! Entries from the `labels` section of `_config.yml` override it.

use chrono::Locale;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display language for labels and date formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "pt-BR", alias = "pt_BR")]
    PtBr,
    #[serde(rename = "en-US", alias = "en_US", alias = "en")]
    EnUs,
}

impl Language {
    /// Locale used when formatting dates
    pub fn locale(self) -> Locale {
        match self {
            Language::PtBr => Locale::pt_BR,
            Language::EnUs => Locale::en_US,
        }
    }

    /// Value for the `<html lang>` attribute
    pub fn tag(self) -> &'static str {
        match self {
            Language::PtBr => "pt-BR",
            Language::EnUs => "en-US",
        }
    }

    fn builtin(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::PtBr => PT_BR,
            Language::EnUs => EN_US,
        }
    }
}

const PT_BR: &[(&str, &str)] = &[
    ("home", "Home"),
    ("load_more", "Carregar mais posts"),
    ("previous_post", "Post anterior"),
    ("next_post", "Próximo post"),
    ("exit_preview", "Sair do modo Preview"),
    ("unpublished", "Não publicado"),
    ("reading_time", "%d min"),
    ("not_found", "Post não encontrado"),
];

const EN_US: &[(&str, &str)] = &[
    ("home", "Home"),
    ("load_more", "Load more posts"),
    ("previous_post", "Previous post"),
    ("next_post", "Next post"),
    ("exit_preview", "Exit preview mode"),
    ("unpublished", "Unpublished"),
    ("reading_time", "%d min"),
    ("not_found", "Post not found"),
];

/// Internationalization handler
#[derive(Debug, Clone)]
pub struct I18n {
    /// Flattened key -> translation
    translations: HashMap<String, String>,
}

impl I18n {
    /// Create a handler with the built-in labels for `language`
    pub fn new(language: Language) -> Self {
        let translations = language
            .builtin()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { translations }
    }

    /// Create a handler and apply label overrides on top
    pub fn with_overrides(language: Language, overrides: &HashMap<String, String>) -> Self {
        let mut i18n = Self::new(language);
        for (key, value) in overrides {
            tracing::debug!("Overriding label {}", key);
            i18n.translations.insert(key.clone(), value.clone());
        }
        i18n
    }

    /// Get a translation by key, falling back to the key itself
    pub fn get(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Get a translation with `%d` replaced by `count`
    pub fn get_count(&self, key: &str, count: u32) -> String {
        self.get(key).replace("%d", &count.to_string())
    }

    /// Get all translations as a flat map for template context
    pub fn get_all_translations(&self) -> HashMap<String, String> {
        self.translations.clone()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
