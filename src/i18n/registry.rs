//! Language registry: single source of truth for selectable languages.
//!
//! The registry is built once on first access through a `OnceLock` and is
//! immutable for the lifetime of the process.

use std::sync::OnceLock;

/// Pseudo-language code meaning "let the provider detect the source".
pub const AUTO_DETECT: &str = "auto";

/// Metadata for a selectable language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Language code as sent to the proxy (e.g., "en", "zh-CN")
    pub code: &'static str,

    /// English display name (e.g., "Spanish")
    pub name: &'static str,

    /// Name of the language in the language itself (e.g., "Español")
    pub native_name: &'static str,

    /// Flag glyph shown next to the name
    pub flag: &'static str,

    /// Whether the script is written right-to-left
    pub rtl: bool,
}

impl LanguageConfig {
    /// Whether this entry is the auto-detect pseudo-language.
    pub fn is_auto(&self) -> bool {
        self.code == AUTO_DETECT
    }
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global registry, initializing it on first call.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language by its exact code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the code is registered
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Languages selectable as a translation source, auto-detect first.
    pub fn list_sources(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Languages selectable as a translation target (everything but auto-detect).
    pub fn list_targets(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| !lang.is_auto()).collect()
    }

    /// Check whether a code may be used as a source language.
    pub fn is_valid_source(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Check whether a code may be used as a target language.
    pub fn is_valid_target(&self, code: &str) -> bool {
        self.get_by_code(code).is_some_and(|lang| !lang.is_auto())
    }

    /// Check whether a code names a right-to-left language.
    ///
    /// Unknown codes are treated as left-to-right.
    pub fn is_rtl(&self, code: &str) -> bool {
        self.get_by_code(code).is_some_and(|lang| lang.rtl)
    }
}

/// Built-in language table.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: AUTO_DETECT,
            name: "Auto-detect",
            native_name: "🔍 Auto-detect",
            flag: "🌐",
            rtl: false,
        },
        lang("en", "English", "English", "🇬🇧"),
        lang("es", "Spanish", "Español", "🇪🇸"),
        lang("fr", "French", "Français", "🇫🇷"),
        lang("de", "German", "Deutsch", "🇩🇪"),
        lang("it", "Italian", "Italiano", "🇮🇹"),
        lang("pt", "Portuguese", "Português", "🇵🇹"),
        lang("ru", "Russian", "Русский", "🇷🇺"),
        lang("zh-CN", "Chinese (Simplified)", "简体中文", "🇨🇳"),
        lang("zh-TW", "Chinese (Traditional)", "繁體中文", "🇹🇼"),
        lang("ja", "Japanese", "日本語", "🇯🇵"),
        LanguageConfig {
            rtl: true,
            ..lang("ar", "Arabic", "العربية", "🇸🇦")
        },
        LanguageConfig {
            rtl: true,
            ..lang("he", "Hebrew", "עברית", "🇮🇱")
        },
        lang("ko", "Korean", "한국어", "🇰🇷"),
        lang("hi", "Hindi", "हिन्दी", "🇮🇳"),
        lang("tr", "Turkish", "Türkçe", "🇹🇷"),
        lang("nl", "Dutch", "Nederlands", "🇳🇱"),
        lang("pl", "Polish", "Polski", "🇵🇱"),
        lang("el", "Greek", "Ελληνικά", "🇬🇷"),
        lang("sv", "Swedish", "Svenska", "🇸🇪"),
        lang("da", "Danish", "Dansk", "🇩🇰"),
    ]
}

fn lang(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    flag: &'static str,
) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        native_name,
        flag,
        rtl: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Lookup Tests ====================

    #[test]
    fn test_get_by_code() {
        let registry = LanguageRegistry::get();
        let spanish = registry.get_by_code("es").expect("Spanish should exist");
        assert_eq!(spanish.name, "Spanish");
        assert_eq!(spanish.native_name, "Español");
        assert!(!spanish.rtl);
    }

    #[test]
    fn test_get_by_code_is_case_sensitive() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("zh-CN").is_some());
        assert!(registry.get_by_code("zh-cn").is_none());
        assert!(registry.get_by_code("ES").is_none());
    }

    #[test]
    fn test_unknown_code() {
        assert!(LanguageRegistry::get().get_by_code("xx").is_none());
        assert!(LanguageRegistry::get().get_by_code("").is_none());
    }

    // ==================== Listing Tests ====================

    #[test]
    fn test_sources_include_auto_first() {
        let sources = LanguageRegistry::get().list_sources();
        assert_eq!(sources.len(), 21);
        assert!(sources[0].is_auto());
    }

    #[test]
    fn test_targets_exclude_auto() {
        let targets = LanguageRegistry::get().list_targets();
        assert_eq!(targets.len(), 20);
        assert!(targets.iter().all(|lang| !lang.is_auto()));
    }

    #[test]
    fn test_codes_are_unique() {
        let sources = LanguageRegistry::get().list_sources();
        let mut codes: Vec<_> = sources.iter().map(|lang| lang.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), sources.len());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_auto_is_valid_source_not_target() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_valid_source(AUTO_DETECT));
        assert!(!registry.is_valid_target(AUTO_DETECT));
    }

    #[test]
    fn test_concrete_language_is_valid_both_ways() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_valid_source("ja"));
        assert!(registry.is_valid_target("ja"));
    }

    // ==================== RTL Tests ====================

    #[test]
    fn test_rtl_languages() {
        let registry = LanguageRegistry::get();
        let rtl: Vec<_> = registry
            .list_targets()
            .into_iter()
            .filter(|lang| lang.rtl)
            .map(|lang| lang.code)
            .collect();
        assert_eq!(rtl, vec!["ar", "he"]);
    }

    #[test]
    fn test_is_rtl_unknown_is_false() {
        assert!(!LanguageRegistry::get().is_rtl("xx"));
    }
}
