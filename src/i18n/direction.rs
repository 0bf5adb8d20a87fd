//! Text direction derived from the target language.

use crate::i18n::LanguageRegistry;
use serde::Serialize;
use std::fmt;

/// Writing direction for displaying text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Direction for a language code. Right-to-left only for registered RTL
    /// languages, left-to-right for everything else including unknown codes.
    pub fn for_language(code: &str) -> Self {
        if LanguageRegistry::get().is_rtl(code) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    /// HTML `dir` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
