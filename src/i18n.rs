//! Localized fallback tokens
//!
//! Episodes without a resolvable title get a synthesized one. The wording
//! follows the configured language.

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl Language {
    /// Get the locale code for this language
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    /// Get all available languages
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Spanish]
    }

    /// Parse a language from its locale code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::English),
            "es" => Some(Language::Spanish),
            _ => None,
        }
    }

    /// Synthesized title for an episode without one
    pub fn episode_title(&self, number: f64) -> String {
        match self {
            Language::English => format!("Episode {}", number),
            Language::Spanish => format!("Episodio {}", number),
        }
    }
}
