use std::collections::HashMap;
use std::fmt;

/// A synthesis-service voice identifier, e.g. `en-US-Neural2-C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Locale code required by the synthesis API: the first two
    /// hyphen-separated components of the identifier (`en-US-Neural2-C`
    /// yields `en-US`).
    pub fn language_code(&self) -> String {
        self.0.splitn(3, '-').take(2).collect::<Vec<_>>().join("-")
    }
}

impl fmt::Display for VoiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed language-code to voice mapping. Defines the supported language
/// set; read-only after startup.
#[derive(Debug, Clone)]
pub struct VoiceTable {
    voices: HashMap<String, VoiceName>,
}

impl VoiceTable {
    pub fn new(entries: impl IntoIterator<Item = (String, VoiceName)>) -> Self {
        Self {
            voices: entries.into_iter().collect(),
        }
    }

    pub fn voice_for(&self, language: &str) -> Option<&VoiceName> {
        self.voices.get(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.voices.keys().map(String::as_str)
    }
}

impl Default for VoiceTable {
    fn default() -> Self {
        Self::new([
            ("en".to_string(), VoiceName::new("en-US-Neural2-C")),
            ("he".to_string(), VoiceName::new("he-IL-Standard-A")),
            ("ru".to_string(), VoiceName::new("ru-RU-Standard-A")),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_four_segment_voice_when_deriving_locale_then_takes_first_two() {
        let voice = VoiceName::new("en-US-Neural2-C");
        assert_eq!(voice.language_code(), "en-US");
    }

    #[test]
    fn given_three_segment_voice_when_deriving_locale_then_takes_first_two() {
        let voice = VoiceName::new("he-IL-Standard-A");
        assert_eq!(voice.language_code(), "he-IL");
    }

    #[test]
    fn given_default_table_when_deriving_every_locale_then_matches_voice_prefix() {
        let table = VoiceTable::default();
        for language in table.languages() {
            let voice = table.voice_for(language).unwrap();
            let expected: String = voice
                .as_str()
                .split('-')
                .take(2)
                .collect::<Vec<_>>()
                .join("-");
            assert_eq!(voice.language_code(), expected);
        }
    }

    #[test]
    fn given_unsupported_language_when_looking_up_voice_then_returns_none() {
        let table = VoiceTable::default();
        assert!(table.voice_for("fr").is_none());
    }
}
