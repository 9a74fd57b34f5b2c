use super::capability::Voice;

/// Pick the voice to speak with.
///
/// A voice whose name contains `marker` wins; otherwise the first voice whose
/// language tag starts with `locale`. `None` leaves the choice to the host.
pub fn select_voice<'a>(voices: &'a [Voice], marker: Option<&str>, locale: &str) -> Option<&'a Voice> {
    if let Some(marker) = marker.filter(|m| !m.is_empty()) {
        if let Some(voice) = voices.iter().find(|v| v.name.contains(marker)) {
            return Some(voice);
        }
    }

    let locale = locale.to_ascii_lowercase();
    if locale.is_empty() {
        return None;
    }

    voices
        .iter()
        .find(|v| v.lang.to_ascii_lowercase().starts_with(&locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(name: &str, lang: &str) -> Voice {
        Voice {
            id: name.to_lowercase(),
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }

    #[test]
    fn test_marker_wins_over_locale() {
        let voices = vec![
            voice("Alex", "en-US"),
            voice("Anna", "de-DE"),
            voice("Google Deutsch", "de-DE"),
        ];
        let chosen = select_voice(&voices, Some("Google"), "en").unwrap();
        assert_eq!(chosen.name, "Google Deutsch");
    }

    #[test]
    fn test_falls_back_to_locale_prefix() {
        let voices = vec![voice("Anna", "de-DE"), voice("Daniel", "en-GB"), voice("Alex", "en-US")];
        let chosen = select_voice(&voices, Some("Google"), "en").unwrap();
        assert_eq!(chosen.name, "Daniel");
    }

    #[test]
    fn test_locale_match_ignores_case() {
        let voices = vec![voice("English_(America)", "en-us")];
        assert!(select_voice(&voices, None, "EN-US").is_some());
    }

    #[test]
    fn test_no_match_uses_host_default() {
        let voices = vec![voice("Anna", "de-DE")];
        assert!(select_voice(&voices, Some("Google"), "en").is_none());
        assert!(select_voice(&[], None, "en").is_none());
    }
}
