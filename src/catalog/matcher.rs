//! Match requests: which catalog entries a caller is interested in.

use serde::{Deserialize, Serialize};

use super::provider::Show;

/// One thing to look for in provider catalogs.
///
/// Empty fields are wildcards. Text criteria are matched as case-insensitive
/// substrings of the corresponding [`Show`] field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRequest {
    /// Series name to look for.
    pub show: String,
    /// Episode title to look for.
    pub title: String,
    /// Word or phrase to look for in the synopsis.
    pub pitch: String,
    /// Restrict the request to one provider.
    pub provider: String,
    /// Where matched shows should be saved, relative to the download root.
    pub destination: String,
}

impl MatchRequest {
    /// Request every show whose series name contains `show`.
    pub fn show(show: impl Into<String>) -> Self {
        Self {
            show: show.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_pitch(mut self, pitch: impl Into<String>) -> Self {
        self.pitch = pitch.into();
        self
    }

    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Returns `true` if `show` satisfies every criterion of this request.
    pub fn matches(&self, show: &Show) -> bool {
        if !self.provider.is_empty() && !self.provider.eq_ignore_ascii_case(&show.provider) {
            return false;
        }

        contains_ignore_case(&show.show, &self.show)
            && contains_ignore_case(&show.title, &self.title)
            && contains_ignore_case(&show.pitch, &self.pitch)
    }
}

/// Returns `true` if any request matches `show`. No requests match nothing.
pub fn is_show_match(requests: &[MatchRequest], show: &Show) -> bool {
    requests.iter().any(|request| request.matches(show))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journal() -> Show {
        Show {
            id: "1".to_string(),
            show: "Le Journal de 20h".to_string(),
            title: "Édition du lundi".to_string(),
            pitch: "Les titres de l'actualité".to_string(),
            provider: "francetv".to_string(),
            ..Show::default()
        }
    }

    #[test]
    fn test_show_substring_ignores_case() {
        assert!(MatchRequest::show("le journal").matches(&journal()));
        assert!(MatchRequest::show("JOURNAL DE 20H").matches(&journal()));
        assert!(!MatchRequest::show("météo").matches(&journal()));
    }

    #[test]
    fn test_all_criteria_must_hold() {
        let request = MatchRequest::show("journal").with_title("lundi");
        assert!(request.matches(&journal()));

        let request = MatchRequest::show("journal").with_title("mardi");
        assert!(!request.matches(&journal()));

        let request = MatchRequest::default().with_pitch("actualité");
        assert!(request.matches(&journal()));
    }

    #[test]
    fn test_non_ascii_case_folding() {
        let request = MatchRequest::default().with_title("ÉDITION");
        assert!(request.matches(&journal()));
    }

    #[test]
    fn test_provider_restriction() {
        assert!(MatchRequest::show("journal")
            .with_provider("francetv")
            .matches(&journal()));
        assert!(!MatchRequest::show("journal")
            .with_provider("arte")
            .matches(&journal()));
    }

    #[test]
    fn test_wildcard_request_matches_everything() {
        assert!(MatchRequest::default().matches(&journal()));
        assert!(MatchRequest::default()
            .with_provider("francetv")
            .matches(&journal()));
    }

    #[test]
    fn test_is_show_match() {
        let show = journal();
        assert!(!is_show_match(&[], &show));
        assert!(is_show_match(
            &[MatchRequest::show("météo"), MatchRequest::show("journal")],
            &show
        ));
        assert!(!is_show_match(&[MatchRequest::show("météo")], &show));
    }
}
