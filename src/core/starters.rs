//! # Starter Questions
//!
//! Suggested prompts shown before a conversation starts. They are fetched
//! from the backend's config endpoint and live only as long as the view that
//! requested them.
//!
//! The fetch guard behaves like an effect keyed on `(questions, backend)`:
//! one request per mount, and another only if the backend changes while
//! nothing is held yet.

use log::{debug, info};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StarterQuestions {
    questions: Option<Vec<String>>,
    /// Backend the last request was issued for.
    requested_for: Option<String>,
}

impl StarterQuestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no questions are held and nothing has been requested from
    /// `backend` yet.
    pub fn needs_fetch(&self, backend: &str) -> bool {
        self.questions.is_none() && self.requested_for.as_deref() != Some(backend)
    }

    /// Records that a request to `backend` is about to be issued.
    pub fn mark_requested(&mut self, backend: &str) {
        debug!("Starter questions requested from {}", backend);
        self.requested_for = Some(backend.to_string());
    }

    /// Stores a fetched list. Empty lists leave the state untouched.
    pub fn store(&mut self, questions: Vec<String>) -> bool {
        if questions.is_empty() {
            debug!("Config returned no starter questions");
            return false;
        }
        info!("Loaded {} starter questions", questions.len());
        self.questions = Some(questions);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        self.questions.as_deref().unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.questions.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_needs_fetch() {
        let starters = StarterQuestions::new();
        assert!(starters.needs_fetch("http://localhost:8000"));
        assert!(starters.as_slice().is_empty());
    }

    #[test]
    fn one_request_per_backend() {
        let mut starters = StarterQuestions::new();
        starters.mark_requested("http://a");
        assert!(!starters.needs_fetch("http://a"));
        assert!(starters.needs_fetch("http://b"));
    }

    #[test]
    fn stored_questions_stop_further_fetches() {
        let mut starters = StarterQuestions::new();
        starters.mark_requested("http://a");
        assert!(starters.store(vec!["Hi?".into(), "Why?".into()]));
        assert!(!starters.needs_fetch("http://b"));
        assert_eq!(starters.as_slice(), ["Hi?", "Why?"]);
    }

    #[test]
    fn empty_list_is_not_stored() {
        let mut starters = StarterQuestions::new();
        assert!(!starters.store(Vec::new()));
        assert!(!starters.is_loaded());
    }
}
