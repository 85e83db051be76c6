//! Observable session state for one keyboard attachment.
//!
//! The state lives for as long as the keyboard is attached to a text field.
//! It is owned by the orchestrator and mutated only on its worker thread,
//! through the transition methods below; observers get cloned snapshots.
//! Keeping the transitions on the state type keeps the poll-cycle decision
//! logic unit-testable without threads.

use crate::correction::Match;

/// What a poll cycle decided after sampling the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Text identical to the last published input; loading cleared.
    Unchanged,
    /// Field is empty; everything reset.
    Cleared,
    /// New text published, but it matches the last checked sentence, so no
    /// fetch is needed.
    Republished,
    /// New text published and it differs from the last checked sentence.
    NeedsCheck,
}

/// Published state of a spell-check session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Last sampled text.
    pub text_input: String,
    /// Matches computed against `text_input`, minus anything the user has
    /// accepted or ignored since the last fetch.
    pub correction_matches: Vec<Match>,
    /// The sentence the current matches were fetched for.
    pub last_spell_checked: String,
    /// A fetch is in flight.
    pub is_loading: bool,
    /// Pushed by the host's reachability collaborator.
    pub has_internet: bool,
    /// Whether sampling covers the full document instead of the visible
    /// sentence.
    pub full_document_mode: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            text_input: String::new(),
            correction_matches: Vec::new(),
            last_spell_checked: String::new(),
            is_loading: false,
            // Assume online until the connectivity collaborator says otherwise.
            has_internet: true,
            full_document_mode: false,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a freshly sampled text into the state.
    pub fn apply_sample(&mut self, text: &str) -> SampleOutcome {
        if text == self.text_input {
            self.is_loading = false;
            return SampleOutcome::Unchanged;
        }
        if text.is_empty() {
            self.reset();
            return SampleOutcome::Cleared;
        }

        self.text_input = text.to_string();
        if text == self.last_spell_checked {
            SampleOutcome::Republished
        } else {
            SampleOutcome::NeedsCheck
        }
    }

    /// Commit a completed fetch, unless it has gone stale.
    ///
    /// A result only lands if the checked sentence still equals the current
    /// `text_input` (the user has not typed past it) and differs from
    /// `last_spell_checked` (an identical completion has not already
    /// landed). Everything else is discarded, which makes overlapping
    /// requests last-committed-wins.
    pub fn commit_result(&mut self, sentence: &str, filtered: Vec<Match>) -> bool {
        if sentence != self.text_input || sentence == self.last_spell_checked {
            return false;
        }

        self.correction_matches = filtered;
        self.last_spell_checked = sentence.to_string();
        self.is_loading = false;
        true
    }

    /// Remove the first structurally-equal match; absent is a no-op.
    pub fn remove_match(&mut self, target: &Match) {
        if let Some(index) = self.correction_matches.iter().position(|m| m == target) {
            self.correction_matches.remove(index);
        }
    }

    /// The empty-field reset: input, matches, and checked sentence all go.
    pub fn reset(&mut self) {
        self.text_input.clear();
        self.correction_matches.clear();
        self.last_spell_checked.clear();
        self.is_loading = false;
    }
}
