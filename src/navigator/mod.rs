//! Navigation Controller
//!
//! State machine that turns ranked similarity scores and manual key
//! events into section changes. Automatic decisions are computed against
//! a snapshot of shared state; any manual override landing while a tick
//! is in flight wins, and the stale automatic decision is discarded.

pub mod driver;

use crate::matching::SimilarityResult;
use std::collections::VecDeque;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    /// Accumulating words, not enough for a full comparison window
    Listening,
    /// Window full, scoring every tick
    Matching,
    /// Manual pause: speech still accumulates, navigation never fires
    Paused,
    /// Session ended, terminal
    Stopped,
}

/// Manual override events from the input listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    PauseToggle,
}

/// Per-tick progress readout, informational only
#[derive(Debug, Clone, Default)]
pub struct TickStatus {
    pub current_index: usize,
    pub total_sections: usize,
    pub heard: String,
    pub best_match: String,
    pub best_score: f64,
}

/// The only cross-worker mutable state in the session.
///
/// Owned behind a mutex; workers get an explicit handle, never ambient
/// globals. `epoch` increments on every manual override so an in-flight
/// automatic decision can detect that it raced a human and yield.
#[derive(Debug)]
pub struct NavigationState {
    pub phase: NavPhase,
    pub current_section_index: usize,
    recent_words: VecDeque<String>,
    window_size: usize,
    total_sections: usize,
    pub epoch: u64,
}

impl NavigationState {
    pub fn new(window_size: usize, total_sections: usize) -> Self {
        debug_assert!(window_size > 0);
        debug_assert!(total_sections > 0);
        Self {
            phase: NavPhase::Listening,
            current_section_index: 0,
            recent_words: VecDeque::with_capacity(window_size),
            window_size,
            total_sections,
            epoch: 0,
        }
    }

    /// Append one recognized word, evicting the oldest on overflow.
    /// Filling the window for the first time moves LISTENING to MATCHING.
    pub fn push_word(&mut self, word: String) {
        if self.phase == NavPhase::Stopped {
            return;
        }
        if self.recent_words.len() == self.window_size {
            self.recent_words.pop_front();
        }
        self.recent_words.push_back(word);

        if self.phase == NavPhase::Listening && self.recent_words.len() >= self.window_size {
            self.phase = NavPhase::Matching;
        }
    }

    /// The rolling speech window as one space-joined phrase
    pub fn joined_words(&self) -> String {
        self.recent_words
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn word_count(&self) -> usize {
        self.recent_words.len()
    }

    /// Apply a manual override. Returns the new section index when the
    /// command navigated, so the caller can drive the deck.
    pub fn apply_manual(&mut self, cmd: NavCommand) -> Option<usize> {
        if self.phase == NavPhase::Stopped {
            return None;
        }
        self.epoch += 1;

        match cmd {
            NavCommand::Next => {
                let target = (self.current_section_index + 1).min(self.total_sections - 1);
                if target != self.current_section_index {
                    self.current_section_index = target;
                    return Some(target);
                }
                None
            }
            NavCommand::Previous => {
                let target = self.current_section_index.saturating_sub(1);
                if target != self.current_section_index {
                    self.current_section_index = target;
                    return Some(target);
                }
                None
            }
            NavCommand::PauseToggle => {
                self.phase = match self.phase {
                    NavPhase::Paused => {
                        if self.recent_words.len() >= self.window_size {
                            NavPhase::Matching
                        } else {
                            NavPhase::Listening
                        }
                    }
                    _ => NavPhase::Paused,
                };
                None
            }
        }
    }

    /// Commit an automatic navigation decision computed from a snapshot
    /// taken at `snapshot_epoch`. Refused when a manual override landed
    /// in between or the controller is no longer matching.
    pub fn commit_auto(&mut self, target: usize, snapshot_epoch: u64) -> bool {
        if self.phase != NavPhase::Matching || self.epoch != snapshot_epoch {
            return false;
        }
        debug_assert!(target < self.total_sections);
        self.current_section_index = target;
        true
    }

    /// Undo a committed automatic move whose deck side effect failed, so
    /// state never runs ahead of the deck. Refused when a manual override
    /// landed after the commit or the committed target already moved on.
    pub fn revert_auto(&mut self, previous: usize, target: usize, snapshot_epoch: u64) -> bool {
        if self.epoch != snapshot_epoch || self.current_section_index != target {
            return false;
        }
        self.current_section_index = previous;
        true
    }

    pub fn stop(&mut self) {
        self.phase = NavPhase::Stopped;
    }
}

/// Pick the automatic navigation target from a ranked result list.
///
/// Fires only when the top score clears the threshold and the winning
/// chunk's target section (its last source section, biasing forward)
/// differs from the current one.
pub fn decide_navigation(
    results: &[SimilarityResult],
    current_index: usize,
    threshold: f64,
) -> Option<usize> {
    let top = results.first()?;
    if top.score <= threshold {
        return None;
    }
    let target = top.chunk.target_section();
    if target == current_index {
        return None;
    }
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Chunk, Section};

    fn result(score: f64, sections: &[usize]) -> SimilarityResult {
        SimilarityResult {
            chunk: Chunk {
                partial_content: "text".to_string(),
                source_sections: sections.iter().map(|&i| Section::new("", i)).collect(),
            },
            score,
        }
    }

    #[test]
    fn test_listening_to_matching_transition() {
        let mut state = NavigationState::new(3, 5);
        assert_eq!(state.phase, NavPhase::Listening);

        state.push_word("one".into());
        state.push_word("two".into());
        assert_eq!(state.phase, NavPhase::Listening);

        state.push_word("three".into());
        assert_eq!(state.phase, NavPhase::Matching);
    }

    #[test]
    fn test_word_buffer_bounded() {
        let mut state = NavigationState::new(3, 5);
        for w in ["a", "b", "c", "d", "e"] {
            state.push_word(w.into());
        }
        assert_eq!(state.word_count(), 3);
        assert_eq!(state.joined_words(), "c d e");
    }

    #[test]
    fn test_manual_next_previous_clamped() {
        let mut state = NavigationState::new(3, 3);

        assert_eq!(state.apply_manual(NavCommand::Previous), None); // at 0
        assert_eq!(state.apply_manual(NavCommand::Next), Some(1));
        assert_eq!(state.apply_manual(NavCommand::Next), Some(2));
        assert_eq!(state.apply_manual(NavCommand::Next), None); // clamped at end
        assert_eq!(state.current_section_index, 2);
        assert_eq!(state.apply_manual(NavCommand::Previous), Some(1));
    }

    #[test]
    fn test_pause_toggle_restores_phase() {
        let mut state = NavigationState::new(2, 5);
        state.push_word("a".into());
        state.push_word("b".into());
        assert_eq!(state.phase, NavPhase::Matching);

        state.apply_manual(NavCommand::PauseToggle);
        assert_eq!(state.phase, NavPhase::Paused);
        state.apply_manual(NavCommand::PauseToggle);
        assert_eq!(state.phase, NavPhase::Matching);
    }

    #[test]
    fn test_pause_still_accumulates_words() {
        let mut state = NavigationState::new(2, 5);
        state.apply_manual(NavCommand::PauseToggle);
        state.push_word("a".into());
        state.push_word("b".into());
        assert_eq!(state.phase, NavPhase::Paused);
        assert_eq!(state.word_count(), 2);

        // Resuming with a full window goes straight to matching
        state.apply_manual(NavCommand::PauseToggle);
        assert_eq!(state.phase, NavPhase::Matching);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut state = NavigationState::new(2, 5);
        state.stop();
        state.push_word("a".into());
        assert_eq!(state.word_count(), 0);
        assert_eq!(state.apply_manual(NavCommand::Next), None);
        assert_eq!(state.phase, NavPhase::Stopped);
    }

    #[test]
    fn test_decide_below_threshold_never_navigates() {
        let results = vec![result(0.5, &[3])];
        assert_eq!(decide_navigation(&results, 0, 0.72), None);
        assert_eq!(decide_navigation(&results, 4, 0.5), None); // threshold not exceeded
    }

    #[test]
    fn test_decide_targets_last_source_section() {
        let results = vec![result(0.9, &[1, 2])];
        assert_eq!(decide_navigation(&results, 1, 0.72), Some(2));
    }

    #[test]
    fn test_decide_same_section_is_noop() {
        let results = vec![result(0.9, &[2])];
        assert_eq!(decide_navigation(&results, 2, 0.72), None);
    }

    #[test]
    fn test_decide_empty_results() {
        assert_eq!(decide_navigation(&[], 0, 0.72), None);
    }

    #[test]
    fn test_manual_override_invalidates_snapshot() {
        let mut state = NavigationState::new(2, 5);
        state.push_word("a".into());
        state.push_word("b".into());

        let snapshot_epoch = state.epoch;
        // Manual pause lands while the tick is scoring
        state.apply_manual(NavCommand::PauseToggle);

        assert!(!state.commit_auto(3, snapshot_epoch));
        assert_eq!(state.current_section_index, 0);
    }

    #[test]
    fn test_revert_auto_undoes_failed_move() {
        let mut state = NavigationState::new(2, 5);
        state.push_word("a".into());
        state.push_word("b".into());

        let snapshot_epoch = state.epoch;
        assert!(state.commit_auto(3, snapshot_epoch));
        assert!(state.revert_auto(0, 3, snapshot_epoch));
        assert_eq!(state.current_section_index, 0);
    }

    #[test]
    fn test_revert_auto_yields_to_manual_override() {
        let mut state = NavigationState::new(2, 5);
        state.push_word("a".into());
        state.push_word("b".into());

        let snapshot_epoch = state.epoch;
        assert!(state.commit_auto(3, snapshot_epoch));
        // Manual move lands before the revert attempt
        state.apply_manual(NavCommand::Next);

        assert!(!state.revert_auto(0, 3, snapshot_epoch));
        assert_eq!(state.current_section_index, 4);
    }

    #[test]
    fn test_commit_auto_applies_when_unraced() {
        let mut state = NavigationState::new(2, 5);
        state.push_word("a".into());
        state.push_word("b".into());

        let snapshot_epoch = state.epoch;
        assert!(state.commit_auto(3, snapshot_epoch));
        assert_eq!(state.current_section_index, 3);
    }
}
