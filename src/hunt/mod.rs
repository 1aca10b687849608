use crate::answer::{answers_match, Match};
use crate::progress::SavedProgress;
use crate::puzzle::{Clue, PuzzleSet};
use crate::store::{ProgressStore, DEFAULT_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};


// ===================================================================
// Options
// ===================================================================

/// Upper bound applied to a saved clue index when resuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeClamp {
    /// Never resume past the last clue. A finished hunt comes back on its
    /// final clue.
    #[default]
    LastClue,
    /// Allow resuming straight into the finished state.
    Finished,
}

#[derive(Debug, Clone)]
pub struct HuntOptions {
    /// Store key the progress record lives under.
    pub key: String,
    pub resume_clamp: ResumeClamp,
    /// How long the presentation layer should show the invalid-attempt cue.
    pub cue: Duration,
}

impl Default for HuntOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            resume_clamp: ResumeClamp::default(),
            cue: Duration::from_millis(350),
        }
    }
}

// ===================================================================
// Observable state
// ===================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    /// Viewing the unsolved clue at this index.
    InProgress(usize),
    /// Every clue has been solved.
    Finished,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::NotStarted => "not_started",
            Phase::InProgress(_) => "in_progress",
            Phase::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::InProgress(i) => write!(f, "in_progress({i})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Why the last attempt was refused. Cleared on every clue transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    EmptyInput,
    Mismatch,
}

impl Feedback {
    pub fn tag(&self) -> &'static str {
        match self {
            Feedback::EmptyInput => "empty_input",
            Feedback::Mismatch => "mismatch",
        }
    }
}

/// Signal for the presentation layer to flash an "invalid attempt" effect
/// for `duration`. The session does not track it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAttemptCue {
    pub duration: Duration,
}

/// What a submitted answer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Correct; now on the clue at `index`.
    Advanced { index: usize },
    /// Correct, and it was the last clue.
    Finished,
    /// Empty or wrong. Nothing was persisted.
    Rejected {
        feedback: Feedback,
        cue: InvalidAttemptCue,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum HuntError {
    /// Answers are only taken while a clue is on screen.
    NotAcceptingAnswers(Phase),
}

impl fmt::Display for HuntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuntError::NotAcceptingAnswers(Phase::NotStarted) => {
                write!(f, "the hunt has not started yet")
            }
            HuntError::NotAcceptingAnswers(Phase::Finished) => {
                write!(f, "every clue is already solved")
            }
            HuntError::NotAcceptingAnswers(phase) => {
                write!(f, "not accepting answers while {phase}")
            }
        }
    }
}

impl std::error::Error for HuntError {}

// ===================================================================
// Session
// ===================================================================

/// The single mutable hunt for this process. Every change to `started` or
/// `index` is written through `store`; drafts and feedback stay in memory.
pub struct HuntSession<S> {
    puzzles: PuzzleSet,
    store: S,
    options: HuntOptions,
    started: bool,
    index: usize,
    pending_input: String,
    feedback: Option<Feedback>,
}

impl<S: ProgressStore> HuntSession<S> {
    /// Build the session, resuming from the store when it holds a usable
    /// record. Anything unusable falls back to a fresh, unstarted hunt.
    pub fn load(puzzles: PuzzleSet, store: S, options: HuntOptions) -> Self {
        let mut session = Self {
            puzzles,
            store,
            options,
            started: false,
            index: 0,
            pending_input: String::new(),
            feedback: None,
        };
        if let Some(saved) = session.read_saved() {
            let index = session.clamp_resumed(saved.index);
            if index != saved.index {
                debug!(target: "hunt", saved = saved.index, resumed = index, "clamped saved clue index");
            }
            session.started = saved.started;
            session.index = index;
            info!(target: "hunt", started = saved.started, index, "resumed saved progress");
        }
        session
    }

    fn read_saved(&self) -> Option<SavedProgress> {
        let key = &self.options.key;
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(target: "store", %key, "no saved progress");
                return None;
            }
            Err(err) => {
                let error = format!("{err:#}");
                debug!(target: "store", %key, %error, "could not read saved progress; starting fresh");
                return None;
            }
        };
        let saved = SavedProgress::parse(&raw);
        if saved.is_none() {
            debug!(target: "store", %key, "ignoring malformed saved progress");
        }
        saved
    }

    fn clamp_resumed(&self, index: usize) -> usize {
        // PuzzleSet guarantees at least one clue.
        let total = self.puzzles.len();
        match self.options.resume_clamp {
            ResumeClamp::LastClue => index.min(total - 1),
            ResumeClamp::Finished => index.min(total),
        }
    }

    // ---------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------

    /// Begin (or resume) the hunt. Calling it again changes nothing but
    /// rewrites the saved record.
    pub fn start(&mut self) {
        self.started = true;
        self.reset_transient();
        info!(target: "hunt", index = self.index, "hunt started");
        self.persist();
    }

    /// Check `raw` against the current clue's answer.
    pub fn submit_answer(&mut self, raw: &str) -> Result<Submission, HuntError> {
        let verdict = match (self.phase(), self.current_clue()) {
            (Phase::InProgress(_), Some(clue)) => answers_match(raw, &clue.answer),
            (phase, _) => return Err(HuntError::NotAcceptingAnswers(phase)),
        };

        match verdict {
            Match::Empty => Ok(self.reject(Feedback::EmptyInput)),
            Match::Wrong => Ok(self.reject(Feedback::Mismatch)),
            Match::Correct => {
                self.index += 1;
                self.reset_transient();
                self.persist();
                if self.index == self.puzzles.len() {
                    info!(target: "hunt", "final clue solved");
                    Ok(Submission::Finished)
                } else {
                    info!(target: "hunt", index = self.index, "clue solved");
                    Ok(Submission::Advanced { index: self.index })
                }
            }
        }
    }

    /// Submit whatever is in the draft. A refused draft is kept for editing.
    pub fn submit_pending(&mut self) -> Result<Submission, HuntError> {
        let draft = self.pending_input.clone();
        self.submit_answer(&draft)
    }

    /// Back to the home screen, and erase the saved record entirely.
    pub fn restart(&mut self) {
        self.started = false;
        self.index = 0;
        self.reset_transient();
        info!(target: "hunt", "hunt restarted");
        if let Err(err) = self.store.remove(&self.options.key) {
            let error = format!("{err:#}");
            debug!(target: "store", key = %self.options.key, %error, "failed to erase saved progress");
        }
    }

    pub fn set_input(&mut self, draft: &str) {
        self.pending_input = draft.to_string();
    }

    fn reject(&mut self, feedback: Feedback) -> Submission {
        debug!(target: "hunt", index = self.index, feedback = feedback.tag(), "answer rejected");
        self.feedback = Some(feedback);
        Submission::Rejected {
            feedback,
            cue: InvalidAttemptCue {
                duration: self.options.cue,
            },
        }
    }

    fn reset_transient(&mut self) {
        self.pending_input.clear();
        self.feedback = None;
    }

    /// Failures are logged and dropped; memory stays authoritative and the
    /// next successful write brings the store back in line.
    fn persist(&mut self) {
        let saved = SavedProgress {
            started: self.started,
            index: self.index,
        };
        let key = &self.options.key;
        let result = saved
            .to_json()
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.set(key, &json));
        match result {
            Ok(()) => debug!(target: "store", %key, started = saved.started, index = saved.index, "saved progress"),
            Err(err) => {
                let error = format!("{err:#}");
                debug!(target: "store", %key, %error, "failed to save progress; continuing in memory");
            }
        }
    }

    // ---------------------------------------------------------------
    // View
    // ---------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::NotStarted
        } else if self.index >= self.puzzles.len() {
            Phase::Finished
        } else {
            Phase::InProgress(self.index)
        }
    }

    /// The clue on screen, if any.
    pub fn current_clue(&self) -> Option<&Clue> {
        match self.phase() {
            Phase::InProgress(i) => self.puzzles.get(i),
            _ => None,
        }
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.puzzles.len()
    }

    /// Fraction of clues solved, `0.0` before the hunt starts.
    pub fn progress(&self) -> f64 {
        if !self.started {
            return 0.0;
        }
        self.index as f64 / self.puzzles.len() as f64
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}
