// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot-based undo/redo.
//!
//! History is a linear list of [`Document`]s with a cursor on the state currently shown.
//! Captures are requested on every change but only taken once the changes settle
//! (debounce) and no more often than the throttle interval. While a snapshot is being
//! restored the history is suppressed, so the restore itself is never recorded.

mod clock;

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;

use crate::format::Document;

pub use clock::{Clock, ManualClock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPolicy {
    /// Quiet period after the last change before a capture is taken.
    pub debounce: Duration,
    /// Minimum spacing between two captures.
    pub throttle: Duration,
    /// Oldest entries are evicted past this length.
    pub max_entries: usize,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            throttle: Duration::from_millis(1000),
            max_entries: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    NothingToUndo,
    NothingToRedo,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToUndo => f.write_str("nothing to undo"),
            Self::NothingToRedo => f.write_str("nothing to redo"),
        }
    }
}

impl std::error::Error for HistoryError {}

#[derive(Debug, Clone)]
pub struct History {
    policy: HistoryPolicy,
    entries: Vec<Document>,
    cursor: usize,
    suppressed: bool,
    deadline: Option<Instant>,
    last_capture: Option<Instant>,
}

impl History {
    pub fn new(policy: HistoryPolicy) -> Self {
        Self {
            policy: HistoryPolicy {
                max_entries: policy.max_entries.max(1),
                ..policy
            },
            entries: Vec::new(),
            cursor: 0,
            suppressed: false,
            deadline: None,
            last_capture: None,
        }
    }

    pub fn policy(&self) -> &HistoryPolicy {
        &self.policy
    }

    pub fn entries(&self) -> &[Document] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry currently shown.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Document> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    pub fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records `document` as the newest state.
    ///
    /// Does nothing while suppressed or when `document` equals the current entry. Entries
    /// after the cursor are discarded first. Returns whether an entry was appended.
    pub fn capture(&mut self, document: Document, now: Instant) -> bool {
        self.deadline = None;
        if self.suppressed {
            debug!("history: capture skipped while suppressed");
            return false;
        }
        if self.current() == Some(&document) {
            return false;
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(document);
        let overflow = self.entries.len().saturating_sub(self.policy.max_entries);
        if overflow > 0 {
            self.entries.drain(..overflow);
        }
        self.cursor = self.entries.len() - 1;
        self.last_capture = Some(now);
        debug!("history: captured entry {} of {}", self.cursor + 1, self.entries.len());
        true
    }

    /// Schedules a capture once changes have been quiet for the debounce interval.
    ///
    /// Each call pushes the deadline out again.
    pub fn request_capture(&mut self, now: Instant) {
        if self.suppressed {
            return;
        }
        self.deadline = Some(now + self.policy.debounce);
    }

    pub fn cancel_pending(&mut self) {
        self.deadline = None;
    }

    /// When the pending capture becomes due, taking the throttle into account.
    pub fn next_due(&self) -> Option<Instant> {
        let deadline = self.deadline?;
        Some(match self.last_capture {
            Some(last) => deadline.max(last + self.policy.throttle),
            None => deadline,
        })
    }

    /// Whether a pending capture should be taken at `now`.
    pub fn poll(&self, now: Instant) -> bool {
        self.next_due().is_some_and(|due| now >= due)
    }

    /// Steps back one entry and returns the document to restore.
    pub fn undo(&mut self) -> Result<&Document, HistoryError> {
        if !self.can_undo() {
            return Err(HistoryError::NothingToUndo);
        }
        self.cursor -= 1;
        self.deadline = None;
        Ok(&self.entries[self.cursor])
    }

    /// Steps forward one entry and returns the document to restore.
    pub fn redo(&mut self) -> Result<&Document, HistoryError> {
        if !self.can_redo() {
            return Err(HistoryError::NothingToRedo);
        }
        self.cursor += 1;
        self.deadline = None;
        Ok(&self.entries[self.cursor])
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HistoryPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rstest::{fixture, rstest};

    use super::{History, HistoryError, HistoryPolicy};
    use crate::format::{Document, NodeRecord, TransformRecord};
    use crate::model::Transform;

    fn doc(label: &str) -> Document {
        Document {
            nodes: vec![NodeRecord {
                id: "n:1".to_owned(),
                kind: "actor".to_owned(),
                label: label.to_owned(),
                transform: TransformRecord::from(&Transform::default()),
                style: Default::default(),
            }],
            ..Document::default()
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[fixture]
    fn t0() -> Instant {
        Instant::now()
    }

    #[rstest]
    fn capture_after_undo_truncates_redo_branch(t0: Instant) {
        let mut history = History::default();
        history.capture(doc("s0"), t0);
        history.capture(doc("s1"), t0 + ms(1000));
        history.capture(doc("s2"), t0 + ms(2000));

        assert_eq!(history.undo().expect("undo"), &doc("s1"));
        assert_eq!(history.undo().expect("undo"), &doc("s0"));
        assert!(history.capture(doc("new"), t0 + ms(3000)));

        assert_eq!(history.entries(), &[doc("s0"), doc("new")]);
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.redo(), Err(HistoryError::NothingToRedo));
    }

    #[rstest]
    fn identical_snapshot_is_not_recorded(t0: Instant) {
        let mut history = History::default();
        assert!(history.capture(doc("s0"), t0));
        assert!(!history.capture(doc("s0"), t0 + ms(5000)));
        assert_eq!(history.len(), 1);
    }

    #[rstest]
    fn undo_and_redo_report_exhaustion(t0: Instant) {
        let mut history = History::default();
        assert_eq!(history.undo(), Err(HistoryError::NothingToUndo));
        history.capture(doc("s0"), t0);
        assert_eq!(history.undo(), Err(HistoryError::NothingToUndo));
        assert_eq!(history.redo(), Err(HistoryError::NothingToRedo));

        history.capture(doc("s1"), t0 + ms(1000));
        history.undo().expect("undo");
        assert_eq!(history.redo().expect("redo"), &doc("s1"));
    }

    #[rstest]
    fn oldest_entries_are_evicted(t0: Instant) {
        let mut history = History::new(HistoryPolicy {
            max_entries: 3,
            ..HistoryPolicy::default()
        });
        for i in 0..5u64 {
            history.capture(doc(&format!("s{i}")), t0 + ms(i * 1000));
        }

        assert_eq!(history.entries(), &[doc("s2"), doc("s3"), doc("s4")]);
        assert_eq!(history.cursor(), 2);
    }

    #[rstest]
    fn suppressed_history_ignores_captures_and_requests(t0: Instant) {
        let mut history = History::default();
        history.capture(doc("s0"), t0);
        history.set_suppressed(true);

        history.request_capture(t0 + ms(10));
        assert!(!history.has_pending());
        assert!(!history.capture(doc("restoring"), t0 + ms(20)));

        history.set_suppressed(false);
        assert_eq!(history.entries(), &[doc("s0")]);
    }

    #[rstest]
    fn debounce_restarts_on_every_request(t0: Instant) {
        let mut history = History::default();

        history.request_capture(t0);
        history.request_capture(t0 + ms(200));
        assert!(!history.poll(t0 + ms(300)));
        assert!(!history.poll(t0 + ms(499)));
        assert!(history.poll(t0 + ms(500)));
    }

    #[rstest]
    fn throttle_spaces_captures(t0: Instant) {
        let mut history = History::default();
        history.capture(doc("s0"), t0);

        history.request_capture(t0 + ms(100));
        assert_eq!(history.next_due(), Some(t0 + ms(1000)));
        assert!(!history.poll(t0 + ms(400)));
        assert!(history.poll(t0 + ms(1000)));

        history.capture(doc("s1"), t0 + ms(1000));
        assert!(!history.has_pending());
        history.request_capture(t0 + ms(2500));
        assert_eq!(history.next_due(), Some(t0 + ms(2800)));
    }
}
