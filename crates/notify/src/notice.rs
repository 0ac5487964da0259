use std::time::{Duration, Instant};

/// How long a notice stays visible. Success and error share it.
pub const NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// The category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message shown after an upload or download.
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notice {
    /// Whether the notice should no longer be shown at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }
}

/// In-memory notice queue with monotonic ID assignment.
///
/// Nothing here runs a timer: the front-end calls
/// [`dismiss_expired`](Self::dismiss_expired) whenever it redraws.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a notice created at `now`. Returns its ID.
    pub fn push_at(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            kind,
            message: message.into(),
            created_at: now,
            duration: NOTICE_DURATION,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push_at(NoticeKind::Success, message, Instant::now())
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push_at(NoticeKind::Error, message, Instant::now())
    }

    /// Removes every notice expired at `now`. Returns how many were removed.
    pub fn dismiss_expired(&mut self, now: Instant) -> usize {
        let len_before = self.notices.len();
        self.notices.retain(|n| !n.is_expired(now));
        len_before - self.notices.len()
    }

    /// Removes a notice by ID. Returns `true` if it was present.
    pub fn remove(&mut self, id: u64) -> bool {
        let len_before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != len_before
    }

    pub fn get(&self, id: u64) -> Option<&Notice> {
        self.notices.iter().find(|n| n.id == id)
    }

    /// Most recent notice still queued.
    pub fn latest(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Removes and returns every queued notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
