//! Headless media backend
//!
//! Journals every session operation instead of decoding video. Used by the
//! `vidlex` binary (which has no surface to render to) and by tests to
//! observe what the playback controller asked for. The journal keeps the
//! most recent operations only.

use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domains::player::backend::{
    MediaBackend, MediaSession, PlaybackError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum MediaOp {
    Open(String),
    Play(String),
    Pause(String),
    Seek(String, f64),
    Looping(String, bool),
    Stop(String),
}

/// Operations kept by a backend built with [`HeadlessBackend::new`].
pub const JOURNAL_CAPACITY: usize = 1024;

#[derive(Debug)]
struct Journal {
    ops: VecDeque<MediaOp>,
    capacity: usize,
}

impl Journal {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            ops: VecDeque::new(),
            capacity,
        }
    }

    fn push(&mut self, op: MediaOp) {
        if self.capacity == 0 {
            return;
        }
        if self.ops.len() == self.capacity {
            self.ops.pop_front();
        }
        self.ops.push_back(op);
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(JOURNAL_CAPACITY)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    journal: Arc<Mutex<Journal>>,
    live: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` operations, dropping the oldest. Zero turns
    /// journaling off.
    pub fn with_journal_capacity(capacity: usize) -> Self {
        Self {
            journal: Arc::new(Mutex::new(Journal::with_capacity(capacity))),
            ..Self::default()
        }
    }

    /// Make `open` fail for `url`.
    pub fn fail_on(&self, url: impl Into<String>) {
        self.failing.lock().insert(url.into());
    }

    pub fn ops(&self) -> Vec<MediaOp> {
        self.journal.lock().ops.iter().cloned().collect()
    }

    pub fn clear_ops(&self) {
        self.journal.lock().ops.clear();
    }

    /// Sessions opened and not yet stopped or dropped.
    pub fn live_sessions(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously live sessions observed.
    pub fn peak_sessions(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl MediaBackend for HeadlessBackend {
    type Session = HeadlessSession;

    fn open(&mut self, url: &str) -> Result<HeadlessSession, PlaybackError> {
        if self.failing.lock().contains(url) {
            return Err(PlaybackError::Open {
                url: url.to_string(),
                reason: "stream unavailable".to_string(),
            });
        }
        log::debug!("[HeadlessBackend] open {}", url);
        self.journal.lock().push(MediaOp::Open(url.to_string()));
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(live, Ordering::SeqCst);
        Ok(HeadlessSession {
            url: url.to_string(),
            journal: Arc::clone(&self.journal),
            live: Arc::clone(&self.live),
            released: false,
        })
    }
}

#[derive(Debug)]
pub struct HeadlessSession {
    url: String,
    journal: Arc<Mutex<Journal>>,
    live: Arc<AtomicUsize>,
    released: bool,
}

impl HeadlessSession {
    fn record(&self, op: MediaOp) {
        log::trace!("[HeadlessBackend] {:?}", op);
        self.journal.lock().push(op);
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl MediaSession for HeadlessSession {
    fn play(&mut self) {
        self.record(MediaOp::Play(self.url.clone()));
    }

    fn pause(&mut self) {
        self.record(MediaOp::Pause(self.url.clone()));
    }

    fn seek(&mut self, seconds: f64) {
        self.record(MediaOp::Seek(self.url.clone(), seconds));
    }

    fn set_looping(&mut self, looping: bool) {
        self.record(MediaOp::Looping(self.url.clone(), looping));
    }

    fn stop(&mut self) {
        self.record(MediaOp::Stop(self.url.clone()));
        self.release();
    }
}

impl Drop for HeadlessSession {
    fn drop(&mut self) {
        self.release();
    }
}
