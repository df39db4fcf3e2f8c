use super::{Shell, MAX_RUNTIME_DRAIN_PER_TICK};
use crate::kernel::services::adapters::AppMessage;
use crate::kernel::services::ports::AnalysisSession;
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

impl<S: AnalysisSession> Shell<S> {
    /// Applies finished async work and settles the deferred analysis view.
    /// Called from the main loop.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        changed |= self.poll_runtime();
        changed |= self.poll_analysis(now);
        changed
    }

    /// Analyses the pending input immediately instead of waiting for its
    /// deadline.
    pub fn settle_analysis(&mut self) -> bool {
        let session = self.store.controller().session();
        self.analysis.flush(session)
    }

    pub fn analysis_deadline(&self) -> Option<Instant> {
        self.analysis.deadline()
    }

    /// Blocks until the latest share finishes or `timeout` elapses.
    /// Completions of earlier shares met on the way are dropped.
    pub fn wait_for_share(&mut self, timeout: Duration) -> bool {
        if !self.share_in_flight {
            return false;
        }
        let deadline = Instant::now() + timeout;
        while self.share_in_flight {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.runtime_rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.handle_app_message(msg);
                }
                Err(_) => return false,
            }
        }
        true
    }

    fn poll_analysis(&mut self, now: Instant) -> bool {
        let session = self.store.controller().session();
        self.analysis.poll(now, session)
    }

    fn poll_runtime(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..MAX_RUNTIME_DRAIN_PER_TICK {
            match self.runtime_rx.try_recv() {
                Ok(msg) => changed |= self.handle_app_message(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    pub(super) fn handle_app_message(&mut self, msg: AppMessage) -> bool {
        let seq = msg.seq();
        if seq != self.shares_started {
            tracing::debug!(
                seq,
                latest = self.shares_started,
                "dropping superseded share result"
            );
            return false;
        }
        match msg {
            AppMessage::ShareUploaded { id, .. } => {
                self.share_in_flight = false;
                match self.gateway.publish(&id) {
                    Ok(url) => {
                        self.share_url = Some(url);
                    }
                    Err(err) => {
                        tracing::error!(id = %id, error = %err, "Failed to share workspace");
                        self.notice = Some(format!("Failed to share workspace: {err}"));
                    }
                }
                true
            }
            AppMessage::ShareFailed { error, .. } => {
                self.share_in_flight = false;
                tracing::error!(error = %error, "Failed to share workspace");
                self.notice = Some(format!("Failed to share workspace: {error}"));
                true
            }
        }
    }
}
