use super::Shell;
use crate::kernel::services::ports::AnalysisSession;
use crate::kernel::{Action, Effect};
use std::time::Instant;

impl<S: AnalysisSession> Shell<S> {
    pub fn dispatch(&mut self, action: Action) -> bool {
        self.dispatch_at(action, Instant::now())
    }

    /// Applies `action` and runs its effects; `now` anchors the analysis delay.
    pub fn dispatch_at(&mut self, action: Action, now: Instant) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.run_effect(effect, now);
        }
        if result.state_changed {
            tracing::trace!(revision = self.revision(), "state changed");
        }
        result.state_changed
    }

    fn run_effect(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::PersistLocal(snapshot) => {
                self.gateway.persist_local(&snapshot);
            }
            Effect::ScheduleAnalysis(input) => {
                self.analysis.schedule(input, now);
            }
            Effect::Share(snapshot) => {
                self.notice = None;
                self.share_in_flight = true;
                self.shares_started += 1;
                self.runtime
                    .upload_share(self.shares_started, self.gateway.upload(snapshot));
            }
        }
    }
}
