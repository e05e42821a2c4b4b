//! One-time celebration banner.
//!
//! The banner fires the first time the completed count reaches the
//! threshold while the persisted flag is false. The flag is written with a
//! single check-and-set; once it is true the banner never shows again, in
//! this session or any later one.

use std::time::Duration;

use crate::config::CelebrationConfig;
use crate::prefs::CelebrationStore;
use crate::scheduler::ScheduledId;

/// Result of feeding a count change to the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationOutcome {
    /// Nothing to show
    Idle,
    /// Banner became visible; hide it after `hide_after`
    Shown { hide_after: Duration },
}

#[derive(Debug, Clone)]
pub struct CelebrationTrigger {
    threshold: usize,
    banner_duration: Duration,
    banner_visible: bool,
    // Set once the banner fired or the store reported the flag as already set.
    settled: bool,
    // A flag write failed after the banner was shown; retried on the next count change.
    persist_pending: bool,
    hide_id: Option<ScheduledId>,
}

impl CelebrationTrigger {
    pub fn new(threshold: usize, banner_duration: Duration) -> Self {
        Self {
            threshold,
            banner_duration,
            banner_visible: false,
            settled: false,
            persist_pending: false,
            hide_id: None,
        }
    }

    pub fn from_config(config: &CelebrationConfig) -> Self {
        Self::new(config.threshold, Duration::from_millis(config.banner_ms))
    }

    pub fn is_banner_visible(&self) -> bool {
        self.banner_visible
    }

    /// Observe a new completed count.
    pub fn on_count_changed(
        &mut self,
        count: usize,
        store: &mut dyn CelebrationStore,
    ) -> CelebrationOutcome {
        if self.persist_pending {
            match store.set_celebration_shown() {
                Ok(()) => {
                    self.persist_pending = false;
                    tracing::debug!("celebration flag persisted on retry");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "celebration flag write failed again");
                }
            }
        }

        if self.settled || count < self.threshold {
            return CelebrationOutcome::Idle;
        }

        match store.mark_celebration_shown() {
            Ok(true) => {}
            Ok(false) => {
                self.settled = true;
                tracing::debug!(count, "celebration already shown in an earlier session");
                return CelebrationOutcome::Idle;
            }
            // The check-and-set can fail before it reads the flag, so fall
            // back to a plain read before deciding to show anything.
            Err(err) => match store.celebration_shown() {
                Ok(false) => {
                    tracing::warn!(error = %err, "celebration flag write failed; will retry");
                    self.persist_pending = true;
                }
                Ok(true) => {
                    self.settled = true;
                    tracing::debug!(error = %err, "celebration flag already set; lock unavailable");
                    return CelebrationOutcome::Idle;
                }
                Err(read_err) => {
                    tracing::warn!(
                        error = %err,
                        read_error = %read_err,
                        "celebration flag unreadable; retrying on next count change"
                    );
                    return CelebrationOutcome::Idle;
                }
            },
        }

        self.settled = true;
        self.banner_visible = true;
        tracing::info!(count, threshold = self.threshold, "celebration banner shown");
        CelebrationOutcome::Shown {
            hide_after: self.banner_duration,
        }
    }

    /// Remember the scheduled hide; only the latest one is honoured.
    pub fn arm_hide(&mut self, id: ScheduledId) {
        self.hide_id = Some(id);
    }

    /// Hide the banner if `id` is the latest scheduled hide.
    pub fn on_hide_fired(&mut self, id: ScheduledId) -> bool {
        if self.hide_id != Some(id) {
            return false;
        }
        self.hide_id = None;
        let was_visible = self.banner_visible;
        self.banner_visible = false;
        was_visible
    }
}
