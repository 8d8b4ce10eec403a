//! Deferred layout-sanity check.
//!
//! Layout transitions can leave the bar and its active view disagreeing
//! about their size. Rather than checking synchronously (the sizes may not
//! have settled yet), callers schedule a short-delayed task that compares
//! the two and, on mismatch, logs a warning and requests a re-layout. The
//! request is idempotent, so a check firing after the state it observed has
//! already changed is harmless. The returned handle can abort the task,
//! but nothing in the bar does; once scheduled, a check runs to completion.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::warn;

/// One frame at ~60Hz; enough for sizes to settle after a relayout.
pub const CHECK_DELAY: Duration = Duration::from_millis(16);

/// Supplies the two measurements the check compares.
pub trait LayoutProbe: Send + Sync {
    /// Last-known dimensions of the bar itself.
    fn bar_size(&self) -> (u16, u16);
    /// Measured dimensions of the currently active view.
    fn active_view_size(&self) -> (u16, u16);
}

/// Emitted when the bar and its active view disagree about their size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayoutRequest {
    /// What triggered the check (for the log line).
    pub reason: String,
    pub bar_size: (u16, u16),
    pub view_size: (u16, u16),
}

/// Schedules the deferred check. Send failures are ignored; a receiver that
/// went away just means nobody wants the re-layout anymore.
pub fn schedule_check(
    probe: Arc<dyn LayoutProbe>,
    reason: impl Into<String>,
    requests: UnboundedSender<RelayoutRequest>,
) -> JoinHandle<()> {
    let reason = reason.into();
    tokio::spawn(async move {
        tokio::time::sleep(CHECK_DELAY).await;

        let bar_size = probe.bar_size();
        let view_size = probe.active_view_size();
        if bar_size != view_size {
            warn!(
                reason = %reason,
                bar = ?bar_size,
                view = ?view_size,
                "invalid layout in navigation bar"
            );
            let _ = requests.send(RelayoutRequest { reason, bar_size, view_size });
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    struct FixedProbe {
        bar: (u16, u16),
        view: (u16, u16),
    }

    impl LayoutProbe for FixedProbe {
        fn bar_size(&self) -> (u16, u16) {
            self.bar
        }
        fn active_view_size(&self) -> (u16, u16) {
            self.view
        }
    }

    #[tokio::test]
    async fn mismatch_requests_a_relayout() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let probe = Arc::new(FixedProbe { bar: (240, 3), view: (180, 3) });

        schedule_check(probe, "resize", tx).await.unwrap();

        let request = rx.recv().await.expect("a relayout request");
        assert_eq!(request.reason, "resize");
        assert_eq!(request.bar_size, (240, 3));
        assert_eq!(request.view_size, (180, 3));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn matching_sizes_stay_quiet() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let probe = Arc::new(FixedProbe { bar: (240, 3), view: (240, 3) });

        schedule_check(probe, "resize", tx).await.unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn dropped_receiver_does_not_panic_the_task() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let probe = Arc::new(FixedProbe { bar: (240, 3), view: (0, 0) });

        schedule_check(probe, "attach", tx).await.unwrap();
    }
}
