//! 🔄 Periodic dashboard refresh
//!
//! One background task re-fetches the snapshot on a fixed interval and
//! publishes each new view on a watch channel. A failed fetch is logged
//! and the last published view stays in place; the next tick is the only
//! retry. The loop awaits each fetch before waiting for the next tick and
//! skips ticks missed meanwhile, so fetches never overlap.

use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::dashboard::DashboardView;
use crate::snapshot::SnapshotSource;

/// Latest rendered view, shared with whoever displays it
pub type ViewSender = watch::Sender<Option<Arc<DashboardView>>>;

/// "Refreshing..." flag shown while a fetch is in flight
#[derive(Debug, Clone, Default)]
pub struct RefreshIndicator(Arc<AtomicBool>);

impl RefreshIndicator {
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Raise the indicator until the returned guard drops
    fn begin(&self) -> IndicatorGuard<'_> {
        self.0.store(true, Ordering::Release);
        IndicatorGuard(self)
    }
}

struct IndicatorGuard<'a>(&'a RefreshIndicator);

impl Drop for IndicatorGuard<'_> {
    fn drop(&mut self) {
        self.0 .0.store(false, Ordering::Release);
    }
}

/// Owned handle to a running refresh loop
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
    indicator: RefreshIndicator,
}

impl RefreshHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_refreshing(&self) -> bool {
        self.indicator.is_active()
    }
}

/// Fetch once and publish the rendered view. Returns whether a new view was published.
pub async fn refresh_once<S>(
    source: &S,
    config: &DashboardConfig,
    views: &ViewSender,
    indicator: &RefreshIndicator,
) -> bool
where
    S: SnapshotSource + ?Sized,
{
    let _busy = indicator.begin();

    match source.fetch().await {
        Ok(snapshot) => {
            let view = DashboardView::render(&snapshot, config, Utc::now().date_naive());
            views.send_replace(Some(Arc::new(view)));
            info!("🔄 Dashboard refreshed at {}", Utc::now().format("%H:%M:%S"));
            true
        }
        Err(e) => {
            warn!("⚠️  Auto-refresh failed: {}", e);
            false
        }
    }
}

/// Start the refresh loop, stopping `previous` first if given.
/// The first fetch happens one interval after start.
pub fn start_polling<S>(
    previous: Option<RefreshHandle>,
    source: Arc<S>,
    config: DashboardConfig,
    views: ViewSender,
) -> RefreshHandle
where
    S: SnapshotSource + ?Sized + 'static,
{
    if let Some(previous) = previous {
        previous.stop();
    }

    let period = Duration::from_secs(config.refresh_interval_secs.max(1));
    let indicator = RefreshIndicator::default();
    let task_indicator = indicator.clone();

    let task = tokio::spawn(async move {
        info!("🔄 Auto-refresh every {}s", period.as_secs());
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            timer.tick().await;
            refresh_once(source.as_ref(), &config, &views, &task_indicator).await;
        }
    });

    RefreshHandle { task, indicator }
}
