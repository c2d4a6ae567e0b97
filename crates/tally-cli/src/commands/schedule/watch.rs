//! `tly schedule watch`: keep a month's statuses current.
//!
//! The month is refreshed on start, whenever the audit collection changes
//! (a write in this process or one detected by the poller), when another
//! process rewrites the schedule, and when the local date rolls over. Each
//! refresh takes the project write lock only for its own write; Ctrl-C ends
//! the watch even while that lock is being waited for.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tally_core::period::Period;
use tally_store::feed::{ChangeEvent, ChangeOrigin};
use tally_store::service::CollectionKeys;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::refresh::{PeriodProgress, refresh_period};
use crate::cli::GlobalFlags;
use crate::cli::root_commands::PeriodArgs;
use crate::commands::shared::period::{period_or_current, today};
use crate::context::AppContext;
use crate::output::output_rows;
use crate::write_lock;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WatchUpdate<'a> {
    trigger: Trigger,
    refreshed_at: chrono::DateTime<chrono::Local>,
    #[serde(flatten)]
    progress: &'a PeriodProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Trigger {
    Start,
    Audits,
    Schedule,
    Lagged,
    DateChanged,
}

/// Which trigger, if any, an event is for. The watcher's own schedule writes
/// come back as `Write` events and are ignored.
fn trigger_for(event: &ChangeEvent, keys: &CollectionKeys) -> Option<Trigger> {
    if event.key == keys.audits {
        Some(Trigger::Audits)
    } else if event.key == keys.schedule && event.origin == ChangeOrigin::Poll {
        Some(Trigger::Schedule)
    } else {
        None
    }
}

pub async fn run(
    period: &PeriodArgs,
    interval: Option<u64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let period = period_or_current(period, today())?;
    let secs = interval.unwrap_or(ctx.config.schedule.poll_interval_secs).max(1);
    let interval = Duration::from_secs(secs);

    let mut events = ctx.service.feed().subscribe();
    let poller = ctx.service.poller(interval).spawn();
    tracing::info!(%period, interval_secs = secs, "watching schedule");

    let result = watch_loop(ctx, period, interval, &mut events, flags).await;
    poller.stop().await;
    result
}

async fn watch_loop(
    ctx: &AppContext,
    period: Period,
    interval: Duration,
    events: &mut broadcast::Receiver<ChangeEvent>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut day = today();
    let Some(mut last) = refresh(ctx, period, day, &mut shutdown).await? else {
        tracing::info!("watch interrupted");
        return Ok(());
    };
    print_update(Trigger::Start, &last, flags)?;

    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;

    loop {
        let trigger = tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("watch interrupted");
                return Ok(());
            }
            event = events.recv() => match event {
                Ok(event) => trigger_for(&event, ctx.service.keys()),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "change feed lagged");
                    Some(Trigger::Lagged)
                }
                Err(RecvError::Closed) => return Ok(()),
            },
            _ = ticker.tick() => {
                let now = today();
                (now != day).then(|| {
                    day = now;
                    Trigger::DateChanged
                })
            }
        };

        let Some(trigger) = trigger else {
            continue;
        };
        day = today();
        let Some(progress) = refresh(ctx, period, day, &mut shutdown).await? else {
            tracing::info!("watch interrupted while waiting for the write lock");
            return Ok(());
        };
        // Our own schedule write comes back once through the poller; only
        // print when something moved.
        if progress.entries != last.entries {
            print_update(trigger, &progress, flags)?;
        } else {
            tracing::debug!(?trigger, "refresh left the schedule unchanged");
        }
        last = progress;
    }
}

/// Refresh under the write lock, or `None` if `shutdown` fires while waiting.
async fn refresh<S>(
    ctx: &AppContext,
    period: Period,
    today: NaiveDate,
    shutdown: &mut S,
) -> anyhow::Result<Option<PeriodProgress>>
where
    S: Future + Unpin,
{
    let lock = write_lock::acquire_for_project(&ctx.project_root);
    let Some(_lock) = unless_shutdown(lock, shutdown).await? else {
        return Ok(None);
    };
    refresh_period(ctx, period, today).map(Some)
}

/// Await `work` unless `shutdown` resolves first.
async fn unless_shutdown<T, W, S>(work: W, shutdown: &mut S) -> anyhow::Result<Option<T>>
where
    W: Future<Output = anyhow::Result<T>>,
    S: Future + Unpin,
{
    tokio::select! {
        biased;
        _ = shutdown => Ok(None),
        done = work => done.map(Some),
    }
}

fn print_update(trigger: Trigger, progress: &PeriodProgress, flags: &GlobalFlags) -> anyhow::Result<()> {
    tracing::debug!(?trigger, completed = progress.completed, total = progress.total, "watch refresh");
    let update = WatchUpdate {
        trigger,
        refreshed_at: chrono::Local::now(),
        progress,
    };
    output_rows(&update, &progress.entries, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tally_store::feed::{ChangeEvent, ChangeOrigin};
    use tally_store::service::CollectionKeys;

    use super::{Trigger, trigger_for, unless_shutdown};
    use crate::write_lock;

    #[rstest]
    #[case("audits", ChangeOrigin::Write, Some(Trigger::Audits))]
    #[case("audits", ChangeOrigin::Poll, Some(Trigger::Audits))]
    #[case("schedule", ChangeOrigin::Poll, Some(Trigger::Schedule))]
    #[case("schedule", ChangeOrigin::Write, None)]
    #[case("other", ChangeOrigin::Poll, None)]
    fn reacts_to_audits_and_foreign_schedule_writes(
        #[case] key: &str,
        #[case] origin: ChangeOrigin,
        #[case] expected: Option<Trigger>,
    ) {
        let event = ChangeEvent {
            key: key.to_string(),
            origin,
        };
        assert_eq!(trigger_for(&event, &CollectionKeys::default()), expected);
    }

    #[tokio::test]
    async fn shutdown_wins_over_a_held_write_lock() {
        let dir = tempfile::tempdir().unwrap();
        let _held = write_lock::acquire_for_project(dir.path()).await.unwrap();

        let waiting = write_lock::acquire_for_project(dir.path());
        let mut shutdown = std::future::ready(());
        let outcome = unless_shutdown(waiting, &mut shutdown).await.unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn free_lock_is_taken_while_shutdown_is_pending() {
        let dir = tempfile::tempdir().unwrap();
        let mut shutdown = std::future::pending::<()>();
        let guard = unless_shutdown(write_lock::acquire_for_project(dir.path()), &mut shutdown)
            .await
            .unwrap();
        assert!(guard.is_some());
        assert!(write_lock::lock_path(dir.path()).exists());
    }
}
