use std::future::Future;
use tokio::time::{self, Duration, MissedTickBehavior};

/// Invokes `task` once immediately and then once per `period` until the
/// shutdown signal fires.
///
/// The task owns its own failure handling; nothing it does can end the
/// loop. Shutdown is observed between ticks only, so an in-flight
/// invocation always runs to completion.
pub fn spawn<F, Fut>(
    shutdown: drain::Watch,
    period: Duration,
    mut task: F,
) -> tokio::task::JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let shutdown = shutdown.signaled();
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = interval.tick() => task().await,
                _ = &mut shutdown => return,
            }
        }
    })
}
