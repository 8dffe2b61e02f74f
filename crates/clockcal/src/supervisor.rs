//! Logic task: owns the shutdown signal, watches both queues and consumes
//! view→logic messages.
//!
//! The view runs on the thread that calls [`Supervisor::run`] (the window
//! system needs the main thread); everything else runs on a tokio runtime.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::bus::{self, Occupancy, QueueError, QueueName, QueueReceiver, QueueSender};
use crate::config::AppConfig;
use crate::message::{ClockReading, ToLogic, ToView};
use crate::shutdown::{Shutdown, ShutdownReason};

/// The view's ends of both queues.
#[derive(Debug)]
pub struct ViewPort {
    pub inbox: QueueReceiver<ToView>,
    pub outbox: QueueSender<ToLogic>,
}

/// Body of the view task. Runs on the calling thread until it returns.
pub trait View {
    fn run(self, shutdown: Shutdown) -> Result<()>;
}

impl<F> View for F
where
    F: FnOnce(Shutdown) -> Result<()>,
{
    fn run(self, shutdown: Shutdown) -> Result<()> {
        self(shutdown)
    }
}

pub struct Supervisor {
    shutdown: Shutdown,
    health_interval: Duration,
    /// Producer end of l2v.
    to_view: QueueSender<ToView>,
    /// Consumer end of v2l.
    from_view: QueueReceiver<ToLogic>,
    /// Producer-side handle on v2l used only to read its occupancy.
    v2l_gauge: QueueSender<ToLogic>,
}

impl Supervisor {
    /// Creates both queues and the shutdown signal.
    pub fn new(config: &AppConfig) -> (Self, ViewPort) {
        let (to_view, inbox) = bus::bounded(QueueName::LogicToView, config.queue_capacity);
        let (outbox, from_view) = bus::bounded(QueueName::ViewToLogic, config.queue_capacity);

        let supervisor = Self {
            shutdown: Shutdown::new(),
            health_interval: config.health_interval,
            to_view,
            from_view,
            v2l_gauge: outbox.clone(),
        };
        (supervisor, ViewPort { inbox, outbox })
    }

    pub fn shutdown(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Runs supervision on a multi-threaded runtime and `view` on the calling
    /// thread. Returns the reason the process is shutting down.
    ///
    /// The view returning, with or without an error, is itself a shutdown
    /// trigger.
    pub fn run<V: View>(self, view: V) -> Result<ShutdownReason> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("clockcal-logic")
            .enable_all()
            .build()
            .context("failed to build tokio runtime")?;

        let shutdown = self.shutdown();
        let supervision = runtime.spawn(self.supervise());

        let clean = match view.run(shutdown.clone()) {
            Ok(()) => true,
            Err(e) => {
                log::error!("view failed: {e:#}");
                false
            }
        };
        shutdown.trigger(ShutdownReason::ViewExited { clean });

        let reason = runtime
            .block_on(supervision)
            .context("supervisor task panicked")?;
        runtime.shutdown_timeout(Duration::from_secs(1));
        Ok(reason)
    }

    /// Spawns the consumer loop and the interrupt watch, then runs the health
    /// loop until the shutdown signal fires.
    pub async fn supervise(self) -> ShutdownReason {
        let Supervisor {
            shutdown,
            health_interval,
            to_view,
            from_view,
            v2l_gauge,
        } = self;

        let consumer = tokio::spawn(consume(from_view, shutdown.clone()));
        let interrupt = tokio::spawn(watch_interrupt(shutdown.clone()));

        let reason = health_loop(&shutdown, health_interval, &to_view, &v2l_gauge).await;

        interrupt.abort();
        if let Err(e) = consumer.await {
            log::warn!("consumer task ended abnormally: {e}");
        }
        reason
    }
}

/// First saturated queue, checking v2l before l2v.
fn saturated_queue(v2l: Occupancy, l2v: Occupancy) -> Option<QueueName> {
    if v2l.is_saturated() {
        Some(QueueName::ViewToLogic)
    } else if l2v.is_saturated() {
        Some(QueueName::LogicToView)
    } else {
        None
    }
}

async fn health_loop(
    shutdown: &Shutdown,
    period: Duration,
    to_view: &QueueSender<ToView>,
    from_view: &QueueSender<ToLogic>,
) -> ShutdownReason {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            reason = shutdown.triggered() => return reason,
            _ = ticker.tick() => {}
        }

        if let Some(queue) = saturated_queue(from_view.occupancy(), to_view.occupancy()) {
            log::warn!("queue {queue} saturated");
            shutdown.trigger(ShutdownReason::QueueSaturated { queue });
            continue;
        }

        match to_view.try_send(ToView::Tick(ClockReading::now())) {
            Ok(()) => {}
            Err(QueueError::Full(_)) => {
                log::warn!("queue {} saturated", to_view.name());
                shutdown.trigger(ShutdownReason::QueueSaturated { queue: to_view.name() });
            }
            // The view is gone; its exit is reported by `Supervisor::run`.
            Err(QueueError::Closed(_)) => log::debug!("view inbox closed"),
        }
    }
}

async fn consume(mut inbox: QueueReceiver<ToLogic>, shutdown: Shutdown) {
    loop {
        let msg = tokio::select! {
            biased;
            _ = shutdown.triggered() => return,
            msg = inbox.recv() => msg,
        };

        match msg {
            Some(ToLogic::CameraZoom { distance }) => {
                log::debug!("camera distance {distance:.1}");
            }
            Some(ToLogic::Unrecognized { tag }) => {
                log::warn!("unknown message {tag:?} on {}", inbox.name());
                shutdown.trigger(ShutdownReason::UnknownMessage);
                return;
            }
            None => return,
        }
    }
}

async fn watch_interrupt(shutdown: Shutdown) {
    tokio::select! {
        _ = shutdown.triggered() => {}
        res = tokio::signal::ctrl_c() => match res {
            Ok(()) => {
                shutdown.trigger(ShutdownReason::Interrupted);
            }
            Err(e) => log::warn!("cannot listen for Ctrl-C: {e}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant as StdInstant;

    use super::*;

    fn config(capacity: usize, health_interval: Duration) -> AppConfig {
        AppConfig {
            queue_capacity: capacity,
            health_interval,
            ..AppConfig::default()
        }
    }

    #[test]
    fn v2l_is_checked_first() {
        let full = Occupancy { len: 10, capacity: 10 };
        let free = Occupancy { len: 3, capacity: 10 };
        assert_eq!(saturated_queue(full, full), Some(QueueName::ViewToLogic));
        assert_eq!(saturated_queue(free, full), Some(QueueName::LogicToView));
        assert_eq!(saturated_queue(free, free), None);
    }

    #[tokio::test(start_paused = true)]
    async fn prefilled_queue_saturates_on_the_first_tick() {
        let (sup, _port) = Supervisor::new(&config(10, Duration::from_secs(1)));
        for _ in 0..10 {
            sup.to_view
                .try_send(ToView::Unrecognized { tag: "filler".into() })
                .expect("space");
        }
        let shutdown = sup.shutdown();

        let start = Instant::now();
        let reason = sup.supervise().await;

        assert_eq!(reason, ShutdownReason::QueueSaturated { queue: QueueName::LogicToView });
        assert_eq!(start.elapsed(), Duration::from_secs(1));

        // Later triggers change nothing.
        assert!(!shutdown.trigger(ShutdownReason::QueueSaturated { queue: QueueName::ViewToLogic }));
        assert_eq!(
            shutdown.reason(),
            Some(ShutdownReason::QueueSaturated { queue: QueueName::LogicToView })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn undrained_ticks_fill_the_view_inbox() {
        let (sup, mut port) = Supervisor::new(&config(10, Duration::from_secs(1)));

        let start = Instant::now();
        let reason = sup.supervise().await;

        // Ten ticks are queued, the eleventh check finds l2v at capacity.
        assert_eq!(reason, ShutdownReason::QueueSaturated { queue: QueueName::LogicToView });
        assert_eq!(start.elapsed(), Duration::from_secs(11));

        let ticks = std::iter::from_fn(|| port.inbox.try_recv())
            .filter(|m| matches!(m, ToView::Tick(_)))
            .count();
        assert_eq!(ticks, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn unrecognized_message_stops_before_the_first_tick() {
        let (sup, port) = Supervisor::new(&config(10, Duration::from_secs(60)));
        port.outbox
            .try_send(ToLogic::CameraZoom { distance: 150.0 })
            .expect("space");
        port.outbox
            .try_send(ToLogic::Unrecognized { tag: "bogus".into() })
            .expect("space");

        let start = Instant::now();
        let reason = sup.supervise().await;

        assert_eq!(reason, ShutdownReason::UnknownMessage);
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn zoom_messages_below_capacity_are_all_consumed() {
        let (outbox, inbox) = bus::bounded(QueueName::ViewToLogic, 10);
        for step in 1..=7 {
            outbox
                .try_send(ToLogic::CameraZoom { distance: 100.0 * step as f32 })
                .expect("space");
        }
        let shutdown = Shutdown::new();
        let consumer = tokio::spawn(consume(inbox, shutdown.clone()));

        time::sleep(Duration::from_millis(10)).await;

        assert_eq!(outbox.occupancy(), Occupancy { len: 0, capacity: 10 });
        assert!(!shutdown.is_triggered());
        assert!(!consumer.is_finished());

        shutdown.trigger(ShutdownReason::Requested);
        consumer.await.expect("join");
    }

    #[tokio::test(start_paused = true)]
    async fn external_trigger_ends_supervision() {
        let (sup, _port) = Supervisor::new(&config(10, Duration::from_secs(1)));
        let shutdown = sup.shutdown();
        let task = tokio::spawn(sup.supervise());

        time::sleep(Duration::from_millis(2500)).await;
        assert!(shutdown.trigger(ShutdownReason::Requested));
        assert_eq!(task.await.expect("join"), ShutdownReason::Requested);
    }

    #[test]
    fn failing_view_shuts_down_without_waiting_for_a_tick() {
        let (sup, _port) = Supervisor::new(&config(10, Duration::from_secs(60)));

        let start = StdInstant::now();
        let reason = sup
            .run(|_shutdown: Shutdown| -> Result<()> { anyhow::bail!("no GPU adapter") })
            .expect("runtime");

        assert_eq!(reason, ShutdownReason::ViewExited { clean: false });
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn view_observes_a_logic_side_shutdown() {
        let (sup, port) = Supervisor::new(&config(10, Duration::from_secs(60)));

        let reason = sup
            .run(move |shutdown: Shutdown| -> Result<()> {
                port.outbox
                    .try_send(ToLogic::Unrecognized { tag: "drift".into() })
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                while !shutdown.is_triggered() {
                    std::thread::sleep(Duration::from_millis(1));
                }
                Ok(())
            })
            .expect("runtime");

        assert_eq!(reason, ShutdownReason::UnknownMessage);
    }
}
