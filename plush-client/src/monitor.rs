//! Connectivity monitor task.
//!
//! Drives the [`ConnectivityStatus`] state machine from plush-core:
//! - platform network signals arrive through [`ConnectivityMonitor::notify`]
//! - a periodic timer requests reachability probes
//! - probes run as their own tasks and report back over a channel
//!
//! The current status is published on a `watch` channel. Probes may
//! overlap; whichever resolves last determines the service flag.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use plushie_core::{Action, ConnectivityStatus, Event};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::error::ClientError;
use crate::remote::ReachabilityProbe;

/// Default period between reachability probes.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for [`ConnectivityMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Period of the reachability timer.
    pub probe_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            probe_interval: DEFAULT_PROBE_INTERVAL,
        }
    }
}

impl MonitorConfig {
    /// Use a different probe period.
    pub fn with_interval(mut self, probe_interval: Duration) -> Self {
        self.probe_interval = probe_interval;
        self
    }
}

/// Network change reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkSignal {
    /// A network connection became available.
    Online,
    /// The network connection was lost.
    Offline,
}

impl From<NetworkSignal> for Event {
    fn from(signal: NetworkSignal) -> Self {
        match signal {
            NetworkSignal::Online => Event::NetworkOnline,
            NetworkSignal::Offline => Event::NetworkOffline,
        }
    }
}

/// Handle to a running connectivity monitor.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    status: watch::Receiver<ConnectivityStatus>,
    signals: mpsc::UnboundedSender<NetworkSignal>,
    task: JoinHandle<()>,
}

impl ConnectivityMonitor {
    /// Start monitoring.
    ///
    /// `network_online` seeds the network dimension; the service counts as
    /// unreachable until the first probe resolves. The first timer tick
    /// fires immediately. Must be called inside a tokio runtime.
    pub fn spawn<P>(probe: Arc<P>, config: MonitorConfig, network_online: bool) -> Self
    where
        P: ReachabilityProbe + 'static,
    {
        let initial = ConnectivityStatus::new(network_online, Utc::now());
        let (status_tx, status_rx) = watch::channel(initial);
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        tracing::info!(
            "Connectivity monitor started (interval: {:?}, network: {})",
            config.probe_interval,
            network_online
        );
        let task = tokio::spawn(run(probe, config, initial, status_tx, signal_rx));

        Self {
            status: status_rx,
            signals: signal_tx,
            task,
        }
    }

    /// Deliver a platform network signal.
    pub fn notify(&self, signal: NetworkSignal) -> Result<(), ClientError> {
        self.signals
            .send(signal)
            .map_err(|_| ClientError::MonitorStopped)
    }

    /// The most recently published status.
    pub fn status(&self) -> ConnectivityStatus {
        *self.status.borrow()
    }

    /// Subscribe to status changes.
    ///
    /// The receiver reports every status published since the monitor
    /// started as unseen, so `changed()` resolves once the first probe
    /// result or signal has been applied.
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityStatus> {
        self.status.clone()
    }

    /// Stop the timer and signal handling, waiting for the task to exit.
    pub async fn shutdown(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
        tracing::info!("Connectivity monitor stopped");
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<P>(
    probe: Arc<P>,
    config: MonitorConfig,
    mut status: ConnectivityStatus,
    publish: watch::Sender<ConnectivityStatus>,
    mut signals: mpsc::UnboundedReceiver<NetworkSignal>,
) where
    P: ReachabilityProbe + 'static,
{
    let (results_tx, mut results) = mpsc::unbounded_channel();
    let mut timer = interval(config.probe_interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let event = tokio::select! {
            _ = timer.tick() => Event::ProbeTimer,
            signal = signals.recv() => match signal {
                Some(signal) => {
                    tracing::debug!("Network signal: {:?}", signal);
                    Event::from(signal)
                }
                None => break,
            },
            Some(event) = results.recv() => event,
        };

        let (next, actions) = status.on_event(event);
        status = next;

        for action in actions {
            match action {
                Action::Publish => {
                    tracing::debug!("Connectivity: {}", status.phase());
                    publish.send_replace(status);
                }
                Action::RunProbe => spawn_probe(&probe, &results_tx),
            }
        }
    }
}

fn spawn_probe<P>(probe: &Arc<P>, results: &mpsc::UnboundedSender<Event>)
where
    P: ReachabilityProbe + 'static,
{
    let probe = Arc::clone(probe);
    let results = results.clone();

    tokio::spawn(async move {
        let event = match probe.probe().await {
            Ok(reachable) => Event::ProbeCompleted {
                reachable,
                at: Utc::now(),
            },
            Err(e) => {
                tracing::warn!("Reachability probe failed: {}", e);
                Event::ProbeFailed {
                    error: e.to_string(),
                    at: Utc::now(),
                }
            }
        };
        // Monitor may have stopped while the probe was in flight.
        let _ = results.send(event);
    });
}
