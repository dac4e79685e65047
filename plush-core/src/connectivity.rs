//! Connectivity state machine.
//!
//! Tracks two dimensions, network reachability and remote-service
//! reachability, as one [`ConnectivityStatus`]. Like the rest of this crate
//! it performs no I/O: events go in, a new status and a list of actions come
//! out, and the client's monitor task runs the probe and publishes the
//! status.
//!
//! ```text
//!                 Offline signal
//!   ┌──────────────────────────────────────────┐
//!   ▼                                          │
//! Offline ──Online signal──► Online+ServiceDown ◄──probe false/err──┐
//!                                   │                               │
//!                                   └──probe true──► Online+ServiceUp
//! ```

use chrono::{DateTime, Utc};
use std::fmt;

/// Combined reachability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityStatus {
    /// The platform reports a network connection.
    pub network_online: bool,
    /// The last probe reached the remote service.
    pub service_reachable: bool,
    /// When the service dimension was last refreshed.
    pub last_checked: DateTime<Utc>,
}

/// The three meaningful combinations of a [`ConnectivityStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No network; the service dimension is irrelevant.
    Offline,
    /// Network up, remote service not responding.
    ServiceDown,
    /// Network up and remote service responding.
    Online,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Offline => f.write_str("offline"),
            Phase::ServiceDown => f.write_str("online (service unreachable)"),
            Phase::Online => f.write_str("online"),
        }
    }
}

impl ConnectivityStatus {
    /// Initial status, seeded from the platform network flag.
    ///
    /// The service is assumed unreachable until the first probe completes.
    pub fn new(network_online: bool, now: DateTime<Utc>) -> Self {
        Self {
            network_online,
            service_reachable: false,
            last_checked: now,
        }
    }

    /// Which of the three phases this status is in.
    pub fn phase(&self) -> Phase {
        match (self.network_online, self.service_reachable) {
            (false, _) => Phase::Offline,
            (true, false) => Phase::ServiceDown,
            (true, true) => Phase::Online,
        }
    }

    /// Whether queued posts may be forwarded right now.
    pub fn can_sync(&self) -> bool {
        self.phase() == Phase::Online
    }

    /// Process an event and return the new status plus actions to execute.
    ///
    /// This is a pure function. The caller runs [`Action::RunProbe`] and
    /// feeds the outcome back as [`Event::ProbeCompleted`] or
    /// [`Event::ProbeFailed`].
    pub fn on_event(self, event: Event) -> (Self, Vec<Action>) {
        match event {
            Event::NetworkOffline => (
                Self {
                    network_online: false,
                    service_reachable: false,
                    ..self
                },
                vec![Action::Publish],
            ),
            Event::NetworkOnline => (
                Self {
                    network_online: true,
                    ..self
                },
                vec![Action::Publish, Action::RunProbe],
            ),
            Event::ProbeTimer if self.network_online => (self, vec![Action::RunProbe]),
            Event::ProbeTimer => (self, vec![]),
            Event::ProbeCompleted { reachable, at } => (
                Self {
                    service_reachable: self.network_online && reachable,
                    last_checked: at,
                    ..self
                },
                vec![Action::Publish],
            ),
            Event::ProbeFailed { at, .. } => (
                Self {
                    service_reachable: false,
                    last_checked: at,
                    ..self
                },
                vec![Action::Publish],
            ),
        }
    }
}

/// Inputs to the connectivity state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The platform reported the network going away.
    NetworkOffline,
    /// The platform reported the network coming back.
    NetworkOnline,
    /// The periodic probe timer fired.
    ProbeTimer,
    /// A reachability probe returned.
    ProbeCompleted {
        /// Whether the service answered.
        reachable: bool,
        /// When the probe resolved.
        at: DateTime<Utc>,
    },
    /// A reachability probe failed outright.
    ProbeFailed {
        /// Error message describing the failure.
        error: String,
        /// When the probe resolved.
        at: DateTime<Utc>,
    },
}

/// Actions to be executed by the monitor task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a reachability probe.
    RunProbe,
    /// Publish the new status to subscribers.
    Publish,
}
