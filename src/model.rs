// Data model: the monitored objects the plugin works with, their state
// enumerations, severity colors, and the two classifier filters. Records
// come straight off the API's `results` array and are never mutated
// locally; any state change happens server-side and is observed on the
// next fetch.

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// Host check states as reported by Icinga2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Up = 0,
    Down = 1,
}

/// Service check states as reported by Icinga2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl From<HostState> for u8 {
    fn from(state: HostState) -> u8 {
        state as u8
    }
}

impl From<ServiceState> for u8 {
    fn from(state: ServiceState) -> u8 {
        state as u8
    }
}

impl HostState {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(HostState::Up),
            1 => Some(HostState::Down),
            _ => None,
        }
    }
}

impl ServiceState {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ServiceState::Ok),
            1 => Some(ServiceState::Warning),
            2 => Some(ServiceState::Critical),
            3 => Some(ServiceState::Unknown),
            _ => None,
        }
    }
}

/// Menu text colors, one per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Ok,
    Warning,
    Unknown,
    Critical,
}

impl Color {
    pub fn hex(self) -> &'static str {
        match self {
            Color::Ok => "#009933",
            Color::Warning => "#ff9900",
            Color::Unknown => "#660066",
            Color::Critical => "#ff0000",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// The `host`/`service` token. Used as the query-parameter key in action
/// calls and as the CLI argument the menu passes back on re-invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ObjectKind {
    Host,
    Service,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Host => "host",
            ObjectKind::Service => "service",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monitored entity and its most recent check state, tagged by the
/// API's `type` field. Fields beyond `attrs` (`joins`, `meta`, ...) are
/// ignored. A record missing a required attribute fails deserialization,
/// which aborts the whole fetch through the fatal-error path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum MonitoredObject {
    Host { attrs: HostAttrs },
    Service { attrs: ServiceAttrs },
}

/// Host attributes. Icinga2 sends state fields as JSON numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostAttrs {
    /// Opaque unique name, the identifier the API expects in action calls.
    #[serde(rename = "__name")]
    pub name: String,
    pub display_name: String,
    pub state: f64,
    pub acknowledgement: f64,
}

/// Service attributes. Same as hosts plus the owning host's name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceAttrs {
    #[serde(rename = "__name")]
    pub name: String,
    pub display_name: String,
    pub host_name: String,
    pub state: f64,
    pub acknowledgement: f64,
}

impl MonitoredObject {
    /// The opaque `__name` identifier used to address this object in
    /// action calls.
    pub fn object_name(&self) -> &str {
        match self {
            MonitoredObject::Host { attrs } => &attrs.name,
            MonitoredObject::Service { attrs } => &attrs.name,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            MonitoredObject::Host { attrs } => &attrs.display_name,
            MonitoredObject::Service { attrs } => &attrs.display_name,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            MonitoredObject::Host { .. } => ObjectKind::Host,
            MonitoredObject::Service { .. } => ObjectKind::Service,
        }
    }

    pub fn state_code(&self) -> u8 {
        match self {
            MonitoredObject::Host { attrs } => attrs.state as u8,
            MonitoredObject::Service { attrs } => attrs.state as u8,
        }
    }

    /// Whether an operator has acknowledged the problem. Icinga2 uses 2
    /// for sticky acknowledgements, so anything non-zero counts.
    pub fn is_acknowledged(&self) -> bool {
        let ack = match self {
            MonitoredObject::Host { attrs } => attrs.acknowledgement,
            MonitoredObject::Service { attrs } => attrs.acknowledgement,
        };
        ack != 0.0
    }

    /// Severity color for this object's current state. Host Down maps to
    /// the critical color; unrecognized states fall back to Ok.
    pub fn color(&self) -> Color {
        match self {
            MonitoredObject::Service { attrs } => {
                match ServiceState::from_code(attrs.state as u8) {
                    Some(ServiceState::Critical) => Color::Critical,
                    Some(ServiceState::Unknown) => Color::Unknown,
                    Some(ServiceState::Warning) => Color::Warning,
                    _ => Color::Ok,
                }
            }
            MonitoredObject::Host { attrs } => match HostState::from_code(attrs.state as u8) {
                Some(HostState::Down) => Color::Critical,
                _ => Color::Ok,
            },
        }
    }
}

/// Keep objects whose state code matches exactly. Pure and order
/// preserving; composes with [`filter_by_ack`] in either order.
pub fn filter_by_state(objects: &[MonitoredObject], state: impl Into<u8>) -> Vec<MonitoredObject> {
    let code = state.into();
    objects
        .iter()
        .filter(|o| o.state_code() == code)
        .cloned()
        .collect()
}

/// Keep objects whose acknowledgement flag matches `acked`.
pub fn filter_by_ack(objects: &[MonitoredObject], acked: bool) -> Vec<MonitoredObject> {
    objects
        .iter()
        .filter(|o| o.is_acknowledged() == acked)
        .cloned()
        .collect()
}
