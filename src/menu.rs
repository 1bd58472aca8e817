// Presenter: turns fetched objects into the status-bar host's menu
// protocol. Every line becomes a menu entry; a `--` prefix nests an
// entry one level deeper and a trailing `| key=value ...` suffix
// attaches metadata (text color, clickable command, refresh).

use crate::model::{
    filter_by_ack, filter_by_state, Color, HostState, MonitoredObject, ObjectKind, ServiceState,
};
use std::path::Path;

/// Action verbs the menu can embed, spelled exactly as the dispatcher
/// expects them back on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Ack,
    RemoveAck,
    Recheck,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Ack => "ack",
            Verb::RemoveAck => "remove_ack",
            Verb::Recheck => "recheck",
        }
    }
}

/// A clickable command: the host application re-invokes `program` with
/// `<verb> <kind> <name>`. The textual encoding lives in [`Action::suffix`]
/// and nowhere else.
#[derive(Debug, Clone)]
pub struct Action<'a> {
    pub verb: Verb,
    pub kind: ObjectKind,
    pub name: &'a str,
}

impl Action<'_> {
    /// The `bash=...` metadata suffix for one menu line.
    pub fn suffix(&self, program: &Path) -> String {
        format!(
            "bash={} param2={} param3={} param4=\"{}\" terminal=false refresh=true",
            program.display(),
            self.verb.as_str(),
            self.kind.as_str(),
            self.name
        )
    }
}

fn action_line(depth: usize, label: &str, action: &Action, program: &Path) -> String {
    format!("{}{} | {}", "--".repeat(depth), label, action.suffix(program))
}

/// Entry title: hosts show their display name, services append the
/// owning host.
fn title(item: &MonitoredObject) -> String {
    match item {
        MonitoredObject::Host { attrs } => attrs.display_name.clone(),
        MonitoredObject::Service { attrs } => {
            format!("{} - {}", attrs.display_name, attrs.host_name)
        }
    }
}

/// Top-level entry for an unacknowledged problem, with Acknowledge and
/// Check now submenu actions.
fn push_open(lines: &mut Vec<String>, item: &MonitoredObject, program: &Path) {
    let name = item.object_name();
    let kind = item.kind();
    lines.push(format!("{} | color={}", title(item), item.color()));
    lines.push(action_line(
        1,
        "Acknowledge",
        &Action { verb: Verb::Ack, kind, name },
        program,
    ));
    lines.push(action_line(
        1,
        "Check now",
        &Action { verb: Verb::Recheck, kind, name },
        program,
    ));
}

/// Nested entry for an acknowledged problem, with Remove acknowledgement
/// and Check now actions one level deeper.
fn push_acked(lines: &mut Vec<String>, item: &MonitoredObject, program: &Path) {
    let name = item.object_name();
    let kind = item.kind();
    lines.push(format!("--{} | color={}", title(item), item.color()));
    lines.push(action_line(
        2,
        "Remove acknowledgement",
        &Action { verb: Verb::RemoveAck, kind, name },
        program,
    ));
    lines.push(action_line(
        2,
        "Check now",
        &Action { verb: Verb::Recheck, kind, name },
        program,
    ));
}

/// One severity group inside the service-problems section: open entries
/// first, then a count line and the acknowledged entries.
fn push_service_group(
    lines: &mut Vec<String>,
    label: &str,
    open: &[MonitoredObject],
    acked: &[MonitoredObject],
    program: &Path,
) {
    if open.is_empty() && acked.is_empty() {
        return;
    }
    for service in open {
        push_open(lines, service, program);
    }
    if !acked.is_empty() {
        lines.push(format!("Acknowledged {} services {}", label, acked.len()));
        for service in acked {
            push_acked(lines, service, program);
        }
    }
}

/// Render the whole menu as ordered protocol lines. `program` is the
/// path the host application re-invokes when an action entry is clicked.
pub fn render(
    hosts: &[MonitoredObject],
    services: &[MonitoredObject],
    program: &Path,
) -> Vec<String> {
    let down = filter_by_state(hosts, HostState::Down);
    let down_open = filter_by_ack(&down, false);
    let down_acked = filter_by_ack(&down, true);

    let critical = filter_by_state(services, ServiceState::Critical);
    let critical_open = filter_by_ack(&critical, false);
    let critical_acked = filter_by_ack(&critical, true);

    let unknown = filter_by_state(services, ServiceState::Unknown);
    let unknown_open = filter_by_ack(&unknown, false);
    let unknown_acked = filter_by_ack(&unknown, true);

    let warning = filter_by_state(services, ServiceState::Warning);
    let warning_open = filter_by_ack(&warning, false);
    let warning_acked = filter_by_ack(&warning, true);

    // Header color reflects the worst unacknowledged condition, with a
    // down host counting as critical.
    let mut main_color = Color::Ok;
    if !warning_open.is_empty() {
        main_color = Color::Warning;
    }
    if !unknown_open.is_empty() {
        main_color = Color::Unknown;
    }
    if !critical_open.is_empty() || !down_open.is_empty() {
        main_color = Color::Critical;
    }

    let mut lines = Vec::new();
    lines.push(format!(
        "D: {} C: {} U: {} W: {} | color={}",
        down_open.len(),
        critical_open.len(),
        unknown_open.len(),
        warning_open.len(),
        main_color
    ));
    lines.push("---".into());
    lines.push(format!("Hosts: {}", hosts.len()));
    lines.push(format!("Services: {}", services.len()));

    if !down_open.is_empty() || !down_acked.is_empty() {
        lines.push("---".into());
        lines.push("Host problems".into());
        for host in &down_open {
            push_open(&mut lines, host, program);
        }
        if !down_acked.is_empty() {
            lines.push(format!("Acknowledged hosts down {}", down_acked.len()));
            for host in &down_acked {
                push_acked(&mut lines, host, program);
            }
        }
    }

    if !critical.is_empty() || !unknown.is_empty() || !warning.is_empty() {
        lines.push("---".into());
        lines.push("Service problems".into());
    }
    push_service_group(&mut lines, "critical", &critical_open, &critical_acked, program);
    push_service_group(&mut lines, "unknown", &unknown_open, &unknown_acked, program);
    push_service_group(&mut lines, "warning", &warning_open, &warning_acked, program);

    lines.push("---".into());
    lines.push("Refresh | refresh=true".into());
    lines
}
