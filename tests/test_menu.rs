//! Tests for the menu presenter: header, sections, nesting, and the
//! embedded action-command encoding

use icingabar::menu::{render, Action, Verb};
use icingabar::model::{MonitoredObject, ObjectKind};
use serde_json::json;
use std::path::Path;

const PROGRAM: &str = "/usr/local/bin/icingabar";

fn host(name: &str, state: f64, ack: f64) -> MonitoredObject {
    serde_json::from_value(json!({
        "type": "Host",
        "attrs": {
            "__name": name,
            "display_name": name,
            "state": state,
            "acknowledgement": ack
        }
    }))
    .unwrap()
}

fn service(host_name: &str, name: &str, state: f64, ack: f64) -> MonitoredObject {
    serde_json::from_value(json!({
        "type": "Service",
        "attrs": {
            "__name": format!("{host_name}!{name}"),
            "display_name": name,
            "host_name": host_name,
            "state": state,
            "acknowledgement": ack
        }
    }))
    .unwrap()
}

fn render_lines(hosts: &[MonitoredObject], services: &[MonitoredObject]) -> Vec<String> {
    render(hosts, services, Path::new(PROGRAM))
}

#[test]
fn test_quiet_run_renders_only_header_totals_and_refresh() {
    let hosts = vec![host("web01", 0.0, 0.0), host("db01", 0.0, 0.0)];
    let services = vec![service("web01", "http", 0.0, 0.0)];
    let lines = render_lines(&hosts, &services);
    assert_eq!(
        lines,
        vec![
            "D: 0 C: 0 U: 0 W: 0 | color=#009933",
            "---",
            "Hosts: 2",
            "Services: 1",
            "---",
            "Refresh | refresh=true",
        ]
    );
}

#[test]
fn test_refresh_is_always_the_last_line() {
    let hosts = vec![host("web01", 1.0, 0.0)];
    let services = vec![service("web01", "http", 2.0, 1.0)];
    let lines = render_lines(&hosts, &services);
    assert_eq!(lines.last().unwrap(), "Refresh | refresh=true");
    assert_eq!(lines[lines.len() - 2], "---");
}

#[test]
fn test_header_counts_unacknowledged_problems_only() {
    let hosts = vec![host("down1", 1.0, 0.0), host("down2", 1.0, 1.0)];
    let services = vec![
        service("a", "crit", 2.0, 0.0),
        service("a", "crit-acked", 2.0, 1.0),
        service("b", "warn", 1.0, 0.0),
        service("b", "unknown", 3.0, 0.0),
    ];
    let lines = render_lines(&hosts, &services);
    assert_eq!(lines[0], "D: 1 C: 1 U: 1 W: 1 | color=#ff0000");
}

#[test]
fn test_header_color_precedence() {
    let warn = service("a", "warn", 1.0, 0.0);
    let unknown = service("a", "unknown", 3.0, 0.0);
    let crit = service("a", "crit", 2.0, 0.0);

    let lines = render_lines(&[], &[warn.clone()]);
    assert!(lines[0].ends_with("color=#ff9900"));

    let lines = render_lines(&[], &[warn.clone(), unknown.clone()]);
    assert!(lines[0].ends_with("color=#660066"));

    // Critical wins regardless of input order.
    let lines = render_lines(&[], &[warn.clone(), crit.clone(), unknown.clone()]);
    assert!(lines[0].ends_with("color=#ff0000"));
    let lines = render_lines(&[], &[crit, warn, unknown]);
    assert!(lines[0].ends_with("color=#ff0000"));

    // A down host alone is critical too.
    let lines = render_lines(&[host("web01", 1.0, 0.0)], &[]);
    assert!(lines[0].ends_with("color=#ff0000"));
}

#[test]
fn test_acknowledged_problems_do_not_color_the_header() {
    let services = vec![service("a", "crit", 2.0, 1.0)];
    let lines = render_lines(&[], &services);
    assert_eq!(lines[0], "D: 0 C: 0 U: 0 W: 0 | color=#009933");
    // The section itself still renders.
    assert!(lines.iter().any(|l| l == "Service problems"));
}

#[test]
fn test_host_problem_section_layout() {
    let hosts = vec![host("web01", 1.0, 0.0), host("db01", 1.0, 1.0)];
    let lines = render_lines(&hosts, &[]);
    let start = lines.iter().position(|l| l == "Host problems").unwrap();
    assert_eq!(
        &lines[start..start + 7],
        &[
            "Host problems".to_string(),
            "web01 | color=#ff0000".into(),
            format!("--Acknowledge | bash={PROGRAM} param2=ack param3=host param4=\"web01\" terminal=false refresh=true"),
            format!("--Check now | bash={PROGRAM} param2=recheck param3=host param4=\"web01\" terminal=false refresh=true"),
            "Acknowledged hosts down 1".into(),
            "--db01 | color=#ff0000".into(),
            format!("----Remove acknowledgement | bash={PROGRAM} param2=remove_ack param3=host param4=\"db01\" terminal=false refresh=true"),
        ]
    );
}

#[test]
fn test_acknowledged_critical_sublayout() {
    let services = vec![
        service("a", "c1", 2.0, 0.0),
        service("b", "c2", 2.0, 0.0),
        service("c", "c3", 2.0, 1.0),
    ];
    let lines = render_lines(&[], &services);

    let top_level: Vec<&String> = lines
        .iter()
        .filter(|l| !l.starts_with("--") && l.ends_with("color=#ff0000"))
        .collect();
    assert_eq!(top_level.len(), 2);
    assert_eq!(top_level[0], "c1 - a | color=#ff0000");
    assert_eq!(top_level[1], "c2 - b | color=#ff0000");

    assert!(lines.iter().any(|l| l == "Acknowledged critical services 1"));

    let nested: Vec<&String> = lines
        .iter()
        .filter(|l| l.starts_with("--") && !l.starts_with("----") && l.ends_with("color=#ff0000"))
        .collect();
    assert_eq!(nested, vec!["--c3 - c | color=#ff0000"]);
}

#[test]
fn test_service_problems_ordered_by_severity() {
    let services = vec![
        service("a", "warn", 1.0, 0.0),
        service("a", "unknown", 3.0, 0.0),
        service("a", "crit", 2.0, 0.0),
    ];
    let lines = render_lines(&[], &services);
    let pos = |needle: &str| lines.iter().position(|l| l.starts_with(needle)).unwrap();
    assert!(pos("crit - a") < pos("unknown - a"));
    assert!(pos("unknown - a") < pos("warn - a"));
}

#[test]
fn test_no_empty_sections() {
    let hosts = vec![host("web01", 0.0, 0.0)];
    let services = vec![service("web01", "http", 0.0, 0.0)];
    let lines = render_lines(&hosts, &services);
    assert!(!lines.iter().any(|l| l == "Host problems"));
    assert!(!lines.iter().any(|l| l == "Service problems"));
}

#[test]
fn test_action_suffix_encoding() {
    let action = Action {
        verb: Verb::RemoveAck,
        kind: ObjectKind::Service,
        name: "web01!http",
    };
    assert_eq!(
        action.suffix(Path::new(PROGRAM)),
        format!(
            "bash={PROGRAM} param2=remove_ack param3=service param4=\"web01!http\" terminal=false refresh=true"
        )
    );
}

#[test]
fn test_action_line_encoding() {
    let services = vec![service("web01", "http", 2.0, 0.0)];
    let lines = render_lines(&[], &services);
    let expected = format!(
        "--Acknowledge | bash={PROGRAM} param2=ack param3=service param4=\"web01!http\" terminal=false refresh=true"
    );
    assert!(lines.contains(&expected));
}
