// Library root
// -----------
// This crate exposes a small library surface for the status-bar plugin.
// The binary (`main.rs`) uses these modules to implement the report and
// action flows.
//
// Module responsibilities:
// - `api`: Encapsulates HTTP interactions with the Icinga2 REST API
//   (object queries, acknowledge, remove-acknowledgement, recheck) and
//   the client configuration.
// - `model`: Monitored-object records as they come off the wire, state
//   enumerations, severity colors, and the classifier filters.
// - `menu`: Renders classified objects into the status-bar host's
//   line-based menu protocol, including the embedded action commands.
//
// Keeping this separation makes the classifier and the menu encoding
// testable without a server on the other end.
pub mod api;
pub mod menu;
pub mod model;
