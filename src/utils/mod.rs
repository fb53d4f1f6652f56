//! Small helpers shared by the HTTP handlers and the CLI.
pub mod data_url;
