//! End-to-end integration tests.
//!
//! Each test boots a server on an ephemeral port, seeded from a realm
//! import file, and talks to it over HTTP.

mod common;
mod installation;
