//! mdpad — headless core of a markdown authoring workspace.
//!
//! Module map:
//! - kernel: state/action/effect core (workspace store, session, tree
//!   materializer, link resolver, preview sequencing, export/backup)
//! - kernel::services: ports + adapters for the storage medium and the
//!   external render engines
//! - logging: tracing initialization
//!
//! The shell (browser or test harness) owns a `kernel::Store`, feeds it
//! `Action`s, executes the returned `Effect`s against the ports, and
//! dispatches the completions back in.

pub mod kernel;
pub mod logging;
