//! Message types exchanged between systems and the host.
//!
//! Submodules:
//! - [`combat`] – damage, kills, spawns and dash notifications
pub mod combat;
