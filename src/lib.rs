//! Research Wizard simulation core.
//!
//! This module exposes the game's components, resources, systems, and events
//! for use by the headless driver, integration tests and any windowed host.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
