//! Plain data shared by the simulation.
//!
//! Submodules overview:
//! - [`easing`] – closed set of quartic easing curves for projectile flight
//! - [`entity`] – the tagged-variant entity record and per-archetype setup
//! - [`health`] – hit points with a per-entity damage cooldown gate
//! - [`knockback`] – forced displacement after a hit
//! - [`range`] – axis-aligned boxes and the strict overlap test
//! - [`sprite`] – sprite ids, sheet layouts and frame UV selection
//! - [`team`] – teams and collision layer masks

pub mod easing;
pub mod entity;
pub mod health;
pub mod knockback;
pub mod range;
pub mod sprite;
pub mod team;
