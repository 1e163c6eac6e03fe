//! Per-frame simulation systems.
//!
//! Submodules overview
//! - [`camera`] – ease the camera towards the player
//! - [`cooldown`] – run ability cooldowns down
//! - [`effects`] – knockback motion, highlight decay and hit bookkeeping
//! - [`enemy`] – slug seek and contact damage
//! - [`gamestate`] – escape handling and the playing run condition
//! - [`input`] – fold an [`InputFrame`](crate::resources::input::InputFrame) into input state
//! - [`messages`] – advance the combat message buffer
//! - [`player`] – free-move/dash state machine and primary fire
//! - [`projectile`] – projectile flight, impact and expiry
//! - [`render`] – build draw lists for the window layer
//! - [`spawner`] – enemy spawning and the pool exhaustion policy
//! - [`time`] – update simulation time and delta

pub mod camera;
pub mod cooldown;
pub mod effects;
pub mod enemy;
pub mod gamestate;
pub mod input;
pub mod messages;
pub mod player;
pub mod projectile;
pub mod render;
pub mod spawner;
pub mod time;
