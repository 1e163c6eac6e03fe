//! Long-lived simulation state inserted into the ECS world.
//!
//! Overview
//! - `arena` – camera, ability cooldowns, dash record and spawn budget
//! - `entitypool` – fixed-capacity entity storage with generation handles
//! - `gameconfig` – gameplay tunables with INI load/save
//! - `gamestate` – high-level game state
//! - `input` – per-frame button state, movement axis and mouse position
//! - `spawnrng` – seeded random source for enemy placement
//! - `spritestore` – sprite table keyed by sprite id
//! - `worldtime` – simulation time, delta and frame count
pub mod arena;
pub mod entitypool;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod spawnrng;
pub mod spritestore;
pub mod worldtime;
