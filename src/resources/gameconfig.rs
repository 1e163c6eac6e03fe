//! Game configuration resource.
//!
//! Holds every gameplay tunable with safe defaults and can load overrides
//! from (and save them to) an INI file. Missing keys keep their current
//! value; unparsable values are ignored.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! camera_zoom = 6.0
//! pool_exhaustion = skip
//!
//! [player]
//! speed = 900
//! drag = 8.3
//!
//! [dash]
//! distance = 80
//! flight_duration = 0.2
//!
//! [spawner]
//! max_enemies = 10
//! interval = 2.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::easing::Easing;

const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {message}")]
    Load { path: PathBuf, message: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("failed to save config file {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What to do when a spawn finds every entity slot taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolExhaustion {
    /// Drop the spawn request, log a warning and keep running.
    #[default]
    Skip,
    /// Log an error and panic.
    Abort,
}

impl PoolExhaustion {
    pub fn name(self) -> &'static str {
        match self {
            PoolExhaustion::Skip => "skip",
            PoolExhaustion::Abort => "abort",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "skip" => Some(PoolExhaustion::Skip),
            "abort" => Some(PoolExhaustion::Abort),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSettings {
    pub camera_zoom: f32,
    pub camera_follow_rate: f32,
    pub max_delta: f32,
    pub pool_exhaustion: PoolExhaustion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSettings {
    pub speed: f32,
    pub drag: f32,
    pub max_health: f32,
    pub damage_cooldown: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireSettings {
    pub cooldown: f32,
    pub projectile_speed: f32,
    pub projectile_knockback: f32,
    pub projectile_damage: f32,
    pub flight_lifetime: f32,
    pub easing: Easing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashSettings {
    pub cooldown: f32,
    pub distance: f32,
    pub flight_duration: f32,
    pub highlight1_start: f32,
    pub highlight2_start: f32,
    pub highlight_duration: f32,
}

impl DashSettings {
    /// Total dash length: flight plus the recovery tail.
    pub fn duration(&self) -> f32 {
        self.highlight2_start + self.highlight_duration
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlugSettings {
    pub max_health: f32,
    pub damage_cooldown: f32,
    pub speed: f32,
    pub detection_distance: f32,
    pub contact_damage: f32,
    pub contact_knockback: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectSettings {
    pub knockback_duration: f32,
    pub hit_highlight: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpawnerSettings {
    pub max_enemies: u32,
    pub interval: f32,
    pub half_extent: f32,
    pub min_distance: f32,
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct GameConfig {
    pub world: WorldSettings,
    pub player: PlayerSettings,
    pub fire: FireSettings,
    pub dash: DashSettings,
    pub slug: SlugSettings,
    pub effects: EffectSettings,
    pub spawner: SpawnerSettings,
    /// Path to the configuration file.
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Overwrite `$target` with the float at `[$section] $key` when present and valid.
macro_rules! read_f32 {
    ($ini:expr, $section:literal, $key:literal, $target:expr) => {
        if let Some(value) = $ini.getfloat($section, $key).ok().flatten() {
            $target = value as f32;
        }
    };
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            world: WorldSettings {
                camera_zoom: 6.0,
                camera_follow_rate: 15.0,
                max_delta: 1.0,
                pool_exhaustion: PoolExhaustion::Skip,
            },
            player: PlayerSettings {
                speed: 900.0,
                drag: 8.3,
                max_health: 100.0,
                damage_cooldown: 0.5,
            },
            fire: FireSettings {
                cooldown: 0.3,
                projectile_speed: 300.0,
                projectile_knockback: 120.0,
                projectile_damage: 10.0,
                flight_lifetime: 0.5,
                easing: Easing::EaseOutQuartReverse,
            },
            dash: DashSettings {
                cooldown: 0.35,
                distance: 80.0,
                flight_duration: 0.2,
                highlight1_start: 0.0,
                highlight2_start: 0.17,
                highlight_duration: 0.05,
            },
            slug: SlugSettings {
                max_health: 20.0,
                damage_cooldown: 0.0,
                speed: 15.0,
                detection_distance: 500.0,
                contact_damage: 5.0,
                contact_knockback: 60.0,
            },
            effects: EffectSettings {
                knockback_duration: 0.15,
                hit_highlight: 0.1,
            },
            spawner: SpawnerSettings {
                max_enemies: 10,
                interval: 2.0,
                half_extent: 50.0,
                min_distance: 10.0,
            },
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|message| ConfigError::Load {
            path: self.config_path.clone(),
            message,
        })?;
        self.apply_ini(&ini);
        info!(
            "Loaded config from {:?}: max_enemies={}, spawn_interval={}, pool_exhaustion={}",
            self.config_path,
            self.spawner.max_enemies,
            self.spawner.interval,
            self.world.pool_exhaustion.name()
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(ConfigError::Parse)?;
        self.apply_ini(&ini);
        Ok(())
    }

    fn apply_ini(&mut self, ini: &Ini) {
        // [world]
        read_f32!(ini, "world", "camera_zoom", self.world.camera_zoom);
        read_f32!(ini, "world", "camera_follow_rate", self.world.camera_follow_rate);
        read_f32!(ini, "world", "max_delta", self.world.max_delta);
        if let Some(name) = ini.get("world", "pool_exhaustion") {
            match PoolExhaustion::from_name(&name) {
                Some(policy) => self.world.pool_exhaustion = policy,
                None => warn!(
                    "Unknown pool_exhaustion '{}', keeping '{}'",
                    name,
                    self.world.pool_exhaustion.name()
                ),
            }
        }

        // [player]
        read_f32!(ini, "player", "speed", self.player.speed);
        read_f32!(ini, "player", "drag", self.player.drag);
        read_f32!(ini, "player", "max_health", self.player.max_health);
        read_f32!(ini, "player", "damage_cooldown", self.player.damage_cooldown);

        // [fire]
        read_f32!(ini, "fire", "cooldown", self.fire.cooldown);
        read_f32!(ini, "fire", "projectile_speed", self.fire.projectile_speed);
        read_f32!(ini, "fire", "projectile_knockback", self.fire.projectile_knockback);
        read_f32!(ini, "fire", "projectile_damage", self.fire.projectile_damage);
        read_f32!(ini, "fire", "flight_lifetime", self.fire.flight_lifetime);
        if let Some(name) = ini.get("fire", "easing") {
            match Easing::from_name(&name) {
                Some(easing) => self.fire.easing = easing,
                None => warn!("Unknown easing '{}', keeping '{}'", name, self.fire.easing.name()),
            }
        }

        // [dash]
        read_f32!(ini, "dash", "cooldown", self.dash.cooldown);
        read_f32!(ini, "dash", "distance", self.dash.distance);
        read_f32!(ini, "dash", "flight_duration", self.dash.flight_duration);
        read_f32!(ini, "dash", "highlight1_start", self.dash.highlight1_start);
        read_f32!(ini, "dash", "highlight2_start", self.dash.highlight2_start);
        read_f32!(ini, "dash", "highlight_duration", self.dash.highlight_duration);

        // [slug]
        read_f32!(ini, "slug", "max_health", self.slug.max_health);
        read_f32!(ini, "slug", "damage_cooldown", self.slug.damage_cooldown);
        read_f32!(ini, "slug", "speed", self.slug.speed);
        read_f32!(ini, "slug", "detection_distance", self.slug.detection_distance);
        read_f32!(ini, "slug", "contact_damage", self.slug.contact_damage);
        read_f32!(ini, "slug", "contact_knockback", self.slug.contact_knockback);

        // [effects]
        read_f32!(ini, "effects", "knockback_duration", self.effects.knockback_duration);
        read_f32!(ini, "effects", "hit_highlight", self.effects.hit_highlight);

        // [spawner]
        if let Some(max) = ini.getuint("spawner", "max_enemies").ok().flatten() {
            self.spawner.max_enemies = max as u32;
        }
        read_f32!(ini, "spawner", "interval", self.spawner.interval);
        read_f32!(ini, "spawner", "half_extent", self.spawner.half_extent);
        read_f32!(ini, "spawner", "min_distance", self.spawner.min_distance);
    }

    /// Save configuration to the INI file at `config_path`.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            ini.set(section, key, Some(value));
        };

        set("world", "camera_zoom", self.world.camera_zoom.to_string());
        set("world", "camera_follow_rate", self.world.camera_follow_rate.to_string());
        set("world", "max_delta", self.world.max_delta.to_string());
        set("world", "pool_exhaustion", self.world.pool_exhaustion.name().to_string());

        set("player", "speed", self.player.speed.to_string());
        set("player", "drag", self.player.drag.to_string());
        set("player", "max_health", self.player.max_health.to_string());
        set("player", "damage_cooldown", self.player.damage_cooldown.to_string());

        set("fire", "cooldown", self.fire.cooldown.to_string());
        set("fire", "projectile_speed", self.fire.projectile_speed.to_string());
        set("fire", "projectile_knockback", self.fire.projectile_knockback.to_string());
        set("fire", "projectile_damage", self.fire.projectile_damage.to_string());
        set("fire", "flight_lifetime", self.fire.flight_lifetime.to_string());
        set("fire", "easing", self.fire.easing.name().to_string());

        set("dash", "cooldown", self.dash.cooldown.to_string());
        set("dash", "distance", self.dash.distance.to_string());
        set("dash", "flight_duration", self.dash.flight_duration.to_string());
        set("dash", "highlight1_start", self.dash.highlight1_start.to_string());
        set("dash", "highlight2_start", self.dash.highlight2_start.to_string());
        set("dash", "highlight_duration", self.dash.highlight_duration.to_string());

        set("slug", "max_health", self.slug.max_health.to_string());
        set("slug", "damage_cooldown", self.slug.damage_cooldown.to_string());
        set("slug", "speed", self.slug.speed.to_string());
        set("slug", "detection_distance", self.slug.detection_distance.to_string());
        set("slug", "contact_damage", self.slug.contact_damage.to_string());
        set("slug", "contact_knockback", self.slug.contact_knockback.to_string());

        set("effects", "knockback_duration", self.effects.knockback_duration.to_string());
        set("effects", "hit_highlight", self.effects.hit_highlight.to_string());

        set("spawner", "max_enemies", self.spawner.max_enemies.to_string());
        set("spawner", "interval", self.spawner.interval.to_string());
        set("spawner", "half_extent", self.spawner.half_extent.to_string());
        set("spawner", "min_distance", self.spawner.min_distance.to_string());

        ini.write(&self.config_path).map_err(|source| ConfigError::Save {
            path: self.config_path.clone(),
            source,
        })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
