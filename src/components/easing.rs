//! Easing curves used to shape projectile flight speed.
//!
//! Each variant maps a normalized progress `t` in `[0, 1]` to an eased value
//! in `[0, 1]`. Projectiles store an [`Easing`] instead of a function pointer,
//! so the set of curves is closed and copyable.

use serde::{Deserialize, Serialize};

/// Named quartic easing curves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// `1 - (1 - t)^4`. Starts fast, decelerates.
    EaseOutQuart,
    /// `(1 - t)^4`. Mirror of [`Easing::EaseOutQuart`]: `1 - ease_out_quart(t)`.
    #[default]
    EaseOutQuartReverse,
    /// `t^4`. Starts slow, accelerates.
    EaseInQuart,
    /// `1 - t^4`.
    EaseInQuartReverse,
}

impl Easing {
    /// Every easing variant, in declaration order.
    pub const ALL: [Easing; 4] = [
        Easing::EaseOutQuart,
        Easing::EaseOutQuartReverse,
        Easing::EaseInQuart,
        Easing::EaseInQuartReverse,
    ];

    /// Evaluate the curve at `t`. Callers clamp `t` to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::EaseOutQuart => ease_out_quart(t),
            Easing::EaseOutQuartReverse => ease_out_quart_reverse(t),
            Easing::EaseInQuart => ease_in_quart(t),
            Easing::EaseInQuartReverse => ease_in_quart_reverse(t),
        }
    }

    /// Config-file name of the curve.
    pub fn name(self) -> &'static str {
        match self {
            Easing::EaseOutQuart => "ease_out_quart",
            Easing::EaseOutQuartReverse => "ease_out_quart_reverse",
            Easing::EaseInQuart => "ease_in_quart",
            Easing::EaseInQuartReverse => "ease_in_quart_reverse",
        }
    }

    /// Parse a config-file name back into a curve.
    pub fn from_name(name: &str) -> Option<Easing> {
        Easing::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name.trim()))
    }
}

pub fn ease_out_quart(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

pub fn ease_out_quart_reverse(t: f32) -> f32 {
    (1.0 - t).powi(4)
}

pub fn ease_in_quart(t: f32) -> f32 {
    t * t * t * t
}

pub fn ease_in_quart_reverse(t: f32) -> f32 {
    1.0 - t * t * t * t
}
