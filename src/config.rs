// Theme selection and per-viewport density settings for the particle field

use crate::error::FieldError;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Nebula,
    Supernova,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Nebula => "nebula",
            Theme::Supernova => "supernova",
        }
    }

    // Half-open range particle hues are drawn from
    pub fn hue_range(&self) -> (f64, f64) {
        match self {
            Theme::Nebula => (200.0, 260.0),
            Theme::Supernova => (30.0, 60.0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Nebula
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nebula" => Ok(Theme::Nebula),
            "supernova" => Ok(Theme::Supernova),
            other => Err(FieldError::UnknownTheme(other.to_owned())),
        }
    }
}

// Density settings for one viewport class.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    // Velocity components are drawn from `(rand - 0.5) * speed_factor`.
    pub speed_factor: f64,
    // Per-frame probability of spawning a shooting star.
    pub shooting_star_frequency: f64,
}

impl FieldConfig {
    // Viewports narrower than this (in CSS pixels) are treated as constrained.
    pub const CONSTRAINED_BREAKPOINT: f64 = 768.0;

    pub fn desktop() -> Self {
        FieldConfig {
            particle_count: 400,
            speed_factor: 0.3,
            shooting_star_frequency: 0.004,
        }
    }

    pub fn constrained() -> Self {
        FieldConfig {
            particle_count: 50,
            speed_factor: 0.2,
            shooting_star_frequency: 0.002,
        }
    }

    pub fn for_density(constrained: bool) -> Self {
        if constrained {
            FieldConfig::constrained()
        } else {
            FieldConfig::desktop()
        }
    }

    pub fn for_viewport_width(width: f64) -> Self {
        FieldConfig::for_density(width < FieldConfig::CONSTRAINED_BREAKPOINT)
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig::desktop()
    }
}
