//! Urgency profiles balancing proximity against quality.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named urgency levels a user can pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UrgencyLevel {
    /// Nearest wins almost regardless of quality.
    Emergency,
    /// Balanced default.
    #[default]
    Moderate,
    /// Willing to walk further for a nicer restroom.
    Relaxed,
}

/// Error returned by [`UrgencyLevel::from_str`] for unknown keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown urgency level: {0}")]
pub struct UnknownUrgencyLevel(
    /// The rejected key.
    pub String,
);

impl UrgencyLevel {
    /// Every level, from most to least urgent.
    pub const ALL: [Self; 3] = [Self::Emergency, Self::Moderate, Self::Relaxed];

    /// Resolve a profile key, falling back to [`UrgencyLevel::Moderate`].
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::UrgencyLevel;
    ///
    /// assert_eq!(UrgencyLevel::from_key("EMERGENCY"), UrgencyLevel::Emergency);
    /// assert_eq!(UrgencyLevel::from_key("panic"), UrgencyLevel::Moderate);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_else(|err: UnknownUrgencyLevel| {
            log::debug!("{err}; using moderate");
            Self::Moderate
        })
    }

    /// Lowercase key for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Moderate => "moderate",
            Self::Relaxed => "relaxed",
        }
    }

    /// Ranking configuration for this level.
    #[must_use]
    pub const fn profile(self) -> UrgencyProfile {
        match self {
            Self::Emergency => UrgencyProfile {
                level: self,
                distance_weight: 0.9,
                quality_weight: 0.1,
                default_radius_meters: 300.0,
                default_categories: &["starbucks", "twosome", "ediya"],
            },
            Self::Moderate => UrgencyProfile {
                level: self,
                distance_weight: 0.6,
                quality_weight: 0.4,
                default_radius_meters: 500.0,
                default_categories: &["starbucks", "twosome", "ediya"],
            },
            Self::Relaxed => UrgencyProfile {
                level: self,
                distance_weight: 0.3,
                quality_weight: 0.7,
                default_radius_meters: 1000.0,
                default_categories: &["starbucks", "twosome", "ediya", "cafe"],
            },
        }
    }
}

impl FromStr for UrgencyLevel {
    type Err = UnknownUrgencyLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emergency" => Ok(Self::Emergency),
            "moderate" => Ok(Self::Moderate),
            "relaxed" => Ok(Self::Relaxed),
            _ => Err(UnknownUrgencyLevel(s.to_owned())),
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighting scheme and defaults attached to an [`UrgencyLevel`].
///
/// `distance_weight + quality_weight == 1.0` for every built-in profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UrgencyProfile {
    /// Level this profile belongs to.
    pub level: UrgencyLevel,
    /// Weight applied to the proximity component.
    pub distance_weight: f64,
    /// Weight applied to the quality component.
    pub quality_weight: f64,
    /// Search radius used when the caller does not supply one.
    pub default_radius_meters: f64,
    /// Venue category keys enabled when the caller does not choose.
    pub default_categories: &'static [&'static str],
}

impl UrgencyProfile {
    /// Profile for `key`, falling back to `moderate` for unknown keys.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        UrgencyLevel::from_key(key).profile()
    }
}

impl Default for UrgencyProfile {
    fn default() -> Self {
        UrgencyLevel::default().profile()
    }
}
