//! Drawer configuration
//!
//! Defaults reproduce the production timings: 300 ms eased transitions, a
//! half-opaque backdrop and a 100 px / 500 px/s swipe threshold.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::animation::{DriverTiming, Easing, SpringConfig};
use crate::error::{DrawerError, Result};
use crate::gesture::GestureConfig;

/// Default panel height before the host reports a layout
pub const DEFAULT_PANEL_HEIGHT: f32 = 520.0;

/// Default open/close duration in milliseconds
pub const DEFAULT_TRANSITION_MS: u64 = 300;

/// Default delay between the two public profile navigations
pub const DEFAULT_PROFILE_NAVIGATION_DELAY_MS: u64 = 100;

/// Default frame interval (~60 fps)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Drawer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawerConfig {
    /// Panel height, the offset of the fully closed panel
    pub panel_height: f32,
    /// Open transition duration
    pub open_duration_ms: u64,
    /// Close transition duration
    pub close_duration_ms: u64,
    /// Curve for open and close
    pub easing: Easing,
    /// Backdrop opacity while open
    pub max_backdrop_opacity: f32,
    /// Snap-back spring
    pub spring: SpringConfig,
    /// Swipe-to-close thresholds
    pub gesture: GestureConfig,
    /// Delay before the public profile sub-screen is requested
    pub profile_navigation_delay_ms: u64,
    /// Runtime frame tick
    pub frame_interval_ms: u64,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            panel_height: DEFAULT_PANEL_HEIGHT,
            open_duration_ms: DEFAULT_TRANSITION_MS,
            close_duration_ms: DEFAULT_TRANSITION_MS,
            easing: Easing::EaseInOut,
            max_backdrop_opacity: 0.5,
            spring: SpringConfig::default(),
            gesture: GestureConfig::default(),
            profile_navigation_delay_ms: DEFAULT_PROFILE_NAVIGATION_DELAY_MS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl DrawerConfig {
    /// Parse and validate a JSON configuration
    ///
    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DrawerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.panel_height.is_finite() && self.panel_height > 0.0) {
            return Err(DrawerError::InvalidConfig(format!(
                "panel height must be positive, got {}",
                self.panel_height
            )));
        }
        if !(0.0..=1.0).contains(&self.max_backdrop_opacity) {
            return Err(DrawerError::InvalidConfig(format!(
                "backdrop opacity must be within 0..=1, got {}",
                self.max_backdrop_opacity
            )));
        }
        if self.frame_interval_ms == 0 {
            return Err(DrawerError::InvalidConfig(
                "frame interval must be non-zero".to_string(),
            ));
        }
        if self.gesture.close_distance <= 0.0 || self.gesture.close_velocity <= 0.0 {
            return Err(DrawerError::InvalidConfig(
                "gesture thresholds must be positive".to_string(),
            ));
        }
        if self.spring.stiffness <= 0.0 || self.spring.damping <= 0.0 || self.spring.mass <= 0.0 {
            return Err(DrawerError::InvalidConfig(
                "spring parameters must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Open transition duration
    pub fn open_duration(&self) -> Duration {
        Duration::from_millis(self.open_duration_ms)
    }

    /// Close transition duration
    pub fn close_duration(&self) -> Duration {
        Duration::from_millis(self.close_duration_ms)
    }

    /// Delay between the public profile navigations
    pub fn profile_navigation_delay(&self) -> Duration {
        Duration::from_millis(self.profile_navigation_delay_ms)
    }

    /// Runtime frame tick
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Timing contract handed to the animation driver
    pub fn driver_timing(&self) -> DriverTiming {
        DriverTiming {
            open: self.open_duration(),
            close: self.close_duration(),
            easing: self.easing,
            spring: self.spring,
            max_backdrop_opacity: self.max_backdrop_opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DrawerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.open_duration(), Duration::from_millis(300));
        assert_eq!(config.close_duration(), Duration::from_millis(300));
        assert_eq!(config.max_backdrop_opacity, 0.5);
        assert_eq!(config.gesture.close_distance, 100.0);
        assert_eq!(config.gesture.close_velocity, 500.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = DrawerConfig::from_json(
            r#"{"panelHeight": 640, "gesture": {"closeVelocity": 800}, "easing": "linear"}"#,
        )
        .unwrap();
        assert_eq!(config.panel_height, 640.0);
        assert_eq!(config.gesture.close_velocity, 800.0);
        assert_eq!(config.gesture.close_distance, 100.0);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.open_duration_ms, DEFAULT_TRANSITION_MS);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            DrawerConfig::from_json(r#"{"panelHeight": 0}"#),
            Err(DrawerError::InvalidConfig(_))
        ));
        assert!(matches!(
            DrawerConfig::from_json(r#"{"maxBackdropOpacity": 1.5}"#),
            Err(DrawerError::InvalidConfig(_))
        ));
        assert!(matches!(
            DrawerConfig::from_json(r#"{"frameIntervalMs": 0}"#),
            Err(DrawerError::InvalidConfig(_))
        ));
        assert!(matches!(
            DrawerConfig::from_json("not json"),
            Err(DrawerError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let config = DrawerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("openDurationMs"));
        assert_eq!(DrawerConfig::from_json(&json).unwrap(), config);
    }
}
