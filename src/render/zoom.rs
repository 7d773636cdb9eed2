//! Scene zoom.
//!
//! A single scale factor applied to the whole composited scene. Each zoom
//! gesture multiplies it by a fixed step; the result is clamped.

use serde::{Deserialize, Serialize};

/// Zoom limits and step sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomSettings {
    pub min: f32,
    pub max: f32,
    /// Factor applied per zoom-in step.
    pub step_in: f32,
    /// Factor applied per zoom-out step.
    pub step_out: f32,
    pub initial: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 5.0,
            step_in: 1.1,
            step_out: 0.9,
            initial: 1.0,
        }
    }
}

impl ZoomSettings {
    /// Clamp a scale into `[min, max]`.
    pub fn clamp(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            return self.initial.max(self.min).min(self.max);
        }
        scale.max(self.min).min(self.max)
    }

    /// Check the settings are usable, returning a message when they aren't.
    pub fn check(&self) -> Result<(), String> {
        let all = [self.min, self.max, self.step_in, self.step_out, self.initial];
        if all.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err("zoom values must be positive numbers".to_string());
        }
        if self.min > self.max {
            return Err(format!("zoom.min ({}) is greater than zoom.max ({})", self.min, self.max));
        }
        if self.step_in <= 1.0 || self.step_out >= 1.0 {
            return Err("zoom.step_in must be above 1 and zoom.step_out below 1".to_string());
        }
        Ok(())
    }
}

/// Current zoom of a preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomState {
    scale: f32,
    #[serde(flatten)]
    settings: ZoomSettings,
}

impl ZoomState {
    pub fn new(settings: ZoomSettings) -> Self {
        Self {
            scale: settings.clamp(settings.initial),
            settings,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn settings(&self) -> &ZoomSettings {
        &self.settings
    }

    /// Set an explicit scale (clamped).
    pub fn set(&mut self, scale: f32) {
        self.scale = self.settings.clamp(scale);
    }

    pub fn zoom_in(&mut self) {
        self.set(self.scale * self.settings.step_in);
    }

    pub fn zoom_out(&mut self) {
        self.set(self.scale * self.settings.step_out);
    }

    /// Handle a wheel event. Only ctrl+wheel zooms; scrolling down zooms out.
    ///
    /// Returns whether the event was consumed.
    pub fn on_wheel(&mut self, delta_y: f32, ctrl: bool) -> bool {
        if !ctrl || delta_y == 0.0 {
            return false;
        }
        if delta_y > 0.0 {
            self.zoom_out();
        } else {
            self.zoom_in();
        }
        true
    }

    /// Scale as a rounded percentage.
    pub fn percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(ZoomSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let zoom = ZoomState::default();
        assert_eq!(zoom.scale(), 1.0);
        assert_eq!(zoom.percent(), 100);
    }

    #[test]
    fn test_steps_are_multiplicative() {
        let mut zoom = ZoomState::default();

        zoom.zoom_in();
        assert!((zoom.scale() - 1.1).abs() < 1e-6);

        zoom.zoom_out();
        assert!((zoom.scale() - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_out_clamps_at_min() {
        let mut zoom = ZoomState::default();
        for _ in 0..200 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.scale(), 0.1);
    }

    #[test]
    fn test_zoom_in_clamps_at_max() {
        let mut zoom = ZoomState::default();
        for _ in 0..200 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.scale(), 5.0);
        assert_eq!(zoom.percent(), 500);
    }

    #[test]
    fn test_wheel_requires_ctrl() {
        let mut zoom = ZoomState::default();

        assert!(!zoom.on_wheel(120.0, false));
        assert_eq!(zoom.scale(), 1.0);

        assert!(zoom.on_wheel(120.0, true));
        assert!(zoom.scale() < 1.0);

        assert!(zoom.on_wheel(-120.0, true));
        assert!(zoom.on_wheel(-120.0, true));
        assert!(zoom.scale() > 1.0);
    }

    #[test]
    fn test_set_clamps_and_ignores_nan() {
        let mut zoom = ZoomState::default();

        zoom.set(12.0);
        assert_eq!(zoom.scale(), 5.0);

        zoom.set(f32::NAN);
        assert_eq!(zoom.scale(), 1.0);
    }

    #[test]
    fn test_settings_check() {
        assert!(ZoomSettings::default().check().is_ok());

        let inverted = ZoomSettings { min: 3.0, max: 2.0, ..Default::default() };
        assert!(inverted.check().is_err());

        let flat = ZoomSettings { step_in: 1.0, ..Default::default() };
        assert!(flat.check().is_err());

        let negative = ZoomSettings { min: -1.0, ..Default::default() };
        assert!(negative.check().is_err());
    }
}
