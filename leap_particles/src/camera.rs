//! Thumb-driven camera dolly.
//!
//! While any hand shows `thumbs_up` the camera eases toward the field;
//! `thumbs_down` eases it away.  If both are showing, away wins.

use hand_gesture::{Gesture, HandState};
use particle_field::Viewport;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Vertical field of view, degrees.
    pub fov_deg:   f32,
    pub start_z:   f32,
    pub min_z:     f32,
    pub max_z:     f32,
    /// Nominal dolly speed, units per second.
    pub speed:     f32,
    /// Fraction of the nominal step taken each frame.
    pub smoothing: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        ZoomConfig {
            fov_deg:   60.0,
            start_z:   8.0,
            min_z:     2.0,
            max_z:     20.0,
            speed:     10.0,
            smoothing: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraZoom {
    config: ZoomConfig,
    z:      f32,
}

impl CameraZoom {
    pub fn new(config: ZoomConfig) -> Self {
        let z = config.start_z.clamp(config.min_z, config.max_z);
        CameraZoom { config, z }
    }

    /// Camera distance from the z = 0 plane.
    pub fn z(&self) -> f32 { self.z }

    pub fn fov_deg(&self) -> f32 { self.config.fov_deg }

    /// Advance one frame.  Returns the new distance.
    pub fn update(&mut self, hands: &HandState, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let step = self.config.speed * dt;
        let goal = if hands.any(Gesture::ThumbsDown) && self.z < self.config.max_z {
            Some(self.z + step)
        } else if hands.any(Gesture::ThumbsUp) && self.z > self.config.min_z {
            Some(self.z - step)
        } else {
            None
        };
        if let Some(goal) = goal {
            let next = self.z + (goal - self.z) * self.config.smoothing;
            self.z = next.clamp(self.config.min_z, self.config.max_z);
        }
        self.z
    }

    /// The z = 0 rectangle this camera sees at `aspect`.
    pub fn viewport(&self, aspect: f32) -> Viewport {
        Viewport::from_camera(self.config.fov_deg, self.z, aspect)
    }
}

impl Default for CameraZoom {
    fn default() -> Self { CameraZoom::new(ZoomConfig::default()) }
}
