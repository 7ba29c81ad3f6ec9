//! # Effects Configuration
//!
//! Loaded once at startup (or level load) from TOML. Every field has a
//! default, so an empty file is a valid configuration.
//!
//! ```toml
//! add_marks = true
//! particle_capacity = 2048
//! mark_capacity = 1024
//! cull_radius = 1024.0
//! post_impact_gravity = -200.0
//! vid_height = 480
//! seed = 0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use cinder_shared::constants::{
    CULL_RADIUS, MAX_MARK_POLYS, MAX_PARTICLES, POST_IMPACT_GRAVITY, REFERENCE_VID_HEIGHT,
};

use crate::error::{EffectsError, EffectsResult};

/// Runtime configuration for the effects core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Master toggle for mark creation and the per-frame mark pass.
    pub add_marks: bool,
    /// Number of particle slots.
    pub particle_capacity: usize,
    /// Number of mark slots.
    pub mark_capacity: usize,
    /// Viewer distance beyond which smoke and weather are not drawn.
    pub cull_radius: f32,
    /// Z acceleration installed on a particle after it bounces.
    pub post_impact_gravity: f32,
    /// Screen height, used to scale palette sprites.
    pub vid_height: u32,
    /// Seed for the jitter generator.
    pub seed: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            add_marks: true,
            particle_capacity: MAX_PARTICLES,
            mark_capacity: MAX_MARK_POLYS,
            cull_radius: CULL_RADIUS,
            post_impact_gravity: POST_IMPACT_GRAVITY,
            vid_height: REFERENCE_VID_HEIGHT,
            seed: 0,
        }
    }
}

impl EffectsConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` for malformed TOML and `InvalidConfig` for
    /// out-of-range values.
    pub fn from_toml_str(text: &str) -> EffectsResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| EffectsError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigIo` if the file cannot be read, otherwise as
    /// [`EffectsConfig::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> EffectsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EffectsError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            "Loaded effects config from {}: {} particles, {} marks",
            path.display(),
            config.particle_capacity,
            config.mark_capacity
        );
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> EffectsResult<()> {
        if self.particle_capacity == 0 {
            return Err(EffectsError::InvalidConfig(
                "particle_capacity must be greater than zero".into(),
            ));
        }
        if self.mark_capacity == 0 {
            return Err(EffectsError::InvalidConfig(
                "mark_capacity must be greater than zero".into(),
            ));
        }
        if self.particle_capacity >= u32::MAX as usize || self.mark_capacity >= u32::MAX as usize {
            return Err(EffectsError::InvalidConfig(
                "pool capacity exceeds slot index range".into(),
            ));
        }
        if !(self.cull_radius.is_finite() && self.cull_radius > 0.0) {
            return Err(EffectsError::InvalidConfig(format!(
                "cull_radius must be positive, got {}",
                self.cull_radius
            )));
        }
        if !self.post_impact_gravity.is_finite() {
            return Err(EffectsError::InvalidConfig(
                "post_impact_gravity must be finite".into(),
            ));
        }
        if self.vid_height == 0 {
            return Err(EffectsError::InvalidConfig(
                "vid_height must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
