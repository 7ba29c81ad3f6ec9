//! Shader handles used by the presets and the mark pass.
//!
//! Registered once when the context is created. Registration failures are
//! logged and leave a zero handle behind; anything drawn with a zero handle
//! is skipped at render time.

use crate::interfaces::{SceneRenderer, ShaderHandle};

/// Blend function selector used by the LFX presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Alpha blended.
    #[default]
    Alpha,
    /// Additive.
    Add,
    /// Modulate (multiply).
    Modulate,
    /// Subtractive.
    Subtract,
}

impl BlendMode {
    /// Maps the numeric selector used in effect scripts (1 add, 2 modulate,
    /// 3 subtract, anything else alpha).
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Add,
            2 => Self::Modulate,
            3 => Self::Subtract,
            _ => Self::Alpha,
        }
    }
}

/// One shader registered under each blend function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlendSet {
    /// Alpha blended variant.
    pub alpha: ShaderHandle,
    /// Additive variant.
    pub add: ShaderHandle,
    /// Modulate variant.
    pub modulate: ShaderHandle,
    /// Subtractive variant.
    pub subtract: ShaderHandle,
}

impl BlendSet {
    fn register(renderer: &mut dyn SceneRenderer, stem: &str) -> Self {
        Self {
            alpha: register(renderer, &format!("lfx/alf{stem}")),
            add: register(renderer, &format!("lfx/add{stem}")),
            modulate: register(renderer, &format!("lfx/mod{stem}")),
            subtract: register(renderer, &format!("lfx/sub{stem}")),
        }
    }

    /// Handle for a blend mode.
    #[must_use]
    pub const fn pick(&self, mode: BlendMode) -> ShaderHandle {
        match mode {
            BlendMode::Alpha => self.alpha,
            BlendMode::Add => self.add,
            BlendMode::Modulate => self.modulate,
            BlendMode::Subtract => self.subtract,
        }
    }
}

/// Every shader the effects core draws with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MediaHandles {
    /// LFX smoke puffs.
    pub smoke: BlendSet,
    /// LFX shockwave rings.
    pub shock: BlendSet,
    /// LFX balls (sparks, droplets).
    pub ball: BlendSet,
    /// Blood splat mark.
    pub blood_mark: ShaderHandle,
    /// Plasma/energy scorch mark (gets the early glow fade).
    pub energy_mark: ShaderHandle,
    /// Explosion burn mark.
    pub burn_mark: ShaderHandle,
    /// Flat white, used by palette sprites.
    pub white: ShaderHandle,
    /// Underwater bubble.
    pub water_bubble: ShaderHandle,
    /// Snow flake.
    pub snow_flake: ShaderHandle,
    /// Explosion sprite.
    pub explosion: ShaderHandle,
    /// Legacy smoke puff sprite.
    pub puff: ShaderHandle,
    /// Legacy spark sprite.
    pub spark: ShaderHandle,
    /// Legacy blast sprite.
    pub blast: ShaderHandle,
    /// Legacy water splash sprite.
    pub splash: ShaderHandle,
    /// Legacy blood sprite.
    pub blood: ShaderHandle,
}

impl MediaHandles {
    /// Registers every shader with the renderer.
    pub fn register(renderer: &mut dyn SceneRenderer) -> Self {
        let media = Self {
            smoke: BlendSet::register(renderer, "smoke"),
            shock: BlendSet::register(renderer, "shock"),
            ball: BlendSet::register(renderer, "ball"),
            blood_mark: register(renderer, "bloodMark"),
            energy_mark: register(renderer, "gfx/damage/plasma_mrk"),
            burn_mark: register(renderer, "gfx/damage/burn_med_mrk"),
            white: register(renderer, "white"),
            water_bubble: register(renderer, "waterBubble"),
            snow_flake: register(renderer, "snowflake"),
            explosion: register(renderer, "rocketExplosion"),
            puff: register(renderer, "lfx/lsmk1"),
            spark: register(renderer, "lfx/lspk1"),
            blast: register(renderer, "lfx/lbum1"),
            splash: register(renderer, "lfx/lspl1"),
            blood: register(renderer, "lfx/lbld1"),
        };
        tracing::debug!("Registered effects media");
        media
    }
}

fn register(renderer: &mut dyn SceneRenderer, name: &str) -> ShaderHandle {
    let handle = renderer.register_shader(name);
    if !handle.is_valid() {
        tracing::warn!("Shader {} not registered, effects using it will not draw", name);
    }
    handle
}
