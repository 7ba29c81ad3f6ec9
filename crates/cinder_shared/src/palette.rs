//! 8-bit palette and color ramps for palette-style ("quake") sprites.
//!
//! Colors are normalized RGB. Ramps are palette indices stepped through by
//! ramping particles; a ramp is exhausted once its position reaches
//! [`RAMP_LEN`].

/// Number of steps in every color ramp.
pub const RAMP_LEN: usize = 8;

/// Hot ramp used by explosions and rocket trails.
pub const RAMP1: [u8; RAMP_LEN] = [0x6f, 0x6d, 0x6b, 0x69, 0x67, 0x65, 0x63, 0x61];

/// Cooler ramp used by secondary explosion debris.
pub const RAMP2: [u8; RAMP_LEN] = [0x6f, 0x6e, 0x6d, 0x6c, 0x6b, 0x6a, 0x68, 0x66];

/// Smoke ramp. The last two steps are black.
pub const RAMP3: [u8; RAMP_LEN] = [0x6d, 0x6b, 6, 5, 4, 3, 0, 0];

/// Selects one of the fixed color ramps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ColorRamp {
    /// [`RAMP1`]
    #[default]
    Hot,
    /// [`RAMP2`]
    Warm,
    /// [`RAMP3`]
    Smoke,
}

impl ColorRamp {
    /// The palette indices for this ramp.
    #[must_use]
    pub const fn steps(self) -> &'static [u8; RAMP_LEN] {
        match self {
            Self::Hot => &RAMP1,
            Self::Warm => &RAMP2,
            Self::Smoke => &RAMP3,
        }
    }

    /// Palette index at a (fractional) ramp position, or `None` once the
    /// ramp is exhausted.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn index_at(self, position: f32) -> Option<u8> {
        if position.is_nan() || position < 0.0 {
            return None;
        }
        self.steps().get(position as usize).copied()
    }
}

/// Looks up a palette color.
#[inline]
#[must_use]
pub fn palette_rgb(index: u8) -> [f32; 3] {
    PALETTE[index as usize]
}

/// The 256-entry palette.
#[rustfmt::skip]
pub const PALETTE: [[f32; 3]; 256] = [
    [0.000000, 0.000000, 0.000000],
    [0.058824, 0.058824, 0.058824],
    [0.121569, 0.121569, 0.121569],
    [0.184314, 0.184314, 0.184314],
    [0.247059, 0.247059, 0.247059],
    [0.294118, 0.294118, 0.294118],
    [0.356863, 0.356863, 0.356863],
    [0.419608, 0.419608, 0.419608],
    [0.482353, 0.482353, 0.482353],
    [0.545098, 0.545098, 0.545098],
    [0.607843, 0.607843, 0.607843],
    [0.670588, 0.670588, 0.670588],
    [0.733333, 0.733333, 0.733333],
    [0.796078, 0.796078, 0.796078],
    [0.858824, 0.858824, 0.858824],
    [0.921569, 0.921569, 0.921569],
    [0.058824, 0.043137, 0.027451],
    [0.090196, 0.058824, 0.043137],
    [0.121569, 0.090196, 0.043137],
    [0.152941, 0.105882, 0.058824],
    [0.184314, 0.137255, 0.074510],
    [0.215686, 0.168627, 0.090196],
    [0.247059, 0.184314, 0.090196],
    [0.294118, 0.215686, 0.105882],
    [0.325490, 0.231373, 0.105882],
    [0.356863, 0.262745, 0.121569],
    [0.388235, 0.294118, 0.121569],
    [0.419608, 0.325490, 0.121569],
    [0.450980, 0.341176, 0.121569],
    [0.482353, 0.372549, 0.137255],
    [0.513725, 0.403922, 0.137255],
    [0.560784, 0.435294, 0.137255],
    [0.043137, 0.043137, 0.058824],
    [0.074510, 0.074510, 0.105882],
    [0.105882, 0.105882, 0.152941],
    [0.152941, 0.152941, 0.200000],
    [0.184314, 0.184314, 0.247059],
    [0.215686, 0.215686, 0.294118],
    [0.247059, 0.247059, 0.341176],
    [0.278431, 0.278431, 0.403922],
    [0.309804, 0.309804, 0.450980],
    [0.356863, 0.356863, 0.498039],
    [0.388235, 0.388235, 0.545098],
    [0.419608, 0.419608, 0.592157],
    [0.450980, 0.450980, 0.639216],
    [0.482353, 0.482353, 0.686275],
    [0.513725, 0.513725, 0.733333],
    [0.545098, 0.545098, 0.796078],
    [0.000000, 0.000000, 0.000000],
    [0.027451, 0.027451, 0.000000],
    [0.043137, 0.043137, 0.000000],
    [0.074510, 0.074510, 0.000000],
    [0.105882, 0.105882, 0.000000],
    [0.137255, 0.137255, 0.000000],
    [0.168627, 0.168627, 0.027451],
    [0.184314, 0.184314, 0.027451],
    [0.215686, 0.215686, 0.027451],
    [0.247059, 0.247059, 0.027451],
    [0.278431, 0.278431, 0.027451],
    [0.294118, 0.294118, 0.043137],
    [0.325490, 0.325490, 0.043137],
    [0.356863, 0.356863, 0.043137],
    [0.388235, 0.388235, 0.043137],
    [0.419608, 0.419608, 0.058824],
    [0.027451, 0.000000, 0.000000],
    [0.058824, 0.000000, 0.000000],
    [0.090196, 0.000000, 0.000000],
    [0.121569, 0.000000, 0.000000],
    [0.152941, 0.000000, 0.000000],
    [0.184314, 0.000000, 0.000000],
    [0.215686, 0.000000, 0.000000],
    [0.247059, 0.000000, 0.000000],
    [0.278431, 0.000000, 0.000000],
    [0.309804, 0.000000, 0.000000],
    [0.341176, 0.000000, 0.000000],
    [0.372549, 0.000000, 0.000000],
    [0.403922, 0.000000, 0.000000],
    [0.435294, 0.000000, 0.000000],
    [0.466667, 0.000000, 0.000000],
    [0.498039, 0.000000, 0.000000],
    [0.074510, 0.074510, 0.000000],
    [0.105882, 0.105882, 0.000000],
    [0.137255, 0.137255, 0.000000],
    [0.184314, 0.168627, 0.000000],
    [0.215686, 0.184314, 0.000000],
    [0.262745, 0.215686, 0.000000],
    [0.294118, 0.231373, 0.027451],
    [0.341176, 0.262745, 0.027451],
    [0.372549, 0.278431, 0.027451],
    [0.419608, 0.294118, 0.043137],
    [0.466667, 0.325490, 0.058824],
    [0.513725, 0.341176, 0.074510],
    [0.545098, 0.356863, 0.074510],
    [0.592157, 0.372549, 0.105882],
    [0.639216, 0.388235, 0.121569],
    [0.686275, 0.403922, 0.137255],
    [0.137255, 0.074510, 0.027451],
    [0.184314, 0.090196, 0.043137],
    [0.231373, 0.121569, 0.058824],
    [0.294118, 0.137255, 0.074510],
    [0.341176, 0.168627, 0.090196],
    [0.388235, 0.184314, 0.121569],
    [0.450980, 0.215686, 0.137255],
    [0.498039, 0.231373, 0.168627],
    [0.560784, 0.262745, 0.200000],
    [0.623529, 0.309804, 0.200000],
    [0.686275, 0.388235, 0.184314],
    [0.749020, 0.466667, 0.184314],
    [0.811765, 0.560784, 0.168627],
    [0.874510, 0.670588, 0.152941],
    [0.937255, 0.796078, 0.121569],
    [1.000000, 0.952941, 0.105882],
    [0.043137, 0.027451, 0.000000],
    [0.105882, 0.074510, 0.000000],
    [0.168627, 0.137255, 0.058824],
    [0.215686, 0.168627, 0.074510],
    [0.278431, 0.200000, 0.105882],
    [0.325490, 0.215686, 0.137255],
    [0.388235, 0.247059, 0.168627],
    [0.435294, 0.278431, 0.200000],
    [0.498039, 0.325490, 0.247059],
    [0.545098, 0.372549, 0.278431],
    [0.607843, 0.419608, 0.325490],
    [0.654902, 0.482353, 0.372549],
    [0.717647, 0.529412, 0.419608],
    [0.764706, 0.576471, 0.482353],
    [0.827451, 0.639216, 0.545098],
    [0.890196, 0.701961, 0.592157],
    [0.670588, 0.545098, 0.639216],
    [0.623529, 0.498039, 0.592157],
    [0.576471, 0.450980, 0.529412],
    [0.545098, 0.403922, 0.482353],
    [0.498039, 0.356863, 0.435294],
    [0.466667, 0.325490, 0.388235],
    [0.419608, 0.294118, 0.341176],
    [0.372549, 0.247059, 0.294118],
    [0.341176, 0.215686, 0.262745],
    [0.294118, 0.184314, 0.215686],
    [0.262745, 0.152941, 0.184314],
    [0.215686, 0.121569, 0.137255],
    [0.168627, 0.090196, 0.105882],
    [0.137255, 0.074510, 0.074510],
    [0.090196, 0.043137, 0.043137],
    [0.058824, 0.027451, 0.027451],
    [0.733333, 0.450980, 0.623529],
    [0.686275, 0.419608, 0.560784],
    [0.639216, 0.372549, 0.513725],
    [0.592157, 0.341176, 0.466667],
    [0.545098, 0.309804, 0.419608],
    [0.498039, 0.294118, 0.372549],
    [0.450980, 0.262745, 0.325490],
    [0.419608, 0.231373, 0.294118],
    [0.372549, 0.200000, 0.247059],
    [0.325490, 0.168627, 0.215686],
    [0.278431, 0.137255, 0.168627],
    [0.231373, 0.121569, 0.137255],
    [0.184314, 0.090196, 0.105882],
    [0.137255, 0.074510, 0.074510],
    [0.090196, 0.043137, 0.043137],
    [0.058824, 0.027451, 0.027451],
    [0.858824, 0.764706, 0.733333],
    [0.796078, 0.701961, 0.654902],
    [0.749020, 0.639216, 0.607843],
    [0.686275, 0.592157, 0.545098],
    [0.639216, 0.529412, 0.482353],
    [0.592157, 0.482353, 0.435294],
    [0.529412, 0.435294, 0.372549],
    [0.482353, 0.388235, 0.325490],
    [0.419608, 0.341176, 0.278431],
    [0.372549, 0.294118, 0.231373],
    [0.325490, 0.247059, 0.200000],
    [0.262745, 0.200000, 0.152941],
    [0.215686, 0.168627, 0.121569],
    [0.152941, 0.121569, 0.090196],
    [0.105882, 0.074510, 0.058824],
    [0.058824, 0.043137, 0.027451],
    [0.435294, 0.513725, 0.482353],
    [0.403922, 0.482353, 0.435294],
    [0.372549, 0.450980, 0.403922],
    [0.341176, 0.419608, 0.372549],
    [0.309804, 0.388235, 0.341176],
    [0.278431, 0.356863, 0.309804],
    [0.247059, 0.325490, 0.278431],
    [0.215686, 0.294118, 0.247059],
    [0.184314, 0.262745, 0.215686],
    [0.168627, 0.231373, 0.184314],
    [0.137255, 0.200000, 0.152941],
    [0.121569, 0.168627, 0.121569],
    [0.090196, 0.137255, 0.090196],
    [0.058824, 0.105882, 0.074510],
    [0.043137, 0.074510, 0.043137],
    [0.027451, 0.043137, 0.027451],
    [1.000000, 0.952941, 0.105882],
    [0.937255, 0.874510, 0.090196],
    [0.858824, 0.796078, 0.074510],
    [0.796078, 0.717647, 0.058824],
    [0.733333, 0.654902, 0.058824],
    [0.670588, 0.592157, 0.043137],
    [0.607843, 0.513725, 0.027451],
    [0.545098, 0.450980, 0.027451],
    [0.482353, 0.388235, 0.027451],
    [0.419608, 0.325490, 0.000000],
    [0.356863, 0.278431, 0.000000],
    [0.294118, 0.215686, 0.000000],
    [0.231373, 0.168627, 0.000000],
    [0.168627, 0.121569, 0.000000],
    [0.105882, 0.058824, 0.000000],
    [0.043137, 0.027451, 0.000000],
    [0.000000, 0.000000, 1.000000],
    [0.043137, 0.043137, 0.937255],
    [0.074510, 0.074510, 0.874510],
    [0.105882, 0.105882, 0.811765],
    [0.137255, 0.137255, 0.749020],
    [0.168627, 0.168627, 0.686275],
    [0.184314, 0.184314, 0.623529],
    [0.184314, 0.184314, 0.560784],
    [0.184314, 0.184314, 0.498039],
    [0.184314, 0.184314, 0.435294],
    [0.184314, 0.184314, 0.372549],
    [0.168627, 0.168627, 0.309804],
    [0.137255, 0.137255, 0.247059],
    [0.105882, 0.105882, 0.184314],
    [0.074510, 0.074510, 0.121569],
    [0.043137, 0.043137, 0.058824],
    [0.168627, 0.000000, 0.000000],
    [0.231373, 0.000000, 0.000000],
    [0.294118, 0.027451, 0.000000],
    [0.372549, 0.027451, 0.000000],
    [0.435294, 0.058824, 0.000000],
    [0.498039, 0.090196, 0.027451],
    [0.576471, 0.121569, 0.027451],
    [0.639216, 0.152941, 0.043137],
    [0.717647, 0.200000, 0.058824],
    [0.764706, 0.294118, 0.105882],
    [0.811765, 0.388235, 0.168627],
    [0.858824, 0.498039, 0.231373],
    [0.890196, 0.592157, 0.309804],
    [0.905882, 0.670588, 0.372549],
    [0.937255, 0.749020, 0.466667],
    [0.968627, 0.827451, 0.545098],
    [0.654902, 0.482353, 0.231373],
    [0.717647, 0.607843, 0.215686],
    [0.780392, 0.764706, 0.215686],
    [0.905882, 0.890196, 0.341176],
    [0.498039, 0.749020, 1.000000],
    [0.670588, 0.905882, 1.000000],
    [0.843137, 1.000000, 1.000000],
    [0.403922, 0.000000, 0.000000],
    [0.545098, 0.000000, 0.000000],
    [0.701961, 0.000000, 0.000000],
    [0.843137, 0.000000, 0.000000],
    [1.000000, 0.000000, 0.000000],
    [1.000000, 0.952941, 0.576471],
    [1.000000, 0.968627, 0.780392],
    [1.000000, 1.000000, 1.000000],
    [0.623529, 0.356863, 0.325490],
];
