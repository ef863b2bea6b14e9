//! Easing functions for tweens
//!
//! Every curve maps normalized time `t ∈ [0, 1]` to eased progress with
//! `f(0) = 0` and `f(1) = 1`. Back and elastic curves overshoot between the
//! endpoints; callers must not clamp their output. Callers clamp `t`.

use std::f32::consts::PI;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Plain easing function pointer; custom curves can be passed anywhere an
/// [`Ease`] selector resolves to one.
pub type EasingFn = fn(f32) -> f32;

const C1: f32 = 1.70158;
const C2: f32 = C1 * 1.525;
const C3: f32 = C1 + 1.0;
const C4: f32 = 2.0 * PI / 3.0;
const C5: f32 = 2.0 * PI / 4.5;
const N1: f32 = 7.5625;
const D1: f32 = 2.75;

/// Named easing curve selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ease {
    #[default]
    Linear,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
}

impl Ease {
    pub const ALL: [Ease; 31] = [
        Ease::Linear,
        Ease::EaseInSine,
        Ease::EaseOutSine,
        Ease::EaseInOutSine,
        Ease::EaseInQuad,
        Ease::EaseOutQuad,
        Ease::EaseInOutQuad,
        Ease::EaseInCubic,
        Ease::EaseOutCubic,
        Ease::EaseInOutCubic,
        Ease::EaseInQuart,
        Ease::EaseOutQuart,
        Ease::EaseInOutQuart,
        Ease::EaseInQuint,
        Ease::EaseOutQuint,
        Ease::EaseInOutQuint,
        Ease::EaseInExpo,
        Ease::EaseOutExpo,
        Ease::EaseInOutExpo,
        Ease::EaseInCirc,
        Ease::EaseOutCirc,
        Ease::EaseInOutCirc,
        Ease::EaseInBack,
        Ease::EaseOutBack,
        Ease::EaseInOutBack,
        Ease::EaseInElastic,
        Ease::EaseOutElastic,
        Ease::EaseInOutElastic,
        Ease::EaseInBounce,
        Ease::EaseOutBounce,
        Ease::EaseInOutBounce,
    ];

    /// Resolve the selector to its curve.
    pub fn function(self) -> EasingFn {
        match self {
            Ease::Linear => linear,
            Ease::EaseInSine => ease_in_sine,
            Ease::EaseOutSine => ease_out_sine,
            Ease::EaseInOutSine => ease_in_out_sine,
            Ease::EaseInQuad => ease_in_quad,
            Ease::EaseOutQuad => ease_out_quad,
            Ease::EaseInOutQuad => ease_in_out_quad,
            Ease::EaseInCubic => ease_in_cubic,
            Ease::EaseOutCubic => ease_out_cubic,
            Ease::EaseInOutCubic => ease_in_out_cubic,
            Ease::EaseInQuart => ease_in_quart,
            Ease::EaseOutQuart => ease_out_quart,
            Ease::EaseInOutQuart => ease_in_out_quart,
            Ease::EaseInQuint => ease_in_quint,
            Ease::EaseOutQuint => ease_out_quint,
            Ease::EaseInOutQuint => ease_in_out_quint,
            Ease::EaseInExpo => ease_in_expo,
            Ease::EaseOutExpo => ease_out_expo,
            Ease::EaseInOutExpo => ease_in_out_expo,
            Ease::EaseInCirc => ease_in_circ,
            Ease::EaseOutCirc => ease_out_circ,
            Ease::EaseInOutCirc => ease_in_out_circ,
            Ease::EaseInBack => ease_in_back,
            Ease::EaseOutBack => ease_out_back,
            Ease::EaseInOutBack => ease_in_out_back,
            Ease::EaseInElastic => ease_in_elastic,
            Ease::EaseOutElastic => ease_out_elastic,
            Ease::EaseInOutElastic => ease_in_out_elastic,
            Ease::EaseInBounce => ease_in_bounce,
            Ease::EaseOutBounce => ease_out_bounce,
            Ease::EaseInOutBounce => ease_in_out_bounce,
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }

    /// Get the name of this curve
    pub fn name(self) -> &'static str {
        match self {
            Ease::Linear => "Linear",
            Ease::EaseInSine => "EaseInSine",
            Ease::EaseOutSine => "EaseOutSine",
            Ease::EaseInOutSine => "EaseInOutSine",
            Ease::EaseInQuad => "EaseInQuad",
            Ease::EaseOutQuad => "EaseOutQuad",
            Ease::EaseInOutQuad => "EaseInOutQuad",
            Ease::EaseInCubic => "EaseInCubic",
            Ease::EaseOutCubic => "EaseOutCubic",
            Ease::EaseInOutCubic => "EaseInOutCubic",
            Ease::EaseInQuart => "EaseInQuart",
            Ease::EaseOutQuart => "EaseOutQuart",
            Ease::EaseInOutQuart => "EaseInOutQuart",
            Ease::EaseInQuint => "EaseInQuint",
            Ease::EaseOutQuint => "EaseOutQuint",
            Ease::EaseInOutQuint => "EaseInOutQuint",
            Ease::EaseInExpo => "EaseInExpo",
            Ease::EaseOutExpo => "EaseOutExpo",
            Ease::EaseInOutExpo => "EaseInOutExpo",
            Ease::EaseInCirc => "EaseInCirc",
            Ease::EaseOutCirc => "EaseOutCirc",
            Ease::EaseInOutCirc => "EaseInOutCirc",
            Ease::EaseInBack => "EaseInBack",
            Ease::EaseOutBack => "EaseOutBack",
            Ease::EaseInOutBack => "EaseInOutBack",
            Ease::EaseInElastic => "EaseInElastic",
            Ease::EaseOutElastic => "EaseOutElastic",
            Ease::EaseInOutElastic => "EaseInOutElastic",
            Ease::EaseInBounce => "EaseInBounce",
            Ease::EaseOutBounce => "EaseOutBounce",
            Ease::EaseInOutBounce => "EaseInOutBounce",
        }
    }

    /// Parse a selector name. Matching ignores case and `_`/`-` separators, so
    /// `"EaseOutQuad"`, `"ease_out_quad"` and `"ease-out-quad"` are equivalent.
    pub fn parse(name: &str) -> Option<Ease> {
        let key: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        Ease::ALL
            .iter()
            .copied()
            .find(|ease| ease.name().eq_ignore_ascii_case(&key))
    }

    /// Like [`Ease::parse`], but unknown selectors fall back to `Linear`.
    pub fn from_name(name: &str) -> Ease {
        Ease::parse(name).unwrap_or_else(|| {
            tracing::warn!("unknown easing '{}'; falling back to Linear", name);
            Ease::Linear
        })
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Ease {
    fn from(s: &str) -> Self {
        Ease::from_name(s)
    }
}

impl Serialize for Ease {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Ease {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Ease::from_name(&name))
    }
}

pub fn linear(t: f32) -> f32 {
    t
}

pub fn ease_in_sine(t: f32) -> f32 {
    1.0 - (t * PI / 2.0).cos()
}

pub fn ease_out_sine(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

pub fn ease_in_out_sine(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn ease_in_quart(t: f32) -> f32 {
    t * t * t * t
}

pub fn ease_out_quart(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

pub fn ease_in_out_quart(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

pub fn ease_in_quint(t: f32) -> f32 {
    t * t * t * t * t
}

pub fn ease_out_quint(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(5)
}

pub fn ease_in_out_quint(t: f32) -> f32 {
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

pub fn ease_in_expo(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * t - 10.0)
    }
}

pub fn ease_out_expo(t: f32) -> f32 {
    if t == 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

pub fn ease_in_out_expo(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        2f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

pub fn ease_in_circ(t: f32) -> f32 {
    1.0 - (1.0 - t * t).sqrt()
}

pub fn ease_out_circ(t: f32) -> f32 {
    (1.0 - (t - 1.0).powi(2)).sqrt()
}

pub fn ease_in_out_circ(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
    }
}

pub fn ease_in_back(t: f32) -> f32 {
    C3 * t * t * t - C1 * t * t
}

pub fn ease_out_back(t: f32) -> f32 {
    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}

pub fn ease_in_out_back(t: f32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2) + 2.0) / 2.0
    }
}

pub fn ease_in_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
    }
}

pub fn ease_out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}

pub fn ease_in_out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0
    } else {
        2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * C5).sin() / 2.0 + 1.0
    }
}

pub fn ease_in_bounce(t: f32) -> f32 {
    1.0 - ease_out_bounce(1.0 - t)
}

pub fn ease_out_bounce(t: f32) -> f32 {
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

pub fn ease_in_out_bounce(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - ease_out_bounce(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + ease_out_bounce(2.0 * t - 1.0)) / 2.0
    }
}
