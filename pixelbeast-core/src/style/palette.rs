use crate::{
    foundation::core::Rgb8,
    foundation::rng::{Rng64, Stream},
    text::features::FeatureSet,
    text::seed::Seed,
};

/// Five color roles derived from a single hue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Base hue in degrees, as drawn (a draw of 360 is equivalent to 0).
    pub hue: u16,
    pub main: Rgb8,
    pub shadow: Rgb8,
    pub highlight: Rgb8,
    pub contrast: Rgb8,
    pub decoration: Rgb8,
}

/// Per-role (hue offset, saturation, value).
const ROLES: [(u16, f64, f64); 5] = [
    (0, 0.8, 0.9),
    (0, 0.9, 0.6),
    (0, 0.4, 1.0),
    (180, 0.7, 0.8),
    (30, 0.6, 0.85),
];

impl Palette {
    pub fn from_hue(hue: u16) -> Self {
        let [main, shadow, highlight, contrast, decoration] =
            ROLES.map(|(offset, s, v)| hsv_to_rgb8((hue + offset) % 360, s, v));
        Self {
            hue,
            main,
            shadow,
            highlight,
            contrast,
            decoration,
        }
    }

    pub fn colors(&self) -> [Rgb8; 5] {
        [
            self.main,
            self.shadow,
            self.highlight,
            self.contrast,
            self.decoration,
        ]
    }
}

/// Draw the base hue from the feature set's theme range and build the palette.
pub fn generate_palette(seed: Seed, features: &FeatureSet) -> Palette {
    let mut rng = Rng64::for_stream(seed, Stream::Palette);
    let range = features.theme.hue;
    let hue = rng.range_i32(i32::from(range.min), i32::from(range.max)) as u16;
    Palette::from_hue(hue)
}

/// HSV → RGB with `h` in degrees and `s`, `v` in `[0, 1]`; channels truncate to 8 bits.
pub fn hsv_to_rgb8(h_deg: u16, s: f64, v: f64) -> Rgb8 {
    let (r, g, b) = hsv_to_rgb(f64::from(h_deg % 360) / 360.0, s, v);
    let q = |c: f64| (c * 255.0).clamp(0.0, 255.0) as u8;
    Rgb8::new(q(r), q(g), q(b))
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/palette.rs"]
mod tests;
