use crate::text::{
    features::FeatureSet,
    rules::{BodyArchetype, FaceStyle, FeatureFlag, RuleTable, SizeCategory, first_flag_match},
};

/// Canvas side the appendage and face offsets are authored for.
pub const REFERENCE_SIDE: i32 = 64;

/// Optional layer drawn around or on the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appendage {
    Horns,
    Ears,
    Wings,
    Tail,
    FireAura,
    Crystals,
}

impl Appendage {
    /// Paint order; also the order their random jitter is drawn in.
    pub const ORDER: [Appendage; 6] = [
        Self::Horns,
        Self::Ears,
        Self::Wings,
        Self::Tail,
        Self::FireAura,
        Self::Crystals,
    ];

    pub fn flag(self) -> FeatureFlag {
        match self {
            Self::Horns => FeatureFlag::HasHorns,
            Self::Ears => FeatureFlag::HasEars,
            Self::Wings => FeatureFlag::HasWings,
            Self::Tail => FeatureFlag::HasTail,
            Self::FireAura => FeatureFlag::HasFire,
            Self::Crystals => FeatureFlag::HasCrystals,
        }
    }
}

/// Resolved geometry and layer list for one creature.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShapePlan {
    pub archetype: BodyArchetype,
    /// Logical canvas side.
    pub side: i32,
    /// Body center x.
    pub cx: i32,
    /// Body top y.
    pub body_y: i32,
    /// Body half-width.
    pub bw: i32,
    /// Body height.
    pub bh: i32,
    pub appendages: Vec<Appendage>,
    pub face: FaceStyle,
}

impl ShapePlan {
    pub fn has(&self, a: Appendage) -> bool {
        self.appendages.contains(&a)
    }

    /// Scale an offset authored for a 64px canvas to this canvas.
    ///
    /// Non-zero offsets never collapse to zero.
    pub fn unit(&self, v: i32) -> i32 {
        if v == 0 {
            return 0;
        }
        let scaled =
            (f64::from(v) * f64::from(self.side) / f64::from(REFERENCE_SIDE)).round() as i32;
        if scaled == 0 { v.signum() } else { scaled }
    }

    /// Left body edge.
    pub fn left(&self) -> i32 {
        self.cx - self.bw
    }

    /// Right body edge.
    pub fn right(&self) -> i32 {
        self.cx + self.bw
    }

    /// Body bottom edge.
    pub fn bottom(&self) -> i32 {
        self.body_y + self.bh
    }
}

/// Resolve body dimensions, archetype, appendages and face for a canvas of `side` pixels.
pub fn plan_shape(features: &FeatureSet, rules: &RuleTable, side: u32) -> ShapePlan {
    let s = side as i32;
    let (mut bw, bh) = if features.has(FeatureFlag::Tall) {
        (s / 4, (f64::from(s) * 0.7) as i32)
    } else if features.has(FeatureFlag::Fat) {
        ((f64::from(s) * 0.4) as i32, s / 3)
    } else {
        (s / 3, s / 2)
    };
    match features.size {
        SizeCategory::Large => bw += s / 16,
        SizeCategory::Small => bw = (bw - s / 16).max(s / 8),
        SizeCategory::Medium => {}
    }

    let has = |f| features.has(f);
    let archetype = first_flag_match(&rules.archetypes, has).unwrap_or_default();
    let face = first_flag_match(&rules.faces, has).unwrap_or_default();
    let appendages = Appendage::ORDER
        .into_iter()
        .filter(|a| features.has(a.flag()))
        .collect();

    ShapePlan {
        archetype,
        side: s,
        cx: s / 2,
        body_y: s / 3,
        bw,
        bh,
        appendages,
        face,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/plan.rs"]
mod tests;
