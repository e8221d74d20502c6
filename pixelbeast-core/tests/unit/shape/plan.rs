use super::*;
use crate::text::features::extract_features;

fn plan(desc: &str, side: u32) -> ShapePlan {
    let rules = RuleTable::default();
    plan_shape(&extract_features(desc, &rules), &rules, side)
}

#[test]
fn default_body_is_boxy_medium() {
    let p = plan("blob", 32);
    assert_eq!(p.archetype, BodyArchetype::Boxy);
    assert_eq!(p.face, FaceStyle::Neutral);
    assert_eq!((p.cx, p.body_y, p.bw, p.bh), (16, 10, 10, 16));
    assert!(p.appendages.is_empty());
}

#[test]
fn tall_and_fat_dimensions() {
    let tall = plan("tall blob", 64);
    assert_eq!((tall.bw, tall.bh), (16, 44));
    let fat = plan("fat blob", 64);
    assert_eq!((fat.bw, fat.bh), (25, 21));
    // Tall wins over fat.
    let both = plan("tall fat blob", 64);
    assert_eq!((both.bw, both.bh), (16, 44));
}

#[test]
fn keywords_match_inside_longer_words() {
    // "thing" contains "thin".
    let p = plan("fat thing", 64);
    assert_eq!((p.bw, p.bh), (16, 44));
}

#[test]
fn size_category_adjusts_width_only() {
    let large = plan("giant blob", 64);
    assert_eq!((large.bw, large.bh), (21 + 4, 32));
    let small = plan("tiny blob", 64);
    assert_eq!((small.bw, small.bh), (21 - 4, 32));
    assert!(small.bw >= 64 / 8);
}

#[test]
fn round_beats_robot_beats_ghost() {
    assert_eq!(plan("round robot", 32).archetype, BodyArchetype::Round);
    assert_eq!(plan("robot ghost", 32).archetype, BodyArchetype::Robot);
    assert_eq!(plan("ghost", 32).archetype, BodyArchetype::Ghost);
}

#[test]
fn cute_face_beats_scary_face() {
    assert_eq!(plan("cute but scary", 32).face, FaceStyle::Cute);
    assert_eq!(plan("evil", 32).face, FaceStyle::Scary);
}

#[test]
fn appendages_follow_paint_order() {
    let p = plan("crystal dragon with wings, horns and fire", 64);
    assert_eq!(
        p.appendages,
        vec![
            Appendage::Horns,
            Appendage::Wings,
            Appendage::Tail,
            Appendage::FireAura,
            Appendage::Crystals,
        ]
    );
    assert!(p.has(Appendage::Tail));
    assert!(!p.has(Appendage::Ears));
}

#[test]
fn unit_scales_from_reference_side() {
    let p64 = plan("blob", 64);
    for v in [-8, 0, 1, 3, 12] {
        assert_eq!(p64.unit(v), v);
    }
    let p32 = plan("blob", 32);
    assert_eq!(p32.unit(0), 0);
    assert_eq!(p32.unit(1), 1);
    assert_eq!(p32.unit(2), 1);
    assert_eq!(p32.unit(12), 6);
    assert_eq!(p32.unit(-8), -4);
    let p128 = plan("blob", 128);
    assert_eq!(p128.unit(5), 10);
}

#[test]
fn edges_are_derived_from_center_and_half_width() {
    let p = plan("blob", 64);
    assert_eq!(p.left(), p.cx - p.bw);
    assert_eq!(p.right(), p.cx + p.bw);
    assert_eq!(p.bottom(), p.body_y + p.bh);
}
