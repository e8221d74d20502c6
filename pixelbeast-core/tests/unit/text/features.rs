use super::*;

fn extract(s: &str) -> FeatureSet {
    extract_features(s, &RuleTable::default())
}

#[test]
fn dragon_has_tail_and_large_scary_tone() {
    let f = extract("giant scary dragon");
    assert!(f.has(FeatureFlag::HasTail));
    assert!(f.has(FeatureFlag::IsScary));
    assert!(!f.has(FeatureFlag::Round));
    assert!(!f.has(FeatureFlag::IsRobot));
    assert!(!f.has(FeatureFlag::IsGhost));
    assert_eq!(f.size, SizeCategory::Large);
    assert_eq!(f.tone, ToneCategory::Scary);
}

#[test]
fn matching_is_case_insensitive() {
    let f = extract("A ROUND Robot");
    assert!(f.has(FeatureFlag::Round));
    assert!(f.has(FeatureFlag::IsRobot));
}

#[test]
fn chinese_keywords_match() {
    let f = extract("可爱的小火龙");
    assert!(f.has(FeatureFlag::IsCute));
    assert!(f.has(FeatureFlag::HasFire));
    assert!(f.has(FeatureFlag::HasTail));
    assert_eq!(f.theme_category(), ThemeCategory::Fire);
    assert_eq!(f.size, SizeCategory::Small);
    assert_eq!(f.tone, ToneCategory::Cute);
}

#[test]
fn empty_description_is_generic() {
    let f = extract("");
    assert_eq!(f.flags().count(), 0);
    assert_eq!(f.size, SizeCategory::Medium);
    assert_eq!(f.tone, ToneCategory::Neutral);
    assert_eq!(f.theme_category(), ThemeCategory::Random);
    assert_eq!(f.theme.hue.min, 0);
    assert_eq!(f.theme.hue.max, 360);
}

#[test]
fn large_beats_small_when_both_present() {
    let f = extract("big small thing");
    assert_eq!(f.size, SizeCategory::Large);
}

#[test]
fn with_flag_toggles() {
    let f = extract("").with_flag(FeatureFlag::HasWings, true);
    assert!(f.has(FeatureFlag::HasWings));
    assert!(!f.with_flag(FeatureFlag::HasWings, false).has(FeatureFlag::HasWings));
}

#[test]
fn extraction_is_pure() {
    assert_eq!(extract("blue ghost cat"), extract("blue ghost cat"));
}

#[test]
fn keywords_are_substring_matches() {
    let f = extract("thing");
    assert!(f.has(FeatureFlag::Tall));
    assert!(!f.has(FeatureFlag::Fat));
}
