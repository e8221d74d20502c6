use crate::text::rules::{
    FeatureFlag, RuleTable, SizeCategory, ThemeCategory, ThemeSpec, ToneCategory,
    first_keyword_match,
};

/// Everything keyword matching extracts from one description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureSet {
    flags: u16,
    pub theme: ThemeSpec,
    pub size: SizeCategory,
    pub tone: ToneCategory,
}

impl FeatureSet {
    pub fn has(&self, flag: FeatureFlag) -> bool {
        self.flags & flag.bit() != 0
    }

    pub fn theme_category(&self) -> ThemeCategory {
        self.theme.theme
    }

    /// Set flags in declaration order.
    pub fn flags(&self) -> impl Iterator<Item = FeatureFlag> + '_ {
        FeatureFlag::ALL.into_iter().filter(|f| self.has(*f))
    }

    pub fn with_flag(mut self, flag: FeatureFlag, on: bool) -> Self {
        if on {
            self.flags |= flag.bit();
        } else {
            self.flags &= !flag.bit();
        }
        self
    }
}

/// Extract flags and categories from `description`. Pure; case-insensitive substring match.
pub fn extract_features(description: &str, rules: &RuleTable) -> FeatureSet {
    let lowered = description.to_lowercase();

    let flags = rules
        .flags
        .iter()
        .filter(|(_, words)| words.iter().any(|w| lowered.contains(w.as_str())))
        .fold(0u16, |acc, (flag, _)| acc | flag.bit());

    let theme = first_keyword_match(&rules.themes, &lowered).unwrap_or(ThemeSpec {
        theme: ThemeCategory::Random,
        hue: rules.fallback_hue,
    });
    let size = first_keyword_match(&rules.sizes, &lowered).unwrap_or_default();
    let tone = first_keyword_match(&rules.tones, &lowered).unwrap_or_default();

    FeatureSet {
        flags,
        theme,
        size,
        tone,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/features.rs"]
mod tests;
