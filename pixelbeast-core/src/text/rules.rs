//! Keyword vocabulary and priority rules.
//!
//! Everything that decides *which* flag, theme, size, tone or body archetype a description
//! resolves to is plain data in a [`RuleTable`]. Ordered rule lists are evaluated first-match
//! wins; the built-in table ([`RuleTable::default`]) carries a bilingual (Chinese/English)
//! vocabulary and can be replaced wholesale from JSON.

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use crate::foundation::error::{BeastError, BeastResult};

/// Boolean creature traits detected by keyword.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    Round,
    Tall,
    Fat,
    HasWings,
    HasHorns,
    IsCute,
    IsScary,
    HasTail,
    HasEars,
    IsRobot,
    IsGhost,
    HasFire,
    HasCrystals,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 13] = [
        Self::Round,
        Self::Tall,
        Self::Fat,
        Self::HasWings,
        Self::HasHorns,
        Self::IsCute,
        Self::IsScary,
        Self::HasTail,
        Self::HasEars,
        Self::IsRobot,
        Self::IsGhost,
        Self::HasFire,
        Self::HasCrystals,
    ];

    pub(crate) fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Color theme bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeCategory {
    Fire,
    Water,
    Nature,
    Magic,
    Gold,
    Random,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    Small,
    #[default]
    Medium,
    Large,
}

/// Timbre bucket used by the audio synthesizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneCategory {
    Scary,
    Cute,
    Magical,
    #[default]
    Neutral,
}

/// Mutually exclusive body shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyArchetype {
    Round,
    Robot,
    Ghost,
    #[default]
    Boxy,
}

/// Eye and mouth style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceStyle {
    Cute,
    Scary,
    #[default]
    Neutral,
}

/// Inclusive hue range in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HueRange {
    pub min: u16,
    pub max: u16,
}

impl HueRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub fn contains(self, hue: u16) -> bool {
        self.min <= hue && hue <= self.max
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThemeSpec {
    pub theme: ThemeCategory,
    pub hue: HueRange,
}

/// `result` applies when any keyword is a substring of the lowercased description.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeywordRule<T> {
    pub result: T,
    pub keywords: Vec<String>,
}

impl<T> KeywordRule<T> {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// `result` applies when flag `when` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FlagRule<T> {
    pub when: FeatureFlag,
    pub result: T,
}

/// First matching keyword rule, in list order.
pub fn first_keyword_match<T: Copy>(rules: &[KeywordRule<T>], lowered: &str) -> Option<T> {
    rules.iter().find(|r| r.matches(lowered)).map(|r| r.result)
}

/// First rule whose flag holds, in list order.
pub fn first_flag_match<T: Copy>(
    rules: &[FlagRule<T>],
    has: impl Fn(FeatureFlag) -> bool,
) -> Option<T> {
    rules.iter().find(|r| has(r.when)).map(|r| r.result)
}

/// Complete vocabulary and tie-break policy.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTable {
    pub flags: BTreeMap<FeatureFlag, Vec<String>>,
    pub themes: Vec<KeywordRule<ThemeSpec>>,
    /// Hue range used when no theme rule matches.
    pub fallback_hue: HueRange,
    pub sizes: Vec<KeywordRule<SizeCategory>>,
    pub tones: Vec<KeywordRule<ToneCategory>>,
    pub archetypes: Vec<FlagRule<BodyArchetype>>,
    pub faces: Vec<FlagRule<FaceStyle>>,
}

fn kw(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_owned()).collect()
}

fn theme(theme: ThemeCategory, min: u16, max: u16, words: &[&str]) -> KeywordRule<ThemeSpec> {
    KeywordRule {
        result: ThemeSpec {
            theme,
            hue: HueRange::new(min, max),
        },
        keywords: kw(words),
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        use FeatureFlag as F;

        let flags = BTreeMap::from([
            (
                F::Round,
                kw(&["球", "ball", "圆", "round", "史莱姆", "slime", "泡", "bubble"]),
            ),
            (F::Tall, kw(&["高", "tall", "长", "long", "瘦", "thin"])),
            (F::Fat, kw(&["胖", "fat", "宽", "wide", "大", "big"])),
            (
                F::HasWings,
                kw(&["翅膀", "wing", "飞", "fly", "天使", "angel"]),
            ),
            (F::HasHorns, kw(&["角", "horn", "恶魔", "demon", "牛", "bull"])),
            (F::IsCute, kw(&["可爱", "cute", "萌", "kawaii", "小", "small"])),
            (
                F::IsScary,
                kw(&["恐怖", "scary", "可怕", "horror", "邪恶", "evil"]),
            ),
            (F::HasTail, kw(&["尾巴", "tail", "龙", "dragon"])),
            (F::HasEars, kw(&["耳朵", "ear", "兔", "rabbit", "猫", "cat"])),
            (F::IsRobot, kw(&["机器", "robot", "机械", "mechanical"])),
            (F::IsGhost, kw(&["幽灵", "ghost", "鬼", "spirit"])),
            (F::HasFire, kw(&["火", "fire", "焰", "flame"])),
            (F::HasCrystals, kw(&["水晶", "crystal", "宝石", "gem"])),
        ]);

        Self {
            flags,
            themes: vec![
                theme(ThemeCategory::Fire, 0, 30, &["火", "fire", "红", "red", "热"]),
                theme(
                    ThemeCategory::Water,
                    180,
                    240,
                    &["水", "water", "蓝", "blue", "冰", "ice"],
                ),
                theme(
                    ThemeCategory::Nature,
                    90,
                    150,
                    &["草", "grass", "绿", "green", "森林", "forest"],
                ),
                theme(
                    ThemeCategory::Magic,
                    270,
                    300,
                    &["紫", "purple", "魔", "magic", "暗", "dark"],
                ),
                theme(
                    ThemeCategory::Gold,
                    40,
                    60,
                    &["金", "gold", "黄", "yellow", "光", "light"],
                ),
            ],
            fallback_hue: HueRange::new(0, 360),
            sizes: vec![
                KeywordRule {
                    result: SizeCategory::Large,
                    keywords: kw(&["big", "large", "giant", "大", "巨"]),
                },
                KeywordRule {
                    result: SizeCategory::Small,
                    keywords: kw(&["small", "tiny", "little", "小", "迷你"]),
                },
            ],
            tones: vec![
                KeywordRule {
                    result: ToneCategory::Scary,
                    keywords: kw(&["scary", "monster", "evil", "恐怖", "邪恶", "怪物"]),
                },
                KeywordRule {
                    result: ToneCategory::Cute,
                    keywords: kw(&["cute", "friendly", "happy", "可爱", "友好", "快乐"]),
                },
                KeywordRule {
                    result: ToneCategory::Magical,
                    keywords: kw(&["magical", "mystic", "mysterious", "魔法", "神秘"]),
                },
            ],
            archetypes: vec![
                FlagRule {
                    when: F::Round,
                    result: BodyArchetype::Round,
                },
                FlagRule {
                    when: F::IsRobot,
                    result: BodyArchetype::Robot,
                },
                FlagRule {
                    when: F::IsGhost,
                    result: BodyArchetype::Ghost,
                },
            ],
            faces: vec![
                FlagRule {
                    when: F::IsCute,
                    result: FaceStyle::Cute,
                },
                FlagRule {
                    when: F::IsScary,
                    result: FaceStyle::Scary,
                },
            ],
        }
    }
}

impl RuleTable {
    /// Parse a rule table from a JSON reader. Keywords are lowercased on load.
    pub fn from_reader<R: std::io::Read>(r: R) -> BeastResult<Self> {
        let table: Self = serde_json::from_reader(r)
            .map_err(|e| BeastError::validation(format!("parse rule table JSON: {e}")))?;
        let table = table.lowercased();
        table.validate()?;
        Ok(table)
    }

    /// Parse a rule table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BeastResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BeastError::validation(format!("open rule table '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> BeastResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BeastError::serde(e.to_string()))
    }

    pub fn keywords_for(&self, flag: FeatureFlag) -> &[String] {
        self.flags.get(&flag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn validate(&self) -> BeastResult<()> {
        let keyword_lists = self
            .flags
            .iter()
            .map(|(flag, words)| (format!("flag {flag:?}"), words))
            .chain(
                self.themes
                    .iter()
                    .map(|r| (format!("theme {:?}", r.result.theme), &r.keywords)),
            )
            .chain(
                self.sizes
                    .iter()
                    .map(|r| (format!("size {:?}", r.result), &r.keywords)),
            )
            .chain(
                self.tones
                    .iter()
                    .map(|r| (format!("tone {:?}", r.result), &r.keywords)),
            );
        for (what, words) in keyword_lists {
            if words.iter().any(|w| w.is_empty()) {
                return Err(BeastError::validation(format!(
                    "{what}: keywords must be non-empty strings"
                )));
            }
        }

        for hue in self
            .themes
            .iter()
            .map(|r| r.result.hue)
            .chain(std::iter::once(self.fallback_hue))
        {
            if hue.min > hue.max || hue.max > 360 {
                return Err(BeastError::validation(format!(
                    "hue range {}..={} must satisfy min <= max <= 360",
                    hue.min, hue.max
                )));
            }
        }
        if self
            .themes
            .iter()
            .any(|r| r.result.theme == ThemeCategory::Random)
        {
            return Err(BeastError::validation(
                "theme 'random' is the fallback and cannot be a keyword rule",
            ));
        }
        Ok(())
    }

    fn lowercased(mut self) -> Self {
        let lower = |words: &mut Vec<String>| {
            for w in words.iter_mut() {
                *w = w.to_lowercase();
            }
        };
        self.flags.values_mut().for_each(lower);
        self.themes.iter_mut().for_each(|r| lower(&mut r.keywords));
        self.sizes.iter_mut().for_each(|r| lower(&mut r.keywords));
        self.tones.iter_mut().for_each(|r| lower(&mut r.keywords));
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/rules.rs"]
mod tests;
