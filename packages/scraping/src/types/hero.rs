//! Hero record types - raw per-source records and merged canonical records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Competitive-strength grade letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'S' => Some(Grade::S),
            'A' => Some(Grade::A),
            'B' => Some(Grade::B),
            'C' => Some(Grade::C),
            'D' => Some(Grade::D),
            'F' => Some(Grade::F),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Grade::S => 'S',
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }
}

/// Optional `+` / `-` suffix on a tier grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierModifier {
    Plus,
    Minus,
}

impl TierModifier {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(TierModifier::Plus),
            '-' => Some(TierModifier::Minus),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            TierModifier::Plus => '+',
            TierModifier::Minus => '-',
        }
    }
}

/// A hero's tier rating.
///
/// Modeled as a tagged variant rather than a sentinel string so the
/// merge rule "never overwrite a known tier with Unknown" is checked
/// by the type, not by string comparison. The string form round-trips
/// (`"S+"`, `"B"`, `"Unknown"`) and is what gets serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tier {
    Known(Grade, Option<TierModifier>),
    #[default]
    Unknown,
}

impl Tier {
    /// Parse a tier label leniently. Anything that is not a grade
    /// letter with an optional `+`/`-` suffix comes back as `Unknown`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let mut chars = s.chars();
        let grade = match chars.next().and_then(Grade::from_char) {
            Some(g) => g,
            None => return Tier::Unknown,
        };
        match chars.next() {
            None => Tier::Known(grade, None),
            Some(c) => match (TierModifier::from_char(c), chars.next()) {
                (Some(m), None) => Tier::Known(grade, Some(m)),
                _ => Tier::Unknown,
            },
        }
    }

    /// Whether this tier carries a real grade.
    pub fn is_known(self) -> bool {
        matches!(self, Tier::Known(..))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Known(grade, modifier) => {
                write!(f, "{}", grade.as_char())?;
                if let Some(m) = modifier {
                    write!(f, "{}", m.as_char())?;
                }
                Ok(())
            }
            Tier::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Tier::parse(&s))
    }
}

/// A recommended item build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub name: String,
    pub items: Vec<String>,
}

/// A recommended emblem setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emblem {
    pub name: String,
    pub talents: Vec<String>,
}

/// Balance changes for one patch version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchNote {
    pub version: String,
    pub changes: Vec<String>,
}

/// Minimal per-hero stub from a listing page.
///
/// `link` is source-internal and never reaches canonical data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroStub {
    pub name: String,
    pub link: String,
    pub role: Vec<String>,
}

impl HeroStub {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            role: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: Vec<String>) -> Self {
        self.role = role;
        self
    }

    /// Degrade to a record carrying only what the listing gave us.
    /// Used when the detail fetch for this hero fails.
    pub fn into_record(self) -> HeroRecord {
        HeroRecord {
            name: self.name,
            role: self.role,
            ..HeroRecord::default()
        }
    }
}

/// One source's extracted data for one hero.
///
/// Created fresh each run and discarded after the merge. The source
/// tag is applied by the aggregator, not carried here, so an extractor
/// cannot mislabel its own output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroRecord {
    pub name: String,
    #[serde(default)]
    pub role: Vec<String>,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub counters: Vec<String>,
    #[serde(default)]
    pub builds: Vec<Build>,
    #[serde(default)]
    pub emblems: Vec<Emblem>,
    #[serde(default)]
    pub patch_changes: Vec<PatchNote>,
}

impl HeroRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The merged, cross-source record for one hero. Exactly one exists
/// per case-insensitive name per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalHero {
    pub name: String,
    pub role: Vec<String>,
    pub tier: Tier,
    pub counters: Vec<String>,
    pub builds: Vec<Build>,
    pub emblems: Vec<Emblem>,
    pub patch_changes: Vec<PatchNote>,
    /// Extractors that contributed to this record, in first-appearance order.
    #[serde(default)]
    pub sources: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl CanonicalHero {
    /// Storage key: lowercase display name, whitespace runs joined with `-`.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Derive the storage slug for a hero display name.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parses_plain_grades() {
        assert_eq!(Tier::parse("S"), Tier::Known(Grade::S, None));
        assert_eq!(Tier::parse("b"), Tier::Known(Grade::B, None));
        assert_eq!(Tier::parse(" F "), Tier::Known(Grade::F, None));
    }

    #[test]
    fn tier_parses_modifiers() {
        assert_eq!(
            Tier::parse("S+"),
            Tier::Known(Grade::S, Some(TierModifier::Plus))
        );
        assert_eq!(
            Tier::parse("a-"),
            Tier::Known(Grade::A, Some(TierModifier::Minus))
        );
    }

    #[test]
    fn tier_rejects_garbage() {
        assert_eq!(Tier::parse("Unknown"), Tier::Unknown);
        assert_eq!(Tier::parse(""), Tier::Unknown);
        assert_eq!(Tier::parse("SS"), Tier::Unknown);
        assert_eq!(Tier::parse("X+"), Tier::Unknown);
        assert_eq!(Tier::parse("S++"), Tier::Unknown);
    }

    #[test]
    fn tier_round_trips_through_strings() {
        for label in ["S", "S+", "A-", "C", "Unknown"] {
            assert_eq!(Tier::parse(label).to_string(), label);
        }
    }

    #[test]
    fn tier_serializes_as_string() {
        let json = serde_json::to_string(&Tier::parse("S+")).unwrap();
        assert_eq!(json, "\"S+\"");
        let back: Tier = serde_json::from_str("\"Unknown\"").unwrap();
        assert_eq!(back, Tier::Unknown);
    }

    #[test]
    fn slugs_join_whitespace_runs() {
        assert_eq!(slugify("Chou"), "chou");
        assert_eq!(slugify("Luo Yi"), "luo-yi");
        assert_eq!(slugify("Popol and  Kupa"), "popol-and-kupa");
        assert_eq!(slugify("Yi Sun-shin"), "yi-sun-shin");
    }

    #[test]
    fn stub_degrades_to_record() {
        let stub = HeroStub::new("Chou", "/wiki/Chou").with_role(vec!["Fighter".into()]);
        let record = stub.into_record();
        assert_eq!(record.name, "Chou");
        assert_eq!(record.role, vec!["Fighter"]);
        assert_eq!(record.tier, Tier::Unknown);
        assert!(record.builds.is_empty());
    }
}
