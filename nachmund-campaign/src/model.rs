//! Campaign vocabulary and the shape of a single game record.
//!
//! Every keyword the campaign file uses (scales, alliances, locations, the
//! victor) is a closed enum. Raw input is carried through [`Tag`], which keeps
//! unrecognised text around so the validator can report it verbatim while
//! scoring code only ever matches on the closed enums.
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A closed set of keywords with a canonical spelling in campaign files.
pub trait Keyword: Copy + Eq + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Canonical spelling as written in campaign files.
    fn as_str(self) -> &'static str;
}

/// Campaign phase identifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Phase(pub i64);

impl Phase {
    pub const ONE: Self = Self(1);
    pub const TWO: Self = Self(2);
    pub const THREE: Self = Self(3);

    /// Phases the campaign tracks results for.
    pub const KNOWN: [Self; 3] = [Self::ONE, Self::TWO, Self::THREE];

    /// Highest phase a record may declare.
    pub const MAX: Self = Self::THREE;

    #[must_use]
    pub fn is_known(self) -> bool {
        Self::KNOWN.contains(&self)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Size of a game, which selects the battle point table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    Incursion,
    StrikeForce,
    Onslaught,
}

impl Keyword for Scale {
    const ALL: &'static [Self] = &[Self::Incursion, Self::StrikeForce, Self::Onslaught];

    fn as_str(self) -> &'static str {
        match self {
            Self::Incursion => "incursion",
            Self::StrikeForce => "strike_force",
            Self::Onslaught => "onslaught",
        }
    }
}

/// One of the three factions competing in the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alliance {
    Guardians,
    Despoilers,
    Marauders,
}

impl Alliance {
    /// Human-facing name used in reports.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Guardians => "Guardians",
            Self::Despoilers => "Despoilers",
            Self::Marauders => "Marauders",
        }
    }
}

impl Keyword for Alliance {
    const ALL: &'static [Self] = &[Self::Guardians, Self::Despoilers, Self::Marauders];

    fn as_str(self) -> &'static str {
        match self {
            Self::Guardians => "guardians",
            Self::Despoilers => "despoilers",
            Self::Marauders => "marauders",
        }
    }
}

/// Map zone that BP and SAP awards are credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Tower,
    Spaceport,
    Battery,
    Bastion,
}

impl Keyword for Location {
    const ALL: &'static [Self] = &[Self::Tower, Self::Spaceport, Self::Battery, Self::Bastion];

    fn as_str(self) -> &'static str {
        match self {
            Self::Tower => "tower",
            Self::Spaceport => "spaceport",
            Self::Battery => "battery",
            Self::Bastion => "bastion",
        }
    }
}

/// Outcome of a game: a winning alliance or a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Victor {
    Guardians,
    Despoilers,
    Marauders,
    Draw,
}

impl Victor {
    /// The winning alliance, or `None` for a draw.
    #[must_use]
    pub const fn alliance(self) -> Option<Alliance> {
        match self {
            Self::Guardians => Some(Alliance::Guardians),
            Self::Despoilers => Some(Alliance::Despoilers),
            Self::Marauders => Some(Alliance::Marauders),
            Self::Draw => None,
        }
    }
}

impl From<Alliance> for Victor {
    fn from(alliance: Alliance) -> Self {
        match alliance {
            Alliance::Guardians => Self::Guardians,
            Alliance::Despoilers => Self::Despoilers,
            Alliance::Marauders => Self::Marauders,
        }
    }
}

impl Keyword for Victor {
    const ALL: &'static [Self] = &[
        Self::Guardians,
        Self::Despoilers,
        Self::Marauders,
        Self::Draw,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Guardians => "guardians",
            Self::Despoilers => "despoilers",
            Self::Marauders => "marauders",
            Self::Draw => "DRAW",
        }
    }
}

macro_rules! keyword_display {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

keyword_display!(Scale, Alliance, Location, Victor);

/// A keyword as read from input: either recognised or kept as raw text.
///
/// Tags compare, order and hash by their text, so maps keyed by tags iterate
/// in lexicographic order of the identifiers.
#[derive(Debug, Clone)]
pub enum Tag<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: Keyword> Tag<T> {
    /// Resolve raw text against the keyword set.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        T::ALL
            .iter()
            .copied()
            .find(|keyword| keyword.as_str() == raw)
            .map_or_else(|| Self::Unrecognized(raw.to_string()), Self::Known)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(keyword) => keyword.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }

    /// The recognised keyword, if any.
    #[must_use]
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(keyword) => Some(*keyword),
            Self::Unrecognized(_) => None,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl<T> Default for Tag<T> {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl<T: Keyword> From<T> for Tag<T> {
    fn from(keyword: T) -> Self {
        Self::Known(keyword)
    }
}

impl<T: Keyword> PartialEq for Tag<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: Keyword> Eq for Tag<T> {}

impl<T: Keyword> PartialOrd for Tag<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Keyword> Ord for Tag<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<T: Keyword> Hash for Tag<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<T: Keyword> fmt::Display for Tag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Keyword> Serialize for Tag<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: Keyword> Deserialize<'de> for Tag<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// One played match, exactly as recorded in the campaign file.
///
/// Missing fields decode to their zero value so that incomplete records are
/// reported by the validator instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRecord {
    pub date: String,
    pub phase: Phase,
    pub scale: Tag<Scale>,
    pub mission: String,
    pub players: Vec<String>,
    pub alliances: Vec<Tag<Alliance>>,
    /// Either a participating alliance or `DRAW`.
    pub victor: Tag<Victor>,
    pub sap_gain: BTreeMap<Tag<Alliance>, u32>,
    pub bp_allocation: BTreeMap<Tag<Alliance>, Tag<Location>>,
    pub sap_allocation: BTreeMap<Tag<Alliance>, Tag<Location>>,
}

impl GameRecord {
    /// Whether `alliance` is one of the two sides of this game.
    #[must_use]
    pub fn involves(&self, alliance: &Tag<Alliance>) -> bool {
        self.alliances.contains(alliance)
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "game on {}, mission {} between [{}]",
            self.date,
            self.mission,
            self.players.join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_resolve_canonical_spellings() {
        assert_eq!(Tag::<Scale>::parse("strike_force").known(), Some(Scale::StrikeForce));
        assert_eq!(Tag::<Victor>::parse("DRAW").known(), Some(Victor::Draw));
        assert_eq!(Tag::<Victor>::parse("draw").known(), None);
        assert_eq!(Tag::<Location>::parse("").as_str(), "");
    }

    #[test]
    fn tags_order_by_identifier_text() {
        let mut tags: Vec<Tag<Alliance>> = vec![
            Alliance::Marauders.into(),
            Tag::parse("orks"),
            Alliance::Guardians.into(),
            Alliance::Despoilers.into(),
        ];
        tags.sort();
        let order: Vec<&str> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(order, ["despoilers", "guardians", "marauders", "orks"]);
    }

    #[test]
    fn victor_maps_back_to_alliance() {
        for alliance in Alliance::ALL {
            assert_eq!(Victor::from(*alliance).alliance(), Some(*alliance));
            assert_eq!(Victor::from(*alliance).as_str(), alliance.as_str());
        }
        assert_eq!(Victor::Draw.alliance(), None);
    }

    #[test]
    fn known_phases_are_one_to_three() {
        assert!(Phase(2).is_known());
        assert!(!Phase(0).is_known());
        assert!(!Phase(4).is_known());
    }

    #[test]
    fn record_display_names_players() {
        let record = GameRecord {
            date: "2024-05-01".to_string(),
            mission: "Purge".to_string(),
            players: vec!["Alice".to_string(), "Bob".to_string()],
            ..GameRecord::default()
        };
        assert_eq!(
            record.to_string(),
            "game on 2024-05-01, mission Purge between [Alice Bob]"
        );
    }
}
