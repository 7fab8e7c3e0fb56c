use clap::ValueEnum;
use nachmund_campaign::{Alliance, Keyword, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PhaseFilter {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    #[value(name = "3")]
    Three,
    /// Every phase (short: a)
    #[value(alias = "a")]
    All,
}

impl PhaseFilter {
    pub fn phases(self) -> Vec<Phase> {
        match self {
            Self::One => vec![Phase::ONE],
            Self::Two => vec![Phase::TWO],
            Self::Three => vec![Phase::THREE],
            Self::All => Phase::KNOWN.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AllianceFilter {
    /// Every alliance (short: a)
    #[value(alias = "a")]
    All,
    /// Short: g
    #[value(alias = "g")]
    Guardians,
    /// Short: d
    #[value(alias = "d")]
    Despoilers,
    /// Short: m
    #[value(alias = "m")]
    Marauders,
}

impl AllianceFilter {
    pub fn alliances(self) -> Vec<Alliance> {
        match self {
            Self::All => Alliance::ALL.to_vec(),
            Self::Guardians => vec![Alliance::Guardians],
            Self::Despoilers => vec![Alliance::Despoilers],
            Self::Marauders => vec![Alliance::Marauders],
        }
    }
}

/// Phases and alliances a report should cover, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub phases: Vec<Phase>,
    pub alliances: Vec<Alliance>,
}

impl Selection {
    pub fn new(phase: PhaseFilter, alliance: AllianceFilter) -> Self {
        Self {
            phases: phase.phases(),
            alliances: alliance.alliances(),
        }
    }
}
