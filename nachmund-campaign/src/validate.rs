//! Campaign rule checks for game records.
//!
//! Every rule is evaluated for every record; a record is never rejected on
//! its first defect, so one report lists everything wrong with it. Map
//! entries are checked in key order, which keeps the reported order stable.
use std::fmt::Write as _;

use thiserror::Error;

use crate::model::{GameRecord, Phase, Tag, Victor};

/// A single broken campaign rule within one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("phase cannot be more than {max}")]
    PhaseTooHigh { max: Phase },
    #[error("incorrect scale {raw:?}")]
    InvalidScale { raw: String },
    #[error("game must have only 2 players")]
    PlayerCount,
    #[error("game must have only 2 alliances")]
    AllianceCount,
    #[error("invalid alliance entry: {raw:?}")]
    InvalidAlliance { raw: String },
    #[error("game must have a 2 different alliances")]
    DuplicateAlliance,
    #[error("victor is required")]
    MissingVictor,
    #[error("invalid victor: {raw:?}")]
    InvalidVictor { raw: String },
    #[error("victor must be one of [{}] or {}", .alliances.join(" "), Victor::Draw)]
    VictorNotInGame { alliances: Vec<String> },
    #[error("bp_allocation must have 2 entries")]
    BpAllocationCount,
    #[error("bp_allocation should only mention alliances present in the game (found {alliance})")]
    BpAllocationOutsideGame { alliance: String },
    #[error("invalid location for bp_allocation for alliance {alliance}: {raw:?}")]
    InvalidBpLocation { alliance: String, raw: String },
    #[error("sap_gain should only mention alliances present in the game (found {alliance})")]
    SapGainOutsideGame { alliance: String },
    #[error("sap_allocation should only mention alliances that gained sap (found {alliance})")]
    SapAllocationWithoutGain { alliance: String },
    #[error("invalid location for sap_allocation for alliance {alliance}: {raw:?}")]
    InvalidSapLocation { alliance: String, raw: String },
    #[error("sap gained are unallocated for alliance {alliance}")]
    UnallocatedSap { alliance: String },
}

/// An invalid record together with every rule it breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{record}: [{}]", join_violations(.violations))]
pub struct GameError {
    record: GameRecord,
    violations: Vec<Violation>,
}

impl GameError {
    #[must_use]
    pub const fn record(&self) -> &GameRecord {
        &self.record
    }

    /// Violations in rule order; never empty.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[must_use]
    pub fn into_record(self) -> GameRecord {
        self.record
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every invalid record of a campaign, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", render_games(.0))]
pub struct CampaignErrors(Vec<GameError>);

impl CampaignErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameError> {
        self.0.iter()
    }

    #[must_use]
    pub fn games(&self) -> &[GameError] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a CampaignErrors {
    type Item = &'a GameError;
    type IntoIter = std::slice::Iter<'a, GameError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn render_games(games: &[GameError]) -> String {
    let mut out = String::new();
    for game in games {
        let _ = writeln!(out, "{game}");
    }
    out
}

/// Records split into the ones that passed and the report for the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: Vec<GameRecord>,
    pub errors: CampaignErrors,
}

impl ValidationOutcome {
    /// Whether every record passed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Treat any invalid record as a failure of the whole campaign.
    ///
    /// # Errors
    ///
    /// Returns the campaign report when at least one record is invalid.
    pub fn into_result(self) -> Result<Vec<GameRecord>, CampaignErrors> {
        if self.errors.is_empty() {
            Ok(self.valid)
        } else {
            Err(self.errors)
        }
    }
}

/// Check `record` against every campaign rule.
///
/// Returns `None` when the record is valid.
#[must_use]
pub fn validate_game(record: &GameRecord) -> Option<GameError> {
    let mut violations = Vec::new();

    check_shape(record, &mut violations);
    check_alliances(record, &mut violations);
    check_victor(record, &mut violations);
    check_bp_allocation(record, &mut violations);
    check_sap(record, &mut violations);

    if violations.is_empty() {
        None
    } else {
        Some(GameError {
            record: record.clone(),
            violations,
        })
    }
}

/// Validate each record independently, preserving input order.
pub fn validate_games<I>(records: I) -> ValidationOutcome
where
    I: IntoIterator<Item = GameRecord>,
{
    let mut outcome = ValidationOutcome::default();
    for record in records {
        match validate_game(&record) {
            Some(error) => {
                log::debug!("rejected {error}");
                outcome.errors.0.push(error);
            }
            None => outcome.valid.push(record),
        }
    }
    outcome
}

fn check_shape(record: &GameRecord, violations: &mut Vec<Violation>) {
    if record.phase > Phase::MAX {
        violations.push(Violation::PhaseTooHigh { max: Phase::MAX });
    }

    if !record.scale.is_known() {
        violations.push(Violation::InvalidScale {
            raw: record.scale.as_str().to_string(),
        });
    }

    if record.players.len() != 2 {
        violations.push(Violation::PlayerCount);
    }
}

fn check_alliances(record: &GameRecord, violations: &mut Vec<Violation>) {
    if record.alliances.len() != 2 {
        violations.push(Violation::AllianceCount);
    }

    for alliance in record.alliances.iter().filter(|tag| !tag.is_known()) {
        violations.push(Violation::InvalidAlliance {
            raw: alliance.as_str().to_string(),
        });
    }

    if matches!(record.alliances.as_slice(), [first, second, ..] if first == second) {
        violations.push(Violation::DuplicateAlliance);
    }
}

fn check_victor(record: &GameRecord, violations: &mut Vec<Violation>) {
    if record.victor.as_str().is_empty() {
        violations.push(Violation::MissingVictor);
    }

    if !record.victor.is_known() {
        violations.push(Violation::InvalidVictor {
            raw: record.victor.as_str().to_string(),
        });
    }

    let victor_in_game = match record.victor.known() {
        Some(Victor::Draw) => true,
        Some(victor) => victor
            .alliance()
            .is_some_and(|alliance| record.involves(&Tag::Known(alliance))),
        None => false,
    };
    if !victor_in_game {
        violations.push(Violation::VictorNotInGame {
            alliances: record
                .alliances
                .iter()
                .map(|alliance| alliance.as_str().to_string())
                .collect(),
        });
    }
}

fn check_bp_allocation(record: &GameRecord, violations: &mut Vec<Violation>) {
    if record.bp_allocation.len() != 2 {
        violations.push(Violation::BpAllocationCount);
    }

    for (alliance, location) in &record.bp_allocation {
        if !record.involves(alliance) {
            violations.push(Violation::BpAllocationOutsideGame {
                alliance: alliance.to_string(),
            });
        }
        if !location.is_known() {
            violations.push(Violation::InvalidBpLocation {
                alliance: alliance.to_string(),
                raw: location.as_str().to_string(),
            });
        }
    }
}

fn check_sap(record: &GameRecord, violations: &mut Vec<Violation>) {
    for alliance in record.sap_gain.keys() {
        if !record.involves(alliance) {
            violations.push(Violation::SapGainOutsideGame {
                alliance: alliance.to_string(),
            });
        }
    }

    for (alliance, location) in &record.sap_allocation {
        if !record.sap_gain.contains_key(alliance) {
            violations.push(Violation::SapAllocationWithoutGain {
                alliance: alliance.to_string(),
            });
        }
        if !location.is_known() {
            violations.push(Violation::InvalidSapLocation {
                alliance: alliance.to_string(),
                raw: location.as_str().to_string(),
            });
        }
    }

    for alliance in record.sap_gain.keys() {
        if !record.sap_allocation.contains_key(alliance) {
            violations.push(Violation::UnallocatedSap {
                alliance: alliance.to_string(),
            });
        }
    }
}
