//! Nachmund Campaign Engine
//!
//! Platform-agnostic rules for a three-phase, three-alliance campaign.
//! This crate validates game records and folds them into battle point and
//! strategic asset point totals; decoding files and rendering results are
//! left to the caller.

pub mod model;
pub mod results;
pub mod scoring;
pub mod validate;

// Re-export commonly used types
pub use model::{Alliance, GameRecord, Keyword, Location, Phase, Scale, Tag, Victor};
pub use results::{AllianceResults, LocationTotals, PhaseResults, Results};
pub use scoring::{BattlePointTable, battle_points_for, sap_gain_for};
pub use validate::{
    CampaignErrors, GameError, ValidationOutcome, Violation, validate_game, validate_games,
};

/// Trait for abstracting where game records come from
/// Platform-specific implementations should provide this
pub trait CampaignSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every game record of the campaign, in file order
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read or decoded.
    fn load_records(&self) -> Result<Vec<GameRecord>, Self::Error>;
}

/// Totals computed from the valid records, plus the report for the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignReport {
    pub results: Results,
    pub errors: CampaignErrors,
}

impl CampaignReport {
    /// Whether every record contributed to the totals.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Drives a campaign source through validation and aggregation
#[derive(Debug)]
pub struct CampaignTracker<S>
where
    S: CampaignSource,
{
    source: S,
}

impl<S> CampaignTracker<S>
where
    S: CampaignSource,
{
    /// Create a tracker reading from `source`
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Load and validate every record
    ///
    /// # Errors
    ///
    /// Returns the source error unchanged if the records cannot be loaded.
    pub fn validate(&self) -> Result<ValidationOutcome, S::Error> {
        let records = self.source.load_records()?;
        log::info!("loaded {} game records", records.len());
        Ok(validate_games(records))
    }

    /// Load, validate and total the campaign
    ///
    /// Invalid records are left out of the totals and listed in the report.
    ///
    /// # Errors
    ///
    /// Returns the source error unchanged if the records cannot be loaded.
    pub fn evaluate(&self) -> Result<CampaignReport, S::Error> {
        let ValidationOutcome { valid, errors } = self.validate()?;
        if !errors.is_empty() {
            log::info!("{} invalid records left out of the totals", errors.len());
        }
        Ok(CampaignReport {
            results: Results::aggregate(&valid),
            errors,
        })
    }
}
