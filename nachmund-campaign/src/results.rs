//! Per-phase, per-alliance, per-location campaign totals.
//!
//! Totals only ever grow: folding a game adds its awards to independent
//! counters, so the order in which games are folded does not matter.
use std::collections::BTreeMap;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::model::{Alliance, GameRecord, Location, Phase, Tag};
use crate::scoring::{battle_points_for, sap_gain_for};

/// Points credited to each map location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTotals {
    pub tower: u32,
    pub spaceport: u32,
    pub battery: u32,
    pub bastion: u32,
}

impl LocationTotals {
    /// Credit `points` to `location`.
    pub fn credit(&mut self, location: Location, points: u32) {
        let counter = match location {
            Location::Tower => &mut self.tower,
            Location::Spaceport => &mut self.spaceport,
            Location::Battery => &mut self.battery,
            Location::Bastion => &mut self.bastion,
        };
        *counter = counter.saturating_add(points);
    }

    #[must_use]
    pub const fn get(&self, location: Location) -> u32 {
        match location {
            Location::Tower => self.tower,
            Location::Spaceport => self.spaceport,
            Location::Battery => self.battery,
            Location::Bastion => self.bastion,
        }
    }

    /// Sum over all four locations.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.tower
            .saturating_add(self.spaceport)
            .saturating_add(self.battery)
            .saturating_add(self.bastion)
    }
}

impl Add for LocationTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            tower: self.tower.saturating_add(other.tower),
            spaceport: self.spaceport.saturating_add(other.spaceport),
            battery: self.battery.saturating_add(other.battery),
            bastion: self.bastion.saturating_add(other.bastion),
        }
    }
}

/// Battle point and strategic asset point totals for one alliance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllianceResults {
    pub bp: LocationTotals,
    pub sap: LocationTotals,
}

impl Add for AllianceResults {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            bp: self.bp + other.bp,
            sap: self.sap + other.sap,
        }
    }
}

/// Totals of all three alliances within one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResults {
    pub guardians: AllianceResults,
    pub despoilers: AllianceResults,
    pub marauders: AllianceResults,
}

impl PhaseResults {
    #[must_use]
    pub const fn alliance(&self, alliance: Alliance) -> &AllianceResults {
        match alliance {
            Alliance::Guardians => &self.guardians,
            Alliance::Despoilers => &self.despoilers,
            Alliance::Marauders => &self.marauders,
        }
    }

    pub const fn alliance_mut(&mut self, alliance: Alliance) -> &mut AllianceResults {
        match alliance {
            Alliance::Guardians => &mut self.guardians,
            Alliance::Despoilers => &mut self.despoilers,
            Alliance::Marauders => &mut self.marauders,
        }
    }

    /// Add the awards of one game to these totals.
    ///
    /// Entries that are not recognised keywords are skipped; validated
    /// records never contain any.
    #[must_use]
    pub fn fold_game(mut self, record: &GameRecord) -> Self {
        let (Some(victor), Some(scale)) = (record.victor.known(), record.scale.known()) else {
            log::debug!("skipping BP for {record}: unrecognised victor or scale");
            return self.fold_sap(record);
        };

        for alliance in record.alliances.iter().filter_map(Tag::known) {
            if let Some(location) = allocated_location(&record.bp_allocation, alliance) {
                let points = battle_points_for(alliance, victor, scale);
                self.alliance_mut(alliance).bp.credit(location, points);
            }
        }

        self.fold_sap(record)
    }

    fn fold_sap(mut self, record: &GameRecord) -> Self {
        for alliance in record.alliances.iter().filter_map(Tag::known) {
            if let Some(location) = allocated_location(&record.sap_allocation, alliance) {
                let points = sap_gain_for(record, alliance);
                self.alliance_mut(alliance).sap.credit(location, points);
            }
        }
        self
    }
}

fn allocated_location(
    allocation: &BTreeMap<Tag<Alliance>, Tag<Location>>,
    alliance: Alliance,
) -> Option<Location> {
    allocation.get(&Tag::Known(alliance)).and_then(Tag::known)
}

impl Add for PhaseResults {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            guardians: self.guardians + other.guardians,
            despoilers: self.despoilers + other.despoilers,
            marauders: self.marauders + other.marauders,
        }
    }
}

/// Campaign totals keyed by phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Results {
    phases: BTreeMap<Phase, PhaseResults>,
}

impl Default for Results {
    fn default() -> Self {
        Self::new()
    }
}

impl Results {
    /// Zeroed totals for every known phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phases: Phase::KNOWN
                .into_iter()
                .map(|phase| (phase, PhaseResults::default()))
                .collect(),
        }
    }

    /// Fold every record into the totals of its phase.
    ///
    /// Records declaring a phase outside the known ones have no bucket and
    /// are dropped.
    #[must_use]
    pub fn aggregate<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a GameRecord>,
    {
        let mut results = Self::new();
        for record in records {
            results.fold_game(record);
        }
        results
    }

    fn fold_game(&mut self, record: &GameRecord) {
        match self.phases.get_mut(&record.phase) {
            Some(bucket) => *bucket = bucket.fold_game(record),
            None => log::debug!("dropping {record}: phase {} is not tracked", record.phase),
        }
    }

    #[must_use]
    pub fn phase(&self, phase: Phase) -> Option<&PhaseResults> {
        self.phases.get(&phase)
    }

    /// Phases in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &PhaseResults)> {
        self.phases.iter().map(|(phase, results)| (*phase, results))
    }

    /// Elementwise sum of two sets of totals.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (phase, results) in other.phases {
            let bucket = self.phases.entry(phase).or_default();
            *bucket = *bucket + results;
        }
        self
    }
}
