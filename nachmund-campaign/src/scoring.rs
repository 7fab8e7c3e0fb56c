//! Battle point awards by game scale and outcome.
use crate::model::{Alliance, GameRecord, Scale, Tag, Victor};

/// Battle points awarded for each outcome at one game scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattlePointTable {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl BattlePointTable {
    /// Fixed award table for `scale`.
    #[must_use]
    pub const fn for_scale(scale: Scale) -> Self {
        match scale {
            Scale::Incursion => Self {
                win: 2,
                draw: 2,
                loss: 1,
            },
            Scale::StrikeForce => Self {
                win: 3,
                draw: 2,
                loss: 1,
            },
            Scale::Onslaught => Self {
                win: 4,
                draw: 3,
                loss: 2,
            },
        }
    }
}

/// Battle points `alliance` earns from a game won by `victor` at `scale`.
#[must_use]
pub fn battle_points_for(alliance: Alliance, victor: Victor, scale: Scale) -> u32 {
    let table = BattlePointTable::for_scale(scale);
    match victor.alliance() {
        None => table.draw,
        Some(winner) if winner == alliance => table.win,
        Some(_) => table.loss,
    }
}

/// Strategic asset points `alliance` recorded in `record`, zero when absent.
#[must_use]
pub fn sap_gain_for(record: &GameRecord, alliance: Alliance) -> u32 {
    record
        .sap_gain
        .get(&Tag::Known(alliance))
        .copied()
        .unwrap_or(0)
}
