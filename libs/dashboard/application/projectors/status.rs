//! Status projector

use crate::application::display::{DisplayPort, StatusView};
use crate::application::format::{currency, yes_no};
use crate::domain::StatusUpdate;

use super::stakes::stake_ladder;

/// Displayed martingale round: losses in a row plus one, 1 when unknown
pub fn round_of(consecutive_losses: Option<u32>) -> u32 {
    consecutive_losses.map_or(1, |losses| losses.saturating_add(1))
}

pub fn status_view(update: &StatusUpdate) -> StatusView {
    StatusView {
        market: update
            .market
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "--".to_string()),
        authorized: yes_no(update.authorized.unwrap_or(false)).to_string(),
        trading: yes_no(update.is_trading.unwrap_or(false)).to_string(),
        round: round_of(update.consecutive_losses),
        current_stake: currency(update.current_stake.unwrap_or(0.0)),
    }
}

/// Replace the status panel and rebuild the stake ladder
pub fn project_status(update: &StatusUpdate, display: &mut dyn DisplayPort) {
    display.update_status(&status_view(update));

    let active = update.consecutive_losses.map(|losses| losses as usize);
    display.update_stakes(&stake_ladder(&update.stakes, active));
}
