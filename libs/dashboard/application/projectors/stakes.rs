//! Stake ladder renderer

use crate::application::display::StakeCell;

/// Rebuild the ladder: one cell per stake, the cell at `active` marked
///
/// An index outside the ladder marks nothing.
pub fn stake_ladder(stakes: &[f64], active: Option<usize>) -> Vec<StakeCell> {
    stakes
        .iter()
        .enumerate()
        .map(|(i, stake)| StakeCell {
            round: i + 1,
            amount: format!("{:.2}", stake),
            active: active == Some(i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAKES: [f64; 4] = [0.35, 0.60, 1.61, 4.34];

    #[test]
    fn test_ladder_cells() {
        let ladder = stake_ladder(&STAKES, Some(2));
        assert_eq!(ladder.len(), 4);
        assert_eq!(ladder[0].round, 1);
        assert_eq!(ladder[0].amount, "0.35");
        assert_eq!(ladder[1].amount, "0.60");

        let active: Vec<_> = ladder.iter().filter(|c| c.active).map(|c| c.round).collect();
        assert_eq!(active, vec![3]);
    }

    #[test]
    fn test_out_of_range_index_marks_nothing() {
        assert!(stake_ladder(&STAKES, Some(4)).iter().all(|c| !c.active));
        assert!(stake_ladder(&STAKES, None).iter().all(|c| !c.active));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        assert_eq!(stake_ladder(&STAKES, Some(1)), stake_ladder(&STAKES, Some(1)));
        assert!(stake_ladder(&[], Some(0)).is_empty());
    }
}
