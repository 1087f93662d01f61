use crate::Amount;
use serde::{Deserialize, Serialize};

/// The lifecycle phase of the ledger's session state machine.
///
/// The ledger starts `Uninitialized`, moves to `Closed` once the claim window
/// is configured, and then alternates between `Open` and `Closed` as the owner
/// starts and stops sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Uninitialized,
    Open,
    Closed,
}

/// The per-session profit accumulators, ordered from the first session ever
/// opened to the current one.
///
/// The sequence is append-only: one entry is pushed per session open and none
/// is ever removed, so its length doubles as the session count. Entries are
/// zeroed or decremented in place by expiry eviction and claim drawdown.
#[derive(Debug, Clone, Default)]
pub struct SessionWindow {
    profits: Vec<Amount>,
}

impl SessionWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of sessions ever opened, including the current one.
    pub fn session_count(&self) -> usize {
        self.profits.len()
    }

    /// Appends a fresh zero accumulator for a newly opened session.
    pub fn open_session(&mut self) {
        self.profits.push(0.0);
    }

    /// Adds `amount` to the current session's accumulator.
    ///
    /// A no-op when no session was ever opened; the ledger's phase guard
    /// prevents that from being reachable.
    pub fn accrue(&mut self, amount: Amount) {
        if let Some(current) = self.profits.last_mut() {
            *current += amount;
        }
    }

    /// Zeroes the single session that has just fallen outside the trailing
    /// claim window of size `window_size`, returning its index.
    ///
    /// Called once per session close. With `last_idx` the index of the session
    /// just closed, the evicted slot is `last_idx - window_size`: that many
    /// sessions back, not counting the closed one itself. Only that one slot
    /// is cleared; this is not a sliding decay.
    pub fn expire_oldest(&mut self, window_size: usize) -> Option<usize> {
        let last_idx = self.profits.len().checked_sub(1)?;
        if last_idx < window_size {
            return None;
        }
        let expired_idx = last_idx - window_size;
        self.profits[expired_idx] = 0.0;
        Some(expired_idx)
    }

    /// Index of the oldest session still inside the claim window.
    fn claim_start(&self, window_size: usize) -> usize {
        self.profits.len().saturating_sub(window_size)
    }

    /// Sum of profit over the claim window: the trailing
    /// `min(session_count, window_size)` sessions, current one included.
    pub fn claimable(&self, window_size: usize) -> Amount {
        self.profits[self.claim_start(window_size)..].iter().sum()
    }

    /// Consumes `amount` of profit from the claim window, oldest session
    /// first.
    ///
    /// Each entry is either fully drained (zeroed, its value subtracted from
    /// the remaining amount) or, once the remainder no longer covers it,
    /// reduced by the remainder. Newer sessions keep their profit when the
    /// older ones can satisfy the claim.
    pub fn draw_down(&mut self, window_size: usize, amount: Amount) {
        let start = self.claim_start(window_size);
        let mut remaining = amount;
        for entry in &mut self.profits[start..] {
            if remaining <= 0.0 {
                break;
            }
            if remaining >= *entry {
                remaining -= *entry;
                *entry = 0.0;
            } else {
                *entry -= remaining;
                remaining = 0.0;
            }
        }
    }

    /// The raw per-session accumulators, oldest first.
    pub fn profits(&self) -> &[Amount] {
        &self.profits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A window holding one closed session per given profit figure.
    fn window_with(profits: &[Amount]) -> SessionWindow {
        let mut window = SessionWindow::new();
        for &profit in profits {
            window.open_session();
            window.accrue(profit);
        }
        window
    }

    #[test]
    fn open_session_grows_count_by_one() {
        let mut window = SessionWindow::new();
        assert_eq!(window.session_count(), 0);
        window.open_session();
        assert_eq!(window.session_count(), 1);
        window.open_session();
        assert_eq!(window.session_count(), 2);
        assert_eq!(window.profits(), &[0.0, 0.0]);
    }

    #[test]
    fn accrue_targets_the_current_session_only() {
        let mut window = window_with(&[1.0]);
        window.open_session();
        window.accrue(5.0);
        window.accrue(2.5);
        assert_eq!(window.profits(), &[1.0, 7.5]);
    }

    #[test]
    fn no_eviction_while_window_not_yet_full() {
        // Scenario: two sessions closed under a window of five.
        let mut window = window_with(&[10.0, 20.0]);
        assert_eq!(window.expire_oldest(5), None);
        assert_eq!(window.profits(), &[10.0, 20.0]);
    }

    #[test]
    fn eviction_zeroes_exactly_the_boundary_session() {
        // Six sessions with profits 1..=6 under a window of five: closing the
        // sixth expires the first and leaves the rest untouched.
        let mut window = window_with(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(window.expire_oldest(5), Some(0));
        assert_eq!(window.profits(), &[0.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn zero_sized_window_expires_the_session_just_closed() {
        let mut window = window_with(&[7.0]);
        assert_eq!(window.expire_oldest(0), Some(0));
        assert_eq!(window.profits(), &[0.0]);
        assert_eq!(window.claimable(0), 0.0);
    }

    #[test]
    fn claimable_sums_only_the_trailing_window() {
        let window = window_with(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(window.claimable(2), 7.0);
        assert_eq!(window.claimable(4), 10.0);
        // A window larger than the history covers everything.
        assert_eq!(window.claimable(10), 10.0);
    }

    #[test]
    fn draw_down_drains_oldest_sessions_first() {
        let mut window = window_with(&[3.0, 4.0, 5.0]);
        window.draw_down(3, 5.0);
        assert_eq!(window.profits(), &[0.0, 2.0, 5.0]);
    }

    #[test]
    fn draw_down_partial_entry_keeps_the_remainder() {
        let mut window = window_with(&[10.0]);
        window.draw_down(1, 4.0);
        assert_eq!(window.profits(), &[6.0]);
    }

    #[test]
    fn draw_down_skips_sessions_outside_the_window() {
        let mut window = window_with(&[9.0, 1.0, 1.0]);
        window.draw_down(2, 2.0);
        // The expired first session is not consumed even though it is oldest.
        assert_eq!(window.profits(), &[9.0, 0.0, 0.0]);
    }

    #[test]
    fn draw_down_of_more_than_the_pool_empties_the_window() {
        let mut window = window_with(&[1.0, 2.0]);
        window.draw_down(2, 100.0);
        assert_eq!(window.profits(), &[0.0, 0.0]);
    }
}
