//! Credit Ledger

use crate::model::AccountState;

impl AccountState {
    /// Add `amount` to the ledger and return the new balance.
    ///
    /// Negative amounts are accepted. The balance saturates at the `i64`
    /// bounds.
    pub fn add_credits(&mut self, amount: i64) -> i64 {
        self.credits = self.credits.saturating_add(amount);
        self.credits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credits_accumulate() {
        let mut state = AccountState::default();
        assert_eq!(state.add_credits(1), 1);
        assert_eq!(state.add_credits(5), 6);
        assert_eq!(state.add_credits(-10), -4);
    }

    #[test]
    fn test_credits_saturate() {
        let mut state = AccountState::default();
        state.credits = i64::MAX - 1;
        assert_eq!(state.add_credits(10), i64::MAX);
    }
}
