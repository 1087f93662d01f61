use crate::error::LedgerError;
use crate::Amount;
use std::collections::HashMap;

/// The investor balance book: one non-negative balance per address, plus the
/// running total across all investors.
///
/// An absent address means "never invested" and is distinct from a recorded
/// balance of zero: only recorded investors may withdraw or claim. The total
/// always equals the sum of the recorded balances.
#[derive(Debug, Clone, Default)]
pub struct InvestorBook {
    balances: HashMap<String, Amount>,
    total: Amount,
}

impl InvestorBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` to the investor, creating the record if absent.
    /// Returns the investor's new balance.
    pub fn deposit(&mut self, address: &str, amount: Amount) -> Amount {
        let balance = self.balances.entry(address.to_string()).or_insert(0.0);
        *balance += amount;
        self.total += amount;
        *balance
    }

    /// Debits `amount` from the investor's balance and the total.
    /// Returns the investor's new balance.
    ///
    /// A full withdrawal keeps the (now zero) record, so the investor stays
    /// known to the book and remains claim-eligible.
    pub fn withdraw(&mut self, address: &str, amount: Amount) -> Result<Amount, LedgerError> {
        let Some(balance) = self.balances.get_mut(address) else {
            return Err(LedgerError::UnknownInvestor(address.to_string()));
        };
        if *balance < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        self.total -= amount;
        Ok(*balance)
    }

    /// The recorded balance, or `None` for an address that never invested.
    pub fn balance_of(&self, address: &str) -> Option<Amount> {
        self.balances.get(address).copied()
    }

    /// The sum of all recorded balances.
    pub fn total(&self) -> Amount {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance_sum(book: &InvestorBook) -> Amount {
        book.balances.values().sum()
    }

    #[test]
    fn deposit_inserts_then_accumulates() {
        let mut book = InvestorBook::new();
        assert_eq!(book.deposit("alice", 100.0), 100.0);
        assert_eq!(book.deposit("alice", 50.0), 150.0);
        assert_eq!(book.balance_of("alice"), Some(150.0));
        assert_eq!(book.total(), 150.0);
    }

    #[test]
    fn withdraw_debits_balance_and_total() {
        let mut book = InvestorBook::new();
        book.deposit("alice", 100.0);
        book.deposit("bob", 40.0);
        assert_eq!(book.withdraw("alice", 30.0).unwrap(), 70.0);
        assert_eq!(book.total(), 110.0);
        assert_eq!(book.total(), balance_sum(&book));
    }

    #[test]
    fn withdraw_by_unknown_address_is_rejected() {
        let mut book = InvestorBook::new();
        assert!(matches!(
            book.withdraw("nobody", 1.0),
            Err(LedgerError::UnknownInvestor(_))
        ));
    }

    #[test]
    fn withdraw_over_balance_is_rejected_without_mutation() {
        let mut book = InvestorBook::new();
        book.deposit("alice", 10.0);
        assert!(matches!(
            book.withdraw("alice", 10.5),
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(book.balance_of("alice"), Some(10.0));
        assert_eq!(book.total(), 10.0);
    }

    #[test]
    fn full_withdrawal_keeps_the_investor_known() {
        let mut book = InvestorBook::new();
        book.deposit("alice", 10.0);
        book.withdraw("alice", 10.0).unwrap();
        assert_eq!(book.balance_of("alice"), Some(0.0));
        assert_eq!(book.balance_of("bob"), None);
    }
}
