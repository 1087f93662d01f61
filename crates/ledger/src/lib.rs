//! Session-based profit-sharing ledger.
//!
//! A single owner opens and closes accrual sessions and records profit into
//! the open one; investors deposit and withdraw principal while a session is
//! open and claim a pro-rata share of the profit accrued over the trailing
//! claim window. Closing a session expires the profit of the one session that
//! has just fallen outside that window.
//!
//! The crate is the accounting core only: no transport, persistence, or
//! authentication. Callers pass an acting address per call and the ledger
//! answers with results or typed [`LedgerError`] failures.
//!
//! Every operation is a bounded, synchronous transition over `&mut Ledger`.
//! When shared across threads, wrap the whole instance in one lock (or route
//! calls through a single actor) so each check-then-mutate sequence stays
//! atomic; the ledger itself holds no locks.

pub mod book;
pub mod error;
pub mod ledger;
pub mod session;

// Re-export the core types to provide a clean public API.
pub use book::InvestorBook;
pub use error::LedgerError;
pub use ledger::Ledger;
pub use session::{SessionPhase, SessionWindow};

/// A monetary amount.
///
/// Single-precision on purpose: the contract this ledger mirrors does all
/// accounting in IEEE-754 `float`, and claim figures must round identically.
pub type Amount = f32;
