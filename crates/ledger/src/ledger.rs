use crate::book::InvestorBook;
use crate::error::LedgerError;
use crate::session::{SessionPhase, SessionWindow};
use crate::Amount;
use configuration::LedgerSettings;
use tracing::{debug, info};

/// The session-based profit-sharing ledger.
///
/// A single owner drives the session lifecycle (`configure_window`,
/// `open_session`, `close_session`) and records profit into the open session;
/// investors move principal in and out while a session is open and claim a
/// pro-rata share of the profit accrued over the trailing claim window.
///
/// Every operation checks its guards (owner, phase, arguments) before touching
/// any state, so a failed call leaves the ledger exactly as it found it.
#[derive(Debug, Clone)]
pub struct Ledger {
    owner: String,
    phase: SessionPhase,
    max_claimable_sessions: usize,
    window: SessionWindow,
    book: InvestorBook,
}

impl Ledger {
    /// Creates a ledger owned by `owner_address`, in the `Uninitialized`
    /// phase. Ownership is fixed for the ledger's lifetime.
    pub fn new(owner_address: impl Into<String>) -> Result<Self, LedgerError> {
        let owner = owner_address.into();
        if owner.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "owner address must not be empty".to_string(),
            ));
        }
        Ok(Self {
            owner,
            phase: SessionPhase::Uninitialized,
            max_claimable_sessions: 0,
            window: SessionWindow::new(),
            book: InvestorBook::new(),
        })
    }

    /// Builds a ledger from loaded settings: constructs it for the configured
    /// owner and applies the claim window size in one step, leaving the
    /// ledger `Closed` and ready for its first `open_session`.
    pub fn from_settings(settings: &LedgerSettings) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(settings.owner_address.clone())?;
        let owner = ledger.owner.clone();
        ledger.configure_window(settings.max_claimable_sessions, &owner)?;
        Ok(ledger)
    }

    // --- Owner operations ---

    /// Fixes the claim window size. Allowed exactly once, before the first
    /// session opens; transitions the ledger from `Uninitialized` to
    /// `Closed`.
    pub fn configure_window(&mut self, size: i32, acting_address: &str) -> Result<(), LedgerError> {
        self.ensure_owner(acting_address)?;
        self.ensure_phase(SessionPhase::Uninitialized)?;
        if size < 0 {
            return Err(LedgerError::InvalidArgument(
                "claim window size must not be negative".to_string(),
            ));
        }

        self.max_claimable_sessions = size as usize;
        self.phase = SessionPhase::Closed;

        info!("claim window configured to {} sessions", size);
        Ok(())
    }

    /// Opens a new session: appends a zero profit accumulator and makes it
    /// the current session.
    pub fn open_session(&mut self, acting_address: &str) -> Result<(), LedgerError> {
        self.ensure_owner(acting_address)?;
        self.ensure_phase(SessionPhase::Closed)?;

        self.phase = SessionPhase::Open;
        self.window.open_session();

        info!("session {} started", self.window.session_count());
        Ok(())
    }

    /// Closes the current session, then evicts the one session that has just
    /// fallen outside the claim window, if any.
    pub fn close_session(&mut self, acting_address: &str) -> Result<(), LedgerError> {
        self.ensure_owner(acting_address)?;
        self.ensure_phase(SessionPhase::Open)?;

        self.phase = SessionPhase::Closed;
        if let Some(expired_idx) = self.window.expire_oldest(self.max_claimable_sessions) {
            info!("profit of session {} expired", expired_idx + 1);
        }
        debug!("session profits: {:?}", self.window.profits());

        info!("session {} stopped", self.window.session_count());
        Ok(())
    }

    /// Records `amount` of profit into the currently open session.
    pub fn add_profit(&mut self, amount: Amount, acting_address: &str) -> Result<(), LedgerError> {
        self.ensure_owner(acting_address)?;
        self.ensure_phase(SessionPhase::Open)?;
        if amount < 0.0 {
            return Err(LedgerError::InvalidArgument(
                "profit amount must not be negative".to_string(),
            ));
        }

        self.window.accrue(amount);

        info!("added profit of {} to the current session", amount);
        info!("claimable profit is now {}", self.claimable_profit());
        Ok(())
    }

    // --- Public reads ---

    /// The number of sessions ever opened, including the current one if a
    /// session is open.
    pub fn session_count(&self) -> usize {
        self.window.session_count()
    }

    /// The current phase of the session state machine.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The owner address fixed at construction.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The profit currently available to claims: the sum over the trailing
    /// claim window, including the open session.
    pub fn claimable_profit(&self) -> Amount {
        self.window.claimable(self.max_claimable_sessions)
    }

    /// The sum of all investor balances.
    pub fn total_investment(&self) -> Amount {
        self.book.total()
    }

    /// An investor's principal, or `None` for an address that never invested.
    pub fn balance_of(&self, investor_address: &str) -> Option<Amount> {
        self.book.balance_of(investor_address)
    }

    /// The per-session profit accumulators, oldest session first.
    pub fn session_profits(&self) -> &[Amount] {
        self.window.profits()
    }

    // --- Investor operations ---

    /// Deposits `amount` of principal for the investor.
    pub fn invest(&mut self, amount: Amount, investor_address: &str) -> Result<(), LedgerError> {
        self.ensure_phase(SessionPhase::Open)?;
        if amount < 0.0 {
            return Err(LedgerError::InvalidArgument(
                "investment amount must not be negative".to_string(),
            ));
        }

        let balance = self.book.deposit(investor_address, amount);

        info!(
            "investment of {} accepted; investor balance {}, total investment {}",
            amount,
            balance,
            self.book.total()
        );
        Ok(())
    }

    /// Withdraws `amount` of the investor's principal.
    pub fn withdraw(&mut self, amount: Amount, investor_address: &str) -> Result<(), LedgerError> {
        self.ensure_phase(SessionPhase::Open)?;
        if amount < 0.0 {
            return Err(LedgerError::InvalidArgument(
                "withdrawal amount must not be negative".to_string(),
            ));
        }

        let balance = self.book.withdraw(investor_address, amount)?;

        info!(
            "withdrawal of {} accepted; investor balance {}, total investment {}",
            amount,
            balance,
            self.book.total()
        );
        Ok(())
    }

    /// Pays out the investor's pro-rata share of the claimable profit and
    /// drains it from the window, oldest session first.
    ///
    /// The share is `claimable * balance / total_investment`. The investor's
    /// principal is untouched: claiming distributes profit, never stake, so a
    /// second claim against an unchanged window returns only what the first
    /// one left in the pool.
    pub fn claim(&mut self, investor_address: &str) -> Result<Amount, LedgerError> {
        self.ensure_phase(SessionPhase::Open)?;
        let Some(balance) = self.book.balance_of(investor_address) else {
            return Err(LedgerError::UnknownInvestor(investor_address.to_string()));
        };
        if self.book.total() == 0.0 {
            return Err(LedgerError::NoInvestmentPool);
        }

        let claimable = self.claimable_profit();
        let claim_profit = claimable * balance / self.book.total();

        self.window
            .draw_down(self.max_claimable_sessions, claim_profit);

        info!(
            "claim of {} paid out of a claimable pool of {}",
            claim_profit, claimable
        );
        debug!("session profits: {:?}", self.window.profits());

        Ok(claim_profit)
    }

    // --- Guards ---

    /// Owner addresses compare ASCII case-insensitively.
    fn ensure_owner(&self, acting_address: &str) -> Result<(), LedgerError> {
        if self.owner.eq_ignore_ascii_case(acting_address) {
            Ok(())
        } else {
            Err(LedgerError::NotOwner)
        }
    }

    fn ensure_phase(&self, expected: SessionPhase) -> Result<(), LedgerError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(LedgerError::InvalidPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}
