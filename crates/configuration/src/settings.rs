use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ledger: LedgerSettings,
}

/// Parameters that fix a ledger instance at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerSettings {
    /// The address allowed to drive the session lifecycle and record profit.
    pub owner_address: String,
    /// How many trailing sessions stay eligible for profit claims.
    /// Profit in any session older than this is expired on session close.
    pub max_claimable_sessions: i32,
}
