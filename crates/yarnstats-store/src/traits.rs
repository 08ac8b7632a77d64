//! Store trait definitions

use yarnstats_core::ScriptState;

use crate::StoreResult;

/// Somewhere a `ScriptState` lives between invocations
pub trait StateStore: Send + Sync {
    /// Load the saved state.
    ///
    /// Fails with `Missing` when nothing has been saved yet and with
    /// `Malformed` when the saved document as a whole is unusable. Damage
    /// confined to one section is repaired with that section's defaults.
    fn load(&self) -> StoreResult<ScriptState>;

    /// Replace the saved state
    fn save(&self, state: &ScriptState) -> StoreResult<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}
