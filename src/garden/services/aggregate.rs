//! Garden health aggregator: moves the per-user health scalar.

use crate::garden::domain::Health;
use crate::ledger::domain::PlausibilityLevel;

/// Returns the garden health change for a plausibility level.
#[must_use]
pub const fn delta_for(level: PlausibilityLevel) -> i64 {
    match level {
        PlausibilityLevel::High => 5,
        PlausibilityLevel::Medium => 0,
        PlausibilityLevel::Low => -10,
    }
}

/// Returns whether an event at this level makes the garden decay.
#[must_use]
pub const fn triggers_decay(level: PlausibilityLevel) -> bool {
    delta_for(level) < 0
}

/// Applies the level's delta to `current`, clamped to `0..=100`.
///
/// Abandonment is folded in by the caller as [`PlausibilityLevel::Low`].
#[must_use]
pub fn apply(current: Health, level: PlausibilityLevel) -> Health {
    current.offset(delta_for(level))
}
