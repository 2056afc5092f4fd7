//! Basis configuration record.

use serde::{Deserialize, Serialize};

/// Which basis families contribute to the extended observation vector.
///
/// The configuration is fixed before any data is generated; the expander
/// derived from it owns a validated copy. Trig and Hermite orders are
/// reserved slots with no implemented contribution yet; an expander built
/// from a config carrying them fails rather than silently ignoring them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasisConfig {
    /// Pass the raw state through as the leading coordinates
    pub include_original_vars: bool,
    /// Power basis maximum order. Order 2 over dims 2 has: x^1*y^1
    pub power_order: Option<usize>,
    /// Trig basis maximum order (reserved, not yet supported)
    pub trig_order: Option<usize>,
    /// Hermite basis maximum order (reserved, not yet supported)
    pub hermite_order: Option<usize>,
}

impl Default for BasisConfig {
    fn default() -> Self {
        Self {
            include_original_vars: true,
            power_order: None,
            trig_order: None,
            hermite_order: None,
        }
    }
}

impl BasisConfig {
    /// Raw-state-only basis: the extended observation equals the state.
    pub fn raw_only() -> Self {
        Self::default()
    }

    /// Raw state plus a power basis of the given order.
    pub fn with_power_order(order: usize) -> Self {
        Self {
            power_order: Some(order),
            ..Self::default()
        }
    }
}
