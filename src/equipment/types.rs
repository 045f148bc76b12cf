//! Common types and traits for equipment profiles.

use thiserror::Error;

/// Invalid equipment parameter detected while building a profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquipmentError {
    #[error("{equipment}: {field} must be {constraint}, got {value}")]
    OutOfRange {
        equipment: &'static str,
        field: &'static str,
        constraint: &'static str,
        value: f64,
    },

    #[error("part-load curve: {0}")]
    PartLoadCurve(String),
}

/// Static properties shown in the equipment summary table.
///
/// `None` marks a property that does not apply to the equipment.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentProperties {
    /// Efficiency at rated output (0..1.0).
    pub full_load_efficiency: Option<f64>,
    /// Minimum operating fraction of capacity.
    pub turn_down_ratio: Option<f64>,
    /// Rated size with its unit.
    pub size: String,
    /// Heat produced per unit of electricity.
    pub heat_to_power: Option<f64>,
}

/// Trait implemented by every piece of plant equipment.
pub trait Equipment {
    /// Returns a human-readable type name for the equipment.
    fn device_type(&self) -> &'static str;

    /// Returns the static properties for reporting.
    fn properties(&self) -> EquipmentProperties;
}

/// Checks `value` against an inclusive/exclusive range and builds the matching error.
pub(crate) fn ensure_range(
    equipment: &'static str,
    field: &'static str,
    value: f64,
    valid: bool,
    constraint: &'static str,
) -> Result<(), EquipmentError> {
    if valid && value.is_finite() {
        Ok(())
    } else {
        Err(EquipmentError::OutOfRange {
            equipment,
            field,
            constraint,
            value,
        })
    }
}
