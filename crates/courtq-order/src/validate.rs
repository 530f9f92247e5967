//! Proposed-order validation: the gate in front of every manual reorder.
//!
//! Raw values arrive from the HTTP layer as a nullable float. Validation
//! classifies them before any mutation is computed: null clears the order,
//! (0, 1) must land on one of the nine urgent slots, and anything ≥ 1 is a
//! regular rank. Fractional regular values are tolerated here — the engines
//! always write whole ranks, so only `floor` of the input matters.

use courtq_core::{Order, OrderError, UrgentSlot};

/// How far a proposed urgent value may sit from its slot after rounding to
/// one decimal place.
const SLOT_TOLERANCE: f64 = 0.001;

const SLOT_LIST: &str = "0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9";

/// Validate a raw proposed order value.
///
/// # Errors
///
/// Returns [`OrderError::InvalidOrder`] for zero, negative, non-finite, and
/// off-slot urgent values. Never mutates anything.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn validate_target(raw: Option<f64>) -> Result<Order, OrderError> {
    let Some(value) = raw else {
        return Ok(Order::Absent);
    };

    if !value.is_finite() {
        return Err(OrderError::InvalidOrder {
            value,
            reason: "order must be a finite number".to_string(),
        });
    }
    if value == 0.0 {
        return Err(OrderError::InvalidOrder {
            value,
            reason: "zero not allowed".to_string(),
        });
    }
    if value < 0.0 {
        return Err(OrderError::InvalidOrder {
            value,
            reason: "negative orders are not allowed".to_string(),
        });
    }

    if value < 1.0 {
        let tenths = (value * 10.0).round();
        let slot = if (1.0..=9.0).contains(&tenths) {
            UrgentSlot::from_index(tenths as u8)
        } else {
            None
        };
        return match slot {
            Some(slot) if (value - slot.as_stored()).abs() <= SLOT_TOLERANCE => {
                Ok(Order::Urgent(slot))
            }
            _ => Err(OrderError::InvalidOrder {
                value,
                reason: format!("urgent orders must be exactly one of {SLOT_LIST}"),
            }),
        };
    }

    // Fractional part beyond floor never affects the insertion position.
    Ok(Order::Regular(
        value.floor().min(f64::from(u32::MAX)) as u32
    ))
}
