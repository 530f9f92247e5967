#![forbid(unsafe_code)]
//! courtq-order library.
//!
//! Pure ordering engines for ball-in-court submittal queues. Each responsible
//! party's queue is a single linear order with two tiers: nine fixed urgent
//! slots (0.1–0.9) ahead of a densely packed regular backlog (1..N). The
//! engines take a [`courtq_core::GroupSnapshot`], compute the full mutation
//! list that realizes a requested change, and leave persistence, transaction
//! boundaries, and per-group serialization to the caller.
//!
//! Entry points:
//!
//! - [`compute_manual_reorder`] — drag-and-drop style target assignment.
//! - [`compute_promotion`] — automatic escalation into the urgent tier.
//! - [`compute_compression`] — close the gaps in a group that lost a member.
//!
//! # Conventions
//!
//! - **Errors**: typed [`courtq_core::OrderError`] results; never panics.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod categorize;
pub mod compress;
pub mod manual;
pub mod promote;
pub mod validate;

pub use categorize::{Categorized, categorize};
pub use compress::compute_compression;
pub use manual::compute_manual_reorder;
pub use promote::{compute_promotion, compute_promotion_if_triggered};
pub use validate::validate_target;
