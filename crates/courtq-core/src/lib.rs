#![forbid(unsafe_code)]
//! courtq-core library.
//!
//! Data model shared by the ordering engines: the tagged `order` value, the
//! group snapshot types, machine-readable error codes, and the approval
//! workflow predicate that drives ladder promotion.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums with stable `E####` codes.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod error;
pub mod model;
pub mod workflow;

pub use error::{OrderError, OrderErrorCode};
pub use model::order::{Order, UrgentSlot};
pub use model::submittal::{GroupKey, GroupSnapshot, OrderMutation, OrderedRecord, SubmittalId};
