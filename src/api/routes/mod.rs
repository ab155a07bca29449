//! Route handlers, one module per entity group.
//!
//! Every handler follows the same shape: extract the verified claims, check
//! the role gate for writes, delegate to `core`, serialize the outcome.

pub mod accounts;
pub mod collections;
pub mod fees;
pub mod households;
pub mod payments;
pub mod residents;
pub mod vehicles;
