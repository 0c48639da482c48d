//! Protomap Core Types and Definitions
//!
//! This crate provides the foundational types shared by the protomap crates.
//! It includes:
//!
//! - **Schema**: The read-only schema model produced by ingestion ([`schema`] module)
//! - **Identifiers**: Qualified record-type paths used as node identifiers ([`identifier::QualifiedId`])
//! - **Diagnostics**: Non-fatal and fatal problem reports ([`diagnostic`] module)

pub mod diagnostic;
pub mod identifier;
pub mod schema;
