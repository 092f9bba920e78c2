//! Core library for the civic complaint triage service.
//!
//! Complaint intake (classification, priority scoring, persistence) and
//! role-scoped retrieval live here behind collaborator traits so the HTTP
//! service and the tests can supply their own storage, session, and scoring
//! backends.

pub mod complaints;
pub mod config;
pub mod error;
pub mod telemetry;
