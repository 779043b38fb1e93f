//! Scambait - Honeypot Scam Engagement Engine
//!
//! This crate keeps suspected scam senders talking, accumulates forensic
//! intelligence (payment identifiers, contact identifiers, phishing links,
//! suspicious vocabulary) across conversation turns, and reports the final
//! haul to an external evaluator once an engagement ends.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
