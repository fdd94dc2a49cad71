//! Profile Sync - profile reconciliation core of the Study App
//!
//! This crate decides which profile the signed-in user sees by combining
//! the row in the remote profile table with the record the edit screen
//! saved on the device, and exposes the result as observable state.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
