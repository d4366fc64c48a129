//! Core types and definitions for the GYROSTAR simulation.
//!
//! This crate defines the vocabulary shared by the predictive and the
//! authoritative copies of the simulation: sphere math, components,
//! commands, snapshots, events, constants, and configuration.
//! It has no dependency on any runtime or transport framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod math;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
