//! Pharmacy-specific wiring for the generic resource actor.

pub mod entity;
