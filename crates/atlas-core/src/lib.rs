//! # atlas-core
//!
//! Core types and error types for Atlas.
//!
//! This crate provides the foundational types shared across all Atlas crates:
//! - Entity structs for the lore pipeline (entries, work queue, pins, locations)
//! - Status and location-type enums
//! - Cross-cutting error types
//! - CLI response and summary types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
