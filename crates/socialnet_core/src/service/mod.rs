//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Hand projected views to outer layers instead of raw records.

pub mod social_service;
