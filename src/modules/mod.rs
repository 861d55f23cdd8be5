//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the persistence gateway over the relational store.

pub mod persistence;
