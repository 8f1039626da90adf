#![doc = "bucket-relay-core: core ingestion loop for bucket-relay."]

//! This crate contains the daemon's business logic: the watch-directory scan,
//! upload through the [`contract::BlobStore`] gateway, outcome-based file
//! relocation, and the polling driver that ties them together.
//! Plumbing (config files, CLI, logging setup, the real HTTP client) lives in
//! the `bucket-relay` crate.

pub mod contract;
pub mod cycle;
pub mod daemon;
pub mod error;
pub mod relocate;
pub mod settings;
