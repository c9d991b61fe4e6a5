//! Remote migration service access
//!
//! `MigrationApi` is the seam the engine is written against; `MigrationClient`
//! is its reqwest implementation. Polling of long-running jobs lives in
//! `polling`.

pub mod client;
pub mod constants;
pub mod models;
pub mod polling;

pub use client::{MigrationApi, MigrationClient};
pub use models::{
    ContinueMigrationResponse, InitializeMigrationResponse, LegacyMigrationResponse,
    LegacyMigrationState, LegacyMigrationStatus, LegacyProject, ListAppsResponse, PublicApp,
};
pub use polling::{PollConfig, PollError, Poller};
