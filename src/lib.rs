//! YesPlan API client library.
//!
//! Fetches the YesPlan collections (`events`, `resources`, `contacts`,
//! `locations`, `labels`), renders console previews of them and collects the
//! payloads into one ordered JSON document.
//!
//! # Quick Start
//!
//! ```no_run
//! use yesplan::{Harvester, YesplanClient};
//!
//! #[tokio::main]
//! async fn main() -> yesplan::Result<()> {
//!     // Create client from environment variables
//!     let client = YesplanClient::from_env()?;
//!
//!     // Fetch every collection, print previews and write yesplan_data.json
//!     let harvest = Harvester::new()
//!         .run(&client, &mut std::io::stdout())
//!         .await?;
//!     println!("Fetched {} of {} collections", harvest.fetched_count(), harvest.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failures
//!
//! [`Fetch::fetch`] returns a typed [`YesplanError`]. The harvester goes
//! through [`Fetch::fetch_outcome`] instead, which turns any failure into a
//! [`FetchOutcome::Failed`] so one bad collection never stops the run.
//!
//! # Configuration
//!
//! - `YESPLAN_API_KEY` (required) - Your YesPlan API key
//! - `YESPLAN_BASE_URL` (optional) - Base URL (defaults to `https://neuf.yesplan.be`)

pub mod cli;
mod client;
mod endpoint;
mod error;
mod harvest;
mod outcome;
pub mod output;
mod traits;

// Re-export core types
pub use client::{
    YesplanClient, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use endpoint::Endpoint;
pub use error::{Result, YesplanError};
pub use harvest::{banner, Harvest, Harvester, DEFAULT_OUTPUT_FILE};
pub use outcome::{FailureKind, FetchFailure, FetchOutcome};
pub use output::PrettyPrint;

// Re-export traits
pub use traits::Fetch;
