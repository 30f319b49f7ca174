//! CLI argument parsing types.
//!
//! Every flag is optional; running with no arguments harvests all
//! collections from the default instance into `yesplan_data.json`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::client::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::endpoint::Endpoint;
use crate::harvest::DEFAULT_OUTPUT_FILE;
use crate::output::DEFAULT_PREVIEW_LIMIT;

/// YesPlan harvesting command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "yesplan",
    about = "Fetch YesPlan collections, preview them and save them as JSON",
    version
)]
pub struct Cli {
    /// API key. Read from the environment when not given.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the YesPlan instance.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// File the collected results are written to.
    #[arg(long, short, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Number of items previewed per collection.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_LIMIT)]
    pub limit: usize,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Only fetch these collections (repeatable). Defaults to all of them.
    #[arg(long = "endpoint", short, value_enum)]
    pub endpoints: Vec<Endpoint>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,
}
