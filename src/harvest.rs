//! Harvesting every collection into one ordered result mapping.
//!
//! A [`Harvester`] walks its endpoint list once, fetching and reporting each
//! collection before moving to the next, then prints a summary and writes the
//! whole [`Harvest`] to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::outcome::FetchOutcome;
use crate::output::{render_preview, summary_line, PrettyPrint, DEFAULT_PREVIEW_LIMIT};
use crate::traits::Fetch;

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "yesplan_data.json";

const RULE_WIDTH: usize = 60;

/// Endpoint outcomes in the order they were fetched.
///
/// Serializes as a JSON object keyed by endpoint name, failures as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Harvest {
    entries: Vec<(Endpoint, FetchOutcome)>,
}

impl Harvest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome. A repeated endpoint replaces the earlier outcome
    /// in place so every key appears once.
    pub fn insert(&mut self, endpoint: Endpoint, outcome: FetchOutcome) {
        match self.entries.iter_mut().find(|(e, _)| *e == endpoint) {
            Some(entry) => entry.1 = outcome,
            None => self.entries.push((endpoint, outcome)),
        }
    }

    pub fn get(&self, endpoint: Endpoint) -> Option<&FetchOutcome> {
        self.entries
            .iter()
            .find(|(e, _)| *e == endpoint)
            .map(|(_, o)| o)
    }

    /// Endpoints in insertion order.
    pub fn endpoints(&self) -> impl Iterator<Item = Endpoint> + '_ {
        self.entries.iter().map(|(e, _)| *e)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Endpoint, FetchOutcome)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of endpoints that returned a payload.
    pub fn fetched_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_fetched()).count()
    }

    /// Write the mapping as two-space pretty JSON, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(std::io::Error::from)?;
        writer.flush()?;
        Ok(())
    }
}

impl Serialize for Harvest {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (endpoint, outcome) in &self.entries {
            map.serialize_entry(endpoint.as_str(), outcome)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Harvest {
    type Item = &'a (Endpoint, FetchOutcome);
    type IntoIter = std::slice::Iter<'a, (Endpoint, FetchOutcome)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Drives one fetch per endpoint and persists the result.
#[derive(Debug, Clone)]
pub struct Harvester {
    endpoints: Vec<Endpoint>,
    preview_limit: usize,
    output: PathBuf,
}

impl Default for Harvester {
    fn default() -> Self {
        Self {
            endpoints: Endpoint::ALL.to_vec(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl Harvester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Harvest only these endpoints. Order and duplicates are normalised.
    #[must_use]
    pub fn endpoints(mut self, selected: &[Endpoint]) -> Self {
        self.endpoints = Endpoint::ordered_selection(selected);
        self
    }

    #[must_use]
    pub fn preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Fetch and report every endpoint, print the summary and save the file.
    ///
    /// Per-endpoint failures and a failed save are reported to `out` and do
    /// not stop the run.
    ///
    /// # Errors
    ///
    /// Returns an error only when writing to `out` fails.
    pub async fn run<F, W>(&self, fetcher: &F, out: &mut W) -> Result<Harvest>
    where
        F: Fetch + ?Sized,
        W: Write,
    {
        let harvest = self.collect(fetcher, out).await?;
        self.write_summary(&harvest, out)?;

        match harvest.save(&self.output) {
            Ok(()) => writeln!(out, "\n💾 Results saved to {}", self.output.display())?,
            Err(e) => {
                tracing::warn!(path = %self.output.display(), error = %e, "could not save results");
                writeln!(out, "\n⚠️  Could not save results to file: {e}")?;
            }
        }

        Ok(harvest)
    }

    /// Fetch each endpoint in order, reporting as it goes.
    pub async fn collect<F, W>(&self, fetcher: &F, out: &mut W) -> Result<Harvest>
    where
        F: Fetch + ?Sized,
        W: Write,
    {
        let mut harvest = Harvest::new();

        for &endpoint in &self.endpoints {
            writeln!(out, "\n🔍 Fetching {endpoint}...")?;
            let outcome = fetcher.fetch_outcome(endpoint.as_str(), &[]).await;

            match &outcome {
                FetchOutcome::Fetched(payload) => {
                    writeln!(out, "✅ Successfully fetched {endpoint}")?;
                    writeln!(out, "{}", render_preview(payload, self.preview_limit))?;
                }
                FetchOutcome::Failed(failure) => {
                    writeln!(out, "{}", failure.pretty_print())?;
                    writeln!(out, "⚠️  Failed to fetch {endpoint}")?;
                }
            }

            harvest.insert(endpoint, outcome);
        }

        tracing::info!(
            fetched = harvest.fetched_count(),
            total = harvest.len(),
            "harvest complete"
        );
        Ok(harvest)
    }

    fn write_summary<W: Write>(&self, harvest: &Harvest, out: &mut W) -> Result<()> {
        writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "Summary")?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        for (endpoint, outcome) in harvest {
            writeln!(out, "{}", summary_line(endpoint.as_str(), outcome))?;
        }
        Ok(())
    }
}

/// Header printed before the first fetch. The key itself is never shown.
pub fn banner(base_url: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    [
        rule.clone(),
        "YesPlan API Proof of Concept".to_string(),
        rule.clone(),
        format!("Base URL: {}", base_url.trim_end_matches('/')),
        format!("API Key: {}...{} (hidden)", "*".repeat(8), "*".repeat(8)),
        rule,
    ]
    .join("\n")
}
