//! Synthetic event generation for experiments and tests

use crate::event::RawEvent;
use crate::graph::Attributes;
use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Teams acting on services
pub const TEAMS: &[&str] = &["atlas", "apollo", "selene"];

/// Services acted upon
pub const SERVICES: &[&str] = &["payments", "notifications", "analytics", "inventory"];

/// Actions; event types are `service.<action>`
pub const ACTIONS: &[&str] = &["deployed", "scaled", "incident_opened", "incident_resolved"];

#[derive(Debug, Error)]
pub enum FabricateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for one synthetic dataset
#[derive(Debug, Clone, PartialEq)]
pub struct FabricateConfig {
    /// Number of events to generate
    pub count: usize,
    /// Seed for reproducible output; random when `None`
    pub seed: Option<u64>,
    /// Width of the window timestamps are drawn from
    pub window_hours: u32,
    /// Start of the window; the current time when `None`
    pub base_time: Option<DateTime<Utc>>,
}

impl Default for FabricateConfig {
    fn default() -> Self {
        Self {
            count: 20,
            seed: None,
            window_hours: 72,
            base_time: None,
        }
    }
}

impl FabricateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_base_time(mut self, base_time: DateTime<Utc>) -> Self {
        self.base_time = Some(base_time);
        self
    }
}

/// Generate `config.count` event records.
///
/// Timestamps are the base time, truncated to whole seconds, plus a uniform
/// offset within the configured window. Records come out in generation
/// order, not time order.
pub fn fabricate(config: &FabricateConfig) -> Vec<RawEvent> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let base_time = config.base_time.unwrap_or_else(Utc::now).trunc_subsecs(0);
    let window_secs = i64::from(config.window_hours) * 3600;

    (0..config.count)
        .map(|run| {
            let actor = pick(&mut rng, TEAMS);
            let subject = pick(&mut rng, SERVICES);
            let action = pick(&mut rng, ACTIONS);
            let offset = if window_secs > 0 { rng.gen_range(0..window_secs) } else { 0 };
            let occurred_at = base_time + Duration::seconds(offset);

            RawEvent {
                event_type: Some(format!("service.{}", action)),
                occurred_at: Some(occurred_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
                actor: Some(actor.to_string()),
                subject: Some(subject.to_string()),
                attributes: Some(Attributes::from([
                    ("source".to_string(), "fabricated".to_string()),
                    ("run".to_string(), run.to_string()),
                ])),
            }
        })
        .collect()
}

fn pick<'a>(rng: &mut StdRng, choices: &[&'a str]) -> &'a str {
    choices.choose(rng).copied().unwrap_or_default()
}

/// Write records as a pretty-printed JSON array.
pub fn write_events(records: &[RawEvent], path: &Path) -> Result<(), FabricateError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;

    info!(path = %path.display(), count = records.len(), "synthetic events written");
    Ok(())
}
