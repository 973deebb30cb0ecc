//! Ranking of relationships by accumulated weight

use crate::graph::{Relationship, TemporalGraph};
use std::fmt;

/// Default number of rows in a summary
pub const DEFAULT_TOP_K: usize = 5;

const EMPTY_MESSAGE: &str = "No relationships discovered yet.";

/// One ranked relationship, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// `"<source> -[<relationship_type>]-> <target>"`
    pub descriptor: String,
    pub weight: f64,
    /// `"<first date> → <last date>"`, dates only
    pub window: String,
}

impl SummaryRow {
    fn from_relationship(rel: &Relationship) -> Self {
        Self {
            descriptor: rel.key().to_string(),
            weight: rel.weight(),
            window: format!(
                "{} → {}",
                rel.first_observed_at().date_naive(),
                rel.last_observed_at().date_naive()
            ),
        }
    }

    /// Weight with one decimal place
    pub fn observations(&self) -> String {
        format!("{:.1}", self.weight)
    }
}

/// Result of [`summarize`]
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// The graph holds no relationships
    Empty,
    /// Heaviest relationships first
    Ranked(Vec<SummaryRow>),
}

impl Summary {
    pub fn rows(&self) -> &[SummaryRow] {
        match self {
            Summary::Empty => &[],
            Summary::Ranked(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Summary::Empty)
    }
}

/// Rank relationships by weight, heaviest first, and keep the top `top_k`.
///
/// Ties keep the graph's iteration order.
pub fn summarize(graph: &TemporalGraph, top_k: usize) -> Summary {
    if graph.edge_count() == 0 {
        return Summary::Empty;
    }

    let mut ranked: Vec<&Relationship> = graph.relationships().collect();
    ranked.sort_by(|a, b| b.weight().total_cmp(&a.weight()));

    Summary::Ranked(
        ranked
            .into_iter()
            .take(top_k)
            .map(SummaryRow::from_relationship)
            .collect(),
    )
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = match self {
            Summary::Empty => return writeln!(f, "{}", EMPTY_MESSAGE),
            Summary::Ranked(rows) => rows,
        };

        let width = rows
            .iter()
            .map(|r| r.descriptor.chars().count())
            .chain(std::iter::once("RELATIONSHIP".len()))
            .max()
            .unwrap_or_default();

        writeln!(f, "{:<width$}  {:>12}  {}", "RELATIONSHIP", "OBSERVATIONS", "ACTIVE WINDOW")?;
        writeln!(f, "{}", "-".repeat(width + 2 + 12 + 2 + 23))?;
        for row in rows {
            writeln!(f, "{:<width$}  {:>12}  {}", row.descriptor, row.observations(), row.window)?;
        }
        Ok(())
    }
}
