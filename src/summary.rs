use serde::Serialize;
use std::fmt::Write;

use crate::stats::{AggregationState, PageStats};

/// Width the page column is padded to. Display only.
pub const PAGE_COLUMN_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedPage<'a> {
    pub page: &'a str,
    pub count: u64,
}

/// Machine-readable form of a finished run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub unique_views: Vec<RankedPage<'a>>,
    pub visits: Vec<RankedPage<'a>>,
    pub processed_rows: u64,
}

/// Read-only view over the state a successful run produced.
#[derive(Debug)]
pub struct Summary {
    state: AggregationState,
}

impl Summary {
    pub fn new(state: AggregationState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AggregationState {
        &self.state
    }

    pub fn processed_rows(&self) -> u64 {
        self.state.processed_rows()
    }

    pub fn unique_views(&self) -> Vec<RankedPage<'_>> {
        rank_by(self.state.pages(), PageStats::unique_views)
    }

    pub fn visits(&self) -> Vec<RankedPage<'_>> {
        rank_by(self.state.pages(), |p| p.visits)
    }

    /// Rankings for serialization, at most `top` pages per section.
    pub fn report(&self, top: Option<usize>) -> Report<'_> {
        let limit = top.unwrap_or(usize::MAX);
        let mut unique_views = self.unique_views();
        let mut visits = self.visits();
        unique_views.truncate(limit);
        visits.truncate(limit);

        Report {
            unique_views,
            visits,
            processed_rows: self.processed_rows(),
        }
    }

    pub fn render(&self) -> String {
        render(self.state.pages(), self.processed_rows())
    }

    pub fn render_top(&self, top: Option<usize>) -> String {
        render_top(self.state.pages(), self.processed_rows(), top)
    }
}

/// Orders pages by `count`, highest first. Equal counts keep the order the
/// pages appear in `pages`.
fn rank_by<F>(pages: &[PageStats], count: F) -> Vec<RankedPage<'_>>
where
    F: Fn(&PageStats) -> u64,
{
    let mut ranked: Vec<RankedPage<'_>> = pages
        .iter()
        .map(|p| RankedPage {
            page: &p.page,
            count: count(p),
        })
        .collect();
    // slice::sort_by is stable
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Renders the plain-text report for `pages`.
pub fn render(pages: &[PageStats], processed_rows: u64) -> String {
    render_top(pages, processed_rows, None)
}

/// Like [`render`], listing at most `top` pages per section.
pub fn render_top(pages: &[PageStats], processed_rows: u64, top: Option<usize>) -> String {
    let limit = top.unwrap_or(usize::MAX);
    let mut out = String::new();

    write_section(
        &mut out,
        "Unique views",
        "unique views",
        &rank_by(pages, PageStats::unique_views),
        limit,
    );
    out.push('\n');
    write_section(&mut out, "Visits", "visits", &rank_by(pages, |p| p.visits), limit);
    out.push('\n');
    let _ = writeln!(out, "{processed_rows} rows of log processed.");

    out
}

fn write_section(
    out: &mut String,
    title: &str,
    caption: &str,
    ranked: &[RankedPage<'_>],
    limit: usize,
) {
    let _ = writeln!(out, "{title}:");
    for entry in ranked.iter().take(limit) {
        let _ = writeln!(
            out,
            "{:<width$} {} {}",
            entry.page,
            entry.count,
            caption,
            width = PAGE_COLUMN_WIDTH
        );
    }
}
