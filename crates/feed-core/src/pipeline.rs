//! One compile cycle: rows in, rendered feed out.

use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, info_span, warn};

use feed_ingest::{RowSource, SourceRows};
use feed_model::{FeedDocument, FeedError, FeedOptions, GroupFailure};
use feed_report::{CONTENT_TYPE, ENCODING, render_feed};

use crate::context::CompileContext;
use crate::grouping::group_rows;
use crate::ids::group_id;
use crate::normalize::normalize_group;
use crate::offers::build_offers;

/// Counts and skipped groups of one compile cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    pub primary_rows: usize,
    pub secondary_rows: usize,
    pub groups: usize,
    pub offers: usize,
    pub skipped: Vec<GroupFailure>,
}

impl CompileReport {
    pub fn emitted_groups(&self) -> usize {
        self.groups - self.skipped.len()
    }
}

/// Build the feed document from source rows.
///
/// Group failures are collected in the report and never abort the build.
pub fn build_document(
    rows: &SourceRows,
    options: &FeedOptions,
    generated_at: NaiveDateTime,
) -> (FeedDocument, CompileReport) {
    let groups = group_rows(&rows.primary, &rows.secondary);
    let mut ctx = CompileContext::new();
    let mut report = CompileReport {
        primary_rows: rows.primary.len(),
        secondary_rows: rows.secondary.len(),
        groups: groups.len(),
        ..CompileReport::default()
    };
    let mut offers = Vec::new();

    for group in &groups {
        let normalized = match normalize_group(group, &options.labels) {
            Ok(normalized) => normalized,
            Err(failure) => {
                if failure.is_validation() {
                    debug!(product_code = %failure.product_code(), %failure, "group skipped");
                } else {
                    warn!(product_code = %failure.product_code(), %failure, "group skipped");
                }
                report.skipped.push(failure);
                continue;
            }
        };
        let id = group_id(&normalized.product_code, &mut ctx);
        let built = build_offers(&normalized, id, options);
        debug!(
            product_code = %normalized.product_code,
            group_id = %id,
            offers = built.len(),
            "group built"
        );
        offers.extend(built);
    }
    report.offers = offers.len();

    let document = FeedDocument {
        generated_at,
        shop: options.shop.clone(),
        offers,
    };
    (document, report)
}

/// A rendered feed. Immutable once built.
#[derive(Debug, Clone)]
pub struct CompiledFeed {
    pub xml: String,
    pub generated_at: NaiveDateTime,
    pub report: CompileReport,
}

impl CompiledFeed {
    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    pub fn encoding(&self) -> &'static str {
        ENCODING
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.xml.as_bytes()
    }
}

/// Runs the compile pipeline with fixed options.
#[derive(Debug, Clone, Default)]
pub struct FeedCompiler {
    options: FeedOptions,
}

impl FeedCompiler {
    pub fn new(options: FeedOptions) -> Self {
        Self { options }
    }

    /// Fetch, build and render a feed stamped with the current local time.
    pub fn compile(&self, source: &dyn RowSource) -> Result<CompiledFeed, FeedError> {
        self.compile_at(source, Local::now().naive_local())
    }

    pub fn compile_at(
        &self,
        source: &dyn RowSource,
        generated_at: NaiveDateTime,
    ) -> Result<CompiledFeed, FeedError> {
        let span = info_span!("compile", source = %source.describe());
        let _guard = span.enter();
        let start = Instant::now();

        let rows = source.fetch()?;
        let feed = self.compile_rows(&rows, generated_at)?;
        let report = &feed.report;
        info!(
            primary_rows = report.primary_rows,
            secondary_rows = report.secondary_rows,
            groups = report.groups,
            offers = report.offers,
            skipped = report.skipped.len(),
            duration_ms = start.elapsed().as_millis(),
            "feed compiled"
        );
        Ok(feed)
    }

    /// Build and render from rows already fetched.
    pub fn compile_rows(
        &self,
        rows: &SourceRows,
        generated_at: NaiveDateTime,
    ) -> Result<CompiledFeed, FeedError> {
        let (document, report) = build_document(rows, &self.options, generated_at);
        let xml = render_feed(&document).map_err(|e| FeedError::serialization(format!("{e:#}")))?;
        Ok(CompiledFeed {
            xml,
            generated_at,
            report,
        })
    }
}
