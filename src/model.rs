// Core structs: CrawlResult, MetricPoint
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Slot counts extracted from one vendor occupancy page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlResult {
    pub free: u32,
    pub active: u32,
}

/// Free-slot count as reported by the webclimber status text. Some locations
/// never show the number and only move the bar, so "not there" is an expected
/// state rather than a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeSlots {
    Known(u32),
    Unknown,
}

/// One utilization sample, ready for the line-protocol writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricPoint {
    pub measurement: &'static str,
    pub location: String,
    pub area: Option<String>,
    pub time: DateTime<Utc>,
    pub free: u32,
    pub active: u32,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    BadStatus(u16),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("bad selector: {0}")]
    Selector(String),
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("missing attribute: {0}")]
    MissingAttribute(String),
    #[error("invalid number in {context}: {text:?}")]
    Number { context: String, text: String },
    #[error("bar width {0} out of range")]
    WidthOutOfRange(u32),
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Transport(#[from] FetchError),
    #[error(transparent)]
    Extraction(#[from] ParseError),
    #[error("unknown boulder arena type: {kind} for site {site}")]
    UnknownKind { site: String, kind: String },
    #[error("site {site} has no client_id configured")]
    MissingClientId { site: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("influx request failed: {0}")]
    Http(String),
    #[error("influx write timed out")]
    Timeout,
    #[error("influx rejected batch [{status}]: {body}")]
    Rejected { status: u16, body: String },
}
