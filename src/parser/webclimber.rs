// Webclimber-specific HTML parsing
use crate::model::{CrawlResult, FreeSlots, ParseError};
use crate::parser::VendorParser;
use scraper::{Html, Selector};

pub fn build_url(client_id: &str, token: &str) -> String {
    format!("https://{client_id}.webclimber.de/de/trafficlight?key={token}")
}

/// The trafficlight page is built for human eyes: a status sentence that
/// usually (not always) leads with the free-slot count, and a progress bar
/// whose percentage width tracks occupancy. Whatever the page does not say
/// outright has to be reconstructed from the bar.
pub struct WebclimberParser;

impl WebclimberParser {
    pub fn new() -> Self {
        Self
    }
}

impl VendorParser for WebclimberParser {
    fn parse(&self, html: &str) -> Result<CrawlResult, ParseError> {
        let document = Html::parse_document(html);

        let free = status_free_slots(&document)?;
        let occupied_pct = bar_occupied_pct(&document)?;

        Ok(reconcile(free, occupied_pct))
    }
}

/// First whitespace token of the status text, as a number. Locations that
/// only show a phrase ("Es ist viel los") yield `Unknown`, which is a
/// regular outcome and not a failure.
fn status_free_slots(document: &Html) -> Result<FreeSlots, ParseError> {
    let selector =
        Selector::parse("div.status_text").map_err(|e| ParseError::Selector(e.to_string()))?;

    let text = document
        .select(&selector)
        .next()
        .ok_or_else(|| ParseError::MissingElement("status_text".to_string()))?
        .text()
        .collect::<String>();

    match text.trim().split_whitespace().next().and_then(|t| t.parse().ok()) {
        Some(n) => Ok(FreeSlots::Known(n)),
        None => Ok(FreeSlots::Unknown),
    }
}

/// Extracts the percentage width from the bar's inline style, a
/// semicolon-separated list of `property: value` pairs. The width is the
/// occupied share of capacity; a full bar means a full gym.
fn bar_occupied_pct(document: &Html) -> Result<u32, ParseError> {
    let selector = Selector::parse("div.bar").map_err(|e| ParseError::Selector(e.to_string()))?;

    let bar = document
        .select(&selector)
        .next()
        .ok_or_else(|| ParseError::MissingElement("bar".to_string()))?;

    let style = bar
        .value()
        .attr("style")
        .ok_or_else(|| ParseError::MissingAttribute("style".to_string()))?;

    let width = style
        .split(';')
        .filter_map(|entry| entry.split_once(':'))
        .find(|(name, _)| name.trim() == "width")
        .map(|(_, value)| value.trim())
        .ok_or_else(|| ParseError::MissingAttribute("width".to_string()))?;

    let pct: u32 = width
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| ParseError::Number {
            context: "bar width".to_string(),
            text: width.to_string(),
        })?;

    if pct > 100 {
        return Err(ParseError::WidthOutOfRange(pct));
    }

    Ok(pct)
}

/// Folds the two observations into final counts.
///
/// Without an exact free count the bar is all there is, so capacity is
/// normalized to 100 slots. With a known free count, total capacity is
/// reconstructed from the ratio the bar implies (floor division, percentage
/// as hundredths); width 0 would divide by zero there and is read as a
/// fully free gym instead. The final subtraction saturates: floor division
/// can reconstruct a total smaller than the free count it came from, and a
/// negative active count must never leave this function.
fn reconcile(free: FreeSlots, occupied_pct: u32) -> CrawlResult {
    match free {
        FreeSlots::Unknown => CrawlResult {
            free: 100 - occupied_pct,
            active: occupied_pct,
        },
        FreeSlots::Known(free) if occupied_pct == 0 => CrawlResult { free, active: 0 },
        FreeSlots::Known(free) => {
            let total = (free / occupied_pct) * 100;
            CrawlResult {
                free,
                active: total.saturating_sub(free),
            }
        }
    }
}
