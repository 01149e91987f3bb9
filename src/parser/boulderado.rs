// Boulderado-specific HTML parsing
use crate::model::{CrawlResult, ParseError};
use crate::parser::VendorParser;
use scraper::{Html, Selector};

pub fn build_url(token: &str) -> String {
    format!("https://www.boulderado.de/boulderadoweb/gym-clientcounter/index.php?mode=get&token={token}")
}

/// The easy vendor: the counter page carries both numbers directly.
pub struct BoulderadoParser;

impl BoulderadoParser {
    pub fn new() -> Self {
        Self
    }
}

impl VendorParser for BoulderadoParser {
    fn parse(&self, html: &str) -> Result<CrawlResult, ParseError> {
        let document = Html::parse_document(html);

        let active = counter_value(&document, "actcounter-content")?;
        let free = counter_value(&document, "freecounter-content")?;

        Ok(CrawlResult { free, active })
    }
}

/// Both counters share the same markup: a classed div wrapping a span that
/// holds the bare number.
fn counter_value(document: &Html, class: &str) -> Result<u32, ParseError> {
    let selector = Selector::parse(&format!("div.{class} span"))
        .map_err(|e| ParseError::Selector(e.to_string()))?;

    let text = document
        .select(&selector)
        .next()
        .ok_or_else(|| ParseError::MissingElement(class.to_string()))?
        .text()
        .collect::<String>();

    let trimmed = text.trim();
    trimmed.parse().map_err(|_| ParseError::Number {
        context: class.to_string(),
        text: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTER_PAGE: &str = r#"
        <html><body>
            <div class="actcounter zoom">
                <div class="actcounter-content"><span>12</span></div>
            </div>
            <div class="freecounter zoom">
                <div class="freecounter-content"><span>8</span></div>
            </div>
        </body></html>
    "#;

    #[test]
    fn extracts_both_counters() {
        let result = BoulderadoParser::new().parse(COUNTER_PAGE).unwrap();
        assert_eq!(result, CrawlResult { free: 8, active: 12 });
    }

    #[test]
    fn tolerates_whitespace_around_numbers() {
        let html = COUNTER_PAGE.replace("<span>12</span>", "<span> 12\n</span>");
        let result = BoulderadoParser::new().parse(&html).unwrap();
        assert_eq!(result.active, 12);
    }

    #[test]
    fn missing_active_counter_is_an_error() {
        let html = COUNTER_PAGE.replace("actcounter-content", "somethingelse");
        let err = BoulderadoParser::new().parse(&html).unwrap_err();
        assert!(matches!(err, ParseError::MissingElement(ref e) if e == "actcounter-content"));
    }

    #[test]
    fn missing_free_counter_is_an_error() {
        let html = COUNTER_PAGE.replace("freecounter-content", "somethingelse");
        let err = BoulderadoParser::new().parse(&html).unwrap_err();
        assert!(matches!(err, ParseError::MissingElement(ref e) if e == "freecounter-content"));
    }

    #[test]
    fn non_numeric_counter_is_an_error() {
        let html = COUNTER_PAGE.replace("<span>12</span>", "<span>geschlossen</span>");
        let err = BoulderadoParser::new().parse(&html).unwrap_err();
        assert!(matches!(err, ParseError::Number { .. }));
    }

    #[test]
    fn url_embeds_token() {
        let url = build_url("abc123");
        assert_eq!(
            url,
            "https://www.boulderado.de/boulderadoweb/gym-clientcounter/index.php?mode=get&token=abc123"
        );
    }
}
