pub mod boulderado;
pub mod webclimber;

pub use self::boulderado::BoulderadoParser;
pub use self::webclimber::WebclimberParser;

use crate::model::{CrawlResult, ParseError};

/// Vendor-specific occupancy page parser. One implementation per booking
/// platform; each takes the raw markup and recovers the two slot counts.
pub trait VendorParser {
    fn parse(&self, html: &str) -> Result<CrawlResult, ParseError>;
}
