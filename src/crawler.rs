// Per-site dispatch: vendor tag -> adapter
use crate::config::SiteConfig;
use crate::model::{CrawlError, CrawlResult};
use crate::parser::{BoulderadoParser, VendorParser, WebclimberParser, boulderado, webclimber};
use crate::scraper::traits::Fetch;

/// Closed set of booking platforms an adapter exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorKind {
    Boulderado,
    Webclimber,
}

impl VendorKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "boulderado" => Some(Self::Boulderado),
            "webclimber" => Some(Self::Webclimber),
            _ => None,
        }
    }
}

/// Crawls one site: selects the adapter for the configured vendor tag,
/// fetches the occupancy page and parses it. An unrecognized tag fails
/// closed; the caller treats every error here as per-site and non-fatal.
pub async fn crawl_site(
    site_name: &str,
    site_config: &SiteConfig,
    fetcher: &dyn Fetch,
) -> Result<CrawlResult, CrawlError> {
    let kind = VendorKind::from_tag(&site_config.kind).ok_or_else(|| CrawlError::UnknownKind {
        site: site_name.to_string(),
        kind: site_config.kind.clone(),
    })?;

    match kind {
        VendorKind::Boulderado => {
            let url = boulderado::build_url(&site_config.token);
            let html = fetcher.get(&url).await?;
            Ok(BoulderadoParser::new().parse(&html)?)
        }
        VendorKind::Webclimber => {
            let client_id = site_config
                .client_id
                .as_deref()
                .ok_or_else(|| CrawlError::MissingClientId {
                    site: site_name.to_string(),
                })?;
            let url = webclimber::build_url(client_id, &site_config.token);
            let html = fetcher.get(&url).await?;
            Ok(WebclimberParser::new().parse(&html)?)
        }
    }
}
