use crate::config::SiteConfig;
use crate::model::{CrawlResult, MetricPoint};
use chrono::Utc;

/// Measurement every site reports under.
pub const MEASUREMENT: &str = "boulder_center_utilization";

/// Builds the point for one crawl result. The location tag falls back to the
/// site's config key; the area tag is only set when configured. The
/// timestamp is taken here, at construction time.
pub fn build_point(site_name: &str, site_config: &SiteConfig, result: &CrawlResult) -> MetricPoint {
    let location = site_config
        .location
        .clone()
        .unwrap_or_else(|| site_name.to_string());

    MetricPoint {
        measurement: MEASUREMENT,
        location,
        area: site_config.area.clone(),
        time: Utc::now(),
        free: result.free,
        active: result.active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(location: Option<&str>, area: Option<&str>) -> SiteConfig {
        SiteConfig {
            token: "tok".to_string(),
            kind: "boulderado".to_string(),
            area: area.map(str::to_string),
            client_id: None,
            location: location.map(str::to_string),
        }
    }

    const RESULT: CrawlResult = CrawlResult { free: 8, active: 12 };

    #[test]
    fn location_defaults_to_site_name() {
        let point = build_point("blockhelden-erlangen", &site(None, None), &RESULT);
        assert_eq!(point.location, "blockhelden-erlangen");
        assert_eq!(point.area, None);
    }

    #[test]
    fn configured_location_wins() {
        let point = build_point("blockhelden-erlangen", &site(Some("Erlangen"), None), &RESULT);
        assert_eq!(point.location, "Erlangen");
    }

    #[test]
    fn area_tag_is_carried_when_present() {
        let point = build_point("hall", &site(None, Some("boulder")), &RESULT);
        assert_eq!(point.area.as_deref(), Some("boulder"));
    }

    #[test]
    fn fields_mirror_the_crawl_result() {
        let point = build_point("hall", &site(None, None), &RESULT);
        assert_eq!(point.measurement, "boulder_center_utilization");
        assert_eq!(point.free, 8);
        assert_eq!(point.active, 12);
    }

    #[test]
    fn repeated_builds_differ_only_in_timestamp() {
        let config = site(Some("Erlangen"), Some("boulder"));
        let a = build_point("hall", &config, &RESULT);
        let b = build_point("hall", &config, &RESULT);
        assert_eq!((a.measurement, &a.location, &a.area, a.free, a.active),
                   (b.measurement, &b.location, &b.area, b.free, b.active));
        assert!(b.time >= a.time);
    }
}
