use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

/// Connection parameters for the InfluxDB instance the points go to.
#[derive(Debug, Clone, Deserialize)]
pub struct InfluxConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// Static per-site data. The vendor tag stays a plain string here; the
/// dispatcher decides whether it names a known adapter, so a typo in one
/// site only takes down that site and not the whole config load.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub token: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub influx: InfluxConfig,
    pub sites: HashMap<String, SiteConfig>,
    /// When set, keep crawling in a loop; when absent, crawl once and exit.
    #[serde(default)]
    pub check_interval_seconds: Option<u64>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    10
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "influx": {
            "host": "localhost",
            "port": 8086,
            "username": "crawler",
            "password": "secret",
            "database": "boulder"
        },
        "sites": {
            "blockhelden-erlangen": {
                "token": "abc123",
                "type": "boulderado",
                "location": "Erlangen"
            },
            "kletterzentrum-city": {
                "token": "k3y",
                "type": "webclimber",
                "client_id": "cityclimb",
                "area": "boulder"
            }
        },
        "check_interval_seconds": 300
    }"#;

    #[test]
    fn parses_full_config() {
        let config: AppConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.influx.port, 8086);
        assert_eq!(config.sites.len(), 2);
        assert_eq!(config.check_interval_seconds, Some(300));
        assert_eq!(config.request_timeout_seconds, 10);

        let site = &config.sites["kletterzentrum-city"];
        assert_eq!(site.kind, "webclimber");
        assert_eq!(site.client_id.as_deref(), Some("cityclimb"));
        assert_eq!(site.area.as_deref(), Some("boulder"));
        assert_eq!(site.location, None);
    }

    #[test]
    fn interval_defaults_to_run_once() {
        let trimmed = SAMPLE.replace("\"check_interval_seconds\": 300", "\"check_interval_seconds\": null");
        let config: AppConfig = serde_json::from_str(&trimmed).unwrap();
        assert_eq!(config.check_interval_seconds, None);
    }

    #[test]
    fn unknown_vendor_tag_survives_parsing() {
        // Dispatch, not deserialization, rejects unknown tags.
        let json = r#"{"token": "t", "type": "magic-gym"}"#;
        let site: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(site.kind, "magic-gym");
    }
}
