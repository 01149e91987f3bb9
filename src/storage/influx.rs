// InfluxDB 1.x line-protocol writer
use crate::config::InfluxConfig;
use crate::model::{MetricPoint, StoreError};

use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

pub struct InfluxWriter {
    write_url: String,
    database: String,
    username: String,
    password: String,
    client: Client,
}

impl InfluxWriter {
    pub fn new(config: &InfluxConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("❗ Failed to create HTTP client");

        Self {
            write_url: format!("http://{}:{}/write", config.host, config.port),
            database: config.database.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            client,
        }
    }

    /// Writes the whole batch in a single call. An empty cycle is not an
    /// error; the call is skipped entirely.
    pub async fn write_points(&self, points: &[MetricPoint]) -> Result<(), StoreError> {
        if points.is_empty() {
            debug!("no points to write, skipping influx call");
            return Ok(());
        }

        let body = points.iter().map(to_line).collect::<Vec<_>>().join("\n");

        let response = match timeout(
            Duration::from_secs(10),
            self.client
                .post(&self.write_url)
                .query(&[
                    ("db", self.database.as_str()),
                    ("u", self.username.as_str()),
                    ("p", self.password.as_str()),
                    ("precision", "ms"),
                ])
                .body(body)
                .send(),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                warn!("❌ influx send() failed: {:?}", e);
                return Err(StoreError::Http(e.to_string()));
            }
            Err(_) => {
                warn!("⏳ influx send() timed out");
                return Err(StoreError::Timeout);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("❌ influx rejected batch [{}]: {}", status, body);
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("✅ wrote {} points to influx [{}]", points.len(), status);
        Ok(())
    }
}

/// Line protocol, v1 flavor: `measurement,tags fields timestamp`.
fn to_line(point: &MetricPoint) -> String {
    let mut line = String::new();
    line.push_str(point.measurement);
    line.push_str(",location=");
    line.push_str(&escape_tag(&point.location));
    if let Some(area) = &point.area {
        line.push_str(",area=");
        line.push_str(&escape_tag(area));
    }
    line.push_str(&format!(
        " free={}i,active={}i {}",
        point.free,
        point.active,
        point.time.timestamp_millis()
    ));
    line
}

/// Commas, spaces and equals signs separate the tag section and have to be
/// backslash-escaped inside tag values.
fn escape_tag(value: &str) -> String {
    value
        .replace(',', "\\,")
        .replace('=', "\\=")
        .replace(' ', "\\ ")
}
