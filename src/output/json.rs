//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The resource or resources
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// When the output was produced
    pub timestamp: String,

    /// hnyctl version
    pub version: String,

    /// Team the data belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T, team: Option<&str>) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                team: team.map(str::to_string),
            },
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(
    data: &T,
    team: Option<&str>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data, team))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize)]
    struct KeyRow {
        id: String,
        key_type: String,
    }

    #[test]
    fn test_meta_carries_team() {
        let result = format_json(
            &vec![KeyRow {
                id: "hcxik_01".to_string(),
                key_type: "ingest".to_string(),
            }],
            Some("acme"),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["data"][0]["id"], "hcxik_01");
        assert_eq!(value["meta"]["team"], "acme");
        assert_eq!(value["meta"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(value["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_meta_without_team() {
        let items: Vec<KeyRow> = vec![];
        let result = format_json(&items, None).unwrap();

        assert!(result.contains("\"data\": []"));
        assert!(!result.contains("\"team\""));
    }
}
