//! The status snapshot returned by the collector.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Point-in-time description of the running deployment.
///
/// Serializes with stable camelCase keys in declaration order. Every key is
/// always present: values that could not be determined serialize as `null`
/// (or an empty string for the OS fields), never as a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub framework: String,
    pub framework_version: String,
    /// `"MAJOR.MINOR"` of `framework_version`.
    pub framework_major_version: String,
    pub framework_end_of_maintenance: Option<NaiveDate>,
    pub framework_end_of_life: Option<NaiveDate>,
    pub environment: String,
    // Runtime keys are fixed by the monitor contract.
    #[serde(rename = "phpMajorVersion")]
    pub runtime_major_version: String,
    #[serde(rename = "phpVersion")]
    pub runtime_version: String,
    pub server_software: String,
    /// Request host as supplied by the caller. Untrusted.
    pub host: String,
    pub server_operating_system: String,
    pub server_operating_system_version: String,
    pub server_name: String,
    pub server_ip: Option<String>,
    pub db_server: Option<String>,
    pub db_version: Option<String>,
    /// Diagnostic from the database probe, if it failed part-way.
    pub db_error: Option<String>,
    #[serde(with = "atom")]
    pub generated_at: DateTime<FixedOffset>,
}

impl Snapshot {
    /// Serialized keys, in output order.
    pub const FIELDS: [&'static str; 18] = [
        "framework",
        "frameworkVersion",
        "frameworkMajorVersion",
        "frameworkEndOfMaintenance",
        "frameworkEndOfLife",
        "environment",
        "phpMajorVersion",
        "phpVersion",
        "serverSoftware",
        "host",
        "serverOperatingSystem",
        "serverOperatingSystemVersion",
        "serverName",
        "serverIp",
        "dbServer",
        "dbVersion",
        "dbError",
        "generatedAt",
    ];

    /// Compact JSON body, unicode and slashes left unescaped.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Indented JSON, for humans.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// RFC 3339 timestamps with whole seconds and a numeric offset
/// (`2025-01-31T09:15:00+01:00`).
mod atom {
    use chrono::{DateTime, FixedOffset, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}
