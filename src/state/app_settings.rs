use log::LevelFilter;
use mlb_api::client::RecordsSource;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_API_URL: &str = "MLBSTAND_API_URL";
pub const ENV_RECORDS_JSON: &str = "MLBSTAND_RECORDS_JSON";
pub const ENV_LOG: &str = "MLBSTAND_LOG";
pub const ENV_TIMEOUT_SECS: &str = "MLBSTAND_TIMEOUT_SECS";

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub source: RecordsSource,
    pub timeout: Option<Duration>,
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from a variable lookup. A local records file wins over
    /// the endpoint override; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source = if let Some(path) = var(ENV_RECORDS_JSON) {
            RecordsSource::File(PathBuf::from(path))
        } else if let Some(url) = var(ENV_API_URL) {
            RecordsSource::Remote(url)
        } else {
            RecordsSource::default()
        };

        Self {
            full_screen: false,
            log_level: var(ENV_LOG).and_then(|v| LevelFilter::from_str(v.trim()).ok()),
            source,
            timeout: var(ENV_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlb_api::client::DEFAULT_ENDPOINT;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_the_records_endpoint() {
        let s = settings(&[]);
        assert_eq!(s.source, RecordsSource::Remote(DEFAULT_ENDPOINT.into()));
        assert_eq!(s.log_level, None);
        assert_eq!(s.timeout, None);
        assert!(!s.full_screen);
    }

    #[test]
    fn endpoint_can_be_overridden() {
        let s = settings(&[(ENV_API_URL, "http://localhost:9000/records")]);
        assert_eq!(s.source, RecordsSource::Remote("http://localhost:9000/records".into()));
    }

    #[test]
    fn local_file_takes_precedence_over_endpoint() {
        let s = settings(&[
            (ENV_API_URL, "http://localhost:9000/records"),
            (ENV_RECORDS_JSON, "/tmp/records.json"),
        ]);
        assert_eq!(s.source, RecordsSource::File(PathBuf::from("/tmp/records.json")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let s = settings(&[(ENV_RECORDS_JSON, "  "), (ENV_LOG, "")]);
        assert_eq!(s.source, RecordsSource::default());
        assert_eq!(s.log_level, None);
    }

    #[test]
    fn parses_log_level_and_timeout() {
        let s = settings(&[(ENV_LOG, "debug"), (ENV_TIMEOUT_SECS, "3")]);
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(s.timeout, Some(Duration::from_secs(3)));

        let s = settings(&[(ENV_LOG, "chatty"), (ENV_TIMEOUT_SECS, "soon")]);
        assert_eq!(s.log_level, None);
        assert_eq!(s.timeout, None);
    }
}
