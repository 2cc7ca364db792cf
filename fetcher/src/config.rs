use std::path::PathBuf;

pub const DEFAULT_STATION_QUERY: &str = "Bern";
pub const STATION_QUERY_VAR: &str = "PT_STATION_QUERY";
pub const LOG_FILE_VAR: &str = "DASHBOARD_LOG_FILE";

/// Station query baked in at build time, if any.
const BUILD_STATION_QUERY: Option<&str> = option_env!("PT_STATION_QUERY");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Free-text query resolved to a station on every transit poll.
    pub station_query: String,
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            station_query: DEFAULT_STATION_QUERY.to_string(),
            log_file: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self {
            station_query: resolve_station_query(
                std::env::var(STATION_QUERY_VAR).ok().as_deref(),
                BUILD_STATION_QUERY,
            ),
            log_file: non_empty(std::env::var(LOG_FILE_VAR).ok().as_deref()).map(PathBuf::from),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn resolve_station_query(runtime: Option<&str>, build_time: Option<&str>) -> String {
    non_empty(runtime)
        .or_else(|| non_empty(build_time))
        .unwrap_or(DEFAULT_STATION_QUERY)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_query_defaults_to_bern() {
        assert_eq!(resolve_station_query(None, None), "Bern");
        assert_eq!(resolve_station_query(Some("   "), Some("")), "Bern");
    }

    #[test]
    fn runtime_value_wins_over_build_time() {
        assert_eq!(resolve_station_query(Some(" Thun "), Some("Biel")), "Thun");
        assert_eq!(resolve_station_query(None, Some(" Biel ")), "Biel");
    }
}
