//! Environment-driven configuration for the discovery clients.

const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_OVERPASS_BASE_URL: &str = "https://overpass-api.de";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_INTER_QUERY_DELAY_MS: u64 = 500;
const DEFAULT_USER_AGENT: &str = "VendingHive/1.0 (location discovery)";

/// Knobs for the Nominatim and Overpass clients.
///
/// `inter_query_delay_ms` is the politeness pause between consecutive
/// tag-filter queries inside a single search. It is a fixed delay, not a
/// backoff; tests set it to `0` so nothing sleeps.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_query_delay_ms: u64,
    pub geocoder_base_url: String,
    pub overpass_base_url: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            inter_query_delay_ms: DEFAULT_INTER_QUERY_DELAY_MS,
            geocoder_base_url: DEFAULT_GEOCODER_BASE_URL.to_string(),
            overpass_base_url: DEFAULT_OVERPASS_BASE_URL.to_string(),
        }
    }
}

impl LocatorConfig {
    /// Loads configuration from `VENDINGHIVE_*` environment variables,
    /// falling back to the defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            request_timeout_secs: env_u64(
                "VENDINGHIVE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            user_agent: env_string("VENDINGHIVE_USER_AGENT", defaults.user_agent),
            inter_query_delay_ms: env_u64(
                "VENDINGHIVE_INTER_QUERY_DELAY_MS",
                defaults.inter_query_delay_ms,
            ),
            geocoder_base_url: env_string(
                "VENDINGHIVE_GEOCODER_BASE_URL",
                defaults.geocoder_base_url,
            ),
            overpass_base_url: env_string(
                "VENDINGHIVE_OVERPASS_BASE_URL",
                defaults.overpass_base_url,
            ),
        }
    }
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let config = LocatorConfig::default();
        assert_eq!(
            config.geocoder_base_url,
            "https://nominatim.openstreetmap.org"
        );
        assert_eq!(config.overpass_base_url, "https://overpass-api.de");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.inter_query_delay_ms, 500);
    }
}
