use std::str::FromStr;

use crate::app_config::AppConfig;
use crate::error::ConfigError;
use crate::geo::Coordinate;
use crate::region::{RegionPolicy, MAX_KEYWORD_CHARS};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let kakao_api_key = require("KAKAO_REST_API_KEY")?;
    let llm_api_key = require("OPENAI_API_KEY")?;

    let kakao_base_url = or_default("LOCALGUIDE_KAKAO_BASE_URL", "https://dapi.kakao.com/");
    let llm_base_url = or_default("LOCALGUIDE_LLM_BASE_URL", "https://api.openai.com/v1/");
    let llm_model = or_default("LOCALGUIDE_LLM_MODEL", "gpt-4o-mini");
    let log_level = or_default("LOCALGUIDE_LOG_LEVEL", "info");
    let user_agent = or_default(
        "LOCALGUIDE_USER_AGENT",
        "localguide/0.1 (local-recommendation)",
    );

    let request_timeout_secs: u64 =
        parse_or(&lookup, "LOCALGUIDE_REQUEST_TIMEOUT_SECS", "5")?;
    let max_retries: u32 = parse_or(&lookup, "LOCALGUIDE_MAX_RETRIES", "1")?;
    let retry_backoff_base_ms: u64 =
        parse_or(&lookup, "LOCALGUIDE_RETRY_BACKOFF_BASE_MS", "250")?;

    let defaults = RegionPolicy::default();
    let lon: f64 = parse_or(
        &lookup,
        "LOCALGUIDE_REGION_LON",
        &defaults.bias.lon.to_string(),
    )?;
    let lat: f64 = parse_or(
        &lookup,
        "LOCALGUIDE_REGION_LAT",
        &defaults.bias.lat.to_string(),
    )?;
    let bias = Coordinate::new(lon, lat).map_err(|e| ConfigError::InvalidEnvVar {
        var: "LOCALGUIDE_REGION_LON".to_string(),
        reason: e.to_string(),
    })?;

    let region = RegionPolicy {
        name: or_default("LOCALGUIDE_REGION_NAME", &defaults.name)
            .trim()
            .to_string(),
        bias,
        landmarks: parse_list(&or_default(
            "LOCALGUIDE_LANDMARKS",
            &defaults.landmarks.join(","),
        )),
        default_keyword: or_default("LOCALGUIDE_DEFAULT_KEYWORD", &defaults.default_keyword)
            .trim()
            .to_string(),
        search_radius_m: parse_or(
            &lookup,
            "LOCALGUIDE_SEARCH_RADIUS_M",
            &defaults.search_radius_m.to_string(),
        )?,
        station_query: or_default("LOCALGUIDE_STATION_QUERY", &defaults.station_query),
        station_radius_m: parse_or(
            &lookup,
            "LOCALGUIDE_STATION_RADIUS_M",
            &defaults.station_radius_m.to_string(),
        )?,
        result_limit: parse_or(
            &lookup,
            "LOCALGUIDE_RESULT_LIMIT",
            &defaults.result_limit.to_string(),
        )?,
    };

    if region.name.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOCALGUIDE_REGION_NAME".to_string(),
            reason: "must not be blank".to_string(),
        });
    }
    if region.default_keyword.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOCALGUIDE_DEFAULT_KEYWORD".to_string(),
            reason: "must not be blank".to_string(),
        });
    }
    if region.default_keyword.trim().chars().count() > MAX_KEYWORD_CHARS {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOCALGUIDE_DEFAULT_KEYWORD".to_string(),
            reason: format!("must be at most {MAX_KEYWORD_CHARS} characters"),
        });
    }
    if region.result_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOCALGUIDE_RESULT_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        kakao_api_key,
        llm_api_key,
        kakao_base_url,
        llm_base_url,
        llm_model,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        region,
    })
}

/// Parse `var` from the lookup, or `default` when it is unset.
fn parse_or<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Split a comma-separated list, dropping blank entries.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
