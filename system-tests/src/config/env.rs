// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for storefront system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. When no GraphQL endpoint is
//! configured, suites run against the in-process storefront stub.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional run root override for artifacts.
    RunRoot,
    /// Live storefront GraphQL endpoint.
    GraphQlUrl,
    /// Live fixture service base URL.
    FixtureUrl,
    /// Optional `Store` header for GraphQL requests.
    StoreCode,
    /// Optional bearer token for the fixture service.
    BearerToken,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
}

impl SystemTestEnv {
    /// Every key, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::RunRoot,
        Self::GraphQlUrl,
        Self::FixtureUrl,
        Self::StoreCode,
        Self::BearerToken,
        Self::TimeoutSeconds,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "STOREFRONT_SYSTEM_TEST_RUN_ROOT",
            Self::GraphQlUrl => "STOREFRONT_SYSTEM_TEST_GRAPHQL_URL",
            Self::FixtureUrl => "STOREFRONT_SYSTEM_TEST_FIXTURE_URL",
            Self::StoreCode => "STOREFRONT_SYSTEM_TEST_STORE_CODE",
            Self::BearerToken => "STOREFRONT_SYSTEM_TEST_BEARER_TOKEN",
            Self::TimeoutSeconds => "STOREFRONT_SYSTEM_TEST_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Storefront the suites run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontTarget {
    /// Spawn the in-process storefront stub.
    Stub,
    /// Use a running storefront.
    Live {
        /// GraphQL endpoint.
        graphql_url: Url,
        /// Fixture service base URL.
        fixture_url: Url,
    },
}

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTestConfig {
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Storefront to test.
    pub target: StorefrontTarget,
    /// Optional `Store` header value.
    pub store_code: Option<String>,
    /// Optional fixture service bearer token.
    pub bearer_token: Option<String>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
}

impl Default for SystemTestConfig {
    fn default() -> Self {
        Self {
            run_root: None,
            target: StorefrontTarget::Stub,
            store_code: None,
            bearer_token: None,
            timeout: None,
        }
    }
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid timeout or URL, or a live
    /// GraphQL endpoint without a fixture service).
    pub fn load() -> Result<Self, String> {
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let graphql_url = read_env_nonempty(SystemTestEnv::GraphQlUrl.as_str())?
            .map(|value| parse_url(SystemTestEnv::GraphQlUrl.as_str(), &value))
            .transpose()?;
        let fixture_url = read_env_nonempty(SystemTestEnv::FixtureUrl.as_str())?
            .map(|value| parse_url(SystemTestEnv::FixtureUrl.as_str(), &value))
            .transpose()?;
        let target = match (graphql_url, fixture_url) {
            (None, None) => StorefrontTarget::Stub,
            (Some(graphql_url), Some(fixture_url)) => StorefrontTarget::Live {
                graphql_url,
                fixture_url,
            },
            (Some(_), None) => {
                return Err(format!(
                    "{} is required when {} is set",
                    SystemTestEnv::FixtureUrl.as_str(),
                    SystemTestEnv::GraphQlUrl.as_str()
                ));
            }
            (None, Some(_)) => {
                return Err(format!(
                    "{} is required when {} is set",
                    SystemTestEnv::GraphQlUrl.as_str(),
                    SystemTestEnv::FixtureUrl.as_str()
                ));
            }
        };
        let store_code = read_env_nonempty(SystemTestEnv::StoreCode.as_str())?;
        let bearer_token = read_env_nonempty(SystemTestEnv::BearerToken.as_str())?;
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        Ok(Self {
            run_root,
            target,
            store_code,
            bearer_token,
            timeout,
        })
    }

    /// Returns the effective timeout, using the override as a minimum.
    #[must_use]
    pub fn resolve_timeout(&self, requested: Duration) -> Duration {
        self.timeout.map_or(requested, |override_timeout| requested.max(override_timeout))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses an absolute `http`/`https` URL.
///
/// # Errors
///
/// Returns an error when the value is not a valid HTTP(S) URL.
fn parse_url(name: &str, raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|err| format!("{name} is not a valid url: {err}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("{name} must use http or https, got {other}")),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
