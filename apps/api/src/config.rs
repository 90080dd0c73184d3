use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every field has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub applications_page_size: usize,
    pub jobs_page_size: usize,
    pub exams_page_size: usize,
    pub users_page_size: usize,
    /// Simulated latency of a single screening call.
    pub screen_delay_ms: u64,
    /// Simulated latency of a bulk screening call.
    pub bulk_screen_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            applications_page_size: 6,
            jobs_page_size: 5,
            exams_page_size: 10,
            users_page_size: 5,
            screen_delay_ms: 900,
            bulk_screen_delay_ms: 1500,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            applications_page_size: page_size_env(
                "APPLICATIONS_PAGE_SIZE",
                defaults.applications_page_size,
            )?,
            jobs_page_size: page_size_env("JOBS_PAGE_SIZE", defaults.jobs_page_size)?,
            exams_page_size: page_size_env("EXAMS_PAGE_SIZE", defaults.exams_page_size)?,
            users_page_size: page_size_env("USERS_PAGE_SIZE", defaults.users_page_size)?,
            screen_delay_ms: env_or("SCREEN_DELAY_MS", defaults.screen_delay_ms)?,
            bulk_screen_delay_ms: env_or("BULK_SCREEN_DELAY_MS", defaults.bulk_screen_delay_ms)?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn page_size_env(key: &str, default: usize) -> Result<usize> {
    let size = env_or(key, default)?;
    if size == 0 {
        bail!("Environment variable '{key}' must be greater than zero");
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_board_layouts() {
        let config = Config::default();
        assert_eq!(config.applications_page_size, 6);
        assert_eq!(config.jobs_page_size, 5);
        assert_eq!(config.users_page_size, 5);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_env_or_falls_back_when_unset() {
        let value: u64 = env_or("HIREBOARD_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        std::env::set_var("HIREBOARD_TEST_ZERO_PAGE_SIZE", "0");
        let err = page_size_env("HIREBOARD_TEST_ZERO_PAGE_SIZE", 5).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        std::env::set_var("HIREBOARD_TEST_BAD_DELAY", "soon");
        let err = env_or::<u64>("HIREBOARD_TEST_BAD_DELAY", 900).unwrap_err();
        assert!(err.to_string().contains("HIREBOARD_TEST_BAD_DELAY"));
    }
}
