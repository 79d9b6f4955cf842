//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and fetch behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Monitoring loop settings
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Branch code table (code -> schedule service id)
    #[serde(default = "defaults::default_branches")]
    pub branches: Vec<BranchInfo>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        Url::parse(&self.fetch.endpoint)?;
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.max_concurrent == 0 {
            return Err(AppError::validation("fetch.max_concurrent must be > 0"));
        }
        if self.monitor.poll_interval_secs == 0 {
            return Err(AppError::validation("monitor.poll_interval_secs must be > 0"));
        }
        if self.monitor.error_backoff_secs == 0 {
            return Err(AppError::validation("monitor.error_backoff_secs must be > 0"));
        }
        if self.monitor.message_template.trim().is_empty() {
            return Err(AppError::validation("monitor.message_template is empty"));
        }
        if self.branches.is_empty() {
            return Err(AppError::validation("No branches defined"));
        }
        let mut codes: Vec<&str> = self.branches.iter().map(|b| b.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        if codes.len() != self.branches.len() {
            return Err(AppError::validation("Duplicate branch codes defined"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            monitor: MonitorConfig::default(),
            branches: defaults::default_branches(),
        }
    }
}

/// HTTP client and fetch behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Schedule service endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Program level key sent as a query parameter
    #[serde(default = "defaults::program_level")]
    pub program_level: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent branch fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            program_level: defaults::program_level(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Monitoring loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Sleep between cycles in seconds
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_secs: u64,

    /// Shorter sleep after a failed cycle in seconds
    #[serde(default = "defaults::error_backoff")]
    pub error_backoff_secs: u64,

    /// Notification text template (placeholder substitution)
    #[serde(default = "defaults::message_template")]
    pub message_template: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: defaults::poll_interval(),
            error_backoff_secs: defaults::error_backoff(),
            message_template: defaults::message_template(),
        }
    }
}

/// One branch of the course catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchInfo {
    /// Course-code prefix (e.g. "MAT")
    pub code: String,

    /// Schedule service lookup id
    pub id: u32,

    /// Human-readable branch name
    pub name: String,
}

mod defaults {
    use super::BranchInfo;

    // Fetch defaults
    pub fn endpoint() -> String {
        "https://obs.itu.edu.tr/public/DersProgram/DersProgramSearch".into()
    }
    pub fn program_level() -> String {
        "LS".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; seatwatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        5
    }

    // Monitor defaults
    pub fn poll_interval() -> u64 {
        240
    }
    pub fn error_backoff() -> u64 {
        60
    }
    pub fn message_template() -> String {
        "Kontenjan açıldı!\n\
         Ders: {title}\n\
         Ders Kodu: {course_code}\n\
         Mevcut Kontenjan: {seats}\n\
         CRN: {crn}\n\
         Öğretim Üyesi: {instructor}\n\
         Derslik: {room}\n\
         Saat: {start} - {end}\n\
         Gün: {weekday}"
            .into()
    }

    // Branch defaults
    pub fn default_branches() -> Vec<BranchInfo> {
        fn branch(code: &str, id: u32, name: &str) -> BranchInfo {
            BranchInfo {
                code: code.to_string(),
                id,
                name: name.to_string(),
            }
        }

        vec![
            branch("EHB", 196, "Elektronik ve Haberleşme Mühendisliği"),
            branch("MAT", 26, "Matematik"),
            branch("FIZ", 28, "Fizik"),
            branch("BIO", 30, "Biyoloji"),
            branch("BIL", 32, "Bilgisayar Mühendisliği"),
            branch("MAK", 34, "Makine Mühendisliği"),
            branch("INS", 36, "İnşaat Mühendisliği"),
            branch("ELE", 38, "Elektrik Mühendisliği"),
            branch("END", 40, "Endüstri Mühendisliği"),
            branch("KIM", 64, "Kimya Mühendisliği"),
            branch("KON", 66, "Kontrol Mühendisliği"),
            branch("MIM", 68, "Mimarlık"),
            branch("SEH", 70, "Şehir ve Bölge Planlama"),
            branch("GEO", 72, "Geomatik Mühendisliği"),
            branch("GID", 74, "Gıda Mühendisliği"),
            branch("CEV", 76, "Çevre Mühendisliği"),
            branch("PET", 78, "Petrol ve Doğalgaz Mühendisliği"),
            branch("MET", 80, "Metalurji ve Malzeme Mühendisliği"),
            branch("MAD", 82, "Maden Mühendisliği"),
            branch("JEO", 84, "Jeoloji Mühendisliği"),
            branch("JEF", 86, "Jeofizik Mühendisliği"),
            branch("GEM", 88, "Gemi Mühendisliği"),
            branch("UCA", 90, "Uçak Mühendisliği"),
            branch("UZA", 92, "Uzay Mühendisliği"),
            branch("TEK", 94, "Tekstil Mühendisliği"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.fetch.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = Config::default();
        config.monitor.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_branch_codes() {
        let mut config = Config::default();
        let dup = config.branches[0].clone();
        config.branches.push(dup);
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_branches_are_unique() {
        let config = Config::default();
        assert!(!config.branches.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.fetch.endpoint, config.fetch.endpoint);
        assert_eq!(back.branches.len(), config.branches.len());
    }
}
