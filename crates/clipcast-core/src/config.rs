use chrono::FixedOffset;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

// Scheduling constants — five coarse daily windows with per-day minute jitter.
pub const DEFAULT_SLOT_HOURS: [u8; 5] = [8, 11, 14, 17, 20];
pub const DEFAULT_GRACE_MINUTES: i64 = 10;
/// Paris offset in minutes (CEST). Override per deployment.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 120;
/// Hard cap the upload tool accepts for titles.
pub const DEFAULT_TITLE_MAX_CHARS: usize = 95;

/// Top-level config (clipcast.toml + CLIPCAST_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClipcastConfig {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub publish: PublishConfig,
    /// Attempt a publish immediately even when no slot window is open
    /// (manual/testing escape hatch — also exposed as the `--force` flag).
    #[serde(default)]
    pub force: bool,
}

/// Remote video library (Google Drive) settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LibraryConfig {
    /// Drive folder IDs scanned for candidates, in no particular order.
    #[serde(default)]
    pub folder_ids: Vec<String>,
    /// Base64-encoded service account JSON key blob.
    #[serde(default)]
    pub service_account_b64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Target posting hours, one slot per entry, in posting order.
    #[serde(default = "default_hours")]
    pub hours: Vec<u8>,
    /// How long after a slot's start a late cycle may still claim it.
    #[serde(default = "default_grace")]
    pub grace_minutes: i64,
    /// Fixed UTC offset of the posting timezone, in minutes.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hours: default_hours(),
            grace_minutes: default_grace(),
            utc_offset_minutes: default_utc_offset(),
        }
    }
}

impl ScheduleConfig {
    /// Resolve the configured offset, rejecting out-of-range values.
    pub fn offset(&self) -> crate::error::Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            crate::error::CoreError::Config(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            ))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory holding the two persisted documents
    /// (`used.json`, `schedule.json`).
    #[serde(default = "default_state_dir")]
    pub dir: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            dir: default_state_dir(),
        }
    }
}

/// Upload-tool invocation and metadata pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Upload tool binary — invoked once per publish, retried once with a
    /// reduced argument set on failure.
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_client_secrets")]
    pub client_secrets: String,
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
    #[serde(default = "default_privacy")]
    pub privacy: String,
    /// Optional platform category; omitted entirely on the fallback attempt.
    #[serde(default = "default_category")]
    pub category: Option<String>,
    #[serde(default = "default_title_max")]
    pub title_max_chars: usize,
    /// Description pool — one entry is drawn per publish.
    #[serde(default = "default_descriptions")]
    pub descriptions: Vec<String>,
    /// Tag pool — a randomly sized subset is drawn per publish.
    #[serde(default = "default_tag_pool")]
    pub tag_pool: Vec<String>,
    /// Marker appended to the description when neither the title nor the
    /// description carries it already.
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            client_secrets: default_client_secrets(),
            credentials_file: default_credentials_file(),
            privacy: default_privacy(),
            category: default_category(),
            title_max_chars: default_title_max(),
            descriptions: default_descriptions(),
            tag_pool: default_tag_pool(),
            marker: default_marker(),
        }
    }
}

fn default_hours() -> Vec<u8> {
    DEFAULT_SLOT_HOURS.to_vec()
}
fn default_grace() -> i64 {
    DEFAULT_GRACE_MINUTES
}
fn default_utc_offset() -> i32 {
    DEFAULT_UTC_OFFSET_MINUTES
}
fn default_state_dir() -> String {
    "state".to_string()
}
fn default_command() -> String {
    "youtube-upload".to_string()
}
fn default_client_secrets() -> String {
    "client_secrets.json".to_string()
}
fn default_credentials_file() -> String {
    "youtube_credentials.json".to_string()
}
fn default_privacy() -> String {
    "public".to_string()
}
fn default_category() -> Option<String> {
    Some("22".to_string())
}
fn default_title_max() -> usize {
    DEFAULT_TITLE_MAX_CHARS
}
fn default_descriptions() -> Vec<String> {
    vec![
        "Compilation of the day #Shorts".to_string(),
        "Today's highlight — subscribe! #Shorts".to_string(),
        "Quick clip #Shorts".to_string(),
    ]
}
fn default_tag_pool() -> Vec<String> {
    vec![
        "shorts".to_string(),
        "fun".to_string(),
        "daily".to_string(),
        "clips".to_string(),
        "highlights".to_string(),
    ]
}
fn default_marker() -> String {
    "#Shorts".to_string()
}

impl ClipcastConfig {
    /// Load config from a TOML file with CLIPCAST_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.clipcast/clipcast.toml
    ///
    /// The bare env vars `CLIPCAST_FOLDER_IDS` (comma-separated) and
    /// `CLIPCAST_SA_JSON_B64` fill the library section when the file leaves
    /// it empty, so a cron deployment needs no TOML at all.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let mut config: ClipcastConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CLIPCAST_").split("__"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        if config.library.folder_ids.is_empty() {
            if let Ok(raw) = std::env::var("CLIPCAST_FOLDER_IDS") {
                config.library.folder_ids = parse_folder_ids(&raw);
            }
        }
        if config.library.service_account_b64.is_empty() {
            if let Ok(blob) = std::env::var("CLIPCAST_SA_JSON_B64") {
                config.library.service_account_b64 = blob;
            }
        }

        Ok(config)
    }

    /// Reject configs that cannot run a cycle. Called once at startup;
    /// everything downstream assumes a valid config.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.library.folder_ids.is_empty() {
            return Err(crate::error::CoreError::Config(
                "no source folders configured — set library.folder_ids or CLIPCAST_FOLDER_IDS"
                    .to_string(),
            ));
        }
        if self.library.service_account_b64.is_empty() {
            return Err(crate::error::CoreError::Config(
                "no service account key — set library.service_account_b64 or CLIPCAST_SA_JSON_B64"
                    .to_string(),
            ));
        }
        if self.schedule.hours.is_empty() {
            return Err(crate::error::CoreError::Config(
                "schedule.hours must name at least one posting hour".to_string(),
            ));
        }
        self.schedule.offset().map(|_| ())
    }
}

/// Split a comma-separated folder-id list, dropping empty entries.
pub fn parse_folder_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.clipcast/clipcast.toml", home)
}
