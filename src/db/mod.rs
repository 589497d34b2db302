use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};

/// Error type for settings persistence on native platforms
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct DbError(String);

#[cfg(not(target_arch = "wasm32"))]
impl DbError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl std::fmt::Display for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl std::error::Error for DbError {}

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "tilawah.player_settings";

/// Listening preferences that survive a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    pub volume: f64,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub repeat_enabled: bool,
    #[serde(default)]
    pub shuffle_enabled: bool,
    #[serde(default = "default_show_text")]
    pub show_text: bool,
}

fn default_show_text() -> bool {
    true
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            muted: false,
            repeat_enabled: false,
            shuffle_enabled: false,
            show_text: true,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: PlayerSettings) -> Result<(), DbError> {
    let conn = get_db_connection()?;

    let settings_json =
        serde_json::to_string(&settings).map_err(|e| DbError::new(e.to_string()))?;

    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES ('player_settings', ?1)",
        [&settings_json],
    )
    .map_err(|e| DbError::new(e.to_string()))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: PlayerSettings) -> Result<(), StorageError> {
    LocalStorage::set(SETTINGS_KEY, settings)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<PlayerSettings, DbError> {
    let conn = get_db_connection()?;

    let result: Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM settings WHERE key = 'player_settings'",
        [],
        |row: &rusqlite::Row| row.get(0),
    );

    match result {
        Ok(json) => serde_json::from_str(&json).map_err(|e| DbError::new(e.to_string())),
        Err(_) => Ok(PlayerSettings::default()),
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<PlayerSettings, StorageError> {
    match LocalStorage::get(SETTINGS_KEY) {
        Ok(settings) => Ok(settings),
        Err(_) => Ok(PlayerSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_database() -> Result<(), DbError> {
    let conn = get_db_connection()?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DbError::new(e.to_string()))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn initialize_database() -> Result<(), StorageError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, DbError> {
    use std::path::PathBuf;

    let data_dir = dirs::data_dir()
        .map(|dir: PathBuf| dir.join("tilawah"))
        .unwrap_or_else(|| PathBuf::from(".tilawah"));
    std::fs::create_dir_all(&data_dir).map_err(|e| DbError::new(e.to_string()))?;
    let db_path = data_dir.join("tilawah.db");

    rusqlite::Connection::open(&db_path)
        .map_err(|e| DbError::new(format!("Failed to open database: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_is_audible_with_text_shown() {
        let settings = PlayerSettings::default();
        assert!(settings.volume > 0.0);
        assert!(!settings.muted);
        assert!(settings.show_text);
    }

    #[test]
    fn show_text_survives_a_save_load_round_trip() {
        let stored = PlayerSettings {
            show_text: false,
            ..PlayerSettings::default()
        };
        let json = serde_json::to_string(&stored).unwrap();
        let restored: PlayerSettings = serde_json::from_str(&json).unwrap();
        assert!(!restored.show_text);
        assert_eq!(restored, stored);
    }

    #[test]
    fn settings_decode_fills_missing_fields() {
        let settings: PlayerSettings = serde_json::from_str(r#"{"volume":0.4}"#).unwrap();
        assert_eq!(settings.volume, 0.4);
        assert!(!settings.repeat_enabled);
        assert!(settings.show_text);
    }
}
