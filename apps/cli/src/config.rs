use std::collections::HashMap;
use std::fs;

#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub store_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_url: "http://127.0.0.1:4000".into(),
        }
    }
}

/// Defaults, then `guestlist.toml`, then environment overrides.
/// `APP__STORE_URL` is applied last and wins over
/// `GUESTLIST_STORE_URL` when both are set.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("guestlist.toml") {
        apply_file_settings(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("GUESTLIST_STORE_URL") {
        settings.store_url = v;
    }
    if let Some(v) = var("APP__STORE_URL") {
        settings.store_url = v;
    }
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("store_url") {
            settings.store_url = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_settings_override_the_default_store_url() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, "store_url = \"http://example.com:9000\"\n");
        assert_eq!(settings.store_url, "http://example.com:9000");
    }

    #[test]
    fn env_overrides_take_the_store_url_from_either_spelling() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |key| match key {
            "GUESTLIST_STORE_URL" => Some("http://plain:1".to_string()),
            _ => None,
        });
        assert_eq!(settings.store_url, "http://plain:1");
    }

    #[test]
    fn app_prefixed_env_var_wins_when_both_are_set() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |key| match key {
            "GUESTLIST_STORE_URL" => Some("http://plain:1".to_string()),
            "APP__STORE_URL" => Some("http://prefixed:2".to_string()),
            _ => None,
        });
        assert_eq!(settings.store_url, "http://prefixed:2");
    }

    #[test]
    fn unknown_keys_and_garbage_are_ignored() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, "other_key = \"value\"\n");
        assert_eq!(settings, Settings::default());

        apply_file_settings(&mut settings, "not toml at all [[");
        assert_eq!(settings, Settings::default());
    }
}
