//! Site-wide settings.

use muse_sdk::types::{ApiKey, Settings};
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::info;

/// Partial settings update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub site_title: Option<String>,
    pub api_keys: Option<Vec<ApiKey>>,
}

/// Holds the single settings record.
#[derive(Debug)]
pub struct SettingsService {
    settings: RwLock<Settings>,
}

impl SettingsService {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            settings: RwLock::new(Settings {
                site_title: site_title.into(),
                api_keys: Vec::new(),
            }),
        }
    }

    pub fn get(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Overwrite the whole record, e.g. from an import or snapshot.
    pub fn replace(&self, settings: Settings) {
        info!(site_title = %settings.site_title, "settings replaced");
        *self.settings.write() = settings;
    }

    /// Apply `patch` and return the resulting settings.
    pub fn update(&self, patch: SettingsPatch) -> Settings {
        let mut settings = self.settings.write();
        if let Some(title) = patch.site_title {
            settings.site_title = title;
        }
        if let Some(keys) = patch.api_keys {
            settings.api_keys = keys;
        }
        info!(site_title = %settings.site_title, api_keys = settings.api_keys.len(), "settings updated");
        settings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_touches_given_fields() {
        let service = SettingsService::new("MuseCMS");
        let updated = service.update(SettingsPatch {
            site_title: None,
            api_keys: Some(vec![ApiKey {
                key: "k1".into(),
                label: "CI".into(),
            }]),
        });
        assert_eq!(updated.site_title, "MuseCMS");
        assert_eq!(updated.api_keys.len(), 1);
        assert_eq!(service.get(), updated);
    }
}
