use std::{collections::HashMap, fs};

use mailer::DEFAULT_RESEND_BASE_URL;
use notify_api::Branding;
use serde::Deserialize;
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub resend_api_key: Option<String>,
    pub resend_base_url: String,
    pub brand_name: String,
    pub from_address: String,
    pub operator_address: String,
    pub pitch: String,
    pub welcome_subject: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            resend_api_key: None,
            resend_base_url: DEFAULT_RESEND_BASE_URL.into(),
            brand_name: "CraftyAam".into(),
            from_address: "CraftyAam <notify@craftyaam.com>".into(),
            operator_address: "craftyaam@gmail.com".into(),
            pitch: "CraftyAam is a creative tech studio where sharp code meets juicy ideas. \
                    We craft delightful digital experiences that stand out, spark engagement, \
                    and leave a lasting flavour."
                .into(),
            welcome_subject: "Crafted like an Aam — and you're part of it!".into(),
        }
    }
}

impl Settings {
    pub fn branding(&self) -> Branding {
        Branding {
            brand_name: self.brand_name.clone(),
            from_address: self.from_address.clone(),
            operator_address: self.operator_address.clone(),
            pitch: self.pitch.clone(),
            welcome_subject: self.welcome_subject.clone(),
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Layers defaults, then the flat `server.toml` keys, then environment
/// variables. Later `APP__*` names win over the plain ones.
pub(crate) fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("resend_base_url") {
                    settings.resend_base_url = v.clone();
                }
                if let Some(v) = file_cfg.get("brand_name") {
                    settings.brand_name = v.clone();
                }
                if let Some(v) = file_cfg.get("from_address") {
                    settings.from_address = v.clone();
                }
                if let Some(v) = file_cfg.get("operator_address") {
                    settings.operator_address = v.clone();
                }
                if let Some(v) = file_cfg.get("pitch") {
                    settings.pitch = v.clone();
                }
                if let Some(v) = file_cfg.get("welcome_subject") {
                    settings.welcome_subject = v.clone();
                }
            }
            Err(error) => warn!(file = SETTINGS_FILE, %error, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("RESEND_API_KEY") {
        settings.resend_api_key = Some(v);
    }
    if let Some(v) = env("APP__RESEND_API_KEY") {
        settings.resend_api_key = Some(v);
    }

    if let Some(v) = env("RESEND_BASE_URL") {
        settings.resend_base_url = v;
    }
    if let Some(v) = env("APP__RESEND_BASE_URL") {
        settings.resend_base_url = v;
    }

    if let Some(v) = env("APP__BRAND_NAME") {
        settings.brand_name = v;
    }
    if let Some(v) = env("APP__FROM_ADDRESS") {
        settings.from_address = v;
    }
    if let Some(v) = env("APP__OPERATOR_ADDRESS") {
        settings.operator_address = v;
    }
    if let Some(v) = env("APP__PITCH") {
        settings.pitch = v;
    }
    if let Some(v) = env("APP__WELCOME_SUBJECT") {
        settings.welcome_subject = v;
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
