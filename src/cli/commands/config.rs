//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use crate::openai::api_key_from_env;
use anyhow::Result;
use std::path::PathBuf;

/// Run the config command against `config_path`, or the default location.
pub fn run_config(action: &ConfigAction, config_path: Option<&str>, settings: Settings) -> Result<()> {
    let path = resolve_path(config_path);

    match action {
        ConfigAction::Show => {
            Output::header("Providers");
            for (key, value) in provider_summary(&settings) {
                Output::kv(&key, &value);
            }
            println!();

            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Edit => {
            if !path.exists() {
                settings.save_to(&path)?;
                Output::info(&format!("Created default config at {}", path.display()));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());
            Output::info(&format!("Opening config in {}...", editor));

            match std::process::Command::new(&editor).arg(&path).status() {
                Ok(s) if s.success() => {
                    match Settings::load_from(Some(&path)) {
                        Ok(_) => Output::success("Config saved."),
                        Err(e) => Output::warning(&format!("Config saved but does not parse: {}", e)),
                    }
                }
                Ok(_) => Output::warning("Editor exited with non-zero status."),
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {}", path.display()));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", path.display());
            if !path.exists() {
                Output::warning("File does not exist yet; defaults are in effect.");
            }
        }
    }

    Ok(())
}

fn resolve_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(Settings::expand_path)
        .unwrap_or_else(Settings::default_config_path)
}

/// Effective model, endpoint and credential status for each API in use.
fn provider_summary(settings: &Settings) -> Vec<(String, String)> {
    let key_status = |var: &str| match api_key_from_env(var) {
        Ok(_) => format!("{} (set)", var),
        Err(_) => format!("{} (missing)", var),
    };

    vec![
        (
            "Embeddings".to_string(),
            format!(
                "{} ({} dims) at {}",
                settings.embedding.model, settings.embedding.dimensions, settings.embedding.api_base
            ),
        ),
        ("Embeddings key".to_string(), key_status(&settings.embedding.api_key_env)),
        (
            "Completions".to_string(),
            format!("{} at {}", settings.completion.model, settings.completion.api_base),
        ),
        ("Completions key".to_string(), key_status(&settings.completion.api_key_env)),
    ]
}
