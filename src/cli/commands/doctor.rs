//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::openai::api_key_from_env;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("vidnotes Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let api_checks = check_api_keys(settings);
    for check in &api_checks {
        check.print();
    }
    checks.extend(api_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = check_config(settings);
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before running vidnotes.",
            errors
        ));
    } else if warnings > 0 {
        Output::warning(&format!("All required checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed.");
    }

    Ok(())
}

/// Check that each configured API key variable is set.
fn check_api_keys(settings: &Settings) -> Vec<CheckResult> {
    let mut vars = vec![("Embeddings", &settings.embedding.api_key_env)];
    if settings.completion.api_key_env != settings.embedding.api_key_env {
        vars.push(("Completions", &settings.completion.api_key_env));
    }

    vars.into_iter()
        .map(|(label, var)| match api_key_from_env(var) {
            Ok(_) => CheckResult::ok(label, &format!("{} is set", var)),
            Err(e) => CheckResult::error(
                label,
                &e.to_string(),
                &format!("export {}=<your key>", var),
            ),
        })
        .collect()
}

/// Check the config file and a few values that would make requests fail.
fn check_config(settings: &Settings) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    let path = Settings::default_config_path();
    if path.exists() {
        checks.push(CheckResult::ok("Config file", &path.display().to_string()));
    } else {
        checks.push(CheckResult::warning(
            "Config file",
            "not found, using defaults",
            "Run 'vidnotes config edit' to create one",
        ));
    }

    if settings.chunking.chunk_size == 0 {
        checks.push(CheckResult::warning(
            "Chunk size",
            "chunking.chunk_size is 0, one word per chunk will be used",
            "Set chunking.chunk_size to a positive word count (default 500)",
        ));
    }

    if settings.retrieval.top_k == 0 {
        checks.push(CheckResult::warning(
            "Top-k",
            "retrieval.top_k is 0, suggestions will get no transcript context",
            "Set retrieval.top_k to at least 1 (default 3)",
        ));
    }

    if settings.transcript.preferred_languages.is_empty() {
        checks.push(CheckResult::warning(
            "Transcript languages",
            "no preferred languages, the first available transcript will always be used",
            "Set transcript.preferred_languages, e.g. [\"en\"]",
        ));
    }

    checks
}
