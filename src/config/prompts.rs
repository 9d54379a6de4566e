//! Prompt templates for vidnotes.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

/// `{{name}}` placeholders.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub autocomplete: AutocompletePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for note autocompletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompletePrompts {
    pub system: String,
    pub user: String,
}

impl Default for AutocompletePrompts {
    fn default() -> Self {
        Self {
            system: "You are a professional note-taking assistant. You provide extremely concise, context-aware autocomplete suggestions in both English and Hindi.".to_string(),

            user: r#"You are an intelligent note-taking assistant for technical and educational videos.
Based on the video transcript context and the user's current notes, predict the NEXT words or sentence to help them complete their thought.

IMPORTANT: The video and notes may be in English, Hindi, or mixed (Hinglish). Provide suggestions in the SAME language style as the context.

Video Context:
{{context}}

User's Current Notes:
{{current_text}}

Instructions:
- Provide a concise completion that follows naturally from the user's current line.
- Do NOT provide conversational responses, only the completion text.
- Match the terminology and tone of the video (including technical terms).
- If the user is writing a step-by-step guide, suggest the next logical step.
- Return ONLY the prediction/completion.

Prediction:"#.to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let autocomplete_path = custom_path.join("autocomplete.toml");
            if autocomplete_path.exists() {
                let content = std::fs::read_to_string(&autocomplete_path)?;
                prompts.autocomplete = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are substituted in one pass over the template; inserted
    /// values are never expanded again. Unknown placeholders are left as is.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
