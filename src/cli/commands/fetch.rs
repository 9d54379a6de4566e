//! Fetch command implementation.

use crate::chunking::WordChunker;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{extract_video_id, TranscriptSource, YoutubeTranscriptSource};
use anyhow::Result;

/// Run the fetch command.
pub async fn run_fetch(url: &str, output: Option<String>, show_chunks: bool, settings: Settings) -> Result<()> {
    preflight::check(Operation::Fetch, &settings)?;

    let video_id = extract_video_id(url)?;
    let source = YoutubeTranscriptSource::new(settings.transcript.preferred_languages.clone())?;

    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video_id));
    let result = source.fetch(&video_id).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(t) => t,
        Err(e) => {
            Output::error(&format!("Failed to fetch transcript: {}", e));
            return Err(e.into());
        }
    };

    let chunks = WordChunker::with_chunk_size(settings.chunking.chunk_size).chunk(&transcript.text);

    Output::header(&transcript.title());
    println!();
    Output::kv("Video ID", &transcript.video_id);
    Output::kv(
        "Language",
        &match &transcript.language {
            Some(name) => format!("{} ({})", name, transcript.language_code),
            None => transcript.language_code.clone(),
        },
    );
    Output::kv("Auto-generated", if transcript.is_generated { "yes" } else { "no" });
    Output::kv("Characters", &transcript.text.chars().count().to_string());
    Output::kv("Words", &transcript.word_count().to_string());
    Output::kv(
        "Chunks",
        &format!("{} (of up to {} words)", chunks.len(), settings.chunking.chunk_size.max(1)),
    );

    if show_chunks {
        for (i, chunk) in chunks.iter().enumerate() {
            Output::chunk(i, chunk);
        }
    }

    if let Some(path) = output {
        let path = Settings::expand_path(&path);
        std::fs::write(&path, &transcript.text)?;
        println!();
        Output::success(&format!("Transcript written to {}", path.display()));
    }

    Ok(())
}
