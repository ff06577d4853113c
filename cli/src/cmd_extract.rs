// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::Path, path::PathBuf};

use clap::{ArgGroup, ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use lumina_core::{DraftSession, ExtractSource};

use crate::app::App;
use crate::arg::CommonArgs;
use crate::cmd_event::print_event;
use crate::util::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractInput {
    Image(PathBuf),
    Text(String),
    Voice(String),
}

#[derive(Debug, Clone)]
pub struct CmdExtract {
    pub input: ExtractInput,
    pub save: bool,
    pub output_format: OutputFormat,
}

impl CmdExtract {
    pub const NAME: &str = "extract";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Create an event from a photo, a voice transcript or a description")
            .arg(
                arg!(--image <PATH> "Photo of a poster, ticket or screenshot")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(--text <TEXT> "Free-form description of the event"))
            .arg(arg!(--voice <TRANSCRIPT> "Transcript of a voice note"))
            .group(
                ArgGroup::new("input")
                    .args(["image", "text", "voice"])
                    .required(true),
            )
            .arg(arg!(--save "Store the extracted event instead of only showing it"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let input = if let Some(path) = matches.get_one::<PathBuf>("image") {
            ExtractInput::Image(path.clone())
        } else if let Some(text) = matches.get_one::<String>("voice") {
            ExtractInput::Voice(text.clone())
        } else {
            let text = matches.get_one::<String>("text").cloned();
            ExtractInput::Text(text.unwrap_or_default())
        };

        Self {
            input,
            save: matches.get_flag("save"),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "extracting event...");
        let source = match self.input {
            ExtractInput::Image(path) => {
                let mime = mime_of(&path)?;
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
                ExtractSource::Image { bytes, mime }
            }
            ExtractInput::Text(text) => ExtractSource::Text(text),
            ExtractInput::Voice(text) => ExtractSource::Transcript(text),
        };

        let extractor = app.extractor()?;
        println!("{}", "Processing...".italic());
        let extracted = match app.gate().run(&*extractor, source, app.today()).await {
            Ok(Some(extracted)) => extracted,
            Ok(None) => {
                println!("{}", "No event found, try another input".yellow());
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(err = %e, "extraction failed");
                println!("{} {e}, please try again", "Failed:".yellow());
                return Ok(());
            }
        };

        let mut session = DraftSession::new();
        session.open_extracted(extracted);
        if !self.save {
            let event = session.commit()?;
            print_event(&event, self.output_format);
            println!(
                "{}",
                "Not saved, run again with --save to store it".italic()
            );
            return Ok(());
        }

        let event = app.commit(&mut session).await?;
        print_event(&event, self.output_format);
        Ok(())
    }
}

/// Media type of a photo, guessed from its extension.
fn mime_of(path: &Path) -> Result<String, String> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => Ok("image/jpeg".to_string()),
        Some("png") => Ok("image/png".to_string()),
        Some("webp") => Ok("image/webp".to_string()),
        _ => Err(format!(
            "Unsupported image {}, expected a JPEG, PNG or WebP file",
            path.display()
        )),
    }
}
