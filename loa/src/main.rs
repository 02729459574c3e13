//! Loagen - Letter of Authorization generator
//!
//! CLI entry point for generating, revising, and exporting letters.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use loagen::cli::{Cli, Command};
use loagen::config::Config;
use loagen::export;
use loagen::letter::{LetterParams, LetterSession};
use loagen::llm::create_client;
use loagen::prompts::PromptLoader;
use loagen::render;

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    // Letters go to stdout, so logs go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("loagen")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("loagen.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Generate {
            params,
            output,
            text,
            transcript,
            edit,
        } => cmd_generate(&config, &params, output, text, transcript, edit).await,
        Command::Render { input, output } => cmd_render(&config, &input, output),
    }
}

/// Generate a letter, optionally revise it interactively, and export
async fn cmd_generate(
    config: &Config,
    params_path: &PathBuf,
    output: Option<PathBuf>,
    text: Option<PathBuf>,
    transcript: Option<PathBuf>,
    edit: bool,
) -> Result<()> {
    debug!(?params_path, edit, "cmd_generate: called");
    config.validate()?;

    let params = LetterParams::load(params_path)?;

    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let prompts = PromptLoader::new(std::env::current_dir()?);
    let mut session = LetterSession::new(llm, prompts, config.llm.max_tokens, config.llm.temperature);

    println!("Generating letter ({})...", config.llm.model);
    let letter = session.generate(&params).await.context("Letter generation failed")?;
    println!();
    println!("{}", letter);

    if edit {
        run_edit_loop(&mut session).await?;
    }

    let letter = match session.current_letter() {
        Some(text) => text.to_string(),
        None => return Err(eyre::eyre!("Session has no letter to export")),
    };

    let output = output.unwrap_or_else(|| PathBuf::from(&config.export.filename));
    let blocks = render::render(&letter);
    export::write_docx(&output, &blocks)?;
    println!();
    println!("Document written to {}", output.display());

    if let Some(text_path) = text {
        export::write_text(&text_path, &letter)?;
        println!("Letter text written to {}", text_path.display());
    }

    if let Some(transcript_path) = transcript {
        export::write_transcript(&transcript_path, session.transcript())?;
        println!("Transcript written to {}", transcript_path.display());
    }

    Ok(())
}

/// Interactive revision loop: one edit instruction per line
///
/// An empty line or Ctrl-D keeps the current letter and returns.
async fn run_edit_loop(session: &mut LetterSession) -> Result<()> {
    debug!("run_edit_loop: called");
    println!();
    println!("Describe changes to the letter (empty line to finish):");

    let mut rl = rustyline::DefaultEditor::new().context("Failed to initialize line editor")?;

    loop {
        match rl.readline("edit> ") {
            Ok(line) => {
                let instruction = line.trim();
                if instruction.is_empty() {
                    debug!("run_edit_loop: empty instruction, finishing");
                    break;
                }
                let _ = rl.add_history_entry(instruction);

                println!("Revising letter...");
                match session.revise(instruction).await {
                    Ok(letter) => {
                        println!();
                        println!("{}", letter);
                        println!();
                    }
                    Err(e) => {
                        debug!(error = %e, "run_edit_loop: revision failed");
                        eprintln!("Revision failed: {}", e);
                        eprintln!("The previous letter is unchanged.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                debug!("run_edit_loop: interrupted, finishing");
                break;
            }
            Err(e) => return Err(e).context("Failed to read edit instruction"),
        }
    }

    Ok(())
}

/// Classify an existing letter text file and export it as a Word document
fn cmd_render(config: &Config, input: &PathBuf, output: Option<PathBuf>) -> Result<()> {
    debug!(?input, "cmd_render: called");
    let letter =
        fs::read_to_string(input).context(format!("Failed to read letter text from {}", input.display()))?;

    let blocks = render::render(&letter);
    debug!(block_count = blocks.len(), "cmd_render: letter classified");

    let output = output.unwrap_or_else(|| PathBuf::from(&config.export.filename));
    export::write_docx(&output, &blocks)?;
    println!("Document written to {} ({} paragraphs)", output.display(), blocks.len());

    Ok(())
}
