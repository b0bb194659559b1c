//! `livenote` - CLI for the livestream note logger
//!
//! This binary wires the session state container to an interactive
//! recording loop and to the non-interactive archive/export/compress
//! subcommands.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write as _;
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use uuid::Uuid;

use livenote::cli::{
    parse_line, ArchiveCommand, Cli, Command, CompressCommand, ConfigCommand, OutputFormat,
    SessionCommand, HELP_TEXT,
};
use livenote::{compress, export, init_logging, Config, Error, Session, StateStore, Ticker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Record(cmd) => handle_record(&config, cmd.autostart).await,
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Export(cmd) => handle_export(&config, cmd.output),
        Command::Archive(cmd) => handle_archive(&config, cmd),
        Command::Compress(cmd) => handle_compress(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_session(config: &Config) -> anyhow::Result<Session> {
    let store = StateStore::open(config.state_path())?;
    Ok(Session::open(store)?)
}

async fn handle_record(config: &Config, autostart: bool) -> anyhow::Result<()> {
    let mut session = open_session(config)?;
    let (tick_tx, mut tick_rx) = mpsc::channel(4);
    let mut ticker = Ticker::new();

    println!("Recording session. Lines become notes; :help lists commands.");
    if session.timer().elapsed() > 0 {
        println!("Resuming at {} (timer stopped).", session.timer().formatted());
    }
    if autostart {
        session.start_timer();
        ticker.start(tick_tx.clone());
        println!("Timer running.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(()) = tick_rx.recv() => {
                session.tick()?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break }; // EOF
                let Some(command) = parse_line(&line) else { continue };
                if matches!(command, SessionCommand::Quit) {
                    break;
                }
                if let Err(err) =
                    run_session_command(&mut session, &mut ticker, &tick_tx, config, command)
                {
                    // Validation problems are conversation, not failure.
                    if err.is_validation() {
                        println!("! {err}");
                    } else {
                        return Err(err.into());
                    }
                }
            }
        }
    }

    ticker.stop();
    session.stop_timer();
    println!(
        "Session closed at {} with {} working notes.",
        session.timer().formatted(),
        session.notes().len()
    );
    Ok(())
}

fn run_session_command(
    session: &mut Session,
    ticker: &mut Ticker,
    tick_tx: &mpsc::Sender<()>,
    config: &Config,
    command: SessionCommand,
) -> livenote::Result<()> {
    match command {
        SessionCommand::Start => {
            if session.start_timer() {
                ticker.start(tick_tx.clone());
                println!("Timer running from {}.", session.timer().formatted());
            } else {
                println!("Timer is already running.");
            }
        }
        SessionCommand::Stop => {
            if session.stop_timer() {
                ticker.stop();
                println!("Timer stopped at {}.", session.timer().formatted());
            } else {
                println!("Timer is not running.");
            }
        }
        SessionCommand::Status => {
            let state = if session.timer().is_running() {
                "running"
            } else {
                "stopped"
            };
            println!(
                "{} ({state}), staged name: {}, notes: {}, archived streams: {}",
                session.timer().formatted(),
                if session.stream_name().is_empty() {
                    "<none>"
                } else {
                    session.stream_name()
                },
                session.notes().len(),
                session.archive().len()
            );
        }
        SessionCommand::Name(name) => {
            session.set_stream_name(&name)?;
            println!("Staged stream name: {}", session.stream_name());
        }
        SessionCommand::Save(name) => {
            if let Some(name) = name {
                session.set_stream_name(&name)?;
            }
            let id = session.save_stream()?;
            ticker.stop();
            let saved = session
                .archive()
                .get(id)
                .map_or_else(String::new, |s| s.name.clone());
            println!("Archived '{saved}'. Timer and notes reset.");
        }
        SessionCommand::Export => {
            let path = export::export_working_log(session.notes(), &config.export_dir())?;
            println!("Exported to {}", path.display());
        }
        SessionCommand::Help => println!("{HELP_TEXT}"),
        SessionCommand::Note(text) => {
            let note = session.add_note(&text)?;
            println!("[{}] {}", note.timestamp, note.text);
        }
        SessionCommand::Unknown(verb) => {
            println!("! unknown command ':{verb}', try :help");
        }
        SessionCommand::Quit => {}
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let session = open_session(config)?;

    if json {
        let status = serde_json::json!({
            "elapsed_seconds": session.timer().elapsed(),
            "elapsed": session.timer().formatted(),
            "staged_name": session.stream_name(),
            "working_notes": session.notes().len(),
            "archived_streams": session.archive().len(),
            "database_path": config.state_path(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("livenote status");
        println!("---------------");
        println!("Elapsed:        {}", session.timer().formatted());
        println!("Staged name:    {}", session.stream_name());
        println!("Working notes:  {}", session.notes().len());
        println!("Archived:       {}", session.archive().len());
        println!("Database:       {}", config.state_path().display());
    }
    Ok(())
}

fn handle_export(config: &Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let session = open_session(config)?;
    let dir = output.unwrap_or_else(|| config.export_dir());
    let path = export::export_working_log(session.notes(), &dir)?;
    println!("Exported {} notes to {}", session.notes().len(), path.display());
    Ok(())
}

fn resolve_stream(session: &Session, name: &str) -> livenote::Result<Uuid> {
    session
        .archive()
        .find_by_name(name)
        .map(|s| s.id)
        .ok_or_else(|| Error::stream_not_found(name))
}

fn handle_archive(config: &Config, cmd: ArchiveCommand) -> anyhow::Result<()> {
    let mut session = open_session(config)?;

    match cmd {
        ArchiveCommand::List { json, format } => {
            let format = if json { OutputFormat::Json } else { format };
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(session.archive())?);
                }
                OutputFormat::Plain => {
                    for stream in session.archive().streams() {
                        println!("{}", stream.name);
                    }
                }
                OutputFormat::Table => {
                    if session.archive().is_empty() {
                        println!("No archived streams.");
                    } else {
                        println!(
                            "{:<30} {:>10} {:>7}  {}",
                            "NAME", "DURATION", "NOTES", "DATE"
                        );
                        for stream in session.archive().streams() {
                            println!(
                                "{:<30} {:>10} {:>7}  {}",
                                stream.name,
                                stream.formatted_duration(),
                                stream.note_count(),
                                stream.date.format("%Y-%m-%d %H:%M")
                            );
                        }
                    }
                }
            }
        }
        ArchiveCommand::Show { name } => {
            let id = resolve_stream(&session, &name)?;
            session.select_stream(id)?;
            let stream = session
                .selected()
                .ok_or_else(|| Error::stream_not_found(&name))?;
            println!(
                "{} — {} — {} notes — saved {}",
                stream.name,
                stream.formatted_duration(),
                stream.note_count(),
                stream.date.format("%Y-%m-%d %H:%M")
            );
            for (i, note) in stream.notes.iter().enumerate() {
                println!("{i:>4}  {} - {}", note.timestamp, note.text);
            }
        }
        ArchiveCommand::Rename { name, new_name } => {
            let id = resolve_stream(&session, &name)?;
            session.rename_stream(id, &new_name)?;
            println!("Renamed '{name}' to '{}'.", new_name.trim());
        }
        ArchiveCommand::Delete { name, yes } => {
            let id = resolve_stream(&session, &name)?;
            if !yes && !confirm(&format!("Delete stream '{name}'?"))? {
                println!("Aborted.");
                return Ok(());
            }
            let removed = session.delete_stream(id)?;
            println!(
                "Deleted '{}' ({} notes).",
                removed.name,
                removed.note_count()
            );
        }
        ArchiveCommand::Export { name, output } => {
            let id = resolve_stream(&session, &name)?;
            session.select_stream(id)?;
            let stream = session
                .selected()
                .ok_or_else(|| Error::stream_not_found(&name))?;
            let dir = output.unwrap_or_else(|| config.export_dir());
            let path = export::export_stream(stream, &dir)?;
            println!("Exported to {}", path.display());
        }
        ArchiveCommand::EditNote { name, index, text } => {
            let id = resolve_stream(&session, &name)?;
            session.edit_archived_note(id, index, &text)?;
            println!("Note {index} updated.");
        }
        ArchiveCommand::DeleteNote { name, index, yes } => {
            let id = resolve_stream(&session, &name)?;
            if !yes && !confirm(&format!("Delete note {index} from '{name}'?"))? {
                println!("Aborted.");
                return Ok(());
            }
            let removed = session.delete_archived_note(id, index)?;
            println!("Deleted note {index}: {}", removed.text);
        }
    }
    Ok(())
}

fn handle_compress(config: &Config, cmd: &CompressCommand) -> anyhow::Result<()> {
    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| compress::default_output_path(&cmd.input));
    compress::compress_image(
        &cmd.input,
        &output,
        config.image.canvas_size,
        config.image.jpeg_quality,
    )?;
    println!(
        "Wrote {}x{} JPEG to {}",
        config.image.canvas_size,
        config.image.canvas_size,
        output.display()
    );
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  State database:   {}", config.state_path().display());
                println!();
                println!("[Export]");
                println!("  Output directory: {}", config.export_dir().display());
                println!();
                println!("[Image]");
                println!("  Canvas size:      {}", config.image.canvas_size);
                println!("  JPEG quality:     {}", config.image.jpeg_quality);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Ask a yes/no question on stdout, defaulting to no.
fn confirm(question: &str) -> std::io::Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
