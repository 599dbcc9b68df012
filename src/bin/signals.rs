//! Signals CLI - Command-line interface for the behavioral signal engine
//!
//! Commands:
//! - analyze: Process an NDJSON file of frame events into metric snapshots
//! - run: Process streaming NDJSON frame events from stdin
//! - validate: Check frame events against the input schema

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use interview_signals::{
    EngineConfig, FrameInput, FrameOutput, SessionId, SignalEngine, ENGINE_VERSION,
};

/// Signals - per-frame behavioral metrics from facial landmarks
#[derive(Parser)]
#[command(name = "signals")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Turn landmark frame events into behavioral metric snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an NDJSON file of frame events (batch mode)
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Engine calibration JSON (defaults to the built-in calibration)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Process streaming frame events from stdin (streaming mode)
    Run {
        /// Engine calibration JSON
        #[arg(long)]
        config: Option<PathBuf>,

        /// Flush output after each record
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Validate frame events against the input schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// One inbound NDJSON record: a frame event addressed to a session
#[derive(Debug, Deserialize)]
struct FrameRecord {
    session_id: String,
    frame: FrameInput,
}

/// One outbound NDJSON record
#[derive(Debug, Serialize)]
struct SnapshotRecord<'a> {
    session_id: &'a str,
    #[serde(flatten)]
    output: FrameOutput,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            output,
            config,
        } => analyze(&input, &output, config.as_deref()),
        Commands::Run { config, flush } => run(config.as_deref(), flush),
        Commands::Validate { input } => validate(&input),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> io::Result<EngineConfig> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn read_lines(input: &std::path::Path) -> io::Result<Vec<String>> {
    let text = if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::Read::read_to_string(&mut io::stdin(), &mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };
    Ok(text.lines().map(str::to_string).collect())
}

/// Registry bridging caller-chosen string session keys to engine sessions
struct CliSessions {
    engine: SignalEngine,
    ids: HashMap<String, SessionId>,
}

impl CliSessions {
    fn new(config: EngineConfig) -> Self {
        Self {
            engine: SignalEngine::with_config(config),
            ids: HashMap::new(),
        }
    }

    /// Sessions are created on first sight in CLI mode
    fn process(&mut self, record: &FrameRecord) -> Result<FrameOutput, interview_signals::SignalError> {
        let id = *self
            .ids
            .entry(record.session_id.clone())
            .or_insert_with(SessionId::new);
        if self.engine.session(&id).is_none() {
            self.engine.start_session_with_id(id);
        }
        self.engine.process_frame(&id, record.frame.clone())
    }
}

fn analyze(
    input: &std::path::Path,
    output: &std::path::Path,
    config: Option<&std::path::Path>,
) -> io::Result<ExitCode> {
    let config = load_config(config)?;
    let mut sessions = CliSessions::new(config);

    let mut out: Box<dyn Write> = if output.as_os_str() == "-" {
        Box::new(io::stdout().lock())
    } else {
        Box::new(fs::File::create(output)?)
    };

    let mut errors = 0usize;
    for (lineno, line) in read_lines(input)?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: FrameRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(err) => {
                eprintln!("line {}: invalid frame record: {err}", lineno + 1);
                errors += 1;
                continue;
            }
        };
        let result = sessions
            .process(&record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let out_record = SnapshotRecord {
            session_id: &record.session_id,
            output: result,
        };
        serde_json::to_writer(&mut out, &out_record)?;
        out.write_all(b"\n")?;
    }

    if errors > 0 {
        eprintln!("{errors} record(s) skipped");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn run(config: Option<&std::path::Path>, flush: bool) -> io::Result<ExitCode> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("reading NDJSON frame events from stdin (pipe input or press Ctrl-D to end)");
    }

    let config = load_config(config)?;
    let mut sessions = CliSessions::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FrameRecord = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(err) => {
                eprintln!("invalid frame record: {err}");
                continue;
            }
        };
        let result = sessions
            .process(&record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let out_record = SnapshotRecord {
            session_id: &record.session_id,
            output: result,
        };
        serde_json::to_writer(&mut stdout, &out_record)?;
        stdout.write_all(b"\n")?;
        if flush {
            stdout.flush()?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn validate(input: &std::path::Path) -> io::Result<ExitCode> {
    let mut valid = 0usize;
    let mut invalid = 0usize;
    let mut incomplete = 0usize;

    for (lineno, line) in read_lines(input)?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<FrameRecord>(line) {
            Ok(record) => {
                valid += 1;
                if let FrameInput::Landmarks(frame) = &record.frame {
                    if !frame.is_complete() {
                        incomplete += 1;
                        eprintln!("line {}: frame is missing required landmarks", lineno + 1);
                    }
                }
            }
            Err(err) => {
                invalid += 1;
                eprintln!("line {}: {err}", lineno + 1);
            }
        }
    }

    println!("{valid} valid record(s), {invalid} invalid, {incomplete} with incomplete landmarks");
    if invalid > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
