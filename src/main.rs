//! Headless host and entry point.
//!
//! Plays the role a mobile shell would: it supplies a device (a fixed
//! position from the command line), the HTTP search backend, a presenter that
//! prints each map frame to stdout, and feeds user input read from stdin to
//! the runtime.
//!
//! # Usage
//!
//! ```text
//! devradar <latitude> <longitude> [config.toml]
//! ```
//!
//! # Commands
//!
//! - `select ReactJS,Python` → replace the technology selection
//! - `toggle PHP` → tap one technology
//! - `find re` → type into the technology picker
//! - `open <developer id>` → tap a marker callout
//! - `quit` (or end of input) → wait for in-flight searches and exit

use devradar::device::FixedDevice;
use devradar::observability::{init_tracing, TracingReporter};
use devradar::ui::{LogNavigator, TextPresenter};
use devradar::worker::HttpSearchBackend;
use devradar::{Collaborators, Config, Coordinate, DevRadarError, Result, Runtime, RuntimeHandle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE: &str = "usage: devradar <latitude> <longitude> [config.toml]";

/// A line of user input.
#[derive(Debug, PartialEq)]
enum Command {
    Select(Vec<String>),
    Toggle(String),
    Find(String),
    Open(String),
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match verb {
            "select" => Some(Self::Select(
                rest.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect(),
            )),
            "toggle" if !rest.is_empty() => Some(Self::Toggle(rest.to_string())),
            "find" => Some(Self::Find(rest.to_string())),
            "open" if !rest.is_empty() => Some(Self::Open(rest.to_string())),
            "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }

    fn send(self, handle: &RuntimeHandle) -> Result<()> {
        match self {
            Self::Select(tags) => handle.select_techs(tags),
            Self::Toggle(tag) => handle.toggle_tech(tag),
            Self::Find(query) => handle.filter_catalog(query),
            Self::Open(id) => handle.activate_callout(id),
            Self::Quit => handle.shutdown(),
        }
    }
}

fn parse_args(args: &[String]) -> Result<(Coordinate, Option<PathBuf>)> {
    let [lat, lon, rest @ ..] = args else {
        return Err(DevRadarError::Config(USAGE.to_string()));
    };

    let parse = |value: &str, name: &str| {
        value
            .parse::<f64>()
            .map_err(|e| DevRadarError::Config(format!("invalid {name} {value:?}: {e}\n{USAGE}")))
    };
    let position = Coordinate::new(parse(lat, "latitude")?, parse(lon, "longitude")?);

    match rest {
        [] => Ok((position, None)),
        [path] => Ok((position, Some(PathBuf::from(path)))),
        _ => Err(DevRadarError::Config(USAGE.to_string())),
    }
}

async fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (position, config_path) = parse_args(&args)?;

    let config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_tracing(&config);

    let device = Arc::new(FixedDevice::at(position));
    let runtime = Runtime::new(
        &config,
        Collaborators {
            permission: device.clone(),
            position: device,
            backend: Arc::new(HttpSearchBackend::new(&config.api_base_url)?),
            presenter: Box::new(TextPresenter::new(std::io::stdout())),
            navigator: Box::new(LogNavigator),
            reporter: Box::new(TracingReporter),
        },
    );
    let handle = runtime.handle();
    let driver = tokio::spawn(runtime.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                tracing::warn!(input = %line.trim(), "unrecognized command");
            }
            continue;
        };

        let quit = command == Command::Quit;
        if let Err(e) = command.send(&handle) {
            tracing::warn!(error = %e, "command not delivered");
            break;
        }
        if quit {
            break;
        }
    }

    // Already stopped is fine here.
    let _ = handle.shutdown();

    let state = driver.await.map_err(|e| DevRadarError::Io(std::io::Error::other(e)))?;
    tracing::info!(
        results = state.results().len(),
        selected = ?state.selection.snapshot(),
        "session ended"
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("devradar: {e}");
            ExitCode::FAILURE
        }
    }
}
