use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use pros_cons_proxy::client::{AnalysisRequester, BusyIndicator, ResultsView};
use pros_cons_proxy::config::AppConfig;
use pros_cons_proxy::init_logger;
use pros_cons_proxy::proxy::{serve, AppState};

#[derive(Parser, Debug)]
#[command(name = "pros-cons", version, about = "LLM-backed pros/cons analysis proxy")]
struct Args {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the page and `POST /api/analyze`
    Serve {
        #[arg(long)]
        listen_addr: Option<String>,
        /// Relay the provider token stream (`true`) or return parsed JSON (`false`)
        #[arg(long)]
        stream: Option<bool>,
    },
    /// Ask a running proxy for an analysis and print it
    Ask {
        topic: String,
        #[arg(long, default_value = "http://127.0.0.1:3000/api/analyze")]
        endpoint: String,
        /// Must match the server's mode
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        stream: bool,
    },
}

struct TerminalBusy;

impl BusyIndicator for TerminalBusy {
    fn set_busy(&self, busy: bool) {
        let mut stderr = std::io::stderr();
        if busy {
            let _ = write!(stderr, "Analyzing...");
        } else {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_file.as_deref());

    match args.command {
        Command::Serve {
            listen_addr,
            stream,
        } => {
            let config = AppConfig::load().context("Failed to load config")?;
            let providers = config.resolve_from_env();
            let listen_addr = listen_addr.unwrap_or_else(|| config.server.listen_addr.clone());
            let mut state = AppState::new(&config, providers);
            if let Some(stream) = stream {
                state = state.with_stream(stream);
            }
            serve(&listen_addr, state).await
        }
        Command::Ask {
            topic,
            endpoint,
            stream,
        } => {
            let requester = AnalysisRequester::new(endpoint)
                .with_streaming(stream)
                .with_indicator(Arc::new(TerminalBusy));
            let mut view = ResultsView::new();
            match requester.submit(&topic, &mut view).await {
                Ok(true) => print!("{}", view),
                Ok(false) => log::warn!("Topic is empty, nothing to analyze"),
                Err(e) => {
                    eprintln!("{}", e.notice());
                    std::process::exit(1);
                }
            }
            Ok(())
        }
    }
}
