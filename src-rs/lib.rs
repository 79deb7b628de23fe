#![deny(clippy::all)]

pub mod analysis;
pub mod client;
pub mod config;
pub mod cons;
pub mod llm;
pub mod proxy;


use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}";

/// Installs the global logger once per process.
///
/// A log4rs YAML file named by `LOG4RS_CONFIG` (default `log4rs.yaml`) wins
/// when present; otherwise logs go to stderr and, if given, to `log_file`.
pub fn init_logger(log_file: Option<&Path>) {
    INIT.call_once(|| {
        use log::LevelFilter;
        use log4rs::append::console::{ConsoleAppender, Target};
        use log4rs::append::file::FileAppender;
        use log4rs::config::{Appender, Config, Root};
        use log4rs::encode::pattern::PatternEncoder;

        let config_path =
            std::env::var("LOG4RS_CONFIG").unwrap_or_else(|_| "log4rs.yaml".to_string());
        if Path::new(&config_path).exists() {
            match log4rs::init_file(&config_path, Default::default()) {
                Ok(_) => {
                    eprintln!("[INIT] Logger initialized from {}", config_path);
                    return;
                }
                Err(e) => {
                    eprintln!("[INIT] Failed to load {}: {}, falling back to default config", config_path, e);
                }
            }
        }

        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();

        let mut builder =
            Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
        let mut root = Root::builder().appender("stderr");

        if let Some(path) = log_file {
            if let Some(dir) = path.parent() {
                let _ = std::fs::create_dir_all(dir);
            }
            match FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
                .build(path)
            {
                Ok(f) => {
                    builder = builder.appender(Appender::builder().build("logfile", Box::new(f)));
                    root = root.appender("logfile");
                }
                Err(e) => eprintln!("[INIT] Failed to create log file {}: {}", path.display(), e),
            }
        }

        let config = match builder.build(root.build(LevelFilter::Info)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[INIT] Failed to build logger config: {}", e);
                return;
            }
        };

        if let Err(e) = log4rs::init_config(config) {
            eprintln!("[INIT] Failed to initialize logger: {}", e);
        }
    });
}
