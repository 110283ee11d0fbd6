//! Initialization of global application logger.

use chrono::{Local, SecondsFormat};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use thiserror::Error;

const PATTERN: &str = "{d:<35} [thread \"{T}\" id {({I}]):<6} {l:<5} {t} >> {m}{n}";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file creation failure: {0}")]
    File(#[from] std::io::Error),

    #[error("wrong logger configuration: {0}")]
    Config(#[from] ConfigErrors),

    #[error("logger have already been initialized: {0}")]
    Initialized(#[from] log::SetLoggerError),
}

/// Initializes the global logger for an application.
///
/// Messages are written both to standard output and to the new file in `logs` directory.
///
/// # Errors
///
/// An error is returned if log file cannot be created
/// or if logger have already been initialized.
///
pub fn init() -> Result<Handle, LoggerError> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let file_name = format!(
        "logs/logfile_{}.log",
        Local::now()
            .to_rfc3339_opts(SecondsFormat::Nanos, true)
            .replace(':', "-"),
    );
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(file_name)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(
            Root::builder()
                .appenders(["stdout", "file"])
                .build(LevelFilter::Debug),
        )?;
    Ok(log4rs::init_config(config)?)
}
