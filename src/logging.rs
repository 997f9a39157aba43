use failure::{Error, Fail};

pub const BANDSTAND_LOG_CONFIG: &'static str = "BANDSTAND_LOG_CONFIG";
pub const DEFAULT_BANDSTAND_LOG_CONFIG: &'static str = "log4rs.yaml";

#[derive(Debug, Fail)]
enum LoggingError {
  #[fail(display = "Failed to init logging: {}", cause)]
  Init { cause: String },
}

/// Initialises logging from a log4rs YAML file. The path is taken from the
/// `BANDSTAND_LOG_CONFIG` environment variable, falling back to
/// `log4rs.yaml` in the working directory. Hosts embedding the engine call
/// this once at startup.
pub fn init() -> Result<(), Error> {
  let log_config_path = std::env::var(BANDSTAND_LOG_CONFIG)
    .unwrap_or_else(|_| DEFAULT_BANDSTAND_LOG_CONFIG.to_string());

  init_from_file(log_config_path.as_str())
}

pub fn init_from_file(path: &str) -> Result<(), Error> {
  log4rs::init_file(path, Default::default()).map_err(|err| LoggingError::Init {
    cause: err.to_string(),
  })?;

  Ok(())
}
