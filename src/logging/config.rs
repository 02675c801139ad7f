use std::collections::HashMap;
use tracing::Level;

/// Global and per-scope log levels, parsed from an environment variable
/// of the shape `warn,curve=debug,pointer=trace`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    global: Level,
    scopes: HashMap<String, Level>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            global: Level::WARN,
            scopes: HashMap::new(),
        }
    }

    pub fn from_env(var: &str) -> Self {
        let mut config = Self::new();
        if let Ok(directives) = std::env::var(var) {
            config.apply_directives(&directives);
        }
        config
    }

    fn apply_directives(&mut self, directives: &str) {
        for entry in directives.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some((scope, level)) => {
                    if let Some(level) = parse_level(level.trim()) {
                        self.scopes.insert(scope.trim().to_string(), level);
                    }
                }
                None => {
                    if let Some(level) = parse_level(entry) {
                        self.global = level;
                    }
                }
            }
        }
    }

    pub fn enabled(&self, scope: &str, level: Level) -> bool {
        level <= *self.scopes.get(scope).unwrap_or(&self.global)
    }

    pub fn set_global_level(&mut self, level: Level) {
        self.global = level;
    }

    pub fn set_scope_level(&mut self, scope: &str, level: Level) {
        self.scopes.insert(scope.to_string(), level);
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_level(text: &str) -> Option<Level> {
    match text.to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Install the tracing subscriber (once) and the scoped config read from
/// the given environment variable, e.g. `init_logging("POINTER_LOG")`.
pub fn init_logging(var: &str) -> LogConfig {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = LogConfig::from_env(var);
    super::set_log_config(config.clone());
    config
}
