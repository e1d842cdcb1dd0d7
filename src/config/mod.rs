use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
    time::Duration,
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    /// Defaults, then `.pyfixrc`, then environment variables.
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Environment takes precedence over the rc file
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    /// Built-in defaults only; ignores the rc file and the environment.
    pub fn defaults() -> Self {
        Self {
            inner: default_map(),
            config_path: default_config_path(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }

    /// Seconds value as a duration; fractional values are accepted.
    pub fn get_duration(&self, key: &str) -> Option<Duration> {
        self.get(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
    }

    pub fn interpreter(&self) -> String {
        self.get("PYTHON_INTERPRETER")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default_interpreter().to_string())
    }

    /// Package manager argv prefix; `install <name>` is appended by the caller.
    pub fn package_manager(&self) -> Vec<String> {
        let configured = self.get("PACKAGE_MANAGER").unwrap_or_default();
        let parts: Vec<String> = configured.split_whitespace().map(str::to_string).collect();
        if parts.is_empty() {
            vec![self.interpreter(), "-m".into(), "pip".into()]
        } else {
            parts
        }
    }

    pub fn execution_timeout(&self) -> Duration {
        self.get_duration("EXECUTION_TIMEOUT")
            .unwrap_or(Duration::from_secs(5))
    }

    /// `None` when `LINT_TIMEOUT` is zero.
    pub fn lint_timeout(&self) -> Option<Duration> {
        match self.get_duration("LINT_TIMEOUT") {
            Some(d) if d.is_zero() => None,
            Some(d) => Some(d),
            None => Some(Duration::from_secs(30)),
        }
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "OPENAI_API_KEY",
        "API_BASE_URL",
        "REQUEST_TIMEOUT",
        "DEFAULT_MODEL",
        "PYTHON_INTERPRETER",
        "PACKAGE_MANAGER",
        "EXECUTION_TIMEOUT",
        "AUTO_INSTALL_MODULES",
        "LINT_COMMAND",
        "LINT_TIMEOUT",
        "PRETTIFY_MARKDOWN",
    ];

    KEYS.contains(&k) || k.starts_with("PYFIX_") || k.starts_with("OPENAI_")
}

fn default_interpreter() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("pyfix").join(".pyfixrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    // Numbers (seconds)
    m.insert("REQUEST_TIMEOUT".into(), "60".into());
    m.insert("EXECUTION_TIMEOUT".into(), "5".into());
    m.insert("LINT_TIMEOUT".into(), "30".into());

    // Strings
    m.insert("DEFAULT_MODEL".into(), "gpt-4".into());
    m.insert("API_BASE_URL".into(), "default".into());
    m.insert("PYTHON_INTERPRETER".into(), default_interpreter().into());
    m.insert("PACKAGE_MANAGER".into(), String::new());
    m.insert("LINT_COMMAND".into(), "pylint".into());

    // Bools as strings
    m.insert("AUTO_INSTALL_MODULES".into(), "true".into());
    m.insert("PRETTIFY_MARKDOWN".into(), "true".into());

    m
}
