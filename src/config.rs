use std::collections::HashMap;
use std::fs;

/// INI-style configuration with global keys and `[section]` blocks.
///
/// Used for optional overrides such as log directories and reliability
/// timings. Missing files and missing keys fall back to built-in defaults.
#[derive(Debug)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Error reading file {path}: {e}"))?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                current_section = Some(name.to_string());
                continue;
            }

            if let Some(pos) = line.find('=') {
                let key = line[..pos].trim().to_string();
                let value = line[pos + 1..].trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Config { globals, sections }
    }

    pub fn empty() -> Self {
        Self {
            globals: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    /// Parses a numeric key, falling back to `default` when the key is
    /// missing or not a valid number.
    #[must_use]
    pub fn get_u64_or(&self, section: &str, key: &str, default: u64) -> u64 {
        self.get_non_empty(section, key)
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = "\
# comment
global_key = top
[Logging]
server_log_path = \"/tmp/logs\"
server_log_filename = path_server
[Reliability]
ack_timeout_ms = 500
attempts = not-a-number
";

    #[test]
    fn parses_sections_and_globals() {
        let config = Config::parse(SAMPLE);
        assert_eq!(config.globals.get("global_key"), Some(&"top".to_string()));
        assert_eq!(config.get("Logging", "server_log_path"), Some("/tmp/logs"));
        assert_eq!(
            config.get("Logging", "server_log_filename"),
            Some("path_server")
        );
        assert_eq!(config.get("Logging", "missing"), None);
    }

    #[test]
    fn numeric_lookup_falls_back_on_bad_values() {
        let config = Config::parse(SAMPLE);
        assert_eq!(config.get_u64_or("Reliability", "ack_timeout_ms", 3000), 500);
        assert_eq!(config.get_u64_or("Reliability", "attempts", 3), 3);
        assert_eq!(config.get_u64_or("Reliability", "missing", 7), 7);
    }

    #[test]
    fn empty_config_answers_defaults() {
        let config = Config::empty();
        assert_eq!(config.get("Any", "key"), None);
        assert_eq!(config.get_u64_or("Any", "key", 7), 7);
    }
}
