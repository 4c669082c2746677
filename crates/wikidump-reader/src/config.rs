//! Dump reader configuration

use serde::{Deserialize, Serialize};

/// Title prefixes of non-article namespaces skipped by default.
pub const DEFAULT_IGNORED_NAMESPACES: &[&str] = &[
    "wikipedia:",
    "category:",
    "file:",
    "portal:",
    "template:",
    "mediawiki:",
    "user:",
    "help:",
    "book:",
    "draft:",
];

/// Yielded pages between two progress notices.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// Runtime configuration for a dump reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Title prefixes (with trailing colon) whose pages are skipped,
    /// matched case-insensitively against the start of the title
    pub ignored_namespaces: Vec<String>,
    /// Emit a progress notice every N yielded pages (0 = never)
    pub progress_interval: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            ignored_namespaces: DEFAULT_IGNORED_NAMESPACES
                .iter()
                .map(|ns| ns.to_string())
                .collect(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ReaderConfig {
    /// Configuration that yields every page, administrative ones included.
    pub fn keep_all_namespaces() -> Self {
        Self {
            ignored_namespaces: Vec::new(),
            ..Self::default()
        }
    }

    /// Lowercased prefixes in configured order, duplicates removed.
    pub(crate) fn normalized_namespaces(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.ignored_namespaces.len());
        for ns in &self.ignored_namespaces {
            let ns = ns.to_lowercase();
            if !ns.is_empty() && !out.contains(&ns) {
                out.push(ns);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.ignored_namespaces.len(), 10);
        assert_eq!(config.ignored_namespaces[0], "wikipedia:");
        assert_eq!(config.ignored_namespaces[9], "draft:");
        assert!(config.ignored_namespaces.iter().all(|ns| ns.ends_with(':')));
        assert_eq!(config.progress_interval, 10_000);
    }

    #[test]
    fn keep_all_has_no_prefixes() {
        let config = ReaderConfig::keep_all_namespaces();
        assert!(config.ignored_namespaces.is_empty());
        assert_eq!(config.progress_interval, DEFAULT_PROGRESS_INTERVAL);
    }

    #[test]
    fn normalization_lowercases_and_dedups() {
        let config = ReaderConfig {
            ignored_namespaces: vec![
                "Talk:".to_string(),
                "template:".to_string(),
                "TALK:".to_string(),
                String::new(),
            ],
            ..Default::default()
        };
        assert_eq!(config.normalized_namespaces(), vec!["talk:", "template:"]);
    }

    #[test]
    fn parse_partial_json_keeps_defaults() {
        let config: ReaderConfig = serde_json::from_str(r#"{"progress_interval": 500}"#).unwrap();
        assert_eq!(config.progress_interval, 500);
        assert_eq!(config.ignored_namespaces.len(), 10);
    }
}
