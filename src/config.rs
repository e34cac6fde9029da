use std::env;

use crate::record::DEFAULT_FORM_LENGTH;

const DEFAULT_PARTIAL_THRESHOLD: usize = 5;
const DEFAULT_BATCH_PARALLELISM: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub form_length: usize,
    // Team records with fewer non-default fields than this are flagged as partial.
    pub partial_data_threshold: usize,
    pub h2h_from_matches: bool,
    pub form_from_last_matches: bool,
    pub batch_parallelism: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            form_length: DEFAULT_FORM_LENGTH,
            partial_data_threshold: DEFAULT_PARTIAL_THRESHOLD,
            h2h_from_matches: true,
            form_from_last_matches: true,
            batch_parallelism: DEFAULT_BATCH_PARALLELISM,
        }
    }
}

impl NormalizerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            form_length: env_parse("VALUE_HUNTER_FORM_LENGTH")
                .unwrap_or(defaults.form_length)
                .clamp(1, 20),
            partial_data_threshold: env_parse("VALUE_HUNTER_PARTIAL_THRESHOLD")
                .unwrap_or(defaults.partial_data_threshold),
            h2h_from_matches: env_flag("VALUE_HUNTER_H2H_FROM_MATCHES")
                .unwrap_or(defaults.h2h_from_matches),
            form_from_last_matches: env_flag("VALUE_HUNTER_FORM_FROM_MATCHES")
                .unwrap_or(defaults.form_from_last_matches),
            batch_parallelism: env_parse("VALUE_HUNTER_PARALLELISM")
                .unwrap_or(defaults.batch_parallelism)
                .clamp(1, 32),
        }
    }
}

fn env_parse(key: &str) -> Option<usize> {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<usize>().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    let raw = env::var(key).ok()?;
    parse_flag(&raw)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
