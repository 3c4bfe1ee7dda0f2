use std::{env, fmt::Display, str::FromStr, sync::Arc, time::Duration};

use tracing::{info, warn};

use crate::{
    generator::{NumberGenerator, RandomIds, SeededNumbers, ThreadNumbers},
    service::Service,
    store::StoreKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub store: StoreKind,
    /// Seed for reproducible boards; thread randomness when unset.
    pub seed: Option<u64>,
    pub creation_timeout: Duration,
    /// Largest board, in cells, a client may ask for.
    pub max_cells: usize,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::Sharded,
            seed: None,
            creation_timeout: Duration::from_millis(2000),
            max_cells: 1_000_000,
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key)?;
    raw.trim()
        .parse()
        .inspect_err(|err| warn!("Ignoring {}={:?}: {}", key, raw, err))
        .ok()
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from `lookup`, which maps variable names to
    /// values. Missing or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let store = parse_var(&lookup, "SWEEPER_STORE").unwrap_or(defaults.store);
        let seed = parse_var(&lookup, "SWEEPER_SEED").or(defaults.seed);
        let creation_timeout = parse_var(&lookup, "GAME_CREATION_TIMEOUT_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.creation_timeout);
        let max_cells = parse_var(&lookup, "SWEEPER_MAX_CELLS").unwrap_or(defaults.max_cells);
        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.allowed_origins,
        };

        Self {
            store,
            seed,
            creation_timeout,
            max_cells,
            allowed_origins,
        }
    }

    pub fn service(&self) -> Service {
        let numbers: Arc<dyn NumberGenerator> = match self.seed {
            Some(seed) => {
                info!("Generating boards from seed {}", seed);
                Arc::new(SeededNumbers::new(seed))
            }
            None => Arc::new(ThreadNumbers),
        };

        info!("📊 Using {:?} game store", self.store);
        Service::new(self.store.build().into(), Arc::new(RandomIds), numbers)
            .with_max_cells(self.max_cells)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        assert_eq!(config(&[]), ServerConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config(&[
            ("SWEEPER_STORE", "memory"),
            ("SWEEPER_SEED", "42"),
            ("GAME_CREATION_TIMEOUT_MS", "250"),
            ("SWEEPER_MAX_CELLS", "400"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
        ]);

        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.creation_timeout, Duration::from_millis(250));
        assert_eq!(config.max_cells, 400);
        assert_eq!(
            config.allowed_origins,
            ["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config(&[
            ("SWEEPER_STORE", "redis"),
            ("SWEEPER_SEED", "soon"),
            ("GAME_CREATION_TIMEOUT_MS", "-5"),
            ("SWEEPER_MAX_CELLS", "lots"),
        ]);

        assert_eq!(config.store, StoreKind::Sharded);
        assert_eq!(config.seed, None);
        assert_eq!(config.creation_timeout, Duration::from_millis(2000));
        assert_eq!(config.max_cells, 1_000_000);
    }
}
