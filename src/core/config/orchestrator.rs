use crate::core::config::data::Config;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use std::time::SystemTime;

type BoxError = Box<dyn std::error::Error>;

#[derive(Default)]
struct ConfigCacheState {
    config: Option<Config>,
    modified: Option<SystemTime>,
}

/// Caches the parsed config and reloads it when the file changes on disk.
pub struct ConfigOrchestrator {
    path: PathBuf,
    state: Mutex<ConfigCacheState>,
}

static CONFIG_ORCHESTRATOR: LazyLock<ConfigOrchestrator> =
    LazyLock::new(|| ConfigOrchestrator::new(Config::config_path()));

impl ConfigOrchestrator {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: Mutex::new(ConfigCacheState::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_with_cache(&self) -> Result<Config, BoxError> {
        let mut state = self.lock();
        self.refresh(&mut state)?;
        Ok(state.config.clone().unwrap_or_default())
    }

    pub fn persist(&self, config: Config) -> Result<(), BoxError> {
        config.save_to_path(&self.path)?;
        let mut state = self.lock();
        state.modified = Self::modified_time(&self.path);
        state.config = Some(config);
        Ok(())
    }

    pub fn mutate<F, T>(&self, mutator: F) -> Result<T, BoxError>
    where
        F: FnOnce(&mut Config) -> Result<T, BoxError>,
    {
        let mut working = self.load_with_cache()?;
        let result = mutator(&mut working)?;
        self.persist(working)?;
        Ok(result)
    }

    fn refresh(&self, state: &mut ConfigCacheState) -> Result<(), BoxError> {
        let disk_modified = Self::modified_time(&self.path);
        if state.config.is_none() || state.modified != disk_modified {
            state.config = Some(Config::load_from_path(&self.path)?);
            state.modified = disk_modified;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ConfigCacheState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        fs::metadata(path).ok()?.modified().ok()
    }
}

impl Config {
    pub fn load() -> Result<Config, BoxError> {
        CONFIG_ORCHESTRATOR.load_with_cache()
    }

    pub fn save(&self) -> Result<(), BoxError> {
        CONFIG_ORCHESTRATOR.persist(self.clone())
    }

    pub fn mutate<F, T>(mutator: F) -> Result<T, BoxError>
    where
        F: FnOnce(&mut Config) -> Result<T, BoxError>,
    {
        CONFIG_ORCHESTRATOR.mutate(mutator)
    }

    pub fn location() -> &'static Path {
        CONFIG_ORCHESTRATOR.path()
    }
}
