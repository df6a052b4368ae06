//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_repository;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::TempDir;
use userdesk::config::{DispatchConfig, DispatchMode};
use userdesk::images::ImageStore;
use userdesk::model::{ImageData, User, UserId};
use userdesk::repository::UserRepository;
use userdesk::ui::users::{EffectStream, UserDispatcher, UserEffect, UserIntent};

pub use mock_repository::{DelayedRepository, FailingRepository};

/// Dispatch settings for tests: no automatic initial load.
pub fn dispatch_config(mode: DispatchMode) -> DispatchConfig {
    DispatchConfig {
        mode,
        load_on_start: false,
    }
}

/// Dispatcher over `repository` with a [`StubImageStore`].
pub fn dispatcher_with(
    repository: Arc<dyn UserRepository>,
    mode: DispatchMode,
) -> (UserDispatcher, EffectStream, Arc<StubImageStore>) {
    let images = Arc::new(StubImageStore::default());
    let (dispatcher, effects) =
        UserDispatcher::new(repository, images.clone(), &dispatch_config(mode));
    (dispatcher, effects, images)
}

pub fn image() -> ImageData {
    ImageData::new(vec![0x89, b'P', b'N', b'G'])
}

pub fn add(name: &str, email: &str) -> UserIntent {
    UserIntent::AddUser {
        name: name.to_string(),
        email: email.to_string(),
        image: Some(image()),
    }
}

pub fn messages(effects: &mut EffectStream) -> Vec<String> {
    effects
        .drain()
        .iter()
        .map(|effect| effect.message().to_string())
        .collect()
}

pub fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|user| user.name.as_str()).collect()
}

/// Image store that hands out `mem://N` references without touching disk.
#[derive(Default)]
pub struct StubImageStore {
    saved: AtomicUsize,
    failing: std::sync::atomic::AtomicBool,
}

impl StubImageStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        store
    }

    pub fn saved(&self) -> usize {
        self.saved.load(Ordering::SeqCst)
    }
}

impl ImageStore for StubImageStore {
    fn save(&self, _image: &ImageData) -> Option<String> {
        if self.failing.load(Ordering::SeqCst) {
            return None;
        }
        let n = self.saved.fetch_add(1, Ordering::SeqCst) + 1;
        Some(format!("mem://{n}"))
    }
}

/// Write a config file into a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
