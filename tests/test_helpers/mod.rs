//! Shared scratch directories and environment guards for integration tests.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Scratch directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    path: Utf8PathBuf,
    dir: Dir,
}

impl ScratchDir {
    /// Creates `pluginctl-<label>-<uuid>` under the system temp dir.
    pub fn new(label: &str) -> Result<Self, eyre::Report> {
        let temp = Utf8PathBuf::from_path_buf(env::temp_dir())
            .map_err(|path| eyre::eyre!("temp dir is not UTF-8: {}", path.display()))?;
        let path = temp.join(format!("pluginctl-{label}-{}", uuid::Uuid::new_v4()));
        Dir::create_ambient_dir_all(&path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&path, ambient_authority())?;
        Ok(Self { path, dir })
    }

    /// Returns the absolute path.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns `relative` joined onto the scratch path.
    pub fn join(&self, relative: &str) -> Utf8PathBuf {
        self.path.join(relative)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> Result<(), eyre::Report> {
        if let Some(parent) = Utf8Path::new(relative)
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
        {
            self.dir.create_dir_all(parent)?;
        }
        self.dir.write(relative, contents)?;
        Ok(())
    }

    /// Creates a directory at `relative`.
    pub fn create_dir(&self, relative: &str) -> Result<(), eyre::Report> {
        self.dir.create_dir_all(relative)?;
        Ok(())
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let Some((parent, name)) = self.path.parent().zip(self.path.file_name()) else {
            return;
        };
        if let Ok(parent_dir) = Dir::open_ambient_dir(parent, ambient_authority()) {
            if parent_dir.remove_dir_all(name).is_err() {
                // Leftover scratch directories are harmless.
            }
        }
    }
}

/// Guard that applies a scoped environment variable update.
pub struct EnvVarGuard {
    previous: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets or clears multiple environment variables for the guard lifetime.
    pub fn set_many(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = env_lock();
        let mut previous = Vec::with_capacity(changes.len());

        for (key, value) in changes {
            previous.push(((*key).to_owned(), env::var(key).ok()));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
