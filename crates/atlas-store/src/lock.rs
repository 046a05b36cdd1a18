//! Single-writer lock over the data directory.
//!
//! `atlas.write.lock` holds a JSON [`LockOwner`] naming the process and the
//! command that is rewriting the stores. A record whose process has exited
//! is stale and is replaced.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const LOCK_FILE: &str = "atlas.write.lock";

const WAIT_LIMIT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Who holds the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockOwner {
    pub pid: u32,
    /// Subcommand name, e.g. `"extract"`.
    pub command: String,
    pub acquired_at: DateTime<Utc>,
}

impl LockOwner {
    fn this_process(command: &str) -> Self {
        Self {
            pid: std::process::id(),
            command: command.to_string(),
            acquired_at: Utc::now(),
        }
    }

    fn is_alive(&self) -> bool {
        self.pid == std::process::id()
            || std::process::Command::new("kill")
                .args(["-0", &self.pid.to_string()])
                .status()
                .is_ok_and(|status| status.success())
    }
}

/// Exclusive write access to one data directory, released on drop.
#[derive(Debug)]
pub struct DataDirLock {
    path: PathBuf,
    owner: LockOwner,
}

enum Attempt {
    Taken(DataDirLock),
    Busy(LockOwner),
    Stale(LockOwner),
    /// The file exists but holds no owner record yet, or a corrupt one.
    Unreadable,
}

impl DataDirLock {
    /// Lock `data_dir` for `command`, waiting up to 30 seconds for a live
    /// holder to finish.
    ///
    /// # Errors
    ///
    /// [`StoreError::LockHeld`] or [`StoreError::LockUnavailable`] when the
    /// wait runs out; [`StoreError::Io`] when the directory is not writable.
    pub fn acquire(data_dir: &Path, command: &str) -> Result<Self, StoreError> {
        Self::acquire_within(data_dir, command, WAIT_LIMIT)
    }

    /// [`Self::acquire`] with an explicit wait limit.
    ///
    /// # Errors
    ///
    /// See [`Self::acquire`].
    pub fn acquire_within(
        data_dir: &Path,
        command: &str,
        wait: Duration,
    ) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(LOCK_FILE);
        let deadline = Instant::now() + wait;

        loop {
            let timed_out = Instant::now() >= deadline;
            match attempt(&path, command)? {
                Attempt::Taken(lock) => {
                    tracing::debug!(command, path = %path.display(), "acquired data dir lock");
                    return Ok(lock);
                }
                Attempt::Stale(owner) => {
                    tracing::warn!(
                        pid = owner.pid,
                        command = %owner.command,
                        "replacing lock left by an exited process"
                    );
                    let _ = fs::remove_file(&path);
                    continue;
                }
                Attempt::Busy(owner) if timed_out => {
                    return Err(StoreError::LockHeld {
                        pid: owner.pid,
                        command: owner.command,
                        path,
                    });
                }
                Attempt::Unreadable if timed_out => {
                    return Err(StoreError::LockUnavailable { path });
                }
                Attempt::Busy(owner) => {
                    tracing::info!(pid = owner.pid, command = %owner.command, "waiting for data dir lock");
                }
                Attempt::Unreadable => {}
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn owner(&self) -> &LockOwner {
        &self.owner
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn attempt(path: &Path, command: &str) -> Result<Attempt, StoreError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => {
            let owner = LockOwner::this_process(command);
            if let Err(source) = serde_json::to_writer(file, &owner) {
                let _ = fs::remove_file(path);
                return Err(StoreError::Json {
                    path: path.to_path_buf(),
                    source,
                });
            }
            Ok(Attempt::Taken(DataDirLock {
                path: path.to_path_buf(),
                owner,
            }))
        }
        Err(error) if error.kind() == ErrorKind::AlreadyExists => {
            let owner = fs::read_to_string(path)
                .ok()
                .and_then(|text| serde_json::from_str::<LockOwner>(&text).ok());
            Ok(match owner {
                Some(owner) if owner.is_alive() => Attempt::Busy(owner),
                Some(owner) => Attempt::Stale(owner),
                None => Attempt::Unreadable,
            })
        }
        Err(error) => Err(error.into()),
    }
}
