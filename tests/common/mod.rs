#![allow(dead_code)]

use std::env;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use akujobip1::core::config::Settings;
use akujobip1::input::StreamReader;
use akujobip1::shell::Shell;
use akujobip1::streams::{SharedBuffer, Streams};

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Holds the process-wide working directory for one test and puts it back
/// on drop.
pub struct CwdGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    pub fn enter(dir: &Path) -> Self {
        let lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let original = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

pub type TestShell = Shell<StreamReader<Cursor<String>>>;

pub fn shell_with(settings: Settings, input: &str) -> (TestShell, SharedBuffer, SharedBuffer) {
    let (streams, out, err) = Streams::captured();
    let reader = StreamReader::new(Cursor::new(input.to_string()));
    (Shell::new(reader, settings, streams), out, err)
}

pub fn shell(input: &str) -> (TestShell, SharedBuffer, SharedBuffer) {
    shell_with(Settings::default(), input)
}

/// Canonical form, so paths compare equal through symlinked temp roots.
pub fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap()
}
