//! File watcher service for watch mode.
//!
//! Monitors input files for changes and broadcasts one event per burst of
//! writes, after a quiet period.

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// Event sent when watched files change
#[derive(Debug, Clone)]
pub struct FileChangeEvent {
    /// Watched paths that changed
    pub paths: Vec<PathBuf>,
}

/// File watcher for a fixed set of files
pub struct FileWatcher {
    /// Broadcast sender for file change events
    sender: broadcast::Sender<FileChangeEvent>,
    /// Handle to the watcher (kept alive)
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `files`, coalescing changes that arrive within `debounce` of
    /// each other.
    ///
    /// The parent directories are watched rather than the files themselves,
    /// so editors that save by replacing the file are still seen. Must be
    /// called from within a tokio runtime.
    pub fn new(files: &[PathBuf], debounce: Duration) -> Result<Self, notify::Error> {
        let (sender, _) = broadcast::channel(16);

        let targets: Vec<PathBuf> = files
            .iter()
            .map(|f| std::path::absolute(f).unwrap_or_else(|_| f.clone()))
            .collect();
        let watcher = Self::start_watcher(&targets, sender.clone(), debounce)?;

        for path in &targets {
            tracing::info!(path = %path.display(), "File watcher started");
        }

        Ok(Self {
            sender,
            _watcher: watcher,
        })
    }

    fn start_watcher(
        targets: &[PathBuf],
        sender: broadcast::Sender<FileChangeEvent>,
        debounce: Duration,
    ) -> Result<RecommendedWatcher, notify::Error> {
        // Raw, undebounced changes
        let (tx, mut rx) = mpsc::channel::<PathBuf>(100);

        tokio::spawn(async move {
            let mut pending: HashSet<PathBuf> = HashSet::new();
            loop {
                let next = if pending.is_empty() {
                    rx.recv().await
                } else {
                    match tokio::time::timeout(debounce, rx.recv()).await {
                        Ok(next) => next,
                        Err(_) => {
                            let mut paths: Vec<PathBuf> = pending.drain().collect();
                            paths.sort();
                            tracing::debug!(paths = ?paths, "Files changed (debounced)");
                            let _ = sender.send(FileChangeEvent { paths });
                            continue;
                        }
                    }
                };
                match next {
                    Some(path) => {
                        pending.insert(path);
                    }
                    None => break,
                }
            }
        });

        // Match events by file name within the watched directories
        let by_name: Vec<(OsString, PathBuf)> = targets
            .iter()
            .filter_map(|t| t.file_name().map(|n| (n.to_os_string(), t.clone())))
            .collect();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                let Ok(event) = res else { return };
                if event.kind.is_access() {
                    return;
                }
                for path in event.paths {
                    let Some(name) = path.file_name() else { continue };
                    for (target_name, target) in &by_name {
                        if name == target_name.as_os_str() {
                            let _ = tx.blocking_send(target.clone());
                        }
                    }
                }
            },
            Config::default(),
        )?;

        let mut dirs: HashSet<&Path> = HashSet::new();
        for target in targets {
            let dir = target.parent().unwrap_or_else(|| Path::new("."));
            if dirs.insert(dir) {
                watcher.watch(dir, RecursiveMode::NonRecursive)?;
            }
        }

        Ok(watcher)
    }

    /// Subscribe to file change events
    pub fn subscribe(&self) -> broadcast::Receiver<FileChangeEvent> {
        self.sender.subscribe()
    }
}
