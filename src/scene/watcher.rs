// src/scene/watcher.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::Result;
use crate::map::Level;
use crate::scene::SharedScene;

/// Polls a level file on a background thread and swaps in a rebuilt scene
/// whenever its contents change.
///
/// `loaded` is the file content the scene was built from; any later content
/// that differs from it triggers a rebuild. Read failures after startup are
/// logged and the current scene is kept. Dropping the watcher stops and joins
/// the thread.
pub struct LevelWatcher {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl LevelWatcher {
    pub fn spawn<P: AsRef<Path>>(
        path: P,
        scale: f64,
        interval: Duration,
        scene: SharedScene,
        loaded: Vec<u8>,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (stop, stop_rx) = mpsc::channel::<()>();
        let last = Some(loaded);

        let handle = thread::Builder::new()
            .name("level-watcher".into())
            .spawn(move || {
                let mut poller = Poller {
                    path,
                    scale,
                    last,
                    scene,
                };
                info!("Watching {:?} every {:?}", poller.path, interval);
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => poller.poll(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("Level watcher for {:?} stopped", poller.path);
            })?;

        Ok(LevelWatcher {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Level watcher thread panicked");
            }
        }
    }
}

impl Drop for LevelWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Poller {
    path: PathBuf,
    scale: f64,
    last: Option<Vec<u8>>,
    scene: SharedScene,
}

impl Poller {
    fn poll(&mut self) {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("Unable to re-read level {:?}: {}", self.path, err);
                return;
            }
        };
        if self.last.as_ref() == Some(&bytes) {
            return;
        }

        let level = Level::from_bytes(&bytes, self.scale);
        info!(
            "Level {:?} changed, reloading {} walls",
            self.path,
            level.segments.len()
        );
        self.scene.replace(level.segments);
        self.last = Some(bytes);
    }
}
