//! Poll-based file change monitoring
//!
//! Re-stats the watched file on a fixed interval and emits an event when
//! the modification timestamp advances, the file disappears, or a failure
//! occurs. There is no content diffing: an update carries the full re-read
//! content.

use crate::config::WatchOptions;
use crate::events::WatchEvent;
use fsserve_core::{Error, Result, Sandbox};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Watches files for modification, emitting [`WatchEvent`]s through a channel
///
/// Each `watch` call runs an independent polling loop; concurrent watches
/// share nothing but the sandbox and this watcher's cancellation token.
pub struct ChangeWatcher {
    sandbox: Arc<Sandbox>,
    options: WatchOptions,
    cancellation: CancellationToken,
}

impl ChangeWatcher {
    /// Create a new change watcher
    pub fn new(sandbox: Arc<Sandbox>, options: WatchOptions) -> Self {
        Self {
            sandbox,
            options,
            cancellation: CancellationToken::new(),
        }
    }

    /// Start watching `path`
    ///
    /// Fails before any event is produced if the path is unsafe
    /// (`AccessDenied`) or the file does not exist (`NotFound`).
    /// Disappearance after this point is reported as a `Deleted` event
    /// instead, since that is an expected outcome of watching a file.
    ///
    /// The first event on the returned channel is always `Initial` with the
    /// content at open time. The channel closes after a terminal event,
    /// after [`ChangeWatcher::stop`], or once the receiver is dropped; no
    /// polling continues in the background in any of those cases.
    pub async fn watch(&self, path: impl AsRef<Path>) -> Result<mpsc::Receiver<WatchEvent>> {
        let resolved = self.sandbox.ensure_safe(path.as_ref())?;

        let content = read_text(&resolved).await?;
        let baseline = modified_time(&resolved).await?;

        let (tx, rx) = mpsc::channel(self.options.channel_capacity);
        let poll_interval = self.options.poll_interval();
        let cancel = self.cancellation.child_token();

        tokio::spawn(async move {
            debug!("watching {}", resolved.display());
            if tx
                .send(WatchEvent::Initial {
                    path: resolved.clone(),
                    content,
                })
                .await
                .is_err()
            {
                return;
            }

            run_poll_loop(&resolved, baseline, poll_interval, &tx, &cancel).await;
            debug!("watch ended for {}", resolved.display());
        });

        Ok(rx)
    }

    /// Stop every watch started from this watcher
    pub fn stop(&self) {
        self.cancellation.cancel();
    }
}

/// Outcome of one poll tick
enum Tick {
    Unchanged,
    Changed(SystemTime, String),
    Gone,
    Failed(String),
}

async fn run_poll_loop(
    path: &Path,
    mut baseline: SystemTime,
    poll_interval: std::time::Duration,
    tx: &mpsc::Sender<WatchEvent>,
    cancel: &CancellationToken,
) {
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first tick of a tokio interval completes immediately; consume it
    // so polls start one interval after the initial snapshot.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("watch cancelled for {}", path.display());
                break;
            }
            _ = interval.tick() => {
                match poll_once(path, baseline).await {
                    Tick::Unchanged => {}
                    Tick::Changed(mtime, content) => {
                        baseline = mtime;
                        let event = WatchEvent::Update { path: path.to_path_buf(), content };
                        if tx.send(event).await.is_err() {
                            // Receiver gone; stop polling.
                            break;
                        }
                    }
                    Tick::Gone => {
                        warn!("watched file no longer exists: {}", path.display());
                        let _ = tx.send(WatchEvent::Deleted { path: path.to_path_buf() }).await;
                        break;
                    }
                    Tick::Failed(message) => {
                        warn!("error watching {}: {message}", path.display());
                        let event = WatchEvent::Error { path: path.to_path_buf(), message };
                        let _ = tx.send(event).await;
                        break;
                    }
                }
            }
        }
    }
}

async fn poll_once(path: &Path, baseline: SystemTime) -> Tick {
    let mtime = match tokio::fs::metadata(path).await {
        Ok(metadata) => match metadata.modified() {
            Ok(time) => time,
            Err(e) => return Tick::Failed(e.to_string()),
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Tick::Gone,
        Err(e) => return Tick::Failed(e.to_string()),
    };

    if mtime <= baseline {
        return Tick::Unchanged;
    }

    match read_text(path).await {
        Ok(content) => Tick::Changed(mtime, content),
        // Deleted between the stat and the read
        Err(Error::NotFound { .. }) => Tick::Gone,
        Err(e) => Tick::Failed(e.to_string()),
    }
}

async fn read_text(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::decode(path.display().to_string()))
}

async fn modified_time(path: &Path) -> Result<SystemTime> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Error::from_io(path, e))?;
    metadata.modified().map_err(|e| Error::from_io(path, e))
}
