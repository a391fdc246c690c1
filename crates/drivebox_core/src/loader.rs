//! Background model loading
//!
//! Models are read and parsed on a worker thread while the frame loop keeps
//! running. The frame loop polls the handle once per frame; completion is
//! observed at a well-defined point instead of firing from a callback at an
//! arbitrary time. A load failure is logged and the demo continues without
//! the model.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::asset_error::AssetError;
use crate::model::MeshData;

/// Result of polling a [`ModelLoadHandle`]
#[derive(Debug)]
pub enum LoadState {
    /// The worker thread has not finished yet
    Pending,
    /// The mesh loaded and validated
    Ready(MeshData),
    /// The load failed; logging is left to the polling site
    Failed(AssetError),
}

/// A handle to a model load running on a background thread
///
/// Poll with [`poll`](Self::poll) once per frame. The handle yields its
/// result exactly once; polling after completion returns `Pending`.
pub struct ModelLoadHandle {
    path: PathBuf,
    receiver: Option<Receiver<Result<MeshData, AssetError>>>,
}

impl ModelLoadHandle {
    /// Start loading a model file on a background thread
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();

        let worker_path = path.clone();
        thread::spawn(move || {
            let result = MeshData::load(&worker_path);
            // The receiver may have been dropped; nothing to do then.
            let _ = sender.send(result);
        });

        Self {
            path,
            receiver: Some(receiver),
        }
    }

    /// The path this handle is loading
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Whether the handle can still produce a result
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Check for completion without blocking
    ///
    /// Returns `Ready` or `Failed` exactly once, then goes quiet.
    pub fn poll(&mut self) -> LoadState {
        let receiver = match self.receiver.as_ref() {
            Some(r) => r,
            None => return LoadState::Pending,
        };

        match receiver.try_recv() {
            Ok(Ok(mesh)) => {
                self.receiver = None;
                LoadState::Ready(mesh)
            }
            Ok(Err(err)) => {
                self.receiver = None;
                LoadState::Failed(err)
            }
            Err(TryRecvError::Empty) => LoadState::Pending,
            Err(TryRecvError::Disconnected) => {
                // Worker panicked before sending
                self.receiver = None;
                LoadState::Failed(AssetError::Parse(format!(
                    "loader thread for {} exited without a result",
                    self.path.display()
                )))
            }
        }
    }

    /// Block until the load finishes (test helper and startup use)
    pub fn wait(mut self) -> Result<MeshData, AssetError> {
        let receiver = match self.receiver.take() {
            Some(r) => r,
            None => return Err(AssetError::NotFound(self.path.display().to_string())),
        };
        match receiver.recv() {
            Ok(result) => result,
            Err(_) => Err(AssetError::Parse(format!(
                "loader thread for {} exited without a result",
                self.path.display()
            ))),
        }
    }
}
