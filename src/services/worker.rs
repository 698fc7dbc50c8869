//! Background dithering worker.
//!
//! Requests carry a caller-assigned id and are processed one at a time in
//! submission order on the blocking thread pool. Every request produces
//! exactly one response with the same id. The worker never drops requests
//! itself; callers that only care about the newest request compare response
//! ids against a [`LatestRequest`] tracker.

use crate::error::WorkerError;
use glyph_dither::{process_image, DitherResult, DitherSettings, ImageBuffer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One unit of work for the worker
#[derive(Debug, Clone)]
pub struct DitherRequest {
    pub id: u64,
    pub image: Arc<ImageBuffer>,
    pub settings: DitherSettings,
}

/// Result of a [`DitherRequest`], tagged with the request id
#[derive(Debug)]
pub struct DitherResponse {
    pub id: u64,
    pub result: Result<DitherResult, WorkerError>,
}

/// Handle to a running worker
pub struct DitherWorker {
    sender: mpsc::Sender<DitherRequest>,
    handle: JoinHandle<()>,
}

impl DitherWorker {
    /// Spawn the worker on the current runtime.
    ///
    /// Returns the handle and the receiver on which responses arrive.
    pub fn spawn(capacity: usize) -> (Self, mpsc::Receiver<DitherResponse>) {
        let (sender, mut requests) = mpsc::channel::<DitherRequest>(capacity.max(1));
        let (responses, receiver) = mpsc::channel::<DitherResponse>(capacity.max(1));

        let handle = tokio::spawn(async move {
            while let Some(request) = requests.recv().await {
                let id = request.id;
                tracing::debug!(id, "Processing dither request");

                let result = tokio::task::spawn_blocking(move || {
                    process_image(&request.image, &request.settings)
                })
                .await
                .map_err(|e| {
                    tracing::error!(id, error = %e, "Dither task failed");
                    WorkerError::Failed(e.to_string())
                })
                .and_then(|r| r.map_err(WorkerError::from));

                if let Ok(ref r) = result {
                    tracing::debug!(
                        id,
                        cols = r.cols(),
                        rows = r.rows(),
                        elapsed_ms = r.elapsed().as_secs_f64() * 1000.0,
                        "Dithered image"
                    );
                }

                if responses.send(DitherResponse { id, result }).await.is_err() {
                    tracing::debug!("Response receiver dropped, stopping worker");
                    break;
                }
            }
        });

        (Self { sender, handle }, receiver)
    }

    /// Queue a request
    pub async fn submit(&self, request: DitherRequest) -> Result<(), WorkerError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| WorkerError::Closed)
    }

    /// Queue a request without waiting.
    ///
    /// A full queue hands the request back as `Ok(Some(request))` so the
    /// caller can retry once a response has been taken off the other end.
    pub fn try_submit(&self, request: DitherRequest) -> Result<Option<DitherRequest>, WorkerError> {
        match self.sender.try_send(request) {
            Ok(()) => Ok(None),
            Err(mpsc::error::TrySendError::Full(request)) => Ok(Some(request)),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(WorkerError::Closed),
        }
    }

    /// Stop accepting requests and wait for queued ones to finish
    pub async fn shutdown(self) -> Result<(), WorkerError> {
        drop(self.sender);
        self.handle
            .await
            .map_err(|e| WorkerError::Failed(e.to_string()))
    }
}

/// Monotonic request id source that remembers the newest id handed out
#[derive(Debug, Default)]
pub struct LatestRequest {
    latest: AtomicU64,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id; it becomes the current one
    pub fn next_id(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Newest id handed out, 0 before the first
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Whether a response with `id` is still wanted
    pub fn is_current(&self, id: u64) -> bool {
        id == self.latest()
    }
}
