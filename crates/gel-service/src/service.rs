use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use gel_ledger::{ChainReader, Entry, Ledger, LedgerError};
use gel_types::Payload;

use crate::error::ServiceError;

/// Requests routed through the single admission worker.
enum Request {
    Admit {
        payload: Payload,
        reply: oneshot::Sender<Result<Entry, LedgerError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Result<Vec<Entry>, LedgerError>>,
    },
    Verify {
        reply: oneshot::Sender<Result<(), LedgerError>>,
    },
    Shutdown,
}

/// Configuration for the admission service channels.
#[derive(Clone, Debug)]
pub struct AdmissionConfig {
    /// Capacity of the request queue. Senders back-pressure when full.
    pub queue_capacity: usize,
    /// Capacity of the per-subscriber entry broadcast channel.
    pub broadcast_capacity: usize,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            broadcast_capacity: 256,
        }
    }
}

/// Spawns the admission worker that owns a [`Ledger`].
pub struct AdmissionService;

impl AdmissionService {
    /// Move the ledger into a dedicated worker task and return a handle.
    pub fn spawn(ledger: Ledger) -> AdmissionHandle {
        Self::spawn_with_config(ledger, AdmissionConfig::default())
    }

    pub fn spawn_with_config(ledger: Ledger, config: AdmissionConfig) -> AdmissionHandle {
        let (tx, mut rx) = mpsc::channel::<Request>(config.queue_capacity);
        let (events, _) = broadcast::channel::<Entry>(config.broadcast_capacity);
        let cancel = Arc::new(AtomicBool::new(false));

        let ledger = Arc::new(ledger);
        let worker_events = events.clone();
        let worker_cancel = Arc::clone(&cancel);

        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                match request {
                    Request::Admit { payload, reply } => {
                        // A stale interrupt from an idle period must not
                        // cancel this fresh search.
                        worker_cancel.store(false, Ordering::Relaxed);

                        let ledger = Arc::clone(&ledger);
                        let flag = Arc::clone(&worker_cancel);
                        let joined = tokio::task::spawn_blocking(move || {
                            ledger.admit_cancellable(payload, &flag)
                        })
                        .await;

                        let result = match joined {
                            Ok(result) => result,
                            Err(e) => Err(LedgerError::LedgerCorrupted {
                                seq: 0,
                                reason: format!("admission worker panicked: {e}"),
                            }),
                        };

                        if let Ok(entry) = &result {
                            // Published only after the append completed; a
                            // send error just means nobody is listening.
                            let _ = worker_events.send(entry.clone());
                        }
                        let _ = reply.send(result);
                    }
                    Request::Snapshot { reply } => {
                        let _ = reply.send(ledger.entries());
                    }
                    Request::Verify { reply } => {
                        let _ = reply.send(ledger.verify());
                    }
                    Request::Shutdown => break,
                }
            }
            debug!("admission worker stopped");
        });

        AdmissionHandle { tx, events, cancel }
    }
}

/// Cheap, cloneable handle to the admission worker.
#[derive(Clone)]
pub struct AdmissionHandle {
    tx: mpsc::Sender<Request>,
    events: broadcast::Sender<Entry>,
    cancel: Arc<AtomicBool>,
}

impl AdmissionHandle {
    /// Submit a payload for admission and await the appended entry.
    ///
    /// Requests are processed strictly in arrival order; two concurrent
    /// admissions can never read the same predecessor.
    pub async fn admit(&self, payload: Payload) -> Result<Entry, ServiceError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Request::Admit { payload, reply })
            .await
            .map_err(|_| ServiceError::WorkerGone)?;
        response
            .await
            .map_err(|_| ServiceError::WorkerGone)?
            .map_err(ServiceError::from)
    }

    /// Snapshot of the whole chain, routed through the worker so readers
    /// never observe a partial append.
    pub async fn snapshot(&self) -> Result<Vec<Entry>, ServiceError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Request::Snapshot { reply })
            .await
            .map_err(|_| ServiceError::WorkerGone)?;
        response
            .await
            .map_err(|_| ServiceError::WorkerGone)?
            .map_err(ServiceError::from)
    }

    /// Run the full integrity check on the worker.
    pub async fn verify(&self) -> Result<(), ServiceError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Request::Verify { reply })
            .await
            .map_err(|_| ServiceError::WorkerGone)?;
        response
            .await
            .map_err(|_| ServiceError::WorkerGone)?
            .map_err(ServiceError::from)
    }

    /// Receive every entry appended from now on, in admission order.
    pub fn subscribe(&self) -> broadcast::Receiver<Entry> {
        self.events.subscribe()
    }

    /// Best-effort cancellation of the in-flight puzzle search.
    ///
    /// The search notices the flag within one check interval. Has no effect
    /// if the worker is idle.
    pub fn interrupt(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Stop the worker. The request being processed completes first; queued
    /// requests behind the shutdown are dropped and their callers observe
    /// [`ServiceError::WorkerGone`].
    pub async fn shutdown(&self) {
        let _ = self.tx.send(Request::Shutdown).await;
    }
}
