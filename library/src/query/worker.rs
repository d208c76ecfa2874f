use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;
use std::time::Duration;

use log::{debug, error};

use crate::error::LibraryError;
use crate::query::asset_query::AssetQueryService;
use crate::query::lookup::{LookupDispatcher, LookupRequest, LookupResponse};

/// Invoked on the worker thread after each response is sent, e.g. to wake the UI.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

enum WorkerMessage {
    Lookup(LookupRequest, Sender<LookupResponse>),
    Shutdown,
}

/// Background thread answering asset lookups for any number of clients.
pub struct LookupWorker {
    tx: Sender<WorkerMessage>,
    handle: Option<thread::JoinHandle<()>>,
}

impl LookupWorker {
    pub fn spawn(service: Arc<dyn AssetQueryService>) -> Result<Self, LibraryError> {
        Self::spawn_with_waker(service, None)
    }

    pub fn spawn_with_waker(
        service: Arc<dyn AssetQueryService>,
        waker: Option<Waker>,
    ) -> Result<Self, LibraryError> {
        let (tx, rx) = channel::<WorkerMessage>();

        let handle = thread::Builder::new()
            .name("asset-lookup".to_string())
            .spawn(move || {
                loop {
                    let (request, reply) = match rx.recv() {
                        Ok(WorkerMessage::Lookup(request, reply)) => (request, reply),
                        Ok(WorkerMessage::Shutdown) | Err(_) => break,
                    };

                    let result = service.query_assets(&request.query);
                    let epoch = request.ticket.epoch;
                    if reply
                        .send(LookupResponse {
                            ticket: request.ticket,
                            result,
                        })
                        .is_err()
                    {
                        debug!("Lookup client went away before epoch {} completed", epoch);
                        continue;
                    }
                    if let Some(waker) = &waker {
                        waker();
                    }
                }
            })?;

        Ok(Self {
            tx,
            handle: Some(handle),
        })
    }

    /// A client with its own response channel, for one editor.
    pub fn client(&self) -> LookupClient {
        let (response_tx, response_rx) = channel();
        LookupClient {
            tx: self.tx.clone(),
            response_tx,
            response_rx,
            in_flight: 0,
        }
    }
}

impl Drop for LookupWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(WorkerMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Asset lookup thread panicked");
            }
        }
    }
}

pub struct LookupClient {
    tx: Sender<WorkerMessage>,
    response_tx: Sender<LookupResponse>,
    response_rx: Receiver<LookupResponse>,
    in_flight: usize,
}

impl LookupClient {
    /// Blocks until the next response arrives or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<LookupResponse> {
        let response = self.response_rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(response)
    }
}

impl LookupDispatcher for LookupClient {
    fn dispatch(&mut self, request: LookupRequest) {
        self.in_flight += 1;
        if let Err(e) = self
            .tx
            .send(WorkerMessage::Lookup(request, self.response_tx.clone()))
        {
            // The worker is gone; answer locally so the editor still settles.
            if let WorkerMessage::Lookup(request, reply) = e.0 {
                error!(
                    "Asset lookup worker stopped; dropping lookup for asset {}",
                    request.ticket.asset_id
                );
                let _ = reply.send(LookupResponse {
                    ticket: request.ticket,
                    result: Err(LibraryError::Runtime(
                        "asset lookup worker stopped".to_string(),
                    )),
                });
            }
        }
    }

    fn poll(&mut self) -> Vec<LookupResponse> {
        let mut responses = Vec::new();
        loop {
            match self.response_rx.try_recv() {
                Ok(response) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    responses.push(response);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        responses
    }

    fn has_pending(&self) -> bool {
        self.in_flight > 0
    }
}
