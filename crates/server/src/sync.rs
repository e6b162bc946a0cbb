// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Post-commit change notices and spreadsheet replication.
//!
//! Every committed transition names the collections it changed. For each
//! one a [`ChangeNotice`] carrying the whole new collection is built, sent
//! to live subscribers and handed to the configured [`Replicator`].
//!
//! # Architecture
//!
//! - Notices are derived from audit events after the state is stored
//! - Replication is fire-and-forget and never blocks a request
//! - Transport failures are logged and dropped; local state stays authoritative
//! - Live subscribers receive notices only; no commands travel over the socket

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use hrm::State;
use hrm_audit::{AuditEvent, CollectionKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of notices buffered for live subscribers.
/// Slow subscribers lose the oldest notices.
const NOTICE_BUFFER_SIZE: usize = 100;

/// A whole-collection replacement, as sent on the replication wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotice {
    /// The collection tag, e.g. `EMPLOYEES`.
    #[serde(rename = "type")]
    pub collection: String,
    /// The complete new value of the collection.
    pub data: Value,
}

impl ChangeNotice {
    /// Builds the notice for one collection of a committed state.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be serialized.
    pub fn for_collection(
        state: &State,
        collection: CollectionKind,
    ) -> Result<Self, serde_json::Error> {
        let data: Value = match collection {
            CollectionKind::Employees => serde_json::to_value(&state.employees)?,
            CollectionKind::Candidates => serde_json::to_value(&state.candidates)?,
            CollectionKind::Provinces => serde_json::to_value(&state.provinces)?,
            CollectionKind::Districts => serde_json::to_value(&state.districts)?,
            CollectionKind::Wards => serde_json::to_value(&state.wards)?,
            CollectionKind::Departments => serde_json::to_value(&state.departments)?,
            CollectionKind::Positions => serde_json::to_value(&state.positions)?,
        };
        Ok(Self {
            collection: collection.as_str().to_string(),
            data,
        })
    }
}

/// Errors raised while pushing a notice to the sync collaborator.
///
/// These never reach a caller: the replicator logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum SyncTransportError {
    /// The request could not be sent or timed out.
    #[error("sync request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The collaborator answered with a non-success status.
    #[error("sync endpoint answered {status}")]
    Status {
        /// The HTTP status code returned.
        status: u16,
    },
}

/// Destination for committed collection changes.
pub trait Replicator: Send + Sync {
    /// Hands a notice over for delivery. Must not block.
    fn replicate(&self, notice: ChangeNotice);
}

/// Replicates to a spreadsheet web endpoint with a JSON POST of
/// `{ "type": <tag>, "data": <collection> }`.
#[derive(Debug, Clone)]
pub struct SheetReplicator {
    client: reqwest::Client,
    url: String,
}

impl SheetReplicator {
    /// Creates a replicator posting to `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: String, timeout: Duration) -> Result<Self, SyncTransportError> {
        let client: reqwest::Client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    async fn push(
        client: &reqwest::Client,
        url: &str,
        notice: &ChangeNotice,
    ) -> Result<(), SyncTransportError> {
        let response: reqwest::Response = client.post(url).json(notice).send().await?;
        let status: reqwest::StatusCode = response.status();
        if !status.is_success() {
            return Err(SyncTransportError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

impl Replicator for SheetReplicator {
    fn replicate(&self, notice: ChangeNotice) {
        let client: reqwest::Client = self.client.clone();
        let url: String = self.url.clone();
        tokio::spawn(async move {
            match Self::push(&client, &url, &notice).await {
                Ok(()) => debug!(collection = %notice.collection, "Replicated collection"),
                Err(SyncTransportError::Status { status }) => {
                    warn!(collection = %notice.collection, status, "Sync endpoint rejected update");
                }
                Err(e) => error!(collection = %notice.collection, error = %e, "Sync failed"),
            }
        });
    }
}

/// Fans committed changes out to live subscribers and the replicator.
pub struct ChangeBroadcaster {
    tx: broadcast::Sender<ChangeNotice>,
    replicator: Option<Arc<dyn Replicator>>,
}

impl ChangeBroadcaster {
    /// Creates a broadcaster. Without a replicator, changes stay local.
    #[must_use]
    pub fn new(replicator: Option<Arc<dyn Replicator>>) -> Self {
        let (tx, _rx) = broadcast::channel(NOTICE_BUFFER_SIZE);
        Self { tx, replicator }
    }

    /// Publishes one notice per collection named by `events`.
    ///
    /// A collection named by several events is published once.
    pub fn publish(&self, state: &State, events: &[AuditEvent]) {
        let mut seen: Vec<CollectionKind> = Vec::new();
        for event in events {
            if seen.contains(&event.collection) {
                continue;
            }
            seen.push(event.collection);

            let notice: ChangeNotice = match ChangeNotice::for_collection(state, event.collection)
            {
                Ok(notice) => notice,
                Err(e) => {
                    error!(collection = %event.collection, error = %e, "Failed to build change notice");
                    continue;
                }
            };

            // Send fails only when nobody is listening.
            match self.tx.send(notice.clone()) {
                Ok(count) => debug!(receivers = count, collection = %notice.collection, "Broadcast change"),
                Err(_) => debug!(collection = %notice.collection, "No live subscribers"),
            }

            if let Some(replicator) = &self.replicator {
                replicator.replicate(notice);
            }
        }
    }

    /// Subscribes to future notices.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotice> {
        self.tx.subscribe()
    }
}

impl std::fmt::Debug for ChangeBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBroadcaster")
            .field("receivers", &self.tx.receiver_count())
            .field("replicating", &self.replicator.is_some())
            .finish()
    }
}

/// Upgrades to a WebSocket that streams change notices.
pub async fn live_changes_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<ChangeBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Arc<ChangeBroadcaster>) {
    info!("Client connected to change stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<ChangeNotice> = broadcaster.subscribe();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notice) => match serde_json::to_string(&notice) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => error!(?e, "Failed to serialize change notice"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Change stream subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    info!("Client disconnected from change stream");
}
