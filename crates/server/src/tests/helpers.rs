// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::AppState;
use crate::sync::{ChangeBroadcaster, ChangeNotice, Replicator};
use axum::{
    body::Body,
    http::{Request, Response},
};
use hrm::SequentialIds;
use hrm_api::sample_state;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Replicator that keeps every notice it is handed.
#[derive(Debug, Default)]
pub struct RecordingReplicator {
    notices: Mutex<Vec<ChangeNotice>>,
}

impl RecordingReplicator {
    /// Collection tags received so far, in order.
    pub fn tags(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.collection.clone())
            .collect()
    }

    /// The last notice received for `tag`.
    pub fn latest(&self, tag: &str) -> Option<ChangeNotice> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|n| n.collection == tag)
            .cloned()
    }
}

impl Replicator for RecordingReplicator {
    fn replicate(&self, notice: ChangeNotice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// App state over the sample data, with deterministic ids from 1000.
pub fn create_test_app_state(recorder: Arc<RecordingReplicator>) -> AppState {
    let replicator: Arc<dyn Replicator> = recorder;
    AppState::new(
        sample_state(),
        Box::new(SequentialIds::starting_at(1000)),
        ChangeBroadcaster::new(Some(replicator)),
    )
}

pub fn create_test_recorder() -> Arc<RecordingReplicator> {
    Arc::new(RecordingReplicator::default())
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-actor-id", "hr-01")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
