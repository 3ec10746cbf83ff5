// Inventory Bridge
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Response adaptation between the legacy backend and the RPC surface
//!
//! Unary calls forward the backend object as a single response; streaming
//! calls emit one item per array element, in order, then close. Failures
//! always terminate the call with an explicit status, and a cancelled
//! stream aborts the in-flight backend request.

use crate::config::ConnectionConfig;
use crate::json;
use crate::legacy::{LegacyBackend, LegacyQuery};
use prost_types::Struct;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};
use tracing::debug;

/// Item stream type shared by all server-streaming methods.
pub type ItemStream = Pin<Box<dyn futures::Stream<Item = Result<Struct, Status>> + Send>>;

/// Buffered items between the backend task and the RPC transport.
const STREAM_BUFFER: usize = 16;

/// Fulfill a unary method: one fetch, one object response.
pub async fn unary<B: LegacyBackend>(backend: &B, config: ConnectionConfig, query: LegacyQuery) -> Result<Response<Struct>, Status> {
    let value = backend.fetch(&config, query).await?;
    let object = json::struct_from_json(value)?;

    Ok(Response::new(object))
}

/// Fulfill a server-streaming method: one fetch, one item per array element.
///
/// The fetch runs on a spawned task racing against channel closure, so a
/// cancelled RPC (client disconnect, deadline) aborts the backend request
/// and nothing further is emitted.
pub fn streamed<B: LegacyBackend>(backend: Arc<B>, config: ConnectionConfig, query: LegacyQuery) -> Response<ItemStream> {
    let (tx, rx) = mpsc::channel::<Result<Struct, Status>>(STREAM_BUFFER);

    tokio::spawn(async move {
        let fetched = tokio::select! {
            result = backend.fetch(&config, query) => result,
            _ = tx.closed() => {
                debug!("Stream cancelled before the backend replied, aborting request");
                return;
            }
        };

        match fetched.and_then(json::struct_items_from_json) {
            Ok(items) => {
                for item in items {
                    if tx.send(Ok(item)).await.is_err() {
                        // Receiver dropped mid-stream; stop emitting.
                        return;
                    }
                }
            }
            Err(error) => {
                let _ = tx.send(Err(error.into())).await;
            }
        }
    });

    let stream: ItemStream = Box::pin(ReceiverStream::new(rx));
    Response::new(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeResult;
    use async_trait::async_trait;
    use serde_json::{Value as JsonValue, json};
    use tokio_stream::StreamExt;

    struct CannedBackend {
        response: JsonValue,
    }

    #[async_trait]
    impl LegacyBackend for CannedBackend {
        async fn fetch(&self, _config: &ConnectionConfig, _query: LegacyQuery) -> BridgeResult<JsonValue> {
            Ok(self.response.clone())
        }
    }

    struct NeverBackend;

    #[async_trait]
    impl LegacyBackend for NeverBackend {
        async fn fetch(&self, _config: &ConnectionConfig, _query: LegacyQuery) -> BridgeResult<JsonValue> {
            futures::future::pending::<()>().await;
            unreachable!()
        }
    }

    #[tokio::test]
    async fn unary_forwards_the_object() {
        let backend = CannedBackend {
            response: json!({"confirmationCode": "ABC-1"}),
        };

        let response = unary(&backend, ConnectionConfig::default(), LegacyQuery::new("createReservation"))
            .await
            .unwrap();

        let object = response.into_inner();
        assert!(object.fields.contains_key("confirmationCode"));
    }

    #[tokio::test]
    async fn unary_rejects_a_non_object() {
        let backend = CannedBackend { response: json!([1, 2]) };

        let status = unary(&backend, ConnectionConfig::default(), LegacyQuery::new("createReservation"))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::Internal);
    }

    #[tokio::test]
    async fn streamed_emits_each_element_then_closes() {
        let backend = Arc::new(CannedBackend {
            response: json!([{"id": "1"}, {"id": "2"}]),
        });

        let mut stream = streamed(backend, ConnectionConfig::default(), LegacyQuery::new("getProductList")).into_inner();

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(
            first.fields["id"].kind,
            Some(prost_types::value::Kind::StringValue("1".to_string()))
        );
        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(
            second.fields["id"].kind,
            Some(prost_types::value::Kind::StringValue("2".to_string()))
        );
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn streamed_closes_with_an_error_on_a_non_array() {
        let backend = Arc::new(CannedBackend { response: json!({"id": "1"}) });

        let mut stream = streamed(backend, ConnectionConfig::default(), LegacyQuery::new("getProductList")).into_inner();

        let item = stream.next().await.unwrap();
        assert_eq!(item.unwrap_err().code(), tonic::Code::Internal);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn dropping_the_stream_aborts_the_backend_call() {
        let backend = Arc::new(NeverBackend);

        let stream = streamed(backend, ConnectionConfig::default(), LegacyQuery::new("getProductList")).into_inner();
        drop(stream);

        // The spawned task observes the closed channel and returns; nothing
        // to assert beyond not hanging.
        tokio::task::yield_now().await;
    }
}
