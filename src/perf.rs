//! The benchmark target service.
//!
//! Every operation is a pure function of its request: the unary operations
//! apply a fixed arithmetic or string transform, the server-streaming
//! operation emits a configured number of fixed-length random payloads, and
//! the client-streaming operation drains its inbound stream and acknowledges
//! receipt. Nothing survives past the call that created it.

pub use crate::proto::perf::perf_client::PerfClient;
pub use crate::proto::perf::perf_server::{Perf as PerfRpc, PerfServer};
pub use crate::proto::perf::{
    DoubleMessage, DoubleReply, IntMessage, IntReply, StringMessage, StringReply,
};
use crate::{payload, RpcResponse, StreamingRequest};
use async_stream::stream;
use futures::Stream;
use std::pin::Pin;
use tonic::{Request, Response, Status};
use tracing::{debug, info};

/// Prefix prepended to every echoed message.
pub const ECHO_PREFIX: &str = "Message was: ";

/// Acknowledgment returned once an inbound payload stream has been drained.
pub const COLLECT_ACK: &str = "received all payloads";

/// Number of payloads emitted per streaming call unless configured otherwise.
pub const DEFAULT_PAYLOAD_COUNT: u32 = 100;

/// Length in bytes of each emitted payload unless configured otherwise.
pub const DEFAULT_PAYLOAD_LEN: usize = 1_000_000;

/// The benchmark target.
///
/// The payload dimensions only affect [`PerfRpc::stream_payloads`]; the
/// other operations are independent of configuration.
#[must_use]
#[derive(Debug, Clone)]
pub struct PerfService {
    /// Number of payloads emitted per streaming call.
    payload_count: u32,
    /// Length in bytes of each emitted payload.
    payload_len: usize,
    /// Seed for the payload generator. When set, every streaming call emits
    /// the same payload sequence; when unset, each call draws fresh entropy.
    seed: Option<u64>,
}

impl PerfService {
    /// Create a service emitting `payload_count` payloads of `payload_len`
    /// bytes per streaming call.
    #[inline]
    pub const fn new(payload_count: u32, payload_len: usize) -> Self {
        Self {
            payload_count,
            payload_len,
            seed: None,
        }
    }

    /// Fix the payload generator seed, making emitted payloads reproducible
    /// across calls and runs.
    #[inline]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for PerfService {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_PAYLOAD_COUNT, DEFAULT_PAYLOAD_LEN)
    }
}

#[tonic::async_trait]
impl PerfRpc for PerfService {
    type StreamPayloadsStream =
        Pin<Box<dyn Stream<Item = Result<StringReply, Status>> + Send + 'static>>;

    async fn double(&self, request: Request<IntMessage>) -> RpcResponse<IntReply> {
        let IntMessage { number } = request.into_inner();
        Ok(Response::new(IntReply {
            number: number.wrapping_mul(2),
        }))
    }

    async fn triple(&self, request: Request<DoubleMessage>) -> RpcResponse<DoubleReply> {
        let DoubleMessage { number } = request.into_inner();
        Ok(Response::new(DoubleReply {
            number: 3.0 * number,
        }))
    }

    async fn echo(&self, request: Request<StringMessage>) -> RpcResponse<StringReply> {
        let StringMessage { message } = request.into_inner();
        Ok(Response::new(StringReply {
            message: format!("{ECHO_PREFIX}{message}"),
        }))
    }

    // The request content is ignored; it exists to open the stream.
    async fn stream_payloads(
        &self,
        _request: Request<StringMessage>,
    ) -> RpcResponse<Self::StreamPayloadsStream> {
        let count = self.payload_count;
        let len = self.payload_len;
        let mut rng = payload::rng(self.seed);
        info!(count, len, "emitting payload stream");

        let stream = stream! {
            for _ in 0..count {
                yield Ok(StringReply {
                    message: payload::alphanumeric(&mut rng, len),
                });
            }
        };
        Ok(Response::new(Box::pin(stream) as Self::StreamPayloadsStream))
    }

    async fn collect_payloads(
        &self,
        request: StreamingRequest<StringMessage>,
    ) -> RpcResponse<StringReply> {
        let mut stream = request.into_inner();

        let mut received: u64 = 0;
        while let Some(StringMessage { message }) = stream.message().await? {
            received += 1;
            debug!(len = message.len(), "collected payload");
        }
        info!(payloads = received, "inbound stream drained");

        Ok(Response::new(StringReply {
            message: COLLECT_ACK.to_owned(),
        }))
    }
}
