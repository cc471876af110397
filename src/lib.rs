//! A benchmarking harness for a gRPC service.
//!
//! The crate has two halves. [`perf`] implements the benchmark target: a
//! service with three unary operations of trivial, verifiable semantics plus
//! a server-streaming and a client-streaming operation that move bulk random
//! payloads. [`bench`] implements the driver: it invokes each operation
//! sequentially, measuring per-call round-trip latency for the unary
//! operations and wall-clock throughput for the streaming ones. [`stats`]
//! aggregates latency samples and [`payload`] generates the random payloads
//! both halves exchange.
//!
//! All measurement is done from the driver's side with monotonic timestamps;
//! the service itself is stateless per request.

pub mod bench;
pub mod payload;
pub mod perf;
pub mod proto;
pub mod stats;
pub mod transitive;

/// A response from the RPC layer.
pub type RpcResponse<T> = Result<tonic::Response<T>, tonic::Status>;

/// A request whose body arrives as a stream of messages.
pub type StreamingRequest<T> = tonic::Request<tonic::Streaming<T>>;
