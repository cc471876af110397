//! Driver-side measurement primitives.
//!
//! Each function issues one RPC against a connected [`PerfClient`] and
//! reports what the driver observed: a signed nanosecond round-trip time for
//! the unary operations, a [`Transfer`] for the streaming ones. Reporting is
//! left to the caller so that failures can be logged without aborting the
//! remaining measurements.

use crate::payload;
use crate::perf::{DoubleMessage, IntMessage, PerfClient, StringMessage};
use async_stream::stream;
use rand::rngs::SmallRng;
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};
use tonic::transport::Channel;
use tonic::Status;

/// Error returned when bandwidth is requested over a zero-length interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroElapsed;

impl fmt::Display for ZeroElapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cannot compute bandwidth over a zero-length interval")
    }
}

impl Error for ZeroElapsed {}

/// The outcome of one streaming benchmark: how many bytes moved and how long
/// the wall clock said it took.
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct Transfer {
    /// Total payload bytes transferred.
    pub total_bytes: u64,
    /// Wall-clock duration of the transfer, measured from before the call
    /// was issued until the stream (or its acknowledgment) completed.
    pub elapsed: Duration,
}

impl Transfer {
    /// Payload volume in megabytes (10^6 bytes).
    #[must_use]
    pub fn megabytes(&self) -> f64 {
        self.total_bytes as f64 / 1e6
    }

    /// Elapsed wall-clock time in seconds.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Throughput in megabytes per second.
    pub fn bandwidth(&self) -> Result<f64, ZeroElapsed> {
        if self.elapsed.is_zero() {
            return Err(ZeroElapsed);
        }
        Ok(self.megabytes() / self.seconds())
    }
}

/// Round-trip a [`Double`](crate::perf::PerfRpc::double) call, returning the
/// observed latency in nanoseconds alongside the reply value.
pub async fn double_rtt(
    client: &mut PerfClient<Channel>,
    number: i32,
) -> Result<(i64, i32), Status> {
    let start = Instant::now();
    let reply = client.double(IntMessage { number }).await?;
    let nanos = start.elapsed().as_nanos() as i64;
    Ok((nanos, reply.into_inner().number))
}

/// Round-trip a [`Triple`](crate::perf::PerfRpc::triple) call, returning the
/// observed latency in nanoseconds alongside the reply value.
pub async fn triple_rtt(
    client: &mut PerfClient<Channel>,
    number: f64,
) -> Result<(i64, f64), Status> {
    let start = Instant::now();
    let reply = client.triple(DoubleMessage { number }).await?;
    let nanos = start.elapsed().as_nanos() as i64;
    Ok((nanos, reply.into_inner().number))
}

/// Round-trip an [`Echo`](crate::perf::PerfRpc::echo) call, returning the
/// observed latency in nanoseconds alongside the reply.
pub async fn echo_rtt(
    client: &mut PerfClient<Channel>,
    message: String,
) -> Result<(i64, String), Status> {
    let start = Instant::now();
    let reply = client.echo(StringMessage { message }).await?;
    let nanos = start.elapsed().as_nanos() as i64;
    Ok((nanos, reply.into_inner().message))
}

/// Drain one server-streaming call, accumulating the payload bytes received.
///
/// The timed interval opens before the call is issued and closes after the
/// stream signals end-of-input, so it covers stream setup and teardown as
/// well as the payload transfer itself.
pub async fn drain_payloads(client: &mut PerfClient<Channel>) -> Result<Transfer, Status> {
    let start = Instant::now();
    let mut stream = client
        .stream_payloads(StringMessage {
            message: String::new(),
        })
        .await?
        .into_inner();

    let mut total_bytes: u64 = 0;
    while let Some(reply) = stream.message().await? {
        total_bytes += reply.message.len() as u64;
    }
    let elapsed = start.elapsed();

    Ok(Transfer {
        total_bytes,
        elapsed,
    })
}

/// Push `count` fresh payloads of `len` bytes over one client-streaming
/// call, returning the transfer alongside the server's acknowledgment.
///
/// The timed interval closes only once the acknowledgment arrives: the final
/// round trip is deliberately part of the reported throughput.
pub async fn push_payloads(
    client: &mut PerfClient<Channel>,
    count: u32,
    len: usize,
    mut rng: SmallRng,
) -> Result<(Transfer, String), Status> {
    let total_bytes = u64::from(count) * len as u64;
    let outbound = stream! {
        for _ in 0..count {
            yield StringMessage {
                message: payload::alphanumeric(&mut rng, len),
            };
        }
    };

    let start = Instant::now();
    let ack = client.collect_payloads(outbound).await?.into_inner();
    let elapsed = start.elapsed();

    Ok((
        Transfer {
            total_bytes,
            elapsed,
        },
        ack.message,
    ))
}
