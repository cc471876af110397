//! Command-line interface for the benchmark harness.

use clap::{Parser, Subcommand};
use perfbench::perf::{DEFAULT_PAYLOAD_COUNT, DEFAULT_PAYLOAD_LEN};
use std::net::SocketAddr;

/// Command-line arguments for the benchmark harness.
#[derive(Debug, Parser)]
pub(crate) struct Args {
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// What operation to perform.
#[derive(Debug, Subcommand)]
#[command(version, propagate_version = true)]
pub(crate) enum Command {
    /// Run the benchmark target server.
    ///
    /// This will start a gRPC server exposing the benchmark operations. The
    /// server will listen on the given address until it is stopped.
    #[clap(alias = "run")]
    Serve(ServeArgs),
    /// Run the benchmark driver against a server.
    ///
    /// Measures per-call round-trip latency for the unary operations and
    /// wall-clock throughput for the streaming ones, in sequence.
    #[clap(alias = "drive")]
    Bench(BenchArgs),
}

/// Run the benchmark target server.
#[derive(Debug, Parser)]
#[command(propagate_version = true)]
pub(crate) struct ServeArgs {
    /// The address to listen on.
    #[clap(default_value = "[::]:10000")]
    pub(crate) addr: SocketAddr,
    /// Number of payloads emitted per server-streaming call.
    #[clap(long, default_value_t = DEFAULT_PAYLOAD_COUNT)]
    pub(crate) payload_count: u32,
    /// Length in bytes of each emitted payload.
    #[clap(long, default_value_t = DEFAULT_PAYLOAD_LEN)]
    pub(crate) payload_len: usize,
    /// Seed for the payload generator. Each streaming call draws fresh
    /// entropy when omitted.
    #[clap(long)]
    pub(crate) seed: Option<u64>,
}

/// Run the benchmark driver against a server.
#[derive(Debug, Parser)]
#[command(propagate_version = true)]
pub(crate) struct BenchArgs {
    /// The server endpoint to benchmark.
    #[clap(default_value = "http://127.0.0.1:10000")]
    pub(crate) endpoint: String,
    /// Round trips measured per unary operation.
    #[clap(long, default_value_t = 5)]
    pub(crate) trials: u32,
    /// Number of payloads pushed during the client-streaming benchmark.
    #[clap(long, default_value_t = DEFAULT_PAYLOAD_COUNT)]
    pub(crate) payload_count: u32,
    /// Length in bytes of each pushed payload.
    #[clap(long, default_value_t = DEFAULT_PAYLOAD_LEN)]
    pub(crate) payload_len: usize,
    /// Seed for the payload generator. Payloads and unary inputs are
    /// reproducible across runs when set.
    #[clap(long)]
    pub(crate) seed: Option<u64>,
}
