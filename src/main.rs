//! A command-line benchmark harness for a gRPC service.
//!
//! For usage, run `cargo run -- --help`.

// Benchmark reports are the program's output and go to stdout; diagnostics
// go through `tracing`.
#![allow(clippy::print_stdout)]

mod cli;

use crate::cli::{Args, BenchArgs, Command, ServeArgs};
use clap::Parser as _;
use perfbench::bench::{self, Transfer};
use perfbench::payload;
use perfbench::perf::{PerfClient, PerfServer, PerfService};
use perfbench::stats;
use rand::Rng as _;
use std::process::ExitCode;
use tonic::transport::Server;
use tracing::{error, info};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Args { command } = Args::parse();

    let future = async {
        match command {
            Command::Serve(args) => serve(args).await,
            Command::Bench(args) => bench(args).await,
        }
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(future)
}

/// Run the benchmark target server. This function will block until the
/// server is shut down.
async fn serve(
    ServeArgs {
        addr,
        payload_count,
        payload_len,
        seed,
    }: ServeArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut service = PerfService::new(payload_count, payload_len);
    if let Some(seed) = seed {
        service = service.with_seed(seed);
    }

    info!(%addr, payload_count, payload_len, "starting server");
    Server::builder()
        .add_service(PerfServer::new(service))
        .serve(addr)
        .await?;

    Ok(ExitCode::SUCCESS)
}

/// Run every benchmark section against the server at `endpoint`.
///
/// A failed dial ends the run; a failure inside a section is logged and the
/// remaining sections still execute, so one bad operation cannot hide the
/// others' results.
async fn bench(
    BenchArgs {
        endpoint,
        trials,
        payload_count,
        payload_len,
        seed,
    }: BenchArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut client = PerfClient::connect(endpoint.clone()).await?;
    let mut rng = payload::rng(seed);
    info!(%endpoint, trials, "connected");

    let mut samples = Vec::with_capacity(trials as usize);
    for _ in 0..trials {
        match bench::double_rtt(&mut client, rng.gen()).await {
            Ok((nanos, reply)) => {
                println!("double rtt: {nanos} ns (reply {reply})");
                samples.push(nanos);
            }
            Err(status) => error!(%status, "double call failed"),
        }
    }
    summarize("double", samples);

    let mut samples = Vec::with_capacity(trials as usize);
    for _ in 0..trials {
        match bench::triple_rtt(&mut client, rng.gen()).await {
            Ok((nanos, reply)) => {
                println!("triple rtt: {nanos} ns (reply {reply})");
                samples.push(nanos);
            }
            Err(status) => error!(%status, "triple call failed"),
        }
    }
    summarize("triple", samples);

    let mut samples = Vec::with_capacity(trials as usize);
    for _ in 0..trials {
        let probe = payload::alphanumeric(&mut rng, ECHO_PROBE_LEN);
        match bench::echo_rtt(&mut client, probe).await {
            Ok((nanos, reply)) => {
                println!("echo rtt: {nanos} ns (reply {reply})");
                samples.push(nanos);
            }
            Err(status) => error!(%status, "echo call failed"),
        }
    }
    summarize("echo", samples);

    match bench::drain_payloads(&mut client).await {
        Ok(transfer) => report_transfer("server streaming", &transfer),
        Err(status) => error!(%status, "server-streaming benchmark failed"),
    }

    match bench::push_payloads(&mut client, payload_count, payload_len, payload::rng(seed)).await {
        Ok((transfer, ack)) => {
            println!("client streaming ack: {ack}");
            report_transfer("client streaming", &transfer);
        }
        Err(status) => error!(%status, "client-streaming benchmark failed"),
    }

    Ok(ExitCode::SUCCESS)
}

/// Length of the random probe string sent to the echo operation.
const ECHO_PROBE_LEN: usize = 10;

/// Print the average and median over one unary section's latency samples.
fn summarize(op: &str, mut samples: Vec<i64>) {
    match (stats::average(&samples), stats::median(&mut samples)) {
        (Ok(average), Ok(median)) => {
            println!("{op} average: {average} ns, median: {median} ns");
        }
        _ => error!(op, "no successful round trips to summarize"),
    }
}

/// Print one streaming section's volume, duration, and bandwidth.
fn report_transfer(op: &str, transfer: &Transfer) {
    println!(
        "{op}: {} megabytes in {} seconds",
        transfer.megabytes(),
        transfer.seconds()
    );
    match transfer.bandwidth() {
        Ok(bandwidth) => println!("{op} bandwidth: {bandwidth} megabytes/second"),
        Err(err) => error!(op, %err, "bandwidth unavailable"),
    }
}
