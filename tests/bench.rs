use anyhow::Result;
use perfbench::bench::{double_rtt, drain_payloads, echo_rtt, push_payloads, triple_rtt};
use perfbench::payload;
use perfbench::perf::{PerfService, COLLECT_ACK, ECHO_PREFIX};
use perfbench::transitive::perf_client;

#[tokio::test]
async fn unary_rtts_measure_and_return_replies() -> Result<()> {
    let mut client = perf_client(PerfService::default()).await?;

    let (nanos, reply) = double_rtt(&mut client, 21).await?;
    assert!(nanos >= 0);
    assert_eq!(reply, 42);

    let (nanos, reply) = triple_rtt(&mut client, 2.5).await?;
    assert!(nanos >= 0);
    assert_eq!(reply, 7.5);

    let (nanos, reply) = echo_rtt(&mut client, "probe".to_owned()).await?;
    assert!(nanos >= 0);
    assert_eq!(reply, format!("{ECHO_PREFIX}probe"));

    Ok(())
}

#[tokio::test]
async fn drain_counts_every_streamed_byte() -> Result<()> {
    let mut client = perf_client(PerfService::new(8, 512)).await?;

    let transfer = drain_payloads(&mut client).await?;
    assert_eq!(transfer.total_bytes, 8 * 512);
    assert!(!transfer.elapsed.is_zero());
    assert!(transfer.bandwidth().is_ok());

    Ok(())
}

#[tokio::test]
async fn push_reports_volume_and_ack() -> Result<()> {
    let mut client = perf_client(PerfService::default()).await?;

    let (transfer, ack) = push_payloads(&mut client, 8, 512, payload::rng(Some(3))).await?;
    assert_eq!(transfer.total_bytes, 8 * 512);
    assert!(!transfer.elapsed.is_zero());
    assert_eq!(ack, COLLECT_ACK);

    Ok(())
}

#[tokio::test]
async fn push_accepts_zero_payloads() -> Result<()> {
    let mut client = perf_client(PerfService::default()).await?;

    let (transfer, ack) = push_payloads(&mut client, 0, 512, payload::rng(None)).await?;
    assert_eq!(transfer.total_bytes, 0);
    assert_eq!(ack, COLLECT_ACK);

    Ok(())
}
