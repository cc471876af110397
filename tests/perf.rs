use anyhow::Result;
use futures::{stream, StreamExt as _};
use perfbench::payload;
use perfbench::perf::{
    DoubleMessage, IntMessage, PerfService, StringMessage, COLLECT_ACK, ECHO_PREFIX,
};
use perfbench::transitive::perf_client;

#[tokio::test]
async fn double_roundtrip() -> Result<()> {
    let mut client = perf_client(PerfService::default()).await?;

    let reply = client.double(IntMessage { number: 17 }).await?.into_inner();
    assert_eq!(reply.number, 34);

    let reply = client
        .double(IntMessage { number: i32::MAX })
        .await?
        .into_inner();
    assert_eq!(reply.number, -2);

    Ok(())
}

#[tokio::test]
async fn triple_roundtrip() -> Result<()> {
    let mut client = perf_client(PerfService::default()).await?;

    let reply = client
        .triple(DoubleMessage { number: 3.0 })
        .await?
        .into_inner();
    assert_eq!(reply.number, 9.0);

    Ok(())
}

#[tokio::test]
async fn echo_roundtrip() -> Result<()> {
    let mut client = perf_client(PerfService::default()).await?;

    let reply = client
        .echo(StringMessage {
            message: "benchmark probe".to_owned(),
        })
        .await?
        .into_inner();
    assert!(reply.message.starts_with(ECHO_PREFIX));
    assert!(reply.message.ends_with("benchmark probe"));

    Ok(())
}

#[tokio::test]
async fn stream_payloads_yields_configured_stream() -> Result<()> {
    let mut client = perf_client(PerfService::new(8, 2048)).await?;

    let mut stream = client
        .stream_payloads(StringMessage {
            message: String::new(),
        })
        .await?
        .into_inner();

    let mut received = 0;
    while let Some(reply) = stream.message().await? {
        assert_eq!(reply.message.len(), 2048);
        received += 1;
    }
    assert_eq!(received, 8);

    Ok(())
}

#[tokio::test]
async fn stream_payloads_is_reproducible_with_seed() -> Result<()> {
    let mut client = perf_client(PerfService::new(2, 512).with_seed(42)).await?;

    let first: Vec<_> = client
        .stream_payloads(StringMessage {
            message: String::new(),
        })
        .await?
        .into_inner()
        .map(|reply| reply.map(|r| r.message))
        .collect()
        .await;
    let second: Vec<_> = client
        .stream_payloads(StringMessage {
            message: String::new(),
        })
        .await?
        .into_inner()
        .map(|reply| reply.map(|r| r.message))
        .collect()
        .await;

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.as_ref().ok(), b.as_ref().ok());
        assert!(a.is_ok());
    }

    Ok(())
}

#[tokio::test]
async fn collect_payloads_acks_after_drain() -> Result<()> {
    let mut client = perf_client(PerfService::default()).await?;

    let mut rng = payload::rng(Some(7));
    let payloads: Vec<_> = (0..16)
        .map(|_| StringMessage {
            message: payload::alphanumeric(&mut rng, 4096),
        })
        .collect();

    let reply = client
        .collect_payloads(stream::iter(payloads))
        .await?
        .into_inner();
    assert_eq!(reply.message, COLLECT_ACK);

    Ok(())
}

#[tokio::test]
async fn collect_payloads_acks_empty_stream() -> Result<()> {
    let mut client = perf_client(PerfService::default()).await?;

    let reply = client
        .collect_payloads(stream::iter(Vec::<StringMessage>::new()))
        .await?
        .into_inner();
    assert_eq!(reply.message, COLLECT_ACK);

    Ok(())
}
