//! An in-process client for a [`PerfService`].
//!
//! The service is served over an in-memory duplex pipe rather than a network
//! socket, so tests and benches exercise the full client/codec/server path
//! without binding a port.

use crate::perf::{PerfClient, PerfServer, PerfService};
use hyper_util::rt::TokioIo;
use std::ops::{Deref, DerefMut};
use tonic::transport::{Channel, Endpoint, Server};

/// Buffer size of the duplex pipe. Streamed payloads larger than this move
/// through it in chunks.
const DUPLEX_SIZE: usize = 64 * 1024;

/// A client connected to a server running in the same process.
///
/// Dereferences to the underlying [`PerfClient`].
// TODO Add a way to shut down the server
#[derive(Debug)]
pub struct Transitive {
    /// The connected client.
    client: PerfClient<Channel>,
}

impl Deref for Transitive {
    type Target = PerfClient<Channel>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl DerefMut for Transitive {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.client
    }
}

/// Serve `service` over an in-memory duplex pipe and return a client
/// connected to it.
pub async fn perf_client(service: PerfService) -> Result<Transitive, tonic::transport::Error> {
    let (client, server) = tokio::io::duplex(DUPLEX_SIZE);

    let _join_handle = tokio::spawn(async move {
        Server::builder()
            .add_service(PerfServer::new(service))
            .serve_with_incoming(tokio_stream::once(Ok::<_, std::io::Error>(server)))
            .await
    });

    let mut client = Some(client);
    let channel = Endpoint::try_from("http://[::]:10000")?
        .connect_with_connector(tower::service_fn(move |_| {
            let client = client.take();
            async move {
                if let Some(client) = client {
                    Ok(TokioIo::new(client))
                } else {
                    Err(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "Client already taken",
                    ))
                }
            }
        }))
        .await?;

    Ok(Transitive {
        client: PerfClient::new(channel),
    })
}
