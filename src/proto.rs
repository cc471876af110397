//! Types generated from the protobuf interface definition.

#[allow(missing_docs, clippy::missing_docs_in_private_items)]
#[allow(unreachable_pub, clippy::future_not_send)]
pub mod perf {
    tonic::include_proto!("perf");
}
