//! Helpers shared by the hand-written [`tower::Service`]s in this workspace

use std::{future::Future, pin::Pin};

use bytes::Bytes;
use http_body::Body;
use http_body_util::BodyExt;
use tower::Service;

/// Boxed future returned by services whose `call` is an `async` block
pub type ResponseFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Takes the service that was driven to readiness and leaves a fresh clone in its place.
///
/// `call` futures must own the ready service; the clone left behind starts
/// unready and is polled again before the next call.
/// See <https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services>
pub fn replace_ready_service<S, T>(src: &mut S) -> S
where
    S: Service<T> + Clone,
{
    let clone = src.clone();
    std::mem::replace(src, clone)
}

/// Buffers a whole [`Body`]
pub async fn read_body<B>(body: B) -> Result<Bytes, B::Error>
where
    B: Body<Data = Bytes>,
{
    Ok(body.collect().await?.to_bytes())
}
