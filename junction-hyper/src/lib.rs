//! Serve a [`junction::Router`] with hyper.
//!
//! Request bodies are collected before dispatch, and the router runs on
//! tokio's blocking pool since handlers are synchronous.

use std::convert::Infallible;
use std::future::{ready, Future, Ready};
use std::io::{self, Cursor};
use std::net::*;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::server::conn::AddrIncoming;
use hyper::service::Service;
use hyper::{Body, StatusCode};
use junction::{Completion, Recorder, Request, Router};

pub use hyper::Server;

pub trait Serve {
    /// Bind a hyper server to `addr`.
    ///
    /// # Panics
    ///
    /// Panics if the address cannot be resolved or bound.
    fn bind(self, addr: impl ToSocketAddr) -> Server<AddrIncoming, JunctionMakeService>;
    fn into_make_service(self) -> JunctionMakeService;
    fn into_service(self) -> JunctionService;
}

impl Serve for Router {
    fn bind(self, addr: impl ToSocketAddr) -> Server<AddrIncoming, JunctionMakeService> {
        let addr = addr.to_socket_addr().expect("failed to create socket addr");
        tracing::debug!(%addr, "binding server");
        hyper::Server::bind(&addr).serve(self.into_make_service())
    }

    fn into_make_service(self) -> JunctionMakeService {
        JunctionMakeService {
            service: self.into_service(),
        }
    }

    fn into_service(self) -> JunctionService {
        JunctionService {
            router: Arc::new(self),
        }
    }
}

pub struct JunctionMakeService {
    service: JunctionService,
}

impl<T> Service<T> for JunctionMakeService {
    type Response = JunctionService;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Infallible>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _: T) -> Self::Future {
        ready(Ok(self.service.clone()))
    }
}

#[derive(Clone)]
pub struct JunctionService {
    router: Arc<Router>,
}

impl Service<hyper::Request<Body>> for JunctionService {
    type Response = hyper::Response<Body>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: hyper::Request<Body>) -> Self::Future {
        let router = self.router.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();

            let body = match hyper::body::to_bytes(body).await {
                Ok(body) => body,
                Err(err) => {
                    tracing::debug!(error = %err, "failed to read request body");
                    return Ok(status(StatusCode::BAD_REQUEST));
                }
            };

            match tokio::task::spawn_blocking(move || dispatch(&router, parts, body)).await {
                Ok(Ok(res)) => Ok(res),
                Ok(Err(err)) => {
                    tracing::error!(error = %err, "invalid response");
                    Ok(status(StatusCode::INTERNAL_SERVER_ERROR))
                }
                Err(err) => {
                    tracing::error!(error = %err, "dispatch task failed");
                    Ok(status(StatusCode::INTERNAL_SERVER_ERROR))
                }
            }
        })
    }
}

fn dispatch(
    router: &Router,
    parts: Parts,
    body: Bytes,
) -> Result<hyper::Response<Body>, hyper::http::Error> {
    let recorder = Recorder::new();

    let mut req = Request::new(parts, Cursor::new(body));
    let mut res = router.response_for(&req, recorder.clone());

    // a stalled chain is flushed with whatever was buffered
    if router.dispatch(&mut req, &mut res) == Completion::Stalled {
        if let Err(err) = res.end() {
            tracing::debug!(error = %err, "failed to end stalled response");
        }
    }

    let (parts, body) = recorder.to_http()?.into_parts();
    Ok(hyper::Response::from_parts(parts, Body::from(body)))
}

fn status(status: StatusCode) -> hyper::Response<Body> {
    let mut res = hyper::Response::new(Body::empty());
    *res.status_mut() = status;
    res
}

pub trait ToSocketAddr {
    fn to_socket_addr(self) -> io::Result<SocketAddr>;
}

impl ToSocketAddr for SocketAddr {
    fn to_socket_addr(self) -> io::Result<SocketAddr> {
        Ok(self)
    }
}

macro_rules! to_socket_addr {
    ($($ty:ty),*) => {$(
        impl ToSocketAddr for $ty {
            fn to_socket_addr(self) -> io::Result<SocketAddr> {
                self.to_socket_addrs()?.next().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "no addresses to bind")
                })
            }
        }
    )*}
}

to_socket_addr! {
    &str,
    String,
    (&str, u16),
    (IpAddr, u16),
    (String, u16),
    (Ipv4Addr, u16),
    (Ipv6Addr, u16),
    SocketAddrV4,
    SocketAddrV6
}
