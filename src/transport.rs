use crate::http::{Bytes, Headers, Status};

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::BytesMut;

/// The outbound half of a connection.
///
/// A [`Response`](crate::Response) flushes through its transport exactly
/// once, when it is ended: the head first, then the buffered body, then
/// `end`.
pub trait Transport: Send {
    /// Write the status line and headers.
    fn write_head(&mut self, status: Status, headers: &Headers) -> io::Result<()>;

    /// Write a chunk of the body.
    fn write_data(&mut self, data: &[u8]) -> io::Result<()>;

    /// Finish the response.
    fn end(&mut self) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_head(&mut self, status: Status, headers: &Headers) -> io::Result<()> {
        (**self).write_head(status, headers)
    }

    fn write_data(&mut self, data: &[u8]) -> io::Result<()> {
        (**self).write_data(data)
    }

    fn end(&mut self) -> io::Result<()> {
        (**self).end()
    }
}

/// An in-memory transport.
///
/// Clones share the same recording, so one clone can be handed to a
/// response while another is kept to inspect the output afterwards.
#[derive(Clone, Default)]
pub struct Recorder {
    inner: Arc<Mutex<Recording>>,
}

#[derive(Default)]
struct Recording {
    status: Option<Status>,
    headers: Headers,
    body: BytesMut,
    ends: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The status written with the head, if the head was written.
    pub fn status(&self) -> Option<Status> {
        self.lock().status
    }

    pub fn headers(&self) -> Headers {
        self.lock().headers.clone()
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.lock().headers.get(name).map(ToOwned::to_owned)
    }

    pub fn bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.lock().body)
    }

    /// The body decoded as UTF-8, lossily.
    pub fn body(&self) -> String {
        String::from_utf8_lossy(&self.lock().body).into_owned()
    }

    /// How many times the transport was ended.
    pub fn ends(&self) -> usize {
        self.lock().ends
    }

    pub fn is_ended(&self) -> bool {
        self.ends() > 0
    }

    /// Convert the recording into an `http` response.
    ///
    /// Fails if a recorded header name or value is not valid HTTP.
    pub fn to_http(&self) -> Result<::http::Response<Bytes>, ::http::Error> {
        let recording = self.lock();
        let status = recording.status.unwrap_or_default();

        let mut builder = ::http::Response::builder().status(status.code());
        for (name, value) in recording.headers.iter() {
            builder = builder.header(name, value);
        }

        builder.body(Bytes::copy_from_slice(&recording.body))
    }
}

impl Transport for Recorder {
    fn write_head(&mut self, status: Status, headers: &Headers) -> io::Result<()> {
        let mut recording = self.lock();
        recording.status = Some(status);
        recording.headers = headers.clone();
        Ok(())
    }

    fn write_data(&mut self, data: &[u8]) -> io::Result<()> {
        self.lock().body.extend_from_slice(data);
        Ok(())
    }

    fn end(&mut self) -> io::Result<()> {
        self.lock().ends += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_output() {
        let recorder = Recorder::new();
        let mut transport = recorder.clone();

        let mut headers = Headers::new();
        headers.insert("X-Test", "1");

        transport.write_head(Status::Created, &headers).unwrap();
        transport.write_data(b"hello ").unwrap();
        transport.write_data(b"world").unwrap();
        transport.end().unwrap();

        assert_eq!(recorder.status(), Some(Status::Created));
        assert_eq!(recorder.header("X-Test").as_deref(), Some("1"));
        assert_eq!(recorder.body(), "hello world");
        assert_eq!(recorder.ends(), 1);

        let response = recorder.to_http().unwrap();
        assert_eq!(response.status(), 201);
        assert_eq!(response.headers()["x-test"], "1");
        assert_eq!(&response.body()[..], b"hello world");
    }
}
