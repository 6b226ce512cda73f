use std::io::{self, ErrorKind, Read};

use bytes::{Bytes, BytesMut};

const CHUNK_SIZE: usize = 2048;

/// Read a body to exhaustion.
///
/// The reader is polled until a read reports zero bytes, so sources that
/// deliver the payload over several reads are collected completely.
/// Interrupted reads are retried.
pub fn read_to_end<R>(reader: &mut R) -> io::Result<Bytes>
where
    R: Read + ?Sized,
{
    read_to_end_limited(reader, None)
}

pub(crate) fn read_to_end_limited<R>(reader: &mut R, limit: Option<usize>) -> io::Result<Bytes>
where
    R: Read + ?Sized,
{
    let mut buf = BytesMut::with_capacity(CHUNK_SIZE);
    let mut chunk = [0; CHUNK_SIZE];

    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if matches!(limit, Some(limit) if buf.len() + read > limit) {
            return Err(io::Error::new(ErrorKind::InvalidData, "body larger than limit"));
        }

        buf.extend_from_slice(&chunk[..read]);
    }

    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out one byte per read, interrupting every other call.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        calls: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }

            match self.data.get(self.pos) {
                Some(&byte) if !buf.is_empty() => {
                    buf[0] = byte;
                    self.pos += 1;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn collects_across_reads() {
        let mut reader = Trickle {
            data: b"many small reads".to_vec(),
            pos: 0,
            calls: 0,
        };

        let body = read_to_end(&mut reader).unwrap();
        assert_eq!(&body[..], b"many small reads");
        assert!(reader.calls > 16);
    }

    #[test]
    fn larger_than_one_chunk() {
        let data = vec![7u8; CHUNK_SIZE * 3 + 5];
        let body = read_to_end(&mut &data[..]).unwrap();
        assert_eq!(body.len(), data.len());
    }

    #[test]
    fn errors_propagate() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::ConnectionReset, "reset"))
            }
        }

        let err = read_to_end(&mut Broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectionReset);
    }
}
