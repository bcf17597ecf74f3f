//! Chunked upload of live audio.
//!
//! Raw audio is read and sent one chunk at a time, so a stream of any length
//! is uploaded with a single chunk in memory.

use bytes::Bytes;
use futures_util::Stream;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Bytes per chunk when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Turns a reader into a single-pass stream of chunks of at most
/// `chunk_size` bytes.
///
/// Every chunk is filled completely unless the reader runs dry, so chunk
/// boundaries depend only on `chunk_size`. Once a read returns zero bytes an
/// empty chunk is yielded and the stream ends. A read error is yielded once
/// and also ends the stream.
///
/// Nothing is read until the stream is polled, and the next chunk is only
/// read after the previous one was taken. Dropping the stream drops the
/// reader.
pub fn chunk_source<R>(reader: R, chunk_size: usize) -> impl Stream<Item = io::Result<Bytes>> + Send
where
    R: AsyncRead + Send + 'static,
{
    let chunk_size = chunk_size.max(1);

    async_stream::stream! {
        let mut reader = std::pin::pin!(reader);

        loop {
            let mut buffer = vec![0u8; chunk_size];
            let mut filled = 0;

            while filled < chunk_size {
                match reader.read(&mut buffer[filled..]).await {
                    Ok(0) => break,
                    Ok(n) => filled += n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }

            buffer.truncate(filled);
            yield Ok(Bytes::from(buffer));

            if filled == 0 {
                return;
            }
        }
    }
}
