//! A pair cursor over fixed-size byte chunks of a reader.

use std::io::{Read, Seek, SeekFrom};

use bytes::Bytes;
use kivi_common::Result;
use kivi_common::error::Error;
use kivi_common::verify_arg;
use log::debug;

use crate::cursor::PairCursor;

/// A pair cursor over an `std::io::Read`, yielding `(offset, chunk)` pairs.
///
/// Chunks are read on demand into a single-slot buffer, so
/// [`current`](PairCursor::current) is repeatable at one position without touching
/// the reader again. Every chunk is exactly `chunk_size` bytes long except possibly
/// the last one; the key is the byte offset of the chunk's first byte.
///
/// The cursor is one-pass for plain readers: `restart` reports an error once
/// reading has begun. For seekable readers, [`rewind`](ChunkCursor::rewind) seeks
/// back to the start of the stream.
///
/// I/O faults surface as [`ErrorKind::Io`](kivi_common::error::ErrorKind::Io) and
/// abort the current read; the cursor does not retry.
pub struct ChunkCursor<R> {
    reader: R,
    chunk_size: usize,
    /// Byte offset of the first byte of `current`.
    offset: u64,
    /// The chunk at the current position, if already read.
    current: Option<Bytes>,
    /// Number of chunks produced so far.
    chunks: usize,
    eof: bool,
    started: bool,
}

impl<R: Read> ChunkCursor<R> {
    /// Creates a cursor reading `chunk_size`-byte chunks from `reader`.
    ///
    /// Fails with `InvalidArgument` if `chunk_size` is zero.
    pub fn new(reader: R, chunk_size: usize) -> Result<Self> {
        verify_arg!(chunk_size, chunk_size > 0);
        Ok(ChunkCursor {
            reader,
            chunk_size,
            offset: 0,
            current: None,
            chunks: 0,
            eof: false,
            started: false,
        })
    }

    /// Returns the configured chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Consumes the cursor and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads the next chunk into the buffer, unless one is already there or the
    /// stream has ended. Short reads are retried until the chunk is full or the
    /// stream ends, so only the final chunk can be shorter than `chunk_size`.
    fn fill(&mut self) -> Result<()> {
        if self.current.is_some() || self.eof {
            return Ok(());
        }
        self.started = true;

        let mut buf = vec![0u8; self.chunk_size];
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io("chunk read", e)),
            }
        }

        if filled == 0 {
            self.eof = true;
            debug!(
                "chunk cursor reached end of stream at offset {} after {} chunks",
                self.offset, self.chunks
            );
        } else {
            buf.truncate(filled);
            self.current = Some(Bytes::from(buf));
            self.chunks += 1;
        }
        Ok(())
    }
}

impl<R: Read + Seek> ChunkCursor<R> {
    /// Seeks the reader back to the start of the stream and resets the cursor.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| Error::io("chunk rewind", e))?;
        self.offset = 0;
        self.current = None;
        self.chunks = 0;
        self.eof = false;
        self.started = false;
        Ok(())
    }
}

impl<R: Read> PairCursor for ChunkCursor<R> {
    type Key = u64;
    type Value = Bytes;

    fn is_valid(&mut self) -> Result<bool> {
        self.fill()?;
        Ok(self.current.is_some())
    }

    fn current(&mut self) -> Result<(u64, Bytes)> {
        self.fill()?;
        match &self.current {
            Some(chunk) => Ok((self.offset, chunk.clone())),
            None => Err(Error::position_out_of_bounds(self.chunks, self.chunks)),
        }
    }

    fn advance(&mut self) -> Result<()> {
        self.fill()?;
        if let Some(chunk) = self.current.take() {
            self.offset += chunk.len() as u64;
        }
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        if self.started {
            Err(Error::restart_unsupported("ChunkCursor"))
        } else {
            Ok(())
        }
    }
}

impl<R> std::fmt::Debug for ChunkCursor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkCursor")
            .field("chunk_size", &self.chunk_size)
            .field("offset", &self.offset)
            .field("eof", &self.eof)
            .finish_non_exhaustive()
    }
}
