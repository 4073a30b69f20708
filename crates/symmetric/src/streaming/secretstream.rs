//! SecretStream readers and writers

use std::io::{ErrorKind, Read, Write};

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace, warn};
use sodix_api::Random;
use zeroize::Zeroizing;

use crate::error::{validate, Error, Result, SymmetricResultExt};
use crate::secretstream::{
    ChunkTag, Header, SecretStreamXChaCha20Poly1305, ABYTES, HEADERBYTES, KEYBYTES,
};
use crate::streaming::{StreamingDecrypt, StreamingEncrypt};

/// Plaintext bytes per chunk written by [`SecretStreamWriter::new`]
pub const DEFAULT_CHUNK_SIZE: usize = 16384;
/// Largest chunk plaintext [`SecretStreamReader::new`] will accept
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1 << 20;

const LENGTH_PREFIX: usize = 4;
const TRUNCATED: &str = "truncated stream";

/// Streaming encryption into any [`Write`]
pub struct SecretStreamWriter<W: Write> {
    writer: W,
    state: SecretStreamXChaCha20Poly1305,
    buffer: Zeroizing<Vec<u8>>,
    chunk_size: usize,
    aad: Option<Vec<u8>>,
    chunks: u64,
}

impl<W: Write> SecretStreamWriter<W> {
    /// Creates a new encryption stream and writes its header
    pub fn new<R: Random + ?Sized>(
        writer: W,
        key: &[u8; KEYBYTES],
        aad: Option<&[u8]>,
        rng: &mut R,
    ) -> Result<Self> {
        Self::with_chunk_size(writer, key, aad, rng, DEFAULT_CHUNK_SIZE)
    }

    /// As [`new`](Self::new), cutting chunks of `chunk_size` plaintext bytes
    pub fn with_chunk_size<R: Random + ?Sized>(
        writer: W,
        key: &[u8; KEYBYTES],
        aad: Option<&[u8]>,
        rng: &mut R,
        chunk_size: usize,
    ) -> Result<Self> {
        let header = Header::random(rng)?;
        Self::with_header(writer, key, &header, aad, chunk_size)
    }

    /// Creates an encryption stream under a caller-chosen header
    ///
    /// The header must never repeat under the same key.
    pub fn with_header(
        mut writer: W,
        key: &[u8; KEYBYTES],
        header: &Header,
        aad: Option<&[u8]>,
        chunk_size: usize,
    ) -> Result<Self> {
        validate::parameter(chunk_size > 0, "SecretStreamWriter", "chunk size must be non-zero")?;
        let state = SecretStreamXChaCha20Poly1305::init_push_with_header(key, header);
        writer.write_all(header.as_bytes()).map_io_err_with("stream header")?;

        Ok(Self {
            writer,
            state,
            buffer: Zeroizing::new(Vec::with_capacity(chunk_size)),
            chunk_size,
            aad: aad.map(|a| a.to_vec()),
            chunks: 0,
        })
    }

    /// Encrypts `plaintext` as one chunk and writes it with its length prefix
    fn write_chunk(&mut self, plaintext: &[u8], tag: ChunkTag) -> Result<()> {
        let aad = self.aad.as_deref().unwrap_or(&[]);
        let chunk = self.state.push(plaintext, aad, tag)?;

        let mut prefix = [0u8; LENGTH_PREFIX];
        let len = u32::try_from(chunk.len()).map_err(|_| Error::InvalidLength {
            context: "stream chunk",
            expected: u32::MAX as usize,
            actual: chunk.len(),
        })?;
        LittleEndian::write_u32(&mut prefix, len);

        self.writer.write_all(&prefix).map_io_err_with("stream write")?;
        self.writer.write_all(&chunk).map_io_err_with("stream write")?;
        self.chunks += 1;
        trace!("stream writer: chunk {} of {} bytes", self.chunks, chunk.len());
        Ok(())
    }

    /// Encrypts every full chunk waiting in the buffer
    fn flush_full_chunks(&mut self) -> Result<()> {
        while self.buffer.len() >= self.chunk_size {
            let rest = Zeroizing::new(self.buffer.split_off(self.chunk_size));
            let full = core::mem::replace(&mut self.buffer, rest);
            self.write_chunk(&full, ChunkTag::Message)?;
        }
        Ok(())
    }
}

impl<W: Write> StreamingEncrypt<W> for SecretStreamWriter<W> {
    /// Buffers plaintext, writing a chunk whenever a full one is available
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);
        self.flush_full_chunks()
    }

    /// Writes the remaining plaintext as the final chunk
    fn finalize(mut self) -> Result<W> {
        let last = Zeroizing::new(core::mem::take(&mut *self.buffer));
        self.write_chunk(&last, ChunkTag::Final)?;
        self.writer.flush().map_io_err_with("stream flush")?;

        debug!("stream writer: finalized after {} chunks", self.chunks);
        Ok(self.writer)
    }
}

/// Streaming decryption from any [`Read`]
pub struct SecretStreamReader<R: Read> {
    reader: R,
    state: SecretStreamXChaCha20Poly1305,
    plaintext: Zeroizing<Vec<u8>>,
    position: usize,
    max_chunk_size: usize,
    aad: Option<Vec<u8>>,
    finished: bool,
}

impl<R: Read> SecretStreamReader<R> {
    /// Reads the stream header and prepares to decrypt
    pub fn new(reader: R, key: &[u8; KEYBYTES], aad: Option<&[u8]>) -> Result<Self> {
        Self::with_max_chunk_size(reader, key, aad, DEFAULT_MAX_CHUNK_SIZE)
    }

    /// As [`new`](Self::new), rejecting chunks over `max_chunk_size`
    /// plaintext bytes before allocating for them
    pub fn with_max_chunk_size(
        mut reader: R,
        key: &[u8; KEYBYTES],
        aad: Option<&[u8]>,
        max_chunk_size: usize,
    ) -> Result<Self> {
        let mut header = [0u8; HEADERBYTES];
        read_or_truncated(&mut reader, &mut header)?;
        let state = SecretStreamXChaCha20Poly1305::init_pull(&Header::new(header), key);

        Ok(Self {
            reader,
            state,
            plaintext: Zeroizing::new(Vec::new()),
            position: 0,
            max_chunk_size,
            aad: aad.map(|a| a.to_vec()),
            finished: false,
        })
    }

    /// True once the final chunk has been authenticated
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Reads, authenticates and decrypts the next chunk into the buffer
    fn next_chunk(&mut self) -> Result<()> {
        let mut prefix = [0u8; LENGTH_PREFIX];
        read_or_truncated(&mut self.reader, &mut prefix)?;
        let len = LittleEndian::read_u32(&prefix) as usize;

        validate::ciphertext_length("stream chunk", len, ABYTES)?;
        validate::max_length("stream chunk", len - ABYTES, self.max_chunk_size)?;

        let mut chunk = vec![0u8; len];
        read_or_truncated(&mut self.reader, &mut chunk)?;

        let aad = self.aad.as_deref().unwrap_or(&[]);
        let (plaintext, tag) = self.state.pull(&chunk, aad)?;
        trace!("stream reader: chunk of {} bytes, tag {:?}", len, tag);

        self.plaintext = Zeroizing::new(plaintext);
        self.position = 0;
        if tag.is_final() {
            self.finished = true;
            debug!("stream reader: final chunk authenticated");
        }
        Ok(())
    }
}

impl<R: Read> StreamingDecrypt<R> for SecretStreamReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        // Chunks may be empty, so keep going until there is something to copy
        while self.position == self.plaintext.len() {
            if self.finished || buf.is_empty() {
                return Ok(0);
            }
            self.next_chunk()?;
        }

        let available = &self.plaintext[self.position..];
        let to_copy = available.len().min(buf.len());
        buf[..to_copy].copy_from_slice(&available[..to_copy]);
        self.position += to_copy;
        Ok(to_copy)
    }
}

/// `read_exact`, reporting early end of input as a truncated stream
fn read_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    match reader.read_exact(buf) {
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            warn!("stream reader: input ended before the final chunk");
            Err(Error::ForgedOrCorrupted { context: TRUNCATED })
        }
        other => other.map_io_err_with("stream read"),
    }
}

/// Encrypts everything `reader` yields into `writer`
pub fn encrypt_stream<R: Read, W: Write, G: Random + ?Sized>(
    mut reader: R,
    writer: W,
    key: &[u8; KEYBYTES],
    aad: Option<&[u8]>,
    rng: &mut G,
) -> Result<()> {
    let mut stream = SecretStreamWriter::new(writer, key, aad, rng)?;

    let mut buffer = Zeroizing::new([0u8; 8192]);
    loop {
        let bytes_read = match reader.read(&mut buffer[..]) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).map_io_err_with("stream read"),
        };
        if bytes_read == 0 {
            break;
        }

        stream.write(&buffer[..bytes_read])?;
    }

    stream.finalize()?;
    Ok(())
}

/// Decrypts a framed stream from `reader` into `writer`
///
/// Plaintext is written chunk by chunk as each one authenticates; a stream
/// that fails part way has already delivered its authentic prefix.
pub fn decrypt_stream<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    key: &[u8; KEYBYTES],
    aad: Option<&[u8]>,
) -> Result<()> {
    let mut stream = SecretStreamReader::new(reader, key, aad)?;

    let mut buffer = Zeroizing::new([0u8; 8192]);
    loop {
        let bytes_read = stream.read(&mut buffer[..])?;
        if bytes_read == 0 {
            break;
        }

        writer.write_all(&buffer[..bytes_read]).map_io_err_with("stream write")?;
    }

    writer.flush().map_io_err_with("stream flush")?;
    Ok(())
}
