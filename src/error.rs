//! Errors surfaced by the codec (§7).

/// Codec errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Propagated verbatim from the underlying byte stream.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The bit stream ended before an `Eof` sentinel code was decoded.
    /// A clean end of stream instead surfaces as `Ok(None)` from
    /// `Decoder::read_byte`.
    #[error("stream ended before the eof marker was decoded")]
    UnexpectedEof,
}
