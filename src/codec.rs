//! Adaptive Huffman streaming codec (§4.D, §4.E).
//!
//! `Encoder`/`Decoder` pair up a [`tools::symbols::SymbolTable`] with a
//! `bitstream_io` bit reader/writer. Neither side ever transmits the
//! code table: both rebuild it from the same deterministic update rule
//! after every symbol, so they stay in lock-step (§5).

use std::io::{Read, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::Error;
use crate::symbol::Symbol;
use crate::tools::symbols::SymbolTable;

/// Construction-time configuration. The only knob is the sliding
/// window's size (§6); encoder and decoder must agree on it out of band.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// `> 0`: window of this many symbols. `0`: the default (2048).
    /// `< 0`: no window, counts accumulate for the life of the stream.
    pub win_size: i64,
}

impl Default for Options {
    fn default() -> Self {
        Self { win_size: 0 }
    }
}

/// Streaming adaptive-Huffman encoder over any [`Write`] sink.
pub struct Encoder<W: Write> {
    symbols: SymbolTable,
    writer: BitWriter<W, BigEndian>,
}

impl<W: Write> Encoder<W> {
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, Options::default())
    }

    pub fn with_options(sink: W, options: Options) -> Self {
        Self { symbols: SymbolTable::new(options.win_size), writer: BitWriter::endian(sink, BigEndian) }
    }

    /// Emit `len` bits of `code`, MSB first; `code`'s meaningful bits sit
    /// in its low `len` bits (see `WorkingTree::code`).
    fn write_code(&mut self, code: u64, len: u8) -> Result<(), Error> {
        for i in (0..len).rev() {
            self.writer.write_bit((code >> i) & 1 == 1)?;
        }
        Ok(())
    }

    pub fn write_byte(&mut self, b: u8) -> Result<(), Error> {
        match self.symbols.lookup(Symbol::Byte(b)) {
            Some(idx) => {
                let (code, len) = self.symbols.code(idx);
                self.write_code(code, len)?;
                self.symbols.update(idx);
            }
            None => {
                let new_idx = self.symbols.lookup(Symbol::New).expect("New sentinel is always live");
                let (code, len) = self.symbols.code(new_idx);
                self.write_code(code, len)?;
                self.write_code(b as u64, 8)?;
                self.symbols.insert(Symbol::Byte(b));
            }
        }
        Ok(())
    }

    /// Encode every byte of `buf`. On the first error, returns the
    /// number of bytes fully encoded beforehand alongside it (§7).
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, (usize, Error)> {
        for (i, &b) in buf.iter().enumerate() {
            if let Err(e) = self.write_byte(b) {
                return Err((i, e));
            }
        }
        Ok(buf.len())
    }

    /// Emit the EOF code (unless nothing was ever encoded), byte-align
    /// with zero padding, and flush the underlying sink.
    pub fn close(mut self) -> Result<(), Error> {
        if self.symbols.has_real_symbols() {
            let eof_idx = self.symbols.lookup(Symbol::Eof).expect("Eof sentinel is always live");
            let (code, len) = self.symbols.code(eof_idx);
            self.write_code(code, len)?;
        }
        self.writer.byte_align()?;
        self.writer.into_writer().flush()?;
        Ok(())
    }
}

/// Streaming adaptive-Huffman decoder over any [`Read`] source.
pub struct Decoder<R: Read> {
    symbols: SymbolTable,
    reader: BitReader<R, BigEndian>,
    /// whether any bit has ever been successfully consumed; distinguishes
    /// a genuinely empty stream (clean `Ok(None)`) from a truncated one
    /// mid-symbol (`Error::UnexpectedEof`), see §7.
    any_bits_read: bool,
}

impl<R: Read> Decoder<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, Options::default())
    }

    pub fn with_options(source: R, options: Options) -> Self {
        Self {
            symbols: SymbolTable::new(options.win_size),
            reader: BitReader::endian(source, BigEndian),
            any_bits_read: false,
        }
    }

    fn read_bit(&mut self) -> Result<bool, Error> {
        match self.reader.read_bit() {
            Ok(bit) => {
                self.any_bits_read = true;
                Ok(bit)
            }
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                if self.any_bits_read {
                    Err(Error::UnexpectedEof)
                } else {
                    Err(Error::Io(e))
                }
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Read one decoded byte, or `None` on a clean end of stream (the
    /// `Eof` sentinel was decoded, or the stream was empty to begin
    /// with).
    pub fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        let mut node = self.symbols.root();
        loop {
            if let Some(idx) = self.symbols.as_leaf(node) {
                return self.dispatch_leaf(idx);
            }
            match self.read_bit() {
                Ok(bit) => node = self.symbols.descend(node, bit),
                Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof && !self.any_bits_read => {
                    return Ok(None)
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn dispatch_leaf(&mut self, idx: u16) -> Result<Option<u8>, Error> {
        match Symbol::from_index(idx) {
            Symbol::New => {
                let b = self.read_raw_byte()?;
                self.symbols.insert(Symbol::Byte(b));
                Ok(Some(b))
            }
            Symbol::Eof => Ok(None),
            Symbol::Byte(b) => {
                self.symbols.update(idx);
                Ok(Some(b))
            }
        }
    }

    fn read_raw_byte(&mut self) -> Result<u8, Error> {
        let mut b = 0u8;
        for _ in 0..8 {
            b = (b << 1) | (self.read_bit()? as u8);
        }
        Ok(b)
    }

    /// Fill `buf` one decoded byte at a time. On clean end of stream,
    /// returns how many slots were filled (possibly fewer than
    /// `buf.len()`) without error; on the first I/O error, returns the
    /// count filled so far alongside it (§7).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, (usize, Error)> {
        for (i, slot) in buf.iter_mut().enumerate() {
            match self.read_byte() {
                Ok(Some(b)) => *slot = b,
                Ok(None) => return Ok(i),
                Err(e) => return Err((i, e)),
            }
        }
        Ok(buf.len())
    }

    #[cfg(test)]
    pub(crate) fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

#[cfg(test)]
impl<W: Write> Encoder<W> {
    pub(crate) fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

/// Compress `data` into a freshly allocated buffer.
pub fn compress_slice(data: &[u8], options: &Options) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    let mut enc = Encoder::with_options(&mut out, *options);
    enc.write(data).map_err(|(_, e)| e)?;
    enc.close()?;
    Ok(out)
}

/// Expand a complete encoded buffer back into its original bytes.
pub fn expand_slice(data: &[u8], options: &Options) -> Result<Vec<u8>, Error> {
    let mut dec = Decoder::with_options(data, *options);
    let mut out = Vec::new();
    while let Some(b) = dec.read_byte()? {
        out.push(b);
    }
    Ok(out)
}
