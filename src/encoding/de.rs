use super::*;
use bytes::Buf;
use log::{debug, trace};
use std::{convert::TryFrom, io::Cursor};

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while decoding untrusted input.
///
/// # Example
///
/// ```
/// use qpack::prelude::*;
///
/// let config = DecoderConfig::default().with_max_depth(1);
///
/// // one level of nesting is fine
/// let flat = encode(&vec![1, 2, 3]).unwrap();
/// assert!(decode_with(&flat, &config).is_ok());
///
/// // two is not
/// let nested = encode(&vec![vec![1]]).unwrap();
/// assert!(decode_with(&nested, &config).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// How many collections may be open at once.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecoderConfig {
    /// Sets the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// QPack tags.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QTag {
    /// Integer stored in the tag.
    Inline(i64),
    /// Extension hook.
    Hook,
    /// `0.0`, `1.0` or `-1.0`.
    FixedDouble(Float),
    /// Raw string with its length in the tag.
    RawInline(u8),
    /// Raw string with a length field of the given width.
    RawSized(Width),
    /// Integer with a payload of the given width.
    IntSized(Width),
    /// Double with an 8 byte payload.
    Double,
    /// Array with its item count in the tag.
    Array(u8),
    /// Map with its pair count in the tag.
    Map(u8),
    True,
    False,
    Null,
    OpenArray,
    OpenMap,
    CloseArray,
    CloseMap,
}

impl From<u8> for QTag {
    fn from(byte: u8) -> QTag {
        use QTag::*;
        match byte {
            0x00..=0x3f => Inline(byte as i64),
            0x40..=0x7b => Inline(INLINE_POS_MAX - byte as i64),
            HOOK => Hook,
            DOUBLE_N1 => FixedDouble(Float::from(-1.0)),
            DOUBLE_0 => FixedDouble(Float::from(0.0)),
            DOUBLE_1 => FixedDouble(Float::from(1.0)),
            0x80..=0xe3 => RawInline(byte - RAW_BASE),
            RAW8..=RAW64 => RawSized(Width::from_offset(byte - RAW8)),
            INT8..=INT64 => IntSized(Width::from_offset(byte - INT8)),
            DOUBLE => Double,
            0xed..=0xf2 => Array(byte - ARRAY0),
            0xf3..=0xf8 => Map(byte - MAP0),
            TRUE => True,
            FALSE => False,
            NULL => Null,
            OPEN_ARRAY => OpenArray,
            OPEN_MAP => OpenMap,
            CLOSE_ARRAY => CloseArray,
            CLOSE_MAP => CloseMap,
        }
    }
}

/// A cursor over encoded input.
pub(crate) struct QpackBuf<'a> {
    cur: Cursor<&'a [u8]>,
    config: DecoderConfig,
}

impl<'a> QpackBuf<'a> {
    pub(crate) fn new(data: &'a [u8], pos: usize, config: DecoderConfig) -> Self {
        let mut cur = Cursor::new(data);
        cur.set_position(pos as u64);
        QpackBuf { cur, config }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize { self.cur.position() as usize }

    #[inline]
    fn malformed<T, S: Into<String>>(&self, reason: S) -> Result<T, QpackError> {
        Err(QpackError::malformed(self.pos(), reason))
    }

    #[inline]
    fn peek_byte(&self) -> Result<u8, QpackError> {
        let data: &[u8] = *self.cur.get_ref();
        match data.get(self.pos()) {
            Some(byte) => Ok(*byte),
            None => self.malformed("buffer ended where a tag was expected"),
        }
    }

    #[inline]
    fn take_byte(&mut self) -> Result<u8, QpackError> {
        let byte = self.peek_byte()?;
        self.cur.advance(1);
        Ok(byte)
    }

    #[inline]
    fn read_tag(&mut self) -> Result<QTag, QpackError> { self.take_byte().map(QTag::from) }

    #[inline]
    fn read_many(&mut self, len: usize) -> Result<&'a [u8], QpackError> {
        if self.cur.remaining() >= len {
            let data: &'a [u8] = *self.cur.get_ref();
            let start = self.pos();
            self.cur.advance(len);
            Ok(&data[start..start + len])
        } else {
            self.malformed(format!(
                "tried to read {} bytes from buffer with {} remaining",
                len,
                self.cur.remaining()
            ))
        }
    }

    #[inline]
    fn read_uint(&mut self, width: Width) -> Result<u64, QpackError> {
        if self.cur.remaining() >= width.bytes() {
            Ok(self.cur.get_uint_le(width.bytes()))
        } else {
            self.malformed(format!(
                "expected a {} byte payload, found {} bytes",
                width.bytes(),
                self.cur.remaining()
            ))
        }
    }

    #[inline]
    fn read_int(&mut self, width: Width) -> Result<i64, QpackError> {
        let shift = 64 - 8 * width.bytes() as u32;
        let u = self.read_uint(width)?;
        // sign-extend from the payload width
        Ok(((u << shift) as i64) >> shift)
    }

    fn read_raw(&mut self, len: usize) -> Result<Qpack, QpackError> {
        let bs = self.read_many(len)?;
        Ok(Raw(Bytes::from(bs)))
    }

    fn enter(&self, depth: usize, start: usize) -> Result<usize, QpackError> {
        let depth = depth + 1;
        if depth > self.config.max_depth {
            Err(QpackError::DepthExceeded {
                pos: start,
                limit: self.config.max_depth,
            })
        } else {
            Ok(depth)
        }
    }

    /// Reads one complete value. `depth` is the number of collections already open.
    pub(crate) fn read_value(&mut self, depth: usize) -> Result<Qpack, QpackError> {
        let start = self.pos();
        match self.read_tag()? {
            QTag::Inline(i) => Ok(Int(i)),
            QTag::Hook => Ok(Null),
            QTag::FixedDouble(f) => Ok(Double(f)),
            QTag::RawInline(len) => self.read_raw(len as usize),
            QTag::RawSized(width) => {
                let len = self.read_uint(width)?;
                match usize::try_from(len) {
                    Ok(len) => self.read_raw(len),
                    Err(_) => self.malformed(format!("raw length {} does not fit in memory", len)),
                }
            }
            QTag::IntSized(width) => self.read_int(width).map(Int),
            QTag::Double => {
                let bits = self.read_uint(Width::W64)?;
                Ok(Double(Float::from_bits(bits)))
            }
            QTag::True => Ok(Bool(true)),
            QTag::False => Ok(Bool(false)),
            QTag::Null => Ok(Null),
            QTag::Array(len) => {
                let depth = self.enter(depth, start)?;
                let mut out = Vec::with_capacity(len as usize);
                for _ in 0..len {
                    out.push(self.read_value(depth)?);
                }
                Ok(Array(out))
            }
            QTag::Map(len) => {
                let depth = self.enter(depth, start)?;
                let mut out = VecMap::with_capacity(len as usize);
                for _ in 0..len {
                    let key = self.read_value(depth)?;
                    let val = self.read_value(depth)?;
                    out.push(key, val);
                }
                Ok(Map(out))
            }
            QTag::OpenArray => {
                let depth = self.enter(depth, start)?;
                let mut out = Vec::new();
                loop {
                    match self.peek_byte() {
                        Ok(CLOSE_ARRAY) => {
                            self.cur.advance(1);
                            return Ok(Array(out));
                        }
                        Ok(_) => out.push(self.read_value(depth)?),
                        Err(_) => {
                            return self.malformed(format!(
                                "buffer ended before the array opened at byte {} was closed",
                                start
                            ))
                        }
                    }
                }
            }
            QTag::OpenMap => {
                let depth = self.enter(depth, start)?;
                let mut out = VecMap::new();
                loop {
                    match self.peek_byte() {
                        Ok(CLOSE_MAP) => {
                            self.cur.advance(1);
                            return Ok(Map(out));
                        }
                        Ok(_) => {
                            let key = self.read_value(depth)?;
                            let val = self.read_value(depth)?;
                            out.push(key, val);
                        }
                        Err(_) => {
                            return self.malformed(format!(
                                "buffer ended before the map opened at byte {} was closed",
                                start
                            ))
                        }
                    }
                }
            }
            QTag::CloseArray => {
                Err(QpackError::malformed(start, "close-array marker without an open array"))
            }
            QTag::CloseMap => {
                Err(QpackError::malformed(start, "close-map marker without an open map"))
            }
        }
    }
}

/// Decodes one value starting at `pos`, returning it with the position just after it.
pub fn decode_at_with(
    data: &[u8],
    pos: usize,
    config: &DecoderConfig,
) -> Result<(Qpack, usize), QpackError> {
    if pos >= data.len() {
        debug!("rejecting qpack input: no value at byte {} of {}", pos, data.len());
        return Err(QpackError::malformed(
            pos,
            "buffer ended where a tag was expected",
        ));
    }
    trace!("unpacking from byte {} of {}", pos, data.len());
    let buf = &mut QpackBuf::new(data, pos, *config);
    match buf.read_value(0) {
        Ok(value) => Ok((value, buf.pos())),
        Err(e) => {
            debug!("rejecting qpack input: {}", e);
            Err(e)
        }
    }
}

/// Walks a buffer holding several encoded values back to back.
///
/// Iteration stops at the end of the buffer or after the first error.
///
/// # Example
///
/// ```
/// use qpack::prelude::*;
///
/// let mut out = Vec::new();
/// encode_into(&1, &mut out).unwrap();
/// encode_into(&"two", &mut out).unwrap();
///
/// let values: Result<Vec<Qpack>, _> = Decoder::new(&out).collect();
///
/// assert_eq!(values.unwrap(), vec![Qpack::from(1), Qpack::from("two")]);
/// ```
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    config: DecoderConfig,
    failed: bool,
}

impl<'a> Decoder<'a> {
    /// Creates a [`Decoder`] positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Decoder {
            data,
            pos: 0,
            config: DecoderConfig::default(),
            failed: false,
        }
    }

    /// Replaces the decoding limits.
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Offset of the next value.
    pub fn position(&self) -> usize { self.pos }

    /// Decodes the next value, `Ok(None)` at the end of the buffer.
    pub fn next_value(&mut self) -> Result<Option<Qpack>, QpackError> {
        if self.failed || self.pos >= self.data.len() {
            return Ok(None);
        }
        match decode_at_with(self.data, self.pos, &self.config) {
            Ok((value, end)) => {
                self.pos = end;
                Ok(Some(value))
            }
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<Qpack, QpackError>;

    fn next(&mut self) -> Option<Self::Item> { self.next_value().transpose() }
}
