use super::*;
use bytes::BytesMut;
use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    convert::TryFrom,
    hash::BuildHasher,
};

/// A sink for encoded bytes.
///
/// Implementors only move bytes around; the tag grammar lives in [`PackerExt`].
pub trait Packer {
    /// Appends one byte.
    fn put_byte(&mut self, u: u8);

    /// Appends a slice of bytes.
    fn put_slice(&mut self, slice: &[u8]);

    /// Current write position.
    fn mark(&self) -> usize;

    /// Drops everything written after `mark`.
    fn rewind(&mut self, mark: usize);
}

impl Packer for Vec<u8> {
    fn put_byte(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn mark(&self) -> usize { self.len() }

    fn rewind(&mut self, mark: usize) { self.truncate(mark) }
}

impl Packer for BytesMut {
    fn put_byte(&mut self, u: u8) { self.extend_from_slice(&[u]) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn mark(&self) -> usize { self.len() }

    fn rewind(&mut self, mark: usize) { self.truncate(mark) }
}

/// QPack primitives on top of any [`Packer`].
///
/// Collections are written as `open_*`, the items, then `close_*` with the same length;
/// whether that produces an inline count or a pair of markers depends on the length.
///
/// # Example
///
/// ```
/// use qpack::prelude::*;
///
/// let mut out = Vec::new();
/// out.open_array(2);
/// out.put_i64(1);
/// out.put_bool(true);
/// out.close_array(2);
///
/// let expected = Qpack::from(vec![Qpack::from(1), Qpack::from(true)]);
/// assert_eq!(decode(&out).unwrap(), expected);
/// ```
pub trait PackerExt: Packer {
    /// Writes `null`.
    fn put_null(&mut self) { self.put_byte(NULL) }

    /// Writes a boolean.
    fn put_bool(&mut self, b: bool) {
        if b {
            self.put_byte(TRUE)
        } else {
            self.put_byte(FALSE)
        }
    }

    /// Writes an integer in the smallest form that holds it.
    fn put_i64(&mut self, i: i64) {
        if 0 <= i && i <= INLINE_POS_MAX {
            self.put_byte(i as u8)
        } else if INLINE_NEG_MIN <= i && i < 0 {
            self.put_byte((INLINE_POS_MAX - i) as u8)
        } else {
            let width = int_width(i);
            self.put_byte(INT8 + width.offset());
            // the low bytes of a two's-complement number are its narrower encoding
            self.put_slice(&i.to_le_bytes()[..width.bytes()]);
        }
    }

    /// Writes a double. `0.0`, `1.0` and `-1.0` take a single byte.
    fn put_f64(&mut self, f: f64) {
        let bits = f.to_bits();
        if bits == 0f64.to_bits() {
            self.put_byte(DOUBLE_0)
        } else if bits == 1f64.to_bits() {
            self.put_byte(DOUBLE_1)
        } else if bits == (-1f64).to_bits() {
            self.put_byte(DOUBLE_N1)
        } else {
            self.put_byte(DOUBLE);
            self.put_slice(&bits.to_le_bytes());
        }
    }

    /// Writes a raw byte string.
    ///
    /// # Errors
    ///
    /// Fails with [`QpackError::ValueOutOfRange`] if the length does not fit in 64 bits.
    fn put_raw(&mut self, bs: &[u8]) -> Result<(), QpackError> {
        if bs.len() < RAW_INLINE_LEN {
            self.put_byte(RAW_BASE + bs.len() as u8);
        } else {
            let len = u64::try_from(bs.len()).map_err(|_| {
                QpackError::out_of_range(format!(
                    "raw string length {} does not fit in qpack",
                    bs.len()
                ))
            })?;
            let width = len_width(len);
            self.put_byte(RAW8 + width.offset());
            self.put_slice(&len.to_le_bytes()[..width.bytes()]);
        }
        self.put_slice(bs);
        Ok(())
    }

    /// Starts an array of `len` items.
    fn open_array(&mut self, len: usize) {
        if len < INLINE_COLLECTION_LEN {
            self.put_byte(ARRAY0 + len as u8)
        } else {
            self.put_byte(OPEN_ARRAY)
        }
    }

    /// Ends an array of `len` items.
    fn close_array(&mut self, len: usize) {
        if len >= INLINE_COLLECTION_LEN {
            self.put_byte(CLOSE_ARRAY)
        }
    }

    /// Starts a map of `len` pairs.
    fn open_map(&mut self, len: usize) {
        if len < INLINE_COLLECTION_LEN {
            self.put_byte(MAP0 + len as u8)
        } else {
            self.put_byte(OPEN_MAP)
        }
    }

    /// Ends a map of `len` pairs.
    fn close_map(&mut self, len: usize) {
        if len >= INLINE_COLLECTION_LEN {
            self.put_byte(CLOSE_MAP)
        }
    }
}

impl<P: Packer + ?Sized> PackerExt for P {}

/// Values that can be written as QPack.
pub trait Pack {
    /// Write `self` to `out`.
    ///
    /// # Errors
    ///
    /// [`QpackError::UnsupportedType`] or [`QpackError::ValueOutOfRange`]. On error `out`
    /// may hold a partial value; [`encode_into`](crate::encoding::encode_into) rewinds it.
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError>;
}

fn pack_seq<'a, T, I, P>(len: usize, items: I, out: &mut P) -> Result<(), QpackError>
where
    T: Pack + 'a,
    I: IntoIterator<Item = &'a T>,
    P: Packer + ?Sized,
{
    out.open_array(len);
    for item in items {
        item.pack(out)?;
    }
    out.close_array(len);
    Ok(())
}

fn pack_pairs<'a, K, V, I, P>(len: usize, pairs: I, out: &mut P) -> Result<(), QpackError>
where
    K: Pack + 'a,
    V: Pack + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
    P: Packer + ?Sized,
{
    out.open_map(len);
    for (k, v) in pairs {
        k.pack(out)?;
        v.pack(out)?;
    }
    out.close_map(len);
    Ok(())
}

impl Pack for Qpack {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        match self {
            Null => out.put_null(),
            Bool(b) => out.put_bool(*b),
            Int(i) => out.put_i64(*i),
            Double(f) => out.put_f64(f.to_f64()),
            Raw(bs) => out.put_raw(bs)?,
            Array(items) => pack_seq(items.len(), items, out)?,
            Map(m) => pack_pairs(m.len(), m.iter().map(|(k, v)| (k, v)), out)?,
        }
        Ok(())
    }
}

impl Pack for Float {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        out.put_f64(self.to_f64());
        Ok(())
    }
}

impl Pack for () {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        out.put_null();
        Ok(())
    }
}

impl Pack for bool {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        out.put_bool(*self);
        Ok(())
    }
}

macro_rules! pack_small_int {
    ($($t:ty),*) => {
        $(
            impl Pack for $t {
                fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
                    out.put_i64(*self as i64);
                    Ok(())
                }
            }
        )*
    };
}

pack_small_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! pack_wide_int {
    ($($t:ty),*) => {
        $(
            impl Pack for $t {
                fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
                    let i = i64::try_from(*self).map_err(|_| {
                        QpackError::out_of_range(format!(
                            "qpack allows up to 64bit signed integers, got {}",
                            self
                        ))
                    })?;
                    out.put_i64(i);
                    Ok(())
                }
            }
        )*
    };
}

pack_wide_int!(u64, usize, isize, i128, u128);

impl Pack for f32 {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        out.put_f64(*self as f64);
        Ok(())
    }
}

impl Pack for f64 {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        out.put_f64(*self);
        Ok(())
    }
}

/// There is no character kind in QPack; text goes through `str`/`String`.
impl Pack for char {
    fn pack<P: Packer + ?Sized>(&self, _out: &mut P) -> Result<(), QpackError> {
        Err(QpackError::UnsupportedType { kind: "char" })
    }
}

impl Pack for str {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        out.put_raw(self.as_bytes())
    }
}

impl Pack for String {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        out.put_raw(self.as_bytes())
    }
}

impl Pack for Bytes {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> { out.put_raw(self) }
}

impl<T: Pack> Pack for [T] {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        pack_seq(self.len(), self, out)
    }
}

impl<T: Pack> Pack for Vec<T> {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        pack_seq(self.len(), self, out)
    }
}

impl<T: Pack> Pack for VecDeque<T> {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        pack_seq(self.len(), self, out)
    }
}

impl<T: Pack> Pack for Option<T> {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        match self {
            Some(t) => t.pack(out),
            None => {
                out.put_null();
                Ok(())
            }
        }
    }
}

impl<T: Pack + ?Sized> Pack for &T {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> { (**self).pack(out) }
}

impl<T: Pack + ?Sized> Pack for Box<T> {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> { (**self).pack(out) }
}

impl<K: Pack, V: Pack> Pack for VecMap<K, V> {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        pack_pairs(self.len(), self.iter().map(|(k, v)| (k, v)), out)
    }
}

impl<K: Pack, V: Pack> Pack for BTreeMap<K, V> {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        pack_pairs(self.len(), self, out)
    }
}

impl<K: Pack, V: Pack, S: BuildHasher> Pack for HashMap<K, V, S> {
    fn pack<P: Packer + ?Sized>(&self, out: &mut P) -> Result<(), QpackError> {
        pack_pairs(self.len(), self, out)
    }
}

macro_rules! tuple_pack {
    ($len:expr, $($typ:ident : $idx:tt),*) => {
        impl<$($typ: Pack),*> Pack for ($($typ,)*) {
            fn pack<Out: Packer + ?Sized>(&self, out: &mut Out) -> Result<(), QpackError> {
                out.open_array($len);
                $(self.$idx.pack(out)?;)*
                out.close_array($len);
                Ok(())
            }
        }
    };
}

tuple_pack!(1, A: 0);
tuple_pack!(2, A: 0, B: 1);
tuple_pack!(3, A: 0, B: 1, C: 2);
tuple_pack!(4, A: 0, B: 1, C: 2, D: 3);
