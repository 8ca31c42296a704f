//! # QPack binary encoder and decoder
//!
//! Encode and decode functions for QPack.
//!
//! # Example
//!
//! ```
//! use qpack::prelude::*;
//!
//! // a value to send somewhere
//! let mut point = VecMap::new();
//! point.push(Qpack::from("ts"), Qpack::from(1_546_300_800));
//! point.push(Qpack::from("value"), Qpack::from(21.5));
//! let point = Qpack::from(point);
//!
//! // and we've encoded it
//! let enc = encode(&point).unwrap();
//!
//! // let's encode it a different way too, into a buffer we own
//! let out = &mut Vec::new();
//! encode_into(&point, out).unwrap();
//!
//! // but they are equivalent
//! assert_eq!(*out, enc);
//!
//! // Note: decoding returns a `Result`
//! let dec = decode(&enc).unwrap();
//!
//! // success!
//! assert_eq!(dec, point);
//! ```

use crate::{
    errors::QpackError,
    float::Float,
    util::*,
    vecmap::VecMap,
    Qpack::{self, *},
};
use bytes::Bytes;
use log::{debug, trace};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod constants;
use constants::*;

/// Encodes a value into a new vector of bytes.
///
/// # Arguments
///
/// * `t` - A reference to the value to be encoded: a [`Qpack`] tree or any native value
///   implementing [`Pack`].
///
/// # Errors
///
/// [`QpackError::UnsupportedType`] or [`QpackError::ValueOutOfRange`].
///
/// # Example
///
/// ```
/// use qpack::prelude::*;
///
/// // small integers fit in their tag
/// assert_eq!(encode(&Qpack::Int(5)).unwrap().len(), 1);
///
/// // native values work too
/// let enc: Vec<u8> = encode(&vec!["a", "b"]).unwrap();
/// ```
pub fn encode<T: Pack + ?Sized>(t: &T) -> Result<Vec<u8>, QpackError> {
    let mut out = Vec::new();
    encode_into(t, &mut out)?;
    Ok(out)
}

/// Encodes a value, appending to `out`.
///
/// On failure `out` is left exactly as it was before the call.
///
/// # Arguments
///
/// * `t` - A reference to the value to be encoded.
/// * `out` - A caller-owned buffer where the encoder output will be appended.
pub fn encode_into<T, P>(t: &T, out: &mut P) -> Result<(), QpackError>
where
    T: Pack + ?Sized,
    P: Packer + ?Sized,
{
    let mark = out.mark();
    match t.pack(out) {
        Ok(()) => {
            trace!("packed a {} byte value", out.mark() - mark);
            Ok(())
        }
        Err(e) => {
            debug!("packing failed: {}", e);
            out.rewind(mark);
            Err(e)
        }
    }
}

/// Decodes a buffer holding exactly one encoded value.
///
/// # Errors
///
/// [`QpackError::MalformedInput`] for truncated input, stray close markers and trailing
/// bytes; [`QpackError::DepthExceeded`] for input nested deeper than
/// [`DEFAULT_MAX_DEPTH`].
///
/// # Example
///
/// ```
/// use qpack::prelude::*;
///
/// let enc = encode(&Qpack::Null).unwrap();
///
/// // Did the decoding succeed?
/// let dec = match decode(&enc) {
///     Ok(value) => value,
///     Err(_e) => panic!("Oh no. Whatever will I do?"),
/// };
///
/// assert_eq!(dec, Qpack::Null);
/// ```
pub fn decode(bs: &[u8]) -> Result<Qpack, QpackError> { decode_with(bs, &DecoderConfig::default()) }

/// Like [`decode`], with explicit limits.
pub fn decode_with(bs: &[u8], config: &DecoderConfig) -> Result<Qpack, QpackError> {
    let (value, end) = decode_at_with(bs, 0, config)?;
    if end == bs.len() {
        Ok(value)
    } else {
        debug!("rejecting qpack input: {} trailing bytes", bs.len() - end);
        Err(QpackError::malformed(
            end,
            format!("{} trailing bytes after the value", bs.len() - end),
        ))
    }
}

/// Decodes one value starting at byte `pos` and returns it together with the position
/// just after its last byte. Bytes after the value are left alone.
///
/// # Example
///
/// ```
/// use qpack::prelude::*;
///
/// let mut buf = encode(&"first").unwrap();
/// encode_into(&2, &mut buf).unwrap();
///
/// let (first, next) = decode_at(&buf, 0).unwrap();
/// let (second, end) = decode_at(&buf, next).unwrap();
///
/// assert_eq!(first, Qpack::from("first"));
/// assert_eq!(second, Qpack::from(2));
/// assert_eq!(end, buf.len());
/// ```
pub fn decode_at(bs: &[u8], pos: usize) -> Result<(Qpack, usize), QpackError> {
    decode_at_with(bs, pos, &DecoderConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(q: Qpack) -> Vec<u8> { encode(&q).unwrap() }

    #[test]
    fn inline_positive() {
        for i in 0..=63 {
            let out = enc(Int(i));
            assert_eq!(out, vec![i as u8]);
        }
    }

    #[test]
    fn inline_negative() {
        let out = enc(Int(-1));
        assert_eq!(out, vec![0x40]);

        let out = enc(Int(-60));
        assert_eq!(out, vec![0x7b]);

        // one past the inline range takes a width tag
        let out = enc(Int(-61));
        assert_eq!(out, vec![INT8, (-61i8) as u8]);
    }

    #[test]
    fn int_widths() {
        let out = enc(Int(64));
        assert_eq!(out, vec![INT8, 64]);

        let out = enc(Int(127));
        assert_eq!(out, vec![INT8, 127]);

        let out = enc(Int(128));
        // tag
        assert_eq!(out[0], INT16);
        // LSD, MSD
        assert_eq!(out[1..], [128, 0]);

        let out = enc(Int(-129));
        assert_eq!(out[0], INT16);
        assert_eq!(out[1..], [0x7f, 0xff]);

        let out = enc(Int(65_536));
        assert_eq!(out[0], INT32);
        assert_eq!(out[1..], [0, 0, 1, 0]);

        let out = enc(Int(i64::max_value()));
        assert_eq!(out[0], INT64);
        assert_eq!(out[1..], [255, 255, 255, 255, 255, 255, 255, 127]);

        let out = enc(Int(i64::min_value()));
        assert_eq!(out[0], INT64);
        assert_eq!(out[1..], [0, 0, 0, 0, 0, 0, 0, 128]);
    }

    #[test]
    fn constants() {
        assert_eq!(enc(Null), vec![NULL]);
        assert_eq!(enc(Bool(true)), vec![TRUE]);
        assert_eq!(enc(Bool(false)), vec![FALSE]);
    }

    #[test]
    fn compact_doubles() {
        assert_eq!(enc(Qpack::from(0.0)), vec![DOUBLE_0]);
        assert_eq!(enc(Qpack::from(1.0)), vec![DOUBLE_1]);
        assert_eq!(enc(Qpack::from(-1.0)), vec![DOUBLE_N1]);
    }

    #[test]
    fn full_doubles() {
        let out = enc(Qpack::from(1.5));
        // tag
        assert_eq!(out[0], DOUBLE);
        // bytes
        assert_eq!(out[1..], [0, 0, 0, 0, 0, 0, 0b1111_1000, 0b0011_1111]);

        // negative zero keeps its sign
        let out = enc(Qpack::from(-0.0));
        assert_eq!(out[0], DOUBLE);
        assert_eq!(out[1..], [0, 0, 0, 0, 0, 0, 0, 0b1000_0000]);
        assert_eq!(decode(&out).unwrap(), Qpack::from(-0.0));
    }

    #[test]
    fn small_string() {
        let out = enc(Qpack::from("w"));

        // tag
        assert_eq!(out[0], RAW_BASE + 1);
        // characters
        assert_eq!(out[1], 119);

        assert_eq!(enc(Qpack::from("")), vec![RAW_BASE]);
    }

    #[test]
    fn raw_boundaries() {
        let out = enc(Raw(Bytes::from(vec![b'w'; 99])));
        assert_eq!(out[0], RAW_BASE + 99);
        assert_eq!(out.len(), 100);

        let out = enc(Raw(Bytes::from(vec![b'w'; 100])));
        // tag
        assert_eq!(out[0], RAW8);
        // length
        assert_eq!(out[1], 100);
        // bytes
        assert_eq!(out[2..].to_vec(), vec![b'w'; 100]);

        let out = enc(Raw(Bytes::from(vec![b'w'; 256])));
        assert_eq!(out[0], RAW16);
        assert_eq!(out[1..3], [0, 1]);
        assert_eq!(out.len(), 3 + 256);

        let out = enc(Raw(Bytes::from(vec![0u8; 70_000])));
        assert_eq!(out[0], RAW32);
        assert_eq!(out[1..5], 70_000u32.to_le_bytes());
    }

    #[test]
    fn small_array() {
        let small_array = Qpack::from(vec![Int(0); 5]);

        let out = enc(small_array.clone());

        // tag
        assert_eq!(out[0], ARRAY0 + 5);
        // elements
        assert_eq!(out[1..], [0; 5]);

        assert_eq!(decode(&out).unwrap(), small_array);
    }

    #[test]
    fn large_array() {
        let large_array = Qpack::from(vec![Int(0); 6]);

        let out = enc(large_array.clone());

        // markers
        assert_eq!(out[0], OPEN_ARRAY);
        assert_eq!(out[7], CLOSE_ARRAY);
        assert_eq!(out.len(), 8);

        assert_eq!(decode(&out).unwrap(), large_array);
    }

    #[test]
    fn small_map() {
        let small_map = Qpack::from(VecMap::from(vec![(
            Qpack::from("a"),
            Qpack::from("b"),
        )]));

        let out = enc(small_map);

        // tag
        assert_eq!(out[0], MAP0 + 1);
        // element tags
        assert_eq!(vec![out[1], out[3]], vec![RAW_BASE + 1, RAW_BASE + 1]);
        // check that the values are right
        assert_eq!(vec![out[2], out[4]], vec![b'a', b'b']);
    }

    #[test]
    fn large_map() {
        let large_map = Qpack::from(
            (0..140)
                .map(|x| (Raw(Bytes::from(vec![x as u8])), Int(x)))
                .collect::<VecMap<_, _>>(),
        );

        let out = enc(large_map.clone());

        // markers
        assert_eq!(out[0], OPEN_MAP);
        assert_eq!(*out.last().unwrap(), CLOSE_MAP);

        // keys come in the order they were pushed
        out[1..]
            .iter()
            .step_by(3)
            .take(60)
            .for_each(|x| assert_eq!(*x, RAW_BASE + 1));
        out[2..]
            .iter()
            .step_by(3)
            .take(60)
            .enumerate()
            .for_each(|(i, x)| assert_eq!(*x as usize, i));

        assert_eq!(decode(&out).unwrap(), large_map);
    }

    #[test]
    fn map_scenario() {
        // {"a": 1, "b": [2, 3]}
        let mut m = VecMap::new();
        m.push(Qpack::from("a"), Int(1));
        m.push(Qpack::from("b"), Qpack::from(vec![Int(2), Int(3)]));
        let m = Qpack::from(m);

        let out = enc(m.clone());
        assert_eq!(
            out,
            vec![
                MAP0 + 2,
                RAW_BASE + 1,
                b'a',
                1,
                RAW_BASE + 1,
                b'b',
                ARRAY0 + 2,
                2,
                3
            ]
        );

        let dec = decode(&out).unwrap();
        let pairs: Vec<_> = dec.to_map().unwrap().keys().cloned().collect();
        assert_eq!(pairs, vec![Qpack::from("a"), Qpack::from("b")]);
        assert_eq!(dec, m);
    }

    #[test]
    fn encode_into_appends() {
        let out = &mut vec![0xaa];
        encode_into(&Int(1), out).unwrap();
        assert_eq!(*out, vec![0xaa, 1]);
    }

    #[test]
    fn encode_into_rewinds_on_error() {
        let out = &mut vec![0xaa];
        let bad = vec![Some(1u64), Some(u64::max_value())];
        assert!(encode_into(&bad, out).is_err());
        assert_eq!(*out, vec![0xaa]);
    }

    #[test]
    fn trailing_bytes() {
        match decode(&[1, 2]) {
            Err(QpackError::MalformedInput { pos, .. }) => assert_eq!(pos, 1),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn trivial() {
        assert!(decode(&[]).is_err());

        // truncated payloads
        assert!(decode(&[INT16, 1]).is_err());
        assert!(decode(&[DOUBLE, 0, 0, 0]).is_err());
        assert!(decode(&[RAW_BASE + 3, b'a']).is_err());
        assert!(decode(&[RAW8]).is_err());
        assert!(decode(&[RAW16, 200, 0, 1, 2]).is_err());

        // unclosed collections
        assert!(decode(&[OPEN_ARRAY, 1, 2]).is_err());
        assert!(decode(&[OPEN_MAP, 1, 2]).is_err());
        assert!(decode(&[ARRAY0 + 2, 1]).is_err());

        // stray close markers
        assert!(decode(&[CLOSE_ARRAY]).is_err());
        assert!(decode(&[CLOSE_MAP]).is_err());
        assert!(decode(&[ARRAY0 + 1, CLOSE_ARRAY]).is_err());
    }
}
