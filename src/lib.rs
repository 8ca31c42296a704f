//! # QPack
//!
//! QPack is a compact, schema-less binary serialization format. It packs a tree of
//! nulls, booleans, integers, doubles, byte strings, arrays and maps into a dense,
//! self-describing byte stream, and unpacks it again. Small values cost as few bytes as
//! possible: small integers, the most common doubles and short strings all fit in, or
//! next to, a single tag byte.
//!
//! # Usage
//!
//! Build a [`Qpack`] value, or use any native value implementing
//! [`Pack`](encoding::Pack), and hand it to [`encode`](encoding::encode):
//!
//! ```
//! use qpack::prelude::*;
//!
//! // a tree
//! let tree = Qpack::from(vec![Qpack::from("cpu"), Qpack::from(42), Qpack::Null]);
//!
//! // encode
//! let encoded = encode(&tree).unwrap();
//!
//! // and then immediately decode, because this is an example
//! let decoded = decode(&encoded).unwrap();
//!
//! assert_eq!(tree, decoded);
//!
//! // native values produce the same bytes without building a tree
//! let native = (String::from("cpu"), 42, None::<u8>);
//! assert_eq!(encode(&native).unwrap(), encoded);
//! ```
//!
//! # An overview of QPack types
//!
//! ## Integers
//!
//! Integers are signed 64-bit values ([`Qpack::Int`]). Smaller integer types convert
//! losslessly; `u64`, `usize` and the 128-bit types are range-checked when packed.
//!
//! ## Doubles
//!
//! Doubles are IEEE 754 binary64 values ([`Qpack::Double`]), kept as a bit pattern so
//! that a decoded double is always the exact double that was encoded.
//!
//! ## Raw strings
//!
//! Raw strings ([`Qpack::Raw`]) are byte sequences; text is stored as UTF-8.
//!
//! ```
//! use qpack::prelude::*;
//!
//! let text = Qpack::from("hello world");
//!
//! let literal = Qpack::from_static(b"this is a bytestring literal");
//!
//! assert_eq!(text.as_str(), Some("hello world"));
//! ```
//!
//! ## Arrays and maps
//!
//! Arrays are sequences of values. Maps are ordered sequences of key/value pairs, stored
//! in a [`VecMap`]; any value may be a key and the order is kept through a round trip.
//!
//! # Specification
//!
//! The first byte of every value is its *tag*. Every one of the 256 tag values has a
//! meaning:
//!
//! | Tag         | Semantics                                                   |
//! | ---         | ---                                                         |
//! | `0x00-0x3f` | integer `0` to `63`, the tag is the value                   |
//! | `0x40-0x7b` | integer `-1` to `-60`, the value is `63 - tag`              |
//! | `0x7c`      | hook, no payload, unpacks as `null`                         |
//! | `0x7d-0x7f` | double `-1.0`, `0.0`, `1.0`                                 |
//! | `0x80-0xe3` | raw string of length `tag - 0x80` (0 to 99), bytes follow   |
//! | `0xe4-0xe7` | raw string, 1/2/4/8 byte length follows, then the bytes     |
//! | `0xe8-0xeb` | integer, 1/2/4/8 byte two's-complement payload follows      |
//! | `0xec`      | double, 8 byte payload follows                              |
//! | `0xed-0xf2` | array of `tag - 0xed` (0 to 5) items                        |
//! | `0xf3-0xf8` | map of `tag - 0xf3` (0 to 5) pairs                          |
//! | `0xf9-0xfb` | `true`, `false`, `null`                                     |
//! | `0xfc-0xfd` | open array, open map                                        |
//! | `0xfe-0xff` | close array, close map                                      |
//!
//! All multi-byte fields are little-endian. Every number uses the smallest form that
//! holds it exactly. Arrays and maps with 6 or more entries are written between an
//! open and a close marker instead of carrying a count.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod encoding;
pub mod errors;
pub mod float;
pub mod prelude;
pub mod rep;
pub mod util;
pub mod vecmap;

use bytes::Bytes;
use failure::{bail, Error};
use float::*;
use std::fmt;
use vecmap::*;

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// [`Qpack`] and its variants.
///
/// # Example
///
/// ```
/// use qpack::prelude::*;
///
/// let b = Qpack::Bool(true);
///
/// let val = match b {
///     Qpack::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Qpack {
    /// Null. Corresponds to [`None`].
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    ///
    /// ```
    /// use qpack::prelude::{Qpack::Int, *};
    ///
    /// let k_num = Int(-7);
    /// ```
    Int(i64),
    /// Double-precision float.
    ///
    /// ```
    /// use qpack::prelude::{Qpack::Double, *};
    ///
    /// let k_float = Double(Float::from(0.5));
    /// ```
    Double(Float),
    /// Raw byte string.
    ///
    /// ```
    /// use qpack::prelude::{Qpack::Raw, *};
    ///
    /// let k_bytes = Raw(Bytes::from_static(b"hello world"));
    /// ```
    Raw(Bytes),
    /// Array.
    ///
    /// ```
    /// use qpack::prelude::{Qpack::Array, *};
    ///
    /// let k_array = Array(vec![1, 2, 3, 4].into_iter().map(Qpack::from).collect());
    /// ```
    Array(Vec<Qpack>),
    /// Ordered map.
    ///
    /// ```
    /// use qpack::prelude::{Qpack::Map, *};
    ///
    /// let vmap = VecMap::from(vec![(Qpack::from("hello world"), Qpack::from(1))]);
    ///
    /// let kmap = Map(vmap);
    /// ```
    Map(VecMap<Qpack, Qpack>),
}

use Qpack::*;

impl Qpack {
    /// Converts a bytestring literal to [`Qpack`].
    pub fn from_static(bytes: &'static [u8]) -> Qpack { Raw(Bytes::from_static(bytes)) }

    /// Indicates whether a value is [`Null`].
    ///
    /// # Example
    ///
    /// ```
    /// use qpack::Qpack::Null;
    ///
    /// let foo = Null;
    ///
    /// assert!(foo.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Tries to convert a value to a [`bool`].
    /// This will return an [`Error`] if the value is not a [`Qpack::Bool`].
    pub fn to_bool(&self) -> Result<bool, Error> {
        match self {
            Bool(b) => Ok(*b),
            _ => bail!("Value is not `Bool`"),
        }
    }

    /// Tries to convert a value to an [`i64`].
    /// This will return an [`Error`] if the value is not a [`Qpack::Int`].
    ///
    /// # Example
    ///
    /// ```
    /// use qpack::prelude::*;
    ///
    /// let q = decode(&[0x40]).unwrap();
    ///
    /// assert_eq!(q.to_int().unwrap(), -1);
    /// ```
    pub fn to_int(&self) -> Result<i64, Error> {
        match self {
            Int(i) => Ok(*i),
            _ => bail!("Value is not `Int`"),
        }
    }

    /// Tries to convert a value to an [`f64`].
    /// This will return an [`Error`] if the value is not a [`Qpack::Double`].
    pub fn to_f64(&self) -> Result<f64, Error> {
        match self {
            Double(f) => Ok(f.to_f64()),
            _ => bail!("Value is not `Double`"),
        }
    }

    /// Tries to convert a value to [`Bytes`].
    /// This will return an [`Error`] if the value is not a raw string.
    pub fn to_bytes(&self) -> Result<&Bytes, Error> {
        match self {
            Raw(s) => Ok(s),
            _ => bail!("Value is not a raw string"),
        }
    }

    /// The value as text, if it is a raw string holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Raw(s) => std::str::from_utf8(s).ok(),
            _ => None,
        }
    }

    /// Borrows the items of a [`Qpack::Array`].
    /// This will return an [`Error`] if the value is not an array.
    pub fn to_vec(&self) -> Result<&Vec<Qpack>, Error> {
        match self {
            Array(a) => Ok(a),
            _ => bail!("This value is not an `Array`"),
        }
    }

    /// Consumes a [`Qpack`] value, converting it into a vector of [`Qpack`] values.
    /// This will return an [`Error`] if the value is not a [`Qpack::Array`].
    ///
    /// # Example
    ///
    /// ```
    /// use qpack::prelude::*;
    ///
    /// let q = Qpack::from(vec![1, 2, 3]);
    ///
    /// // get a vec of `Qpack` values
    /// let numbers = q.into_vec().unwrap();
    ///
    /// assert_eq!(numbers.len(), 3);
    /// ```
    pub fn into_vec(self) -> Result<Vec<Qpack>, Error> {
        match self {
            Array(a) => Ok(a),
            _ => bail!("This value is not an `Array`"),
        }
    }

    /// Borrows the pairs of a [`Qpack::Map`].
    /// This will return an [`Error`] if the value is not a map.
    pub fn to_map(&self) -> Result<&VecMap<Qpack, Qpack>, Error> {
        match self {
            Map(m) => Ok(m),
            _ => bail!("This value is not a `Map`"),
        }
    }

    /// Consumes a [`Qpack`] value, converting it into a [`VecMap`].
    /// This will return an [`Error`] if the value is not a map.
    pub fn into_map(self) -> Result<VecMap<Qpack, Qpack>, Error> {
        match self {
            Map(m) => Ok(m),
            _ => bail!("This value is not a `Map`"),
        }
    }

    /// Looks up a text key in a map. Returns [`None`] for missing keys and for values
    /// that are not maps.
    ///
    /// # Example
    ///
    /// ```
    /// use qpack::prelude::*;
    ///
    /// let q = Qpack::from(VecMap::from(vec![("name", "cpu"), ("unit", "%")]));
    ///
    /// assert_eq!(q.get("unit").and_then(Qpack::as_str), Some("%"));
    /// assert!(q.get("host").is_none());
    /// ```
    pub fn get(&self, key: &str) -> Option<&Qpack> {
        match self {
            Map(m) => m
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Tries to convert the value into `T`. See [`rep`] for the available conversions.
    pub fn into_rep<T>(self) -> Result<T, Error>
    where
        T: std::convert::TryFrom<Qpack, Error = Error>,
    {
        T::try_from(self)
    }
}

fn fmt_bytes(bytes: &Bytes, f: &mut fmt::Formatter) -> fmt::Result {
    match std::str::from_utf8(bytes) {
        Ok(s) => write!(f, "{:?}", s),
        Err(_) => {
            write!(f, "b\"")?;
            for c in bytes.iter() {
                write!(f, "{:02x}", c)?;
            }
            write!(f, "\"")
        }
    }
}

impl fmt::Display for Qpack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Null => write!(f, "null"),
            Bool(b) => write!(f, "{}", b),
            Int(i) => write!(f, "{}", i),
            Double(d) => write!(f, "{}", d),
            Raw(bytes) => fmt_bytes(bytes, f),
            Array(a) => {
                write!(f, "[")?;
                for (i, q) in a.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", q)?;
                }
                write!(f, "]")
            }
            Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Qpack {
    fn from(s: &str) -> Qpack { Raw(Bytes::from(s)) }
}

impl From<String> for Qpack {
    fn from(s: String) -> Qpack { Raw(Bytes::from(s)) }
}

impl<T: Into<Qpack>> From<Vec<T>> for Qpack {
    fn from(v: Vec<T>) -> Qpack { Array(v.into_iter().map(T::into).collect()) }
}

impl<K: Into<Qpack>, V: Into<Qpack>> From<VecMap<K, V>> for Qpack {
    fn from(v: VecMap<K, V>) -> Qpack {
        Map(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<T: Into<Qpack>> From<Option<T>> for Qpack {
    fn from(o: Option<T>) -> Qpack {
        match o {
            Some(t) => t.into(),
            None => Null,
        }
    }
}

impl From<()> for Qpack {
    fn from(_: ()) -> Qpack { Null }
}

from_fn!(Qpack, bool, Bool);
from_fn!(Qpack, i64, Int);
from_fn!(Qpack, Bytes, Raw);
from_fn!(Qpack, Float, Double);

// integers that always fit
from_as!(Qpack, i8, i64);
from_as!(Qpack, i16, i64);
from_as!(Qpack, i32, i64);
from_as!(Qpack, u8, i64);
from_as!(Qpack, u16, i64);
from_as!(Qpack, u32, i64);

// floats
from_fn!(Qpack, f32, |f: f32| Double(Float::from(f)));
from_fn!(Qpack, f64, |f: f64| Double(Float::from(f)));
