//! Conversions out of [`Qpack`].
//!
//! Every conversion consumes the value and fails with a [`failure::Error`] describing
//! what was found instead.
//!
//! # Example
//!
//! ```
//! use qpack::prelude::*;
//!
//! let q = decode(&[0x81, b'x']).unwrap();
//!
//! assert_eq!(String::try_from(q).unwrap(), "x");
//! assert!(u8::try_from(Qpack::from(-1)).is_err());
//! ```

use crate::{float::Float, vecmap::VecMap, Qpack, Qpack::*};
use bytes::Bytes;
use failure::{bail, format_err, Error};
use std::convert::TryFrom;

fn kind(q: &Qpack) -> &'static str {
    match q {
        Null => "null",
        Bool(_) => "bool",
        Int(_) => "int",
        Double(_) => "double",
        Raw(_) => "raw",
        Array(_) => "array",
        Map(_) => "map",
    }
}

macro_rules! try_from_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<Qpack> for $t {
                type Error = Error;
                fn try_from(q: Qpack) -> Result<$t, Error> {
                    match q {
                        Int(i) => <$t>::try_from(i).map_err(|_| {
                            format_err!("{} does not fit in `{}`", i, stringify!($t))
                        }),
                        other => bail!("expected int, found {}", kind(&other)),
                    }
                }
            }
        )*
    };
}

try_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! try_from_variant {
    ($t:ty, $name:expr, $pat:pat => $out:expr) => {
        impl TryFrom<Qpack> for $t {
            type Error = Error;
            fn try_from(q: Qpack) -> Result<$t, Error> {
                match q {
                    $pat => Ok($out),
                    other => bail!("expected {}, found {}", $name, kind(&other)),
                }
            }
        }
    };
}

try_from_variant!(bool, "bool", Bool(b) => b);
try_from_variant!(Float, "double", Double(f) => f);
try_from_variant!(f64, "double", Double(f) => f.to_f64());
try_from_variant!(Bytes, "raw", Raw(b) => b);
try_from_variant!(Vec<Qpack>, "array", Array(a) => a);
try_from_variant!(VecMap<Qpack, Qpack>, "map", Map(m) => m);

impl TryFrom<Qpack> for String {
    type Error = Error;
    fn try_from(q: Qpack) -> Result<String, Error> {
        let bytes = Bytes::try_from(q)?;
        String::from_utf8(bytes.to_vec()).map_err(|e| format_err!("raw is not UTF-8: {}", e))
    }
}
