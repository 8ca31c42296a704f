pub use crate::{
    encoding::{
        decode, decode_at, decode_at_with, decode_with, encode, encode_into, Decoder,
        DecoderConfig, Pack, Packer, PackerExt,
    },
    errors::QpackError,
    float::Float,
    vecmap::VecMap,
    Qpack,
};
pub use bytes::Bytes;
pub use std::convert::TryFrom;
