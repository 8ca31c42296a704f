//! Tag byte assignments. Every one of the 256 values has exactly one meaning.

/// Largest integer stored in the tag itself.
pub(crate) const INLINE_POS_MAX: i64 = 63;
/// First inline negative tag, -1.
pub(crate) const NEG_BASE: u8 = 0x40;
/// Smallest integer stored in the tag itself.
pub(crate) const INLINE_NEG_MIN: i64 = -60;

/// Extension hook, no payload.
pub(crate) const HOOK: u8 = 0x7c;
/// `-1.0`
pub(crate) const DOUBLE_N1: u8 = 0x7d;
/// `0.0`
pub(crate) const DOUBLE_0: u8 = 0x7e;
/// `1.0`
pub(crate) const DOUBLE_1: u8 = 0x7f;

/// Inline raw, length is `tag - RAW_BASE`.
pub(crate) const RAW_BASE: u8 = 0x80;
/// Raw strings shorter than this are inline.
pub(crate) const RAW_INLINE_LEN: usize = 100;
/// Raw with a 1 byte length. The 2, 4 and 8 byte forms follow.
pub(crate) const RAW8: u8 = 0xe4;
pub(crate) const RAW16: u8 = 0xe5;
pub(crate) const RAW32: u8 = 0xe6;
pub(crate) const RAW64: u8 = 0xe7;

/// Integer with a 1 byte payload. The 2, 4 and 8 byte forms follow.
pub(crate) const INT8: u8 = 0xe8;
pub(crate) const INT16: u8 = 0xe9;
pub(crate) const INT32: u8 = 0xea;
pub(crate) const INT64: u8 = 0xeb;
/// Double with an 8 byte payload.
pub(crate) const DOUBLE: u8 = 0xec;

/// Empty array, `ARRAY0 + n` holds `n` items.
pub(crate) const ARRAY0: u8 = 0xed;
/// Empty map, `MAP0 + n` holds `n` pairs.
pub(crate) const MAP0: u8 = 0xf3;
/// Collections shorter than this use the inline count.
pub(crate) const INLINE_COLLECTION_LEN: usize = 6;

pub(crate) const TRUE: u8 = 0xf9;
pub(crate) const FALSE: u8 = 0xfa;
pub(crate) const NULL: u8 = 0xfb;

pub(crate) const OPEN_ARRAY: u8 = 0xfc;
pub(crate) const OPEN_MAP: u8 = 0xfd;
pub(crate) const CLOSE_ARRAY: u8 = 0xfe;
pub(crate) const CLOSE_MAP: u8 = 0xff;
