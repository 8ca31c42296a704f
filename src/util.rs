/// Payload widths used by the sized integer, double and raw length forms.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    /// Number of payload bytes.
    pub fn bytes(self) -> usize {
        match self {
            Width::W8 => 1,
            Width::W16 => 2,
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }

    /// Offset of this width from the 8-bit tag of its family.
    pub(crate) fn offset(self) -> u8 {
        match self {
            Width::W8 => 0,
            Width::W16 => 1,
            Width::W32 => 2,
            Width::W64 => 3,
        }
    }

    pub(crate) fn from_offset(off: u8) -> Width {
        match off & 0b11 {
            0 => Width::W8,
            1 => Width::W16,
            2 => Width::W32,
            _ => Width::W64,
        }
    }
}

/// The smallest two's-complement width that holds `i` exactly.
///
/// # Example
///
/// ```
/// use qpack::util::{int_width, Width};
///
/// assert_eq!(int_width(127), Width::W8);
/// assert_eq!(int_width(128), Width::W16);
/// assert_eq!(int_width(-129), Width::W16);
/// ```
pub fn int_width(i: i64) -> Width {
    if i >= i8::min_value() as i64 && i <= i8::max_value() as i64 {
        Width::W8
    } else if i >= i16::min_value() as i64 && i <= i16::max_value() as i64 {
        Width::W16
    } else if i >= i32::min_value() as i64 && i <= i32::max_value() as i64 {
        Width::W32
    } else {
        Width::W64
    }
}

/// The smallest unsigned width that holds `len`.
pub fn len_width(len: u64) -> Width {
    if len <= u8::max_value() as u64 {
        Width::W8
    } else if len <= u16::max_value() as u64 {
        Width::W16
    } else if len <= u32::max_value() as u64 {
        Width::W32
    } else {
        Width::W64
    }
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}
