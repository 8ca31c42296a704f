use std::fmt;

/// A double-precision float stored by its bit pattern.
///
/// Equality compares bits: `-0.0` and `0.0` differ and `NaN` equals itself. [`Float`] is
/// `Eq`, `Ord` and `Hash`; the ordering is that of the raw bits, not the numeric one.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug, Default)]
pub struct Float(u64);

impl Float {
    /// Creates a [`Float`] from raw IEEE-754 bits.
    pub fn from_bits(bits: u64) -> Float { Float(bits) }

    /// The raw IEEE-754 bits.
    pub fn to_bits(self) -> u64 { self.0 }

    /// The value as an [`f64`].
    ///
    /// # Example
    ///
    /// ```
    /// use qpack::float::Float;
    ///
    /// let f = Float::from(1.5);
    ///
    /// assert_eq!(f.to_f64(), 1.5);
    /// ```
    pub fn to_f64(self) -> f64 { f64::from_bits(self.0) }

    /// Indicates whether this is exactly `0.0`, `1.0` or `-1.0`.
    pub fn is_compact(self) -> bool {
        self.0 == 0f64.to_bits() || self.0 == 1f64.to_bits() || self.0 == (-1f64).to_bits()
    }
}

impl From<f64> for Float {
    fn from(f: f64) -> Float { Float(f.to_bits()) }
}

impl From<f32> for Float {
    fn from(f: f32) -> Float { Float::from(f as f64) }
}

impl From<Float> for f64 {
    fn from(f: Float) -> f64 { f.to_f64() }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let v = self.to_f64();
        if v.is_finite() && v.fract() == 0.0 {
            write!(f, "{:.1}", v)
        } else {
            write!(f, "{}", v)
        }
    }
}
