//! Parity of Weyl group elements.

/// Parity of a Weyl group element, which is the parity of the number of
/// simple reflections in any word for it.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Parity {
    /// Even number of reflections.
    #[default]
    Even = 0,
    /// Odd number of reflections.
    Odd = 1,
}
impl Parity {
    /// Returns the opposite parity.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }

    /// Returns `1` for even and `-1` for odd.
    pub fn sign(self) -> i64 {
        match self {
            Parity::Even => 1,
            Parity::Odd => -1,
        }
    }
}
