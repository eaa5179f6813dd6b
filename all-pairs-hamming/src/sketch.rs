//! Traits of binary short sketches of primitive integer types.
use num_traits::int::PrimInt;

/// Trait of a binary short sketch from a primitive integer type.
pub trait Sketch: Default + PrimInt + Send + Sync {
    /// Gets the number of dimensions.
    fn dim() -> usize;
    /// Gets the Hamming distance to the other sketch.
    fn hamdist(self, rhs: Self) -> usize;
}

macro_rules! impl_sketch {
    ($($t:ty),*) => {
        $(
            impl Sketch for $t {
                #[inline(always)]
                fn dim() -> usize {
                    <$t>::BITS as usize
                }
                #[inline(always)]
                fn hamdist(self, rhs: Self) -> usize {
                    (self ^ rhs).count_ones() as usize
                }
            }
        )*
    };
}

impl_sketch!(u8, u16, u32, u64);
