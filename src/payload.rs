//! Values carried through the array. The same value means "compute the
//! factorial of this" on the way down and "product so far" on the way up.

use std::fmt;

/// What a worker does with a request it has received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<T> {
    /// `0` or `1`: reply with one.
    Base,
    /// Delegate the carried value downstream, then multiply the reply.
    Descend(T),
    /// Negative: the protocol has no answer for it.
    Undefined,
}

pub trait Payload: Copy + fmt::Debug + fmt::Display + Send + 'static {
    const ONE: Self;

    fn step(self) -> Step<Self>;

    /// `self * factor`, wrapping around at the width of the type.
    fn product(self, factor: Self) -> Self;

    /// The number of workers a request needs, `None` when negative.
    fn magnitude(self) -> Option<u128>;
}

macro_rules! impl_payload {
    ($($t:ty),* $(,)?) => {
        $(
            impl Payload for $t {
                const ONE: Self = 1;

                fn step(self) -> Step<Self> {
                    match self {
                        0 | 1 => Step::Base,
                        n if n > 1 => Step::Descend(n - 1),
                        _ => Step::Undefined,
                    }
                }

                fn product(self, factor: Self) -> Self {
                    self.wrapping_mul(factor)
                }

                fn magnitude(self) -> Option<u128> {
                    u128::try_from(self).ok()
                }
            }
        )*
    };
}

impl_payload!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_one_are_base_cases() {
        assert_eq!(0i64.step(), Step::Base);
        assert_eq!(1u8.step(), Step::Base);
        assert_eq!(7u32.step(), Step::Descend(6));
        assert_eq!((-3i16).step(), Step::Undefined);
    }

    #[test]
    fn products_wrap() {
        assert_eq!(16u8.product(16), 0);
        assert_eq!(i64::MAX.product(2), -2);
    }

    #[test]
    fn negative_values_have_no_magnitude() {
        assert_eq!((-1isize).magnitude(), None);
        assert_eq!(i128::MAX.magnitude(), Some(i128::MAX as u128));
        assert_eq!(u128::MAX.magnitude(), Some(u128::MAX));
    }
}
