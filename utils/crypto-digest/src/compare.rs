use generic_array::{ArrayLength, GenericArray};
use subtle::ConstantTimeEq;

/// Byte-wise equality of two digests of the same size.
///
/// Returns as soon as a byte differs. Use `matches_fixed_time` when the
/// comparison guards anything secret.
pub fn matches<N: ArrayLength<u8>>(a: &GenericArray<u8, N>, b: &GenericArray<u8, N>) -> bool {
    a.as_slice() == b.as_slice()
}

/// Equality of two digests in time independent of their contents.
pub fn matches_fixed_time<N: ArrayLength<u8>>(a: &GenericArray<u8, N>,
                                              b: &GenericArray<u8, N>) -> bool {
    a.as_slice().ct_eq(b.as_slice()).into()
}
