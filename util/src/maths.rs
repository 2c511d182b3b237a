//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Limit a value to the range `[min, max]`.
///
/// Returns the limited value and a flag which is `true` if the value had to be
/// limited.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> (T, bool)
where
    T: Float
{
    let mut ret = *value;
    let mut limited = false;

    if ret > *max {
        ret = *max;
        limited = true;
    }
    if ret < *min {
        ret = *min;
        limited = true;
    }

    (ret, limited)
}

/// Limit a value to the symmetric range `[-limit, limit]`.
pub fn clamp_abs<T>(value: &T, limit: &T) -> (T, bool)
where
    T: Float
{
    let limit = limit.abs();
    clamp(value, &-limit, &limit)
}

/// Returns `true` if `a` and `b` differ by no more than `tol`.
pub fn approx_eq<T>(a: T, b: T, tol: T) -> bool
where
    T: Float
{
    (a - b).abs() <= tol
}
