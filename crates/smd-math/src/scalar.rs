/// Saturate `x` to `±limit`, keeping its sign.
///
/// Values with `|x| <= limit` are left untouched. `limit` is expected to be
/// non-negative.
///
/// # Example
///
/// ```
/// use smd_math::limit_magnitude;
///
/// let mut x = -5.0;
/// limit_magnitude(&mut x, 2.0);
/// assert_eq!(x, -2.0);
/// ```
#[inline]
pub fn limit_magnitude(x: &mut f64, limit: f64) {
    if x.abs() > limit {
        *x = limit.copysign(*x);
    }
}

/// By-value form of [`limit_magnitude`].
#[inline]
pub fn limited_magnitude(mut x: f64, limit: f64) -> f64 {
    limit_magnitude(&mut x, limit);
    x
}
