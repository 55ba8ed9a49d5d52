//! Interior joint angles from 2D image-plane points.

/// Computes the interior angle at vertex `b`, in degrees.
///
/// The angle is formed by the rays `b -> a` and `b -> c` and always falls in
/// `0.0..=180.0`, regardless of the order of `a` and `c` and of the winding of
/// the triple: the raw atan2 difference is taken by absolute value and folded
/// at 180°, which also absorbs the wrap-around discontinuity of atan2.
///
/// Degenerate triples are not rejected. Collinear points with `b` between `a`
/// and `c` yield 180°, `a == c` yields 0°, and a zero-length ray contributes
/// `atan2(0, 0) == 0` to the difference. The result is a well-formed number
/// whenever the inputs are.
pub fn interior_angle(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
    let radians = f32::atan2(c[1] - b[1], c[0] - b[0]) - f32::atan2(a[1] - b[1], a[0] - b[0]);
    let degrees = radians.to_degrees().abs();
    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}
