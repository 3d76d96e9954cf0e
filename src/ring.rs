//! Circular index arithmetic shared by the controller and the layout.
//!
//! Every function here is total for `n > 0`; callers guard the empty
//! carousel before reaching for ring math.

/// Wrap any integer index into `0..n`.
#[inline]
pub fn normalize(index: i64, n: usize) -> usize {
    debug_assert!(n > 0);
    index.rem_euclid(n as i64) as usize
}

/// Signed circular offset of `index` from a (possibly fractional)
/// position, wrapped into `[-n/2, n/2)`.
///
/// Integer and fractional callers go through the same arithmetic so a
/// resting layout and an in-flight sweep agree exactly at whole steps.
#[inline]
pub fn relative_offset(index: usize, position: f64, n: usize) -> f64 {
    let len = n as f64;
    let half = len / 2.0;
    (index as f64 - position + half).rem_euclid(len) - half
}

/// Steps needed to reach `to` from `from` moving forward only.
#[inline]
pub fn forward_distance(from: usize, to: usize, n: usize) -> usize {
    (to + n - from % n) % n
}

/// Unsigned length of the shorter way around.
pub fn circular_distance(from: usize, to: usize, n: usize) -> usize {
    let forward = forward_distance(from, to, n);
    forward.min(n - forward)
}

/// Signed step count along the shorter way around; ties go forward.
pub fn shortest_steps(from: usize, to: usize, n: usize) -> i64 {
    let forward = forward_distance(from, to, n);
    let backward = (n - forward) % n;
    if forward <= backward {
        forward as i64
    } else {
        -(backward as i64)
    }
}

/// Wrap a background index into `0..total`. `None` when there is no
/// background set to wrap into.
#[inline]
pub fn wrap_background(index: i64, total: usize) -> Option<usize> {
    (total > 0).then(|| index.rem_euclid(total as i64) as usize)
}
