//! Radar statistics: range/bearing, polar-to-Cartesian covariance, Gaussian
//! similarity, and the linear interpolation used for bearing confidence.

/// Euclidean range from the origin.
pub fn range(pos_x: f32, pos_y: f32) -> f32 {
    (pos_x * pos_x + pos_y * pos_y).sqrt()
}

/// Bearing (radians) from the origin, `atan2(y, x)`.
pub fn bearing(pos_x: f32, pos_y: f32) -> f32 {
    pos_y.atan2(pos_x)
}

/// Polar-to-Cartesian x-variance via the rotation matrix `P(cart) = R * P(polar) * Rᵀ`.
fn var_x_polar(range: f32, bearing: f32, range_var: f32, bearing_var: f32) -> f32 {
    let cos2 = bearing.cos() * bearing.cos();
    let sin2 = bearing.sin() * bearing.sin();
    range_var * cos2 + range * range * bearing_var * sin2
}

/// Polar-to-Cartesian y-variance. See [`var_x_polar`].
fn var_y_polar(range: f32, bearing: f32, range_var: f32, bearing_var: f32) -> f32 {
    let cos2 = bearing.cos() * bearing.cos();
    let sin2 = bearing.sin() * bearing.sin();
    range_var * sin2 + range * range * bearing_var * cos2
}

/// X-variance of an object given its Cartesian position, clamped from below
/// by `base_var` to keep gating numerics stable.
pub fn var_x(pos_x: f32, pos_y: f32, range_var: f32, bearing_var: f32, base_var: f32) -> f32 {
    let r = range(pos_x, pos_y);
    let b = bearing(pos_x, pos_y);
    var_x_polar(r, b, range_var, bearing_var).max(base_var)
}

/// Y-variance of an object given its Cartesian position. See [`var_x`].
pub fn var_y(pos_x: f32, pos_y: f32, range_var: f32, bearing_var: f32, base_var: f32) -> f32 {
    let r = range(pos_x, pos_y);
    let b = bearing(pos_x, pos_y);
    var_y_polar(r, b, range_var, bearing_var).max(base_var)
}

/// Squared Mahalanobis-like distance between two 1-D Gaussians. Returns the
/// invalid sentinel when the combined variance is zero, to avoid division by
/// zero.
fn dissimilarity(mean1: f32, mean2: f32, variance1: f32, variance2: f32) -> f32 {
    let combined = variance1 + variance2;
    if combined != 0.0 {
        (mean1 - mean2) * (mean1 - mean2) / combined
    } else {
        crate::config::FusionConfig::INVALID_SIMILARITY_VALUE
    }
}

/// Gaussian similarity between two 1-D distributions: `1/d` for `d > 0`,
/// the max sentinel for `d == 0`, and the invalid sentinel for undefined
/// (zero combined variance) inputs.
pub fn similarity(mean1: f32, mean2: f32, variance1: f32, variance2: f32) -> f32 {
    let d = dissimilarity(mean1, mean2, variance1, variance2);
    if d == 0.0 {
        crate::config::FusionConfig::MAX_SIMILARITY_VALUE
    } else {
        1.0 / d
    }
}

/// Linear interpolation of `y` at `x` between the two points `(x1, y1)` and
/// `(x2, y2)`.
pub fn lin_interpolate(x: f32, x1: f32, x2: f32, y1: f32, y2: f32) -> f32 {
    (y2 - y1) / (x2 - x1) * (x - x1) + y1
}
