use emath::{Pos2, Vec2, vec2};

/// Unit direction from `b` to `a`, falling back to a deterministic angle
/// derived from the pair indices when the points coincide, so a repulsion
/// direction is always defined.
fn direction_between(a: Pos2, b: Pos2, i: usize, j: usize) -> (Vec2, f32) {
    let delta = a - b;
    let distance = delta.length();
    if distance > 0.0001 {
        (delta / distance, distance)
    } else {
        let angle =
            ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * std::f32::consts::TAU;
        (vec2(angle.cos(), angle.sin()), 0.0)
    }
}

/// Coulomb-style repulsion on the first point, `strength / d^2` with the
/// distance clamped to `min_distance`. The second point takes the exact
/// opposite.
pub(super) fn repulsion_between(
    a: Pos2,
    b: Pos2,
    i: usize,
    j: usize,
    strength: f32,
    min_distance: f32,
) -> Vec2 {
    let (direction, distance) = direction_between(a, b, i, j);
    let clamped = distance.max(min_distance);
    direction * (strength / (clamped * clamped))
}

/// Spring attraction on the first point toward the second, `strength * d`
/// scaled by the edge weight so similar endpoints pull harder and settle
/// nearer.
pub(super) fn attraction_along(a: Pos2, b: Pos2, strength: f32, weight: f32) -> Vec2 {
    let delta = b - a;
    let distance = delta.length();
    if distance <= 0.0001 {
        return Vec2::ZERO;
    }
    (delta / distance) * (strength * distance * weight)
}
