use super::node::Node;

/// Similarity weight between two endpoints:
///
/// `1 / (1 + sqrt(da^2 + di^2 + dc^2))`
///
/// over the activity, interaction, and degree deltas. Range (0, 1];
/// exactly 1 when the two attribute triples coincide.
pub fn weight_between(a: &Node, b: &Node) -> f32 {
    let da = a.activity - b.activity;
    let di = a.interaction - b.interaction;
    let dc = a.connection_count() as f32 - b.connection_count() as f32;

    1.0 / (1.0 + (da * da + di * di + dc * dc).sqrt())
}

/// Traversal cost for a weight: dissimilar endpoints are expensive to cross.
pub fn cost_of(weight: f32) -> f32 {
    if weight > 0.0 { 1.0 / weight } else { f32::INFINITY }
}
