/// Euclidean distance between two points of equal dimension
///
/// Extra trailing coordinates on the longer point are ignored.
#[inline]
pub fn euclidean_distance(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}
