//! Shared helpers for crate-internal tests.


use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::point::Point;

/// Deterministic random 2-D points with coordinates in `-extent..extent`.
pub(crate) fn random_points(n: usize, extent: f64, seed: u64) -> Vec<Point<f64>> {
    random_points_in_dims(n, 2, extent, seed)
}

/// Deterministic random points of arbitrary dimensionality.
pub(crate) fn random_points_in_dims(
    n: usize,
    dims: usize,
    extent: f64,
    seed: u64,
) -> Vec<Point<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let coords: Vec<f64> = (0..dims).map(|_| rng.gen_range(-extent..extent)).collect();
            Point::new(&coords)
        })
        .collect()
}

/// The filter every range query is checked against.
pub(crate) fn brute_force_range(
    points: &[Point<f64>],
    anchor: &Point<f64>,
    radius: f64,
) -> Vec<Point<f64>> {
    points
        .iter()
        .filter(|p| p.distance(anchor) <= radius && *p != anchor)
        .cloned()
        .collect()
}

/// The k closest points to `anchor`, closest first.
pub(crate) fn brute_force_nearest(
    points: &[Point<f64>],
    anchor: &Point<f64>,
    k: usize,
) -> Vec<Point<f64>> {
    let mut by_distance: Vec<&Point<f64>> = points.iter().collect();
    by_distance.sort_by(|a, b| a.distance(anchor).partial_cmp(&b.distance(anchor)).unwrap());
    by_distance.into_iter().take(k).cloned().collect()
}

/// Lexicographic order so unordered result sets can be compared.
pub(crate) fn sorted(mut points: Vec<Point<f64>>) -> Vec<Point<f64>> {
    points.sort_by(|a, b| a.coords().partial_cmp(b.coords()).unwrap());
    points
}
