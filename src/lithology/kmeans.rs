//! Seeded batch k-means (k-means++ initialisation, Lloyd iterations).
//!
//! Deterministic for a given seed: one `StdRng` drives every restart, and
//! cluster ids are renumbered by first appearance in row order so that equal
//! partitions always carry equal ids.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fitted partition
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    pub centroids: Vec<Vec<f64>>,
    /// Cluster id per input point
    pub assignments: Vec<usize>,
    /// Within-cluster sum of squared distances
    pub inertia: f64,
    pub iterations: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    pub k: usize,
    pub n_init: usize,
    pub max_iter: usize,
    /// Convergence threshold on the largest centroid shift
    pub tolerance: f64,
    pub seed: u64,
}

impl KMeans {
    /// Fit `k` clusters; `None` when `k` is zero or exceeds the number of points.
    pub fn fit(&self, points: &[Vec<f64>]) -> Option<KMeansFit> {
        if self.k == 0 || self.k > points.len() {
            return None;
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<KMeansFit> = None;
        for _ in 0..self.n_init.max(1) {
            let fit = self.fit_once(points, &mut rng);
            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }
        best.map(renumber)
    }

    fn fit_once(&self, points: &[Vec<f64>], rng: &mut StdRng) -> KMeansFit {
        let mut centroids = kmeans_plusplus_init(points, self.k, rng);
        let mut assignments = assign(points, &centroids);
        let mut iterations = 0;

        while iterations < self.max_iter {
            iterations += 1;
            let updated = update_centroids(points, &assignments, &centroids);
            let shift = centroids
                .iter()
                .zip(&updated)
                .map(|(a, b)| sq_dist(a, b).sqrt())
                .fold(0.0, f64::max);
            centroids = updated;
            assignments = assign(points, &centroids);
            if shift <= self.tolerance {
                break;
            }
        }

        let inertia = inertia(points, &assignments, &centroids);
        KMeansFit {
            centroids,
            assignments,
            inertia,
            iterations,
        }
    }
}

/// Squared Euclidean distance
fn sq_dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Index of the nearest centroid (ties to the lower index) and its squared distance
fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best_k = 0usize;
    let mut best_dist = f64::MAX;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = sq_dist(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_k = i;
        }
    }
    (best_k, best_dist)
}

fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    points.iter().map(|p| nearest(p, centroids).0).collect()
}

fn inertia(points: &[Vec<f64>], assignments: &[usize], centroids: &[Vec<f64>]) -> f64 {
    points
        .iter()
        .zip(assignments)
        .map(|(p, &c)| sq_dist(p, &centroids[c]))
        .sum()
}

/// Pick seeds with probability proportional to squared distance from the nearest chosen seed
fn kmeans_plusplus_init(points: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].clone());

    while centroids.len() < k {
        let distances: Vec<f64> = points.iter().map(|p| nearest(p, &centroids).1).collect();
        let total: f64 = distances.iter().sum();
        if total <= 0.0 {
            // every point coincides with a seed
            centroids.push(points[rng.gen_range(0..points.len())].clone());
            continue;
        }

        let mut target = rng.gen::<f64>() * total;
        let mut chosen = distances.iter().rposition(|d| *d > 0.0).unwrap_or(0);
        for (i, &dist) in distances.iter().enumerate() {
            target -= dist;
            if target <= 0.0 && dist > 0.0 {
                chosen = i;
                break;
            }
        }
        centroids.push(points[chosen].clone());
    }
    centroids
}

/// Cluster means; an emptied cluster is moved onto the point farthest from its centroid
fn update_centroids(
    points: &[Vec<f64>],
    assignments: &[usize],
    previous: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    let dim = points[0].len();
    let k = previous.len();
    let mut sums = vec![vec![0.0; dim]; k];
    let mut counts = vec![0usize; k];
    for (p, &c) in points.iter().zip(assignments) {
        counts[c] += 1;
        for (s, v) in sums[c].iter_mut().zip(p) {
            *s += v;
        }
    }

    let mut centroids: Vec<Vec<f64>> = sums
        .into_iter()
        .zip(&counts)
        .zip(previous)
        .map(|((sum, &count), prev)| {
            if count == 0 {
                prev.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect();

    // each emptied cluster takes a different point
    let mut taken: Vec<usize> = Vec::new();
    for c in (0..k).filter(|&c| counts[c] == 0) {
        let farthest = points
            .iter()
            .zip(assignments)
            .map(|(p, &a)| sq_dist(p, &centroids[a]))
            .enumerate()
            .filter(|(i, _)| !taken.contains(i))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);
        if let Some(i) = farthest {
            taken.push(i);
            centroids[c] = points[i].clone();
        }
    }
    centroids
}

/// Renumber clusters by first appearance in row order
fn renumber(fit: KMeansFit) -> KMeansFit {
    let k = fit.centroids.len();
    let mut mapping = vec![usize::MAX; k];
    let mut next = 0;
    for &c in &fit.assignments {
        if mapping[c] == usize::MAX {
            mapping[c] = next;
            next += 1;
        }
    }
    for slot in mapping.iter_mut().filter(|m| **m == usize::MAX) {
        *slot = next;
        next += 1;
    }

    let mut centroids = vec![Vec::new(); k];
    for (old, centroid) in fit.centroids.into_iter().enumerate() {
        centroids[mapping[old]] = centroid;
    }
    KMeansFit {
        assignments: fit.assignments.iter().map(|&c| mapping[c]).collect(),
        centroids,
        inertia: fit.inertia,
        iterations: fit.iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Vec<f64>> {
        let mut points = Vec::new();
        for i in 0..10 {
            let jitter = i as f64 * 0.01;
            points.push(vec![0.0 + jitter, 0.0 - jitter]);
            points.push(vec![5.0 + jitter, 5.0 + jitter]);
            points.push(vec![-5.0 - jitter, 5.0 - jitter]);
        }
        points
    }

    fn model(k: usize) -> KMeans {
        KMeans {
            k,
            n_init: 5,
            max_iter: 100,
            tolerance: 1e-6,
            seed: 42,
        }
    }

    #[test]
    fn test_separates_well_spaced_blobs() {
        let points = blobs();
        let fit = model(3).fit(&points).unwrap();
        // rows cycle blob 0, 1, 2
        for (i, &c) in fit.assignments.iter().enumerate() {
            assert_eq!(c, i % 3);
        }
        assert!(fit.inertia < 0.1);
    }

    #[test]
    fn test_emptied_clusters_take_distinct_points() {
        let points = vec![vec![0.0], vec![1.0], vec![10.0], vec![20.0]];
        let assignments = vec![0; points.len()];
        let previous = vec![vec![0.0], vec![100.0], vec![200.0]];
        let centroids = update_centroids(&points, &assignments, &previous);

        assert_eq!(centroids[0], vec![7.75]);
        // farthest from the 7.75 mean is 20, then 0
        assert_eq!(centroids[1], vec![20.0]);
        assert_eq!(centroids[2], vec![0.0]);
    }

    #[test]
    fn test_same_seed_same_partition() {
        let points = blobs();
        let a = model(4).fit(&points).unwrap();
        let b = model(4).fit(&points).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_inertia_decreases_with_k() {
        let points = blobs();
        let i2 = model(2).fit(&points).unwrap().inertia;
        let i3 = model(3).fit(&points).unwrap().inertia;
        assert!(i3 < i2);
    }

    #[test]
    fn test_k_larger_than_points() {
        let points = vec![vec![0.0], vec![1.0]];
        assert!(model(3).fit(&points).is_none());
        assert!(model(0).fit(&points).is_none());
    }

    #[test]
    fn test_identical_points() {
        let points = vec![vec![1.0, 1.0]; 6];
        let fit = model(2).fit(&points).unwrap();
        assert_eq!(fit.inertia, 0.0);
        assert_eq!(fit.assignments.len(), 6);
    }

    #[test]
    fn test_renumber_by_first_appearance() {
        let fit = KMeansFit {
            centroids: vec![vec![2.0], vec![0.0], vec![1.0]],
            assignments: vec![1, 1, 2, 0],
            inertia: 0.0,
            iterations: 1,
        };
        let fit = renumber(fit);
        assert_eq!(fit.assignments, vec![0, 0, 1, 2]);
        assert_eq!(fit.centroids, vec![vec![0.0], vec![1.0], vec![2.0]]);
    }
}
