//! Dominant skin tone extraction.
//!
//! Weighted k-means in CIELAB with k-means++ seeding. The cluster with the
//! most weight among those whose lightness is plausible for skin becomes the
//! representative tone.
//!
//! # Algorithm
//!
//! 1. Convert samples to LAB.
//! 2. If every sample has the same RGB, return its LAB directly.
//! 3. Seed `k` centroids with weighted k-means++ from a [`StdRng`].
//! 4. Alternate assignment and weighted centroid update until the largest
//!    centroid movement drops below `epsilon` or `max_iterations` is hit.
//!    An empty cluster is reseeded to the sample farthest from its nearest
//!    centroid.
//! 5. Pick the heaviest cluster with L in the skin range, else the heaviest
//!    overall. Ties go to the lower cluster index.
//!
//! The same samples and seed always produce bit-identical output. Assignment
//! runs on rayon for large inputs; accumulation is sequential so the
//! floating point summation order never changes.

use std::collections::BTreeSet;

use glam::Vec3;
use rand::SeedableRng;
use rand::distr::{Distribution, weighted::WeightedIndex};
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};
use trueshade_color::rgb_to_lab;
use trueshade_core::{Error, LabColor, Result, WeightedSample};

use crate::config::ClusteringConfig;

/// Sample count above which the assignment step runs in parallel.
const PAR_THRESHOLD: usize = 4096;

/// One k-means cluster after convergence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cluster {
    /// Weighted mean of the members
    pub centroid: LabColor,
    /// Sum of member weights
    pub weight: f32,
    /// Number of member samples
    pub members: usize,
}

/// Full outcome of a tone extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    /// Selected skin tone
    pub representative: LabColor,
    /// All clusters, in seeding order
    pub clusters: Vec<Cluster>,
    /// Index of the selected cluster
    pub chosen: usize,
    /// Lloyd iterations performed
    pub iterations: usize,
    /// Whether the movement threshold was reached before the cap
    pub converged: bool,
    /// All samples shared one RGB value and clustering was skipped
    pub degenerate: bool,
    /// Seed driving initialization
    pub seed: u64,
}

/// Extracts the representative skin tone.
///
/// See [`extract_detailed`] for the clustering details.
pub fn extract(samples: &[WeightedSample], config: &ClusteringConfig, seed: u64) -> Result<LabColor> {
    extract_detailed(samples, config, seed).map(|e| e.representative)
}

/// Extracts the representative skin tone and reports every cluster.
///
/// Fails only when `samples` is empty.
pub fn extract_detailed(
    samples: &[WeightedSample],
    config: &ClusteringConfig,
    seed: u64,
) -> Result<Extraction> {
    let Some(first) = samples.first() else {
        return Err(Error::insufficient_sample(0, 1));
    };

    if samples.iter().all(|s| s.sample.rgb == first.sample.rgb) {
        let lab = rgb_to_lab(first.sample.rgb);
        debug!(rgb = ?first.sample.rgb, %lab, "degenerate sample set, skipping clustering");
        return Ok(Extraction {
            representative: lab,
            clusters: vec![Cluster {
                centroid: lab,
                weight: samples.iter().map(|s| s.weight).sum(),
                members: samples.len(),
            }],
            chosen: 0,
            iterations: 0,
            converged: true,
            degenerate: true,
            seed,
        });
    }

    let distinct: BTreeSet<[u8; 3]> = samples.iter().map(|s| s.sample.rgb).collect();
    let k = config.k.min(distinct.len()).max(1);

    let points: Vec<Vec3> = if samples.len() >= PAR_THRESHOLD {
        samples.par_iter().map(|s| lab_point(s.sample.rgb)).collect()
    } else {
        samples.iter().map(|s| lab_point(s.sample.rgb)).collect()
    };
    let weights: Vec<f32> = samples.iter().map(|s| s.weight).collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = seed_centroids(&points, &weights, k, &mut rng);
    trace!(k, ?centroids, "seeded centroids");

    let mut iterations = 0;
    let mut converged = false;
    while iterations < config.max_iterations {
        iterations += 1;
        let assignment = assign(&points, &centroids);
        let mut stats = accumulate(&points, &weights, &assignment, k);
        reseed_empty(&mut stats, &points, &assignment);

        let mut movement = 0.0f32;
        for (centroid, stat) in centroids.iter_mut().zip(&stats) {
            let next = stat.centroid(*centroid);
            movement = movement.max(centroid.distance(next));
            *centroid = next;
        }
        trace!(iterations, movement, "k-means step");

        if movement < config.epsilon {
            converged = true;
            break;
        }
    }

    let assignment = assign(&points, &centroids);
    let stats = accumulate(&points, &weights, &assignment, k);
    let clusters: Vec<Cluster> = centroids
        .iter()
        .zip(&stats)
        .map(|(c, s)| Cluster {
            centroid: LabColor::new(c.x, c.y, c.z),
            weight: s.weight,
            members: s.members,
        })
        .collect();

    let chosen = select_cluster(&clusters, config.skin_lightness_min, config.skin_lightness_max);
    let representative = clusters[chosen].centroid;

    debug!(
        k,
        iterations,
        converged,
        chosen,
        %representative,
        "extracted dominant tone"
    );

    Ok(Extraction {
        representative,
        clusters,
        chosen,
        iterations,
        converged,
        degenerate: false,
        seed,
    })
}

/// Picks the heaviest cluster with L in `[l_min, l_max]`, else the heaviest
/// overall. Ties resolve to the lower index.
pub fn select_cluster(clusters: &[Cluster], l_min: f32, l_max: f32) -> usize {
    let heaviest = |skin_only: bool| {
        let mut best: Option<usize> = None;
        for (i, c) in clusters.iter().enumerate() {
            if c.members == 0 {
                continue;
            }
            if skin_only && !(c.centroid.l >= l_min && c.centroid.l <= l_max) {
                continue;
            }
            if best.is_none_or(|b| c.weight > clusters[b].weight) {
                best = Some(i);
            }
        }
        best
    };
    heaviest(true).or_else(|| heaviest(false)).unwrap_or(0)
}

#[inline]
fn lab_point(rgb: [u8; 3]) -> Vec3 {
    Vec3::from_array(rgb_to_lab(rgb).to_array())
}

/// Weighted k-means++ seeding.
fn seed_centroids(points: &[Vec3], weights: &[f32], k: usize, rng: &mut StdRng) -> Vec<Vec3> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[pick(weights.iter().map(|&w| w as f64), rng)]);

    let mut nearest: Vec<f32> = points
        .iter()
        .map(|p| p.distance_squared(centroids[0]))
        .collect();

    while centroids.len() < k {
        let scores = nearest.iter().zip(weights).map(|(&d, &w)| d as f64 * w as f64);
        let next = points[pick(scores, rng)];
        centroids.push(next);
        for (d, p) in nearest.iter_mut().zip(points) {
            *d = d.min(p.distance_squared(next));
        }
    }
    centroids
}

/// Draws an index proportionally to `scores`.
///
/// Falls back to the highest score when the distribution is degenerate.
fn pick(scores: impl Iterator<Item = f64> + Clone, rng: &mut StdRng) -> usize {
    match WeightedIndex::new(scores.clone()) {
        Ok(dist) => dist.sample(rng),
        Err(_) => argmax(scores),
    }
}

fn argmax(values: impl Iterator<Item = f64>) -> usize {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, v) in values.enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best.0
}

/// Nearest centroid and squared distance for every point.
fn assign(points: &[Vec3], centroids: &[Vec3]) -> Vec<(usize, f32)> {
    let nearest = |p: &Vec3| {
        let mut best = (0, f32::INFINITY);
        for (j, c) in centroids.iter().enumerate() {
            let d = p.distance_squared(*c);
            if d < best.1 {
                best = (j, d);
            }
        }
        best
    };
    if points.len() >= PAR_THRESHOLD {
        points.par_iter().map(nearest).collect()
    } else {
        points.iter().map(nearest).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ClusterStats {
    sum: Vec3,
    weight: f32,
    members: usize,
    reseed: Option<Vec3>,
}

impl ClusterStats {
    fn centroid(&self, previous: Vec3) -> Vec3 {
        if let Some(p) = self.reseed {
            p
        } else if self.weight > 0.0 {
            self.sum / self.weight
        } else {
            previous
        }
    }
}

fn accumulate(
    points: &[Vec3],
    weights: &[f32],
    assignment: &[(usize, f32)],
    k: usize,
) -> Vec<ClusterStats> {
    let mut stats = vec![ClusterStats::default(); k];
    for ((p, &w), &(j, _)) in points.iter().zip(weights).zip(assignment) {
        let s = &mut stats[j];
        s.sum += *p * w;
        s.weight += w;
        s.members += 1;
    }
    stats
}

/// Moves each empty cluster onto the point farthest from its nearest centroid.
fn reseed_empty(stats: &mut [ClusterStats], points: &[Vec3], assignment: &[(usize, f32)]) {
    let mut taken = vec![false; points.len()];
    for s in stats.iter_mut().filter(|s| s.members == 0) {
        let far = assignment
            .iter()
            .enumerate()
            .filter(|(i, _)| !taken[*i])
            .fold(None::<(usize, f32)>, |best, (i, &(_, d))| match best {
                Some((_, bd)) if bd >= d => best,
                _ => Some((i, d)),
            });
        if let Some((i, _)) = far {
            taken[i] = true;
            s.reseed = Some(points[i]);
        }
    }
}

/// Draws a fresh clustering seed.
pub fn fresh_seed() -> u64 {
    rand::random::<u64>()
}
