//! Projection of the continuous arbor onto the integer grid.

use crate::config::GrowthParams;
use crate::segment::{DendriteSegment, SegmentId};
use retina_data::{DendritePoint, GridPoint, Neurotransmitter, Vector2D};
use std::collections::{BTreeSet, HashSet};

/// The last point emitted on the way to a segment.
#[derive(Debug, Clone, Copy)]
struct Tail {
    location: Vector2D,
    grid: GridPoint,
    wirelength: f64,
}

/// Samples every grown edge at unit spacing and snaps the samples to the grid.
///
/// Returns one point list per segment, indexed like `segments`. A grid
/// location is emitted at most once along any soma-to-tip path; sibling
/// branches may revisit each other's cells.
pub fn discretize(
    segments: &[DendriteSegment],
    soma: Vector2D,
    params: &GrowthParams,
) -> Vec<Vec<DendritePoint>> {
    let accepts: BTreeSet<Neurotransmitter> =
        params.input_neurotransmitters.iter().copied().collect();
    let releases: BTreeSet<Neurotransmitter> =
        params.output_neurotransmitters.iter().copied().collect();

    let mut points: Vec<Vec<DendritePoint>> = vec![Vec::new(); segments.len()];
    let mut emitted: Vec<HashSet<GridPoint>> = vec![HashSet::new(); segments.len()];

    let soma_tail = Tail {
        location: soma,
        grid: soma.rounded(),
        wirelength: 0.0,
    };
    let mut stack: Vec<(SegmentId, Tail)> = segments
        .iter()
        .rev()
        .filter(|s| s.parent.is_none())
        .map(|s| (s.index, soma_tail))
        .collect();

    while let Some((id, mut tail)) = stack.pop() {
        let Some(segment) = segments.get(id) else {
            continue;
        };

        for (a, b) in segment.edges() {
            for sample in edge_samples(a, b) {
                let grid = sample.rounded();
                if grid == tail.grid || seen_on_path(segments, &emitted, id, grid) {
                    continue;
                }

                let location = grid.to_vector();
                let wirelength = tail.wirelength + tail.location.distance_to(location);
                points[id].push(DendritePoint {
                    location: grid,
                    wirelength,
                    heading_from_soma: soma.angle_heading_to(location),
                    accepts: accepts.clone(),
                    releases: if wirelength >= params.release_wirelength {
                        releases.clone()
                    } else {
                        BTreeSet::new()
                    },
                });
                emitted[id].insert(grid);
                tail = Tail {
                    location,
                    grid,
                    wirelength,
                };
            }
        }

        for &child in segment.children.iter().rev() {
            stack.push((child, tail));
        }
    }

    tracing::debug!(
        points = points.iter().map(Vec::len).sum::<usize>(),
        segments = segments.len(),
        "arbor discretized"
    );
    points
}

/// Unit-spaced samples from `a` (exclusive) to `b` (inclusive).
fn edge_samples(a: Vector2D, b: Vector2D) -> impl Iterator<Item = Vector2D> {
    let direction = a.unit_heading_to(b);
    let whole_steps = a.distance_to(b).floor() as usize;
    (1..=whole_steps)
        .map(move |k| a + direction * k as f64)
        .chain(std::iter::once(b))
}

fn seen_on_path(
    segments: &[DendriteSegment],
    emitted: &[HashSet<GridPoint>],
    id: SegmentId,
    grid: GridPoint,
) -> bool {
    let mut current = Some(id);
    while let Some(i) = current {
        if emitted[i].contains(&grid) {
            return true;
        }
        current = segments.get(i).and_then(|s| s.parent);
    }
    false
}
