//! Point-count compartmentalization of the discretized arbor.
//!
//! Points are grouped, in soma-to-tip order, into compartments of
//! `points_per_compartment` points. A compartment left partially filled at a
//! branch point hands its unused quota to the first compartments of the two
//! children, so a branch point does not inflate the local compartment size.
//! Every segment owns at least one compartment, possibly without points, so
//! the compartment tree branches exactly where the segment tree does.

use crate::config::GrowthParams;
use crate::segment::{DendriteSegment, SegmentId};
use retina_data::{Compartment, DendritePoint};

const FALLBACK_COLOR: [u8; 3] = [255, 255, 255];

/// Compartments plus the indices of those touching the soma.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompartmentTree {
    pub compartments: Vec<Compartment>,
    pub roots: Vec<usize>,
}

/// Walk state carried from a segment into its children.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    /// Compartment the next opened compartment attaches to.
    parent: Option<usize>,
    /// Compartment currently being filled.
    open: Option<usize>,
    /// Points still to place in `open`; zero means open a full-size one next.
    quota: usize,
}

impl Cursor {
    /// Cursors for the two children of a branch point.
    fn split(self) -> (Cursor, Cursor) {
        let parent = self.open.or(self.parent);
        let first = Cursor {
            parent,
            open: None,
            quota: self.quota.div_ceil(2),
        };
        let second = Cursor {
            quota: self.quota / 2,
            ..first
        };
        (first, second)
    }
}

pub fn compartmentalize(
    segments: &[DendriteSegment],
    segment_points: &[Vec<DendritePoint>],
    params: &GrowthParams,
) -> CompartmentTree {
    let target = params.points_per_compartment.max(1);
    let mut compartments: Vec<Compartment> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();

    let mut stack: Vec<(SegmentId, Cursor)> = segments
        .iter()
        .rev()
        .filter(|s| s.parent.is_none())
        .map(|s| (s.index, Cursor::default()))
        .collect();

    while let Some((id, mut cursor)) = stack.pop() {
        let Some(segment) = segments.get(id) else {
            continue;
        };

        for point in segment_points.get(id).into_iter().flatten() {
            let open = match cursor.open {
                Some(open) if cursor.quota > 0 => open,
                _ => {
                    if cursor.quota == 0 {
                        cursor.quota = target;
                    }
                    open_compartment(&mut compartments, &mut roots, &mut cursor, segment, params)
                }
            };
            compartments[open].points.push(point.clone());
            cursor.quota -= 1;
        }

        // A segment whose cells all lie on its parent's path still gets a
        // compartment, so every branch point keeps exactly two distal links.
        // Its pending quota passes on to the children untouched.
        if cursor.open.is_none() {
            let junction =
                open_compartment(&mut compartments, &mut roots, &mut cursor, segment, params);
            tracing::trace!(
                segment = id,
                junction,
                "empty segment joined by a pointless compartment"
            );
        }

        if let [first, second] = segment.children.as_slice() {
            let (first_cursor, second_cursor) = cursor.split();
            stack.push((*second, second_cursor));
            stack.push((*first, first_cursor));
        }
    }

    // Root compartments share the soma.
    for &root in &roots {
        compartments[root].proximal_neighbors =
            roots.iter().copied().filter(|&r| r != root).collect();
    }
    for compartment in &mut compartments {
        compartment.refresh_neurotransmitter_weights();
    }

    tracing::debug!(
        compartments = compartments.len(),
        roots = roots.len(),
        target,
        "arbor compartmentalized"
    );
    CompartmentTree {
        compartments,
        roots,
    }
}

/// Appends a compartment distal to the cursor's current one and makes it current.
fn open_compartment(
    compartments: &mut Vec<Compartment>,
    roots: &mut Vec<usize>,
    cursor: &mut Cursor,
    segment: &DendriteSegment,
    params: &GrowthParams,
) -> usize {
    let index = compartments.len();
    let mut compartment = Compartment::new(index, segment.root_index, color_for(params, segment));
    match cursor.open.or(cursor.parent) {
        Some(proximal) => {
            compartment.proximal_neighbors.push(proximal);
            compartments[proximal].distal_neighbors.push(index);
        }
        None => roots.push(index),
    }
    compartments.push(compartment);
    cursor.open = Some(index);
    index
}

fn color_for(params: &GrowthParams, segment: &DendriteSegment) -> [u8; 3] {
    if params.palette.is_empty() {
        FALLBACK_COLOR
    } else {
        params.palette[segment.root_index % params.palette.len()]
    }
}
