//! Round-robin scheduler that grows every branch of a morphology to completion.
//!
//! The arbor owns the append-only segment registry. Segments are only ever
//! pushed, and each growth tick reads the registry before the next push, so
//! collision queries always see a consistent history.

use crate::config::GrowthParams;
use crate::segment::{DendriteSegment, Growth, Neighborhood, SegmentId, Termination};
use rand::Rng;
use retina_data::Vector2D;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arbor {
    pub soma: Vector2D,
    segments: Vec<DendriteSegment>,
    roots: Vec<SegmentId>,
    ticks: u64,
}

impl Arbor {
    /// Seeds root segments around the soma and grows them until all stop.
    pub fn grow<R: Rng>(soma: Vector2D, params: &GrowthParams, rng: &mut R) -> Self {
        let mut arbor = Self::seed(soma, params, rng);
        arbor.grow_to_completion(params, rng);
        arbor
    }

    /// Creates evenly spaced root segments with independently drawn budgets.
    pub fn seed<R: Rng>(soma: Vector2D, params: &GrowthParams, rng: &mut R) -> Self {
        let root_count = rng.gen_range(params.min_branches..=params.max_branches);
        let (min_budget, max_budget) = params.budget_bounds();
        let spacing = 360.0 / root_count as f64;

        let segments: Vec<DendriteSegment> = (0..root_count)
            .map(|i| {
                let budget = rng.gen_range(min_budget..=max_budget);
                DendriteSegment::root(i, i as f64 * spacing, soma, budget)
            })
            .collect();

        Self {
            soma,
            roots: (0..root_count).collect(),
            segments,
            ticks: 0,
        }
    }

    /// Drives every active segment until none is left growing.
    ///
    /// Each growth step consumes `step_size > 0` of a finite budget, so the
    /// loop always terminates.
    pub fn grow_to_completion<R: Rng>(&mut self, params: &GrowthParams, rng: &mut R) {
        let mut active: Vec<SegmentId> = self
            .segments
            .iter()
            .filter(|s| s.is_growing)
            .map(|s| s.index)
            .collect();
        let mut cursor = 0;

        while !active.is_empty() {
            if cursor >= active.len() {
                cursor = 0;
            }
            let id = active[cursor];
            self.ticks += 1;

            match self.grow_segment(id, params, rng) {
                Growth::Extended => cursor += 1,
                Growth::Died(reason) => {
                    active.remove(cursor);
                    tracing::trace!(segment = id, ?reason, "segment stopped");
                }
                Growth::Branched(children) => {
                    active.remove(cursor);
                    let [first, second] = *children;
                    let first = self.register_child(id, first);
                    let second = self.register_child(id, second);
                    active.insert(0, second);
                    active.insert(0, first);
                    cursor += 2;
                    tracing::trace!(segment = id, first, second, "segment branched");
                }
            }
        }

        tracing::debug!(
            segments = self.segments.len(),
            roots = self.roots.len(),
            ticks = self.ticks,
            "arbor growth complete"
        );
    }

    /// Runs one tick of segment `id` against the rest of the registry.
    pub fn grow_segment<R: Rng>(
        &mut self,
        id: SegmentId,
        params: &GrowthParams,
        rng: &mut R,
    ) -> Growth {
        if id >= self.segments.len() {
            return Growth::Died(Termination::Exhausted);
        }
        let (before, rest) = self.segments.split_at_mut(id);
        let (segment, after) = match rest.split_first_mut() {
            Some(split) => split,
            None => return Growth::Died(Termination::Exhausted),
        };
        segment.grow(Neighborhood::new(before, after), params, rng)
    }

    /// Appends a child to the registry and links it to its parent.
    fn register_child(&mut self, parent: SegmentId, mut child: DendriteSegment) -> SegmentId {
        let id = self.segments.len();
        child.index = id;
        child.parent = Some(parent);
        self.segments.push(child);
        self.segments[parent].children.push(id);
        id
    }

    pub fn segments(&self) -> &[DendriteSegment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> Option<&DendriteSegment> {
        self.segments.get(id)
    }

    pub fn roots(&self) -> &[SegmentId] {
        &self.roots
    }

    /// Growth ticks executed by the scheduler.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of grown edges along the path from the soma to the tip of `id`.
    pub fn path_edges(&self, id: SegmentId) -> usize {
        let mut total = 0;
        let mut current = self.segments.get(id);
        while let Some(segment) = current {
            total += segment.bounding_circles.len();
            current = segment.parent.and_then(|p| self.segments.get(p));
        }
        total
    }

    /// Total grown wirelength across all segments.
    pub fn total_wirelength(&self) -> f64 {
        self.segments.iter().map(DendriteSegment::grown_length).sum()
    }
}
