//! Single-branch stochastic growth with collision avoidance and branching.
//!
//! A [`DendriteSegment`] is one unbranched run of the arbor. Each call to
//! [`DendriteSegment::grow`] either extends the tip by one step, stops the
//! segment, or replaces it with two children. Dead ends are ordinary outcomes
//! and are reported through [`Growth`], never as errors.

use crate::config::GrowthParams;
use crate::heading::{
    exclude_range, generate_random_in_allowable_ranges, ranges_around, subtended_ranges,
    HeadingRange,
};
use rand::Rng;
use retina_data::{normalize_heading, BoundingCircle, Vector2D};
use serde::{Deserialize, Serialize};
use std::iter;

/// Index of a segment in the arbor's registry.
pub type SegmentId = usize;

/// Endpoints closer than this to the tip count as shared with it.
const SHARED_ENDPOINT_EPS: f64 = 1e-6;

/// Base of the branching probability curve.
const BRANCH_BASE: f64 = 1.05;

/// Probability that a segment which has grown `length` branches this step.
///
/// Reaches exactly 1 at `max_segment_length` and stays strictly positive
/// below it.
#[inline]
pub fn branch_probability(length: f64, max_segment_length: f64) -> f64 {
    BRANCH_BASE.powf(length - max_segment_length)
}

/// Why a segment stopped growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Remaining wirelength cannot afford another step.
    Exhausted,
    /// Every heading in the growth cone is blocked.
    BoxedIn,
    /// Replaced by two children.
    Branched,
}

/// Outcome of one growth tick.
#[derive(Debug)]
pub enum Growth {
    Extended,
    Died(Termination),
    /// The segment stopped and handed its remaining budget to two children.
    /// The children are not yet registered; the caller assigns their indices.
    Branched(Box<[DendriteSegment; 2]>),
}

impl Growth {
    pub fn is_growing(&self) -> bool {
        matches!(self, Growth::Extended)
    }

    pub fn children(&self) -> &[DendriteSegment] {
        match self {
            Growth::Branched(children) => children.as_slice(),
            _ => &[],
        }
    }
}

/// Read-only view of every registered segment except the one being grown.
///
/// The registry is split around the growing segment so that it can be
/// borrowed mutably while the rest of the arbor is queried for collisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighborhood<'a> {
    before: &'a [DendriteSegment],
    after: &'a [DendriteSegment],
}

impl<'a> Neighborhood<'a> {
    pub fn new(before: &'a [DendriteSegment], after: &'a [DendriteSegment]) -> Self {
        Self { before, after }
    }

    pub fn iter(self) -> impl Iterator<Item = &'a DendriteSegment> + 'a {
        self.before.iter().chain(self.after.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DendriteSegment {
    pub index: SegmentId,
    /// Index of the root branch this segment descends from.
    pub root_index: usize,
    pub parent: Option<SegmentId>,
    /// Either empty or exactly two children.
    pub children: Vec<SegmentId>,
    /// Central heading of the growth cone, degrees.
    pub heading: f64,
    pub locations: Vec<Vector2D>,
    /// One circle per grown edge, parallel to `locations.windows(2)`.
    pub bounding_circles: Vec<BoundingCircle>,
    pub resources: f64,
    pub initial_resources: f64,
    pub is_growing: bool,
    pub termination: Option<Termination>,
}

impl DendriteSegment {
    /// A root segment starting at the soma.
    pub fn root(index: SegmentId, heading: f64, soma: Vector2D, budget: f64) -> Self {
        Self {
            index,
            root_index: index,
            parent: None,
            children: Vec::new(),
            heading: normalize_heading(heading),
            locations: vec![soma],
            bounding_circles: Vec::new(),
            resources: budget,
            initial_resources: budget,
            is_growing: true,
            termination: None,
        }
    }

    /// An unregistered child starting at this segment's tip.
    fn spawn_child(&self, heading: f64) -> Self {
        Self {
            index: self.index,
            root_index: self.root_index,
            parent: Some(self.index),
            children: Vec::new(),
            heading: normalize_heading(heading),
            locations: vec![self.tip()],
            bounding_circles: Vec::new(),
            resources: self.resources,
            initial_resources: self.resources,
            is_growing: true,
            termination: None,
        }
    }

    #[inline]
    pub fn tip(&self) -> Vector2D {
        self.locations
            .last()
            .copied()
            .unwrap_or_else(Vector2D::zero)
    }

    /// Wirelength consumed since this segment was created.
    #[inline]
    pub fn grown_length(&self) -> f64 {
        self.initial_resources - self.resources
    }

    /// Grown edges as `(start, end)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2D, Vector2D)> + '_ {
        self.locations.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Runs one growth tick against the rest of the registry.
    pub fn grow<R: Rng>(
        &mut self,
        others: Neighborhood<'_>,
        params: &GrowthParams,
        rng: &mut R,
    ) -> Growth {
        if !self.is_growing {
            return Growth::Died(self.termination.unwrap_or(Termination::Exhausted));
        }
        if self.resources < params.step_size {
            return self.stop(Termination::Exhausted);
        }

        let allowed = allowable_headings(
            others.iter().chain(iter::once(&*self)),
            self.tip(),
            self.heading,
            params,
        );
        if allowed.is_empty() {
            return self.stop(Termination::BoxedIn);
        }

        if self.locations.len() >= 2 {
            let p = branch_probability(self.grown_length(), params.max_segment_length);
            if rng.gen::<f64>() < p {
                if let Some(children) = self.sprout(others, params, rng) {
                    self.stop(Termination::Branched);
                    return Growth::Branched(Box::new(children));
                }
                tracing::trace!(segment = self.index, "branch attempt abandoned");
            }
        }

        match generate_random_in_allowable_ranges(&allowed, rng) {
            Some(heading) => {
                self.advance(heading, params.step_size);
                Growth::Extended
            }
            None => self.stop(Termination::BoxedIn),
        }
    }

    fn stop(&mut self, reason: Termination) -> Growth {
        self.is_growing = false;
        self.termination = Some(reason);
        Growth::Died(reason)
    }

    /// Speculatively creates both children; `None` if either dead-ends at once.
    fn sprout<R: Rng>(
        &self,
        others: Neighborhood<'_>,
        params: &GrowthParams,
        rng: &mut R,
    ) -> Option<[DendriteSegment; 2]> {
        let mut first = self.spawn_child(self.heading - params.children_deviation);
        let mut second = self.spawn_child(self.heading + params.children_deviation);

        for child in [&mut first, &mut second] {
            if !child.trial_step(others, self, params, rng) {
                return None;
            }
        }
        Some([first, second])
    }

    fn trial_step<R: Rng>(
        &mut self,
        others: Neighborhood<'_>,
        parent: &DendriteSegment,
        params: &GrowthParams,
        rng: &mut R,
    ) -> bool {
        if self.resources < params.step_size {
            return false;
        }
        let allowed = allowable_headings(
            others.iter().chain(iter::once(parent)),
            self.tip(),
            self.heading,
            params,
        );
        match generate_random_in_allowable_ranges(&allowed, rng) {
            Some(heading) => {
                self.advance(heading, params.step_size);
                true
            }
            None => false,
        }
    }

    /// Steps the tip by `step_size` along `heading`.
    pub fn advance(&mut self, heading: f64, step_size: f64) {
        let from = self.tip();
        let to = from + Vector2D::from_heading(heading) * step_size;
        self.locations.push(to);
        self.bounding_circles.push(BoundingCircle::spanning(from, to));
        self.resources -= step_size;
    }
}

/// Headings around `heading` that do not point into any visible edge.
///
/// Every edge whose bounding circle touches the vision disk around `tip` has
/// the arc it subtends removed from the growth cone. Edges with an endpoint
/// at the tip are exempt: the preceding edge, and at a branch point or the
/// soma the edges that start from the same location.
pub fn allowable_headings<'a, I>(
    segments: I,
    tip: Vector2D,
    heading: f64,
    params: &GrowthParams,
) -> Vec<HeadingRange>
where
    I: IntoIterator<Item = &'a DendriteSegment>,
{
    let mut allowed = ranges_around(heading, params.heading_deviation);

    for segment in segments {
        for (circle, (a, b)) in segment.bounding_circles.iter().zip(segment.edges()) {
            if !circle.intersects_disk(tip, params.vision_radius) {
                continue;
            }
            if a.distance_to(tip) < SHARED_ENDPOINT_EPS || b.distance_to(tip) < SHARED_ENDPOINT_EPS
            {
                continue;
            }
            for blocked in subtended_ranges(tip, a, b) {
                allowed = exclude_range(&allowed, blocked);
            }
            if allowed.is_empty() {
                return allowed;
            }
        }
    }

    allowed
}
