//! Strand core library.
//!
//! Ranks the pairwise distances between points in three-dimensional integer
//! space and folds the resulting proximity edges into connected components.
//! The pipeline runs in four stages:
//!
//! - [`PointStore`] holds the immutable, index-addressed points.
//! - [`SpatialIndex`] answers nearest-neighbour queries over the store.
//! - [`EdgeRanker`] turns neighbour lists into a deduplicated, globally
//!   sorted sequence of undirected [`Edge`]s.
//! - [`ComponentForest`] consumes edges in rank order and reports either the
//!   largest component sizes or the edge that completes the span.
//!
//! [`Strand`] wires the stages together for both queries.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod forest;
mod index;
mod point;
mod ranker;
mod result;
mod strand;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{ExecutionStrategy, StrandBuilder},
    error::{Result, StrandError, StrandErrorCode},
    forest::{
        ComponentForest, ComponentSummary, SpanningEdge, Transition, find_spanning_edge,
        largest_component_sizes,
    },
    index::{Neighbour, SpatialIndex},
    point::{Point, PointStore},
    ranker::{Edge, EdgeRanker, RankedEdges},
    result::{ClusterReport, SpanReport, SpanningPair},
    strand::Strand,
};
