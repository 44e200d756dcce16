//! Shared test utilities for `strand-core`.

use std::ops::Range;

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use strand_test_support::ci::property_test_profile::ProptestRunProfile;
use test_strategy::Arbitrary;

use crate::point::{Point, PointStore};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `STRAND_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Generates stores with a point count drawn from `count` and coordinates
/// drawn from `coordinates`.
///
/// Narrow coordinate ranges produce many duplicate distances, which is the
/// interesting case for tie handling.
pub(crate) fn point_cloud_strategy(
    count: Range<usize>,
    coordinates: Range<u32>,
) -> impl Strategy<Value = PointStore> {
    prop::collection::vec(
        (coordinates.clone(), coordinates.clone(), coordinates),
        count,
    )
    .prop_map(|coords| {
        let points = coords
            .into_iter()
            .map(|(x, y, z)| Point::new(x, y, z))
            .collect();
        PointStore::new("generated", points)
    })
}

/// Coordinate spread of a generated cloud.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(crate) enum CloudShape {
    /// Wide coordinates; distances are mostly distinct.
    #[weight(3)]
    Spread,
    /// A small cube; many equal distances.
    #[weight(3)]
    Dense,
    /// Two positions per axis; heavy duplication including coincident points.
    #[weight(1)]
    Stacked,
}

impl CloudShape {
    fn coordinates(self) -> Range<u32> {
        match self {
            Self::Spread => 0..1_000,
            Self::Dense => 0..6,
            Self::Stacked => 0..2,
        }
    }
}

/// Generates stores whose coordinate spread is itself drawn from
/// [`CloudShape`].
pub(crate) fn shaped_cloud_strategy(count: Range<usize>) -> impl Strategy<Value = PointStore> {
    any::<CloudShape>()
        .prop_flat_map(move |shape| point_cloud_strategy(count.clone(), shape.coordinates()))
}

/// Right-angle triangle with pairwise distances 1, 1 and √2.
pub(crate) fn triangle() -> PointStore {
    PointStore::new(
        "triangle",
        vec![
            Point::new(0, 0, 0),
            Point::new(1, 0, 0),
            Point::new(0, 1, 0),
        ],
    )
}

/// Two tight pairs far apart; the bridge between points 1 and 2 is the
/// longest edge any spanning process needs.
pub(crate) fn two_pairs() -> PointStore {
    PointStore::new(
        "two-pairs",
        vec![
            Point::new(0, 0, 0),
            Point::new(1, 0, 0),
            Point::new(10, 0, 0),
            Point::new(11, 0, 0),
        ],
    )
}

/// The twenty-point junction layout used as an end-to-end reference.
pub(crate) fn reference_layout() -> PointStore {
    const COORDS: [[u32; 3]; 20] = [
        [162, 817, 812],
        [57, 618, 57],
        [906, 360, 560],
        [592, 479, 940],
        [352, 342, 300],
        [466, 668, 158],
        [542, 29, 236],
        [431, 825, 988],
        [739, 650, 466],
        [52, 470, 668],
        [216, 146, 977],
        [819, 987, 18],
        [117, 168, 530],
        [805, 96, 715],
        [346, 949, 466],
        [970, 615, 88],
        [941, 993, 340],
        [862, 61, 35],
        [984, 92, 344],
        [425, 690, 689],
    ];
    let points = COORDS
        .iter()
        .map(|&[x, y, z]| Point::new(x, y, z))
        .collect();
    PointStore::new("reference", points)
}
