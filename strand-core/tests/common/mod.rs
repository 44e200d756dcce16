use strand_core::{Point, PointStore};

/// Two tight pairs joined by a single long bridge between points 1 and 2.
#[must_use]
pub fn two_pairs() -> PointStore {
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

/// The twenty-point junction layout with known answers for both queries.
#[must_use]
pub fn reference_layout() -> PointStore {
    let coords: [[u32; 3]; 20] = [
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
    let points = coords
        .iter()
        .map(|&[x, y, z]| Point::new(x, y, z))
        .collect();
    PointStore::new("reference", points)
}
