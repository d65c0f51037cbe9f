// Geofence: coarse lon/lat regions used to bucket geotagged posts.
//
// Regions are checked in order and the first one containing the point wins.
// Boundaries count as inside, so a point on an edge shared by two regions
// resolves toward the earlier entry.
// A ring may extend east of 180°; points west of the antimeridian are tested
// against such rings a second time shifted by +360°.

use geo::{Intersects, LineString, Point, Polygon};

use crate::error::{FeatureError, Result};

/// `(region name, rings)` where each ring is a list of `(lon, lat)` vertices.
pub type RegionSpec = (&'static str, &'static [&'static [(f64, f64)]]);

pub const STANDARD_REGIONS: &[RegionSpec] = &[
    (
        "north_america",
        &[&[
            (-170.0, 14.0),
            (-52.0, 14.0),
            (-52.0, 45.0),
            (-10.0, 60.0),
            (-10.0, 84.0),
            (-170.0, 84.0),
        ]],
    ),
    (
        "central_america_caribbean",
        &[&[(-118.0, 5.0), (-59.0, 5.0), (-59.0, 14.0), (-118.0, 14.0)]],
    ),
    (
        "south_america",
        &[&[(-82.0, -56.0), (-34.0, -56.0), (-34.0, 5.0), (-82.0, 5.0)]],
    ),
    (
        "europe",
        &[&[(-25.0, 35.0), (45.0, 35.0), (45.0, 72.0), (-25.0, 72.0)]],
    ),
    (
        "middle_east",
        &[&[(34.0, 12.0), (63.0, 12.0), (63.0, 42.0), (34.0, 42.0)]],
    ),
    (
        "africa",
        &[&[(-20.0, -36.0), (55.0, -36.0), (55.0, 35.0), (-20.0, 35.0)]],
    ),
    (
        "asia",
        &[&[(45.0, -11.0), (180.0, -11.0), (180.0, 82.0), (45.0, 82.0)]],
    ),
    (
        "oceania",
        &[
            &[(110.0, -50.0), (180.0, -50.0), (180.0, -11.0), (110.0, -11.0)],
            // Pacific islands on both sides of the antimeridian.
            &[(165.0, -50.0), (230.0, -50.0), (230.0, 0.0), (165.0, 0.0)],
        ],
    ),
    (
        "antarctica",
        &[&[(-180.0, -90.0), (180.0, -90.0), (180.0, -60.0), (-180.0, -60.0)]],
    ),
];

#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    polygons: Vec<Polygon<f64>>,
}

impl Region {
    pub fn new(name: &str, rings: &[&[(f64, f64)]]) -> Result<Self> {
        let mut polygons = Vec::with_capacity(rings.len());
        for ring in rings {
            let distinct = ring.iter().filter(|(x, y)| x.is_finite() && y.is_finite()).count();
            if distinct < 3 || distinct != ring.len() {
                return Err(FeatureError::Geofence {
                    region: name.to_string(),
                    reason: format!("ring needs at least 3 finite vertices, got {}", ring.len()),
                });
            }
            // LineString::from closes nothing by itself; Polygon::new closes the ring.
            polygons.push(Polygon::new(LineString::from(ring.to_vec()), vec![]));
        }
        if polygons.is_empty() {
            return Err(FeatureError::Geofence {
                region: name.to_string(),
                reason: "region has no rings".to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            polygons,
        })
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let point = Point::new(lon, lat);
        let wrapped = Point::new(lon + 360.0, lat);
        self.polygons
            .iter()
            .any(|poly| poly.intersects(&point) || (lon < 0.0 && poly.intersects(&wrapped)))
    }
}

#[derive(Debug, Clone)]
pub struct Geofence {
    regions: Vec<Region>,
}

impl Geofence {
    pub fn standard() -> Result<Self> {
        Self::from_specs(STANDARD_REGIONS)
    }

    pub fn from_specs(specs: &[RegionSpec]) -> Result<Self> {
        let regions = specs
            .iter()
            .map(|(name, rings)| Region::new(name, rings))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { regions })
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Value returned by `classify` for points outside every region.
    pub fn no_region(&self) -> usize {
        self.regions.len()
    }

    /// Index of the first region containing the point, or `no_region()`.
    pub fn classify(&self, lon: f64, lat: f64) -> usize {
        self.regions
            .iter()
            .position(|r| r.contains(lon, lat))
            .unwrap_or(self.regions.len())
    }
}

/// Whether a `[lon, lat]` pair can be placed on the map at all.
pub fn is_valid_coordinate(lon: f64, lat: f64) -> bool {
    lon.is_finite() && lat.is_finite() && (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_cities() {
        let fence = Geofence::standard().unwrap();
        let names = |lon, lat| fence.regions()[fence.classify(lon, lat)].name.clone();
        assert_eq!(names(-74.0, 40.7), "north_america"); // New York
        assert_eq!(names(13.4, 52.5), "europe"); // Berlin
        assert_eq!(names(-58.4, -34.6), "south_america"); // Buenos Aires
        assert_eq!(names(151.2, -33.9), "oceania"); // Sydney
        assert_eq!(names(139.7, 35.7), "asia"); // Tokyo
    }

    #[test]
    fn test_antimeridian_ring() {
        let fence = Geofence::standard().unwrap();
        let oceania = fence.regions().iter().position(|r| r.name == "oceania").unwrap();
        // Suva, Fiji (east of 180) and Apia, Samoa (west of 180)
        assert_eq!(fence.classify(178.4, -18.1), oceania);
        assert_eq!(fence.classify(-171.8, -13.8), oceania);
    }

    #[test]
    fn test_shared_edges_go_to_earlier_region() {
        let fence = Geofence::standard().unwrap();
        let names = |lon, lat| fence.regions()[fence.classify(lon, lat)].name.clone();
        assert_eq!(names(0.0, 35.0), "europe"); // europe/africa edge
        assert_eq!(names(100.0, -11.0), "asia"); // asia/oceania edge
        assert_eq!(names(10.0, -36.0), "africa"); // outer edge
    }

    #[test]
    fn test_open_ocean_is_no_region() {
        let fence = Geofence::standard().unwrap();
        assert_eq!(fence.classify(-30.0, 0.0), fence.no_region());
    }

    #[test]
    fn test_degenerate_ring_rejected() {
        let specs: &[RegionSpec] = &[("line", &[&[(0.0, 0.0), (1.0, 1.0)]])];
        assert!(Geofence::from_specs(specs).is_err());
    }
}
