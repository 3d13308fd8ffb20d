use rand::Rng;
use std::sync::LazyLock;

/// A position on the idealized sphere, in degrees. Immutable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A named fixed location rendered as a pulsing marker.
#[derive(Clone, Copy, Debug)]
pub struct Hotspot {
    pub point: GeoPoint,
    pub label: &'static str,
}

/// An animated path linking two hotspots. Endpoint order only affects
/// animation phase, not semantics.
#[derive(Clone, Copy, Debug)]
pub struct ConnectionArc {
    pub from: GeoPoint,
    pub to: GeoPoint,
}

/// A land point-cloud sample, in radians (pre-converted so the per-
/// frame hot loop skips the unit conversion).
#[derive(Clone, Copy, Debug)]
pub struct LandPoint {
    pub lat: f64,
    pub lon: f64,
}

pub const HOTSPOTS: [Hotspot; 8] = [
    Hotspot { point: GeoPoint::new(40.0, -74.0), label: "NYC" },
    Hotspot { point: GeoPoint::new(51.0, 0.0), label: "LON" },
    Hotspot { point: GeoPoint::new(35.0, 139.0), label: "TKY" },
    Hotspot { point: GeoPoint::new(-33.0, 151.0), label: "SYD" },
    Hotspot { point: GeoPoint::new(1.0, 103.0), label: "SIN" },
    Hotspot { point: GeoPoint::new(-23.0, -43.0), label: "RIO" },
    Hotspot { point: GeoPoint::new(55.0, 37.0), label: "MOW" },
    Hotspot { point: GeoPoint::new(-1.0, 37.0), label: "NBO" },
];

pub const CONNECTION_ARCS: [ConnectionArc; 8] = [
    ConnectionArc { from: GeoPoint::new(40.0, -74.0), to: GeoPoint::new(51.0, 0.0) },
    ConnectionArc { from: GeoPoint::new(51.0, 0.0), to: GeoPoint::new(35.0, 139.0) },
    ConnectionArc { from: GeoPoint::new(35.0, 139.0), to: GeoPoint::new(-33.0, 151.0) },
    ConnectionArc { from: GeoPoint::new(40.0, -74.0), to: GeoPoint::new(-23.0, -43.0) },
    ConnectionArc { from: GeoPoint::new(51.0, 0.0), to: GeoPoint::new(1.0, 103.0) },
    ConnectionArc { from: GeoPoint::new(1.0, 103.0), to: GeoPoint::new(-1.0, 37.0) },
    ConnectionArc { from: GeoPoint::new(-1.0, 37.0), to: GeoPoint::new(55.0, 37.0) },
    ConnectionArc { from: GeoPoint::new(40.0, -74.0), to: GeoPoint::new(19.0, -99.0) },
];

/// Gaussian cluster approximating one continental landmass: center in
/// degrees, spread in degrees, target point count.
struct ContinentAnchor {
    lat: f64,
    lon: f64,
    spread: f64,
    density: usize,
}

const CONTINENTS: [ContinentAnchor; 7] = [
    ContinentAnchor { lat: 45.0, lon: -100.0, spread: 25.0, density: 1500 },
    ContinentAnchor { lat: -10.0, lon: -60.0, spread: 20.0, density: 1200 },
    ContinentAnchor { lat: 50.0, lon: 10.0, spread: 15.0, density: 1000 },
    ContinentAnchor { lat: 0.0, lon: 20.0, spread: 22.0, density: 1400 },
    ContinentAnchor { lat: 45.0, lon: 90.0, spread: 30.0, density: 1800 },
    ContinentAnchor { lat: -25.0, lon: 135.0, spread: 12.0, density: 600 },
    ContinentAnchor { lat: -75.0, lon: 0.0, spread: 15.0, density: 400 },
];

/// Sparse uniform scatter over the whole sphere (oceanic noise)
const OCEAN_NOISE_POINTS: usize = 500;

// Generated exactly once per process and shared by every engine
// instance; regeneration per mount would dominate frame cost.
static LAND_POINTS: LazyLock<Vec<LandPoint>> = LazyLock::new(generate_land_points);

/// The process-wide land point-cloud. First call generates it; every
/// later call (from any instance) sees the same cached slice.
pub fn land_points() -> &'static [LandPoint] {
    &LAND_POINTS
}

/// Box-Muller sampling around each continent anchor, longitude offset
/// corrected by cos(lat) to avoid pole-convergence distortion, plus a
/// uniform oceanic scatter. Visually stable across runs; not required
/// to be bit-reproducible.
fn generate_land_points() -> Vec<LandPoint> {
    let mut rng = rand::thread_rng();
    let total: usize = CONTINENTS.iter().map(|c| c.density).sum::<usize>() + OCEAN_NOISE_POINTS;
    let mut points = Vec::with_capacity(total);

    for cont in &CONTINENTS {
        let cos_lat = cont.lat.to_radians().cos();
        for _ in 0..cont.density {
            // 1 - u keeps the log argument in (0, 1]
            let u: f64 = 1.0 - rng.gen::<f64>();
            let v: f64 = rng.gen();
            let r = cont.spread * (-2.0 * u.ln()).sqrt();
            let theta = std::f64::consts::TAU * v;
            let d_lat = r * theta.cos();
            let d_lon = r * theta.sin() / cos_lat;
            points.push(LandPoint {
                lat: (cont.lat + d_lat).to_radians(),
                lon: (cont.lon + d_lon).to_radians(),
            });
        }
    }

    for _ in 0..OCEAN_NOISE_POINTS {
        points.push(LandPoint {
            lat: rng.gen_range(-90.0..90.0f64).to_radians(),
            lon: rng.gen_range(-180.0..180.0f64).to_radians(),
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_cloud_is_generated_once_and_shared() {
        // Two sequential "instances" must observe the identical slice,
        // not two independently generated sets.
        let first = land_points();
        let second = land_points();
        assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn point_cloud_has_expected_size() {
        let expected: usize =
            CONTINENTS.iter().map(|c| c.density).sum::<usize>() + OCEAN_NOISE_POINTS;
        assert_eq!(land_points().len(), expected);
        assert_eq!(expected, 8400);
    }

    #[test]
    fn points_are_plausible_radians() {
        // Gaussian tails can stray past the poles, but the bulk must
        // sit in radian range, not degree range.
        let in_range = land_points()
            .iter()
            .filter(|p| p.lat.abs() <= std::f64::consts::PI && p.lon.abs() <= std::f64::consts::TAU)
            .count();
        assert!(in_range as f64 / land_points().len() as f64 > 0.99);
    }

    #[test]
    fn arcs_connect_known_locations() {
        // Every arc endpoint is a hotspot, except the Mexico City spur.
        let spur = GeoPoint::new(19.0, -99.0);
        for arc in &CONNECTION_ARCS {
            for end in [arc.from, arc.to] {
                assert!(
                    end == spur || HOTSPOTS.iter().any(|h| h.point == end),
                    "arc endpoint {end:?} is not a known location"
                );
            }
        }
    }
}
