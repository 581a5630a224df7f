//! Geo-distance utilities
//!
//! Distances are great-circle miles from the Haversine formula, rounded to
//! one decimal place.

/// Mean Earth radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Miles per degree of latitude (and of longitude at the equator)
pub const MILES_PER_DEGREE: f64 = 69.0;

const FEET_PER_MILE: f64 = 5280.0;

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Anything that may carry a location (opportunities, organizations, members)
pub trait Locatable {
    /// The item's location, if known
    fn location(&self) -> Option<Coordinates>;
}

impl Locatable for Coordinates {
    fn location(&self) -> Option<Coordinates> {
        Some(*self)
    }
}

impl<T: Locatable> Locatable for &T {
    fn location(&self) -> Option<Coordinates> {
        (*self).location()
    }
}

/// An item found by [`find_nearby`] together with its distance
#[derive(Debug, Clone, PartialEq)]
pub struct Nearby<T> {
    /// The matching item
    pub item: T,
    /// Distance from the search center in miles
    pub distance_miles: f64,
}

/// Coarse latitude/longitude box around a center point
///
/// A pre-filter only: it is not exact near the poles or across the
/// antimeridian, so callers still check [`is_within_radius`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge
    pub min_lat: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Western edge
    pub min_lng: f64,
    /// Eastern edge
    pub max_lng: f64,
}

impl BoundingBox {
    /// Whether the point falls inside the box (edges inclusive)
    pub fn contains(&self, point: Coordinates) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }
}

/// Great-circle distance between two points in miles, rounded to 0.1
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_to(EARTH_RADIUS_MILES * c, 1)
}

/// Whether `point` lies within `radius_miles` of `center`
pub fn is_within_radius(center: Coordinates, point: Coordinates, radius_miles: f64) -> bool {
    distance(center, point) <= radius_miles
}

/// Items within the radius, nearest first
///
/// Items without a location are skipped. Equal distances keep their input
/// order.
pub fn find_nearby<T: Locatable>(
    items: impl IntoIterator<Item = T>,
    center: Coordinates,
    radius_miles: f64,
) -> Vec<Nearby<T>> {
    let mut found: Vec<Nearby<T>> = items
        .into_iter()
        .filter_map(|item| {
            let location = item.location()?;
            let distance_miles = distance(center, location);
            (distance_miles <= radius_miles).then_some(Nearby { item, distance_miles })
        })
        .collect();

    // sort_by is stable
    found.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    found
}

/// Approximate box enclosing the circle of `radius_miles` around `center`
pub fn bounding_box(center: Coordinates, radius_miles: f64) -> BoundingBox {
    let lat_delta = radius_miles / MILES_PER_DEGREE;
    let lng_delta = radius_miles / (MILES_PER_DEGREE * center.lat.to_radians().cos());

    BoundingBox {
        min_lat: center.lat - lat_delta,
        max_lat: center.lat + lat_delta,
        min_lng: center.lng - lng_delta,
        max_lng: center.lng + lng_delta,
    }
}

/// Human-readable distance
///
/// - below 0.1 mi: `"< 0.1 mi"`
/// - below 1 mi: whole feet, e.g. `"528 ft"`
/// - below 100 mi: one decimal, e.g. `"12.3 mi"`
/// - otherwise whole miles, e.g. `"250 mi"`
pub fn format_distance(miles: f64) -> String {
    if miles < 0.1 {
        "< 0.1 mi".to_string()
    } else if miles < 1.0 {
        format!("{} ft", (miles * FEET_PER_MILE).round())
    } else if miles < 100.0 {
        format!("{:.1} mi", miles)
    } else {
        format!("{} mi", miles.round())
    }
}

/// Round half away from zero to `decimals` places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINNEAPOLIS: Coordinates = Coordinates { lat: 44.98, lng: -93.27 };
    const ST_PAUL: Coordinates = Coordinates { lat: 44.95, lng: -93.09 };
    const DULUTH: Coordinates = Coordinates { lat: 46.79, lng: -92.10 };

    struct Site {
        name: &'static str,
        location: Option<Coordinates>,
    }

    impl Locatable for Site {
        fn location(&self) -> Option<Coordinates> {
            self.location
        }
    }

    #[test]
    fn test_distance_known_pair() {
        // Minneapolis to St. Paul is roughly 9 miles
        let d = distance(MINNEAPOLIS, ST_PAUL);
        assert!(d > 8.5 && d < 9.5, "got {}", d);
    }

    #[test]
    fn test_distance_rounded_to_tenth() {
        let d = distance(MINNEAPOLIS, DULUTH);
        assert_eq!(d, (d * 10.0).round() / 10.0);
    }

    #[test]
    fn test_distance_same_point() {
        assert_eq!(distance(MINNEAPOLIS, MINNEAPOLIS), 0.0);
    }

    #[test]
    fn test_is_within_radius() {
        assert!(is_within_radius(MINNEAPOLIS, ST_PAUL, 15.0));
        assert!(!is_within_radius(MINNEAPOLIS, DULUTH, 50.0));
    }

    #[test]
    fn test_find_nearby_filters_and_sorts() {
        let sites = vec![
            Site { name: "duluth", location: Some(DULUTH) },
            Site { name: "unknown", location: None },
            Site { name: "st-paul", location: Some(ST_PAUL) },
            Site { name: "downtown", location: Some(MINNEAPOLIS) },
        ];

        let found = find_nearby(&sites, MINNEAPOLIS, 25.0);
        let names: Vec<_> = found.iter().map(|n| n.item.name).collect();
        assert_eq!(names, vec!["downtown", "st-paul"]);
        assert_eq!(found[0].distance_miles, 0.0);
    }

    #[test]
    fn test_find_nearby_stable_on_ties() {
        let sites = vec![
            Site { name: "first", location: Some(ST_PAUL) },
            Site { name: "second", location: Some(ST_PAUL) },
        ];

        let found = find_nearby(&sites, MINNEAPOLIS, 25.0);
        let names: Vec<_> = found.iter().map(|n| n.item.name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = bounding_box(Coordinates::new(0.0, 0.0), 69.0);
        assert!((bbox.max_lat - 1.0).abs() < 1e-9);
        assert!((bbox.min_lng + 1.0).abs() < 1e-9);
        assert!(bbox.contains(Coordinates::new(0.5, -0.5)));
        assert!(!bbox.contains(Coordinates::new(1.5, 0.0)));
    }

    #[test]
    fn test_bounding_box_widens_with_latitude() {
        let equator = bounding_box(Coordinates::new(0.0, 0.0), 10.0);
        let north = bounding_box(Coordinates::new(60.0, 0.0), 10.0);
        assert!(north.max_lng - north.min_lng > equator.max_lng - equator.min_lng);
    }

    #[test]
    fn test_format_distance_thresholds() {
        assert_eq!(format_distance(0.05), "< 0.1 mi");
        assert_eq!(format_distance(0.1), "528 ft");
        assert_eq!(format_distance(0.5), "2640 ft");
        assert_eq!(format_distance(1.0), "1.0 mi");
        assert_eq!(format_distance(12.34), "12.3 mi");
        assert_eq!(format_distance(99.9), "99.9 mi");
        assert_eq!(format_distance(100.0), "100 mi");
        assert_eq!(format_distance(250.6), "251 mi");
    }
}
