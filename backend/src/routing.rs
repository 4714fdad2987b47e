use crate::areas;
use crate::error::RouteError;
use crate::models::{AnnotatedPoint, EndpointRecord, RouteRequest, RouteResult, Waypoint};

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Fixed detour penalty applied to the eco route's straight-line distance.
const ECO_DETOUR_FACTOR: f64 = 1.15;

/// Which end of a route a free-text location names. Each end has its own
/// fallback point when nothing in the catalog matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Origin,
    Destination,
}

impl EndpointRole {
    fn fallback(self, name: &str) -> EndpointRecord {
        let (lat, lng, aqi, co2) = match self {
            Self::Origin => (12.2958, 76.6394, 60, 140),
            Self::Destination => (12.3051, 76.6551, 70, 150),
        };
        EndpointRecord {
            name: name.to_string(),
            lat,
            lng,
            aqi,
            co2,
        }
    }
}

/// Great-circle distance in kilometres between two points given in degrees.
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    haversine_km(Waypoint::new(lat1, lng1), Waypoint::new(lat2, lng2))
}

pub fn haversine_km(a: Waypoint, b: Waypoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlng = (dlng / 2.0).sin();

    // Rounding can push h a hair past 1 for antipodal points.
    let h = (sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng).min(1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Resolves free text against the area catalog by case-insensitive substring
/// containment of the area name in the text. When several areas match, the
/// last one in catalog order wins.
pub fn resolve_location(text: &str, role: EndpointRole) -> EndpointRecord {
    let needle = text.to_lowercase();
    let mut matched = None;
    for (area, lowered) in areas::with_lowercase_names() {
        if needle.contains(lowered) {
            matched = Some(area);
        }
    }

    match matched {
        Some(area) => EndpointRecord::from(area),
        None => {
            tracing::debug!("no catalog area in {text:?}, using {role:?} fallback");
            role.fallback(text)
        }
    }
}

/// Validates and resolves both ends of a route request.
pub fn resolve_endpoints(
    req: &RouteRequest,
) -> Result<(EndpointRecord, EndpointRecord), RouteError> {
    let from = req.from.as_deref().map(str::trim).unwrap_or_default();
    let to = req.to.as_deref().map(str::trim).unwrap_or_default();
    if from.is_empty() || to.is_empty() {
        return Err(RouteError::MissingEndpoints);
    }

    Ok((
        resolve_location(from, EndpointRole::Origin),
        resolve_location(to, EndpointRole::Destination),
    ))
}

/// Straight three-segment path. Its severity figures are fixed illustrative
/// values and do not depend on the endpoints' own readings.
pub fn generate_shortest_route(from: &EndpointRecord, to: &EndpointRecord) -> RouteResult {
    let start = from.waypoint();
    let end = to.waypoint();
    let lat_step = (end.lat - start.lat) / 3.0;
    let lng_step = (end.lng - start.lng) / 3.0;

    let first = Waypoint::new(start.lat + lat_step, start.lng + lng_step);
    let second = Waypoint::new(start.lat + 2.0 * lat_step, start.lng + 2.0 * lng_step);

    RouteResult {
        coordinates: vec![start, first, second, end],
        distance: round_km(haversine_km(start, end)),
        avg_aqi: 95,
        avg_co2: 195,
        eco_score: 45,
        annotated_points: vec![
            AnnotatedPoint {
                coordinates: first,
                aqi: 95,
                co2: 200,
            },
            AnnotatedPoint {
                coordinates: second,
                aqi: 105,
                co2: 210,
            },
        ],
    }
}

/// Curved four-segment path, with latitude and longitude advancing at
/// different rates. Distance is the straight line plus a flat 15% detour.
pub fn generate_eco_route(from: &EndpointRecord, to: &EndpointRecord) -> RouteResult {
    let start = from.waypoint();
    let end = to.waypoint();

    let bend_a = start.offset(end, 0.2, 0.3);
    let bend_b = start.offset(end, 0.4, 0.5);
    let bend_c = start.offset(end, 0.7, 0.8);

    RouteResult {
        coordinates: vec![start, bend_a, bend_b, bend_c, end],
        distance: round_km(haversine_km(start, end) * ECO_DETOUR_FACTOR),
        avg_aqi: 48,
        avg_co2: 115,
        eco_score: 82,
        annotated_points: vec![
            AnnotatedPoint {
                coordinates: bend_b,
                aqi: 35,
                co2: 95,
            },
            AnnotatedPoint {
                coordinates: bend_c,
                aqi: 42,
                co2: 105,
            },
        ],
    }
}

/// Resolves a request and synthesizes the `(shortest, eco)` pair.
pub fn plan_routes(req: &RouteRequest) -> Result<(RouteResult, RouteResult), RouteError> {
    let (from, to) = resolve_endpoints(req)?;
    tracing::info!("routing {} -> {}", from.name, to.name);
    Ok((
        generate_shortest_route(&from, &to),
        generate_eco_route(&from, &to),
    ))
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
