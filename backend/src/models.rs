pub use shared::{
    AnnotatedPoint, ApiError, AuthResponse, LoginRequest, RouteRequest, RouteResponse,
    RouteResult, SignupRequest, UserProfile, Waypoint,
};

use crate::areas::AreaRecord;

/// A routing endpoint: either a catalog area or a synthetic stand-in for an
/// unrecognised name.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRecord {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub aqi: u32,
    pub co2: u32,
}

impl EndpointRecord {
    pub fn waypoint(&self) -> Waypoint {
        Waypoint::new(self.lat, self.lng)
    }
}

impl From<&AreaRecord> for EndpointRecord {
    fn from(area: &AreaRecord) -> Self {
        Self {
            name: area.name.to_string(),
            lat: area.lat,
            lng: area.lng,
            aqi: area.aqi,
            co2: area.co2,
        }
    }
}
