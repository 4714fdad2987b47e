use once_cell::sync::Lazy;
use serde::{Serialize, Serializer, ser::SerializeMap};

/// A named area of Mysore with its static environmental readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaRecord {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub aqi: u32,
    pub co2: u32,
    /// Fraction of green cover, 0 to 1.
    pub greenery: f64,
}

const fn area(
    name: &'static str,
    lat: f64,
    lng: f64,
    aqi: u32,
    co2: u32,
    greenery: f64,
) -> AreaRecord {
    AreaRecord {
        name,
        lat,
        lng,
        aqi,
        co2,
        greenery,
    }
}

/// Catalog order matters: the location resolver lets later matches win.
static AREAS: [AreaRecord; 20] = [
    area("KRS Road", 12.3040, 76.6397, 45, 120, 0.8),
    area("Chamundi Hill", 12.2726, 76.6730, 25, 80, 0.95),
    area("Mysore Palace", 12.3051, 76.6551, 85, 180, 0.4),
    area("Bannimantap", 12.2857, 76.6395, 65, 150, 0.6),
    area("Vijayanagar", 12.3352, 76.6291, 95, 200, 0.3),
    area("Hebbal", 12.3269, 76.6486, 75, 160, 0.5),
    area("Jayalakshmipuram", 12.3196, 76.6164, 55, 130, 0.7),
    area("Kuvempunagar", 12.3384, 76.6074, 70, 155, 0.55),
    area("Saraswathipuram", 12.3260, 76.6066, 60, 140, 0.65),
    area("Gokulam", 12.2900, 76.6200, 40, 110, 0.85),
    area("Airport Road", 12.2612, 76.6625, 90, 190, 0.35),
    area("Jayanagar", 12.2970, 76.6090, 62, 145, 0.63),
    area("T. Narasipura Road", 12.2850, 76.6800, 78, 165, 0.5),
    area("Lalitha Mahal", 12.2885, 76.6710, 30, 90, 0.9),
    area("Hootagalli Industrial Area", 12.3550, 76.5950, 110, 220, 0.2),
    area("Bogadi", 12.2800, 76.5900, 50, 125, 0.75),
    area("R.M. Nagar", 12.3080, 76.6000, 58, 135, 0.68),
    area("Zoo Road", 12.3045, 76.6605, 48, 122, 0.8),
    area("Yadavagiri", 12.3175, 76.6430, 80, 170, 0.45),
    area("Ring Road Junction (Columbia Asia)", 12.3395, 76.6490, 100, 210, 0.25),
];

static LOWERCASE_NAMES: Lazy<Vec<String>> =
    Lazy::new(|| AREAS.iter().map(|a| a.name.to_lowercase()).collect());

/// All areas, in catalog order.
pub fn all() -> &'static [AreaRecord] {
    &AREAS
}

/// Exact, case-sensitive lookup by name.
pub fn find(name: &str) -> Option<&'static AreaRecord> {
    AREAS.iter().find(|a| a.name == name)
}

/// Areas paired with their lowercased names, in catalog order.
pub(crate) fn with_lowercase_names() -> impl Iterator<Item = (&'static AreaRecord, &'static str)> {
    AREAS
        .iter()
        .zip(LOWERCASE_NAMES.iter().map(String::as_str))
}

/// Serializes the registry as a name-keyed object that keeps catalog order.
pub struct AreaCatalog;

impl Serialize for AreaCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AREAS.len()))?;
        for area in &AREAS {
            map.serialize_entry(area.name, area)?;
        }
        map.end()
    }
}
