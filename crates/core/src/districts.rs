use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct District {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

// Amritsar first: it doubles as the default when no location is available.
pub const DISTRICTS: &[District] = &[
    District { name: "Amritsar", lat: 31.6340, lon: 74.8723 },
    District { name: "Barnala", lat: 30.3780, lon: 75.5461 },
    District { name: "Bathinda", lat: 30.2110, lon: 74.9455 },
    District { name: "Faridkot", lat: 30.6754, lon: 74.7543 },
    District { name: "Fatehgarh Sahib", lat: 30.6416, lon: 76.3934 },
    District { name: "Fazilka", lat: 30.4035, lon: 74.0253 },
    District { name: "Ferozepur", lat: 30.9254, lon: 74.6094 },
    District { name: "Gurdaspur", lat: 32.0404, lon: 75.4042 },
    District { name: "Hoshiarpur", lat: 31.5304, lon: 75.9099 },
    District { name: "Jalandhar", lat: 31.3260, lon: 75.5762 },
    District { name: "Kapurthala", lat: 31.3833, lon: 75.3833 },
    District { name: "Ludhiana", lat: 30.9010, lon: 75.8573 },
    District { name: "Malerkotla", lat: 30.5246, lon: 75.8906 },
    District { name: "Mansa", lat: 29.9864, lon: 75.3900 },
    District { name: "Moga", lat: 30.8033, lon: 75.1733 },
    District { name: "Pathankot", lat: 32.2684, lon: 75.6511 },
    District { name: "Patiala", lat: 30.3398, lon: 76.3869 },
    District { name: "Rupnagar", lat: 30.9667, lon: 76.5333 },
    District { name: "S.A.S. Nagar (Mohali)", lat: 30.7046, lon: 76.7179 },
    District { name: "Sangrur", lat: 30.2520, lon: 75.8431 },
    District { name: "S.B.S. Nagar (Nawanshahr)", lat: 31.1249, lon: 76.1154 },
    District { name: "Sri Muktsar Sahib", lat: 30.4756, lon: 74.5204 },
    District { name: "Tarn Taran", lat: 31.4544, lon: 74.9242 },
];

pub fn default_district() -> District {
    DISTRICTS[0]
}

pub fn nearest_district(lat: f64, lon: f64) -> District {
    let mut best = DISTRICTS[0];
    let mut best_distance = f64::MAX;

    for district in DISTRICTS {
        let d_lat = district.lat - lat;
        let d_lon = district.lon - lon;
        let distance = d_lat * d_lat + d_lon * d_lon;
        if distance < best_distance {
            best = *district;
            best_distance = distance;
        }
    }

    best
}
