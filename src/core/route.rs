//! Route skeleton for the trip planner.
//!
//! Not a router: just enough geometry to label waypoints, estimate the
//! total distance, and place the pickup at a sensible driving-hours offset
//! between the two legs. Locations outside the known-city table fall back
//! to an even leg split and a speed-times-hours distance.

/// Rough coordinates for common freight cities; lookup is by the first
/// comma-separated token, case-insensitive ("Atlanta, GA" → "atlanta").
const CITY_COORDS: &[(&str, f64, f64, &str)] = &[
    ("atlanta", 33.7490, -84.3880, "Atlanta, GA"),
    ("charlotte", 35.2271, -80.8431, "Charlotte, NC"),
    ("richmond", 37.5407, -77.4360, "Richmond, VA"),
    ("miami", 25.7617, -80.1918, "Miami, FL"),
    ("nashville", 36.1627, -86.7816, "Nashville, TN"),
    ("jacksonville", 30.3322, -81.6557, "Jacksonville, FL"),
    ("savannah", 32.0835, -81.0998, "Savannah, GA"),
    ("tampa", 27.9506, -82.4572, "Tampa, FL"),
    ("macon", 32.8407, -83.6324, "Macon, GA"),
];

#[derive(Debug, Clone)]
pub struct Place {
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RouteSkeleton {
    pub origin: Place,
    pub pickup: Place,
    pub dropoff: Place,
    pub total_distance_miles: f64,
    /// Driving hours from origin to the pickup stop.
    pub pickup_offset_hours: f64,
}

fn lookup(location: &str) -> Place {
    let key = location
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    for (city, lat, lng, label) in CITY_COORDS {
        if *city == key {
            return Place {
                name: (*label).to_string(),
                lat: Some(*lat),
                lng: Some(*lng),
            };
        }
    }

    Place {
        name: location.to_string(),
        lat: None,
        lng: None,
    }
}

/// Straight-line distance approximation: 1 degree ≈ 69 miles.
fn distance(a: &Place, b: &Place) -> Option<f64> {
    match (a.lat, a.lng, b.lat, b.lng) {
        (Some(alat), Some(alng), Some(blat), Some(blng)) => {
            let dlat = alat - blat;
            let dlng = alng - blng;
            Some((dlat * dlat + dlng * dlng).sqrt() * 69.0)
        }
        _ => None,
    }
}

pub fn build_skeleton(
    current_location: &str,
    pickup_location: &str,
    dropoff_location: &str,
    estimated_driving_hours: f64,
    avg_speed_mph: f64,
) -> RouteSkeleton {
    let origin = lookup(current_location);
    let pickup = lookup(pickup_location);
    let dropoff = lookup(dropoff_location);

    let leg1 = distance(&origin, &pickup);
    let leg2 = distance(&pickup, &dropoff);

    let (total, fraction) = match (leg1, leg2) {
        (Some(d1), Some(d2)) if d1 + d2 > 0.0 => (d1 + d2, d1 / (d1 + d2)),
        _ => (estimated_driving_hours * avg_speed_mph, 0.5),
    };

    RouteSkeleton {
        origin,
        pickup,
        dropoff,
        total_distance_miles: (total * 10.0).round() / 10.0,
        pickup_offset_hours: estimated_driving_hours * fraction,
    }
}
