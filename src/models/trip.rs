use super::hos_state::HosState;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Input to the trip feasibility simulator.
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub estimated_driving_hours: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaypointKind {
    Origin,
    Pickup,
    Rest,
    Dropoff,
}

#[derive(Debug, Clone, Serialize)]
pub struct Waypoint {
    pub kind: WaypointKind,
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub eta: NaiveDateTime,
    pub arrival_state: HosState,
}

#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub waypoints: Vec<Waypoint>,
    pub total_distance_miles: f64,
    pub estimated_driving_time: f64,
}

/// Simulator output. Infeasibility is an expected outcome, not an error:
/// `can_complete_trip = false` comes with human-readable reasons and the
/// partial route built up to the point the plan stopped.
#[derive(Debug, Clone, Serialize)]
pub struct TripPlanResult {
    pub can_complete_trip: bool,
    pub reasons: Vec<String>,
    pub route: Route,
    pub hos_status: HosState,
}
