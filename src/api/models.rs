use serde::{Deserialize, Serialize};

use crate::geodesy::{DirectSolution, GeoPoint, InverseSolution};

#[derive(Debug, Serialize, Deserialize)]
pub struct InverseRequest {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
}

impl InverseRequest {
    pub fn start(&self) -> GeoPoint {
        GeoPoint::new(self.from_lat, self.from_lon)
    }

    pub fn end(&self) -> GeoPoint {
        GeoPoint::new(self.to_lat, self.to_lon)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InverseResponse {
    pub distance: f64,
    pub initial_bearing: f64,
    pub final_bearing: f64,
    pub reverse_bearing: f64,
    pub iterations: u32,
    pub converged: bool,
    pub execution_time_ms: f64,
}

impl InverseResponse {
    pub fn new(solution: &InverseSolution, execution_time_ms: f64) -> Self {
        Self {
            distance: solution.distance,
            initial_bearing: solution.initial_bearing,
            final_bearing: solution.final_bearing,
            reverse_bearing: solution.reverse_bearing(),
            iterations: solution.iterations,
            converged: solution.converged,
            execution_time_ms,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DirectRequest {
    pub lat: f64,
    pub lon: f64,
    /// Initial bearing in degrees
    pub bearing: f64,
    /// Distance in the unit of the configured ellipsoid
    pub distance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DirectResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub final_bearing: f64,
    pub iterations: u32,
    pub converged: bool,
    pub execution_time_ms: f64,
}

impl DirectResponse {
    pub fn new(solution: &DirectSolution, execution_time_ms: f64) -> Self {
        Self {
            latitude: solution.destination.latitude,
            longitude: solution.destination.longitude,
            final_bearing: solution.final_bearing,
            iterations: solution.iterations,
            converged: solution.converged,
            execution_time_ms,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
