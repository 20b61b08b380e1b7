//! Core data types for sonar georeferencing

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::constants::D2R;

/// Timestamped geodetic position (WGS84 latitude/longitude in degrees,
/// ellipsoidal height in meters).
///
/// The sine/cosine of latitude and longitude are cached and recomputed only
/// when the underlying angle is mutated, since downstream georeferencing
/// evaluates them for every sounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Microseconds since the Unix epoch
    timestamp: u64,
    vector: Vector3<f64>,
    sin_lat: f64,
    cos_lat: f64,
    sin_lon: f64,
    cos_lon: f64,
}

impl Position {
    pub fn new(timestamp: u64, latitude: f64, longitude: f64, ellipsoidal_height: f64) -> Self {
        Self {
            timestamp,
            vector: Vector3::new(latitude, longitude, ellipsoidal_height),
            sin_lat: (latitude * D2R).sin(),
            cos_lat: (latitude * D2R).cos(),
            sin_lon: (longitude * D2R).sin(),
            cos_lon: (longitude * D2R).cos(),
        }
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    pub fn latitude(&self) -> f64 {
        self.vector.x
    }

    pub fn set_latitude(&mut self, latitude: f64) {
        self.vector.x = latitude;
        self.sin_lat = (latitude * D2R).sin();
        self.cos_lat = (latitude * D2R).cos();
    }

    pub fn longitude(&self) -> f64 {
        self.vector.y
    }

    pub fn set_longitude(&mut self, longitude: f64) {
        self.vector.y = longitude;
        self.sin_lon = (longitude * D2R).sin();
        self.cos_lon = (longitude * D2R).cos();
    }

    pub fn ellipsoidal_height(&self) -> f64 {
        self.vector.z
    }

    pub fn set_ellipsoidal_height(&mut self, height: f64) {
        self.vector.z = height;
    }

    /// Cached sine of the latitude
    pub fn sin_lat(&self) -> f64 {
        self.sin_lat
    }

    /// Cached cosine of the latitude
    pub fn cos_lat(&self) -> f64 {
        self.cos_lat
    }

    /// Cached sine of the longitude
    pub fn sin_lon(&self) -> f64 {
        self.sin_lon
    }

    /// Cached cosine of the longitude
    pub fn cos_lon(&self) -> f64 {
        self.cos_lon
    }

    /// Position as a (latitude, longitude, height) vector
    pub fn vector(&self) -> &Vector3<f64> {
        &self.vector
    }
}

/// Raw sidescan return for one channel.
///
/// All sample types are boiled down to `f64` regardless of the recording
/// format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidescanPing {
    pub samples: Vec<f64>,
    /// Across-track distance covered by one sample (meters)
    pub distance_per_sample: f64,
    pub channel_number: i32,
}

impl SidescanPing {
    pub fn new(samples: Vec<f64>, distance_per_sample: f64, channel_number: i32) -> Self {
        Self {
            samples,
            distance_per_sample,
            channel_number,
        }
    }
}

/// Read-only accessor contract for the ping observation consumed by a ray
/// trace. Concrete implementations may back these fields with records,
/// packets, or query results; the tracer never mutates them.
pub trait SonarPing {
    /// Beam steering angle in the along-track plane (degrees)
    fn along_track_angle(&self) -> f64;
    /// Beam steering angle in the across-track plane (degrees)
    fn across_track_angle(&self) -> f64;
    /// Measured round-trip travel time (seconds)
    fn two_way_travel_time(&self) -> f64;
    /// Sound speed measured at the transducer face (m/s)
    fn surface_sound_speed(&self) -> f64;
    /// Transducer depth below the surface (meters, positive down)
    fn transducer_depth(&self) -> f64;
}

/// Plain value-type ping observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingObservation {
    pub along_track_angle: f64,
    pub across_track_angle: f64,
    pub two_way_travel_time: f64,
    pub surface_sound_speed: f64,
    pub transducer_depth: f64,
}

impl SonarPing for PingObservation {
    fn along_track_angle(&self) -> f64 {
        self.along_track_angle
    }

    fn across_track_angle(&self) -> f64 {
        self.across_track_angle
    }

    fn two_way_travel_time(&self) -> f64 {
        self.two_way_travel_time
    }

    fn surface_sound_speed(&self) -> f64 {
        self.surface_sound_speed
    }

    fn transducer_depth(&self) -> f64 {
        self.transducer_depth
    }
}
