//! Sensor descriptors and the prefused-object (plot) builder.

use serde::{Deserialize, Serialize};

use crate::config::FusionConfig;
use crate::kalman::{state, N};
use crate::radar;

/// The number of sensor-type slots `seenThisCycle` is sized for.
///
/// Kept distinct from `SensorType`'s variant count on purpose: the sighting
/// array is indexed by [`SensorType::as_index`], not by sensor instance, so
/// several physical sensors of the same type share one slot. This mirrors a
/// known quirk of the system this crate's lifecycle rules are drawn from,
/// preserved here rather than "fixed."
pub const NUM_SENSOR_SLOTS: usize = 4;

/// The class of a sensor. Only radar exists today; the type is kept as an
/// enum (not collapsed to a unit) because a second sensor class is an
/// obvious next step for a multi-modal fusion core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Radar,
}

impl SensorType {
    /// Index into the `seenThisCycle` sighting array.
    pub fn as_index(self) -> usize {
        match self {
            SensorType::Radar => 0,
        }
    }
}

/// A sensor's transform into the vehicle frame and field-of-view geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorTransform {
    /// Global X offset applied to measurements from this sensor (meters).
    pub can_x: f32,
    /// Global Y offset, assumed already applied upstream of this core.
    pub can_y: f32,
    /// Sensor position X in the vehicle frame (meters), for bearing confidence.
    pub x: f32,
    /// Sensor position Y in the vehicle frame (meters).
    pub y: f32,
    /// Sensor boresight direction relative to the vehicle's forward axis (degrees).
    pub mounting: f32,
    /// Full field-of-view width (degrees).
    pub fov: f32,
}

/// A sensor descriptor: static after engine init.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub sensor_type: SensorType,
    pub transform: SensorTransform,
}

/// A single measurement: mean `z`, diagonal covariance `r_diag`, and a
/// bearing-derived trust weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plot {
    /// Measurement mean `(x, y, vx, vy)`, already in the vehicle frame.
    pub z: [f32; N],
    /// Diagonal entries of the measurement covariance `R`.
    pub r_diag: [f32; N],
    /// Trust weight in `[min_bearing_confidence, max_bearing_confidence]`.
    pub weight: f32,
}

/// Priority of a candidate object: higher for closer objects, chosen so it
/// stays non-negative for any in-range object.
pub fn object_priority(pos_x: f32, pos_y: f32) -> f32 {
    FusionConfig::MAX_PRIORITY - radar::range(pos_x, pos_y)
}

/// Confidence weight derived from how close the target's bearing (relative
/// to the sensor) is to the sensor's weak field-of-view edge.
fn bearing_confidence(target_x: f32, target_y: f32, sensor: &Sensor, config: &FusionConfig) -> f32 {
    let sensor_x = target_x - sensor.transform.x;
    let sensor_y = target_y - sensor.transform.y;

    let max_bearing = sensor.transform.fov / 2.0;
    let weak_bearing = max_bearing - config.sensor_weak_bearing_area;
    let target_bearing =
        (radar::bearing(sensor_x, sensor_y).to_degrees() - sensor.transform.mounting).abs();

    if (0.0..=weak_bearing).contains(&target_bearing) {
        config.max_bearing_confidence
    } else if target_bearing > weak_bearing && target_bearing <= max_bearing {
        radar::lin_interpolate(
            target_bearing,
            weak_bearing,
            max_bearing,
            config.max_bearing_confidence,
            config.min_bearing_confidence,
        )
    } else {
        config.min_bearing_confidence
    }
}

/// Builds a plot from a raw `(sensor, posX, posY, velX, velY)` reading.
/// Returns `None` when any component is non-finite — the one place external
/// input is validated before entering the core.
pub fn build_plot(
    config: &FusionConfig,
    sensor: &Sensor,
    pos_x: f32,
    pos_y: f32,
    vel_x: f32,
    vel_y: f32,
) -> Option<Plot> {
    if ![pos_x, pos_y, vel_x, vel_y].iter().all(|v| v.is_finite()) {
        return None;
    }

    let mut z = [0.0f32; N];
    z[state::X] = pos_x + sensor.transform.can_x;
    z[state::Y] = pos_y + sensor.transform.can_y;
    z[state::VX] = vel_x;
    z[state::VY] = vel_y;

    let var_range = config.sigma_range * config.sigma_range;
    let var_doppler = config.sigma_doppler * config.sigma_doppler;
    let var_bearing = config.sigma_bearing.to_radians() * config.sigma_bearing.to_radians();
    let var_base = config.sigma_base * config.sigma_base;

    let mut r_diag = [0.0f32; N];
    r_diag[state::X] = radar::var_x(z[state::X], z[state::Y], var_range, var_bearing, var_base);
    r_diag[state::Y] = radar::var_y(z[state::X], z[state::Y], var_range, var_bearing, var_base);
    r_diag[state::VX] = var_doppler;
    r_diag[state::VY] = var_doppler;

    let weight = bearing_confidence(z[state::X], z[state::Y], sensor, config);

    Some(Plot { z, r_diag, weight })
}
