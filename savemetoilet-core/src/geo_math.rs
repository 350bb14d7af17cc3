//! Great-circle distance and walking-time helpers.
//!
//! Coordinates follow the workspace convention: WGS84 degrees with
//! `x = longitude` and `y = latitude`.

use geo::Coord;

/// Mean Earth radius used by the Haversine formula, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Walking pace of 4.5 km/h expressed in metres per minute.
pub const WALK_METERS_PER_MINUTE: f64 = 75.0;

/// Great-circle distance between two points in metres.
///
/// The result is symmetric and zero for identical points. Inputs must be
/// finite; validating them is the caller's responsibility.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use savemetoilet_core::geo_math::distance_meters;
///
/// let city_hall = Coord { x: 126.9780, y: 37.5665 };
/// assert_eq!(distance_meters(city_hall, city_hall), 0.0);
///
/// let north = Coord { x: 126.9780, y: 37.5755 };
/// let metres = distance_meters(city_hall, north);
/// assert!((metres - 1000.7).abs() < 1.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "Haversine distance is inherently floating point"
)]
pub fn distance_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let half_dlat = (b.y - a.y).to_radians() / 2.0;
    let half_dlng = (b.x - a.x).to_radians() / 2.0;

    let h = (half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlng.sin().powi(2))
        .clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * central_angle
}

/// Estimated walking time in whole minutes at 4.5 km/h.
///
/// Distances below 37.5 m round down to zero; non-positive or non-finite
/// distances also yield zero.
///
/// # Examples
/// ```
/// use savemetoilet_core::geo_math::walk_minutes;
///
/// assert_eq!(walk_minutes(0.0), 0);
/// assert_eq!(walk_minutes(300.0), 4);
/// assert_eq!(walk_minutes(1_000.0), 13);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "walking time divides distance by pace"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite, non-negative and rounded before the cast"
)]
pub fn walk_minutes(distance_meters: f64) -> u32 {
    if !distance_meters.is_finite() || distance_meters <= 0.0 {
        return 0;
    }
    let minutes = (distance_meters / WALK_METERS_PER_MINUTE).round();
    if minutes >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        minutes as u32
    }
}
