//! Closed-form ellipse geometry for a body orbiting at one focus.
//!
//! Everything here is derived once from `(semi_major_axis, eccentricity,
//! inclination)` and never changes afterwards. The orbital plane has the
//! major axis along +X with the orbited body at the origin, which is the
//! ellipse focus; the ellipse center therefore sits at `+focus_offset` on X.

use crate::constants::{DEFAULT_ORBIT_SEGMENTS, PI, TWO_PI};
use crate::error::OrbitError;
use crate::math::eccentric_anomaly;
use crate::utils::{orbital_tilt, plane2space};
use crate::{vec2, Num, Quat, Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipseParams {
    pub eccentricity: Num,
    pub semi_major: Num,
    pub semi_minor: Num,
    /// Distance from the ellipse center to the focus holding the parent body
    pub focus_offset: Num,
}

impl EllipseParams {
    /// Scaled ellipse axes for the given elements.
    ///
    /// `b = a * sqrt(1 - e^2)` and `c = a * e`, so a circle (`e = 0`) needs no
    /// special casing.
    pub fn new(semi_major_axis: Num, eccentricity: Num, scale: Num) -> Result<Self, OrbitError> {
        if semi_major_axis.is_nan() || semi_major_axis <= 0.0 {
            return Err(OrbitError::NonPositiveSemiMajorAxis(semi_major_axis));
        }

        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitError::EccentricityOutOfRange(eccentricity));
        }

        let a = semi_major_axis * scale;
        let e = eccentricity;

        if !a.is_finite() || a <= 0.0 {
            return Err(OrbitError::NonPositiveScale(scale));
        }

        Ok(Self {
            eccentricity: e,
            semi_major: a,
            semi_minor: a * (1.0 - e.powi(2)).sqrt(),
            focus_offset: a * e,
        })
    }

    /// Closest approach to the focus
    pub fn periapsis(&self) -> Num {
        self.semi_major - self.focus_offset
    }

    /// Farthest distance from the focus
    pub fn apoapsis(&self) -> Num {
        self.semi_major + self.focus_offset
    }

    /// Point at parametric angle `t`, relative to the ellipse center
    #[inline]
    pub fn centered_point(&self, t: Num) -> Vec2 {
        vec2(self.semi_major * t.cos(), self.semi_minor * t.sin())
    }

    /// Point at parametric angle `t`, relative to the focus
    #[inline]
    pub fn focal_point(&self, t: Num) -> Vec2 {
        self.centered_point(t) + vec2(self.focus_offset, 0.0)
    }
}

/// Orbit path of one body, ready to be drawn as a line loop.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCurve {
    params: EllipseParams,
    inclination: Num,
    tilt: Quat,
}

impl OrbitCurve {
    /// `inclination` is in degrees.
    pub fn new(
        semi_major_axis: Num,
        eccentricity: Num,
        inclination: Num,
        scale: Num,
    ) -> Result<Self, OrbitError> {
        let params = EllipseParams::new(semi_major_axis, eccentricity, scale)?;

        Ok(Self {
            params,
            inclination,
            tilt: orbital_tilt(inclination),
        })
    }

    pub fn params(&self) -> &EllipseParams {
        &self.params
    }

    /// Orbital inclination in degrees
    pub fn inclination(&self) -> Num {
        self.inclination
    }

    /// Rotation taking the orbital plane into the reference frame
    pub fn tilt(&self) -> Quat {
        self.tilt
    }

    /// Samples the curve in its own plane, relative to the focus.
    ///
    /// Yields `segments + 1` points covering `[0, 2π]`, so the last point
    /// repeats the first and the loop is closed.
    pub fn points(&self, segments: usize) -> EllipsePoints {
        EllipsePoints {
            params: self.params,
            segments: segments.max(1),
            next: 0,
        }
    }

    /// Same as [`Self::points`] with the default resolution
    pub fn default_points(&self) -> EllipsePoints {
        self.points(DEFAULT_ORBIT_SEGMENTS)
    }

    /// Samples the curve in the reference frame, inclination applied
    pub fn space_points(&self, segments: usize) -> impl Iterator<Item = Vec3> + Clone + '_ {
        self.points(segments).map(|p| self.to_space(p))
    }

    /// Lifts a point of the orbital plane into the tilted reference frame
    pub fn to_space(&self, point: Vec2) -> Vec3 {
        self.tilt * plane2space(point)
    }

    /// Parametric angle of the body at the given mean anomaly.
    ///
    /// The parametrisation starts at apoapsis (`t = 0` lies on +X, away from
    /// the focus) while the eccentric anomaly counts from periapsis, so
    /// `t = π - E`.
    pub fn parametric_angle(&self, mean_anomaly: Num, tolerance: Num) -> Num {
        let e = self.params.eccentricity;

        PI - eccentric_anomaly(mean_anomaly, e, tolerance)
    }

    /// Position in the orbital plane, relative to the focus, at the given mean
    /// anomaly (radians).
    pub fn position_at(&self, mean_anomaly: Num, tolerance: Num) -> Vec2 {
        self.params
            .focal_point(self.parametric_angle(mean_anomaly, tolerance))
    }
}

/// Lazily evaluated samples along an ellipse.
///
/// Finite; call [`OrbitCurve::points`] again to start over.
#[derive(Debug, Clone)]
pub struct EllipsePoints {
    params: EllipseParams,
    segments: usize,
    next: usize,
}

impl Iterator for EllipsePoints {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.next > self.segments {
            return None;
        }

        let t = if self.next == self.segments {
            // Land exactly on the starting point
            0.0
        } else {
            TWO_PI * self.next as Num / self.segments as Num
        };

        self.next += 1;

        Some(self.params.focal_point(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.segments + 1 - self.next.min(self.segments + 1);

        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EllipsePoints {}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::vec3;

    const EPS: Num = 1e-3;

    #[test]
    fn half_eccentric_orbit() {
        let params = EllipseParams::new(1.0, 0.5, 1000.0).unwrap();

        assert!((params.semi_major - 1000.0).abs() < EPS);
        assert!((params.semi_minor - 866.025).abs() < 0.01);
        assert!((params.focus_offset - 500.0).abs() < EPS);
    }

    #[test]
    fn circle_has_no_focus_offset() {
        let params = EllipseParams::new(2.0, 0.0, 1500.0).unwrap();

        assert_eq!(params.semi_minor, params.semi_major);
        assert_eq!(params.focus_offset, 0.0);
    }

    #[test_case(1.0, 0.0)]
    #[test_case(0.3871, 0.2056)]
    #[test_case(1.5237, 0.0934)]
    #[test_case(30.0685, 0.0097)]
    #[test_case(5.0, 0.99)]
    fn minor_never_exceeds_major(a: Num, e: Num) {
        let params = EllipseParams::new(a, e, 1500.0).unwrap();

        assert!(params.semi_minor <= params.semi_major);
        // c^2 = a^2 - b^2
        let c = (params.semi_major.powi(2) - params.semi_minor.powi(2)).sqrt();
        assert!((c - params.focus_offset).abs() / params.semi_major < 1e-3);
    }

    #[test_case(0.0, 0.1 => OrbitError::NonPositiveSemiMajorAxis(0.0); "zero axis")]
    #[test_case(-1.0, 0.1 => OrbitError::NonPositiveSemiMajorAxis(-1.0); "negative axis")]
    #[test_case(1.0, 1.0 => OrbitError::EccentricityOutOfRange(1.0); "parabolic")]
    #[test_case(1.0, -0.1 => OrbitError::EccentricityOutOfRange(-0.1); "negative eccentricity")]
    fn rejects_open_orbits(a: Num, e: Num) -> OrbitError {
        EllipseParams::new(a, e, 1.0).unwrap_err()
    }

    #[test]
    fn nan_axis_is_rejected() {
        assert!(EllipseParams::new(Num::NAN, 0.1, 1.0).is_err());
    }

    #[test_case(0.0; "zero")]
    #[test_case(-1500.0; "negative")]
    #[test_case(Num::NAN; "nan")]
    #[test_case(Num::INFINITY; "infinite")]
    fn rejects_degenerate_scale(scale: Num) {
        let err = EllipseParams::new(1.0, 0.5, scale).unwrap_err();

        assert!(matches!(err, OrbitError::NonPositiveScale(_)));
    }

    #[test]
    fn eccentricity_is_kept_as_given() {
        let params = EllipseParams::new(1.0, 0.0549, 200.0).unwrap();

        assert_eq!(params.eccentricity, 0.0549);
    }

    #[test]
    fn curve_loop_is_closed() {
        let curve = OrbitCurve::new(1.0, 0.2056, 7.0, 1500.0).unwrap();
        let points: Vec<_> = curve.default_points().collect();

        assert_eq!(points.len(), DEFAULT_ORBIT_SEGMENTS + 1);

        let first = points.first().unwrap();
        let last = points.last().unwrap();
        assert!(first.distance(*last) < EPS);
    }

    #[test]
    fn points_are_restartable() {
        let curve = OrbitCurve::new(1.0, 0.1, 0.0, 100.0).unwrap();

        let a: Vec<_> = curve.points(16).collect();
        let b: Vec<_> = curve.points(16).collect();

        assert_eq!(a, b);
        assert_eq!(curve.points(16).len(), 17);
    }

    #[test]
    fn focus_sits_at_origin() {
        let curve = OrbitCurve::new(1.0, 0.5, 0.0, 1000.0).unwrap();
        let params = curve.params();

        // Start of the parametrisation is apoapsis, the half way point periapsis
        let apo = params.focal_point(0.0);
        let peri = params.focal_point(PI);

        assert!((apo.length() - params.apoapsis()).abs() < EPS);
        assert!((peri.length() - params.periapsis()).abs() < EPS);
    }

    #[test]
    fn every_sample_satisfies_focal_sum() {
        let curve = OrbitCurve::new(1.0, 0.5, 0.0, 1000.0).unwrap();
        let params = *curve.params();
        let other_focus = vec2(2.0 * params.focus_offset, 0.0);

        for p in curve.points(32) {
            let sum = p.length() + p.distance(other_focus);
            assert!((sum - 2.0 * params.semi_major).abs() < 0.01);
        }
    }

    #[test]
    fn inclination_tilts_about_major_axis() {
        let curve = OrbitCurve::new(1.0, 0.0, 90.0, 10.0).unwrap();
        let points: Vec<_> = curve.space_points(4).collect();

        // t = 0 lies on the major axis and is not moved by the tilt
        assert!(points[0].distance(vec3(10.0, 0.0, 0.0)) < EPS);
        // t = pi/2 is lifted out of the XZ plane onto the Y axis
        assert!(points[1].x.abs() < EPS);
        assert!((points[1].y.abs() - 10.0).abs() < EPS);
        assert!(points[1].z.abs() < EPS);
    }

    #[test]
    fn live_position_starts_at_periapsis() {
        let curve = OrbitCurve::new(1.0, 0.5, 0.0, 1000.0).unwrap();

        let p = curve.position_at(0.0, 1e-6);
        assert!((p.length() - curve.params().periapsis()).abs() < 0.01);

        let p = curve.position_at(PI, 1e-6);
        assert!((p.length() - curve.params().apoapsis()).abs() < 0.01);
    }

    #[test]
    fn live_position_stays_on_curve() {
        let curve = OrbitCurve::new(1.0, 0.3, 0.0, 100.0).unwrap();
        let params = *curve.params();
        let other_focus = vec2(2.0 * params.focus_offset, 0.0);

        for i in 0..12 {
            let p = curve.position_at(i as Num * 0.7, 1e-6);
            let sum = p.length() + p.distance(other_focus);
            assert!((sum - 2.0 * params.semi_major).abs() < 0.01);
        }
    }
}
