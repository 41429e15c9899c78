use crate::constants::DEG_TO_RAD;
use crate::{Num, Quat, Vec2, Vec3};

pub fn deg2rad(deg: Num) -> Num {
    deg * DEG_TO_RAD
}

/// Fraction of a (signed) period covered after `elapsed`.
///
/// A zero period marks a body that does not move, so the phase stays at zero.
pub fn phase(elapsed: Num, period: Num) -> Num {
    if period == 0.0 {
        0.0
    } else {
        elapsed / period
    }
}

/// Lifts a point of the orbital plane into 3D.
///
/// The major axis maps to +X and the minor axis to -Z, so a counter-clockwise
/// orbit in the plane is counter-clockwise seen from +Y.
pub fn plane2space(Vec2 { x, y }: Vec2) -> Vec3 {
    Vec3::new(x, 0.0, -y)
}

/// Tilt of an orbital plane about its major axis
pub fn orbital_tilt(inclination_deg: Num) -> Quat {
    Quat::from_rotation_x(deg2rad(inclination_deg))
}

/// Tilt of a spin axis
pub fn axial_tilt(inclination_deg: Num) -> Quat {
    Quat::from_rotation_z(deg2rad(inclination_deg))
}
