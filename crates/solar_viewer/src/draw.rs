use bevy::prelude::*;

use crate::body::OrbitPath;
use crate::State;

const ORBIT_COLOR: Color = Color::rgba(0.6, 0.6, 0.6, 0.6);

pub fn orbits(mut lines: Gizmos, paths: Query<(&OrbitPath, &GlobalTransform)>, state: Res<State>) {
    if !state.draw_orbits {
        return;
    }

    for (path, transform) in paths.iter() {
        lines.linestrip(
            path.0.iter().map(|&point| transform.transform_point(point)),
            ORBIT_COLOR,
        );
    }
}

pub fn axis(mut lines: Gizmos, state: Res<State>) {
    if !state.draw_axis {
        return;
    }

    const ORIGIN: Vec3 = Vec3::ZERO;

    lines.line(ORIGIN, ORIGIN + state.axis_scale * Vec3::X, Color::RED);
    lines.line(ORIGIN, ORIGIN + state.axis_scale * Vec3::Y, Color::GREEN);
    lines.line(ORIGIN, ORIGIN + state.axis_scale * Vec3::Z, Color::BLUE);
}
