//! Distance and heading helpers shared by the mob and meeple passes.
//!
//! The world is a flat plane: headings are measured in the XZ plane with
//! angle 0 facing +Z, so a facing angle `a` looks along `(sin a, cos a)`.
use bevy::math::{Vec2, Vec3};

/// Fixed position of the campfire and centre of the mob patrol rings.
pub const CAMP_CENTER: Vec3 = Vec3::ZERO;

/// Planar (XZ) offset from `from` to `to`.
pub fn planar_offset(from: Vec3, to: Vec3) -> Vec2 {
    Vec2::new(to.x - from.x, to.z - from.z)
}

/// Planar distance from the camp centre.
pub fn distance_from_camp(position: Vec3) -> f32 {
    planar_offset(CAMP_CENTER, position).length()
}

/// Unit vector pointing from the camp centre towards `position`, or `None`
/// when the position sits on the centre itself.
pub fn outward_from_camp(position: Vec3) -> Option<Vec2> {
    planar_offset(CAMP_CENTER, position).try_normalize()
}

/// Facing vector for a heading angle.
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), angle.cos())
}

/// Heading angle that faces along `direction`.
pub fn heading_angle(direction: Vec2) -> f32 {
    direction.x.atan2(direction.y)
}

/// Returns true when `target` lies inside the forward cone of an observer at
/// `origin` facing `angle`. `min_cosine` is the cosine of the half-angle.
pub fn within_vision_cone(origin: Vec3, angle: f32, target: Vec3, min_cosine: f32) -> bool {
    let Some(direction) = planar_offset(origin, target).try_normalize() else {
        return false;
    };
    heading_vector(angle).dot(direction) > min_cosine
}

/// Rejects positions carrying NaN or infinite components.
pub fn is_finite_position(position: Vec3) -> bool {
    position.is_finite()
}
