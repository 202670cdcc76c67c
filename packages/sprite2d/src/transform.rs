//! 2D affine transform math for the sprite layer.

use vek::*;


/// A 2D affine transform. Is a newtype around a matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2(pub Mat3<f32>);

impl Transform2 {
    /// Identity transform.
    pub fn identity() -> Self {
        Transform2(Mat3::identity())
    }

    /// Translate by `v`.
    pub fn translate<V: Into<Vec2<f32>>>(v: V) -> Self {
        Transform2(Mat3::translation_2d(v))
    }

    /// Component-wise scale by `v`.
    pub fn scale<V: Into<Vec2<f32>>>(v: V) -> Self {
        let v = v.into();
        Transform2(Mat3::scaling_3d([v.x, v.y, 1.0]))
    }

    /// Rotate clockwise by `f` radians.
    pub fn rotate(f: f32) -> Self {
        Transform2(Mat3::rotation_z(-f))
    }

    /// The transform a sprite draw uses: scale about the origin, rotate
    /// clockwise by `rotation` radians about `rotation_center`, then
    /// translate by `translation`.
    ///
    /// `rotation_center` coordinates are in post-scaling space.
    pub fn sprite(
        scaling: Vec2<f32>,
        rotation_center: Vec2<f32>,
        rotation: f32,
        translation: Vec2<f32>,
    ) -> Self {
        Transform2::scale(scaling)
            .then(&Transform2::translate(-rotation_center))
            .then(&Transform2::rotate(rotation))
            .then(&Transform2::translate(rotation_center))
            .then(&Transform2::translate(translation))
    }

    /// Apply this transformation to a point.
    ///
    /// This is useful for mapping from object space to screen space, eg. for
    /// rendering.
    pub fn apply<V: Into<Vec2<f32>>>(&self, v: V) -> Vec2<f32> {
        (self.0 * Vec3::from_point_2d(v)).xy()
    }

    /// The inverse transform, such that
    /// `a.inverse().unwrap().apply(a.apply(v)) == v`.
    ///
    /// This is useful for mapping from screen space back to object space, eg.
    /// for rasterization or hit testing.
    ///
    /// Returns `None` if this transformation is irreversible, which will
    /// occur in some unusual situations, such as scaling by 0.
    pub fn inverse(&self) -> Option<Transform2> {
        if self.0.determinant() != 0.0 {
            Some(Transform2(Mat3::from(Mat4::from(self.0).inverted())))
        } else {
            None
        }
    }

    /// Compose with another such that
    /// `b.apply(a.apply(v)) == a.then(&b).apply(v)`.
    pub fn then(&self, other: &Self) -> Self {
        Transform2(other.0 * self.0)
    }
}


#[cfg(test)]
fn assert_vec2_eq(a: Vec2<f32>, b: Vec2<f32>) {
    assert!(
        (a - b).magnitude() < 1e-4,
        "expected {:?}, got {:?}",
        b,
        a,
    );
}

#[test]
fn test_translate_then_scale() {
    let a = Transform2::translate([1.0, 2.0])
        .then(&Transform2::scale([2.0, 3.0]));
    assert_vec2_eq(
        a.apply([1.0, 1.0]),
        Vec2::new(4.0, 9.0),
    );
}

#[test]
fn test_inverse_round_trip() {
    let a = Transform2::scale([2.0, 0.5])
        .then(&Transform2::rotate(0.3))
        .then(&Transform2::translate([-4.0, 7.0]));
    let v = Vec2::new(3.0, -2.0);
    assert_vec2_eq(
        a.inverse().unwrap().apply(a.apply(v)),
        v,
    );
}

#[test]
fn test_degenerate_has_no_inverse() {
    assert!(Transform2::scale([0.0, 1.0]).inverse().is_none());
}

#[test]
fn test_sprite_transform_translates_and_scales() {
    let a = Transform2::sprite(
        Vec2::new(2.0, 2.0),
        Vec2::zero(),
        0.0,
        Vec2::new(10.0, 20.0),
    );
    assert_vec2_eq(
        a.apply([3.0, 4.0]),
        Vec2::new(16.0, 28.0),
    );
}

#[test]
fn test_sprite_transform_honors_rotation_about_center() {
    // quarter turn clockwise about (1, 0), then translate by (10, 0); the
    // rotation parameters are live, not inert
    let a = Transform2::sprite(
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
        std::f32::consts::FRAC_PI_2,
        Vec2::new(10.0, 0.0),
    );
    assert_vec2_eq(
        a.apply([1.0, 1.0]),
        Vec2::new(12.0, 0.0),
    );
    assert_vec2_eq(
        a.apply([1.0, 0.0]),
        Vec2::new(11.0, 0.0),
    );
}
