use crate::Vector;
use std::fmt::{self, Display, Formatter};

type Matrix = [[f64; 3]; 3];

const IDENTITY: Matrix = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

// (cos, sin) for each quarter turn, kept exact so that composed turns compare equal
const QUARTER_TURNS: [(f64, f64); 4] = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];

/// A rigid transform mapping a block's local model space into world space: a rotation followed by
/// a translation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    rotation: Matrix,
    offset: Vector<f64>,
}

impl Transform {
    /// The identity transform anchored at the world origin.
    pub const fn identity() -> Self {
        Transform {
            rotation: IDENTITY,
            offset: Vector::<f64>::zero(),
        }
    }

    /// An identity rotation translated to the given origin.
    ///
    /// # Examples
    ///
    /// ```
    /// # use modbase_util::{Transform, Vector};
    /// let t = Transform::at(Vector::rect(10.5, 64.5, -3.5));
    /// assert_eq!(t.apply(Vector::rect(0.0, 1.0, 0.0)), Vector::rect(10.5, 65.5, -3.5));
    /// ```
    pub const fn at(origin: Vector<f64>) -> Self {
        Transform {
            rotation: IDENTITY,
            offset: origin,
        }
    }

    /// Returns this transform with an additional rotation of `quarter_turns` * 90 degrees about the
    /// local vertical axis, applied before the existing rotation. Positive turns carry +z onto +x.
    pub fn turned(self, quarter_turns: i32) -> Self {
        let (cos, sin) = QUARTER_TURNS[quarter_turns.rem_euclid(4) as usize];
        let turn: Matrix = [[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]];

        let mut rotation = [[0.0; 3]; 3];
        for (i, row) in rotation.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0 .. 3).map(|k| self.rotation[i][k] * turn[k][j]).sum();
            }
        }

        Transform {
            rotation,
            offset: self.offset,
        }
    }

    /// Rotates the given vector without translating it.
    pub fn rotate(&self, v: Vector<f64>) -> Vector<f64> {
        let r = &self.rotation;
        Vector {
            x: r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            y: r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            z: r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        }
    }

    /// Maps a point in local space to world space.
    pub fn apply(&self, p: Vector<f64>) -> Vector<f64> {
        self.rotate(p) + self.offset
    }

    /// The translation part of this transform.
    #[inline]
    pub fn offset(&self) -> Vector<f64> {
        self.offset
    }

    /// Returns whether the rotation part is the identity.
    pub fn is_identity_rotation(&self) -> bool {
        self.rotation == IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Transform[rotation: {:?}, offset: {}]", self.rotation, self.offset)
    }
}
