use num_traits::Float;
use std::fmt::{self, Display, Formatter};
use std::ops::*;

/// Represents a vector in 3D space, using the host's axes: y is vertical, north is -z.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
pub struct Vector<T> {
    /// The x component of the vector.
    pub x: T,
    /// The y component of the vector.
    pub y: T,
    /// The z component of the vector.
    pub z: T,
}

impl Vector<f32> {
    /// Returns the zero vector.
    pub const fn zero() -> Self {
        Vector {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl Vector<f64> {
    /// Returns the zero vector.
    pub const fn zero() -> Self {
        Vector {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl<T: Float> Vector<T> {
    /// Creates a vector using rectangular coordinates.
    pub fn rect(x: T, y: T, z: T) -> Self {
        Vector { x, y, z }
    }

    /// Computes the squared length of this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use modbase_util::Vector;
    /// let u = Vector::<f64>::rect(3.0, 4.0, 12.0);
    /// assert!((u.len_sq() - 169.0).abs() < 1e-10);
    /// ```
    pub fn len_sq(&self) -> T {
        self.dot(self)
    }

    /// Computes the length of this vector.
    pub fn len(&self) -> T {
        self.len_sq().sqrt()
    }

    /// Computes the dot product between this vector and the given vector.
    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Display> Display for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}

impl<T: Add<Output = T> + Copy> Add for Vector<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl<T: Sub<Output = T> + Copy> Sub for Vector<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}
