//! Vector tridimensional en doble precisión

use serde::{Deserialize, Serialize};

/// Vector 3D `[x, y, z]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Vector nulo
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    /// Eje X unitario
    pub const X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    /// Eje Y unitario
    pub const Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    /// Eje Z unitario
    pub const Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Construye un vector a partir de un array `[x, y, z]`
    pub const fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Multiplica cada componente por un escalar
    pub fn scale(self, factor: f64) -> Vector3 {
        Vector3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn dot(self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Devuelve el vector unitario, o `None` si la longitud es nula
    pub fn normalized(self) -> Option<Vector3> {
        let len = self.length();
        if len > 0.0 {
            Some(self.scale(1.0 / len))
        } else {
            None
        }
    }

    /// Aplica `f` a cada componente
    pub fn map<F: Fn(f64) -> f64>(self, f: F) -> Vector3 {
        Vector3::new(f(self.x), f(self.y), f(self.z))
    }

    /// Pone a cero las componentes cuyo valor absoluto es menor que `threshold`
    pub fn deadzone(self, threshold: f64) -> Vector3 {
        self.map(|v| if v.abs() < threshold { 0.0 } else { v })
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Vector3::from_array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_follows_right_hand_rule() {
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(Vector3::Z), Vector3::X);
        assert_eq!(Vector3::Z.cross(Vector3::X), Vector3::Y);
    }

    #[test]
    fn test_deadzone() {
        let v = Vector3::new(0.01, -0.5, -0.009).deadzone(0.01);
        assert_eq!(v, Vector3::new(0.01, -0.5, 0.0));
    }

    #[test]
    fn test_normalized_zero() {
        assert!(Vector3::ZERO.normalized().is_none());
        let n = Vector3::new(3.0, 0.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
    }
}
