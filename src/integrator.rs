//! Integración trapezoidal de magnitudes vectoriales
//!
//! Se usa dos veces en serie: aceleración → velocidad → posición. No hay
//! ninguna corrección de deriva; un sesgo constante en la aceleración crece
//! cuadráticamente en la posición.

use crate::math::Vector3;

/// Integrador trapezoidal
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Integrator {
    last: Option<Vector3>,
    total: Vector3,
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade una muestra y devuelve el total acumulado
    ///
    /// La primera muestra hace de muestra anterior de sí misma.
    pub fn update(&mut self, sample: Vector3, dt: f64) -> Vector3 {
        let last = self.last.unwrap_or(sample);
        self.total = self.total.add(sample.add(last).scale(dt / 2.0));
        self.last = Some(sample);
        self.total
    }

    pub fn total(&self) -> Vector3 {
        self.total
    }

    /// Descarta el total y la muestra anterior
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Dos integradores encadenados: aceleración → velocidad → posición
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DoubleIntegrator {
    velocity: Integrator,
    position: Integrator,
}

impl DoubleIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve `(velocidad, posición)` tras integrar la aceleración
    pub fn update(&mut self, accel: Vector3, dt: f64) -> (Vector3, Vector3) {
        let velocity = self.velocity.update(accel, dt);
        let position = self.position.update(velocity, dt);
        (velocity, position)
    }

    pub fn velocity(&self) -> Vector3 {
        self.velocity.total()
    }

    pub fn position(&self) -> Vector3 {
        self.position.total()
    }

    pub fn reset(&mut self) {
        self.velocity.reset();
        self.position.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_input() {
        let mut integrator = Integrator::new();
        for _ in 0..50 {
            assert_eq!(integrator.update(Vector3::ZERO, 0.01), Vector3::ZERO);
        }
    }

    #[test]
    fn test_constant_input() {
        let a = Vector3::new(1.5, -2.0, 0.25);
        let dt = 0.005;
        let n = 400;
        let mut integrator = Integrator::new();
        for _ in 0..n {
            integrator.update(a, dt);
        }
        let expected = a.scale(n as f64 * dt);
        assert!(integrator.total().sub(expected).length() < 1e-12);
    }

    #[test]
    fn test_trapezoid_uses_previous_sample() {
        let mut integrator = Integrator::new();
        integrator.update(Vector3::new(2.0, 0.0, 0.0), 1.0);
        let total = integrator.update(Vector3::new(4.0, 0.0, 0.0), 1.0);
        // 2 (primera muestra) + (2 + 4) / 2
        assert_eq!(total.x, 5.0);
    }

    #[test]
    fn test_double_integration_of_constant_acceleration() {
        let a = Vector3::new(0.0, 0.0, 2.0);
        let dt = 0.005;
        let n = 1000;
        let mut chain = DoubleIntegrator::new();
        for _ in 0..n {
            chain.update(a, dt);
        }
        let t = n as f64 * dt;
        let expected = 0.5 * a.z * t * t;
        // Error de discretización: a·dt²/2
        assert!((chain.position().z - expected).abs() <= 0.5 * a.z * dt * dt + 1e-9);
        assert!((chain.velocity().z - a.z * t).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_seed() {
        let mut integrator = Integrator::new();
        integrator.update(Vector3::new(100.0, 0.0, 0.0), 1.0);
        integrator.reset();
        let total = integrator.update(Vector3::new(1.0, 0.0, 0.0), 1.0);
        assert_eq!(total.x, 1.0);
    }
}
