//! Navegación inercial: orientación, compensación de gravedad y doble integración

use crate::fusion::OrientationEstimator;
use crate::integrator::DoubleIntegrator;
use crate::math::{Quaternion, Vector3};
use crate::types::gravity::GRAVITY_MSS;
use crate::types::{AccelFullScale, GyroFullScale};

/// Cuentas crudas por debajo de las cuales el giroscopio se considera quieto
pub const GYRO_DEADZONE_COUNTS: f64 = 2.0;
/// Cuentas crudas por debajo de las cuales la aceleración lineal se anula
pub const ACCEL_DEADZONE_COUNTS: f64 = 8.0;

/// Configuración del pipeline de navegación
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigatorConfig {
    /// Umbral por eje del giroscopio (°/s); 0 lo desactiva
    pub gyro_deadzone: f64,
    /// Umbral por eje de la aceleración lineal en el mundo (m/s²); 0 lo desactiva
    pub accel_deadzone: f64,
    /// Gravedad restada en el marco del mundo
    pub gravity: Vector3,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            gyro_deadzone: 0.0,
            accel_deadzone: 0.0,
            gravity: Vector3::new(0.0, 0.0, GRAVITY_MSS),
        }
    }
}

impl NavigatorConfig {
    /// Umbrales de 2 cuentas (giroscopio) y 8 cuentas (acelerómetro) para las escalas dadas
    pub fn with_range_deadzones(mut self, accel: AccelFullScale, gyro: GyroFullScale) -> Self {
        self.accel_deadzone = ACCEL_DEADZONE_COUNTS * accel.scale_factor();
        self.gyro_deadzone = GYRO_DEADZONE_COUNTS * gyro.scale_factor();
        self
    }

    pub fn with_gyro_deadzone(mut self, deadzone: f64) -> Self {
        self.gyro_deadzone = deadzone;
        self
    }

    pub fn with_accel_deadzone(mut self, deadzone: f64) -> Self {
        self.accel_deadzone = deadzone;
        self
    }

    pub fn with_gravity(mut self, gravity: Vector3) -> Self {
        self.gravity = gravity;
        self
    }
}

/// Resultado de un ciclo de navegación
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavigationSample {
    /// Orientación cuerpo → mundo
    pub orientation: Quaternion,
    /// Aceleración lineal en el marco del mundo, sin gravedad (m/s²)
    pub linear_accel: Vector3,
    /// Velocidad (m/s)
    pub velocity: Vector3,
    /// Posición (m)
    pub position: Vector3,
    /// Paso de tiempo usado (s)
    pub dt: f64,
}

/// Orientación seguida de doble integración de la aceleración lineal
pub struct Navigator<E> {
    estimator: E,
    integrator: DoubleIntegrator,
    config: NavigatorConfig,
}

impl<E: OrientationEstimator> Navigator<E> {
    pub fn new(estimator: E, config: NavigatorConfig) -> Self {
        Self {
            estimator,
            integrator: DoubleIntegrator::new(),
            config,
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Procesa una muestra corregida (m/s², °/s)
    pub fn update(&mut self, accel: Vector3, gyro: Vector3, dt: f64) -> NavigationSample {
        let gyro = gyro.deadzone(self.config.gyro_deadzone);
        let orientation = self.estimator.update(gyro, accel, dt);

        let linear_accel = self
            .estimator
            .to_world(accel)
            .sub(self.config.gravity)
            .deadzone(self.config.accel_deadzone);

        let (velocity, position) = self.integrator.update(linear_accel, dt);

        log::trace!(
            "a = {:?}, v = {:?}, p = {:?}",
            linear_accel,
            velocity,
            position
        );

        NavigationSample {
            orientation,
            linear_accel,
            velocity,
            position,
            dt,
        }
    }

    /// Reinicia orientación, velocidad y posición para una nueva ejecución
    pub fn reset(&mut self) {
        self.estimator.reset();
        self.integrator.reset();
    }

    /// Devuelve el estimador
    pub fn into_estimator(self) -> E {
        self.estimator
    }
}
