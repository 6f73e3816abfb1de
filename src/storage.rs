//! Persistencia de los offsets de calibración en JSON

use crate::calibration::CalibrationOffset;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Nombre de fichero por defecto
pub const DEFAULT_FILE_NAME: &str = "mpu6050config.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("error de E/S con {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// El fichero existe pero no contiene una calibración válida
    #[error("fichero de calibración inválido {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no se pudo serializar la calibración: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Almacén de calibración en un fichero JSON
///
/// Formato: `{"accelOffset":{"x":..,"y":..,"z":..},"gyroOffset":{..}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationStore {
    path: PathBuf,
}

impl Default for CalibrationStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl CalibrationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Carga la calibración; `Ok(None)` si el fichero no existe
    pub fn load(&self) -> Result<Option<CalibrationOffset>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Sin calibración guardada en {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let offsets = serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Calibración cargada de {}", self.path.display());
        Ok(Some(offsets))
    }

    /// Guarda la calibración, sobrescribiendo el fichero
    pub fn save(&self, offsets: &CalibrationOffset) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(offsets)?;
        fs::write(&self.path, json).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Calibración guardada en {}", self.path.display());
        Ok(())
    }
}
