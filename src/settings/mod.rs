use std::fs;
use std::path::Path;
use config::{Config, ConfigBuilder, ConfigError, FileFormat, Source};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use gearing::GearSpec;

/// The pair of gears the application meshes. `driving` turns `driven`
///
/// The built in defaults cover geometry and power only. A gear whose `rpm`
/// key is missing from the settings file has no rpm.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MeshSettings {
    driving: GearSpec,
    driven: GearSpec
}

impl Default for MeshSettings {
    fn default() -> Self {
        MeshSettings {
            driving: GearSpec::from_teeth_and_pitch(20, 6.0).with_helix_angle(-20.0),
            driven: GearSpec::from_teeth_and_pitch(120, 6.0)
                .with_helix_angle(20.0)
                .with_rpm(Some(2000.0))
                .with_power(20.0)
        }
    }
}

impl MeshSettings {
    const DRIVING_TEETH: &'static str = "driving.teeth";
    const DRIVING_DIAMETRAL_PITCH: &'static str = "driving.diametral_pitch";
    const DRIVING_HELIX_ANGLE: &'static str = "driving.helix_angle_deg";
    const DRIVEN_TEETH: &'static str = "driven.teeth";
    const DRIVEN_DIAMETRAL_PITCH: &'static str = "driven.diametral_pitch";
    const DRIVEN_HELIX_ANGLE: &'static str = "driven.helix_angle_deg";
    const DRIVEN_POWER: &'static str = "driven.power";
    const CONFIG_FILENAME: &'static str = "gear-crane-conf";
    const ENV_PREFIX: &'static str = "GEARCRANE";


    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default(MeshSettings::DRIVING_TEETH, 20i64)?
            .set_default(MeshSettings::DRIVING_DIAMETRAL_PITCH, 6.0)?
            .set_default(MeshSettings::DRIVING_HELIX_ANGLE, -20.0)?
            .set_default(MeshSettings::DRIVEN_TEETH, 120i64)?
            .set_default(MeshSettings::DRIVEN_DIAMETRAL_PITCH, 6.0)?
            .set_default(MeshSettings::DRIVEN_HELIX_ANGLE, 20.0)?
            .set_default(MeshSettings::DRIVEN_POWER, 20.0)
    }

    pub fn load() -> Result<Self, ConfigError> {
        let config_file_path = MeshSettings::config_file_path();
        if !Path::new(&config_file_path).exists() {
            MeshSettings::default().write().unwrap_or_else(|e| { error!("Failed to write settings. {}", e.to_string())});
        }
        if Path::new(&config_file_path).exists() {
            return MeshSettings::load_with(config::File::with_name(MeshSettings::CONFIG_FILENAME));
        }
        let default_toml = MeshSettings::default().to_toml_string().map_err(|e| {
            ConfigError::Foreign(Box::new(e))
        })?;
        MeshSettings::load_with(config::File::from_str(&default_toml, FileFormat::Toml))
    }

    /// Load settings from the defaults overlaid with `source` and then the environment.
    /// Falls back to [MeshSettings::default] if that fails
    pub fn load_with<T>(source: T) -> Result<Self, ConfigError>
        where T: Source + Send + Sync + 'static
    {
        return match MeshSettings::builder_with_defaults()?
            .add_source(source)
            .add_source(config::Environment::with_prefix(MeshSettings::ENV_PREFIX)
                .separator("__")
                .try_parsing(true))
            .build() {
            Ok(settings) => {
                settings.try_deserialize()
            }
            Err(e) => {
                warn!("Failed to load settings. {}", e.to_string());
                Ok(MeshSettings::default())
            }
        }
    }

    pub fn driving(&self) -> &GearSpec {
        &self.driving
    }

    pub fn set_driving(&mut self, spec: GearSpec) {
        self.driving = spec;
    }

    pub fn driven(&self) -> &GearSpec {
        &self.driven
    }

    pub fn set_driven(&mut self, spec: GearSpec) {
        self.driven = spec;
    }

    fn config_file_path() -> String {
        format!("{}.toml", MeshSettings::CONFIG_FILENAME)
    }

    pub fn to_toml_string(&self) -> std::io::Result<String> {
        toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })
    }

    pub fn write(&self) -> std::io::Result<()> {
        fs::write(MeshSettings::config_file_path(), self.to_toml_string()?)
    }
}
