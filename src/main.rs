/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of gear-crane.
 *
 * gear-crane is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * gear-crane is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with gear-crane. If not, see <https://www.gnu.org/licenses/>.
 */



mod settings;

use std::env;
use tracing_subscriber;
use tracing_appender;
use tracing::{error, info};

use gearing::{Gear, GearError};
use crate::settings::MeshSettings;


#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("gear error. `{0}`")]
    GearError(#[from] GearError),
    #[error("settings error. `{0}`")]
    SettingsError(#[from] config::ConfigError),
    #[error("json encoding error")]
    JsonError(#[from] serde_json::Error)
}

fn init_logging() {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "gear_crane.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }
}

fn main() -> Result<(), AppError> {
    init_logging();

    let settings = MeshSettings::load()?;
    let driving = Gear::new(settings.driving().clone())?;
    let mut driven = Gear::new(settings.driven().clone())?;
    info!("Driving gear: {} teeth, DP {}, {:.3} in pitch diameter",
          driving.teeth(), driving.diametral_pitch(), driving.pitch_diameter());
    info!("Driven gear: {} teeth, DP {}, {:.3} in pitch diameter",
          driven.teeth(), driven.diametral_pitch(), driven.pitch_diameter());

    let stage = match &driving * &driven {
        Ok(stage) => stage,
        Err(e) => {
            error!("Failed to mesh gears. {}", e.to_string());
            return Err(e.into());
        }
    };
    println!("{}", serde_json::to_string_pretty(&stage.summary()?.as_map())?);
    println!("{}", serde_json::to_string_pretty(&driven.load_calculation()?.as_map())?);
    Ok(())
}
