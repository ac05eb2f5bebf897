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

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utils::units::{pitch_line_speed_fpm, tangential_force_lbf};

use crate::error::{GearError, Result};
use crate::gear::Gear;

pub const PITCH_LINE_SPEED_KEY: &'static str = "Pitch line speed";
pub const TANGENTIAL_FORCE_KEY: &'static str = "Tangential Force";
pub const AXIAL_LOAD_KEY: &'static str = "Axial Load";
pub const RADIAL_LOAD_KEY: &'static str = "Radial Load";

/// Tooth loads for a gear at a given speed and power.
/// Speed is in ft/min and the forces in lbf
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadCalculation {
    pub pitch_line_speed: f64,
    pub tangential_force: f64,
    pub axial_load: f64,
    pub radial_load: f64
}

impl LoadCalculation {
    pub fn for_gear(gear: &Gear) -> Result<LoadCalculation> {
        let rpm = gear.rpm().ok_or_else(|| {
            GearError::MissingOperatingCondition("gear rpm must be set to calculate loads".to_string())
        })?;
        // Takes the diametral pitch in place of the pitch diameter
        let pitch_line_speed = pitch_line_speed_fpm(gear.diametral_pitch(), rpm);
        if pitch_line_speed == 0.0 {
            return Err(GearError::Domain("division by zero calculating tangential force".to_string()));
        }
        let tangential_force = tangential_force_lbf(gear.power(), pitch_line_speed);
        let axial_load = tangential_force * gear.pressure_angle().tan();
        let radial_load = tangential_force * (gear.helix_angle().tan() / gear.pressure_angle().cos());
        debug!("Loads at {} rpm and {} hp: Wt={} Wa={} Wr={}",
               rpm, gear.power(), tangential_force, axial_load, radial_load);
        Ok(LoadCalculation { pitch_line_speed, tangential_force, axial_load, radial_load })
    }

    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            (PITCH_LINE_SPEED_KEY, self.pitch_line_speed),
            (TANGENTIAL_FORCE_KEY, self.tangential_force),
            (AXIAL_LOAD_KEY, self.axial_load),
            (RADIAL_LOAD_KEY, self.radial_load)
        ])
    }
}
