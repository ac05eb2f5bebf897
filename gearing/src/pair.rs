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
use utils::numeric::round_half_even_to;
use utils::units::hp_to_torque_inlbf;

use crate::error::{checked_div, GearError, Result};
use crate::gear::Gear;

pub const RATIO_KEY: &'static str = "ratio";
pub const CENTER_DISTANCE_KEY: &'static str = "center_distance_in";
pub const OUTPUT_SPEED_KEY: &'static str = "output_speed_rpm";
pub const OUTPUT_TORQUE_KEY: &'static str = "output_torque_inlbf";

/// Two meshed gears. `pinion` drives `gear`.
///
/// The input speed and power are taken from the pinion when the pair is made
/// and don't follow later changes to it. Everything else is worked out from
/// the current state of the two gears each time it's asked for.
#[derive(Clone, Debug, PartialEq)]
pub struct GearPair {
    pinion: Gear,
    gear: Gear,
    input_speed: f64,
    input_power: f64
}

impl GearPair {
    /// Pair two gears without the DP check [Gear::mesh] makes
    pub fn new(pinion: Gear, gear: Gear) -> Result<GearPair> {
        let input_speed = pinion.rpm().ok_or_else(|| {
            GearError::MissingOperatingCondition("pinion rpm must be set before pairing".to_string())
        })?;
        let input_power = pinion.power();
        debug!("Paired {} tooth pinion with {} tooth gear at {} rpm, {} hp",
               pinion.teeth(), gear.teeth(), input_speed, input_power);
        Ok(GearPair { pinion, gear, input_speed, input_power })
    }

    pub fn pinion(&self) -> &Gear {
        &self.pinion
    }

    pub fn pinion_mut(&mut self) -> &mut Gear {
        &mut self.pinion
    }

    pub fn gear(&self) -> &Gear {
        &self.gear
    }

    pub fn gear_mut(&mut self) -> &mut Gear {
        &mut self.gear
    }

    pub fn into_gears(self) -> (Gear, Gear) {
        (self.pinion, self.gear)
    }

    pub fn input_speed(&self) -> f64 {
        self.input_speed
    }

    pub fn input_power(&self) -> f64 {
        self.input_power
    }

    /// Driven teeth / driving teeth
    pub fn ratio(&self) -> Result<f64> {
        checked_div(self.gear.teeth() as f64, self.pinion.teeth() as f64, "gear ratio")
    }

    /// Centre distance in inches
    pub fn center_distance(&self) -> f64 {
        0.5 * (self.pinion.pitch_diameter() + self.gear.pitch_diameter())
    }

    /// Input torque in in·lbf
    pub fn input_torque(&self) -> Result<f64> {
        if self.input_speed == 0.0 {
            return Err(GearError::Domain("division by zero calculating input torque".to_string()));
        }
        Ok(hp_to_torque_inlbf(self.input_power, self.input_speed))
    }

    pub fn output_speed(&self) -> Result<f64> {
        checked_div(self.input_speed, self.ratio()?, "output speed")
    }

    /// Output torque in in·lbf. Losses aren't modelled
    pub fn output_torque(&self) -> Result<f64> {
        Ok(self.input_torque()? * self.ratio()?)
    }

    pub fn summary(&self) -> Result<MeshSummary> {
        Ok(MeshSummary {
            ratio: round_half_even_to(self.ratio()?, 2),
            center_distance_in: round_half_even_to(self.center_distance(), 3),
            output_speed_rpm: round_half_even_to(self.output_speed()?, 1),
            output_torque_inlbf: round_half_even_to(self.output_torque()?, 1)
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub ratio: f64,
    pub center_distance_in: f64,
    pub output_speed_rpm: f64,
    pub output_torque_inlbf: f64
}

impl MeshSummary {
    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            (RATIO_KEY, self.ratio),
            (CENTER_DISTANCE_KEY, self.center_distance_in),
            (OUTPUT_SPEED_KEY, self.output_speed_rpm),
            (OUTPUT_TORQUE_KEY, self.output_torque_inlbf)
        ])
    }
}
