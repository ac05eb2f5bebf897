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

/// in·lbf·rpm per horsepower
pub const HP_TORQUE_CONSTANT: f64 = 63025.0;

/// ft·lbf/min per horsepower
pub const HP_FORCE_CONSTANT: f64 = 33000.0;

pub fn hp_to_torque_inlbf(power_hp: f64, rpm: f64) -> f64 {
    HP_TORQUE_CONSTANT * power_hp / rpm
}

/// Surface speed (ft/min) of a circle of the given diameter (inches)
pub fn pitch_line_speed_fpm(diameter_in: f64, rpm: f64) -> f64 {
    (std::f64::consts::PI * diameter_in * rpm) / 12.0
}

pub fn tangential_force_lbf(power_hp: f64, pitch_line_speed_fpm: f64) -> f64 {
    HP_FORCE_CONSTANT * (power_hp / pitch_line_speed_fpm)
}
