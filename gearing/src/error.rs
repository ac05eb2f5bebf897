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

use std::result;

pub type Result<T> = result::Result<T, GearError>;

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum GearError {
    #[error("invalid gear specification. `{0}`")]
    InvalidGearSpecification(String),
    #[error("inconsistent gear specification. pitch diameter given as {specified} but teeth and DP give {derived}")]
    InconsistentGearSpecification {
        specified: f64,
        derived: f64
    },
    #[error("cannot mesh gears with different DP: {0} vs {1}")]
    IncompatibleMesh(f64, f64),
    #[error("missing operating condition `{0}`")]
    MissingOperatingCondition(String),
    #[error("domain error. `{0}`")]
    Domain(String)
}

/// Divide `numerator` by `denominator`, failing with [GearError::Domain] when the
/// denominator is zero. `quantity` names what is being calculated for the error message.
pub(crate) fn checked_div(numerator: f64, denominator: f64, quantity: &str) -> Result<f64> {
    if denominator == 0.0 {
        return Err(GearError::Domain(format!("division by zero calculating {}", quantity)));
    }
    Ok(numerator / denominator)
}
