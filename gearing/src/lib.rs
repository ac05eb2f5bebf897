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

//! Spur and helical gear geometry in diametral pitch units, meshing of
//! gear pairs and the resulting speeds, torques and tooth loads.

pub mod error;
pub mod gear;
pub mod load;
pub mod pair;

pub use error::{GearError, Result};
pub use gear::{Gear, GearSpec};
pub use load::LoadCalculation;
pub use pair::{GearPair, MeshSummary};
