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

/// Round to the nearest integer with ties going to the even neighbour
/// i.e. 20.5 -> 20 and 21.5 -> 22
pub fn round_half_even(float: f64) -> f64 {
    float.round_ties_even()
}

/// Round to the given number of decimal places.
///
/// The exact binary value is rounded, so 378.15 (stored as 378.1499...) goes to 378.1.
/// Exact ties go to the even digit.
pub fn round_half_even_to(float: f64, decimal_places: u32) -> f64 {
    format!("{:.*}", decimal_places as usize, float).parse::<f64>().unwrap_or(float)
}
