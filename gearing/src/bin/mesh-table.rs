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

use itertools::Itertools;
use gearing::{Gear, GearSpec};

const DEFAULT_RATIOS: [f64; 6] = [1.0, 1.5, 2.0, 3.0, 4.5, 6.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ratios: Vec<f64> = std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<f64>())
        .collect::<Result<_, _>>()?;
    let ratios = if ratios.is_empty() { DEFAULT_RATIOS.to_vec() } else { ratios };

    let pinion = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0).with_helix_angle(-20.0))?;
    println!("Pinion: {} teeth, DP {}, pitch diameter {:.3} in, {} rpm",
             pinion.teeth(),
             pinion.diametral_pitch(),
             pinion.pitch_diameter(),
             pinion.rpm().unwrap_or_default());
    println!("{}", ["target", "teeth", "actual", "pitch dia (in)", "centre (in)", "out rpm", "out torque (in.lbf)"]
        .iter()
        .join("\t"));

    for ratio in ratios {
        let mate = match pinion.mate_for_ratio(ratio) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("{}: {}", ratio, e);
                continue;
            }
        };
        let pair = pinion.mesh(&mate)?;
        let summary = match pair.summary() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}: {}", ratio, e);
                continue;
            }
        };
        let row = [
            format!("{}", ratio),
            mate.teeth().to_string(),
            format!("{:.2}", summary.ratio),
            format!("{:.3}", mate.pitch_diameter()),
            format!("{:.3}", summary.center_distance_in),
            format!("{:.1}", summary.output_speed_rpm),
            format!("{:.1}", summary.output_torque_inlbf)
        ];
        println!("{}", row.iter().join("\t"));
    }
    Ok(())
}
