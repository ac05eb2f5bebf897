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

use std::ops::Mul;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utils::numeric::round_half_even;

use crate::error::{GearError, Result};
use crate::load::LoadCalculation;
use crate::pair::GearPair;


pub const DEFAULT_HELIX_ANGLE_DEG: f64 = 15.0;
pub const DEFAULT_PRESSURE_ANGLE_DEG: f64 = 20.0;
pub const DEFAULT_RPM: f64 = 100.0;
pub const DEFAULT_POWER_HP: f64 = 10.0;

/// The inputs a [Gear] is built from.
///
/// At least two of `teeth`, `diametral_pitch` and `pitch_diameter` must be given;
/// the missing one is derived when the gear is built. Angles are in degrees,
/// `pitch_diameter` in inches and `power` in horsepower.
///
/// [GearSpec::default] runs at 100 rpm. When deserialized, a missing `rpm`
/// key leaves the rpm unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GearSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teeth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diametral_pitch: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_diameter: Option<f64>,
    #[serde(default = "default_helix_angle")]
    pub helix_angle_deg: f64,
    #[serde(default = "default_pressure_angle")]
    pub pressure_angle_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm: Option<f64>,
    #[serde(default = "default_power")]
    pub power: f64
}

fn default_helix_angle() -> f64 {
    DEFAULT_HELIX_ANGLE_DEG
}

fn default_pressure_angle() -> f64 {
    DEFAULT_PRESSURE_ANGLE_DEG
}

fn default_power() -> f64 {
    DEFAULT_POWER_HP
}

impl Default for GearSpec {
    fn default() -> Self {
        GearSpec {
            teeth: None,
            diametral_pitch: None,
            pitch_diameter: None,
            helix_angle_deg: DEFAULT_HELIX_ANGLE_DEG,
            pressure_angle_deg: DEFAULT_PRESSURE_ANGLE_DEG,
            rpm: Some(DEFAULT_RPM),
            power: DEFAULT_POWER_HP
        }
    }
}

impl GearSpec {
    pub fn from_teeth_and_pitch(teeth: u32, diametral_pitch: f64) -> GearSpec {
        GearSpec { teeth: Some(teeth), diametral_pitch: Some(diametral_pitch), ..GearSpec::default() }
    }

    pub fn from_teeth_and_diameter(teeth: u32, pitch_diameter: f64) -> GearSpec {
        GearSpec { teeth: Some(teeth), pitch_diameter: Some(pitch_diameter), ..GearSpec::default() }
    }

    pub fn from_pitch_and_diameter(diametral_pitch: f64, pitch_diameter: f64) -> GearSpec {
        GearSpec {
            diametral_pitch: Some(diametral_pitch),
            pitch_diameter: Some(pitch_diameter),
            ..GearSpec::default()
        }
    }

    pub fn with_helix_angle(mut self, degrees: f64) -> GearSpec {
        self.helix_angle_deg = degrees;
        self
    }

    pub fn with_pressure_angle(mut self, degrees: f64) -> GearSpec {
        self.pressure_angle_deg = degrees;
        self
    }

    pub fn with_rpm(mut self, rpm: Option<f64>) -> GearSpec {
        self.rpm = rpm;
        self
    }

    pub fn with_power(mut self, power_hp: f64) -> GearSpec {
        self.power = power_hp;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.teeth == Some(0) {
            return Err(GearError::InvalidGearSpecification("teeth must be greater than zero".to_string()));
        }
        for (name, value) in [("diametral pitch", self.diametral_pitch), ("pitch diameter", self.pitch_diameter)] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(GearError::InvalidGearSpecification(
                        format!("{} must be a positive number, got {}", name, v)
                    ));
                }
            }
        }
        if !self.helix_angle_deg.is_finite() || self.helix_angle_deg.abs() >= 90.0 {
            return Err(GearError::InvalidGearSpecification(
                format!("helix angle must be between -90 and 90 degrees, got {}", self.helix_angle_deg)
            ));
        }
        if !self.pressure_angle_deg.is_finite() {
            return Err(GearError::InvalidGearSpecification(
                format!("pressure angle must be a finite number, got {}", self.pressure_angle_deg)
            ));
        }
        Ok(())
    }
}

/// A spur or helical gear defined in diametral pitch (imperial) units.
///
/// Geometry is fixed once built. The operating conditions (`rpm` and `power`)
/// can be changed through their setters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Gear {
    teeth: u32,
    diametral_pitch: f64,
    specified_pitch_diameter: f64,
    helix_angle: f64,
    pressure_angle: f64,
    rpm: Option<f64>,
    power: f64,
    #[serde(skip)]
    last_load: Option<LoadCalculation>
}

impl Gear {
    pub fn new(spec: GearSpec) -> Result<Gear> {
        spec.validate()?;
        let helix_angle = spec.helix_angle_deg.to_radians();
        let pressure_angle = spec.pressure_angle_deg.to_radians();
        let cos_helix = helix_angle.cos();

        // No cross-check is made when all three are given. See Gear::new_checked
        let (teeth, diametral_pitch, specified_pitch_diameter) =
            match (spec.teeth, spec.diametral_pitch, spec.pitch_diameter) {
                (Some(teeth), Some(dp), Some(diameter)) => (teeth, dp, diameter),
                (Some(teeth), Some(dp), None) => {
                    let diameter = teeth as f64 / (dp * cos_helix);
                    debug!("Derived pitch diameter {} from {} teeth and DP {}", diameter, teeth, dp);
                    (teeth, dp, diameter)
                }
                (Some(teeth), None, Some(diameter)) => {
                    let dp = teeth as f64 / (diameter * cos_helix);
                    debug!("Derived DP {} from {} teeth and pitch diameter {}", dp, teeth, diameter);
                    (teeth, dp, diameter)
                }
                (None, Some(dp), Some(diameter)) => {
                    let teeth = rounded_teeth(diameter * dp * cos_helix).ok_or_else(|| {
                        GearError::InvalidGearSpecification(
                            format!("DP {} and pitch diameter {} give too many teeth", dp, diameter)
                        )
                    })?;
                    debug!("Derived {} teeth from DP {} and pitch diameter {}", teeth, dp, diameter);
                    (teeth, dp, diameter)
                }
                _ => {
                    return Err(GearError::InvalidGearSpecification(
                        "provide at least two of teeth, diametral pitch and pitch diameter".to_string()
                    ));
                }
            };

        Ok(Gear {
            teeth,
            diametral_pitch,
            specified_pitch_diameter,
            helix_angle,
            pressure_angle,
            rpm: spec.rpm,
            power: spec.power,
            last_load: None
        })
    }

    /// Build a gear as [Gear::new] does but, when teeth, DP and pitch diameter are
    /// all given, reject them if the given pitch diameter is more than `tolerance`
    /// inches away from the one teeth and DP imply.
    pub fn new_checked(spec: GearSpec, tolerance: f64) -> Result<Gear> {
        let fully_specified =
            spec.teeth.is_some() && spec.diametral_pitch.is_some() && spec.pitch_diameter.is_some();
        let gear = Gear::new(spec)?;
        if fully_specified {
            let derived = gear.pitch_diameter();
            if (gear.specified_pitch_diameter - derived).abs() > tolerance {
                return Err(GearError::InconsistentGearSpecification {
                    specified: gear.specified_pitch_diameter,
                    derived
                });
            }
        }
        Ok(gear)
    }

    pub fn teeth(&self) -> u32 {
        self.teeth
    }

    pub fn diametral_pitch(&self) -> f64 {
        self.diametral_pitch
    }

    /// Pitch diameter (inches) calculated from the current teeth, DP and helix angle
    pub fn pitch_diameter(&self) -> f64 {
        self.teeth as f64 / (self.diametral_pitch * self.helix_angle.cos())
    }

    /// Pitch diameter (inches) as it was given or derived when the gear was built
    pub fn specified_pitch_diameter(&self) -> f64 {
        self.specified_pitch_diameter
    }

    /// Helix angle in radians. The sign gives the hand of the helix
    pub fn helix_angle(&self) -> f64 {
        self.helix_angle
    }

    /// Pressure angle in radians
    pub fn pressure_angle(&self) -> f64 {
        self.pressure_angle
    }

    pub fn helix_angle_degrees(&self) -> f64 {
        self.helix_angle.to_degrees()
    }

    pub fn pressure_angle_degrees(&self) -> f64 {
        self.pressure_angle.to_degrees()
    }

    pub fn rpm(&self) -> Option<f64> {
        self.rpm
    }

    pub fn set_rpm(&mut self, rpm: Option<f64>) {
        self.rpm = rpm
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn set_power(&mut self, power_hp: f64) {
        self.power = power_hp
    }

    /// The result of the most recent [Gear::load_calculation] call, if any
    pub fn last_load(&self) -> Option<&LoadCalculation> {
        self.last_load.as_ref()
    }

    /// Create a gear that meshes with this one at the given ratio
    /// (mate teeth / this gear's teeth).
    ///
    /// The mate shares this gear's DP, helix and pressure angles but gets the
    /// default rpm and power rather than copying them.
    pub fn mate_for_ratio(&self, ratio: f64) -> Result<Gear> {
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(GearError::Domain(format!("ratio must be a non-negative number, got {}", ratio)));
        }
        let teeth = rounded_teeth(self.teeth as f64 * ratio).ok_or_else(|| {
            GearError::Domain(format!("ratio {} gives too many teeth for a {} tooth gear", ratio, self.teeth))
        })?;
        Gear::new(GearSpec::from_teeth_and_pitch(teeth, self.diametral_pitch)
            .with_helix_angle(self.helix_angle_degrees())
            .with_pressure_angle(self.pressure_angle_degrees()))
    }

    /// Calculate the tooth loads at the gear's current rpm and power and
    /// keep the result (see [Gear::last_load])
    pub fn load_calculation(&mut self) -> Result<LoadCalculation> {
        let load = LoadCalculation::for_gear(self)?;
        self.last_load = Some(load);
        Ok(load)
    }

    /// Pair this gear (driving) with `driven`.
    ///
    /// Both gears must share exactly the same DP and this gear must have an rpm.
    /// Neither gear is modified; the driven side speed is available from
    /// [GearPair::output_speed].
    pub fn mesh(&self, driven: &Gear) -> Result<GearPair> {
        self.check_can_drive(driven)?;
        GearPair::new(self.clone(), driven.clone())
    }

    /// Consuming version of [Gear::mesh]
    pub fn mesh_into(self, driven: Gear) -> Result<GearPair> {
        self.check_can_drive(&driven)?;
        GearPair::new(self, driven)
    }

    fn check_can_drive(&self, driven: &Gear) -> Result<()> {
        if self.diametral_pitch != driven.diametral_pitch {
            warn!("Refusing to mesh gears with DP {} and {}", self.diametral_pitch, driven.diametral_pitch);
            return Err(GearError::IncompatibleMesh(self.diametral_pitch, driven.diametral_pitch));
        }
        if self.rpm.is_none() {
            warn!("Refusing to mesh from a driving gear with no rpm");
            return Err(GearError::MissingOperatingCondition(
                "driving gear rpm must be set before pairing".to_string()
            ));
        }
        Ok(())
    }
}

/// Round a real tooth count, or None if it won't fit a u32
fn rounded_teeth(count: f64) -> Option<u32> {
    let rounded = round_half_even(count);
    if rounded > u32::MAX as f64 {
        return None;
    }
    Some(rounded as u32)
}

impl Mul for Gear {
    type Output = Result<GearPair>;

    fn mul(self, driven: Gear) -> Self::Output {
        self.mesh_into(driven)
    }
}

impl<'a> Mul<&'a Gear> for &'a Gear {
    type Output = Result<GearPair>;

    fn mul(self, driven: &'a Gear) -> Self::Output {
        self.mesh(driven)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::GearError;
    use crate::gear::{Gear, GearSpec, DEFAULT_POWER_HP, DEFAULT_RPM};

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn defaults()  {
        let gear = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0)).unwrap();
        assert!((gear.helix_angle_degrees() - 15.0).abs() < TOLERANCE);
        assert!((gear.pressure_angle_degrees() - 20.0).abs() < TOLERANCE);
        assert_eq!(gear.rpm(), Some(DEFAULT_RPM));
        assert_eq!(gear.power(), DEFAULT_POWER_HP);
        assert!(gear.last_load().is_none());
    }

    #[test]
    fn angles_stored_in_radians()  {
        let gear = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0)
            .with_helix_angle(-20.0)
            .with_pressure_angle(25.0)).unwrap();
        assert!((gear.helix_angle() - (-20.0f64).to_radians()).abs() < TOLERANCE);
        assert!((gear.pressure_angle() - 25.0f64.to_radians()).abs() < TOLERANCE);
    }

    #[test]
    fn pitch_diameter_from_teeth_and_pitch()  {
        let gear = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0).with_helix_angle(20.0)).unwrap();
        assert!((gear.pitch_diameter() - 3.5472592415863735).abs() < TOLERANCE);
        assert!((gear.specified_pitch_diameter() - gear.pitch_diameter()).abs() < TOLERANCE);
    }

    #[test]
    fn spur_diameter_matches_either_construction()  {
        for (teeth, dp) in [(12, 4.0), (20, 6.0), (37, 8.0), (120, 6.0), (64, 32.0), (19, 2.5)] {
            let from_pitch = Gear::new(GearSpec::from_teeth_and_pitch(teeth, dp)
                .with_helix_angle(0.0)).unwrap();
            let from_diameter = Gear::new(GearSpec::from_teeth_and_diameter(teeth, teeth as f64 / dp)
                .with_helix_angle(0.0)).unwrap();
            assert!((from_pitch.pitch_diameter() - from_diameter.pitch_diameter()).abs() < TOLERANCE);
            assert!((from_diameter.diametral_pitch() - dp).abs() < TOLERANCE);
        }
    }

    #[test]
    fn teeth_derived_and_rounded()  {
        // 3.5 * 6 * cos(15deg) = 20.28
        let gear = Gear::new(GearSpec::from_pitch_and_diameter(6.0, 3.5)).unwrap();
        assert_eq!(gear.teeth(), 20);
        assert_eq!(gear.specified_pitch_diameter(), 3.5);
        assert!((gear.pitch_diameter() - 3.4509206013669433).abs() < TOLERANCE);
    }

    #[test]
    fn teeth_rounding_ties_to_even()  {
        let gear = Gear::new(GearSpec::from_pitch_and_diameter(1.0, 20.5).with_helix_angle(0.0)).unwrap();
        assert_eq!(gear.teeth(), 20);
        let gear = Gear::new(GearSpec::from_pitch_and_diameter(1.0, 21.5).with_helix_angle(0.0)).unwrap();
        assert_eq!(gear.teeth(), 22);
    }

    #[test]
    fn derived_teeth_can_round_to_zero()  {
        let gear = Gear::new(GearSpec::from_pitch_and_diameter(1.0, 0.25).with_helix_angle(0.0)).unwrap();
        assert_eq!(gear.teeth(), 0);
        assert_eq!(gear.pitch_diameter(), 0.0);
    }

    #[test]
    fn too_many_derived_teeth_rejected()  {
        assert!(matches!(Gear::new(GearSpec::from_pitch_and_diameter(6.0, 1e12)),
                         Err(GearError::InvalidGearSpecification(_))));
        let gear = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0)).unwrap();
        assert!(matches!(gear.mate_for_ratio(1e10), Err(GearError::Domain(_))));
        // largest count that still fits
        let gear = Gear::new(GearSpec::from_teeth_and_pitch(1, 6.0)).unwrap();
        assert_eq!(gear.mate_for_ratio(u32::MAX as f64).unwrap().teeth(), u32::MAX);
    }

    #[test]
    fn fewer_than_two_inputs_rejected()  {
        let specs = [
            GearSpec::default(),
            GearSpec { teeth: Some(20), ..GearSpec::default() },
            GearSpec { diametral_pitch: Some(6.0), ..GearSpec::default() },
            GearSpec { pitch_diameter: Some(3.5), ..GearSpec::default() },
        ];
        for spec in specs {
            assert!(matches!(Gear::new(spec), Err(GearError::InvalidGearSpecification(_))));
        }
    }

    #[test]
    fn non_positive_inputs_rejected()  {
        assert!(matches!(Gear::new(GearSpec::from_teeth_and_pitch(0, 6.0)),
                         Err(GearError::InvalidGearSpecification(_))));
        assert!(matches!(Gear::new(GearSpec::from_teeth_and_pitch(20, 0.0)),
                         Err(GearError::InvalidGearSpecification(_))));
        assert!(matches!(Gear::new(GearSpec::from_teeth_and_diameter(20, -1.0)),
                         Err(GearError::InvalidGearSpecification(_))));
        assert!(matches!(Gear::new(GearSpec::from_teeth_and_pitch(20, f64::NAN)),
                         Err(GearError::InvalidGearSpecification(_))));
        assert!(matches!(Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0).with_helix_angle(90.0)),
                         Err(GearError::InvalidGearSpecification(_))));
    }

    #[test]
    fn over_specified_accepted_without_check()  {
        let spec = GearSpec {
            teeth: Some(20),
            diametral_pitch: Some(6.0),
            pitch_diameter: Some(10.0),
            ..GearSpec::default()
        };
        let gear = Gear::new(spec).unwrap();
        assert_eq!(gear.teeth(), 20);
        assert_eq!(gear.diametral_pitch(), 6.0);
        assert_eq!(gear.specified_pitch_diameter(), 10.0);
        // live value comes from teeth and DP, not from the given diameter
        assert!((gear.pitch_diameter() - 10.0).abs() > 1.0);
    }

    #[test]
    fn checked_construction_rejects_inconsistent_inputs()  {
        let inconsistent = GearSpec {
            teeth: Some(20),
            diametral_pitch: Some(6.0),
            pitch_diameter: Some(10.0),
            ..GearSpec::default()
        };
        match Gear::new_checked(inconsistent, 1e-3) {
            Err(GearError::InconsistentGearSpecification { specified, derived }) => {
                assert_eq!(specified, 10.0);
                assert!((derived - 3.4509206013669433).abs() < TOLERANCE);
            }
            other => panic!("expected inconsistent specification, got {:?}", other)
        }

        let consistent = GearSpec {
            teeth: Some(20),
            diametral_pitch: Some(5.0),
            pitch_diameter: Some(4.0),
            helix_angle_deg: 0.0,
            ..GearSpec::default()
        };
        assert!(Gear::new_checked(consistent, 1e-6).is_ok());
        assert!(Gear::new_checked(GearSpec::from_teeth_and_diameter(20, 10.0), 1e-6).is_ok());
    }

    #[test]
    fn mate_for_ratio()  {
        let gear = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0)
            .with_helix_angle(-20.0)
            .with_pressure_angle(25.0)
            .with_rpm(Some(2000.0))
            .with_power(20.0)).unwrap();
        let mate = gear.mate_for_ratio(2.0).unwrap();
        assert_eq!(mate.teeth(), 40);
        assert_eq!(mate.diametral_pitch(), 6.0);
        assert!((mate.helix_angle() - gear.helix_angle()).abs() < TOLERANCE);
        assert!((mate.pressure_angle() - gear.pressure_angle()).abs() < TOLERANCE);
        assert_eq!(mate.rpm(), Some(DEFAULT_RPM));
        assert_eq!(mate.power(), DEFAULT_POWER_HP);
    }

    #[test]
    fn mate_for_ratio_rounds_teeth()  {
        let gear = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0)).unwrap();
        assert_eq!(gear.mate_for_ratio(1.53).unwrap().teeth(), 31);
        assert_eq!(gear.mate_for_ratio(0.5).unwrap().teeth(), 10);
    }

    #[test]
    fn mate_for_ratio_rejects_bad_ratio()  {
        let gear = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0)).unwrap();
        assert!(matches!(gear.mate_for_ratio(-1.0), Err(GearError::Domain(_))));
        assert!(matches!(gear.mate_for_ratio(f64::INFINITY), Err(GearError::Domain(_))));
    }

    #[test]
    fn mesh_requires_equal_pitch()  {
        let driving = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0)).unwrap();
        let driven = Gear::new(GearSpec::from_teeth_and_pitch(40, 8.0)).unwrap();
        assert_eq!((&driving * &driven).unwrap_err(), GearError::IncompatibleMesh(6.0, 8.0));

        let driven = Gear::new(GearSpec::from_teeth_and_pitch(40, 6.0)).unwrap();
        assert!((&driving * &driven).is_ok());
    }

    #[test]
    fn mesh_requires_driving_rpm()  {
        let driving = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0).with_rpm(None)).unwrap();
        let driven = Gear::new(GearSpec::from_teeth_and_pitch(40, 6.0)).unwrap();
        assert!(matches!(driving.mesh(&driven), Err(GearError::MissingOperatingCondition(_))));
        // only the driving side needs an rpm
        assert!(driven.mesh(&driving).is_ok());
    }

    #[test]
    fn mesh_leaves_gears_untouched()  {
        let driving = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0).with_rpm(Some(1800.0))).unwrap();
        let driven = Gear::new(GearSpec::from_teeth_and_pitch(60, 6.0)).unwrap();
        let pair = (driving.clone() * driven.clone()).unwrap();
        assert_eq!(pair.pinion(), &driving);
        assert_eq!(pair.gear(), &driven);
        assert_eq!(pair.gear().rpm(), Some(DEFAULT_RPM));
    }

    #[test]
    fn load_calculation_is_kept()  {
        let mut gear = Gear::new(GearSpec::from_teeth_and_pitch(120, 6.0)
            .with_rpm(Some(2000.0))
            .with_power(20.0)).unwrap();
        let load = gear.load_calculation().unwrap();
        assert_eq!(gear.last_load(), Some(&load));
    }

    #[test]
    fn operating_condition_setters()  {
        let mut gear = Gear::new(GearSpec::from_teeth_and_pitch(20, 6.0)).unwrap();
        gear.set_rpm(Some(1500.0));
        gear.set_power(5.0);
        assert_eq!(gear.rpm(), Some(1500.0));
        assert_eq!(gear.power(), 5.0);
        gear.set_rpm(None);
        assert_eq!(gear.rpm(), None);
    }
}
