//! Leakage compensation and UV index calculation.
//!
//! The UVA and UVB photodiodes also pick up visible and infrared light. The two compensation
//! channels measure that leakage and are subtracted with fixed coefficients taken from the
//! Vishay application note "Designing the VEML6075 into an Application". The compensated counts
//! are then scaled into UV index units with a per integration time responsivity.

use crate::config::Configuration;
use crate::register::conf::IntegrationTime;

/// Visible light coefficient for UVA.
pub const UVA_A_COEF: f32 = 2.22;
/// Infrared coefficient for UVA.
pub const UVA_B_COEF: f32 = 1.33;
/// Visible light coefficient for UVB.
pub const UVB_C_COEF: f32 = 2.95;
/// Infrared coefficient for UVB.
pub const UVB_D_COEF: f32 = 1.74;

/// High dynamic mode doubles the internal sensitivity.
pub const HIGH_DYNAMIC_SCALE: f32 = 2.0;

/// UVA responsivity in UVI per count, indexed by [`IntegrationTime::index`].
///
/// Datasheet value at 100 ms is 0.001461, the other entries scale with 100 ms / integration time.
pub const UVA_RESPONSIVITY: [f32; 5] = [0.002922, 0.001461, 0.0007305, 0.00036525, 0.000182625];

/// UVB responsivity in UVI per count, indexed by [`IntegrationTime::index`].
///
/// Datasheet value at 100 ms is 0.002591.
pub const UVB_RESPONSIVITY: [f32; 5] = [0.005182, 0.002591, 0.0012955, 0.00064775, 0.000323875];

/// Raw register contents of one measurement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub uva: u16,
    pub uvb: u16,
    pub uvcomp1: u16,
    pub uvcomp2: u16,
}

/// Compensated UVA/UVB counts and the derived UV index. None of the values are ever negative.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedSample {
    pub uva: f32,
    pub uvb: f32,
    pub uv_index: f32,
}

/// UVA count with visible and infrared leakage removed. Not clamped; may be negative in low light.
pub fn comp_uva(uva: u16, uvcomp1: u16, uvcomp2: u16) -> f32 {
    uva as f32 - UVA_A_COEF * uvcomp1 as f32 - UVA_B_COEF * uvcomp2 as f32
}

/// UVB count with visible and infrared leakage removed. Not clamped; may be negative in low light.
pub fn comp_uvb(uvb: u16, uvcomp1: u16, uvcomp2: u16) -> f32 {
    uvb as f32 - UVB_C_COEF * uvcomp1 as f32 - UVB_D_COEF * uvcomp2 as f32
}

/// Averages the UVA and UVB contributions to the UV index.
///
/// The responsivity entry must be the one for the integration time the sample was taken with,
/// otherwise the result is off by a constant factor.
pub fn calculate_uvi(comp_uva: f32, comp_uvb: f32, integration_time: IntegrationTime) -> f32 {
    let idx = integration_time.index();
    let uvi = (comp_uva * UVA_RESPONSIVITY[idx] + comp_uvb * UVB_RESPONSIVITY[idx]) / 2.0;

    uvi.max(0.0)
}

/// Runs the complete compensation pipeline on a raw sample.
pub fn compensate(raw: &RawSample, config: &Configuration) -> CompensatedSample {
    let mut uva = comp_uva(raw.uva, raw.uvcomp1, raw.uvcomp2);
    let mut uvb = comp_uvb(raw.uvb, raw.uvcomp1, raw.uvcomp2);

    if config.high_dynamic {
        uva /= HIGH_DYNAMIC_SCALE;
        uvb /= HIGH_DYNAMIC_SCALE;
    }

    let uva = uva.max(0.0);
    let uvb = uvb.max(0.0);

    CompensatedSample {
        uva,
        uvb,
        uv_index: calculate_uvi(uva, uvb, config.integration_time),
    }
}
