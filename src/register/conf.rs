//! ### UV_CONF - Configuration (`0x00`, 2 bytes, R/W)
//!
//! Controls integration time, dynamic range, acquisition mode and shutdown.
//!
//! | Bits | Field        | Meaning                                              |
//! |------|--------------|------------------------------------------------------|
//! | 6:4  | UV_IT        | Integration time, see [`IntegrationTime`]            |
//! | 3    | HD           | High dynamic range                                   |
//! | 2    | UV_TRIG      | Trigger a single measurement (forced mode only)      |
//! | 1    | UV_AF        | Active force mode enable                             |
//! | 0    | SD           | Shutdown                                             |
//!
//! The high byte is reserved and always written as zero.
//!
//! ### Default values
//! 0x0001 (50 ms, normal dynamic, active mode, shut down)
//!
//! ### Examples
//! ```rust,no_run
//! # use veml6075_rs::{Veml6075, Veml6075Result};
//! # use veml6075_rs::bus::Bus;
//! # use veml6075_rs::clock::Clock;
//! # use veml6075_rs::sink::ValueSink;
//! # use embedded_hal_async::delay::DelayNs;
//! # async fn demo<B: Bus, D: DelayNs, C: Clock, S: ValueSink>(mut device: Veml6075<B, D, C, S>)
//! #     -> Veml6075Result<(), B::Error> {
//! use veml6075_rs::register::conf::Conf;
//!
//! let conf = device.read::<Conf>().await?;
//! let _ = (conf.integration_time, conf.mode());
//! # Ok(()) }
//! ```

use crate::config::Configuration;
use crate::register::{decode_u16, encode_u16, InvalidRegisterField, Readable, Reg, Writable};

const IT_SHIFT: u16 = 4;
const IT_MASK: u16 = 0b111 << IT_SHIFT;
const HD: u16 = 1 << 3;
const UV_TRIG: u16 = 1 << 2;
const UV_AF: u16 = 1 << 1;
const SD: u16 = 1 << 0;

/// Marker type for the UV_CONF (0x00) register
pub struct Conf;
impl Reg for Conf { const ADDR: u8 = 0x00; }

/// The payload for the UV_CONF (0x00) register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfFields {
    pub integration_time: IntegrationTime,
    pub high_dynamic: bool,
    pub trigger: bool,
    pub active_force: bool,
    pub shutdown: bool,
}

impl ConfFields {
    /// Packs the fields into the 16-bit register value.
    pub fn bits(&self) -> u16 {
        let it: u8 = self.integration_time.into();
        let mut value = (it as u16) << IT_SHIFT;
        if self.high_dynamic {
            value |= HD;
        }
        if self.trigger {
            value |= UV_TRIG;
        }
        if self.active_force {
            value |= UV_AF;
        }
        if self.shutdown {
            value |= SD;
        }
        value
    }

    /// Unpacks a 16-bit register value. Fails on the reserved integration time codes 5..=7.
    pub fn from_bits(value: u16) -> Result<Self, InvalidRegisterField> {
        let it = ((value & IT_MASK) >> IT_SHIFT) as u8;
        let integration_time = IntegrationTime::try_from(it)
            .map_err(|_| InvalidRegisterField::new(Conf::ADDR, value, IT_SHIFT as u8))?;

        Ok(Self {
            integration_time,
            high_dynamic: value & HD != 0,
            trigger: value & UV_TRIG != 0,
            active_force: value & UV_AF != 0,
            shutdown: value & SD != 0,
        })
    }

    /// Acquisition mode implied by the trigger / active force bits.
    pub fn mode(&self) -> AcquisitionMode {
        if self.trigger || self.active_force {
            AcquisitionMode::Forced
        } else {
            AcquisitionMode::Active
        }
    }
}

impl From<&Configuration> for ConfFields {
    fn from(config: &Configuration) -> Self {
        match config.mode {
            // The part only takes a single forced measurement when SD is set together with
            // UV_TRIG, after which it returns to idle.
            AcquisitionMode::Forced => ConfFields {
                integration_time: config.integration_time,
                high_dynamic: config.high_dynamic,
                trigger: true,
                active_force: true,
                shutdown: true,
            },
            AcquisitionMode::Active => ConfFields {
                integration_time: config.integration_time,
                high_dynamic: config.high_dynamic,
                trigger: false,
                active_force: false,
                shutdown: config.shutdown_when_idle,
            },
        }
    }
}

/// Computes the UV_CONF register value for a configuration.
pub fn encode_config(config: &Configuration) -> u16 {
    ConfFields::from(config).bits()
}

impl Readable for Conf {
    type Out = ConfFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        ConfFields::from_bits(decode_u16(b[0], b[1]))
    }
}

impl Writable for Conf {
    type In = ConfFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        out[..2].copy_from_slice(&encode_u16(v.bits()));
    }
}

/// Integration time of the UVA/UVB photodiodes.
///
/// Longer integration times raise sensitivity and the duration of a single conversion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntegrationTime {
    /// 50 ms
    Ms50 = 0b000,
    /// 100 ms, the reference point of the responsivity tables
    #[default]
    Ms100 = 0b001,
    /// 200 ms
    Ms200 = 0b010,
    /// 400 ms
    Ms400 = 0b011,
    /// 800 ms
    Ms800 = 0b100,
}

impl IntegrationTime {
    /// Nominal integration time in milliseconds.
    pub const fn millis(&self) -> u32 {
        match self {
            IntegrationTime::Ms50 => 50,
            IntegrationTime::Ms100 => 100,
            IntegrationTime::Ms200 => 200,
            IntegrationTime::Ms400 => 400,
            IntegrationTime::Ms800 => 800,
        }
    }

    /// Position of this setting in the per integration time tables. Same as the UV_IT field value.
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl From<IntegrationTime> for u8 {
    fn from(it: IntegrationTime) -> u8 {
        it as u8
    }
}

impl TryFrom<u8> for IntegrationTime {
    type Error = u8;

    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b000 => Ok(IntegrationTime::Ms50),
            0b001 => Ok(IntegrationTime::Ms100),
            0b010 => Ok(IntegrationTime::Ms200),
            0b011 => Ok(IntegrationTime::Ms400),
            0b100 => Ok(IntegrationTime::Ms800),
            other => Err(other),
        }
    }
}

/// How conversions are started.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquisitionMode {
    /// The device converts continuously once configured.
    #[default]
    Active,
    /// Every measurement is triggered explicitly, after which the device returns to idle.
    Forced,
}
