//! Register catalog for the VEML6075.
//!
//! Every register on the device is 16 bits wide and transferred as two bytes, least
//! significant byte first. Each register is represented by a marker type implementing
//! [`Reg`] and [`Readable`] and/or [`Writable`], which can be used with
//! [`Veml6075::read`](crate::Veml6075::read) and [`Veml6075::write`](crate::Veml6075::write).

pub mod conf;
pub mod data;

/// Width in bytes of every VEML6075 register.
pub const REG_BYTES: usize = 2;

/// A register held a bit pattern that does not map to any documented value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRegisterField {
    pub register: u8,
    pub value: u16,
    pub bit_offset: u8,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u16, bit_offset: u8) -> Self {
        Self { register, value, bit_offset }
    }
}

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = REG_BYTES;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField>;
}

pub trait Writable: Reg {
    type In;
    const N: usize = REG_BYTES;
    fn encode(v: &Self::In, out: &mut [u8]);
}

/// Reassembles a register value from its wire bytes (`high << 8 | low`).
pub const fn decode_u16(low: u8, high: u8) -> u16 {
    (high as u16) << 8 | low as u16
}

/// Splits a register value into its wire bytes, `[low, high]`.
pub const fn encode_u16(value: u16) -> [u8; 2] {
    [(value & 0xFF) as u8, (value >> 8) as u8]
}
