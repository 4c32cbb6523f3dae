//! Errors that can occur when talking to the VEML6075.
//!
//! The measurement cycle itself never fails: bus errors during
//! [`Veml6075::acquire`](crate::Veml6075::acquire) are logged and the affected register reads as
//! zero. This error type is returned by the
//! lower level register access methods. It is generic over the underlying bus error type.

use crate::register::InvalidRegisterField;

/// This represents all possible errors that can occur when accessing VEML6075 registers.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Veml6075Error<BusError> {
    /// An error has occurred in the I2C driver
    Bus(BusError),

    /// Reading from a register returned unexpected data, e.g. a reserved integration time code.
    ///
    /// Could possibly indicate a bug in the driver, or less likely, a faulty chip or interference.
    UnexpectedRegisterData(InvalidRegisterField),
}

impl<BusError> From<InvalidRegisterField> for Veml6075Error<BusError> {
    fn from(field: InvalidRegisterField) -> Self {
        Veml6075Error::UnexpectedRegisterData(field)
    }
}
