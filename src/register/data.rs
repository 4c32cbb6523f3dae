//! Read-only measurement and identification registers.
//!
//! All of these registers hold a plain 16-bit little-endian count. The raw UVA/UVB counts include
//! visible and infrared leakage; [`crate::compensation`] removes it using the two compensation
//! channels.

use crate::register::{decode_u16, InvalidRegisterField, Readable, Reg};

/// Marker struct for the UVA_DATA (0x07) register
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
pub struct Uva;
impl Reg for Uva { const ADDR: u8 = 0x07; }

/// Marker struct for the UVB_DATA (0x09) register
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
pub struct Uvb;
impl Reg for Uvb { const ADDR: u8 = 0x09; }

/// Marker struct for the UVCOMP1_DATA (0x0A) register, the visible light compensation channel
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
pub struct UvComp1;
impl Reg for UvComp1 { const ADDR: u8 = 0x0A; }

/// Marker struct for the UVCOMP2_DATA (0x0B) register, the infrared compensation channel
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
pub struct UvComp2;
impl Reg for UvComp2 { const ADDR: u8 = 0x0B; }

/// Marker struct for the ID (0x0C) register
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
///
/// Used with [`Veml6075::read::<DeviceId>()`](crate::Veml6075::read) or the convenience method
/// [`Veml6075::is_connected`](crate::Veml6075::is_connected).
pub struct DeviceId;
impl Reg for DeviceId { const ADDR: u8 = 0x0C; }

macro_rules! u16_register {
    ($($reg:ty),+) => {
        $(
            impl Readable for $reg {
                type Out = u16;

                fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
                    Ok(decode_u16(b[0], b[1]))
                }
            }
        )+
    };
}

u16_register!(Uva, Uvb, UvComp1, UvComp2, DeviceId);
