//! Register level access to the device.
//!
//! The VEML6075 only speaks I2C, so [`I2c`] is the one production implementation of [`Bus`].
//! The trait exists so the controller can be driven by other transports, and by fakes in tests.

use core::future::Future;

use embedded_hal::i2c::SevenBitAddress;

use crate::error::Veml6075Error;
use crate::register::{Readable, Writable, REG_BYTES};

/// The VEML6075 has a single fixed I2C address.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x10;

/// Largest number of bytes transferred for a single register (address byte excluded).
pub const MAX_REG_BYTES: usize = REG_BYTES;

pub trait Bus {
    type Error;

    fn read<R: Readable>(
        &mut self,
    ) -> impl Future<Output = Result<R::Out, Veml6075Error<Self::Error>>>;

    fn write<W: Writable>(
        &mut self,
        v: &W::In,
    ) -> impl Future<Output = Result<(), Veml6075Error<Self::Error>>>;
}

pub struct I2c<I2cType> {
    i2c: I2cType,
    address: SevenBitAddress,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c,
{
    pub fn new(i2c: I2cType, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Gives back the underlying I2C peripheral.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c,
{
    type Error = <I2cType as embedded_hal_async::i2c::ErrorType>::Error;

    async fn read<R: Readable>(&mut self) -> Result<R::Out, Veml6075Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES];
        self.i2c
            .write_read(self.address, &[R::ADDR], &mut buf[..R::N])
            .await
            .map_err(Veml6075Error::Bus)?;

        Ok(R::decode(&buf[..R::N])?)
    }

    async fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Veml6075Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES + 1];
        buf[0] = W::ADDR;
        W::encode(v, &mut buf[1..=W::N]);
        self.i2c
            .write(self.address, &buf[..=W::N])
            .await
            .map_err(Veml6075Error::Bus)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;
    use crate::register::conf::{Conf, ConfFields, IntegrationTime};
    use crate::register::data::Uvb;

    #[tokio::test]
    async fn i2c_read_register() {
        let expectations = [I2cTransaction::write_read(0x10, vec![0x09], vec![0x90, 0x01])];
        let mut i2c = I2cMock::new(&expectations);

        let mut bus = I2c::new(i2c.clone(), DEFAULT_ADDRESS);
        assert_eq!(400, bus.read::<Uvb>().await.unwrap());

        i2c.done();
    }

    #[tokio::test]
    async fn i2c_write_register() {
        let expectations = [I2cTransaction::write(0x10, vec![0x00, 0b0001_0111, 0x00])];
        let mut i2c = I2cMock::new(&expectations);

        let mut bus = I2c::new(i2c.clone(), DEFAULT_ADDRESS);
        bus.write::<Conf>(&ConfFields {
            integration_time: IntegrationTime::Ms100,
            high_dynamic: false,
            trigger: true,
            active_force: true,
            shutdown: true,
        })
        .await
        .unwrap();

        i2c.done();
    }

    #[tokio::test]
    async fn i2c_read_error_is_reported() {
        let expectations = [I2cTransaction::write_read(0x10, vec![0x09], vec![0x00, 0x00])
            .with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);

        let mut bus = I2c::new(i2c.clone(), DEFAULT_ADDRESS);
        assert!(matches!(bus.read::<Uvb>().await, Err(Veml6075Error::Bus(ErrorKind::Other))));

        i2c.done();
    }

    #[tokio::test]
    async fn i2c_read_invalid_conf() {
        let expectations = [I2cTransaction::write_read(0x10, vec![0x00], vec![0x70, 0x00])];
        let mut i2c = I2cMock::new(&expectations);

        let mut bus = I2c::new(i2c.clone(), DEFAULT_ADDRESS);
        assert!(matches!(
            bus.read::<Conf>().await,
            Err(Veml6075Error::UnexpectedRegisterData(_))
        ));

        i2c.done();
    }
}
