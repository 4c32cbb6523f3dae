use crate::bus::{Bus, I2c, DEFAULT_ADDRESS};
use crate::clock::{Clock, Duration, Instant};
use crate::compensation::{self, CompensatedSample, RawSample};
use crate::config::Configuration;
use crate::error::Veml6075Error;
use crate::register::conf::{AcquisitionMode, Conf, ConfFields, IntegrationTime};
use crate::register::data::{DeviceId, UvComp1, UvComp2, Uva, Uvb};
use crate::register::{Readable, Writable};
use crate::sink::{self, NoSink, Sinks, ValueSink};
use embedded_hal_async::delay::DelayNs;

/// Type alias for a Veml6075 communicating over I2C
type Veml6075I2c<T, D, C, S> = Veml6075<I2c<T>, D, C, S>;

/// Low byte of the ID (0x0C) register
const VEML6075_DEVICE_ID: u8 = 0x26;

/// Time for the oscillator and ADC to stabilize after the configuration has been written.
const SETTLE_TIME_MS: u32 = 100;

/// Type alias used to simplify return types throughout the driver
pub type Veml6075Result<T, BusError> = Result<T, Veml6075Error<BusError>>;

/// Main Veml6075 driver struct
///
/// Owns the bus, a delay provider, a monotonic clock, the configuration and the optional value
/// sinks. [`Veml6075::acquire`] is meant to be called from a periodic task; it decides by itself
/// whether the hardware needs to be touched.
pub struct Veml6075<B, D, C, S = NoSink> {
    bus: B,
    delay: D,
    clock: C,
    config: Configuration,
    sinks: Sinks<S>,
    last_acquisition: Option<Instant>,
    last_raw: RawSample,
    last_sample: CompensatedSample,
}

impl<T, D, C> Veml6075I2c<T, D, C, NoSink>
where
    T: embedded_hal_async::i2c::I2c,
    D: DelayNs,
    C: Clock,
{
    /// Constructs a new Veml6075 driver instance that communicates over I2C at address 0x10.
    ///
    /// Nothing is written to the device until [`Veml6075::initialize`] is called.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use embedded_hal_async::i2c::I2c;
    /// # use veml6075_rs::clock::Clock;
    ///  use veml6075_rs::Veml6075;
    ///  use veml6075_rs::config::Configuration;
    ///  use veml6075_rs::register::conf::{AcquisitionMode, IntegrationTime};
    /// # async fn demo<I: I2c, D: DelayNs, C: Clock>(i2c: I, delay: D, clock: C) {
    ///
    ///  let config = Configuration::default()
    ///     .integration_time(IntegrationTime::Ms200)
    ///     .mode(AcquisitionMode::Forced);
    ///
    ///  let mut device = Veml6075::new_i2c(i2c, config, delay, clock);
    ///  device.initialize().await;
    ///
    ///  let sample = device.acquire().await;
    ///  let _uvi = sample.uv_index;
    /// # }
    /// ```
    pub fn new_i2c(i2c: T, config: Configuration, delay: D, clock: C) -> Self {
        Self::new(I2c::new(i2c, DEFAULT_ADDRESS), config, delay, clock)
    }
}

impl<B, D, C> Veml6075<B, D, C, NoSink>
where
    B: Bus,
    D: DelayNs,
    C: Clock,
{
    /// Creates a driver on top of an arbitrary [`Bus`] implementation.
    pub fn new(bus: B, config: Configuration, delay: D, clock: C) -> Self {
        Veml6075 {
            bus,
            delay,
            clock,
            config,
            sinks: Sinks::new(),
            last_acquisition: None,
            last_raw: RawSample::default(),
            last_sample: CompensatedSample::default(),
        }
    }
}

impl<B, D, C, S> Veml6075<B, D, C, S> {
    /// Attaches value sinks. Channels without a sink are not reported.
    pub fn with_sinks<S2: ValueSink>(self, sinks: Sinks<S2>) -> Veml6075<B, D, C, S2> {
        Veml6075 {
            bus: self.bus,
            delay: self.delay,
            clock: self.clock,
            config: self.config,
            sinks,
            last_acquisition: self.last_acquisition,
            last_raw: self.last_raw,
            last_sample: self.last_sample,
        }
    }

    /// The configuration the driver applies to the device.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// The most recently computed sample. All zero before the first acquisition.
    pub fn last_sample(&self) -> CompensatedSample {
        self.last_sample
    }

    /// Raw register contents behind [`last_sample`](Self::last_sample).
    pub fn last_raw_sample(&self) -> RawSample {
        self.last_raw
    }

    /// When the last hardware measurement cycle finished.
    pub fn last_acquisition(&self) -> Option<Instant> {
        self.last_acquisition
    }

    /// Destroys the driver and gives back the bus, delay and clock.
    pub fn release(self) -> (B, D, C) {
        (self.bus, self.delay, self.clock)
    }
}

impl<B, D, C, S> Veml6075<B, D, C, S>
where
    B: Bus,
    D: DelayNs,
    C: Clock,
    S: ValueSink,
{
    /// Read a register using a **typed marker** from [`crate::register`].
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use veml6075_rs::{register, Veml6075, Veml6075Result};
    /// # use veml6075_rs::bus::Bus;
    /// # use veml6075_rs::clock::Clock;
    /// # use veml6075_rs::sink::ValueSink;
    /// # use embedded_hal_async::delay::DelayNs;
    /// # async fn demo<B: Bus, D: DelayNs, C: Clock, S: ValueSink>(
    /// #     mut device: Veml6075<B, D, C, S>,
    /// # ) -> Veml6075Result<(), B::Error> {
    /// let uva: u16 = device.read::<register::data::Uva>().await?;
    /// # Ok(()) }
    /// ```
    pub async fn read<R: Readable>(&mut self) -> Veml6075Result<R::Out, B::Error> {
        self.bus.read::<R>().await
    }

    /// Write a register using a **typed marker** from [`crate::register`].
    ///
    /// Writing [`Conf`] directly bypasses the driver's configuration; the next forced
    /// measurement rewrites it from [`Configuration`].
    pub async fn write<W: Writable>(&mut self, v: &W::In) -> Veml6075Result<(), B::Error> {
        self.bus.write::<W>(v).await
    }

    /// Determines if a VEML6075 is connected by reading the ID (0x0C) register.
    pub async fn is_connected(&mut self) -> Veml6075Result<bool, B::Error> {
        let id = self.bus.read::<DeviceId>().await?;

        Ok((id & 0x00FF) as u8 == VEML6075_DEVICE_ID)
    }

    /// Writes the configuration to the device, waits for it to settle and reads it back.
    ///
    /// Starts the [`Configuration::min_interval`] window, so the first [`acquire`](Self::acquire)
    /// does not read or re-trigger before the conversion started here can have finished. Calls
    /// inside that window return an all zero sample.
    ///
    /// Bus errors are logged, not returned. The decoded read-back is returned, or `None` if it
    /// could not be read.
    pub async fn initialize(&mut self) -> Option<ConfFields> {
        let fields = ConfFields::from(&self.config);

        if self.bus.write::<Conf>(&fields).await.is_err() {
            error!("Failed to write UV_CONF {:#x}", fields.bits());
        }

        self.delay.delay_ms(SETTLE_TIME_MS).await;

        let readback = match self.bus.read::<Conf>().await {
            Ok(readback) => {
                info!("Setup complete, UV_CONF = {:#x}", readback.bits());
                if !same_settings(&fields, &readback) {
                    warn!(
                        "UV_CONF read back {:#x}, expected {:#x}",
                        readback.bits(),
                        fields.bits()
                    );
                }
                Some(readback)
            }
            Err(_) => {
                error!("Failed to read back UV_CONF");
                None
            }
        };

        self.last_acquisition = Some(self.clock.now());

        readback
    }

    /// Runs one measurement cycle and returns the compensated sample.
    ///
    /// - Within [`Configuration::min_interval`] of the previous cycle nothing is sent on the bus
    ///   and the previous sample is returned as is.
    /// - In [`AcquisitionMode::Forced`] the configuration is rewritten with the trigger bit set,
    ///   followed by a wait of the maximum measurement time. The device has no data ready flag.
    /// - In [`AcquisitionMode::Active`] the device converts continuously and the data registers
    ///   are read directly.
    ///
    /// A failed register read is logged and counts as zero; the cycle always completes.
    pub async fn acquire(&mut self) -> CompensatedSample {
        if let Some(last) = self.last_acquisition {
            let elapsed = self.clock.now().checked_duration_since(last);
            let min_interval = Duration::millis(self.config.min_interval.to_millis() as u64);
            if elapsed.is_some_and(|elapsed| elapsed < min_interval) {
                trace!("Rate limited, returning previous sample");
                return self.last_sample;
            }
        }

        match self.config.mode {
            AcquisitionMode::Active => {}
            AcquisitionMode::Forced => self.trigger_measurement().await,
        }

        let raw = self.read_raw_sample().await;
        let sample = compensation::compensate(&raw, &self.config);

        debug!(
            "UVA: {}  UVB: {}  C1: {}  C2: {}  UVI: {}",
            raw.uva,
            raw.uvb,
            raw.uvcomp1,
            raw.uvcomp2,
            sample.uv_index
        );

        self.emit(&raw, &sample);

        self.last_acquisition = Some(self.clock.now());
        self.last_raw = raw;
        self.last_sample = sample;

        sample
    }

    async fn trigger_measurement(&mut self) {
        let fields = ConfFields::from(&self.config);
        if self.bus.write::<Conf>(&fields).await.is_err() {
            error!("Failed to trigger measurement, UV_CONF {:#x}", fields.bits());
        }

        self.delay
            .delay_ms(calculate_maximum_measurement_time(self.config.integration_time))
            .await;
    }

    async fn read_raw_sample(&mut self) -> RawSample {
        RawSample {
            uva: self.read_or_zero::<Uva>().await,
            uvb: self.read_or_zero::<Uvb>().await,
            uvcomp1: self.read_or_zero::<UvComp1>().await,
            uvcomp2: self.read_or_zero::<UvComp2>().await,
        }
    }

    async fn read_or_zero<R: Readable<Out = u16>>(&mut self) -> u16 {
        match self.bus.read::<R>().await {
            Ok(value) => value,
            Err(_) => {
                error!("Failed to read reg {:#x}", R::ADDR);
                0
            }
        }
    }

    fn emit(&mut self, raw: &RawSample, sample: &CompensatedSample) {
        sink::publish(&mut self.sinks.uva, raw.uva as f32);
        sink::publish(&mut self.sinks.uvb, raw.uvb as f32);
        sink::publish(&mut self.sinks.uvcomp1, raw.uvcomp1 as f32);
        sink::publish(&mut self.sinks.uvcomp2, raw.uvcomp2 as f32);
        sink::publish(&mut self.sinks.uv_index, sample.uv_index);
    }
}

/// Compares everything but the trigger bit, which the device clears once a forced measurement
/// has been taken.
fn same_settings(written: &ConfFields, readback: &ConfFields) -> bool {
    written.integration_time == readback.integration_time
        && written.high_dynamic == readback.high_dynamic
        && written.active_force == readback.active_force
        && written.shutdown == readback.shutdown
}

/// Calculates the maximum time in milliseconds a forced measurement can take.
///
/// A conversion takes roughly the nominal integration time. Like the typical figures in the
/// datasheet it is padded by 1.2 to reach a safe upper bound.
fn calculate_maximum_measurement_time(integration_time: IntegrationTime) -> u32 {
    integration_time.millis() * 6 / 5
}
