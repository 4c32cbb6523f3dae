use fugit::MillisDurationU32;

use crate::register::conf::{AcquisitionMode, IntegrationTime};

/// Minimum time between two measurement cycles that touch the hardware.
///
/// Covers the longest nominal integration time plus margin, so a forced trigger is never issued
/// while a conversion is still running.
pub const DEFAULT_MIN_INTERVAL: MillisDurationU32 = MillisDurationU32::millis(1000);

/// Sensor settings. Applied by [`Veml6075::initialize`](crate::Veml6075::initialize) and fixed
/// for the lifetime of the driver.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub(crate) integration_time: IntegrationTime,
    pub(crate) mode: AcquisitionMode,
    pub(crate) high_dynamic: bool,
    pub(crate) shutdown_when_idle: bool,
    pub(crate) min_interval: MillisDurationU32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            integration_time: IntegrationTime::Ms100,
            mode: AcquisitionMode::Active,
            high_dynamic: false,
            shutdown_when_idle: false,
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

impl Configuration {
    pub fn integration_time(mut self, integration_time: IntegrationTime) -> Self {
        self.integration_time = integration_time;

        self
    }

    pub fn mode(mut self, mode: AcquisitionMode) -> Self {
        self.mode = mode;

        self
    }

    /// Enables high dynamic range. The device doubles its internal sensitivity in this mode and
    /// the compensated counts are halved to stay in normal range units.
    pub fn high_dynamic(mut self, enable: bool) -> Self {
        self.high_dynamic = enable;

        self
    }

    /// Keeps the device shut down between measurements in [`AcquisitionMode::Active`].
    ///
    /// Has no effect in [`AcquisitionMode::Forced`], which always sets the shutdown bit together
    /// with the trigger bit.
    pub fn shutdown_when_idle(mut self, enable: bool) -> Self {
        self.shutdown_when_idle = enable;

        self
    }

    /// Minimum time between two hardware measurement cycles. Calls to
    /// [`Veml6075::acquire`](crate::Veml6075::acquire) arriving sooner return the previous sample.
    pub fn min_interval(mut self, interval: MillisDurationU32) -> Self {
        self.min_interval = interval;

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();

        assert_eq!(IntegrationTime::Ms100, config.integration_time);
        assert_eq!(AcquisitionMode::Active, config.mode);
        assert!(!config.high_dynamic);
        assert!(!config.shutdown_when_idle);
        assert_eq!(1000, config.min_interval.to_millis());
    }

    #[test]
    fn builder() {
        let config = Configuration::default()
            .integration_time(IntegrationTime::Ms800)
            .mode(AcquisitionMode::Forced)
            .high_dynamic(true)
            .min_interval(MillisDurationU32::millis(2500));

        assert_eq!(IntegrationTime::Ms800, config.integration_time);
        assert_eq!(AcquisitionMode::Forced, config.mode);
        assert!(config.high_dynamic);
        assert_eq!(2500, config.min_interval.to_millis());
    }
}
