//! # VEML6075 UVA/UVB Light Sensor Driver
//!
//! An async, `no_std` driver for the Vishay VEML6075 built on `embedded-hal-async`.
//!
//! The driver is meant to be polled: [`Veml6075::acquire`] runs one measurement cycle,
//! removes visible and infrared leakage from the raw UVA/UVB counts and derives a UV index.
//! Cycles arriving faster than the configured minimum interval return the previous sample
//! without touching the bus.
//!
//! Bus errors during a cycle never abort it. The affected register reads as zero and the
//! failure is logged through `log` or `defmt`, depending on the enabled feature.

#![no_std]

#[macro_use]
mod fmt;

pub mod bus;
pub mod clock;
pub mod compensation;
pub mod config;
pub mod error;
pub mod register;
pub mod sink;
mod veml6075;

#[cfg(test)]
mod testing;

pub use crate::veml6075::*;
