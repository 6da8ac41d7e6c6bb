// Licensed under the Apache-2.0 license

//! Common types and constants for the Ralink I2C driver modules.
//!
//! This module provides the shared definitions for error handling, hardware
//! variant selection, configuration, and transaction building blocks used
//! across the driver implementation.

use crate::i2c::regs::{
    RegisterBus, MAX_WRITE_LEN, REG_CLKDIV, REG_SM0CFG2, REG_SM0CTL0, SM0CTL0_DEFAULT,
};
use fugit::MicrosDurationU32;

/// Hardware sub-family of the controller block.
///
/// The two variants share the transfer engine but encode clock and protocol
/// options in different registers, so speed programming is dispatched here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Baseline controller found on Ralink RT2880-class SoCs.
    Rt2880,
    /// Extended controller found on MediaTek MT7628-class SoCs.
    Mt7628,
}

impl Variant {
    /// Programs the default bus speed for this variant.
    ///
    /// The RT2880 block takes a bare divisor in its clock-divider register.
    /// The MT7628 block packs the divisor together with the protocol default
    /// bits into SM0CTL0 and additionally arms the auxiliary config register.
    pub(crate) fn configure_speed<R: RegisterBus>(self, regs: &mut R, clk_div: u32) {
        match self {
            Variant::Rt2880 => regs.write(REG_CLKDIV, clk_div),
            Variant::Mt7628 => {
                regs.write(REG_SM0CTL0, (clk_div << 16) | SM0CTL0_DEFAULT);
                regs.write(REG_SM0CFG2, 1);
            }
        }
    }
}

/// Errors surfaced by the transfer engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// 10-bit addressing was requested; the controller only does 7-bit.
    /// Raised before any register is touched.
    UnsupportedAddressMode,
    /// A write message is longer than the 63-byte single-transaction cap.
    /// Raised before any register is touched.
    LengthExceeded,
    /// A status poll exhausted its budget without observing the expected
    /// flag; the bus or device is not responding.
    Timeout,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UnsupportedAddressMode => write!(f, "10-bit addressing not supported"),
            Error::LengthExceeded => {
                write!(f, "write longer than {MAX_WRITE_LEN} byte transfer limit")
            }
            Error::Timeout => write!(f, "status poll timed out"),
        }
    }
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        embedded_hal::i2c::ErrorKind::Other
    }
}

/// Failure of a multi-message transaction.
///
/// Carries how many messages finished before the failing one; completed
/// messages are not rolled back and the failing message is not retried.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransactionError {
    /// Messages fully completed before the failure.
    pub completed: usize,
    /// The error that stopped the transaction.
    pub source: Error,
}

impl core::fmt::Display for TransactionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "transaction aborted after {} message(s): {}",
            self.completed, self.source
        )
    }
}

/// Target device address for a transaction.
///
/// The address is programmed once per transaction; every message in the
/// transaction goes to the same device. `TenBit` exists so callers can
/// express the request, but the hardware cannot serve it and the sequencer
/// rejects it before touching any register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetAddress {
    SevenBit(u8),
    TenBit(u16),
}

impl From<u8> for TargetAddress {
    fn from(addr: u8) -> Self {
        TargetAddress::SevenBit(addr)
    }
}

/// A single directional transfer within a transaction.
///
/// Write buffers are capped at 63 bytes by the hardware byte-count register;
/// read buffers are bounded only by their own length, the engine splits them
/// into FIFO-sized blocks.
pub enum Message<'a> {
    /// Send the buffer contents to the target device.
    Write(&'a [u8]),
    /// Fill the buffer with bytes read from the target device.
    Read(&'a mut [u8]),
}

/// Operations the controller supports, as reported to callers.
///
/// Byte-level and block-level SMBus protocols and 10-bit addressing are not
/// available on this hardware.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Plain I2C messaging.
    pub plain_i2c: bool,
    /// SMBus operations emulated over plain I2C messages.
    pub smbus_emulation: bool,
}

/// Driver configuration.
pub struct I2cConfig {
    /// Clock divisor programmed by [`Variant::configure_speed`].
    pub clk_div: u32,
    /// Maximum STATUS re-reads per wait before giving up with
    /// [`Error::Timeout`].
    pub poll_budget: u32,
    /// Settle time after the reset pulse during init.
    pub settle_delay: MicrosDurationU32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        I2cConfigBuilder::new().build()
    }
}

pub struct I2cConfigBuilder {
    clk_div: u32,
    poll_budget: u32,
    settle_delay: MicrosDurationU32,
}

impl Default for I2cConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clk_div: 200,
            poll_budget: 1_000_000,
            settle_delay: MicrosDurationU32::micros(500),
        }
    }

    #[must_use]
    pub fn clk_div(mut self, clk_div: u32) -> Self {
        self.clk_div = clk_div;
        self
    }

    #[must_use]
    pub fn poll_budget(mut self, poll_budget: u32) -> Self {
        self.poll_budget = poll_budget;
        self
    }

    #[must_use]
    pub fn settle_delay(mut self, settle_delay: MicrosDurationU32) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    #[must_use]
    pub fn build(self) -> I2cConfig {
        I2cConfig {
            clk_div: self.clk_div,
            poll_budget: self.poll_budget,
            settle_delay: self.settle_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i2c::regs::mock::MockRegisterBus;

    #[test]
    fn builder_defaults_match_hardware_defaults() {
        let config = I2cConfigBuilder::new().build();
        assert_eq!(config.clk_div, 200);
        assert_eq!(config.poll_budget, 1_000_000);
        assert_eq!(config.settle_delay, MicrosDurationU32::micros(500));
    }

    #[test]
    fn builder_overrides_stick() {
        let config = I2cConfigBuilder::new()
            .clk_div(100)
            .poll_budget(16)
            .settle_delay(MicrosDurationU32::micros(1000))
            .build();
        assert_eq!(config.clk_div, 100);
        assert_eq!(config.poll_budget, 16);
        assert_eq!(config.settle_delay.to_micros(), 1000);
    }

    #[test]
    fn rt2880_speed_uses_clock_divider_register() {
        let mut regs = MockRegisterBus::new();
        Variant::Rt2880.configure_speed(&mut regs, 200);
        assert_eq!(regs.writes(), vec![(REG_CLKDIV, 200)]);
    }

    #[test]
    fn mt7628_speed_packs_divisor_into_control_register() {
        let mut regs = MockRegisterBus::new();
        Variant::Mt7628.configure_speed(&mut regs, 200);
        assert_eq!(
            regs.writes(),
            vec![
                (REG_SM0CTL0, (200 << 16) | SM0CTL0_DEFAULT),
                (REG_SM0CFG2, 1),
            ]
        );
    }
}
