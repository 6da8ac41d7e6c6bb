// Licensed under the Apache-2.0 license

//! Hardware abstraction traits for the I2C driver.
//!
//! The traits split the driver into a core surface (lifecycle and
//! capability reporting) and the master transfer operations, so the
//! transfer engine can be exercised and wrapped independently of the
//! concrete register block behind it.

use crate::common::ResetControl;
use crate::i2c::common::Capabilities;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{AddressMode, Operation, SevenBitAddress};

/// Core I2C hardware interface.
///
/// Foundation trait for any controller implementation: one-time hardware
/// bring-up and capability reporting toward the bus framework.
pub trait I2cHardwareCore {
    /// Hardware-specific error type that implements embedded-hal error traits
    type Error: embedded_hal::i2c::Error + core::fmt::Debug;

    /// Reset and configure the controller.
    ///
    /// The reset line belongs to the platform; implementations pulse it via
    /// the collaborator and wait out the settle time with `delay` before
    /// touching their own registers.
    fn init(&mut self, reset: &mut dyn ResetControl, delay: &mut dyn DelayNs);

    /// Operations this controller supports. Must be stable across calls.
    fn capabilities(&self) -> Capabilities;
}

/// I2C master mode operations.
///
/// The address type `A` must implement `AddressMode` for embedded-hal
/// compatibility; this hardware only serves `SevenBitAddress`.
pub trait I2cMaster<A: AddressMode = SevenBitAddress>: I2cHardwareCore {
    /// Write data to a device at the given address.
    ///
    /// # Errors
    ///
    /// Returns an error if the message fails validation or the hardware
    /// stops responding mid-transfer.
    fn write(&mut self, addr: A, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address.
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware stops responding mid-transfer.
    fn read(&mut self, addr: A, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read from the same device in one transaction.
    ///
    /// # Errors
    ///
    /// Returns the first error from either phase; the read is not attempted
    /// after a failed write.
    fn write_read(&mut self, addr: A, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Execute a sequence of operations against one device address.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; remaining operations are not
    /// attempted and completed ones are not rolled back.
    fn transaction_slice(
        &mut self,
        addr: A,
        ops_slice: &mut [Operation<'_>],
    ) -> Result<(), Self::Error>;
}
