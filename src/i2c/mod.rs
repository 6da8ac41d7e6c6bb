// Licensed under the Apache-2.0 license

//! Ralink/MediaTek I2C driver module.
//!
//! Polled master-mode driver for the register-mapped I2C block found on
//! RT2880 and MT7628 class SoCs, designed for bare-metal and `no_std`
//! environments. Hardware access goes through the [`regs::RegisterBus`]
//! seam; the embedded-hal surface lives in [`i2c_controller`].

pub mod common;
pub mod i2c_controller;
pub mod regs;
pub mod rt2880_i2c;
pub mod traits;

pub use common::{
    Capabilities, Error, I2cConfig, I2cConfigBuilder, Message, TargetAddress, TransactionError,
    Variant,
};
pub use i2c_controller::I2cController;
pub use regs::{MmioRegisterBus, RegisterBus};
pub use rt2880_i2c::RalinkI2c;
pub use traits::{I2cHardwareCore, I2cMaster};
