// Licensed under the Apache-2.0 license

//! Hardware driver for the RT2880/MT7628 I2C master block.
//!
//! This is a polled, single-master engine: no interrupts, no DMA. All data
//! moves one byte at a time through the 64-byte hardware FIFO, paced by
//! status-register polls. The register sequencing in the transfer paths is
//! load-bearing; see the individual methods for the ordering constraints.

use crate::common::{Logger, NoOpLogger, ResetControl};
use crate::i2c::common::{
    Capabilities, Error, I2cConfig, Message, TargetAddress, TransactionError, Variant,
};
use crate::i2c::regs::{
    RegisterBus, CONFIG_ADDRDIS, CONFIG_DEVADLEN_7, FIFO_DEPTH, MAX_WRITE_LEN, READ_CMD,
    REG_ADDR, REG_BYTECNT, REG_CONFIG, REG_DATAIN, REG_DATAOUT, REG_DEVADDR, REG_STARTXFR,
    REG_STATUS, STATUS_BUSY, STATUS_DATARDY, STATUS_SDOEMPTY, WRITE_CMD,
};
use crate::i2c::traits::{I2cHardwareCore, I2cMaster};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Operation, SevenBitAddress};

/// Driver for one physical controller instance.
///
/// Owns the register bus exclusively for its lifetime. The engine holds no
/// internal lock; callers must serialize transactions externally and must
/// construct at most one driver per physical register block.
pub struct RalinkI2c<R: RegisterBus, L: Logger = NoOpLogger> {
    regs: R,
    variant: Variant,
    config: I2cConfig,
    logger: L,
}

impl<R: RegisterBus> RalinkI2c<R> {
    /// Creates a driver without a logging sink.
    pub fn new(regs: R, variant: Variant, config: I2cConfig) -> Self {
        Self::with_logger(regs, variant, config, NoOpLogger)
    }
}

impl<R: RegisterBus, L: Logger> RalinkI2c<R, L> {
    pub fn with_logger(regs: R, variant: Variant, config: I2cConfig, logger: L) -> Self {
        Self {
            regs,
            variant,
            config,
            logger,
        }
    }

    /// Releases the register bus.
    pub fn free(self) -> R {
        self.regs
    }

    /// Resets and configures the controller.
    ///
    /// Pulses the platform reset line, waits out the settle delay, selects
    /// 7-bit device addressing with the internal register-address phase
    /// disabled, then programs the variant's default bus speed.
    pub fn init<RC: ResetControl, D: DelayNs>(&mut self, reset: &mut RC, delay: &mut D) {
        reset.device_reset();
        delay.delay_us(self.config.settle_delay.to_micros());
        self.regs
            .write(REG_CONFIG, CONFIG_DEVADLEN_7 | CONFIG_ADDRDIS);
        self.variant
            .configure_speed(&mut self.regs, self.config.clk_div);
        self.logger
            .log(format_args!("i2c: controller reset, {:?}", self.variant));
    }

    /// Reports the operations this controller supports.
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities {
            plain_i2c: true,
            smbus_emulation: true,
        }
    }

    /// Executes an ordered transaction against one target device.
    ///
    /// The device address is programmed once, then each message runs through
    /// the transfer engine in order. The first failure aborts the remainder
    /// and reports how many messages completed; finished messages are not
    /// rolled back and the failed one is not retried.
    pub fn execute(
        &mut self,
        addr: TargetAddress,
        messages: &mut [Message<'_>],
    ) -> Result<usize, TransactionError> {
        self.program_target(addr)
            .map_err(|source| TransactionError {
                completed: 0,
                source,
            })?;
        for (completed, message) in messages.iter_mut().enumerate() {
            self.transfer_message(message)
                .map_err(|source| TransactionError { completed, source })?;
        }
        Ok(messages.len())
    }

    /// Runs one message through the block transfer engine.
    pub fn transfer_message(&mut self, message: &mut Message<'_>) -> Result<(), Error> {
        match message {
            Message::Write(data) => self.write_bytes(data),
            Message::Read(buffer) => self.read_bytes(buffer),
        }
    }

    fn program_target(&mut self, addr: TargetAddress) -> Result<(), Error> {
        let TargetAddress::SevenBit(addr) = addr else {
            self.logger
                .log(format_args!("i2c: 10-bit addressing not supported"));
            return Err(Error::UnsupportedAddressMode);
        };
        self.regs.write(REG_DEVADDR, u32::from(addr));
        // No sub-address phase on this block; the register must still be
        // cleared.
        self.regs.write(REG_ADDR, 0);
        Ok(())
    }

    /// Write path.
    ///
    /// The start command goes out only after the first byte is staged in the
    /// data-out register, and the transmit-empty poll follows every byte
    /// including the first. Reordering either step misbehaves on hardware.
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Error> {
        if data.len() > MAX_WRITE_LEN {
            self.logger.log(format_args!(
                "i2c: write of {} bytes exceeds {} byte limit",
                data.len(),
                MAX_WRITE_LEN
            ));
            return Err(Error::LengthExceeded);
        }
        if data.is_empty() {
            return Ok(());
        }
        self.wait_bus_idle()?;
        self.regs.write(REG_BYTECNT, data.len() as u32 - 1);
        for (i, &byte) in data.iter().enumerate() {
            self.regs.write(REG_DATAOUT, u32::from(byte));
            if i == 0 {
                self.regs.write(REG_STARTXFR, WRITE_CMD);
            }
            self.wait_tx_ready()?;
        }
        Ok(())
    }

    /// Read path.
    ///
    /// Each FIFO-sized block is one start-command cycle: wait for the bus,
    /// program the block's byte count, issue the read command, then drain
    /// the FIFO one polled byte at a time. A trailing partial block follows
    /// the same cycle with its shorter count; a length that is a multiple of
    /// the FIFO depth issues no trailing command.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        for block in buffer.chunks_mut(FIFO_DEPTH) {
            self.wait_bus_idle()?;
            self.regs.write(REG_BYTECNT, block.len() as u32 - 1);
            self.regs.write(REG_STARTXFR, READ_CMD);
            for slot in block.iter_mut() {
                self.wait_rx_ready()?;
                *slot = self.regs.read(REG_DATAIN) as u8;
            }
        }
        Ok(())
    }

    /// Blocks until the BUSY flag clears.
    fn wait_bus_idle(&mut self) -> Result<(), Error> {
        self.wait_status(STATUS_BUSY, false)
    }

    /// Blocks until the output buffer reports empty.
    fn wait_tx_ready(&mut self) -> Result<(), Error> {
        self.wait_status(STATUS_SDOEMPTY, true)
    }

    /// Blocks until the data-ready flag sets.
    fn wait_rx_ready(&mut self) -> Result<(), Error> {
        self.wait_status(STATUS_DATARDY, true)
    }

    // The hardware never guarantees the flag will arrive, so every spin is
    // bounded by the configured poll budget rather than looping forever.
    fn wait_status(&mut self, mask: u32, want_set: bool) -> Result<(), Error> {
        for _ in 0..self.config.poll_budget {
            let set = self.regs.read(REG_STATUS) & mask != 0;
            if set == want_set {
                return Ok(());
            }
        }
        self.logger.log(format_args!(
            "i2c: poll budget exhausted waiting on status mask {mask:#x}"
        ));
        Err(Error::Timeout)
    }
}

impl<R: RegisterBus, L: Logger> I2cHardwareCore for RalinkI2c<R, L> {
    type Error = Error;

    fn init(&mut self, mut reset: &mut dyn ResetControl, mut delay: &mut dyn DelayNs) {
        RalinkI2c::init(self, &mut reset, &mut delay);
    }

    fn capabilities(&self) -> Capabilities {
        RalinkI2c::capabilities(self)
    }
}

impl<R: RegisterBus, L: Logger> I2cMaster for RalinkI2c<R, L> {
    fn write(&mut self, addr: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        self.execute(addr.into(), &mut [Message::Write(bytes)])
            .map(|_| ())
            .map_err(|e| e.source)
    }

    fn read(&mut self, addr: SevenBitAddress, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.execute(addr.into(), &mut [Message::Read(buffer)])
            .map(|_| ())
            .map_err(|e| e.source)
    }

    fn write_read(
        &mut self,
        addr: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.execute(
            addr.into(),
            &mut [Message::Write(bytes), Message::Read(buffer)],
        )
        .map(|_| ())
        .map_err(|e| e.source)
    }

    fn transaction_slice(
        &mut self,
        addr: SevenBitAddress,
        ops_slice: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.program_target(addr.into())?;
        for op in ops_slice {
            match op {
                Operation::Write(bytes) => self.write_bytes(bytes)?,
                Operation::Read(buffer) => self.read_bytes(buffer)?,
            }
        }
        Ok(())
    }
}
