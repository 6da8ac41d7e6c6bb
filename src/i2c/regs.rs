// Licensed under the Apache-2.0 license

//! Register map and raw access seam for the RT2880/MT7628 I2C block.
//!
//! The controller exposes a small set of 32-bit registers inside a mapped
//! block at a platform-supplied base address. All driver logic goes through
//! the [`RegisterBus`] trait so the sequencing can be exercised against a
//! recording implementation in tests; [`MmioRegisterBus`] is the volatile
//! implementation used on hardware.

use core::ptr::NonNull;

pub const REG_CONFIG: usize = 0x00;
pub const REG_CLKDIV: usize = 0x04;
pub const REG_DEVADDR: usize = 0x08;
pub const REG_ADDR: usize = 0x0C;
pub const REG_DATAOUT: usize = 0x10;
pub const REG_DATAIN: usize = 0x14;
pub const REG_STATUS: usize = 0x18;
pub const REG_STARTXFR: usize = 0x1C;
pub const REG_BYTECNT: usize = 0x20;
pub const REG_SM0CFG2: usize = 0x28;
pub const REG_SM0CTL0: usize = 0x40;

pub const STATUS_STARTERR: u32 = 1 << 4;
pub const STATUS_ACKERR: u32 = 1 << 3;
pub const STATUS_DATARDY: u32 = 1 << 2;
pub const STATUS_SDOEMPTY: u32 = 1 << 1;
pub const STATUS_BUSY: u32 = 1 << 0;

/// 7-bit device address length encoding in CONFIG.
pub const CONFIG_DEVADLEN_7: u32 = 6 << 2;
/// Disables the internal register-address phase; this block has no
/// sub-address concept.
pub const CONFIG_ADDRDIS: u32 = 1 << 1;

pub const READ_CMD: u32 = 0x01;
pub const WRITE_CMD: u32 = 0x00;

pub const SM0CTL0_OD: u32 = 1 << 31;
pub const SM0CTL0_VTRIG: u32 = 1 << 28;
pub const SM0CTL0_OUTHI: u32 = 1 << 6;
pub const SM0CTL0_STRETCH: u32 = 1 << 1;
pub const SM0CTL0_DEFAULT: u32 = SM0CTL0_OD | SM0CTL0_VTRIG | SM0CTL0_OUTHI | SM0CTL0_STRETCH;

/// Depth of the hardware data FIFO; one read block per start command.
pub const FIFO_DEPTH: usize = 64;
/// Largest single write transaction the byte-count register accepts.
pub const MAX_WRITE_LEN: usize = 63;

/// Ordered 32-bit access to the controller register block.
///
/// Accesses must reach the hardware in program order; implementations may
/// not cache, merge, or reorder them. There is no error path: an unmapped
/// register block is a fatal platform configuration defect, not a
/// recoverable condition.
pub trait RegisterBus {
    fn read(&mut self, offset: usize) -> u32;
    fn write(&mut self, offset: usize, value: u32);
}

/// Volatile MMIO implementation of [`RegisterBus`].
pub struct MmioRegisterBus {
    base: NonNull<u8>,
}

impl MmioRegisterBus {
    /// Wraps a mapped controller block.
    ///
    /// # Safety
    ///
    /// `base` must be the non-null virtual address of the controller's
    /// register block, mapped device memory covering at least `REG_SM0CTL0 +
    /// 4` bytes, 4-byte aligned, and valid for the lifetime of the returned
    /// value. At most one `MmioRegisterBus` may exist per physical block.
    pub const unsafe fn new(base: *mut u8) -> Self {
        Self {
            base: NonNull::new_unchecked(base),
        }
    }
}

// One instance per register block; the raw pointer is only ever used from
// the owning driver.
unsafe impl Send for MmioRegisterBus {}

impl RegisterBus for MmioRegisterBus {
    fn read(&mut self, offset: usize) -> u32 {
        unsafe { self.base.as_ptr().add(offset).cast::<u32>().read_volatile() }
    }

    fn write(&mut self, offset: usize, value: u32) {
        unsafe {
            self.base
                .as_ptr()
                .add(offset)
                .cast::<u32>()
                .write_volatile(value);
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording register bus used by the driver unit tests.

    use super::*;
    use std::collections::VecDeque;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum RegOp {
        Read(usize),
        Write(usize, u32),
    }

    /// Register bus that records every access and answers reads from a
    /// scripted state.
    ///
    /// STATUS reads report an idle controller with both ready bits set
    /// unless `stuck_busy` is flipped; DATAIN reads pop scripted bytes.
    pub struct MockRegisterBus {
        pub ops: Vec<RegOp>,
        pub rx_data: VecDeque<u8>,
        pub stuck_busy: bool,
    }

    impl MockRegisterBus {
        pub fn new() -> Self {
            Self {
                ops: Vec::new(),
                rx_data: VecDeque::new(),
                stuck_busy: false,
            }
        }

        pub fn with_rx_data(data: impl IntoIterator<Item = u8>) -> Self {
            let mut bus = Self::new();
            bus.rx_data = data.into_iter().collect();
            bus
        }

        /// All writes issued, in order.
        pub fn writes(&self) -> Vec<(usize, u32)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    RegOp::Write(offset, value) => Some((*offset, *value)),
                    RegOp::Read(_) => None,
                })
                .collect()
        }

        /// Writes issued to one register, in order.
        pub fn writes_to(&self, offset: usize) -> Vec<u32> {
            self.writes()
                .into_iter()
                .filter(|(o, _)| *o == offset)
                .map(|(_, v)| v)
                .collect()
        }

        pub fn status_reads(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, RegOp::Read(REG_STATUS)))
                .count()
        }
    }

    impl RegisterBus for MockRegisterBus {
        fn read(&mut self, offset: usize) -> u32 {
            self.ops.push(RegOp::Read(offset));
            match offset {
                REG_STATUS => {
                    if self.stuck_busy {
                        STATUS_BUSY
                    } else {
                        STATUS_SDOEMPTY | STATUS_DATARDY
                    }
                }
                REG_DATAIN => u32::from(self.rx_data.pop_front().unwrap_or(0)),
                _ => 0,
            }
        }

        fn write(&mut self, offset: usize, value: u32) {
            self.ops.push(RegOp::Write(offset, value));
        }
    }
}
