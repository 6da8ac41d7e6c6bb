// Licensed under the Apache-2.0 license

//! Crate-wide support types shared by the driver modules.
//!
//! Provides the logging seam used throughout the crate and the platform
//! collaborator trait for the controller reset line.

use core::fmt;

/// Logging sink used by the drivers.
///
/// Implementations decide where formatted messages go. The drivers only ever
/// call [`Logger::log`] on their own instance, so a no-op implementation
/// compiles the logging away entirely.
pub trait Logger {
    fn log(&mut self, args: fmt::Arguments<'_>);
}

/// Logger that discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&mut self, _args: fmt::Arguments<'_>) {}
}

/// Logger backed by any [`embedded_io::Write`] sink, typically a UART.
///
/// Write errors are swallowed; logging must never fail a transfer.
pub struct WriterLogger<W: embedded_io::Write> {
    writer: W,
}

impl<W: embedded_io::Write> WriterLogger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: embedded_io::Write> Logger for WriterLogger<W> {
    fn log(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.writer.write_fmt(args);
        let _ = self.writer.write_all(b"\r\n");
    }
}

/// Platform reset line for a peripheral block.
///
/// Toggling the reset line is owned by platform firmware or a reset
/// controller outside this crate; the drivers only ask for one pulse and
/// assume the block is out of reset when the call returns. Settle time is
/// handled by the caller's delay after the pulse.
pub trait ResetControl {
    fn device_reset(&mut self);
}

impl<T: ResetControl + ?Sized> ResetControl for &mut T {
    fn device_reset(&mut self) {
        T::device_reset(self);
    }
}
