//! Tab-separated interval output.
//!
//! One line per interval: `channel<TAB>start<TAB>length`. Integers are
//! formatted with itoa to keep the write path allocation-free.

use crate::channels::GaitError;
use crate::contact::GaitContacts;
use crate::interval::ContactInterval;
use std::io::{BufWriter, Write};

/// Buffer size for IntervalWriter (64KB default).
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Buffered writer for raw contact intervals.
pub struct IntervalWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> IntervalWriter<W> {
    /// Create a new IntervalWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write one interval line for the named channel.
    #[inline]
    pub fn write_interval(
        &mut self,
        channel: &str,
        interval: &ContactInterval,
    ) -> Result<(), GaitError> {
        self.writer.write_all(channel.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(interval.start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(interval.len).as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write every interval of every channel, channels in declaration order.
    pub fn write_contacts(&mut self, contacts: &GaitContacts) -> Result<usize, GaitError> {
        let mut written = 0;
        for channel in &contacts.channels {
            for interval in &channel.intervals {
                self.write_interval(&channel.name, interval)?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Flush the internal buffer.
    pub fn flush(&mut self) -> Result<(), GaitError> {
        self.writer.flush()?;
        Ok(())
    }
}
