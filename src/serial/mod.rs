use log::{debug, info};
use std::io::{self, BufRead, BufReader, Read};
use thiserror::Error;

use crate::config::SerialConfig;

pub mod fake;

#[derive(Debug, Error)]
pub enum SerialError {
    #[error("Could not open serial port. Check if the device is connected to {device}")]
    ConnectionUnavailable {
        device: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Serial port error: {0}")]
    Port(#[from] serialport::Error),

    #[error("Serial read failed: {0}")]
    Io(#[from] io::Error),
}

/// Somewhere reading lines come from.
pub trait LineSource {
    /// Whether a read is worth attempting right now. Must not block.
    fn line_available(&mut self) -> Result<bool, SerialError>;

    /// Next complete line with surrounding whitespace removed, or `None` when
    /// the read timed out before a newline arrived.
    fn read_line(&mut self) -> Result<Option<String>, SerialError>;
}

/// Count of bytes the device holds that have not been read yet. Must not block.
pub trait BytesWaiting {
    fn bytes_waiting(&self) -> Result<u32, SerialError>;
}

impl BytesWaiting for Box<dyn serialport::SerialPort> {
    fn bytes_waiting(&self) -> Result<u32, SerialError> {
        Ok(self.bytes_to_read()?)
    }
}

/// Splits a byte stream into lines, keeping a partial line across timeouts.
pub struct LineReader<R> {
    reader: BufReader<R>,
    pending: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            pending: Vec::new(),
        }
    }

    /// Bytes already pulled off the device but not yet returned as a line.
    pub fn buffered(&self) -> usize {
        self.reader.buffer().len() + self.pending.len()
    }

    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) => Ok(None),
            Ok(_) if self.pending.last() != Some(&b'\n') => Ok(None),
            Ok(_) => {
                let line = String::from_utf8_lossy(&self.pending).trim().to_string();
                self.pending.clear();
                Ok(Some(line))
            }
            Err(err) if err.kind() == io::ErrorKind::TimedOut => {
                debug!("Read timed out with {} bytes pending", self.pending.len());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

impl<R: Read + BytesWaiting> LineSource for LineReader<R> {
    /// A partial line alone does not count: reading would only block until
    /// the timeout unless the device has more bytes.
    fn line_available(&mut self) -> Result<bool, SerialError> {
        if !self.reader.buffer().is_empty() {
            return Ok(true);
        }
        Ok(self.reader.get_ref().bytes_waiting()? > 0)
    }

    fn read_line(&mut self) -> Result<Option<String>, SerialError> {
        Ok(LineReader::read_line(self)?)
    }
}

/// The microcontroller link. The port closes when this is dropped.
pub struct SerialLineSource {
    device: String,
    lines: LineReader<Box<dyn serialport::SerialPort>>,
}

impl SerialLineSource {
    pub fn open(config: &SerialConfig) -> Result<Self, SerialError> {
        let port = serialport::new(&config.device, config.baud)
            .timeout(config.read_timeout())
            .open()
            .map_err(|source| SerialError::ConnectionUnavailable {
                device: config.device.clone(),
                source,
            })?;

        info!("Opened serial port {} at {} baud", config.device, config.baud);

        Ok(Self {
            device: config.device.clone(),
            lines: LineReader::new(port),
        })
    }
}

impl LineSource for SerialLineSource {
    fn line_available(&mut self) -> Result<bool, SerialError> {
        LineSource::line_available(&mut self.lines)
    }

    fn read_line(&mut self) -> Result<Option<String>, SerialError> {
        LineSource::read_line(&mut self.lines)
    }
}

impl Drop for SerialLineSource {
    fn drop(&mut self) {
        info!("Released serial port {}", self.device);
    }
}
