//! PI GCS (General Command Set) wire transport.
//!
//! This module implements the low-level framing of the GCS protocol used by
//! Physik Instrumente (PI) motion controllers: C-663/C-863/C-867 motor
//! controllers, E-5xx/E-7xx piezo controllers and the Hexapod families.
//!
//! # Protocol Overview
//!
//! GCS is a text-based protocol where commands are 3 characters (e.g., `MOV`, `POS`)
//! and queries append a `?` (e.g., `POS?`). Messages are terminated with LF (0x0A).
//! A handful of single-byte control commands (`#4`, `#5`, `#7`, `#24`) are sent
//! without a terminator and answer with compact status words.
//!
//! ## Response Format
//!
//! Single-value responses: `<AxisID>=<Value>\n`
//!
//! Multi-line responses use ` \n` (space+LF) as line separators, with the final
//! line ending in just `\n`:
//!
//! ```text
//! 1=100.5 \n
//! 2=200.3 \n
//! 3=150.0\n
//! ```
//!
//! ## Error Checking
//!
//! Commands that change state produce no reply. The caller must follow them with
//! `ERR?` to learn whether the controller accepted them; see
//! [`GcsController::query_error`](super::GcsController::query_error).
//!
//! # Transport
//!
//! The device is reachable over RS-232/USB-serial (via the `serialport` crate) or
//! TCP/IP (port 50000 on most PI controllers). Any `Read + Write` stream works,
//! which is how the unit tests drive the protocol without hardware.
//!
//! # Character Encoding
//!
//! PI devices use Latin-1 (CP1252) encoding, not UTF-8. Replies are converted
//! byte-by-byte, which also preserves raw status bytes such as the `0xB0`/`0xB1`
//! answer to the `#7` busy query.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace};

use super::error_codes::{self, COM_ERROR, COM_TIMEOUT};

/// Default TCP port for PI controllers.
pub const DEFAULT_PORT: u16 = 50000;

/// Default timeout applied to every wire operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur while driving a GCS controller.
///
/// The variants fall into four groups: communication failures (the device is
/// unreachable), protocol errors (the device refused a command), parse errors,
/// and capability/contention errors that are raised before anything is sent.
#[derive(Error, Debug)]
pub enum GcsError {
    /// Low-level I/O error (socket or serial read/write failure).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to open the connection to the controller.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// No response received within the timeout period.
    #[error("Timeout waiting for response")]
    Timeout,

    /// Fewer bytes were written than requested.
    #[error("Short write: sent {written} of {requested} bytes")]
    ShortWrite {
        /// Bytes handed to the transport
        requested: usize,
        /// Bytes the transport accepted
        written: usize,
    },

    /// Response from controller doesn't match expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Failed to parse response values.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Controller reported a non-zero code via `ERR?`.
    #[error("Controller error {code}: {message}")]
    ControllerError {
        /// GCS error code
        code: i32,
        /// Human-readable error description
        message: String,
    },

    /// A move command was refused by the controller.
    #[error("Move on axis {axis} rejected, GCS error {code}: {message}")]
    MotionRejected {
        /// Axis name
        axis: String,
        /// GCS error code
        code: i32,
        /// Human-readable error description
        message: String,
    },

    /// A halt was not acknowledged with the controller's stop code.
    #[error("Stop on axis {axis} not confirmed (GCS error {code})")]
    StopNotConfirmed {
        /// Axis name
        axis: String,
        /// Error code seen instead of the stop code
        code: i32,
    },

    /// The identification string matched no known controller family.
    #[error("Unsupported controller: {0}")]
    UnsupportedController(String),

    /// Homing requested on an axis with neither reference sensor nor limit switches.
    #[error("Axis {0} has no reference sensor or limit switches")]
    NoReferenceCapability(String),

    /// Pivot point changes are refused while the platform is moving.
    #[error("Cannot change pivot point while platform is moving")]
    PivotWhileMoving,

    /// The controller does not accept a new target right now.
    #[error("Controller does not accept new target for axis {0} (busy)")]
    ControllerBusy(String),

    /// Axis index outside the configured range.
    #[error("Unknown axis index {0}")]
    UnknownAxis(usize),

    /// More axes were configured than the controller reports.
    #[error("Configured for {requested} axes but the controller has {found}")]
    AxisCount { requested: usize, found: usize },
}

impl GcsError {
    /// True for failures of the link itself rather than refusals by the device.
    pub fn is_communication(&self) -> bool {
        matches!(
            self,
            GcsError::Io(_)
                | GcsError::ConnectionFailed(_)
                | GcsError::Timeout
                | GcsError::ShortWrite { .. }
        )
    }

    /// Numeric GCS code associated with this error, if any.
    ///
    /// Timeouts map to `COM_TIMEOUT` and other link failures to `COM_ERROR`,
    /// mirroring the codes the vendor DLL reports.
    pub fn gcs_code(&self) -> Option<i32> {
        match self {
            GcsError::Timeout => Some(COM_TIMEOUT),
            GcsError::Io(_) | GcsError::ConnectionFailed(_) | GcsError::ShortWrite { .. } => {
                Some(COM_ERROR)
            }
            GcsError::ControllerError { code, .. }
            | GcsError::MotionRejected { code, .. }
            | GcsError::StopNotConfirmed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Build a [`GcsError::ControllerError`] with the translated message.
    pub fn controller(code: i32) -> Self {
        GcsError::ControllerError {
            code,
            message: error_codes::translate(code).to_string(),
        }
    }
}

/// Result type for GCS operations.
pub type GcsResult<T> = Result<T, GcsError>;

/// A byte stream a [`GcsDevice`] can talk over.
pub trait Connection: Read + Write + Send {
    /// Apply a read/write timeout to the underlying stream.
    fn set_timeout(&mut self, _timeout: Duration) -> std::io::Result<()> {
        Ok(())
    }
}

impl Connection for TcpStream {
    fn set_timeout(&mut self, timeout: Duration) -> std::io::Result<()> {
        self.set_read_timeout(Some(timeout))?;
        self.set_write_timeout(Some(timeout))
    }
}

impl Connection for Box<dyn serialport::SerialPort> {
    fn set_timeout(&mut self, timeout: Duration) -> std::io::Result<()> {
        serialport::SerialPort::set_timeout(self.as_mut(), timeout).map_err(std::io::Error::from)
    }
}

/// Low-level GCS device.
///
/// Handles message framing only: writing commands with their terminator and
/// reading complete (possibly multi-line) replies. It performs no error
/// checking and no retries. Thread-safe access goes through
/// [`PiInterface`](super::PiInterface).
pub struct GcsDevice {
    connection: Box<dyn Connection>,
    timeout: Duration,
}

impl GcsDevice {
    /// Wrap an already-open connection.
    pub fn new(mut connection: Box<dyn Connection>) -> GcsResult<Self> {
        connection.set_timeout(DEFAULT_TIMEOUT)?;
        Ok(Self {
            connection,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Connect to a PI controller over TCP/IP.
    ///
    /// # Errors
    ///
    /// Returns [`GcsError::ConnectionFailed`] if the TCP connection cannot be established.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> GcsResult<Self> {
        let stream = TcpStream::connect(&addr)
            .map_err(|e| GcsError::ConnectionFailed(format!("Failed to connect: {e}")))?;

        debug!("Connected to PI device via TCP");
        Self::new(Box::new(stream))
    }

    /// Open a PI controller on a serial port.
    ///
    /// PI controllers use 8N1 framing without flow control; only the baud
    /// rate varies between models (115200 on current C-863/C-867).
    pub fn open_serial(path: &str, baud_rate: u32) -> GcsResult<Self> {
        let port = serialport::new(path, baud_rate)
            .timeout(DEFAULT_TIMEOUT)
            .open()
            .map_err(|e| GcsError::ConnectionFailed(format!("Failed to open {path}: {e}")))?;

        debug!("Opened PI device on {} at {} baud", path, baud_rate);
        Self::new(Box::new(port))
    }

    /// Set the timeout for read/write operations.
    pub fn set_timeout(&mut self, timeout: Duration) -> GcsResult<()> {
        self.timeout = timeout;
        self.connection.set_timeout(timeout)?;
        Ok(())
    }

    /// Current read/write timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn write_checked(&mut self, bytes: &[u8]) -> GcsResult<()> {
        let written = self.connection.write(bytes).map_err(map_io_error)?;
        if written != bytes.len() {
            return Err(GcsError::ShortWrite {
                requested: bytes.len(),
                written,
            });
        }
        Ok(())
    }

    /// Send a text command followed by the LF terminator. No reply is read.
    pub fn send_only(&mut self, command: &str) -> GcsResult<()> {
        debug!("GCS send: {:?}", command);
        self.write_checked(command.as_bytes())?;
        self.write_checked(b"\n")?;
        self.connection.flush().map_err(map_io_error)?;
        Ok(())
    }

    /// Send a single control byte (no terminator). No reply is read.
    pub fn send_byte(&mut self, byte: u8) -> GcsResult<()> {
        debug!("GCS send: #{}", byte);
        self.write_checked(&[byte])?;
        self.connection.flush().map_err(map_io_error)?;
        Ok(())
    }

    /// Send a text command and read the complete reply.
    pub fn send_and_receive(&mut self, command: &str) -> GcsResult<String> {
        self.send_only(command)?;
        self.read()
    }

    /// Send a control byte and read the complete reply.
    pub fn send_byte_and_receive(&mut self, byte: u8) -> GcsResult<String> {
        self.send_byte(byte)?;
        self.read()
    }

    /// Read a complete GCS response from the device.
    ///
    /// Reads bytes until detecting the GCS end-of-line marker: a newline (`\n`)
    /// that is NOT preceded by a space. Lines ending in ` \n` announce a
    /// continuation and are concatenated with the following ones.
    ///
    /// # Errors
    ///
    /// Returns [`GcsError::Timeout`] if no complete response is received within
    /// the configured timeout period.
    pub fn read(&mut self) -> GcsResult<String> {
        let mut buf = [0u8; 1];
        let mut bytes = Vec::new();

        loop {
            match self.connection.read(&mut buf) {
                Ok(0) => return Err(GcsError::Timeout),
                Ok(_) => {
                    bytes.push(buf[0]);

                    // Check for GCS EOL: '\n' not preceded by space
                    if buf[0] == b'\n' {
                        let len = bytes.len();
                        if len < 2 || bytes[len - 2] != b' ' {
                            break;
                        }
                    }
                }
                Err(e) => return Err(map_io_error(e)),
            }
        }

        // Latin-1 bytes 0-255 map directly to Unicode code points
        let response: String = bytes.iter().map(|&b| b as char).collect();
        trace!("GCS recv: {:?}", response);
        Ok(response)
    }

    /// Parse `axis=value` response format into a HashMap.
    ///
    /// # Example
    ///
    /// ```
    /// use gcs_motor::pi::GcsDevice;
    ///
    /// let response = "1=100.5 \n2=200.3\n";
    /// let values = GcsDevice::parse_axis_values(response).unwrap();
    /// assert_eq!(values.get("1"), Some(&100.5));
    /// assert_eq!(values.get("2"), Some(&200.3));
    /// ```
    pub fn parse_axis_values(response: &str) -> GcsResult<HashMap<String, f64>> {
        let mut result = HashMap::new();

        for line in response.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (axis, value) = line.split_once('=').ok_or_else(|| {
                GcsError::ParseError(format!("Invalid response format: {line}"))
            })?;
            let value: f64 = value
                .trim()
                .parse()
                .map_err(|_| GcsError::ParseError(format!("Invalid number: {}", value.trim())))?;

            result.insert(axis.trim().to_string(), value);
        }

        Ok(result)
    }

    /// Extract the value part of a reply line.
    ///
    /// Takes the text after the last `=` of the first non-empty line, so both
    /// `X=1.5` and `1 0xE=10000` (parameter replies) work. Replies without `=`,
    /// such as `VLS?` on some Hexapods, are returned whole.
    pub fn value_after_equals(response: &str) -> &str {
        let line = response
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("");
        match line.rsplit_once('=') {
            Some((_, value)) => value.trim(),
            None => line,
        }
    }

    /// Parse the value part of a reply as a float.
    pub fn parse_value(response: &str) -> GcsResult<f64> {
        let value = Self::value_after_equals(response);
        value
            .parse()
            .map_err(|_| GcsError::ParseError(format!("Invalid number: {value:?}")))
    }

    /// Parse the value part of a reply as a boolean (non-zero integer is true).
    pub fn parse_bool(response: &str) -> GcsResult<bool> {
        let value = Self::value_after_equals(response);
        value
            .parse::<i64>()
            .map(|v| v != 0)
            .map_err(|_| GcsError::ParseError(format!("Invalid flag: {value:?}")))
    }
}

fn map_io_error(e: std::io::Error) -> GcsError {
    match e.kind() {
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => GcsError::Timeout,
        _ => GcsError::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pi::testing::ScriptedPort;

    fn device(port: &ScriptedPort) -> GcsDevice {
        GcsDevice::new(Box::new(port.clone())).unwrap()
    }

    #[test]
    fn test_send_only_appends_terminator() {
        let port = ScriptedPort::new();
        let mut dev = device(&port);
        dev.send_only("MOV 1 2").unwrap();
        assert_eq!(port.sent(), vec!["MOV 1 2"]);
        assert_eq!(port.raw_written(), b"MOV 1 2\n");
    }

    #[test]
    fn test_control_byte_has_no_terminator() {
        let port = ScriptedPort::new();
        let mut dev = device(&port);
        dev.send_byte(24).unwrap();
        assert_eq!(port.raw_written(), vec![24u8]);
    }

    #[test]
    fn test_multiline_reply_is_concatenated() {
        let port = ScriptedPort::new();
        port.reply("SAI?", "1 \n2 \n3");
        let mut dev = device(&port);
        let response = dev.send_and_receive("SAI?").unwrap();
        assert_eq!(response, "1 \n2 \n3\n");
        assert_eq!(response.lines().count(), 3);
    }

    #[test]
    fn test_missing_reply_is_timeout() {
        let port = ScriptedPort::new();
        let mut dev = device(&port);
        let err = dev.send_and_receive("HAR? 1").unwrap_err();
        assert!(matches!(err, GcsError::Timeout));
        assert!(err.is_communication());
        assert_eq!(err.gcs_code(), Some(COM_TIMEOUT));
    }

    #[test]
    fn test_short_write_is_reported() {
        let port = ScriptedPort::new();
        port.limit_writes_to(3);
        let mut dev = device(&port);
        let err = dev.send_only("MOV 1 2").unwrap_err();
        assert!(matches!(
            err,
            GcsError::ShortWrite {
                requested: 7,
                written: 3
            }
        ));
        assert!(err.is_communication());
    }

    #[test]
    fn test_latin1_status_byte_survives() {
        let port = ScriptedPort::new();
        port.reply("#7", "\u{B0}");
        let mut dev = device(&port);
        let response = dev.send_byte_and_receive(7).unwrap();
        assert_eq!(response.chars().next().map(u32::from), Some(0xB0));
    }

    #[test]
    fn test_value_after_equals() {
        assert_eq!(GcsDevice::value_after_equals("X=1.5\n"), "1.5");
        assert_eq!(GcsDevice::value_after_equals("1 0xE=10000\n"), "10000");
        assert_eq!(GcsDevice::value_after_equals("12.5\n"), "12.5");
        assert_eq!(GcsDevice::parse_value("1=-0.25").unwrap(), -0.25);
        assert!(GcsDevice::parse_bool("1=1").unwrap());
        assert!(!GcsDevice::parse_bool("1=0").unwrap());
        // trailing continuation space and parameter-style replies
        assert!(GcsDevice::parse_bool("A=1 \n").unwrap());
        assert!(GcsDevice::parse_bool("1 20=1\n").unwrap());
        assert!(GcsDevice::parse_value("garbage").is_err());
    }

    #[test]
    fn test_parse_axis_values() {
        let values = GcsDevice::parse_axis_values("1=100.5 \n2=200.3\n").unwrap();
        assert_eq!(values.get("1"), Some(&100.5));
        assert_eq!(values.get("2"), Some(&200.3));
        assert!(GcsDevice::parse_axis_values("no equals").is_err());
    }

    #[test]
    fn test_controller_error_carries_translation() {
        let err = GcsError::controller(10);
        assert_eq!(err.gcs_code(), Some(10));
        assert!(!err.is_communication());
        assert!(err.to_string().contains("stopped"));
    }
}
