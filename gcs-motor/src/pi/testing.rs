//! Scripted GCS endpoint for unit tests.
//!
//! [`ScriptedPort`] plays the controller side of a connection: it splits the
//! written byte stream into commands, records them, and queues the reply that
//! was scripted for each one. Queries with no script produce no bytes, which
//! the device sees as a timeout, the same as real hardware that ignores an
//! unknown query.

use std::collections::{HashMap, VecDeque};
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};

use super::gcs::{Connection, GcsDevice};
use super::interface::PiInterface;

type Handler = Box<dyn FnMut(&str) -> Option<String> + Send>;

#[derive(Default)]
struct Script {
    fixed: HashMap<String, String>,
    once: HashMap<String, VecDeque<String>>,
    errors: VecDeque<i32>,
    handler: Option<Handler>,
    sent: Vec<String>,
    raw: Vec<u8>,
    line: Vec<u8>,
    pending: VecDeque<u8>,
    write_limit: Option<usize>,
}

impl Script {
    fn complete(&mut self, command: String) {
        let reply = if command == "ERR?" {
            Some(self.errors.pop_front().unwrap_or(0).to_string())
        } else if let Some(reply) = self.once.get_mut(&command).and_then(VecDeque::pop_front) {
            Some(reply)
        } else if let Some(reply) = self.handler.as_mut().and_then(|h| h(&command)) {
            Some(reply)
        } else {
            self.fixed.get(&command).cloned()
        };

        if let Some(reply) = reply {
            self.pending.extend(reply.chars().map(|c| c as u32 as u8));
            if !reply.ends_with('\n') {
                self.pending.push_back(b'\n');
            }
        }
        self.sent.push(command);
    }
}

/// In-memory controller stand-in. Clones share the same script.
#[derive(Clone, Default)]
pub struct ScriptedPort {
    script: Arc<Mutex<Script>>,
}

impl ScriptedPort {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Script) -> R) -> R {
        f(&mut self.script.lock().unwrap())
    }

    /// Answer `command` with `reply` every time it is sent.
    pub fn reply(&self, command: &str, reply: &str) -> &Self {
        self.with(|s| s.fixed.insert(command.to_string(), reply.to_string()));
        self
    }

    /// Answer the next occurrence of `command` with `reply`. Takes priority
    /// over fixed replies; several calls queue up in order.
    pub fn reply_once(&self, command: &str, reply: &str) -> &Self {
        self.with(|s| {
            s.once
                .entry(command.to_string())
                .or_default()
                .push_back(reply.to_string())
        });
        self
    }

    /// Queue an `ERR?` answer. Without queued codes `ERR?` answers `0`.
    pub fn push_error(&self, code: i32) -> &Self {
        self.with(|s| s.errors.push_back(code));
        self
    }

    /// Compute replies dynamically. Consulted after one-shot replies and
    /// before fixed ones.
    pub fn on_command(&self, handler: impl FnMut(&str) -> Option<String> + Send + 'static) {
        self.with(|s| s.handler = Some(Box::new(handler)));
    }

    /// Accept at most `limit` bytes per write call.
    pub fn limit_writes_to(&self, limit: usize) {
        self.with(|s| s.write_limit = Some(limit));
    }

    /// Every command received so far. Control bytes appear as `#<n>`.
    pub fn sent(&self) -> Vec<String> {
        self.with(|s| s.sent.clone())
    }

    /// Commands starting with `prefix`.
    pub fn sent_matching(&self, prefix: &str) -> Vec<String> {
        self.with(|s| {
            s.sent
                .iter()
                .filter(|c| c.starts_with(prefix))
                .cloned()
                .collect()
        })
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.sent_matching(prefix).len()
    }

    pub fn clear_sent(&self) {
        self.with(|s| s.sent.clear());
    }

    pub fn raw_written(&self) -> Vec<u8> {
        self.with(|s| s.raw.clone())
    }

    /// A device talking to this port.
    pub fn device(&self) -> GcsDevice {
        GcsDevice::new(Box::new(self.clone())).unwrap()
    }

    /// An interface talking to this port.
    pub fn interface(&self) -> PiInterface {
        PiInterface::new(self.device())
    }
}

impl Write for ScriptedPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with(|s| {
            let accepted = s.write_limit.map_or(buf.len(), |l| l.min(buf.len()));
            for &byte in &buf[..accepted] {
                s.raw.push(byte);
                if byte == b'\n' {
                    let command = String::from_utf8_lossy(&s.line).into_owned();
                    s.line.clear();
                    s.complete(command);
                } else if byte < 0x20 && s.line.is_empty() {
                    s.complete(format!("#{byte}"));
                } else {
                    s.line.push(byte);
                }
            }
            Ok(accepted)
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for ScriptedPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.with(|s| {
            if s.pending.is_empty() {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "no scripted reply"));
            }
            let mut n = 0;
            while n < buf.len() {
                match s.pending.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            Ok(n)
        })
    }
}

impl Connection for ScriptedPort {}

/// Port scripted as a two-axis C-863 style motor controller.
pub fn motor_port() -> ScriptedPort {
    let port = ScriptedPort::new();
    port.reply("*IDN?", "(c)2015 Physik Instrumente(PI) Karlsruhe, C-863.11,0,1.2.3.4")
        .reply("SAI?", "1 \n2")
        .reply("CSV?", "2.0");
    for axis in ["1", "2"] {
        port.reply(&format!("CST? {axis}"), &format!("{axis}=M-110.1DG"))
            .reply(&format!("SPA? {axis} 14"), &format!("{axis} 14=10000"))
            .reply(&format!("SPA? {axis} 15"), &format!("{axis} 15=1"))
            .reply(&format!("SPA? {axis} 74"), &format!("{axis} 74=20"))
            .reply(&format!("SPA? {axis} 75"), &format!("{axis} 75=15"))
            .reply(&format!("VEL? {axis}"), &format!("{axis}=1.5"))
            .reply(&format!("ACC? {axis}"), &format!("{axis}=5"))
            .reply(&format!("DEC? {axis}"), &format!("{axis}=5"))
            .reply(&format!("POS? {axis}"), &format!("{axis}=0"))
            .reply(&format!("TMN? {axis}"), &format!("{axis}=-10"))
            .reply(&format!("TMX? {axis}"), &format!("{axis}=10"))
            .reply(&format!("FRF? {axis}"), &format!("{axis}=1"))
            .reply(&format!("TRS? {axis}"), &format!("{axis}=1"))
            .reply(&format!("LIM? {axis}"), &format!("{axis}=1"))
            .reply(&format!("SVO? {axis}"), &format!("{axis}=1"));
    }
    // both axes idle with servo on, 4 hex digits per axis
    port.reply("#4", "0x90009000").reply("#5", "0");
    port
}

/// Port scripted as a three-channel E-727 style piezo controller.
pub fn piezo_port() -> ScriptedPort {
    let port = ScriptedPort::new();
    port.reply("*IDN?", "(c)2013 Physik Instrumente (PI) GmbH & Co. KG, E-727, 0113000123, 01.00.00.10")
        .reply("SAI?", "1 \n2 \n3")
        .reply("CSV?", "2.0");
    for axis in ["1", "2", "3"] {
        port.reply(&format!("CST? {axis}"), &format!("{axis}=S-330.2SL"))
            .reply(&format!("VEL? {axis}"), &format!("{axis}=100"))
            .reply(&format!("POS? {axis}"), &format!("{axis}=0"))
            .reply(&format!("TMN? {axis}"), &format!("{axis}=0"))
            .reply(&format!("TMX? {axis}"), &format!("{axis}=100"))
            .reply(&format!("SVO? {axis}"), &format!("{axis}=1"));
    }
    port.reply("#5", "0");
    port
}

/// Port scripted as a GCS 1 Hexapod.
pub fn hexapod_port() -> ScriptedPort {
    let port = ScriptedPort::new();
    port.reply("*IDN?", "Physik Instrumente, F-206 HEXAPOD, 0, 2.1")
        .reply("CSV?", "1.0")
        .reply("SPI? RST", "R=0.5 \nS=-1.25 \nT=3");
    port.on_command(|command| {
        let (query, axis) = command.split_once(' ')?;
        match query {
            "VEL?" => Some(format!("{axis}=10")),
            "POS?" => Some(format!("{axis}=0")),
            _ => None,
        }
    });
    port.reply("#5", "0");
    port
}
