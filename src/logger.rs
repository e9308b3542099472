//! Structured logging sink for the core. By default every record forwards
//! through the `log` crate (so a host wiring `env_logger` sees it); a host
//! embedding the core as a library can instead install a callback to capture
//! records itself.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warn,
    Err,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Ctx,
    Bus,
    Cpu,
    Cart,
    Disasm,
}

impl Channel {
    fn bit(self) -> u32 {
        match self {
            Channel::Ctx => 1 << 0,
            Channel::Bus => 1 << 1,
            Channel::Cpu => 1 << 2,
            Channel::Cart => 1 << 3,
            Channel::Disasm => 1 << 4,
        }
    }
}

pub const ALL_CHANNELS: u32 = 0b11111;

type Callback = Box<dyn FnMut(LogLevel, Channel, &str)>;

pub struct Logger {
    callback: Option<Callback>,
    channel_enable_bitmap: u32,
    level: LogLevel,
}

impl Logger {
    pub fn new() -> Self {
        Logger {
            callback: None,
            channel_enable_bitmap: ALL_CHANNELS,
            level: LogLevel::Trace,
        }
    }

    pub fn with_callback(callback: Callback) -> Self {
        Logger {
            callback: Some(callback),
            channel_enable_bitmap: ALL_CHANNELS,
            level: LogLevel::Trace,
        }
    }

    pub fn set_channel_enable_bitmap(&mut self, bitmap: u32) {
        self.channel_enable_bitmap = bitmap;
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn log(&mut self, level: LogLevel, channel: Channel, message: &str) {
        if self.channel_enable_bitmap & channel.bit() == 0 {
            return;
        }
        if level < self.level {
            return;
        }
        if let Some(cb) = self.callback.as_mut() {
            cb(level, channel, message);
            return;
        }
        let target = match channel {
            Channel::Ctx => "rgb::ctx",
            Channel::Bus => "rgb::bus",
            Channel::Cpu => "rgb::cpu",
            Channel::Cart => "rgb::cart",
            Channel::Disasm => "rgb::disasm",
        };
        match level {
            LogLevel::Info => log::info!(target: target, "{}", message),
            LogLevel::Warn => log::warn!(target: target, "{}", message),
            LogLevel::Err => log::error!(target: target, "{}", message),
            LogLevel::Debug => log::debug!(target: target, "{}", message),
            LogLevel::Trace => log::trace!(target: target, "{}", message),
        }
    }
}
