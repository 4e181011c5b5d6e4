//! Session options: defaults, per-flag parsing and the checks that need `-F`.

use std::str::FromStr;
use std::time::Duration;

use crate::error::SessionError;

pub const DEFAULT_PORT: &str = "4321";
pub const DEFAULT_MCAST4_ADDR: &str = "232.43.211.234";
pub const DEFAULT_MCAST6_ADDR: &str = "ff3e::4321:1234";

pub const DEFAULT_WAIT_TIME: Duration = Duration::from_millis(1000);
pub const DEFAULT_TTL: u8 = 64;
/// Default wait-for-finish is this many intervals.
pub const DEFAULT_WFF_TIME_MUL: u32 = 3;

/// Seconds of traffic the duplicate detection buffer should cover.
pub const DUP_BUF_SECS: u64 = 2 * 60;
pub const MIN_DUP_BUF_ITEMS: u32 = 1024;

pub const MIN_RCVBUF_SIZE: u32 = 2048;
pub const MIN_SNDBUF_SIZE: u32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMethod {
    /// Any-source multicast.
    #[default]
    Asm,
    /// Source-specific multicast.
    Ssm,
}

/// Whether the platform can join source-specific groups (`MCAST_JOIN_SOURCE_GROUP`).
pub fn ssm_supported() -> bool {
    cfg!(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "macos",
        target_os = "windows"
    ))
}

impl FromStr for TransportMethod {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asm" => Ok(Self::Asm),
            "ssm" if ssm_supported() => Ok(Self::Ssm),
            _ => Err(SessionError::InvalidOption {
                flag: 'M',
                what: "parameter",
                value: s.to_string(),
            }),
        }
    }
}

/// How long to keep answering after our own pings are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishWait {
    /// `-w -1`
    Indefinite,
    For(Duration),
}

/// Options exactly as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub interval: Option<Duration>,
    pub ttl: Option<u8>,
    /// How many times `-F` was given.
    pub force: u8,
    pub wait_for_finish: Option<FinishWait>,
    pub rate_limit: Option<Duration>,
    pub timeout: Option<Duration>,
    pub rcvbuf_size: Option<u32>,
    pub sndbuf_size: Option<u32>,
    pub transport: TransportMethod,
    pub no_dup_detection: bool,
    pub cont_stat: u8,
    pub quiet: u8,
}

/// Validated session options with every derived value filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub interval: Duration,
    pub ttl: u8,
    pub wait_for_finish: FinishWait,
    /// Maximum time between two processed packets from one host.
    pub rate_limit: Duration,
    /// `None` runs until interrupted.
    pub timeout: Option<Duration>,
    /// `None` keeps the system default.
    pub rcvbuf_size: Option<u32>,
    pub sndbuf_size: Option<u32>,
    pub transport: TransportMethod,
    /// Items in the duplicate detection buffer. 0 disables detection.
    pub dup_buf_items: u32,
    pub cont_stat: bool,
    pub quiet: u8,
}

impl Config {
    pub fn from_options(opts: Options) -> Result<Self, SessionError> {
        let interval = opts.interval.unwrap_or(DEFAULT_WAIT_TIME);
        let ttl = opts.ttl.unwrap_or(DEFAULT_TTL);

        if opts.force < 1 {
            if interval < DEFAULT_WAIT_TIME {
                return Err(SessionError::NeedsForce {
                    flag: 'i',
                    value: format!("{} ms", interval.as_millis()),
                    min: format!("{} ms", DEFAULT_WAIT_TIME.as_millis()),
                    force: "F",
                });
            }
            if ttl < DEFAULT_TTL {
                return Err(SessionError::NeedsForce {
                    flag: 't',
                    value: ttl.to_string(),
                    min: DEFAULT_TTL.to_string(),
                    force: "F",
                });
            }
        }

        if opts.force < 2 && interval.is_zero() {
            return Err(SessionError::NeedsForce {
                flag: 'i',
                value: "0 ms".to_string(),
                min: "1 ms".to_string(),
                force: "FF",
            });
        }

        let wait_for_finish = opts
            .wait_for_finish
            .unwrap_or(FinishWait::For(interval * DEFAULT_WFF_TIME_MUL));

        Ok(Self {
            interval,
            ttl,
            wait_for_finish,
            rate_limit: opts.rate_limit.unwrap_or(interval),
            timeout: opts.timeout.filter(|timeout| !timeout.is_zero()),
            rcvbuf_size: opts.rcvbuf_size,
            sndbuf_size: opts.sndbuf_size,
            transport: opts.transport,
            dup_buf_items: dup_buf_items(interval, opts.no_dup_detection),
            cont_stat: opts.cont_stat > 0,
            quiet: opts.quiet,
        })
    }
}

fn dup_buf_items(interval: Duration, disabled: bool) -> u32 {
    let interval_ms = interval.as_millis() as u64;
    if disabled || interval_ms == 0 {
        return 0;
    }

    // + 1 compensates for the truncating division
    let items = (DUP_BUF_SECS * 1000) / interval_ms + 1;
    u32::try_from(items).unwrap_or(u32::MAX).max(MIN_DUP_BUF_ITEMS)
}

fn illegal_number(flag: char, value: &str) -> SessionError {
    SessionError::InvalidOption {
        flag,
        what: "number",
        value: value.to_string(),
    }
}

fn parse_number(flag: char, value: &str) -> Result<f64, SessionError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| illegal_number(flag, value))
}

fn secs_to_duration(flag: char, value: &str, secs: f64) -> Result<Duration, SessionError> {
    let millis = secs * 1000.0;
    if millis > i32::MAX as f64 {
        return Err(illegal_number(flag, value));
    }
    Ok(Duration::from_millis(millis as u64))
}

/// Parses a non-negative number of seconds (`-i`, `-r`, `-T`) with millisecond precision.
pub fn parse_seconds(flag: char, value: &str) -> Result<Duration, SessionError> {
    let secs = parse_number(flag, value)?;
    if secs < 0.0 {
        return Err(illegal_number(flag, value));
    }
    secs_to_duration(flag, value, secs)
}

/// Like [`parse_seconds`], but also accepts exactly `-1`.
pub fn parse_finish_wait(value: &str) -> Result<FinishWait, SessionError> {
    let secs = parse_number('w', value)?;
    if secs == -1.0 {
        return Ok(FinishWait::Indefinite);
    }
    if secs < 0.0 {
        return Err(illegal_number('w', value));
    }
    secs_to_duration('w', value, secs).map(FinishWait::For)
}

/// Parses a socket buffer size of at least `min` bytes.
pub fn parse_buffer_size(flag: char, min: u32, value: &str) -> Result<u32, SessionError> {
    let size = parse_number(flag, value)?;
    if size < f64::from(min) || size > i32::MAX as f64 {
        return Err(illegal_number(flag, value));
    }
    Ok(size as u32)
}

pub fn parse_ttl(value: &str) -> Result<u8, SessionError> {
    value
        .parse::<u8>()
        .ok()
        .filter(|ttl| *ttl > 0)
        .ok_or_else(|| illegal_number('t', value))
}
