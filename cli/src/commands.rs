use std::time::Duration;

use clap::{ArgAction, Parser};
use mcping_common::SessionError;
use mcping_common::config::{
    self, DEFAULT_PORT, FinishWait, MIN_RCVBUF_SIZE, MIN_SNDBUF_SIZE, Options, TransportMethod,
};
use mcping_common::network::family::NegotiatedFamily;
use mcping_core::session::SessionRequest;

#[derive(Parser, Debug)]
#[command(name = "mcping")]
#[command(about = "Ping a set of hosts over a shared multicast group.")]
#[command(version)]
pub struct CommandLine {
    /// Force IPv4
    #[arg(short = '4', overrides_with = "ipv6")]
    pub ipv4: bool,

    /// Force IPv6
    #[arg(short = '6', overrides_with = "ipv4")]
    pub ipv6: bool,

    /// Print statistics continuously
    #[arg(short = 'C', action = ArgAction::Count)]
    pub cont_stat: u8,

    /// Disable duplicate detection
    #[arg(short = 'D')]
    pub no_dup_detection: bool,

    /// Allow intervals and TTLs below the safe minimum (repeat for zero interval)
    #[arg(short = 'F', action = ArgAction::Count)]
    pub force: u8,

    /// Seconds between sent requests
    #[arg(short = 'i', value_name = "INTERVAL", value_parser = parse_interval)]
    pub interval: Option<Duration>,

    /// Multicast transport method
    #[arg(short = 'M', value_name = "asm|ssm")]
    pub transport: Option<TransportMethod>,

    /// Multicast group address
    #[arg(short = 'm', value_name = "MCAST_ADDR")]
    pub mcast_addr: Option<String>,

    /// Port shared by all participants
    #[arg(short = 'p', value_name = "PORT", default_value = DEFAULT_PORT)]
    pub port: String,

    /// Quiet output (repeat to be quieter)
    #[arg(short = 'q', action = ArgAction::Count)]
    pub quiet: u8,

    /// Receive buffer size in bytes
    #[arg(short = 'R', value_name = "RCVBUF", value_parser = parse_rcvbuf)]
    pub rcvbuf_size: Option<u32>,

    /// Seconds to wait before answering a new client
    #[arg(short = 'r', value_name = "RATE_LIMIT", value_parser = parse_rate_limit)]
    pub rate_limit: Option<Duration>,

    /// Send buffer size in bytes
    #[arg(short = 'S', value_name = "SNDBUF", value_parser = parse_sndbuf)]
    pub sndbuf_size: Option<u32>,

    /// Seconds to run before exiting, 0 runs forever
    #[arg(short = 'T', value_name = "TIMEOUT", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Multicast TTL / hop limit
    #[arg(short = 't', value_name = "TTL", value_parser = config::parse_ttl)]
    pub ttl: Option<u8>,

    /// Increase log verbosity
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Seconds to wait for the other hosts to finish, -1 waits forever
    #[arg(
        short = 'w',
        value_name = "WAIT_FOR_FINISH",
        allow_negative_numbers = true,
        value_parser = config::parse_finish_wait
    )]
    pub wait_for_finish: Option<FinishWait>,

    /// Hosts taking part in the session, including this one
    #[arg(value_name = "REMOTE_ADDR", required = true)]
    pub remote_addrs: Vec<String>,
}

fn parse_interval(value: &str) -> Result<Duration, SessionError> {
    config::parse_seconds('i', value)
}

fn parse_rate_limit(value: &str) -> Result<Duration, SessionError> {
    config::parse_seconds('r', value)
}

fn parse_timeout(value: &str) -> Result<Duration, SessionError> {
    config::parse_seconds('T', value)
}

fn parse_rcvbuf(value: &str) -> Result<u32, SessionError> {
    config::parse_buffer_size('R', MIN_RCVBUF_SIZE, value)
}

fn parse_sndbuf(value: &str) -> Result<u32, SessionError> {
    config::parse_buffer_size('S', MIN_SNDBUF_SIZE, value)
}

impl CommandLine {
    pub fn forced_family(&self) -> NegotiatedFamily {
        if self.ipv6 {
            NegotiatedFamily::V6
        } else if self.ipv4 {
            NegotiatedFamily::V4
        } else {
            NegotiatedFamily::Unconstrained
        }
    }

    pub fn options(&self) -> Options {
        Options {
            interval: self.interval,
            ttl: self.ttl,
            force: self.force,
            wait_for_finish: self.wait_for_finish,
            rate_limit: self.rate_limit,
            timeout: self.timeout,
            rcvbuf_size: self.rcvbuf_size,
            sndbuf_size: self.sndbuf_size,
            transport: self.transport.unwrap_or_default(),
            no_dup_detection: self.no_dup_detection,
            cont_stat: self.cont_stat,
            quiet: self.quiet,
        }
    }

    pub fn session_request(&self) -> SessionRequest {
        SessionRequest {
            targets: self.remote_addrs.clone(),
            forced: self.forced_family(),
            multicast: self.mcast_addr.clone(),
            port: self.port.clone(),
        }
    }
}
