use std::fmt::Display;

use crate::terminal::logging::PRINT_TARGET;
use crate::terminal::{colors, format};
use colored::*;
use mcping_common::config::{Config, FinishWait};
use mcping_core::session::Session;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 16;

pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn aligned_line<V>(key: &str, value: V)
where
    V: Display + WithDefaultColor,
{
    let whitespace: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    let colon: String = format!(
        "{}{}",
        whitespace.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    );
    let value: ColoredString = value.with_default(colors::TEXT_DEFAULT);
    print_status(format!("{}{} {}", key.color(colors::PRIMARY), colon, value));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn as_tree_one_level(key_value_pair: Vec<(String, ColoredString)>) {
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let dots: String = ".".repeat(5usize.saturating_sub(key.len()));
        let output: String = format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        );
        print(&output);
    }
}

pub fn end_of_program() {
    print(&format!(
        "{}",
        "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)
    ));
}

fn seconds(duration: std::time::Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}

/// Prints the resolved session and the effective options. Nothing is printed with `-q`.
pub fn session_summary(session: &Session, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    header("session");
    aligned_line("IP version", session.family.to_string());
    aligned_line("Local host", session.local.host_name.as_str());
    aligned_line("Local address", format::socket_addr(&session.local.addr));
    aligned_line("Interface", session.local.interface_name.as_str());
    aligned_line("Multicast group", format::socket_addr(&session.multicast.addr));
    if session.single_target {
        aligned_line("Mode", "single target");
    }
    aligned_line("Remote hosts", session.remotes.len().to_string());
    as_tree_one_level(format::remotes_to_key_value_pair(
        session
            .remotes
            .iter()
            .filter_map(|target| target.resolved_addr().map(|addr| (target.label(), addr))),
    ));

    header("options");
    aligned_line("Interval", seconds(cfg.interval));
    aligned_line("TTL", cfg.ttl.to_string());
    aligned_line("Rate limit", seconds(cfg.rate_limit));
    let wait = match cfg.wait_for_finish {
        FinishWait::Indefinite => String::from("indefinite"),
        FinishWait::For(duration) => seconds(duration),
    };
    aligned_line("Wait for finish", wait);
    let timeout = cfg.timeout.map_or_else(|| String::from("none"), seconds);
    aligned_line("Timeout", timeout);
    aligned_line("Transport", format!("{:?}", cfg.transport).to_lowercase());
    let dup = match cfg.dup_buf_items {
        0 => String::from("off"),
        items => format!("{items} items"),
    };
    aligned_line("Dup detection", dup);
    if let Some(size) = cfg.rcvbuf_size {
        aligned_line("Receive buffer", size.to_string());
    }
    if let Some(size) = cfg.sndbuf_size {
        aligned_line("Send buffer", size.to_string());
    }
    end_of_program();
}
