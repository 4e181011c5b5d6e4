mod commands;
mod terminal;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use commands::CommandLine;
use mcping_common::SessionError;
use mcping_common::config::Config;
use mcping_core::resolver::SystemResolver;
use mcping_core::session::resolve_session;
use mcping_core::system::SystemInterfaces;
use terminal::{logging, print};
use tracing::debug;

/// Exit status for every failure, clap's own parse errors included.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let commands = match CommandLine::try_parse() {
        Ok(commands) => commands,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(parse_exit_status(&err));
        }
    };

    logging::init_logging(commands.verbose);

    match run(&commands) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// `--help` and `--version` surface as clap errors printed to stdout; they succeed.
fn parse_exit_status(err: &clap::Error) -> u8 {
    if err.use_stderr() { EXIT_FAILURE } else { 0 }
}

fn run(commands: &CommandLine) -> anyhow::Result<()> {
    let cfg = Config::from_options(commands.options())?;
    debug!("effective options: {cfg:?}");

    let request = commands.session_request();
    let session = resolve_session(&request, &SystemResolver, &SystemInterfaces)?;

    print::session_summary(&session, &cfg);
    Ok(())
}

fn needs_usage(err: &anyhow::Error) -> bool {
    err.downcast_ref::<SessionError>().is_some_and(SessionError::is_usage)
}

fn report(err: &anyhow::Error) {
    eprintln!("mcping: {err:#}");
    if needs_usage(err) {
        eprintln!("{}", CommandLine::command().render_usage());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_status(args: &[&str]) -> u8 {
        match CommandLine::try_parse_from(std::iter::once("mcping").chain(args.iter().copied())) {
            Ok(_) => 0,
            Err(err) => parse_exit_status(&err),
        }
    }

    #[test]
    fn missing_remote_hosts_exit_one() {
        assert_eq!(parse_status(&[]), 1);
    }

    #[test]
    fn unknown_flag_exits_one() {
        assert_eq!(parse_status(&["-x", "host-a"]), 1);
    }

    #[test]
    fn invalid_value_exits_one() {
        assert_eq!(parse_status(&["-M", "bogus", "host-a"]), 1);
    }

    #[test]
    fn help_and_version_exit_zero() {
        assert_eq!(parse_status(&["--help"]), 0);
        assert_eq!(parse_status(&["-V"]), 0);
    }

    #[test]
    fn usage_errors_get_usage_text() {
        assert!(needs_usage(&SessionError::NoTargets.into()));
        let invalid = SessionError::InvalidOption {
            flag: 'M',
            what: "parameter",
            value: "bogus".into(),
        };
        assert!(needs_usage(&invalid.into()));
    }

    #[test]
    fn other_errors_get_no_usage_text() {
        let loopback = SessionError::Loopback {
            label: "127.0.0.1".into(),
        };
        assert!(!needs_usage(&loopback.into()));
        assert!(!needs_usage(&SessionError::LocalAddressNotFound.into()));
        assert!(!needs_usage(&anyhow::anyhow!("unrelated")));
    }
}
