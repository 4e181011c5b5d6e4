use std::net::SocketAddr;

use mcping_common::SessionError;
use mcping_common::network::family::{IpFamily, NegotiatedFamily};
use mcping_core::session::{SessionRequest, resolve_session};

use crate::util::{HostTable, Interfaces, enp9s0, lo, sa, this_host};

fn hosts() -> HostTable {
    HostTable::new()
        .host("host-a", &["10.0.0.5"])
        .host("host-a-alias", &["10.0.0.5"])
        .host("host-b", &["10.0.0.9"])
        .host("host-c", &["10.0.0.10"])
        .host("host-d", &["10.0.0.11"])
        .host("host-v6", &["2001:db8:10::9"])
        .host("dual-a", &["2001:db8:10::5", "10.0.0.5"])
        .host("dual-b", &["10.0.0.9", "2001:db8:10::9"])
        .host("group-v4", &["239.1.2.3"])
        .host("not-a-group", &["10.0.0.200"])
}

fn request(targets: &[&str]) -> SessionRequest {
    SessionRequest::new(targets.iter().copied())
}

/*************************************************************
                      Successful setup
**************************************************************/

#[test]
fn local_host_and_one_peer() {
    let session = resolve_session(&request(&["host-a", "host-b"]), &hosts(), &this_host()).unwrap();

    assert_eq!(session.family, IpFamily::V4);
    assert_eq!(session.local.addr, sa("10.0.0.5:4321"));
    assert_eq!(session.local.interface_name, "enp9s0");
    assert_eq!(session.multicast.addr, sa("232.43.211.234:4321"));
    assert!(!session.single_target);
    assert_eq!(session.remotes.labels(), vec!["host-b"]);
    assert_eq!(session.remote_addrs(), vec![sa("10.0.0.9:4321")]);
}

#[test]
fn local_host_can_be_anywhere_in_the_list() {
    let targets = ["host-b", "host-c", "host-a", "host-d"];
    let session = resolve_session(&request(&targets), &hosts(), &this_host()).unwrap();

    assert_eq!(session.local.host_name, "host-a");
    assert_eq!(session.remotes.len(), targets.len() - 1);
    assert_eq!(session.remotes.labels(), vec!["host-b", "host-c", "host-d"]);
}

#[test]
fn single_target_measures_against_itself() {
    let session = resolve_session(&request(&["host-a"]), &hosts(), &this_host()).unwrap();

    assert!(session.single_target);
    assert_eq!(session.remote_addrs(), vec![session.local.addr]);
}

#[test]
fn duplicate_address_is_collected_once() {
    let targets = ["host-a", "host-b", "host-a-alias", "10.0.0.9"];
    let session = resolve_session(&request(&targets), &hosts(), &this_host()).unwrap();

    assert_eq!(session.remotes.labels(), vec!["host-b"]);
    assert!(!session.single_target);
}

#[test]
fn dual_stack_session_runs_over_ipv6() {
    let session = resolve_session(&request(&["dual-a", "dual-b"]), &hosts(), &this_host()).unwrap();

    assert_eq!(session.negotiated, NegotiatedFamily::Unconstrained);
    assert_eq!(session.family, IpFamily::V6);
    assert_eq!(session.local.addr, sa("[2001:db8:10::5]:4321"));
    assert_eq!(session.multicast.addr, sa("[ff3e::4321:1234]:4321"));
    assert_eq!(session.remote_addrs(), vec![sa("[2001:db8:10::9]:4321")]);
}

#[test]
fn forced_family_always_wins() {
    for (forced, family, local) in [
        (NegotiatedFamily::V4, IpFamily::V4, "10.0.0.5:4321"),
        (NegotiatedFamily::V6, IpFamily::V6, "[2001:db8:10::5]:4321"),
    ] {
        let req = SessionRequest {
            forced,
            ..request(&["dual-a", "dual-b"])
        };
        let session = resolve_session(&req, &hosts(), &this_host()).unwrap();
        assert_eq!(session.negotiated, forced);
        assert_eq!(session.family, family);
        assert_eq!(session.local.addr, sa(local));
    }
}

#[test]
fn single_family_group_picks_the_version() {
    let req = SessionRequest {
        multicast: Some("group-v4".to_string()),
        port: "6000".to_string(),
        ..request(&["dual-a", "dual-b"])
    };
    let session = resolve_session(&req, &hosts(), &this_host()).unwrap();

    assert_eq!(session.family, IpFamily::V4);
    assert_eq!(session.multicast.label, "group-v4");
    assert_eq!(session.multicast.addr, sa("239.1.2.3:6000"));
    assert_eq!(session.port, 6000);
    assert_eq!(session.local.addr, sa("10.0.0.5:6000"));
}

#[test]
fn link_local_session_is_scoped() {
    let table = HostTable::new()
        .host("me", &["fe80::5"])
        .host("peer", &["fe80::9"]);
    let session = resolve_session(&request(&["me", "peer"]), &table, &this_host()).unwrap();

    match session.local.addr {
        SocketAddr::V6(v6) => assert_eq!(v6.scope_id(), enp9s0().index),
        other => panic!("expected IPv6 local address, got {other}"),
    }
}

/*************************************************************
                        Failed setup
**************************************************************/

#[test]
fn loopback_target_is_rejected() {
    let result = resolve_session(&request(&["127.0.0.1"]), &hosts(), &this_host());
    assert_eq!(
        result,
        Err(SessionError::Loopback {
            label: "127.0.0.1".into()
        })
    );
}

#[test]
fn ipv4_only_and_ipv6_only_targets_conflict() {
    let result = resolve_session(&request(&["host-a", "host-v6"]), &hosts(), &this_host());
    assert_eq!(
        result,
        Err(SessionError::HostFamilyMismatch {
            host: "host-v6".into(),
            required: IpFamily::V4,
        })
    );
}

#[test]
fn unicast_group_is_rejected() {
    let req = SessionRequest {
        multicast: Some("not-a-group".to_string()),
        ..request(&["host-a", "host-b"])
    };
    let result = resolve_session(&req, &hosts(), &this_host());
    assert_eq!(
        result,
        Err(SessionError::NotMulticast {
            label: "not-a-group".into()
        })
    );
}

#[test]
fn host_without_matching_interface_fails() {
    let only_loopback = Interfaces(vec![lo()]);
    let result = resolve_session(&request(&["host-b", "host-c"]), &hosts(), &only_loopback);
    assert_eq!(result, Err(SessionError::LocalAddressNotFound));
}

#[test]
fn unknown_host_fails_resolution() {
    let result = resolve_session(&request(&["host-a", "nowhere"]), &hosts(), &this_host());
    assert!(matches!(
        result,
        Err(SessionError::Resolution { label, .. }) if label == "nowhere"
    ));
}

#[test]
fn no_targets_is_usage_error() {
    let result = resolve_session(&request(&[]), &hosts(), &this_host());
    let err = result.unwrap_err();
    assert_eq!(err, SessionError::NoTargets);
    assert!(err.is_usage());
}
