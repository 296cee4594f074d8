use predicates::prelude::*;

use crate::harness::certd_cmd;

#[test]
fn version_flag() {
    certd_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_lists_options() {
    certd_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--listen"))
        .stdout(predicate::str::contains("--self-name"))
        .stdout(predicate::str::contains("--ttl"))
        .stdout(predicate::str::contains("--issue-delay"));
}

#[test]
fn unknown_flag() {
    certd_cmd().arg("--bogus").assert().failure().code(2);
}

#[test]
fn invalid_duration() {
    certd_cmd()
        .args(["--ttl", "someday"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--ttl"));
}

#[test]
fn invalid_listen_address() {
    certd_cmd().args(["--listen", "not-an-address"]).assert().failure().code(2);
}

#[test]
fn empty_self_name() {
    certd_cmd()
        .args(["--self-name", ""])
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("self name must not be empty"));
}

#[test]
fn zero_ttl() {
    certd_cmd()
        .args(["--self-name", "me", "--ttl", "0s"])
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("ttl must be greater than 0"));
}

#[test]
fn env_var_is_read() {
    certd_cmd()
        .env("CERTD_TTL", "0s")
        .args(["--self-name", "me"])
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("ttl"));
}

#[test]
fn listen_address_in_use() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap().to_string();
    certd_cmd()
        .args(["--self-name", "me", "--issue-delay", "0s", "--listen", &addr])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(format!("bind {addr}")));
}
