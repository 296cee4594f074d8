use std::net::{SocketAddr, TcpListener};
use std::process::{Child, Command as StdCommand, Stdio};
use std::time::{Duration, Instant};

use assert_cmd::Command;

const CERTD_ENV: [&str; 5] =
    ["CERTD_LISTEN", "CERTD_SELF_NAME", "CERTD_TTL", "CERTD_ISSUE_DELAY", "CERTD_LOG_LEVEL"];

/// Pre-configured `assert_cmd::Command` for the `certd` binary.
///
/// Clears certd-specific env vars to prevent test environment leaks.
pub fn certd_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_certd"));
    for var in CERTD_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// A running `certd` process on a free local port. Killed on drop.
pub struct TestServer {
    child: Child,
    addr: SocketAddr,
}

impl TestServer {
    /// Spawn `certd` and wait until `/healthz` answers.
    pub async fn start(self_name: &str) -> Self {
        let addr = free_addr();
        let mut cmd = StdCommand::new(env!("CARGO_BIN_EXE_certd"));
        for var in CERTD_ENV {
            cmd.env_remove(var);
        }
        let child = cmd
            .args(["--listen", &addr.to_string()])
            .args(["--self-name", self_name])
            .args(["--issue-delay", "20ms"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn certd");

        let server = Self { child, addr };
        server.wait_ready().await;
        server
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    async fn wait_ready(&self) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if let Ok(resp) = reqwest::get(self.url("/healthz")).await
                && resp.status().is_success()
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("certd did not become ready on {}", self.addr);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}
