//! Command-line front end for the Vyatta REST service.
//!
//! # Usage
//!
//! ```bash
//! vyrest --host 192.168.1.1 --user vyatta --pass vyatta setup-session
//! vyrest --host 192.168.1.1 --user vyatta --pass vyatta --sid <SID> set system host-name edge1
//! vyrest --host 192.168.1.1 --user vyatta --pass vyatta --sid <SID> commit
//! vyrest --host 192.168.1.1 --user vyatta --pass vyatta run-cmd show interfaces
//! ```
//!
//! Connection flags fall back to `VYREST_*` environment variables. Set
//! `RUST_LOG=debug` for verbose output.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::AsyncWriteExt;

use vyrest::error::DecodeError;
use vyrest::{CertificateVerification, Client, ClientBuilder, ConfigSession, Error, HttpTransport};

#[derive(Debug, Parser)]
#[command(name = "vyrest", version, about = "Client for the Vyatta REST service")]
struct Cli {
    /// Hostname or address of the device
    #[arg(long, env = "VYREST_HOST")]
    host: String,

    /// HTTPS port
    #[arg(long, env = "VYREST_PORT")]
    port: Option<u16>,

    /// Username
    #[arg(long, env = "VYREST_USER")]
    user: String,

    /// Password
    #[arg(long, env = "VYREST_PASS", hide_env_values = true, default_value = "")]
    pass: String,

    /// Session-id to which to connect
    #[arg(long, env = "VYREST_SID")]
    sid: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Pause between output polls in milliseconds
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Verify the device certificate instead of accepting self-signed ones
    #[arg(long)]
    strict_tls: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Setup a new session
    SetupSession,
    /// List all sessions
    ListSessions,
    /// Teardown the session given by --sid
    TeardownSession,
    /// Teardown all sessions owned by your user
    TeardownSessions,
    /// Check if the session given by --sid exists
    SessionExists,
    /// Create a path in the configuration hierarchy
    Set {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        path: Vec<String>,
    },
    /// Delete a path from the configuration hierarchy
    Delete {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        path: Vec<String>,
    },
    /// Get children of the path
    Get {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        path: Vec<String>,
    },
    /// Commit
    Commit,
    /// Save to the bootup configuration
    Save,
    /// Load configuration from bootup configuration
    Load,
    /// Discard configuration changes
    Discard,
    /// Show candidate configuration
    Show,
    /// Get children of operational path
    GetOp {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        path: Vec<String>,
    },
    /// Start an operational command
    StartCmd {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        path: Vec<String>,
    },
    /// Get output from a previously started operational command
    GetOutput { pid: String },
    /// Kill an operational command
    KillProcess { pid: String },
    /// Kill all currently running operational commands for your user
    KillProcesses,
    /// List all running operational commands
    ListProcesses,
    /// Start and retrieve output from an operational mode command
    RunCmd {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        path: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> vyrest::Result<Client> {
    let mut builder = ClientBuilder::new(&cli.host)
        .username(&cli.user)
        .password(&cli.pass)
        .timeout(Duration::from_secs(cli.timeout));
    if let Some(port) = cli.port {
        builder = builder.port(port);
    }
    if let Some(ms) = cli.poll_interval {
        builder = builder.poll_interval(Duration::from_millis(ms));
    }
    if cli.strict_tls {
        builder = builder.certificate_verification(CertificateVerification::Strict);
    }
    builder.build()
}

fn require_sid(sid: Option<&str>) -> vyrest::Result<&str> {
    sid.filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidArgument {
            message: "must supply --sid".to_string(),
        })
}

async fn session<'a>(
    client: &'a Client,
    sid: Option<&str>,
) -> vyrest::Result<ConfigSession<'a, HttpTransport>> {
    client.sessions().get_session(require_sid(sid)?).await
}

async fn run(cli: Cli) -> vyrest::Result<()> {
    let client = build_client(&cli)?;
    let sid = cli.sid.as_deref();

    match &cli.command {
        CliCommand::SetupSession => {
            let session = client.sessions().create_session().await?;
            println!("{}", session.id());
        }
        CliCommand::ListSessions => {
            let sessions = client.sessions().list_sessions().await?;
            print_table(
                ["session-id", "username", "description"],
                sessions
                    .into_iter()
                    .map(|s| [s.id, s.username, s.description])
                    .collect(),
            );
        }
        CliCommand::TeardownSession => {
            session(&client, sid).await?.teardown().await?;
        }
        CliCommand::TeardownSessions => client.sessions().teardown_all_sessions().await?,
        CliCommand::SessionExists => {
            let exists = client.sessions().session_exists(require_sid(sid)?).await?;
            println!("{}", exists);
        }
        CliCommand::Set { path } => session(&client, sid).await?.set(path).await?,
        CliCommand::Delete { path } => session(&client, sid).await?.delete(path).await?,
        CliCommand::Get { path } => {
            let node = session(&client, sid).await?.get(path).await?;
            let rendered = serde_json::to_string_pretty(&node).map_err(DecodeError::from)?;
            println!("{}", rendered);
        }
        CliCommand::Commit => print_message(session(&client, sid).await?.commit().await?),
        CliCommand::Save => print_message(session(&client, sid).await?.save().await?),
        CliCommand::Load => print_message(session(&client, sid).await?.load().await?),
        CliCommand::Discard => print_message(session(&client, sid).await?.discard().await?),
        CliCommand::Show => println!("{}", session(&client, sid).await?.show().await?),
        CliCommand::GetOp { path } => {
            let node = client.get_operational(path).await?;
            for child in node.children {
                println!("{}", child);
            }
        }
        CliCommand::StartCmd { path } => {
            let command = client.start_command(path).await?;
            println!("{}", command.pid());
        }
        CliCommand::GetOutput { pid } => {
            let output = client.processes().get_command(pid).await?.output().await?;
            println!("{}", output);
        }
        CliCommand::KillProcess { pid } => {
            client.processes().get_command(pid).await?.kill().await?;
        }
        CliCommand::KillProcesses => client.processes().kill_processes().await?,
        CliCommand::ListProcesses => {
            let processes = client.processes().list_processes().await?;
            print_table(
                ["process-id", "username", "command"],
                processes
                    .into_iter()
                    .map(|p| [p.id, p.username, p.command])
                    .collect(),
            );
        }
        CliCommand::RunCmd { path } => {
            let command = client.start_command(path).await?;
            let mut stdout = tokio::io::stdout();
            command.stream_output(&mut stdout).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

fn print_message(message: String) {
    if !message.is_empty() {
        println!("{}", message);
    }
}

/// Print rows as left-aligned columns with a dashed header underline.
fn print_table(headers: [&str; 3], rows: Vec<[String; 3]>) {
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let underline = headers.map(|h| "-".repeat(h.len()));
    let header = headers.map(str::to_string);
    for row in [header, underline].iter().chain(&rows) {
        println!(
            "{:<w0$}  {:<w1$}  {}",
            row[0],
            row[1],
            row[2],
            w0 = widths[0],
            w1 = widths[1]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = vec!["vyrest", "--host", "router", "--user", "vyatta"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
    }

    #[test]
    fn test_parse_variadic_path() {
        let cli = parse(&["set", "interfaces", "dataplane", "dp0s3", "address", "dhcp"]).unwrap();
        match cli.command {
            CliCommand::Set { path } => {
                assert_eq!(path, vec!["interfaces", "dataplane", "dp0s3", "address", "dhcp"])
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_hyphen_value_in_path() {
        let cli = parse(&["run-cmd", "ping", "10.0.0.1", "-c", "3"]).unwrap();
        match cli.command {
            CliCommand::RunCmd { path } => assert_eq!(path, vec!["ping", "10.0.0.1", "-c", "3"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_get_allows_empty_path() {
        let cli = parse(&["--sid", "S1", "get"]).unwrap();
        assert_eq!(cli.sid.as_deref(), Some("S1"));
        assert!(matches!(cli.command, CliCommand::Get { path } if path.is_empty()));
    }

    #[test]
    fn test_parse_arity() {
        assert!(matches!(
            parse(&["set"]).unwrap().command,
            CliCommand::Set { path } if path.is_empty()
        ));
        assert!(matches!(
            parse(&["run-cmd"]).unwrap().command,
            CliCommand::RunCmd { path } if path.is_empty()
        ));
        assert!(parse(&["get-output"]).is_err());
        assert!(parse(&["kill-process", "7"]).is_ok());
        assert!(parse(&["teardown-sessions"]).is_ok());
        assert!(parse(&["no-such-command"]).is_err());
    }

    #[test]
    fn test_require_sid() {
        assert_eq!(require_sid(Some("S1")).unwrap(), "S1");
        let err = require_sid(None).unwrap_err();
        assert_eq!(err.kind(), vyrest::ErrorKind::InvalidArgument);
        assert!(require_sid(Some("")).is_err());
    }
}
