use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// Command for the `node-registry` binary with registry env vars cleared.
pub fn registry_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_node-registry"));
    cmd.env_remove("NODE_REGISTRY_URL")
        .env_remove("NODE_REGISTRY_SOURCE")
        .env("RUST_LOG", "off");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run and return the output whatever the exit status.
pub fn run_command_unchecked(mut cmd: Command) -> Result<Output> {
    cmd.output()
        .with_context(|| format!("failed to run command: {:?}", cmd))
}

pub fn write_temp(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate temp file")?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

pub fn path_arg(path: &Path) -> Result<&str> {
    path.to_str().context("temp path is not valid UTF-8")
}
