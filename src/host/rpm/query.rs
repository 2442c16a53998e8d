//! Timed `rpm` / `dnf repoquery` invocations
//!
//! Both tools print one `name epoch version release arch` line per package
//! with our query format. Their globs are looser than `NamePattern`
//! (`kernel` vs `kernel*`), so names are re-checked after parsing.

use crate::core::types::PackageRef;
use crate::error::{KmodError, Result};
use crate::traits::NamePattern;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub(super) struct PackageQuery {
    program: &'static str,
    args: Vec<&'static str>,
    timeout: Duration,
}

impl PackageQuery {
    pub(super) fn new(program: &'static str, timeout: Duration) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout,
        }
    }

    pub(super) fn arg(mut self, arg: &'static str) -> Self {
        self.args.push(arg);
        self
    }

    /// Run the query for `pattern` and return the matching packages.
    pub(super) fn run(&self, pattern: &NamePattern) -> Result<Vec<PackageRef>> {
        let stdout = self.capture(&pattern.as_glob())?;
        Ok(parse_query_output(&stdout)
            .into_iter()
            .filter(|pkg| pattern.matches(&pkg.name))
            .collect())
    }

    fn capture(&self, glob: &str) -> Result<String> {
        let command_line = std::iter::once(self.program)
            .chain(self.args.iter().copied())
            .chain(std::iter::once(glob))
            .collect::<Vec<_>>()
            .join(" ");
        let failed = |reason: String| KmodError::SystemCommandFailed {
            command: command_line.clone(),
            reason,
        };

        let mut child = Command::new(self.program)
            .args(&self.args)
            .arg(glob)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(failed("output pipes unavailable".to_string()));
        };

        // Readers end once the child exits or is killed
        thread::scope(|scope| {
            let out = scope.spawn(move || drain(stdout));
            let err = scope.spawn(move || drain(stderr));

            let status = wait_with_deadline(&mut child, self.timeout).map_err(&failed)?;
            let out = out.join().unwrap_or_default();
            let err = err.join().unwrap_or_default();

            if status.success() {
                Ok(out)
            } else {
                Err(failed(err.trim().to_string()))
            }
        })
    }
}

fn drain(mut pipe: impl Read) -> String {
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::result::Result<ExitStatus, String> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().map_err(|e| e.to_string())? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(format!("no answer within {}s", timeout.as_secs()));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Parse tab-separated `name epoch version release arch` lines.
///
/// Malformed lines are skipped. An epoch of `(none)` or empty means 0.
pub fn parse_query_output(output: &str) -> Vec<PackageRef> {
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
            let [name, epoch, version, release, arch] = fields.as_slice() else {
                return None;
            };
            if name.is_empty() || version.is_empty() {
                return None;
            }
            Some(
                PackageRef::new(name, version, release)
                    .with_epoch(epoch.parse().unwrap_or(0))
                    .with_arch(arch),
            )
        })
        .collect()
}
