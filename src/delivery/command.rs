//! External command delivery
//!
//! Runs `argv... <prompt>`; the prompt is always the final argument and is
//! passed as a single argv entry, never through a shell.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info};

use super::{DeliveryHandle, DeliveryReport, PromptDelivery, excerpt};
use crate::types::{Result, ReviewError};

const METHOD: &str = "command";

#[derive(Debug, Clone)]
pub struct CommandDelivery {
    program: String,
    args: Vec<String>,
}

impl CommandDelivery {
    pub fn new(argv: Vec<String>) -> Result<Self> {
        let mut argv = argv.into_iter();
        let program = argv
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ReviewError::delivery(METHOD, "no command configured"))?;

        Ok(Self {
            program,
            args: argv.collect(),
        })
    }
}

#[async_trait]
impl PromptDelivery for CommandDelivery {
    fn name(&self) -> &str {
        METHOD
    }

    async fn launch(&self, prompt: &str) -> Result<DeliveryHandle> {
        debug!("Launching {} {:?} with {} char prompt", self.program, self.args, prompt.chars().count());
        let start = Instant::now();

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ReviewError::delivery(
                    METHOD,
                    format!("Failed to launch '{}': {}. Is it installed?", self.program, e),
                )
            })?;

        info!("Delivery started: {}", self.program);
        let program = self.program.clone();

        Ok(DeliveryHandle::spawn(METHOD, async move {
            let output = child.wait_with_output().await.map_err(|e| {
                ReviewError::delivery(METHOD, format!("'{}' execution failed: {}", program, e))
            })?;

            let success = output.status.success();
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            let shown = if success || stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };

            debug!("'{}' exited with {:?}", program, output.status.code());
            Ok(DeliveryReport {
                method: METHOD.to_string(),
                success,
                exit_code: output.status.code(),
                excerpt: excerpt(&shown),
                elapsed: start.elapsed(),
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;

    fn delivery(argv: &[&str]) -> CommandDelivery {
        CommandDelivery::new(argv.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(CommandDelivery::new(Vec::new()).is_err());
        assert!(CommandDelivery::new(vec![" ".to_string()]).is_err());
    }

    #[tokio::test]
    async fn test_prompt_is_last_argument() {
        let handle = delivery(&["echo", "-n"])
            .launch("버거킹 리뷰 요약해줘")
            .await
            .unwrap();
        let report = handle.wait().await.unwrap();

        assert!(report.success);
        assert_eq!(report.exit_code, Some(0));
        assert_eq!(report.excerpt, "버거킹 리뷰 요약해줘");
        assert_eq!(report.method, "command");
    }

    #[tokio::test]
    async fn test_prompt_is_not_shell_expanded() {
        let report = delivery(&["echo"])
            .launch("$HOME; rm -rf /tmp/x")
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert_eq!(report.excerpt, "$HOME; rm -rf /tmp/x");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_reported() {
        let report = delivery(&["sh", "-c", "echo boom >&2; exit 3", "sh"])
            .launch("prompt")
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert!(!report.success);
        assert_eq!(report.exit_code, Some(3));
        assert_eq!(report.excerpt, "boom");
    }

    #[tokio::test]
    async fn test_missing_program_fails_launch() {
        let err = delivery(&["reviewlens-no-such-program"])
            .launch("prompt")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Delivery);
        assert!(err.to_string().contains("reviewlens-no-such-program"));
    }
}
