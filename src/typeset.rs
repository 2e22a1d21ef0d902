//! Optional rendering of the returned LaTeX by an external program.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Maximum rendered output kept, in bytes.
const MAX_OUTPUT_BYTES: usize = 8_000;

/// Something that can turn a LaTeX snippet into printable text.
#[async_trait]
pub trait Typesetter: Send + Sync {
    /// Short label for the banner.
    fn name(&self) -> &str;

    async fn typeset(&self, latex: &str) -> Result<String>;
}

/// Pipes the LaTeX (without delimiters) into `sh -c <program>` and keeps its
/// stdout, e.g. `--render-with latex2text`.
pub struct CommandTypesetter {
    program: String,
}

impl CommandTypesetter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn truncate_output(output: &str) -> String {
        if output.len() <= MAX_OUTPUT_BYTES {
            return output.to_string();
        }
        let mut end = MAX_OUTPUT_BYTES;
        while !output.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}\n... (truncated)", &output[..end])
    }
}

#[async_trait]
impl Typesetter for CommandTypesetter {
    fn name(&self) -> &str {
        &self.program
    }

    async fn typeset(&self, latex: &str) -> Result<String> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start typesetter `{}`", self.program))?;

        // dropping stdin closes the pipe so the program sees EOF
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(latex.as_bytes()).await
            && e.kind() != std::io::ErrorKind::BrokenPipe
        {
            return Err(e.into());
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            bail!(
                "typesetter exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(Self::truncate_output(stdout.trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pipes_latex_through_program() {
        let typesetter = CommandTypesetter::new("cat");
        let out = typesetter.typeset("\\frac{1}{2}").await.unwrap();
        assert_eq!(out, "\\frac{1}{2}");
    }

    #[tokio::test]
    async fn program_can_transform() {
        let typesetter = CommandTypesetter::new("tr 'a-z' 'A-Z'");
        assert_eq!(typesetter.typeset("x+y").await.unwrap(), "X+Y");
    }

    #[tokio::test]
    async fn failing_program_is_error() {
        let typesetter = CommandTypesetter::new("echo broken >&2; exit 3");
        let err = typesetter.typeset("x").await.unwrap_err();
        assert!(err.to_string().contains("code 3"));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn name_is_program() {
        assert_eq!(CommandTypesetter::new("cat").name(), "cat");
    }

    #[test]
    fn truncate_short_output_unchanged() {
        assert_eq!(CommandTypesetter::truncate_output("short"), "short");
    }

    #[test]
    fn truncate_long_output() {
        let long = "é".repeat(MAX_OUTPUT_BYTES);
        let out = CommandTypesetter::truncate_output(&long);
        assert!(out.ends_with("(truncated)"));
        assert!(out.len() < long.len());
    }
}
