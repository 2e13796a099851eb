use std::path::{Path, PathBuf};

use eyre::Context;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct HardhatCompile {
    cwd: Option<PathBuf>,
    program: String,
    force: bool,
}

impl Default for HardhatCompile {
    fn default() -> Self {
        Self::new()
    }
}

impl HardhatCompile {
    pub fn new() -> Self {
        Self {
            cwd: None,
            program: "npx".to_string(),
            force: false,
        }
    }

    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_owned());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    #[cfg(test)]
    fn with_program(mut self, program: impl ToString) -> Self {
        self.program = program.to_string();
        self
    }

    fn command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.arg("hardhat");
        cmd.arg("compile");

        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        if self.force {
            cmd.arg("--force");
        }

        cmd.arg("--quiet");

        cmd
    }

    #[instrument(name = "hardhat_compile", skip_all)]
    pub async fn run(&self) -> eyre::Result<()> {
        let mut cmd = self.command();

        info!("Compiling contracts with {cmd:#?}");

        let output = cmd
            .output()
            .await
            .with_context(|| format!("Running {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eyre::bail!("hardhat compile failed: {}", stderr);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(compile: &HardhatCompile) -> Vec<String> {
        compile
            .command()
            .as_std()
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn builds_compile_command() {
        let compile = HardhatCompile::new().with_cwd("backend");

        let cmd = compile.command();

        assert_eq!(cmd.as_std().get_program(), "npx");
        assert_eq!(
            cmd.as_std().get_current_dir(),
            Some(Path::new("backend"))
        );
        assert_eq!(args(&compile), vec!["hardhat", "compile", "--quiet"]);
    }

    #[test]
    fn forced() {
        let compile = HardhatCompile::new().with_force(true);

        assert_eq!(
            args(&compile),
            vec!["hardhat", "compile", "--force", "--quiet"]
        );
    }

    #[tokio::test]
    async fn missing_launcher_is_an_error() {
        let compile = HardhatCompile::new()
            .with_program("definitely-not-an-installed-launcher");

        assert!(compile.run().await.is_err());
    }

    #[tokio::test]
    async fn failing_compile_is_an_error() {
        let compile = HardhatCompile::new().with_program("false");

        let err = compile.run().await.unwrap_err();

        assert!(format!("{err}").contains("hardhat compile failed"));
    }
}
