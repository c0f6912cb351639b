//! Shared test helpers for integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Writes `$SUBJECTS_DIR/<subject>/surf/{lh,rh}.pial`.
pub const FAKE_RECON_ALL: &str = r#"
while [ $# -gt 0 ]; do
  case "$1" in
    -s) subject="$2"; shift ;;
  esac
  shift
done
mkdir -p "$SUBJECTS_DIR/$subject/surf"
echo "lh surface" > "$SUBJECTS_DIR/$subject/surf/lh.pial"
echo "rh surface" > "$SUBJECTS_DIR/$subject/surf/rh.pial"
"#;

/// Writes `<-o>/<-f>.nii`.
pub const FAKE_DCM2NIIX: &str = r#"
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
    -f) base="$2"; shift ;;
  esac
  shift
done
echo "volume" > "$out/$base.nii"
"#;

/// Writes an ASCII STL header to its second argument.
pub const FAKE_MRIS_CONVERT: &str = r#"echo "solid $1" > "$2""#;

/// Records its arguments and stdin in `$FAKE_MAIL_LOG`.
pub const FAKE_MAIL: &str = r#"{ echo "ARGS: $*"; cat; } > "$FAKE_MAIL_LOG""#;

/// Isolated environment for one invocation of the binary
pub struct TestEnv {
    temp: TempDir,
}

impl TestEnv {
    /// Create an environment with no tools installed
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(temp.path().join("bin")).expect("Failed to create bin dir");
        Self { temp }
    }

    /// Create an environment with every tool installed
    pub fn with_all_tools() -> Self {
        let env = Self::new();
        env.install_tool("dcm2niix", FAKE_DCM2NIIX);
        env.install_tool("recon-all", FAKE_RECON_ALL);
        env.install_tool("mris_convert", FAKE_MRIS_CONVERT);
        env.install_tool("mail", FAKE_MAIL);
        env
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Destination directory passed to the binary (not created)
    pub fn dest(&self) -> PathBuf {
        self.root().join("out")
    }

    pub fn scratch(&self) -> PathBuf {
        self.root().join("scratch")
    }

    pub fn mail_log(&self) -> PathBuf {
        self.root().join("mail.log")
    }

    fn tool_path(&self, name: &str) -> PathBuf {
        self.root().join("bin").join(name)
    }

    /// Install a shell script as the tool `name`
    pub fn install_tool(&self, name: &str, body: &str) {
        let path = self.tool_path(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod tool");
    }

    /// Directory containing the given files
    pub fn input_dir(&self, name: &str, files: &[&str]) -> PathBuf {
        let dir = self.root().join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create input dir");
        for file in files {
            std::fs::write(dir.join(file), b"data").expect("Failed to write input file");
        }
        dir
    }

    /// The binary, configured to use this environment's tools and scratch
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_make3dBrain"));
        cmd.env_remove("MAKE3DBRAIN_CONFIG")
            .env("RUST_LOG", "warn")
            .env("MAKE3DBRAIN__TOOLS__DCM2NIIX", self.tool_path("dcm2niix"))
            .env("MAKE3DBRAIN__TOOLS__RECON_ALL", self.tool_path("recon-all"))
            .env("MAKE3DBRAIN__TOOLS__MRIS_CONVERT", self.tool_path("mris_convert"))
            .env("MAKE3DBRAIN__TOOLS__MAIL", self.tool_path("mail"))
            .env("MAKE3DBRAIN__WORKSPACE__SCRATCH_ROOT", self.scratch())
            .env("FAKE_MAIL_LOG", self.mail_log());
        cmd
    }

    /// Run the binary with `args`
    pub fn run(&self, args: &[&str]) -> RunOutput {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run make3dBrain");
        RunOutput::from(output)
    }
}

/// Captured process output
pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Convert a path argument to `&str`
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("test paths are UTF-8")
}
