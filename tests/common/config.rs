//! Host environment builder for running the hook binary

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch area with a download directory, a fake unrar and its call log
pub struct HookFixture {
    /// Keeps everything alive for the duration of the test
    pub temp: TempDir,
    /// `NZBPP_DIRECTORY`
    pub download_dir: PathBuf,
    /// Location of the fake unrar
    pub unrar: PathBuf,
    /// Where the fake unrar records invocations
    pub unrar_log: PathBuf,
    /// Environment handed to the hook
    pub env: BTreeMap<String, String>,
}

impl HookFixture {
    /// Fixture with a complete, valid host environment
    #[cfg(unix)]
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let download_dir = temp.path().join("complete").join("Show.S01E01");
        std::fs::create_dir_all(&download_dir).unwrap();
        let tools = temp.path().join("tools");
        std::fs::create_dir_all(&tools).unwrap();
        let unrar = super::fixtures::install_fake_unrar(&tools);
        let unrar_log = temp.path().join("unrar.log");

        let env = [
            ("NZBOP_EXTENSIONS", "ExtendedUnrar"),
            ("NZBOP_UNRARCMD", "/nonexistent/host/unrar"),
            ("NZBPO_UNRARPATH", unrar.to_str().unwrap()),
            ("NZBPO_RAREXTENSIONS", "*.[rR]??"),
            ("NZBPO_WAITTIME", "0"),
            ("NZBPO_DELETELEFTOVER", "yes"),
            ("NZBOP_UNPACK", "yes"),
            ("NZBOP_UNPACKCLEANUPDISK", "no"),
            ("NZBPP_TOTALSTATUS", "SUCCESS"),
            ("NZBPP_DIRECTORY", download_dir.to_str().unwrap()),
            ("FAKE_UNRAR_LOG", unrar_log.to_str().unwrap()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            temp,
            download_dir,
            unrar,
            unrar_log,
            env,
        }
    }

    /// Override one variable
    pub fn set(&mut self, key: &str, value: impl AsRef<str>) -> &mut Self {
        self.env.insert(key.to_string(), value.as_ref().to_string());
        self
    }

    /// Drop one variable
    pub fn unset(&mut self, key: &str) -> &mut Self {
        self.env.remove(key);
        self
    }

    /// Path inside the download directory
    pub fn path(&self, relative: &str) -> PathBuf {
        self.download_dir.join(relative)
    }

    /// Create a file inside the download directory
    pub fn touch(&self, relative: &str) -> PathBuf {
        super::fixtures::touch(&self.download_dir, relative)
    }

    /// Archives the fake unrar was asked to extract, in order
    pub fn extracted_archives(&self) -> Vec<String> {
        super::fixtures::read_invocations(&self.unrar_log)
            .iter()
            .map(|i| i.archive().to_string())
            .collect()
    }

    /// Run the hook binary with exactly this environment (plus PATH)
    pub fn run(&self) -> Output {
        run_hook(&self.env, self.temp.path())
    }
}

/// Run the compiled hook with a controlled environment
pub fn run_hook(env: &BTreeMap<String, String>, cwd: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_extended-unrar"));
    cmd.env_clear().envs(env).current_dir(cwd);
    if let Some(path) = std::env::var_os("PATH") {
        cmd.env("PATH", path);
    }
    cmd.output().expect("failed to launch hook binary")
}
