use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use cleanroom::QualityConfig;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub command: String,
    pub input: PathBuf,
    pub run_dir: PathBuf,
    pub config: QualityConfig,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub command: String,
    pub input: InputInfo,
    pub config: QualityConfig,
    pub git: GitInfo,
}

/// Identity of the dataset a run was computed on.
#[derive(Debug, Serialize)]
pub struct InputInfo {
    pub path: String,
    pub sha256: String,
    pub bytes: u64,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub logs_path: PathBuf,
}

impl RunPaths {
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");

    let (sha256, bytes) = fingerprint_file(&ctx.input)?;
    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        command: ctx.command.clone(),
        input: InputInfo {
            path: ctx.input.display().to_string(),
            sha256,
            bytes,
        },
        config: ctx.config.clone(),
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new().create(true).append(true).open(&logs_path)?;

    Ok(RunPaths {
        root,
        config_path,
        logs_path,
    })
}

/// SHA-256 of a file's contents (hex) and its size in bytes.
pub fn fingerprint_file(path: &Path) -> RegistryResult<(String, u64)> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    let mut bytes = 0u64;
    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(RegistryError::Io(err)),
        };
        hasher.update(&buffer[..read]);
        bytes = bytes.saturating_add(read as u64);
    }
    Ok((hex::encode(hasher.finalize()), bytes))
}

/// Write a text artifact into the run directory.
pub fn write_artifact(paths: &RunPaths, name: &str, contents: &str) -> RegistryResult<PathBuf> {
    let path = paths.artifact(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cleanroom_{label}_{}", Uuid::new_v4()));
        create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn fingerprint_matches_known_digest() {
        let dir = temp_dir("fingerprint");
        let path = dir.join("input.csv");
        std::fs::write(&path, "abc").expect("write input");

        let (digest, bytes) = fingerprint_file(&path).expect("fingerprint");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(bytes, 3);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn start_run_writes_config() {
        let dir = temp_dir("registry");
        let input = dir.join("input.csv");
        std::fs::write(&input, "a\n1\n").expect("write input");

        let ctx = RunContext {
            run_id: "test-run".to_string(),
            started_at: Utc::now(),
            command: "profile".to_string(),
            input: input.clone(),
            run_dir: dir.join("runs"),
            config: QualityConfig::default(),
        };
        let paths = start_run(&ctx).expect("start run");

        assert!(paths.logs_path.exists());
        assert!(
            paths
                .root
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with("__run_test-run"))
        );

        let config: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&paths.config_path).expect("read config"),
        )
        .expect("parse config");
        assert_eq!(config["command"], "profile");
        assert_eq!(config["input"]["bytes"], 4);
        assert_eq!(config["config"]["max_sample_size"], 50_000);
        assert_eq!(config["input"]["sha256"].as_str().map(str::len), Some(64));

        std::fs::remove_dir_all(&dir).ok();
    }
}
