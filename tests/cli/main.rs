use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod generate;
mod init;

const BIN_NAME: &str = "negcov";

/// Catalog shared by most tests: one AWS platform with three types.
pub const CATALOG: &str = r#"{
  "platforms": {
    "aws": {
      "aws_instance": {
        "iterator": "aws_ec2_instances",
        "qualifiers": ["region"],
        "index": "instance_ids",
        "resource": "aws_ec2_instance",
        "resourceQualifiers": ["instance_id", "region"]
      },
      "aws_vpc": {
        "iterator": "aws_vpcs",
        "qualifiers": ["region"],
        "index": "vpc_ids"
      },
      "aws_s3_bucket": {
        "iterator": "aws_s3_buckets",
        "index": "bucket_names"
      }
    }
  }
}"#;

/// State with two EC2 instances and nothing else.
pub const STATE: &str = r#"{
  "version": 4,
  "resources": [
    {
      "mode": "managed",
      "type": "aws_instance",
      "name": "web",
      "provider": "provider[\"registry.terraform.io/hashicorp/aws\"]",
      "instances": [
        { "index_key": 0, "attributes": { "id": "i-0", "region": "us-east-1" } },
        { "index_key": 1, "attributes": { "id": "i-1", "region": "us-east-1" } }
      ]
    }
  ]
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config discovery at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project holding `catalog.json` and `terraform.tfstate`.
    pub fn with_state(state: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file("catalog.json", CATALOG)?;
        test.write_file("terraform.tfstate", state)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn generate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Run a command and return (exit code, stdout, stderr).
pub fn run(mut cmd: Command) -> Result<(i32, String, String)> {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output().context("Failed to run negcov")?;
    Ok((
        status.code().unwrap_or(-1),
        String::from_utf8(stdout)?,
        String::from_utf8(stderr)?,
    ))
}
