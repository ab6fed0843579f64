use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, _, stderr) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stderr.contains("Created .negcovrc.json"));
    assert!(test.root().join(".negcovrc.json").exists());

    let content = test.read_file(".negcovrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["catalog"], "./catalog.json");
    assert_eq!(parsed["platforms"], serde_json::json!(["aws"]));
    assert_eq!(parsed["format"], "inspec");
    assert!(parsed.get("ignores").is_some());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".negcovrc.json", "{}")?;

    let (code, _, stderr) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 1);
    assert!(stderr.contains(".negcovrc.json already exists"));
    assert_eq!(test.read_file(".negcovrc.json")?, "{}");

    Ok(())
}
