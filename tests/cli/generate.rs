use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CATALOG, CliTest, STATE, run};

#[test]
fn test_generate_inspec_controls() -> Result<()> {
    let test = CliTest::with_state(STATE)?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args(["terraform.tfstate", "--catalog", "catalog.json"]);
        cmd
    })?;

    assert_eq!(code, 0, "stderr: {}", stderr);

    let ids: Vec<_> = stdout
        .lines()
        .filter(|l| l.starts_with("control "))
        .collect();
    assert_eq!(
        ids,
        vec![
            "control 'NEGATIVE-COVERAGE:aws_vpcs' do",
            "control 'NEGATIVE-COVERAGE:aws_s3_buckets' do",
            "control 'NEGATIVE-COVERAGE:aws_ec2_instances' do",
        ]
    );

    // unmatched: region borrowed from the EC2 instances
    assert!(stdout.contains("  describe aws_vpcs({ region: 'us-east-1' }) do\n"));
    assert!(stdout.contains("  describe aws_s3_buckets do\n"));

    // matched: declared instances are subtracted
    assert!(stdout.contains(
        "  (aws_ec2_instances.where({ region: 'us-east-1' }).instance_ids - [\n    'web[0]',\n    'web[1]',\n  ]).each do |id|\n"
    ));
    assert!(stdout.contains(
        "    describe aws_ec2_instance({ instance_id: id, region: 'us-east-1' }) do\n"
    ));

    let source = test.root().join("terraform.tfstate");
    assert!(stdout.contains(&format!(
        "NEGATIVE-COVERAGE:aws_vpcs from the source file {}",
        source.display()
    )));

    assert!(stderr.contains(
        "Generated 3 negative-coverage controls (2 unmatched, 1 matched) from 1 state file for aws"
    ));

    Ok(())
}

#[test]
fn test_generate_json_controls() -> Result<()> {
    let test = CliTest::with_state(STATE)?;

    let (code, stdout, _) = run({
        let mut cmd = test.generate_command();
        cmd.args([
            "terraform.tfstate",
            "--catalog",
            "catalog.json",
            "--format",
            "json",
        ]);
        cmd
    })?;

    assert_eq!(code, 0);
    let controls: Value = serde_json::from_str(&stdout)?;
    let controls = controls.as_array().unwrap();
    assert_eq!(controls.len(), 3);

    assert_eq!(controls[0]["scope"], "unmatched");
    assert_eq!(controls[0]["qualifiers"][0]["value"], "us-east-1");
    assert_eq!(controls[2]["scope"], "matched");
    assert_eq!(controls[2]["impact"], 1.0);
    assert_eq!(
        controls[2]["exclusion"]["excludedInstanceIds"],
        serde_json::json!(["web[0]", "web[1]"])
    );
    assert_eq!(controls[2]["exclusion"]["index"], "instance_ids");

    Ok(())
}

#[test]
fn test_empty_state_covers_whole_catalog() -> Result<()> {
    let test = CliTest::with_state(r#"{ "version": 4, "resources": [] }"#)?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args(["terraform.tfstate", "--catalog", "catalog.json"]);
        cmd
    })?;

    assert_eq!(code, 0);
    assert_eq!(stdout.matches("control '").count(), 3);
    assert!(stdout.contains("  describe aws_ec2_instances({ region: nil }) do\n"));
    assert!(!stdout.contains(".each do |id|"));
    assert!(stderr.contains("(3 unmatched, 0 matched)"));

    Ok(())
}

#[test]
fn test_uncataloged_type_warns_and_continues() -> Result<()> {
    let test = CliTest::with_state(
        r#"{
      "version": 4,
      "resources": [
        {
          "mode": "managed",
          "type": "aws_weird_thing",
          "name": "w",
          "instances": [{ "attributes": { "region": "eu-west-1" } }]
        },
        {
          "mode": "managed",
          "type": "aws_vpc",
          "name": "main",
          "instances": [{ "attributes": { "region": "eu-west-1" } }]
        }
      ]
    }"#,
    )?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args(["terraform.tfstate", "--catalog", "catalog.json"]);
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stderr.contains("no catalog entry for aws_weird_thing on this platform"));
    assert!(!stdout.contains("aws_weird_thing"));
    assert!(stdout.contains("control 'NEGATIVE-COVERAGE:aws_vpcs' do"));
    assert!(stderr.contains("(2 unmatched, 1 matched)"));

    Ok(())
}

#[test]
fn test_malformed_state_is_an_error() -> Result<()> {
    let test = CliTest::with_state(r#"{ "version": 4 }"#)?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args(["terraform.tfstate", "--catalog", "catalog.json"]);
        cmd
    })?;

    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error: Failed to parse state file"));
    assert!(stderr.contains("unsupported state format"));

    Ok(())
}

#[test]
fn test_invalid_json_state_is_an_error() -> Result<()> {
    let test = CliTest::with_state("{ not json")?;

    let (code, _, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args(["terraform.tfstate", "--catalog", "catalog.json"]);
        cmd
    })?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Failed to parse state file"));

    Ok(())
}

#[test]
fn test_unknown_platform_is_an_error() -> Result<()> {
    let test = CliTest::with_state(STATE)?;

    let (code, _, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args([
            "terraform.tfstate",
            "--catalog",
            "catalog.json",
            "--platform",
            "gcp",
        ]);
        cmd
    })?;

    assert_eq!(code, 2);
    assert!(stderr.contains("no catalog for platform 'gcp'"));

    Ok(())
}

#[test]
fn test_repeated_platform_is_generated_once() -> Result<()> {
    let test = CliTest::with_state(STATE)?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args([
            "terraform.tfstate",
            "--catalog",
            "catalog.json",
            "--platform",
            "aws",
            "--platform",
            "aws",
        ]);
        cmd
    })?;

    assert_eq!(code, 0);
    assert_eq!(stdout.matches("control '").count(), 3);
    assert!(stderr.contains("(2 unmatched, 1 matched) from 1 state file for aws\n"));

    Ok(())
}

#[test]
fn test_missing_catalog_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("terraform.tfstate", STATE)?;

    let (code, _, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.arg("terraform.tfstate");
        cmd
    })?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Failed to load catalog"));

    Ok(())
}

#[test]
fn test_config_file_and_directory_scan() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("policy/catalog.json", CATALOG)?;
    test.write_file(
        ".negcovrc.json",
        r#"{ "catalog": "policy/catalog.json", "format": "json" }"#,
    )?;
    test.write_file("envs/prod/terraform.tfstate", STATE)?;
    test.write_file(
        "envs/dev/terraform.tfstate",
        r#"{ "version": 4, "resources": [] }"#,
    )?;
    test.write_file("envs/prod/.terraform/cache.tfstate", "{ broken")?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.arg("envs");
        cmd
    })?;

    assert_eq!(code, 0, "stderr: {}", stderr);
    let controls: Value = serde_json::from_str(&stdout)?;
    let controls = controls.as_array().unwrap();

    // dev (3 unmatched) sorts before prod (2 unmatched + 1 matched)
    assert_eq!(controls.len(), 6);
    assert!(
        controls[0]["description"]
            .as_str()
            .unwrap()
            .contains("envs/dev/terraform.tfstate")
    );
    assert_eq!(controls[5]["scope"], "matched");
    assert!(stderr.contains("from 2 state files for aws"));

    Ok(())
}

#[test]
fn test_output_file() -> Result<()> {
    let test = CliTest::with_state(STATE)?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args([
            "terraform.tfstate",
            "--catalog",
            "catalog.json",
            "--output",
            "controls/negative.rb",
        ]);
        cmd
    })?;

    // parent directories are not created
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Failed to write output file"));

    test.write_file("controls/.keep", "")?;
    let (code, stdout, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args([
            "terraform.tfstate",
            "--catalog",
            "catalog.json",
            "--output",
            "controls/negative.rb",
        ]);
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("--> controls/negative.rb"));
    let written = test.read_file("controls/negative.rb")?;
    assert_eq!(written.matches("control '").count(), 3);

    Ok(())
}

#[test]
fn test_output_is_deterministic() -> Result<()> {
    let test = CliTest::with_state(STATE)?;

    let generate = || {
        run({
            let mut cmd = test.generate_command();
            cmd.args(["terraform.tfstate", "--catalog", "catalog.json"]);
            cmd
        })
    };

    let (_, first, _) = generate()?;
    let (_, second, _) = generate()?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_verbose_logs_fallback_diagnostics() -> Result<()> {
    let test = CliTest::with_state(
        r#"{
      "version": 4,
      "resources": [
        {
          "mode": "managed",
          "type": "aws_vpc",
          "name": "main",
          "instances": [{ "attributes": { "region": "ca-central-1" } }]
        },
        {
          "mode": "managed",
          "type": "aws_instance",
          "name": "web",
          "instances": [{ "attributes": { "id": "i-1" } }]
        }
      ]
    }"#,
    )?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args([
            "terraform.tfstate",
            "--catalog",
            "catalog.json",
            "--log-format",
            "json",
            "-v",
        ]);
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("aws_ec2_instances.where({ region: 'ca-central-1' })"));

    let logs: Vec<Value> = stderr
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert!(logs.iter().any(|log| {
        log["level"] == "WARN"
            && log["fields"]["message"]
                .as_str()
                .is_some_and(|m| m.contains("aws_instance has no 'region' value"))
    }));
    assert!(logs.iter().any(|log| log["level"] == "DEBUG"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("--help");
        cmd
    })?;

    assert_eq!(code, 0);
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("init"));

    Ok(())
}
