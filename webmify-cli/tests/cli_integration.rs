use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn webmify_cmd() -> Command {
    Command::cargo_bin("webmify").expect("Failed to find webmify binary")
}

#[test]
fn test_missing_folder_exits_one() -> Result<(), Box<dyn Error>> {
    webmify_cmd()
        .assert()
        .code(1)
        .stderr(contains("missing FOLDER argument"))
        .stderr(contains("Usage:"));
    Ok(())
}

#[test]
fn test_non_existent_folder_exits_one() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let missing = dir.path().join("surely/this/does/not/exist");

    webmify_cmd()
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(contains("Not a directory"));
    Ok(())
}

#[test]
fn test_file_instead_of_folder_exits_one() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("movie.mp4");
    std::fs::write(&file, "dummy content")?;

    webmify_cmd()
        .arg(&file)
        .assert()
        .code(1)
        .stderr(contains("Not a directory"));
    Ok(())
}

#[test]
fn test_help_lists_flags() -> Result<(), Box<dyn Error>> {
    webmify_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--overwrite"))
        .stdout(contains("--skip-existing"))
        .stdout(contains("--skip-compliant"))
        .stdout(contains("--concurrency"))
        .stdout(contains("--threads"))
        .stdout(contains("--hwdecode"))
        .stdout(contains("--prompt-timeout"))
        .stdout(contains("[FOLDER]"));
    Ok(())
}

#[test]
fn test_zero_concurrency_is_a_usage_error() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    webmify_cmd()
        .arg("--concurrency")
        .arg("0")
        .arg(dir.path())
        .assert()
        .failure();
    Ok(())
}
