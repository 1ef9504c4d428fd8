//! Smoke tests -- verify the binary runs and the subcommands exist.

use assert_cmd::Command;

#[test]
fn test_cli_help() {
    Command::cargo_bin("test262-bot")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("LibJS test262"));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("test262-bot")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("test262-bot"));
}

#[test]
fn test_result_subcommands_exist() {
    for command in ["test262", "wasm", "labels", "serve"] {
        Command::cargo_bin("test262-bot")
            .unwrap()
            .args([command, "--help"])
            .assert()
            .success();
    }
}

#[test]
fn test_labels_subcommand_prints_legend() {
    Command::cargo_bin("test262-bot")
        .unwrap()
        .env_remove("DISCORD_BOT_TOKEN")
        .env_remove("DISCORD_WEBHOOK_URL")
        .env_remove("TEST262_BOT_CONFIG")
        .arg("labels")
        .assert()
        .success()
        .stdout(predicates::str::contains("=== Result labels ==="))
        .stdout(predicates::str::contains("🧪 total"));
}

#[test]
fn test_missing_config_file_fails() {
    Command::cargo_bin("test262-bot")
        .unwrap()
        .args(["--config", "/nonexistent/test262-bot.toml", "labels"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to read config file"));
}

#[test]
fn test_unreadable_config_env_falls_back_to_defaults() {
    Command::cargo_bin("test262-bot")
        .unwrap()
        .env_remove("DISCORD_BOT_TOKEN")
        .env_remove("DISCORD_WEBHOOK_URL")
        .env("TEST262_BOT_CONFIG", "/nonexistent/test262-bot.toml")
        .arg("labels")
        .assert()
        .success()
        .stdout(predicates::str::contains("=== Result labels ==="));
}

#[test]
fn test_config_env_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"[discord]\ncustom_emoji_fallback = \":yak:\"\n").unwrap();

    Command::cargo_bin("test262-bot")
        .unwrap()
        .env_remove("DISCORD_BOT_TOKEN")
        .env_remove("DISCORD_WEBHOOK_URL")
        .env("TEST262_BOT_CONFIG", file.path())
        .arg("labels")
        .assert()
        .success()
        .stdout(predicates::str::contains(":yak: todo_error"));
}
