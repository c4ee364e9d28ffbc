use metro_induction::config::AppConfig;
use serial_test::serial;
use std::env;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("METRO_SERVER__PORT");
        env::remove_var("METRO_CHAT__ENDPOINT");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("HOST");
        env::remove_var("CHAT_ENDPOINT");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["metro-induction"]).expect("defaults should load");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.chat.endpoint, "http://127.0.0.1:8001/api/chat/");
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("METRO_SERVER__PORT", "9090");
        env::set_var("METRO_CHAT__ENDPOINT", "http://assistant.local/api/chat/");
    }

    let config =
        AppConfig::load_from_args(["metro-induction"]).expect("env overrides should load");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.chat.endpoint, "http://assistant.local/api/chat/");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("METRO_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args(["metro-induction", "--port", "7171"])
        .expect("cli override should load");
    assert_eq!(config.server.port, 7171);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("test_config.yaml");
    std::fs::write(
        &file_path,
        "server:\n  port: 7070\nchat:\n  endpoint: http://bot.internal/api/chat/\n",
    )
    .expect("write temp config");

    let config = AppConfig::load_from_args([
        "metro-induction",
        "--config",
        file_path.to_str().expect("utf-8 path"),
    ])
    .expect("file config should load");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.chat.endpoint, "http://bot.internal/api/chat/");
}
