//! Tests for init, config, and global flags.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_init() {
    match parse(&["imgfetch", "init"]).command {
        CliCommand::Init { home } => assert!(home.is_none()),
        _ => panic!("expected Init"),
    }
}

#[test]
fn cli_parse_init_home() {
    match parse(&["imgfetch", "init", "--home", "/tmp/img"]).command {
        CliCommand::Init { home } => assert_eq!(home.as_deref(), Some(Path::new("/tmp/img"))),
        _ => panic!("expected Init with --home"),
    }
}

#[test]
fn cli_parse_config() {
    let cli = parse(&["imgfetch", "config"]);
    assert!(matches!(cli.command, CliCommand::Config));
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_global_config_flag() {
    let cli = parse(&["imgfetch", "fetch", "--config", "/etc/imgfetch.toml", "https://a/x.png"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/imgfetch.toml")));
    assert!(matches!(cli.command, CliCommand::Fetch { .. }));
}
