//! CLI parse tests.

use super::{Cli, CliCommand, ClearBucket};
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn add_with_defaults() {
    let cli = parse(&["ferry", "add", "remote:/pub/debian.iso"]);
    match cli.command {
        CliCommand::Add {
            source,
            dest,
            name,
            size,
            no_start,
        } => {
            assert_eq!(source, "remote:/pub/debian.iso");
            assert!(dest.is_none());
            assert!(name.is_none());
            assert_eq!(size, 0);
            assert!(!no_start);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn add_with_all_flags() {
    let cli = parse(&[
        "ferry",
        "add",
        "remote:/a.bin",
        "--dest",
        "/tmp/a.bin",
        "--name",
        "a",
        "--size",
        "2048",
        "--no-start",
    ]);
    match cli.command {
        CliCommand::Add {
            dest,
            name,
            size,
            no_start,
            ..
        } => {
            assert_eq!(dest.unwrap().to_str(), Some("/tmp/a.bin"));
            assert_eq!(name.as_deref(), Some("a"));
            assert_eq!(size, 2048);
            assert!(no_start);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn clear_buckets_parse() {
    for (arg, expected) in [
        ("pending", ClearBucket::Pending),
        ("completed", ClearBucket::Completed),
        ("failed", ClearBucket::Failed),
    ] {
        let cli = parse(&["ferry", "clear", arg]);
        match cli.command {
            CliCommand::Clear { bucket } => {
                assert!(matches!(
                    (bucket, expected),
                    (ClearBucket::Pending, ClearBucket::Pending)
                        | (ClearBucket::Completed, ClearBucket::Completed)
                        | (ClearBucket::Failed, ClearBucket::Failed)
                ));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

#[test]
fn state_dir_is_global() {
    let cli = parse(&["ferry", "--state-dir", "/tmp/ferry-test", "status"]);
    assert_eq!(cli.state_dir.unwrap().to_str(), Some("/tmp/ferry-test"));
    assert!(matches!(cli.command, CliCommand::Status));

    let cli = parse(&["ferry", "worker", "--state-dir", "/tmp/ferry-test"]);
    assert!(cli.state_dir.is_some());
    assert!(matches!(cli.command, CliCommand::Worker));
}

#[test]
fn remove_takes_an_index() {
    let cli = parse(&["ferry", "remove", "2"]);
    match cli.command {
        CliCommand::Remove { index } => assert_eq!(index, 2),
        other => panic!("unexpected command: {other:?}"),
    }
}
