use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_get_single_link() {
    match parse(&["ytbatch", "get", "https://youtube.com/watch?v=abc"]) {
        CliCommand::Get {
            text,
            input,
            output,
            audio,
            quality,
            jobs,
        } => {
            assert_eq!(text, vec!["https://youtube.com/watch?v=abc"]);
            assert!(input.is_none());
            assert_eq!(output, std::path::PathBuf::from("downloads"));
            assert!(!audio);
            assert!(quality.is_none());
            assert!(jobs.is_none());
        }
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_get_joins_multiple_args() {
    match parse(&[
        "ytbatch",
        "get",
        "https://youtube.com/watch?v=a,",
        "https://youtube.com/watch?v=b",
    ]) {
        CliCommand::Get { text, .. } => assert_eq!(text.len(), 2),
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_get_flags() {
    match parse(&[
        "ytbatch",
        "get",
        "https://youtube.com/watch?v=abc",
        "--audio",
        "--quality",
        "320kbps",
        "--jobs",
        "2",
        "-o",
        "/tmp/music",
    ]) {
        CliCommand::Get {
            output,
            audio,
            quality,
            jobs,
            ..
        } => {
            assert!(audio);
            assert_eq!(quality.as_deref(), Some("320kbps"));
            assert_eq!(jobs, Some(2));
            assert_eq!(output, std::path::PathBuf::from("/tmp/music"));
        }
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_get_input_file() {
    match parse(&["ytbatch", "get", "--input", "links.txt"]) {
        CliCommand::Get { text, input, .. } => {
            assert!(text.is_empty());
            assert_eq!(input, Some(std::path::PathBuf::from("links.txt")));
        }
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_get_requires_text_or_input() {
    assert!(Cli::try_parse_from(["ytbatch", "get"]).is_err());
}

#[test]
fn cli_get_rejects_text_with_input() {
    assert!(Cli::try_parse_from([
        "ytbatch",
        "get",
        "https://youtube.com/watch?v=abc",
        "--input",
        "links.txt"
    ])
    .is_err());
}

#[test]
fn cli_parse_probe() {
    match parse(&[
        "ytbatch",
        "probe",
        "https://youtube.com/watch?v=abc",
        "https://youtube.com/@chan",
    ]) {
        CliCommand::Probe { urls } => assert_eq!(urls.len(), 2),
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_probe_requires_urls() {
    assert!(Cli::try_parse_from(["ytbatch", "probe"]).is_err());
}

#[test]
fn cli_parse_completions() {
    match parse(&["ytbatch", "completions", "bash"]) {
        CliCommand::Completions { shell } => {
            assert_eq!(shell, clap_complete::Shell::Bash);
        }
        _ => panic!("expected Completions"),
    }
}
