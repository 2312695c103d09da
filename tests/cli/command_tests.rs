// Command parsing and path handling tests

use policychat_cli::commands::{
    CommandResult, expand_path, is_command, load_files, parse_command, split_paths,
};
use policychat_core::domain::ModelTier;
use std::fs;
use tempfile::tempdir;

#[test]
fn detects_commands() {
    assert!(is_command("/help"));
    assert!(is_command(":files"));
    assert!(!is_command("What is /etc for?"));
    assert!(!is_command("hello"));
}

#[test]
fn parses_simple_commands() {
    assert_eq!(parse_command("/help"), CommandResult::ShowHelp);
    assert_eq!(parse_command("/?"), CommandResult::ShowHelp);
    assert_eq!(parse_command("/files"), CommandResult::ListFiles);
    assert_eq!(parse_command("/library"), CommandResult::Library);
    assert_eq!(parse_command("/key"), CommandResult::ApiKey);
    assert_eq!(parse_command("/clear-error"), CommandResult::ClearError);
    assert_eq!(parse_command("/exit"), CommandResult::Exit);
    assert_eq!(parse_command(":quit"), CommandResult::Exit);
    assert_eq!(parse_command("/"), CommandResult::None);
}

#[test]
fn command_names_are_case_insensitive() {
    assert_eq!(parse_command("/HELP"), CommandResult::ShowHelp);
    assert_eq!(parse_command("/Files"), CommandResult::ListFiles);
}

#[test]
fn remove_takes_one_based_position() {
    assert_eq!(parse_command("/remove 1"), CommandResult::Remove(0));
    assert_eq!(parse_command("/rm 3"), CommandResult::Remove(2));
    assert_eq!(
        parse_command("/remove 0"),
        CommandResult::InvalidRemove("0".into())
    );
    assert_eq!(
        parse_command("/remove two"),
        CommandResult::InvalidRemove("two".into())
    );
}

#[test]
fn model_takes_tier_name() {
    assert_eq!(
        parse_command("/model closed"),
        CommandResult::Model(ModelTier::Closed)
    );
    assert_eq!(
        parse_command("/model OPEN"),
        CommandResult::Model(ModelTier::Open)
    );
    assert_eq!(
        parse_command("/model gpt"),
        CommandResult::InvalidModel("gpt".into())
    );
}

#[test]
fn upload_collects_paths() {
    assert_eq!(parse_command("/upload"), CommandResult::Upload(Vec::new()));
    assert_eq!(
        parse_command("/upload a.pdf \"my docs/b.pdf\""),
        CommandResult::Upload(vec!["a.pdf".into(), "my docs/b.pdf".into()])
    );
}

#[test]
fn unknown_command_is_reported() {
    assert_eq!(
        parse_command("/reset"),
        CommandResult::Unknown("reset".into())
    );
}

#[test]
fn split_paths_handles_quotes_and_escapes() {
    assert_eq!(
        split_paths(r#"one.pdf 'two words.pdf' "three words.pdf" four\ words.pdf"#),
        vec!["one.pdf", "two words.pdf", "three words.pdf", "four words.pdf"]
    );
}

#[test]
fn split_paths_strips_file_urls() {
    assert_eq!(
        split_paths("file:///home/me/handbook.pdf\n/tmp/other.pdf"),
        vec!["/home/me/handbook.pdf", "/tmp/other.pdf"]
    );
}

#[test]
fn split_paths_ignores_blank_input() {
    assert!(split_paths("   \n ").is_empty());
}

#[test]
fn expand_path_leaves_absolute_paths() {
    assert_eq!(
        expand_path("/srv/policies/handbook.pdf"),
        std::path::PathBuf::from("/srv/policies/handbook.pdf")
    );
}

#[tokio::test]
async fn load_files_reads_in_order() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("handbook.pdf");
    let second = dir.path().join("notes.txt");
    fs::write(&first, b"%PDF-1.7").expect("write");
    fs::write(&second, b"notes").expect("write");

    let files = load_files(&[
        first.display().to_string(),
        second.display().to_string(),
    ])
    .await
    .expect("readable");

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].name, "handbook.pdf");
    assert!(files[0].is_pdf());
    assert_eq!(files[1].name, "notes.txt");
    assert!(!files[1].is_pdf());
}

#[tokio::test]
async fn load_files_reports_missing_path() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("missing.pdf");

    let err = load_files(&[missing.display().to_string()])
        .await
        .expect_err("missing file");

    assert!(err.starts_with("Could not read"));
    assert!(err.contains("missing.pdf"));
}
