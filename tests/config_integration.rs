use std::path::PathBuf;

use markdraft::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markdraftrc");
    let content = r"
# comment
--fresh

--key notes

--store=drafts.json
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.fresh);
    assert_eq!(flags.key.as_deref(), Some("notes"));
    assert_eq!(flags.store, Some(PathBuf::from("drafts.json")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markdraftrc");
    let content = "--fresh\n--key notes\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "markdraft".to_string(),
        "--key".to_string(),
        "journal".to_string(),
        "--store".to_string(),
        "cli.json".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.fresh, "file flags should remain enabled");
    assert_eq!(effective.store, Some(PathBuf::from("cli.json")), "cli flags should be applied");
    assert_eq!(effective.key.as_deref(), Some("journal"), "cli should override key");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "markdraft".to_string(),
        "--key=journal".to_string(),
        "--log-file=draft.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.key.as_deref(), Some("journal"));
    assert_eq!(flags.log_file, Some(PathBuf::from("draft.log")));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        fresh: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags::default();
    assert!(file.union(&cli).fresh);
    assert!(cli.union(&file).fresh);
}
