use catalog::db::{EntryDraft, EntryFilter};
use catalog::interchange;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_stem(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "catalog-interchange-{tag}-{}-{}",
        std::process::id(),
        nanos
    ))
}

fn with_ext(stem: &PathBuf, ext: &str) -> PathBuf {
    let mut os = stem.clone().into_os_string();
    os.push(ext);
    PathBuf::from(os)
}

fn cleanup(stem: &PathBuf) {
    for ext in [".sqlite", ".sqlite-wal", ".sqlite-shm", ".json"] {
        let _ = std::fs::remove_file(with_ext(stem, ext));
    }
}

#[tokio::test]
async fn export_then_import_restores_content_with_fresh_ids() {
    let stem = temp_stem("roundtrip");
    let json_path = with_ext(&stem, ".json");
    let db = catalog::db::spawn(&format!("sqlite:{}", with_ext(&stem, ".sqlite").display()))
        .await
        .unwrap();

    for (type_code, name) in [("1", "htop"), ("3", "ripgrep"), ("misc", "scratch")] {
        let draft = EntryDraft::new(type_code, name, format!("{name} notes"), format!("https://{name}.example"))
            .unwrap();
        db.insert(draft).await.unwrap();
    }
    // Leave a gap so the import visibly renumbers.
    let first = db.list(EntryFilter::default(), None).await.unwrap()[0].id;
    db.delete(first).await.unwrap();

    let exported = interchange::export_table(&db, &json_path).await.unwrap();
    assert_eq!(exported, 2);

    let raw = std::fs::read_to_string(&json_path).unwrap();
    assert!(raw.contains("\"type\": 3"));
    assert!(raw.contains("\"type\": \"misc\""));

    let imported = interchange::import_file(&db, &json_path).await.unwrap();
    assert_eq!(imported, 2);

    let rows = db.list(EntryFilter::default(), None).await.unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(rows[0].name, "ripgrep");
    assert_eq!(rows[0].type_code, "3");
    assert_eq!(rows[1].type_code, "misc");

    cleanup(&stem);
}

#[tokio::test]
async fn invalid_import_leaves_table_untouched() {
    let stem = temp_stem("invalid");
    let json_path = with_ext(&stem, ".json");
    let db = catalog::db::spawn(&format!("sqlite:{}", with_ext(&stem, ".sqlite").display()))
        .await
        .unwrap();

    let draft = EntryDraft::new("2", "Notes", "plain notes", "https://notes.example").unwrap();
    db.insert(draft).await.unwrap();

    std::fs::write(
        &json_path,
        r#"[
    {"type": 1, "name": "ok", "description": "fine", "url": "https://ok.example"},
    {"type": "5", "name": "   ", "description": "blank name", "url": "https://bad.example"}
]"#,
    )
    .unwrap();

    let err = interchange::import_file(&db, &json_path).await.unwrap_err();
    assert!(err.to_string().contains("record #1"), "got {err}");

    let rows = db.list(EntryFilter::default(), None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Notes");

    cleanup(&stem);
}

#[tokio::test]
async fn sort_file_rewrites_in_place() {
    let stem = temp_stem("sort");
    let json_path = with_ext(&stem, ".json");
    std::fs::write(
        &json_path,
        r#"[
    {"type": 3, "name": "ripgrep", "description": "d", "url": "u"},
    {"type": 1, "name": "htop", "description": "d", "url": "u"},
    {"type": 3, "name": "fd", "description": "d", "url": "u"}
]"#,
    )
    .unwrap();

    let sorted = interchange::sort_file(&json_path).await.unwrap();
    assert_eq!(sorted, 3);

    let records = interchange::read_records(&json_path).await.unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["htop", "fd", "ripgrep"]);

    cleanup(&stem);
}
