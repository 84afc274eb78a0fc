use std::fs;
use std::sync::Arc;

use persian_text_cleaner::dataset::{clean_dataset, RunReport};
use persian_text_cleaner::{CleanError, Cleaner, Columns, FieldPipeline, Passthrough};
use serde_json::Value;

fn pipeline() -> FieldPipeline {
    FieldPipeline::new(Cleaner::new(Arc::new(Passthrough)))
}

#[test]
fn csv_gets_cleaned_text_and_six_entity_columns() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("tweets.csv");
    let out = temp.path().join("out/tweets.csv");
    fs::write(
        &input,
        "id,description,in_reply_to_text\n\
         1,سلاام دوست@من #خوب https://x.co,\n\
         2,خوب   است,جواب #تگ @علی\n",
    )
    .unwrap();

    let report = clean_dataset(&input, &out, &pipeline(), &Columns::default(), None).unwrap();
    assert_eq!(report.files, 1);
    assert_eq!(report.records, 2);
    assert_eq!(report.links, 1);
    assert_eq!(report.hashtags, 2);
    assert_eq!(report.mentions, 2);
    assert!(report.finished_at.is_some());

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec![
            "id",
            "description",
            "in_reply_to_text",
            "description_links",
            "description_hashtags",
            "description_mentions",
            "reply_links",
            "reply_hashtags",
            "reply_mentions",
        ]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&rows[0][1], "سلاام دوست");
    assert_eq!(&rows[0][2], "");
    assert_eq!(&rows[0][3], "https://x.co");
    assert_eq!(&rows[0][4], "#خوب");
    assert_eq!(&rows[0][5], "@من");
    assert_eq!(&rows[1][1], "خوب است");
    assert_eq!(&rows[1][2], "جواب");
    assert_eq!(&rows[1][7], "#تگ");
    assert_eq!(&rows[1][8], "@علی");
}

#[test]
fn rerun_overwrites_existing_entity_columns() {
    let temp = tempfile::tempdir().unwrap();
    let first = temp.path().join("a.csv");
    let second = temp.path().join("b.csv");
    let third = temp.path().join("c.csv");
    fs::write(&first, "description,in_reply_to_text\nمتن #یک,\n").unwrap();

    let p = pipeline();
    clean_dataset(&first, &second, &p, &Columns::default(), None).unwrap();
    clean_dataset(&second, &third, &p, &Columns::default(), None).unwrap();

    let mut reader = csv::Reader::from_path(&third).unwrap();
    assert_eq!(reader.headers().unwrap().len(), 8);
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[0], "متن");
    // the cleaned text no longer carries the tag
    assert_eq!(&row[3], "");
}

#[test]
fn missing_column_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("t.csv");
    fs::write(&input, "text,reply\nسلام,\n").unwrap();

    let err = clean_dataset(
        &input,
        &temp.path().join("o.csv"),
        &pipeline(),
        &Columns::default(),
        None,
    )
    .unwrap_err();
    match err {
        CleanError::MissingColumn { column, .. } => assert_eq!(column, "description"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn json_lines_coerce_non_strings_and_respect_limit() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("tweets.jsonl");
    let out = temp.path().join("clean.jsonl");
    fs::write(
        &input,
        concat!(
            r#"{"id": 1, "description": "سلام @x", "in_reply_to_text": null}"#,
            "\n\n",
            r#"{"id": 2, "description": 12345, "in_reply_to_text": ["a"]}"#,
            "\n",
            r#"{"id": 3, "description": "نباید پردازش شود"}"#,
            "\n",
        ),
    )
    .unwrap();

    let columns = Columns {
        reply_prefix: "in_reply_to_text".into(),
        ..Columns::default()
    };
    let report = clean_dataset(&input, &out, &pipeline(), &columns, Some(2)).unwrap();
    assert_eq!(report.records, 2);

    let lines: Vec<Value> = fs::read_to_string(&out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["description"], "سلام");
    assert_eq!(lines[0]["description_mentions"], "@x");
    assert_eq!(lines[0]["in_reply_to_text"], "");
    assert_eq!(lines[0]["in_reply_to_text_links"], "");
    assert_eq!(lines[1]["id"], 2);
    assert_eq!(lines[1]["description"], "");
    assert_eq!(lines[1]["in_reply_to_text"], "");
}

#[test]
fn non_object_json_line_is_invalid() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("bad.jsonl");
    fs::write(&input, "{\"description\": \"a\"}\n[1, 2]\n").unwrap();

    let err = clean_dataset(
        &input,
        &temp.path().join("o.jsonl"),
        &pipeline(),
        &Columns::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CleanError::InvalidRecord { line: 2, .. }));
}

#[test]
fn directory_input_mirrors_layout_and_skips_other_files() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("in");
    fs::create_dir_all(input.join("nested")).unwrap();
    fs::write(
        input.join("a.csv"),
        "description,in_reply_to_text\nیک,دو\n",
    )
    .unwrap();
    fs::write(
        input.join("nested/b.tsv"),
        "description\tin_reply_to_text\nسه\t#چهار\n",
    )
    .unwrap();
    fs::write(input.join("notes.txt"), "ignored").unwrap();

    let out = temp.path().join("out");
    let report: RunReport =
        clean_dataset(&input, &out, &pipeline(), &Columns::default(), None).unwrap();
    assert_eq!(report.files, 2);
    assert_eq!(report.records, 2);
    assert_eq!(report.hashtags, 1);
    assert_eq!(report.emptied, 1);
    assert!(out.join("a.csv").exists());
    assert!(out.join("nested/b.tsv").exists());
    assert!(!out.join("notes.txt").exists());

    let tsv = fs::read_to_string(out.join("nested/b.tsv")).unwrap();
    assert!(tsv.lines().nth(1).unwrap().starts_with("سه\t\t"));
}

#[test]
fn report_counts_fields_emptied_by_cleaning() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("t.csv");
    fs::write(
        &input,
        "description,in_reply_to_text\nhello world,ok 123\nسلام,\n",
    )
    .unwrap();

    let report_path = temp.path().join("report.json");
    let report =
        clean_dataset(&input, &temp.path().join("o.csv"), &pipeline(), &Columns::default(), None)
            .unwrap();
    report.save(&report_path).unwrap();
    assert_eq!(report.emptied, 2);

    let saved: Value = serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(saved["records"], 2);
    assert_eq!(saved["emptied"], 2);
}
