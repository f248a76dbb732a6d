use i18n_sheets::flatten::{build_workbook, flatten, unflatten};
use i18n_sheets::io::{excel_read, excel_write, json};
use i18n_sheets::model::{FlatEntry, Namespace, Node, Tree};
use i18n_sheets::{ToolError, sync};
use std::fs;
use tempfile::tempdir;

fn tree(value: serde_json::Value) -> Tree {
    Tree::from_json(&value).expect("object root")
}

#[test]
fn flatten_then_unflatten_reproduces_tree() {
    let original = tree(serde_json::json!({
        "title": "Welcome",
        "menu": {
            "file": {"open": "Open", "save": "Save"},
            "edit": "Edit"
        },
        "footer": {"copyright": "ACME"}
    }));

    let entries = flatten(&original, &[]);
    let keys: Vec<&str> = entries.iter().map(|entry| entry.key.as_str()).collect();
    assert_eq!(
        keys,
        ["title", "menu.file.open", "menu.file.save", "menu.edit", "footer.copyright"]
    );

    assert_eq!(unflatten(&entries), original);
}

#[test]
fn special_strings_are_replaced_by_their_key() {
    let source = tree(serde_json::json!({
        "greeting": {"hello": "NOT_TRANSLATED", "bye": "Goodbye"},
        "cancel": "TODO"
    }));
    let specials = vec!["NOT_TRANSLATED".to_string(), "TODO".to_string()];

    let entries = flatten(&source, &specials);

    assert_eq!(
        entries,
        vec![
            FlatEntry::new("greeting.hello", "hello"),
            FlatEntry::new("greeting.bye", "Goodbye"),
            FlatEntry::new("cancel", "cancel"),
        ]
    );
}

#[test]
fn null_leaves_flatten_to_dash_and_scalars_keep_their_text() {
    let source = tree(serde_json::json!({
        "a": {"b": "hello", "c": null},
        "count": 3,
        "enabled": true,
        "list": ["x", "y"]
    }));

    let entries = flatten(&source, &[]);

    assert_eq!(
        entries,
        vec![
            FlatEntry::new("a.b", "hello"),
            FlatEntry::new("a.c", "-"),
            FlatEntry::new("count", "3"),
            FlatEntry::new("enabled", "true"),
            FlatEntry::new("list.0", "x"),
            FlatEntry::new("list.1", "y"),
        ]
    );
}

#[test]
fn unflatten_keeps_last_value_for_repeated_key() {
    let entries = vec![
        FlatEntry::new("a.b", "first"),
        FlatEntry::new("a.c", "other"),
        FlatEntry::new("a.b", "second"),
    ];

    let rebuilt = unflatten(&entries);

    assert_eq!(rebuilt, tree(serde_json::json!({"a": {"b": "second", "c": "other"}})));
}

#[test]
fn workbook_repeats_values_for_every_language() {
    let namespaces = vec![Namespace {
        name: "common".to_string(),
        tree: tree(serde_json::json!({"a": {"b": "hello", "c": null}})),
    }];
    let languages = vec!["EN".to_string(), "FR".to_string()];

    let workbook = build_workbook(&namespaces, &languages, &[]);

    let table = &workbook.tables[0];
    assert_eq!(table.sheet_name, "common");
    assert_eq!(table.columns, ["Key", "EN", "FR"]);
    assert_eq!(
        table.rows,
        vec![vec!["a.b", "hello", "hello"], vec!["a.c", "-", "-"]]
    );
}

#[test]
fn duplicate_namespace_names_get_distinct_sheets() {
    let namespaces: Vec<Namespace> = ["common", "common", "bad/name?"]
        .iter()
        .map(|name| Namespace {
            name: name.to_string(),
            tree: Tree::new(),
        })
        .collect();

    let workbook = build_workbook(&namespaces, &["EN".to_string()], &[]);
    let names: Vec<&str> = workbook
        .tables
        .iter()
        .map(|table| table.sheet_name.as_str())
        .collect();

    assert_eq!(names, ["common", "common_1", "bad_name_"]);
}

#[test]
fn json_to_excel_writes_key_and_language_columns() {
    let temp_dir = tempdir().expect("temporary directory");
    let json_path = temp_dir.path().join("common.json");
    fs::write(&json_path, r#"{"a":{"b":"hello","c":null}}"#).expect("JSON input written");
    let xlsx_path = temp_dir.path().join("translations.xlsx");

    sync::json_to_excel(&[json_path], &xlsx_path, &["EN".to_string()], &[])
        .expect("JSON to Excel conversion");

    let sheets = excel_read::read_translations(&xlsx_path).expect("Excel read");
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].sheet_name, "common");
    assert_eq!(sheets[0].columns.len(), 1);
    assert_eq!(sheets[0].columns[0].language, "EN");
    assert_eq!(
        sheets[0].columns[0].entries,
        vec![FlatEntry::new("a.b", "hello"), FlatEntry::new("a.c", "-")]
    );
}

#[test]
fn excel_to_json_writes_one_file_per_sheet_and_language() {
    let temp_dir = tempdir().expect("temporary directory");
    let workbook = build_workbook(
        &[Namespace {
            name: "common".to_string(),
            tree: tree(serde_json::json!({"a": {"b": "hello", "c": "-"}})),
        }],
        &["EN".to_string()],
        &[],
    );
    let xlsx_path = temp_dir.path().join("translations.xlsx");
    excel_write::write_workbook(&xlsx_path, &workbook).expect("Excel written");

    let output_dir = temp_dir.path().join("out");
    let written = sync::excel_to_json(&xlsx_path, &output_dir).expect("Excel to JSON");

    let expected_path = output_dir.join("EN").join("common.json");
    assert_eq!(written, vec![expected_path.clone()]);

    let content = fs::read_to_string(&expected_path).expect("JSON output read");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("JSON parsed");
    assert_eq!(parsed, serde_json::json!({"a": {"b": "hello", "c": "-"}}));
    assert!(content.contains("\n  \"a\": {"));
}

#[test]
fn json_excel_json_roundtrip_preserves_namespaces() {
    let temp_dir = tempdir().expect("temporary directory");
    let sources = [
        (
            "common.json",
            serde_json::json!({"title": "Home", "nav": {"next": "Next", "prev": "Back"}}),
        ),
        (
            "errors.json",
            serde_json::json!({"http": {"404": "Not found", "500": "Server error"}}),
        ),
    ];

    let mut inputs = Vec::new();
    for (file_name, content) in &sources {
        let path = temp_dir.path().join(file_name);
        fs::write(&path, serde_json::to_string_pretty(content).unwrap()).expect("input written");
        inputs.push(path);
    }

    let xlsx_path = temp_dir.path().join("translations.xlsx");
    let languages = vec!["EN".to_string(), "DE".to_string()];
    sync::json_to_excel(&inputs, &xlsx_path, &languages, &[]).expect("JSON to Excel");

    let output_dir = temp_dir.path().join("out");
    sync::excel_to_json(&xlsx_path, &output_dir).expect("Excel to JSON");

    for language in &languages {
        for (file_name, content) in &sources {
            let restored = json::read_namespace(&output_dir.join(language).join(file_name))
                .expect("restored namespace");
            assert_eq!(restored.tree, tree(content.clone()));
        }
    }
}

#[test]
fn node_serializes_in_insertion_order() {
    let mut root = Tree::new();
    root.insert("zeta", Node::leaf("last letter"));
    root.insert("alpha", Node::leaf("first letter"));

    let text = serde_json::to_string(&root).expect("serialized");

    assert_eq!(text, r#"{"zeta":"last letter","alpha":"first letter"}"#);
    assert_eq!(root.get("alpha"), Some(&Node::leaf("first letter")));
}

#[test]
fn non_object_root_is_rejected() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("list.json");
    fs::write(&path, r#"["not", "a", "tree"]"#).expect("JSON input written");

    let result = json::read_namespace(&path);

    assert!(matches!(result, Err(ToolError::InvalidTree { .. })));
}

#[test]
fn special_strings_only_match_string_values() {
    let source = tree(serde_json::json!({"n": 5, "flag": true, "s": "5"}));
    let specials = vec!["5".to_string(), "true".to_string()];

    let entries = flatten(&source, &specials);

    assert_eq!(
        entries,
        vec![
            FlatEntry::new("n", "5"),
            FlatEntry::new("flag", "true"),
            FlatEntry::new("s", "s"),
        ]
    );
}

#[test]
fn numbers_and_booleans_serialize_as_json_values() {
    let source = tree(serde_json::json!({"limit": 5, "enabled": false, "name": "5"}));

    let text = serde_json::to_string(&source).expect("serialized");

    assert_eq!(text, r#"{"limit":5,"enabled":false,"name":"5"}"#);
}

#[test]
fn empty_string_leaves_are_still_emitted() {
    let source = tree(serde_json::json!({"a": "x", "b": "", "c": "y"}));

    let entries = flatten(&source, &[]);

    assert_eq!(
        entries,
        vec![
            FlatEntry::new("a", "x"),
            FlatEntry::new("b", ""),
            FlatEntry::new("c", "y"),
        ]
    );
}

#[test]
fn malformed_input_aborts_json_to_excel_without_output() {
    let temp_dir = tempdir().expect("temporary directory");
    let valid = temp_dir.path().join("common.json");
    fs::write(&valid, r#"{"a":"b"}"#).expect("valid input written");
    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, r#"{"a":"#).expect("broken input written");
    let xlsx_path = temp_dir.path().join("translations.xlsx");

    let result = sync::json_to_excel(&[valid, broken], &xlsx_path, &["EN".to_string()], &[]);

    assert!(matches!(result, Err(ToolError::Json(_))));
    assert!(!xlsx_path.exists());
}

#[test]
fn blocked_language_directory_aborts_excel_to_json() {
    let temp_dir = tempdir().expect("temporary directory");
    let workbook = build_workbook(
        &[Namespace {
            name: "common".to_string(),
            tree: tree(serde_json::json!({"a": "b"})),
        }],
        &["EN".to_string()],
        &[],
    );
    let xlsx_path = temp_dir.path().join("translations.xlsx");
    excel_write::write_workbook(&xlsx_path, &workbook).expect("Excel written");

    let output_dir = temp_dir.path().join("out");
    fs::create_dir_all(&output_dir).expect("output directory created");
    fs::write(output_dir.join("EN"), "not a directory").expect("blocking file written");

    let result = sync::excel_to_json(&xlsx_path, &output_dir);

    assert!(matches!(result, Err(ToolError::Io(_))));
    assert!(output_dir.join("EN").is_file());
}
