use goaldash_core::{
    load_records, JsonFileRowSource, LoadError, RowSource, Session, SourceError,
};
use std::io::Write;
use std::time::Instant;

fn write_rows(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn json_file_rows_load_into_records() {
    let file = write_rows(
        r#"[
            {"Nombre del departamento": "TI", "Propietario": "Cesar", "Nombre del objetivo": "Mejoras", "Promedio de realizacion": 0.25},
            {"Departamento": "TI", "Responsable": "Cesar", "Objetivo": "Procedimientos", "Avance": "50%"}
        ]"#,
    );
    let source = JsonFileRowSource::new(file.path());
    assert_eq!(source.describe(), file.path().display().to_string());

    let loaded = load_records(&source).unwrap();
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records[0].progress(), 0.25);
    assert_eq!(loaded.records[1].progress(), 50.0);
}

#[test]
fn missing_file_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonFileRowSource::new(dir.path().join("missing.json"));

    let err = load_records(&source).unwrap_err();
    assert!(matches!(
        err,
        LoadError::SourceUnavailable(SourceError::Io { .. })
    ));
}

#[test]
fn non_table_file_falls_back_through_session() {
    let file = write_rows(r#"{"rows": []}"#);
    let mut session = Session::default();
    let now = Instant::now();

    let err = session
        .load(&JsonFileRowSource::new(file.path()), now)
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::SourceUnavailable(SourceError::NotATable(_))
    ));

    let due = session.fallback_due().unwrap();
    assert!(session.tick(due));
    assert_eq!(session.records().len(), 7);
}
