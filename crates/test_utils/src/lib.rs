use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Enum document shared by the integration suites.
pub const ENUMS_DOC: &str = r#"- Status:
    - DRAFT
    - PUBLISHED
    - ARCHIVED
- Projectdifficulty:
    - EASY
    - MEDIUM
    - HARD
"#;

/// Table document exercising every modifier the SQL backend reacts to.
pub const WIDGETS_DOC: &str = r#"- widgets:
    - id:
        - int64
        - sequence: true
        - required: true
    - name:
        - string
        - required: true
        - unique: true
        - share: true
    - enabled:
        - bool
    - tags:
        - string
        - array: true
        - share: true
"#;

/// Table document referencing enums declared in `ENUMS_DOC`.
pub const PROJECTS_DOC: &str = r#"- projects:
    - id:
        - int64
        - primary: true
        - share: true
    - difficulty:
        - public.Projectdifficulty
        - share: true
    - state:
        - public.Status
    - created:
        - timestamp
        - share: true
"#;

/// Document with an unresolvable base type, for failure-path tests.
pub const BROKEN_DOC: &str = r#"- gadgets:
    - size:
        - frobnicate
"#;

pub fn scratch() -> TempDir {
    tempfile::tempdir().expect("create scratch dir")
}

pub fn write_doc(dir: &Path, file: &str, contents: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, contents).expect("write fixture document");
    path
}

/// Write the standard fixture project: an enum document plus two table
/// documents. Returned in generation order (enums first).
pub fn write_fixture_docs(dir: &Path) -> Vec<PathBuf> {
    vec![
        write_doc(dir, "enums.yml", ENUMS_DOC),
        write_doc(dir, "widgets.yml", WIDGETS_DOC),
        write_doc(dir, "projects.yml", PROJECTS_DOC),
    ]
}
