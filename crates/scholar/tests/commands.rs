//! Integration tests for the command implementations.
//!
//! Each test builds a throwaway configuration whose editor is `true`, so
//! editing succeeds without touching the record.

use std::fs;
use std::path::{Path, PathBuf};

use scholar_cli::app::App;
use scholar_cli::commands::{add, check, config, edit, export, import, list, remove, show, types};
use scholar_config::{SearchPaths, load_settings};
use scholar_core::{Format, RECORD_FILE, SortBy};
use tempfile::TempDir;

struct Fixture {
    temp: TempDir,
    app: App,
}

impl Fixture {
    fn new() -> Self {
        colored::control::set_override(false);
        let temp = TempDir::new().expect("Failed to create temp directory");
        let config = temp.path().join("config.yaml");
        fs::write(
            &config,
            format!(
                "general:\n  default: main\n  editor: \"true\"\n  interactive: true\nlibraries:\n  main: {}\n  other: {}\n",
                temp.path().join("lib").display(),
                temp.path().join("other").display(),
            ),
        )
        .unwrap();

        let paths = SearchPaths::new(temp.path(), temp.path().join("home"));
        let settings = load_settings(&paths, Some(&config), None).unwrap();
        let app = App::new(settings, None, true);
        Fixture { temp, app }
    }

    fn lib(&self) -> PathBuf {
        self.temp.path().join("lib")
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn add(&self, entry_type: &str, set: &[&str]) -> String {
        let args = add::AddArgs {
            entry_type: Some(entry_type.into()),
            set: set.iter().map(|s| s.to_string()).collect(),
            ..add::AddArgs::default()
        };
        add::execute(&self.app, args, &mut Vec::new()).unwrap().key
    }

    fn seed(&self) {
        self.add(
            "article",
            &[
                "author=Einstein, Albert",
                "date=1905-06-30",
                "title=On a Heuristic Point of View about Quantum Light",
                "journaltitle=Annalen der Physik",
            ],
        );
        self.add(
            "book",
            &[
                "author=Einstein, Albert",
                "date=1922",
                "title=The Meaning of Relativity",
                "publisher=Princeton University Press",
            ],
        );
        self.add(
            "article",
            &[
                "author=Bohr, Niels",
                "date=1913-07",
                "title=On the Constitution of Atoms and Molecules",
                "journaltitle=Philosophical Magazine",
            ],
        );
    }
}

fn terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

fn text(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_types_lists_bundled_schema() {
    let fx = Fixture::new();
    let mut out = Vec::new();
    types::execute(&fx.app, types::TypesArgs { level: 1 }, &mut out).unwrap();
    let out = text(out);
    assert!(out.contains("article: "));
    assert!(out.contains("  journaltitle -> "));
    assert!(fx.temp.path().join("home").join("types.yaml").exists());
}

#[test]
fn test_add_from_type_prints_bib() {
    let fx = Fixture::new();
    let mut out = Vec::new();
    let args = add::AddArgs {
        entry_type: Some("misc".into()),
        set: vec!["author=Curie, Marie".into(), "date=1903".into(), "title=Radioactive Substances".into()],
        ..add::AddArgs::default()
    };
    let entry = add::execute(&fx.app, args, &mut out).unwrap();

    assert_eq!(entry.key, "curie1903");
    assert!(fx.lib().join("curie1903").join(RECORD_FILE).exists());
    assert!(text(out).starts_with("@misc{curie1903,\n  author = {Curie, Marie},\n"));
}

#[test]
fn test_add_unknown_type_fails() {
    let fx = Fixture::new();
    let args = add::AddArgs {
        entry_type: Some("pamphlet".into()),
        ..add::AddArgs::default()
    };
    let err = add::execute(&fx.app, args, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("type not found"));
    assert!(!fx.lib().exists());
}

#[test]
fn test_add_from_work_with_attachment() {
    let fx = Fixture::new();
    let work = fx.write(
        "work.yaml",
        "type: journal-article\n\
         title: Zur Elektrodynamik bewegter Körper\n\
         authors:\n  - first: Albert\n    last: Einstein\n\
         container_title: Annalen der Physik\n\
         date: 1905-6-30\n",
    );
    let pdf = fx.write("paper.pdf", "%PDF");

    let args = add::AddArgs {
        work: Some(work),
        attach: Some(pdf),
        edit: true,
        ..add::AddArgs::default()
    };
    let entry = add::execute(&fx.app, args, &mut Vec::new()).unwrap();

    assert_eq!(entry.entry_type, "article");
    assert_eq!(entry.required["date"], "1905-06-30");
    assert_eq!(entry.file, "einstein1905_zur_elektrodynamik_bewegter_körper.pdf");
    assert!(fx.lib().join("einstein1905").join(&entry.file).exists());
}

#[test]
fn test_add_missing_attachment_fails_before_commit() {
    let fx = Fixture::new();
    let args = add::AddArgs {
        entry_type: Some("misc".into()),
        attach: Some(fx.temp.path().join("missing.pdf")),
        ..add::AddArgs::default()
    };
    let err = add::execute(&fx.app, args, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(!fx.lib().exists());
}

#[tokio::test]
async fn test_list_and_search() {
    let fx = Fixture::new();
    fx.seed();

    let mut out = Vec::new();
    let args = list::ListArgs {
        query: terms("einstein"),
        sort: SortBy::Field("title".into()),
        width: 60,
    };
    assert_eq!(list::execute(&fx.app, args, &mut out).await.unwrap(), 2);
    let lines: Vec<String> = text(out).lines().map(str::to_string).collect();
    assert!(lines[0].starts_with("On a Heuristic"));
    assert!(lines[1].starts_with("The Meaning of Relativity"));
    assert!(lines[1].contains("(1922)"));
}

#[tokio::test]
async fn test_show_requires_single_match() {
    let fx = Fixture::new();
    fx.seed();

    let mut out = Vec::new();
    show::execute(&fx.app, &terms("bohr"), &mut out).await.unwrap();
    assert!(text(out).starts_with("[ARTICLE] bohr1913\nTitle:\n  On the Constitution"));

    let err = show::execute(&fx.app, &terms("einstein"), &mut Vec::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "too many entries (2) matched\nplease, refine your query");

    let err = show::execute(&fx.app, &terms("heisenberg"), &mut Vec::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "no entries found");
}

#[tokio::test]
async fn test_exact_key_selects_entry() {
    let fx = Fixture::new();
    fx.add("misc", &["author=Einstein, Albert", "date=1922", "title=First"]);
    fx.add("misc", &["author=Einstein, Albert", "date=1922", "title=Second"]);

    let mut out = Vec::new();
    show::execute(&fx.app, &terms("einstein1922"), &mut out).await.unwrap();
    assert!(text(out).contains("Title:\n  First\n"));
}

#[tokio::test]
async fn test_export_formats() {
    let fx = Fixture::new();
    fx.seed();

    let mut out = Vec::new();
    let count = export::execute(&fx.app, export::ExportArgs::default(), &mut out)
        .await
        .unwrap();
    assert_eq!(count, 3);
    let bib = text(out);
    let bohr = bib.find("@article{bohr1913,").unwrap();
    let einstein = bib.find("@article{einstein1905,").unwrap();
    let book = bib.find("@book{einstein1922,").unwrap();
    assert!(bohr < einstein && einstein < book);
    assert!(bib.contains("}\n\n@article{einstein1905,"));

    let mut out = Vec::new();
    let args = export::ExportArgs {
        query: terms("relativity"),
        format: Format::Ris,
    };
    export::execute(&fx.app, args, &mut out).await.unwrap();
    let ris = text(out);
    assert!(ris.starts_with("TY  - BOOK\nAU  - Einstein, Albert\nY1  - 1922//\n"));
    assert!(ris.contains("PB  - Princeton University Press"));
    assert!(ris.ends_with("ER  - \n"));

    let mut out = Vec::new();
    let args = export::ExportArgs {
        query: terms("bohr"),
        format: Format::Bibtex,
    };
    export::execute(&fx.app, args, &mut out).await.unwrap();
    let bibtex = text(out);
    assert!(bibtex.contains("  journal = {Philosophical Magazine}"));
    assert!(bibtex.contains("  month = {jul}"));
}

#[tokio::test]
async fn test_exported_library_imports_into_another() {
    let fx = Fixture::new();
    fx.seed();

    let mut bib = Vec::new();
    export::execute(&fx.app, export::ExportArgs::default(), &mut bib)
        .await
        .unwrap();
    let file = fx.write("refs.bib", &text(bib));

    let mut out = Vec::new();
    let args = import::ImportArgs {
        file,
        to: Some("other".into()),
    };
    let imported = import::execute(&fx.app, args, &mut out).unwrap();
    assert_eq!(imported.len(), 3);
    assert!(text(out).starts_with("Imported 3 entries from "));

    let original = fx.app.library().unwrap().entry_list().await.unwrap();
    let copied = fx.app.library_named(Some("other")).unwrap().entry_list().await.unwrap();
    assert_eq!(copied.len(), 3);
    for entry in &original {
        let copy = copied.iter().find(|c| c.key == entry.key).unwrap();
        assert_eq!(copy.entry_type, entry.entry_type);
        assert_eq!(copy.required, entry.required);
        assert_eq!(copy.bib(), entry.bib());
    }
}

#[test]
fn test_import_rejects_whole_file_on_unknown_type() {
    let fx = Fixture::new();
    let file = fx.write(
        "refs.bib",
        "@misc{curie1903,\n  author = {Curie, Marie},\n  date = {1903}\n}\n\n@nosuchtype{x2000,\n  author = {X, Y}\n}\n",
    );

    let args = import::ImportArgs { file, to: None };
    let err = import::execute(&fx.app, args, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("type not found"));
    assert!(!fx.lib().join("curie1903").exists());
}

#[tokio::test]
async fn test_edit_converts_type() {
    let fx = Fixture::new();
    fx.seed();

    let args = edit::EditArgs {
        query: terms("bohr"),
        entry_type: Some("misc".into()),
        ..edit::EditArgs::default()
    };
    let entry = edit::execute(&fx.app, args, &mut Vec::new()).await.unwrap();
    assert_eq!(entry.entry_type, "misc");
    assert_eq!(entry.field("journaltitle"), Some("Philosophical Magazine"));

    let stored: scholar_core::Entry = serde_yaml::from_str(
        &fs::read_to_string(fx.lib().join("bohr1913").join(RECORD_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(stored.entry_type, "misc");
}

#[tokio::test]
async fn test_edit_attaches_file() {
    let fx = Fixture::new();
    fx.seed();
    let notes = fx.write("notes.txt", "notes");

    let args = edit::EditArgs {
        query: terms("bohr"),
        attach: Some(notes),
        ..edit::EditArgs::default()
    };
    let mut out = Vec::new();
    let entry = edit::execute(&fx.app, args, &mut out).await.unwrap();
    assert_eq!(entry.file, "bohr1913_on_the_constitution_of_atoms_and_molecul.txt");
    assert!(text(out).starts_with("Attached "));
}

#[tokio::test]
async fn test_remove_with_yes() {
    let fx = Fixture::new();
    fx.seed();

    let mut out = Vec::new();
    assert!(remove::execute(&fx.app, &terms("bohr"), &mut out).await.unwrap());
    assert_eq!(text(out), "Removed bohr1913\n");
    assert!(!fx.lib().join("bohr1913").exists());
    assert!(fx.lib().join("einstein1905").exists());
}

#[tokio::test]
async fn test_check_reports_bad_dates() {
    let fx = Fixture::new();
    fx.seed();
    fx.add("misc", &["author=Plato", "date=380 BC", "title=Republic"]);

    let mut out = Vec::new();
    let failed = check::execute(&fx.app, &[], &mut out).await.unwrap();
    assert_eq!(failed, vec!["plato380 "]);
    assert!(text(out).ends_with("1 of 4 entries have invalid dates\n"));
}

#[tokio::test]
async fn test_unknown_library() {
    let fx = Fixture::new();
    let settings = load_settings(
        &SearchPaths::new(fx.temp.path(), fx.temp.path().join("home")),
        Some(&fx.temp.path().join("config.yaml")),
        None,
    )
    .unwrap();
    let app = App::new(settings, Some("music".into()), true);
    let err = list::execute(&app, list::ListArgs::default(), &mut Vec::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No library called \"music\""));
}

#[tokio::test]
async fn test_missing_library_directory() {
    let fx = Fixture::new();
    let err = list::execute(&fx.app, list::ListArgs::default(), &mut Vec::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("could not read library at"));
}

#[test]
fn test_config_which() {
    let fx = Fixture::new();
    let mut out = Vec::new();
    config::execute(&fx.app, config::ConfigArgs { which: true }, &mut out).unwrap();
    let out = text(out);
    assert!(out.contains(&format!(
        "Configuration file used: {}",
        fx.temp.path().join("config.yaml").display()
    )));
    assert!(out.contains(&format!(
        "Types file used: {}",
        Path::new(&fx.temp.path().join("home")).join("types.yaml").display()
    )));
}
