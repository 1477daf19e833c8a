//! Config-driven browsing over a catalog on disk.

use std::io::Write;
use std::time::{Duration, Instant};

use seedscope_cli::config::load_config;
use seedscope_cli::interactive;
use seedscope_cli::render::Renderer;
use seedscope_core::{Debouncer, Session, SessionOptions, SortKey};
use tempfile::Builder;

const CATALOG: &str = r#"[
  {"variety_id": "r1", "crop": "Rice", "variety_name": "Swarna Sub1", "year_of_release": "2009",
   "states_full": ["Odisha"], "stress_types": ["Flood"], "evidence_quality": "High"},
  {"variety_id": "r2", "crop": "Rice", "variety_name": "IR64", "year_of_release": "1985"},
  {"variety_id": "w1", "crop": "Wheat", "variety_name": "HD 2967", "year_of_release": "2011"}
]"#;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn session_from_config(config_text: &str) -> (Session, Duration) {
    let config_file = write_temp(".toml", config_text);
    let loaded = load_config(Some(config_file.path())).unwrap();
    let catalog = write_temp(".json", CATALOG);
    let mut session = Session::new(SessionOptions {
        load: loaded.config.load_options(),
        page_size: loaded.config.page_size(),
        sort: loaded.config.sort_state(),
    });
    session.load(catalog.path()).unwrap();
    (session, loaded.config.debounce())
}

#[test]
fn config_sets_page_size_and_sort() {
    let (session, _) =
        session_from_config("[view]\npage_size = 2\nsort_key = \"year\"\nsort_descending = true\n");
    let explorer = session.explorer().unwrap();
    let page = explorer.snapshot();
    assert_eq!(page.total_pages, 2);
    let names: Vec<_> = page.records.iter().map(|r| r.variety_name.as_str()).collect();
    assert_eq!(names, ["HD 2967", "Swarna Sub1"]);
    assert_eq!(explorer.sort().key, Some(SortKey::Year));
}

#[test]
fn page_json_carries_offset_and_tolerance() {
    let (mut session, _) = session_from_config(
        "[view]\npage_size = 1\nsort_key = \"variety\"\nsort_descending = true\n",
    );
    let explorer = session.explorer_mut().unwrap();

    let first = serde_json::to_value(explorer.snapshot()).unwrap();
    assert_eq!(first["offset"], 0);
    assert_eq!(first["total_pages"], 3);
    assert_eq!(first["records"][0]["variety_name"], "Swarna Sub1");
    assert_eq!(first["records"][0]["stress_tolerance"], "Yes");

    explorer.go_to_page(2);
    let second = serde_json::to_value(explorer.snapshot()).unwrap();
    assert_eq!(second["offset"], 1);
    assert_eq!(second["records"][0]["variety_name"], "IR64");
    assert_eq!(second["records"][0]["stress_tolerance"], "No");
}

#[test]
fn interactive_script_filters_and_pages() {
    let (mut session, debounce) = session_from_config("[view]\npage_size = 1\n");
    let explorer = session.explorer_mut().unwrap();
    let mut debouncer = Debouncer::new(debounce);
    let mut out = Vec::new();
    interactive::run(
        explorer,
        Renderer::new(false),
        &mut debouncer,
        "crop Rice\nn\nshow r1\n".as_bytes(),
        &mut out,
        Instant::now,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(explorer.filtered_count(), 2);
    assert_eq!(explorer.pager().index(), 2);
    assert!(out.contains("Showing 2-2 of 2 varieties (3 loaded), page 2/2"));
    assert!(out.contains("Swarna Sub1 (Rice)"));
}

#[test]
fn missing_catalog_reports_path() {
    let mut session = Session::new(SessionOptions::default());
    let dir = tempfile::tempdir().unwrap();
    let err = session.load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
