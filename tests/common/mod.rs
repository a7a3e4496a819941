use firmrank::{EnforcementClassifier, Session, Snapshot};
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fixtures")
        .join(name)
}

pub fn sources_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sources")
}

pub fn small_snapshot() -> Snapshot {
    firmrank::io::load_snapshot(&fixture_path("meta_small.json")).expect("fixture loads")
}

pub fn small_session() -> Session {
    Session::new(small_snapshot(), EnforcementClassifier::default())
}
