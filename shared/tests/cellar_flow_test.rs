//! Cellar Lifecycle Integration Test
//!
//! Drives the domain repository end to end over a real file: initialize,
//! stock, rate, remove, sort, filter, and verify what lands on disk
//! after closing.

use std::fs;
use std::path::PathBuf;

use assert_matches::assert_matches;

use vintry_shared::cellar::Cellar;
use vintry_shared::core::{backup_path, CoreError, TextStore};
use vintry_shared::models::{Record, Wine, WineColor};
use vintry_shared::utils::WineFilter;

struct CellarTest {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl CellarTest {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp directory");
        let path = dir.path().join("cellar.txt");

        let store = TextStore::<Wine>::delimited(':').unwrap();
        store.init(&path, false).unwrap();

        Self { _dir: dir, path }
    }
}

#[test]
fn a_full_cellar_session() {
    let fixture = CellarTest::new();

    // Stock the cellar
    let mut cellar = Cellar::open(&fixture.path, ':').unwrap();
    assert!(cellar.is_empty());

    let chianti = cellar.add(WineColor::Red, "Chianti Classico", 2011, "Fontodi", 20.99);
    let chablis = cellar.add(WineColor::White, "Chablis", 2019, "Dauvissat", 34.50);
    let tavel = cellar.add(WineColor::Rose, "Tavel", 2020, "Corne-Loup", 14.25);
    assert_eq!((chianti, chablis, tavel), (0, 1, 2));
    cellar.close().unwrap();

    // Taste one, drop another
    let mut cellar = Cellar::open(&fixture.path, ':').unwrap();
    cellar.rate(chablis, 5, "superbe").unwrap();
    cellar.remove(tavel).unwrap();
    cellar.close().unwrap();

    // What is left on disk
    let cellar = Cellar::open(&fixture.path, ':').unwrap();
    assert_eq!(cellar.len(), 2);
    assert_eq!(cellar.wine(chablis).unwrap().rating(), Some(5));
    assert!(cellar.wine(tavel).is_none());

    // The rated wine is now part of history
    let mut cellar = cellar;
    assert_matches!(cellar.remove(chablis), Err(CoreError::Domain { .. }));
    assert_matches!(
        cellar.rate(chablis, 4, "deja note"),
        Err(CoreError::Domain { .. })
    );
}

#[test]
fn identities_never_recycle_within_a_session() {
    let fixture = CellarTest::new();

    let mut cellar = Cellar::open(&fixture.path, ':').unwrap();
    let first = cellar.add(WineColor::Red, "Barolo", 2017, "Vietti", 49.99);
    cellar.remove(first).unwrap();
    let second = cellar.add(WineColor::Red, "Barbaresco", 2018, "Produttori", 39.99);

    assert_eq!(first, 0);
    assert_eq!(second, 1);
}

#[test]
fn closing_writes_the_backup_of_the_previous_state() {
    let fixture = CellarTest::new();

    let mut cellar = Cellar::open(&fixture.path, ':').unwrap();
    cellar.add(WineColor::Red, "Chianti", 2011, "Fontodi", 20.99);
    cellar.close().unwrap();
    let first_state = fs::read_to_string(&fixture.path).unwrap();

    let mut cellar = Cellar::open(&fixture.path, ':').unwrap();
    cellar.add(WineColor::White, "Sancerre", 2021, "Vacheron", 28.00);
    cellar.close().unwrap();

    let backup = fs::read_to_string(backup_path(&fixture.path)).unwrap();
    assert_eq!(backup, first_state);
    assert_eq!(fs::read_to_string(&fixture.path).unwrap().lines().count(), 2);
}

#[test]
fn sorting_and_filtering_compose_with_persistence() {
    let fixture = CellarTest::new();

    let mut cellar = Cellar::open(&fixture.path, ':').unwrap();
    cellar.add(WineColor::Red, "Chianti", 2011, "Fontodi", 20.99);
    cellar.add(WineColor::White, "Chablis", 2019, "Dauvissat", 34.50);
    cellar.add(WineColor::Red, "Barolo", 2017, "Vietti", 49.99);
    cellar.rate(0, 4, "tres bon").unwrap();
    cellar.close().unwrap();

    let cellar = Cellar::open(&fixture.path, ':').unwrap();

    let by_color_then_price = cellar.sorted(&["color", "price"], false).unwrap();
    let names: Vec<&str> = by_color_then_price.iter().map(|w| w.name()).collect();
    assert_eq!(names, vec!["Fontodi", "Vietti", "Dauvissat"]);

    let reds = cellar.select(&WineFilter::new().pattern("red").unwrap()).unwrap();
    assert_eq!(reds.len(), 2);

    let rated = cellar.select(&WineFilter::new().rated_only()).unwrap();
    assert_eq!(rated.len(), 1);
    assert_eq!(rated[0].id(), 0);
}
