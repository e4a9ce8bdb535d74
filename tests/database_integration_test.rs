//! Integration tests for loading a credit database and selecting credits.

use credits::database::CreditDatabase;
use credits::dependencies::parse_dependency_list;
use credits::model::{ArtifactCoordinate, License, Owner};
use credits::selection::select;
use std::path::Path;

const DATABASE_PATH: &str = "tests/testdata/credits.xml";

fn load() -> CreditDatabase {
    CreditDatabase::load(DATABASE_PATH).expect("fixture database should load")
}

fn inline_owner(text: &str) -> Owner {
    Owner::Inline {
        text: text.to_string(),
    }
}

fn inline_license(text: &str) -> License {
    License::Inline {
        text: text.to_string(),
    }
}

#[test]
fn test_load_resolves_every_credit() {
    let database = load();
    let credits = database.credits();
    assert_eq!(credits.len(), 7);

    let keys: Vec<&str> = credits.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "androidJetpack",
            "androidPlatform",
            "commonsLang",
            "exoplayer",
            "glide",
            "materialComponents",
            "openJDK",
        ]
    );

    let jetpack = credits[0];
    assert!(!jetpack.force);
    assert_eq!(jetpack.component, "Android Jetpack");
    assert_eq!(jetpack.owner, inline_owner("The Android Open Source Project"));
    assert_eq!(jetpack.license, inline_license("Apache License, Version 2.0"));

    let platform = credits[1];
    assert!(platform.force);
    assert_eq!(
        platform.license,
        inline_license("Android Software Development Kit License")
    );

    let commons = credits[2];
    assert_eq!(commons.owner, inline_owner("Commons Lang Team"));

    let exoplayer = credits[3];
    assert_eq!(exoplayer.owner, inline_owner("Google Open Source"));

    let glide = credits[4];
    assert_eq!(glide.license, inline_license("BSD, MIT, Apache 2.0"));

    let open_jdk = credits[6];
    assert!(open_jdk.force);
    assert_eq!(
        open_jdk.license.text(),
        Some("GNU General Public License, version 2, with the Classpath Exception")
    );
}

#[test]
fn test_load_from_file_url() {
    let path = Path::new(DATABASE_PATH).canonicalize().unwrap();
    let url = url::Url::from_file_path(&path).unwrap();

    let database = CreditDatabase::load(url.as_str()).unwrap();
    assert_eq!(database.len(), 7);
    assert_eq!(database.artifact_count(), 8);
}

#[test]
fn test_lookup_every_declared_artifact() {
    let database = load();
    for credit in database.credits() {
        for artifact in database.artifacts_of(&credit.key) {
            let found = database.lookup_by_artifact(artifact).unwrap();
            assert_eq!(found.key, credit.key);
        }
    }

    let jetpack: Vec<String> = database
        .artifacts_of("androidJetpack")
        .iter()
        .map(|a| a.to_string())
        .collect();
    assert_eq!(
        jetpack,
        vec![
            "androidx.appcompat:appcompat",
            "androidx.core:core-ktx",
            "androidx.lifecycle:lifecycle-runtime-ktx",
        ]
    );
}

#[test]
fn test_select_release_dependencies() {
    let database = load();
    let dependencies =
        parse_dependency_list(include_str!("testdata/deps/release.txt")).unwrap();

    let selection = select(&database, dependencies);
    assert_eq!(
        selection.keys(),
        vec!["androidJetpack", "androidPlatform", "glide", "openJDK"]
    );
    assert_eq!(
        selection.unmatched(),
        &[ArtifactCoordinate::new("org.jetbrains.kotlin", "kotlin-stdlib")]
    );
}

#[test]
fn test_registry_position_does_not_matter() {
    let source = std::fs::read_to_string(DATABASE_PATH).unwrap();
    let start = source.find("    <owners>").unwrap();
    let end = source.find("</credits>").unwrap();
    let registries = &source[start..end];

    // Move both registries in front of the first credit.
    let without = source.replacen(registries, "", 1);
    let first_credit = without.find("    <credit ").unwrap();
    let mut reordered = without.clone();
    reordered.insert_str(first_credit, registries);

    let original = CreditDatabase::parse(&source).unwrap();
    let moved = CreditDatabase::parse(&reordered).unwrap();

    for (a, b) in original.credits().iter().zip(moved.credits()) {
        assert_eq!(a.key, b.key);
        assert_eq!(a.owner, b.owner);
        assert_eq!(a.license, b.license);
    }
}

#[test]
fn test_independent_loads_in_parallel() {
    use rayon::prelude::*;

    let counts: Vec<usize> = (0..8)
        .into_par_iter()
        .map(|_| load().len())
        .collect();
    assert!(counts.iter().all(|&count| count == 7));
}
