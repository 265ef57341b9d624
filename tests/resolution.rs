//! Integration tests for the public resolution API.
//!
//! These tests build small project trees on disk and check the full
//! pipeline (`resolve`, `get_dest_path`, `resolve_layers`) through the
//! crate's public surface only.

use assert_fs::prelude::*;
use assert_fs::TempDir;
use fileset_resolver::config;
use fileset_resolver::normalize::absolute_posix;
use fileset_resolver::{
    get_dest_path, normalize_values, resolve, resolve_layers, Error, FileEntry, Ruleset,
};
use serde_json::json;

fn project(files: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for file in files {
        temp.child(file).write_str(file).unwrap();
    }
    temp
}

fn entries(values: serde_json::Value) -> Vec<FileEntry> {
    let values = values.as_array().cloned().unwrap_or_default();
    FileEntry::from_values(&values).unwrap()
}

fn dests(temp: &TempDir, values: serde_json::Value) -> Vec<String> {
    resolve(temp.path(), &entries(values))
        .unwrap()
        .into_iter()
        .map(|f| f.dest)
        .collect()
}

#[test]
fn test_negation_after_inclusion() {
    let temp = project(&["source/main.brs", "source/lib.brs"]);
    assert_eq!(
        dests(&temp, json!(["source/**/*", "!source/main.brs"])),
        ["source/lib.brs"]
    );
}

#[test]
fn test_reinclusion_after_negation() {
    let temp = project(&["source/main.brs", "source/lib.brs"]);
    assert_eq!(
        dests(&temp, json!(["source/**/*", "!source/**/*", "source/main.brs"])),
        ["source/main.brs"]
    );
}

#[test]
fn test_folder_dest_keeps_structure_below_literal_prefix() {
    let temp = project(&["flavors/shared/resources/images/fhd/image.jpg"]);
    assert_eq!(
        dests(
            &temp,
            json!([{ "src": "flavors/shared/resources/**/*", "dest": "resources" }])
        ),
        ["resources/images/fhd/image.jpg"]
    );
}

#[test]
fn test_object_glob_without_dest_keeps_layout_from_root() {
    let temp = project(&["source/main.brs", "source/lib/util.brs"]);
    assert_eq!(
        dests(&temp, json!([{ "src": "source/*.brs" }])),
        ["source/main.brs"]
    );
    assert_eq!(
        dests(&temp, json!([{ "src": ["source/**/*.brs"] }])),
        ["source/lib/util.brs", "source/main.brs"]
    );
}

#[test]
fn test_literal_dest_flattens_single_file() {
    let temp = project(&["config/prod.json", "config/dev.json"]);
    assert_eq!(
        dests(
            &temp,
            json!([{ "src": "config/prod.json", "dest": "settings/config.json" }])
        ),
        ["settings/config.json"]
    );
}

#[test]
fn test_directory_literal_includes_contents() {
    let temp = project(&["components/a.xml", "components/nested/b.xml"]);
    assert_eq!(
        dests(&temp, json!(["components"])),
        ["components/a.xml", "components/nested/b.xml"]
    );
}

#[test]
fn test_src_array_shares_dest() {
    let temp = project(&["a/one.txt", "b/two.txt"]);
    assert_eq!(
        dests(&temp, json!([{ "src": ["a/*.txt", "b/*.txt"], "dest": "all/" }])),
        ["all/one.txt", "all/two.txt"]
    );
}

#[test]
fn test_case_insensitive_collision_keeps_later_source() {
    let temp = project(&["lower/readme.md", "upper/README.md"]);
    let files = resolve(
        temp.path(),
        &entries(json!([
            { "src": "lower/readme.md", "dest": "readme.md" },
            { "src": "upper/README.md", "dest": "README.md" }
        ])),
    )
    .unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].dest, "README.md");
    assert!(files[0].src.ends_with("/upper/README.md"));
}

#[test]
fn test_invalid_entry_is_rejected_with_index() {
    let result = normalize_values(&[json!("ok"), json!({ "dest": "x" })], "/proj");
    match result {
        Err(Error::Validation { index, .. }) => assert_eq!(index, 1),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_get_dest_path_matches_resolve() {
    let temp = project(&["source/main.brs", "source/lib.brs", "manifest"]);
    let list = entries(json!(["source/**/*", "!source/main.brs", "manifest"]));

    for file in resolve(temp.path(), &list).unwrap() {
        let dest = get_dest_path(&file.src, &list, temp.path()).unwrap();
        assert_eq!(dest.as_deref(), Some(file.dest.as_str()));
    }
    assert_eq!(
        get_dest_path(temp.path().join("source/main.brs"), &list, temp.path()).unwrap(),
        None
    );
}

#[test]
fn test_get_dest_path_does_not_need_the_file_on_disk() {
    let temp = TempDir::new().unwrap();
    let list = entries(json!([{ "src": "assets/**/*.png", "dest": "img/" }]));
    assert_eq!(
        get_dest_path(temp.path().join("assets/ui/new.png"), &list, temp.path()).unwrap(),
        Some("img/ui/new.png".to_string())
    );
}

#[test]
fn test_layered_override_tracking() {
    let temp = project(&[
        "base/manifest",
        "base/source/main.brs",
        "base/source/util.brs",
        "flavor/source/main.brs",
    ]);
    let rulesets = vec![
        Ruleset::new(temp.path().join("base"), vec!["**/*".into()]),
        Ruleset::new(temp.path().join("flavor"), vec!["source/**/*".into()]),
    ];

    let index = resolve_layers(&rulesets).unwrap();
    let base_main = absolute_posix(&temp.path().join("base/source/main.brs")).unwrap();
    let flavor_main = absolute_posix(&temp.path().join("flavor/source/main.brs")).unwrap();
    let base_util = absolute_posix(&temp.path().join("base/source/util.brs")).unwrap();

    assert!(index.get_all_dest_for_src(&base_main).is_empty());
    assert_eq!(index.get_all_dest_for_src(&flavor_main), ["source/main.brs"]);
    assert_eq!(index.get_all_dest_for_src(&base_util), ["source/util.brs"]);

    let live: Vec<(usize, &str)> = index
        .live_entries()
        .into_iter()
        .map(|(row, entry)| (row, entry.dest.as_str()))
        .collect();
    assert_eq!(
        live,
        [(0, "manifest"), (0, "source/util.brs"), (1, "source/main.brs")]
    );
}

#[test]
fn test_stale_index_is_detected() {
    let temp = project(&["a/x.txt"]);
    let rulesets = vec![Ruleset::new(temp.path().join("a"), vec!["*.txt".into()])];
    let index = resolve_layers(&rulesets).unwrap();

    let changed = vec![Ruleset::new(temp.path().join("a"), vec!["**/*".into()])];
    assert!(matches!(
        index.validate(&changed),
        Err(Error::IdentityMismatch { index: 0, .. })
    ));
    assert!(index.validate(&rulesets).is_ok());
}

#[test]
fn test_config_file_to_layers() {
    let temp = project(&["app/manifest", "app/source/main.brs", "blue/source/main.brs"]);
    temp.child("fileset.yaml")
        .write_str(
            "root_dir: app\nfiles: [manifest, \"source/**/*\"]\nrulesets:\n  - root_dir: ../blue\n    files: [\"**/*\"]\n",
        )
        .unwrap();

    let config = config::from_file(temp.path().join("fileset.yaml")).unwrap();
    let index = resolve_layers(&config.rulesets().unwrap()).unwrap();

    assert_eq!(index.row_count(), 2);
    assert_eq!(index.len(0), 2);
    assert_eq!(index.len(1), 1);
    assert_eq!(index.live_entries().len(), 2);
}
