//! Runs that depend on the process working directory.
//!
//! Kept in their own test binary with a single test, since changing the
//! working directory affects every thread of the process.

mod utils;

use docsmith::{Constructor, ConstructorOptions};
use std::fs;
use test_log::test;
use utils::classes_context;

#[test]
fn builtin_model_is_not_shadowed_by_local_directories() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("rst")).unwrap();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(tmp.path()).unwrap();

    let result = Constructor::new(ConstructorOptions::default()).and_then(|constructor| {
        constructor.construct(&classes_context(), "out")?;
        Ok(constructor)
    });
    let index_written = tmp.path().join("out").join("index.rst").is_file();
    let local_model = Constructor::new(ConstructorOptions {
        model: "./rst".to_string(),
        ..Default::default()
    });
    std::env::set_current_dir(previous).unwrap();

    let constructor = result.unwrap();
    assert_eq!(constructor.templates().len(), 2);
    assert_eq!(constructor.filters().len(), 7);
    assert_ne!(constructor.model().root, std::path::Path::new("rst"));
    assert!(index_written);

    let local_model = local_model.unwrap();
    assert!(local_model.templates().is_empty());
    assert!(local_model.filters().is_empty());
}
