#![allow(dead_code)]

use docsmith::cli::Args;
use docsmith::ext::PathExt;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Creates an empty file, along with its parent directories.
pub fn touch(path: &Path) {
    write(path, "");
}

/// Writes `content` to `path`, creating parent directories first.
pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Three bare class records.
pub fn classes_context() -> serde_json::Value {
    json!({"classes": [
        {"name": "Class1"},
        {"name": "Class2"},
        {"name": "Class3"},
    ]})
}

/// One fully described class, with BBCode markup in its descriptions.
pub fn node_context() -> serde_json::Value {
    json!({"classes": [{
        "name": "Node",
        "inherits": "Object",
        "brief_description": "Base class for all [b]scene[/b] objects.",
        "description": "Nodes are the building blocks of a scene.[br]Use [code]add_child[/code] to nest them.",
        "properties": [
            {"name": "name", "type": "String", "description": "The [i]unique[/i] name of the node."}
        ],
        "methods": [
            {"name": "add_child", "return_type": "void", "description": "Adds a child [Node]."}
        ],
        "signals": [
            {"name": "ready", "description": "Emitted when the node is ready."}
        ],
        "enums": [{
            "name": "ProcessMode",
            "description": "How the node is processed.",
            "values": [
                {"name": "PROCESS_MODE_INHERIT", "description": "Inherits the [b]parent[/b] mode."},
                {"name": "PROCESS_MODE_ALWAYS", "description": "Always processed."}
            ]
        }],
        "constants": [
            {"name": "NOTIFICATION_READY", "description": "Sent when [member name] is set."}
        ]
    }]})
}

/// Writes a context to `<dir>/context.json` and returns its path.
pub fn write_context(dir: &Path, context: &serde_json::Value) -> PathBuf {
    let path = dir.join("context.json");
    write(&path, &serde_json::to_string_pretty(context).unwrap());
    path
}

/// CLI arguments for constructing `input` into `output_dir` with the defaults.
pub fn cli_args(input: &Path, output_dir: &Path) -> Args {
    Args {
        input: input.to_str_checked().unwrap().to_string(),
        output_dir: output_dir.to_path_buf(),
        model: "rst".to_string(),
        templates: None,
        filters: None,
        builders: None,
        format: None,
        translator: "rst".to_string(),
        models_dir: None,
        verbose: 2,
    }
}

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let files = |dir: &Path| -> std::collections::BTreeSet<PathBuf> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
            .collect()
    };
    let files1 = files(dir1);
    let files2 = files(dir2);

    println!("\n=== Directory Comparison ===");
    println!("Left:  {dir1:?}");
    println!("Right: {dir2:?}");

    for file in files1.difference(&files2) {
        println!("  + {file:?}");
    }
    for file in files2.difference(&files1) {
        println!("  - {file:?}");
    }
    for file in files1.intersection(&files2) {
        let left = fs::read_to_string(dir1.join(file)).unwrap_or_default();
        let right = fs::read_to_string(dir2.join(file)).unwrap_or_default();
        if left != right {
            println!("\n  File: {file:?}");
            println!("  --- Left content:\n{left}");
            println!("  --- Right content:\n{right}");
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two output directories hold the same files with the same content.
pub fn assert_same_dirs(dir1: &Path, dir2: &Path) {
    if dir_diff::is_different(dir1, dir2).unwrap() {
        print_dir_diff(dir1, dir2);
        panic!("Directories differ. See above for details.");
    }
}
