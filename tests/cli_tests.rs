mod utils;

use docsmith::cli::run;
use docsmith::translation::{get_translator, BbCodeInterpreter, ContextTranslator};
use docsmith::{Constructor, ConstructorOptions, Error};
use std::fs;
use test_log::test;
use utils::{cli_args, node_context, write, write_context};

#[test]
fn translate_and_construct_with_builtin_model() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("docs");

    let syntax = get_translator("rst").unwrap();
    let translator = ContextTranslator::new(&BbCodeInterpreter, syntax.as_ref());
    let constructor = Constructor::new(ConstructorOptions::default()).unwrap();
    let context = constructor.translate_and_construct(node_context(), &translator, &out).unwrap();

    assert_eq!(
        context["classes"][0]["brief_description"],
        "Base class for all **scene** objects."
    );
    assert_eq!(
        context["classes"][0]["enums"][0]["values"][0]["description"],
        "Inherits the **parent** mode."
    );

    let node = fs::read_to_string(out.join("node.rst")).unwrap();
    assert!(node.starts_with(".. _class_node:\n\nNode\n====\n"));
    assert!(node.contains("**Inherits:** ``Object``"));
    assert!(node.contains("Base class for all **scene** objects."));
    assert!(node.contains("Use ``add_child`` to nest them."));
    assert!(node.contains("- ``String`` **name**: The *unique* name of the node."));
    assert!(node.contains("Adds a child :ref:`Node<class_node>`."));
    assert!(node.contains("- PROCESS_MODE_INHERIT\n- PROCESS_MODE_ALWAYS\n"));
    assert!(node.contains("``NOTIFICATION_READY``: Sent when ``name`` is set."));

    let index = fs::read_to_string(out.join("index.rst")).unwrap();
    assert!(index.starts_with("Class reference\n===============\n"));
    assert!(index.contains(".. toctree::"));
    assert!(index.contains("   node\n"));
}

#[test]
fn cli_constructs_documentation() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_context(tmp.path(), &node_context());
    let out = tmp.path().join("out");

    run(cli_args(&input, &out)).unwrap();

    assert!(out.join("node.rst").is_file());
    assert!(out.join("index.rst").is_file());
    let node = fs::read_to_string(out.join("node.rst")).unwrap();
    assert!(node.contains("**scene**"));
}

#[test]
fn cli_runs_are_repeatable() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_context(tmp.path(), &node_context());
    let first = tmp.path().join("first");
    let second = tmp.path().join("second");

    run(cli_args(&input, &first)).unwrap();
    run(cli_args(&input, &second)).unwrap();

    utils::assert_same_dirs(&first, &second);
}

#[test]
fn cli_plain_translator_and_format() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_context(tmp.path(), &node_context());
    let out = tmp.path().join("out");

    let mut args = cli_args(&input, &out);
    args.translator = "plain".to_string();
    args.format = Some("txt".to_string());
    run(args).unwrap();

    let node = fs::read_to_string(out.join("node.txt")).unwrap();
    assert!(node.contains("Base class for all scene objects."));
    assert!(out.join("index.txt").is_file());
}

#[test]
fn cli_custom_model_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let model = tmp.path().join("notes");
    write(&model.join("model.yaml"), "format: md\n");
    write(&model.join("filters.jinja"), "{% macro heading(value) %}# {{ value }}{% endmacro %}");
    write(&model.join("templates").join("class.jinja"), "{{ class.name | heading }}");
    let input = write_context(tmp.path(), &node_context());
    let out = tmp.path().join("out");

    let mut args = cli_args(&input, &out);
    args.model = model.to_str().unwrap().to_string();
    args.translator = "markdown".to_string();
    run(args).unwrap();

    assert_eq!(fs::read_to_string(out.join("node.md")).unwrap(), "# Node");
    assert!(!out.join("index.md").exists());
}

#[test]
fn cli_failures_write_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_context(tmp.path(), &node_context());
    let out = tmp.path().join("out");

    let mut args = cli_args(&input, &out);
    args.translator = "html".to_string();
    assert!(matches!(run(args), Err(Error::UnknownTranslatorError { .. })));

    let mut args = cli_args(&input, &out);
    args.model = "html".to_string();
    assert!(matches!(run(args), Err(Error::ModelNotFoundError { .. })));

    let args = cli_args(&tmp.path().join("missing.json"), &out);
    assert!(run(args).is_err());

    assert!(!out.exists());
}
