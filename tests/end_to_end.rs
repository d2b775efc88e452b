//! End-to-end scenarios from the external interface: whole programs fed
//! through the pipeline, checked against their expected output.
//!
//! Sources here are deliberately compact (no incidental whitespace around
//! directives) so expected outputs can be asserted exactly rather than
//! fuzzily matched.

use std::sync::atomic::{AtomicU32, Ordering};

use outline2c::driver::run_str;

#[test]
fn pasting_erases_the_token_paste_operator() {
    let output = run_str("in.ol", r"int a\\b = 0;").unwrap();
    assert_eq!(output, "int ab = 0;");
}

#[test]
fn outline_and_for_expand_each_item_name() {
    let source = r"\ol cars=outline{red;blue;}\ol for c in cars{c;}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "red;blue;");
}

#[test]
fn filter_selects_the_item_carrying_both_tags() {
    let source = r"\ol xs=outline{tag1 a;tag2 b;tag1 tag2 c;}\ol for x in xs with tag1 & tag2{x;}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "c;");
}

#[test]
fn map_dispatches_to_the_matching_line_and_applies_a_transform() {
    let source = r"\ol item=outline{h HTTPServer;}\ol for i in item{\ol map i{*{i!lower}}}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "http_server");
}

#[test]
fn reverse_list_joins_items_with_commas_in_reverse_order() {
    let source = r"\ol xs=outline{a;b;c;}\ol for x in xs reverse list{x}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "c,b,a");
}

#[test]
fn include_runs_the_included_files_directives_and_carries_bindings_into_scope() {
    let dir = make_scratch_dir();
    std::fs::write(dir.join("sub.ol"), r"\ol zs=outline{Z;}").unwrap();
    let main_path = dir.join("main.ol");
    std::fs::write(&main_path, "\\ol include \"sub.ol\";X\\ol for z in zs{z}").unwrap();

    let source = std::fs::read_to_string(&main_path).unwrap();
    let output = run_str(main_path.to_str().unwrap(), &source).unwrap();

    std::fs::remove_dir_all(&dir).ok();
    assert_eq!(output, "XZ");
}

/// A fresh, empty directory under the system temp directory, unique per
/// call so parallel test threads never collide.
fn make_scratch_dir() -> std::path::PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("outline2c-test-{}-{id}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
