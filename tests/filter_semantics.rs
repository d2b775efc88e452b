//! Filter expression semantics (`tag`, `!`, `&`, `|`, parentheses),
//! exercised end to end through a `for ... with <filter>` statement
//! rather than unit-testing the filter parser/evaluator directly.

use outline2c::driver::run_str;

#[test]
fn bare_tag_selects_items_carrying_it() {
    let source = r"\ol xs=outline{tagged x;other y;}\ol for i in xs with tagged{i;}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "x;");
}

#[test]
fn not_selects_items_missing_the_tag() {
    let source = r"\ol xs=outline{tagged x;other y;}\ol for i in xs with !tagged{i;}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "y;");
}

#[test]
fn or_selects_items_carrying_either_tag() {
    let source = r"\ol xs=outline{a x;b y;c z;}\ol for i in xs with a|b{i;}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "x;y;");
}

#[test]
fn parens_group_or_before_and_applies() {
    let source = r"\ol xs=outline{a c x;b c y;a z;c w;}\ol for i in xs with (a|b)&c{i;}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "x;y;");
}
