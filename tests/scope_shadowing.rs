//! Lexical scope shadowing: nested and sibling bindings of the same name
//! stay independent, and a macro body resolves names against the scope
//! captured at its own definition site rather than the caller's.

use outline2c::driver::run_str;

#[test]
fn a_nested_for_loops_variable_shadows_the_outer_one_only_within_its_body() {
    let source = r"\ol xs=outline{a;}\ol ys=outline{b;}\ol for x in xs{\ol for x in ys{x}x}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "ba");
}

#[test]
fn sibling_for_loops_reusing_a_variable_name_do_not_interfere() {
    let source = r"\ol xs=outline{a;}\ol ys=outline{b;}\ol for x in xs{x}\ol for x in ys{x}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "ab");
}

#[test]
fn a_macro_body_resolves_its_own_input_name_not_the_caller_s_binding() {
    let source = r"\ol m=macro(x){x}\ol xs=outline{a;}\ol for x in xs{m(xs)}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "x");
}
