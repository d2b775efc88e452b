//! Lookup transforms (`quote`, `lower`, `upper`, `camel`, `mixed`), run
//! through the full pipeline rather than calling `src/builtin.rs`'s
//! functions directly, plus the override rule: a non-bare tag sharing a
//! transform's name wins over the built-in.

use outline2c::driver::run_str;

#[test]
fn builtin_transforms_apply_by_name() {
    let source = concat!(
        r"\ol xs=outline{myHTTPValue;}",
        r"\ol for i in xs{i!lower}",
        r"\ol for i in xs{i!upper}",
        r"\ol for i in xs{i!camel}",
        r"\ol for i in xs{i!mixed}",
        r"\ol for i in xs{i!quote}",
    );
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(
        output,
        concat!(
            "my_http_value",
            "MY_HTTP_VALUE",
            "MyHttpValue",
            "myHttpValue",
            "\"myHTTPValue\"",
        )
    );
}

#[test]
fn a_valued_tag_named_like_a_transform_overrides_the_builtin() {
    let source = r"\ol xs=outline{lower={CUSTOM}HTTPServer;}\ol for i in xs{i!lower}";
    let output = run_str("in.ol", source).unwrap();
    assert_eq!(output, "CUSTOM");
}
