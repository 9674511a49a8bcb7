use super::{compile, match_path, normalize, Token};
use std::collections::HashMap;
use std::sync::Arc;

fn lit(s: &str) -> Token {
    Token::Literal(s.to_string())
}

fn param(s: &str) -> Token {
    Token::Param(Arc::from(s))
}

/// Compile `pattern`, normalize `path` and return the captures as a map.
fn run(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let compiled = compile(pattern);
    match_path(&compiled, &normalize(path)).map(|params| {
        params
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    })
}

fn captures(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_normalize_trims_and_lowercases() {
    assert_eq!(normalize("/Head/X/"), "head/x");
    assert_eq!(normalize("  /api/ "), "api");
    assert_eq!(normalize("///"), "");
}

#[test]
fn test_non_ascii_letters_keep_their_case() {
    assert_eq!(normalize("/Café/ÄB"), "café/Äb");
    assert!(run("/ä", "/Ä").is_none());
    assert_eq!(run("/ä", "/ä"), Some(captures(&[])));
}

#[test]
fn test_compile_literal_only() {
    let p = compile("/Simple/");
    assert_eq!(p.tokens(), &[lit("simple")]);
    assert_eq!(p.source(), "/Simple/");
}

#[test]
fn test_compile_empty_pattern() {
    assert!(compile("").is_empty());
    assert!(compile("/").is_empty());
}

#[test]
fn test_compile_params_and_literals() {
    let p = compile("/head/:param1/middle/prefix:param2.html");
    assert_eq!(
        p.tokens(),
        &[
            lit("head/"),
            param("param1"),
            lit("/middle/prefix"),
            param("param2"),
            lit(".html"),
        ]
    );
    assert_eq!(p.param_names().collect::<Vec<_>>(), vec!["param1", "param2"]);
    assert_eq!(p.to_string(), "head/:param1/middle/prefix:param2.html");
}

#[test]
fn test_compile_leading_param() {
    let p = compile("/:lang/docs");
    assert_eq!(p.tokens(), &[param("lang"), lit("/docs")]);
}

#[test]
fn test_compile_terminator_starts_next_literal() {
    // '-' ends the name and is kept as the first character of the literal
    let p = compile("/v:major-:minor");
    assert_eq!(
        p.tokens(),
        &[lit("v"), param("major"), lit("-"), param("minor")]
    );
}

#[test]
fn test_compile_colon_inside_param_becomes_literal() {
    let p = compile("/:a:b");
    assert_eq!(p.tokens(), &[param("a"), lit(":b")]);
}

#[test]
fn test_compile_uppercase_param_name_is_lowercased() {
    let p = compile("/users/:UserId");
    assert_eq!(p.tokens(), &[lit("users/"), param("userid")]);
}

#[test]
fn test_greedy_patterns() {
    struct Case {
        name: &'static str,
        pattern: &'static str,
        path: &'static str,
        expected: Option<&'static [(&'static str, &'static str)]>,
    }

    let cases = [
        Case {
            name: "simple 1",
            pattern: "/simple",
            path: "/s1mp1e/test",
            expected: None,
        },
        Case {
            name: "simple 2",
            pattern: "/simple",
            path: "/simple/test",
            expected: Some(&[]),
        },
        Case {
            name: "params 1",
            pattern: "/one/:middle/three",
            path: "/one/two/three",
            expected: Some(&[("middle", "two")]),
        },
        Case {
            name: "params 2",
            pattern: "/one/:middle/four",
            path: "/one/two/three/four",
            expected: Some(&[("middle", "two/three")]),
        },
        Case {
            name: "params 3",
            pattern: "/head/:param1/middle/:param2",
            path: "/head/one/two/middle/three/four",
            expected: Some(&[("param1", "one/two"), ("param2", "three/four")]),
        },
        Case {
            name: "params 4",
            pattern: "/head/:param1/middle/:param2.html",
            path: "/head/one/two/middle/three/four.html",
            expected: Some(&[("param1", "one/two"), ("param2", "three/four")]),
        },
        Case {
            name: "params 5",
            pattern: "/head/:param1/middle/prefix:param2.html",
            path: "/head/one/two/middle/prefixthree/four.html",
            expected: Some(&[("param1", "one/two"), ("param2", "three/four")]),
        },
        Case {
            name: "params 6",
            pattern: "/head/:param1/middle/:param2/tail",
            path: "/head/one/two/middle/three/four/tail",
            expected: Some(&[("param1", "one/two"), ("param2", "three/four")]),
        },
    ];

    for case in &cases {
        let got = run(case.pattern, case.path);
        let want = case.expected.map(captures);
        assert_eq!(got, want, "case {:?}", case.name);
    }
}

#[test]
fn test_literal_must_be_at_cursor() {
    assert!(run("api/users", "v1/api/users").is_none());
    assert!(run("api/users", "api/user").is_none());
}

#[test]
fn test_trailing_input_after_literal_is_accepted() {
    assert_eq!(run("static", "static/css/site.css"), Some(captures(&[])));
}

#[test]
fn test_trailing_param_captures_rest_including_empty() {
    assert_eq!(
        run("head/:p", "/head/a/b/c.txt"),
        Some(captures(&[("p", "a/b/c.txt")]))
    );
    assert_eq!(run("report:fmt", "/report"), Some(captures(&[("fmt", "")])));
}

#[test]
fn test_bounded_param_captures_empty_when_literal_is_at_cursor() {
    assert_eq!(run("a/:x/b", "/a//b"), Some(captures(&[("x", "")])));
    assert_eq!(
        run("v:maj-:min", "v-1"),
        Some(captures(&[("maj", ""), ("min", "1")]))
    );
}

#[test]
fn test_trailing_separator_is_trimmed_before_matching() {
    // "/head/" normalizes to "head", which lacks the "head/" literal
    assert!(run("head/:p", "/head/").is_none());
}

#[test]
fn test_param_capture_is_not_segment_bounded() {
    assert_eq!(
        run("img/:name.png", "img/a.b/c.png"),
        Some(captures(&[("name", "a.b/c")]))
    );
    // "/three" is found as the prefix of "/threeish", mid-segment
    assert_eq!(
        run("one/:mid/three", "one/two/threeish/three"),
        Some(captures(&[("mid", "two")]))
    );
}

#[test]
fn test_first_occurrence_wins_without_backtracking() {
    assert_eq!(
        run("file/:name.png", "file/a.png.png"),
        Some(captures(&[("name", "a")]))
    );
    assert_eq!(
        run("one/:mid/x", "one/a/x/b/x"),
        Some(captures(&[("mid", "a")]))
    );
}

#[test]
fn test_missing_bounding_literal_fails() {
    assert!(run("one/:middle/three", "/one/two/four").is_none());
}

#[test]
fn test_empty_pattern_matches_only_root() {
    assert_eq!(run("/", "/"), Some(captures(&[])));
    assert_eq!(run("", ""), Some(captures(&[])));
    assert!(run("/", "/anything").is_none());
}

#[test]
fn test_case_insensitive_matching() {
    let want = Some(captures(&[("p", "x")]));
    assert_eq!(run("/Head/:p", "/head/X"), want);
    assert_eq!(run("/Head/:p", "/HEAD/x"), want);
}

#[test]
fn test_repeated_param_name_keeps_both_captures() {
    let compiled = compile("/:id/x/:id");
    let params = match_path(&compiled, "1/x/2").unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[1].1, "2");
}
