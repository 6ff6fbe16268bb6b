//! Block resolution across inheritance chains

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use view_inherit::{
    InheritError, Interpreter, RenderError, Renderer, TemplateData, TemplateRegistry,
};

fn renderer(templates: &[(&str, &str)]) -> Renderer<Interpreter<TemplateRegistry>> {
    let registry = templates
        .iter()
        .fold(TemplateRegistry::new(), |r, (name, source)| {
            r.with_template(*name, *source)
        });
    Renderer::new(Interpreter::new(registry))
}

fn render(templates: &[(&str, &str)], view: &str) -> Result<String, RenderError> {
    renderer(templates).render_to_string(view, &TemplateData::new())
}

fn inherit_error(result: Result<String, RenderError>) -> InheritError {
    match result {
        Err(RenderError::Inherit(err)) => err,
        other => panic!("Expected inheritance error, got {other:?}"),
    }
}

#[test]
fn test_page_title_fills_layout() {
    let out = render(
        &[
            (
                "page",
                r#"{% extends "layout" %}{% block title %}Home{% endblock %}"#,
            ),
            (
                "layout",
                "<h1>{% block title %}Default{% endblock %}</h1>Body",
            ),
        ],
        "page",
    )
    .unwrap();
    assert_snapshot!(out, @"<h1>Home</h1>Body");
}

#[test]
fn test_leaf_only_block_appears_once() {
    let out = render(
        &[
            (
                "page",
                r#"{% extends "layout" %}{% block extra %}EXTRA{% endblock %}"#,
            ),
            ("layout", "[{% block title %}T{% endblock %}]"),
        ],
        "page",
    )
    .unwrap();
    assert_eq!(out.matches("EXTRA").count(), 1);
    assert_snapshot!(out, @"EXTRA[T]");
}

#[test]
fn test_leaf_wins_over_every_level() {
    let out = render(
        &[
            ("page", r#"{% extends "mid" %}{% block body %}leaf{% endblock %}"#),
            ("mid", r#"{% extends "base" %}{% block body %}mid{% endblock %}"#),
            ("base", "<{% block body %}base{% endblock %}>"),
        ],
        "page",
    )
    .unwrap();
    assert_snapshot!(out, @"<leaf>");
}

#[test]
fn test_intermediate_override_when_leaf_is_silent() {
    let out = render(
        &[
            ("page", r#"{% extends "mid" %}{% block other %}o{% endblock %}"#),
            ("mid", r#"{% extends "base" %}{% block body %}mid{% endblock %}"#),
            (
                "base",
                "<{% block body %}base{% endblock %}|{% block other %}{% endblock %}>",
            ),
        ],
        "page",
    )
    .unwrap();
    assert_snapshot!(out, @"<mid|o>");
}

#[test]
fn test_leaf_block_skipping_middle_view_surfaces_once() {
    let out = render(
        &[
            ("page", r#"{% extends "mid" %}{% block title %}leaf{% endblock %}"#),
            ("mid", r#"{% extends "base" %}"#),
            ("base", "<{% block title %}base{% endblock %}>"),
        ],
        "page",
    )
    .unwrap();
    assert_eq!(out, "<leaf>");
}

#[test]
fn test_single_view_chain() {
    let out = render(
        &[("page", "a{% block x %}b{% block y %}c{% endblock %}{% endblock %}d")],
        "page",
    )
    .unwrap();
    assert_eq!(out, "abcd");
}

#[test]
fn test_nested_override_inside_default_outer() {
    let out = render(
        &[
            ("page", r#"{% extends "layout" %}{% block inner %}I{% endblock %}"#),
            (
                "layout",
                "{% block outer %}[{% block inner %}i{% endblock %}]{% endblock %}",
            ),
        ],
        "page",
    )
    .unwrap();
    assert_snapshot!(out, @"[I]");
}

#[test]
fn test_outer_override_replaces_nested_default() {
    let out = render(
        &[
            (
                "page",
                r#"{% extends "layout" %}{% block outer %}B{% block inner %}PI{% endblock %}{% endblock %}"#,
            ),
            (
                "layout",
                "{% block outer %}[{% block inner %}i{% endblock %}]{% endblock %}",
            ),
        ],
        "page",
    )
    .unwrap();
    assert_snapshot!(out, @"BPI");
}

#[test]
fn test_outer_override_without_nested_block_drops_it() {
    let out = render(
        &[
            ("page", r#"{% extends "layout" %}{% block outer %}plain{% endblock %}"#),
            (
                "layout",
                "{% block outer %}[{% block inner %}i{% endblock %}]{% endblock %}",
            ),
        ],
        "page",
    )
    .unwrap();
    assert_eq!(out, "plain");
}

#[test]
fn test_page_text_outside_blocks_is_ignored() {
    let out = render(
        &[
            (
                "page",
                r#"before{% extends "layout" %}between{% block a %}A{% endblock %}after"#,
            ),
            ("layout", "<{% block a %}{% endblock %}>"),
        ],
        "page",
    )
    .unwrap();
    assert_eq!(out, "<A>");
}

#[test]
fn test_rendering_twice_is_identical() {
    let r = renderer(&[
        ("page", r#"{% extends "layout" %}{% block title %}{{ title }}{% endblock %}"#),
        ("layout", "<h1>{% block title %}{% endblock %}</h1>"),
    ]);
    let data = TemplateData::new().with("title", "Home");

    let first = r.render_to_string("page", &data).unwrap();
    let second = r.render_to_string("page", &data).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "<h1>Home</h1>");
}

#[test]
fn test_duplicate_block_in_other_branch() {
    let r = renderer(&[(
        "page",
        "{% block a %}{% block x %}{% endblock %}{% endblock %}{% block b %}{% block x %}{% endblock %}{% endblock %}",
    )]);

    let mut out: Vec<u8> = Vec::new();
    let err = r
        .render_to("page", &TemplateData::new(), &mut out)
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::Inherit(InheritError::DuplicateBlock { ref name, .. }) if name == "x"
    ));
    assert!(out.is_empty());
}

#[test]
fn test_duplicate_block_in_base_view() {
    let err = inherit_error(render(
        &[
            ("page", r#"{% extends "layout" %}"#),
            ("layout", "{% block a %}{% endblock %}{% block a %}{% endblock %}"),
        ],
        "page",
    ));
    assert_eq!(
        err,
        InheritError::DuplicateBlock {
            view: "layout".into(),
            name: "a".into(),
        }
    );
}

#[test]
fn test_second_extends_is_structure_error() {
    let err = inherit_error(render(
        &[
            ("page", r#"{% extends "a" %}{% extends "b" %}"#),
            ("a", ""),
            ("b", ""),
        ],
        "page",
    ));
    assert!(matches!(err, InheritError::Structure { .. }));
}

#[test]
fn test_self_extension_is_rejected() {
    let err = inherit_error(render(&[("page", r#"{% extends "page" %}"#)], "page"));
    assert_eq!(
        err,
        InheritError::CircularExtend {
            chain: vec!["page".into(), "page".into()],
        }
    );
}

#[test]
fn test_extension_cycle_is_rejected() {
    let err = inherit_error(render(
        &[
            ("a", r#"{% extends "b" %}"#),
            ("b", r#"{% extends "a" %}"#),
        ],
        "a",
    ));
    assert!(matches!(err, InheritError::CircularExtend { .. }));
}

#[test]
fn test_unclosed_block() {
    let err = inherit_error(render(&[("page", "{% block a %}text")], "page"));
    assert_eq!(err, InheritError::unclosed("page", "a"));
}

#[test]
fn test_stray_endblock() {
    let err = inherit_error(render(&[("page", "text{% endblock %}")], "page"));
    assert_eq!(err, InheritError::stray_end("page"));
}

#[test]
fn test_endblock_name_mismatch() {
    let err = inherit_error(render(
        &[("page", "{% block a %}{% block b %}{% endblock a %}{% endblock %}")],
        "page",
    ));
    assert_eq!(
        err,
        InheritError::BlockMismatch {
            view: "page".into(),
            expected: "b".into(),
            found: "a".into(),
        }
    );
}

#[test]
fn test_independent_renders_share_one_renderer() {
    let r = renderer(&[
        ("home", r#"{% extends "layout" %}{% block title %}Home{% endblock %}"#),
        ("about", r#"{% extends "layout" %}{% block title %}About{% endblock %}"#),
        ("layout", "<h1>{% block title %}{% endblock %}</h1>"),
    ]);

    std::thread::scope(|s| {
        let home = s.spawn(|| r.render_to_string("home", &TemplateData::new()));
        let about = s.spawn(|| r.render_to_string("about", &TemplateData::new()));
        assert_eq!(home.join().unwrap().unwrap(), "<h1>Home</h1>");
        assert_eq!(about.join().unwrap().unwrap(), "<h1>About</h1>");
    });
}
