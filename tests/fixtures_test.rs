//! Rendering templates from the on-disk fixtures

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use view_inherit::{
    file_renderer, render_to, render_with_config, RenderConfig, RenderError, TemplateData,
    TemplateError,
};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn config() -> RenderConfig {
    RenderConfig::from_file(&fixtures().join("config.toml")).expect("Should load config")
}

fn data() -> TemplateData {
    TemplateData::from_file(&fixtures().join("data.toml")).expect("Should load data")
}

const ARTICLE: &str = "<html>
<head><title>Rust</title></head>
<body>
<main><article>Ownership explained</article></main>
<footer>default footer</footer>
</body>
</html>
";

#[test]
fn test_config_resolves_template_dir_next_to_file() {
    assert_eq!(config().template_dir, fixtures().join("views"));
}

#[test]
fn test_three_level_chain_from_files() {
    let out = render_with_config("article", &data(), &config()).unwrap();
    assert_eq!(out, ARTICLE);
}

#[test]
fn test_render_to_writer_matches_string() {
    let mut buf: Vec<u8> = Vec::new();
    render_to("article", &data(), &config(), &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), ARTICLE);
}

#[test]
fn test_chain_from_files() {
    let chain = file_renderer(&config()).chain("article", &data()).unwrap();
    assert_eq!(chain, vec!["article", "section", "base"]);
}

#[test]
fn test_intermediate_view_renders_on_its_own() {
    let out = render_with_config("section", &TemplateData::new(), &config()).unwrap();
    assert_eq!(
        out,
        "<html>
<head><title>Section</title></head>
<body>
<main>section main</main>
<footer>default footer</footer>
</body>
</html>
"
    );
}

#[test]
fn test_explicit_extension_used_as_given() {
    let out = render_with_config("notes.txt", &TemplateData::new(), &config()).unwrap();
    assert!(out.contains("<title>Notes</title>"));
    assert!(out.contains("<footer>default footer</footer>"));
}

#[test]
fn test_missing_data_is_reported() {
    let err = render_with_config("article", &TemplateData::new(), &config()).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Template(TemplateError::UndefinedVariable { ref name, .. }) if name == "article.title"
    ));
}

#[test]
fn test_syntax_error_report() {
    let err = render_with_config("broken", &TemplateData::new(), &config()).unwrap_err();
    let RenderError::Parse {
        template,
        text,
        errors,
    } = err
    else {
        panic!("Expected parse error");
    };
    assert_eq!(template, "broken");
    let report = errors[0].format(&text, &template);
    assert!(report.contains("endblok"));
}

#[test]
fn test_missing_view() {
    let err = render_with_config("nope", &TemplateData::new(), &config()).unwrap_err();
    assert!(matches!(err, RenderError::Template(TemplateError::NotFound { .. })));
}
