//! Tests for jsx module - element and attribute views across dialects.

use omni_ast::{Lang, Literal, ParsedSource};

#[test]
fn test_javascript_grammar_reads_jsx() {
    let src = r#"export default function Hero() {
  return <section className="hero" data-component="Hero"><h1 id="title">Hi</h1></section>;
}
"#;
    let parsed = ParsedSource::parse(src, Lang::JavaScript).unwrap();
    let elements = parsed.elements();

    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].tag().as_deref(), Some("section"));
    let component = elements[0].attribute("data-component").unwrap();
    assert_eq!(component.string_literal().unwrap().value, "Hero");
    assert_eq!(elements[1].tag().as_deref(), Some("h1"));
}

#[test]
fn test_attributes_span_whole_file() {
    let src = r#"const A = () => (
  <>
    <p className="a" />
    <p className="b" hidden />
  </>
);
"#;
    let parsed = ParsedSource::parse(src, Lang::Tsx).unwrap();
    let names: Vec<_> = parsed
        .attributes()
        .iter()
        .map(|a| a.name().to_string())
        .collect();

    assert_eq!(names, vec!["className", "className", "hidden"]);
    // Fragment has no tag name
    assert!(parsed.elements().iter().any(|e| e.tag().is_none()));
}

#[test]
fn test_number_literal_range() {
    let src = "const A = () => <div style={{ fontSize: 12 }} />;";
    let parsed = ParsedSource::parse(src, Lang::Tsx).unwrap();
    let entries = parsed.elements()[0]
        .attribute("style")
        .unwrap()
        .object_entries()
        .unwrap();

    match entries[0].value.as_ref().unwrap() {
        Literal::Number { raw, range } => {
            assert_eq!(raw, "12");
            assert_eq!(&src[range.clone()], "12");
        }
        Literal::Str(_) => panic!("expected number"),
    }
}

#[test]
fn test_plain_typescript_has_no_elements() {
    let src = "export const add = (a: number, b: number): number => a + b;\n";
    let parsed = ParsedSource::parse(src, Lang::TypeScript).unwrap();
    assert!(parsed.elements().is_empty());
    assert_eq!(parsed.source(), src);
}
