//! Integration tests for front-matter parsing.

use cvpress::content::parse;

#[test]
fn test_text_without_delimiter_is_all_body() {
    for input in [
        "",
        "plain text",
        "line one\nline two\n",
        "--- not a delimiter\nkey: value\n---\n",
        " ---\nindented delimiter\n---\n",
    ] {
        let doc = parse(input);
        assert!(doc.meta.is_empty(), "meta should be empty for {input:?}");
        assert_eq!(doc.body, input);
    }
}

#[test]
fn test_simple_metadata_round_trip() {
    let doc = parse("---\ntitle: Foo\nyear: 2024\n---\nBody text");
    assert_eq!(doc.meta.get_str("title"), Some("Foo"));
    // Numbers stay strings; the parser never coerces scalar types.
    assert_eq!(doc.meta.get_str("year"), Some("2024"));
    assert_eq!(doc.body, "Body text");
}

#[test]
fn test_array_coercion() {
    let doc = parse("---\ntech: [C++, Unreal]\n---\n");
    assert_eq!(
        doc.meta.get_list("tech"),
        Some(&["C++".to_string(), "Unreal".to_string()][..])
    );

    let doc = parse("---\ntech: [C++, Unreal\n---\n");
    assert_eq!(doc.meta.get_str("tech"), Some("[C++, Unreal"));
}

#[test]
fn test_nested_block_parsing() {
    let doc = parse(
        "---\ntitle: GhostRush\nlinks:\n  video: http://x\n  github: http://y\nyear: 2025\n---\n# Overview\n",
    );

    let links = doc.meta.get_map("links").expect("links should be a map");
    assert_eq!(links.len(), 2);
    assert_eq!(links.get("video").map(String::as_str), Some("http://x"));
    assert_eq!(links.get("github").map(String::as_str), Some("http://y"));

    // Parsing resumes normally after the nested block.
    assert_eq!(doc.meta.get_str("year"), Some("2025"));
    assert_eq!(doc.body, "# Overview\n");
}

#[test]
fn test_full_portfolio_document() {
    let raw = concat!(
        "---\n",
        "title: GhostRush — FPS Horror Prototype\n",
        "role: Gameplay Programmer\n",
        "tech: [C++, Unreal Engine 5, GAS]\n",
        "year: 2025\n",
        "links:\n",
        "  video: https://youtu.be/demo\n",
        "---\n",
        "\n",
        "# Overview\n",
        "A compact FPS horror prototype.\n",
    );
    let doc = parse(raw);

    assert_eq!(doc.meta.len(), 5);
    assert_eq!(
        doc.meta.get_str("title"),
        Some("GhostRush — FPS Horror Prototype")
    );
    assert_eq!(doc.meta.get_list("tech").map(<[String]>::len), Some(3));
    assert!(doc.body.contains("# Overview"));
}

#[test]
fn test_arbitrary_garbage_never_panics() {
    for input in [
        "---",
        "---\n",
        "---\n---",
        "---\n---\n",
        "---\n:\n:::\n---\n",
        "---\n[: ]\n  :\n---\n",
        "\u{0}\u{1}---\nbinary-ish",
        "---\nkey: [\u{7f}, b\n---\n",
    ] {
        let _ = parse(input);
    }
}

#[test]
fn test_blank_lines_inside_header_skipped() {
    let doc = parse("---\na: 1\n\nb: 2\n---\n");
    assert_eq!(doc.meta.len(), 2);
    assert_eq!(doc.meta.get_str("b"), Some("2"));
}

#[test]
fn test_whitespace_trimming() {
    let doc = parse("---\n   title   :    spaced out    \n---\n");
    assert_eq!(doc.meta.get_str("title"), Some("spaced out"));
}
