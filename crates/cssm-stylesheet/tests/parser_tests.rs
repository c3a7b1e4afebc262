//! Parser tests across the four dialects.

use cssm_common::SourcePosition;
use cssm_stylesheet::{NodeKind, ParseError, Stylesheet, StylesheetSyntax, parse_stylesheet};

fn parse(text: &str, syntax: StylesheetSyntax) -> Stylesheet {
    parse_stylesheet(text, syntax).expect("stylesheet should parse")
}

fn kinds(sheet: &Stylesheet, parent: cssm_stylesheet::NodeIndex) -> Vec<NodeKind> {
    sheet
        .children(parent)
        .iter()
        .map(|&child| sheet.get(child).unwrap().kind())
        .collect()
}

#[test]
fn test_css_rules_declarations_and_comments() {
    let sheet = parse(
        "/* header */\n.a, .b {\n  color: red;\n  margin: 0 !important\n}\n",
        StylesheetSyntax::Css,
    );
    let root = sheet.root();
    assert_eq!(kinds(&sheet, root), vec![NodeKind::Comment, NodeKind::Rule]);

    let comment = sheet.get(sheet.children(root)[0]).unwrap();
    assert_eq!(comment.as_comment().unwrap().text, "header");
    assert!(!comment.as_comment().unwrap().inline);

    let rule_idx = sheet.children(root)[1];
    let rule = sheet.get(rule_idx).unwrap();
    assert_eq!(rule.as_rule().unwrap().selector, ".a, .b");
    assert_eq!(rule.source, Some(SourcePosition::new(2, 1)));

    let decls: Vec<_> = sheet.declarations(rule_idx).collect();
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].prop, "color");
    assert_eq!(decls[0].value, "red");
    assert_eq!(decls[1].value, "0");
    assert!(decls[1].important);
}

#[test]
fn test_css_does_not_treat_double_slash_as_comment() {
    let sheet = parse(".a { background: url(//cdn/x.png); }", StylesheetSyntax::Css);
    let rule = sheet.children(sheet.root())[0];
    let decl = sheet.declarations(rule).next().unwrap();
    assert_eq!(decl.value, "url(//cdn/x.png)");
}

#[test]
fn test_at_rules_keep_name_and_params() {
    let sheet = parse(
        "@IMPORT 'x.css';\n@media screen and (min-width: 10px) { .m { top: 0; } }",
        StylesheetSyntax::Css,
    );
    let children = sheet.children(sheet.root());
    let import = sheet.get(children[0]).unwrap().as_at_rule().unwrap();
    assert_eq!(import.name, "import");
    assert_eq!(import.params, "'x.css'");
    assert!(!import.has_block);

    let media_idx = children[1];
    let media = sheet.get(media_idx).unwrap().as_at_rule().unwrap();
    assert_eq!(media.name, "media");
    assert_eq!(media.params, "screen and (min-width: 10px)");
    assert!(media.has_block);
    assert_eq!(kinds(&sheet, media_idx), vec![NodeKind::Rule]);
}

#[test]
fn test_selector_comments_are_dropped_and_strings_kept() {
    let sheet = parse(
        ".a /* note */ .b, [data-x=\"{;}\"] { }",
        StylesheetSyntax::Css,
    );
    let rule = sheet.get(sheet.children(sheet.root())[0]).unwrap();
    assert_eq!(rule.as_rule().unwrap().selector, ".a  .b, [data-x=\"{;}\"]");
}

#[test]
fn test_scss_nesting_and_line_comments() {
    let sheet = parse(
        ".parent {\n  // inline note\n  & .child { color: red; }\n  #{$sel} { top: 0; }\n}",
        StylesheetSyntax::Scss,
    );
    let parent_idx = sheet.children(sheet.root())[0];
    assert_eq!(
        kinds(&sheet, parent_idx),
        vec![NodeKind::Comment, NodeKind::Rule, NodeKind::Rule]
    );

    let children = sheet.children(parent_idx);
    let note = sheet.get(children[0]).unwrap().as_comment().unwrap();
    assert_eq!(note.text, "inline note");
    assert!(note.inline);

    let child = sheet.get(children[1]).unwrap();
    assert_eq!(child.as_rule().unwrap().selector, "& .child");
    assert_eq!(child.source, Some(SourcePosition::new(3, 3)));
    assert_eq!(child.parent, parent_idx);

    let interpolated = sheet.get(children[2]).unwrap();
    assert_eq!(interpolated.as_rule().unwrap().selector, "#{$sel}");
}

#[test]
fn test_less_mixin_calls_are_not_declarations() {
    let sheet = parse(
        ".btn { .rounded(4px); color: @brand; }",
        StylesheetSyntax::Less,
    );
    let rule = sheet.children(sheet.root())[0];
    let props: Vec<_> = sheet.declarations(rule).map(|d| d.prop.as_str()).collect();
    assert_eq!(props, vec!["color"]);
}

#[test]
fn test_last_declaration_without_semicolon() {
    let sheet = parse(".a{color:red}", StylesheetSyntax::Css);
    let rule = sheet.children(sheet.root())[0];
    assert_eq!(sheet.declarations(rule).count(), 1);
}

#[test]
fn test_sass_indented_tree() {
    let sheet = parse(
        "// top\n.nav,\n.menu\n  margin: 0\n  &__item\n    color: red\n=mixin\n  top: 0\n@media print\n  .p\n    top: 0\n",
        StylesheetSyntax::Sass,
    );
    let root = sheet.root();
    assert_eq!(
        kinds(&sheet, root),
        vec![
            NodeKind::Comment,
            NodeKind::Rule,
            NodeKind::AtRule,
            NodeKind::AtRule
        ]
    );

    let nav_idx = sheet.children(root)[1];
    let nav = sheet.get(nav_idx).unwrap();
    assert_eq!(nav.as_rule().unwrap().selector, ".nav,\n.menu");
    assert_eq!(nav.source, Some(SourcePosition::new(2, 1)));
    assert_eq!(kinds(&sheet, nav_idx), vec![NodeKind::Declaration, NodeKind::Rule]);

    let item = sheet.get(sheet.children(nav_idx)[1]).unwrap();
    assert_eq!(item.source, Some(SourcePosition::new(5, 3)));
    assert_eq!(item.as_rule().unwrap().selector, "&__item");

    let media = sheet.get(sheet.children(root)[3]).unwrap().as_at_rule().unwrap();
    assert_eq!(media.name, "media");
    assert_eq!(media.params, "print");
}

#[test]
fn test_utf16_columns() {
    let sheet = parse("/*😀*/ .a {}", StylesheetSyntax::Css);
    let rule = sheet.get(sheet.children(sheet.root())[1]).unwrap();
    // The emoji counts as two UTF-16 units.
    assert_eq!(rule.source, Some(SourcePosition::new(1, 8)));
}

#[test]
fn test_crlf_line_endings() {
    let sheet = parse(".a {\r\n  top: 0;\r\n}\r\n.b {}", StylesheetSyntax::Css);
    let b = sheet.get(sheet.children(sheet.root())[1]).unwrap();
    assert_eq!(b.source, Some(SourcePosition::new(4, 1)));
}

#[test]
fn test_parse_errors() {
    let err = |text: &str, syntax| parse_stylesheet(text, syntax).unwrap_err();

    assert_eq!(
        err("\n.a {\n  color: red;\n", StylesheetSyntax::Css),
        ParseError::UnclosedBlock {
            pos: SourcePosition::new(2, 1)
        }
    );
    assert_eq!(
        err(".a {}\n}", StylesheetSyntax::Css),
        ParseError::UnexpectedCloseBrace {
            pos: SourcePosition::new(2, 1)
        }
    );
    assert!(matches!(
        err(".a { /* open", StylesheetSyntax::Scss),
        ParseError::UnclosedComment { .. }
    ));
    assert!(matches!(
        err(".a { content: \"x\n\"; }", StylesheetSyntax::Css),
        ParseError::UnclosedString { .. }
    ));
    assert_eq!(
        err(".a\n    top: 0\n  left: 0\n", StylesheetSyntax::Sass),
        ParseError::InconsistentIndentation {
            pos: SourcePosition::new(3, 3)
        }
    );
}

#[test]
fn test_deep_nesting_is_rejected() {
    let depth = cssm_common::limits::MAX_BLOCK_DEPTH + 1;
    let text = format!("{}{}", ".a{".repeat(depth), "}".repeat(depth));
    let error = parse_stylesheet(&text, StylesheetSyntax::Scss).unwrap_err();
    assert!(matches!(error, ParseError::NestingTooDeep { .. }));
    assert_eq!(error.position().line, 1);
}

#[test]
fn test_empty_input() {
    let sheet = parse("", StylesheetSyntax::Css);
    assert!(sheet.is_empty());
    let sheet = parse("\n\n", StylesheetSyntax::Sass);
    assert!(sheet.is_empty());
}
