use super::*;
use cssm_stylesheet::{StylesheetSyntax, parse_stylesheet};

fn index(text: &str, syntax: StylesheetSyntax) -> ClassnameIndex {
    let sheet = parse_stylesheet(text, syntax).expect("stylesheet parses");
    index_stylesheet(&sheet, |name: &str| name.to_string())
}

fn css(text: &str) -> ClassnameIndex {
    index(text, StylesheetSyntax::Css)
}

#[test]
fn test_first_definition_wins() {
    let idx = css(".a{color:red} .a{color:blue}");
    let entry = idx.get(".a").unwrap();
    assert_eq!(entry.declarations, vec!["color: red;"]);
    assert_eq!(entry.position, SourcePosition::new(1, 1));
    assert_eq!(idx.len(), 1);
}

#[test]
fn test_comment_goes_to_first_class_only() {
    let idx = css("/* c */\n.a, .b { color: red; }");
    assert_eq!(idx.get(".a").unwrap().comments, vec!["c"]);
    assert!(idx.get(".b").unwrap().comments.is_empty());
    assert_eq!(idx.get(".b").unwrap().declarations, vec!["color: red;"]);
}

#[test]
fn test_comment_buffer_survives_rules_without_classes() {
    let idx = css("/* kept */\ndiv { margin: 0; }\n.a { color: red; }");
    assert_eq!(idx.get(".a").unwrap().comments, vec!["kept"]);
}

#[test]
fn test_comment_run_is_attached_in_order() {
    let idx = css("/* one */\n/* two */\n.a {}");
    assert_eq!(idx.get(".a").unwrap().comments, vec!["one", "two"]);
}

#[test]
fn test_nested_rule_substitutes_parent() {
    let idx = index(
        ".parent {\n  color: blue;\n  & .child { color: red; }\n}",
        StylesheetSyntax::Scss,
    );
    let child = idx.get(".child").unwrap();
    assert_eq!(child.declarations, vec!["color: red;"]);
    // Nested rules report the rule start.
    assert_eq!(child.position, SourcePosition::new(3, 3));
    assert_eq!(idx.get(".parent").unwrap().declarations, vec!["color: blue;"]);
}

#[test]
fn test_nested_suffix_creates_new_class() {
    let idx = index(
        ".block {\n  &__elem {\n    &--mod { top: 0; }\n  }\n}",
        StylesheetSyntax::Scss,
    );
    let keys: Vec<_> = idx.keys().collect();
    assert_eq!(keys, vec![".block", ".block__elem", ".block__elem--mod"]);
    assert_eq!(
        idx.get(".block__elem--mod").unwrap().position,
        SourcePosition::new(3, 5)
    );
}

#[test]
fn test_nesting_through_non_rule_ancestor() {
    let idx = index(
        ".a {\n  @media print {\n    &-print { color: black; }\n  }\n}",
        StylesheetSyntax::Scss,
    );
    // `@media` under a rule is reached through the rule's children, then its
    // own children are handled through the nearest ancestor rule.
    assert!(idx.contains(".a"));
    assert!(idx.contains(".a-print"));
}

#[test]
fn test_media_scoping() {
    let idx = css("/* lost */\n@media (min-width: 1px) {\n  .m { color: red; }\n}\n.after {}");
    let m = idx.get(".m").unwrap();
    assert!(m.comments.is_empty());
    assert_eq!(m.declarations, vec!["color: red;"]);
    assert!(idx.contains(".after"));
}

#[test]
fn test_media_children_come_before_later_siblings() {
    let idx = css("@media print { .x { color: red; } }\n.x { color: blue; }");
    assert_eq!(idx.get(".x").unwrap().declarations, vec!["color: red;"]);
}

#[test]
fn test_other_at_rules_are_skipped() {
    let idx = css("@supports (display: grid) { .grid { display: grid; } }\n.b {}");
    assert!(!idx.contains(".grid"));
    assert!(idx.contains(".b"));
}

#[test]
fn test_top_level_positions_point_at_token() {
    let idx = css("\n  div .foo,\n.bar { }");
    assert_eq!(idx.get(".foo").unwrap().position, SourcePosition::new(2, 7));
    assert_eq!(idx.get(".bar").unwrap().position, SourcePosition::new(3, 1));
}

#[test]
fn test_position_ignores_longer_class_sharing_a_prefix() {
    let idx = css(".btn-primary, .btn { color: red; }");
    assert_eq!(idx.get(".btn-primary").unwrap().position, SourcePosition::new(1, 1));
    assert_eq!(idx.get(".btn").unwrap().position, SourcePosition::new(1, 15));
}

#[test]
fn test_sass_selector_list_positions_follow_source_lines() {
    let idx = index(".a,\n  .b\n  color: red\n", StylesheetSyntax::Sass);
    assert_eq!(idx.get(".a").unwrap().position, SourcePosition::new(1, 1));
    assert_eq!(idx.get(".b").unwrap().position, SourcePosition::new(2, 3));
    assert_eq!(idx.get(".b").unwrap().declarations, vec!["color: red;"]);
}

#[test]
fn test_transformer_applies_to_keys_and_first_wins_uses_transformed_key() {
    let sheet = parse_stylesheet(".foo-bar { a: 1; }\n.fooBar { a: 2; }", StylesheetSyntax::Css)
        .unwrap();
    let idx = index_stylesheet(&sheet, crate::transform::camel_case);
    assert_eq!(idx.len(), 1);
    assert_eq!(idx.get(".fooBar").unwrap().declarations, vec!["a: 1;"]);
}

#[test]
fn test_indexing_is_idempotent() {
    let text = "/* c */\n.a, .b { color: red; }\n.a { & .c { top: 0; } }";
    let sheet = parse_stylesheet(text, StylesheetSyntax::Scss).unwrap();
    let first = index_stylesheet(&sheet, |name: &str| name.to_string());
    let second = index_stylesheet(&sheet, |name: &str| name.to_string());
    assert_eq!(first, second);
}

#[test]
fn test_less_and_sass_dialects() {
    let less = index(
        "// note\n.btn { .mixin(); color: red; &-primary { color: blue; } }",
        StylesheetSyntax::Less,
    );
    assert_eq!(less.get(".btn").unwrap().comments, vec!["note"]);
    assert_eq!(less.get(".btn").unwrap().declarations, vec!["color: red;"]);
    assert!(less.contains(".btn-primary"));

    let sass = index(
        ".card\n  padding: 4px\n  &__title\n    font-weight: bold\n",
        StylesheetSyntax::Sass,
    );
    assert_eq!(sass.get(".card").unwrap().declarations, vec!["padding: 4px;"]);
    assert_eq!(
        sass.get(".card__title").unwrap().declarations,
        vec!["font-weight: bold;"]
    );
}

#[test]
fn test_index_serializes_as_plain_mapping() {
    let idx = css(".a { color: red; }");
    let json = serde_json::to_value(&idx).unwrap();
    assert_eq!(json[".a"]["declarations"][0], "color: red;");
    assert_eq!(json[".a"]["position"]["line"], 1);
}
