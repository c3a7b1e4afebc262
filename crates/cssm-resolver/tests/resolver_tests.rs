//! End-to-end alias resolution against temporary project trees.

use std::fs;
use std::path::{Path, PathBuf};

use cssm_resolver::{resolve_aliased_import, resolve_import};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_paths_mapping_resolves_existing_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "tsconfig.json",
        r#"{ "compilerOptions": { "baseUrl": "./", "paths": { "@bar/*": ["./bar/*"] } } }"#,
    );
    let file = write(root, "bar/file.css", ".a {}");
    let src = root.join("src/components");
    fs::create_dir_all(&src).unwrap();

    assert_eq!(resolve_aliased_import(&src, "@bar/file.css"), Some(file));
    assert_eq!(resolve_aliased_import(&src, "@missing/x.css"), None);
}

#[test]
fn test_base_url_fallback() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "jsconfig.json",
        "{ compilerOptions: { baseUrl: 'src', }, }",
    );
    let file = write(root, "src/styles/file.css", "");

    assert_eq!(
        resolve_aliased_import(root, "styles/file.css"),
        Some(file)
    );
    assert_eq!(resolve_aliased_import(root, "styles/none.css"), None);
}

#[test]
fn test_no_config_is_unresolved() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("isolated");
    fs::create_dir_all(&root).unwrap();
    write(&root, "x.css", "");
    // Nothing above a fresh temp dir is expected to hold a tsconfig.
    if cssm_resolver::find_config(&root).is_none() {
        assert_eq!(resolve_aliased_import(&root, "x.css"), None);
    }
}

#[test]
fn test_extends_supplies_missing_fields() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "configs/base.json",
        r#"{
            // shared settings
            "compilerOptions": {
                "baseUrl": "..",
                "paths": { "@ui/*": ["packages/ui/*"] },
            },
        }"#,
    );
    write(
        root,
        "app/tsconfig.json",
        r#"{ "extends": "../configs/base", "compilerOptions": { "strict": true } }"#,
    );
    let file = write(root, "packages/ui/button.module.scss", "");

    assert_eq!(
        resolve_aliased_import(&root.join("app"), "@ui/button.module.scss"),
        Some(file)
    );
}

#[test]
fn test_child_paths_resolve_against_inherited_base_url() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "tsconfig.base.json", r#"{ "compilerOptions": { "baseUrl": "./src" } }"#);
    write(
        root,
        "web/tsconfig.json",
        r#"{ "extends": "../tsconfig.base.json", "compilerOptions": { "paths": { "~/*": ["./*"] } } }"#,
    );
    let file = write(root, "src/theme.css", "");

    assert_eq!(resolve_aliased_import(&root.join("web"), "~/theme.css"), Some(file));
}

#[test]
fn test_extends_cycle_terminates_unresolved() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "tsconfig.json", r#"{ "extends": "./tsconfig.other.json" }"#);
    write(root, "tsconfig.other.json", r#"{ "extends": "./tsconfig.json" }"#);
    write(root, "a.css", "");

    assert_eq!(resolve_aliased_import(root, "a.css"), None);
}

#[test]
fn test_missing_extends_target_is_unresolved() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "tsconfig.json", r#"{ "extends": "./nope.json" }"#);
    write(root, "a.css", "");

    assert_eq!(resolve_aliased_import(root, "a.css"), None);
}

#[test]
fn test_unparsable_config_is_unresolved() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "tsconfig.json", "{ compilerOptions: ");
    write(root, "a.css", "");

    assert_eq!(resolve_aliased_import(root, "a.css"), None);
}

#[test]
fn test_malformed_paths_fall_through_to_parent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "base.json",
        r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@s/*": ["./styles/*"] } } }"#,
    );
    write(
        root,
        "pkg/tsconfig.json",
        r#"{ "extends": "../base.json", "compilerOptions": { "paths": { "@s/*": "./wrong/*" } } }"#,
    );
    let file = write(root, "styles/a.less", "");

    assert_eq!(resolve_aliased_import(&root.join("pkg"), "@s/a.less"), Some(file));
}

#[test]
fn test_resolve_import_composes_extraction_and_aliases() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "tsconfig.json",
        r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["src/*"] } } }"#,
    );
    let file = write(root, "src/card.module.sass", "");
    let text = "import React from 'react';\nimport css from '@/card.module.sass';\n";

    assert_eq!(resolve_import(text, "css", &root.join("src/ui")), Some(file));
    assert_eq!(resolve_import(text, "React", &root.join("src/ui")), None);
}
