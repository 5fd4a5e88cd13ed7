use binder_hook::discovery::find_interface_source;
use std::fs;
use std::path::Path;

const MARKER: &str = "[GenerateBindings]";

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn cs() -> Vec<String> {
    vec!["cs".to_string()]
}

#[test]
fn test_finds_marked_declaration() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Assets/Scripts/Player.cs", "public class Player {}");
    write(
        dir.path(),
        "Assets/Scripts/Services/IPlayerService.cs",
        "using System;\n\n[GenerateBindings]\npublic interface IPlayerService\n{\n    \
         void Spawn(int id);\n}\n",
    );

    let found = find_interface_source(dir.path(), "IPlayerService", MARKER, &cs());
    assert_eq!(found, Some(dir.path().join("Assets/Scripts/Services/IPlayerService.cs")));
}

#[test]
fn test_not_found_without_marker() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Assets/IPlayerService.cs", "public interface IPlayerService {}");

    assert_eq!(find_interface_source(dir.path(), "IPlayerService", MARKER, &cs()), None);
}

#[test]
fn test_not_found_without_declaration() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Assets/IOther.cs", "[GenerateBindings]\npublic interface IOther {}");

    assert_eq!(find_interface_source(dir.path(), "IPlayerService", MARKER, &cs()), None);
}

#[test]
fn test_marker_and_declaration_in_different_files_do_not_match() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Assets/A.cs", "[GenerateBindings]\npublic interface IOther {}");
    write(dir.path(), "Assets/B.cs", "public interface IPlayerService {}");

    assert_eq!(find_interface_source(dir.path(), "IPlayerService", MARKER, &cs()), None);
}

#[test]
fn test_extension_filter_and_build_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let text = "[GenerateBindings]\npublic interface IPlayerService {}";
    write(dir.path(), "Assets/IPlayerService.txt", text);
    write(dir.path(), "Library/PackageCache/IPlayerService.cs", text);
    write(dir.path(), "obj/Debug/IPlayerService.cs", text);

    assert_eq!(find_interface_source(dir.path(), "IPlayerService", MARKER, &cs()), None);

    let exts = vec!["CS".to_string(), "txt".to_string()];
    assert_eq!(
        find_interface_source(dir.path(), "IPlayerService", MARKER, &exts),
        Some(dir.path().join("Assets/IPlayerService.txt"))
    );
}

#[test]
fn test_first_match_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let text = "[GenerateBindings]\ninternal interface IPlayerService {}";
    write(dir.path(), "b/IPlayerService.cs", text);
    write(dir.path(), "a/IPlayerService.cs", text);

    assert_eq!(
        find_interface_source(dir.path(), "IPlayerService", MARKER, &cs()),
        Some(dir.path().join("a/IPlayerService.cs"))
    );
}

#[test]
fn test_non_utf8_source_still_matches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Assets/IPlayerService.cs");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    // latin-1 encoded comment
    fs::write(
        &path,
        b"// Joueur \xe9quipe\n[GenerateBindings]\npublic interface IPlayerService {}\n",
    )
    .unwrap();

    assert_eq!(find_interface_source(dir.path(), "IPlayerService", MARKER, &cs()), Some(path));
}

#[test]
fn test_block_comment_before_declaration_matches() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "Assets/IPlayerService.cs",
        "[GenerateBindings]\n/* api */ public interface IPlayerService {}\n",
    );
    write(
        dir.path(),
        "Assets/Commented.cs",
        "[GenerateBindings]\n// public interface IPlayerService {}\n",
    );

    assert_eq!(
        find_interface_source(dir.path(), "IPlayerService", MARKER, &cs()),
        Some(dir.path().join("Assets/IPlayerService.cs"))
    );
}
