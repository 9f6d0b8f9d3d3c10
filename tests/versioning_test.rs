// tests/versioning_test.rs
use multimod::domain::{ModuleFilePath, ModulePath, ModuleTagName};
use multimod::{ModuleSetRelease, ModuleVersioning, MultimodError, VersionConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const VERSIONS_YAML: &str = r#"
module-sets:
  mod-set-1:
    version: v1.2.3-RC1+meta
    modules:
      - go.example.io/test/test1
  mod-set-2:
    version: v0.1.0
    modules:
      - go.example.io/test3
      - go.example.io/testroot
excluded-modules:
  - go.example.io/test/testexcluded
"#;

fn write_mod(root: &Path, dir: &str, module: &str) {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("go.mod"), format!("module {}\n\ngo 1.21\n", module)).unwrap();
}

/// Repository layout:
/// go.mod               go.example.io/testroot
/// test/go.mod          go.example.io/test3
/// test/test1/go.mod    go.example.io/test/test1
/// excluded/go.mod      go.example.io/test/testexcluded
fn sample_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_mod(root, "", "go.example.io/testroot");
    write_mod(root, "test", "go.example.io/test3");
    write_mod(root, "test/test1", "go.example.io/test/test1");
    write_mod(root, "excluded", "go.example.io/test/testexcluded");
    fs::write(root.join("versions.yaml"), VERSIONS_YAML).unwrap();
    dir
}

#[test]
fn test_build_module_path_map() {
    let repo = sample_repo();
    let root = repo.path();
    let config = VersionConfig::load(root.join("versions.yaml")).unwrap();

    let map = config.build_module_path_map(root).unwrap();

    assert_eq!(map.len(), 3);
    assert_eq!(
        map[&ModulePath::from("go.example.io/test/test1")],
        ModuleFilePath::new(root.join("test").join("test1").join("go.mod"))
    );
    assert_eq!(
        map[&ModulePath::from("go.example.io/test3")],
        ModuleFilePath::new(root.join("test").join("go.mod"))
    );
    assert_eq!(
        map[&ModulePath::from("go.example.io/testroot")],
        ModuleFilePath::new(root.join("go.mod"))
    );
    assert!(!map.contains_key("go.example.io/test/testexcluded"));
}

#[test]
fn test_build_module_path_map_keeps_untracked_modules() {
    let repo = sample_repo();
    write_mod(repo.path(), "tools", "go.example.io/tools");
    let config = VersionConfig::load(repo.path().join("versions.yaml")).unwrap();

    let map = config.build_module_path_map(repo.path()).unwrap();
    assert!(map.contains_key("go.example.io/tools"));
}

#[test]
fn test_build_module_path_map_skips_hidden_dirs() {
    let repo = sample_repo();
    write_mod(repo.path(), ".cache/vendor", "go.example.io/test3");
    let config = VersionConfig::load(repo.path().join("versions.yaml")).unwrap();

    let map = config.build_module_path_map(repo.path()).unwrap();
    assert_eq!(
        map[&ModulePath::from("go.example.io/test3")],
        ModuleFilePath::new(repo.path().join("test").join("go.mod"))
    );
}

#[test]
fn test_build_module_path_map_ambiguous_module() {
    let repo = sample_repo();
    write_mod(repo.path(), "copy", "go.example.io/test3");
    let config = VersionConfig::load(repo.path().join("versions.yaml")).unwrap();

    let err = config.build_module_path_map(repo.path()).unwrap_err();
    assert!(matches!(
        err,
        MultimodError::AmbiguousModule { ref module, .. } if module == "go.example.io/test3"
    ));
}

#[test]
fn test_build_module_path_map_missing_module() {
    let repo = sample_repo();
    fs::remove_file(repo.path().join("test").join("test1").join("go.mod")).unwrap();
    let config = VersionConfig::load(repo.path().join("versions.yaml")).unwrap();

    let err = config.build_module_path_map(repo.path()).unwrap_err();
    assert!(matches!(
        err,
        MultimodError::ModuleNotFound(ref module) if module == "go.example.io/test/test1"
    ));
}

#[test]
fn test_build_module_path_map_mod_file_without_directive() {
    let repo = sample_repo();
    let broken = repo.path().join("broken");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("go.mod"), "go 1.21\n").unwrap();
    let config = VersionConfig::load(repo.path().join("versions.yaml")).unwrap();

    assert!(matches!(
        config.build_module_path_map(repo.path()),
        Err(MultimodError::ModFile { .. })
    ));
}

#[test]
fn test_load_versioning_file_invalid_syntax() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("versions_invalid_syntax.yaml");
    fs::write(&path, "module-sets:\n  mod-set-1:\n    version: [v1\n").unwrap();

    assert!(matches!(VersionConfig::load(&path), Err(MultimodError::Parse(_))));
}

#[test]
fn test_load_versioning_file_missing() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        VersionConfig::load(dir.path().join("nope.yaml")),
        Err(MultimodError::Io(_))
    ));
}

#[test]
fn test_load_versioning_file_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("versions.toml");
    fs::write(
        &path,
        r#"
[module-sets.stable]
version = "v1.0.0"
modules = ["go.example.io/a"]
"#,
    )
    .unwrap();

    let config = VersionConfig::load(&path).unwrap();
    assert_eq!(config.module_sets["stable"].version, "v1.0.0");
    assert!(config.excluded_modules.is_empty());
}

#[test]
fn test_module_versioning_new() {
    let repo = sample_repo();
    let versioning =
        ModuleVersioning::new(repo.path().join("versions.yaml"), repo.path()).unwrap();

    assert_eq!(versioning.mod_set_map().len(), 2);
    assert_eq!(versioning.mod_info_map().len(), 3);

    let info = versioning
        .module_info(&ModulePath::from("go.example.io/testroot"))
        .unwrap();
    assert_eq!(info.module_set_name, "mod-set-2");
    assert_eq!(info.version, "v0.1.0");

    assert!(matches!(
        versioning.get_module_set("does-not-exist"),
        Err(MultimodError::ModuleSetNotFound(_))
    ));
}

#[test]
fn test_module_set_release_tags() {
    let repo = sample_repo();
    let release =
        ModuleSetRelease::new(repo.path().join("versions.yaml"), "mod-set-2", repo.path()).unwrap();

    assert_eq!(
        release.tag_names(),
        &[ModuleTagName::path("test"), ModuleTagName::RepoRoot]
    );
    assert_eq!(release.module_full_tag_names(), vec!["test/v0.1.0", "v0.1.0"]);
    assert!(!release.is_stable());

    let release =
        ModuleSetRelease::new(repo.path().join("versions.yaml"), "mod-set-1", repo.path()).unwrap();
    assert_eq!(
        release.module_full_tag_names(),
        vec!["test/test1/v1.2.3-RC1+meta"]
    );
    assert!(release.is_stable());
}

#[test]
fn test_build_module_path_map_bare_module_keyword() {
    let repo = sample_repo();
    let broken = repo.path().join("broken");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("go.mod"), "module\n\ngo 1.21\n").unwrap();
    let config = VersionConfig::load(repo.path().join("versions.yaml")).unwrap();

    let err = config.build_module_path_map(repo.path()).unwrap_err();
    assert!(matches!(
        err,
        MultimodError::ModFile { ref path, .. } if path == &broken.join("go.mod")
    ));
}

#[test]
fn test_build_module_path_map_reports_excluded_member() {
    let repo = sample_repo();
    let mut config = VersionConfig::load(repo.path().join("versions.yaml")).unwrap();
    config
        .excluded_modules
        .push(ModulePath::from("go.example.io/test3"));

    let err = config.build_module_path_map(repo.path()).unwrap_err();
    assert!(matches!(
        err,
        MultimodError::ModuleExcluded { ref module, ref mod_set }
            if module == "go.example.io/test3" && mod_set == "mod-set-2"
    ));
}

#[test]
fn test_build_module_path_map_missing_repo_root() {
    let dir = TempDir::new().unwrap();
    let config = VersionConfig::default();

    assert!(matches!(
        config.build_module_path_map(dir.path().join("does-not-exist")),
        Err(MultimodError::Walk(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_build_module_path_map_skips_unreadable_dir() {
    use std::os::unix::fs::PermissionsExt;

    let repo = sample_repo();
    write_mod(repo.path(), "locked/inner", "go.example.io/locked");
    let locked = repo.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still list the directory; nothing to check then.
    let readable = fs::read_dir(&locked).is_ok();
    let config = VersionConfig::load(repo.path().join("versions.yaml")).unwrap();
    let result = config.build_module_path_map(repo.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let map = result.unwrap();
    assert_eq!(map.len(), if readable { 4 } else { 3 });
    if !readable {
        assert!(!map.contains_key("go.example.io/locked"));
    }
}
