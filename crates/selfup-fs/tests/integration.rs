use std::fs;

use selfup_fs::{Error, ReplacementPlan, StagingDir};
use tempfile::tempdir;

#[test]
fn test_plan_from_staging_dir() {
    let install = tempdir().unwrap();
    let staging = StagingDir::new().unwrap();
    let staged = staging.path().join("linux-amd64");
    fs::create_dir_all(staged.join("share")).unwrap();
    fs::write(staged.join("myapp"), "v2").unwrap();
    fs::write(staged.join("share/theme.css"), "body {}").unwrap();

    fs::create_dir_all(install.path().join("share")).unwrap();
    fs::write(install.path().join("myapp"), "v1").unwrap();

    let report = ReplacementPlan::new()
        .replace(staged.join("myapp"), install.path().join("myapp"))
        .replace(staged.join("share/theme.css"), install.path().join("share/theme.css"))
        .execute()
        .unwrap();
    staging.close().unwrap();

    assert_eq!(report.replaced.len(), 2);
    assert_eq!(fs::read_to_string(install.path().join("myapp")).unwrap(), "v2");
    assert_eq!(
        fs::read_to_string(install.path().join("share/theme.css")).unwrap(),
        "body {}"
    );
    let names: Vec<_> = fs::read_dir(install.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names.len(), 2, "unexpected leftovers: {names:?}");
}

#[cfg(unix)]
#[test]
fn test_rollback_restores_content_and_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let new_exe = dir.path().join("new-myapp");
    let exe = dir.path().join("myapp");
    fs::write(&new_exe, "v2").unwrap();
    fs::set_permissions(&new_exe, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(&exe, "v1").unwrap();
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o700)).unwrap();
    fs::write(dir.path().join("plugins"), "file in the way").unwrap();

    let err = ReplacementPlan::new()
        .replace(&new_exe, &exe)
        .replace(&new_exe, dir.path().join("plugins/extra.so"))
        .execute()
        .unwrap_err();

    assert!(matches!(err, Error::Swap { .. }));
    assert!(!err.is_rollback_failure());
    assert_eq!(fs::read_to_string(&exe).unwrap(), "v1");
    let mode = fs::metadata(&exe).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o700);
    assert!(!dir.path().join("myapp.backup").exists());
}

#[test]
fn test_empty_plan_is_a_no_op() {
    let plan = ReplacementPlan::new();
    assert!(plan.is_empty());
    let report = plan.execute().unwrap();
    assert!(report.replaced.is_empty());
}
