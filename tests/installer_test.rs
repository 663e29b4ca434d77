// tests/installer_test.rs
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use release_scripts::config::{DatabaseConfig, InstallConfig};
use release_scripts::hosting::{Asset, MockReleaseSource, Release, VersionSelector};
use release_scripts::installer::{EnvVars, InstallOptions, InstallOutcome, Installer};
use release_scripts::ui::{Confirm, Question};
use release_scripts::{ReleaseError, Result};
use tempfile::TempDir;

/// Answers questions from a fixed script and records what was asked
struct ScriptedConfirm {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    fn new(answers: &[bool]) -> Self {
        ScriptedConfirm {
            answers: RefCell::new(answers.iter().copied().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, question: &Question) -> Result<bool> {
        self.asked.borrow_mut().push(question.text.clone());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ReleaseError::config(format!("unexpected question: {}", question.text)))
    }
}

fn tarball(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

fn release_tarball() -> Vec<u8> {
    tarball(&[
        ("passport-api_v1.8.5/bin/server", &b"binary"[..]),
        ("passport-api_v1.8.5/init/.keep", &b""[..]),
    ])
}

fn release(id: u64, tag: &str, asset_id: u64) -> Release {
    Release {
        id,
        tag_name: tag.to_string(),
        name: None,
        assets: vec![Asset {
            id: asset_id,
            name: format!("passport-api_{}.tar.gz", tag),
            url: format!("https://api.example.com/assets/{}", asset_id),
            size: None,
        }],
    }
}

struct Fixture {
    _dir: TempDir,
    install: InstallConfig,
    database: DatabaseConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let install = InstallConfig {
            work_dir: dir.path().join("work"),
            base_dir: dir.path().join("base"),
            ..InstallConfig::default()
        };

        let env_file = install.env_file();
        fs::create_dir_all(env_file.parent().unwrap()).unwrap();
        fs::write(&env_file, "PASSPORT_DATABASE_NAME=passport\n").unwrap();

        Fixture {
            _dir: dir,
            install,
            database: DatabaseConfig::default(),
        }
    }

    fn work_dir(&self) -> &Path {
        &self.install.work_dir
    }
}

fn source() -> MockReleaseSource {
    let mut source = MockReleaseSource::new();
    source.add_release(release(20, "v1.8.5", 200));
    source.add_release(release(10, "v1.8.4", 100));
    source.set_content(200, release_tarball());
    source.set_content(100, b"old release".to_vec());
    source
}

const SKIP_DUMP: InstallOptions = InstallOptions {
    skip_dump: true,
    show_progress: false,
};

#[test]
fn test_install_latest_without_dump() {
    let fixture = Fixture::new();
    let env = EnvVars::default();
    let confirm = ScriptedConfirm::new(&[true]);
    let source = source();

    let installer = Installer::new(
        &fixture.install,
        &fixture.database,
        &env,
        &source,
        &confirm,
        SKIP_DUMP,
    );
    let outcome = installer.run(&VersionSelector::Latest).unwrap();

    let report = match outcome {
        InstallOutcome::Installed(report) => report,
        other => panic!("expected install, got {:?}", other),
    };
    let release_dir = fixture.work_dir().join("passport-api_v1.8.5");
    assert_eq!(report.archive, fixture.work_dir().join("passport-api_v1.8.5.tar.gz"));
    assert_eq!(report.release_dir, release_dir);
    assert_eq!(report.env_file, release_dir.join("init/passport-api.env"));
    assert_eq!(report.dump_file, None);

    assert_eq!(fs::read(release_dir.join("bin/server")).unwrap(), b"binary");
    assert_eq!(
        fs::read_to_string(&report.env_file).unwrap(),
        "PASSPORT_DATABASE_NAME=passport\n"
    );
    assert_eq!(source.downloads(), vec![200]);
    assert_eq!(confirm.asked().len(), 1);
    assert!(confirm.asked()[0].ends_with("passport-api_v1.8.5.tar.gz or exit?"));
}

#[test]
fn test_exit_after_download() {
    let fixture = Fixture::new();
    let env = EnvVars::default();
    let confirm = ScriptedConfirm::new(&[false]);
    let source = source();

    let outcome = Installer::new(
        &fixture.install,
        &fixture.database,
        &env,
        &source,
        &confirm,
        SKIP_DUMP,
    )
    .run(&VersionSelector::Latest)
    .unwrap();

    let archive = fixture.work_dir().join("passport-api_v1.8.5.tar.gz");
    assert_eq!(outcome, InstallOutcome::Stopped { archive: archive.clone() });
    assert!(archive.is_file());
    assert!(!fixture.work_dir().join("passport-api_v1.8.5").exists());
}

#[test]
fn test_install_specific_tag() {
    let fixture = Fixture::new();
    let env = EnvVars::default();
    let confirm = ScriptedConfirm::new(&[false]);
    let source = source();

    let outcome = Installer::new(
        &fixture.install,
        &fixture.database,
        &env,
        &source,
        &confirm,
        SKIP_DUMP,
    )
    .run(&VersionSelector::Tag("v1.8.4".to_string()))
    .unwrap();

    let archive = fixture.work_dir().join("passport-api_v1.8.4.tar.gz");
    assert_eq!(outcome, InstallOutcome::Stopped { archive: archive.clone() });
    assert_eq!(fs::read(archive).unwrap(), b"old release");
    assert_eq!(source.downloads(), vec![100]);
}

#[test]
fn test_unknown_tag_downloads_nothing() {
    let fixture = Fixture::new();
    let env = EnvVars::default();
    let confirm = ScriptedConfirm::new(&[]);
    let source = source();

    let err = Installer::new(
        &fixture.install,
        &fixture.database,
        &env,
        &source,
        &confirm,
        SKIP_DUMP,
    )
    .run(&VersionSelector::Tag("v9.9.9".to_string()))
    .unwrap_err();

    assert!(matches!(err, ReleaseError::Api(_)));
    assert!(source.downloads().is_empty());
}

#[test]
fn test_announced_file_name_wins() {
    let fixture = Fixture::new();
    let env = EnvVars::default();
    let confirm = ScriptedConfirm::new(&[false]);
    let mut source = source();
    source.set_file_name(200, "../../passport-api_build.tar.gz");

    let outcome = Installer::new(
        &fixture.install,
        &fixture.database,
        &env,
        &source,
        &confirm,
        SKIP_DUMP,
    )
    .run(&VersionSelector::Latest)
    .unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Stopped {
            archive: fixture.work_dir().join("passport-api_build.tar.gz")
        }
    );
}

#[test]
fn test_keeps_existing_download_when_declined() {
    let fixture = Fixture::new();
    let env = EnvVars::default();
    // overwrite? no; extract? yes
    let confirm = ScriptedConfirm::new(&[false, true]);
    let mut source = source();
    source.set_content(200, b"not a tarball".to_vec());

    let archive = fixture.work_dir().join("passport-api_v1.8.5.tar.gz");
    fs::write(&archive, release_tarball()).unwrap();

    let outcome = Installer::new(
        &fixture.install,
        &fixture.database,
        &env,
        &source,
        &confirm,
        SKIP_DUMP,
    )
    .run(&VersionSelector::Latest)
    .unwrap();

    assert!(matches!(outcome, InstallOutcome::Installed(_)));
    assert_eq!(fs::read(&archive).unwrap(), release_tarball());
    assert!(confirm.asked()[0].ends_with("exists, overwrite?"));
}

#[test]
fn test_archive_without_init_dir_fails() {
    let fixture = Fixture::new();
    let env = EnvVars::default();
    let confirm = ScriptedConfirm::new(&[true]);
    let mut source = source();
    source.set_content(200, tarball(&[("passport-api_v1.8.5/bin/server", &b"binary"[..])]));

    let err = Installer::new(
        &fixture.install,
        &fixture.database,
        &env,
        &source,
        &confirm,
        SKIP_DUMP,
    )
    .run(&VersionSelector::Latest)
    .unwrap_err();

    assert!(matches!(err, ReleaseError::FileNotFound(ref p) if p.ends_with("init")));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_declined_dump_is_skipped() {
    let fixture = Fixture::new();
    let env = EnvVars::default();
    let confirm = ScriptedConfirm::new(&[true, false]);
    let source = source();
    let options = InstallOptions {
        skip_dump: false,
        show_progress: false,
    };

    let outcome = Installer::new(
        &fixture.install,
        &fixture.database,
        &env,
        &source,
        &confirm,
        options,
    )
    .run(&VersionSelector::Latest)
    .unwrap();

    match outcome {
        InstallOutcome::Installed(report) => assert_eq!(report.dump_file, None),
        other => panic!("expected install, got {:?}", other),
    }
    assert_eq!(confirm.asked()[1], "Dump database before continuing?");
}

#[test]
fn test_missing_dump_tool_fails_after_install() {
    let fixture = Fixture::new();
    let env = EnvVars::from_pairs([
        ("PASSPORT_DATABASE_NAME", "passport"),
        ("PASSPORT_DATABASE_HOST", "localhost"),
        ("PASSPORT_DATABASE_PORT", "5432"),
    ]);
    let database = DatabaseConfig {
        dump_command: "definitely-not-a-real-pg-dump".to_string(),
        ..DatabaseConfig::default()
    };
    let confirm = ScriptedConfirm::new(&[true, true]);
    let source = source();
    let options = InstallOptions {
        skip_dump: false,
        show_progress: false,
    };

    let err = Installer::new(&fixture.install, &database, &env, &source, &confirm, options)
        .run(&VersionSelector::Latest)
        .unwrap_err();

    assert!(matches!(err, ReleaseError::DumpToolMissing(_)));
    assert!(fixture
        .work_dir()
        .join("passport-api_v1.8.5/init/passport-api.env")
        .is_file());
}

#[test]
fn test_keeps_existing_directory_when_declined() {
    let fixture = Fixture::new();
    let env = EnvVars::default();
    // extract? yes; overwrite directory? no
    let confirm = ScriptedConfirm::new(&[true, false]);
    let source = source();

    let release_dir = fixture.work_dir().join("passport-api_v1.8.5");
    fs::create_dir_all(release_dir.join("init")).unwrap();
    fs::write(release_dir.join("local.txt"), "kept").unwrap();

    let outcome = Installer::new(
        &fixture.install,
        &fixture.database,
        &env,
        &source,
        &confirm,
        SKIP_DUMP,
    )
    .run(&VersionSelector::Latest)
    .unwrap();

    let report = match outcome {
        InstallOutcome::Installed(report) => report,
        other => panic!("expected install, got {:?}", other),
    };
    assert_eq!(report.release_dir, release_dir);
    assert_eq!(fs::read_to_string(release_dir.join("local.txt")).unwrap(), "kept");
    assert!(!release_dir.join("bin/server").exists());
    assert!(report.env_file.is_file());
    assert_eq!(confirm.asked()[1], "Destination exists, overwrite?");
}

#[cfg(unix)]
#[test]
fn test_install_with_database_dump() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = Fixture::new();
    let script = fixture.install.base_dir.join("fake_pg_dump.sh");
    fs::create_dir_all(&fixture.install.base_dir).unwrap();
    fs::write(&script, "#!/bin/sh\necho \"-- dump $1 $2 $3 $4\"\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let database = DatabaseConfig {
        dump_command: script.to_string_lossy().into_owned(),
        min_dump_bytes: 0,
        ..DatabaseConfig::default()
    };
    let env = EnvVars::from_pairs([
        ("PASSPORT_DATABASE_NAME", "passport"),
        ("PASSPORT_DATABASE_HOST", "localhost"),
        ("PASSPORT_DATABASE_PORT", "5432"),
    ]);
    let confirm = ScriptedConfirm::new(&[true, true]);
    let source = source();
    let options = InstallOptions {
        skip_dump: false,
        show_progress: false,
    };

    let outcome = Installer::new(&fixture.install, &database, &env, &source, &confirm, options)
        .run(&VersionSelector::Latest)
        .unwrap();

    let report = match outcome {
        InstallOutcome::Installed(report) => report,
        other => panic!("expected install, got {:?}", other),
    };
    let dump_file = report.dump_file.expect("dump file");
    assert!(dump_file.starts_with(fixture.install.dump_dir()));
    assert!(dump_file.to_string_lossy().ends_with(".sql.gz"));
    assert!(fs::metadata(&dump_file).unwrap().len() > 0);
}
