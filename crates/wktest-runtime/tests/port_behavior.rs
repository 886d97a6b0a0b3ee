//! Behavior tests for the Qt port against a mocked command executor.
//!
//! These cover the contract the orchestrator relies on: the baseline
//! fallback ladder, expectations layering, the probed-once toolkit
//! version, the driver server environment, and command assembly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mockall::mock;
use wktest_core::domain::PortOptions;
use wktest_core::environ::HostEnv;
use wktest_core::ports::{ExecError, Executive, PlatformPort};
use wktest_runtime::QtPort;

mock! {
    pub Exec {}

    impl Executive for Exec {
        fn run_command(&self, argv: &[String]) -> Result<String, ExecError>;
    }
}

fn probe_failure() -> ExecError {
    ExecError::SpawnFailed {
        command: "qmake -v".to_string(),
        reason: "No such file or directory".to_string(),
    }
}

fn port(
    executive: MockExec,
    options: PortOptions,
    host_env: HostEnv,
    requested_name: Option<&str>,
) -> QtPort {
    QtPort::with_source_root(
        host_env,
        options,
        Arc::new(executive),
        PathBuf::from("/checkout"),
        requested_name,
    )
}

fn ladder_names(port: &QtPort) -> Vec<String> {
    port.baseline_search_path()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn failed_version_probe_falls_back_to_default() {
    let mut executive = MockExec::new();
    executive
        .expect_run_command()
        .returning(|_| Err(probe_failure()));

    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    assert_eq!(port.tool_version(), "5.0");
}

#[test]
fn version_is_probed_at_most_once() {
    let mut executive = MockExec::new();
    executive
        .expect_run_command()
        .times(1)
        .returning(|_| Ok("QMake version 3.1\nUsing Qt version 4.8 in /usr/lib\n".to_string()));

    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    assert_eq!(port.tool_version(), "4.8");
    assert_eq!(port.tool_version(), "4.8");
    // The ladder consumes the cached value too.
    assert!(ladder_names(&port).contains(&"qt-4.8".to_string()));
}

#[test]
fn legacy_mode_ladder_is_most_specific_first() {
    let mut executive = MockExec::new();
    executive
        .expect_run_command()
        .returning(|_| Err(probe_failure()));

    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    assert_eq!(ladder_names(&port), ["qt-wk1", "qt-5.0", "qt-linux", "qt"]);
    assert_eq!(
        port.baseline_search_path()[0],
        Path::new("/checkout/LayoutTests/platform/qt-wk1")
    );
}

#[test]
fn wk2_mode_on_mac_gets_an_extra_ladder_entry() {
    let mut executive = MockExec::new();
    executive
        .expect_run_command()
        .returning(|_| Err(probe_failure()));

    let port = port(
        executive,
        PortOptions::with_defaults().with_webkit_test_runner(true),
        HostEnv::empty(),
        Some("qt-mac"),
    );
    assert_eq!(
        ladder_names(&port),
        ["qt-mac-wk2", "qt-wk2", "qt-5.0", "qt-mac", "qt"]
    );
}

#[test]
fn expectations_files_reverse_the_ladder() {
    let mut executive = MockExec::new();
    executive
        .expect_run_command()
        .returning(|_| Err(probe_failure()));

    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    let files = port.expectations_files();
    let dirs: Vec<String> = files
        .iter()
        .map(|f| {
            f.parent()
                .and_then(Path::file_name)
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(dirs, ["qt", "qt-linux", "qt-5.0", "qt-wk1"]);
    assert!(
        files
            .iter()
            .all(|f| f.file_name().unwrap() == "TestExpectations")
    );
}

#[test]
fn wk2_mode_appends_the_shared_wk2_expectations() {
    let mut executive = MockExec::new();
    executive
        .expect_run_command()
        .returning(|_| Err(probe_failure()));

    let port = port(
        executive,
        PortOptions::with_defaults().with_webkit_test_runner(true),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    let files = port.expectations_files();
    // Reversed, so the extra wk2 entry lands first.
    assert_eq!(
        files[0],
        Path::new("/checkout/LayoutTests/platform/wk2/TestExpectations")
    );
    assert_eq!(files.len(), 5);
}

#[test]
fn server_environment_is_a_fresh_allow_list_copy() {
    let executive = MockExec::new();
    let host_env = HostEnv::from_pairs([
        ("PATH", "/usr/bin"),
        ("QT_WEBKIT_LOG", "stderr"),
        ("QT_DRT_WEBVIEW_MODE", "graphics"),
        ("SECRET_TOKEN", "hunter2"),
    ]);

    let port = port(
        executive,
        PortOptions::with_defaults(),
        host_env,
        Some("qt-linux"),
    );
    let env = port.setup_environ_for_server(Some("httpd"));

    assert_eq!(
        env.get("QTWEBKIT_PLUGIN_PATH").map(String::as_str),
        Some("/checkout/WebKitBuild/Debug/lib")
    );
    assert_eq!(env.get("PATH").map(String::as_str), Some("/usr/bin"));
    assert_eq!(env.get("QT_WEBKIT_LOG").map(String::as_str), Some("stderr"));
    assert_eq!(
        env.get("QT_DRT_WEBVIEW_MODE").map(String::as_str),
        Some("graphics")
    );
    assert!(!env.contains_key("SECRET_TOKEN"));
}

#[test]
fn renderer_library_path_is_set_when_the_library_exists() {
    // A jhbuild-managed checkout with a real libGL.so on disk.
    let checkout = tempfile::tempdir().expect("tempdir");
    let jhbuild_dir = checkout.path().join("Tools").join("jhbuild");
    std::fs::create_dir_all(&jhbuild_dir).unwrap();
    std::fs::write(jhbuild_dir.join("jhbuild-wrapper"), "#!/bin/sh\n").unwrap();

    let libgl_dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(libgl_dir.path().join("libGL.so"), b"").unwrap();
    let libgl_path = libgl_dir.path().to_string_lossy().into_owned();

    let mut executive = MockExec::new();
    let reported = libgl_path.clone();
    executive.expect_run_command().returning(move |argv| {
        if argv.iter().any(|a| a == "printenv") {
            Ok(format!("{reported}\n"))
        } else {
            Err(probe_failure())
        }
    });

    let port = QtPort::with_source_root(
        HostEnv::from_pairs([("LD_LIBRARY_PATH", "/ambient/lib")]),
        PortOptions::with_defaults(),
        Arc::new(executive),
        checkout.path().to_path_buf(),
        Some("qt-linux"),
    );
    let env = port.setup_environ_for_server(None);
    assert_eq!(
        env.get("LD_LIBRARY_PATH").map(String::as_str),
        Some(format!("{libgl_path}:/ambient/lib").as_str())
    );
}

#[test]
fn missing_renderer_library_leaves_the_environment_alone() {
    let checkout = tempfile::tempdir().expect("tempdir");
    let jhbuild_dir = checkout.path().join("Tools").join("jhbuild");
    std::fs::create_dir_all(&jhbuild_dir).unwrap();
    std::fs::write(jhbuild_dir.join("jhbuild-wrapper"), "#!/bin/sh\n").unwrap();

    let mut executive = MockExec::new();
    executive.expect_run_command().returning(|argv| {
        if argv.iter().any(|a| a == "printenv") {
            Ok("/nonexistent/llvmpipe\n".to_string())
        } else {
            Err(probe_failure())
        }
    });

    let port = QtPort::with_source_root(
        HostEnv::from_pairs([("LD_LIBRARY_PATH", "/ambient/lib")]),
        PortOptions::with_defaults(),
        Arc::new(executive),
        checkout.path().to_path_buf(),
        Some("qt-linux"),
    );
    let env = port.setup_environ_for_server(None);
    // Only the base allow-list copy survives.
    assert_eq!(
        env.get("LD_LIBRARY_PATH").map(String::as_str),
        Some("/ambient/lib")
    );
}

#[test]
fn missing_test_fonts_fail_the_dependency_check() {
    let executive = MockExec::new();
    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    assert!(!port.check_sys_deps());
}

#[test]
fn present_test_fonts_pass_the_dependency_check() {
    let executive = MockExec::new();
    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::from_pairs([("WEBKIT_TESTFONTS", "/fonts")]),
        Some("qt-linux"),
    );
    assert!(port.check_sys_deps());
}

#[test]
fn this_port_runs_a_single_worker() {
    let executive = MockExec::new();
    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    assert_eq!(port.default_child_processes(), 1);
}

#[test]
fn build_command_carries_the_platform_flags() {
    let executive = MockExec::new();
    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    let command = port.build_webkit_command(None);
    assert_eq!(command[1], "/checkout/Tools/Scripts/build-webkit");
    assert_eq!(command[2], "--debug");
    assert!(command.contains(&"--qt".to_string()));
    assert!(command.contains(&"--no-webkit2".to_string()));
    assert!(command.iter().any(|a| a.starts_with("--makeargs=-j")));
}

#[test]
fn wk2_build_keeps_the_second_process_model() {
    let executive = MockExec::new();
    let port = port(
        executive,
        PortOptions::with_defaults().with_webkit_test_runner(true),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    let command = port.build_webkit_command(None);
    assert!(!command.contains(&"--no-webkit2".to_string()));
}

#[test]
fn run_command_selects_the_runner_mode() {
    let executive = MockExec::new();
    let port = port(
        executive,
        PortOptions::with_defaults().with_webkit_test_runner(true),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    let command = port.run_webkit_tests_command();
    assert_eq!(command[1], "/checkout/Tools/Scripts/run-webkit-tests");
    assert!(command.contains(&"--qt".to_string()));
    assert_eq!(command.last().map(String::as_str), Some("-2"));
}

#[test]
fn crash_log_always_folds_in_captured_output() {
    let mut executive = MockExec::new();
    executive
        .expect_run_command()
        .returning(|_| Err(probe_failure()));

    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    let log = port.crash_log("DumpRenderTree", 991, "last test: foo.html", "SEGV", None);
    assert!(log.contains("DumpRenderTree"));
    assert!(log.contains("991"));
    assert!(log.contains("STDOUT:\nlast test: foo.html"));
    assert!(log.contains("STDERR:\nSEGV"));
}

#[test]
fn resolved_layout_is_deterministic() {
    let mut executive = MockExec::new();
    executive
        .expect_run_command()
        .returning(|_| Err(probe_failure()));

    let port = port(
        executive,
        PortOptions::with_defaults(),
        HostEnv::empty(),
        Some("qt-linux"),
    );
    let first = port.resolved_layout();
    let second = port.resolved_layout();
    assert_eq!(first, second);
    assert_eq!(
        first.driver_path,
        Path::new("/checkout/WebKitBuild/Debug/bin/DumpRenderTree")
    );
    assert_eq!(
        first.image_diff_path,
        Path::new("/checkout/WebKitBuild/Debug/bin/ImageDiff")
    );
}
