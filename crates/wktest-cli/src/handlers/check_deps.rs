//! Check system dependencies handler.
//!
//! Checks for everything a layout-test run needs on this port and
//! displays the results in a formatted, user-friendly way.

use anyhow::Result;

use wktest_core::ports::{Executive, PlatformPort};
use wktest_runtime::{QtPort, SystemExecutive, TESTFONTS_ENV};

// ANSI color codes for better UX
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

struct Dependency {
    name: &'static str,
    status: Option<String>,
    required: bool,
    note: &'static str,
}

/// Probe `qmake` directly (not through the port's cached version, which
/// deliberately falls back to a default when the tool is absent).
fn check_qmake(executive: &dyn Executive) -> Option<String> {
    let output = executive
        .run_command(&["qmake".to_string(), "-v".to_string()])
        .ok()?;
    output
        .lines()
        .find(|line| line.contains("Qt version"))
        .map(|line| line.trim().to_string())
}

fn gather(port: &QtPort) -> Vec<Dependency> {
    let executive = SystemExecutive::new();
    vec![
        Dependency {
            name: "qmake",
            status: check_qmake(&executive),
            required: true,
            note: "Qt toolchain used to locate the toolkit version",
        },
        Dependency {
            name: TESTFONTS_ENV,
            status: port.host_env().get(TESTFONTS_ENV).map(ToString::to_string),
            required: true,
            note: "font checkout the reference renderings depend on",
        },
        Dependency {
            name: "test driver",
            status: port
                .path_to_driver()
                .exists()
                .then(|| port.path_to_driver().display().to_string()),
            required: true,
            note: "built by the main build step (wktest build)",
        },
        Dependency {
            name: "jhbuild wrapper",
            status: port
                .jhbuild_wrapper()
                .map(|wrapper| wrapper.command()[0].clone()),
            required: false,
            note: "only present on jhbuild-managed checkouts",
        },
    ]
}

fn print_dependency(dep: &Dependency) {
    match &dep.status {
        Some(detail) => println!(
            "{:<20} {}{:<10}{} {}",
            dep.name, GREEN, "found", RESET, detail
        ),
        None if dep.required => println!(
            "{:<20} {}{:<10}{} {}",
            dep.name, RED, "missing", RESET, dep.note
        ),
        None => println!("{:<20} {:<10} {}", dep.name, "absent", dep.note),
    }
}

/// Execute the check-deps command.
///
/// Returns an error (non-zero exit) when any required dependency is
/// missing, after printing remediation hints.
pub fn execute(port: &QtPort) -> Result<()> {
    println!("{BOLD}{BLUE}Checking layout-test dependencies...{RESET}\n");

    let dependencies = gather(port);
    println!("{BOLD}{:<20} {:<10} NOTES{RESET}", "DEPENDENCY", "STATUS");
    println!("{}", "=".repeat(72));
    for dep in &dependencies {
        print_dependency(dep);
    }
    println!("{}", "=".repeat(72));

    // The port's own check logs the canonical remediation lines.
    let port_ok = port.check_sys_deps();
    let missing: Vec<&Dependency> = dependencies
        .iter()
        .filter(|d| d.required && d.status.is_none())
        .collect();

    if missing.is_empty() && port_ok {
        println!("{GREEN}All required dependencies are present.{RESET}");
        Ok(())
    } else {
        println!(
            "{RED}{} required dependencies are missing.{RESET}",
            missing.len()
        );
        if port.host_env().get(TESTFONTS_ENV).is_none() {
            println!(
                "Set {TESTFONTS_ENV} to a checkout of \
                 https://github.com/carewolf/qtwebkit-testfonts.git before running the tests."
            );
        }
        anyhow::bail!("Missing required dependencies")
    }
}
