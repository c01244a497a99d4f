//! The `talosup doctor` command: health checks for the talosctl setup.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use taloskit::{Connection, Error, Talosctl};

use crate::Context;
use crate::config;
use crate::ui;

struct Issue {
    category: &'static str,
    summary: String,
    detail: Option<String>,
    fix: Option<String>,
}

pub fn run(_ctx: &Context) -> Result<()> {
    ui::header("talosctl Health Check");

    let mut issues: Vec<Issue> = Vec::new();

    // Check 1: talosctl is installed and invocable
    check_talosctl(&mut issues);

    // Check 2: defaults file parses
    let connection = check_defaults(&mut issues);

    // Check 3: configured talosconfig exists
    check_talosconfig(&mut issues, &connection);

    println!();
    if issues.is_empty() {
        ui::success("All checks passed");
    } else {
        print_issue_summary(&issues);
    }

    Ok(())
}

fn check_talosctl(issues: &mut Vec<Issue>) {
    let client = Talosctl::new(Connection::default());
    match client.probe() {
        Ok(()) => ui::success("talosctl is available"),
        Err(Error::Exec { .. }) => {
            ui::error("talosctl not found");
            issues.push(Issue {
                category: "talosctl",
                summary: "talosctl is not installed or not in PATH".to_string(),
                detail: None,
                fix: Some("Install talosctl from https://www.talos.dev".to_string()),
            });
        }
        Err(Error::NotAvailable { output }) => {
            ui::error("talosctl is present but not usable");
            issues.push(Issue {
                category: "talosctl",
                summary: format!("the liveness probe exited with {}", output.rc),
                detail: Some(output.stderr),
                fix: None,
            });
        }
        Err(err) => {
            ui::error("talosctl probe failed");
            issues.push(Issue {
                category: "talosctl",
                summary: err.to_string(),
                detail: None,
                fix: None,
            });
        }
    }
}

fn check_defaults(issues: &mut Vec<Issue>) -> Connection {
    match config::Defaults::load() {
        Ok(defaults) => {
            ui::success("defaults file is valid (or absent)");
            config::merge_connection(Connection::default(), defaults.connection)
        }
        Err(err) => {
            ui::error("defaults file could not be loaded");
            issues.push(Issue {
                category: "config",
                summary: "invalid defaults file".to_string(),
                detail: Some(format!("{err:#}")),
                fix: Some("Fix or remove ~/.config/talosup/config.toml".to_string()),
            });
            Connection::default()
        }
    }
}

fn check_talosconfig(issues: &mut Vec<Issue>, connection: &Connection) {
    let Some(talosconfig) = &connection.talosconfig else {
        return;
    };
    if Path::new(talosconfig).exists() {
        ui::success("talosconfig exists");
    } else {
        ui::error("talosconfig is missing");
        issues.push(Issue {
            category: "config",
            summary: format!("configured talosconfig does not exist: {talosconfig}"),
            detail: None,
            fix: Some("Generate one with `talosctl gen config` or fix the path".to_string()),
        });
    }
}

fn print_issue_summary(issues: &[Issue]) {
    let count = issues.len();
    let label = if count == 1 { "Issue" } else { "Issues" };
    ui::header(&format!("{count} {label} Found"));

    for (i, issue) in issues.iter().enumerate() {
        let num = i + 1;
        println!(
            "  {}  {} {}",
            format!("{num}.").bold(),
            issue.summary,
            format!("[{}]", issue.category).dimmed()
        );
        if let Some(detail) = &issue.detail {
            for line in detail.lines() {
                println!("      {}", line.dimmed());
            }
        }
        if let Some(fix) = &issue.fix {
            println!("      {} {}", "Fix:".cyan(), fix);
        }
        println!();
    }
}
