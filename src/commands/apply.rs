//! The `talosup apply` command.

use anyhow::Result;
use taloskit::{ApplyConfig, ApplyOptions, ApplyReport, Connection, FailureReport, Talosctl};

use crate::Context;
use crate::cli::ApplyArgs;
use crate::config;
use crate::ui;

pub fn run(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let defaults = config::Defaults::load()?;
    let connection = config::merge_connection(
        Connection {
            cluster: args.cluster,
            context: args.context,
            endpoints: args.endpoints,
            nodes: args.nodes,
            talosconfig: args.talosconfig,
        },
        defaults.connection,
    );

    let apply = ApplyConfig {
        file: shellexpand::tilde(&args.file).into_owned(),
        cert_fingerprints: args.cert_fingerprints,
        config_patches: args.config_patches,
        insecure: args.insecure,
        mode: args.mode.into(),
        timeout_secs: args.timeout,
    };
    let options = ApplyOptions {
        check_mode: args.check,
        diff_mode: args.diff,
    };

    let client = Talosctl::new(connection);
    match client.apply_config(&apply, &options) {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(ctx, &apply, &options, &report);
            }
            Ok(())
        }
        Err(err) => {
            let failure = FailureReport::from_error(&err);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&failure)?);
            } else {
                ui::error(&format!("{err}"));
                for line in failure.msg.lines() {
                    ui::dim(line);
                }
            }
            std::process::exit(1);
        }
    }
}

fn print_report(ctx: &Context, apply: &ApplyConfig, options: &ApplyOptions, report: &ApplyReport) {
    if ctx.quiet {
        return;
    }

    if report.changed {
        if options.check_mode {
            ui::warn(&format!("{} would change the machine configuration", apply.file));
        } else {
            ui::success(&format!("applied {}", apply.file));
        }
    } else {
        ui::success("no changes");
    }

    if let Some(diff) = &report.diff
        && !diff.is_empty()
    {
        ui::header("Config diff");
        println!("{diff}");
    }

    if ctx.verbose > 0 {
        ui::kv("mode", apply.mode.as_str());
        ui::kv("rc", &report.rc.to_string());
        for line in report.stdout.lines() {
            ui::dim(line);
        }
    }
}
