// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;

use anyhow::{Context, Result};
use config::Config;
use hyra_app::{AppState, EntityKind, IdGenerator};
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `hyra --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    let _log_guard = logging::init(&config)?;

    let mut state = build_state(&config, options.demo);
    info!(
        tab = state.active_tab.as_str(),
        ids = config.id_strategy().as_str(),
        demo = options.demo,
        tenants = state.record_count(EntityKind::Tenants),
        apartments = state.record_count(EntityKind::Apartments),
        keys = state.record_count(EntityKind::Keys),
        "state ready"
    );
    if options.check_only {
        return Ok(());
    }

    hyra_tui::run_app(&mut state)
}

fn build_state(config: &Config, demo: bool) -> AppState {
    let mut state = AppState::with_id_generator(IdGenerator::for_strategy(config.id_strategy()));
    state.active_tab = config.start_tab();
    if demo {
        hyra_testkit::seed_demo_data(&mut state);
    }
    state
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("hyra: tenants, apartments and keys");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch with seeded demo data");
    println!("  --check                  Validate config and startup, then exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, build_state, parse_cli_args};
    use crate::config::Config;
    use anyhow::Result;
    use hyra_app::{AppCommand, EntityKind, FormPayload, KeyFormInput, RecordId};
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/hyra-config.toml")
    }

    fn load(content: &str) -> Result<(tempfile::TempDir, Config)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        let config = Config::load(&path)?;
        Ok((temp, config))
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                demo: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_rejects_flags_hyra_does_not_know() {
        let error = parse_cli_args(vec!["--demo", "--tenants-csv"], default_options_path())
            .expect_err("unknown flag should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument \"--tenants-csv\""));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_demo_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--demo", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.demo);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn build_state_applies_start_tab_and_id_strategy() -> Result<()> {
        let (_temp, config) =
            load("version = 1\n[ui]\nstart_tab = \"keys\"\n[ids]\nstrategy = \"sequential\"\n")?;
        let mut state = build_state(&config, false);
        assert_eq!(state.active_tab, EntityKind::Keys);

        state.dispatch(AppCommand::BeginCreate);
        state.dispatch(AppCommand::Submit(FormPayload::Key(KeyFormInput {
            key_type: "Garage".to_owned(),
            number: "G-1".to_owned(),
            amount: 1.0,
        })));
        assert_eq!(state.keys()[0].id, RecordId::from("1"));
        Ok(())
    }

    #[test]
    fn build_state_seeds_demo_data_on_request() {
        let config = Config::default();
        let state = build_state(&config, true);
        assert_eq!(state.record_count(EntityKind::Tenants), 8);
        assert_eq!(state.record_count(EntityKind::Apartments), 5);
        assert_eq!(state.record_count(EntityKind::Keys), 10);
        assert!(state.tenants().iter().all(|tenant| tenant.id.as_str().len() == 32));
    }
}
