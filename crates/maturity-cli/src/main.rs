use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use maturity_cli::commands;
use maturity_cli::logging::{self, LogFormat};
use maturity_cli::{AppConfig, Outcome};
use maturity_core::RespondentProfile;
use std::path::PathBuf;
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("maturity")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Accounting & Finance Maturity Assessment")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory the report is saved into"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .help("Log filter used when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(value_parser!(LogFormat))
                .help("Log line format"),
        )
        .subcommand(
            Command::new("run")
                .about("Take the assessment interactively")
                .arg(Arg::new("name").long("name").help("Pre-fill your name"))
                .arg(Arg::new("email").long("email").help("Pre-fill your email")),
        )
        .subcommand(
            Command::new("render")
                .about("Render the report for a JSON submission file")
                .arg(
                    Arg::new("submission")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("File with name, email and answers"),
                ),
        )
        .subcommand(
            Command::new("catalog")
                .about("List the assessment questions")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let level = matches
        .get_one::<String>("log-level")
        .map_or("warn", String::as_str);
    let format = matches
        .get_one::<LogFormat>("log-format")
        .copied()
        .unwrap_or_default();
    logging::init(level, format)?;

    let mut config = AppConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(dir) = matches.get_one::<PathBuf>("output-dir") {
        config = config.with_output_dir(dir);
    }

    match matches.subcommand() {
        Some(("run", args)) => {
            let prefill = RespondentProfile::new(
                args.get_one::<String>("name").cloned().unwrap_or_default(),
                args.get_one::<String>("email").cloned().unwrap_or_default(),
            );
            let outcome = commands::run_interactive(
                &config,
                &prefill,
                std::io::stdin().lock(),
                std::io::stdout().lock(),
            )?;
            Ok(match outcome {
                Outcome::Submitted(_) => ExitCode::SUCCESS,
                Outcome::Abandoned => ExitCode::from(2),
            })
        }
        Some(("render", args)) => {
            let path = args
                .get_one::<PathBuf>("submission")
                .context("missing submission file")?;
            let completion = commands::render_file(&config, path)?;
            println!("{}", completion.greeting());
            println!(
                "Report saved to {} ({})",
                completion.receipt().location.display(),
                completion.receipt().fingerprint
            );
            Ok(ExitCode::SUCCESS)
        }
        Some(("catalog", args)) => {
            commands::write_catalog(
                &config.catalog()?,
                args.get_flag("json"),
                std::io::stdout().lock(),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let matches = cli()
            .try_get_matches_from(["maturity", "catalog", "--json", "--output-dir", "out"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("output-dir"),
            Some(&PathBuf::from("out"))
        );
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "catalog");
        assert!(args.get_flag("json"));
    }

    #[test]
    fn log_format_is_parsed() {
        let matches = cli()
            .try_get_matches_from(["maturity", "--log-format", "json", "run", "--name", "Jane"])
            .unwrap();
        assert_eq!(
            matches.get_one::<LogFormat>("log-format"),
            Some(&LogFormat::Json)
        );
    }
}
