use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use okr_cli::{
    init_tracing, key_result_progress, load_document, objective_report, render_json,
    render_summary, CliConfig, LogFormat,
};
use okr_progress::{KeyResultType, ProgressEngine};
use std::io::Write;
use std::path::PathBuf;

fn cli() -> Command {
    let type_names: Vec<&'static str> = KeyResultType::ALL.iter().map(KeyResultType::as_str).collect();

    Command::new("okr")
        .version(okr_cli::VERSION)
        .about("Progress reports for objectives and key results")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .value_parser(["text", "json"])
                .help("Log output format (overrides config)"),
        )
        .subcommand(
            Command::new("key-result")
                .about("Compute progress of a single key result")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(type_names)
                        .help("Key result type"),
                )
                .arg(
                    Arg::new("initial")
                        .long("initial")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Initial value"),
                )
                .arg(
                    Arg::new("current")
                        .long("current")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Current value"),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Target value"),
                ),
        )
        .subcommand(
            Command::new("objective")
                .about("Report progress for an objective document (JSON or YAML)")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Objective document"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the detail payload as JSON"),
                ),
        )
        .subcommand(Command::new("config").about("Print the effective configuration"))
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<CliConfig> {
    let mut config = CliConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("loading configuration")?;
    if let Some(format) = matches.get_one::<String>("log-format") {
        config = config.with_log_format(format.parse::<LogFormat>()?);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    init_tracing(&config.log_level, config.log_format);
    run(&matches, &config, &mut std::io::stdout().lock())
}

fn run(matches: &ArgMatches, config: &CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let engine = ProgressEngine::new(config.progress);
    tracing::debug!(aggregation = ?engine.config().aggregation, "progress engine ready");

    match matches.subcommand() {
        Some(("key-result", args)) => {
            let value = |name: &str| {
                args.get_one::<f64>(name)
                    .copied()
                    .with_context(|| format!("missing --{name}"))
            };
            let kind = args.get_one::<String>("type").context("missing --type")?;
            let progress = key_result_progress(
                &engine,
                kind,
                value("initial")?,
                value("current")?,
                value("target")?,
            )?;
            writeln!(out, "{progress:.2}")?;
        }
        Some(("objective", args)) => {
            let path = args
                .get_one::<PathBuf>("file")
                .context("missing objective document path")?;
            let document = load_document(path)
                .with_context(|| format!("loading objective document {}", path.display()))?;
            let detail = objective_report(&engine, &document);

            if args.get_flag("json") {
                writeln!(out, "{}", render_json(&detail)?)?;
            } else {
                write!(out, "{}", render_summary(&detail))?;
            }
        }
        Some(("config", _)) => {
            write!(out, "{}", config.to_toml_string()?)?;
        }
        Some((other, _)) => anyhow::bail!("unknown command: {other}"),
        None => anyhow::bail!("no command given, see `okr --help`"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn parses_negative_values() {
        let matches = cli()
            .try_get_matches_from([
                "okr",
                "key-result",
                "--type",
                "should_increase_to",
                "--initial",
                "-10",
                "--current",
                "-5",
                "--target",
                "10",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<f64>("initial"), Some(&-10.0));
    }

    #[test]
    fn rejects_unknown_type() {
        let result = cli().try_get_matches_from([
            "okr", "key-result", "--type", "sideways", "--initial", "0", "--current", "0",
            "--target", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn run_prints_key_result_progress() {
        let matches = cli()
            .try_get_matches_from([
                "okr", "key-result", "--type", "should_decrease_to", "--initial", "100", "--current",
                "25", "--target", "0",
            ])
            .unwrap();
        let mut out = Vec::new();
        run(&matches, &CliConfig::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "75.00\n");
    }

    #[test]
    fn run_without_command_is_an_error() {
        let matches = Command::new("okr").try_get_matches_from(["okr"]).unwrap();
        let mut out = Vec::new();
        let err = run(&matches, &CliConfig::default(), &mut out).unwrap_err();
        assert!(err.to_string().contains("no command given"));
        assert!(out.is_empty());

        let matches = Command::new("okr")
            .subcommand(Command::new("archive"))
            .try_get_matches_from(["okr", "archive"])
            .unwrap();
        let err = run(&matches, &CliConfig::default(), &mut out).unwrap_err();
        assert!(err.to_string().contains("unknown command: archive"));
    }
}
