use anyhow::Result;
use arena_scenarios::{catalog, registry, run_and_validate};
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    catalog::register_builtins();

    let cli = Command::new("arena")
        .version(arena_scenarios::VERSION)
        .about("Multi-agent evaluation arena")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List registered scenarios"))
        .subcommand(
            Command::new("run")
                .about("Run scenarios and validate their event logs")
                .arg(Arg::new("name").help("Scenario name to run"))
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Run every registered scenario"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print reports as JSON"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("list", _)) => {
            for name in registry::names() {
                println!("{name}");
            }
        }
        Some(("run", args)) => {
            let names = if args.get_flag("all") {
                registry::names()
            } else if let Some(name) = args.get_one::<String>("name") {
                vec![name.clone()]
            } else {
                anyhow::bail!("pass a scenario name or --all");
            };

            let json = args.get_flag("json");
            let mut failures = 0usize;
            for name in &names {
                let mut scenario = registry::build(name)?;
                let report = run_and_validate(scenario.as_mut())?;
                if !report.passed() {
                    failures += 1;
                }
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else if report.passed() {
                    println!("PASS {name} ({} events)", report.events_recorded);
                } else {
                    println!(
                        "FAIL {name}: {}",
                        report.result.reason().unwrap_or_default()
                    );
                }
            }

            if !json {
                println!();
                println!("{} passed, {} failed", names.len() - failures, failures);
            }
            if failures > 0 {
                std::process::exit(1);
            }
        }
        _ => {}
    }

    Ok(())
}
