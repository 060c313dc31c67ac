use crate::demo::{run_check, run_demo, CheckArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sage::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SAGE eligibility service",
    about = "Check HomeReady and Home Possible eligibility from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single loan scenario
    Check(CheckArgs),
    /// Evaluate the reference scenario catalogue and print each outcome
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_when_no_subcommand() {
        let cli = Cli::try_parse_from(["sage-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_check_flags() {
        let cli = Cli::try_parse_from([
            "sage-api",
            "check",
            "--credit-score",
            "640",
            "--annual-income",
            "85000",
            "--loan-amount",
            "320000",
            "--property-value",
            "380000",
            "--monthly-debt",
            "500",
            "--property-type",
            "condo",
            "--state",
            "tx",
            "--county",
            "Harris",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Check(args)) => {
                assert!(args.json);
                let scenario = args.into_scenario().expect("scenario builds");
                assert_eq!(scenario.credit_score, 640);
                assert_eq!(scenario.property_type.code(), "condo");
                assert_eq!(scenario.loan_term_years.years(), 30);
            }
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_property_type() {
        let result = Cli::try_parse_from([
            "sage-api",
            "check",
            "--property-type",
            "castle",
        ]);
        assert!(result.is_err());
    }
}
