use crate::demo::{run_demo, run_scenarios, run_score, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sme_assess::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SME Cybersecurity Self-Assessment",
    about = "Run the self-assessment service or score saved answers from the command line",
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
    /// Walk a scripted business through every stage and print the report
    Demo(DemoArgs),
    /// Score a saved answers file and export the results
    Score(ScoreArgs),
    /// List the scenario catalog with option weights and domain mapping
    Scenarios,
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
        Command::Demo(args) => run_demo(args),
        Command::Score(args) => run_score(args),
        Command::Scenarios => run_scenarios(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sme_assess::assessment::ExportFormat;

    #[test]
    fn parses_score_arguments_with_format() {
        let cli = Cli::try_parse_from([
            "sme-assess-api",
            "score",
            "--input",
            "answers.json",
            "--format",
            "csv",
        ])
        .expect("valid arguments");
        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.format, ExportFormat::Csv);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_export_format() {
        let result = Cli::try_parse_from(["sme-assess-api", "demo", "--format", "docx"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["sme-assess-api"]).expect("valid arguments");
        assert!(cli.command.is_none());
    }
}
