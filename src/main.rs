use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indicatif::ProgressBar;

use ferret::config::Config;
use ferret::output;
use ferret::pipeline::Pipeline;
use ferret::report;

#[derive(Parser)]
#[command(name = "ferret", about = "Web research assistant that answers queries with cited sources")]
struct Cli {
    /// The research query to process
    query: String,

    /// Save the answer to the specified file
    #[arg(short, long, value_name = "FILE")]
    save: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env();

    output::banner(&cli.query);
    println!();

    let pipeline = Pipeline::new(&config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Researching...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let state = pipeline.process_query(&cli.query).await;

    spinner.finish_and_clear();

    if let Some(error) = state.error {
        output::error(&error);
        std::process::exit(1);
    }

    let answer = match state.answer {
        Some(answer) => answer,
        None => {
            output::error("Pipeline finished without an answer");
            std::process::exit(1);
        }
    };

    output::print_answer(&answer.answer);
    output::print_sources(&answer.sources);

    if let Some(path) = cli.save {
        match report::save_report(&path, &cli.query, &answer).await {
            Ok(()) => output::success(&format!("Results saved to {}", path.display())),
            Err(e) => {
                output::error(&format!("{}", e));
                std::process::exit(1);
            }
        }
    }
}
