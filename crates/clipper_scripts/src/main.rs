use clap::Parser;

use clipper_scripts::args::ScriptArgs;
use clipper_scripts::scrape;

#[tokio::main]
async fn main() {
    let args = ScriptArgs::parse();
    // Diagnostics go to stderr; stdout is reserved for the result JSON.
    clipper_logging::initialize_stderr();

    match scrape::run(&args).await {
        Ok(records) => match serde_json::to_string(&records) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error serializing {} results: {err}", args.script);
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("Error running {}: {err}", args.script);
            std::process::exit(1);
        }
    }
}
