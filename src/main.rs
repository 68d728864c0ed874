use task_api_lite::config::AppConfig;
use task_api_lite::{observability, server};

#[tokio::main]
async fn main() {
    if let Err(message) = run().await {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }
    if !args.is_empty() {
        return Err(format!("invalid arguments.\n{}", usage_text()));
    }

    let config =
        AppConfig::from_env().map_err(|err| format!("failed to load configuration: {err}"))?;
    observability::init_tracing(&config.log_level, config.log_format)?;

    server::run_server(&config).await
}

fn print_usage() {
    println!("{}", usage_text());
}

fn usage_text() -> &'static str {
    "Usage: task-api-lite

Configuration is read from the environment:
  LISTEN       listen address (default 127.0.0.1:8080)
  DB_PATH      SQLite database path (default data/app.db)
  STATIC_DIR   static asset directory (default static)
  LOG_LEVEL    tracing filter (default info)
  LOG_FORMAT   text | json (default text)"
}
