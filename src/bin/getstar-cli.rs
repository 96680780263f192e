use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "getstar-cli")]
#[command(about = "Command-line client for the SearchCal GetStar proxy", long_about = None)]
struct Cli {
    /// Base URL of the proxy
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Path of the GetStar route
    #[arg(short, long, default_value = "/getstar")]
    path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one star and print the result
    Get(GetArgs),
    /// Check proxy status
    Health,
}

#[derive(Args)]
struct GetArgs {
    /// Star name or identifier (e.g. "Vega", "HD 1234")
    star: String,

    /// Output format: vot or tsv
    #[arg(short, long, default_value = "vot")]
    format: String,

    #[arg(long)]
    scenario: Option<String>,

    #[arg(long)]
    force_update: Option<String>,

    #[arg(long = "V")]
    v: Option<String>,
    #[arg(long = "e_V")]
    e_v: Option<String>,
    #[arg(long = "J")]
    j: Option<String>,
    #[arg(long = "e_J")]
    e_j: Option<String>,
    #[arg(long = "H")]
    h: Option<String>,
    #[arg(long = "e_H")]
    e_h: Option<String>,
    #[arg(long = "K")]
    k: Option<String>,
    #[arg(long = "e_K")]
    e_k: Option<String>,

    #[arg(long = "SP_TYPE")]
    sp_type: Option<String>,
}

impl GetArgs {
    fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("star", self.star.as_str()), ("format", self.format.as_str())];
        let optional = [
            ("scenario", &self.scenario),
            ("forceUpdate", &self.force_update),
            ("V", &self.v),
            ("e_V", &self.e_v),
            ("J", &self.j),
            ("e_J", &self.e_j),
            ("H", &self.h),
            ("e_H", &self.e_h),
            ("K", &self.k),
            ("e_K", &self.e_k),
            ("SP_TYPE", &self.sp_type),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                pairs.push((name, value.as_str()));
            }
        }
        pairs
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Get(args) => {
            let res = client
                .get(format!("{}{}", base, cli.path))
                .query(&args.query_pairs())
                .send()
                .await?;
            let status = res.status();
            let text = res.text().await?;
            if !status.is_success() {
                eprintln!("Error: proxy returned status {}", status);
                eprintln!("{}", text);
                std::process::exit(1);
            }
            print!("{}", text);
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            let status = res.status();
            if !status.is_success() {
                eprintln!("Error: proxy returned status {}", status);
                std::process::exit(1);
            }
            let json: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
