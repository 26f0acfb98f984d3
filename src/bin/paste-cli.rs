use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE, SET_COOKIE};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "paste-cli")]
#[command(about = "Command line client for paste-share", long_about = None)]
struct Cli {
    /// Public server URL
    #[arg(short, long, default_value = "http://localhost:8080", env = "PASTE_URL")]
    url: String,

    /// Admin server URL
    #[arg(long, default_value = "http://localhost:8787", env = "PASTE_ADMIN_URL")]
    admin_url: String,

    /// Admin bearer key
    #[arg(short, long, env = "PASTE_ADMIN_KEY")]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a paste from a file or stdin
    Create {
        /// File to upload (stdin when omitted)
        file: Option<PathBuf>,
        #[arg(short, long, default_value = "auto")]
        syntax: String,
        /// Lifetime such as 15m, 2h, 1d (0 = forever)
        #[arg(short, long, default_value = "0")]
        ttl: String,
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        allow_edit: bool,
    },
    /// Show a paste as JSON
    Get {
        id: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Print raw paste content
    Raw {
        id: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List recent pastes (admin)
    List,
    /// Delete a paste (admin)
    Delete { id: String },
    /// Remove expired pastes now (admin)
    Purge,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut admin_headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        admin_headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {key}"))?);
    }

    match cli.command {
        Commands::Create { file, syntax, ttl, password, allow_edit } => {
            let content = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let mut form = vec![
                ("content", content),
                ("syntax", syntax),
                ("ttl", ttl),
                ("password", password.unwrap_or_default()),
            ];
            if allow_edit {
                form.push(("allow_edit", "on".to_string()));
            }
            let res = client.post(format!("{}/api/p", cli.url)).form(&form).send().await?;
            if let Some(json) = json_or_report(res).await? {
                if let Some(id) = json.get("id").and_then(Value::as_str) {
                    println!("{}/p/{}", cli.url, id);
                }
            }
        }
        Commands::Get { id, password } => {
            let headers = access_headers(&client, &cli.url, &id, password).await?;
            let res = client
                .get(format!("{}/api/p/{}", cli.url, id))
                .headers(headers)
                .send()
                .await?;
            if let Some(json) = json_or_report(res).await? {
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Commands::Raw { id, password } => {
            let headers = access_headers(&client, &cli.url, &id, password).await?;
            let res = client
                .get(format!("{}/api/raw/{}", cli.url, id))
                .headers(headers)
                .send()
                .await?;
            if res.status().is_success() {
                print!("{}", res.text().await?);
            } else {
                report(res).await;
            }
        }
        Commands::List => {
            let res = client
                .get(format!("{}/admin", cli.admin_url))
                .headers(admin_headers)
                .send()
                .await?;
            if let Some(json) = json_or_report(res).await? {
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Commands::Delete { id } => {
            let res = client
                .post(format!("{}/admin/delete/{}", cli.admin_url, id))
                .headers(admin_headers)
                .send()
                .await?;
            if res.status().is_success() {
                println!("deleted {id}");
            } else {
                report(res).await;
            }
        }
        Commands::Purge => {
            let res = client
                .post(format!("{}/admin/purge", cli.admin_url))
                .headers(admin_headers)
                .send()
                .await?;
            if res.status().is_success() {
                println!("purged");
            } else {
                report(res).await;
            }
        }
    }

    Ok(())
}

/// Trade the paste password for the access cookie.
async fn access_headers(
    client: &reqwest::Client,
    url: &str,
    id: &str,
    password: Option<String>,
) -> Result<HeaderMap, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    let Some(password) = password else {
        return Ok(headers);
    };

    let res = client
        .post(format!("{url}/api/p/{id}/auth"))
        .form(&[("password", password)])
        .send()
        .await?;
    if !res.status().is_success() {
        return Err(format!("authentication failed: {}", res.status()).into());
    }

    if let Some(cookie) = res.headers().get(SET_COOKIE).and_then(|v| v.to_str().ok()) {
        let pair = cookie.split(';').next().unwrap_or_default();
        headers.insert(COOKIE, HeaderValue::from_str(pair)?);
    }
    Ok(headers)
}

async fn json_or_report(res: reqwest::Response) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        report(res).await;
        return Ok(None);
    }
    Ok(Some(res.json().await?))
}

async fn report(res: reqwest::Response) {
    eprintln!("Error: server returned status {}", res.status());
    if let Ok(text) = res.text().await {
        eprintln!("Response: {}", text);
    }
}
