//! Payvoice CLI - 收款语音生成客户端
//!
//! 通过代理生成语音，保存到本地并维护最近 10 条历史记录

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use payvoice::application::{DisplayResult, FormController};
use payvoice::config::{load_config, load_config_from_path, ClientConfig};
use payvoice::domain::ReturnFormat;
use payvoice::infrastructure::adapters::{HttpProxyClient, HttpProxyClientConfig};
use payvoice::infrastructure::{FileAudioStorage, SledHistoryStore};

#[derive(Parser)]
#[command(name = "payvoice-cli", about = "Generate Alipay-style payment voice clips")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a voice clip for an amount
    Generate {
        /// Amount, thousands separators allowed (e.g. 1,234.56)
        amount: String,

        /// Return the upstream JSON instead of audio
        #[arg(long)]
        json: bool,

        /// Copy the generated audio into the download directory
        #[arg(long)]
        download: bool,
    },

    /// List recent generations, newest first
    History,

    /// Show a history entry again without contacting the proxy
    Replay {
        /// History entry id
        id: String,
    },

    /// Copy a history entry's audio into the download directory
    Download {
        /// History entry id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from_path(Some(path.as_path())),
        None => load_config(),
    }
    .context("failed to load config")?;

    let env_filter =
        EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut controller = mount_controller(&config.client).await?;

    match cli.command {
        Command::Generate {
            amount,
            json,
            download,
        } => {
            let format = if json {
                ReturnFormat::Json
            } else {
                ReturnFormat::Audio
            };

            controller.update_amount(amount.clone());
            println!("Amount: {}", controller.formatted_amount());

            controller.submit(&amount, format).await;

            if let Some(error) = controller.error() {
                anyhow::bail!("{}", error);
            }
            print_result(controller.result());

            if download {
                if let Some(path) = controller.download_current_result().await? {
                    println!("Saved to {}", path.display());
                }
            }
        }
        Command::History => {
            if controller.history().is_empty() {
                println!("No history yet");
            }
            for record in controller.history() {
                println!(
                    "{}  {}  {}  {}",
                    record.id,
                    record.amount,
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.audio_url
                );
            }
        }
        Command::Replay { id } => {
            let record = controller
                .find_history(&id)
                .cloned()
                .with_context(|| format!("no history entry with id {}", id))?;
            controller.replay(&record);
            print_result(controller.result());
        }
        Command::Download { id } => {
            let record = controller
                .find_history(&id)
                .cloned()
                .with_context(|| format!("no history entry with id {}", id))?;
            let path = controller.download_history_record(&record).await?;
            println!("Saved to {}", path.display());
        }
    }

    Ok(())
}

async fn mount_controller(config: &ClientConfig) -> Result<FormController> {
    let mut proxy_config =
        HttpProxyClientConfig::new(&config.proxy_url).with_timeout(config.timeout_secs);
    if let Some(key) = &config.api_key {
        proxy_config = proxy_config.with_api_key(key);
    }
    let proxy = Arc::new(HttpProxyClient::new(proxy_config)?);

    if let Some(parent) = config.history_db.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let history_store = SledHistoryStore::open(&config.history_db)?.arc();

    let audio_storage =
        Arc::new(FileAudioStorage::new(&config.audio_dir, &config.download_dir).await?);

    Ok(FormController::mount(proxy, history_store, audio_storage).await)
}

fn print_result(result: Option<&DisplayResult>) {
    match result {
        Some(DisplayResult::Audio { audio_url, number }) => {
            println!("Voice for {} ready: {}", number, audio_url);
        }
        Some(json @ DisplayResult::Json(_)) => {
            for (key, value) in json.table_rows() {
                println!("{:<16} {}", key, value);
            }
        }
        None => {}
    }
}
