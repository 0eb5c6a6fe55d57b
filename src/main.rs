use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imaginate::app::{App, Session};
use imaginate::models::{Config, Generation};
use imaginate::{render, web};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "imaginate")]
#[command(about = "Generate a short story and an illustration from one prompt")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate once for the given prompt and print the result.
    Generate {
        prompt: String,
        /// Write the generated image bytes to this path.
        #[arg(long, value_name = "PATH")]
        image_out: Option<PathBuf>,
    },
    /// Read prompts from stdin, one generation per line.
    Interactive,
    /// Serve the single-page front-end over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imaginate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let app = match Config::from_env().and_then(|config| App::new(&config)) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Generate { prompt, image_out } => {
            let generation = app.generate(&prompt).await;
            print!("{}", render::terminal(&generation));
            if let Some(path) = image_out {
                save_image(&generation, &path)?;
            }
        }
        Command::Interactive => run_interactive(&app).await?,
        Command::Serve { addr } => web::serve(Arc::new(app), addr).await?,
    }

    Ok(())
}

async fn run_interactive(app: &App) -> Result<()> {
    let mut session = Session::new(app);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render::TITLE);
    println!("{}", render::IDLE_HINT);

    loop {
        println!("{}", render::PROMPT_LABEL);
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        let generation = session.trigger(&line).await;
        println!("{}", render::terminal(generation));
    }

    Ok(())
}

fn save_image(generation: &Generation, path: &Path) -> Result<()> {
    let Generation::Completed(report) = generation else {
        return Ok(());
    };
    let Some(image) = report.image.image() else {
        return Ok(());
    };

    std::fs::write(path, image.bytes())
        .with_context(|| format!("failed to write image to {}", path.display()))?;
    info!("Saved {} image to {}", image.extension(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imaginate::ai::MockImageClient;
    use imaginate::models::{GenerationReport, ImageResult, Prompt, StoryResult};

    fn completed(image: ImageResult) -> Generation {
        Generation::Completed(GenerationReport {
            id: uuid::Uuid::new_v4(),
            prompt: Prompt::parse("p").unwrap(),
            story: StoryResult::Story("s".to_string()),
            image,
        })
    }

    #[test]
    fn test_cli_parses_generate() {
        let args =
            CliArgs::try_parse_from(["imaginate", "generate", "a fox", "--image-out", "fox.png"])
                .unwrap();
        match args.command {
            Command::Generate { prompt, image_out } => {
                assert_eq!(prompt, "a fox");
                assert_eq!(image_out, Some(PathBuf::from("fox.png")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_serve_default_addr() {
        let args = CliArgs::try_parse_from(["imaginate", "serve"]).unwrap();
        match args.command {
            Command::Serve { addr } => assert_eq!(addr.to_string(), "127.0.0.1:8501"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_save_image_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = MockImageClient::placeholder_image();

        save_image(&completed(ImageResult::Generated(image.clone())), &path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), image.bytes());
    }

    #[test]
    fn test_save_image_skips_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        save_image(&Generation::Rejected, &path).unwrap();
        save_image(
            &completed(ImageResult::Unavailable(imaginate::error::ApiError::Transport(
                "refused".to_string(),
            ))),
            &path,
        )
        .unwrap();

        assert!(!path.exists());
    }
}
