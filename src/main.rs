mod ipc;
mod page;

use std::process::ExitCode;
use std::rc::Rc;

use futures::StreamExt;
use futures::channel::mpsc;
use tracing_subscriber::EnvFilter;

use modal_loader::command::Command;
use modal_loader::dom::Node;
use modal_loader::transport::HttpTransport;
use modal_loader::{Config, InteractionEvent, TriggerListener};

use page::Page;

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("MODAL_LOADER_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    tracing::info!(
        version = env!("MODAL_LOADER_VERSION"),
        commit = env!("MODAL_LOADER_COMMIT"),
        "modal-loader starting"
    );

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let transport = HttpTransport::new(config.base_url.as_deref())?;
    let page = Page::new(&config.busy_class);
    let listener = TriggerListener::from_config(
        &config,
        page.elements(),
        page.widget(),
        Rc::new(transport),
    )?;

    let (clicks, clicks_rx) = mpsc::unbounded();
    let mut commands = ipc::socket_listener()?;

    let control = async move {
        while let Some(cmd) = commands.next().await {
            match cmd {
                Command::Click(attributes) => {
                    let target = Node::from_attributes("a", attributes);
                    if clicks.unbounded_send(InteractionEvent::new(target)).is_err() {
                        break;
                    }
                }
                Command::Close(reason) => page.close(reason),
                Command::State => page.log_state(),
            }
        }
        tracing::info!("control socket closed");
    };

    futures::future::join(listener.start(clicks_rx), control).await;
    Ok(())
}
