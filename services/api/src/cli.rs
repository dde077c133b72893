use crate::infra::build_mailer;
use crate::server;
use clap::{Args, Parser, Subcommand};
use pot_insurance::config::AppConfig;
use pot_insurance::error::AppError;
use pot_insurance::notifications::{Notification, NotificationService};
use pot_insurance::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "POT Insurance",
    about = "Run the insurance administration API or send a one-off notification",
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
    /// Send a single notification email through the configured transport
    Notify(NotifyArgs),
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

#[derive(Args, Debug)]
pub(crate) struct NotifyArgs {
    /// Recipient address
    #[arg(long)]
    pub(crate) to: String,
    #[arg(long)]
    pub(crate) subject: String,
    /// Plain-text body
    #[arg(long, default_value = "")]
    pub(crate) message: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Notify(args) => notify(args).await,
    }
}

async fn notify(args: NotifyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mailer = build_mailer(&config.mail)?;
    let service = NotificationService::new(mailer, config.mail.from.clone());
    let notification = Notification::new(args.subject, args.message);
    let to = args.to;

    tokio::task::spawn_blocking(move || service.send_mail(&to, &notification))
        .await
        .map_err(|err| AppError::Io(std::io::Error::other(err)))??;

    info!("notification sent");
    Ok(())
}
