use std::io::Write as _;

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    HttpNotifyTransport, SubmissionController, SubmissionStatus, ToastKind, ToastObserver,
    ToastUpdate,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server_url: String,
    /// Submit this address once instead of prompting.
    #[arg(long)]
    email: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let args = Args::parse();

    let transport = HttpNotifyTransport::new(&args.server_url)?;
    let mut controller = SubmissionController::new(transport);
    controller.observe(ToastObserver::new(print_toast));

    match args.email {
        Some(email) => submit_once(&mut controller, email).await,
        None => prompt_until_done(&mut controller).await,
    }
}

async fn submit_once(
    controller: &mut SubmissionController<HttpNotifyTransport>,
    email: String,
) -> Result<()> {
    controller.set_email(email);
    let state = controller.submit().await;
    match state.status {
        SubmissionStatus::Success => Ok(()),
        SubmissionStatus::Idle => bail!(state.inline_error().unwrap_or("invalid email").to_string()),
        SubmissionStatus::Error | SubmissionStatus::Submitting => bail!(state.message.clone()),
    }
}

async fn prompt_until_done(
    controller: &mut SubmissionController<HttpNotifyTransport>,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if controller.state().email.is_empty() {
            print!("Notify me at: ");
        } else {
            print!("Notify me at [{}]: ", controller.state().email);
        }
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let line = line.trim_end();
        // An empty line resubmits the address kept after a failed attempt.
        if !line.is_empty() || controller.state().email.is_empty() {
            controller.set_email(line);
        }

        let status = controller.submit().await.status;
        match status {
            SubmissionStatus::Success => {
                controller.dismiss();
                return Ok(());
            }
            SubmissionStatus::Error => controller.retry(),
            SubmissionStatus::Idle => {
                if let Some(error) = controller.state().inline_error() {
                    eprintln!("  ! {error}");
                }
            }
            SubmissionStatus::Submitting => {}
        }
    }
}

fn print_toast(update: ToastUpdate) {
    match update {
        ToastUpdate::Show(toast) => match toast.kind {
            ToastKind::Success => println!("✔ {}", toast.message),
            ToastKind::Error => {
                eprintln!("✖ {} (press enter to retry)", toast.message)
            }
        },
        ToastUpdate::Hide => debug!("toast dismissed"),
    }
}
