//! Send one contact message through the same validation and client the
//! website uses. Handy for smoke-testing a deployment.
//!
//! Usage:
//!   cargo run --bin send-contact -- --name "Maria Silva" --email maria@example.com \
//!       --subject "Group dinner" --message "Table for twelve on Friday?" [--phone "+351 912 345 678"] [--lang en]
//!
//! Required environment variables:
//! - CONTACT_ENDPOINT_URL
//! - CONTACT_ANON_KEY
//!
//! Optional:
//! - CONTACT_TIMEOUT_SECS (defaults to 10)

use anyhow::{bail, Context, Result};
use restaurant_contact::{
    config::ClientConfig,
    form::{ContactForm, SubmitOutcome},
    i18n::Language,
    state::SiteState,
    storage::MemoryStorage,
    submission::ContactClient,
    validation::Field,
};
use std::sync::Arc;
use tracing::info;

const USAGE: &str = "usage: send-contact --name <NAME> --email <EMAIL> --subject <SUBJECT> \
--message <MESSAGE> [--phone <PHONE>] [--lang <pt|en|es|fr>]";

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("restaurant_contact=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = ClientConfig::from_env()?;
    let client = ContactClient::from_config(&config).context("Failed to build HTTP client")?;

    let mut site = SiteState::load(Arc::new(MemoryStorage::new()), false);
    let mut form = ContactForm::new();

    let mut iter = args.into_iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .with_context(|| format!("missing value for {}\n{}", flag, USAGE))?;
        match flag.as_str() {
            "--name" => form.set_field(Field::Name, value),
            "--email" => form.set_field(Field::Email, value),
            "--phone" => form.set_field(Field::Phone, value),
            "--subject" => form.set_field(Field::Subject, value),
            "--message" => form.set_field(Field::Message, value),
            "--lang" => site.set_language(Language::from_code(&value)?)?,
            other => bail!("unknown argument {}\n{}", other, USAGE),
        }
    }

    info!("Sending contact message in {}", site.language().name());

    match form.submit(&client, site.localization()).await {
        SubmitOutcome::Sent { id, toast } => {
            println!("{}: {} (id {})", toast.title, toast.description, id);
            Ok(())
        }
        SubmitOutcome::Invalid { toast } => {
            eprintln!("{}: {}", toast.title, toast.description);
            for (field, error) in form.errors() {
                eprintln!("  {}: {}", field, error);
            }
            bail!("message not sent")
        }
        SubmitOutcome::Failed { toast } => {
            eprintln!("{}: {}", toast.title, toast.description);
            bail!("message not sent")
        }
        SubmitOutcome::Busy => bail!("a submission is already in flight"),
    }
}
