//! rentdesk-client CLI entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rentdesk::storage::inmemory::InMemoryBackend;
use rentdesk::{AuthService, Backend, Config, CustomerService, ImageService};
use rentdesk_client::cli::auth::AuthAction;
use rentdesk_client::cli::customers::{create_request, update_request, CustomersAction};
use rentdesk_client::cli::images::{guess_content_type, ImagesAction};
use rentdesk_client::cli::{BackendKind, Cli, Commands, OutputFormat};
use rentdesk_client::output::{format_output, pretty};
use rentdesk_client::{session_file, RemoteClient};
use rentdesk_core::customer::CustomerFilters;
use rentdesk_core::image::ImageUpload;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rentdesk=info,rentdesk_client=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let config = Config::from_env();

    let (backend, remote) = match cli.backend {
        BackendKind::Memory => {
            tracing::info!("Using in-memory backend with demo data");
            let memory = InMemoryBackend::with_demo_data()
                .await
                .with_bucket(config.image_bucket.clone());
            (Backend::from_shared(Arc::new(memory)), None)
        }
        BackendKind::Remote => {
            if cli.anon_key.is_empty() {
                anyhow::bail!("RENTDESK_ANON_KEY (or --anon-key) is required for the remote backend");
            }
            let session = session_file::load(&cli.session_file)
                .await
                .with_context(|| format!("reading {}", cli.session_file.display()))?;
            let client = Arc::new(
                RemoteClient::new(&cli.base_url, cli.anon_key.clone(), config.image_bucket.clone())?
                    .with_session(session),
            );
            (Backend::from_shared(client.clone()), Some(client))
        }
    };

    let result = run(&cli, &backend, &config).await;

    // Persist whatever session the command left behind, even on failure.
    if let Some(client) = remote {
        session_file::save(&cli.session_file, client.session_snapshot().await.as_ref())
            .await
            .with_context(|| format!("writing {}", cli.session_file.display()))?;
    }

    result
}

/// Print `value` as JSON or with its pretty formatter.
fn emit<T: Serialize + ?Sized>(format: OutputFormat, value: &T, pretty: impl FnOnce(&T) -> String) {
    match format {
        OutputFormat::Json => println!("{}", format_output(value, format)),
        OutputFormat::Pretty => println!("{}", pretty(value)),
    }
}

async fn run(cli: &Cli, backend: &Backend, config: &Config) -> Result<()> {
    let format = cli.format;

    match &cli.command {
        Commands::Auth(auth_cmd) => {
            let auth = AuthService::new(backend, config);
            match &auth_cmd.action {
                AuthAction::Login { email, password } => {
                    let context = auth.login(email, password).await?;
                    emit(format, &context, pretty::format_auth_context);
                }
                AuthAction::Logout => {
                    auth.logout().await?;
                    if !cli.quiet {
                        println!("Signed out");
                    }
                }
                AuthAction::Session => {
                    let session = auth.current_session().await?;
                    emit(format, &session, |s| pretty::format_session(s.as_ref()));
                }
                AuthAction::Whoami => {
                    let context = auth.current_user_profile().await?;
                    emit(format, &context, |c| match c {
                        Some(context) => pretty::format_auth_context(context),
                        None => "Not signed in.".to_string(),
                    });
                }
                AuthAction::ResetPassword { email } => {
                    auth.reset_password(email).await?;
                    if !cli.quiet {
                        println!("Password reset email requested for {}", email);
                    }
                }
                AuthAction::UpdatePassword { password } => {
                    let user = auth.update_password(password).await?;
                    if !cli.quiet {
                        println!("Password updated for {}", user.id);
                    }
                }
            }
        }
        Commands::Customers(customers_cmd) => {
            let customers = CustomerService::new(backend);
            match &customers_cmd.action {
                CustomersAction::List {
                    customer_type,
                    search,
                } => {
                    let filters = CustomerFilters {
                        customer_type: customer_type.clone(),
                        search: search.clone(),
                    };
                    let list = customers.list_customers(&filters).await?;
                    emit(format, list.as_slice(), pretty::format_customers);
                }
                CustomersAction::Get { id } => {
                    let customer = customers.get_customer(*id).await?;
                    emit(format, &customer, pretty::format_customer);
                }
                CustomersAction::Create {
                    customer_type,
                    contact_person,
                    contact,
                } => {
                    let request =
                        create_request(customer_type.clone(), contact_person.clone(), contact.clone());
                    let customer = customers.create_customer(request).await?;
                    emit(format, &customer, |c| {
                        format!("Created:\n{}", pretty::format_customer(c))
                    });
                }
                CustomersAction::Update {
                    id,
                    customer_type,
                    contact_person,
                    contact,
                } => {
                    let changes = update_request(
                        customer_type.clone(),
                        contact_person.clone(),
                        contact.clone(),
                    );
                    let customer = customers.update_customer(*id, changes).await?;
                    emit(format, &customer, |c| {
                        format!("Updated:\n{}", pretty::format_customer(c))
                    });
                }
                CustomersAction::Delete { id } => {
                    customers.delete_customer(*id).await?;
                    if !cli.quiet {
                        println!("Deactivated customer {}", id);
                    }
                }
                CustomersAction::Orders { id } => {
                    let orders = customers.customer_orders(*id).await?;
                    emit(format, orders.as_slice(), pretty::format_orders);
                }
                CustomersAction::Invoices { id } => {
                    let invoices = customers.customer_invoices(*id).await?;
                    emit(format, invoices.as_slice(), pretty::format_invoices);
                }
                CustomersAction::Balance {
                    id,
                    amount,
                    operation,
                } => {
                    let customer = customers
                        .update_customer_balance(*id, *amount, (*operation).into())
                        .await?;
                    emit(format, &customer, |c| {
                        format!("Balance updated:\n{}", pretty::format_customer(c))
                    });
                }
            }
        }
        Commands::Images(images_cmd) => {
            let images = ImageService::new(backend, config);
            match &images_cmd.action {
                ImagesAction::Upload {
                    file,
                    outlet_id,
                    content_type,
                } => {
                    let bytes = tokio::fs::read(file)
                        .await
                        .with_context(|| format!("reading {}", file.display()))?;
                    let file_name = file
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let content_type = content_type
                        .clone()
                        .unwrap_or_else(|| guess_content_type(file).to_string());

                    let uploaded = images
                        .upload_image(ImageUpload::new(file_name, content_type, bytes), *outlet_id)
                        .await?;
                    emit(format, &uploaded, |u| format!("Uploaded: {}", u.key));
                }
                ImagesAction::Sign { key, expires_in } => {
                    let url = match expires_in {
                        Some(seconds) => images.signed_url_with_expiry(key, *seconds).await?,
                        None => images.signed_url(key).await?,
                    };
                    emit(format, &url, |u| u.to_string());
                }
                ImagesAction::Delete { key } => {
                    images.delete_image(key).await?;
                    if !cli.quiet {
                        println!("Deleted image {}", key);
                    }
                }
            }
        }
    }

    Ok(())
}
