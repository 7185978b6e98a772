//! `snip`: manage saved shell commands from the terminal.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use client::{
    ApiClient, CommandCache, CommandsController,
    api::DEFAULT_BASE_URL,
    cache::{DEFAULT_MIN_SEARCH, DEFAULT_PAGE_SIZE},
    controller::SystemClipboard,
    notification::ToastKind,
};
use dialoguer::Confirm;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "snip", about = "Saved shell commands")]
struct Cli {
    /// Base URL of the server
    #[arg(long, env = "SNIP_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// List commands, optionally filtered
    List {
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Save a new command
    Add { description: String, command: String },
    /// Change the description and/or command text
    Edit {
        id: i64,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        command: Option<String>,
    },
    /// Delete a command
    Rm {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Copy a command to the clipboard
    Copy { id: i64 },
}

type Controller = CommandsController<ApiClient, SystemClipboard>;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut api = ApiClient::new(cli.url);
    if !matches!(cli.command, Cmd::List { .. }) {
        api.fetch_csrf_token().await?;
    }

    let page_size = match &cli.command {
        Cmd::List { page_size, .. } => *page_size,
        _ => DEFAULT_PAGE_SIZE,
    };
    let mut controller = Controller::new(
        api,
        CommandCache::new(page_size, DEFAULT_MIN_SEARCH),
        SystemClipboard,
    );

    let ok = controller.load().await && run(&mut controller, cli.command).await?;
    print_toasts(&mut controller);

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run(controller: &mut Controller, command: Cmd) -> anyhow::Result<bool> {
    let ok = match command {
        Cmd::List { query, page, .. } => {
            if let Some(query) = query {
                controller.search(&query);
            }
            if page != 1 && !controller.go_to_page(page) {
                eprintln!(
                    "page {page} out of range (1-{})",
                    controller.cache().total_pages()
                );
            }
            print_page(controller.cache());
            true
        }
        Cmd::Add {
            description,
            command,
        } => controller.create(&description, &command).await,
        Cmd::Edit {
            id,
            description,
            command,
        } => {
            let Some(existing) = controller.cache().find(id).cloned() else {
                eprintln!("Commande non trouvée");
                return Ok(false);
            };
            let description = description.unwrap_or(existing.description);
            let command = command.unwrap_or(existing.command);
            controller.update(id, &description, &command).await
        }
        Cmd::Rm { id, yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("Voulez-vous vraiment supprimer cette commande ?")
                    .default(false)
                    .interact()?;
            if !confirmed {
                return Ok(true);
            }
            controller.delete(id).await
        }
        Cmd::Copy { id } => controller.copy(id),
    };
    Ok(ok)
}

fn print_page(cache: &CommandCache) {
    if cache.filtered().is_empty() {
        println!("Aucune commande trouvée.");
        return;
    }

    for command in cache.visible() {
        println!("{:>5}  {}", command.id, command.description);
        println!("       $ {}", command.command);
    }
    println!();
    println!(
        "{} · page {}/{} · {}",
        cache.results_info(),
        cache.page(),
        cache.total_pages(),
        cache.total_label()
    );
}

fn print_toasts(controller: &mut Controller) {
    for toast in controller.notifications_mut().drain() {
        match toast.kind {
            ToastKind::Success => println!("{}", toast.message),
            ToastKind::Error => eprintln!("error: {}", toast.message),
        }
    }
}
