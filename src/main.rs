//! linkbio - link-in-bio profile pages from the terminal
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use linkbio::{commands, HeadlessEvent, NewLink, RenderRequest};
use linkbio_app::config::load_settings;
use linkbio_core::{LayoutType, LinkDisplay};
use tracing::{error, info};

/// linkbio - render, preview and edit link-in-bio profiles
#[derive(Parser, Debug)]
#[command(name = "linkbio")]
#[command(about = "Render, preview and edit link-in-bio profiles", long_about = None)]
struct Args {
    /// Project directory holding .linkbio/ (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal preview of a profile document
    Preview {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print a profile document's render tree as JSON
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Viewport width in columns
        #[arg(long)]
        width: Option<u16>,

        /// Render with this layout instead of the stored one
        #[arg(long, value_parser = ["links", "bento", "mixed"])]
        layout: Option<String>,
    },

    /// Print the public page for a username from the project's profile store
    Page {
        #[arg(value_name = "USERNAME")]
        username: String,

        #[arg(long)]
        width: Option<u16>,
    },

    /// Edit a profile document's links
    Links {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(subcommand)]
        action: LinksCommand,
    },

    /// Create .linkbio/config.toml with defaults
    Init,
}

#[derive(Subcommand, Debug)]
enum LinksCommand {
    List,
    Add {
        title: String,
        url: String,

        /// Icon key (github, mail, ...); unknown keys render as a plain link
        #[arg(long)]
        icon: Option<String>,

        #[arg(long, value_parser = ["both", "icon", "title"])]
        display: Option<String>,

        #[arg(long)]
        photo: Option<String>,
    },
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    linkbio_core::logging::init()?;

    let args = Args::parse();
    let project = args
        .project
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    info!("Project: {}", project.display());

    let result = run(&project, args.command).await;
    if let Err(ref e) = result {
        error!("Command failed: {}", e);
        HeadlessEvent::error(e.user_message(), e.is_fatal()).emit();
    }
    info!("linkbio exiting");
    Ok(result?)
}

async fn run(project: &Path, command: Command) -> linkbio_core::Result<()> {
    let settings = load_settings(project);

    let event = match command {
        Command::Preview { file } => {
            return linkbio_tui::run_preview(&file, project, settings).await;
        }
        Command::Render {
            file,
            width,
            layout,
        } => {
            let request = RenderRequest {
                width,
                layout: layout.as_deref().map(LayoutType::parse),
            };
            commands::render_document(&file, &settings, request)?
        }
        Command::Page { username, width } => {
            commands::render_page(project, &settings, &username, width).await
        }
        Command::Links { file, action } => match action {
            LinksCommand::List => commands::list_links(&file)?,
            LinksCommand::Add {
                title,
                url,
                icon,
                display,
                photo,
            } => {
                let new = NewLink {
                    title,
                    url,
                    icon,
                    display: display.as_deref().map(LinkDisplay::parse),
                    photo_url: photo,
                };
                commands::add_link(&file, new).await?
            }
            LinksCommand::Remove { id } => commands::remove_link(&file, &id).await?,
        },
        Command::Init => commands::init_project(project)?,
    };

    event.emit();
    Ok(())
}
