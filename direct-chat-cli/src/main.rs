use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use direct_chat::chat::{fetch_history, ChatId, User};
use direct_chat::config::{get_config, Config};
use direct_chat::controller::{Error, Session};
use direct_chat::http::Server;
use direct_chat::logging::Logger;
use direct_chat::CHAT_ROUTE;
use direct_chat::store::{MessageStore, Upstash, UserStore};
use tracing::{error, info, warn};

mod fixtures;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Configuration file [default: direct-chat.toml]")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    subcommands: Subcommands,
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    /// Run the web server.
    Serve {
        #[arg(long, help = "Serve users and chats from this JSON file instead of Upstash")]
        fixtures: Option<PathBuf>,
    },

    /// Print a session cookie for a user, for testing the page by hand.
    Session {
        #[arg(long, help = "User id")]
        id: String,

        #[arg(long, help = "Display name", default_value = "")]
        name: String,

        #[arg(long, help = "Email address", default_value = "")]
        email: String,

        #[arg(long, help = "Profile picture URL")]
        image: Option<String>,

        #[arg(long, help = "Also print the chat page path for a chat with this user")]
        partner: Option<String>,
    },

    /// Print the history of a chat, oldest message first.
    History {
        /// Chat id, e.g. alice--bob.
        chat_id: String,
    },
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    if let Some(ref path) = args.config {
        if let Err(err) = Config::load_file(path).and_then(|config| config.set()) {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }

    Logger::init();

    let result = match args.subcommands {
        Subcommands::Serve { fixtures } => serve(fixtures).await,
        Subcommands::Session {
            id,
            name,
            email,
            image,
            partner,
        } => session(id, name, email, image, partner),
        Subcommands::History { chat_id } => history(&chat_id).await,
    };

    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}

async fn serve(fixtures: Option<PathBuf>) -> Result<(), Error> {
    let (messages, users): (Arc<dyn MessageStore>, Arc<dyn UserStore>) = match fixtures {
        Some(path) => {
            let store = Arc::new(fixtures::load(&path)?);
            (store.clone(), store)
        }
        None => {
            let store = Arc::new(Upstash::from_config(get_config())?);
            (store.clone(), store)
        }
    };

    Server::new(direct_chat::routes(messages, users)?)?
        .launch()
        .await?;

    Ok(())
}

fn session(
    id: String,
    name: String,
    email: String,
    image: Option<String>,
    partner: Option<String>,
) -> Result<(), Error> {
    if get_config().path().is_none() {
        warn!("no configuration file, the cookie is encrypted with a throwaway key");
    }

    if let Some(partner) = partner {
        let chat = ChatId::between(&id, &partner).map_err(Error::new)?;
        info!("chat page: {}", CHAT_ROUTE.replace(":chat_id", chat.as_str()));
    }

    let user = User::new(id, name, email);
    let user = match image {
        Some(image) => user.with_image(image),
        None => user,
    };

    println!("{}", Session::new(user).to_cookie()?);

    Ok(())
}

async fn history(chat_id: &str) -> Result<(), Error> {
    let chat = ChatId::parse(chat_id).map_err(Error::new)?;
    let store = Upstash::from_config(get_config())?;

    let messages = fetch_history(&store, &chat).await.map_err(Error::new)?;

    for message in messages {
        println!("{}", serde_json::to_string(&message)?);
    }

    Ok(())
}
