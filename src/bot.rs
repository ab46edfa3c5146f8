use anyhow::{Context, Result};
use teloxide::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::handlers;

/// Start the Telegram bot and block until the operator presses Enter
/// (or Ctrl-C).
pub async fn run(config: Config) -> Result<()> {
    let bot = Bot::new(&config.telegram.bot_token);

    let me = bot
        .get_me()
        .await
        .context("Failed to authenticate bot with Telegram")?;
    info!("Bot authenticated as: {} (@{})", me.first_name, me.username());

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handlers::handle_message))
        .branch(Update::filter_edited_message().endpoint(handlers::handle_message))
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback_query))
        .branch(Update::filter_inline_query().endpoint(handlers::handle_inline_query))
        .branch(
            Update::filter_chosen_inline_result().endpoint(handlers::handle_chosen_inline_result),
        );

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("demobot"))
        .enable_ctrlc_handler()
        .build();

    // A single console line stops the receive loop.
    let shutdown = dispatcher.shutdown_token();
    tokio::spawn(async move {
        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        if stdin.read_line(&mut line).await.is_ok() {
            info!("Console input received, stopping dispatcher");
            if let Ok(stopped) = shutdown.shutdown() {
                stopped.await;
            }
        }
    });

    info!("Receiving updates, press Enter to stop");
    dispatcher.dispatch().await;

    info!("Bot stopped");
    Ok(())
}
