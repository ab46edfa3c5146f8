//! The per-update handlers wired into the dispatcher.

use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatAction, ChosenInlineResult, InlineQuery, ReplyMarkup};
use tracing::info;

use crate::replies::{self, Reply};

/// Handle new and edited text messages. Non-text updates are ignored.
pub async fn handle_message(bot: Bot, msg: Message) -> ResponseResult<()> {
    let text = match msg.text() {
        Some(t) => t,
        None => return Ok(()),
    };

    let sender = msg
        .from
        .as_ref()
        .map(|user| user.first_name.as_str())
        .unwrap_or("<unknown>");
    info!("Message from {}: {}", sender, text);

    match replies::select_reply(text) {
        Reply::Usage => {
            bot.send_message(msg.chat.id, replies::USAGE)
                .reply_markup(ReplyMarkup::kb_remove())
                .await?;
        }
        Reply::InlineKeyboard => {
            bot.send_chat_action(msg.chat.id, ChatAction::Typing).await?;

            // Simulate longer running work before answering
            tokio::time::sleep(replies::INLINE_REPLY_DELAY).await;

            bot.send_message(msg.chat.id, replies::CHOOSE_PROMPT)
                .reply_markup(replies::inline_keyboard())
                .await?;
        }
        Reply::CustomKeyboard => {
            bot.send_message(msg.chat.id, replies::CHOOSE_PROMPT)
                .reply_markup(replies::custom_keyboard())
                .await?;
        }
        Reply::PhotoAction => {
            bot.send_chat_action(msg.chat.id, ChatAction::UploadPhoto)
                .await?;
        }
        Reply::RequestKeyboard => {
            bot.send_message(msg.chat.id, replies::REQUEST_PROMPT)
                .reply_markup(replies::request_keyboard())
                .await?;
        }
        Reply::Echo(text) => {
            bot.send_message(msg.chat.id, text).await?;
        }
    }

    Ok(())
}

/// Acknowledge an inline-keyboard button press with a transient
/// notification echoing the button's payload.
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery) -> ResponseResult<()> {
    let data = query.data.unwrap_or_default();
    info!("Callback query from {}: {}", query.from.first_name, data);

    let mut req = bot.answer_callback_query(query.id);
    req.text = Some(format!("Received {data}"));
    req.await?;

    Ok(())
}

/// Answer every inline query with the same two location results.
pub async fn handle_inline_query(bot: Bot, query: InlineQuery) -> ResponseResult<()> {
    info!("Inline query from {}: {}", query.from.first_name, query.query);

    let mut req = bot.answer_inline_query(query.id, replies::location_results());
    req.cache_time = Some(0);
    req.is_personal = Some(true);
    req.await?;

    Ok(())
}

/// Informational only; no outbound call.
pub async fn handle_chosen_inline_result(result: ChosenInlineResult) -> ResponseResult<()> {
    info!("Chosen inline result: {}", result.result_id);
    Ok(())
}
