//! Reply selection and canned payloads.
//!
//! Everything here is pure: the handlers decide what to send by calling
//! [`select_reply`] and the builder functions, then issue the actual
//! Telegram calls themselves.

use std::time::Duration;

use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, InlineQueryResult,
    InlineQueryResultLocation, InputMessageContent, InputMessageContentLocation, KeyboardButton,
    KeyboardMarkup,
};

/// Usage text sent for `/start`.
pub const USAGE: &str = "Usage:\n\
    /inline - send inline keyboard\n\
    /keyboard - send custom keyboard\n\
    /photo    - send a photo\n\
    /request  - request location or contact\n";

/// Prompt attached to both button grids.
pub const CHOOSE_PROMPT: &str = "Choose";

/// Prompt attached to the location/contact request keyboard.
pub const REQUEST_PROMPT: &str = "Who or Where are you?";

/// Simulated latency before the `/inline` grid is sent, standing in for
/// real async work.
pub const INLINE_REPLY_DELAY: Duration = Duration::from_millis(500);

/// Button labels for the 2x2 grids, one inner array per row.
const GRID_LABELS: [[&str; 2]; 2] = [["1.1", "1.2"], ["2.1", "2.2"]];

/// What to send in response to one incoming text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Usage text, clearing any previously attached reply keyboard.
    Usage,
    /// Typing indicator, short delay, then the callback-button grid.
    InlineKeyboard,
    /// The plain reply-keyboard grid.
    CustomKeyboard,
    /// Upload-photo indicator only; the upload path is intentionally inert.
    PhotoAction,
    /// Reply keyboard asking for the user's location or contact card.
    RequestKeyboard,
    /// Echo the text back verbatim.
    Echo(String),
}

/// Pick a reply for a text message. Commands are matched by prefix,
/// case-insensitively, in a fixed order; the first match wins and
/// anything else is echoed.
pub fn select_reply(text: &str) -> Reply {
    if has_prefix(text, "/start") {
        Reply::Usage
    } else if has_prefix(text, "/inline") {
        Reply::InlineKeyboard
    } else if has_prefix(text, "/keyboard") {
        Reply::CustomKeyboard
    } else if has_prefix(text, "/photo") {
        Reply::PhotoAction
    } else if has_prefix(text, "/request") {
        Reply::RequestKeyboard
    } else {
        Reply::Echo(text.to_string())
    }
}

/// ASCII case-insensitive prefix test. `get` returns `None` when the
/// prefix length lands inside a multibyte character, which can never
/// match an ASCII command anyway.
fn has_prefix(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// 2x2 grid of callback buttons; payload is `callback_<label>`.
pub fn inline_keyboard() -> InlineKeyboardMarkup {
    let rows = GRID_LABELS.iter().map(|row| {
        row.iter()
            .map(|label| InlineKeyboardButton::callback(*label, format!("callback_{label}")))
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}

/// 2x2 grid of plain reply-keyboard buttons.
pub fn custom_keyboard() -> KeyboardMarkup {
    let rows = GRID_LABELS.iter().map(|row| {
        row.iter()
            .map(|label| KeyboardButton::new(*label))
            .collect::<Vec<_>>()
    });
    KeyboardMarkup::new(rows)
}

/// One row with a location-request button and a contact-request button.
pub fn request_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new([[
        KeyboardButton::new("Location").request(ButtonRequest::Location),
        KeyboardButton::new("Contact").request(ButtonRequest::Contact),
    ]])
}

/// The fixed inline-query answer: two location results, identical for
/// every query.
pub fn location_results() -> Vec<InlineQueryResult> {
    let spots = [
        ("1", "New York", 40.7058316, -74.2581888),
        ("2", "Berlin", 13.1449577, 52.507629),
    ];

    spots
        .iter()
        .map(|&(id, title, latitude, longitude)| {
            let mut result = InlineQueryResultLocation::new(id, title, latitude, longitude);
            // Message content sent if the user picks this result
            result.input_message_content = Some(InputMessageContent::Location(
                InputMessageContentLocation::new(latitude, longitude),
            ));
            InlineQueryResult::Location(result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn commands_match_case_insensitively() {
        assert_eq!(select_reply("/start"), Reply::Usage);
        assert_eq!(select_reply("/START"), Reply::Usage);
        assert_eq!(select_reply("/Start"), Reply::Usage);
        assert_eq!(select_reply("/KeYbOaRd"), Reply::CustomKeyboard);
    }

    #[test]
    fn commands_match_by_prefix() {
        assert_eq!(select_reply("/start again"), Reply::Usage);
        assert_eq!(select_reply("/inline@demobot"), Reply::InlineKeyboard);
        assert_eq!(select_reply("/photo please"), Reply::PhotoAction);
        assert_eq!(select_reply("/request now"), Reply::RequestKeyboard);
    }

    #[test]
    fn unknown_text_is_echoed_verbatim() {
        assert_eq!(
            select_reply("hello there"),
            Reply::Echo("hello there".to_string())
        );
        // A truncated command is not a command
        assert_eq!(select_reply("/key"), Reply::Echo("/key".to_string()));
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        assert_eq!(select_reply("héllo"), Reply::Echo("héllo".to_string()));
        assert_eq!(select_reply("日本語"), Reply::Echo("日本語".to_string()));
    }

    #[test]
    fn inline_keyboard_carries_callback_payloads() {
        let markup = inline_keyboard();
        let payloads: Vec<String> = markup
            .inline_keyboard
            .iter()
            .flatten()
            .map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                other => panic!("unexpected button kind: {other:?}"),
            })
            .collect();

        assert_eq!(
            payloads,
            vec!["callback_1.1", "callback_1.2", "callback_2.1", "callback_2.2"]
        );
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
    }

    #[test]
    fn custom_keyboard_has_plain_labels() {
        let markup = custom_keyboard();
        let labels: Vec<&str> = markup
            .keyboard
            .iter()
            .flatten()
            .map(|button| button.text.as_str())
            .collect();

        assert_eq!(labels, vec!["1.1", "1.2", "2.1", "2.2"]);
        for button in markup.keyboard.iter().flatten() {
            assert!(button.request.is_none());
        }
    }

    #[test]
    fn request_keyboard_asks_for_location_and_contact() {
        let markup = request_keyboard();
        assert_eq!(markup.keyboard.len(), 1);

        let row = &markup.keyboard[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].text, "Location");
        assert!(matches!(row[0].request, Some(ButtonRequest::Location)));
        assert_eq!(row[1].text, "Contact");
        assert!(matches!(row[1].request, Some(ButtonRequest::Contact)));
    }

    #[test]
    fn location_results_are_fixed() {
        let results = location_results();
        assert_eq!(results.len(), 2);

        match &results[0] {
            InlineQueryResult::Location(location) => {
                assert_eq!(location.id, "1");
                assert_eq!(location.title, "New York");
                assert_eq!(location.latitude, 40.7058316);
                assert_eq!(location.longitude, -74.2581888);
                assert!(location.input_message_content.is_some());
            }
            other => panic!("unexpected result: {other:?}"),
        }

        match &results[1] {
            InlineQueryResult::Location(location) => {
                assert_eq!(location.id, "2");
                assert_eq!(location.title, "Berlin");
                assert_eq!(location.latitude, 13.1449577);
                assert_eq!(location.longitude, 52.507629);
                assert!(location.input_message_content.is_some());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
