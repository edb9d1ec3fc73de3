use crate::messaging::{ChatRef, MessageSource, Replier};
use crate::replies;
use crate::weather::WeatherLookup;
use anyhow::Result;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Weather { city: Option<String> },
    Stop,
    /// Free text (including unrecognized commands) treated as a city name.
    Lookup { city: String },
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Shutdown(String),
    Silent,
}

/// Maps raw message text to a command. Blank input maps to `None`.
///
/// Command words match case-insensitively. A `/command@botname` mention
/// must name this bot (when the username is known); commands addressed to
/// another bot, like anything else that is not a known command, are handed
/// to the lookup path as-is.
pub fn parse_message(text: &str, bot_username: Option<&str>) -> Option<Command> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut words = text.split_whitespace();
    let first = words.next().unwrap_or_default();

    if let Some(word) = first.strip_prefix('/') {
        let (command, mention) = match word.split_once('@') {
            Some((command, mention)) => (command, Some(mention)),
            None => (word, None),
        };

        let ours = match (mention, bot_username) {
            (Some(mention), Some(username)) => mention.eq_ignore_ascii_case(username),
            _ => true,
        };

        if ours {
            match command.to_lowercase().as_str() {
                "start" => return Some(Command::Start),
                "stop" => return Some(Command::Stop),
                "weather" => {
                    let args: Vec<&str> = words.collect();
                    let city = if args.is_empty() {
                        None
                    } else {
                        Some(args.join(" "))
                    };
                    return Some(Command::Weather { city });
                }
                _ => {}
            }
        }
    }

    Some(Command::Lookup {
        city: text.to_string(),
    })
}

/// Computes the reply for one inbound message.
pub async fn respond(
    text: &str,
    bot_username: Option<&str>,
    weather: &dyn WeatherLookup,
) -> Outcome {
    match parse_message(text, bot_username) {
        None => Outcome::Silent,
        Some(Command::Start) => Outcome::Reply(replies::GREETING.to_string()),
        Some(Command::Stop) => Outcome::Shutdown(replies::STOPPING.to_string()),
        Some(Command::Weather { city: None }) => Outcome::Reply(replies::ASK_CITY.to_string()),
        Some(Command::Weather { city: Some(city) }) | Some(Command::Lookup { city }) => {
            Outcome::Reply(lookup_reply(&city, weather).await)
        }
    }
}

async fn lookup_reply(city: &str, weather: &dyn WeatherLookup) -> String {
    match weather.get_weather(city).await {
        Ok(report) => replies::format_report(city, &report),
        Err(err) => replies::describe_error(&err).to_string(),
    }
}

/// Pulls messages one at a time until the source ends or a stop command
/// arrives. Each message is handled to completion before the next pull.
pub async fn run(
    source: &mut dyn MessageSource,
    replier: &dyn Replier,
    weather: &dyn WeatherLookup,
    bot_username: Option<&str>,
) -> Result<()> {
    while let Some(message) = source.next_message().await? {
        let text = message.text.trim();
        if text.is_empty() {
            continue;
        }

        info!("Received message from chat {}: {}", message.chat.0, text);

        match respond(text, bot_username, weather).await {
            Outcome::Reply(reply) => send(replier, message.chat, &reply).await,
            Outcome::Shutdown(reply) => {
                send(replier, message.chat, &reply).await;
                info!("Stop command received, shutting down");
                break;
            }
            Outcome::Silent => {}
        }
    }

    Ok(())
}

async fn send(replier: &dyn Replier, chat: ChatRef, text: &str) {
    if let Err(err) = replier.reply(chat, text).await {
        error!("Failed to send reply to chat {}: {}", chat.0, err);
    }
}
