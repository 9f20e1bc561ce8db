//! Message formatting: string-table lookups, `{N}` argument substitution and
//! `[label](target)` link markup.

use regex_lite::Regex;
use sarif_explorer_schema::Message;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::model::FormattedMessage;
use crate::model::Location;
use crate::model::MessageSegment;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"\{(\d+)\}"));

fn compile_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid regex literal {pattern}: {err}"))
}

/// Message-string dictionaries consulted, in order, for `messageId` lookups.
pub type StringTable = BTreeMap<String, String>;

/// Find `id` in the first table that defines it.
pub fn lookup_message_string<'a>(id: &str, tables: &[&'a StringTable]) -> Option<&'a str> {
    tables
        .iter()
        .copied()
        .find_map(|table| table.get(id))
        .map(String::as_str)
}

/// Format a SARIF message.
///
/// Inline `text` wins; otherwise `messageId` is looked up in `tables`. Returns
/// `None` when neither yields a string. Link targets are resolved against
/// `candidates`.
pub fn format_message(
    message: &Message,
    tables: &[&StringTable],
    candidates: &[Option<Location>],
) -> Option<FormattedMessage> {
    let raw = match (&message.text, &message.message_id) {
        (Some(text), _) => text.as_str(),
        (None, Some(id)) => match lookup_message_string(id, tables) {
            Some(text) => text,
            None => {
                debug!("Message id {id} not found in any string table");
                return None;
            }
        },
        (None, None) => return None,
    };

    let arguments = message.arguments.as_deref().unwrap_or_default();
    Some(format_text(raw, arguments, candidates))
}

/// Substitute arguments into `text` and parse its link markup.
pub fn format_text(text: &str, arguments: &[String], candidates: &[Option<Location>]) -> FormattedMessage {
    let substituted = substitute_arguments(text, arguments);
    let segments = parse_segments(&substituted, candidates);
    let text = segments.iter().map(MessageSegment::text).collect();
    FormattedMessage { text, segments }
}

/// Replace `{N}` with `arguments[N]`. Out-of-range placeholders are kept.
pub fn substitute_arguments(text: &str, arguments: &[String]) -> String {
    if arguments.is_empty() {
        return text.to_string();
    }

    PLACEHOLDER_RE
        .replace_all(text, |caps: &regex_lite::Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| arguments.get(index))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn parse_segments(text: &str, candidates: &[Option<Location>]) -> Vec<MessageSegment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '\\' if rest[1..].starts_with(['[', ']']) => {
                plain.push_str(&rest[1..2]);
                rest = &rest[2..];
            }
            '[' => match split_link(rest) {
                Some((label, target, consumed)) => {
                    match resolve_link(&label, target, candidates) {
                        Some(link) => {
                            flush_plain(&mut plain, &mut segments);
                            segments.push(link);
                        }
                        None => plain.push_str(&rest[..consumed]),
                    }
                    rest = &rest[consumed..];
                }
                None => {
                    plain.push('[');
                    rest = &rest[1..];
                }
            },
            _ => {
                plain.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    flush_plain(&mut plain, &mut segments);
    segments
}

fn flush_plain(plain: &mut String, segments: &mut Vec<MessageSegment>) {
    if !plain.is_empty() {
        segments.push(MessageSegment::Text {
            text: std::mem::take(plain),
        });
    }
}

/// Split `[label](target)` at the start of `input`. Returns the unescaped
/// label, the target and the number of bytes consumed.
fn split_link(input: &str) -> Option<(String, &str, usize)> {
    let mut label = String::new();
    let mut chars = input.char_indices().skip(1);
    let label_end = loop {
        let (index, ch) = chars.next()?;
        match ch {
            '\\' => {
                let (_, escaped) = chars.next()?;
                if !matches!(escaped, '[' | ']') {
                    label.push('\\');
                }
                label.push(escaped);
            }
            '[' => return None,
            ']' => break index,
            _ => label.push(ch),
        }
    };

    let after = &input[label_end + 1..];
    let target_body = after.strip_prefix('(')?;
    let close = target_body.find(')')?;
    let target = &target_body[..close];
    let consumed = label_end + 1 + 1 + close + 1;
    Some((label, target, consumed))
}

fn resolve_link(label: &str, target: &str, candidates: &[Option<Location>]) -> Option<MessageSegment> {
    let target = target.trim();

    if let Ok(id) = target.parse::<i64>() {
        let by_id = candidates
            .iter()
            .flatten()
            .find(|location| location.id == Some(id));
        let by_position = usize::try_from(id)
            .ok()
            .and_then(|index| candidates.get(index))
            .and_then(Option::as_ref);
        return match by_id.or(by_position) {
            Some(location) => Some(MessageSegment::LocationLink {
                text: label.to_string(),
                location: Box::new(location.clone()),
            }),
            None => {
                debug!("Message link target {id} does not match any location");
                None
            }
        };
    }

    Url::parse(target).ok().map(|uri| MessageSegment::UriLink {
        text: label.to_string(),
        uri: uri.to_string(),
    })
}
