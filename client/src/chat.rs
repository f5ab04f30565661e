use std::collections::VecDeque;

use chrono::Local;
use neon_draw_protocol::{ChatKind, ChatPayload};

const MAX_LINES: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatLine {
    pub kind: ChatKind,
    pub player: Option<String>,
    pub message: String,
    /// Local receive time, `HH:MM`.
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatFilter {
    #[default]
    All,
    Guesses,
    Chat,
    System,
}

impl ChatFilter {
    pub const ALL: [ChatFilter; 4] = [ChatFilter::All, ChatFilter::Guesses, ChatFilter::Chat, ChatFilter::System];

    pub fn label(&self) -> &'static str {
        match self {
            ChatFilter::All => "All",
            ChatFilter::Guesses => "Guesses",
            ChatFilter::Chat => "Chat",
            ChatFilter::System => "System",
        }
    }

    pub fn admits(&self, kind: ChatKind) -> bool {
        match self {
            ChatFilter::All => true,
            ChatFilter::Guesses => matches!(kind, ChatKind::Guess | ChatKind::CorrectGuess),
            ChatFilter::Chat => kind == ChatKind::Message,
            ChatFilter::System => kind == ChatKind::System,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    lines: VecDeque<ChatLine>,
    filter: ChatFilter,
}

impl ChatLog {
    pub fn push(&mut self, payload: ChatPayload) -> &ChatLine {
        let line = ChatLine {
            kind: payload.kind,
            player: payload.player,
            message: payload.message,
            timestamp: Local::now().format("%H:%M").to_string(),
        };
        if self.lines.len() == MAX_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        &self.lines[self.lines.len() - 1]
    }

    pub fn set_filter(&mut self, filter: ChatFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> ChatFilter {
        self.filter
    }

    pub fn visible(&self) -> impl Iterator<Item = &ChatLine> {
        let filter = self.filter;
        self.lines.iter().filter(move |l| filter.admits(l.kind))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(kind: ChatKind, message: &str) -> ChatPayload {
        ChatPayload { kind, player: Some("Lina".into()), message: message.into(), timestamp: None }
    }

    #[test]
    fn filter_selects_kinds() {
        let mut log = ChatLog::default();
        log.push(payload(ChatKind::System, "Lina joined the room"));
        log.push(payload(ChatKind::Guess, "cat"));
        log.push(payload(ChatKind::CorrectGuess, "guessed the word"));
        log.push(payload(ChatKind::Message, "hello"));

        log.set_filter(ChatFilter::Guesses);
        let msgs: Vec<_> = log.visible().map(|l| l.message.as_str()).collect();
        assert_eq!(msgs, vec!["cat", "guessed the word"]);

        log.set_filter(ChatFilter::System);
        assert_eq!(log.visible().count(), 1);

        log.set_filter(ChatFilter::All);
        assert_eq!(log.visible().count(), 4);
    }

    #[test]
    fn log_is_capped() {
        let mut log = ChatLog::default();
        for i in 0..(MAX_LINES + 5) {
            log.push(payload(ChatKind::Message, &i.to_string()));
        }
        assert_eq!(log.len(), MAX_LINES);
        assert_eq!(log.visible().next().map(|l| l.message.as_str()), Some("5"));
    }

    #[test]
    fn timestamp_is_hours_and_minutes() {
        let mut log = ChatLog::default();
        let line = log.push(payload(ChatKind::Message, "hi"));
        assert_eq!(line.timestamp.len(), 5);
        assert_eq!(&line.timestamp[2..3], ":");
    }
}
