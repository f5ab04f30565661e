use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeKind::Success => "✔",
            NoticeKind::Error => "✖",
            NoticeKind::Warning => "⚠",
            NoticeKind::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub kind: NoticeKind,
    pub created: Instant,
}

#[derive(Debug, Default, Clone)]
pub struct Notifications {
    items: Vec<Notice>,
    next_id: u64,
}

impl Notifications {
    pub fn push<S: Into<String>>(&mut self, message: S, kind: NoticeKind) -> u64 {
        self.push_at(message, kind, Instant::now())
    }

    pub fn push_at<S: Into<String>>(&mut self, message: S, kind: NoticeKind, now: Instant) -> u64 {
        self.next_id += 1;
        let message = message.into();
        tracing::debug!(?kind, %message, "notification");
        self.items.push(Notice { id: self.next_id, message, kind, created: now });
        self.next_id
    }

    /// Drop every toast older than [`TOAST_TTL`].
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| now.saturating_duration_since(n.created) < TOAST_TTL);
    }

    pub fn visible(&self) -> &[Notice] {
        &self.items
    }

    /// Toasts with an id above `seen`, oldest first.
    pub fn since(&self, seen: u64) -> impl Iterator<Item = &Notice> {
        self.items.iter().filter(move |n| n.id > seen)
    }

    pub fn last(&self) -> Option<&Notice> {
        self.items.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let mut n = Notifications::default();
        let t0 = Instant::now();
        n.push_at("first", NoticeKind::Info, t0);
        n.push_at("second", NoticeKind::Error, t0 + Duration::from_secs(2));

        n.prune(t0 + Duration::from_millis(2999));
        assert_eq!(n.visible().len(), 2);

        n.prune(t0 + Duration::from_secs(3));
        assert_eq!(n.visible().len(), 1);
        assert_eq!(n.visible()[0].message, "second");
    }

    #[test]
    fn since_skips_seen_ids() {
        let mut n = Notifications::default();
        let a = n.push("a", NoticeKind::Info);
        n.push("b", NoticeKind::Success);
        let fresh: Vec<_> = n.since(a).map(|x| x.message.as_str()).collect();
        assert_eq!(fresh, vec!["b"]);
    }
}
