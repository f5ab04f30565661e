/// How close the countdown is to running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// More than 30 seconds left.
    Normal,
    /// 30 seconds or less.
    Warning,
    /// 10 seconds or less.
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerDisplay {
    pub text: String,
    pub urgency: Urgency,
    pub pulsing: bool,
}

/// What happened on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running,
    Expired,
}

/// Per-turn countdown. The server owns the real clock; this only animates
/// the seconds between pushes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: i64,
    running: bool,
    pulsing: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self { remaining: 80, running: false, pulsing: false }
    }
}

impl Countdown {
    pub fn start(&mut self, duration: u32) {
        self.stop();
        self.remaining = i64::from(duration);
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.pulsing = false;
    }

    /// Overwrite the value from a server snapshot without touching the
    /// ticking state.
    pub fn sync(&mut self, remaining: u32) {
        self.remaining = i64::from(remaining);
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining -= 1;
        if self.remaining <= 0 {
            self.stop();
            return TickOutcome::Expired;
        }
        if self.remaining <= 10 {
            self.pulsing = true;
        }
        TickOutcome::Running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn display(&self) -> TimerDisplay {
        let urgency = if self.remaining <= 10 {
            Urgency::Critical
        } else if self.remaining <= 30 {
            Urgency::Warning
        } else {
            Urgency::Normal
        };
        TimerDisplay {
            text: format!("{}s", self.remaining),
            urgency,
            pulsing: self.pulsing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires() {
        let mut c = Countdown::default();
        assert_eq!(c.tick(), TickOutcome::Idle);

        c.start(2);
        assert_eq!(c.display().text, "2s");
        assert_eq!(c.tick(), TickOutcome::Running);
        assert_eq!(c.tick(), TickOutcome::Expired);
        assert!(!c.is_running());
        assert_eq!(c.tick(), TickOutcome::Idle);
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn colour_thresholds() {
        let mut c = Countdown::default();
        c.sync(31);
        assert_eq!(c.display().urgency, Urgency::Normal);
        c.sync(30);
        assert_eq!(c.display().urgency, Urgency::Warning);
        c.sync(10);
        assert_eq!(c.display().urgency, Urgency::Critical);
    }

    #[test]
    fn pulse_starts_late_and_clears_on_stop() {
        let mut c = Countdown::default();
        c.start(12);
        c.tick();
        assert!(!c.display().pulsing);
        c.tick();
        assert!(c.display().pulsing);
        c.start(60);
        assert!(!c.display().pulsing);
    }
}
