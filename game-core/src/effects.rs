use game_types::{ConnectionId, ServerMessage};

/// One outbound event and the connections it goes to
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub targets: Vec<ConnectionId>,
    pub message: ServerMessage,
}

/// What the owner of a room's timer slot must do after a state change.
/// Every command replaces whatever the slot held before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Tick once per second, passing `epoch` back on every tick
    StartCountdown { epoch: u64 },
    /// Begin the next round after the intermission delay
    ScheduleNextRound { epoch: u64 },
    Cancel,
}

/// Everything a room operation wants done outside the room: events to fan out and
/// at most one timer instruction.
#[derive(Debug, Default)]
pub struct Effects {
    pub outbound: Vec<Outbound>,
    pub timer: Option<TimerCommand>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, target: ConnectionId, message: ServerMessage) {
        self.send_to(vec![target], message);
    }

    pub fn send_to(&mut self, targets: Vec<ConnectionId>, message: ServerMessage) {
        if targets.is_empty() {
            return;
        }
        self.outbound.push(Outbound { targets, message });
    }

    pub fn set_timer(&mut self, command: TimerCommand) {
        self.timer = Some(command);
    }

    /// Append `other`; its timer command, if any, wins
    pub fn merge(&mut self, other: Effects) {
        self.outbound.extend(other.outbound);
        if other.timer.is_some() {
            self.timer = other.timer;
        }
    }

    /// Messages addressed to `target`, in send order
    pub fn messages_for(&self, target: ConnectionId) -> Vec<&ServerMessage> {
        self.outbound
            .iter()
            .filter(|outbound| outbound.targets.contains(&target))
            .map(|outbound| &outbound.message)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty() && self.timer.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_to_nobody_is_dropped() {
        let mut effects = Effects::new();
        effects.send_to(vec![], ServerMessage::ClearCanvas);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_merge_keeps_order_and_latest_timer() {
        let alice = ConnectionId::new();
        let bob = ConnectionId::new();

        let mut first = Effects::new();
        first.send(alice, ServerMessage::UpdateTimer(3));
        first.set_timer(TimerCommand::Cancel);

        let mut second = Effects::new();
        second.send_to(vec![alice, bob], ServerMessage::UpdateTimer(2));
        second.set_timer(TimerCommand::ScheduleNextRound { epoch: 4 });

        first.merge(second);
        assert_eq!(
            first.messages_for(alice),
            vec![&ServerMessage::UpdateTimer(3), &ServerMessage::UpdateTimer(2)]
        );
        assert_eq!(first.messages_for(bob).len(), 1);
        assert_eq!(first.timer, Some(TimerCommand::ScheduleNextRound { epoch: 4 }));
    }

    #[test]
    fn test_merge_without_timer_keeps_existing() {
        let mut first = Effects::new();
        first.set_timer(TimerCommand::StartCountdown { epoch: 1 });
        first.merge(Effects::new());
        assert_eq!(first.timer, Some(TimerCommand::StartCountdown { epoch: 1 }));
    }
}
