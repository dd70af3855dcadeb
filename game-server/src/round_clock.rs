use game_core::TimerCommand;
use game_types::RoomId;
use std::collections::HashMap;
use std::sync::Weak;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::game_manager::GameManager;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the timer task of every room. At most one task per room is alive;
/// installing a new one aborts the previous.
#[derive(Debug)]
pub struct RoundClock {
    timers: HashMap<RoomId, JoinHandle<()>>,
    intermission: Duration,
}

impl RoundClock {
    pub fn new(intermission: Duration) -> Self {
        Self {
            timers: HashMap::new(),
            intermission,
        }
    }

    pub fn apply(&mut self, room_id: &str, command: TimerCommand, manager: Weak<GameManager>) {
        match command {
            TimerCommand::StartCountdown { epoch } => self.start_countdown(room_id, epoch, manager),
            TimerCommand::ScheduleNextRound { epoch } => {
                self.schedule_next_round(room_id, epoch, manager)
            }
            TimerCommand::Cancel => {
                self.cancel(room_id);
            }
        }
    }

    fn start_countdown(&mut self, room_id: &str, epoch: u64, manager: Weak<GameManager>) {
        let room = room_id.to_string();
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
            loop {
                interval.tick().await;
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                if !manager.tick_room(&room, epoch).await {
                    break;
                }
            }
            debug!("Countdown {} for room {} stopped", epoch, room);
        });
        self.install(room_id, task);
    }

    fn schedule_next_round(&mut self, room_id: &str, epoch: u64, manager: Weak<GameManager>) {
        let room = room_id.to_string();
        let delay = self.intermission;
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            if let Some(manager) = manager.upgrade() {
                manager.begin_scheduled_round(&room, epoch).await;
            }
        });
        self.install(room_id, task);
    }

    fn install(&mut self, room_id: &str, task: JoinHandle<()>) {
        if let Some(previous) = self.timers.insert(room_id.to_string(), task) {
            previous.abort();
        }
    }

    /// Stop the room's timer. Safe to call when nothing is running.
    pub fn cancel(&mut self, room_id: &str) -> bool {
        match self.timers.remove(room_id) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, room_id: &str) -> bool {
        self.timers
            .get(room_id)
            .is_some_and(|task| !task.is_finished())
    }
}
