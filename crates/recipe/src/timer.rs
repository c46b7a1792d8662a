use std::collections::{BTreeMap, BTreeSet};

use recipebox_shared::recipe::Instruction;
use time::{Duration, OffsetDateTime};

/// Per-step progress while cooking: completed steps and running countdowns.
///
/// Each timer is independent. Callers pass `now` so the state stays a plain
/// value without a clock of its own.
#[derive(Debug, Clone, Default)]
pub struct StepTimers {
    completed: BTreeSet<u32>,
    running: BTreeMap<u32, OffsetDateTime>,
}

impl StepTimers {
    pub fn toggle_completed(&mut self, step_number: u32) -> bool {
        if self.completed.remove(&step_number) {
            return false;
        }

        self.completed.insert(step_number);
        true
    }

    pub fn is_completed(&self, step_number: u32) -> bool {
        self.completed.contains(&step_number)
    }

    /// Starts the countdown of a step. Steps without a duration have no timer.
    pub fn start(&mut self, instruction: &Instruction, now: OffsetDateTime) -> bool {
        match instruction.duration {
            Some(minutes) if minutes > 0 => {
                let ends_at = now + Duration::minutes(minutes.into());
                self.running.insert(instruction.step_number, ends_at);
                true
            }
            _ => false,
        }
    }

    pub fn stop(&mut self, step_number: u32) {
        self.running.remove(&step_number);
    }

    pub fn is_running(&self, step_number: u32) -> bool {
        self.running.contains_key(&step_number)
    }

    pub fn remaining(&self, step_number: u32, now: OffsetDateTime) -> Option<Duration> {
        self.running
            .get(&step_number)
            .map(|ends_at| (*ends_at - now).max(Duration::ZERO))
    }

    /// Remaining time as `m:ss`.
    pub fn display(&self, step_number: u32, now: OffsetDateTime) -> Option<String> {
        let remaining = self.remaining(step_number, now)?;
        let seconds = remaining.whole_seconds();

        Some(format!("{}:{:02}", seconds / 60, seconds % 60))
    }

    /// Drops expired timers and returns their step numbers.
    pub fn tick(&mut self, now: OffsetDateTime) -> Vec<u32> {
        let expired: Vec<u32> = self
            .running
            .iter()
            .filter(|(_, ends_at)| **ends_at <= now)
            .map(|(step, _)| *step)
            .collect();

        for step in &expired {
            self.running.remove(step);
            tracing::debug!(step, "step timer finished");
        }

        expired
    }
}
