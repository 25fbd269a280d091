//! Game controller
//!
//! Owns the session state, the sound engine and the scheduler, and carries
//! out the effects each transition asks for.

use crate::audio::{SoundEngine, ToneBackend};
use crate::settings::GameSettings;
use crate::sim::{Effect, GameState, Intent, step};
use crate::timer::{ManualScheduler, Scheduler, TimerId};
use crate::ui::{self, Node};

pub struct Game<B: ToneBackend, S: Scheduler> {
    state: GameState,
    sound: SoundEngine<B>,
    scheduler: S,
}

impl<B: ToneBackend, S: Scheduler> Game<B, S> {
    pub fn new(seed: u64, settings: &GameSettings, backend: B, scheduler: S) -> Self {
        let mut state = GameState::new(seed, settings.rules);
        state.muted = settings.audio.start_muted;

        let mut sound = SoundEngine::new(backend);
        sound.set_volume(settings.audio.master_volume);
        sound.set_muted(state.muted);

        Self {
            state,
            sound,
            scheduler,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn sound(&self) -> &SoundEngine<B> {
        &self.sound
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Apply an intent and run its effects
    pub fn dispatch(&mut self, intent: Intent) {
        for effect in step(&mut self.state, intent) {
            self.apply(effect);
        }
    }

    /// Timer callback entry point
    pub fn timer_fired(&mut self, timer: TimerId) {
        self.dispatch(Intent::TimerFired(timer));
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Play(cue) => self.sound.play(cue),
            Effect::SetMuted(muted) => self.sound.set_muted(muted),
            Effect::StartCountdown { timer, period_ms } => {
                self.scheduler.start_interval(timer, period_ms)
            }
            Effect::ScheduleAdvance { timer, delay_ms } => {
                self.scheduler.start_timeout(timer, delay_ms)
            }
            Effect::CancelTimer(timer) => self.scheduler.cancel(timer),
        }
    }

    /// Current screen as a view tree
    pub fn view(&self) -> Node {
        ui::render(&self.state)
    }
}

impl<B: ToneBackend> Game<B, ManualScheduler> {
    /// Run the virtual clock forward, firing every timer that comes due
    pub fn advance_time(&mut self, ms: u64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some(timer) = self.scheduler.pop_due(until) {
            self.timer_fired(timer);
        }
        self.scheduler.settle(until);
    }
}
