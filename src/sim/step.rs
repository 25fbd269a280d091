//! State transitions
//!
//! `step` applies one intent to the state and returns the side effects the
//! caller must perform. It never plays sound or touches a real timer itself.

use super::scene::load_level;
use super::state::{GamePhase, GameState};
use crate::audio::SoundCue;
use crate::timer::TimerId;

/// Something the player (or a timer) asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    StartGame,
    ObjectClicked(u32),
    ToggleMute,
    ReturnToMenu,
    TimerFired(TimerId),
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Play(SoundCue),
    SetMuted(bool),
    StartCountdown { timer: TimerId, period_ms: u32 },
    ScheduleAdvance { timer: TimerId, delay_ms: u32 },
    CancelTimer(TimerId),
}

/// Advance the game state by one intent
pub fn step(state: &mut GameState, intent: Intent) -> Vec<Effect> {
    let mut fx = Vec::new();
    match intent {
        Intent::StartGame => start_game(state, &mut fx),
        Intent::ObjectClicked(id) => object_clicked(state, id, &mut fx),
        Intent::ToggleMute => {
            state.muted = !state.muted;
            fx.push(Effect::SetMuted(state.muted));
        }
        Intent::ReturnToMenu => {
            if matches!(state.phase, GamePhase::Won | GamePhase::GameOver) {
                cancel_timers(state, &mut fx);
                state.phase = GamePhase::Menu;
                log::info!("Back to menu");
            }
        }
        Intent::TimerFired(timer) => {
            if state.countdown == Some(timer) {
                countdown_tick(state, &mut fx);
            } else if state.pending_advance == Some(timer) {
                state.pending_advance = None;
                fx.push(Effect::CancelTimer(timer));
                advance_level(state, &mut fx);
            } else {
                log::debug!("Ignoring stale timer {:?}", timer);
            }
        }
    }
    fx
}

fn cancel_timers(state: &mut GameState, fx: &mut Vec<Effect>) {
    if let Some(timer) = state.countdown.take() {
        fx.push(Effect::CancelTimer(timer));
    }
    if let Some(timer) = state.pending_advance.take() {
        fx.push(Effect::CancelTimer(timer));
    }
}

fn start_countdown(state: &mut GameState, fx: &mut Vec<Effect>) {
    let timer = state.next_timer_id();
    state.countdown = Some(timer);
    fx.push(Effect::StartCountdown {
        timer,
        period_ms: state.rules.tick_interval_ms,
    });
}

/// Enter level `index` with a fresh clock
fn enter_level(state: &mut GameState, index: usize, fx: &mut Vec<Effect>) -> bool {
    cancel_timers(state, fx);
    if !load_level(state, index) {
        return false;
    }
    start_countdown(state, fx);
    true
}

fn start_game(state: &mut GameState, fx: &mut Vec<Effect>) {
    if state.phase == GamePhase::Playing {
        return;
    }
    state.score = 0;
    if enter_level(state, 0, fx) {
        log::info!("Mission started (seed {})", state.seed);
    } else {
        log::warn!("No levels configured");
    }
}

fn countdown_tick(state: &mut GameState, fx: &mut Vec<Effect>) {
    if state.phase != GamePhase::Playing {
        cancel_timers(state, fx);
        return;
    }
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        cancel_timers(state, fx);
        state.phase = GamePhase::GameOver;
        log::info!(
            "Time up on level {} with {} targets left, score {}",
            state.level_index + 1,
            state.targets_remaining(),
            state.score
        );
    }
}

fn object_clicked(state: &mut GameState, id: u32, fx: &mut Vec<Effect>) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let Some(obj) = state.objects.iter_mut().find(|o| o.id == id) else {
        return;
    };

    if !obj.is_target {
        fx.push(Effect::Play(SoundCue::Error));
        state.time_left = state
            .time_left
            .saturating_sub(state.rules.clutter_penalty_secs);
        log::debug!("Clutter {} clicked, {}s left", id, state.time_left);
        return;
    }
    if obj.found {
        return;
    }

    obj.found = true;
    if let Some(entry) = state.targets.iter_mut().find(|t| t.id == id) {
        entry.found = true;
    }
    state.score = state.score.saturating_add(state.rules.target_reward);
    fx.push(Effect::Play(SoundCue::Success));
    log::debug!("Target {} found, score {}", id, state.score);

    if state.targets_remaining() == 0 {
        if let Some(timer) = state.countdown.take() {
            fx.push(Effect::CancelTimer(timer));
        }
        let timer = state.next_timer_id();
        state.pending_advance = Some(timer);
        fx.push(Effect::ScheduleAdvance {
            timer,
            delay_ms: state.rules.advance_delay_ms,
        });
        log::info!("Level {} cleared", state.level_index + 1);
    }
}

fn advance_level(state: &mut GameState, fx: &mut Vec<Effect>) {
    fx.push(Effect::Play(SoundCue::Fanfare));
    let next = state.level_index + 1;
    if next < state.levels.len() && enter_level(state, next, fx) {
        return;
    }
    cancel_timers(state, fx);
    state.phase = GamePhase::Won;
    log::info!("All missions complete, final score {}", state.score);
}
