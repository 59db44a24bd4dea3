/// Entry point and frame loop.
///
/// Each frame: sample keyboard + gamepad once, `App::update`, play queued
/// sounds, `App::draw`. Device events are drained between frames so short
/// taps are not lost.

mod app;
mod config;
mod input;
mod logging;
mod screens;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use anyhow::Context;

use app::App;
use config::GameConfig;
use screens::{MenuScreen, Screen};
use sim::game::Game;
use ui::gamepad::GamepadState;
use ui::keyboard::{KeyBindings, Keyboard};
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(2);

fn main() -> anyhow::Result<()> {
    logging::init()?;
    let config = GameConfig::load();

    let mut keyboard = Keyboard::new(KeyBindings::from_config(&config.keys));
    let mut gamepad = GamepadState::new();
    gamepad.load_button_config(&config.gamepad);
    let sound = if config.general.sound { SoundEngine::new() } else { None };

    let mut renderer = Renderer::new();
    // init can fail after raw mode is already on
    let init = renderer.init();
    or_undo(init, || restore_terminal(&mut renderer)).context("terminal init failed")?;
    keyboard.enable_release_events();

    let result = run(&mut renderer, &mut keyboard, &mut gamepad, sound.as_ref(), &config);

    keyboard.disable_release_events();
    restore_terminal(&mut renderer);

    let score = result?;
    println!();
    println!("Thanks for playing Cavern!");
    println!("Last score: {score}");
    Ok(())
}

fn restore_terminal(renderer: &mut Renderer) {
    if let Err(e) = renderer.cleanup() {
        log::error!("terminal cleanup failed: {e}");
    }
}

/// Run `undo` when `result` is an error, then hand the result back.
fn or_undo<T, E>(result: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

/// Run frames until the player quits. Returns the last session's score.
fn run(
    renderer: &mut Renderer,
    keyboard: &mut Keyboard,
    gamepad: &mut GamepadState,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> anyhow::Result<u32> {
    use sim::Session;

    let mut app: App<Game> = App::with_screen(Screen::Menu(MenuScreen::new()));
    let tick_rate = Duration::from_millis(config.general.tick_rate_ms);
    let mut last_tick = Instant::now();

    if gamepad.connected {
        log::info!("gamepad detected");
    }

    loop {
        keyboard.drain_events();
        gamepad.poll();

        if keyboard.quit_requested() {
            log::info!("quit requested");
            let score = app.screen().map_or(0, |s| s.session().status().score);
            return Ok(score);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();

            let raw = keyboard.sample().merge(gamepad.sample());
            app.update(&raw);

            for name in app.drain_sounds() {
                if let Some(sfx) = sound {
                    sfx.play(name);
                }
            }

            renderer.begin_frame().context("render failed")?;
            app.draw(&mut *renderer);
            renderer.end_frame().context("render failed")?;
        }

        std::thread::sleep(FRAME_SLEEP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_setup_is_undone() {
        let mut undone = false;
        let r: Result<(), &str> = or_undo(Err("no tty"), || undone = true);
        assert_eq!(r, Err("no tty"));
        assert!(undone);
    }

    #[test]
    fn successful_setup_is_kept() {
        let mut undone = false;
        let r: Result<u8, &str> = or_undo(Ok(7), || undone = true);
        assert_eq!(r, Ok(7));
        assert!(!undone);
    }
}
