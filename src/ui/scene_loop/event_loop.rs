use std::{
    error::Error,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::controller::{GenerationCompletion, SceneController, SubmitOutcome};
use crate::ui::renderer::{ui, FrameLayout};
use crate::ui::theme::Theme;

use super::keybindings::{resolve_key, resolve_mouse, KeyContext, UiAction};
use super::lifecycle::SceneTerminal;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

type CompletionSender = mpsc::UnboundedSender<GenerationCompletion>;

fn key_context(controller: &SceneController) -> KeyContext {
    KeyContext {
        focus: controller.focus(),
        notice_open: controller.notice().is_some(),
        triggers_wired: controller.accepts_triggers(),
        button_enabled: !controller.is_loading(),
    }
}

/// Start a generation in the background. The completion, carrying the
/// in-flight guard, comes back through `tx`.
fn spawn_generation(controller: &mut SceneController, tx: &CompletionSender) {
    match controller.begin_submit() {
        SubmitOutcome::Started(pending) => {
            let tx = tx.clone();
            tokio::spawn(async move {
                let completion = pending.run().await;
                if tx.send(completion).is_err() {
                    debug!("Scene loop exited before generation completed");
                }
            });
        }
        SubmitOutcome::Rejected(reason) => {
            debug!(?reason, "Submit rejected");
        }
    }
}

/// Returns `false` when the loop should exit.
fn apply_action(controller: &mut SceneController, action: UiAction, tx: &CompletionSender) -> bool {
    match action {
        UiAction::Quit => return false,
        UiAction::Submit => spawn_generation(controller, tx),
        UiAction::DismissNotice => controller.dismiss_notice(),
        UiAction::ToggleFocus => controller.toggle_focus(),
        UiAction::FocusInput => controller.focus_input(),
        UiAction::ScrollUp(lines) => controller.scroll_up(lines),
        UiAction::ScrollDown(lines) => controller.scroll_down(lines),
        UiAction::Edit(key) => {
            controller
                .textarea_mut()
                .input(tui_textarea::Input::from(key));
        }
        UiAction::Ignore => {}
    }
    true
}

pub(super) async fn drive(
    terminal: &mut SceneTerminal,
    mut controller: SceneController,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<GenerationCompletion>();
    let mut layout = FrameLayout::default();
    let mut loading_since: Option<Instant> = None;

    info!("Scene UI started");

    loop {
        match (controller.is_loading(), loading_since) {
            (true, None) => loading_since = Some(Instant::now()),
            (false, Some(_)) => loading_since = None,
            _ => {}
        }
        let loading_for = loading_since.map(|t| t.elapsed()).unwrap_or_default();

        terminal.draw(|f| {
            layout = ui(f, &controller, theme, loading_for);
        })?;
        controller.clamp_scroll(layout.result_max_scroll);

        if event::poll(POLL_INTERVAL)? {
            let ctx = key_context(&controller);
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => resolve_key(&key, ctx),
                Event::Mouse(mouse) => resolve_mouse(&mouse, layout.button, layout.input, ctx),
                Event::Paste(text) if ctx.notice_open => {
                    debug!(len = text.len(), "Dropping paste while notice is open");
                    UiAction::Ignore
                }
                Event::Paste(text) => {
                    controller.focus_input();
                    controller.textarea_mut().insert_str(text);
                    UiAction::Ignore
                }
                _ => UiAction::Ignore,
            };

            if !apply_action(&mut controller, action, &tx) {
                break;
            }
        }

        while let Ok(completion) = rx.try_recv() {
            controller.finish(completion);
        }

        // Let spawned generations make progress on this worker.
        tokio::task::yield_now().await;
    }

    info!("Scene UI exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::{Focus, ResultEntry};
    use crate::utils::test_utils::ScriptedGenerator;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;

    fn controller(text: &str) -> SceneController {
        SceneController::new(Arc::new(ScriptedGenerator::succeeding(text)))
    }

    #[tokio::test]
    async fn submit_action_spawns_generation_and_completion_is_applied() {
        let mut controller = controller("INT. KITCHEN - DAY");
        controller.set_input_text("Breakfast goes wrong.");
        let (tx, mut rx) = mpsc::unbounded_channel();

        assert!(apply_action(&mut controller, UiAction::Submit, &tx));
        assert!(controller.is_loading());

        let completion = rx.recv().await.expect("completion");
        controller.finish(completion);

        assert!(!controller.is_loading());
        assert_eq!(
            controller.entries(),
            &[ResultEntry::Scene("INT. KITCHEN - DAY".to_string())]
        );
    }

    #[tokio::test]
    async fn repeated_submit_before_completion_spawns_once() {
        let generator = Arc::new(ScriptedGenerator::succeeding("SCENE"));
        let mut controller = SceneController::new(generator.clone());
        controller.set_input_text("Two triggers race.");
        let (tx, mut rx) = mpsc::unbounded_channel();

        apply_action(&mut controller, UiAction::Submit, &tx);
        apply_action(&mut controller, UiAction::Submit, &tx);

        let completion = rx.recv().await.expect("completion");
        controller.finish(completion);
        drop(tx);

        assert!(rx.recv().await.is_none());
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn edit_actions_reach_the_textarea() {
        let mut controller = controller("unused");
        let (tx, _rx) = mpsc::unbounded_channel();

        for ch in ['h', 'i'] {
            let key = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);
            apply_action(&mut controller, UiAction::Edit(key), &tx);
        }

        assert_eq!(controller.input_text(), "hi");
    }

    #[test]
    fn quit_stops_the_loop_and_focus_actions_apply() {
        let mut controller = controller("unused");
        let (tx, _rx) = mpsc::unbounded_channel();

        assert!(apply_action(&mut controller, UiAction::ToggleFocus, &tx));
        assert_eq!(controller.focus(), Focus::Button);
        assert!(apply_action(&mut controller, UiAction::FocusInput, &tx));
        assert_eq!(controller.focus(), Focus::Input);
        assert!(!apply_action(&mut controller, UiAction::Quit, &tx));
    }

    #[test]
    fn key_context_reflects_controller_state() {
        let mut controller = controller("unused");
        let ctx = key_context(&controller);
        assert!(ctx.triggers_wired);
        assert!(ctx.button_enabled);
        assert!(!ctx.notice_open);

        let (tx, _rx) = mpsc::unbounded_channel();
        apply_action(&mut controller, UiAction::Submit, &tx);
        assert!(key_context(&controller).notice_open);
    }
}
