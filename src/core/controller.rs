//! The scene generator controller.
//!
//! Owns every piece of interactive state: the prompt input, the ordered list of
//! rendered results, the in-flight flag, the blocking notice and the result
//! scroll position. The renderer is a pure projection of this state (see
//! [`crate::ui::view`]), and the event loop only forwards input to it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info};
use tui_textarea::{CursorMove, TextArea};

use crate::core::constants::{
    EMPTY_PROMPT_NOTICE, GENERATION_FAILED_MESSAGE, INIT_FAILED_MESSAGE, INPUT_PLACEHOLDER,
    NOT_INITIALIZED_MESSAGE,
};
use crate::core::generator::SceneGenerator;
use crate::core::prompt::SceneRequest;

/// One block in the result area, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultEntry {
    /// A generated scene, shown preformatted.
    Scene(String),
    /// A user-facing error message.
    Error(String),
    /// Horizontal rule between consecutive scenes.
    Separator,
}

impl ResultEntry {
    pub fn is_error(&self) -> bool {
        matches!(self, ResultEntry::Error(_))
    }

    pub fn is_scene(&self) -> bool {
        matches!(self, ResultEntry::Scene(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success { text: String },
    Failure { message: String },
}

/// Why a submit attempt ended before reaching the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// Another generation is still in flight.
    Busy,
    /// The description was empty after trimming; a notice is now open.
    EmptyPrompt,
    /// There is no client handle; an error entry was rendered.
    NotInitialized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Button,
}

/// Result area scroll position. `follow_latest` pins the view to the newest
/// content until the user scrolls away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultScroll {
    pub offset: u16,
    pub follow_latest: bool,
}

/// Holds the in-flight flag for as long as it lives.
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A generation that has passed validation and holds the in-flight flag.
///
/// Dropping it without running releases the flag.
pub struct PendingGeneration {
    generator: Arc<dyn SceneGenerator>,
    request: SceneRequest,
    guard: InFlightGuard,
}

impl PendingGeneration {
    /// Perform the single request. Errors are logged here and replaced with
    /// the generic user-facing message.
    pub async fn run(self) -> GenerationCompletion {
        let prompt = self.request.full_prompt();
        let result = match self.generator.generate(&prompt).await {
            Ok(text) => GenerationResult::Success { text },
            Err(err) => {
                error!(kind = err.kind(), error = %err, "Error generating screenplay");
                GenerationResult::Failure {
                    message: GENERATION_FAILED_MESSAGE.to_string(),
                }
            }
        };

        GenerationCompletion {
            result,
            guard: self.guard,
        }
    }
}

/// Outcome of [`PendingGeneration::run`], still holding the in-flight flag
/// until the controller applies it.
#[derive(Debug)]
pub struct GenerationCompletion {
    pub result: GenerationResult,
    guard: InFlightGuard,
}

pub enum SubmitOutcome {
    Started(PendingGeneration),
    Rejected(SubmitRejection),
}

pub struct SceneController {
    generator: Option<Arc<dyn SceneGenerator>>,
    triggers_wired: bool,
    in_flight: Arc<AtomicBool>,
    entries: Vec<ResultEntry>,
    results_revealed: bool,
    textarea: TextArea<'static>,
    notice: Option<String>,
    focus: Focus,
    scroll: ResultScroll,
}

impl SceneController {
    pub fn new(generator: Arc<dyn SceneGenerator>) -> Self {
        let mut controller = Self::detached();
        controller.generator = Some(generator);
        controller.triggers_wired = true;
        controller
    }

    /// Build from the outcome of client construction. A failure is rendered
    /// immediately and leaves every trigger unwired for the session.
    pub fn from_init<E>(init: Result<Arc<dyn SceneGenerator>, E>) -> Self
    where
        E: std::fmt::Display,
    {
        match init {
            Ok(generator) => Self::new(generator),
            Err(err) => {
                error!(error = %err, "Could not initialize the AI client");
                let mut controller = Self::detached();
                controller.push_error(INIT_FAILED_MESSAGE);
                controller
            }
        }
    }

    fn detached() -> Self {
        Self {
            generator: None,
            triggers_wired: false,
            in_flight: Arc::new(AtomicBool::new(false)),
            entries: Vec::new(),
            results_revealed: false,
            textarea: new_prompt_textarea(),
            notice: None,
            focus: Focus::Input,
            scroll: ResultScroll::default(),
        }
    }

    /// Whether pointer and keyboard triggers should reach [`Self::begin_submit`].
    pub fn accepts_triggers(&self) -> bool {
        self.triggers_wired
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn results_visible(&self) -> bool {
        self.results_revealed
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Button,
            Focus::Button => Focus::Input,
        };
    }

    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn set_input_text(&mut self, text: &str) {
        let mut textarea = TextArea::new(text.lines().map(str::to_string).collect());
        textarea.set_placeholder_text(INPUT_PLACEHOLDER);
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        self.textarea = textarea;
    }

    fn clear_input(&mut self) {
        self.textarea = new_prompt_textarea();
    }

    pub fn scroll(&self) -> ResultScroll {
        self.scroll
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll.follow_latest = false;
        self.scroll.offset = self.scroll.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll.offset = self.scroll.offset.saturating_add(lines);
    }

    /// Reconcile the scroll offset with the rendered height of the result area.
    pub fn clamp_scroll(&mut self, max_offset: u16) {
        if self.scroll.follow_latest || self.scroll.offset > max_offset {
            self.scroll.offset = max_offset;
        }
    }

    /// Validate the current input and take the in-flight flag.
    ///
    /// On `Started` the trigger is disabled until the returned generation has
    /// been run and handed to [`Self::finish`].
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("Ignoring submit while a generation is in flight");
            return SubmitOutcome::Rejected(SubmitRejection::Busy);
        };

        let Some(request) = SceneRequest::new(&self.input_text()) else {
            self.notice = Some(EMPTY_PROMPT_NOTICE.to_string());
            return SubmitOutcome::Rejected(SubmitRejection::EmptyPrompt);
        };

        let Some(generator) = self.generator.clone() else {
            self.push_error(NOT_INITIALIZED_MESSAGE);
            return SubmitOutcome::Rejected(SubmitRejection::NotInitialized);
        };

        info!(chars = request.prompt_text().len(), "Generating scene");
        SubmitOutcome::Started(PendingGeneration {
            generator,
            request,
            guard,
        })
    }

    /// Render a completed generation and release the in-flight flag.
    pub fn finish(&mut self, completion: GenerationCompletion) -> GenerationResult {
        let GenerationCompletion { result, guard } = completion;
        match &result {
            GenerationResult::Success { text } => self.push_scene(text),
            GenerationResult::Failure { message } => self.push_error(message),
        }
        drop(guard);
        result
    }

    /// Run the whole operation inline: validate, await the generator, render.
    pub async fn submit(&mut self) -> Result<GenerationResult, SubmitRejection> {
        match self.begin_submit() {
            SubmitOutcome::Started(pending) => {
                let completion = pending.run().await;
                Ok(self.finish(completion))
            }
            SubmitOutcome::Rejected(reason) => Err(reason),
        }
    }

    fn reveal_results(&mut self) {
        self.results_revealed = true;
    }

    fn push_scene(&mut self, text: &str) {
        self.reveal_results();
        let has_error = self.entries.iter().any(ResultEntry::is_error);
        if !self.entries.is_empty() && !has_error {
            self.entries.push(ResultEntry::Separator);
        }
        self.entries.push(ResultEntry::Scene(text.trim().to_string()));
        self.clear_input();
        self.scroll.follow_latest = true;
    }

    /// Errors go to the top so the newest one is the most visible.
    fn push_error(&mut self, message: &str) {
        self.reveal_results();
        self.entries.insert(0, ResultEntry::Error(message.to_string()));
        self.scroll = ResultScroll {
            offset: 0,
            follow_latest: false,
        };
    }
}

fn new_prompt_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(INPUT_PLACEHOLDER);
    textarea
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prompt::screenwriter_preamble;
    use crate::utils::test_utils::{transport_error, ScriptedGenerator};

    fn controller_with(generator: &Arc<ScriptedGenerator>) -> SceneController {
        SceneController::new(generator.clone())
    }

    fn count_scenes(controller: &SceneController) -> usize {
        controller.entries().iter().filter(|e| e.is_scene()).count()
    }

    fn count_errors(controller: &SceneController) -> usize {
        controller.entries().iter().filter(|e| e.is_error()).count()
    }

    #[tokio::test]
    async fn submit_sends_one_prompt_containing_preamble_and_input() {
        let generator = Arc::new(ScriptedGenerator::succeeding("INT. ROOM - NIGHT"));
        let mut controller = controller_with(&generator);
        controller.set_input_text("A detective interrogates a suspect.");

        controller.submit().await.expect("submit should start");

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with(screenwriter_preamble()));
        assert!(prompts[0].contains("A detective interrogates a suspect."));
    }

    #[tokio::test]
    async fn blank_input_opens_notice_without_calling_generator() {
        let generator = Arc::new(ScriptedGenerator::succeeding("unused"));
        let mut controller = controller_with(&generator);
        controller.set_input_text("   \n  ");

        let outcome = controller.submit().await;

        assert_eq!(outcome, Err(SubmitRejection::EmptyPrompt));
        assert_eq!(generator.call_count(), 0);
        assert_eq!(controller.notice(), Some(EMPTY_PROMPT_NOTICE));
        assert!(!controller.results_visible());
        assert!(controller.entries().is_empty());
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn blank_input_leaves_existing_results_untouched() {
        let generator = Arc::new(ScriptedGenerator::succeeding("FIRST"));
        let mut controller = controller_with(&generator);
        controller.set_input_text("first");
        controller.submit().await.unwrap();
        let before = controller.entries().to_vec();

        controller.set_input_text("");
        assert_eq!(controller.submit().await, Err(SubmitRejection::EmptyPrompt));

        assert_eq!(controller.entries(), before.as_slice());
        assert!(controller.results_visible());
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn success_renders_trimmed_scene_and_clears_input() {
        let generator = Arc::new(ScriptedGenerator::succeeding(
            "\n  INT. ROOM - NIGHT\n...  \n",
        ));
        let mut controller = controller_with(&generator);
        controller.set_input_text("A detective interrogates a suspect.");

        let result = controller.submit().await.unwrap();

        assert!(matches!(result, GenerationResult::Success { .. }));
        assert!(controller.results_visible());
        assert_eq!(
            controller.entries(),
            &[ResultEntry::Scene("INT. ROOM - NIGHT\n...".to_string())]
        );
        assert_eq!(controller.input_text(), "");
        assert!(controller.scroll().follow_latest);
    }

    #[tokio::test]
    async fn blank_generated_text_renders_an_empty_scene() {
        let generator = Arc::new(ScriptedGenerator::succeeding("  \n  "));
        let mut controller = controller_with(&generator);
        controller.set_input_text("A silent film.");

        let result = controller.submit().await.unwrap();

        assert!(matches!(result, GenerationResult::Success { .. }));
        assert_eq!(controller.entries(), &[ResultEntry::Scene(String::new())]);
        assert_eq!(count_errors(&controller), 0);
        assert_eq!(controller.input_text(), "");
    }

    #[tokio::test]
    async fn loading_state_is_released_after_success_and_failure() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok("INT. ROOM".to_string()),
            Err(transport_error()),
        ]));
        let mut controller = controller_with(&generator);

        controller.set_input_text("one");
        controller.submit().await.unwrap();
        assert!(!controller.is_loading());

        controller.set_input_text("two");
        controller.submit().await.unwrap();
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn failure_prepends_generic_error_and_keeps_input() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err(transport_error())]));
        let mut controller = controller_with(&generator);
        controller.set_input_text("A heist goes wrong.");

        let result = controller.submit().await.unwrap();

        assert_eq!(
            result,
            GenerationResult::Failure {
                message: GENERATION_FAILED_MESSAGE.to_string()
            }
        );
        assert!(controller.results_visible());
        assert_eq!(count_errors(&controller), 1);
        assert_eq!(count_scenes(&controller), 0);
        assert_eq!(controller.input_text(), "A heist goes wrong.");

        let ResultEntry::Error(message) = &controller.entries()[0] else {
            panic!("expected error entry first");
        };
        assert_ne!(message, &transport_error().to_string());
    }

    #[tokio::test]
    async fn newest_error_is_first_and_scenes_stay() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok("SCENE ONE".to_string()),
            Err(transport_error()),
            Err(transport_error()),
        ]));
        let mut controller = controller_with(&generator);

        for text in ["one", "two", "three"] {
            controller.set_input_text(text);
            controller.submit().await.unwrap();
        }

        assert_eq!(count_errors(&controller), 2);
        assert_eq!(
            controller.entries().last(),
            Some(&ResultEntry::Scene("SCENE ONE".to_string()))
        );
        assert!(controller.entries()[0].is_error());
        assert!(controller.entries()[1].is_error());
    }

    #[tokio::test]
    async fn second_success_is_separated_from_the_first() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok("FIRST".to_string()),
            Ok("SECOND".to_string()),
        ]));
        let mut controller = controller_with(&generator);

        controller.set_input_text("one");
        controller.submit().await.unwrap();
        controller.set_input_text("two");
        controller.submit().await.unwrap();

        assert_eq!(
            controller.entries(),
            &[
                ResultEntry::Scene("FIRST".to_string()),
                ResultEntry::Separator,
                ResultEntry::Scene("SECOND".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn no_separator_once_an_error_is_shown() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Err(transport_error()),
            Ok("AFTER ERROR".to_string()),
        ]));
        let mut controller = controller_with(&generator);

        controller.set_input_text("one");
        controller.submit().await.unwrap();
        controller.set_input_text("two");
        controller.submit().await.unwrap();

        assert_eq!(controller.entries().len(), 2);
        assert!(controller.entries()[0].is_error());
        assert_eq!(
            controller.entries()[1],
            ResultEntry::Scene("AFTER ERROR".to_string())
        );
    }

    #[tokio::test]
    async fn second_trigger_while_in_flight_is_rejected() {
        let generator = Arc::new(ScriptedGenerator::succeeding("SCENE"));
        let mut controller = controller_with(&generator);
        controller.set_input_text("A chase across rooftops.");

        let SubmitOutcome::Started(pending) = controller.begin_submit() else {
            panic!("first submit should start");
        };
        assert!(controller.is_loading());
        assert!(matches!(
            controller.begin_submit(),
            SubmitOutcome::Rejected(SubmitRejection::Busy)
        ));

        let completion = pending.run().await;
        controller.finish(completion);

        assert_eq!(generator.call_count(), 1);
        assert!(!controller.is_loading());
        assert_eq!(count_scenes(&controller), 1);
    }

    #[test]
    fn dropping_pending_generation_releases_flag() {
        let generator = Arc::new(ScriptedGenerator::succeeding("SCENE"));
        let mut controller = controller_with(&generator);
        controller.set_input_text("x");

        match controller.begin_submit() {
            SubmitOutcome::Started(pending) => drop(pending),
            SubmitOutcome::Rejected(reason) => panic!("unexpected rejection: {reason:?}"),
        }

        assert!(!controller.is_loading());
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn init_failure_renders_error_and_unwires_triggers() {
        let init: Result<Arc<dyn SceneGenerator>, String> = Err("no key".to_string());
        let controller = SceneController::from_init(init);

        assert!(!controller.accepts_triggers());
        assert!(controller.results_visible());
        assert_eq!(
            controller.entries(),
            &[ResultEntry::Error(INIT_FAILED_MESSAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn submit_without_client_renders_not_initialized() {
        let init: Result<Arc<dyn SceneGenerator>, String> = Err("no key".to_string());
        let mut controller = SceneController::from_init(init);
        controller.set_input_text("A quiet diner at dawn.");

        assert_eq!(
            controller.submit().await,
            Err(SubmitRejection::NotInitialized)
        );
        assert_eq!(
            controller.entries()[0],
            ResultEntry::Error(NOT_INITIALIZED_MESSAGE.to_string())
        );
        assert!(!controller.is_loading());
    }

    #[test]
    fn scroll_follows_latest_until_user_scrolls_up() {
        let generator = Arc::new(ScriptedGenerator::succeeding("SCENE"));
        let mut controller = controller_with(&generator);
        controller.scroll.follow_latest = true;

        controller.clamp_scroll(12);
        assert_eq!(controller.scroll().offset, 12);

        controller.scroll_up(5);
        controller.clamp_scroll(20);
        assert_eq!(controller.scroll().offset, 7);

        controller.scroll_down(100);
        controller.clamp_scroll(20);
        assert_eq!(controller.scroll().offset, 20);
    }

    #[tokio::test]
    async fn new_error_scrolls_results_back_to_the_top() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok("SCENE ONE".to_string()),
            Err(transport_error()),
        ]));
        let mut controller = controller_with(&generator);

        controller.set_input_text("one");
        controller.submit().await.unwrap();
        controller.clamp_scroll(15);
        assert_eq!(controller.scroll().offset, 15);

        controller.set_input_text("two");
        controller.submit().await.unwrap();
        controller.clamp_scroll(15);

        assert_eq!(
            controller.scroll(),
            ResultScroll {
                offset: 0,
                follow_latest: false
            }
        );
    }

    #[test]
    fn focus_toggles_between_input_and_button() {
        let generator = Arc::new(ScriptedGenerator::succeeding("SCENE"));
        let mut controller = controller_with(&generator);
        assert_eq!(controller.focus(), Focus::Input);
        controller.toggle_focus();
        assert_eq!(controller.focus(), Focus::Button);
        controller.focus_input();
        assert_eq!(controller.focus(), Focus::Input);
    }
}
