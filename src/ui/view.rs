//! Pure projection of [`SceneController`] state into what the screen shows.
//!
//! Nothing here touches the terminal, which keeps the layout contract
//! (header, input section, trigger, result area) testable on its own.

use crate::core::constants::{
    APP_SUBTITLE, APP_TITLE, BUTTON_LABEL, BUTTON_LOADING_LABEL, INPUT_LABEL,
};
use crate::core::controller::{Focus, ResultEntry, SceneController};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: &'static str,
    pub subtitle: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub label: &'static str,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
    pub focused: bool,
    /// Spinner shown in front of the label while a generation runs.
    pub show_loader: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneView<'a> {
    pub header: HeaderView,
    pub input: InputView,
    pub button: ButtonView,
    /// `None` while the result area is still hidden.
    pub results: Option<&'a [ResultEntry]>,
    pub notice: Option<&'a str>,
}

pub fn project(controller: &SceneController) -> SceneView<'_> {
    let loading = controller.is_loading();
    let focus = controller.focus();

    SceneView {
        header: HeaderView {
            title: APP_TITLE,
            subtitle: APP_SUBTITLE,
        },
        input: InputView {
            label: INPUT_LABEL,
            focused: focus == Focus::Input,
        },
        button: ButtonView {
            label: if loading {
                BUTTON_LOADING_LABEL
            } else {
                BUTTON_LABEL
            },
            enabled: !loading && controller.accepts_triggers(),
            focused: focus == Focus::Button,
            show_loader: loading,
        },
        results: controller
            .results_visible()
            .then(|| controller.entries()),
        notice: controller.notice(),
    }
}
