use serde::{Deserialize, Serialize};

use crate::base::ComponentOptions;

/// Options of a [`Spoiler`](super::Spoiler).
///
/// Absent or empty selectors, classes and event names switch off the
/// behaviour they drive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpoilerOptions {
    pub root_selector: Option<String>,
    /// Click target; also receives the head classes.
    pub head_selector: Option<String>,
    pub body_selector: Option<String>,

    pub opened_class: Option<String>,
    pub closed_class: Option<String>,
    /// Added to the root once construction finishes.
    pub inited_class: Option<String>,
    pub head_opened_class: Option<String>,
    pub head_closed_class: Option<String>,
    pub body_opened_class: Option<String>,
    pub body_closed_class: Option<String>,

    /// Cancelable event dispatched before a transition commits.
    pub before_change_state_event: Option<String>,
    /// Event dispatched after a transition committed.
    pub after_change_state_event: Option<String>,

    /// Elements carrying this attribute show its value while opened.
    pub opened_text_attr: String,
    /// Elements carrying this attribute show its value while closed.
    pub closed_text_attr: String,
}

impl Default for SpoilerOptions {
    fn default() -> Self {
        Self {
            root_selector: Some(".js-spoiler".into()),
            head_selector: Some(".js-spoiler__head".into()),
            body_selector: Some(".js-spoiler__body".into()),
            opened_class: Some("js-spoiler--opened".into()),
            closed_class: Some("js-spoiler--closed".into()),
            inited_class: Some("js-spoiler--inited".into()),
            head_opened_class: Some("js-spoiler__head--opened".into()),
            head_closed_class: Some("js-spoiler__head--closed".into()),
            body_opened_class: Some("js-spoiler__body--opened".into()),
            body_closed_class: Some("js-spoiler__body--closed".into()),
            before_change_state_event: Some("before-spoiler-change-state".into()),
            after_change_state_event: Some("after-spoiler-change-state".into()),
            opened_text_attr: "data-spoiler-opened-text".into(),
            closed_text_attr: "data-spoiler-closed-text".into(),
        }
    }
}

impl ComponentOptions for SpoilerOptions {
    fn root_selector(&self) -> Option<&str> {
        self.root_selector.as_deref()
    }
}

/// Options of a [`SpoilerGroup`](super::SpoilerGroup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpoilerGroupOptions {
    /// Selects group roots; a match inside a group is rejected as nesting.
    pub root_selector: Option<String>,
    /// Selects member spoilers. Required.
    pub spoiler_root_selector: Option<String>,
    /// Member "after" event the group reacts to. Required.
    pub spoiler_after_change_state_event: Option<String>,
    /// Presence of this attribute on the root makes the group exclusive.
    pub exclusive_attr: Option<String>,
    pub default_exclusive: bool,
    /// Integer attribute naming the member to open at construction.
    pub opened_index_attr: Option<String>,
    /// `-1` opens nothing.
    pub default_opened_index: i64,
}

impl Default for SpoilerGroupOptions {
    fn default() -> Self {
        let spoiler = SpoilerOptions::default();
        Self {
            root_selector: Some(".js-spoiler-group".into()),
            spoiler_root_selector: spoiler.root_selector,
            spoiler_after_change_state_event: spoiler.after_change_state_event,
            exclusive_attr: Some("data-spoiler-group-exclusive".into()),
            default_exclusive: false,
            opened_index_attr: Some("data-spoiler-group-opened-index".into()),
            default_opened_index: -1,
        }
    }
}

impl ComponentOptions for SpoilerGroupOptions {
    fn root_selector(&self) -> Option<&str> {
        self.root_selector.as_deref()
    }
}
