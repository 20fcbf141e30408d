/// Detail carried by the before/after change-state events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeStateDetail {
    pub new_state_is_opened: bool,
}
