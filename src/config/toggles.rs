#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct FeatureToggles {
    /// Remove operators' command messages so nothing is left below the notice.
    pub delete_command_messages: bool,
    /// Messages of any bot, not only of this one, don't cause relocation.
    pub ignore_other_bots: bool,
    /// Send notices without a notification sound.
    pub silent_notices: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            delete_command_messages: true,
            ignore_other_bots: true,
            silent_notices: true,
        }
    }
}
