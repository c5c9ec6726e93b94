use crate::core::chat::ChatState;
use crate::core::config::ResolvedConfig;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::composer::COMPOSER_HEIGHT;
use crate::tui::components::{TitleBar, Transcript};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Draws one frame: title bar, transcript (with its action bar and starter
/// grid), composer.
pub fn draw_ui(
    frame: &mut Frame,
    chat: &ChatState,
    config: &ResolvedConfig,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min};
    let [title_area, transcript_area, composer_area] =
        Layout::vertical([Length(1), Min(0), Length(COMPOSER_HEIGHT)]).areas(frame.area());

    TitleBar::new(
        &config.backend_url,
        &chat.status_message,
        chat.error.is_some() && !chat.is_loading,
    )
    .render(frame, title_area);

    Transcript::new(
        &mut tui.transcript,
        &chat.messages,
        chat.is_loading,
        config.capabilities,
        chat.starters.as_slice(),
        spinner_frame,
    )
    .render(frame, transcript_area);

    tui.composer.enabled = config.capabilities.append && !chat.is_loading;
    tui.composer.render(frame, composer_area);
}
