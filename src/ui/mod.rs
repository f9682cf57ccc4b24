//! UI module for rendering the TUI

pub mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::DisplayState;
use ratatui::Frame;

pub use components::toast_areas;
pub use forms::form_layout;
pub use layout::screen_layout;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (content_area, status_area) = screen_layout(frame.area());

    match app.form.display() {
        DisplayState::Editing => forms::draw_dish_form(frame, content_area, &app.form),
        DisplayState::Submitted => forms::draw_submitted(frame, content_area),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Notifications float above everything else
    components::render_toasts(frame, content_area, &app.notifications);
}
