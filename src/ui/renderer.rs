//! Top-level rendering coordinator.
//!
//! Computes the view model from the store and hands it to the component
//! layout. Output goes to stdout as ANSI-styled text; Zellij captures it as
//! the pane contents.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh frame for each
/// render call.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_screen(&viewmodel, &state.theme, cols, rows);
}
