//! Playback control panel.
//!
//! The panel only reads controller state and reports what the user did;
//! the host applies the actions afterwards, so all playback mutation goes
//! through one place.

use crate::playback::Playback;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
    Seek(u32),
    Prev,
    Next,
    SetPlaying(bool),
}

/// Draw the panel and collect this frame's actions.
pub fn controls(ctx: &egui::Context, playback: &Playback, last_frame: u32) -> Vec<PanelAction> {
    let mut actions = Vec::new();
    egui::Window::new("Playback")
        .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            let mut frame = playback.current_frame();
            let slider = ui.add(egui::Slider::new(&mut frame, 1..=last_frame).text("Frame"));
            // Seek once the scrub ends (or the value is typed), not on
            // every intermediate slider position.
            if slider.drag_stopped() || (slider.changed() && !slider.dragged()) {
                actions.push(PanelAction::Seek(frame));
            }

            let mut playing = playback.is_playing();
            if ui.checkbox(&mut playing, "Play").changed() {
                actions.push(PanelAction::SetPlaying(playing));
            }

            ui.horizontal(|ui| {
                if ui.button("Prev").clicked() {
                    actions.push(PanelAction::Prev);
                }
                if ui.button("Next").clicked() {
                    actions.push(PanelAction::Next);
                }
                ui.label(format!("{} / {last_frame}", playback.current_frame()));
            });
        });
    actions
}
