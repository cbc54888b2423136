use eframe::egui;
use shared::domain::Student;

pub const CARD_WIDTH: f32 = 208.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Delete,
}

/// One card per record with its Delete/Edit controls.
pub fn student_card(ui: &mut egui::Ui, student: &Student, can_delete: bool) -> Option<CardAction> {
    let mut action = None;
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical_centered(|ui| {
                ui.strong(format!("Name : {}", student.name));
                ui.label(format!("Mark 1 : {}", student.mark1));
                ui.label(format!("Mark 2 : {}", student.mark2));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(can_delete, egui::Button::new("Delete Student"))
                        .clicked()
                    {
                        action = Some(CardAction::Delete);
                    }
                    if ui.button("Edit Student").clicked() {
                        action = Some(CardAction::Edit);
                    }
                });
            });
        });
    action
}
