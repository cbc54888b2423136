use client_core::{RemoteEffect, RosterAction, RosterState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::DraftField;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{failure_label, UiError, UiErrorCategory, UiEvent};
use crate::controller::orchestration::{apply_roster_action, dispatch_backend_command};
use crate::ui::widgets::{student_card, CardAction};

const VALIDATION_COLOR: egui::Color32 = egui::Color32::from_rgb(0xd3, 0x2f, 0x2f);
const STATUS_COLOR: egui::Color32 = egui::Color32::from_rgb(0x2e, 0x7d, 0x32);

pub struct RosterApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    roster: RosterState,
    banner: Option<UiError>,
    endpoint_label: String,
}

impl RosterApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        endpoint_label: String,
        startup_error: Option<UiError>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            roster: RosterState::default(),
            banner: startup_error,
            endpoint_label,
        };
        app.request_reload();
        app
    }

    fn request_reload(&mut self) {
        if let Err((_, err)) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::Run(RemoteEffect::Reload))
        {
            self.banner = Some(err);
        }
    }

    fn apply(&mut self, action: RosterAction) {
        apply_roster_action(&mut self.roster, action, &self.cmd_tx, &mut self.banner);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Roster(action) => self.apply(action),
                UiEvent::Error(err) => {
                    tracing::error!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "{}",
                        err.message()
                    );
                    self.banner = Some(err);
                }
            }
        }
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        let Some(err) = &self.banner else {
            return;
        };
        let mut dismissed = false;
        ui.horizontal(|ui| {
            let prefix = match err.category() {
                UiErrorCategory::Configuration => "Configuration",
                UiErrorCategory::Transport => "Connection",
                UiErrorCategory::Unknown => "Error",
            };
            ui.colored_label(VALIDATION_COLOR, format!("{prefix}: {}", err.message()));
            if ui.small_button("Dismiss").clicked() {
                dismissed = true;
            }
        });
        if dismissed {
            self.banner = None;
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) -> Vec<RosterAction> {
        let mut actions = Vec::new();
        ui.heading("My Students");
        ui.add_space(8.0);

        for field in DraftField::ALL {
            let mut value = self.roster.draft.field(field).to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut value)
                    .hint_text(field.placeholder())
                    .desired_width(240.0),
            );
            if response.changed() {
                actions.push(RosterAction::FieldEdited { field, value });
            }
        }

        ui.add_space(4.0);
        let submit = egui::Button::new(self.roster.submit_label());
        if ui.add_enabled(!self.roster.is_submitting(), submit).clicked() {
            actions.push(RosterAction::SubmitRequested);
        }

        if !self.roster.validation.is_empty() {
            ui.colored_label(VALIDATION_COLOR, &self.roster.validation);
        }
        if !self.roster.status.is_empty() {
            ui.colored_label(STATUS_COLOR, &self.roster.status);
        }
        if let Some(kind) = self.roster.last_failure {
            ui.small(format!("last failure: {}", failure_label(kind)));
        }
        actions
    }

    fn show_student_cards(&self, ui: &mut egui::Ui) -> Vec<RosterAction> {
        let mut actions = Vec::new();
        let can_delete = self.roster.can_delete();
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for student in &self.roster.students {
                    match student_card(ui, student, can_delete) {
                        Some(CardAction::Edit) => {
                            actions.push(RosterAction::EditStarted(student.clone()));
                        }
                        Some(CardAction::Delete) => {
                            actions.push(RosterAction::DeleteRequested(student.id.clone()));
                        }
                        None => {}
                    }
                }
            });
        });
        actions
    }
}

impl eframe::App for RosterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();
        egui::TopBottomPanel::bottom("endpoint").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(format!("Service: {}", self.endpoint_label));
                if ui.small_button("Reload").clicked() {
                    self.request_reload();
                }
            });
        });
        egui::SidePanel::left("form")
            .resizable(false)
            .exact_width(280.0)
            .show(ctx, |ui| {
                self.show_banner(ui);
                actions.extend(self.show_form(ui));
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            actions.extend(self.show_student_cards(ui));
        });

        for action in actions {
            self.apply(action);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
