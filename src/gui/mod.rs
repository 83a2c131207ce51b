//! Settings window implemented with egui/eframe
//!
//! Edits an independently loaded copy of the persisted settings and writes
//! back to disk on Save. The live listener process keeps whatever it loaded
//! at startup; restart it to pick up changes.

pub mod constants;

use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{error, info};

use crate::config::Settings;
use crate::constants::defaults;
use crate::keys::{EXIT_CHOICES, START_CHOICES, TriggerKey};
use self::constants::*;

struct StatusMessage {
    text: String,
    color: egui::Color32,
    shown_at: Instant,
}

struct SettingsApp {
    radius: u32,
    steps: u32,
    /// Draw speed edited in whole milliseconds, stored as seconds on disk
    draw_speed_ms: u32,
    start_key: TriggerKey,
    exit_key: TriggerKey,
    status_message: Option<StatusMessage>,
}

impl SettingsApp {
    fn new(_cc: &CreationContext<'_>) -> Self {
        let settings = Settings::load();
        info!(radius = settings.radius, steps = settings.steps, "Settings editor opened");
        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Settings) -> Self {
        Self {
            radius: settings.radius,
            steps: settings.steps,
            draw_speed_ms: (settings.draw_speed * 1000.0).round() as u32,
            start_key: TriggerKey::from_name_or(&settings.start_key, TriggerKey::AltLeft),
            exit_key: TriggerKey::from_name_or(&settings.exit_key, TriggerKey::Escape),
            status_message: None,
        }
    }

    fn to_settings(&self) -> Settings {
        Settings {
            radius: self.radius,
            steps: self.steps,
            draw_speed: f64::from(self.draw_speed_ms) / 1000.0,
            start_key: self.start_key.name().to_string(),
            exit_key: self.exit_key.name().to_string(),
        }
    }

    fn set_status(&mut self, text: impl Into<String>, color: egui::Color32) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            color,
            shown_at: Instant::now(),
        });
    }

    fn save_settings(&mut self) {
        match self.to_settings().save() {
            Ok(()) => {
                info!("Settings saved");
                self.set_status("\u{2713} Settings saved!", STATUS_OK);
            }
            Err(e) => {
                error!(error = ?e, "Failed to save settings");
                self.set_status(format!("Save failed: {e}"), STATUS_ERROR);
            }
        }
    }

    fn reset_defaults(&mut self) {
        // Reset the form only; nothing is written until Save
        self.radius = defaults::RADIUS;
        self.steps = defaults::STEPS;
        self.draw_speed_ms = (defaults::DRAW_SPEED * 1000.0).round() as u32;
        self.start_key = TriggerKey::AltLeft;
        self.exit_key = TriggerKey::Escape;
        self.set_status("Reset to defaults", STATUS_INFO);
    }

    fn expire_status(&mut self) {
        if let Some(message) = &self.status_message {
            if message.shown_at.elapsed() >= Duration::from_millis(STATUS_TIMEOUT_MS) {
                self.status_message = None;
            }
        }
    }
}

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.expire_status();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            ui.heading("\u{2699} Circle Drawer Settings");
            ui.add_space(SECTION_SPACING);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Circle").strong());
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    ui.label("Radius:");
                    ui.add(egui::Slider::new(&mut self.radius, 100..=500).suffix(" px"));
                });

                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    ui.label("Smoothness:");
                    ui.add(egui::Slider::new(&mut self.steps, 500..=4000).suffix(" steps"));
                });

                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    ui.label("Draw Speed:");
                    ui.add(egui::Slider::new(&mut self.draw_speed_ms, 0..=10).suffix(" ms"));
                });
                ui.label(
                    egui::RichText::new("(per-step delay, 0 = as fast as possible)")
                        .small()
                        .weak(),
                );
            });

            ui.add_space(SECTION_SPACING);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Trigger Keys").strong());
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    ui.label("Start Key:");
                    egui::ComboBox::from_id_salt("start_key")
                        .selected_text(self.start_key.label())
                        .width(100.0)
                        .show_ui(ui, |ui| {
                            for key in START_CHOICES {
                                ui.selectable_value(&mut self.start_key, *key, key.label());
                            }
                        });

                    ui.add_space(ITEM_SPACING);

                    ui.label("Exit Key:");
                    egui::ComboBox::from_id_salt("exit_key")
                        .selected_text(self.exit_key.label())
                        .width(100.0)
                        .show_ui(ui, |ui| {
                            for key in EXIT_CHOICES {
                                ui.selectable_value(&mut self.exit_key, *key, key.label());
                            }
                        });
                });
            });

            ui.add_space(SECTION_SPACING);

            ui.horizontal(|ui| {
                if ui.button("\u{1F4BE} Save Settings").clicked() {
                    self.save_settings();
                }
                if ui.button("\u{1F504} Reset").clicked() {
                    self.reset_defaults();
                }
            });

            ui.add_space(ITEM_SPACING);

            if let Some(message) = &self.status_message {
                ui.colored_label(message.color, &message.text);
            }
        });

        // Keep repainting while a status line is pending expiry
        if self.status_message.is_some() {
            ctx.request_repaint_after(Duration::from_millis(STATUS_TIMEOUT_MS / 4));
        }
    }
}

pub fn run_settings() -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Circle Drawer Settings"),
        ..Default::default()
    };

    eframe::run_native(
        "Circle Drawer Settings",
        options,
        Box::new(|cc| Ok(Box::new(SettingsApp::new(cc)))),
    )
    .map_err(|err| anyhow!("Failed to launch settings window: {err}"))
}
