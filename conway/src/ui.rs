// ui.rs - Drawing the grid and controls, and turning input into commands

use std::time::Duration;

use conway_core::patterns;
use eframe::egui;
use egui::{Align2, Color32, FontId, Rect, Sense, Vec2, vec2};
use log::info;

use crate::input::{self, Command};
use crate::load_prompt::PromptOutcome;
use crate::settings::Settings;
use crate::GameOfLife;

/// Room taken by the control bar above the grid.
const CONTROLS_HEIGHT: f32 = 110.0;
const PANEL_MARGIN: f32 = 16.0;
const GRID_COLOR: Color32 = Color32::from_rgb(20, 20, 20);
const TEXT_COLOR: Color32 = Color32::from_rgb(230, 230, 230);

pub fn window_size(settings: &Settings) -> [f32; 2] {
    let [width, height] = settings.grid_size();
    [width + PANEL_MARGIN, height + CONTROLS_HEIGHT + PANEL_MARGIN]
}

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        self.tick();
        if !self.sim.is_running() {
            // Nothing steps while paused, so recount before showing it.
            self.sim.recompute_population();
        }

        let mut commands = input::keyboard_commands(ctx, self.sim.is_running());

        if let Some(prompt) = &mut self.load_prompt {
            match prompt.show(ctx) {
                PromptOutcome::Pending => {}
                PromptOutcome::Chosen(path) => commands.push(Command::Load(path)),
                PromptOutcome::Cancelled => {
                    info!("Load cancelled.");
                    self.load_prompt = None;
                }
            }
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui, &mut commands);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.grid_view(ui, &mut commands);
        });

        let changed = !commands.is_empty();
        for command in commands {
            if !self.execute(command) {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }

        if changed {
            ctx.request_repaint();
        } else if self.sim.is_running() {
            ctx.request_repaint_after(self.time_to_next_tick());
        }
    }
}

impl GameOfLife {
    fn controls(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        let running = self.sim.is_running();

        ui.horizontal(|ui| {
            let button_text = if running { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                commands.push(Command::ToggleRunning);
            }

            ui.add_enabled_ui(!running, |ui| {
                if ui.button("⏹ Clear").clicked() {
                    commands.push(Command::Clear);
                }
                if ui.button("Save").clicked() {
                    commands.push(Command::Save);
                }
                if ui.button("Load…").clicked() {
                    commands.push(Command::OpenLoadPrompt);
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });
                if ui.button("Apply Pattern").clicked() {
                    commands.push(Command::ApplyPattern(self.selected_pattern));
                }
            });
        });

        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut speed = 1.0 / self.update_interval.as_secs_f32();
            if ui
                .add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec"))
                .changed()
            {
                self.update_interval = Duration::from_secs_f32(1.0 / speed);
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });

        ui.horizontal(|ui| {
            ui.label("Space: start/pause   S: save   L: load   C: clear   Esc: quit");
            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status);
            }
        });
    }

    fn grid_view(&self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        let grid = self.sim.grid();
        let cell = self.cell_size;
        let size = vec2(grid.width() as f32 * cell, grid.height() as f32 * cell);

        egui::ScrollArea::both().show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, GRID_COLOR);

            // One pixel gap between cells lets the background show as grid lines
            for (row, cells) in grid.rows().enumerate() {
                for (col, &alive) in cells.iter().enumerate() {
                    let rect = Rect::from_min_size(
                        origin + vec2(col as f32 * cell, row as f32 * cell),
                        Vec2::splat(cell - 1.0),
                    );
                    let color = if alive { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 0.0, color);
                }
            }

            painter.text(
                origin + vec2(5.0, 5.0),
                Align2::LEFT_TOP,
                format!("Generation {}", self.sim.generation()),
                FontId::proportional(24.0),
                TEXT_COLOR,
            );
            painter.text(
                origin + vec2(5.0, 35.0),
                Align2::LEFT_TOP,
                format!("Population {}", self.sim.population()),
                FontId::proportional(24.0),
                TEXT_COLOR,
            );

            // Hold the primary button to paint cells while paused
            let painting = response.is_pointer_button_down_on()
                && ui.input(|i| i.pointer.primary_down());
            if !self.sim.is_running() && painting {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some((row, col)) =
                        input::cell_at(pos, origin, cell, grid.width(), grid.height())
                    {
                        commands.push(Command::PaintCell { row, col });
                    }
                }
            }
        });
    }
}
