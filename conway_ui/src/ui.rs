// ui.rs - Grid drawing and controls

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tracing::warn;

use conway::Speed;

use crate::GameOfLife;

const BOX_SIZE: f32 = 20.0;
const SPACING: f32 = 0.5;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Game Of Life");

            let snapshot = self.driver.snapshot();

            // Controls
            ui.horizontal(|ui| {
                let button_text = if snapshot.running { "⏸ Stop" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.driver.toggle_running();
                }

                if ui.button("⏹ Reset").clicked() {
                    self.driver.reset();
                    self.last_error = None;
                }

                ui.separator();

                ui.label("Speed:");
                let speed = ui.add(
                    egui::DragValue::new(&mut self.speed_input)
                        .speed(5)
                        .suffix(" ms"),
                );
                if speed.changed() {
                    let clamped = Speed::clamped(self.speed_input);
                    self.speed_input = clamped.millis() as i64;
                    self.driver.set_speed(clamped);
                }

                ui.separator();

                ui.label(format!("Generation: {}", snapshot.generation));
            });

            // Size can only change while stopped; the grid is rebuilt empty.
            ui.horizontal(|ui| {
                let stopped = !snapshot.running;
                ui.label("Rows:");
                ui.add_enabled(stopped, egui::DragValue::new(&mut self.rows_input).clamp_range(1..=200));
                ui.label("Columns:");
                ui.add_enabled(stopped, egui::DragValue::new(&mut self.cols_input).clamp_range(1..=200));
                if ui.add_enabled(stopped, egui::Button::new("Apply size")).clicked() {
                    self.apply_dimensions();
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            if let Some(err) = &self.last_error {
                ui.colored_label(Color32::RED, err.as_str());
            }

            ui.separator();

            ui.label("Click cells to toggle them alive/dead. Editing a cell restarts the generation count.");

            ui.separator();

            let grid = &snapshot.grid;
            let (rows, cols) = (grid.rows(), grid.cols());

            egui::ScrollArea::both().show(ui, |ui| {
                let start_pos = ui.cursor().min;
                let total_size = Vec2::new(
                    (BOX_SIZE + SPACING) * cols as f32 - SPACING,
                    (BOX_SIZE + SPACING) * rows as f32 - SPACING,
                );

                let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

                painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::from_gray(200));

                for cell in grid.cells() {
                    let x = start_pos.x + cell.col as f32 * (BOX_SIZE + SPACING);
                    let y = start_pos.y + cell.row as f32 * (BOX_SIZE + SPACING);
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(BOX_SIZE));

                    let color = if cell.alive { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 0.0, color);
                    painter.rect_stroke(rect, 0.0, Stroke::new(0.3, Color32::from_gray(180)));
                }

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let offset = pos - start_pos;
                        let col = (offset.x / (BOX_SIZE + SPACING)).floor();
                        let row = (offset.y / (BOX_SIZE + SPACING)).floor();
                        if row >= 0.0 && col >= 0.0 {
                            if let Err(err) = self.driver.toggle_cell(row as usize, col as usize) {
                                warn!(%err, "click outside the grid");
                            }
                        }
                    }
                }
            });

            ui.separator();

            // Statistics
            let total = grid.dimensions().area();
            let live = grid.population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live));
                ui.label(format!("Dead cells: {}", total - live));
                ui.label(format!("Population: {:.1}%", (live as f32 / total as f32) * 100.0));
            });
        });
    }
}
