// ui.rs - eframe front end: side panel, board painter, pattern library window

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, Key, Pos2, Rect, RichText, Sense, Stroke, Vec2};
use log::{error, warn};

use life_engine::{Category, Grid, LifeResult, PreviewBoard, SerialEngine, footprint};

use crate::LifeApp;

pub const SIDE_PANEL_WIDTH: f32 = 300.0;

const LIVE_COLOR: Color32 = Color32::from_rgb(0, 200, 0);
const DEAD_COLOR: Color32 = Color32::from_rgb(40, 40, 40);
const PLACING_COLOR: Color32 = Color32::from_rgb(230, 180, 40);
const CELL_GAP: f32 = 0.5;
const CARD_SIZE: f32 = 90.0;

const WIKIPEDIA: &str = "https://en.wikipedia.org/wiki/Conway%27s_Game_of_Life";

const DESCRIPTION: &str = "The Game of Life, also known simply as Life, is a cellular automaton \
    devised by the British mathematician John Horton Conway in 1970. It is a zero-player game, \
    meaning that its evolution is determined by its initial state, requiring no further input. \
    One interacts with the Game of Life by creating an initial configuration and observing how \
    it evolves. It is Turing complete and can simulate a universal constructor or any other \
    Turing machine.";

const RULES: [&str; 4] = [
    "Any live cell with fewer than two live neighbours dies, as if by underpopulation.",
    "Any live cell with two or three live neighbours lives on to the next generation.",
    "Any live cell with more than three live neighbours dies, as if by overpopulation.",
    "Any dead cell with exactly three live neighbours becomes a live cell, as if by reproduction.",
];

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if let Err(err) = self.board.tick_if_due(now, self.engine.as_ref()) {
            error!("board update failed: {err}");
        }
        if self.show_library {
            for card in &mut self.previews {
                if let Err(err) = card.tick_if_due(now, &SerialEngine) {
                    error!("preview '{}' update failed: {err}", card.pattern().name);
                }
            }
        }

        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| self.side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.board_view(ui));

        if self.show_library {
            self.library_window(ctx);
        }

        // Wake up for whichever timer fires first
        let mut next = self.board.time_to_next_tick(now);
        if self.show_library {
            next = self
                .previews
                .iter()
                .filter_map(|card| card.time_to_next_tick(now))
                .chain(next)
                .min();
        }
        if let Some(wait) = next {
            ctx.request_repaint_after(wait.max(Duration::from_millis(1)));
        }
    }
}

impl LifeApp {
    fn side_panel(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            ui.heading("Conway's Game of Life");
            ui.hyperlink_to("More on Wikipedia", WIKIPEDIA);
            ui.add_space(4.0);
            ui.label(DESCRIPTION);

            ui.add_space(8.0);
            ui.label(RichText::new("rules:").strong());
            for (i, rule) in RULES.iter().enumerate() {
                ui.label(format!("{}. {rule}", i + 1));
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label(RichText::new("Hover on board:").strong());
                ui.label("Pause iteration");
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new("Click:").strong());
                ui.label("Toggle life status");
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new("Click and drag:").strong());
                ui.label("Set multiple cells as live");
            });

            ui.separator();
            ui.label(format!(
                "{} cells alive ({:.1}%)",
                self.board.population(),
                self.board.population_percent()
            ));
            ui.label(format!("Generation: {}", self.board.generation()));
            ui.weak(if self.board.is_ticking() { "Running" } else { "Paused" });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("🔄 Randomize Board").clicked() {
                    self.randomize();
                }
                if ui.button("⊘ Clear Board").clicked() {
                    self.board.clear();
                }
            });
            if ui.button("📚 Show Pattern Library").clicked() {
                self.open_library();
            }

            if let Some(pattern) = self.board.placing() {
                let name = pattern.name;
                ui.separator();
                ui.label(RichText::new(format!("Placing {name}")).color(PLACING_COLOR));
                ui.small("Click the board to drop it, Esc to cancel.");
                if ui.button("Cancel").clicked() {
                    self.board.cancel_placement();
                }
            }
        });
    }

    fn board_view(&mut self, ui: &mut egui::Ui) {
        let cell = self.config.cell_size;
        let (rows, cols) = self.board.size();
        let size = Vec2::new(cols as f32 * cell, rows as f32 * cell);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;

        let inside = ui.rect_contains_pointer(rect);
        if inside != self.pointer_inside {
            if inside {
                self.board.pointer_enter();
            } else {
                self.board.pointer_leave();
            }
            self.pointer_inside = inside;
        }

        let hovered = ui
            .ctx()
            .pointer_latest_pos()
            .and_then(|pos| cell_at(rect, pos, cell, rows, cols));

        if self.board.placing().is_some() {
            if ui.input(|i| i.key_pressed(Key::Escape)) {
                self.board.cancel_placement();
            } else if let (true, Some((row, col))) = (response.clicked(), hovered) {
                self.board.commit_placement(row as isize, col as isize);
            }
        } else {
            if response.drag_started() {
                self.board.press();
            }
            if let (true, Some((row, col))) = (response.dragged(), hovered) {
                report(self.board.drag_over(row, col));
            }
            if response.drag_released() {
                self.board.release();
            }
            if let (true, Some((row, col))) = (response.clicked(), hovered) {
                report(self.board.click(row, col));
            }
        }

        painter.rect_filled(rect, 0.0, DEAD_COLOR);
        paint_cells(&painter, rect.min, self.board.grid(), None, cell, LIVE_COLOR);

        // Pending pattern follows the pointer
        let Some((row, col)) = hovered else { return };
        let Some(pattern) = self.board.placing() else { return };
        let (row, col) = (row as isize, col as isize);
        if let Some(preview) = self.board.placement_preview(row, col) {
            paint_cells(&painter, rect.min, &preview, Some(self.board.grid()), cell, PLACING_COLOR);
        }
        if let Some(fp) = footprint(self.board.grid(), pattern.grid(), row, col) {
            let min = rect.min + Vec2::new(fp.left as f32 * cell, fp.top as f32 * cell);
            let extent = Vec2::new(fp.width() as f32 * cell, fp.height() as f32 * cell);
            let outline = Rect::from_min_size(min, extent);
            painter.rect_stroke(outline, 0.0, Stroke::new(1.0, PLACING_COLOR));
        }
    }

    fn library_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_library;
        let mut chosen = None;

        egui::Window::new("Pattern Library")
            .open(&mut open)
            .collapsible(false)
            .default_width(640.0)
            .default_height(480.0)
            .show(ctx, |ui| {
                ui.label(format!(
                    "{} patterns. Click one, then click the board to place it.",
                    self.library.len()
                ));
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for category in Category::ALL {
                        ui.heading(category.label());
                        ui.horizontal_wrapped(|ui| {
                            let cards = self
                                .previews
                                .iter()
                                .filter(|c| c.pattern().category == category);
                            for card in cards {
                                let clicked = ui
                                    .vertical(|ui| {
                                        let clicked = preview_card(ui, card).clicked();
                                        ui.small(card.pattern().name);
                                        clicked
                                    })
                                    .inner;
                                if clicked {
                                    chosen = Some(card.pattern().clone());
                                }
                            }
                        });
                        ui.add_space(8.0);
                    }
                });
            });

        self.show_library = open;
        if let Some(pattern) = chosen {
            self.show_library = false;
            self.board.begin_placement(pattern);
        }
    }
}

fn report<T>(result: LifeResult<T>) {
    if let Err(err) = result {
        warn!("edit rejected: {err}");
    }
}

/// Board cell under `pos`, if any.
fn cell_at(rect: Rect, pos: Pos2, cell: f32, rows: usize, cols: usize) -> Option<(usize, usize)> {
    if !rect.contains(pos) {
        return None;
    }
    let offset = pos - rect.min;
    let (row, col) = ((offset.y / cell) as usize, (offset.x / cell) as usize);
    (row < rows && col < cols).then_some((row, col))
}

/// Fills live cells of `grid`, skipping any already alive in `under`.
fn paint_cells(
    painter: &egui::Painter,
    origin: Pos2,
    grid: &Grid,
    under: Option<&Grid>,
    cell: f32,
    color: Color32,
) {
    let side = (cell - CELL_GAP).max(1.0);
    for (row, values) in grid.iter_rows().enumerate() {
        for (col, &alive) in values.iter().enumerate() {
            if !alive || under.is_some_and(|g| g.is_alive(row, col)) {
                continue;
            }
            let min = origin + Vec2::new(col as f32 * cell, row as f32 * cell);
            painter.rect_filled(Rect::from_min_size(min, Vec2::splat(side)), 0.0, color);
        }
    }
}

fn preview_card(ui: &mut egui::Ui, card: &PreviewBoard) -> egui::Response {
    let (response, painter) = ui.allocate_painter(Vec2::splat(CARD_SIZE), Sense::click());
    let border = if response.hovered() { PLACING_COLOR } else { Color32::from_gray(70) };
    painter.rect_filled(response.rect, 4.0, DEAD_COLOR);
    painter.rect_stroke(response.rect, 4.0, Stroke::new(1.0, border));

    let grid = card.grid();
    let cell = ((CARD_SIZE - 8.0) / grid.rows().max(grid.cols()) as f32).min(7.0);
    let size = Vec2::new(grid.cols() as f32 * cell, grid.rows() as f32 * cell);
    paint_cells(&painter, response.rect.center() - size / 2.0, grid, None, cell, LIVE_COLOR);

    response.on_hover_text(format!("{} ({})", card.pattern().name, card.pattern().category))
}
