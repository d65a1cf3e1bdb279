// ui.rs - egui front end: input handling, one engine tick per frame, drawing

use std::time::Instant;

use eframe::egui;
use egui::{Color32, Rect, Sense, Stroke};
use life_engine::{Seed, patterns};
use maze::{Direction, Maze, Pos};
use tracing::{debug, info};

use crate::camera::Camera;
use crate::{ConwayApp, LifeState, Mode, interval_for};

const PATH_COLOR: Color32 = Color32::from_rgb(244, 226, 198);
const HEAD_COLOR: Color32 = Color32::from_rgb(255, 0, 0);

impl eframe::App for ConwayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Self { mode, camera, live_color, dead_color } = self;

        egui::CentralPanel::default().show(ctx, |ui| match mode {
            Mode::Life(life) => life_panel(ui, life, camera, live_color, dead_color),
            Mode::Maze(maze) => maze_panel(ui, maze, camera),
        });

        let keep_animating = match mode {
            Mode::Life(life) => life.is_running,
            Mode::Maze(maze) => !maze.is_complete(),
        };
        if keep_animating {
            ctx.request_repaint();
        }
    }
}

fn life_panel(
    ui: &mut egui::Ui,
    life: &mut LifeState,
    camera: &mut Camera,
    live_color: &mut Color32,
    dead_color: &mut Color32,
) {
    if life.is_running && life.last_update.elapsed() >= life.update_interval {
        life.engine.request_step();
        life.last_update = Instant::now();
    }
    if ui.input(|i| i.key_pressed(egui::Key::Space)) {
        life.engine.request_step();
    }

    ui.heading("Conway's Game of Life");

    // Controls
    ui.horizontal(|ui| {
        let button_text = if life.is_running { "⏸ Pause" } else { "▶ Start" };
        if ui.button(button_text).clicked() {
            life.is_running = !life.is_running;
            if life.is_running {
                life.last_update = Instant::now();
            }
        }

        if ui.button("⏭ Step").clicked() {
            life.engine.request_step();
        }

        if ui.button("⏹ Clear").clicked() {
            life.is_running = false;
            life.engine.clear();
        }

        if ui.button("🎲 Random").clicked() {
            life.is_running = false;
            life.engine.reseed(Seed::from_clock());
        }

        ui.separator();

        ui.label("Pattern:");
        egui::ComboBox::from_id_source("pattern_selector")
            .selected_text(patterns::PATTERNS[life.selected_pattern].name)
            .show_ui(ui, |ui| {
                for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                    ui.selectable_value(&mut life.selected_pattern, i, pattern.name);
                }
            });

        if ui.button("Apply Pattern").clicked() {
            life.is_running = false;
            if let Some(pattern) = patterns::PATTERNS.get(life.selected_pattern) {
                life.engine.apply_pattern_centered(pattern);
            }
        }

        ui.separator();

        ui.label(format!("Generation: {}", life.engine.generation()));
        ui.label(format!("Seed: {}", life.engine.seed()));
        if let Some(report) = life.last_report {
            ui.label(format!("Births: {}  Deaths: {}", report.births, report.deaths));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Speed:");
        let mut speed = 1.0 / life.update_interval.as_secs_f32();
        if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
            life.update_interval = interval_for(speed);
        }

        ui.separator();

        ui.label("Live:");
        ui.color_edit_button_srgba(live_color);
        ui.label("Dead:");
        ui.color_edit_button_srgba(dead_color);

        ui.separator();
        view_controls(ui, camera);
    });

    ui.label("Left click toggles a cell. Space steps once. Right drag pans, scroll zooms.");
    ui.separator();

    let n = life.engine.grid_size();
    let live_cells = life.engine.population();
    let total = n * n;
    let footer = format!(
        "Live cells: {}    Dead cells: {}    Population: {:.1}%",
        live_cells,
        total - live_cells,
        live_cells as f32 / total as f32 * 100.0
    );

    let board_size = (ui.available_size() - egui::vec2(0.0, ui.spacing().interact_size.y)).max(egui::Vec2::ZERO);
    let (response, painter) = ui.allocate_painter(board_size, Sense::click_and_drag());
    let viewport = response.rect;
    camera.fit(viewport, n, n);
    handle_camera(ui, &response, camera);

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = camera.cell_at(pos, viewport, n, n);
            if let Err(err) = life.engine.toggle(x, y) {
                debug!(%err, "ignored click");
            }
        }
    }

    if let Some(report) = life.engine.advance_if_pending() {
        if report.cycle && life.is_running {
            life.is_running = false;
            info!(generation = report.generation, "pattern repeats, pausing");
        }
        life.last_report = Some(report);
    }

    painter.rect_filled(viewport, 0.0, Color32::BLACK);
    for (coord, cell) in life.engine.cells() {
        let rect = camera.cell_rect(coord.x, coord.y, viewport, n, n);
        if !viewport.intersects(rect) {
            continue;
        }
        let color = if cell.is_alive() { *live_color } else { *dead_color };
        painter.rect_filled(rect, 1.0, color);
        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
    }

    ui.label(footer);
}

fn maze_panel(ui: &mut egui::Ui, maze: &mut Maze, camera: &mut Camera) {
    ui.heading("Maze Generator");

    ui.horizontal(|ui| {
        let mut auto = maze.auto_step();
        if ui.checkbox(&mut auto, "Auto step").changed() {
            maze.set_auto_step(auto);
        }
        if ui.button("⏭ Step").clicked() {
            maze.request_step();
        }
        ui.separator();
        let status = if maze.is_complete() { "complete" } else { "carving" };
        ui.label(format!("Status: {status}"));
        ui.label(format!("Path length: {}", maze.stack().len()));
        ui.label(format!("Seed: {}", maze.seed()));
        ui.separator();
        view_controls(ui, camera);
    });
    ui.separator();

    let (cols, rows) = (maze.width(), maze.height());
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let viewport = response.rect;
    camera.fit(viewport, cols, rows);
    handle_camera(ui, &response, camera);

    if response.clicked() {
        maze.request_step();
    }
    maze.advance_if_pending();

    painter.rect_filled(viewport, 0.0, Color32::WHITE);
    let head = maze.head();
    let wall = Stroke::new(1.0, Color32::BLACK);
    for y in 0..rows {
        for x in 0..cols {
            let Some(cell) = maze.cell(x, y) else { continue };
            let rect = camera.cell_rect(x, y, viewport, cols, rows);
            if !viewport.intersects(rect) {
                continue;
            }

            let here = Pos::new(x, y);
            if head == Some(here) {
                painter.rect_filled(rect, 0.0, HEAD_COLOR);
            } else if cell.is_visited() && maze.stack().contains(&here) {
                painter.rect_filled(rect, 0.0, PATH_COLOR);
            }

            for dir in Direction::ALL {
                if cell.has_wall(dir) {
                    let [a, b] = wall_segment(rect, dir);
                    painter.line_segment([a, b], wall);
                }
            }
        }
    }
}

fn view_controls(ui: &mut egui::Ui, camera: &mut Camera) {
    if ui.button("Reset view").clicked() {
        camera.reset();
    }
    if let Some(px) = camera.cell_px() {
        ui.label(format!("Cell: {px:.1}px"));
    }
}

fn handle_camera(ui: &egui::Ui, response: &egui::Response, camera: &mut Camera) {
    if response.dragged_by(egui::PointerButton::Secondary) {
        camera.pan(response.drag_delta());
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.scroll_delta.y);
        if scroll != 0.0 {
            camera.zoom(scroll.signum());
        }
    }
}

fn wall_segment(rect: Rect, dir: Direction) -> [egui::Pos2; 2] {
    match dir {
        Direction::North => [rect.left_top(), rect.right_top()],
        Direction::East  => [rect.right_top(), rect.right_bottom()],
        Direction::South => [rect.left_bottom(), rect.right_bottom()],
        Direction::West  => [rect.left_top(), rect.left_bottom()],
    }
}
