use std::path::PathBuf;

use log::{error, info, warn};

use week_gantt::config::{self, GanttSettings};
use week_gantt::io;
use week_gantt::{CategoryOrder, DisplayWindow, GestureController, Task, TaskChange, TaskId};

use crate::ui;

/// Number of tasks seeded into an empty store.
const SAMPLE_TASK_COUNT: usize = 50;

/// Main application state. Owns the task list and applies gesture commits.
pub struct GanttApp {
    pub tasks: Vec<Task>,
    pub settings: GanttSettings,
    pub category_order: CategoryOrder,
    pub window: DisplayWindow,
    pub store_path: PathBuf,
    pub selected_task: Option<TaskId>,
    pub gestures: GestureController,

    // Status message
    pub status_message: String,
}

impl GanttApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config_dir = config::config_dir();
        let settings = GanttSettings::load_or_init(&config::settings_path(&config_dir));
        let store_path = settings.resolve_data_file(&config_dir);
        let window = settings.initial_window();

        let mut app = Self {
            tasks: Vec::new(),
            category_order: settings.category_order(),
            settings,
            window,
            store_path,
            selected_task: None,
            gestures: GestureController::new(),
            status_message: "Ready".to_string(),
        };
        app.load_tasks();
        app
    }

    /// Load the store, seeding demo tasks on first run.
    fn load_tasks(&mut self) {
        match io::load_tasks(&self.store_path, self.category_order.default_category()) {
            Ok(tasks) if tasks.is_empty() => {
                info!("task store is empty, seeding sample tasks");
                self.tasks =
                    io::sample_tasks(&self.window, &self.settings.categories, SAMPLE_TASK_COUNT);
                self.save_tasks();
                self.status_message = format!("Seeded {} sample tasks", self.tasks.len());
            }
            Ok(tasks) => {
                self.status_message = format!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
            }
            Err(err) => {
                // Leave the broken file alone; nothing is saved until a commit.
                warn!("{err}");
                self.status_message = format!("Error loading: {err}");
            }
        }
    }

    pub fn save_tasks(&mut self) {
        if let Err(err) = io::save_tasks(&self.store_path, &self.tasks) {
            error!("{err}");
            self.status_message = format!("Error saving: {err}");
        }
    }

    /// Commit callback for finished gestures.
    pub fn apply_change(&mut self, task_id: TaskId, change: TaskChange) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            warn!("dropping change for unknown task {task_id}");
            return;
        };
        task.apply(&change);
        self.status_message = format!(
            "Updated '{}' ({} → {})",
            task.name,
            task.start_at.format("%a %d/%m %H:%M"),
            task.end_at.format("%a %d/%m %H:%M"),
        );
        self.save_tasks();
    }

    // --- Week navigation ---

    pub fn previous_week(&mut self) {
        self.window.previous();
    }

    pub fn next_week(&mut self) {
        self.window.next();
    }

    pub fn this_week(&mut self) {
        self.window = self.settings.initial_window();
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_tasks();
            self.status_message = "Tasks saved".to_string();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_sub())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                });
            });

        // Central panel: Gantt chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::gantt_chart::show_gantt_chart(
                    &self.tasks,
                    &self.window,
                    &self.category_order,
                    &self.settings,
                    &mut self.gestures,
                    &mut self.selected_task,
                    ui,
                )
            })
            .inner;

        // Commits land before the next frame lays the chart out again.
        for (task_id, change) in interaction.commits {
            self.apply_change(task_id, change);
        }
    }
}
