use chrono::{Datelike, Local, Weekday};
use egui::{Color32, Event, Id, Pos2, Rect, Rounding, Sense, Stroke, TouchPhase, Ui, Vec2};

use crate::ui::theme;
use week_gantt::layout::PreviewGeometry;
use week_gantt::{
    layout_chart, BarZone, CategoryOrder, DisplayWindow, GanttRow, GanttSettings,
    GestureController, PointerButton, StripMetrics, Task, TaskChange, TaskId,
};

/// Result details from interactions in the Gantt chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// Finished gestures, in the order they completed.
    pub commits: Vec<(TaskId, TaskChange)>,
}

/// Render the week timeline and route pointer input to the gesture
/// controller.
pub fn show_gantt_chart(
    tasks: &[Task],
    window: &DisplayWindow,
    order: &CategoryOrder,
    settings: &GanttSettings,
    gestures: &mut GestureController,
    selected_task: &mut Option<TaskId>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let rows = layout_chart(tasks, window, order);

    let day_width = settings.day_width;
    let lane_height = settings.row_height;
    let available = ui.available_size();
    let chart_width = theme::LABEL_COLUMN_WIDTH + day_width * window.length as f32;
    let chart_height = theme::HEADER_HEIGHT + rows_height(&rows, lane_height) + 40.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width.max(available.x), chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            // Moves with the scroll offset, so day offsets measured from it
            // are scroll invariant.
            let metrics = StripMetrics {
                content_origin_x: origin.x + theme::LABEL_COLUMN_WIDTH,
                day_width_px: day_width,
            };
            let mut consumed_click = false;

            route_pointer_events(ui, gestures, window, &metrics, &mut interaction);
            gestures.on_frame();

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_day_columns(&painter, origin, window, day_width, response.rect.height());
            draw_timeline_header(&painter, origin, window, day_width, chart_width);

            let mut y = origin.y + theme::HEADER_HEIGHT;
            let mut block_top = y;
            for row in &rows {
                match row {
                    GanttRow::CategoryHeader { category, lanes } => {
                        draw_category_header(&painter, origin, y, chart_width, category, *lanes);
                        block_top = y + theme::CATEGORY_HEADER_HEIGHT;
                        y = block_top + *lanes as f32 * lane_height;
                        painter.line_segment(
                            [Pos2::new(origin.x, y), Pos2::new(origin.x + chart_width, y)],
                            Stroke::new(0.5, theme::BORDER_SUBTLE),
                        );
                    }
                    GanttRow::TaskBar {
                        task,
                        lane,
                        geometry,
                    } => {
                        let placement = gestures
                            .preview(task.id, window)
                            .unwrap_or_else(|| PreviewGeometry::from(*geometry));
                        let lane_top = block_top + *lane as f32 * lane_height;
                        let is_selected = *selected_task == Some(task.id);
                        let bar_rect = draw_task_bar(
                            &painter,
                            metrics.content_origin_x,
                            lane_top,
                            lane_height,
                            day_width,
                            task,
                            placement,
                            is_selected,
                        );

                        if handle_bar_input(ui, task, bar_rect, window, &metrics, gestures) {
                            *selected_task = Some(task.id);
                            consumed_click = true;
                        }
                        if gestures.active().map(|g| g.task_id()) == Some(task.id) || is_selected {
                            draw_resize_handle(&painter, bar_rect);
                        }
                    }
                }
            }

            if response.clicked() && !consumed_click {
                *selected_task = None;
            }
        });

    interaction
}

fn rows_height(rows: &[GanttRow<'_>], lane_height: f32) -> f32 {
    rows.iter()
        .map(|row| match row {
            GanttRow::CategoryHeader { lanes, .. } => {
                theme::CATEGORY_HEADER_HEIGHT + *lanes as f32 * lane_height
            }
            GanttRow::TaskBar { .. } => 0.0,
        })
        .sum()
}

/// Feed this frame's pointer events to the captured gesture, if any.
fn route_pointer_events(
    ui: &Ui,
    gestures: &mut GestureController,
    window: &DisplayWindow,
    metrics: &StripMetrics,
    interaction: &mut ChartInteraction,
) {
    if !gestures.is_active() {
        return;
    }

    let (moves, released, cancelled, latest_x) = ui.input(|i| {
        let moves: Vec<f32> = i
            .events
            .iter()
            .filter_map(|event| match event {
                Event::PointerMoved(pos) => Some(pos.x),
                _ => None,
            })
            .collect();
        let cancelled = !i.focused
            || i.events.iter().any(|event| {
                matches!(
                    event,
                    Event::PointerGone
                        | Event::Touch {
                            phase: TouchPhase::Cancel,
                            ..
                        }
                )
            });
        let released = i.pointer.primary_released() || !i.pointer.primary_down();
        (moves, released, cancelled, i.pointer.latest_pos().map(|p| p.x))
    });

    let mut wants_frame = false;
    for x in moves {
        wants_frame |= gestures.pointer_move(x, metrics);
    }
    if wants_frame {
        ui.ctx().request_repaint();
    }

    let commits = &mut interaction.commits;
    if cancelled {
        gestures.pointer_cancel(window, |id, change| commits.push((id, change)));
    } else if released {
        gestures.pointer_up(latest_x, window, metrics, |id, change| {
            commits.push((id, change));
        });
    }
}

/// Hit-test a bar and start a gesture on press. Returns true if the bar was
/// clicked or captured.
fn handle_bar_input(
    ui: &Ui,
    task: &Task,
    bar_rect: Rect,
    window: &DisplayWindow,
    metrics: &StripMetrics,
    gestures: &mut GestureController,
) -> bool {
    let response = ui.interact(
        bar_rect.expand2(Vec2::new(theme::HANDLE_WIDTH * 0.5, 0.0)),
        bar_id(task.id),
        Sense::click_and_drag(),
    );

    let hover_x = response.hover_pos().map(|p| p.x);
    if let Some(x) = hover_x {
        let cursor = match BarZone::hit(x, bar_rect.right(), theme::HANDLE_WIDTH) {
            BarZone::ResizeHandle => egui::CursorIcon::ResizeHorizontal,
            BarZone::Body if gestures.is_active() => egui::CursorIcon::Grabbing,
            BarZone::Body => egui::CursorIcon::Grab,
        };
        ui.ctx().set_cursor_icon(cursor);
        show_bar_tooltip(ui, task);
    }

    let mut captured = false;
    if response.is_pointer_button_down_on() && !gestures.is_active() {
        let press = ui.input(|i| {
            let button = [
                (egui::PointerButton::Primary, PointerButton::Primary),
                (egui::PointerButton::Secondary, PointerButton::Secondary),
                (egui::PointerButton::Middle, PointerButton::Middle),
            ]
            .into_iter()
            .find(|(egui_button, _)| i.pointer.button_pressed(*egui_button))
            .map(|(_, button)| button);
            button.zip(i.pointer.press_origin())
        });
        if let Some((button, pos)) = press {
            let zone = BarZone::hit(pos.x, bar_rect.right(), theme::HANDLE_WIDTH);
            captured = gestures.pointer_down(task, zone, button, pos.x, window, metrics);
        }
    }

    captured || response.clicked()
}

fn bar_id(task_id: TaskId) -> Id {
    Id::new(("task-bar", task_id))
}

fn show_bar_tooltip(ui: &Ui, task: &Task) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        Id::new(("task-tip", task.id)),
        |ui| {
            ui.strong(&task.name);
            ui.label(format!(
                "{} → {}",
                task.start_at.format("%a %d/%m %H:%M"),
                task.end_at.format("%a %d/%m %H:%M"),
            ));
            ui.label(format!("{} · {}", task.category, task.status.label()));
        },
    );
}

fn draw_day_columns(
    painter: &egui::Painter,
    origin: Pos2,
    window: &DisplayWindow,
    day_width: f32,
    height: f32,
) {
    let strip_x = origin.x + theme::LABEL_COLUMN_WIDTH;
    let today = Some(window.day_index(Local::now().naive_local())).filter(|&i| window.contains_day(i));

    for (i, date) in window.dates().enumerate() {
        let x = strip_x + i as f32 * day_width;
        let column = Rect::from_min_size(
            Pos2::new(x, origin.y + theme::HEADER_HEIGHT),
            Vec2::new(day_width, height - theme::HEADER_HEIGHT),
        );
        if today == Some(i as i64) {
            painter.rect_filled(column, 0.0, theme::BG_TODAY);
        } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            painter.rect_filled(column, 0.0, Color32::from_black_alpha(30));
        }
        painter.line_segment(
            [column.left_top(), column.left_bottom()],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    window: &DisplayWindow,
    day_width: f32,
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, theme::HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + theme::HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + theme::HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    painter.text(
        Pos2::new(origin.x + 10.0, origin.y + theme::HEADER_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        window.first_day().format("%B %Y").to_string(),
        theme::font_header(),
        theme::TEXT_PRIMARY,
    );

    let strip_x = origin.x + theme::LABEL_COLUMN_WIDTH;
    let today = Local::now().date_naive();
    for (i, date) in window.dates().enumerate() {
        let x = strip_x + i as f32 * day_width;
        let color = if date == today {
            theme::ACCENT
        } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(x + day_width / 2.0, origin.y + 14.0),
            egui::Align2::CENTER_CENTER,
            date.format("%a").to_string(),
            theme::font_sub(),
            color,
        );
        painter.text(
            Pos2::new(x + day_width / 2.0, origin.y + 30.0),
            egui::Align2::CENTER_CENTER,
            date.format("%d").to_string(),
            theme::font_header(),
            color,
        );
    }
}

fn draw_category_header(
    painter: &egui::Painter,
    origin: Pos2,
    y: f32,
    width: f32,
    category: &str,
    lanes: usize,
) {
    let band = Rect::from_min_size(
        Pos2::new(origin.x, y),
        Vec2::new(width, theme::CATEGORY_HEADER_HEIGHT),
    );
    painter.rect_filled(band, 0.0, theme::BG_CATEGORY);
    painter.rect_filled(
        Rect::from_min_size(band.min, Vec2::new(4.0, band.height())),
        0.0,
        theme::category_color(category),
    );
    painter.text(
        Pos2::new(origin.x + 12.0, band.center().y),
        egui::Align2::LEFT_CENTER,
        category,
        theme::font_header(),
        theme::TEXT_PRIMARY,
    );
    let lane_label = if lanes == 1 {
        "1 lane".to_string()
    } else {
        format!("{lanes} lanes")
    };
    painter.text(
        Pos2::new(origin.x + theme::LABEL_COLUMN_WIDTH - 8.0, band.center().y),
        egui::Align2::RIGHT_CENTER,
        lane_label,
        theme::font_sub(),
        theme::TEXT_DIM,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_task_bar(
    painter: &egui::Painter,
    strip_x: f32,
    lane_top: f32,
    lane_height: f32,
    day_width: f32,
    task: &Task,
    placement: PreviewGeometry,
    is_selected: bool,
) -> Rect {
    let inset = theme::BAR_INSET;
    let bar_rect = Rect::from_min_size(
        Pos2::new(strip_x + placement.left_days * day_width + 1.0, lane_top + inset),
        Vec2::new(
            (placement.width_days * day_width - 2.0).max(6.0),
            lane_height - inset * 2.0,
        ),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(bar_rect, rounding, theme::category_color(&task.category));

    // Status strip along the bottom edge
    let strip = Rect::from_min_max(
        Pos2::new(bar_rect.left() + 2.0, bar_rect.bottom() - 3.0),
        Pos2::new(bar_rect.right() - 2.0, bar_rect.bottom() - 1.0),
    );
    painter.rect_filled(strip, Rounding::same(1.0), theme::status_color(task.status));

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(task.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect.shrink2(Vec2::new(theme::HANDLE_WIDTH, 0.0)));
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

/// Pill on the trailing edge marking the resize affordance.
fn draw_resize_handle(painter: &egui::Painter, bar_rect: Rect) {
    let handle_h = bar_rect.height() * 0.55;
    let handle = Rect::from_min_size(
        Pos2::new(bar_rect.right() - 5.0, bar_rect.center().y - handle_h / 2.0),
        Vec2::new(3.0, handle_h),
    );
    painter.rect_filled(handle, Rounding::same(1.5), theme::HANDLE_COLOR);
}
