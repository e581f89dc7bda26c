use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, Points};

use crate::color::CategoryColors;
use crate::state::AppState;
use crate::view::{self, ChartData, ChartMode, ChartSpec, PieSlice};

// ---------------------------------------------------------------------------
// Chart section (central panel)
// ---------------------------------------------------------------------------

/// Chart-mode selector plus the active chart.
pub fn chart_section(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Chart Type:");
        egui::ComboBox::from_id_salt("chart_mode")
            .selected_text(state.chart_mode.label())
            .show_ui(ui, |ui: &mut Ui| {
                for mode in ChartMode::ALL {
                    ui.selectable_value(&mut state.chart_mode, mode, mode.label());
                }
            });
    });

    let Some(view) = &state.view else {
        return;
    };
    let Some(dataset) = &state.dataset else {
        return;
    };
    let Some(colors) = &state.category_colors else {
        return;
    };

    let spec = view::build(
        state.chart_mode,
        &view.category_averages,
        &view.table,
        dataset.len(),
    );

    ui.strong(&spec.title);
    render_chart(ui, &spec, colors);
}

fn render_chart(ui: &mut Ui, spec: &ChartSpec, colors: &CategoryColors) {
    match &spec.data {
        ChartData::Bar(averages) => {
            let categories: Vec<String> =
                averages.iter().map(|a| a.category.clone()).collect();
            let bars: Vec<Bar> = averages
                .iter()
                .enumerate()
                .map(|(i, a)| {
                    Bar::new(i as f64, a.mean_salary)
                        .width(0.6)
                        .name(&a.category)
                        .fill(colors.color_for(&a.category))
                })
                .collect();

            Plot::new("bar_chart")
                .legend(Legend::default())
                .height(400.0)
                .x_axis_formatter(move |mark, _range| category_tick(&categories, mark.value))
                .y_axis_label("Average Salary ($)")
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars));
                });
        }

        ChartData::Pie(slices) => pie_chart(ui, slices, colors),

        ChartData::Scatter(points) => {
            let categories: Vec<String> = {
                let mut cats: Vec<String> =
                    points.iter().map(|p| p.category.clone()).collect();
                cats.sort();
                cats.dedup();
                cats
            };
            let ticks = categories.clone();

            Plot::new("scatter_chart")
                .height(400.0)
                .x_axis_formatter(move |mark, _range| category_tick(&ticks, mark.value))
                .y_axis_label("Salary ($)")
                .show(ui, |plot_ui| {
                    for p in points {
                        let x = categories
                            .iter()
                            .position(|c| c == &p.category)
                            .unwrap_or(0) as f64;
                        let marker = Points::new(vec![[x, p.salary]])
                            .radius(p.age as f32 / 6.0)
                            .color(colors.color_for(&p.category))
                            .name(format!("{} ({}), Age {}", p.name, p.city, p.age));
                        plot_ui.points(marker);
                    }
                });
        }

        ChartData::Histogram(bins) => {
            let bars: Vec<Bar> = bins
                .iter()
                .map(|b| {
                    Bar::new((b.lo + b.hi) / 2.0, b.count as f64).width(b.hi - b.lo)
                })
                .collect();

            Plot::new("histogram")
                .height(400.0)
                .x_axis_label("Salary ($)")
                .y_axis_label("Count")
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars));
                });
        }

        ChartData::BoxPlot(boxes) => {
            let categories: Vec<String> =
                boxes.iter().map(|b| b.category.clone()).collect();
            let elems: Vec<BoxElem> = boxes
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    let color = colors.color_for(&b.category);
                    BoxElem::new(
                        i as f64,
                        BoxSpread::new(
                            b.lower_whisker,
                            b.q1,
                            b.median,
                            b.q3,
                            b.upper_whisker,
                        ),
                    )
                    .name(&b.category)
                    .fill(color.linear_multiply(0.4))
                    .stroke(Stroke::new(1.5, color))
                })
                .collect();

            Plot::new("box_plot")
                .legend(Legend::default())
                .height(400.0)
                .x_axis_formatter(move |mark, _range| category_tick(&categories, mark.value))
                .y_axis_label("Salary ($)")
                .show(ui, |plot_ui| {
                    plot_ui.box_plot(BoxPlot::new(elems));
                });
        }
    }
}

/// Map integer grid marks back to category labels; fractional marks get no
/// label.
fn category_tick(categories: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories
        .get(idx as usize)
        .cloned()
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pie chart (painter-drawn; egui_plot has no pie primitive)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, slices: &[PieSlice], colors: &CategoryColors) {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    if slices.is_empty() || total <= 0.0 {
        ui.label("No data to chart.");
        return;
    }

    let size = Vec2::new(ui.available_width(), 400.0);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = rect.height().min(rect.width()) * 0.4;

    let mut start = -std::f32::consts::FRAC_PI_2;
    for slice in slices {
        let fraction = (slice.value / total) as f32;
        let sweep = fraction * std::f32::consts::TAU;
        let color = colors.color_for(&slice.label);

        // Triangle fan from the centre.
        let steps = ((sweep / 0.05).ceil() as usize).max(2);
        let mut vertices = vec![center];
        for i in 0..=steps {
            let angle = start + sweep * i as f32 / steps as f32;
            vertices.push(center + Vec2::new(angle.cos(), angle.sin()) * radius);
        }
        painter.add(egui::Shape::convex_polygon(
            vertices,
            color,
            Stroke::new(1.0, Color32::WHITE),
        ));

        let mid = start + sweep / 2.0;
        let label_pos = center + Vec2::new(mid.cos(), mid.sin()) * radius * 1.15;
        painter.text(
            label_pos,
            Align2::CENTER_CENTER,
            format!("{} ({:.1}%)", slice.label, fraction * 100.0),
            FontId::proportional(13.0),
            ui.visuals().text_color(),
        );

        start += sweep;
    }
}

// ---------------------------------------------------------------------------
// Correlation section
// ---------------------------------------------------------------------------

/// Numeric-column multiselect plus the correlation heatmap (or the inline
/// warning when fewer than two columns are selected).
pub fn correlation_section(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };

    ui.separator();
    ui.heading("Correlation Analysis");

    let mut changed = false;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Columns:");
        for column in &dataset.numeric_columns {
            let mut checked = state.correlation_columns.contains(column);
            if ui.checkbox(&mut checked, column).changed() {
                AppState::toggle_selection(&mut state.correlation_columns, column);
                changed = true;
            }
        }
    });
    if changed {
        state.recompute();
    }

    let Some(view) = &state.view else {
        return;
    };

    match &view.correlation {
        Some(matrix) => {
            let title = format!(
                "Correlation Heatmap{}",
                view::title_suffix(view.metrics.filtered_count, dataset.len())
            );
            ui.strong(title);
            heatmap_grid(ui, &matrix.columns, &matrix.values);
        }
        None => {
            ui.label(
                RichText::new(
                    "Select at least two numeric columns for correlation analysis.",
                )
                .color(Color32::ORANGE),
            );
        }
    }
}

fn heatmap_grid(ui: &mut Ui, columns: &[String], values: &[Vec<f64>]) {
    egui::Grid::new("correlation_heatmap")
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for col in columns {
                ui.strong(col);
            }
            ui.end_row();

            for (i, row_name) in columns.iter().enumerate() {
                ui.strong(row_name);
                for j in 0..columns.len() {
                    heatmap_cell(ui, values[i][j]);
                }
                ui.end_row();
            }
        });
}

fn heatmap_cell(ui: &mut Ui, value: f64) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(72.0, 26.0), Sense::hover());
    let fill = correlation_color(value);
    ui.painter().rect_filled(rect, 2.0, fill);
    let text = if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    };
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(12.0),
        Color32::BLACK,
    );
}

/// Diverging blue → white → red scale over [-1, 1]; NaN is grey.
fn correlation_color(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::GRAY;
    }
    let t = value.clamp(-1.0, 1.0) as f32;
    let blend = |a: u8, b: u8, t: f32| (a as f32 + (b as f32 - a as f32) * t) as u8;
    if t >= 0.0 {
        Color32::from_rgb(255, blend(255, 60, t), blend(255, 60, t))
    } else {
        Color32::from_rgb(blend(255, 70, -t), blend(255, 120, -t), 255)
    }
}
