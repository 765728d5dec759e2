use crate::models::{Cylinder, DiskSchedulingResult, SchedulingResult};
use crate::utils::color::{rgb_of, IDLE_RGB};
use crate::utils::constants::IDLE_LABEL;
use plotters::prelude::*;
use std::error::Error;

/// Plotters 차트 생성을 위한 공통 구조체
pub struct PlottersConfig {
    pub width: u32,
    pub height: u32,
    pub font_family: &'static str,
    pub title_font_size: u32,
    pub axis_label_font_size: u32,
    pub tick_label_font_size: u32,
    pub point_size: u32,
    pub legend_spacing: u32,
}

impl Default for PlottersConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
            font_family: "sans-serif",
            title_font_size: 30,
            axis_label_font_size: 20,
            tick_label_font_size: 15,
            point_size: 4,
            legend_spacing: 30,
        }
    }
}

fn to_rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// 레전드 항목: 프로세스는 입력 순서대로, idle 은 마지막에 한 번
pub fn gantt_legend(result: &SchedulingResult) -> Vec<(String, RGBColor)> {
    let mut legends: Vec<(String, RGBColor)> = result
        .processes
        .iter()
        .map(|p| (p.process.id.clone(), to_rgb(rgb_of(p.input_index))))
        .collect();
    if result.timeline.iter().any(|b| b.occupant.is_idle()) {
        legends.push((IDLE_LABEL.to_string(), to_rgb(IDLE_RGB)));
    }
    legends
}

/// 레전드 그리기 함수
pub fn draw_legend(
    legend_area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    legends: &[(String, RGBColor)],
    config: &PlottersConfig,
) -> Result<(), Box<dyn Error>> {
    legend_area.fill(&WHITE.mix(0.95))?;

    for (i, (name, color)) in legends.iter().enumerate() {
        let spacing = config.legend_spacing as usize;
        let y_pos = (50 + i * spacing) as i32;

        legend_area.draw(&Rectangle::new(
            [(20_i32, y_pos - 8), (50_i32, y_pos + 8)],
            color.filled(),
        ))?;

        legend_area.draw(&Text::new(
            name.clone(),
            (60_i32, y_pos - 8),
            (config.font_family, config.tick_label_font_size),
        ))?;
    }

    Ok(())
}

/// CPU 타임라인 Gantt 차트를 PNG 로 저장
pub fn create_gantt_chart(
    result: &SchedulingResult,
    title: &str,
    output_prefix: &str,
    config: &PlottersConfig,
) -> Result<String, String> {
    if result.makespan() == 0 {
        return Err("Empty timeline, nothing to draw".to_string());
    }

    let png_path = format!("{}_gantt.png", output_prefix);
    draw_gantt(result, title, &png_path, config)?;
    Ok(png_path)
}

fn draw_gantt(
    result: &SchedulingResult,
    title: &str,
    png_path: &str,
    config: &PlottersConfig,
) -> Result<(), String> {
    let makespan = result.makespan();
    let root = BitMapBackend::new(png_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let (chart_area, legend_area) = root.split_horizontally(config.width - 150);

    let mut chart = ChartBuilder::on(&chart_area)
        .caption(title, (config.font_family, config.title_font_size).into_font())
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(20)
        .build_cartesian_2d(0f64..makespan as f64, 0f64..1f64)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .disable_y_axis()
        .x_desc("Time")
        .axis_desc_style((config.font_family, config.axis_label_font_size))
        .label_style((config.font_family, config.tick_label_font_size))
        .draw()
        .map_err(|e| e.to_string())?;

    // 구간 막대
    chart
        .draw_series(result.timeline.iter().map(|block| {
            let color = match block.input_index {
                Some(index) => to_rgb(rgb_of(index)),
                None => to_rgb(IDLE_RGB),
            };
            Rectangle::new(
                [(block.start as f64, 0.3), (block.end as f64, 0.7)],
                color.filled(),
            )
        }))
        .map_err(|e| e.to_string())?;

    // 구간 라벨
    chart
        .draw_series(result.timeline.iter().map(|block| {
            Text::new(
                block.occupant.label().to_string(),
                (block.start as f64 + 0.1, 0.8),
                (config.font_family, config.tick_label_font_size),
            )
        }))
        .map_err(|e| e.to_string())?;

    draw_legend(&legend_area, &gantt_legend(result), config).map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

/// 디스크 헤드 이동 경로 차트 (x: 실린더, y: 단계)
pub fn create_head_movement_chart(
    result: &DiskSchedulingResult,
    title: &str,
    max_cylinder: Cylinder,
    output_prefix: &str,
    config: &PlottersConfig,
) -> Result<String, String> {
    if result.is_empty() {
        return Err("No head movement to draw".to_string());
    }

    let png_path = format!("{}_head_movement.png", output_prefix);
    draw_head_movement(result, title, max_cylinder, &png_path, config)?;
    Ok(png_path)
}

fn draw_head_movement(
    result: &DiskSchedulingResult,
    title: &str,
    max_cylinder: Cylinder,
    png_path: &str,
    config: &PlottersConfig,
) -> Result<(), String> {
    let points: Vec<(f64, f64)> = result
        .sequence
        .iter()
        .enumerate()
        .map(|(step, &cylinder)| (cylinder as f64, step as f64))
        .collect();
    let last_step = (points.len() - 1) as f64;

    let root = BitMapBackend::new(png_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (config.font_family, config.title_font_size).into_font())
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..max_cylinder.max(1) as f64, 0f64..last_step.max(1.0))
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc("Cylinder")
        .y_desc("Step")
        .axis_desc_style((config.font_family, config.axis_label_font_size))
        .label_style((config.font_family, config.tick_label_font_size))
        .draw()
        .map_err(|e| e.to_string())?;

    let line_color = to_rgb(rgb_of(4));
    chart
        .draw_series(LineSeries::new(points.iter().copied(), line_color.stroke_width(2)))
        .map_err(|e| e.to_string())?;

    // 경계 이동으로 도착한 점은 idle 색
    let mut colors = vec![line_color];
    colors.extend(result.seek_operations.iter().map(|op| match op.request {
        Some(_) => line_color,
        None => to_rgb(IDLE_RGB),
    }));
    chart
        .draw_series(
            points
                .iter()
                .zip(colors)
                .map(|(&point, color)| Circle::new(point, config.point_size, color.filled())),
        )
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}
