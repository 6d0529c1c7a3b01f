// Calendar Widget demo
// Renders the month grid or week layout of an events file as text

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

use calendar_widget::models::settings::{default_config_path, default_data_dir, CalendarConfig};
use calendar_widget::models::ui::ViewMode;
use calendar_widget::services::persistence::JsonFileRepository;
use calendar_widget::widget::views::{MonthModel, ViewModel, WeekModel};
use calendar_widget::widget::CalendarWidget;

#[derive(Debug, Parser)]
#[command(name = "calendar-widget", about = "Month and week calendar views in the terminal")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Events file (JSON)
    #[arg(long)]
    events: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the month grid containing DATE
    Month {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the week layout containing DATE
    Week {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Add an event, e.g. `add "Standup" --start 2025-01-15T09:00 --end 2025-01-15T09:30`
    Add {
        title: String,
        #[arg(long, value_parser = parse_instant)]
        start: NaiveDateTime,
        #[arg(long, value_parser = parse_instant)]
        end: NaiveDateTime,
        #[arg(long)]
        category: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.config.or_else(default_config_path) {
        Some(path) => CalendarConfig::load(&path)?,
        None => CalendarConfig::default(),
    };
    let events_path = cli
        .events
        .unwrap_or_else(|| config.events_file(&default_data_dir()));
    let repository = JsonFileRepository::new(events_path);
    let mut widget = CalendarWidget::load(config, &repository)?;
    let today = Local::now().date_naive();

    match cli.command {
        Command::Month { date } => {
            widget.go_to(date.unwrap_or(today));
            widget.set_mode(ViewMode::Month);
            print_view(&widget.render_at(today));
        }
        Command::Week { date } => {
            widget.go_to(date.unwrap_or(today));
            widget.set_mode(ViewMode::Week);
            print_view(&widget.render_at(today));
        }
        Command::Add {
            title,
            start,
            end,
            category,
        } => {
            widget.open_create_range(start, end);
            if let Some(draft) = widget.form_mut() {
                draft.title = title;
                if let Some(category) = category {
                    draft.category = category;
                }
            }
            let created = widget.submit_form()?;
            widget.persist_now(&repository)?;
            if let Some(event) = created {
                println!("Added {} ({})", event.title, event.id);
            }
        }
    }

    Ok(())
}

fn parse_instant(raw: &str) -> Result<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .with_context(|| format!("invalid date-time '{raw}', expected YYYY-MM-DDTHH:MM"))
}

fn print_view(view: &ViewModel<'_>) {
    println!("{}", view.title());
    match view {
        ViewModel::Month(model) => print_month(model),
        ViewModel::Week(model) => print_week(model),
    }
}

fn print_month(model: &MonthModel<'_>) {
    println!("{}", model.weekday_labels.map(|label| format!("{label:>6}")).concat());
    for row in model.rows() {
        let line: String = row
            .iter()
            .map(|cell| {
                let marker = if cell.is_today { '*' } else { ' ' };
                let day = if cell.in_current_month {
                    cell.day.format("%e").to_string()
                } else {
                    "  ".to_string()
                };
                let count = match cell.events.len() {
                    0 => "  ".to_string(),
                    n => format!("({n})"),
                };
                format!("{marker}{day}{count:<3}")
            })
            .collect();
        println!("{line}");
    }

    for cell in model.cells.iter().filter(|cell| cell.in_current_month) {
        if cell.events.is_empty() {
            continue;
        }
        println!();
        println!("{}", cell.accessible_label());
        for event in cell.visible_events() {
            println!("  {} {}", event.start.format("%H:%M"), event.title);
        }
        if cell.overflow_count() > 0 {
            println!("  +{} more", cell.overflow_count());
        }
    }
}

fn print_week(model: &WeekModel<'_>) {
    for (day_index, day) in model.days.iter().enumerate() {
        let marker = if model.is_today(day_index) { " (today)" } else { "" };
        println!();
        println!("{} {}{}", model.weekday_labels[day_index], day.format("%b %-d"), marker);
        for positioned in model.events_for_day(day_index) {
            println!(
                "  {}  [col {}/{}]",
                positioned.accessible_label(),
                positioned.column + 1,
                positioned.columns
            );
        }
    }
}
