//! Output rendering and formatting

use comfy_table::{
    presets::{ASCII_FULL, UTF8_FULL},
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
};
use console::{Style, Term};
use dine_config::Config;
use dine_types::{ColorChoice, OutputFormat, RunReport, SeatTopology, SlotTopology};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Output format (JSON, plain ASCII tables, or styled terminal tables)
    format: OutputFormat,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(format: OutputFormat, color_choice: ColorChoice) -> Self {
        Self {
            format,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render the outcome of a simulation run
    pub fn render_report(&self, report: &RunReport) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return Self::render_json(report);
        }

        let mut agents = self.table();
        agents.set_header(vec![
            header("Agent"),
            header("Eaten"),
            header("Waits"),
            header("Status"),
        ]);
        for agent in &report.agents {
            let status = if agent.starved {
                self.colored(Cell::new("starved"), Color::Red)
            } else {
                self.colored(Cell::new("fed"), Color::Green)
            };
            agents.add_row(vec![
                Cell::new(agent.id),
                number(agent.eaten_count),
                number(agent.wait_count),
                status,
            ]);
        }

        let mut resources = self.table();
        resources.set_header(vec![header("Resource"), header("Grabs"), header("Uses")]);
        for resource in &report.resources {
            resources.add_row(vec![
                Cell::new(resource.id),
                number(resource.grab_count),
                number(resource.use_count),
            ]);
        }

        println!("{agents}");
        println!("{resources}");
        self.render_summary(report);
        Ok(())
    }

    /// Render the ring wiring
    pub fn render_topology(&self, seats: &[SeatTopology], slots: &[SlotTopology]) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            let value = serde_json::json!({ "seats": seats, "slots": slots });
            return Self::render_json(&value);
        }

        let mut table = self.table();
        table.set_header(vec![
            header("Left resource"),
            header("Agent"),
            header("Right resource"),
        ]);
        for seat in seats {
            table.add_row(vec![
                Cell::new(seat.left_resource).set_alignment(CellAlignment::Right),
                self.colored(Cell::new(seat.agent), Color::Cyan)
                    .set_alignment(CellAlignment::Center),
                Cell::new(seat.right_resource),
            ]);
        }
        println!("{table}");

        for slot in slots {
            println!(
                "{} <- {} -> {}",
                slot.left_agent,
                self.style(Style::new().bold()).apply_to(slot.resource),
                slot.right_agent
            );
        }
        Ok(())
    }

    /// Render the effective configuration
    pub fn render_config(&self, config: &Config) -> Result<(), crate::error::CliError> {
        if self.format == OutputFormat::Json {
            return Ok(Self::render_json(config)?);
        }
        print!("{}", config.to_toml_string()?);
        Ok(())
    }

    fn render_summary(&self, report: &RunReport) {
        let starved = report.starved_agents().count();
        let bold = self.style(Style::new().bold());
        println!(
            "{} {} of {} servings eaten by {} agents in {} ms ({} waits)",
            bold.apply_to("Summary:"),
            report.servings_eaten,
            report.servings_total,
            report.agents.len(),
            report.elapsed_ms,
            report.total_waits(),
        );
        if starved > 0 {
            let warn = self.style(Style::new().yellow());
            println!("{}", warn.apply_to(format!("{starved} agent(s) never ate")));
        }
    }

    fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        let preset = if self.format == OutputFormat::Plain {
            ASCII_FULL
        } else {
            UTF8_FULL
        };
        table
            .load_preset(preset)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    fn colors_enabled(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                self.format == OutputFormat::Tty && self.term.features().colors_supported()
            }
        }
    }

    fn colored(&self, cell: Cell, color: Color) -> Cell {
        if self.colors_enabled() {
            cell.fg(color)
        } else {
            cell
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.colors_enabled() {
            style.force_styling(true)
        } else {
            Style::new()
        }
    }
}

fn header(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold)
}

fn number(value: u64) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}
