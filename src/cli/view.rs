use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::fmt::total;
use crate::models::SectionAggregate;
use crate::tui::{ReportView, ReportViewAction, FOOTER_STYLE, HEADER_STYLE, SECTION_STYLE};

const HEADER_ROW_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);

/// Scrollable sums table: a banner row per section followed by its streets.
pub(crate) struct SumsView {
    rows: Vec<Row<'static>>,
    offset: usize,
    visible_count: usize,
}

impl SumsView {
    pub(crate) fn new(sums: &[SectionAggregate]) -> Self {
        let mut rows = Vec::new();
        for s in sums {
            rows.push(
                Row::new([
                    Cell::from(format!("{} - Total: {}", s.section, total(s.total_value))),
                    Cell::from(""),
                    Cell::from(""),
                ])
                .style(SECTION_STYLE),
            );
            for st in &s.streets {
                rows.push(Row::new([
                    Cell::from(s.section.clone()),
                    Cell::from(st.street.clone()),
                    Cell::from(total(st.total_value)),
                ]));
            }
        }
        Self {
            rows,
            offset: 0,
            visible_count: 20,
        }
    }

    fn max_offset(&self) -> usize {
        self.rows.len().saturating_sub(self.visible_count)
    }
}

impl ReportView for SumsView {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, sep_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(" Suma Total por Macro bloque y Calle").style(HEADER_STYLE),
            header_area,
        );
        frame.render_widget(
            Paragraph::new("━".repeat(area.width as usize)).style(FOOTER_STYLE),
            sep_area,
        );

        let header_overhead = 2u16;
        let visible = content_area.height.saturating_sub(header_overhead) as usize;
        self.visible_count = visible.max(1);
        self.offset = self.offset.min(self.max_offset());

        let visible_rows: Vec<Row> = self
            .rows
            .iter()
            .skip(self.offset)
            .take(visible)
            .cloned()
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(12),
        ];
        let table = Table::new(visible_rows, widths)
            .header(
                Row::new(["Macro bloque", "Calle", "Total"])
                    .style(HEADER_ROW_STYLE)
                    .bottom_margin(1),
            )
            .column_spacing(2);
        frame.render_widget(table, content_area);

        let pos_info = if self.max_offset() > 0 {
            format!("  line {}/{}", self.offset + 1, self.rows.len())
        } else {
            String::new()
        };
        frame.render_widget(
            Paragraph::new(format!(" \u{2191}/\u{2193}=scroll  q/Esc=close{pos_info}"))
                .style(FOOTER_STYLE),
            footer_area,
        );
    }

    fn handle_key(&mut self, code: KeyCode) -> ReportViewAction {
        let page = self.visible_count;
        let max = self.max_offset();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ReportViewAction::Close,
            KeyCode::Up | KeyCode::Char('k') => self.offset = self.offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.offset = (self.offset + 1).min(max),
            KeyCode::PageUp => self.offset = self.offset.saturating_sub(page),
            KeyCode::PageDown => self.offset = (self.offset + page).min(max),
            KeyCode::Home => self.offset = 0,
            KeyCode::End => self.offset = max,
            _ => {}
        }
        ReportViewAction::Continue
    }
}
