use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::filter::{self, FilterState};
use crate::fmt::total;
use crate::models::ParsedRecord;
use crate::tui::{ReportView, ReportViewAction, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Shift,
    Section,
    Street,
    Trench,
}

impl FilterField {
    const ALL: [FilterField; 4] = [Self::Shift, Self::Section, Self::Street, Self::Trench];

    fn label(&self) -> &'static str {
        match self {
            Self::Shift => "Turno",
            Self::Section => "Macro Bloque",
            Self::Street => "Calle",
            Self::Trench => "Zanja",
        }
    }
}

/// Interactive record table with cascading filter selectors.
///
/// The street selector only appears once a section is chosen, the trench
/// selector once a street is chosen.
pub struct FilterBrowser {
    records: Vec<ParsedRecord>,
    filters: FilterState,
    focus: FilterField,
    visible: Vec<ParsedRecord>,
    offset: usize,
    selected: usize,
    visible_count: usize,
    table_state: TableState,
}

impl FilterBrowser {
    pub fn new(records: Vec<ParsedRecord>, filters: FilterState) -> Self {
        let mut browser = Self {
            records,
            filters,
            focus: FilterField::Shift,
            visible: Vec::new(),
            offset: 0,
            selected: 0,
            visible_count: 20,
            table_state: TableState::default(),
        };
        browser.refresh();
        browser
    }

    fn is_shown(&self, field: FilterField) -> bool {
        match field {
            FilterField::Shift | FilterField::Section => true,
            FilterField::Street => !self.filters.section.is_empty(),
            FilterField::Trench => !self.filters.street.is_empty(),
        }
    }

    fn current(&self, field: FilterField) -> &str {
        match field {
            FilterField::Shift => &self.filters.shift,
            FilterField::Section => &self.filters.section,
            FilterField::Street => &self.filters.street,
            FilterField::Trench => &self.filters.trench,
        }
    }

    /// Choices for a selector, "All" (empty) first.
    fn options(&self, field: FilterField) -> Vec<String> {
        let derived = match field {
            FilterField::Shift => filter::available_shifts(&self.records),
            FilterField::Section => filter::available_sections(&self.records),
            FilterField::Street => filter::available_streets(&self.records, &self.filters.section),
            FilterField::Trench => filter::available_trenches(
                &self.records,
                &self.filters.section,
                &self.filters.street,
            ),
        };
        let mut opts = vec![String::new()];
        opts.extend(derived.into_iter().filter(|o| !o.is_empty()));
        opts
    }

    fn select(&mut self, field: FilterField, value: String) {
        match field {
            FilterField::Shift => self.filters.select_shift(value),
            FilterField::Section => self.filters.select_section(value),
            FilterField::Street => self.filters.select_street(value),
            FilterField::Trench => self.filters.select_trench(value),
        }
        self.refresh();
    }

    fn cycle(&mut self, delta: isize) {
        let opts = self.options(self.focus);
        let idx = opts
            .iter()
            .position(|o| o == self.current(self.focus))
            .unwrap_or(0) as isize;
        let next = (idx + delta).rem_euclid(opts.len() as isize) as usize;
        let value = opts[next].clone();
        self.select(self.focus, value);
    }

    fn move_focus(&mut self, forward: bool) {
        let len = FilterField::ALL.len();
        let mut idx = FilterField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        for _ in 0..len {
            idx = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
            if self.is_shown(FilterField::ALL[idx]) {
                self.focus = FilterField::ALL[idx];
                return;
            }
        }
    }

    /// Recompute the visible rows from the full record set.
    fn refresh(&mut self) {
        self.visible = filter::apply_filters(&self.records, &self.filters);
        self.offset = 0;
        self.selected = 0;
        while !self.is_shown(self.focus) {
            self.move_focus(false);
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        let target = (self.selected as isize + delta).clamp(0, last as isize) as usize;
        self.selected = target;
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.visible_count {
            self.offset = self.selected + 1 - self.visible_count;
        }
    }

    fn visible_total(&self) -> f64 {
        self.visible.iter().map(|r| r.value).sum()
    }

    fn filter_bar(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for field in FilterField::ALL {
            if !self.is_shown(field) {
                continue;
            }
            let value = match self.current(field) {
                "" => "All".to_string(),
                v => v.to_string(),
            };
            let text = format!(" {}: {} ", field.label(), value);
            if field == self.focus {
                spans.push(Span::styled(text, SELECTED_STYLE));
            } else {
                spans.push(Span::raw(text));
            }
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl ReportView for FilterBrowser {
    fn draw(&mut self, frame: &mut Frame) {
        let [title_area, filter_area, table_area, status_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Paragraph::new("Cartir_total Data").style(HEADER_STYLE),
            title_area,
        );
        frame.render_widget(Paragraph::new(self.filter_bar()), filter_area);

        let header_overhead = 2u16;
        self.visible_count = (table_area.height.saturating_sub(header_overhead) as usize).max(1);

        let rows: Vec<Row> = self
            .visible
            .iter()
            .skip(self.offset)
            .take(self.visible_count)
            .map(|r| {
                Row::new([
                    Cell::from(r.id.clone()),
                    Cell::from(r.date.clone()),
                    Cell::from(r.shift.clone()),
                    Cell::from(r.street.clone()),
                    Cell::from(r.trench.clone()),
                    Cell::from(r.section.clone()),
                    Cell::from(total(r.value)),
                ])
            })
            .collect();
        let widths = [
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Fill(1),
            Constraint::Length(10),
        ];
        let selected_on_screen = self.selected.checked_sub(self.offset);
        self.table_state.select(selected_on_screen);
        let table = Table::new(rows, widths)
            .header(
                Row::new(["ID", "Fecha", "Turno", "Calle", "Zanja", "Macro Bloque", "Total"])
                    .style(HEADER_STYLE)
                    .bottom_margin(1),
            )
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE);
        frame.render_stateful_widget(table, table_area, &mut self.table_state);

        let status = if self.visible.is_empty() {
            format!("No records | 0 of {}", self.records.len())
        } else {
            let end_row = (self.offset + self.visible_count).min(self.visible.len());
            format!(
                "Rows {}-{} of {} ({} total) | Total: {}",
                self.offset + 1,
                end_row,
                self.visible.len(),
                self.records.len(),
                total(self.visible_total()),
            )
        };
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), status_area);

        frame.render_widget(
            Paragraph::new(
                "Tab:next filter  \u{2190}/\u{2192}:change  \u{2191}/\u{2193}:select  c:clear  q:quit",
            )
            .style(FOOTER_STYLE),
            keys_area,
        );
    }

    fn handle_key(&mut self, code: KeyCode) -> ReportViewAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ReportViewAction::Close,
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Right => self.cycle(1),
            KeyCode::Left => self.cycle(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(self.visible_count as isize),
            KeyCode::PageUp => self.scroll_by(-(self.visible_count as isize)),
            KeyCode::Home => self.scroll_by(-(self.selected as isize)),
            KeyCode::End => self.scroll_by(self.visible.len() as isize),
            KeyCode::Char('c') => {
                self.filters = FilterState::default();
                self.refresh();
            }
            _ => {}
        }
        ReportViewAction::Continue
    }
}
