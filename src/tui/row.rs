use crate::users::models::Record;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::collections::HashMap;

/// Renders a single row. Depends only on the record and its own checkbox
/// state; the cursor highlight is applied by the list widget.
pub fn render_row(record: &Record, is_selected: bool) -> Line<'static> {
    let checkbox = if is_selected { "[x]" } else { "[ ]" };
    let style = if is_selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(format!("{} ", checkbox), style),
        Span::styled(format!("{:<20}", record.username), style),
        Span::styled(record.email.clone(), Style::default().fg(Color::DarkGray)),
    ])
}

#[derive(Debug)]
struct CachedRow {
    is_selected: bool,
    line: Line<'static>,
    renders: usize,
}

/// Memoized rows keyed by record id. A row is redrawn only when its own
/// `is_selected` flag differs from the cached one, so toggling one record
/// never redraws another.
#[derive(Debug, Default)]
pub struct RowCache {
    rows: HashMap<u64, CachedRow>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&mut self, record: &Record, is_selected: bool) -> Line<'static> {
        let cached = self.rows.entry(record.id).or_insert_with(|| CachedRow {
            is_selected,
            line: render_row(record, is_selected),
            renders: 1,
        });

        if cached.is_selected != is_selected {
            cached.is_selected = is_selected;
            cached.line = render_row(record, is_selected);
            cached.renders += 1;
        }

        cached.line.clone()
    }

    /// Drops cached rows whose ids no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(u64) -> bool) {
        self.rows.retain(|id, _| keep(*id));
    }

    pub fn render_count(&self, id: u64) -> usize {
        self.rows.get(&id).map_or(0, |row| row.renders)
    }
}
