use crate::catalog::ProjectFile;
use crate::engine::{ahsp, derive, prune, rab};
use crate::model::priced::find_priced;
use crate::model::{AhspBreakdown, AhspMaster, PricedNode, PricingContext, WorkItem};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};

/// Deepest display level the items table can show (roots at 0).
const MAX_DISPLAY_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    ItemDetail,
    AhspBrowser,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Modes,
    Disciplines,
    Items,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingMode {
    Ballpark,
    Estimates,
    Detail,
}

impl PricingMode {
    pub const ALL: [Self; 3] = [Self::Ballpark, Self::Estimates, Self::Detail];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ballpark => "Ballpark",
            Self::Estimates => "Estimates",
            Self::Detail => "Detail",
        }
    }
}

/// One display row of the items table: a priced node flattened with its
/// indent depth relative to the discipline root.
#[derive(Debug, Clone)]
pub struct FlatRow {
    pub depth: usize,
    pub code: String,
    pub name_en: String,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub volume: Option<f64>,
    pub total: f64,
    pub is_leaf: bool,
}

pub struct App {
    pub project: ProjectFile,
    pub context: PricingContext,
    pub ballpark: Vec<WorkItem>,
    pub estimates: Vec<WorkItem>,
    pub detail: Vec<WorkItem>,
    /// Current mode's full (unpruned) projection.
    pub priced: Vec<PricedNode>,
    pub mode: PricingMode,
    pub view: View,
    pub focus_panel: FocusPanel,
    pub selected_mode: usize,
    pub selected_discipline: usize,
    pub selected_item: usize,
    pub detail_scroll_offset: usize,
    pub selected_ahsp: usize,
    /// Display pruning depth for the items table (1..=MAX_DISPLAY_DEPTH).
    pub max_depth: usize,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(project: ProjectFile) -> Self {
        let ballpark = project.ballpark_tree();
        let estimates = project.estimates_tree(&ballpark);
        let detail = derive::derive_detail(&estimates);
        let context = project.pricing_context();

        let mut app = Self {
            project,
            context,
            ballpark,
            estimates,
            detail,
            priced: Vec::new(),
            mode: PricingMode::Ballpark,
            view: View::Dashboard,
            focus_panel: FocusPanel::Disciplines, // Start on Disciplines
            selected_mode: 0,
            selected_discipline: 0,
            selected_item: 0,
            detail_scroll_offset: 0,
            selected_ahsp: 0,
            max_depth: 2,
            should_quit: false,
        };
        app.reproject();
        app
    }

    /// Recompute the current mode's projection. Each call allocates a fresh
    /// priced tree; nothing is cached on the source trees.
    pub fn reproject(&mut self) {
        self.priced = match self.mode {
            PricingMode::Ballpark => {
                rab::project_ballpark(&self.ballpark, &self.context, &self.project.overrides)
            }
            PricingMode::Estimates => rab::project_estimate(
                &self.estimates,
                &self.context,
                &self.project.estimate_values,
                &self.project.assignments,
                &self.project.ahsp,
                &self.project.resources,
            ),
            PricingMode::Detail => rab::project_estimate(
                &self.detail,
                &self.context,
                &self.project.estimate_values,
                &self.project.assignments,
                &self.project.ahsp,
                &self.project.resources,
            ),
        };
    }

    #[must_use]
    pub fn grand_total(&self) -> f64 {
        match self.mode {
            PricingMode::Ballpark => {
                rab::total_project_cost_ballpark(&self.priced, self.context.area)
            }
            PricingMode::Estimates | PricingMode::Detail => {
                rab::total_project_cost_estimate(&self.priced)
            }
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => super::dashboard::draw_dashboard(frame, self),
            View::ItemDetail => super::dashboard::draw_item_detail(frame, self),
            View::AhspBrowser => super::dashboard::draw_ahsp_browser(frame, self),
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.view {
                View::Dashboard => self.handle_dashboard_keys(key.code),
                View::ItemDetail => self.handle_detail_keys(key.code),
                View::AhspBrowser => self.handle_ahsp_keys(key.code),
            }
        }
        Ok(())
    }

    fn handle_dashboard_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.navigate_up(),
            KeyCode::Down | KeyCode::Char('j') => self.navigate_down(),
            KeyCode::Left | KeyCode::Char('h') => self.navigate_left(),
            KeyCode::Right | KeyCode::Char('l') => self.navigate_right(),
            KeyCode::Char('d') => self.cycle_depth(),
            KeyCode::Char('a') => self.enter_ahsp_browser(),
            KeyCode::Enter => self.enter_item_detail(),
            _ => {}
        }
    }

    fn handle_detail_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => {
                self.view = View::Dashboard;
                self.detail_scroll_offset = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll_detail_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_detail_down(),
            _ => {}
        }
    }

    fn handle_ahsp_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('a') => {
                self.view = View::Dashboard;
            }
            KeyCode::Up | KeyCode::Char('k') => self.previous_ahsp(),
            KeyCode::Down | KeyCode::Char('j') => self.next_ahsp(),
            _ => {}
        }
    }

    fn navigate_up(&mut self) {
        match self.focus_panel {
            FocusPanel::Modes => self.previous_mode(),
            FocusPanel::Disciplines => self.previous_discipline(),
            FocusPanel::Items => self.previous_item(),
        }
    }

    fn navigate_down(&mut self) {
        match self.focus_panel {
            FocusPanel::Modes => self.next_mode(),
            FocusPanel::Disciplines => self.next_discipline(),
            FocusPanel::Items => self.next_item(),
        }
    }

    fn navigate_left(&mut self) {
        match self.focus_panel {
            FocusPanel::Items => self.focus_panel = FocusPanel::Disciplines,
            FocusPanel::Disciplines => self.focus_panel = FocusPanel::Modes,
            FocusPanel::Modes => {}
        }
    }

    fn navigate_right(&mut self) {
        match self.focus_panel {
            FocusPanel::Modes => self.focus_panel = FocusPanel::Disciplines,
            FocusPanel::Disciplines => self.focus_panel = FocusPanel::Items,
            FocusPanel::Items => {}
        }
    }

    fn previous_mode(&mut self) {
        if self.selected_mode > 0 {
            self.selected_mode -= 1;
            self.apply_mode();
        }
    }

    fn next_mode(&mut self) {
        if self.selected_mode < PricingMode::ALL.len() - 1 {
            self.selected_mode += 1;
            self.apply_mode();
        }
    }

    fn apply_mode(&mut self) {
        self.mode = PricingMode::ALL[self.selected_mode];
        self.selected_item = 0;
        self.reproject();
    }

    fn previous_discipline(&mut self) {
        if self.selected_discipline > 0 {
            self.selected_discipline -= 1;
            self.selected_item = 0;
        }
    }

    fn next_discipline(&mut self) {
        if self.selected_discipline < self.priced.len().saturating_sub(1) {
            self.selected_discipline += 1;
            self.selected_item = 0;
        }
    }

    fn previous_item(&mut self) {
        if self.selected_item > 0 {
            self.selected_item -= 1;
        }
    }

    fn next_item(&mut self) {
        let count = self.flattened_rows().len();
        if self.selected_item < count.saturating_sub(1) {
            self.selected_item += 1;
        }
    }

    fn cycle_depth(&mut self) {
        self.max_depth = if self.max_depth >= MAX_DISPLAY_DEPTH {
            1
        } else {
            self.max_depth + 1
        };
        self.selected_item = 0;
    }

    fn enter_item_detail(&mut self) {
        // Only enter detail when focus is on the Items panel
        if self.focus_panel == FocusPanel::Items && self.selected_row().is_some() {
            self.view = View::ItemDetail;
            self.detail_scroll_offset = 0;
        }
    }

    fn enter_ahsp_browser(&mut self) {
        if !self.project.ahsp.is_empty() {
            self.view = View::AhspBrowser;
            if self.selected_ahsp >= self.project.ahsp.len() {
                self.selected_ahsp = 0;
            }
        }
    }

    fn scroll_detail_up(&mut self) {
        if self.detail_scroll_offset > 0 {
            self.detail_scroll_offset -= 1;
        }
    }

    fn scroll_detail_down(&mut self) {
        let max = self
            .selected_node()
            .map_or(0, |n| n.children().len().saturating_sub(1));
        if self.detail_scroll_offset < max {
            self.detail_scroll_offset += 1;
        }
    }

    fn previous_ahsp(&mut self) {
        if self.selected_ahsp > 0 {
            self.selected_ahsp -= 1;
        }
    }

    fn next_ahsp(&mut self) {
        if self.selected_ahsp < self.project.ahsp.len().saturating_sub(1) {
            self.selected_ahsp += 1;
        }
    }

    /// Display rows for the selected discipline, pruned to `max_depth`.
    #[must_use]
    pub fn flattened_rows(&self) -> Vec<FlatRow> {
        let Some(root) = self.priced.get(self.selected_discipline) else {
            return Vec::new();
        };
        let pruned = prune::prune(std::slice::from_ref(root), self.max_depth);

        let mut rows = Vec::new();
        for child in pruned[0].children() {
            flatten_into(child, 0, &mut rows);
        }
        rows
    }

    /// The currently selected display row.
    #[must_use]
    pub fn selected_row(&self) -> Option<FlatRow> {
        self.flattened_rows().into_iter().nth(self.selected_item)
    }

    /// The selected node in the full (unpruned) projection.
    #[must_use]
    pub fn selected_node(&self) -> Option<&PricedNode> {
        let row = self.selected_row()?;
        find_priced(&self.priced, &row.code)
    }

    /// The AHSP analysis linked to the selected leaf, with its breakdown.
    #[must_use]
    pub fn linked_analysis(&self) -> Option<(&AhspMaster, AhspBreakdown)> {
        let row = self.selected_row()?;
        let id = self.project.assignments.get(&row.code)?;
        let master = self.project.ahsp.iter().find(|m| m.id == id)?;
        let breakdown = ahsp::compose(master, &self.project.resources);
        Some((master, breakdown))
    }

    /// Breakdown of the analysis selected in the AHSP browser.
    #[must_use]
    pub fn browsed_analysis(&self) -> Option<(&AhspMaster, AhspBreakdown)> {
        let master = self.project.ahsp.get(self.selected_ahsp)?;
        Some((master, ahsp::compose(master, &self.project.resources)))
    }
}

fn flatten_into(node: &PricedNode, depth: usize, rows: &mut Vec<FlatRow>) {
    let (unit, unit_price, volume) = match node {
        PricedNode::Leaf {
            unit,
            unit_price,
            volume,
            ..
        } => (unit.clone(), Some(*unit_price), *volume),
        PricedNode::Group { .. } => (None, None, None),
    };

    rows.push(FlatRow {
        depth,
        code: node.code().to_string(),
        name_en: node.name_en().to_string(),
        unit,
        unit_price,
        volume,
        total: node.total(),
        is_leaf: node.is_leaf(),
    });

    for child in node.children() {
        flatten_into(child, depth + 1, rows);
    }
}

/// Format a currency amount with dot thousands separators (Rp style).
#[must_use]
pub fn format_money(value: f64) -> String {
    let rounded = value.abs().round() as u64;
    let negative = value < 0.0 && rounded > 0;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn money_is_grouped_in_threes() {
        assert_eq!(format_money(0.0), "0");
        assert_eq!(format_money(950.0), "950");
        assert_eq!(format_money(1_000.0), "1.000");
        assert_eq!(format_money(1_234_567.0), "1.234.567");
        assert_eq!(format_money(-25_000.4), "-25.000");
    }

    #[test]
    fn negative_amounts_rounding_to_zero_drop_the_sign() {
        assert_eq!(format_money(-0.4), "0");
    }
}
