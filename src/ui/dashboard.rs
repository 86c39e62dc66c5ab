use crate::model::PricedNode;
use crate::ui::app::{format_money, App, FocusPanel, PricingMode};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};

// Brandbook colors
#[allow(dead_code)]
const BRAND_BG: Color = Color::Rgb(0xED, 0xED, 0xED); // #ededed - background
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C); // #1f2f3c - primary dark
#[allow(dead_code)]
const BRAND_ACCENT: Color = Color::Rgb(0x58, 0x6B, 0x71); // #586b71 - blue accent (reserved)
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0); // #c3d3e0 - selection background
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68); // #829a68 - green (totals)
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C); // #9e683c - orange (focus)
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65); // #716565 - muted (footer)

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);
const TOTAL_COLOR: Color = BRAND_GREEN;

pub fn draw_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_main_content(frame, chunks[1], app);
    draw_footer(
        frame,
        chunks[2],
        " ←→ Panel | ↑↓ Select | d Depth | a AHSP | Enter Details | q Quit ",
    );
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " RAB Estimator | {} | {} | {} m2 | Total: Rp {} ",
        app.project.name,
        app.context.building_class.label(),
        app.context.area,
        format_money(app.grand_total())
    );

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_main_content(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([
        Constraint::Percentage(15), // Modes
        Constraint::Percentage(22), // Disciplines
        Constraint::Percentage(63), // Items
    ])
    .split(area);

    draw_modes(frame, chunks[0], app);
    draw_disciplines(frame, chunks[1], app);
    draw_items(frame, chunks[2], app);
}

fn draw_modes(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus_panel == FocusPanel::Modes;

    let items: Vec<ListItem> = PricingMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            let is_selected = i == app.selected_mode;
            let style = if is_selected && is_focused {
                SELECTED_STYLE
            } else if is_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let marker = if is_selected && is_focused {
                " ◄"
            } else {
                ""
            };

            ListItem::new(Line::from(vec![
                Span::styled(mode.label(), style),
                Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
            ]))
        })
        .collect();

    let border_style = if is_focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .title(" Mode ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(list, area);
}

fn draw_disciplines(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus_panel == FocusPanel::Disciplines;

    let items: Vec<ListItem> = app
        .priced
        .iter()
        .enumerate()
        .map(|(i, root)| {
            let is_selected = i == app.selected_discipline;
            let style = if is_selected && is_focused {
                SELECTED_STYLE
            } else if is_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let marker = if is_selected && is_focused {
                " ◄"
            } else {
                ""
            };

            let content = Line::from(vec![
                Span::styled(format!("{} ", root.code()), HEADER_STYLE),
                Span::styled(root.name_en().to_string(), style),
                Span::raw(" "),
                Span::styled(
                    format_money(root.total()),
                    Style::default().fg(TOTAL_COLOR),
                ),
                Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
            ]);

            ListItem::new(content)
        })
        .collect();

    let border_style = if is_focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };

    let title = format!(" Disciplines ({}) ", app.priced.len());
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(list, area);
}

fn draw_items(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus_panel == FocusPanel::Items;

    let rows_data = app.flattened_rows();

    let discipline_name = app
        .priced
        .get(app.selected_discipline)
        .map(|r| r.name_en().to_string())
        .unwrap_or_default();

    // Calculate visible area (subtract 3 for borders and header)
    let visible_rows = (area.height as usize).saturating_sub(3);

    // Calculate scroll offset to keep selected item visible
    let scroll_offset = if app.selected_item >= visible_rows {
        app.selected_item - visible_rows + 1
    } else {
        0
    };

    let header = Row::new(vec!["Code", "Work Item", "Unit", "Unit Price", "Vol", "Total"])
        .style(HEADER_STYLE)
        .height(1);

    let rows: Vec<Row> = rows_data
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, row)| {
            let is_selected = i == app.selected_item;
            let style = if is_selected && is_focused {
                SELECTED_STYLE
            } else if is_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else if row.is_leaf {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let indent = "  ".repeat(row.depth);
            Row::new(vec![
                row.code.clone(),
                format!("{indent}{}", row.name_en),
                row.unit.clone().unwrap_or_default(),
                row.unit_price.map(format_money).unwrap_or_default(),
                row.volume.map(|v| format!("{v:.1}")).unwrap_or_default(),
                format_money(row.total),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Percentage(34),
        Constraint::Length(6),
        Constraint::Percentage(18),
        Constraint::Length(8),
        Constraint::Percentage(20),
    ];

    let border_style = if is_focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };

    let title = format!(
        " {} ({} items, depth {}) ",
        discipline_name,
        rows_data.len(),
        app.max_depth
    );
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(table, area);

    // Draw scrollbar if needed
    if rows_data.len() > visible_rows {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state = ScrollbarState::new(rows_data.len()).position(app.selected_item);

        let scrollbar_area = Rect {
            x: area.x + area.width - 1,
            y: area.y + 2,
            width: 1,
            height: area.height - 3,
        };
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, help: &str) {
    let footer = Paragraph::new(help)
        .style(Style::default().fg(BRAND_MUTED))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

pub fn draw_item_detail(frame: &mut Frame, app: &App) {
    let node = match app.selected_node() {
        Some(n) => n,
        None => return,
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header: item name
        Constraint::Length(3), // Info: code | unit | price | volume | total
        Constraint::Min(6),    // Children rollup / AHSP breakdown
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    // Header - item name
    let header = Paragraph::new(format!(" {} / {} ", node.name_en(), node.name_id()))
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    // Info line
    let info_text = match node {
        PricedNode::Leaf {
            code,
            unit,
            unit_price,
            volume,
            total,
            ..
        } => {
            let volume_str = volume.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
            format!(
                "{code}  |  Unit: {}  |  Unit Price: Rp {}  |  Volume: {volume_str}  |  Total: Rp {}",
                unit.as_deref().unwrap_or("-"),
                format_money(*unit_price),
                format_money(*total)
            )
        }
        PricedNode::Group {
            code,
            total,
            children,
            ..
        } => format!(
            "{code}  |  Group of {} items  |  Total: Rp {}",
            children.len(),
            format_money(*total)
        ),
    };
    let info_widget = Paragraph::new(info_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(info_widget, chunks[1]);

    // Body: children rollup for groups, AHSP composition for assigned leaves
    if node.is_leaf() {
        draw_leaf_breakdown(frame, chunks[2], app);
    } else {
        draw_children_rollup(frame, chunks[2], app, node);
    }

    draw_footer(frame, chunks[3], " Esc Back | ↑↓ Scroll | q Quit ");
}

fn draw_children_rollup(frame: &mut Frame, area: Rect, app: &App, node: &PricedNode) {
    let children = node.children();
    let visible_rows = (area.height as usize).saturating_sub(3);

    let header = Row::new(vec!["Code", "Name", "Total", "Share"]).style(HEADER_STYLE);
    let parent_total = node.total();

    let rows: Vec<Row> = children
        .iter()
        .skip(app.detail_scroll_offset)
        .take(visible_rows)
        .map(|child| {
            let share = if parent_total > 0.0 {
                format!("{:.1}%", child.total() / parent_total * 100.0)
            } else {
                "-".to_string()
            };
            Row::new(vec![
                child.code().to_string(),
                child.name_en().to_string(),
                format_money(child.total()),
                share,
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Percentage(50),
        Constraint::Percentage(25),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" Children ({}) ", children.len()))
            .borders(Borders::ALL),
    );
    frame.render_widget(table, area);

    if children.len() > visible_rows {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state =
            ScrollbarState::new(children.len()).position(app.detail_scroll_offset);

        let scrollbar_area = Rect {
            x: area.x + area.width - 1,
            y: area.y + 2,
            width: 1,
            height: area.height - 3,
        };
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

fn draw_leaf_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let Some((master, breakdown)) = app.linked_analysis() else {
        let empty = Paragraph::new("No AHSP analysis linked to this item.")
            .style(Style::default().fg(BRAND_MUTED))
            .block(Block::default().title(" Analysis ").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let header = Row::new(vec!["Component", "Amount"]).style(HEADER_STYLE);
    let rows = vec![
        Row::new(vec!["Labor".to_string(), format_money(breakdown.labor)]),
        Row::new(vec!["Material".to_string(), format_money(breakdown.material)]),
        Row::new(vec![
            "Equipment".to_string(),
            format_money(breakdown.equipment),
        ]),
        Row::new(vec!["Subtotal".to_string(), format_money(breakdown.subtotal)])
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Row::new(vec!["Overhead".to_string(), format_money(breakdown.overhead)]),
        Row::new(vec![
            format!("Total per {}", master.unit),
            format_money(breakdown.total),
        ])
        .style(Style::default().fg(TOTAL_COLOR).add_modifier(Modifier::BOLD)),
    ];

    let widths = [Constraint::Percentage(50), Constraint::Percentage(50)];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" Analysis: {} ", master.name))
            .borders(Borders::ALL),
    );
    frame.render_widget(table, area);
}

pub fn draw_ahsp_browser(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Masters | components
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    let header = Paragraph::new(format!(
        " AHSP Analyses ({}) ",
        app.project.ahsp.len()
    ))
    .style(HEADER_STYLE)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let body = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    // Master list
    let items: Vec<ListItem> = app
        .project
        .ahsp
        .iter()
        .enumerate()
        .map(|(i, master)| {
            let style = if i == app.selected_ahsp {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(master.name.clone(), style),
                Span::styled(
                    format!(" /{}", master.unit),
                    Style::default().fg(BRAND_MUTED),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().title(" Analyses ").borders(Borders::ALL));
    frame.render_widget(list, body[0]);

    // Component table with breakdown footer rows
    if let Some((master, breakdown)) = app.browsed_analysis() {
        let comp_header = Row::new(vec!["Resource", "Category", "Coef", "Price", "Amount"])
            .style(HEADER_STYLE);

        let mut rows: Vec<Row> = master
            .components
            .iter()
            .map(|component| {
                let resource = app
                    .project
                    .resources
                    .iter()
                    .find(|r| r.id == component.resource_id);

                match resource {
                    Some(r) => Row::new(vec![
                        r.name.clone(),
                        r.category.label().to_string(),
                        format!("{:.4}", component.coefficient),
                        format_money(r.price_default),
                        format_money(r.price_default * component.coefficient),
                    ]),
                    // Stale reference: contributes 0, flagged in the browser.
                    None => Row::new(vec![
                        format!("#{} (missing)", component.resource_id),
                        "-".to_string(),
                        format!("{:.4}", component.coefficient),
                        "-".to_string(),
                        "0".to_string(),
                    ])
                    .style(Style::default().fg(BRAND_MUTED)),
                }
            })
            .collect();

        rows.push(
            Row::new(vec![
                "Subtotal".to_string(),
                String::new(),
                String::new(),
                String::new(),
                format_money(breakdown.subtotal),
            ])
            .style(Style::default().add_modifier(Modifier::BOLD)),
        );
        rows.push(Row::new(vec![
            "Overhead".to_string(),
            String::new(),
            String::new(),
            String::new(),
            format_money(breakdown.overhead),
        ]));
        rows.push(
            Row::new(vec![
                "Total".to_string(),
                String::new(),
                String::new(),
                String::new(),
                format_money(breakdown.total),
            ])
            .style(Style::default().fg(TOTAL_COLOR).add_modifier(Modifier::BOLD)),
        );

        let widths = [
            Constraint::Percentage(34),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
        ];

        let table = Table::new(rows, widths).header(comp_header).block(
            Block::default()
                .title(format!(" {} ", master.name))
                .borders(Borders::ALL),
        );
        frame.render_widget(table, body[1]);
    }

    draw_footer(frame, chunks[2], " Esc Back | ↑↓ Navigate | q Quit ");
}
