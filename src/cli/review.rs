use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{LineGauge, Paragraph},
    Frame,
};

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::{money, percent};
use crate::models::QueueItem;
use crate::queue::{self, ApproveOverrides};
use crate::settings::{get_data_dir, load_settings};
use crate::tui::{money_span, wrap_text, FOOTER_STYLE, HEADER_STYLE, WARN_STYLE};

enum ReviewState {
    Decide,
    PickCategory,
}

enum Decision {
    Approve { category: Option<String> },
    Reject,
}

struct QueueReviewer {
    items: Vec<QueueItem>,
    categories: Vec<String>,
    labels: Vec<String>,
    current: usize,
    state: ReviewState,
    cat_query: String,
    cat_selection: usize,
    decision: Option<Decision>,
}

impl QueueReviewer {
    fn new(items: Vec<QueueItem>, categories: Vec<(String, String)>) -> Self {
        let labels: Vec<String> = categories
            .iter()
            .map(|(name, category_type)| {
                let tag = if category_type == "income" { "inc" } else { "exp" };
                format!("{name} ({tag})")
            })
            .collect();
        Self {
            items,
            categories: categories.into_iter().map(|(name, _)| name).collect(),
            labels,
            current: 0,
            state: ReviewState::Decide,
            cat_query: String::new(),
            cat_selection: 0,
            decision: None,
        }
    }

    fn filtered_categories(&self) -> Vec<(usize, &str)> {
        if self.cat_query.is_empty() {
            return vec![];
        }
        let q = self.cat_query.to_lowercase();
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.to_lowercase().contains(&q))
            .map(|(i, s)| (i, s.as_str()))
            .take(9)
            .collect()
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let item = &self.items[self.current];
        let total = self.items.len();

        let wrap_width = area.width.saturating_sub(4).max(20) as usize;
        let (sms, sms_height) = wrap_text(&item.raw_sms, wrap_width);

        let [sms_area, progress_area, detail_area, interaction_area, hints_area] =
            Layout::vertical([
                Constraint::Length(sms_height + 2),
                Constraint::Length(1),
                Constraint::Length(9),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(area);

        // Raw message, as received
        let mut sms_lines: Vec<Line> = vec![Line::from(Span::styled("Message", HEADER_STYLE))];
        for line in sms.lines() {
            sms_lines.push(Line::from(format!("  {line}")));
        }
        frame.render_widget(Paragraph::new(sms_lines), sms_area);

        // Progress bar
        let ratio = if total > 1 {
            self.current as f64 / (total - 1) as f64
        } else {
            1.0
        };
        let gauge = LineGauge::default()
            .label(format!("{} of {}", self.current + 1, total))
            .ratio(ratio)
            .filled_style(Style::default().fg(Color::Green).bold())
            .unfilled_style(Style::default().fg(Color::DarkGray))
            .line_set(ratatui::symbols::line::THICK);
        frame.render_widget(gauge, progress_area);

        // Parsed details
        let detail_lines = vec![
            Line::from(""),
            Line::from(format!(
                "  Date:       {}",
                &item.date[..10.min(item.date.len())]
            )),
            Line::from(format!("  Bank:       {}", item.bank_name)),
            Line::from(format!("  Merchant:   {}", item.merchant)),
            Line::from(vec![
                Span::raw("  Amount:     "),
                money_span(item.amount, &item.direction),
            ]),
            Line::from(format!("  Category:   {}", item.category)),
            Line::from(format!("  Confidence: {}", percent(item.confidence))),
            Line::from(""),
        ];
        frame.render_widget(Paragraph::new(detail_lines), detail_area);

        let interaction_lines: Vec<Line> = match &self.state {
            ReviewState::Decide => match candidate_note(&item.parsed_json) {
                Some(note) => vec![Line::from(Span::styled(format!("  {note}"), WARN_STYLE))],
                None => vec![],
            },
            ReviewState::PickCategory => {
                let matches = self.filtered_categories();
                let mut lines = vec![Line::from(format!(
                    "  Category: {}\u{2588}",
                    self.cat_query
                ))];
                if !self.cat_query.is_empty() && matches.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "    (no matches)",
                        Style::default().fg(Color::DarkGray),
                    )));
                } else {
                    for (i, (_, label)) in matches.iter().enumerate() {
                        let marker = if i == self.cat_selection { ">" } else { " " };
                        lines.push(Line::from(format!("  {marker} {label}")));
                    }
                }
                lines
            }
        };
        frame.render_widget(Paragraph::new(interaction_lines), interaction_area);

        let hints = match &self.state {
            ReviewState::Decide => "a=approve, r=reject, c=change category, s=skip, q=quit",
            ReviewState::PickCategory => {
                "Type to filter, Enter=approve with category, Esc=back, Ctrl+C=quit"
            }
        };
        frame.render_widget(Paragraph::new(hints).style(FOOTER_STYLE), hints_area);
    }

    fn handle_key(&mut self, code: KeyCode) -> HandleResult {
        match &self.state {
            ReviewState::Decide => match code {
                KeyCode::Char('a') => {
                    self.decision = Some(Decision::Approve { category: None });
                    HandleResult::CommitAndAdvance
                }
                KeyCode::Char('r') => {
                    self.decision = Some(Decision::Reject);
                    HandleResult::CommitAndAdvance
                }
                KeyCode::Char('c') => {
                    self.cat_query.clear();
                    self.cat_selection = 0;
                    self.state = ReviewState::PickCategory;
                    HandleResult::Continue
                }
                KeyCode::Char('s') => {
                    self.advance();
                    HandleResult::check_done(self)
                }
                KeyCode::Char('q') => HandleResult::Done,
                _ => HandleResult::Continue,
            },
            ReviewState::PickCategory => match code {
                KeyCode::Char(c) => {
                    self.cat_query.push(c);
                    self.cat_selection = 0;
                    HandleResult::Continue
                }
                KeyCode::Backspace => {
                    self.cat_query.pop();
                    self.cat_selection = 0;
                    HandleResult::Continue
                }
                KeyCode::Up => {
                    self.cat_selection = self.cat_selection.saturating_sub(1);
                    HandleResult::Continue
                }
                KeyCode::Down => {
                    let matches = self.filtered_categories();
                    if !matches.is_empty() {
                        self.cat_selection = (self.cat_selection + 1).min(matches.len() - 1);
                    }
                    HandleResult::Continue
                }
                KeyCode::Enter => {
                    let matches = self.filtered_categories();
                    if matches.is_empty() {
                        return HandleResult::Continue;
                    }
                    let sel = self.cat_selection.min(matches.len() - 1);
                    let name = self.categories[matches[sel].0].clone();
                    self.decision = Some(Decision::Approve {
                        category: Some(name),
                    });
                    HandleResult::CommitAndAdvance
                }
                KeyCode::Esc => {
                    self.state = ReviewState::Decide;
                    HandleResult::Continue
                }
                _ => HandleResult::Continue,
            },
        }
    }

    fn commit_review(&mut self, conn: &rusqlite::Connection) -> Result<()> {
        let item = &self.items[self.current];
        match self.decision.take() {
            Some(Decision::Approve { category }) => {
                let overrides = ApproveOverrides {
                    category,
                    ..Default::default()
                };
                queue::approve(conn, item.id, &overrides)?;
            }
            Some(Decision::Reject) => {
                queue::reject(conn, item.id)?;
            }
            None => {}
        }
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        self.current += 1;
        self.state = ReviewState::Decide;
        self.cat_query.clear();
        self.cat_selection = 0;
        self.decision = None;
    }

    fn is_done(&self) -> bool {
        self.current >= self.items.len()
    }
}

enum HandleResult {
    Continue,
    CommitAndAdvance,
    Done,
}

impl HandleResult {
    fn check_done(reviewer: &QueueReviewer) -> Self {
        if reviewer.is_done() {
            HandleResult::Done
        } else {
            HandleResult::Continue
        }
    }
}

/// "Also matched" note for parses where a rival rule set produced a
/// different amount. The rivals ride along in the stored parse payload.
fn candidate_note(parsed_json: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(parsed_json).ok()?;
    let candidates = value.get("candidates")?.as_array()?;
    let rivals: Vec<String> = candidates
        .iter()
        .filter_map(|c| {
            let bank = c.get("bank_name")?.as_str()?;
            let amount = c.get("amount")?.as_f64()?;
            Some(format!("{bank} {}", money(amount)))
        })
        .collect();
    if rivals.is_empty() {
        return None;
    }
    Some(format!(
        "Also matched: {} (check the amount)",
        rivals.join(", ")
    ))
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&get_data_dir().join("khata.db"))?;
    let user = crate::cli::resolve_user(&settings);
    let items = queue::list_pending(&conn, &user)?;

    if items.is_empty() {
        println!("No pending queue items to review.");
        return Ok(());
    }

    let mut stmt = conn.prepare(
        "SELECT name, category_type FROM categories
         ORDER BY CASE category_type WHEN 'income' THEN 0 ELSE 1 END, name ASC",
    )?;
    let categories = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    drop(stmt);

    let total = items.len();
    println!("{total} items to review");

    let mut reviewer = QueueReviewer::new(items, categories);
    let mut terminal = ratatui::init();

    let result = loop {
        terminal.draw(|frame| reviewer.draw(frame)).unwrap();

        if let Event::Key(key) = event::read().unwrap() {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                break Ok(());
            }

            match reviewer.handle_key(key.code) {
                HandleResult::Continue => {}
                HandleResult::CommitAndAdvance => {
                    if let Err(e) = reviewer.commit_review(&conn) {
                        break Err(e);
                    }
                    if reviewer.is_done() {
                        break Ok(());
                    }
                }
                HandleResult::Done => break Ok(()),
            }
        }
    };

    ratatui::restore();

    match &result {
        Ok(()) => println!("Review complete!"),
        Err(e) => eprintln!("Review error: {e}"),
    }
    result
}
