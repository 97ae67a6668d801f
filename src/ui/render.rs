use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};
use ratatui::Frame;

use crate::driver::Runtime;
use crate::host::{LiveTree, NodeId};
use crate::render::{attr, class};
use crate::ui::app::{App, StatusKind};
use crate::ui::layout::{layout_regions, place, Placed};
use crate::ui::theme;
use crate::widget::WidgetKind;

const HINTS: &str = "Tab focus · Enter/Space activate · ←/→ choose · Esc quit";

pub fn draw(frame: &mut Frame<'_>, app: &App, runtime: &Runtime) {
    let (header, body, footer) = layout_regions(frame.area());

    frame.render_widget(header_line(app), header);
    frame.render_widget(Clear, body);

    let tree = runtime.tree();
    let placed = runtime
        .live_root()
        .map_err(|err| err.to_string())
        .and_then(|root| place(&tree, root, body, app.outline()).map_err(|err| err.to_string()));
    let layout_error = match placed {
        Ok(placed) => {
            frame.render_widget(
                TreeView {
                    tree: &tree,
                    placed: &placed,
                    focus: app.focus(),
                    outline: app.outline(),
                },
                body,
            );
            None
        }
        Err(err) => Some(err),
    };

    frame.render_widget(status_line(app, runtime, layout_error), footer);
}

fn header_line(app: &App) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(
            app.title().to_string(),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {HINTS}"), Style::default().fg(theme::MUTED)),
    ]))
}

fn status_line(app: &App, runtime: &Runtime, layout_error: Option<String>) -> Paragraph<'static> {
    let (color, text) = if let Some(err) = layout_error {
        (theme::STATUS_ERROR, format!("cannot lay out tree: {err}"))
    } else if let Some(status) = app.status() {
        let color = match status.kind {
            StatusKind::Info => theme::STATUS_OK,
            StatusKind::Warning => theme::STATUS_WARN,
            StatusKind::Error => theme::STATUS_ERROR,
        };
        (color, status.text.clone())
    } else if runtime.is_halted() {
        (theme::STATUS_ERROR, "runtime halted".to_string())
    } else {
        (theme::MUTED, format!("{} action(s)", app.actions()))
    };
    Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
}

/// Draws already-placed live nodes.
struct TreeView<'a> {
    tree: &'a LiveTree,
    placed: &'a [Placed],
    focus: Option<NodeId>,
    outline: bool,
}

impl TreeView<'_> {
    fn style_for(&self, id: NodeId) -> Style {
        let mut style = theme::control();
        if matches!(self.tree.has_class(id, class::INVALID), Ok(true)) {
            style = theme::invalid();
        }
        if matches!(self.tree.attribute(id, attr::DISABLED), Ok(Some(_))) {
            style = theme::disabled();
        }
        if self.focus == Some(id) {
            style = theme::focused(style);
        }
        style
    }

    fn face(&self, placed: &Placed) -> Option<String> {
        let node = self.tree.get(placed.node).ok()?;
        let face = match placed.kind {
            WidgetKind::Button => format!("[ {} ]", node.text),
            WidgetKind::CheckBox => if node.checked { "[x]" } else { "[ ]" }.to_string(),
            WidgetKind::ComboBox => {
                let option = node.children().get(node.selected)?;
                format!("< {} >", self.tree.text(*option).ok()?)
            }
            WidgetKind::Entry => {
                let width = usize::from(placed.area.width.saturating_sub(2));
                let chars: Vec<char> = node.value.chars().collect();
                let tail: String = chars[chars.len().saturating_sub(width)..].iter().collect();
                format!("[{tail:<width$}]")
            }
            WidgetKind::Label => node.text.clone(),
            WidgetKind::Empty | WidgetKind::Container => return None,
        };
        Some(face)
    }
}

impl Widget for TreeView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        for placed in self.placed {
            if placed.area.is_empty() {
                continue;
            }
            if placed.kind == WidgetKind::Container {
                if self.outline && placed.area.width >= 2 && placed.area.height >= 2 {
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme::BORDER))
                        .render(placed.area, buf);
                }
                continue;
            }
            if let Some(face) = self.face(placed) {
                buf.set_stringn(
                    placed.area.x,
                    placed.area.y,
                    face,
                    usize::from(placed.area.width),
                    self.style_for(placed.node),
                );
            }
        }
    }
}
