//! Places live nodes on screen.
//!
//! Every node has a natural size derived from what it shows. Containers
//! give their first child its natural extent along their orientation and
//! the second child whatever is left.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::host::{LiveTree, NodeId};
use crate::render::{attr, kind_of, DescribeError};
use crate::widget::WidgetKind;

/// Columns between the two children of a horizontal container.
const GAP: u16 = 1;

/// A live node and the screen area it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub node: NodeId,
    pub kind: WidgetKind,
    pub area: Rect,
}

/// Header line, body, status line.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Natural `(width, height)` of the subtree at `id`.
pub fn measure(tree: &LiveTree, id: NodeId, outline: bool) -> Result<(u16, u16), DescribeError> {
    let node = tree.get(id)?;
    let size = match kind_of(tree, id)? {
        WidgetKind::Button => (text_width(&node.text).saturating_add(4), 1),
        WidgetKind::CheckBox => (3, 1),
        WidgetKind::ComboBox => {
            let widest = node
                .children()
                .iter()
                .map(|&opt| tree.text(opt).map(text_width))
                .try_fold(0u16, |acc, w| w.map(|w| acc.max(w)))?;
            (widest.saturating_add(4), 1)
        }
        WidgetKind::Entry => {
            let width = node
                .attribute(attr::SIZE)
                .and_then(|s| s.parse::<u16>().ok())
                .ok_or(DescribeError::BadWidth { node: id })?;
            (width.saturating_add(2), 1)
        }
        WidgetKind::Label => (text_width(&node.text), 1),
        WidgetKind::Empty => (0, 0),
        WidgetKind::Container => {
            let [left, right] = node.children() else {
                return Err(DescribeError::Arity {
                    node: id,
                    count: node.children().len(),
                });
            };
            let (lw, lh) = measure(tree, *left, outline)?;
            let (rw, rh) = measure(tree, *right, outline)?;
            let (w, h) = if is_horizontal(tree, id)? {
                let gap = if lw > 0 && rw > 0 { GAP } else { 0 };
                (lw.saturating_add(gap).saturating_add(rw), lh.max(rh))
            } else {
                (lw.max(rw), lh.saturating_add(rh))
            };
            if outline {
                (w.saturating_add(2), h.saturating_add(2))
            } else {
                (w, h)
            }
        }
    };
    Ok(size)
}

fn is_horizontal(tree: &LiveTree, id: NodeId) -> Result<bool, DescribeError> {
    Ok(tree.has_class(id, crate::render::class::HORIZONTAL)?)
}

/// Pre-order placement of the subtree at `id` inside `area`. Nodes that end
/// up with no room are still listed, with an empty area.
pub fn place(
    tree: &LiveTree,
    id: NodeId,
    area: Rect,
    outline: bool,
) -> Result<Vec<Placed>, DescribeError> {
    let mut placed = Vec::new();
    place_into(tree, id, area, outline, &mut placed)?;
    Ok(placed)
}

fn place_into(
    tree: &LiveTree,
    id: NodeId,
    area: Rect,
    outline: bool,
    out: &mut Vec<Placed>,
) -> Result<(), DescribeError> {
    let kind = kind_of(tree, id)?;
    let (width, height) = measure(tree, id, outline)?;
    let own = Rect {
        x: area.x,
        y: area.y,
        width: width.min(area.width),
        height: height.min(area.height),
    };
    out.push(Placed {
        node: id,
        kind,
        area: own,
    });

    if kind != WidgetKind::Container {
        return Ok(());
    }

    let inner = if outline { shrink(own) } else { own };
    let children = tree.children(id)?;
    let (left, right) = (children[0], children[1]);
    let (lw, lh) = measure(tree, left, outline)?;

    let (left_area, right_area) = if is_horizontal(tree, id)? {
        let gap = if lw > 0 { GAP } else { 0 };
        let lw = lw.min(inner.width);
        let rest = inner.width.saturating_sub(lw).saturating_sub(gap);
        (
            Rect { width: lw, ..inner },
            Rect {
                x: inner.x.saturating_add(inner.width - rest),
                width: rest,
                ..inner
            },
        )
    } else {
        let lh = lh.min(inner.height);
        (
            Rect { height: lh, ..inner },
            Rect {
                y: inner.y.saturating_add(lh),
                height: inner.height - lh,
                ..inner
            },
        )
    };

    place_into(tree, left, left_area, outline, out)?;
    place_into(tree, right, right_area, outline, out)
}

fn shrink(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
