use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Regions of the in-game screen.
pub struct GameLayout {
    pub header: Rect,
    pub word: Rect,
    pub timer: Rect,
    pub notice: Rect,
    pub footer: Rect,
}

impl GameLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            word: vertical[1],
            timer: vertical[2],
            notice: vertical[3],
            footer: vertical[4],
        }
    }
}

/// Join hints into as few lines as fit in `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}

/// A box of at least `min_w` x `min_h`, centred in `area` and clipped to it.
pub fn centered_rect(min_w: u16, min_h: u16, area: Rect) -> Rect {
    let target_w = min_w.min(area.width);
    let target_h = min_h.min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_wrap_at_width() {
        let lines = pack_hint_lines(&["[q] Quit", "[r] Restart", "[Esc] Menu"], 24);
        assert_eq!(lines, vec!["  [q] Quit  [r] Restart", "  [Esc] Menu"]);
    }

    #[test]
    fn test_centered_rect_clips_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(40, 4, area), Rect::new(0, 3, 20, 4));
    }

    #[test]
    fn test_game_layout_fills_area() {
        let layout = GameLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.footer.y, 23);
        assert_eq!(layout.word.height, 24 - 3 - 3 - 1 - 1);
    }
}
