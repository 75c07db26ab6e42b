//! GameView: lays out the board and side panel in a terminal framebuffer.
//!
//! The board itself is drawn by the engine through a [`BoardCanvas`]; this
//! module adds the frame around it, the numbers beside it and the overlays
//! the engine leaves to the presentation layer. No I/O.

use crate::canvas::BoardCanvas;
use crate::core::{FrameInfo, GameLoop, SessionState, Telemetry};
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Rgb;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame sits in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the border
    pub start_x: u16,
    pub start_y: u16,
    /// Border size including the border itself
    pub frame_w: u16,
    pub frame_h: u16,
}

impl BoardLayout {
    /// Top-left character inside the border.
    pub fn inner_origin(&self) -> (u16, u16) {
        (self.start_x + 1, self.start_y + 1)
    }
}

const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

/// Terminal layout for one game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, board: (u16, u16), viewport: Viewport) -> BoardLayout {
        let frame_w = board.0 * self.cell_w + 2;
        let frame_h = board.1 * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Run one game frame into `fb` and draw the chrome around it.
    ///
    /// The framebuffer is resized to the viewport and fully repainted, so
    /// callers can reuse one buffer across frames.
    pub fn frame(
        &self,
        game: &mut GameLoop,
        now_ms: u64,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> FrameInfo {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let grid = game.session().grid();
        let board = (grid.width.max(0) as u16, grid.height.max(0) as u16);
        let layout = self.layout(board, viewport);
        self.draw_border(fb, &layout);

        game.set_cell_size(1.0);
        let info = {
            let mut canvas =
                BoardCanvas::new(fb, layout.inner_origin(), board, self.cell_w, self.cell_h);
            game.frame(now_ms, &mut canvas)
        };

        let telemetry = game.telemetry();
        self.draw_side_panel(fb, &telemetry, viewport, &layout);

        match info.state {
            SessionState::GameOver => self.draw_overlay_text(fb, &layout, "GAME OVER", 0),
            SessionState::NotStarted => self.draw_overlay_text(fb, &layout, "PRESS ENTER", 0),
            _ => {}
        }
        if info.state == SessionState::GameOver {
            self.draw_overlay_text(fb, &layout, "ENTER TO RETRY", 2);
        }
        info
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &BoardLayout) {
        let (x, y, w, h) = (layout.start_x, layout.start_y, layout.frame_w, layout.frame_h);
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        t: &Telemetry,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let mut y = layout.start_y;
        let mut field = |fb: &mut FrameBuffer, label: &str, value: u64| {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_u64(panel_x, y.saturating_add(1), value, VALUE);
            y = y.saturating_add(3);
        };
        field(fb, "SCORE", t.points() as u64);
        field(fb, "LAST", t.current_score as u64);
        field(fb, "LEVEL", t.level as u64);
        field(fb, "LINES", t.lines as u64);
        field(fb, "TIME", t.play_ms / 1000);
        field(fb, "FPS", t.fps.round() as u64);

        fb.put_str(panel_x, y, "NEXT", LABEL);
        for (i, kind) in t.preview.iter().enumerate() {
            let row = y.saturating_add(1 + i as u16);
            if row >= viewport.height {
                break;
            }
            fb.put_str(panel_x, row, kind.letter(), VALUE);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &BoardLayout, text: &str, dy: u16) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2).saturating_add(dy);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, OVERLAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::types::Key;

    #[test]
    fn test_layout_centres_board() {
        let view = GameView::default();
        let l = view.layout((10, 20), Viewport::new(80, 24));
        assert_eq!((l.frame_w, l.frame_h), (22, 22));
        assert_eq!((l.start_x, l.start_y), (29, 1));
        let top = GameView::default().with_anchor_y(AnchorY::Top);
        assert_eq!(top.layout((10, 20), Viewport::new(80, 24)).start_y, 0);
    }

    #[test]
    fn test_not_started_prompts_for_enter() {
        let view = GameView::default();
        let mut game = GameLoop::new(GameConfig::default());
        let mut fb = FrameBuffer::new(1, 1);
        view.frame(&mut game, 0, Viewport::new(80, 24), &mut fb);
        let screen: Vec<String> = (0..fb.height()).map(|y| fb.row_string(y)).collect();
        assert!(screen.iter().any(|r| r.contains("PRESS ENTER")));
        assert!(screen.iter().any(|r| r.contains("SCORE")));
    }

    #[test]
    fn test_active_tile_is_drawn_inside_border() {
        let view = GameView::default();
        let mut game = GameLoop::new(GameConfig::default());
        game.key_down(Key::Enter, 0);
        let mut fb = FrameBuffer::new(1, 1);
        view.frame(&mut game, 0, Viewport::new(80, 24), &mut fb);

        let layout = view.layout((10, 20), Viewport::new(80, 24));
        let (ox, oy) = layout.inner_origin();
        let blocks = (0..20)
            .flat_map(|y| (0..20).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get(ox + x, oy + y).map(|c| c.ch) == Some('█'))
            .count();
        // Four filled cells, two columns each.
        assert_eq!(blocks, 8);
        assert_eq!(fb.get(layout.start_x, layout.start_y).map(|c| c.ch), Some('┌'));
    }
}
