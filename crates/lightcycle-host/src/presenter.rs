//! Terminal-side port implementations. Frames, cues and scores all go through
//! `tracing`, so the host runs headless.

use lightcycle_arena::agent::Agent;
use lightcycle_arena::ports::{AudioPort, RenderPort, ScoreboardPort};
use lightcycle_core::{GridDimensions, Outcome, PlayerId, ScoreSnapshot};

#[derive(Debug, Default)]
pub struct LogPresenter {
    /// Draw the full board on every frame instead of logging head positions.
    draw_board: bool,
    frames: u64,
}

impl LogPresenter {
    pub fn new(draw_board: bool) -> Self {
        Self {
            draw_board,
            frames: 0,
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl RenderPort for LogPresenter {
    fn present_frame(&mut self, agents: &[Agent], grid: GridDimensions, cell_size: u32) {
        self.frames += 1;
        if self.draw_board {
            tracing::info!("\n{}", render_board(agents, grid));
            return;
        }
        for agent in agents {
            let (x, y) = agent.position().to_pixels(cell_size);
            tracing::debug!(
                frame = self.frames,
                player = %agent.id(),
                col = agent.position().col,
                row = agent.position().row,
                x,
                y,
                color = %agent.color().to_hex(),
                "Cycle"
            );
        }
    }
}

impl AudioPort for LogPresenter {
    fn on_turn_accepted(&mut self, player: PlayerId) {
        tracing::debug!(%player, "Turn cue");
    }

    fn on_round_started(&mut self) {
        tracing::debug!("Music cue");
    }

    fn on_round_ended(&mut self, outcome: Outcome) {
        tracing::info!(%outcome, "Crash cue");
    }
}

impl ScoreboardPort for LogPresenter {
    fn show_scores(&mut self, scores: ScoreSnapshot) {
        tracing::info!(draws = scores.draws, "{scores}");
    }
}

/// Text rendering of the arena. Trails are `1`/`2`, heads `A`/`B`, empty cells `.`;
/// anything outside the grid is skipped.
pub fn render_board(agents: &[Agent], grid: GridDimensions) -> String {
    let width = grid.width as usize;
    let height = grid.height as usize;
    let mut cells = vec![b'.'; width * height];

    let mut paint = |col: i32, row: i32, glyph: u8| {
        if col >= 0 && row >= 0 && (col as usize) < width && (row as usize) < height {
            cells[row as usize * width + col as usize] = glyph;
        }
    };

    for agent in agents {
        let (trail, head) = match agent.id() {
            PlayerId::One => (b'1', b'A'),
            PlayerId::Two => (b'2', b'B'),
        };
        for cell in agent.body() {
            paint(cell.col, cell.row, trail);
        }
        let pos = agent.position();
        paint(pos.col, pos.row, head);
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in cells.chunks(width.max(1)) {
        out.extend(row.iter().map(|&b| b as char));
        out.push('\n');
    }
    out
}
