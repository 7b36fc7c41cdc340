use std::io::{self, Write};

use lifegrid_kernel::Board;

use crate::renderer::Renderer;

/// Writes rendered generations to a text sink.
///
/// Each frame is a `Generation N (population P)` header followed by the
/// renderer output and a blank line.
pub struct TextPresenter<R, W> {
    renderer: R,
    writer: W,
    headers: bool,
}

impl<R, W> TextPresenter<R, W>
where
    R: Renderer<Output = String>,
    W: Write,
{
    pub fn new(renderer: R, writer: W) -> Self {
        Self {
            renderer,
            writer,
            headers: true,
        }
    }

    /// Emit bare frames, no header line.
    pub fn without_headers(mut self) -> Self {
        self.headers = false;
        self
    }

    /// Render and write one generation.
    pub fn present(&mut self, board: &Board, generation: u64) -> io::Result<()> {
        if self.headers {
            writeln!(
                self.writer,
                "Generation {generation} (population {})",
                board.population()
            )?;
        }
        self.writer
            .write_all(self.renderer.render(board, generation).as_bytes())?;
        writeln!(self.writer)?;
        tracing::trace!(generation, "frame written");
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
