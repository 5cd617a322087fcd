//! Terminal backend: half-block pixel rendering through crossterm
//!
//! Each terminal cell shows two vertical pixels using `▀` with the upper
//! pixel as foreground and the lower one as background. The logical canvas
//! is scaled to fit the terminal and centered, with black bars around it.

use std::io::{self, Write};

use crossterm::{
    cursor, event, execute, queue,
    style::{self, Color as CColor},
    terminal,
};
use glam::Vec2;

use super::scene::{Color, Scene, TextAnchor};
use crate::sim::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub fn from_color(color: Color) -> Self {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb(channel(color[0]), channel(color[1]), channel(color[2]))
    }

    fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

/// Pixel grid twice as tall as the terminal
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb::BLACK; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, Rgb::BLACK);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Fill the half-open pixel range `[x0, x1) × [y0, y1)`, clipped
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c: Rgb) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.w as i32);
        let y1 = y1.min(self.h as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, c);
            }
        }
    }

    /// Emit the buffer starting at the top-left cell
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg: Option<Rgb> = None;
        let mut prev_bg: Option<Rgb> = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if prev_bg != Some(top) {
                        queue!(out, style::SetBackgroundColor(top.term()))?;
                        prev_bg = Some(top);
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if prev_fg != Some(top) {
                        queue!(out, style::SetForegroundColor(top.term()))?;
                        prev_fg = Some(top);
                    }
                    if prev_bg != Some(bot) {
                        queue!(out, style::SetBackgroundColor(bot.term()))?;
                        prev_bg = Some(bot);
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                prev_fg = None;
                prev_bg = None;
            }
        }
        queue!(out, style::ResetColor)
    }
}

/// Uniform scale plus centering offset from canvas units to pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vec2,
}

impl Viewport {
    pub fn fit(canvas: Vec2, pixels: (usize, usize)) -> Self {
        let avail = Vec2::new(pixels.0 as f32, pixels.1 as f32);
        let scale = (avail.x / canvas.x).min(avail.y / canvas.y);
        let offset = ((avail - canvas * scale) / 2.0).floor();
        Self { scale, offset }
    }

    pub fn to_pixel(&self, point: Vec2) -> (i32, i32) {
        let p = self.offset + point * self.scale;
        (p.x.round() as i32, p.y.round() as i32)
    }

    fn fill(&self, buf: &mut PixelBuf, rect: &Rect, c: Rgb) {
        let (x0, y0) = self.to_pixel(rect.pos);
        let (x1, y1) = self.to_pixel(rect.pos + rect.size);
        buf.fill_rect(x0, y0, x1, y1, c);
    }
}

/// Rasterize the scene's background and rectangles into `buf`
pub fn rasterize(scene: &Scene, buf: &mut PixelBuf) -> Viewport {
    let viewport = Viewport::fit(scene.size, (buf.width(), buf.height()));
    buf.clear(Rgb::BLACK);
    viewport.fill(
        buf,
        &Rect::new(0.0, 0.0, scene.size.x, scene.size.y),
        Rgb::from_color(scene.background),
    );
    for filled in &scene.rects {
        viewport.fill(buf, &filled.rect, Rgb::from_color(filled.color));
    }
    viewport
}

/// Draws scenes to any writer sized as a `cols × rows` terminal
pub struct TermCanvas<W: Write> {
    out: W,
    buf: PixelBuf,
}

impl<W: Write> TermCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn draw(&mut self, scene: &Scene) -> io::Result<()> {
        let viewport = rasterize(scene, &mut self.buf);
        self.buf.render(&mut self.out)?;

        let cols = self.buf.width() as i32;
        let rows = (self.buf.height() / 2) as i32;
        let bg = Rgb::from_color(scene.background);

        for overlay in &scene.texts {
            let len = overlay.text.chars().count() as i32;
            let (col, row) = match overlay.anchor {
                TextAnchor::TopLeft(p) => {
                    let (x, y) = viewport.to_pixel(p);
                    (x, y / 2)
                }
                TextAnchor::Center(p) => {
                    let (x, y) = viewport.to_pixel(p);
                    (x - len / 2, y / 2)
                }
            };
            if row < 0 || row >= rows {
                continue;
            }
            let col = col.clamp(0, cols.max(1) - 1);
            let visible: String = overlay.text.chars().take((cols - col).max(0) as usize).collect();
            if visible.is_empty() {
                continue;
            }
            queue!(
                self.out,
                cursor::MoveTo(col as u16, row as u16),
                style::SetForegroundColor(Rgb::from_color(overlay.color).term()),
                style::SetBackgroundColor(bg.term()),
                style::Print(visible),
                style::ResetColor,
            )?;
        }

        self.out.flush()
    }
}

/// Raw mode plus alternate screen for the lifetime of the value.
///
/// Where the terminal supports the kitty keyboard protocol, key release and
/// repeat events are switched on too, so held keys can be told apart from
/// fresh presses.
pub struct TerminalSession {
    keyboard_enhanced: bool,
}

impl TerminalSession {
    pub fn enter(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut session = Self {
            keyboard_enhanced: false,
        };
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                out,
                event::PushKeyboardEnhancementFlags(
                    event::KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
            session.keyboard_enhanced = true;
        }
        log::info!(
            "Terminal key release reporting: {}",
            if session.keyboard_enhanced { "on" } else { "unavailable" }
        );

        Ok(session)
    }

    /// Whether the terminal reports key releases and repeats
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.keyboard_enhanced {
            if let Err(e) = execute!(out, event::PopKeyboardEnhancementFlags) {
                log::warn!("Failed to restore keyboard mode: {}", e);
            }
        }
        if let Err(e) = execute!(
            out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        ) {
            log::warn!("Failed to restore terminal screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("Failed to leave raw mode: {}", e);
        }
    }
}
