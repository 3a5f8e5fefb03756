//! Terminal renderer.
//!
//! The world is drawn into a [`PixelBuf`] whose pixels are half a terminal
//! cell tall, then flushed with `▀` glyphs (foreground = top pixel,
//! background = bottom pixel). The renderer only reads [`WorldState`].

use crate::config::*;
use crate::geom::Rect;
use crate::world::{Bird, Pipe, WorldState};
use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    const fn dim(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }

    fn to_crossterm(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const LETTERBOX: Rgb = Rgb(12, 14, 22);
const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PANEL: Rgb = Rgb(220, 195, 120);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

/// World-unit height of a pipe's lip.
const CAP_H: f32 = 12.0;
/// How far a pipe's lip sticks out on each side.
const CAP_OVERHANG: f32 = 3.0;
/// Vertical wing offset per animation frame.
const WING_POSES: [f32; ANIM_FRAMES as usize] = [-4.0, 0.0, 4.0, 0.0];

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![LETTERBOX; w * h],
        }
    }

    /// Buffer covering a terminal of `cols` × `rows` cells.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize, rows as usize * 2)
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, LETTERBOX);
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

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    fn dim(&mut self) {
        for p in &mut self.px {
            *p = p.dim();
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(top.to_crossterm()))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(top.to_crossterm()))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(bot.to_crossterm()))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

// ── 3x5 bitmap glyphs ──────────────────────────────────────────────────────

#[rustfmt::skip]
static DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
static LETTERS: [(char, [u8; 15]); 10] = [
    ('A', [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1]),
    ('C', [1,1,1, 1,0,0, 1,0,0, 1,0,0, 1,1,1]),
    ('E', [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1]),
    ('G', [1,1,1, 1,0,0, 1,0,1, 1,0,1, 1,1,1]),
    ('M', [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1]),
    ('O', [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1]),
    ('R', [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1]),
    ('S', [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1]),
    ('T', [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0]),
    ('V', [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0]),
];

fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    if let Some(d) = ch.to_digit(10) {
        return Some(&DIGITS[d as usize]);
    }
    LETTERS
        .iter()
        .find(|(c, _)| *c == ch.to_ascii_uppercase())
        .map(|(_, g)| g)
}

/// Pixel width of `text` at the given glyph scale.
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { (n * 4 - 1) * scale }
}

/// Draw `text` with a one-pixel drop shadow. Unknown characters draw as gaps.
pub fn draw_text(buf: &mut PixelBuf, x: i32, y: i32, text: &str, fg: Rgb, scale: i32) {
    for pass in [true, false] {
        for (i, ch) in text.chars().enumerate() {
            let Some(g) = glyph(ch) else { continue };
            let gx = x + i as i32 * 4 * scale;
            for row in 0..5 {
                for col in 0..3 {
                    if g[row * 3 + col] == 0 {
                        continue;
                    }
                    let px = gx + col as i32 * scale;
                    let py = y + row as i32 * scale;
                    if pass {
                        buf.fill_rect(px + 1, py + 1, scale, scale, SHADOW);
                    } else {
                        buf.fill_rect(px, py, scale, scale, fg);
                    }
                }
            }
        }
    }
}

fn draw_text_centered(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, fg: Rgb, scale: i32) {
    draw_text(buf, cx - text_width(text, scale) / 2, y, text, fg, scale);
}

// ── World → pixel projection ───────────────────────────────────────────────

/// Uniform scale fitting the play field into the buffer, centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub ox: f32,
    pub oy: f32,
}

impl Viewport {
    pub fn fit(pw: usize, ph: usize) -> Self {
        let scale = (pw as f32 / FIELD_WIDTH).min(ph as f32 / FIELD_HEIGHT);
        Self {
            scale,
            ox: ((pw as f32 - FIELD_WIDTH * scale) / 2.0).floor(),
            oy: ((ph as f32 - FIELD_HEIGHT * scale) / 2.0).floor(),
        }
    }

    pub fn px(&self, wx: f32) -> i32 {
        (self.ox + wx * self.scale).round() as i32
    }

    pub fn py(&self, wy: f32) -> i32 {
        (self.oy + wy * self.scale).round() as i32
    }

    /// Glyph scale for HUD text.
    fn text_scale(&self) -> i32 {
        ((self.scale * 3.0) as i32).max(1)
    }

    /// Pixel extent of a world rect clipped to the play field. Anything with
    /// positive area covers at least one pixel.
    fn project(&self, r: Rect) -> Option<(i32, i32, i32, i32)> {
        let x0 = r.x.max(0.0);
        let y0 = r.y.max(0.0);
        let x1 = r.right().min(FIELD_WIDTH);
        let y1 = r.bottom().min(FIELD_HEIGHT);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let (px0, py0) = (self.px(x0), self.py(y0));
        let px1 = self.px(x1).max(px0 + 1);
        let py1 = self.py(y1).max(py0 + 1);
        Some((px0, py0, px1, py1))
    }

    fn fill(&self, buf: &mut PixelBuf, r: Rect, c: Rgb) {
        if let Some((x0, y0, x1, y1)) = self.project(r) {
            buf.fill_rect(x0, y0, x1 - x0, y1 - y0, c);
        }
    }

    /// Fill with a per-column colour, `shade(column, total_columns)`.
    fn fill_shaded(&self, buf: &mut PixelBuf, r: Rect, shade: fn(i32, i32) -> Rgb) {
        if let Some((x0, y0, x1, y1)) = self.project(r) {
            let w = x1 - x0;
            for x in 0..w {
                let c = shade(x, w);
                for y in y0..y1 {
                    buf.set(x0 + x, y, c);
                }
            }
        }
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Draws a [`WorldState`] into a pixel buffer.
pub struct Renderer {
    pub buf: PixelBuf,
    view: Viewport,
}

impl Renderer {
    pub fn new(buf: PixelBuf) -> Self {
        let view = Viewport::fit(buf.width(), buf.height());
        Self { buf, view }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
        self.view = Viewport::fit(self.buf.width(), self.buf.height());
    }

    pub fn draw(&mut self, world: &WorldState) {
        self.buf.clear(LETTERBOX);
        self.draw_sky();
        for pipe in &world.pipes {
            self.draw_pipe(pipe);
        }
        self.draw_ground();
        self.draw_bird(&world.bird);
        self.draw_score(world.score);

        if world.game_over {
            self.draw_game_over(world.score);
        }
    }

    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        self.buf.render(out)
    }

    fn draw_sky(&mut self) {
        let y0 = self.view.py(0.0);
        let y1 = self.view.py(GROUND_Y);
        let x0 = self.view.px(0.0);
        let x1 = self.view.px(FIELD_WIDTH);
        let span = (y1 - y0).max(1);
        for y in y0..y1 {
            let t = ((y - y0) * 256 / span) as u16;
            let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
            for x in x0..x1 {
                self.buf.set(x, y, c);
            }
        }
    }

    fn draw_pipe(&mut self, pipe: &Pipe) {
        let v = self.view;
        let upper = pipe.upper_rect();
        let lower = pipe.lower_rect();
        let cap_w = PIPE_WIDTH + CAP_OVERHANG * 2.0;
        let cap_x = pipe.left() - CAP_OVERHANG;

        // Upper segment hangs from the top, lip at the gap.
        let body_h = (upper.h - CAP_H).max(0.0);
        v.fill_shaded(&mut self.buf, Rect::new(upper.x, 0.0, upper.w, body_h), pipe_shade);
        let cap = Rect::new(cap_x, body_h, cap_w, upper.h - body_h);
        v.fill_shaded(&mut self.buf, cap, pipe_shade);
        v.fill(&mut self.buf, Rect::new(cap_x, cap.bottom() - 1.0, cap_w, 1.0), CAP_DARK);

        // Lower segment stands on the ground, lip at the gap.
        let cap_h = CAP_H.min(lower.h);
        let cap = Rect::new(cap_x, lower.y, cap_w, cap_h);
        v.fill_shaded(&mut self.buf, cap, pipe_shade);
        v.fill(&mut self.buf, Rect::new(cap_x, lower.y, cap_w, 1.0), CAP_DARK);
        let body = Rect::new(lower.x, lower.y + cap_h, lower.w, lower.h - cap_h);
        v.fill_shaded(&mut self.buf, body, pipe_shade);
    }

    fn draw_ground(&mut self) {
        let v = self.view;
        let gy = v.py(GROUND_Y);
        let bottom = v.py(FIELD_HEIGHT);
        let x0 = v.px(0.0);
        let x1 = v.px(FIELD_WIDTH);
        for x in x0..x1 {
            let alt = ((x - x0) / 3) % 2 == 0;
            self.buf.set(x, gy, if alt { GRASS } else { GRASS_LIGHT });
            self.buf.set(x, gy + 1, GRASS);
        }
        for y in (gy + 2)..bottom {
            for x in x0..x1 {
                let stripe = ((x - x0) + (y - gy) * 2) % 12 < 6;
                self.buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
            }
        }
    }

    fn draw_bird(&mut self, bird: &Bird) {
        let v = self.view;
        let r = bird.rect();
        let cy = bird.y;

        // Body with rounded-off corners
        v.fill(&mut self.buf, Rect::new(r.x + 3.0, r.y, r.w - 6.0, r.h), BIRD_Y);
        v.fill(&mut self.buf, Rect::new(r.x, r.y + 4.0, r.w, r.h - 8.0), BIRD_Y);
        v.fill(&mut self.buf, Rect::new(r.x + 5.0, r.y + 1.0, r.w - 14.0, 3.0), BIRD_HI);

        // Wing
        let lift = WING_POSES[bird.anim_frame as usize % WING_POSES.len()];
        v.fill(&mut self.buf, Rect::new(r.x + 3.0, cy - 3.0 + lift, 13.0, 7.0), BIRD_WING);

        // Eye
        v.fill(&mut self.buf, Rect::new(r.right() - 13.0, r.y + 3.0, 8.0, 8.0), BIRD_EYE);
        v.fill(&mut self.buf, Rect::new(r.right() - 8.0, r.y + 5.0, 3.0, 4.0), BIRD_PUPIL);

        // Beak
        v.fill(&mut self.buf, Rect::new(r.right() - 6.0, cy, 10.0, 4.0), BIRD_BEAK_HI);
        v.fill(&mut self.buf, Rect::new(r.right() - 6.0, cy + 4.0, 9.0, 3.0), BIRD_BEAK);
    }

    fn draw_score(&mut self, score: u32) {
        let s = self.view.text_scale();
        let x = self.view.px(10.0);
        let y = self.view.py(10.0);
        draw_text(&mut self.buf, x, y, &format!("SCORE {score}"), WHITE, s);
    }

    fn draw_game_over(&mut self, score: u32) {
        self.buf.dim();

        let s = self.view.text_scale();
        let cx = self.view.px(FIELD_WIDTH / 2.0);
        let cy = self.view.py(FIELD_HEIGHT / 2.0);
        let line = 7 * s;

        let panel_w = text_width("GAME OVER", s) + 6 * s;
        let panel_h = line * 3 + 4 * s;
        let px = cx - panel_w / 2;
        let py = cy - panel_h / 2;
        self.buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
        self.buf.fill_rect(px, py, panel_w, panel_h, DIRT);
        self.buf.fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL);

        let top = py + 2 * s;
        draw_text_centered(&mut self.buf, cx, top, "GAME OVER", WHITE, s);
        draw_text_centered(&mut self.buf, cx, top + line, &format!("SCORE {score}"), BIRD_Y, s);
        draw_text_centered(&mut self.buf, cx, top + line * 2, "R RESTART", WHITE, s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_fits_tall_field() {
        // 80 cols × 64 rows → 80 × 128 pixels: height-bound.
        let v = Viewport::fit(80, 128);
        assert_eq!(v.scale, 0.25);
        assert_eq!(v.oy, 0.0);
        assert_eq!(v.ox, 4.0);
        assert_eq!(v.px(0.0), 4);
        assert_eq!(v.px(FIELD_WIDTH), 76);
        assert_eq!(v.py(GROUND_Y), 100);
    }

    #[test]
    fn test_project_clips_to_field() {
        let v = Viewport::fit(288, 512);
        assert_eq!(v.project(Rect::new(-100.0, 0.0, 50.0, 10.0)), None);
        assert_eq!(
            v.project(Rect::new(-10.0, 0.0, 20.0, 10.0)),
            Some((0, 0, 10, 10))
        );
    }

    #[test]
    fn test_tiny_rects_still_cover_a_pixel() {
        let v = Viewport::fit(36, 64);
        assert_eq!(v.scale, 0.125);
        let (x0, y0, x1, y1) = v.project(Rect::new(100.0, 100.0, 1.0, 1.0)).unwrap();
        assert_eq!(x1 - x0, 1);
        assert_eq!(y1 - y0, 1);
    }

    #[test]
    fn test_glyph_lookup() {
        assert!(glyph('7').is_some());
        assert!(glyph('g').is_some());
        assert!(glyph(' ').is_none());
        for ch in "GAME OVER SCORE R RESTART".chars().filter(|c| *c != ' ') {
            assert!(glyph(ch).is_some(), "missing glyph {ch}");
        }
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("1", 1), 3);
        assert_eq!(text_width("12", 2), 14);
    }

    #[test]
    fn test_draw_paints_bird_and_pipe() {
        let mut r = Renderer::new(PixelBuf::new(288, 512));
        let mut world = WorldState::new();
        world.pipes.push(Pipe::new(200.0, 150.0));
        r.draw(&world);

        // Middle of the bird body
        assert_eq!(r.buf.get(40, 256), BIRD_Y);
        // Inside the lower pipe body, left edge is darkest
        let c = r.buf.get(174, 300);
        assert_eq!(c, pipe_shade(0, 52));
        // Gap is sky
        let gap = r.buf.get(200, 200);
        assert_ne!(gap, PIPE_M);
        assert_ne!(gap, BIRD_Y);
    }

    #[test]
    fn test_game_over_dims_scene() {
        let mut r = Renderer::new(PixelBuf::new(288, 512));
        let mut world = WorldState::new();
        r.draw(&world);
        let sky = r.buf.get(280, 5);

        world.game_over = true;
        r.draw(&world);
        assert_eq!(r.buf.get(280, 5), sky.dim());
    }

    #[test]
    fn test_render_emits_half_blocks() {
        let mut buf = PixelBuf::new(2, 2);
        buf.set(0, 0, WHITE);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains('\u{2580}'));
    }

    #[test]
    fn test_render_empty_buffer() {
        let buf = PixelBuf::new(0, 0);
        let mut out = Vec::new();
        assert!(buf.render(&mut out).is_ok());
    }
}
