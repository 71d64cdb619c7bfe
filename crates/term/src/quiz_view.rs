//! QuizView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::projection::MapProjection;
use crate::types::{ModeKey, Point, RoundPhase, Target, MAP_BOUNDS};

const LAND: Rgb = Rgb::new(24, 36, 30);

const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const LABEL: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const VALUE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const HINT: CellStyle = CellStyle::fg(Rgb::new(150, 150, 150)).dim();
const HIT: CellStyle = CellStyle::fg(Rgb::new(100, 220, 120)).bold();
const MISS: CellStyle = CellStyle::fg(Rgb::new(230, 110, 90)).bold();

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

/// Inputs for one frame of play.
#[derive(Debug, Clone, Copy)]
pub struct PlayFrame<'a> {
    pub snap: &'a GameSnapshot,
    pub cursor: Point,
    /// Drawn as outlines when the snapshot says the layer is visible.
    pub counties: &'a [Target],
    pub notice: Option<&'a str>,
}

/// One row of the mode menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: ModeKey,
    pub label: &'static str,
    /// Targets the mode would draw from; zero means its data is missing.
    pub available: usize,
    /// Mode of the previous session, started by Enter.
    pub last_played: bool,
}

/// Terminal renderer for the quiz: map on the left, panel on the right.
pub struct QuizView {
    panel_w: u16,
    /// Map columns per row. Terminal glyphs are roughly twice as tall as
    /// wide, and a degree of longitude is shorter than a degree of latitude
    /// at these latitudes.
    map_aspect: f64,
}

impl Default for QuizView {
    fn default() -> Self {
        Self {
            panel_w: 36,
            map_aspect: 1.7,
        }
    }
}

impl QuizView {
    pub fn new(panel_w: u16, map_aspect: f64) -> Self {
        Self { panel_w, map_aspect }
    }

    /// Map placement for `viewport`, or `None` when the terminal is too small.
    pub fn projection(&self, viewport: Viewport) -> Option<MapProjection> {
        let inner_h = viewport.height.checked_sub(2)?;
        let avail_w = viewport.width.checked_sub(self.panel_w + 3)?;
        let wanted_w = (f64::from(inner_h) * self.map_aspect).round() as u16;
        let inner_w = avail_w.min(wanted_w);
        if inner_w < 8 || inner_h < 4 {
            return None;
        }
        Some(MapProjection::new(MAP_BOUNDS, 1, 1, inner_w, inner_h))
    }

    /// Render a frame of play into an existing framebuffer.
    pub fn render_play_into(&self, frame: &PlayFrame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let Some(proj) = self.projection(viewport) else {
            fb.put_str(0, 0, "Terminal too small", LABEL);
            return;
        };
        let snap = frame.snap;

        fb.fill_rect(proj.origin_x, proj.origin_y, proj.width, proj.height, ' ', CellStyle::fg(LAND).on(LAND));
        draw_border(fb, 0, 0, proj.width + 2, proj.height + 2, BORDER);

        if snap.counties_visible {
            let style = CellStyle::fg(Rgb::new(90, 110, 100)).on(LAND).dim();
            for geometry in frame.counties.iter().filter_map(|t| t.geometry.as_ref()) {
                for (x, y) in proj.outline_cells(geometry) {
                    fb.put_char(x, y, '·', style);
                }
            }
        }

        if let Some(highlight) = &snap.highlight {
            let style = CellStyle::fg(Rgb::new(240, 220, 80)).on(LAND).bold();
            for (x, y) in proj.outline_cells(highlight) {
                fb.put_char(x, y, '█', style);
            }
        }

        if let Some((x, y)) = snap.answer.and_then(|p| proj.project(p)) {
            fb.put_char(x, y, '★', HIT.on(LAND));
        }
        if let Some((x, y)) = snap.guess.and_then(|p| proj.project(p)) {
            fb.put_char(x, y, '✕', MISS.on(LAND));
        }
        if snap.phase == RoundPhase::AwaitingGuess {
            if let Some((x, y)) = proj.project(frame.cursor) {
                fb.put_char(x, y, '+', CellStyle::fg(Rgb::new(255, 255, 255)).on(LAND).bold());
            }
        }

        let panel_x = proj.width + 4;
        self.draw_play_panel(fb, frame, viewport, panel_x);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render_play(&self, frame: &PlayFrame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_play_into(frame, viewport, &mut fb);
        fb
    }

    /// Render the mode menu.
    pub fn render_menu_into(
        &self,
        entries: &[MenuEntry],
        snap: &GameSnapshot,
        notice: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let x = 2;
        let mut y = 1;
        fb.put_str(x, y, "MICHIGAN GEOGRAPHY QUIZ", LABEL);
        y += 2;
        fb.put_str(x, y, "Choose a mode:", VALUE);
        y += 2;

        for (i, entry) in entries.iter().enumerate() {
            let style = if entry.available == 0 { HINT } else { VALUE };
            let marker = if entry.last_played { '›' } else { ' ' };
            fb.put_char(x - 2, y, marker, LABEL);
            let mut cx = fb.put_str(x, y, &format!("{}  ", i + 1), LABEL);
            cx = fb.put_str(cx, y, entry.label, style);
            let count = match entry.available {
                0 => "  (no data)".to_string(),
                1 => "  (1 target)".to_string(),
                n => format!("  ({n} targets)"),
            };
            fb.put_str(cx, y, &count, HINT);
            y += 1;
        }

        y += 1;
        let mut cx = fb.put_str(x, y, "BEST ", LABEL);
        fb.put_u32(cx, y, snap.high_score, VALUE);
        y += 1;
        cx = fb.put_str(x, y, "POOL ", LABEL);
        fb.put_str(cx, y, &snap.pool_size.label(), VALUE);
        y += 1;
        cx = fb.put_str(x, y, "COUNTIES ", LABEL);
        fb.put_str(cx, y, on_off(snap.counties_visible), VALUE);
        y += 2;

        if let Some(notice) = notice {
            fb.put_str(x, y, notice, MISS);
        }

        let footer_y = viewport.height.saturating_sub(1);
        fb.put_str(x, footer_y, "1-5 start  enter resume  p pool  c counties  q quit", HINT);
    }

    pub fn render_menu(
        &self,
        entries: &[MenuEntry],
        snap: &GameSnapshot,
        notice: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_menu_into(entries, snap, notice, viewport, &mut fb);
        fb
    }

    fn draw_play_panel(&self, fb: &mut FrameBuffer, frame: &PlayFrame<'_>, viewport: Viewport, panel_x: u16) {
        let snap = frame.snap;
        let panel_w = viewport.width.saturating_sub(panel_x) as usize;
        if panel_w < 12 {
            return;
        }
        let bottom = viewport.height.saturating_sub(2);

        let mut y = 1;
        fb.put_str(panel_x, y, snap.mode_label.unwrap_or("-"), LABEL);
        let cx = fb.put_str(panel_x + 20, y, "ROUND ", HINT);
        fb.put_u32(cx, y, snap.round_number, HINT);
        y += 2;

        fb.put_str(panel_x, y, "FIND", LABEL);
        y += 1;
        for line in wrap(snap.target_name.as_deref().unwrap_or("-"), panel_w) {
            fb.put_str(panel_x, y, &line, CellStyle::fg(Rgb::new(255, 255, 255)).bold());
            y += 1;
        }
        y += 1;

        let mut cx = fb.put_str(panel_x, y, "STREAK ", LABEL);
        fb.put_u32(cx, y, snap.streak, VALUE);
        cx = fb.put_str(panel_x + 12, y, "BEST ", LABEL);
        fb.put_u32(cx, y, snap.high_score, VALUE);
        y += 1;

        if snap.has_pool_size_control {
            cx = fb.put_str(panel_x, y, "POOL ", LABEL);
            fb.put_str(cx, y, &format!("{} ({} targets)", snap.pool_size.label(), snap.pool_len), VALUE);
            y += 1;
        }
        cx = fb.put_str(panel_x, y, "COUNTIES ", LABEL);
        fb.put_str(cx, y, on_off(snap.counties_visible), VALUE);
        y += 1;

        if snap.phase == RoundPhase::AwaitingGuess {
            fb.put_str(
                panel_x,
                y,
                &format!("{:.3}, {:.3}", frame.cursor.lat, frame.cursor.lng),
                HINT,
            );
        }
        y += 2;

        if let (Some(outcome), Some(message)) = (snap.outcome, snap.result_message) {
            let style = if outcome.success { HIT } else { MISS };
            for line in wrap(message, panel_w) {
                fb.put_str(panel_x, y, &line, style);
                y += 1;
            }
            if let Some(text) = &snap.result_text {
                for line in wrap(text, panel_w) {
                    fb.put_str(panel_x, y, &line, VALUE);
                    y += 1;
                }
            }
            y += 1;
        }

        if let Some(details) = &snap.details {
            let mut lines = Vec::new();
            if let Some(label) = &details.district_label {
                lines.push(format!("District {label}"));
            }
            if let Some(pop) = details.population {
                lines.push(format!("Population: {}", group_thousands(pop)));
            }
            if let Some(founded) = &details.date_founded {
                lines.push(format!("Founded: {founded}"));
            }
            if let Some(fact) = &details.fun_fact {
                lines.push(fact.clone());
            }
            lines.push(details.wiki_url.clone());

            for line in lines.iter().flat_map(|l| wrap(l, panel_w)) {
                if y >= bottom {
                    break;
                }
                fb.put_str(panel_x, y, &line, VALUE);
                y += 1;
            }
        }

        if let Some(notice) = frame.notice {
            fb.put_str(panel_x, bottom, notice, MISS);
        }

        let help = match snap.phase {
            RoundPhase::AwaitingGuess => "arrows move  enter guess  m modes".to_string(),
            RoundPhase::Resolved => format!(
                "r retry  n {}  m modes",
                snap.next_action_label.unwrap_or("next").to_lowercase()
            ),
            RoundPhase::Idle => "m modes  q quit".to_string(),
        };
        fb.put_str(panel_x, viewport.height.saturating_sub(1), &help, HINT);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn on_off(v: bool) -> &'static str {
    if v {
        "on"
    } else {
        "off"
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let len = line.chars().count();
        if len > 0 && len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
