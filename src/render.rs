use crossterm::{
    cursor, execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use mochigotchi::config::Settings;
use mochigotchi::meter::{NeedMeter, MAX_STARS};
use mochigotchi::{LifeStage, Pet, Rules};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
    pub(crate) bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
            bold: false,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell {
            bg,
            ..Cell::default()
        });
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    /// Flush `cur` to the screen. With `diff_only`, cells equal to the last
    /// presented frame are skipped.
    pub(crate) fn present(&mut self, diff_only: bool, color: bool) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        let mut last_bold = false;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if diff_only && c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                let (fg, bg) = if color {
                    (c.fg, c.bg)
                } else {
                    (Color::Reset, Color::Reset)
                };
                if last_fg != Some(fg) {
                    queue!(self.out, SetForegroundColor(fg))?;
                    last_fg = Some(fg);
                }
                if last_bg != Some(bg) {
                    queue!(self.out, SetBackgroundColor(bg))?;
                    last_bg = Some(bg);
                }
                if c.bold != last_bold {
                    let attr = if c.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(self.out, SetAttribute(attr))?;
                    last_bold = c.bold;
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            EndSynchronizedUpdate
        )?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(
            xx,
            y,
            Cell {
                ch,
                fg,
                bg,
                bold: false,
            },
        );
    }
}

fn bar(value01: f64, width: usize) -> String {
    let v = value01.clamp(0.0, 1.0);
    let fill = (v * width as f64 + 0.5) as usize;
    let mut s = String::new();
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { ' ' });
    }
    s.push(']');
    s
}

fn stars(meter: &NeedMeter) -> String {
    let n = meter.stars();
    (0..MAX_STARS)
        .map(|i| if i < n { '★' } else { '☆' })
        .collect()
}

fn meter_color(meter: &NeedMeter) -> Color {
    if meter.is_dying() {
        Color::Red
    } else if meter.is_low() {
        Color::Yellow
    } else {
        Color::White
    }
}

/// Left-hand status panel plus the status and key hint lines at the bottom.
pub(crate) fn ui_overlay(
    buf: &mut CellBuffer,
    pet: &Pet,
    rules: &Rules,
    settings: &Settings,
    status: &str,
    hint: &str,
) {
    let bg = Color::Black;
    let fg = Color::White;
    let dim = Color::DarkGrey;

    let personality = pet.personality().map(|p| p.name()).unwrap_or("-");
    let title = format!(
        "Mochigotchi  |  {}  |  {}  |  sprite: {}",
        pet.stage(),
        personality,
        pet.sprite_key()
    );
    draw_text(buf, 1, 0, &title, fg, bg);

    let mut y = 2;
    for (name, meter) in [("Hunger ", pet.hunger()), ("Boredom", pet.boredom())] {
        let line = format!("{name} {}", stars(meter));
        draw_text(buf, 1, y, &line, meter_color(meter), bg);
        y += 1;
    }

    if !pet.stage().is_inert() {
        let progress = pet.growth_progress(rules);
        let line = format!("Growth  {} {:>3.0}%", bar(progress, 12), progress * 100.0);
        draw_text(buf, 1, y, &line, fg, bg);
        y += 1;
        let line = format!("Pace    x{:.2}", pet.growth_multiplier());
        draw_text(buf, 1, y, &line, dim, bg);
    } else if pet.stage() == LifeStage::Egg {
        let line = format!(
            "Taps    {}/{}",
            pet.egg_taps(),
            rules.egg_taps_to_hatch
        );
        draw_text(buf, 1, y, &line, fg, bg);
    }
    y += 2;

    let mut flags = Vec::new();
    if pet.illness().is_currently_ill() {
        flags.push("ill".to_string());
    }
    if pet.waste().has_pooped_now() {
        flags.push("poop".to_string());
    }
    if pet.attention().is_demanding() {
        let left = pet.attention().window_left(&rules.demand).unwrap_or(0.0);
        flags.push(format!("calling ({left:.0}s)"));
    }
    if pet.was_neglected() {
        flags.push("neglected".to_string());
    }
    let line = if flags.is_empty() {
        "Status  ok".to_string()
    } else {
        format!("Status  {}", flags.join(", "))
    };
    let color = if flags.is_empty() { fg } else { Color::Yellow };
    draw_text(buf, 1, y, &line, color, bg);
    y += 1;

    let oversight = pet.oversight();
    let line = if let Some(reason) = oversight.escalation() {
        format!("Watch   escalated: {}", reason.label())
    } else if oversight.is_watching() {
        let why = oversight
            .reason()
            .map(|r| format!("{r:?}"))
            .unwrap_or_default();
        format!("Watch   watching {why} (ill x{})", oversight.illness_count())
    } else if oversight.is_activated() {
        format!("Watch   on (ill x{})", oversight.illness_count())
    } else {
        "Watch   off".to_string()
    };
    draw_text(buf, 1, y, &line, fg, bg);
    y += 2;

    draw_text(buf, 1, y, "Pantry", fg, bg);
    y += 1;
    let entries = pet.inventory().entries();
    if entries.is_empty() {
        draw_text(buf, 3, y, "(empty)", dim, bg);
        y += 1;
    }
    for (ingredient, qty) in entries {
        let line = format!("{:<22} x{qty}", ingredient.display_name());
        draw_text(buf, 3, y, &line, fg, bg);
        y += 1;
    }
    y += 1;

    let sleep = &settings.sleep;
    let line = format!(
        "Room {}  |  speed {}  |  lights {}{}",
        pet.room(),
        settings.time_mode,
        if sleep.lights_on() { "on" } else { "off" },
        if sleep.is_sleeping() { "  |  zzz" } else { "" }
    );
    draw_text(buf, 1, y, &line, dim, bg);

    draw_text(buf, 1, buf.h.saturating_sub(2), status, Color::Cyan, bg);
    draw_text(buf, 1, buf.h.saturating_sub(1), hint, fg, bg);
}

fn sprite(pet: &Pet) -> &'static [&'static str] {
    match pet.stage() {
        LifeStage::Egg => &["   ___   ", "  /   \\  ", " | . . | ", "  \\___/  "],
        LifeStage::Baby => &["  (o o)  ", "  ( - )  "],
        LifeStage::Child => &["  .---.  ", " ( o o ) ", " (  -  ) ", "  '---'  "],
        LifeStage::Young => &[
            "   ___   ",
            "  /   \\  ",
            " | o o | ",
            " |  v  | ",
            "  \\___/  ",
        ],
        LifeStage::Adult | LifeStage::ReadyToAscend => &[
            "    _____    ",
            "   /     \\   ",
            "  |  o o  |  ",
            "  |   ^   |  ",
            "  |  \\_/  |  ",
            "   \\_____/   ",
        ],
        LifeStage::Dead => &["   ___   ", "  /   \\  ", " | x x | ", " |  -  | ", "  \\___/  "],
    }
}

pub(crate) fn draw_pet_ascii(buf: &mut CellBuffer, pet: &Pet, sleeping: bool, cx: i32, cy: i32) {
    let bg = Color::Black;
    let fg = match pet.stage() {
        LifeStage::Dead => Color::DarkGrey,
        _ if pet.illness().is_currently_ill() => Color::Green,
        _ if sleeping => Color::Blue,
        _ => Color::White,
    };

    let grid = sprite(pet);
    let h = grid.len() as i32;
    let w = grid.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
    let x0 = cx - w / 2;
    let y0 = cy - h / 2;

    for (yy, line) in grid.iter().enumerate() {
        let y = y0 + yy as i32;
        if y < 0 || y >= buf.h as i32 {
            continue;
        }
        let mut x = x0;
        for ch in line.chars() {
            if x >= 0 && x < buf.w as i32 {
                buf.set(
                    x as u16,
                    y as u16,
                    Cell {
                        ch,
                        fg,
                        bg,
                        bold: false,
                    },
                );
            }
            x += 1;
        }
    }

    let mut mark = |dx: i32, dy: i32, ch: char, fg: Color| {
        let (x, y) = (cx + dx, y0 + dy);
        if y >= 0 && y < buf.h as i32 && x >= 0 && x < buf.w as i32 {
            buf.set(
                x as u16,
                y as u16,
                Cell {
                    ch,
                    fg,
                    bg,
                    bold: true,
                },
            );
        }
    };
    if pet.attention().is_demanding() {
        mark(0, -2, '!', Color::Red);
    }
    if sleeping && pet.is_alive() {
        mark(w / 2 + 1, -1, 'z', Color::Blue);
    }
    if pet.waste().has_pooped_now() {
        mark(w / 2 + 2, h, '@', Color::DarkYellow);
    }
}
