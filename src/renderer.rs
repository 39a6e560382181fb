use color_eyre::Result;
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Block,
};

use crate::assets::{Drawable, Sprites};
use crate::config::{MAX_SHIELD, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::PlayerLook;
use crate::geometry::{Bounds, Point};
use crate::world::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// One drawing operation in screen pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Image {
        name: String,
        tint: Rgb,
        bounds: Bounds,
    },
    /// Text anchored at the middle of its top edge
    Text {
        text: String,
        size: u16,
        anchor: Point,
        color: Rgb,
    },
    FillRect {
        bounds: Bounds,
        color: Rgb,
    },
    OutlineRect {
        bounds: Bounds,
        color: Rgb,
    },
}

/// Display backend. Commands accumulate until `present` shows the finished frame.
pub trait Renderer {
    fn clear(&mut self);
    fn draw_image(&mut self, image: &Drawable, at: Point);
    fn draw_text(&mut self, text: &str, size: u16, anchor: Point, color: Rgb);
    fn fill_rect(&mut self, bounds: Bounds, color: Rgb);
    fn outline_rect(&mut self, bounds: Bounds, color: Rgb);
    fn present(&mut self) -> Result<()>;
}

/// Collects commands into a list, shared by both renderers
#[derive(Debug, Default)]
struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    fn push_image(&mut self, image: &Drawable, at: Point) {
        let (width, height) = image.size();
        self.commands.push(DrawCommand::Image {
            name: image.name.clone(),
            tint: image.tint,
            bounds: Bounds::new(at.x, at.y, width, height),
        });
    }

    fn push_text(&mut self, text: &str, size: u16, anchor: Point, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            size,
            anchor,
            color,
        });
    }
}

/// Keeps every presented frame in memory. Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pending: CommandList,
    pub frames: Vec<Vec<DrawCommand>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Every string drawn in the last presented frame
    pub fn last_frame_texts(&self) -> Vec<&str> {
        self.last_frame()
            .unwrap_or_default()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.pending.commands.clear();
        self.pending.commands.push(DrawCommand::Clear);
    }

    fn draw_image(&mut self, image: &Drawable, at: Point) {
        self.pending.push_image(image, at);
    }

    fn draw_text(&mut self, text: &str, size: u16, anchor: Point, color: Rgb) {
        self.pending.push_text(text, size, anchor, color);
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.pending
            .commands
            .push(DrawCommand::FillRect { bounds, color });
    }

    fn outline_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.pending
            .commands
            .push(DrawCommand::OutlineRect { bounds, color });
    }

    fn present(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.pending.commands));
        Ok(())
    }
}

/// Draws the 800x600 playfield scaled onto a terminal
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    pending: CommandList,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            pending: CommandList::default(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn clear(&mut self) {
        self.pending.commands.clear();
        self.pending.commands.push(DrawCommand::Clear);
    }

    fn draw_image(&mut self, image: &Drawable, at: Point) {
        self.pending.push_image(image, at);
    }

    fn draw_text(&mut self, text: &str, size: u16, anchor: Point, color: Rgb) {
        self.pending.push_text(text, size, anchor, color);
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.pending
            .commands
            .push(DrawCommand::FillRect { bounds, color });
    }

    fn outline_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.pending
            .commands
            .push(DrawCommand::OutlineRect { bounds, color });
    }

    fn present(&mut self) -> Result<()> {
        let commands = std::mem::take(&mut self.pending.commands);
        self.terminal.draw(|frame| paint(frame, &commands))?;
        Ok(())
    }
}

/// Maps screen pixels onto terminal cells
struct CellMapper {
    area: Rect,
}

impl CellMapper {
    fn col(&self, x: i32) -> u16 {
        let x = x.clamp(0, SCREEN_WIDTH) as u32;
        self.area.x + (x * self.area.width as u32 / SCREEN_WIDTH as u32) as u16
    }

    fn row(&self, y: i32) -> u16 {
        let y = y.clamp(0, SCREEN_HEIGHT) as u32;
        self.area.y + (y * self.area.height as u32 / SCREEN_HEIGHT as u32) as u16
    }

    /// Cells covered by `bounds`, at least one cell when any part is on screen
    fn cells(&self, bounds: Bounds) -> Option<Rect> {
        let on_screen = bounds.right() > 0
            && bounds.left() < SCREEN_WIDTH
            && bounds.bottom() > 0
            && bounds.top() < SCREEN_HEIGHT;
        if !on_screen || self.area.is_empty() {
            return None;
        }

        let x0 = self.col(bounds.left()).min(self.area.right() - 1);
        let y0 = self.row(bounds.top()).min(self.area.bottom() - 1);
        let x1 = self.col(bounds.right()).clamp(x0 + 1, self.area.right());
        let y1 = self.row(bounds.bottom()).clamp(y0 + 1, self.area.bottom());
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

fn paint(frame: &mut Frame, commands: &[DrawCommand]) {
    let area = frame.area();
    let mapper = CellMapper { area };

    for command in commands {
        match command {
            DrawCommand::Clear => {
                frame.render_widget(Block::new().style(Style::new().bg(Color::Black)), area);
            }
            DrawCommand::Image { tint, bounds, .. } => {
                if let Some(cells) = mapper.cells(*bounds) {
                    fill_cells(frame.buffer_mut(), cells, '█', Style::new().fg((*tint).into()));
                }
            }
            DrawCommand::FillRect { bounds, color } => {
                if bounds.width > 0
                    && let Some(cells) = mapper.cells(*bounds)
                {
                    fill_cells(frame.buffer_mut(), cells, '█', Style::new().fg((*color).into()));
                }
            }
            DrawCommand::OutlineRect { bounds, color } => {
                if let Some(cells) = mapper.cells(*bounds) {
                    outline_cells(frame.buffer_mut(), cells, Style::new().fg((*color).into()));
                }
            }
            DrawCommand::Text {
                text,
                size,
                anchor,
                color,
            } => {
                let mut style = Style::new().fg((*color).into());
                if *size >= 32 {
                    style = style.add_modifier(Modifier::BOLD);
                }
                let row = mapper.row(anchor.y);
                let width = text.chars().count() as u16;
                let col = mapper.col(anchor.x).saturating_sub(width / 2).max(area.x);
                if row < area.bottom() && col < area.right() {
                    frame
                        .buffer_mut()
                        .set_stringn(col, row, text, (area.right() - col) as usize, style);
                }
            }
        }
    }
}

fn fill_cells(buffer: &mut Buffer, cells: Rect, symbol: char, style: Style) {
    for y in cells.top()..cells.bottom() {
        for x in cells.left()..cells.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_char(symbol).set_style(style);
            }
        }
    }
}

fn outline_cells(buffer: &mut Buffer, cells: Rect, style: Style) {
    let (left, right) = (cells.left(), cells.right() - 1);
    let (top, bottom) = (cells.top(), cells.bottom() - 1);

    // Single-row boxes get brackets so the fill stays visible
    if top == bottom {
        for (x, symbol) in [(left, '['), (right, ']')] {
            if let Some(cell) = buffer.cell_mut((x, top)) {
                cell.set_char(symbol).set_style(style);
            }
        }
        return;
    }

    for y in top..=bottom {
        for x in left..=right {
            let symbol = match (x == left, x == right, y == top, y == bottom) {
                (true, _, true, _) => '┌',
                (_, true, true, _) => '┐',
                (true, _, _, true) => '└',
                (_, true, _, true) => '┘',
                (_, _, true, _) | (_, _, _, true) => '─',
                (true, _, _, _) | (_, true, _, _) => '│',
                _ => continue,
            };
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_char(symbol).set_style(style);
            }
        }
    }
}

const SHIELD_BAR_LENGTH: i32 = 100;
const SHIELD_BAR_HEIGHT: i32 = 10;
const LIFE_ICON_SPACING: i32 = 30;

/// Composes one gameplay frame: every entity, then the HUD
pub fn draw_scene(renderer: &mut dyn Renderer, world: &WorldState, sprites: &Sprites, now: u64) {
    renderer.clear();

    let player = &world.player;
    if !player.hidden {
        let image = match player.look {
            PlayerLook::Base => &sprites.player,
            PlayerLook::Powered => &sprites.player_power,
        };
        renderer.draw_image(image, player.bounds().top_left());
    }

    for enemy in &world.enemies {
        renderer.draw_image(sprites.enemy(enemy.variant), enemy.bounds().top_left());
    }

    for bullet in &world.bullets {
        renderer.draw_image(&sprites.bullet, bullet.bounds().top_left());
    }

    for powerup in &world.powerups {
        renderer.draw_image(sprites.powerup(powerup.kind), powerup.bounds().top_left());
    }

    for explosion in &world.explosions {
        let image = sprites.explosion_frame(explosion.frame);
        let (width, height) = image.size();
        let at = Bounds::centered_on(explosion.center, width, height).top_left();
        renderer.draw_image(image, at);
    }

    draw_hud(renderer, world, sprites);

    if world.banner_active(now) {
        renderer.draw_text(
            "Power Up!",
            32,
            Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 3),
            Rgb::YELLOW,
        );
    }
}

fn draw_hud(renderer: &mut dyn Renderer, world: &WorldState, sprites: &Sprites) {
    renderer.draw_text(
        &world.score.to_string(),
        18,
        Point::new(SCREEN_WIDTH / 2, 10),
        Rgb::WHITE,
    );
    renderer.draw_text(
        &format!("Power: {}", world.player.power_level),
        18,
        Point::new(SCREEN_WIDTH - 120, 35),
        Rgb::WHITE,
    );
    draw_shield_bar(renderer, Point::new(5, 5), world.player.shield);
    draw_lives(
        renderer,
        Point::new(SCREEN_WIDTH - 100, 5),
        world.player.lives,
        &sprites.player_mini,
    );
}

pub fn draw_shield_bar(renderer: &mut dyn Renderer, at: Point, shield: u32) {
    let fill = (shield.min(MAX_SHIELD) as i32 * SHIELD_BAR_LENGTH) / MAX_SHIELD as i32;
    renderer.fill_rect(
        Bounds::new(at.x, at.y, fill, SHIELD_BAR_HEIGHT),
        Rgb::GREEN,
    );
    renderer.outline_rect(
        Bounds::new(at.x, at.y, SHIELD_BAR_LENGTH, SHIELD_BAR_HEIGHT),
        Rgb::WHITE,
    );
}

pub fn draw_lives(renderer: &mut dyn Renderer, at: Point, lives: u32, icon: &Drawable) {
    for i in 0..lives as i32 {
        renderer.draw_image(icon, Point::new(at.x + LIFE_ICON_SPACING * i, at.y));
    }
}

/// Final screen: title and score
pub fn draw_game_over(renderer: &mut dyn Renderer, final_score: u32) {
    renderer.clear();
    renderer.draw_text(
        "GAME OVER",
        64,
        Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 4),
        Rgb::WHITE,
    );
    renderer.draw_text(
        &format!("Score: {final_score}"),
        32,
        Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2),
        Rgb::WHITE,
    );
}
