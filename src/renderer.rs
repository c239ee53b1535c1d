use color_eyre::{Result, eyre::eyre};
use glam::Vec2;
use image::DynamicImage;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use ratatui_image::{Image, Resize, picker::Picker, protocol::Protocol};
use std::time::Duration;

use crate::assets::{SpriteSheet, Sprites};
use crate::clock::{format_clock, format_survival};
use crate::config::GameConfig;
use crate::session::Session;
use crate::state::GameState;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub session: &'a Session,
    pub elapsed: Duration,
}

/// Sprite frames already converted to terminal cells for one field size
struct SpriteCache {
    field: Rect,
    player: Vec<CellSprite>,
    enemy: Vec<CellSprite>,
    heart: CellSprite,
}

struct CellSprite {
    protocol: Protocol,
    width: u16,
    height: u16,
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    config: GameConfig,
    sprites: Sprites,
    cache: Option<SpriteCache>,
}

/// Title shown in the terminal's title bar
pub fn window_title(elapsed: Duration) -> String {
    format!("KillBots - Time: {}", format_clock(elapsed))
}

/// Splits the screen into the one-row HUD, the bordered playfield and its
/// inner drawing area, and the controls row.
pub fn layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let hud = Rect {
        height: area.height.min(1),
        ..area
    };
    let controls = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    let border = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(2),
        ..area
    };
    let field = Block::default().borders(Borders::ALL).inner(border);
    (hud, border, field, controls)
}

/// Maps a world position (+Y up) to the terminal cell inside `field`
pub fn to_cell(pos: Vec2, field: Rect, cfg: &GameConfig) -> (u16, u16) {
    let fx = (pos.x / cfg.width).clamp(0.0, 1.0);
    let fy = ((cfg.height - pos.y) / cfg.height).clamp(0.0, 1.0);
    let col = ((fx * f32::from(field.width)) as u16).min(field.width.saturating_sub(1));
    let row = ((fy * f32::from(field.height)) as u16).min(field.height.saturating_sub(1));
    (field.x + col, field.y + row)
}

impl GameRenderer {
    pub fn new(config: GameConfig, sprites: Sprites) -> Self {
        Self {
            config,
            sprites,
            cache: None,
        }
    }

    /// Rebuilds the cell sprites when the playfield size changes. Call
    /// before every draw; does nothing when the size is unchanged.
    pub fn prepare(&mut self, area: Rect) -> Result<()> {
        let (_, _, field, _) = layout(area);
        if self.cache.as_ref().is_some_and(|c| c.field == field) {
            return Ok(());
        }
        if field.width == 0 || field.height == 0 {
            self.cache = None;
            return Ok(());
        }

        // One cell covers this many world units, so sprites keep their
        // world size whatever the terminal size
        let font = (
            (self.config.width / f32::from(field.width)).ceil().max(1.0) as u16,
            (self.config.height / f32::from(field.height)).ceil().max(1.0) as u16,
        );
        let picker = Picker::from_fontsize(font);

        let convert = |sheet: &SpriteSheet| -> Result<Vec<CellSprite>> {
            (0..sheet.len())
                .map(|i| to_cell_sprite(&picker, sheet.frame(i), font))
                .collect()
        };

        let cache = SpriteCache {
            field,
            player: convert(&self.sprites.player)?,
            enemy: convert(&self.sprites.enemy)?,
            heart: to_cell_sprite(&picker, self.sprites.heart.frame(0), font)?,
        };
        log::debug!("sprite cache rebuilt for {}x{} field", field.width, field.height);
        self.cache = Some(cache);
        Ok(())
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = frame.area();
        let (hud, border, field, controls) = layout(area);
        let session = view.session;

        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
            border,
        );

        if let Some(cache) = &self.cache {
            if let Some(heart) = &session.heart {
                self.draw_sprite(frame, &cache.heart, heart.pos, field);
            }
            for enemy in &session.enemies {
                let sprite = &cache.enemy[enemy.animation.frame % cache.enemy.len()];
                self.draw_sprite(frame, sprite, enemy.pos, field);
            }
            let player = &cache.player[session.player.animation.frame % cache.player.len()];
            self.draw_sprite(frame, player, session.player.pos, field);
        }

        // Bullets go straight into the buffer
        let buffer = frame.buffer_mut();
        for bullet in &session.bullets {
            let (x, y) = to_cell(bullet.pos, field, &self.config);
            buffer.set_string(x, y, "•", Style::default().fg(Color::White));
        }

        let hearts = "♥ ".repeat(usize::from(session.player.health));
        let stats = Line::from(vec![
            Span::styled(
                hearts,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Kills: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", session.kills),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(stats), hud);

        let timer = Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_clock(view.elapsed),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(timer).centered(), hud);

        let hint = Line::from(Span::styled(
            "[WASD/Arrows: Move] [Space: Fire] [Esc/P: Pause]",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(hint).centered(), controls);
    }

    /// Draws a sprite centred on `pos`, nudged back inside the field when it
    /// would poke out of an edge
    fn draw_sprite(&self, frame: &mut Frame, sprite: &CellSprite, pos: Vec2, field: Rect) {
        if sprite.width > field.width || sprite.height > field.height {
            return;
        }
        let (cx, cy) = to_cell(pos, field, &self.config);
        let x = cx
            .saturating_sub(sprite.width / 2)
            .clamp(field.x, field.right() - sprite.width);
        let y = cy
            .saturating_sub(sprite.height / 2)
            .clamp(field.y, field.bottom() - sprite.height);
        frame.render_widget(
            Image::new(&sprite.protocol),
            Rect::new(x, y, sprite.width, sprite.height),
        );
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        let lines = overlay_lines("Game Paused", view, "[C] Continue");
        render_overlay(frame, lines, Color::Yellow);
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let lines = overlay_lines("Game Over", view, "[R] Retry");
        render_overlay(frame, lines, Color::Red);
    }
}

fn to_cell_sprite(picker: &Picker, image: &DynamicImage, font: (u16, u16)) -> Result<CellSprite> {
    let width = (image.width() as u16).div_ceil(font.0).max(1);
    let height = (image.height() as u16).div_ceil(font.1).max(1);
    let protocol = picker
        .new_protocol(
            image.clone(),
            Rect::new(0, 0, width, height),
            Resize::Fit(None),
        )
        .map_err(|err| eyre!("could not convert sprite for the terminal: {err:?}"))?;
    Ok(CellSprite {
        protocol,
        width,
        height,
    })
}

/// Title, stats and key hints shared by the pause and game over screens
pub fn overlay_lines(title: &str, view: &RenderView, action_hint: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(title.to_string()).centered().bold(),
        Line::from(""),
        Line::from(format!("Kills: {}", view.session.kills))
            .centered()
            .yellow()
            .bold(),
        Line::from(format!("Survived for: {}", format_survival(view.elapsed)))
            .centered()
            .cyan(),
        Line::from(""),
        Line::from(action_hint.to_string()).centered().white(),
        Line::from("[Q] Quit").centered().white(),
    ]
}

fn render_overlay(frame: &mut Frame, lines: Vec<Line<'static>>, accent: Color) {
    let area = frame.area();
    let width = 40u16.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let overlay = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, overlay);
    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(accent)),
            )
            .alignment(Alignment::Center),
        overlay,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(state: GameState, session: &Session, elapsed: Duration) -> String {
        let cfg = GameConfig::default();
        let mut renderer = GameRenderer::new(cfg.clone(), Sprites::blank(&cfg));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        renderer.prepare(Rect::new(0, 0, 100, 30)).unwrap();
        let view = RenderView {
            game_state: state,
            session,
            elapsed,
        };
        terminal.draw(|frame| renderer.render(frame, &view)).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_window_title() {
        assert_eq!(
            window_title(Duration::from_secs(75)),
            "KillBots - Time: 1:15"
        );
    }

    #[test]
    fn test_to_cell_flips_y() {
        let cfg = GameConfig::default();
        let field = Rect::new(1, 2, 80, 20);
        assert_eq!(to_cell(Vec2::new(0.0, 600.0), field, &cfg), (1, 2));
        assert_eq!(to_cell(Vec2::new(0.0, 0.0), field, &cfg), (1, 21));
        assert_eq!(to_cell(Vec2::new(800.0, 0.0), field, &cfg), (80, 21));
        assert_eq!(to_cell(Vec2::new(400.0, 300.0), field, &cfg), (41, 12));
    }

    #[test]
    fn test_layout_reserves_hud_and_controls() {
        let (hud, border, field, controls) = layout(Rect::new(0, 0, 100, 30));
        assert_eq!(hud, Rect::new(0, 0, 100, 1));
        assert_eq!(controls, Rect::new(0, 29, 100, 1));
        assert_eq!(border, Rect::new(0, 1, 100, 28));
        assert_eq!(field, Rect::new(1, 2, 98, 26));
    }

    #[test]
    fn test_playing_hud_shows_kills() {
        let cfg = GameConfig::default();
        let mut session = Session::new(&cfg);
        session.kills = 12;
        let text = draw(GameState::Playing, &session, Duration::from_secs(5));
        assert!(text.contains("Kills: 12"));
        assert!(text.contains("Time: 0:05"));
    }

    #[test]
    fn test_pause_overlay() {
        let cfg = GameConfig::default();
        let mut session = Session::new(&cfg);
        session.kills = 4;
        let text = draw(GameState::Paused, &session, Duration::from_secs(61));
        assert!(text.contains("Game Paused"));
        assert!(text.contains("Kills: 4"));
        assert!(text.contains("Survived for: 1 minutes 1 seconds"));
        assert!(text.contains("[C] Continue"));
        assert!(text.contains("[Q] Quit"));
    }

    #[test]
    fn test_game_over_overlay() {
        let cfg = GameConfig::default();
        let session = Session::new(&cfg);
        let text = draw(GameState::GameOver, &session, Duration::from_secs(3));
        assert!(text.contains("Game Over"));
        assert!(text.contains("[R] Retry"));
        assert!(!text.contains("[C] Continue"));
    }
}
