use crate::{
    error::Error,
    events::{Command, Direction, Event, Events},
    game::{Action, CellSnapshot, Game, Intent, Outcome, Snapshot},
    store::{Kind, Position, Visibility},
};
use num_traits::ToPrimitive;
use ratatui::{
    backend::TermionBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Terminal,
};
use std::{
    fmt, io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use termion::{input::MouseTerminal, raw::IntoRawMode, screen::IntoAlternateScreen};

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let Rect {
        width: grid_width,
        height: grid_height,
        ..
    } = r;
    let vertical_pad = (grid_height / 2).saturating_sub(height / 2);
    let popup_layout = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(vertical_pad),
            Constraint::Length(height),
            Constraint::Length(vertical_pad),
        ])
        .split(r);

    let horizontal_pad = (grid_width / 2).saturating_sub(width / 2);
    Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Length(horizontal_pad),
            Constraint::Length(width),
            Constraint::Length(horizontal_pad),
        ])
        .split(popup_layout[1])[1]
}

fn align_strings_to_char(strings: &[&str], c: char) -> Vec<String> {
    let (firsts, rests): (Vec<_>, Vec<_>) = strings
        .iter()
        .map(|&s| s.split_at(s.find(c).unwrap_or(s.len())))
        .unzip();
    let max_firsts = firsts.iter().map(|&f| f.len()).max().unwrap_or(0);
    let max_rests = rests.iter().map(|&r| r.len()).max().unwrap_or(0);
    firsts
        .into_iter()
        .zip(rests)
        .map(|(first, rest)| format!("{first:>max_firsts$}{rest:<max_rests$}"))
        .collect()
}

#[derive(typed_builder::TypedBuilder)]
pub(crate) struct Ui {
    game: Game,
    cell_width: usize,
    cell_height: usize,
    #[builder(default = Duration::from_millis(250))]
    tick_rate: Duration,
}

const BOMB: &str = "💣";
const FLAG: &str = "⛳";

struct App {
    game: Game,
    active_column: usize,
    active_row: usize,
}

/// One cell of a snapshot, as drawn on screen.
struct Tile<'snap> {
    cell: &'snap CellSnapshot,
    active: bool,
    over: bool,
}

impl<'snap> Tile<'snap> {
    fn new(cell: &'snap CellSnapshot, active: bool, over: bool) -> Self {
        Self { cell, active, over }
    }

    fn is_flagged(&self) -> bool {
        self.cell.visibility == Visibility::Flagged
    }

    fn is_revealed(&self) -> bool {
        self.cell.visibility == Visibility::Revealed
    }

    fn shows_hazard(&self) -> bool {
        self.cell.kind == Some(Kind::Hazard)
    }

    // revealed, or a hazard uncovered by the end of the game
    fn is_exposed(&self) -> bool {
        self.is_revealed() || (self.over && self.shows_hazard() && !self.is_flagged())
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .style(
                Style::default()
                    .bg(Color::Black)
                    .fg(if self.active {
                        Color::Cyan
                    } else if self.cell.detonated {
                        Color::LightRed
                    } else {
                        Color::White
                    })
                    .add_modifier(if self.active || self.cell.detonated {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            )
            .border_type(BorderType::Rounded)
    }

    fn text_style(&self) -> Style {
        Style::default()
            .fg(if self.is_exposed() && self.shows_hazard() {
                Color::LightYellow
            } else if self.is_exposed() {
                Color::White
            } else {
                Color::Black
            })
            .bg(if self.is_exposed() {
                Color::Black
            } else if self.active {
                Color::Cyan
            } else {
                Color::White
            })
    }
}

impl fmt::Display for Tile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_flagged() {
            write!(f, "{FLAG}")
        } else if self.is_exposed() && self.shows_hazard() {
            write!(f, "{BOMB}")
        } else if self.is_revealed() && self.cell.adjacent_hazards > 0 {
            write!(f, "{}", self.cell.adjacent_hazards)
        } else {
            write!(f, " ")
        }
    }
}

impl App {
    fn new(game: Game) -> Self {
        Self {
            game,
            active_column: 0,
            active_row: 0,
        }
    }

    fn step(&mut self, direction: Direction) {
        let rows = self.game.board().rows();
        let columns = self.game.board().columns();
        match direction {
            Direction::Up => self.active_row = self.active_row.saturating_sub(1),
            Direction::Down => self.active_row += usize::from(self.active_row + 1 < rows),
            Direction::Left => self.active_column = self.active_column.saturating_sub(1),
            Direction::Right => {
                self.active_column += usize::from(self.active_column + 1 < columns)
            }
        }
    }

    fn active(&self) -> Position {
        (self.active_row, self.active_column)
    }

    fn act(&mut self, action: Action) -> Result<(), Error> {
        let intent = Intent {
            action,
            position: self.active(),
        };
        match self.game.apply(intent) {
            Ok(response) => {
                log::debug!(
                    "{intent:?} -> {response:?}, {} hazards unflagged",
                    self.game.remaining_hazards()
                );
                if let Some(position) = self.game.detonated() {
                    log::info!("hazard detonated at {position:?}");
                }
                Ok(())
            }
            // nothing to do for moves the game refuses
            Err(err @ (Error::IllegalTransition { .. } | Error::GameOver(_))) => {
                log::debug!("{intent:?} rejected: {err}");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

impl Ui {
    pub(crate) fn run(self) -> Result<(), Error> {
        let events = Events::new(self.tick_rate);
        let mut app = App::new(self.game);
        let rows = app.game.board().rows();
        let columns = app.game.board().columns();
        let seed = app.game.board().seed();

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        ctrlc::set_handler(move || {
            running_clone.store(false, Ordering::SeqCst);
        })
        .map_err(Error::SetHandler)?;

        let cell_width = self.cell_width;
        let cell_height = self.cell_height;

        let padding = 1;

        let grid_width =
            u16::try_from(cell_width * columns + 2 * padding).map_err(Error::ConvertUsizeToU16)?;
        let grid_height =
            u16::try_from(cell_height * rows + 2 * padding).map_err(Error::ConvertUsizeToU16)?;

        let row_constraints = std::iter::repeat(Constraint::Length(
            u16::try_from(cell_height).map_err(Error::ConvertUsizeToU16)?,
        ))
        .take(rows)
        .collect::<Vec<_>>();

        let col_constraints = std::iter::repeat(Constraint::Length(
            u16::try_from(cell_width).map_err(Error::ConvertUsizeToU16)?,
        ))
        .take(columns)
        .collect::<Vec<_>>();

        let stdout = io::stdout()
            .into_raw_mode()
            .map_err(Error::GetStdoutInRawMode)?
            .into_alternate_screen()
            .map_err(Error::GetAlternateScreenForMouseTerminal)?;
        let mouse_terminal = MouseTerminal::from(stdout);
        let backend = TermionBackend::new(mouse_terminal);
        let mut terminal = Terminal::new(backend).map_err(Error::CreateTerminal)?;

        while running.load(Ordering::SeqCst) {
            let snapshot = app.game.snapshot();
            let active = app.active();

            terminal
                .draw(|frame| {
                    let terminal_rect = frame.size();

                    let outer_block = Block::default()
                        .borders(Borders::ALL)
                        .title(Span::styled(
                            format!("Minesweeper (seed {seed})"),
                            Style::default()
                                .fg(Color::LightYellow)
                                .add_modifier(Modifier::BOLD),
                        ))
                        .border_type(BorderType::Rounded);
                    frame.render_widget(outer_block, terminal_rect);

                    let outer_rects = Layout::default()
                        .direction(LayoutDirection::Vertical)
                        .vertical_margin(1)
                        .horizontal_margin(1)
                        .constraints(vec![Constraint::Min(grid_height)])
                        .split(terminal_rect);

                    let mines_rect = outer_rects[0];

                    let horizontal_pad_block_width = terminal_rect
                        .width
                        .checked_sub(grid_width)
                        .unwrap_or(terminal_rect.width)
                        / 2;
                    let mines_rects = Layout::default()
                        .direction(LayoutDirection::Horizontal)
                        .constraints(vec![
                            Constraint::Min(horizontal_pad_block_width),
                            Constraint::Length(grid_width),
                            // the layout leaves the right side a little short
                            Constraint::Min(horizontal_pad_block_width.saturating_sub(1)),
                        ])
                        .split(mines_rect);

                    let vertical_pad_block_height = mines_rect
                        .height
                        .checked_sub(grid_height)
                        .unwrap_or(mines_rect.height)
                        / 2;
                    let middle_mines_rects = Layout::default()
                        .direction(LayoutDirection::Vertical)
                        .constraints(vec![
                            Constraint::Min(vertical_pad_block_height),
                            Constraint::Length(grid_height),
                            Constraint::Min(vertical_pad_block_height),
                        ])
                        .split(mines_rects[1]);

                    let help_text_block = List::new(
                        align_strings_to_char(
                            &[
                                "movement: hjkl / ← ↓ ↑ →",
                                "reveal tile: spacebar",
                                "flag tile: f",
                                "quit: q",
                            ],
                            ':',
                        )
                        .into_iter()
                        .map(|line| format!("{:^width$}", line, width = usize::from(grid_width)))
                        .map(ListItem::new)
                        .collect::<Vec<_>>(),
                    )
                    .block(Block::default().borders(Borders::NONE));
                    frame.render_widget(help_text_block, middle_mines_rects[2]);

                    let info_text_split_rects = Layout::default()
                        .direction(LayoutDirection::Vertical)
                        .constraints(vec![
                            Constraint::Min(vertical_pad_block_height.saturating_sub(3)),
                            Constraint::Length(3),
                        ])
                        .split(middle_mines_rects[0]);

                    let info_mines_rects = Layout::default()
                        .direction(LayoutDirection::Horizontal)
                        .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
                        .split(info_text_split_rects[1]);
                    frame.render_widget(flags_gauge(&snapshot), info_mines_rects[0]);

                    let mines_text = Paragraph::new(snapshot.hazards.to_string())
                        .block(
                            Block::default().borders(Borders::ALL).title(Span::styled(
                                BOMB,
                                Style::default()
                                    .fg(Color::LightYellow)
                                    .add_modifier(Modifier::BOLD),
                            )),
                        )
                        .alignment(Alignment::Center);
                    frame.render_widget(mines_text, info_mines_rects[1]);

                    let mines_block = Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded);

                    let final_mines_rect = middle_mines_rects[1];
                    frame.render_widget(mines_block, final_mines_rect);

                    let row_rects = Layout::default()
                        .direction(LayoutDirection::Vertical)
                        .vertical_margin(1)
                        .horizontal_margin(0)
                        .constraints(row_constraints.clone())
                        .split(final_mines_rect);

                    let over = snapshot.outcome.is_over();
                    for (r, row_rect) in row_rects.iter().enumerate() {
                        let col_rects = Layout::default()
                            .direction(LayoutDirection::Horizontal)
                            .vertical_margin(0)
                            .horizontal_margin(1)
                            .constraints(col_constraints.clone())
                            .split(*row_rect);

                        for (c, cell_rect) in col_rects.iter().enumerate() {
                            let Some(cell) = snapshot.cell((r, c)) else {
                                continue;
                            };
                            let tile = Tile::new(cell, active == (r, c), over);
                            let single_row_text = format!(
                                "{:^length$}",
                                tile.to_string(),
                                length = cell_width.saturating_sub(2)
                            );
                            let pad_line = " ".repeat(cell_width);

                            // the text line and the top and bottom borders are never padding
                            let num_pad_lines = cell_height.saturating_sub(3);

                            let text = std::iter::repeat(pad_line.clone())
                                .take(num_pad_lines / 2)
                                .chain(std::iter::once(single_row_text))
                                .chain(std::iter::repeat(pad_line).take(num_pad_lines / 2))
                                .collect::<Vec<_>>()
                                .join("\n");

                            let cell_text = Paragraph::new(text)
                                .block(tile.block())
                                .style(tile.text_style());
                            frame.render_widget(cell_text, *cell_rect);
                        }
                    }

                    // once the game is decided, display a banner saying how
                    if over {
                        let won = snapshot.outcome == Outcome::Win;
                        let area = centered_rect(20, 3, final_mines_rect);
                        frame.render_widget(Clear, area); // this clears out the background
                        frame.render_widget(
                            Paragraph::new(format!("You {}!", if won { "won" } else { "lose" }))
                                .block(
                                    Block::default()
                                        .borders(Borders::ALL)
                                        .border_type(BorderType::Thick)
                                        .border_style(
                                            Style::default()
                                                .fg(if won {
                                                    Color::LightGreen
                                                } else {
                                                    Color::Magenta
                                                })
                                                .add_modifier(Modifier::BOLD),
                                        )
                                        .style(Style::default().add_modifier(Modifier::BOLD)),
                                )
                                .alignment(Alignment::Center)
                                .style(Style::default()),
                            area,
                        );
                    }
                })
                .map_err(Error::DrawToTerminal)?;

            match events.next().map_err(Error::GetEvent)? {
                Event::Input(Command::Quit) => break,
                Event::Input(Command::Move(direction)) => app.step(direction),
                Event::Input(Command::Act(action)) => app.act(action)?,
                Event::Tick => {}
            }
        }

        Ok(())
    }
}

/// Flags still available, against the total hazard count.
fn flags_gauge(snapshot: &Snapshot) -> Gauge<'static> {
    let available = snapshot.hazards.saturating_sub(snapshot.flags);
    let ratio = match (available.to_f64(), snapshot.hazards.to_f64()) {
        (Some(available), Some(hazards)) if hazards > 0.0 => (available / hazards).clamp(0.0, 1.0),
        _ => 0.0,
    };

    Gauge::default()
        .block(
            Block::default().borders(Borders::ALL).title(Span::styled(
                FLAG,
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            )),
        )
        .gauge_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .label(available.to_string())
        .ratio(ratio)
}
