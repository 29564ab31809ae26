use crate::game::Action;
use std::{io, sync::mpsc, thread, time::Duration};
use termion::{event::Key, input::TermRead};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key press asks the host to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Move(Direction),
    Act(Action),
    Quit,
}

impl Command {
    pub(crate) fn from_key(key: Key) -> Option<Self> {
        Some(match key {
            // movement using arrow keys or vim movement keys
            Key::Up | Key::Char('k') => Self::Move(Direction::Up),
            Key::Down | Key::Char('j') => Self::Move(Direction::Down),
            Key::Left | Key::Char('h') => Self::Move(Direction::Left),
            Key::Right | Key::Char('l') => Self::Move(Direction::Right),
            Key::Char(' ') => Self::Act(Action::Reveal),
            Key::Char('f') => Self::Act(Action::ToggleFlag),
            Key::Char('q') | Key::Ctrl('c') => Self::Quit,
            _ => return None,
        })
    }
}

pub(crate) enum Event {
    Input(Command),
    Tick,
}

/// A small event pump over termion input and ticks. Each source runs on its
/// own thread and feeds a common `Receiver`; keys without a binding are
/// dropped before they reach it.
pub(crate) struct Events {
    rx: mpsc::Receiver<Event>,
    _input_handle: thread::JoinHandle<()>,
    _tick_handle: thread::JoinHandle<()>,
}

impl Events {
    pub(crate) fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rx,
            _input_handle: {
                let tx = tx.clone();
                thread::spawn(move || {
                    let stdin = io::stdin();
                    for command in stdin.keys().flatten().filter_map(Command::from_key) {
                        if let Err(err) = tx.send(Event::Input(command)) {
                            log::warn!("input channel closed: {err}");
                            return;
                        }
                    }
                })
            },
            _tick_handle: {
                thread::spawn(move || loop {
                    if tx.send(Event::Tick).is_err() {
                        break;
                    }
                    thread::sleep(tick_rate);
                })
            },
        }
    }

    pub(crate) fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
