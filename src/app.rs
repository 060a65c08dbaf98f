use crate::help::Help;
use crate::theme::BASE_STYLE;
use crate::view::MonthView;
use calgrid::{Calendar, OutOfTimeError};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use std::io::{self, Write};

#[derive(Debug)]
pub(crate) struct App {
    calendar: Calendar,
    state: AppState,
}

impl App {
    pub(crate) fn new(calendar: Calendar) -> App {
        App {
            calendar,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or tried to move
    // past the end of time
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.navigate(|cal| cal.shift_days(-1)),
                KeyCode::Char('l') | KeyCode::Right => self.navigate(|cal| cal.shift_days(1)),
                KeyCode::Char('k') | KeyCode::Up => self.navigate(|cal| cal.shift_days(-7)),
                KeyCode::Char('j') | KeyCode::Down => self.navigate(|cal| cal.shift_days(7)),
                KeyCode::Char('w') | KeyCode::PageUp => self.navigate(|cal| cal.shift_months(-1)),
                KeyCode::Char('z') | KeyCode::PageDown => {
                    self.navigate(|cal| cal.shift_months(1))
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.navigate(|cal| Ok(cal.jump_to_today()))
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Move the reference date and re-render.  If the new month cannot be
    // laid out, the old date is restored.
    fn navigate<F>(&mut self, shift: F) -> bool
    where
        F: FnOnce(&mut Calendar) -> Result<&mut Calendar, OutOfTimeError>,
    {
        let previous = self.calendar.date();
        if shift(&mut self.calendar).and_then(Calendar::render).is_ok() {
            true
        } else {
            self.calendar.set_date(previous);
            false
        }
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

fn beep() -> io::Result<()> {
    io::stdout().write_all(b"\x07")
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        MonthView::new(&self.calendar).render(area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid::{Element, MonthMatrix, OptionsOverride};
    use time::macros::date;

    fn app() -> App {
        let mut calendar = Calendar::with_today(
            Element::new("div"),
            OptionsOverride::new(),
            date!(2025 - 01 - 22),
        );
        calendar.init().unwrap();
        App::new(calendar)
    }

    fn active(app: &App) -> Option<String> {
        app.calendar
            .container()
            .children()
            .iter()
            .flat_map(Element::children)
            .flat_map(Element::children)
            .find(|day| day.has_class("active"))
            .map(|day| day.inner_html().to_owned())
    }

    #[test]
    fn test_navigation_rerenders() {
        let mut app = app();
        assert_eq!(active(&app).as_deref(), Some("22"));
        assert!(app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.calendar.date(), date!(2025 - 01 - 23));
        assert_eq!(active(&app).as_deref(), Some("23"));
        assert!(app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Down));
        assert_eq!(app.calendar.date(), date!(2025 - 02 - 06));
        assert_eq!(
            app.calendar.month().map(MonthMatrix::first_of_month),
            Some(date!(2025 - 02 - 01))
        );
        assert!(app.handle_key(KeyCode::PageUp));
        assert_eq!(app.calendar.date(), date!(2025 - 01 - 06));
        assert!(app.handle_key(KeyCode::Char('k')));
        assert!(app.handle_key(KeyCode::Left));
        assert_eq!(app.calendar.date(), date!(2024 - 12 - 29));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.calendar.date(), date!(2025 - 01 - 22));
        assert_eq!(active(&app).as_deref(), Some("22"));
    }

    #[test]
    fn test_end_of_time() {
        let mut app = app();
        app.calendar.set_date(date!(9999 - 11 - 30)).render().unwrap();
        assert!(!app.handle_key(KeyCode::Char('z')));
        assert_eq!(app.calendar.date(), date!(9999 - 11 - 30));
        assert!(!app.handle_key(KeyCode::Right));
        assert_eq!(app.calendar.date(), date!(9999 - 11 - 30));
        assert_eq!(active(&app).as_deref(), Some("30"));
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.calendar.date(), date!(2025 - 01 - 22));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.quitting());
    }
}
