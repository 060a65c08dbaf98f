use crate::theme::{ACTIVE_STYLE, PADDING_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE};
use calgrid::{calendar::ACTIVE_CLASS, month_name, Calendar, DayType, Element};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};

static HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = 7 * DAY_WIDTH;

const TITLE_LINE: u16 = 0;

const HEADER_LINE: u16 = 1;

/// Number of lines taken up by the title, the header, and the header's rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

const ACS_HLINE: char = '─';

/// Draws the element tree most recently rendered by a [`Calendar`]
#[derive(Clone, Copy, Debug)]
pub(crate) struct MonthView<'a> {
    calendar: &'a Calendar,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(calendar: &'a Calendar) -> Self {
        MonthView { calendar }
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let [_, area, _] = Layout::horizontal([
            Constraint::Length(left),
            Constraint::Length(MAIN_WIDTH.min(area.width)),
            Constraint::Min(0),
        ])
        .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        let date = self.calendar.date();
        canvas.draw_title(&format!("{} {}", month_name(date), date.year()));
        canvas.draw_header();
        // The container holds a single month element
        let Some(month) = self.calendar.container().children().first() else {
            return;
        };
        for (week_no, week) in std::iter::zip(0u16.., month.children()) {
            for (col, day) in std::iter::zip(0u16.., week.children()) {
                canvas.draw_day(week_no, col, day);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.len()).unwrap_or(u16::MAX);
        self.mvprint(
            TITLE_LINE,
            MAIN_WIDTH.saturating_sub(width) / 2,
            title,
            Some(TITLE_STYLE),
        );
    }

    fn draw_header(&mut self) {
        self.mvprint(HEADER_LINE, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(HEADER_LINE + 1, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, col: u16, day: &Element) {
        let content = day.inner_html();
        let is_today = day.has_class(DayType::Today.as_str());
        let (s, mut style) = if is_today {
            (format!("[{content:>2}]"), TODAY_STYLE)
        } else if day.has_class(DayType::Prev.as_str()) || day.has_class(DayType::Next.as_str())
        {
            (format!(" {content:>2} "), PADDING_STYLE)
        } else {
            (format!(" {content:>2} "), Style::new())
        };
        if day.has_class(ACTIVE_CLASS) {
            style = style.patch(ACTIVE_STYLE);
        }
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            col * DAY_WIDTH,
            s,
            Some(style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect passed to the Paragraph must lie entirely within the
            // buffer, so clip it to the calendar's area.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
